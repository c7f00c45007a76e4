//! Nominal style attributes of faces and requests.

use crate::config::{DEFAULT_STRETCH, DEFAULT_WEIGHT};

/// The style of a font.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// The default, typically upright style.
    #[default]
    Normal,
    /// A cursive style with custom letterforms.
    Italic,
    /// A slanted version of the normal style.
    Oblique,
}

impl FontStyle {
    /// Conceptual distance between two styles.
    ///
    /// Italic and oblique are closer to each other than either is to normal.
    pub fn distance(self, other: Self) -> u16 {
        if self == other {
            0
        } else if self != Self::Normal && other != Self::Normal {
            1
        } else {
            2
        }
    }
}

/// Attributes of a face's default instance.
///
/// `weight` is in `wght` units (100-900 for common fonts) and `stretch` in
/// `wdth` percent (100 is normal).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceStyle {
    pub style: FontStyle,
    pub weight: f32,
    pub stretch: f32,
}

impl FaceStyle {
    pub const fn new(style: FontStyle, weight: f32, stretch: f32) -> Self {
        Self { style, weight, stretch }
    }

    pub const fn regular() -> Self {
        Self::new(FontStyle::Normal, DEFAULT_WEIGHT, DEFAULT_STRETCH)
    }

    pub const fn italic() -> Self {
        Self::new(FontStyle::Italic, DEFAULT_WEIGHT, DEFAULT_STRETCH)
    }

    pub const fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }
}

impl Default for FaceStyle {
    fn default() -> Self {
        Self::regular()
    }
}
