//! Style requests issued by the layout side.

use std::collections::BTreeMap;

use read_fonts::types::Tag;

use crate::variant::FontStyle;

/// A semantic style request for one run of text.
///
/// Every field is optional; unset fields leave the corresponding axis at the
/// face default. `extra_axes` holds raw axis values that override anything
/// derived from the semantic fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRequest {
    pub family: String,
    pub weight: Option<f32>,
    pub italic: Option<bool>,
    /// Slant in `slnt` degrees (negative leans right).
    pub slant: Option<f32>,
    /// Width in `wdth` percent.
    pub stretch: Option<f32>,
    /// Text size in points, used for automatic optical sizing.
    pub size: Option<f32>,
    pub extra_axes: BTreeMap<Tag, f32>,
}

impl StyleRequest {
    pub fn new(family: impl Into<String>) -> Self {
        Self { family: family.into(), ..Default::default() }
    }

    pub fn weight(mut self, weight: f32) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn slant(mut self, degrees: f32) -> Self {
        self.slant = Some(degrees);
        self
    }

    pub fn stretch(mut self, stretch: f32) -> Self {
        self.stretch = Some(stretch);
        self
    }

    pub fn size(mut self, points: f32) -> Self {
        self.size = Some(points);
        self
    }

    /// Set a raw axis value. A later call for the same tag replaces the earlier one.
    pub fn axis(mut self, tag: Tag, value: f32) -> Self {
        self.extra_axes.insert(tag, value);
        self
    }

    /// The nominal style this request asks for, used when scoring faces.
    pub fn font_style(&self) -> FontStyle {
        match (self.italic, self.slant) {
            (Some(true), _) => FontStyle::Italic,
            (_, Some(slant)) if slant != 0.0 => FontStyle::Oblique,
            _ => FontStyle::Normal,
        }
    }
}
