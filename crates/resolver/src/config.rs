//! Configuration constants and engine settings.

use std::num::NonZeroUsize;

/// Weight targeted when a request leaves `weight` unset (CSS `normal`).
pub const DEFAULT_WEIGHT: f32 = 400.0;

/// Stretch targeted when a request leaves `stretch` unset, in `wdth` percent.
pub const DEFAULT_STRETCH: f32 = 100.0;

/// Slant used when `italic` is requested from a face that only has a `slnt` axis.
///
/// Matches the CSS `oblique` default of 14 degrees; `slnt` is negative for
/// right-leaning glyphs.
pub const DEFAULT_OBLIQUE_SLANT: f32 = -14.0;

/// Default number of font instances kept by the instance cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 256;

/// Settings for a [`FontEngine`](crate::FontEngine).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Maximum number of cached instances. `None` keeps every instance.
    pub cache_capacity: Option<NonZeroUsize>,
    /// Slant value substituted for `italic: true` on slant-only faces.
    pub oblique_slant: f32,
}

impl EngineConfig {
    pub fn with_cache_capacity(mut self, capacity: Option<NonZeroUsize>) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_oblique_slant(mut self, slant: f32) -> Self {
        self.oblique_slant = slant;
        self
    }

    /// Unbounded cache, default oblique slant.
    pub fn unbounded() -> Self {
        Self::default().with_cache_capacity(None)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_capacity: NonZeroUsize::new(DEFAULT_CACHE_CAPACITY),
            oblique_slant: DEFAULT_OBLIQUE_SLANT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.cache_capacity.map(NonZeroUsize::get), Some(256));
        assert_eq!(config.oblique_slant, -14.0);
    }

    #[test]
    fn unbounded_config() {
        assert_eq!(EngineConfig::unbounded().cache_capacity, None);
    }
}
