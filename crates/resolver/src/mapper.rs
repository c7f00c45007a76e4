//! Translation of semantic style fields into axis values.

use log::{trace, warn};
use read_fonts::types::Tag;

use crate::{
    catalog::FontFace,
    config::EngineConfig,
    coords::AxisCoordinates,
    registry::{AxisRegistry, SemanticRole},
    request::StyleRequest,
};

/// Maps a [`StyleRequest`] onto the axes of one face.
///
/// Fields the face has no axis for are dropped silently. Values are not
/// clamped here; that is the resolver's job.
#[derive(Debug, Clone, Copy)]
pub struct SemanticMapper<'r> {
    registry: &'r AxisRegistry,
    oblique_slant: f32,
}

impl SemanticMapper<'static> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_registry(AxisRegistry::standard(), config)
    }
}

impl<'r> SemanticMapper<'r> {
    pub fn with_registry(registry: &'r AxisRegistry, config: &EngineConfig) -> Self {
        Self { registry, oblique_slant: config.oblique_slant }
    }

    pub fn registry(&self) -> &'r AxisRegistry {
        self.registry
    }

    pub fn map(&self, face: &FontFace, request: &StyleRequest) -> AxisCoordinates {
        let axes = face.axes();
        let has_italic_axis = axes.find_role(self.registry, SemanticRole::ItalicToggle).is_some();
        let mut coords = AxisCoordinates::new();

        for (tag, range) in axes.iter() {
            let value = match self.registry.role_of(tag) {
                SemanticRole::Weight => request.weight,
                SemanticRole::Width => request.stretch,
                SemanticRole::OpticalSize => request.size,
                SemanticRole::ItalicToggle => {
                    request.italic.map(|italic| if italic { range.max() } else { range.min() })
                }
                // An ital axis, when present, owns the italic request.
                SemanticRole::Slant => request.slant.or_else(|| {
                    if has_italic_axis {
                        return None;
                    }
                    request.italic.map(|italic| if italic { self.oblique_slant } else { 0.0 })
                }),
                SemanticRole::None => None,
            };
            if let Some(value) = value {
                trace!("{}: {tag} <- {value}", face.id());
                set_finite(&mut coords, tag, value);
            }
        }

        for (&tag, &value) in &request.extra_axes {
            if axes.supports(tag) {
                trace!("{}: {tag} <- {value} (explicit)", face.id());
                set_finite(&mut coords, tag, value);
            } else {
                trace!("{}: no {tag} axis, dropping {value}", face.id());
            }
        }

        coords
    }
}

fn set_finite(coords: &mut AxisCoordinates, tag: Tag, value: f32) {
    if value.is_finite() {
        coords.set(tag, value);
    } else {
        warn!("ignoring non-finite value {value} for {tag}");
    }
}
