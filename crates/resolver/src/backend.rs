//! Instantiation backends.
//!
//! The cache treats the backend as an opaque collaborator: it hands over a
//! face and its clamped coordinates and stores whatever comes back.
//! [`SkrifaBackend`] is the stock implementation, producing instances that
//! carry the normalized variation location and the metrics at that location.

use std::sync::Arc;

use read_fonts::{FontRef, TableProvider, types::F2Dot14};
use skrifa::{
    GlyphId, MetadataProvider,
    instance::{Location, Size},
    metrics::Metrics,
};

use crate::{
    catalog::{FaceId, FontFace},
    coords::AxisCoordinates,
    error::BackendError,
};

/// Builds a renderable instance from a face and axis coordinates.
pub trait InstanceBackend: Send + Sync {
    type Instance: Send + Sync;

    fn instantiate(
        &self,
        face: &FontFace,
        coords: &AxisCoordinates,
    ) -> Result<Self::Instance, BackendError>;
}

/// Line and face metrics of an instance, in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceMetrics {
    pub units_per_em: u16,
    pub glyph_count: u16,
    pub ascent: f32,
    pub descent: f32,
    pub leading: f32,
    pub cap_height: Option<f32>,
    pub x_height: Option<f32>,
    pub italic_angle: f32,
}

impl From<Metrics> for InstanceMetrics {
    fn from(metrics: Metrics) -> Self {
        Self {
            units_per_em: metrics.units_per_em,
            glyph_count: metrics.glyph_count,
            ascent: metrics.ascent,
            descent: metrics.descent,
            leading: metrics.leading,
            cap_height: metrics.cap_height,
            x_height: metrics.x_height,
            italic_angle: metrics.italic_angle,
        }
    }
}

/// A face fixed at one point of its design space.
#[derive(Debug)]
pub struct FontInstance {
    face: FaceId,
    data: Arc<[u8]>,
    coords: AxisCoordinates,
    location: Location,
    metrics: InstanceMetrics,
}

impl FontInstance {
    pub fn face(&self) -> &FaceId {
        &self.face
    }

    /// The user-space coordinates the instance was built for.
    pub fn coords(&self) -> &AxisCoordinates {
        &self.coords
    }

    /// Normalized coordinates in font axis order, ready for shaping or scaling.
    pub fn normalized_coords(&self) -> &[F2Dot14] {
        self.location.coords()
    }

    pub fn metrics(&self) -> &InstanceMetrics {
        &self.metrics
    }

    pub fn data(&self) -> &Arc<[u8]> {
        &self.data
    }

    /// Re-borrow the underlying font.
    pub fn font_ref(&self) -> Result<FontRef<'_>, BackendError> {
        Ok(FontRef::from_index(&self.data, self.face.index())?)
    }

    /// Advance width of `glyph_id` at this instance, in font units.
    pub fn advance_width(&self, glyph_id: u32) -> Option<f32> {
        let font = self.font_ref().ok()?;
        font.glyph_metrics(Size::unscaled(), self.location.coords())
            .advance_width(GlyphId::new(glyph_id))
    }
}

/// Instantiates faces with skrifa from the bytes attached to each face.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkrifaBackend;

impl InstanceBackend for SkrifaBackend {
    type Instance = FontInstance;

    fn instantiate(
        &self,
        face: &FontFace,
        coords: &AxisCoordinates,
    ) -> Result<FontInstance, BackendError> {
        let data = face.data().ok_or(BackendError::NoFontData)?;
        let font = FontRef::from_index(data, face.id().index())?;
        let axes = font.axes();
        if !coords.is_empty() && axes.is_empty() {
            return Err(BackendError::NotVariableFont);
        }
        font.head().map_err(|_| BackendError::MissingTable("head"))?;

        let location = axes.location(coords.iter());
        let metrics = font.metrics(Size::unscaled(), location.coords()).into();

        Ok(FontInstance {
            face: face.id().clone(),
            data: Arc::clone(data),
            coords: coords.clone(),
            location,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{catalog::FaceAxisSupport, registry::WGHT, variant::FaceStyle};

    fn face(data: Option<&'static [u8]>) -> FontFace {
        let id = FaceId::new("test.ttf", 0);
        let face = FontFace::new(id, "Test", FaceStyle::regular(), FaceAxisSupport::new());
        match data {
            Some(data) => face.with_data(Arc::from(data)),
            None => face,
        }
    }

    #[test]
    fn missing_data_fails() {
        let err = SkrifaBackend.instantiate(&face(None), &AxisCoordinates::new()).unwrap_err();
        assert!(matches!(err, BackendError::NoFontData));
    }

    #[test]
    fn garbage_data_fails() {
        let err = SkrifaBackend
            .instantiate(&face(Some(&b"not a font"[..])), &AxisCoordinates::new())
            .unwrap_err();
        assert!(matches!(err, BackendError::Parse(_)));
    }

    #[test]
    fn static_font_rejects_coordinates() {
        let coords: AxisCoordinates = [(WGHT, 700.0)].into_iter().collect();
        let err = SkrifaBackend
            .instantiate(&face(Some(font_test_data::CMAP12_FONT1)), &coords)
            .unwrap_err();
        assert!(matches!(err, BackendError::NotVariableFont));
    }

    #[test]
    fn variable_instance_has_normalized_location() {
        let face = face(Some(font_test_data::VAZIRMATN_VAR));
        let coords: AxisCoordinates = [(WGHT, 900.0)].into_iter().collect();
        let instance = SkrifaBackend.instantiate(&face, &coords).unwrap();
        assert_eq!(instance.normalized_coords().len(), 1);
        assert_eq!(instance.normalized_coords()[0].to_f32(), 1.0);
        assert!(instance.metrics().units_per_em > 0);
        assert_eq!(instance.coords(), &coords);
    }

    #[test]
    fn advance_width_follows_instance() {
        let face = face(Some(font_test_data::VAZIRMATN_VAR));
        let instance = SkrifaBackend.instantiate(&face, &AxisCoordinates::new()).unwrap();
        assert!(instance.advance_width(0).is_some());
        assert_eq!(instance.advance_width(60_000), None);
    }

    #[test]
    fn default_instance_sits_at_origin() {
        let face = face(Some(font_test_data::VAZIRMATN_VAR));
        let instance = SkrifaBackend.instantiate(&face, &AxisCoordinates::new()).unwrap();
        assert!(instance.normalized_coords().iter().all(|c| c.to_f32() == 0.0));
    }
}
