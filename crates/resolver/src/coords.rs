//! Resolved axis coordinates and instance cache keys.

use std::{
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

use read_fonts::types::Tag;

use crate::catalog::{FaceId, FontFace};

/// Axis values sorted by tag, one entry per tag.
///
/// Equality and hashing compare the exact float bits (with `-0.0` folded into
/// `0.0`), so two coordinate sets built in different orders compare equal.
#[derive(Debug, Clone, Default)]
pub struct AxisCoordinates {
    values: Vec<(Tag, f32)>,
}

impl AxisCoordinates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `tag` to `value`, replacing any earlier value for the tag.
    pub fn set(&mut self, tag: Tag, value: f32) {
        let value = if value == 0.0 { 0.0 } else { value };
        match self.values.binary_search_by_key(&tag, |(t, _)| *t) {
            Ok(i) => self.values[i].1 = value,
            Err(i) => self.values.insert(i, (tag, value)),
        }
    }

    pub fn get(&self, tag: Tag) -> Option<f32> {
        self.values.binary_search_by_key(&tag, |(t, _)| *t).ok().map(|i| self.values[i].1)
    }

    /// Apply `f` to every value in place.
    pub fn map_values(&mut self, mut f: impl FnMut(Tag, f32) -> f32) {
        for (tag, value) in &mut self.values {
            let mapped = f(*tag, *value);
            *value = if mapped == 0.0 { 0.0 } else { mapped };
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, f32)> + '_ {
        self.values.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(Tag, f32)> for AxisCoordinates {
    fn from_iter<I: IntoIterator<Item = (Tag, f32)>>(iter: I) -> Self {
        let mut coords = Self::new();
        for (tag, value) in iter {
            coords.set(tag, value);
        }
        coords
    }
}

impl PartialEq for AxisCoordinates {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|((t1, v1), (t2, v2))| t1 == t2 && v1.to_bits() == v2.to_bits())
    }
}

impl Eq for AxisCoordinates {}

impl Hash for AxisCoordinates {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.len().hash(state);
        for (tag, value) in &self.values {
            tag.hash(state);
            value.to_bits().hash(state);
        }
    }
}

impl fmt::Display for AxisCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (tag, value) in &self.values {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{tag}={value}")?;
        }
        Ok(())
    }
}

/// Identifies one materialized instance: a face plus its axis coordinates.
///
/// Keys compare by face identity and coordinates; the face itself rides along
/// so the cache can hand it to the backend on a miss.
#[derive(Debug, Clone)]
pub struct FontInstanceKey {
    face: Arc<FontFace>,
    coords: AxisCoordinates,
}

impl FontInstanceKey {
    pub fn new(face: Arc<FontFace>, coords: AxisCoordinates) -> Self {
        Self { face, coords }
    }

    pub fn face(&self) -> &Arc<FontFace> {
        &self.face
    }

    pub fn face_id(&self) -> &FaceId {
        self.face.id()
    }

    pub fn coords(&self) -> &AxisCoordinates {
        &self.coords
    }
}

impl PartialEq for FontInstanceKey {
    fn eq(&self, other: &Self) -> bool {
        self.face_id() == other.face_id() && self.coords == other.coords
    }
}

impl Eq for FontInstanceKey {}

impl Hash for FontInstanceKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.face_id().hash(state);
        self.coords.hash(state);
    }
}

impl fmt::Display for FontInstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.face_id(), self.coords)
    }
}
