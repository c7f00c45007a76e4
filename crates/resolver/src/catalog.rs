//! Per-face axis metadata and the family catalog.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use indexmap::IndexMap;
use log::warn;
use read_fonts::types::Tag;

use crate::{
    coverage::{Coverage, FontFlags},
    error::{Error, Result},
    registry::{AxisRegistry, SemanticRole},
    variant::FaceStyle,
};

/// A face's own range for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    min: f32,
    default: f32,
    max: f32,
}

impl AxisRange {
    /// Create a range, rejecting `min > default`, `default > max` and non-finite bounds.
    pub fn new(tag: Tag, min: f32, default: f32, max: f32) -> Result<Self> {
        let finite = min.is_finite() && default.is_finite() && max.is_finite();
        if !finite || min > default || default > max {
            return Err(Error::InvalidAxisRange { tag: tag.to_string(), min, default, max });
        }
        Ok(Self { min, default, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn default(&self) -> f32 {
        self.default
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Distance from `value` to the nearest point of the range.
    pub fn distance(&self, value: f32) -> f32 {
        if value < self.min {
            self.min - value
        } else if value > self.max {
            value - self.max
        } else {
            0.0
        }
    }
}

/// The axes a face exposes, in font order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceAxisSupport {
    axes: Vec<(Tag, AxisRange)>,
}

impl FaceAxisSupport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(tag, min, default, max)` records.
    pub fn from_records(records: impl IntoIterator<Item = (Tag, f32, f32, f32)>) -> Result<Self> {
        let mut support = Self::new();
        for (tag, min, default, max) in records {
            support.push(tag, AxisRange::new(tag, min, default, max)?)?;
        }
        Ok(support)
    }

    pub fn push(&mut self, tag: Tag, range: AxisRange) -> Result<()> {
        if self.get(tag).is_some() {
            return Err(Error::DuplicateAxis(tag.to_string()));
        }
        if let Some(registered) = AxisRegistry::standard().lookup(tag)
            && (range.min < registered.min || range.max > registered.max)
        {
            warn!(
                "{tag} range {}..{} exceeds registered range {}..{}",
                range.min, range.max, registered.min, registered.max
            );
        }
        self.axes.push((tag, range));
        Ok(())
    }

    pub fn get(&self, tag: Tag) -> Option<AxisRange> {
        self.axes.iter().find(|(t, _)| *t == tag).map(|(_, range)| *range)
    }

    pub fn supports(&self, tag: Tag) -> bool {
        self.get(tag).is_some()
    }

    /// First axis of the face carrying `role`.
    pub fn find_role(&self, registry: &AxisRegistry, role: SemanticRole) -> Option<(Tag, AxisRange)> {
        self.iter().find(|(tag, _)| registry.role_of(*tag) == role)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tag, AxisRange)> + '_ {
        self.axes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }
}

/// Identity of a face: the file it came from and its index in that file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FaceId {
    path: PathBuf,
    index: u32,
}

impl FaceId {
    pub fn new(path: impl Into<PathBuf>, index: u32) -> Self {
        Self { path: path.into(), index }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn index(&self) -> u32 {
        self.index
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.path.display(), self.index)
    }
}

/// A single face, static or variable.
///
/// Faces are immutable once built and shared by reference count between the
/// catalog, instance keys and instances.
#[derive(Debug, Clone)]
pub struct FontFace {
    id: FaceId,
    family: String,
    style: FaceStyle,
    axes: FaceAxisSupport,
    flags: FontFlags,
    coverage: Coverage,
    data: Option<Arc<[u8]>>,
}

impl FontFace {
    pub fn new(id: FaceId, family: impl Into<String>, style: FaceStyle, axes: FaceAxisSupport) -> Self {
        let flags = if axes.is_empty() { FontFlags::empty() } else { FontFlags::VARIABLE };
        Self {
            id,
            family: family.into(),
            style,
            axes,
            flags,
            coverage: Coverage::default(),
            data: None,
        }
    }

    /// Add `flags` to the ones derived from the axes.
    pub fn with_flags(mut self, flags: FontFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }

    /// Attach the font bytes the face was parsed from.
    pub fn with_data(mut self, data: Arc<[u8]>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn id(&self) -> &FaceId {
        &self.id
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn style(&self) -> FaceStyle {
        self.style
    }

    pub fn axes(&self) -> &FaceAxisSupport {
        &self.axes
    }

    pub fn is_variable(&self) -> bool {
        self.flags.contains(FontFlags::VARIABLE)
    }

    pub fn flags(&self) -> FontFlags {
        self.flags
    }

    pub fn coverage(&self) -> &Coverage {
        &self.coverage
    }

    pub fn data(&self) -> Option<&Arc<[u8]>> {
        self.data.as_ref()
    }
}

/// Faces grouped by family.
///
/// Family names match case-insensitively. Faces within a family keep their
/// insertion order, which the resolver uses to break ties. The catalog also
/// keeps every face in global insertion order for fallback lookups.
#[derive(Debug, Default, Clone)]
pub struct FontCatalog {
    families: IndexMap<String, Vec<Arc<FontFace>>>,
    faces: Vec<Arc<FontFace>>,
}

impl FontCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_faces(faces: impl IntoIterator<Item = FontFace>) -> Self {
        let mut catalog = Self::new();
        for face in faces {
            catalog.push(face);
        }
        catalog
    }

    pub fn push(&mut self, face: FontFace) {
        let key = face.family.to_lowercase();
        let face = Arc::new(face);
        self.families.entry(key).or_default().push(Arc::clone(&face));
        self.faces.push(face);
    }

    /// Faces registered for `family`, in insertion order.
    pub fn faces_for(&self, family: &str) -> &[Arc<FontFace>] {
        self.families.get(&family.to_lowercase()).map_or(&[][..], Vec::as_slice)
    }

    /// The face's own range for `tag`, or `None` if it lacks the axis.
    pub fn axis_support(&self, face: &FontFace, tag: Tag) -> Option<AxisRange> {
        face.axes.get(tag)
    }

    /// Every face, in insertion order.
    pub fn faces(&self) -> impl Iterator<Item = &Arc<FontFace>> {
        self.faces.iter()
    }

    /// Faces whose cmap maps `c`, in insertion order.
    pub fn faces_covering(&self, c: char) -> impl Iterator<Item = &Arc<FontFace>> {
        self.faces.iter().filter(move |face| face.coverage.contains(c as u32))
    }

    /// Family names as first registered, in registration order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.values().filter_map(|faces| faces.first()).map(|face| face.family())
    }

    /// Total number of faces.
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}
