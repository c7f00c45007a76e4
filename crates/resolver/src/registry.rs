//! Registered variation axes and their semantic roles.

use std::fmt;

use read_fonts::types::Tag;

use crate::error::{Error, Result};

pub const WGHT: Tag = Tag::new(b"wght");
pub const WDTH: Tag = Tag::new(b"wdth");
pub const ITAL: Tag = Tag::new(b"ital");
pub const SLNT: Tag = Tag::new(b"slnt");
pub const OPSZ: Tag = Tag::new(b"opsz");

/// Style-system meaning of an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticRole {
    Weight,
    ItalicToggle,
    OpticalSize,
    Slant,
    Width,
    /// Custom axis, passed through as an opaque value.
    None,
}

impl fmt::Display for SemanticRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticRole::Weight => "weight",
            SemanticRole::ItalicToggle => "italic",
            SemanticRole::OpticalSize => "optical-size",
            SemanticRole::Slant => "slant",
            SemanticRole::Width => "width",
            SemanticRole::None => "none",
        };
        f.write_str(name)
    }
}

/// Global description of a registered axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisDescriptor {
    pub tag: Tag,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    /// Granularity of the axis; `0.0` means continuous.
    pub step: f32,
    pub role: SemanticRole,
}

impl AxisDescriptor {
    const fn new(tag: Tag, min: f32, default: f32, max: f32, step: f32, role: SemanticRole) -> Self {
        Self { tag, default, min, max, step, role }
    }

    pub fn is_discrete(&self) -> bool {
        self.step > 0.0
    }

    /// Round `value` to the nearest step. Continuous axes return it unchanged.
    pub fn snap(&self, value: f32) -> f32 {
        if !self.is_discrete() {
            return value;
        }
        self.min + ((value - self.min) / self.step).round() * self.step
    }
}

const REGISTERED_AXES: [AxisDescriptor; 5] = [
    AxisDescriptor::new(WGHT, 1.0, 400.0, 1000.0, 0.0, SemanticRole::Weight),
    AxisDescriptor::new(WDTH, 1.0, 100.0, 1000.0, 0.0, SemanticRole::Width),
    AxisDescriptor::new(ITAL, 0.0, 0.0, 1.0, 1.0, SemanticRole::ItalicToggle),
    AxisDescriptor::new(SLNT, -90.0, 0.0, 90.0, 0.0, SemanticRole::Slant),
    AxisDescriptor::new(OPSZ, 1.0, 12.0, 1000.0, 0.0, SemanticRole::OpticalSize),
];

static STANDARD: AxisRegistry = AxisRegistry { axes: &REGISTERED_AXES };

/// Read-only catalog of the axes the engine understands.
///
/// Tags outside the table are valid axis tags, they just carry no role.
#[derive(Debug)]
pub struct AxisRegistry {
    axes: &'static [AxisDescriptor],
}

impl AxisRegistry {
    /// The process-wide registry of OpenType registered axes.
    pub fn standard() -> &'static AxisRegistry {
        &STANDARD
    }

    pub fn lookup(&self, tag: Tag) -> Option<&AxisDescriptor> {
        self.axes.iter().find(|axis| axis.tag == tag)
    }

    /// Like [`lookup`](Self::lookup), but a missing tag is an error.
    pub fn require(&self, tag: Tag) -> Result<&AxisDescriptor> {
        self.lookup(tag).ok_or_else(|| Error::UnknownAxis(tag.to_string()))
    }

    pub fn role_of(&self, tag: Tag) -> SemanticRole {
        self.lookup(tag).map_or(SemanticRole::None, |axis| axis.role)
    }

    /// The registered axis carrying `role`.
    pub fn descriptor_for_role(&self, role: SemanticRole) -> Result<&AxisDescriptor> {
        self.axes
            .iter()
            .find(|axis| axis.role == role && role != SemanticRole::None)
            .ok_or_else(|| Error::UnknownAxis(format!("no axis for role {role}")))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AxisDescriptor> {
        self.axes.iter()
    }
}

/// Parse a 1 to 4 character axis tag, space-padding short tags.
pub fn parse_tag(tag: &str) -> Result<Tag> {
    if tag.is_empty() || tag.len() > 4 || !tag.bytes().all(|b| (0x20..=0x7e).contains(&b)) {
        return Err(Error::InvalidTag(tag.to_string()));
    }
    let mut tag_bytes = [b' '; 4];
    for (dst, src) in tag_bytes.iter_mut().zip(tag.as_bytes()) {
        *dst = *src;
    }
    Ok(Tag::new(&tag_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_registered_axes() {
        let registry = AxisRegistry::standard();
        assert_eq!(registry.lookup(WGHT).unwrap().role, SemanticRole::Weight);
        assert_eq!(registry.lookup(OPSZ).unwrap().role, SemanticRole::OpticalSize);
        assert!(registry.lookup(Tag::new(b"CASL")).is_none());
    }

    #[test]
    fn custom_tags_have_no_role() {
        let registry = AxisRegistry::standard();
        assert_eq!(registry.role_of(Tag::new(b"MONO")), SemanticRole::None);
        assert!(matches!(registry.require(Tag::new(b"MONO")), Err(Error::UnknownAxis(_))));
    }

    #[test]
    fn every_role_but_none_is_registered() {
        let registry = AxisRegistry::standard();
        for role in [
            SemanticRole::Weight,
            SemanticRole::ItalicToggle,
            SemanticRole::OpticalSize,
            SemanticRole::Slant,
            SemanticRole::Width,
        ] {
            assert_eq!(registry.descriptor_for_role(role).unwrap().role, role);
        }
        assert!(matches!(
            registry.descriptor_for_role(SemanticRole::None),
            Err(Error::UnknownAxis(_))
        ));
    }

    #[test]
    fn registered_defaults_lie_in_range() {
        for axis in AxisRegistry::standard().iter() {
            assert!(axis.min <= axis.default && axis.default <= axis.max, "{}", axis.tag);
        }
    }

    #[test]
    fn snap_discrete_axis() {
        let ital = AxisRegistry::standard().lookup(ITAL).unwrap();
        assert_eq!(ital.snap(0.7), 1.0);
        assert_eq!(ital.snap(0.2), 0.0);

        let wght = AxisRegistry::standard().lookup(WGHT).unwrap();
        assert_eq!(wght.snap(432.5), 432.5);
    }

    #[test]
    fn parse_tags() {
        assert_eq!(parse_tag("wght").unwrap(), WGHT);
        assert_eq!(parse_tag("ab").unwrap(), Tag::new(b"ab  "));
        assert!(parse_tag("").is_err());
        assert!(parse_tag("toolong").is_err());
    }
}
