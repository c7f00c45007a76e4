//! Build catalog faces from font files.

use std::{path::Path, sync::Arc};

use log::{debug, warn};
use read_fonts::{FileRef, FontRef, TableProvider, types::Tag};
use skrifa::{MetadataProvider, attribute::Style, string::StringId};

use crate::{
    catalog::{AxisRange, FaceAxisSupport, FaceId, FontFace},
    coverage::{Coverage, FontFlags},
    error::Result,
    variant::{FaceStyle, FontStyle},
};

/// Read every face in a font file or collection.
///
/// Faces that fail to parse or carry invalid axis records are skipped with a
/// warning, so one bad face in a collection does not hide the others. A file
/// that is not a font at all is an error.
pub fn faces_from_data(path: impl AsRef<Path>, data: Arc<[u8]>) -> Result<Vec<FontFace>> {
    let path = path.as_ref();
    let file = FileRef::new(&data)?;
    let mut faces = Vec::new();

    for (index, font) in file.fonts().enumerate() {
        let index = index as u32;
        let font = match font {
            Ok(font) => font,
            Err(e) => {
                warn!("{}#{index}: {e}", path.display());
                continue;
            }
        };
        let face = match face_from_font(FaceId::new(path, index), &font) {
            Ok(face) => face,
            Err(e) => {
                warn!("{}#{index}: {e}", path.display());
                continue;
            }
        };
        debug!(
            "{}: '{}' {:?} axes={} flags={:?} {:?}",
            face.id(),
            face.family(),
            face.style(),
            face.axes().len(),
            face.flags(),
            face.coverage()
        );
        faces.push(face.with_data(Arc::clone(&data)));
    }

    Ok(faces)
}

/// Build a face from an already parsed font.
pub fn face_from_font(id: FaceId, font: &FontRef<'_>) -> Result<FontFace> {
    let family = family_name(font).unwrap_or_else(|| {
        let stem = id.path().file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
        typographic_family(&stem).to_string()
    });

    let attributes = font.attributes();
    let style = match attributes.style {
        Style::Normal => FontStyle::Normal,
        Style::Italic => FontStyle::Italic,
        Style::Oblique(_) => FontStyle::Oblique,
    };
    let style =
        FaceStyle::new(style, attributes.weight.value(), attributes.stretch.ratio() * 100.0);

    let mut axes = FaceAxisSupport::new();
    for axis in font.axes().iter() {
        let tag = axis.tag();
        let range = AxisRange::new(tag, axis.min_value(), axis.default_value(), axis.max_value())?;
        axes.push(tag, range)?;
    }

    let coverage = Coverage::from_codepoints(font.charmap().mappings().map(|(c, _)| c));

    Ok(FontFace::new(id, family, style, axes).with_flags(flags(font)).with_coverage(coverage))
}

fn flags(font: &FontRef<'_>) -> FontFlags {
    let mut flags = FontFlags::empty();
    flags.set(FontFlags::MONOSPACE, font.post().is_ok_and(|post| post.is_fixed_pitch() != 0));
    let serif = font.os2().is_ok_and(|os2| FontFlags::is_serif_panose(os2.panose_10()));
    flags.set(FontFlags::SERIF, serif);
    flags.set(FontFlags::MATH, font.table_data(Tag::new(b"MATH")).is_some());
    flags
}

/// Family name for grouping faces.
///
/// The typographic family (name ID 16) is taken as is. The legacy family
/// (name ID 1) and the file name often carry style words, which are trimmed.
fn family_name(font: &FontRef<'_>) -> Option<String> {
    let name = |id| {
        font.localized_strings(id)
            .english_or_first()
            .map(|name| name.chars().collect::<String>())
            .filter(|name| !name.trim().is_empty())
    };
    name(StringId::TYPOGRAPHIC_FAMILY_NAME)
        .map(|name| name.trim().to_string())
        .or_else(|| name(StringId::FAMILY_NAME).map(|name| typographic_family(&name).to_string()))
}

/// Separators between family words, modifiers and style words.
const SEPARATORS: [char; 3] = [' ', '-', '_'];

/// Words that may precede a style word, as in "ExtraBold" or "Semi Condensed".
const MODIFIERS: &[&str] = &["extra", "ext", "ex", "x", "semi", "sem", "sm", "demi", "dem", "ultra"];

/// Style words, in match order.
#[rustfmt::skip]
const STYLE_SUFFIXES: &[&str] = &[
    "normal", "italic", "oblique", "slanted",
    "thin", "th", "hairline", "light", "lt", "regular", "medium", "med",
    "md", "bold", "bd", "demi", "extb", "black", "blk", "bk", "heavy",
    "narrow", "condensed", "cond", "cn", "cd", "compressed", "expanded", "exp",
];

/// Strip trailing style words from a family name, case-insensitively.
///
/// "Noto Sans ExtraBold" becomes "Noto Sans" and "Sample-Light" becomes
/// "Sample". A style word glued to the word before it, like the "th" ending
/// "Smith", is left alone. A name made only of style words is kept whole.
pub fn typographic_family(family: &str) -> &str {
    let family = family.trim().trim_start_matches('.');
    let lower = family.to_ascii_lowercase();

    let mut kept = lower.as_str();
    while let Some(shorter) = strip_style_word(kept) {
        kept = shorter;
    }

    match kept.len() {
        0 => family,
        len => &family[..len],
    }
}

/// One round of trimming: a run of style words, an optional separator and an
/// optional separated modifier. `None` when nothing separable was removed.
fn strip_style_word(name: &str) -> Option<&str> {
    let mut rest = name;
    let mut found = false;
    while let Some(shorter) = STYLE_SUFFIXES.iter().find_map(|s| rest.strip_suffix(s)) {
        rest = shorter;
        found = true;
    }
    if !found {
        return None;
    }

    let mut kept = name;
    if let Some(shorter) = rest.strip_suffix(SEPARATORS) {
        kept = shorter;
        rest = shorter;
    }
    if let Some(shorter) = MODIFIERS
        .iter()
        .find_map(|m| rest.strip_suffix(m))
        .and_then(|before| before.strip_suffix(SEPARATORS))
    {
        kept = shorter;
    }

    (kept.len() < name.len()).then_some(kept)
}
