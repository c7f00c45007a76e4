use anyhow::Result;
use axis_resolver::{FontFace, FontStyle};

use crate::{io::expand_font_args, parallel::scan_parallel};

/// Print every face of `fonts` with its axes.
pub fn list_axes(fonts: &[String]) -> Result<()> {
    let files = expand_font_args(fonts)?;
    let (results, batch) = scan_parallel(&files);

    for faces in results.into_iter().flatten() {
        for face in &faces {
            println!("{}", describe_face(face));
        }
    }

    batch.ok_or_bail("Axis listing")
}

/// Multi-line summary of one face.
pub fn describe_face(face: &FontFace) -> String {
    let style = face.style();
    let slope = match style.style {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
        FontStyle::Oblique => "oblique",
    };
    let mut out = format!(
        "{}: {} ({slope}, weight {}, stretch {}%)",
        face.id(),
        face.family(),
        style.weight,
        style.stretch
    );

    if !face.is_variable() {
        out.push_str("\n  Not a variable font");
        return out;
    }
    for (tag, range) in face.axes().iter() {
        out.push_str(&format!(
            "\n  {tag}: {} - {} (default: {})",
            range.min(),
            range.max(),
            range.default()
        ));
    }
    out
}
