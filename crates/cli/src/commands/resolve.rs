use std::{num::NonZeroUsize, sync::Arc};

use anyhow::{Context, Result};
use axis_resolver::{EngineConfig, FontEngine, FontInstance, SkrifaBackend, StyleRequest};
use log::info;

use crate::{io::expand_font_args, parallel::load_catalog};

/// Scan `fonts`, resolve `request` and print the resulting instance.
pub fn resolve(
    fonts: &[String],
    request: &StyleRequest,
    cache_capacity: Option<NonZeroUsize>,
) -> Result<()> {
    let files = expand_font_args(fonts)?;
    let catalog = load_catalog(&files)?;
    info!("Loaded {} faces in {} families", catalog.len(), catalog.families().count());

    let config = EngineConfig::default().with_cache_capacity(cache_capacity);
    let engine = FontEngine::new(Arc::new(catalog), SkrifaBackend, &config);
    let instance = engine
        .instance(request)
        .with_context(|| format!("Failed to resolve family '{}'", request.family))?;

    println!("{}", describe_instance(&instance));
    Ok(())
}

pub fn describe_instance(instance: &FontInstance) -> String {
    let metrics = instance.metrics();
    let coords = if instance.coords().is_empty() {
        "(default)".to_string()
    } else {
        instance.coords().to_string()
    };
    let normalized: Vec<String> =
        instance.normalized_coords().iter().map(|c| format!("{:.4}", c.to_f32())).collect();

    format!(
        "face:        {}\n\
         coordinates: {coords}\n\
         normalized:  [{}]\n\
         metrics:     upem {}, ascent {}, descent {}, leading {}, glyphs {}",
        instance.face(),
        normalized.join(", "),
        metrics.units_per_em,
        metrics.ascent,
        metrics.descent,
        metrics.leading,
        metrics.glyph_count,
    )
}
