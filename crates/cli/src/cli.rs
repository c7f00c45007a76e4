//! CLI definitions and command dispatch.

use std::num::NonZeroUsize;

use anyhow::Result;
use axis_resolver::{StyleRequest, Tag, parse_tag};
use clap::{Parser, Subcommand};

use crate::commands::{list_axes, print_registry, resolve};

#[derive(Parser)]
#[command(name = "fontaxis")]
#[command(about = "Inspect variable font axes and resolve style requests to instances")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Style fields of a resolve request.
#[derive(Debug, Clone, clap::Args)]
pub struct RequestArgs {
    /// Family name to resolve (case-insensitive)
    #[arg(long)]
    pub family: String,
    #[arg(long)]
    pub weight: Option<f32>,
    /// Italic on, or off with --italic=false
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "true")]
    pub italic: Option<bool>,
    /// Slant in degrees; negative leans right
    #[arg(long, allow_hyphen_values = true)]
    pub slant: Option<f32>,
    /// Width in percent of normal
    #[arg(long)]
    pub stretch: Option<f32>,
    /// Text size in points, drives optical sizing
    #[arg(long)]
    pub size: Option<f32>,
    /// Explicit axis value, e.g. wght=650 (repeatable)
    #[arg(long = "axis", value_parser = parse_axis_arg, allow_hyphen_values = true)]
    pub axes: Vec<(Tag, f32)>,
}

impl RequestArgs {
    pub fn to_request(&self) -> StyleRequest {
        let mut request = StyleRequest::new(&self.family);
        if let Some(weight) = self.weight {
            request = request.weight(weight);
        }
        if let Some(italic) = self.italic {
            request = request.italic(italic);
        }
        if let Some(slant) = self.slant {
            request = request.slant(slant);
        }
        if let Some(stretch) = self.stretch {
            request = request.stretch(stretch);
        }
        if let Some(size) = self.size {
            request = request.size(size);
        }
        self.axes.iter().fold(request, |request, &(tag, value)| request.axis(tag, value))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the faces and variation axes of font files
    Axes {
        /// Font files or glob patterns
        #[arg(required = true)]
        fonts: Vec<String>,
    },
    /// Print registered axes
    Registry {
        /// Only this axis tag
        tag: Option<String>,
    },
    /// Resolve a style request and instantiate it
    Resolve {
        /// Font files or glob patterns
        #[arg(required = true)]
        fonts: Vec<String>,
        #[command(flatten)]
        request: RequestArgs,
        /// Instance cache size; 0 disables the bound
        #[arg(long, default_value_t = axis_resolver::DEFAULT_CACHE_CAPACITY)]
        cache_capacity: usize,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Axes { fonts } => list_axes(&fonts)?,
            Commands::Registry { tag } => print_registry(tag.as_deref())?,
            Commands::Resolve { fonts, request, cache_capacity } => {
                resolve(&fonts, &request.to_request(), NonZeroUsize::new(cache_capacity))?;
            }
        }
        Ok(())
    }
}

/// Parse `tag=value`.
pub fn parse_axis_arg(s: &str) -> Result<(Tag, f32), String> {
    let (tag, value) = s.split_once('=').ok_or_else(|| format!("expected tag=value, got {s:?}"))?;
    let tag = parse_tag(tag).map_err(|e| e.to_string())?;
    let value: f32 = value.parse().map_err(|_| format!("invalid axis value: {value:?}"))?;
    Ok((tag, value))
}
