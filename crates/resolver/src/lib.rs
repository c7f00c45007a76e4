//! # Axis Resolver
//!
//! Resolve semantic style requests (weight, italic, stretch, optical size)
//! to concrete variable font instances.
//!
//! A request is matched against the faces of a family, the closest face is
//! picked, the request is translated into that face's axis coordinates and
//! clamped to the ranges the face supports. The resulting key is
//! instantiated at most once and shared between callers.
//!
//! When a family lacks glyphs for some text, a fallback face is chosen by
//! codepoint coverage, preferring faces that resemble the one it replaces.
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axis_resolver::{EngineConfig, FontCatalog, FontEngine, SkrifaBackend, StyleRequest};
//!
//! let data: Arc<[u8]> = std::fs::read("Sample-VF.ttf").unwrap().into();
//! let faces = axis_resolver::faces_from_data("Sample-VF.ttf", data).unwrap();
//! let catalog = Arc::new(FontCatalog::from_faces(faces));
//!
//! let engine = FontEngine::new(catalog, SkrifaBackend, &EngineConfig::default());
//! let request = StyleRequest::new("Sample").weight(650.0).size(24.0);
//! let instance = engine.instance(&request).unwrap();
//! println!("{:?}", instance.coords());
//! ```

mod backend;
mod cache;
mod catalog;
mod config;
mod coords;
mod coverage;
mod engine;
mod error;
mod mapper;
mod registry;
mod request;
mod resolver;
mod scan;
mod variant;

pub use backend::{FontInstance, InstanceBackend, InstanceMetrics, SkrifaBackend};
pub use cache::{CacheStats, InstanceCache};
pub use catalog::{AxisRange, FaceAxisSupport, FaceId, FontCatalog, FontFace};
pub use config::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_OBLIQUE_SLANT, DEFAULT_STRETCH, DEFAULT_WEIGHT, EngineConfig,
};
pub use coords::{AxisCoordinates, FontInstanceKey};
pub use coverage::{Coverage, FontFlags, is_default_ignorable};
pub use engine::FontEngine;
pub use error::{BackendError, Error, Result};
pub use mapper::SemanticMapper;
pub use read_fonts::types::Tag;
pub use registry::{
    AxisDescriptor, AxisRegistry, ITAL, OPSZ, SLNT, SemanticRole, WDTH, WGHT, parse_tag,
};
pub use request::StyleRequest;
pub use resolver::{FaceScore, InstanceResolver, LikeScore, shared_prefix_words};
pub use scan::{face_from_font, faces_from_data, typographic_family};
pub use variant::{FaceStyle, FontStyle};
