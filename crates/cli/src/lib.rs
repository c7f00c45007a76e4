//! fontaxis CLI library.

pub mod cli;
pub mod commands;
pub mod io;
pub mod parallel;

pub use io::{FontFile, expand_font_args};
pub use parallel::{load_catalog, scan_parallel};
