//! Parallel font scanning.

use anyhow::{Result, bail};
use axis_resolver::{FontCatalog, FontFace};
use log::error;
use rayon::prelude::*;

use crate::io::FontFile;

/// Result of a parallel batch operation.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    pub fn ok_or_bail(&self, operation: &str) -> Result<()> {
        if self.failed > 0 {
            bail!("{operation} failed: {} succeeded, {} failed", self.succeeded, self.failed);
        }
        Ok(())
    }
}

/// Scan files in parallel. Results keep the order of `files`.
pub fn scan_parallel(files: &[FontFile]) -> (Vec<Result<Vec<FontFace>>>, BatchResult) {
    let results: Vec<_> = files.par_iter().map(FontFile::faces).collect();

    let mut batch = BatchResult::default();
    for result in &results {
        match result {
            Ok(_) => batch.succeeded += 1,
            Err(e) => {
                error!("{e:?}");
                batch.failed += 1;
            }
        }
    }
    (results, batch)
}

/// Scan files in parallel and build a catalog in input order.
///
/// Fails if any file could not be scanned.
pub fn load_catalog(files: &[FontFile]) -> Result<FontCatalog> {
    let (results, batch) = scan_parallel(files);
    batch.ok_or_bail("Font scan")?;

    let mut catalog = FontCatalog::new();
    for faces in results.into_iter().flatten() {
        for face in faces {
            catalog.push(face);
        }
    }
    Ok(catalog)
}
