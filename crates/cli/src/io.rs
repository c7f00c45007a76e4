//! Font file discovery and loading.

use std::{
    fs::read,
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result, bail};
use axis_resolver::{FontFace, faces_from_data};
use glob::glob;

/// A font file on disk.
#[derive(Debug, Clone)]
pub struct FontFile {
    path: PathBuf,
}

impl FontFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read font data from the file.
    pub fn read(&self) -> Result<Arc<[u8]>> {
        let data = read(&self.path)
            .with_context(|| format!("Failed to read font: {}", self.path.display()))?;
        Ok(data.into())
    }

    /// Read the file and parse every face it contains.
    pub fn faces(&self) -> Result<Vec<FontFace>> {
        let data = self.read()?;
        faces_from_data(&self.path, data)
            .with_context(|| format!("Failed to parse font: {}", self.path.display()))
    }
}

impl AsRef<Path> for FontFile {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}

/// Expand font arguments into files.
///
/// Arguments naming an existing file are kept as is; anything else is
/// treated as a glob pattern. Order follows the arguments, then glob order.
pub fn expand_font_args(args: &[String]) -> Result<Vec<FontFile>> {
    let mut files = Vec::new();
    for arg in args {
        if Path::new(arg).is_file() {
            files.push(FontFile::new(arg));
            continue;
        }
        let matches: Vec<PathBuf> = glob(arg)
            .with_context(|| format!("Failed to glob pattern: {arg}"))?
            .filter_map(Result::ok)
            .filter(|path| path.is_file())
            .collect();
        if matches.is_empty() {
            bail!("No font files match {arg}");
        }
        files.extend(matches.into_iter().map(FontFile::new));
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("fontaxis-{name}-{}", process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn expands_globs_and_keeps_files() {
        let dir = scratch_dir("glob");
        for name in ["b.ttf", "a.ttf", "notes.txt"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        let pattern = dir.join("*.ttf").display().to_string();
        let explicit = dir.join("notes.txt").display().to_string();

        let files = expand_font_args(&[explicit, pattern]).unwrap();
        let names: Vec<_> =
            files.iter().map(|f| f.path().file_name().unwrap().to_owned()).collect();
        assert_eq!(names, ["notes.txt", "a.ttf", "b.ttf"]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn unmatched_pattern_fails() {
        let dir = scratch_dir("empty");
        let pattern = dir.join("*.otf").display().to_string();
        assert!(expand_font_args(&[pattern]).is_err());
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn reads_faces_from_disk() {
        let dir = scratch_dir("read");
        let path = dir.join("Vazirmatn.ttf");
        fs::write(&path, font_test_data::VAZIRMATN_VAR).unwrap();

        let faces = FontFile::new(&path).faces().unwrap();
        assert_eq!(faces.len(), 1);
        assert!(faces[0].is_variable());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn missing_file_has_context() {
        let err = FontFile::new("/nonexistent/font.ttf").read().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }
}
