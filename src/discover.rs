//! Source image discovery.
//!
//! Lists the immediate entries of the source directory (no recursion), keeps
//! regular files whose extension is in the allow-list, sorts them by file name,
//! and assigns each one its 1-based index. Indices are fixed here, before any
//! decoding happens.
//!
//! ```text
//! photos/
//! ├── IMG_0002.HEIC      → #2
//! ├── IMG_0001.jpg       → #1
//! ├── notes.txt          (skipped: extension)
//! ├── logo.png           → #3
//! └── raw/               (skipped: directory)
//!     └── IMG_0003.jpg
//! ```

use crate::naming::has_accepted_extension;
use std::fs;
use std::path::{Path, PathBuf};

/// A discovered source file and the index it will be written under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// 1-based position in sorted order.
    pub index: usize,
    pub path: PathBuf,
    /// File name for display (`IMG_0001.jpg`).
    pub filename: String,
}

/// Collect accepted image files in `dir`, sorted and indexed.
///
/// Returns an empty list when nothing matches; callers decide whether that is
/// an error.
pub fn discover(dir: &Path, extensions: &[String]) -> std::io::Result<Vec<SourceImage>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| is_accepted_image(p, extensions))
        .collect();

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(paths
        .into_iter()
        .enumerate()
        .map(|(i, path)| SourceImage {
            index: i + 1,
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path,
        })
        .collect())
}

fn is_accepted_image(path: &Path, extensions: &[String]) -> bool {
    if !path.is_file() {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| has_accepted_extension(e, extensions))
}
