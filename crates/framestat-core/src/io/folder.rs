use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::consts::IMAGE_EXTENSIONS;

/// True if the file name ends in one of the supported image suffixes
/// (case-insensitive).
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

/// List the image files directly inside `folder` as absolute paths.
///
/// Entries come back in the order the filesystem reports them unless
/// `sort_by_name` is set. A path that is missing or not a directory yields
/// an empty list.
pub fn list_images(folder: &Path, sort_by_name: bool) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(folder = %folder.display(), error = %e, "Cannot read folder, treating as empty");
            return Vec::new();
        }
    };

    let root = std::path::absolute(folder).unwrap_or_else(|_| folder.to_path_buf());

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| root.join(entry.file_name()))
        .filter(|path| is_image_file(path) && path.is_file())
        .collect();

    if sort_by_name {
        paths.sort();
    }

    debug!(folder = %folder.display(), count = paths.len(), "Listed images");
    paths
}
