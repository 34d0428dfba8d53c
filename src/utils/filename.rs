use crate::utils::constants::{DEFAULT_GRID_FILE, GRID_FILE_EXTENSION};
use std::path::{Path, PathBuf};

/// Default output path for an encoded table: the input path with a `.json` extension
pub fn default_encoded_filename(input: &Path) -> PathBuf {
    if input.as_os_str().is_empty() {
        return PathBuf::from(DEFAULT_GRID_FILE);
    }

    input.with_extension(GRID_FILE_EXTENSION)
}

/// Directory that holds `path`, with a bare filename resolving to the current directory
pub fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
