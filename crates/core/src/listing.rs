use crate::classify::FileEntry;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("invalid directory: {}", .path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("empty directory: {}", .0.display())]
    Empty(PathBuf),
}

/// Lists the non-directory entries directly inside `root`, sorted by file
/// name. Pairing depends on this order.
pub fn list_directory(root: &Path) -> Result<Vec<FileEntry>, ListingError> {
    let invalid = |source: io::Error| ListingError::Invalid {
        path: root.to_path_buf(),
        source,
    };

    let meta = fs::metadata(root).map_err(invalid)?;
    if !meta.is_dir() {
        return Err(invalid(io::Error::other("not a directory")));
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|err| invalid(io::Error::from(err)))?;
        if entry.path().is_dir() {
            continue;
        }
        names.push(entry.file_name().to_string_lossy().to_string());
    }

    if names.is_empty() {
        return Err(ListingError::Empty(root.to_path_buf()));
    }

    names.sort();
    debug!("listed {} files in {}", names.len(), root.display());

    Ok(names
        .into_iter()
        .map(|name| FileEntry::new(root, name))
        .collect())
}
