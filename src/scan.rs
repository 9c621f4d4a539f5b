//! Filesystem image enumeration: the collaborator that feeds the catalog.
//!
//! One directory level, no recursion. Files qualify as images by extension
//! and by a minimum byte size that weeds out icons and thumbnails.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::filter::SizeIndex;

/// Extensions recognized as images (lowercased before comparison).
pub const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "ico"];

/// Files smaller than this are skipped during enumeration.
pub const MIN_IMAGE_BYTES: u64 = 15 * 1024;

/// Errors from directory enumeration.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The path does not exist.
    #[error("Path does not exist: {0}")]
    NotFound(String),

    /// The path exists but is not a directory.
    #[error("Path is not a directory: {0}")]
    NotADirectory(String),

    /// Underlying read failure.
    #[error("Failed to read directory: {0}")]
    Io(#[from] std::io::Error),
}

/// An enumerated image with its byte size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Full path as a string identifier.
    pub path: String,
    /// File size in bytes.
    pub size: u64,
}

/// Subdirectories and images found in one directory.
#[derive(Debug, Clone, Default)]
pub struct DirectoryListing {
    /// Subdirectory paths, sorted.
    pub directories: Vec<String>,
    /// Image files, sorted by path.
    pub images: Vec<ImageFile>,
}

impl DirectoryListing {
    /// The image paths in listing order.
    pub fn image_paths(&self) -> Vec<String> {
        self.images.iter().map(|i| i.path.clone()).collect()
    }

    /// Build a [`SizeIndex`] over the listed images for the filter's size
    /// stage.
    pub fn size_index(&self) -> SizeIndex {
        SizeIndex::new(self.images.iter().map(|i| (i.path.clone(), i.size)))
    }
}

/// Enumerate subdirectories and image files of `dir`.
///
/// Entries whose paths are not valid UTF-8 are skipped; unreadable metadata
/// skips the file rather than failing the listing.
pub fn list_images(dir: impl AsRef<Path>) -> Result<DirectoryListing, ScanError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Err(ScanError::NotFound(dir.display().to_string()));
    }
    if !dir.is_dir() {
        return Err(ScanError::NotADirectory(dir.display().to_string()));
    }

    let mut listing = DirectoryListing::default();
    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else { continue };
        let path = entry.path();
        let Some(path_str) = path.to_str() else {
            continue;
        };

        if path.is_dir() {
            listing.directories.push(path_str.to_string());
        } else if path.is_file() && has_image_extension(&path) {
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            if metadata.len() < MIN_IMAGE_BYTES {
                continue;
            }
            listing.images.push(ImageFile {
                path: path_str.to_string(),
                size: metadata.len(),
            });
        }
    }

    listing.directories.sort();
    listing.images.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!(
        "Listed {:?}: {} directories, {} images",
        dir,
        listing.directories.len(),
        listing.images.len()
    );
    Ok(listing)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}
