//! Filesystem adapter for loading the image database.

use std::path::{Path, PathBuf};

use cbir_core::{Candidate, Error, Image, ImageSource, Result};
use tracing::{debug, info};

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "ppm", "tif", "tiff"];

/// Filesystem image source adapter.
///
/// Reads every supported image directly inside one directory (no
/// recursion), ordered by file name.
pub struct FsImageSource {
    dir: PathBuf,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding the database images
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Lists supported image files, sorted by file name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if the directory cannot be read.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| Error::DirectoryNotFound {
            path: self.dir.clone(),
            reason: e.to_string(),
        })?;

        let mut files = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_file() && is_supported_image(&path) {
                files.push(path);
            } else {
                debug!("Ignoring {}", path.display());
            }
        }
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

impl ImageSource for FsImageSource {
    fn candidates(&self) -> Result<Vec<Candidate>> {
        let files = self.collect_files()?;
        info!("Loading {} images from {}", files.len(), self.dir.display());
        files.iter().map(|path| load_image(path)).collect()
    }

    fn count_hint(&self) -> Option<usize> {
        self.collect_files().ok().map(|files| files.len())
    }
}

/// Checks if a path has a supported image extension.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Loads and decodes one image file.
///
/// # Errors
///
/// Returns [`Error::ImageReadFailure`] if the file cannot be opened or decoded.
pub fn load_image(path: &Path) -> Result<Candidate> {
    let decoded = image::open(path).map_err(|e| Error::ImageReadFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let image = Image::from_dynamic(&decoded);
    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );
    Ok(Candidate::new(path.to_string_lossy(), image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_supported_image() {
        assert!(is_supported_image(Path::new("test.jpg")));
        assert!(is_supported_image(Path::new("test.JPEG")));
        assert!(is_supported_image(Path::new("test.png")));
        assert!(is_supported_image(Path::new("test.ppm")));
        assert!(is_supported_image(Path::new("test.TIF")));
        assert!(is_supported_image(Path::new("dir/test.tiff")));
        assert!(!is_supported_image(Path::new("test.txt")));
        assert!(!is_supported_image(Path::new("test.gif")));
        assert!(!is_supported_image(Path::new("test")));
    }

    #[test]
    fn test_missing_directory() {
        let source = FsImageSource::new(PathBuf::from("/nonexistent/cbir/db"));
        assert!(matches!(
            source.candidates(),
            Err(Error::DirectoryNotFound { .. })
        ));
        assert_eq!(source.count_hint(), None);
    }
}
