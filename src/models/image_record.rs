use std::path::{Path, PathBuf};

/// Image file extensions the index will list.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp", "tiff", "tif"];

/// One entry of the media index: where the original lives and when it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub path: PathBuf,
    /// Creation time in unix seconds, as reported by the index.
    pub created: i64,
}

impl ImageRecord {
    pub fn new(path: impl Into<PathBuf>, created: i64) -> Self {
        Self {
            path: path.into(),
            created,
        }
    }

    /// Check whether a path carries an image extension the decoder understands.
    pub fn is_image_path(path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                let ext = ext.to_lowercase();
                IMAGE_EXTENSIONS.contains(&ext.as_str())
            })
            .unwrap_or(false)
    }
}
