use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::MediaIndex;
use crate::error::IndexError;
use crate::models::ImageRecord;

/// Index over every image below a root folder.
#[derive(Debug, Clone)]
pub struct DirectoryIndex {
    root: PathBuf,
}

impl DirectoryIndex {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl MediaIndex for DirectoryIndex {
    fn query(&self) -> Result<Vec<ImageRecord>, IndexError> {
        if !self.root.is_dir() {
            return Err(IndexError::MissingRoot(self.root.clone()));
        }

        let mut records = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                // The root itself failing means nothing can be listed.
                Err(e) if e.depth() == 0 => {
                    return Err(IndexError::Walk {
                        root: self.root.clone(),
                        source: e,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || !ImageRecord::is_image_path(entry.path()) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(e) => {
                    warn!("Failed to read metadata for {:?}: {}", entry.path(), e);
                    continue;
                }
            };

            let created = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map(unix_seconds)
                .unwrap_or(0);

            records.push(ImageRecord::new(entry.into_path(), created));
        }

        sort_newest_first(&mut records);
        debug!(root = ?self.root, count = records.len(), "Directory index listed");
        Ok(records)
    }
}

fn unix_seconds(time: SystemTime) -> i64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Order records by descending creation time, path ascending on ties.
fn sort_newest_first(records: &mut [ImageRecord]) {
    records.sort_by(|a, b| b.created.cmp(&a.created).then_with(|| a.path.cmp(&b.path)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_sort_newest_first() {
        let mut records = vec![
            ImageRecord::new("/p/old.png", 10),
            ImageRecord::new("/p/b.png", 30),
            ImageRecord::new("/p/a.png", 30),
            ImageRecord::new("/p/mid.png", 20),
        ];
        sort_newest_first(&mut records);

        let paths: Vec<_> = records.iter().map(|r| r.path.to_str().unwrap()).collect();
        assert_eq!(paths, vec!["/p/a.png", "/p/b.png", "/p/mid.png", "/p/old.png"]);
    }

    #[test]
    fn test_lists_only_images_recursively() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("holiday");
        fs::create_dir(&nested).unwrap();

        File::create(dir.path().join("one.jpg")).unwrap();
        File::create(nested.join("two.PNG")).unwrap();
        File::create(dir.path().join("notes.txt")).unwrap();
        File::create(nested.join("clip.mp4")).unwrap();

        let records = DirectoryIndex::new(dir.path()).query().unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| ImageRecord::is_image_path(&r.path)));
        assert!(records.windows(2).all(|w| w[0].created >= w[1].created));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(DirectoryIndex::new(dir.path()).query().unwrap().is_empty());
    }

    #[test]
    fn test_missing_root_is_error() {
        let dir = tempdir().unwrap();
        let err = DirectoryIndex::new(dir.path().join("absent"))
            .query()
            .unwrap_err();
        assert!(matches!(err, IndexError::MissingRoot(_)));
    }
}
