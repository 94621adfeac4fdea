//! Gallery configuration from defaults and environment overrides.
//!
//! - `THUMBGRID_THUMB_SIZE` - thumbnail edge length in pixels
//! - `THUMBGRID_INDEX_DB` - SQLite media store to list images from
//! - `THUMBGRID_DIR` - folder to list images from (ignored if a store is set)

use std::path::{Path, PathBuf};

use directories::UserDirs;

use crate::error::ConfigError;
use crate::index::{DirectoryIndex, MediaIndex, StoreIndex};
use crate::thumbnails::{DEFAULT_THUMB_SIZE, MAX_THUMB_SIZE};

const ENV_THUMB_SIZE: &str = "THUMBGRID_THUMB_SIZE";
const ENV_INDEX_DB: &str = "THUMBGRID_INDEX_DB";
const ENV_DIR: &str = "THUMBGRID_DIR";

/// Where the grid gets its image listing from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexSource {
    Directory(PathBuf),
    Store(PathBuf),
}

impl IndexSource {
    /// Pick a source for a path given on the command line.
    pub fn for_path(path: &Path) -> Self {
        let is_store = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| matches!(ext.to_lowercase().as_str(), "db" | "sqlite" | "sqlite3"));
        if is_store && !path.is_dir() {
            Self::Store(path.to_path_buf())
        } else {
            Self::Directory(path.to_path_buf())
        }
    }

    pub fn open(&self) -> Box<dyn MediaIndex + Send> {
        match self {
            Self::Directory(root) => Box::new(DirectoryIndex::new(root)),
            Self::Store(db) => Box::new(StoreIndex::new(db)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryConfig {
    pub thumb_size: u32,
    pub source: IndexSource,
}

impl GalleryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok(), default_root)
    }

    /// Build a config from a variable lookup and a fallback root.
    fn from_lookup<L, D>(lookup: L, default_root: D) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
        D: FnOnce() -> Option<PathBuf>,
    {
        let thumb_size = match lookup(ENV_THUMB_SIZE) {
            Some(raw) => parse_thumb_size(&raw)?,
            None => DEFAULT_THUMB_SIZE,
        };

        let source = if let Some(db) = lookup(ENV_INDEX_DB).filter(|v| !v.is_empty()) {
            IndexSource::Store(PathBuf::from(db))
        } else if let Some(dir) = lookup(ENV_DIR).filter(|v| !v.is_empty()) {
            IndexSource::Directory(PathBuf::from(dir))
        } else {
            IndexSource::Directory(default_root().ok_or(ConfigError::NoDefaultRoot)?)
        };

        Ok(Self { thumb_size, source })
    }

    /// Same settings, different listing.
    pub fn with_source(&self, source: IndexSource) -> Self {
        Self {
            source,
            ..self.clone()
        }
    }
}

fn parse_thumb_size(raw: &str) -> Result<u32, ConfigError> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .filter(|size| (1..=MAX_THUMB_SIZE).contains(size))
        .ok_or_else(|| ConfigError::InvalidThumbSize {
            key: ENV_THUMB_SIZE,
            value: raw.to_string(),
            max: MAX_THUMB_SIZE,
        })
}

fn default_root() -> Option<PathBuf> {
    let dirs = UserDirs::new()?;
    Some(
        dirs.picture_dir()
            .unwrap_or_else(|| dirs.home_dir())
            .to_path_buf(),
    )
}
