//! Error types shared across the gallery core.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to enumerate the media index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("media root {0:?} is not a readable directory")]
    MissingRoot(PathBuf),

    #[error("failed to walk {root:?}: {source}")]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to open media store {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("media store query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

/// Failure to turn one image file into a thumbnail.
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("failed to read image {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("GIF has no frames: {0:?}")]
    EmptyAnimation(PathBuf),

    #[error("image has zero size: {0:?}")]
    ZeroSize(PathBuf),
}

/// Failure of the loader machinery itself (not of individual images).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to spawn loader thread: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("loader thread exited without reporting")]
    WorkerLost,
}

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("grid was already initialized")]
    AlreadyInitialized,

    #[error("position {position} is outside the grid ({len} items)")]
    OutOfRange { position: usize, len: usize },

    #[error(transparent)]
    Load(#[from] LoadError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{key} must be an integer between 1 and {max}, got {value:?}")]
    InvalidThumbSize {
        key: &'static str,
        value: String,
        max: u32,
    },

    #[error("no pictures or home directory could be determined")]
    NoDefaultRoot,
}
