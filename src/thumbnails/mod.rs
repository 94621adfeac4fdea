//! Thumbnail pipeline for the gallery grid.
//!
//! This module provides:
//! - `ThumbnailGenerator` - Extracts fixed-size square thumbnails from source images
//! - `ThumbnailLoader` - Worker that walks the media index and streams thumbnails to the grid

pub mod generator;
pub mod loader;

pub use generator::{Thumbnail, DEFAULT_THUMB_SIZE, MAX_THUMB_SIZE};
pub use loader::{LoadEvent, LoadFailure, LoadHandle, LoadReport, ThumbnailLoader};
