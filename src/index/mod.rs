//! Media indexes: ordered listings of the images the grid should show.
//!
//! - `DirectoryIndex` - Walks a picture folder on disk
//! - `StoreIndex` - Queries a read-only SQLite media store

pub mod directory;
pub mod store;

pub use directory::DirectoryIndex;
pub use store::StoreIndex;

use crate::error::IndexError;
use crate::models::ImageRecord;

/// A source of image records, listed newest first.
pub trait MediaIndex {
    fn query(&self) -> Result<Vec<ImageRecord>, IndexError>;
}

impl<T: MediaIndex + ?Sized> MediaIndex for Box<T> {
    fn query(&self) -> Result<Vec<ImageRecord>, IndexError> {
        (**self).query()
    }
}
