use std::path::Path;

use crate::models::ImageRecord;
use crate::thumbnails::Thumbnail;

/// A loaded grid cell: the source record and the thumbnail derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayEntry {
    pub record: ImageRecord,
    pub thumbnail: Thumbnail,
}

impl DisplayEntry {
    pub fn new(record: ImageRecord, thumbnail: Thumbnail) -> Self {
        Self { record, thumbnail }
    }

    pub fn path(&self) -> &Path {
        &self.record.path
    }
}

/// Append-only list of grid cells in load order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    entries: Vec<DisplayEntry>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its position.
    pub fn push(&mut self, entry: DisplayEntry) -> usize {
        self.entries.push(entry);
        self.entries.len() - 1
    }

    pub fn get(&self, position: usize) -> Option<&DisplayEntry> {
        self.entries.get(position)
    }

    pub fn path(&self, position: usize) -> Option<&Path> {
        self.get(position).map(DisplayEntry::path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = &DisplayEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(DisplayEntry::path)
    }
}
