//! Toolkit-independent grid presenter.
//!
//! Owns the display list, feeds loader events into it in order, tells a
//! [`GridSink`] what changed, and turns selections into navigation requests.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::PresenterError;
use crate::index::MediaIndex;
use crate::models::{DisplayEntry, DisplayList};
use crate::thumbnails::{LoadEvent, LoadFailure, LoadHandle, LoadReport, ThumbnailLoader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridState {
    Empty,
    Loading,
    Ready,
}

/// Request to show one image fullscreen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationRequest {
    pub path: PathBuf,
}

/// Something that can display an image fullscreen.
pub trait FullscreenViewer {
    fn open(&self, request: NavigationRequest);
}

/// Receives grid changes so the view can re-render.
pub trait GridSink {
    fn item_appended(&mut self, position: usize, entry: &DisplayEntry);

    fn item_skipped(&mut self, _failure: &LoadFailure) {}

    fn load_finished(&mut self, _report: &LoadReport) {}
}

pub struct GridPresenter<V> {
    state: GridState,
    list: DisplayList,
    expected: Option<usize>,
    processed: usize,
    report: Option<LoadReport>,
    viewer: V,
}

impl<V: FullscreenViewer> GridPresenter<V> {
    pub fn new(viewer: V) -> Self {
        Self {
            state: GridState::Empty,
            list: DisplayList::new(),
            expected: None,
            processed: 0,
            report: None,
            viewer,
        }
    }

    /// Start the one and only load for this grid.
    pub fn initialize<I>(
        &mut self,
        loader: &ThumbnailLoader,
        index: I,
    ) -> Result<LoadHandle, PresenterError>
    where
        I: MediaIndex + Send + 'static,
    {
        if self.state != GridState::Empty {
            return Err(PresenterError::AlreadyInitialized);
        }
        let handle = loader.spawn(index)?;
        self.state = GridState::Loading;
        debug!("Grid loading");
        Ok(handle)
    }

    /// Start loading and apply every event before returning.
    ///
    /// The sink still sees one notification per item as it arrives.
    #[cfg(test)]
    pub fn initialize_blocking<I, S>(
        &mut self,
        loader: &ThumbnailLoader,
        index: I,
        sink: &mut S,
    ) -> Result<LoadReport, PresenterError>
    where
        I: MediaIndex + Send + 'static,
        S: GridSink + ?Sized,
    {
        let handle = self.initialize(loader, index)?;
        while let Some(event) = handle.next_blocking() {
            self.apply(event, sink);
        }
        Ok(handle.wait()?)
    }

    /// Apply every event already queued on `handle`. Returns how many were applied.
    #[cfg(test)]
    pub fn drain<S: GridSink + ?Sized>(&mut self, handle: &LoadHandle, sink: &mut S) -> usize {
        let mut applied = 0;
        while let Some(event) = handle.try_next() {
            self.apply(event, sink);
            applied += 1;
        }
        applied
    }

    pub fn apply<S: GridSink + ?Sized>(&mut self, event: LoadEvent, sink: &mut S) {
        match event {
            LoadEvent::Started { total } => {
                self.expected = Some(total);
            }
            LoadEvent::Loaded { position, entry } => {
                self.processed += 1;
                let pushed = self.list.push(entry);
                debug_assert_eq!(pushed, position, "loader and grid disagree on position");
                if let Some(entry) = self.list.get(pushed) {
                    sink.item_appended(pushed, entry);
                }
            }
            LoadEvent::Skipped(failure) => {
                self.processed += 1;
                sink.item_skipped(&failure);
            }
            LoadEvent::Finished(report) => {
                info!(
                    loaded = report.loaded,
                    skipped = report.skipped(),
                    "Grid ready"
                );
                self.state = GridState::Ready;
                sink.load_finished(&report);
                self.report = Some(report);
            }
        }
    }

    /// Open the image at `position` in the fullscreen viewer.
    pub fn on_select(&self, position: usize) -> Result<(), PresenterError> {
        let path = self.path_at(position)?;
        debug!(position, ?path, "Opening fullscreen viewer");
        self.viewer.open(NavigationRequest {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    pub fn path_at(&self, position: usize) -> Result<&Path, PresenterError> {
        self.list.path(position).ok_or(PresenterError::OutOfRange {
            position,
            len: self.list.len(),
        })
    }

    /// Status line for the grid, `None` when there is nothing to say.
    pub fn status_text(&self) -> Option<String> {
        match self.state {
            GridState::Empty => None,
            GridState::Loading => Some(match self.expected {
                Some(total) => format!("Loading {} of {}…", self.processed, total),
                None => "Loading…".to_string(),
            }),
            GridState::Ready => {
                let report = self.report.as_ref()?;
                if let Some(summary) = report.summary() {
                    Some(summary)
                } else if report.total == 0 {
                    Some("No images found".to_string())
                } else {
                    None
                }
            }
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> GridState {
        self.state
    }

    #[cfg(test)]
    pub fn list(&self) -> &DisplayList {
        &self.list
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    #[cfg(test)]
    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    #[cfg(test)]
    pub fn viewer(&self) -> &V {
        &self.viewer
    }
}
