//! Background thumbnail loading.
//!
//! - One named worker thread per load, no pool
//! - Events stream to the UI over an unbounded async channel, in index order
//! - The final `LoadReport` is also delivered through a oneshot so callers
//!   can await completion without consuming the event stream

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use tokio::sync::oneshot;
use tracing::{debug, info, trace, warn};

use super::generator::ThumbnailGenerator;
use crate::error::LoadError;
use crate::index::MediaIndex;
use crate::models::DisplayEntry;
#[cfg(test)]
use crate::models::DisplayList;

/// Progress of a load, in the order the worker produced it.
#[derive(Debug, Clone)]
pub enum LoadEvent {
    /// The index was queried and lists `total` images.
    Started { total: usize },
    /// A thumbnail is ready; `position` is its slot in the display list.
    Loaded { position: usize, entry: DisplayEntry },
    /// An image could not be turned into a thumbnail.
    Skipped(LoadFailure),
    /// Loading is over. Always the last event.
    Finished(LoadReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Number of records the index returned.
    pub total: usize,
    /// Number of thumbnails appended.
    pub loaded: usize,
    pub failures: Vec<LoadFailure>,
    /// Set when the index itself could not be queried.
    pub index_error: Option<String>,
}

impl LoadReport {
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }

    /// True when the index was read and every image decoded.
    #[cfg(test)]
    pub fn is_complete(&self) -> bool {
        self.index_error.is_none() && self.failures.is_empty()
    }

    /// Human readable description of partial failure, if any.
    pub fn summary(&self) -> Option<String> {
        if self.index_error.is_some() {
            return Some("Images could not be listed".to_string());
        }
        if self.failures.is_empty() {
            return None;
        }
        Some(format!(
            "{} of {} failed to load",
            self.skipped(),
            self.total
        ))
    }
}

/// Loads square thumbnails for everything a media index lists.
#[derive(Debug, Clone, Copy)]
pub struct ThumbnailLoader {
    thumb_size: u32,
}

impl ThumbnailLoader {
    pub fn new(thumb_size: u32) -> Self {
        Self { thumb_size }
    }

    pub fn thumb_size(&self) -> u32 {
        self.thumb_size
    }

    /// Start loading on a dedicated worker thread.
    pub fn spawn<I>(&self, index: I) -> Result<LoadHandle, LoadError>
    where
        I: MediaIndex + Send + 'static,
    {
        let (event_tx, event_rx) = async_channel::unbounded();
        let (done_tx, done_rx) = oneshot::channel();
        let thumb_size = self.thumb_size;

        let thread = thread::Builder::new()
            .name("thumb-loader".to_string())
            .spawn(move || {
                let report = run_load(&index, thumb_size, |event| {
                    // The grid may be gone already; loading still runs to completion.
                    if event_tx.send_blocking(event).is_err() {
                        trace!("Load event receiver dropped");
                    }
                });
                let _ = done_tx.send(report);
            })?;

        debug!(thumb_size, "Started thumbnail loader");

        Ok(LoadHandle {
            events: event_rx,
            done: done_rx,
            thread,
        })
    }

    /// Load on the calling thread and return the finished list.
    #[cfg(test)]
    pub fn load<I>(&self, index: &I) -> (DisplayList, LoadReport)
    where
        I: MediaIndex + ?Sized,
    {
        let mut list = DisplayList::new();
        let report = run_load(index, self.thumb_size, |event| {
            if let LoadEvent::Loaded { entry, .. } = event {
                list.push(entry);
            }
        });
        (list, report)
    }
}

/// Handle to a running load.
pub struct LoadHandle {
    events: async_channel::Receiver<LoadEvent>,
    done: oneshot::Receiver<LoadReport>,
    thread: JoinHandle<()>,
}

impl LoadHandle {
    /// The event stream, for consumers that await events on a main loop.
    pub fn events(&self) -> async_channel::Receiver<LoadEvent> {
        self.events.clone()
    }

    /// Next event if one is queued.
    #[cfg(test)]
    pub fn try_next(&self) -> Option<LoadEvent> {
        self.events.try_recv().ok()
    }

    /// Block until the next event. `None` once the worker is done and the queue drained.
    #[cfg(test)]
    pub fn next_blocking(&self) -> Option<LoadEvent> {
        self.events.recv_blocking().ok()
    }

    /// Wait for the report without blocking the executor.
    pub async fn finished(self) -> Result<LoadReport, LoadError> {
        let report = self.done.await.map_err(|_| LoadError::WorkerLost)?;
        debug!(
            thread = self.thread.thread().name().unwrap_or_default(),
            loaded = report.loaded,
            "Loader reported"
        );
        Ok(report)
    }

    /// Join the worker thread and return its report.
    #[cfg(test)]
    pub fn wait(mut self) -> Result<LoadReport, LoadError> {
        self.thread.join().map_err(|_| LoadError::WorkerLost)?;
        self.done.try_recv().map_err(|_| LoadError::WorkerLost)
    }
}

fn run_load<I, F>(index: &I, thumb_size: u32, mut emit: F) -> LoadReport
where
    I: MediaIndex + ?Sized,
    F: FnMut(LoadEvent),
{
    let mut report = LoadReport::default();

    let records = match index.query() {
        Ok(records) => records,
        Err(e) => {
            warn!(error = %e, "Media index query failed");
            report.index_error = Some(e.to_string());
            emit(LoadEvent::Finished(report.clone()));
            return report;
        }
    };

    report.total = records.len();
    info!(total = report.total, "Loading thumbnails");
    emit(LoadEvent::Started {
        total: report.total,
    });

    for record in records {
        match ThumbnailGenerator::generate(&record.path, thumb_size) {
            Ok(thumbnail) => {
                let position = report.loaded;
                report.loaded += 1;
                emit(LoadEvent::Loaded {
                    position,
                    entry: DisplayEntry::new(record, thumbnail),
                });
            }
            Err(e) => {
                warn!(path = ?record.path, error = %e, "Failed to load thumbnail");
                let failure = LoadFailure {
                    path: record.path,
                    error: e.to_string(),
                };
                report.failures.push(failure.clone());
                emit(LoadEvent::Skipped(failure));
            }
        }
    }

    info!(
        "Thumbnail load complete: {} loaded, {} skipped",
        report.loaded,
        report.skipped()
    );
    emit(LoadEvent::Finished(report.clone()));
    report
}
