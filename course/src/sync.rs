//! Progress persistence boundary.
//!
//! Play never waits on persistence: [`sync_progress`] hands an update to a
//! [`ProgressSink`] and logs failures instead of returning them.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use tracing::{debug, warn};

use crate::progress::{ProgressError, ProgressStore, ProgressUpdate};
use crate::timestamp::now_ms;

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("progress rejected: {0}")]
    Rejected(#[from] ProgressError),
    #[error("progress sink unavailable: {0}")]
    Unavailable(String),
}

/// Somewhere progress updates are written.
pub trait ProgressSink {
    /// Persist one update.
    ///
    /// # Errors
    ///
    /// Returns a [`SyncError`] if the update could not be stored.
    fn push(&mut self, update: &ProgressUpdate) -> Result<(), SyncError>;
}

impl ProgressSink for ProgressStore {
    fn push(&mut self, update: &ProgressUpdate) -> Result<(), SyncError> {
        self.apply_update(update.clone(), now_ms())?;
        Ok(())
    }
}

/// Push `update` to `sink`, logging and swallowing any failure.
/// Returns `true` if the sink accepted it.
pub fn sync_progress(sink: &mut dyn ProgressSink, update: &ProgressUpdate) -> bool {
    match sink.push(update) {
        Ok(()) => {
            debug!(username = %update.username, "progress synced");
            true
        }
        Err(e) => {
            warn!(username = %update.username, error = %e, "progress sync failed");
            false
        }
    }
}

/// Collects updates in memory. Used for offline play and tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    pushed: Vec<ProgressUpdate>,
    offline: bool,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that rejects every push as unavailable.
    #[must_use]
    pub fn offline() -> Self {
        Self { pushed: Vec::new(), offline: true }
    }

    #[must_use]
    pub fn pushed(&self) -> &[ProgressUpdate] {
        &self.pushed
    }
}

impl ProgressSink for MemorySink {
    fn push(&mut self, update: &ProgressUpdate) -> Result<(), SyncError> {
        if self.offline {
            return Err(SyncError::Unavailable("offline".into()));
        }
        self.pushed.push(update.clone());
        Ok(())
    }
}
