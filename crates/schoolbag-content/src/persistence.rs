//! Where the reconciler writes its state.
//!
//! The file-backed implementation lives in the storage crate; the in-memory
//! [`MemoryPersistence`] serves tests and runs without a data directory.

use schoolbag_core::{PendingTags, Settings};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Storage backend for the settings document and the pending tag list.
///
/// Writes are last-write-wins replacements of the whole document.
pub trait ContentPersistence: Send {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the settings document.
    ///
    /// # Errors
    /// Returns an error if the document cannot be read or parsed.
    fn load_settings(&mut self) -> Result<Settings, Self::Error>;

    /// Read the pending tag list.
    ///
    /// # Errors
    /// Returns an error if the list cannot be read or parsed.
    fn load_pending(&mut self) -> Result<PendingTags, Self::Error>;

    /// Replace the settings document.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn save_settings(&mut self, settings: &Settings) -> Result<(), Self::Error>;

    /// Replace the pending tag list.
    ///
    /// # Errors
    /// Returns an error if the write fails.
    fn save_pending(&mut self, pending: &PendingTags) -> Result<(), Self::Error>;
}

/// Error returned by [`MemoryPersistence`] once writes are switched off.
#[derive(Debug, thiserror::Error)]
#[error("in-memory store rejected the write")]
pub struct WriteRejected;

#[derive(Debug, Default)]
struct MemoryState {
    settings: Settings,
    pending: PendingTags,
    settings_writes: u64,
    pending_writes: u64,
    reject_writes: bool,
}

/// In-memory persistence. Clones share the same documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryPersistence {
    pub fn new(settings: Settings) -> Self {
        Self::with_pending(settings, PendingTags::default())
    }

    pub fn with_pending(settings: Settings, pending: PendingTags) -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                settings,
                pending,
                ..MemoryState::default()
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The stored settings document.
    pub fn settings(&self) -> Settings {
        self.lock().settings.clone()
    }

    /// The stored pending list.
    pub fn pending(&self) -> PendingTags {
        self.lock().pending.clone()
    }

    /// Replace the stored settings as an outside editor would.
    pub fn replace_settings(&self, settings: Settings) {
        self.lock().settings = settings;
    }

    /// Number of successful settings writes.
    pub fn settings_writes(&self) -> u64 {
        self.lock().settings_writes
    }

    /// Number of successful pending list writes.
    pub fn pending_writes(&self) -> u64 {
        self.lock().pending_writes
    }

    /// Make every following write fail.
    pub fn reject_writes(&self, reject: bool) {
        self.lock().reject_writes = reject;
    }
}

impl ContentPersistence for MemoryPersistence {
    type Error = WriteRejected;

    fn load_settings(&mut self) -> Result<Settings, WriteRejected> {
        Ok(self.settings())
    }

    fn load_pending(&mut self) -> Result<PendingTags, WriteRejected> {
        Ok(self.pending())
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), WriteRejected> {
        let mut state = self.lock();
        if state.reject_writes {
            return Err(WriteRejected);
        }
        state.settings = settings.clone();
        state.settings_writes += 1;
        Ok(())
    }

    fn save_pending(&mut self, pending: &PendingTags) -> Result<(), WriteRejected> {
        let mut state = self.lock();
        if state.reject_writes {
            return Err(WriteRejected);
        }
        state.pending = pending.clone();
        state.pending_writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_documents() {
        let mut store = MemoryPersistence::default();
        let observer = store.clone();

        let settings = Settings {
            birthday: "2015-09-01".to_string(),
            ..Settings::default()
        };
        store.save_settings(&settings).unwrap();

        assert_eq!(observer.settings(), settings);
        assert_eq!(observer.settings_writes(), 1);
    }

    #[test]
    fn test_rejected_writes_leave_documents_alone() {
        let mut store = MemoryPersistence::default();
        store.reject_writes(true);

        let mut pending = PendingTags::default();
        pending.push("0a".parse().unwrap());

        assert!(store.save_pending(&pending).is_err());
        assert_eq!(store.pending(), PendingTags::default());
        assert_eq!(store.pending_writes(), 0);
    }
}
