//! File-backed persistence for the school bag.
//!
//! Two JSON documents live in the data directory:
//!
//! - `data.json`: the [`Settings`](schoolbag_core::Settings) document
//! - `newRFID.json`: the [`PendingTags`](schoolbag_core::PendingTags) list
//!
//! [`SettingsStore`] reads and writes both and implements
//! [`ContentPersistence`](schoolbag_content::ContentPersistence).
//! [`watcher::run_settings_watcher`] polls the settings file and asks the
//! content task to reload when something else rewrites it.

pub mod config;
pub mod error;
pub mod store;
pub mod watcher;

pub use config::StoreConfig;
pub use error::{StorageError, StorageResult};
pub use store::SettingsStore;
pub use watcher::run_settings_watcher;
