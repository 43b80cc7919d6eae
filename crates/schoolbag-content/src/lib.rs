//! Bag content tracking.
//!
//! Accepted tag reads toggle items in and out of the bag; the result is
//! compared against the items the registry marks as required today.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐  ContentCommand   ┌──────────────────┐  ContentEvent
//! │ Reader   │──────────────────►│                  │──────────────► observers
//! │ task     │      (mpsc)       │  content task    │   (broadcast)
//! └──────────┘                   │  ContentReconciler│
//! ┌──────────┐                   │                  │──► ContentPersistence
//! │ Settings │──────────────────►│                  │
//! │ watcher  │                   └──────────────────┘
//! └──────────┘
//! ```
//!
//! The reconciler itself is synchronous and owns its projection of the
//! settings; [`task::run_content`] feeds it commands and publishes the
//! events it returns.

pub mod events;
pub mod persistence;
pub mod reconcile;
pub mod reconciler;
pub mod registry;
pub mod task;

pub use events::{ContentCommand, ContentEvent};
pub use persistence::{ContentPersistence, MemoryPersistence};
pub use reconcile::{Reconciliation, reconcile, toggle};
pub use reconciler::ContentReconciler;
pub use registry::TagRegistry;
pub use task::run_content;
