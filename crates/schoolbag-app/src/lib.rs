//! Composition root of the school bag daemon.
//!
//! [`AppConfig`] gathers every subsystem's settings, [`Devices`] carries the
//! peripherals, and [`Supervisor`] spawns one task per subsystem and wires
//! their channels together:
//!
//! ```text
//!                ┌─────────────┐ TagAccepted  ┌─────────────┐ ContentEvent
//!  RFID reader ─►│ reader task │─────────────►│ content task│──────────────► subscribers
//!                └─────────────┘              └─────────────┘       │
//!                ┌─────────────┐ ReloadSettings      ▲              │ PreferencesChanged
//!  data.json  ──►│ watcher     │─────────────────────┘              ▼
//!                └─────────────┘                              ┌─────────────┐
//!                ┌─────────────┐        LightingCommand       │ lighting    │──► LED strip
//!  button     ──►│ button task │─────────────────────────────►│ task        │
//!  sensors    ──►│ presence    │─────────────────────────────►│             │
//!                └─────────────┘                              └─────────────┘
//! ```

pub mod config;
pub mod error;
pub mod supervisor;

pub use config::AppConfig;
pub use error::{AppError, TaskError};
pub use supervisor::{Devices, MockHandles, ShutdownReport, Supervisor, SupervisorHandle};
