//! Hardware capability layer for the smart school bag.
//!
//! The bag talks to four kinds of peripherals: an MFRC522-style RFID reader,
//! an addressable LED strip, a push button on a digital input and two strap
//! sensors on an analog board. This crate defines one trait per capability
//! so the reader, lighting and input tasks never depend on a concrete driver.
//!
//! # Design Philosophy
//!
//! - **Async-first**: I/O methods are native `async fn` in traits
//!   (Edition 2024 RPITIT). Cheap buffer accessors stay synchronous.
//! - **Enum dispatch**: the traits are not object-safe; the
//!   [`devices`] module wraps implementations in `Any*` enums.
//! - **Degraded mode**: every wrapper has a `Detached` variant standing in
//!   for hardware that failed to attach. Its operations return
//!   [`HardwareError::NotAttached`] and the supervisor does not start a task
//!   for it.
//!
//! # Example
//!
//! ```no_run
//! use schoolbag_hardware::traits::RfidReader;
//! use schoolbag_hardware::error::Result;
//!
//! async fn uid_in_field<R: RfidReader>(reader: &mut R) -> Result<Option<Vec<u8>>> {
//!     if reader.request().await?.is_none() {
//!         return Ok(None);
//!     }
//!     Ok(Some(reader.anticollide().await?))
//! }
//! ```
//!
//! # Mock Implementations
//!
//! The [`mock`] module provides in-memory devices paired with control
//! handles, used by the test suites and by the binary when no hardware is
//! present.

pub mod devices;
pub mod error;
pub mod mock;
pub mod traits;
pub mod types;

// Re-export commonly used types for convenience
pub use devices::{AnyAnalogInput, AnyDigitalInput, AnyLedStrip, AnyRfidReader};
pub use error::{HardwareError, Result};
pub use traits::{AnalogInput, DigitalInput, LedStrip, RfidReader};
pub use types::{AuthKey, DeviceInfo, Rgb, TagType};
