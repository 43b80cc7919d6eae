//! Mock device implementations for testing and development.
//!
//! Each mock is created together with a handle sharing its state, so a test
//! (or the binary running without hardware) can drive inputs and observe
//! outputs while the device itself is owned by a task.

pub mod analog;
pub mod digital;
pub mod led_strip;
pub mod rfid;

// Re-export commonly used types
pub use analog::{MockAnalogInput, MockAnalogInputHandle};
pub use digital::{MockDigitalInput, MockDigitalInputHandle};
pub use led_strip::{MockLedStrip, MockLedStripHandle};
pub use rfid::{MockRead, MockRfid, MockRfidHandle};
