//! Enum wrappers for hardware device dispatch.
//!
//! Native `async fn` in traits is not object-safe, so `Box<dyn RfidReader>`
//! is not available. The tasks that own a device are spawned with one of
//! these concrete enums instead, which keeps dispatch static and lets the
//! futures stay `Send`.
//!
//! Every wrapper carries a `Detached` variant for a peripheral that failed
//! to attach at start-up. A detached device answers every operation with
//! [`HardwareError::NotAttached`], and [`is_attached`](AnyRfidReader::is_attached)
//! lets the supervisor skip the task for it.
//!
//! # Examples
//!
//! ```
//! use schoolbag_hardware::devices::AnyRfidReader;
//! use schoolbag_hardware::mock::MockRfid;
//!
//! let (reader, _handle) = MockRfid::new();
//! let any_reader = AnyRfidReader::Mock(reader);
//! assert!(any_reader.is_attached());
//! ```

use crate::mock::{MockAnalogInput, MockDigitalInput, MockLedStrip, MockRfid};
use crate::traits::{AnalogInput, DigitalInput, LedStrip, RfidReader};
use crate::{AuthKey, DeviceInfo, HardwareError, Result, Rgb, TagType};

const RFID_READER: &str = "RFID reader";
const LED_STRIP: &str = "LED strip";
const BUTTON: &str = "button";
const PRESENCE_SENSORS: &str = "presence sensors";

/// Enum wrapper for RFID reader dispatch.
///
/// # Examples
///
/// ```
/// use schoolbag_hardware::devices::AnyRfidReader;
/// use schoolbag_hardware::traits::RfidReader;
/// use schoolbag_hardware::mock::MockRfid;
///
/// #[tokio::main]
/// async fn main() -> schoolbag_hardware::Result<()> {
///     let (reader, _handle) = MockRfid::new();
///     let any_reader = AnyRfidReader::Mock(reader);
///
///     let info = any_reader.get_info().await?;
///     println!("Reader: {}", info.name);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyRfidReader {
    /// Mock reader for development and testing.
    Mock(MockRfid),

    /// No reader attached.
    Detached,
}

impl AnyRfidReader {
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::Detached)
    }
}

impl RfidReader for AnyRfidReader {
    async fn request(&mut self) -> Result<Option<TagType>> {
        match self {
            Self::Mock(device) => device.request().await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }

    async fn anticollide(&mut self) -> Result<Vec<u8>> {
        match self {
            Self::Mock(device) => device.anticollide().await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }

    async fn select_tag(&mut self, uid: &[u8]) -> Result<()> {
        match self {
            Self::Mock(device) => device.select_tag(uid).await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }

    async fn authenticate(&mut self, block: u8, key: &AuthKey, uid: &[u8]) -> Result<bool> {
        match self {
            Self::Mock(device) => device.authenticate(block, key, uid).await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }

    async fn read_block(&mut self, block: u8) -> Result<Vec<u8>> {
        match self {
            Self::Mock(device) => device.read_block(block).await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }

    async fn stop_crypto(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.stop_crypto().await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.get_info().await,
            Self::Detached => Err(HardwareError::not_attached(RFID_READER)),
        }
    }
}

/// Enum wrapper for LED strip dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyLedStrip {
    /// Mock strip for development and testing.
    Mock(MockLedStrip),

    /// No strip attached. Reports zero pixels.
    Detached,
}

impl AnyLedStrip {
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::Detached)
    }
}

impl LedStrip for AnyLedStrip {
    fn pixel_count(&self) -> usize {
        match self {
            Self::Mock(device) => device.pixel_count(),
            Self::Detached => 0,
        }
    }

    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()> {
        match self {
            Self::Mock(device) => device.set_pixel(index, color),
            Self::Detached => Err(HardwareError::not_attached(LED_STRIP)),
        }
    }

    fn pixel(&self, index: usize) -> Result<Rgb> {
        match self {
            Self::Mock(device) => device.pixel(index),
            Self::Detached => Err(HardwareError::not_attached(LED_STRIP)),
        }
    }

    async fn show(&mut self) -> Result<()> {
        match self {
            Self::Mock(device) => device.show().await,
            Self::Detached => Err(HardwareError::not_attached(LED_STRIP)),
        }
    }
}

/// Enum wrapper for digital input dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyDigitalInput {
    /// Mock pin for development and testing.
    Mock(MockDigitalInput),

    /// No pin attached.
    Detached,
}

impl AnyDigitalInput {
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::Detached)
    }
}

impl DigitalInput for AnyDigitalInput {
    async fn read_pin(&mut self) -> Result<bool> {
        match self {
            Self::Mock(device) => device.read_pin().await,
            Self::Detached => Err(HardwareError::not_attached(BUTTON)),
        }
    }
}

/// Enum wrapper for analog input dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyAnalogInput {
    /// Mock board for development and testing.
    Mock(MockAnalogInput),

    /// No board attached.
    Detached,
}

impl AnyAnalogInput {
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::Detached)
    }
}

impl AnalogInput for AnyAnalogInput {
    async fn read_channel(&mut self, channel: u8) -> Result<u16> {
        match self {
            Self::Mock(device) => device.read_channel(channel).await,
            Self::Detached => Err(HardwareError::not_attached(PRESENCE_SENSORS)),
        }
    }
}
