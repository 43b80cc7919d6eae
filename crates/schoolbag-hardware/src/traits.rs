//! Hardware capability trait definitions.
//!
//! These traits establish the contract between the bag's periodic tasks and
//! the peripheral drivers. All traits use native `async fn` methods
//! (Edition 2024 RPITIT), eliminating the need for the `async_trait` macro.
//!
//! # Object Safety and Dynamic Dispatch
//!
//! **NOTE**: None of these traits is object-safe because `async fn` methods
//! return opaque futures. Use generic parameters for functions that work on
//! any device, and the `Any*` enums from [`devices`](crate::devices) where a
//! concrete type is needed (for example when spawning a task).

#![allow(async_fn_in_trait)]

use crate::error::Result;
use crate::types::{AuthKey, DeviceInfo, Rgb, TagType};

/// MFRC522-style RFID reader.
///
/// A complete read is a short transaction: [`request`](Self::request) to
/// wake a tag in the field, [`anticollide`](Self::anticollide) to obtain its
/// UID, [`select_tag`](Self::select_tag) and
/// [`authenticate`](Self::authenticate) against a sector, an optional
/// [`read_block`](Self::read_block), and finally
/// [`stop_crypto`](Self::stop_crypto) to release the tag.
///
/// # Examples
///
/// ```no_run
/// use schoolbag_hardware::traits::RfidReader;
/// use schoolbag_hardware::types::AuthKey;
/// use schoolbag_hardware::error::Result;
///
/// async fn authenticated_uid<R: RfidReader>(reader: &mut R) -> Result<Option<Vec<u8>>> {
///     if reader.request().await?.is_none() {
///         return Ok(None);
///     }
///     let uid = reader.anticollide().await?;
///     reader.select_tag(&uid).await?;
///     let ok = reader.authenticate(8, &AuthKey::default(), &uid).await?;
///     reader.stop_crypto().await?;
///     Ok(ok.then_some(uid))
/// }
/// ```
pub trait RfidReader: Send + Sync {
    /// Probe the field for a tag.
    ///
    /// Returns `Ok(None)` when no tag answered.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader cannot be reached.
    async fn request(&mut self) -> Result<Option<TagType>>;

    /// Run anticollision and return the UID of the tag in the field.
    ///
    /// # Errors
    ///
    /// Returns an error if anticollision fails (several tags, weak coupling,
    /// checksum mismatch).
    async fn anticollide(&mut self) -> Result<Vec<u8>>;

    /// Select the tag with the given UID for the following commands.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag does not acknowledge the selection.
    async fn select_tag(&mut self, uid: &[u8]) -> Result<()>;

    /// Authenticate a sector block with key A.
    ///
    /// Returns `Ok(false)` when the tag rejects the key.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failures.
    async fn authenticate(&mut self, block: u8, key: &AuthKey, uid: &[u8]) -> Result<bool>;

    /// Read a 16-byte block from an authenticated sector.
    ///
    /// # Errors
    ///
    /// Returns an error if the block cannot be read.
    async fn read_block(&mut self, block: u8) -> Result<Vec<u8>>;

    /// Leave the authenticated state.
    ///
    /// # Errors
    ///
    /// Returns an error on bus failures.
    async fn stop_crypto(&mut self) -> Result<()>;

    /// Get reader information.
    ///
    /// # Errors
    ///
    /// Returns an error if the reader cannot be queried.
    async fn get_info(&self) -> Result<DeviceInfo>;
}

/// Addressable LED strip.
///
/// Pixel writes go to the driver's frame buffer and become visible on the
/// next [`show`](Self::show).
pub trait LedStrip: Send + Sync {
    /// Number of pixels on the strip.
    fn pixel_count(&self) -> usize;

    /// Write one pixel of the frame buffer.
    ///
    /// # Errors
    ///
    /// Returns [`HardwareError::PixelOutOfRange`](crate::HardwareError::PixelOutOfRange)
    /// for an index past the end of the strip.
    fn set_pixel(&mut self, index: usize, color: Rgb) -> Result<()>;

    /// Read back one pixel of the frame buffer.
    ///
    /// # Errors
    ///
    /// Returns an error for an index past the end of the strip.
    fn pixel(&self, index: usize) -> Result<Rgb>;

    /// Push the frame buffer out to the LEDs.
    ///
    /// # Errors
    ///
    /// Returns an error if the transfer fails.
    async fn show(&mut self) -> Result<()>;
}

/// Single digital input pin.
pub trait DigitalInput: Send + Sync {
    /// Sample the pin; `true` means logic high.
    ///
    /// # Errors
    ///
    /// Returns an error if the pin cannot be read.
    async fn read_pin(&mut self) -> Result<bool>;
}

/// Multi-channel analog input board.
pub trait AnalogInput: Send + Sync {
    /// Sample one channel, scaled to `0..=1023`.
    ///
    /// # Errors
    ///
    /// Returns an error if the channel does not exist or the board is gone.
    async fn read_channel(&mut self, channel: u8) -> Result<u16>;
}
