//! Common types shared across hardware device implementations.

use serde::{Deserialize, Serialize};

/// Generic device information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Device name (e.g., "MFRC522", "Mock LED Strip").
    pub name: String,

    /// Device model identifier.
    pub model: String,

    /// Optional firmware version string.
    pub firmware_version: Option<String>,
}

impl DeviceInfo {
    /// Create a new DeviceInfo with required fields.
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: model.into(),
            firmware_version: None,
        }
    }

    /// Set the firmware version.
    pub fn with_firmware_version(mut self, firmware_version: impl Into<String>) -> Self {
        self.firmware_version = Some(firmware_version.into());
        self
    }
}

/// A pixel color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const RED: Rgb = Rgb::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray with all three channels at `level`.
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    pub fn is_black(&self) -> bool {
        *self == Self::BLACK
    }

    /// Pack as `0x00RRGGBB`, the layout NeoPixel drivers take.
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Tag type word answered by the reader to a REQA/REQIDL request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagType(pub u16);

impl TagType {
    /// ATQA of a MIFARE Classic 1K.
    pub const MIFARE_CLASSIC_1K: TagType = TagType(0x0004);

    /// ATQA of a MIFARE Ultralight.
    pub const MIFARE_ULTRALIGHT: TagType = TagType(0x0044);
}

/// Six-byte sector key used for MIFARE Classic authentication.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthKey(pub [u8; 6]);

impl Default for AuthKey {
    /// The factory transport key `FF FF FF FF FF FF`.
    fn default() -> Self {
        Self([0xFF; 6])
    }
}

impl AuthKey {
    pub fn as_bytes(&self) -> &[u8; 6] {
        &self.0
    }
}
