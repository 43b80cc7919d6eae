//! Error types for hardware operations.
//!
//! Covers the failures a peripheral can report: a device that never attached
//! or went away, protocol-level rejections from the RFID chip and
//! out-of-range arguments such as a pixel index past the end of the strip.

/// Result type alias for hardware operations.
pub type Result<T> = std::result::Result<T, HardwareError>;

/// Errors that can occur during hardware device operations.
#[derive(Debug, thiserror::Error)]
pub enum HardwareError {
    /// Device was not found when the application started.
    #[error("Device not attached: {device}")]
    NotAttached { device: String },

    /// Device is not connected or has been disconnected.
    #[error("Device disconnected: {device}")]
    Disconnected { device: String },

    /// Bus communication error.
    #[error("Communication error: {message}")]
    CommunicationError { message: String },

    /// Invalid data received from or passed to the device.
    #[error("Invalid data: {message}")]
    InvalidData { message: String },

    /// Pixel index outside the strip.
    #[error("Pixel index {index} out of range for strip of {count}")]
    PixelOutOfRange { index: usize, count: usize },
}

impl HardwareError {
    /// Create a new not-attached error.
    pub fn not_attached(device: impl Into<String>) -> Self {
        Self::NotAttached {
            device: device.into(),
        }
    }

    /// Create a new disconnected error.
    pub fn disconnected(device: impl Into<String>) -> Self {
        Self::Disconnected {
            device: device.into(),
        }
    }

    /// Create a new communication error.
    pub fn communication(message: impl Into<String>) -> Self {
        Self::CommunicationError {
            message: message.into(),
        }
    }

    /// Create a new invalid data error.
    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create a new pixel range error.
    pub fn pixel_out_of_range(index: usize, count: usize) -> Self {
        Self::PixelOutOfRange { index, count }
    }

    /// Whether the error means the device is gone for good.
    ///
    /// Polling tasks stop on these and keep going on everything else.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::NotAttached { .. } | Self::Disconnected { .. })
    }
}
