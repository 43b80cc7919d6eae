//! Appliance-wide constants.
//!
//! These values describe the physical school bag: reader timing, debounce
//! thresholds, the LED strip geometry and the analog presence sensors. They
//! are the defaults every per-crate configuration struct starts from.
//!
//! # Usage
//!
//! ```
//! use schoolbag_core::constants::*;
//! use std::time::Duration;
//!
//! let read_interval = Duration::from_millis(READ_INTERVAL_MS);
//! assert_eq!(read_interval, Duration::from_millis(250));
//! assert!(PRESENCE_THRESHOLD < ANALOG_MAX);
//! ```

// ============================================================================
// Tag Identifiers
// ============================================================================

/// Minimum UID length in bytes accepted as a tag identifier.
pub const MIN_TAG_ID_LENGTH: usize = 1;

/// Maximum UID length in bytes (ISO 14443 triple-size UID).
pub const MAX_TAG_ID_LENGTH: usize = 10;

/// Separator between hex octets in the canonical tag id rendering.
pub const TAG_ID_SEPARATOR: char = '-';

// ============================================================================
// RFID Reader
// ============================================================================

/// Consecutive identical reads required before a tag is accepted.
pub const DEFAULT_ACCEPTANCE_THRESHOLD: u32 = 2;

/// Consecutive misses tolerated before the match counter is reset.
pub const DEFAULT_MISS_TOLERANCE: u32 = 1;

/// Interval between reader polls in milliseconds (4 Hz).
pub const READ_INTERVAL_MS: u64 = 250;

/// Default MIFARE Classic sector key.
pub const DEFAULT_AUTH_KEY: [u8; 6] = [0xFF; 6];

/// Block authenticated and read after anticollision.
pub const AUTH_BLOCK: u8 = 8;

// ============================================================================
// LED Strip
// ============================================================================

/// Number of pixels on the bag's LED strip.
pub const DEFAULT_PIXEL_COUNT: usize = 30;

/// Interval between animation ticks in milliseconds (50 Hz).
pub const ANIMATION_INTERVAL_MS: u64 = 20;

/// Channel level used by the constant dim-white animation.
pub const CONSTANT_WHITE_LEVEL: u8 = 50;

/// Number of positions on the color wheel.
pub const WHEEL_SIZE: usize = 256;

/// Spacing of lit pixels in the theater chase.
pub const CHASE_SPACING: usize = 3;

// ============================================================================
// Sensors and Button
// ============================================================================

/// Highest value reported by the analog inputs.
pub const ANALOG_MAX: u16 = 1023;

/// Analog level above which a strap counts as loaded.
pub const PRESENCE_THRESHOLD: u16 = 100;

/// Analog channels wired to the two strap sensors.
pub const PRESENCE_CHANNELS: (u8, u8) = (2, 3);

/// Interval between presence sensor samples in milliseconds.
pub const SENSOR_INTERVAL_MS: u64 = 100;

/// Interval between button samples in milliseconds.
pub const BUTTON_INTERVAL_MS: u64 = 100;

/// Consecutive pressed samples that make a long press (about 600 ms).
pub const LONG_PRESS_SAMPLES: u32 = 6;

// ============================================================================
// Persistence
// ============================================================================

/// File name of the persisted settings document.
pub const SETTINGS_FILE_NAME: &str = "data.json";

/// File name of the pending (unregistered) tag list.
pub const PENDING_TAGS_FILE_NAME: &str = "newRFID.json";

/// Interval between settings file modification checks in milliseconds.
pub const SETTINGS_WATCH_INTERVAL_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presence_threshold_in_analog_range() {
        assert!(PRESENCE_THRESHOLD > 0);
        assert!(PRESENCE_THRESHOLD < ANALOG_MAX);
    }

    #[test]
    fn test_tag_id_length_bounds() {
        assert!(MIN_TAG_ID_LENGTH <= MAX_TAG_ID_LENGTH);
    }
}
