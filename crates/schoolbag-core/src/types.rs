use crate::{
    Result,
    constants::{MAX_TAG_ID_LENGTH, MIN_TAG_ID_LENGTH, TAG_ID_SEPARATOR},
    error::Error,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RFID tag identifier derived from the raw UID bytes.
///
/// Rendered canonically as lowercase, hyphen-separated hex octets
/// (`04-a1-2b-3c`). Equality, ordering and hashing are over the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagId(Vec<u8>);

impl TagId {
    /// Create a tag id from raw UID bytes.
    ///
    /// # Errors
    /// Returns `Error::InvalidTagId` if the UID is empty or longer than
    /// `MAX_TAG_ID_LENGTH` bytes.
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Result<Self> {
        let bytes = bytes.into();
        let len = bytes.len();
        if !(MIN_TAG_ID_LENGTH..=MAX_TAG_ID_LENGTH).contains(&len) {
            return Err(Error::InvalidTagId(format!(
                "UID must be {MIN_TAG_ID_LENGTH}-{MAX_TAG_ID_LENGTH} bytes, got {len}"
            )));
        }
        Ok(TagId(bytes))
    }

    /// Get the raw UID bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Number of bytes in the UID.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; a tag id holds at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, byte) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "{TAG_ID_SEPARATOR}")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl FromStr for TagId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let bytes = s
            .split(TAG_ID_SEPARATOR)
            .map(|octet| {
                if octet.len() != 2 {
                    return Err(Error::InvalidTagId(format!(
                        "Octet '{octet}' in '{s}' must be two hex digits"
                    )));
                }
                u8::from_str_radix(octet, 16)
                    .map_err(|_| Error::InvalidTagId(format!("Octet '{octet}' in '{s}' is not hex")))
            })
            .collect::<Result<Vec<u8>>>()?;
        TagId::from_bytes(bytes)
    }
}

impl TryFrom<&[u8]> for TagId {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        TagId::from_bytes(bytes)
    }
}

impl Serialize for TagId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TagId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Day of the week, named the way the settings file names it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays, Monday first.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Lowercase English name as stored in the settings file.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == lower)
            .ok_or_else(|| Error::InvalidWeekday(s.to_string()))
    }
}

/// How the LED strip decides whether to animate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LightingMode {
    /// Strip is always dark.
    #[default]
    Off,

    /// Strip animates while the button has latched it on.
    Manual,

    /// Strip animates while the bag is being worn.
    Automatic,
}

impl LightingMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LightingMode::Off => "off",
            LightingMode::Manual => "manual",
            LightingMode::Automatic => "automatic",
        }
    }
}

impl fmt::Display for LightingMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LightingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "off" => Ok(LightingMode::Off),
            "manual" => Ok(LightingMode::Manual),
            "automatic" => Ok(LightingMode::Automatic),
            _ => Err(Error::InvalidLightingMode(s.to_string())),
        }
    }
}

/// LED animation selected for the strip.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnimationType {
    /// Whole strip in a fixed dim white.
    Constant,

    /// Whole strip fading through the color wheel.
    Rainbow,

    /// Rainbow spread across the strip, rotating.
    #[default]
    Cycle,

    /// Single white pixel walking along the strip.
    Wipe,

    /// Theater chase marquee.
    Chase,

    /// Full-strip red blink.
    Alert,
}

impl AnimationType {
    /// All animation types in button cycling order.
    pub const ALL: [AnimationType; 6] = [
        AnimationType::Constant,
        AnimationType::Rainbow,
        AnimationType::Cycle,
        AnimationType::Wipe,
        AnimationType::Chase,
        AnimationType::Alert,
    ];

    /// The animation following this one, wrapping after the last.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            AnimationType::Constant => AnimationType::Rainbow,
            AnimationType::Rainbow => AnimationType::Cycle,
            AnimationType::Cycle => AnimationType::Wipe,
            AnimationType::Wipe => AnimationType::Chase,
            AnimationType::Chase => AnimationType::Alert,
            AnimationType::Alert => AnimationType::Constant,
        }
    }

    /// Whether the animation has an exit step run one tick after its entry.
    #[must_use]
    pub fn has_exit(self) -> bool {
        matches!(self, AnimationType::Chase)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationType::Constant => "constant",
            AnimationType::Rainbow => "rainbow",
            AnimationType::Cycle => "cycle",
            AnimationType::Wipe => "wipe",
            AnimationType::Chase => "chase",
            AnimationType::Alert => "alert",
        }
    }
}

impl fmt::Display for AnimationType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_lowercase();
        AnimationType::ALL
            .into_iter()
            .find(|animation| animation.as_str() == lower)
            .ok_or_else(|| Error::InvalidAnimationType(s.to_string()))
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Serialize for LightingMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for LightingMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        parse_or_default(deserializer)
    }
}

impl Serialize for AnimationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AnimationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        parse_or_default(deserializer)
    }
}

/// Blank strings read as the default; anything else goes through `FromStr`.
fn parse_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = Error> + Default,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Ok(T::default());
    }
    s.parse().map_err(serde::de::Error::custom)
}

/// Wearer gender as recorded in the profile part of the settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}
