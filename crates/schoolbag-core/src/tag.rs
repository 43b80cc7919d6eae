//! Registered tag records.
//!
//! A [`TagRecord`] describes one school supply: its display name, its icon
//! and the weekdays on which it has to be in the bag. In the settings file
//! the weekday flags sit next to the name fields as `"0"`/`"1"` strings:
//!
//! ```json
//! {"materialName": "Math book", "imgName": "book.png",
//!  "monday": "1", "tuesday": "0", "wednesday": "1", "thursday": "0",
//!  "friday": "0", "saturday": "0", "sunday": "0"}
//! ```

use crate::types::Weekday;
use serde::{Deserialize, Serialize};

/// A known tag and the days it is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagRecord {
    /// Display name of the item.
    #[serde(default)]
    pub material_name: String,

    /// Icon file shown next to the item.
    #[serde(default)]
    pub img_name: String,

    /// Per-weekday requirement flags.
    #[serde(flatten)]
    pub schedule: WeeklySchedule,
}

impl TagRecord {
    /// Create a record that is not required on any day.
    pub fn new(material_name: impl Into<String>, img_name: impl Into<String>) -> Self {
        Self {
            material_name: material_name.into(),
            img_name: img_name.into(),
            schedule: WeeklySchedule::default(),
        }
    }

    /// Mark the item as required on the given day.
    pub fn required_on(mut self, day: Weekday) -> Self {
        self.schedule.set(day, true);
        self
    }

    /// Whether the item has to be packed on the given day.
    #[must_use]
    pub fn is_required_on(&self, day: Weekday) -> bool {
        self.schedule.get(day)
    }
}

/// Requirement flag for each weekday.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    #[serde(default, with = "flag")]
    pub monday: bool,
    #[serde(default, with = "flag")]
    pub tuesday: bool,
    #[serde(default, with = "flag")]
    pub wednesday: bool,
    #[serde(default, with = "flag")]
    pub thursday: bool,
    #[serde(default, with = "flag")]
    pub friday: bool,
    #[serde(default, with = "flag")]
    pub saturday: bool,
    #[serde(default, with = "flag")]
    pub sunday: bool,
}

impl WeeklySchedule {
    #[must_use]
    pub fn get(&self, day: Weekday) -> bool {
        match day {
            Weekday::Monday => self.monday,
            Weekday::Tuesday => self.tuesday,
            Weekday::Wednesday => self.wednesday,
            Weekday::Thursday => self.thursday,
            Weekday::Friday => self.friday,
            Weekday::Saturday => self.saturday,
            Weekday::Sunday => self.sunday,
        }
    }

    pub fn set(&mut self, day: Weekday, required: bool) {
        let slot = match day {
            Weekday::Monday => &mut self.monday,
            Weekday::Tuesday => &mut self.tuesday,
            Weekday::Wednesday => &mut self.wednesday,
            Weekday::Thursday => &mut self.thursday,
            Weekday::Friday => &mut self.friday,
            Weekday::Saturday => &mut self.saturday,
            Weekday::Sunday => &mut self.sunday,
        };
        *slot = required;
    }
}

/// `"0"`/`"1"` string encoding of a requirement flag.
///
/// Booleans and the integers 0 and 1 are accepted on input as well, since
/// hand-edited files use them.
mod flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Bool(bool),
        Number(u64),
    }

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match Raw::deserialize(deserializer)? {
            Raw::Text(text) => match text.trim() {
                "1" => Ok(true),
                "0" | "" => Ok(false),
                other => Err(D::Error::custom(format!(
                    "requirement flag must be \"0\" or \"1\", got \"{other}\""
                ))),
            },
            Raw::Bool(value) => Ok(value),
            Raw::Number(0) => Ok(false),
            Raw::Number(1) => Ok(true),
            Raw::Number(other) => Err(D::Error::custom(format!(
                "requirement flag must be 0 or 1, got {other}"
            ))),
        }
    }
}
