//! Persisted settings document.
//!
//! [`Settings`] mirrors the `data.json` file: the wearer's profile, the
//! lighting preferences, the registered tag table and the tags currently
//! toggled into the bag. [`PendingTags`] mirrors `newRFID.json`, the list of
//! tags seen by the reader but not yet registered.
//!
//! Settings values are immutable snapshots once handed to another task; the
//! owner of a snapshot applies changes by producing a new one.

use crate::{
    Result,
    tag::TagRecord,
    types::{AnimationType, Gender, LightingMode, TagId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of the settings file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub gender: Gender,
    pub birthday: String,
    pub height: f64,
    pub weight: f64,
    pub lighting_mode: LightingMode,
    pub animation_type: AnimationType,

    /// Registered tags keyed by id.
    pub tags: BTreeMap<TagId, TagRecord>,

    /// Tags currently toggled into the bag, in insertion order.
    pub current_content: Vec<TagId>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gender: Gender::Male,
            birthday: String::new(),
            height: 0.0,
            weight: 0.0,
            lighting_mode: LightingMode::Off,
            animation_type: AnimationType::Cycle,
            tags: BTreeMap::new(),
            current_content: Vec::new(),
        }
    }
}

impl Settings {
    /// Parse a settings document.
    ///
    /// An empty (or whitespace-only) document yields the default settings.
    ///
    /// # Errors
    /// Returns `Error::SettingsParse` if the document is not valid settings JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Render the settings as pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `Error::SettingsParse` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Replace the current content, keeping the ordering of the given set.
    pub fn set_current_content<'a>(&mut self, content: impl IntoIterator<Item = &'a TagId>) {
        self.current_content = content.into_iter().cloned().collect();
    }
}

/// Contents of the pending tag file: `{"tags": ["04-a1", ...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingTags {
    #[serde(default)]
    pub tags: Vec<TagId>,
}

impl PendingTags {
    /// Parse a pending tag document; an empty document is an empty list.
    ///
    /// # Errors
    /// Returns `Error::SettingsParse` if the document is malformed.
    pub fn from_json(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(text)?)
    }

    /// Render the list as JSON.
    ///
    /// # Errors
    /// Returns `Error::SettingsParse` if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Append a tag unless it is already pending. Returns `true` if added.
    pub fn push(&mut self, id: TagId) -> bool {
        if self.tags.contains(&id) {
            return false;
        }
        self.tags.push(id);
        true
    }

    /// Drop every pending tag that has since been registered.
    /// Returns the number of tags removed.
    pub fn remove_known(&mut self, settings: &Settings) -> usize {
        let before = self.tags.len();
        self.tags.retain(|id| !settings.tags.contains_key(id));
        before - self.tags.len()
    }

    #[must_use]
    pub fn contains(&self, id: &TagId) -> bool {
        self.tags.contains(id)
    }
}
