use schoolbag_core::constants::{PENDING_TAGS_FILE_NAME, SETTINGS_FILE_NAME};
use std::path::{Path, PathBuf};

/// Location of the bag's documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory holding both documents
    pub data_dir: PathBuf,

    /// Settings document file name
    pub settings_file: String,

    /// Pending tag list file name
    pub pending_file: String,

    /// Whether to create the data directory if it doesn't exist
    pub create_if_missing: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            settings_file: SETTINGS_FILE_NAME.to_string(),
            pending_file: PENDING_TAGS_FILE_NAME.to_string(),
            create_if_missing: true,
        }
    }
}

impl StoreConfig {
    /// Create a configuration for the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Default::default()
        }
    }

    /// Set the settings document file name
    pub fn settings_file(mut self, name: impl Into<String>) -> Self {
        self.settings_file = name.into();
        self
    }

    /// Set the pending tag list file name
    pub fn pending_file(mut self, name: impl Into<String>) -> Self {
        self.pending_file = name.into();
        self
    }

    /// Set whether to create the data directory if it doesn't exist
    pub fn create_if_missing(mut self, create: bool) -> Self {
        self.create_if_missing = create;
        self
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(&self.settings_file)
    }

    pub fn pending_path(&self) -> PathBuf {
        self.data_dir.join(&self.pending_file)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_file_names() {
        let config = StoreConfig::new("/var/lib/schoolbag");

        assert_eq!(
            config.settings_path(),
            PathBuf::from("/var/lib/schoolbag/data.json")
        );
        assert_eq!(
            config.pending_path(),
            PathBuf::from("/var/lib/schoolbag/newRFID.json")
        );
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::new("data")
            .settings_file("settings.json")
            .pending_file("pending.json")
            .create_if_missing(false);

        assert_eq!(config.settings_path(), PathBuf::from("data/settings.json"));
        assert_eq!(config.pending_path(), PathBuf::from("data/pending.json"));
        assert!(!config.create_if_missing);
    }
}
