//! JSON document store.

use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};
use schoolbag_content::ContentPersistence;
use schoolbag_core::{PendingTags, Settings, TagId};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Reads and writes `data.json` and `newRFID.json`.
///
/// Documents are replaced whole: each write goes to a temporary file that is
/// then renamed over the old document. A missing document reads as empty.
///
/// # Example
///
/// ```no_run
/// use schoolbag_storage::{SettingsStore, StoreConfig};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = SettingsStore::open(StoreConfig::new("/var/lib/schoolbag"))?;
/// let settings = store.load_or_default();
/// println!("{} registered tags", settings.tags.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SettingsStore {
    config: StoreConfig,
}

impl SettingsStore {
    /// Open the store, creating the data directory if configured to.
    ///
    /// # Errors
    /// Returns `StorageError::Configuration` if the directory is missing and
    /// may not be created, or `StorageError::Io` if creating it fails.
    pub fn open(config: StoreConfig) -> StorageResult<Self> {
        let dir = config.data_dir();
        if !dir.exists() {
            if !config.create_if_missing {
                return Err(StorageError::Configuration(format!(
                    "Data directory {} does not exist",
                    dir.display()
                )));
            }
            fs::create_dir_all(dir).map_err(|e| StorageError::io(dir, e))?;
            info!("Created data directory {}", dir.display());
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn settings_path(&self) -> PathBuf {
        self.config.settings_path()
    }

    pub fn pending_path(&self) -> PathBuf {
        self.config.pending_path()
    }

    /// Read the settings document. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns `StorageError::Parse` for a malformed document and
    /// `StorageError::Io` if the file cannot be read.
    pub fn load(&self) -> StorageResult<Settings> {
        let path = self.settings_path();
        match read_document(&path)? {
            Some(text) => Settings::from_json(&text).map_err(|e| StorageError::parse(&path, e)),
            None => {
                debug!("No settings at {}, using defaults", path.display());
                Ok(Settings::default())
            }
        }
    }

    /// Read the settings document, falling back to the defaults on any
    /// failure. Registered tags are dropped from the pending list.
    ///
    /// A document that does not parse is renamed to `data.json.bak` first,
    /// so the next save cannot overwrite the tags it still holds.
    pub fn load_or_default(&self) -> Settings {
        let settings = match self.load() {
            Ok(settings) => settings,
            Err(e @ StorageError::Parse { .. }) => {
                warn!("{}; falling back to default settings", e);
                self.quarantine_settings();
                Settings::default()
            }
            Err(e) => {
                warn!("{}; falling back to default settings", e);
                Settings::default()
            }
        };
        self.prune_pending_logged(&settings);
        settings
    }

    /// Where an unreadable settings document is moved aside.
    pub fn backup_path(&self) -> PathBuf {
        with_suffix(&self.settings_path(), ".bak")
    }

    fn quarantine_settings(&self) {
        let path = self.settings_path();
        let backup = self.backup_path();
        match fs::rename(&path, &backup) {
            Ok(()) => warn!("Moved unreadable {} to {}", path.display(), backup.display()),
            Err(e) => error!("Could not move {} aside: {}", path.display(), e),
        }
    }

    /// Replace the settings document.
    ///
    /// # Errors
    /// Returns `StorageError::Io` if the document cannot be written.
    pub fn save(&self, settings: &Settings) -> StorageResult<()> {
        let path = self.settings_path();
        let text = settings
            .to_json()
            .map_err(|e| StorageError::parse(&path, e))?;
        write_document(&path, &text)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Read the pending tag list. A missing file is an empty list.
    ///
    /// # Errors
    /// Returns `StorageError::Parse` for a malformed list and
    /// `StorageError::Io` if the file cannot be read.
    pub fn load_pending(&self) -> StorageResult<PendingTags> {
        let path = self.pending_path();
        match read_document(&path)? {
            Some(text) => PendingTags::from_json(&text).map_err(|e| StorageError::parse(&path, e)),
            None => Ok(PendingTags::default()),
        }
    }

    /// Read the pending tag list, falling back to an empty list.
    pub fn load_pending_or_default(&self) -> PendingTags {
        self.load_pending().unwrap_or_else(|e| {
            warn!("{}; starting with no pending tags", e);
            PendingTags::default()
        })
    }

    /// Replace the pending tag list.
    ///
    /// # Errors
    /// Returns `StorageError::Io` if the list cannot be written.
    pub fn save_pending(&self, pending: &PendingTags) -> StorageResult<()> {
        let path = self.pending_path();
        let text = pending
            .to_json()
            .map_err(|e| StorageError::parse(&path, e))?;
        write_document(&path, &text)
    }

    /// Append a tag to the pending list unless already there.
    /// Returns `true` if the list changed.
    ///
    /// # Errors
    /// Returns an error if the list cannot be read or written.
    pub fn add_pending(&self, id: TagId) -> StorageResult<bool> {
        let mut pending = self.load_pending()?;
        if !pending.push(id) {
            return Ok(false);
        }
        self.save_pending(&pending)?;
        Ok(true)
    }

    /// Remove pending tags that `settings` registers, rewriting the list if
    /// anything was removed. Returns the number removed.
    ///
    /// # Errors
    /// Returns an error if the list cannot be read or written.
    pub fn prune_pending(&self, settings: &Settings) -> StorageResult<usize> {
        let mut pending = self.load_pending()?;
        let removed = pending.remove_known(settings);
        if removed > 0 {
            self.save_pending(&pending)?;
            info!("{} pending tags have been registered", removed);
        }
        Ok(removed)
    }

    fn prune_pending_logged(&self, settings: &Settings) {
        if let Err(e) = self.prune_pending(settings) {
            warn!("Could not update pending tags: {}", e);
        }
    }
}

impl ContentPersistence for SettingsStore {
    type Error = StorageError;

    fn load_settings(&mut self) -> StorageResult<Settings> {
        let settings = self.load()?;
        self.prune_pending_logged(&settings);
        Ok(settings)
    }

    fn load_pending(&mut self) -> StorageResult<PendingTags> {
        SettingsStore::load_pending(self)
    }

    fn save_settings(&mut self, settings: &Settings) -> StorageResult<()> {
        self.save(settings)
    }

    fn save_pending(&mut self, pending: &PendingTags) -> StorageResult<()> {
        SettingsStore::save_pending(self, pending)
    }
}

fn read_document(path: &Path) -> StorageResult<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn write_document(path: &Path, text: &str) -> StorageResult<()> {
    let tmp = with_suffix(path, ".tmp");

    fs::write(&tmp, text).map_err(|e| StorageError::io(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| StorageError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use schoolbag_core::{LightingMode, TagRecord, Weekday};
    use tempfile::TempDir;

    fn id(s: &str) -> TagId {
        s.parse().unwrap()
    }

    fn store() -> (SettingsStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::open(StoreConfig::new(dir.path())).unwrap();
        (store, dir)
    }

    #[test]
    fn test_missing_documents_are_empty() {
        let (store, _dir) = store();

        assert_eq!(store.load().unwrap(), Settings::default());
        assert_eq!(store.load_pending().unwrap(), PendingTags::default());
    }

    #[test]
    fn test_empty_settings_file_is_default() {
        let (store, _dir) = store();
        fs::write(store.settings_path(), "").unwrap();

        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let (store, _dir) = store();
        let mut settings = Settings::default();
        settings.lighting_mode = LightingMode::Manual;
        settings.tags.insert(
            id("04-a1"),
            TagRecord::new("Math book", "math.png").required_on(Weekday::Monday),
        );
        settings.current_content = vec![id("04-a1")];

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);

        let text = fs::read_to_string(store.settings_path()).unwrap();
        assert!(text.contains("\"lightingMode\": \"manual\""));
        assert!(text.contains("\"monday\": \"1\""));
    }

    #[test]
    fn test_malformed_settings() {
        let (store, _dir) = store();
        fs::write(store.settings_path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Parse { .. })));
        assert_eq!(store.load_or_default(), Settings::default());
        assert!(!store.settings_path().exists());
        assert_eq!(
            fs::read_to_string(store.backup_path()).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn test_readable_settings_are_not_moved() {
        let (store, _dir) = store();
        store.save(&Settings::default()).unwrap();

        store.load_or_default();
        assert!(store.settings_path().exists());
        assert!(!store.backup_path().exists());
    }

    #[rstest]
    #[case::not_an_object("[1, 2]")]
    #[case::bad_tag_id(r#"{"tags": ["zz"]}"#)]
    #[case::truncated(r#"{"tags": ["04-a1""#)]
    fn test_malformed_pending(#[case] text: &str) {
        let (store, _dir) = store();
        fs::write(store.pending_path(), text).unwrap();

        assert!(matches!(store.load_pending(), Err(StorageError::Parse { .. })));
        assert_eq!(store.load_pending_or_default(), PendingTags::default());
    }

    #[test]
    fn test_add_pending_deduplicates() {
        let (store, _dir) = store();

        assert!(store.add_pending(id("ee")).unwrap());
        assert!(!store.add_pending(id("ee")).unwrap());
        assert_eq!(store.load_pending().unwrap().tags, vec![id("ee")]);

        let text = fs::read_to_string(store.pending_path()).unwrap();
        assert_eq!(text, r#"{"tags":["ee"]}"#);
    }

    #[test]
    fn test_load_prunes_registered_pending() {
        let (mut store, _dir) = store();
        store.add_pending(id("0a")).unwrap();
        store.add_pending(id("0b")).unwrap();

        let mut settings = Settings::default();
        settings
            .tags
            .insert(id("0a"), TagRecord::new("Ruler", "ruler.png"));
        store.save(&settings).unwrap();

        ContentPersistence::load_settings(&mut store).unwrap();
        assert_eq!(store.load_pending().unwrap().tags, vec![id("0b")]);
    }

    #[test]
    fn test_no_temporary_file_left() {
        let (store, dir) = store();
        store.save(&Settings::default()).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("data.json")]);
    }

    #[test]
    fn test_open_creates_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");

        SettingsStore::open(StoreConfig::new(&nested)).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_open_refuses_missing_directory() {
        let dir = TempDir::new().unwrap();
        let config = StoreConfig::new(dir.path().join("missing")).create_if_missing(false);

        assert!(matches!(
            SettingsStore::open(config),
            Err(StorageError::Configuration(_))
        ));
    }
}
