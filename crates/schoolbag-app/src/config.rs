//! Daemon configuration.

use crate::error::AppError;
use schoolbag_core::constants::{
    ANIMATION_INTERVAL_MS, BUTTON_INTERVAL_MS, SENSOR_INTERVAL_MS, SETTINGS_WATCH_INTERVAL_MS,
};
use schoolbag_input::{ButtonConfig, PresenceConfig};
use schoolbag_lighting::EngineConfig;
use schoolbag_rfid::ReaderConfig;
use schoolbag_storage::StoreConfig;
use std::time::Duration;

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "SCHOOLBAG_DATA_DIR";

/// Environment variable selecting the mock peripherals.
pub const MOCK_HARDWARE_ENV: &str = "SCHOOLBAG_MOCK_HARDWARE";

/// Everything the supervisor needs to start the bag.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Location of `data.json` and `newRFID.json`
    pub store: StoreConfig,

    /// Run against mock peripherals instead of detaching them
    pub mock_hardware: bool,

    pub reader: ReaderConfig,
    pub button: ButtonConfig,
    pub presence: PresenceConfig,
    pub engine: EngineConfig,

    /// Interval between animation frames
    pub animation_interval: Duration,

    /// Interval between presence sensor samples
    pub sensor_interval: Duration,

    /// Interval between button samples
    pub button_interval: Duration,

    /// Interval between settings file checks
    pub watch_interval: Duration,

    pub rfid_enabled: bool,
    pub lighting_enabled: bool,
    pub button_enabled: bool,
    pub presence_enabled: bool,
    pub watcher_enabled: bool,

    /// Capacity of the command and event channels
    pub channel_capacity: usize,

    /// How long shutdown waits for tasks before aborting them
    pub shutdown_grace: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            mock_hardware: false,
            reader: ReaderConfig::default(),
            button: ButtonConfig::default(),
            presence: PresenceConfig::default(),
            engine: EngineConfig::default(),
            animation_interval: Duration::from_millis(ANIMATION_INTERVAL_MS),
            sensor_interval: Duration::from_millis(SENSOR_INTERVAL_MS),
            button_interval: Duration::from_millis(BUTTON_INTERVAL_MS),
            watch_interval: Duration::from_millis(SETTINGS_WATCH_INTERVAL_MS),
            rfid_enabled: true,
            lighting_enabled: true,
            button_enabled: true,
            presence_enabled: true,
            watcher_enabled: true,
            channel_capacity: 32,
            shutdown_grace: Duration::from_secs(2),
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `SCHOOLBAG_DATA_DIR` and
    /// `SCHOOLBAG_MOCK_HARDWARE`.
    ///
    /// # Errors
    /// Returns `AppError::InvalidEnv` for a mock flag that is not a boolean.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    ///
    /// # Errors
    /// Returns `AppError::InvalidEnv` for a mock flag that is not a boolean.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let mut config = Self::default();

        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|dir| !dir.trim().is_empty()) {
            config.store = StoreConfig::new(dir.trim());
        }

        if let Some(value) = lookup(MOCK_HARDWARE_ENV) {
            config.mock_hardware = parse_flag(&value).ok_or(AppError::InvalidEnv {
                name: MOCK_HARDWARE_ENV,
                value,
            })?;
        }

        Ok(config)
    }

    pub fn with_store(mut self, store: StoreConfig) -> Self {
        self.store = store;
        self
    }

    pub fn with_mock_hardware(mut self, mock: bool) -> Self {
        self.mock_hardware = mock;
        self
    }

    pub fn with_watcher(mut self, enabled: bool) -> Self {
        self.watcher_enabled = enabled;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
