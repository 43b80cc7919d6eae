use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Identifier errors
    #[error("Invalid tag id: {0}")]
    InvalidTagId(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Invalid lighting mode: {0}")]
    InvalidLightingMode(String),

    #[error("Invalid animation type: {0}")]
    InvalidAnimationType(String),

    #[error("Invalid requirement flag: {0}")]
    InvalidRequirementFlag(String),

    // Settings errors
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
