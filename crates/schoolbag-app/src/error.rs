use schoolbag_hardware::HardwareError;
use thiserror::Error;

/// Start-up failures of the daemon.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Storage error: {0}")]
    Storage(#[from] schoolbag_storage::StorageError),
}

/// Why a supervised task ended with an error.
#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{task} task stopped: {source}")]
    Hardware {
        task: &'static str,
        #[source]
        source: HardwareError,
    },
}

impl TaskError {
    pub fn hardware(task: &'static str, source: HardwareError) -> Self {
        Self::Hardware { task, source }
    }

    /// Name of the task that failed.
    pub fn task(&self) -> &'static str {
        match self {
            Self::Hardware { task, .. } => task,
        }
    }
}
