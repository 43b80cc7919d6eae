//! Mock digital input pin.

use crate::{HardwareError, Result, traits::DigitalInput};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

#[derive(Debug, Default)]
struct PinState {
    level: AtomicBool,
    reads: AtomicU64,
    disconnected: AtomicBool,
}

/// Mock digital input whose level is set through its handle.
#[derive(Debug)]
pub struct MockDigitalInput {
    state: Arc<PinState>,
}

impl MockDigitalInput {
    /// Create a pin resting low.
    pub fn new() -> (Self, MockDigitalInputHandle) {
        let state = Arc::new(PinState::default());
        (
            Self {
                state: Arc::clone(&state),
            },
            MockDigitalInputHandle { state },
        )
    }
}

impl DigitalInput for MockDigitalInput {
    async fn read_pin(&mut self) -> Result<bool> {
        if self.state.disconnected.load(Ordering::SeqCst) {
            return Err(HardwareError::disconnected("Mock digital input"));
        }
        self.state.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.state.level.load(Ordering::SeqCst))
    }
}

/// Handle for driving a [`MockDigitalInput`].
#[derive(Debug, Clone)]
pub struct MockDigitalInputHandle {
    state: Arc<PinState>,
}

impl MockDigitalInputHandle {
    /// Set the pin level.
    pub fn set_level(&self, high: bool) {
        self.state.level.store(high, Ordering::SeqCst);
    }

    /// Current pin level.
    pub fn level(&self) -> bool {
        self.state.level.load(Ordering::SeqCst)
    }

    /// Number of samples taken.
    pub fn read_count(&self) -> u64 {
        self.state.reads.load(Ordering::SeqCst)
    }

    /// Make further reads fail.
    pub fn disconnect(&self) {
        self.state.disconnected.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_level_follows_handle() {
        let (mut pin, handle) = MockDigitalInput::new();

        assert!(!pin.read_pin().await.unwrap());
        handle.set_level(true);
        assert!(pin.read_pin().await.unwrap());
        assert!(handle.level());
        assert_eq!(handle.read_count(), 2);
    }

    #[tokio::test]
    async fn test_disconnect() {
        let (mut pin, handle) = MockDigitalInput::new();
        handle.disconnect();
        assert!(pin.read_pin().await.is_err());
    }
}
