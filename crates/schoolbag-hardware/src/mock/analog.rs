//! Mock multi-channel analog board.

use crate::{HardwareError, Result, traits::AnalogInput};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Full-scale reading of a 10-bit converter.
const FULL_SCALE: u16 = 1023;

#[derive(Debug)]
struct Channels {
    values: Vec<u16>,
    disconnected: bool,
}

fn lock(channels: &Mutex<Channels>) -> MutexGuard<'_, Channels> {
    channels.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock analog input board; all channels start at zero.
#[derive(Debug)]
pub struct MockAnalogInput {
    channels: Arc<Mutex<Channels>>,
}

impl MockAnalogInput {
    /// Create a board with `channel_count` channels.
    pub fn new(channel_count: u8) -> (Self, MockAnalogInputHandle) {
        let channels = Arc::new(Mutex::new(Channels {
            values: vec![0; usize::from(channel_count)],
            disconnected: false,
        }));
        (
            Self {
                channels: Arc::clone(&channels),
            },
            MockAnalogInputHandle { channels },
        )
    }
}

impl AnalogInput for MockAnalogInput {
    async fn read_channel(&mut self, channel: u8) -> Result<u16> {
        let channels = lock(&self.channels);
        if channels.disconnected {
            return Err(HardwareError::disconnected("Mock analog input"));
        }
        channels
            .values
            .get(usize::from(channel))
            .copied()
            .ok_or_else(|| HardwareError::invalid_data(format!("no analog channel {channel}")))
    }
}

/// Handle for driving a [`MockAnalogInput`].
#[derive(Debug, Clone)]
pub struct MockAnalogInputHandle {
    channels: Arc<Mutex<Channels>>,
}

impl MockAnalogInputHandle {
    /// Set a channel's reading, clamped to the converter range. Unknown
    /// channels are ignored.
    pub fn set_value(&self, channel: u8, value: u16) {
        if let Some(slot) = lock(&self.channels).values.get_mut(usize::from(channel)) {
            *slot = value.min(FULL_SCALE);
        }
    }

    /// Make further reads fail.
    pub fn disconnect(&self) {
        lock(&self.channels).disconnected = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_values() {
        let (mut board, handle) = MockAnalogInput::new(4);

        handle.set_value(2, 512);
        handle.set_value(3, 5000);

        assert_eq!(board.read_channel(0).await.unwrap(), 0);
        assert_eq!(board.read_channel(2).await.unwrap(), 512);
        assert_eq!(board.read_channel(3).await.unwrap(), FULL_SCALE);
    }

    #[tokio::test]
    async fn test_unknown_channel() {
        let (mut board, handle) = MockAnalogInput::new(2);
        handle.set_value(5, 10);

        assert!(matches!(
            board.read_channel(5).await,
            Err(HardwareError::InvalidData { .. })
        ));
    }
}
