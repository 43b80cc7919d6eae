//! Mock RFID reader implementation for testing and development.
//!
//! The reader answers polls from shared state controlled through a
//! [`MockRfidHandle`]: a tag can be held in the field indefinitely, and
//! individual poll results can be scripted ahead of time to reproduce the
//! dropouts and failed transactions real readers produce.

use crate::{
    HardwareError, Result,
    traits::RfidReader,
    types::{AuthKey, DeviceInfo, TagType},
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Result of one scripted poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockRead {
    /// No tag answers the request.
    NoTag,

    /// A tag answers but anticollision fails.
    AnticollFailure,

    /// The tag is identified but rejects the key.
    AuthFailure(Vec<u8>),

    /// A complete successful transaction.
    Tag(Vec<u8>),
}

#[derive(Debug, Default)]
struct MockRfidState {
    /// Tag resting in the field when nothing is scripted.
    tag_in_field: Option<Vec<u8>>,

    /// Scripted results consumed one per request.
    script: VecDeque<MockRead>,

    /// Result driving the transaction in progress.
    current: Option<MockRead>,

    /// Number of request() calls.
    polls: u64,

    /// Whether the reader is in the authenticated state.
    crypto_active: bool,

    /// Simulated unplugging.
    disconnected: bool,
}

fn lock(state: &Mutex<MockRfidState>) -> MutexGuard<'_, MockRfidState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Mock RFID reader for testing and development.
///
/// # Examples
///
/// ```
/// use schoolbag_hardware::mock::MockRfid;
/// use schoolbag_hardware::traits::RfidReader;
///
/// #[tokio::main]
/// async fn main() -> schoolbag_hardware::Result<()> {
///     let (mut reader, handle) = MockRfid::new();
///
///     handle.present_tag(vec![0x04, 0xA1, 0x2B, 0x3C]);
///
///     assert!(reader.request().await?.is_some());
///     assert_eq!(reader.anticollide().await?, vec![0x04, 0xA1, 0x2B, 0x3C]);
///
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockRfid {
    state: Arc<Mutex<MockRfidState>>,

    /// Device name
    name: String,
}

impl MockRfid {
    /// Create a new mock RFID reader with the default name.
    pub fn new() -> (Self, MockRfidHandle) {
        Self::with_name("Mock RFID Reader".to_string())
    }

    /// Create a new mock RFID reader with a custom name.
    pub fn with_name(name: String) -> (Self, MockRfidHandle) {
        let state = Arc::new(Mutex::new(MockRfidState::default()));

        let reader = Self {
            state: Arc::clone(&state),
            name: name.clone(),
        };

        let handle = MockRfidHandle { state, name };

        (reader, handle)
    }

    fn current_uid(state: &MockRfidState) -> Option<&[u8]> {
        match &state.current {
            Some(MockRead::Tag(uid) | MockRead::AuthFailure(uid)) => Some(uid),
            _ => None,
        }
    }

    fn ensure_connected(&self, state: &MockRfidState) -> Result<()> {
        if state.disconnected {
            return Err(HardwareError::disconnected(self.name.clone()));
        }
        Ok(())
    }
}

impl Default for MockRfid {
    fn default() -> Self {
        Self::new().0
    }
}

impl RfidReader for MockRfid {
    async fn request(&mut self) -> Result<Option<TagType>> {
        let mut state = lock(&self.state);
        self.ensure_connected(&state)?;
        state.polls += 1;

        let next = match state.script.pop_front() {
            Some(read) => read,
            None => match &state.tag_in_field {
                Some(uid) => MockRead::Tag(uid.clone()),
                None => MockRead::NoTag,
            },
        };

        let answer = match next {
            MockRead::NoTag => None,
            _ => Some(TagType::MIFARE_CLASSIC_1K),
        };
        state.current = Some(next);
        Ok(answer)
    }

    async fn anticollide(&mut self) -> Result<Vec<u8>> {
        let state = lock(&self.state);
        self.ensure_connected(&state)?;

        match &state.current {
            Some(MockRead::Tag(uid) | MockRead::AuthFailure(uid)) => Ok(uid.clone()),
            Some(MockRead::AnticollFailure) => {
                Err(HardwareError::communication("anticollision failed"))
            }
            Some(MockRead::NoTag) | None => Err(HardwareError::communication("no tag in field")),
        }
    }

    async fn select_tag(&mut self, uid: &[u8]) -> Result<()> {
        let state = lock(&self.state);
        self.ensure_connected(&state)?;

        match Self::current_uid(&state) {
            Some(current) if current == uid => Ok(()),
            _ => Err(HardwareError::communication(format!(
                "tag {uid:02X?} not selectable"
            ))),
        }
    }

    async fn authenticate(&mut self, _block: u8, _key: &AuthKey, uid: &[u8]) -> Result<bool> {
        let mut state = lock(&self.state);
        self.ensure_connected(&state)?;

        let accepted = matches!(&state.current, Some(MockRead::Tag(current)) if current == uid);
        state.crypto_active = accepted;
        Ok(accepted)
    }

    async fn read_block(&mut self, block: u8) -> Result<Vec<u8>> {
        let state = lock(&self.state);
        self.ensure_connected(&state)?;

        if !state.crypto_active {
            return Err(HardwareError::communication(format!(
                "block {block} read without authentication"
            )));
        }
        Ok(vec![0; 16])
    }

    async fn stop_crypto(&mut self) -> Result<()> {
        let mut state = lock(&self.state);
        self.ensure_connected(&state)?;
        state.crypto_active = false;
        Ok(())
    }

    async fn get_info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock MFRC522"))
    }
}

/// Handle for controlling a mock RFID reader.
///
/// Clones share the reader's state.
#[derive(Debug, Clone)]
pub struct MockRfidHandle {
    state: Arc<Mutex<MockRfidState>>,

    /// Device name
    name: String,
}

impl MockRfidHandle {
    /// Hold a tag in the reader's field until [`remove_tag`](Self::remove_tag).
    pub fn present_tag(&self, uid: Vec<u8>) {
        lock(&self.state).tag_in_field = Some(uid);
    }

    /// Take the tag out of the field.
    pub fn remove_tag(&self) {
        lock(&self.state).tag_in_field = None;
    }

    /// Queue results for the next polls; they take precedence over the
    /// tag in the field.
    pub fn script(&self, reads: impl IntoIterator<Item = MockRead>) {
        lock(&self.state).script.extend(reads);
    }

    /// Number of scripted results not yet consumed.
    pub fn scripted_remaining(&self) -> usize {
        lock(&self.state).script.len()
    }

    /// Number of polls the reader has answered.
    pub fn poll_count(&self) -> u64 {
        lock(&self.state).polls
    }

    /// Whether the reader was left in the authenticated state.
    pub fn is_crypto_active(&self) -> bool {
        lock(&self.state).crypto_active
    }

    /// Make every further operation fail with a disconnection error.
    pub fn disconnect(&self) {
        lock(&self.state).disconnected = true;
    }

    /// Get the device name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
