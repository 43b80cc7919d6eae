//! One complete tag transaction.

use crate::debounce::{DebounceConfig, ReadOutcome};
use schoolbag_core::TagId;
use schoolbag_core::constants::{AUTH_BLOCK, DEFAULT_AUTH_KEY, READ_INTERVAL_MS};
use schoolbag_hardware::{AuthKey, HardwareError, RfidReader};
use std::time::Duration;
use tracing::{debug, trace};

/// Reader polling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Key A presented for the authenticated read.
    pub auth_key: AuthKey,

    /// Block authenticated and read after anticollision.
    pub auth_block: u8,

    /// Delay between polls.
    pub poll_interval: Duration,

    pub debounce: DebounceConfig,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            auth_key: AuthKey(DEFAULT_AUTH_KEY),
            auth_block: AUTH_BLOCK,
            poll_interval: Duration::from_millis(READ_INTERVAL_MS),
            debounce: DebounceConfig::default(),
        }
    }
}

impl ReaderConfig {
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_debounce(mut self, debounce: DebounceConfig) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_auth_key(mut self, key: AuthKey) -> Self {
        self.auth_key = key;
        self
    }
}

/// Run request, anticollision, select, authenticate, block read and stop
/// crypto against the reader.
///
/// Transient failures become the matching [`ReadOutcome`]. Only errors that
/// mean the reader is gone ([`HardwareError::is_fatal`]) are returned.
///
/// # Errors
///
/// Returns the fatal hardware error that ended the transaction.
pub async fn read_once<R: RfidReader>(
    reader: &mut R,
    config: &ReaderConfig,
) -> Result<ReadOutcome, HardwareError> {
    match reader.request().await {
        Ok(Some(_)) => {}
        Ok(None) => return Ok(ReadOutcome::Miss),
        Err(e) => return transient(e, ReadOutcome::Miss),
    }

    let uid = match reader.anticollide().await {
        Ok(uid) => uid,
        Err(e) => return transient(e, ReadOutcome::AnticollFailure),
    };
    let id = match TagId::from_bytes(uid) {
        Ok(id) => id,
        Err(e) => {
            debug!("Discarding malformed UID: {}", e);
            return Ok(ReadOutcome::AnticollFailure);
        }
    };

    let outcome = authenticated_read(reader, config, &id).await;

    // Always release the tag, even after a failed authentication.
    if let Err(e) = reader.stop_crypto().await {
        if e.is_fatal() {
            return Err(e);
        }
        trace!("stop_crypto failed: {}", e);
    }

    match outcome {
        Ok(true) => Ok(ReadOutcome::Success(id)),
        Ok(false) => Ok(ReadOutcome::AuthFailure),
        Err(e) => transient(e, ReadOutcome::AuthFailure),
    }
}

async fn authenticated_read<R: RfidReader>(
    reader: &mut R,
    config: &ReaderConfig,
    id: &TagId,
) -> Result<bool, HardwareError> {
    reader.select_tag(id.as_bytes()).await?;

    if !reader
        .authenticate(config.auth_block, &config.auth_key, id.as_bytes())
        .await?
    {
        trace!("Tag {} rejected the key", id);
        return Ok(false);
    }

    let block = reader.read_block(config.auth_block).await?;
    trace!("Tag {} block {}: {:02x?}", id, config.auth_block, block);
    Ok(true)
}

fn transient(error: HardwareError, outcome: ReadOutcome) -> Result<ReadOutcome, HardwareError> {
    if error.is_fatal() {
        return Err(error);
    }
    trace!("Transient reader failure: {}", error);
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolbag_hardware::mock::{MockRead, MockRfid};

    const UID: [u8; 4] = [0x04, 0xa1, 0x2b, 0x3c];

    #[tokio::test]
    async fn test_empty_field_is_miss() {
        let (mut reader, _handle) = MockRfid::new();

        let outcome = read_once(&mut reader, &ReaderConfig::default()).await.unwrap();
        assert_eq!(outcome, ReadOutcome::Miss);
    }

    #[tokio::test]
    async fn test_tag_in_field_is_success() {
        let (mut reader, handle) = MockRfid::new();
        handle.present_tag(UID.to_vec());

        let outcome = read_once(&mut reader, &ReaderConfig::default()).await.unwrap();
        assert_eq!(
            outcome,
            ReadOutcome::Success(TagId::from_bytes(UID).unwrap())
        );
        assert!(!handle.is_crypto_active());
    }

    #[tokio::test]
    async fn test_scripted_failures() {
        let (mut reader, handle) = MockRfid::new();
        handle.script([MockRead::AnticollFailure, MockRead::AuthFailure(UID.to_vec())]);
        let config = ReaderConfig::default();

        assert_eq!(
            read_once(&mut reader, &config).await.unwrap(),
            ReadOutcome::AnticollFailure
        );
        assert_eq!(
            read_once(&mut reader, &config).await.unwrap(),
            ReadOutcome::AuthFailure
        );
        assert!(!handle.is_crypto_active());
    }

    #[tokio::test]
    async fn test_oversized_uid_is_anticoll_failure() {
        let (mut reader, handle) = MockRfid::new();
        handle.present_tag(vec![0x01; 11]);

        assert_eq!(
            read_once(&mut reader, &ReaderConfig::default()).await.unwrap(),
            ReadOutcome::AnticollFailure
        );
    }

    #[tokio::test]
    async fn test_disconnect_is_fatal() {
        let (mut reader, handle) = MockRfid::new();
        handle.disconnect();

        let error = read_once(&mut reader, &ReaderConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(error, HardwareError::Disconnected { .. }));
    }

    #[test]
    fn test_default_config() {
        let config = ReaderConfig::default();
        assert_eq!(config.auth_key.as_bytes(), &[0xff; 6]);
        assert_eq!(config.auth_block, 8);
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.debounce.acceptance_threshold, 2);
    }
}
