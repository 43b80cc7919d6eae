//! Periodic reader task.

use crate::debounce::TagDebouncer;
use crate::reader::{ReaderConfig, read_once};
use schoolbag_content::ContentCommand;
use schoolbag_hardware::{AnyRfidReader, HardwareError, RfidReader};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Poll the reader and forward accepted tags to the content task.
///
/// Cancellation is only observed between polls, so a transaction in
/// progress always completes. The task ends when `cancel` fires, when the
/// content task goes away, or when the reader fails fatally.
///
/// # Errors
///
/// Returns the hardware error that stopped the reader.
pub async fn run_reader(
    mut reader: AnyRfidReader,
    config: ReaderConfig,
    commands: mpsc::Sender<ContentCommand>,
    cancel: CancellationToken,
) -> Result<(), HardwareError> {
    let mut debouncer = TagDebouncer::new(config.debounce);
    let mut ticker = time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    match reader.get_info().await {
        Ok(info) => info!("Reader task started on {}", info.name),
        Err(e) => debug!("Reader info unavailable: {}", e),
    }

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let outcome = match read_once(&mut reader, &config).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("RFID reader failed: {}", e);
                return Err(e);
            }
        };

        if let Some(id) = debouncer.on_read_attempt(outcome) {
            info!("Tag {} accepted", id);
            if commands.send(ContentCommand::TagAccepted(id)).await.is_err() {
                debug!("Content task gone, stopping reader");
                break;
            }
        }
    }

    info!("Reader task stopped");
    Ok(())
}
