//! The animation task.

use crate::command::LightingCommand;
use crate::engine::AnimationEngine;
use schoolbag_hardware::{AnyLedStrip, HardwareError, LedStrip};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Drive the engine at a fixed frame interval and apply commands between
/// frames.
///
/// Commands that change the picture (putting the bag down, switching the
/// strip off) are flushed immediately instead of waiting for the next
/// frame. When the task stops, for whatever reason, the strip is blanked.
///
/// # Errors
///
/// Returns the fatal hardware error that stopped the strip.
pub async fn run_lighting(
    mut strip: AnyLedStrip,
    mut engine: AnimationEngine,
    mut commands: mpsc::Receiver<LightingCommand>,
    interval: Duration,
    cancel: CancellationToken,
) -> Result<(), HardwareError> {
    info!(
        "Lighting task started: {} pixels, mode {}, animation {}",
        engine.buffer().len(),
        engine.mode(),
        engine.animation()
    );

    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut commands_open = true;

    let result = loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break Ok(()),
            command = commands.recv(), if commands_open => {
                let Some(command) = command else {
                    debug!("Lighting command channel closed");
                    commands_open = false;
                    continue;
                };
                debug!("Lighting command {:?}", command);
                if engine.apply(command)
                    && let Err(e) = flush(&mut strip, &engine).await
                {
                    break Err(e);
                }
            }
            _ = ticker.tick() => {
                if engine.tick()
                    && let Err(e) = flush(&mut strip, &engine).await
                {
                    break Err(e);
                }

                if engine.needs_exit() {
                    let cancelled = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => true,
                        _ = time::sleep(interval) => false,
                    };
                    if cancelled {
                        break Ok(());
                    }
                    if engine.tick_exit()
                        && let Err(e) = flush(&mut strip, &engine).await
                    {
                        break Err(e);
                    }
                    // Hold the exit frame for a full interval.
                    ticker.reset();
                }
            }
        }
    };

    engine.blank();
    if let Err(e) = show(&mut strip, &engine).await {
        debug!("Could not blank the strip on exit: {}", e);
    }

    match &result {
        Ok(()) => info!("Lighting task stopped"),
        Err(e) => error!("LED strip failed: {}", e),
    }
    result
}

/// Show the engine's buffer; only fatal errors are returned.
async fn flush(strip: &mut AnyLedStrip, engine: &AnimationEngine) -> Result<(), HardwareError> {
    match show(strip, engine).await {
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!("Dropped LED frame: {}", e);
            Ok(())
        }
        Ok(()) => Ok(()),
    }
}

async fn show(strip: &mut AnyLedStrip, engine: &AnimationEngine) -> Result<(), HardwareError> {
    engine.buffer().write_to(strip)?;
    strip.show().await
}
