//! Polling tasks for the button and the strap sensors.

use crate::button::{ButtonClassifier, ButtonConfig, ButtonEvent};
use crate::presence::{PresenceConfig, PresenceDetector, PresenceEvent};
use schoolbag_hardware::{AnalogInput, AnyAnalogInput, AnyDigitalInput, DigitalInput, HardwareError};
use schoolbag_lighting::LightingHandle;
use std::time::Duration;
use tokio::time::{self, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Sample the button and send presses to the lighting task: a short press
/// toggles the lighting, a long press selects the next animation.
///
/// # Errors
///
/// Returns the fatal hardware error that stopped the pin.
pub async fn run_button(
    mut pin: AnyDigitalInput,
    config: ButtonConfig,
    interval: Duration,
    lighting: LightingHandle,
    cancel: CancellationToken,
) -> Result<(), HardwareError> {
    let mut classifier = ButtonClassifier::new(config);
    let mut ticker = ticker(interval);
    info!("Button task started");

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let level = match pin.read_pin().await {
            Ok(level) => level,
            Err(e) if e.is_fatal() => {
                error!("Button input failed: {}", e);
                return Err(e);
            }
            Err(e) => {
                warn!("Skipping button sample: {}", e);
                continue;
            }
        };

        let delivered = match classifier.on_sample(level) {
            Some(ButtonEvent::ShortPress) => {
                debug!("Short press");
                lighting.toggle_lighting().await
            }
            Some(ButtonEvent::LongPress) => {
                debug!("Long press");
                lighting.next_animation().await
            }
            None => true,
        };
        if !delivered {
            debug!("Lighting task gone, stopping button task");
            break;
        }
    }

    info!("Button task stopped");
    Ok(())
}

/// Sample both strap sensors and report put-on/put-down transitions to the
/// lighting task.
///
/// # Errors
///
/// Returns the fatal hardware error that stopped the sensor board.
pub async fn run_presence(
    mut sensors: AnyAnalogInput,
    config: PresenceConfig,
    interval: Duration,
    lighting: LightingHandle,
    cancel: CancellationToken,
) -> Result<(), HardwareError> {
    let mut detector = PresenceDetector::new(config);
    let mut ticker = ticker(interval);
    let (left_channel, right_channel) = config.channels;
    info!(
        "Presence task started on channels {} and {}",
        left_channel, right_channel
    );

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let reading = async {
            let left = sensors.read_channel(left_channel).await?;
            let right = sensors.read_channel(right_channel).await?;
            Ok::<_, HardwareError>((left, right))
        }
        .await;

        let (left, right) = match reading {
            Ok(reading) => reading,
            Err(e) if e.is_fatal() => {
                error!("Presence sensors failed: {}", e);
                return Err(e);
            }
            Err(e) => {
                warn!("Skipping presence sample: {}", e);
                continue;
            }
        };

        let delivered = match detector.on_sample(left, right) {
            Some(PresenceEvent::PutOn) => {
                info!("Bag put on ({}, {})", left, right);
                lighting.put_on().await
            }
            Some(PresenceEvent::PutDown) => {
                info!("Bag put down ({}, {})", left, right);
                lighting.put_down().await
            }
            None => true,
        };
        if !delivered {
            debug!("Lighting task gone, stopping presence task");
            break;
        }
    }

    info!("Presence task stopped");
    Ok(())
}

fn ticker(interval: Duration) -> Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
