//! `schoolbagd`: runs the smart school bag until interrupted.

use anyhow::{Context, Result};
use schoolbag_app::{AppConfig, Devices, Supervisor};
use schoolbag_content::{ContentEvent, ContentReconciler};
use schoolbag_core::{LocalClock, VERSION};
use schoolbag_storage::SettingsStore;
use tokio::signal;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("Invalid configuration")?;
    info!(
        "schoolbagd {} starting, data in {}",
        VERSION,
        config.store.data_dir.display()
    );

    let store = SettingsStore::open(config.store.clone()).context("Failed to open data directory")?;
    let settings = store.load_or_default();
    let pending = store.load_pending_or_default();
    info!(
        "{} registered tags, {} awaiting registration",
        settings.tags.len(),
        pending.tags.len()
    );
    let reconciler = ContentReconciler::new(settings, pending, store, LocalClock);

    let devices = if config.mock_hardware {
        info!("Using mock peripherals");
        Devices::mock(config.engine.pixel_count).0
    } else {
        warn!("No peripheral drivers available, running detached");
        Devices::detached()
    };

    let supervisor = Supervisor::new(config, devices).start(reconciler);
    let mut events = supervisor.subscribe();

    loop {
        tokio::select! {
            result = signal::ctrl_c() => {
                result.context("Failed to listen for Ctrl-C")?;
                info!("Interrupted");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => log_event(&event),
                Err(RecvError::Lagged(missed)) => warn!("Missed {} content events", missed),
                Err(RecvError::Closed) => break,
            },
        }
    }

    let report = supervisor.shutdown().await;
    if report.panicked > 0 {
        anyhow::bail!("{} tasks panicked", report.panicked);
    }
    Ok(())
}

fn log_event(event: &ContentEvent) {
    match event {
        ContentEvent::RegistrationRequested(id) => {
            info!("Tag {} is not registered yet", id)
        }
        ContentEvent::Reconciled(reconciliation) => info!(
            "{} items to pack, {} to remove",
            reconciliation.to_insert.len(),
            reconciliation.to_remove.len()
        ),
        ContentEvent::BagPacked => info!("Bag is packed for today"),
        _ => {}
    }
}
