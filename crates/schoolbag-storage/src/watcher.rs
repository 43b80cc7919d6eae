//! Settings file change detection.
//!
//! The companion app rewrites `data.json` directly. The watcher samples the
//! file's modification time and length and asks the content task to reload
//! whenever either moves. A vanished file is ignored until it reappears.

use schoolbag_content::ContentCommand;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Poll `path` every `interval` and send [`ContentCommand::ReloadSettings`]
/// on each modification.
///
/// Returns when `cancel` fires or the content task has gone away.
pub async fn run_settings_watcher(
    path: PathBuf,
    interval: Duration,
    commands: mpsc::Sender<ContentCommand>,
    cancel: CancellationToken,
) {
    let mut last_seen = fingerprint(&path).await;
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Watching {} for changes", path.display());

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let current = fingerprint(&path).await;
        if current == last_seen {
            continue;
        }
        last_seen = current;

        if current.is_none() {
            debug!("{} disappeared", path.display());
            continue;
        }

        info!("{} changed, reloading settings", path.display());
        if commands.send(ContentCommand::ReloadSettings).await.is_err() {
            debug!("Content task gone, settings watcher stopping");
            break;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: SystemTime,
    len: u64,
}

async fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let metadata = tokio::fs::metadata(path).await.ok()?;
    Some(Fingerprint {
        modified: metadata.modified().ok()?,
        len: metadata.len(),
    })
}
