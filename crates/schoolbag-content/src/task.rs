//! The content task: a command loop around [`ContentReconciler`].

use crate::events::{ContentCommand, ContentEvent};
use crate::persistence::ContentPersistence;
use crate::reconciler::ContentReconciler;
use schoolbag_core::WeekdayClock;
use tokio::sync::{broadcast, mpsc};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Apply commands to the reconciler and publish the resulting events.
///
/// The initial packing lists are published on start. Runs until `cancel`
/// fires or every command sender is dropped.
pub async fn run_content<P, C>(
    mut reconciler: ContentReconciler<P, C>,
    mut commands: mpsc::Receiver<ContentCommand>,
    events: broadcast::Sender<ContentEvent>,
    cancel: CancellationToken,
) where
    P: ContentPersistence,
    C: WeekdayClock,
{
    info!(
        "Content task started with {} registered tags, {} in the bag",
        reconciler.registry().len(),
        reconciler.current_content().len()
    );
    publish(&events, vec![ContentEvent::Reconciled(reconciler.reconciliation())]);

    loop {
        let command = tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            command = commands.recv() => match command {
                Some(command) => command,
                None => {
                    debug!("Content command channel closed");
                    break;
                }
            },
        };

        let produced = match command {
            ContentCommand::TagAccepted(id) => reconciler.on_tag_accepted(id),
            ContentCommand::ReloadSettings => reconciler.reload(),
            ContentCommand::ApplySettings(settings) => reconciler.on_settings_changed(*settings),
        };
        publish(&events, produced);
    }

    info!("Content task stopped");
}

fn publish(events: &broadcast::Sender<ContentEvent>, produced: Vec<ContentEvent>) {
    for event in produced {
        // No subscribers is fine.
        let _ = events.send(event);
    }
}
