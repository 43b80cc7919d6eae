//! Steering the lighting task.

use schoolbag_core::{AnimationType, LightingMode};
use tokio::sync::mpsc;
use tracing::debug;

/// Events the lighting task applies between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightingCommand {
    /// The bag is being worn.
    PutOn,

    /// The bag was put down.
    PutDown,

    /// Short button press: flip the manual on/off latch.
    ToggleLighting,

    /// Long button press: advance to the next animation.
    NextAnimation,

    SetMode(LightingMode),
    SetAnimation(AnimationType),
}

/// Cloneable sender side of the lighting task's command channel.
#[derive(Debug, Clone)]
pub struct LightingHandle {
    tx: mpsc::Sender<LightingCommand>,
}

impl LightingHandle {
    /// Create a handle and the receiver to give to the lighting task.
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<LightingCommand>) {
        let (tx, rx) = mpsc::channel(capacity);
        (Self { tx }, rx)
    }

    /// Queue a command. Returns `false` if the lighting task is gone.
    pub async fn send(&self, command: LightingCommand) -> bool {
        if self.tx.send(command).await.is_err() {
            debug!("Lighting task gone, dropped {:?}", command);
            return false;
        }
        true
    }

    pub async fn put_on(&self) -> bool {
        self.send(LightingCommand::PutOn).await
    }

    pub async fn put_down(&self) -> bool {
        self.send(LightingCommand::PutDown).await
    }

    pub async fn toggle_lighting(&self) -> bool {
        self.send(LightingCommand::ToggleLighting).await
    }

    pub async fn next_animation(&self) -> bool {
        self.send(LightingCommand::NextAnimation).await
    }

    /// Apply the lighting preferences from the settings.
    pub async fn set_preferences(&self, mode: LightingMode, animation: AnimationType) -> bool {
        self.send(LightingCommand::SetMode(mode)).await
            && self.send(LightingCommand::SetAnimation(animation)).await
    }

    /// Whether the lighting task has stopped listening.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
