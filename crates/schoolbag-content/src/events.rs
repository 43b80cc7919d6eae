//! Messages into and out of the content task.

use crate::reconcile::Reconciliation;
use schoolbag_core::{AnimationType, LightingMode, Settings, TagId};

/// Requests handled by the content task.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ContentCommand {
    /// A tag survived debouncing.
    TagAccepted(TagId),

    /// The settings file changed on disk; reload it through the
    /// persistence layer.
    ReloadSettings,

    /// Adopt a settings snapshot produced elsewhere, without persisting it.
    ApplySettings(Box<Settings>),
}

/// Notifications published by the content task.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ContentEvent {
    /// An unregistered tag was queued for registration.
    RegistrationRequested(TagId),

    /// Fresh packing lists.
    Reconciled(Reconciliation),

    /// The bag holds exactly what today requires.
    BagPacked,

    /// Lighting preferences in the settings changed.
    PreferencesChanged {
        mode: LightingMode,
        animation: AnimationType,
    },
}
