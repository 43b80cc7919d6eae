//! Toggling accepted tags and keeping the packing lists current.

use crate::events::ContentEvent;
use crate::persistence::ContentPersistence;
use crate::reconcile::{Reconciliation, reconcile, toggle};
use crate::registry::TagRegistry;
use schoolbag_core::{PendingTags, Settings, TagId, Weekday, WeekdayClock};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Owns the bag's content and its projection of the settings.
///
/// Every operation returns the events it produced; publishing them is the
/// caller's job. The current weekday is read from the clock on every
/// reconciliation.
///
/// # Examples
///
/// ```
/// use schoolbag_content::{ContentEvent, ContentReconciler, MemoryPersistence};
/// use schoolbag_core::{FixedWeekday, PendingTags, Settings, TagRecord, Weekday};
///
/// let mut settings = Settings::default();
/// let book = "04-a1".parse().unwrap();
/// settings.tags.insert(
///     "04-a1".parse().unwrap(),
///     TagRecord::new("Math book", "math.png").required_on(Weekday::Monday),
/// );
///
/// let mut reconciler = ContentReconciler::new(
///     settings,
///     PendingTags::default(),
///     MemoryPersistence::default(),
///     FixedWeekday(Weekday::Monday),
/// );
///
/// let events = reconciler.on_tag_accepted(book);
/// assert!(events.contains(&ContentEvent::BagPacked));
/// ```
#[derive(Debug)]
pub struct ContentReconciler<P, C> {
    persistence: P,
    clock: C,

    /// Profile and lighting fields of the settings; tags and content are
    /// held in `registry` and `current`.
    profile: Settings,

    registry: TagRegistry,
    current: BTreeSet<TagId>,
}

impl<P, C> ContentReconciler<P, C>
where
    P: ContentPersistence,
    C: WeekdayClock,
{
    /// Build a reconciler from loaded settings.
    ///
    /// Content ids that are not registered are dropped, as on any settings
    /// change.
    pub fn new(settings: Settings, pending: PendingTags, persistence: P, clock: C) -> Self {
        let mut reconciler = Self {
            persistence,
            clock,
            profile: Settings::default(),
            registry: TagRegistry::new(Default::default(), pending),
            current: BTreeSet::new(),
        };
        reconciler.adopt(settings);
        reconciler
    }

    pub fn current_content(&self) -> &BTreeSet<TagId> {
        &self.current
    }

    pub fn registry(&self) -> &TagRegistry {
        &self.registry
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn today(&self) -> Weekday {
        self.clock.today()
    }

    /// Tags required today.
    pub fn target_content(&self) -> BTreeSet<TagId> {
        self.registry.target_content(self.today())
    }

    /// Packing lists for today.
    pub fn reconciliation(&self) -> Reconciliation {
        reconcile(&self.current, &self.target_content())
    }

    /// The full settings document as this reconciler sees it.
    pub fn snapshot(&self) -> Settings {
        let mut settings = self.profile.clone();
        settings.tags = self.registry.records().clone();
        settings.set_current_content(&self.current);
        settings
    }

    /// Handle a debounced tag read.
    ///
    /// Unregistered tags are queued for registration and still toggled. The
    /// new content is persisted; a failed write is logged and the in-memory
    /// content stays authoritative.
    pub fn on_tag_accepted(&mut self, id: TagId) -> Vec<ContentEvent> {
        let mut events = Vec::new();

        if !self.registry.is_known(&id) {
            if self.registry.queue(id.clone()) {
                info!("Tag {} is not registered, queued for registration", id);
                if let Err(e) = self.persistence.save_pending(self.registry.pending()) {
                    warn!("Failed to persist pending tags: {}", e);
                }
                events.push(ContentEvent::RegistrationRequested(id.clone()));
            } else {
                debug!("Tag {} already awaiting registration", id);
            }
        }

        if toggle(&mut self.current, &id) {
            info!("Tag {} put into the bag", id);
        } else {
            info!("Tag {} taken out of the bag", id);
        }

        if let Err(e) = self.persistence.save_settings(&self.snapshot()) {
            warn!("Failed to persist bag content: {}", e);
        }

        let result = self.reconciliation();
        let packed = result.is_settled();
        events.push(ContentEvent::Reconciled(result));
        if packed {
            info!("Bag correctly packed for {}", self.today());
            events.push(ContentEvent::BagPacked);
        }
        events
    }

    /// Adopt a settings snapshot changed outside this reconciler.
    ///
    /// Content ids no longer registered are dropped from the bag. Nothing is
    /// persisted.
    pub fn on_settings_changed(&mut self, settings: Settings) -> Vec<ContentEvent> {
        let mut events = Vec::new();

        if settings.lighting_mode != self.profile.lighting_mode
            || settings.animation_type != self.profile.animation_type
        {
            events.push(ContentEvent::PreferencesChanged {
                mode: settings.lighting_mode,
                animation: settings.animation_type,
            });
        }

        self.adopt(settings);
        events.push(ContentEvent::Reconciled(self.reconciliation()));
        events
    }

    /// Re-read settings and pending tags through the persistence layer.
    ///
    /// A document identical to the current snapshot produces no events. A
    /// document that fails to load leaves the current state in place.
    pub fn reload(&mut self) -> Vec<ContentEvent> {
        match self.persistence.load_pending() {
            Ok(pending) => self.registry.replace_pending(pending),
            Err(e) => warn!("Failed to reload pending tags: {}", e),
        }

        let settings = match self.persistence.load_settings() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to reload settings, keeping current state: {}", e);
                return Vec::new();
            }
        };

        if settings == self.snapshot() {
            debug!("Settings unchanged");
            return Vec::new();
        }

        info!("Settings changed, reconciling");
        self.on_settings_changed(settings)
    }

    fn adopt(&mut self, mut settings: Settings) {
        let records = std::mem::take(&mut settings.tags);
        let content = std::mem::take(&mut settings.current_content);

        let promoted = self.registry.replace_records(records);
        if promoted > 0 {
            debug!("{} pending tags are now registered", promoted);
        }

        let before = content.len();
        self.current = content
            .into_iter()
            .filter(|id| self.registry.is_known(id))
            .collect();
        if self.current.len() < before {
            debug!(
                "Dropped {} unregistered tags from the bag",
                before - self.current.len()
            );
        }

        self.profile = settings;
    }
}
