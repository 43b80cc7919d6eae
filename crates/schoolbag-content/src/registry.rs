//! The reconciler's view of the registered tags.

use schoolbag_core::{PendingTags, TagId, TagRecord, Weekday};
use std::collections::{BTreeMap, BTreeSet};

/// Registered tags plus the queue of tags awaiting registration.
///
/// A tag is never both registered and pending: replacing the records drops
/// every pending id that has since been registered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagRegistry {
    records: BTreeMap<TagId, TagRecord>,
    pending: PendingTags,
}

impl TagRegistry {
    pub fn new(records: BTreeMap<TagId, TagRecord>, pending: PendingTags) -> Self {
        let mut registry = Self {
            records,
            pending,
        };
        registry.prune_pending();
        registry
    }

    pub fn is_known(&self, id: &TagId) -> bool {
        self.records.contains_key(id)
    }

    pub fn get(&self, id: &TagId) -> Option<&TagRecord> {
        self.records.get(id)
    }

    pub fn records(&self) -> &BTreeMap<TagId, TagRecord> {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Registered tags required on `day`.
    pub fn target_content(&self, day: Weekday) -> BTreeSet<TagId> {
        self.records
            .iter()
            .filter(|(_, record)| record.is_required_on(day))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn pending(&self) -> &PendingTags {
        &self.pending
    }

    /// Queue an unregistered tag. Returns `true` if it was not queued yet.
    /// Registered tags are never queued.
    pub fn queue(&mut self, id: TagId) -> bool {
        if self.is_known(&id) {
            return false;
        }
        self.pending.push(id)
    }

    /// Swap in a new record table. Returns the number of pending ids that
    /// are now registered and were dropped from the queue.
    pub fn replace_records(&mut self, records: BTreeMap<TagId, TagRecord>) -> usize {
        self.records = records;
        self.prune_pending()
    }

    /// Swap in a new pending list, minus anything already registered.
    pub fn replace_pending(&mut self, pending: PendingTags) {
        self.pending = pending;
        self.prune_pending();
    }

    fn prune_pending(&mut self) -> usize {
        let before = self.pending.tags.len();
        let records = &self.records;
        self.pending.tags.retain(|id| !records.contains_key(id));
        before - self.pending.tags.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> TagId {
        s.parse().unwrap()
    }

    fn records() -> BTreeMap<TagId, TagRecord> {
        BTreeMap::from([
            (
                id("0a"),
                TagRecord::new("Math book", "math.png").required_on(Weekday::Monday),
            ),
            (
                id("0b"),
                TagRecord::new("Pencil case", "pencils.png")
                    .required_on(Weekday::Monday)
                    .required_on(Weekday::Tuesday),
            ),
        ])
    }

    #[test]
    fn test_target_content_by_day() {
        let registry = TagRegistry::new(records(), PendingTags::default());

        assert_eq!(
            registry.target_content(Weekday::Monday),
            BTreeSet::from([id("0a"), id("0b")])
        );
        assert_eq!(
            registry.target_content(Weekday::Tuesday),
            BTreeSet::from([id("0b")])
        );
        assert!(registry.target_content(Weekday::Sunday).is_empty());
    }

    #[test]
    fn test_queue_is_deduplicated() {
        let mut registry = TagRegistry::new(records(), PendingTags::default());

        assert!(registry.queue(id("ff")));
        assert!(!registry.queue(id("ff")));
        assert!(!registry.queue(id("0a")));
        assert_eq!(registry.pending().tags, vec![id("ff")]);
    }

    #[test]
    fn test_registration_drains_queue() {
        let pending = PendingTags {
            tags: vec![id("0a"), id("ff")],
        };
        let mut registry = TagRegistry::new(BTreeMap::new(), pending);
        assert_eq!(registry.pending().tags.len(), 2);

        assert_eq!(registry.replace_records(records()), 1);
        assert_eq!(registry.pending().tags, vec![id("ff")]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_new_prunes_registered_pending() {
        let pending = PendingTags {
            tags: vec![id("0b")],
        };
        let registry = TagRegistry::new(records(), pending);
        assert!(registry.pending().tags.is_empty());
        assert!(registry.get(&id("0b")).is_some());
    }
}
