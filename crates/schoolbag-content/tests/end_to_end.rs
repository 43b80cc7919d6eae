//! Monday packing scenario driven from a settings document.

use schoolbag_content::{ContentEvent, ContentReconciler, MemoryPersistence};
use schoolbag_core::{FixedWeekday, PendingTags, Settings, TagId, Weekday};
use std::collections::BTreeSet;

const MONDAY_SETTINGS: &str = r#"{
    "gender": "female",
    "birthday": "2016-03-14",
    "height": 132.0,
    "weight": 29.5,
    "lightingMode": "automatic",
    "animationType": "rainbow",
    "tags": {
        "04-a1": {
            "materialName": "Reading book",
            "imgName": "book.png",
            "monday": "1", "tuesday": "0", "wednesday": "0", "thursday": "0",
            "friday": "0", "saturday": "0", "sunday": "0"
        }
    },
    "currentContent": []
}"#;

fn book() -> TagId {
    "04-a1".parse().unwrap()
}

fn monday_reconciler() -> (
    ContentReconciler<MemoryPersistence, FixedWeekday>,
    MemoryPersistence,
) {
    let settings = Settings::from_json(MONDAY_SETTINGS).unwrap();
    let store = MemoryPersistence::new(settings.clone());
    let reconciler = ContentReconciler::new(
        settings,
        PendingTags::default(),
        store.clone(),
        FixedWeekday(Weekday::Monday),
    );
    (reconciler, store)
}

#[test]
fn monday_book_missing_then_packed() {
    let (mut reconciler, store) = monday_reconciler();

    assert_eq!(reconciler.target_content(), BTreeSet::from([book()]));
    let before = reconciler.reconciliation();
    assert_eq!(before.to_insert, BTreeSet::from([book()]));
    assert!(before.to_remove.is_empty());

    let events = reconciler.on_tag_accepted(book());
    assert_eq!(reconciler.current_content(), &BTreeSet::from([book()]));
    assert!(reconciler.reconciliation().is_settled());

    let packed = events
        .iter()
        .filter(|event| **event == ContentEvent::BagPacked)
        .count();
    assert_eq!(packed, 1);

    let persisted = store.settings();
    assert_eq!(persisted.current_content, vec![book()]);
    assert!(persisted.to_json().unwrap().contains("\"currentContent\""));
}

#[test]
fn unknown_tag_accepted_twice_queued_once() {
    let (mut reconciler, store) = monday_reconciler();
    let stranger: TagId = "de-ad-be-ef".parse().unwrap();

    reconciler.on_tag_accepted(stranger.clone());
    reconciler.on_tag_accepted(stranger.clone());

    assert_eq!(reconciler.registry().pending().tags, vec![stranger.clone()]);
    assert_eq!(store.pending().tags, vec![stranger]);
}

#[test]
fn tuesday_asks_to_take_the_book_out() {
    let settings = Settings::from_json(MONDAY_SETTINGS).unwrap();
    let mut reconciler = ContentReconciler::new(
        settings,
        PendingTags::default(),
        MemoryPersistence::default(),
        FixedWeekday(Weekday::Tuesday),
    );

    let events = reconciler.on_tag_accepted(book());
    assert!(!events.contains(&ContentEvent::BagPacked));
    assert_eq!(
        reconciler.reconciliation().to_remove,
        BTreeSet::from([book()])
    );
}
