use daygrid_core::{DateKey, EventDraft, EventId, EventStore, StoreError, TimeOfDay};
use std::collections::HashSet;

fn t(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

fn key(value: &str) -> DateKey {
    DateKey::parse(value).unwrap()
}

fn draft(title: &str, start: &str, end: &str) -> EventDraft {
    EventDraft::new(title, t(start), t(end))
}

#[test]
fn add_stamps_date_assigns_id_and_appends_in_order() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");

    let late = store.add_event(day, draft("late", "15:00", "16:00")).unwrap();
    let early = store.add_event(day, draft("early", "08:00", "09:00")).unwrap();

    assert_eq!(late.date, day);
    assert!(!late.id.as_str().is_empty());
    assert_ne!(late.id, early.id);

    let titles: Vec<&str> = store.events_for(&day).iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["late", "early"]);
}

#[test]
fn added_events_never_share_an_id() {
    let mut store = EventStore::new();
    let day = key("2024-06-11");
    for hour in 0..24u16 {
        let start = TimeOfDay::from_minutes(hour * 60).unwrap();
        let end = TimeOfDay::from_minutes(hour * 60 + 30).unwrap();
        store.add_event(day, EventDraft::new("slot", start, end)).unwrap();
    }

    let ids: HashSet<&EventId> = store.events_for(&day).iter().map(|e| &e.id).collect();
    assert_eq!(ids.len(), 24);
}

#[test]
fn edit_keeps_position_id_and_date() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    let first = store.add_event(day, draft("first", "08:00", "09:00")).unwrap();
    store.add_event(day, draft("second", "10:00", "11:00")).unwrap();

    let edited = store
        .edit_event(
            day,
            &first.id,
            draft("first, renamed", "08:30", "09:30").with_description("moved"),
        )
        .unwrap();

    assert_eq!(edited.id, first.id);
    assert_eq!(edited.date, day);
    let events = store.events_for(&day);
    assert_eq!(events[0], edited);
    assert_eq!(events[0].description, "moved");
    assert_eq!(events[1].title, "second");
}

#[test]
fn edit_against_own_unchanged_interval_never_conflicts() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    let event = store.add_event(day, draft("focus", "09:00", "12:00")).unwrap();

    let edited = store
        .edit_event(day, &event.id, draft("deep focus", "09:00", "12:00"))
        .unwrap();
    assert_eq!(edited.title, "deep focus");
}

#[test]
fn edit_shrinking_within_own_slot_is_allowed() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    let event = store.add_event(day, draft("focus", "09:00", "12:00")).unwrap();

    store
        .edit_event(day, &event.id, draft("focus", "10:00", "11:00"))
        .unwrap();
    assert_eq!(store.events_for(&day)[0].start_time, t("10:00"));
}

#[test]
fn single_field_time_edit_is_validated() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    let morning = store.add_event(day, draft("morning", "09:00", "10:00")).unwrap();
    let blocker = store.add_event(day, draft("blocker", "10:00", "11:00")).unwrap();

    // Only the end moves, straight into the blocker.
    let err = store
        .edit_event(day, &morning.id, draft("morning", "09:00", "10:30"))
        .unwrap_err();
    assert!(
        matches!(err, StoreError::Conflict(ref c) if c.conflicting_id == blocker.id),
        "{err}"
    );

    // Only the start moves, back into the morning slot.
    let err = store
        .edit_event(day, &blocker.id, draft("blocker", "09:30", "11:00"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Conflict(ref c) if c.conflicting_id == morning.id));

    assert_eq!(store.events_for(&day)[0].end_time, t("10:00"));
    assert_eq!(store.events_for(&day)[1].start_time, t("10:00"));
}

#[test]
fn preexisting_overlap_does_not_block_text_only_edits() {
    let blob = r#"{"2024-06-10": [
        {"id": "a", "title": "a", "startTime": "09:00", "endTime": "10:00", "date": "2024-06-10"},
        {"id": "b", "title": "b", "startTime": "09:30", "endTime": "10:30", "date": "2024-06-10"}
    ]}"#;
    let mut store = daygrid_core::store::snapshot::decode(blob).unwrap();
    let day = key("2024-06-10");

    store
        .edit_event(day, &EventId::new("b"), draft("b renamed", "09:30", "10:30"))
        .unwrap();
    assert!(store
        .edit_event(day, &EventId::new("b"), draft("b", "09:45", "10:30"))
        .is_err());
}

#[test]
fn edit_of_unknown_id_or_wrong_day_is_not_found() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    let event = store.add_event(day, draft("x", "09:00", "10:00")).unwrap();

    let err = store
        .edit_event(key("2024-06-11"), &event.id, draft("x", "09:00", "10:00"))
        .unwrap_err();
    assert_eq!(
        err,
        StoreError::NotFound {
            date: key("2024-06-11"),
            event_id: event.id.clone(),
        }
    );
}

#[test]
fn delete_is_idempotent() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    let event = store.add_event(day, draft("x", "09:00", "10:00")).unwrap();

    assert!(store.delete_event(&day, &event.id));
    assert!(!store.delete_event(&day, &event.id));
    assert!(!store.delete_event(&key("1999-01-01"), &event.id));
}

#[test]
fn add_then_delete_restores_prior_state() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    store.add_event(day, draft("keep", "07:00", "08:00")).unwrap();
    let before = store.clone();

    let added = store.add_event(day, draft("temp", "12:00", "13:00")).unwrap();
    store.delete_event(&day, &added.id);
    assert_eq!(store, before);

    let empty_before = EventStore::new();
    let mut scratch = empty_before.clone();
    let other = key("2024-06-11");
    let added = scratch.add_event(other, draft("temp", "12:00", "13:00")).unwrap();
    scratch.delete_event(&other, &added.id);
    assert_eq!(scratch, empty_before);
}

#[test]
fn search_with_empty_term_equals_events_for() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    store.add_event(day, draft("b", "10:00", "11:00")).unwrap();
    store.add_event(day, draft("a", "08:00", "09:00")).unwrap();

    assert_eq!(store.search(&day, ""), store.events_for(&day).to_vec());
    assert!(store.search(&key("2024-06-12"), "").is_empty());
}

#[test]
fn search_filters_title_or_description_preserving_order() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    store
        .add_event(day, draft("Gym", "06:00", "07:00").with_description("LEG day"))
        .unwrap();
    store.add_event(day, draft("Standup", "09:00", "09:15")).unwrap();
    store.add_event(day, draft("Legal review", "14:00", "15:00")).unwrap();

    let titles: Vec<String> = store
        .search(&day, "leg")
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(titles, vec!["Gym".to_string(), "Legal review".to_string()]);
    assert!(store.search(&day, "dentist").is_empty());
}

#[test]
fn search_with_single_space_matches_titles_containing_a_space() {
    let mut store = EventStore::new();
    let day = key("2024-06-10");
    store.add_event(day, draft("Standup", "09:00", "09:15")).unwrap();
    store.add_event(day, draft("Team sync", "10:00", "10:30")).unwrap();

    let titles: Vec<String> = store
        .search(&day, " ")
        .into_iter()
        .map(|event| event.title)
        .collect();
    assert_eq!(titles, vec!["Team sync".to_string()]);
}
