//! Snapshot and store tests: round trips, lenient loading, bad input.

use chrono::Utc;
use miihouse_core::{
    clock::TickMode,
    error::SimError,
    resident::{Personality, Resident},
    snapshot,
    state::GameState,
    store::SimStore,
};

fn sample_state() -> GameState {
    let mut state = GameState::new(321);
    let mut a = Resident::create("a1".into(), "Ana", "female", Personality::Energetic, Utc::now());
    a.hunger = 48.8;
    a.happiness = 60.5;
    a.social = 12.4;
    let mut b = Resident::create("b2".into(), "Ben", "male", Personality::from("dreamy"), Utc::now());
    b.asleep = true;
    state.residents = vec![a, b];
    state.inventory.add("apple", 3);
    state.inventory.add("cake", 1);
    state.settings.mode = TickMode::Auto;
    state
}

#[test]
fn serialize_round_trips_exactly() {
    let state = sample_state();
    let text = snapshot::serialize(&state).unwrap();
    let restored = snapshot::deserialize(&text).unwrap();
    assert_eq!(restored, state);
}

#[test]
fn export_round_trips_and_is_pretty() {
    let state = sample_state();
    let text = snapshot::export_portable(&state).unwrap();
    assert!(text.contains('\n'));
    assert_eq!(snapshot::deserialize(&text).unwrap(), state);
}

#[test]
fn snapshot_uses_documented_field_names() {
    let text = snapshot::serialize(&sample_state()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["money"], 321);
    assert_eq!(value["settings"]["mode"], "auto");
    assert_eq!(value["inventory"][0]["itemId"], "apple");
    assert_eq!(value["inventory"][0]["qty"], 3);
    assert_eq!(value["residents"][0]["personality"], "energetic");
    assert!(value["residents"][0]["createdAt"].is_string());
}

#[test]
fn missing_collections_are_backfilled() {
    let state = snapshot::deserialize(r#"{"money": 40}"#).unwrap();
    assert_eq!(state.money, 40);
    assert!(state.residents.is_empty());
    assert!(state.inventory.is_empty());
    assert_eq!(state.settings.mode, TickMode::Manual);

    let state = snapshot::deserialize(r#"{"money": 40, "settings": {}}"#).unwrap();
    assert_eq!(state.settings.mode, TickMode::Manual);
}

#[test]
fn null_collections_are_backfilled() {
    let text = r#"{"money": 7, "residents": null, "inventory": null, "settings": null}"#;
    let state = snapshot::deserialize(text).unwrap();
    assert_eq!(state, GameState::new(7));
}

#[test]
fn free_text_personalities_round_trip() {
    let mut state = GameState::new(5);
    for (id, text) in [("p1", "Energetic"), ("p2", " dreamy "), ("p3", "Night Owl")] {
        state.residents.push(Resident::create(
            id.into(),
            "Cai",
            "other",
            Personality::from(text),
            Utc::now(),
        ));
    }
    let restored = snapshot::deserialize(&snapshot::serialize(&state).unwrap()).unwrap();
    assert_eq!(restored, state);
    assert_eq!(restored.residents[0].personality, Personality::Energetic);
    assert_eq!(restored.residents[1].personality.as_str(), "dreamy");
}

#[test]
fn unknown_fields_are_ignored() {
    let text = r#"{
        "money": 12,
        "version": 9,
        "theme": "dark",
        "settings": {"mode": "manual", "volume": 3},
        "inventory": [{"itemId": "apple", "qty": 2, "color": "red"}]
    }"#;
    let state = snapshot::deserialize(text).unwrap();
    assert_eq!(state.money, 12);
    assert_eq!(state.inventory.quantity("apple"), 2);
}

#[test]
fn hand_edited_values_are_normalized() {
    let text = r#"{
        "money": 5,
        "residents": [{
            "id": "x", "name": "Zed", "gender": "", "personality": "laid-back",
            "hunger": 140, "happiness": -20, "social": 50,
            "createdAt": "2024-01-01T00:00:00Z"
        }],
        "inventory": [{"itemId": "apple", "qty": 0}, {"itemId": "cake", "qty": 1}, {"itemId": "cake", "qty": 1}]
    }"#;
    let state = snapshot::deserialize(text).unwrap();
    let r = &state.residents[0];
    assert_eq!(r.hunger, 100.0);
    assert_eq!(r.happiness, 0.0);
    assert!(!r.asleep);
    assert_eq!(r.personality, Personality::LaidBack);
    assert!(!state.inventory.contains("apple"));
    assert_eq!(state.inventory.quantity("cake"), 2);
}

#[test]
fn malformed_text_is_invalid_format() {
    for text in [
        "",
        "not json",
        "[1, 2, 3]",
        r#"{"residents": []}"#,
        r#"{"money": "lots"}"#,
        r#"{"money": -5}"#,
        r#"{"money": 5, "settings": {"mode": "turbo"}}"#,
        r#"{"money": 5, "residents": [{"name": "no id"}]}"#,
    ] {
        assert!(
            matches!(snapshot::deserialize(text), Err(SimError::InvalidFormat(_))),
            "accepted: {text}"
        );
    }
}

#[test]
fn import_selects_first_resident() {
    let text = snapshot::export_portable(&sample_state()).unwrap();
    let (state, selection) = snapshot::import_portable(&text, Some("old")).unwrap();
    assert_eq!(selection.as_deref(), Some("a1"));
    assert_eq!(state.residents.len(), 2);

    let (_, selection) = snapshot::import_portable(r#"{"money": 1}"#, Some("old")).unwrap();
    assert_eq!(selection, None);
}

#[test]
fn store_keeps_a_single_slot() {
    let store = SimStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    assert_eq!(store.load_state().unwrap(), None);
    assert_eq!(store.saved_at().unwrap(), None);

    store.save_state(r#"{"money": 1}"#).unwrap();
    store.save_state(r#"{"money": 2}"#).unwrap();

    assert_eq!(store.load_state().unwrap().as_deref(), Some(r#"{"money": 2}"#));
    assert!(store.saved_at().unwrap().is_some());
}

#[test]
fn unmigrated_store_reports_storage_failure() {
    let store = SimStore::in_memory().expect("in-memory store");
    assert!(matches!(
        store.save_state("{}"),
        Err(SimError::StorageFailure(_))
    ));
}
