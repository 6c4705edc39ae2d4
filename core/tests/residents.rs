//! Entity model tests: resident creation, lookup, and the clamp rule.

use chrono::Utc;
use miihouse_core::{
    catalog::Catalog,
    engine::SimEngine,
    error::SimError,
    resident::{clamp, Personality, Resident, StatDelta},
    state::GameState,
};

fn engine() -> SimEngine {
    SimEngine::build(GameState::new(100), Catalog::builtin(), 42)
}

#[test]
fn new_resident_has_starting_stats() {
    let mut engine = engine();
    engine
        .create_resident("Ana", "female", Personality::Easygoing, Utc::now())
        .unwrap();

    let r = &engine.state.residents[0];
    assert_eq!(r.hunger, 30.0);
    assert_eq!(r.happiness, 60.0);
    assert_eq!(r.social, 50.0);
    assert!(!r.asleep);
    assert_eq!(r.name, "Ana");
}

#[test]
fn residents_keep_creation_order_and_unique_ids() {
    let mut engine = engine();
    for name in ["Ana", "Ben", "Cai", "Dee"] {
        engine
            .create_resident(name, "x", Personality::Energetic, Utc::now())
            .unwrap();
    }
    let names: Vec<&str> = engine.state.residents.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Ana", "Ben", "Cai", "Dee"]);

    let mut ids: Vec<&str> = engine.state.residents.iter().map(|r| r.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 4, "resident ids must be unique");
}

#[test]
fn blank_name_rejected_without_touching_state() {
    let mut engine = engine();
    let err = engine
        .create_resident("   ", "x", Personality::Easygoing, Utc::now())
        .unwrap_err();
    assert!(matches!(err, SimError::InvalidName));
    assert!(engine.state.residents.is_empty());
}

#[test]
fn lookup_of_missing_resident_is_none() {
    let state = GameState::new(0);
    assert!(state.resident("nobody").is_none());
}

#[test]
fn stats_stay_in_range_for_any_delta() {
    let deltas = [-1e6, -250.0, -100.0, -0.5, 0.0, 0.5, 100.0, 250.0, 1e6];
    for &h in &deltas {
        for &p in &deltas {
            for &s in &deltas {
                let mut r = Resident::create(
                    "id".into(),
                    "Ana",
                    "female",
                    Personality::LaidBack,
                    Utc::now(),
                );
                r.apply(StatDelta::new(h, p, s));
                for v in [r.hunger, r.happiness, r.social] {
                    assert!((0.0..=100.0).contains(&v), "stat {v} escaped [0, 100]");
                }
            }
        }
    }
}

#[test]
fn clamp_respects_custom_bounds() {
    assert_eq!(clamp(5.0, 10.0, 20.0), 10.0);
    assert_eq!(clamp(25.0, 10.0, 20.0), 20.0);
    assert_eq!(clamp(15.0, 10.0, 20.0), 15.0);
}
