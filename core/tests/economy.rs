//! Economy tests: purchases, consumption, and parties.

use chrono::Utc;
use miihouse_core::{
    catalog::{Catalog, CatalogItem},
    economy::{self, PARTY_COST},
    error::SimError,
    resident::{Personality, Resident},
    state::GameState,
};

fn catalog() -> Catalog {
    Catalog::new(vec![
        CatalogItem {
            id: "snack".into(),
            name: "Snack".into(),
            price: 25,
            hunger: -20,
            happiness: 5,
            social: 0,
        },
        CatalogItem {
            id: "apple".into(),
            name: "Apple".into(),
            price: 10,
            hunger: -15,
            happiness: 2,
            social: 0,
        },
    ])
    .unwrap()
}

fn resident(id: &str, happiness: f64) -> Resident {
    let mut r = Resident::create(id.into(), id, "x", Personality::Easygoing, Utc::now());
    r.happiness = happiness;
    r
}

#[test]
fn purchase_rejected_when_money_short() {
    let mut state = GameState::new(5);
    let before = state.clone();

    let err = economy::purchase(&mut state, &catalog(), "snack", 1).unwrap_err();
    assert!(matches!(err, SimError::InsufficientFunds { needed: 25, available: 5 }));
    assert_eq!(state, before);
}

#[test]
fn purchase_deducts_and_stocks() {
    let mut state = GameState::new(50);
    economy::purchase(&mut state, &catalog(), "snack", 1).unwrap();

    assert_eq!(state.money, 25);
    assert_eq!(state.inventory.quantity("snack"), 1);
    assert_eq!(state.inventory.len(), 1);
}

#[test]
fn purchase_never_overdraws_for_any_quantity() {
    for money in [0u64, 24, 25, 49, 50, 74, 75, 1_000] {
        for qty in [1u32, 2, 3, 40, u32::MAX] {
            let mut state = GameState::new(money);
            let cost = 25u64.saturating_mul(u64::from(qty));
            match economy::purchase(&mut state, &catalog(), "snack", qty) {
                Ok(_) => assert_eq!(state.money, money - cost),
                Err(SimError::InsufficientFunds { .. }) => {
                    assert!(cost > money);
                    assert_eq!(state.money, money);
                    assert!(state.inventory.is_empty());
                }
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
    }
}

#[test]
fn repeat_purchases_stack_in_one_entry() {
    let mut state = GameState::new(100);
    economy::purchase(&mut state, &catalog(), "apple", 2).unwrap();
    economy::purchase(&mut state, &catalog(), "apple", 1).unwrap();
    assert_eq!(state.inventory.len(), 1);
    assert_eq!(state.inventory.quantity("apple"), 3);
    assert_eq!(state.money, 70);
}

#[test]
fn unknown_item_and_zero_quantity_rejected() {
    let mut state = GameState::new(100);
    assert!(matches!(
        economy::purchase(&mut state, &catalog(), "caviar", 1),
        Err(SimError::UnknownItem { .. })
    ));
    assert!(matches!(
        economy::purchase(&mut state, &catalog(), "snack", 0),
        Err(SimError::InvalidQuantity)
    ));
    assert_eq!(state.money, 100);
}

#[test]
fn consuming_last_unit_removes_entry() {
    let mut state = GameState::new(100);
    state.residents.push(resident("r1", 50.0));
    economy::purchase(&mut state, &catalog(), "snack", 1).unwrap();

    economy::consume(&mut state, &catalog(), "r1", "snack").unwrap();

    assert!(!state.inventory.contains("snack"));
    assert!(state.inventory.entries().iter().all(|e| e.item_id != "snack"));
    let r = state.resident("r1").unwrap();
    assert_eq!(r.hunger, 10.0);
    assert_eq!(r.happiness, 55.0);
}

#[test]
fn consume_error_cases_leave_state_unchanged() {
    let mut state = GameState::new(100);
    state.residents.push(resident("r1", 50.0));
    let mut sleeper = resident("r2", 50.0);
    sleeper.asleep = true;
    state.residents.push(sleeper);

    // Nothing in inventory yet.
    let before = state.clone();
    assert!(matches!(
        economy::consume(&mut state, &catalog(), "r1", "snack"),
        Err(SimError::NoItem { .. })
    ));
    assert_eq!(state, before);

    economy::purchase(&mut state, &catalog(), "snack", 1).unwrap();
    let before = state.clone();
    assert!(matches!(
        economy::consume(&mut state, &catalog(), "ghost", "snack"),
        Err(SimError::NoResident { .. })
    ));
    assert!(matches!(
        economy::consume(&mut state, &catalog(), "r2", "snack"),
        Err(SimError::ResidentAsleep { .. })
    ));
    assert_eq!(state, before);
}

#[test]
fn party_cheers_everyone_with_clamping() {
    let mut state = GameState::new(200);
    state.residents.push(resident("a", 50.0));
    state.residents.push(resident("b", 90.0));
    state.residents.push(resident("c", 100.0));

    economy::throw_party(&mut state).unwrap();

    assert_eq!(state.money, 50);
    let happiness: Vec<f64> = state.residents.iter().map(|r| r.happiness).collect();
    assert_eq!(happiness, vec![70.0, 100.0, 100.0]);
}

#[test]
fn party_rejected_below_cost() {
    let mut state = GameState::new(PARTY_COST - 1);
    state.residents.push(resident("a", 50.0));
    let before = state.clone();
    assert!(matches!(
        economy::throw_party(&mut state),
        Err(SimError::InsufficientFunds { .. })
    ));
    assert_eq!(state, before);
}
