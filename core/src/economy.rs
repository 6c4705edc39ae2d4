//! Economy: the money pool, the store, and item consumption.
//!
//! RULES:
//!   - Money never goes negative. A purchase that would overdraw is
//!     rejected and leaves the state untouched.
//!   - Every check runs before the first mutation, so a failed call
//!     changes nothing.

use crate::{
    catalog::Catalog,
    error::{SimError, SimResult},
    event::SimEvent,
    resident::StatDelta,
    state::GameState,
    types::Money,
};

pub const PARTY_COST: Money = 150;
pub const PARTY_HAPPINESS_BONUS: f64 = 20.0;

/// Buy `qty` units of `item_id` from the catalog.
pub fn purchase(
    state: &mut GameState,
    catalog: &Catalog,
    item_id: &str,
    qty: u32,
) -> SimResult<SimEvent> {
    let item = catalog.require(item_id)?;
    if qty == 0 {
        return Err(SimError::InvalidQuantity);
    }
    // Overflow can only mean "more than anyone has".
    let cost = item.price.checked_mul(Money::from(qty)).unwrap_or(Money::MAX);
    if state.money < cost {
        return Err(SimError::InsufficientFunds {
            needed: cost,
            available: state.money,
        });
    }

    state.money -= cost;
    state.inventory.add(&item.id, qty);
    log::debug!("purchase: {qty} x {} for {cost}, balance={}", item.id, state.money);

    Ok(SimEvent::ItemPurchased {
        item_id: item.id.clone(),
        qty,
        cost,
        balance: state.money,
    })
}

/// Use one unit of `item_id` on a resident, applying its effect.
pub fn consume(
    state: &mut GameState,
    catalog: &Catalog,
    resident_id: &str,
    item_id: &str,
) -> SimResult<SimEvent> {
    if !state.inventory.contains(item_id) {
        return Err(SimError::NoItem { item_id: item_id.to_string() });
    }
    let idx = state
        .resident_index(resident_id)
        .ok_or_else(|| SimError::NoResident { resident_id: resident_id.to_string() })?;
    if state.residents[idx].asleep {
        return Err(SimError::ResidentAsleep { name: state.residents[idx].name.clone() });
    }
    // Inventory can hold ids the catalog no longer knows (imported saves).
    let effect = catalog.require(item_id)?.effect();

    let remaining = state.inventory.take_one(item_id).unwrap_or(0);
    let resident = &mut state.residents[idx];
    resident.apply(effect);
    let (name, resident_id) = (resident.name.clone(), resident.id.clone());
    log::debug!("consume: {name} used {item_id}, {remaining} left");

    Ok(SimEvent::ItemConsumed {
        resident_id,
        name,
        item_id: item_id.to_string(),
        remaining,
    })
}

/// Spend `PARTY_COST` to cheer up every resident.
pub fn throw_party(state: &mut GameState) -> SimResult<SimEvent> {
    if state.money < PARTY_COST {
        return Err(SimError::InsufficientFunds {
            needed: PARTY_COST,
            available: state.money,
        });
    }

    state.money -= PARTY_COST;
    for resident in &mut state.residents {
        resident.apply(StatDelta::happiness(PARTY_HAPPINESS_BONUS));
    }
    log::debug!("party: {} guests, balance={}", state.residents.len(), state.money);

    Ok(SimEvent::PartyThrown {
        cost: PARTY_COST,
        guests: state.residents.len(),
        balance: state.money,
    })
}
