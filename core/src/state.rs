//! The root aggregate: everything that gets saved.

use crate::{
    clock::TickMode,
    inventory::Inventory,
    resident::Resident,
    types::Money,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: TickMode,
}

/// Money, residents (creation order), inventory, and settings.
/// Mutated only through the engine and economy; presentation reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub money:     Money,
    pub residents: Vec<Resident>,
    pub inventory: Inventory,
    pub settings:  Settings,
}

impl GameState {
    pub fn new(starting_money: Money) -> Self {
        Self {
            money: starting_money,
            ..Self::default()
        }
    }

    /// Lookup by id. Not finding one is an ordinary outcome.
    pub fn resident(&self, id: &str) -> Option<&Resident> {
        self.residents.iter().find(|r| r.id == id)
    }

    pub fn resident_mut(&mut self, id: &str) -> Option<&mut Resident> {
        self.residents.iter_mut().find(|r| r.id == id)
    }

    pub fn resident_index(&self, id: &str) -> Option<usize> {
        self.residents.iter().position(|r| r.id == id)
    }

    pub fn first_resident_id(&self) -> Option<&str> {
        self.residents.first().map(|r| r.id.as_str())
    }

    pub fn add_money(&mut self, amount: Money) {
        self.money = self.money.saturating_add(amount);
    }
}
