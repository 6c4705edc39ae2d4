//! The store catalog: every purchasable item and what it does to a
//! resident when used. Built once at startup, never mutated.

use crate::{
    error::{SimError, SimResult},
    resident::StatDelta,
    types::{ItemId, Money},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Item used by the feed action ahead of the generic fallback meal.
pub const DEFAULT_FEED_ITEM: &str = "apple";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id:        ItemId,
    pub name:      String,
    pub price:     Money,
    pub hunger:    i32,
    pub happiness: i32,
    pub social:    i32,
}

impl CatalogItem {
    pub fn effect(&self) -> StatDelta {
        StatDelta::new(
            f64::from(self.hunger),
            f64::from(self.happiness),
            f64::from(self.social),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids. Display order is
    /// the order given.
    pub fn new(items: Vec<CatalogItem>) -> SimResult<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), i).is_some() {
                return Err(SimError::InvalidFormat(format!(
                    "duplicate catalog id '{}'",
                    item.id
                )));
            }
        }
        Ok(Self { items, index })
    }

    pub fn builtin() -> Self {
        let items = builtin_items();
        let index = items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.id.clone(), i))
            .collect();
        Self { items, index }
    }

    pub fn get(&self, item_id: &str) -> Option<&CatalogItem> {
        self.index.get(item_id).map(|&i| &self.items[i])
    }

    /// Lookup that treats a missing id as `UnknownItem`.
    pub fn require(&self, item_id: &str) -> SimResult<&CatalogItem> {
        self.get(item_id).ok_or_else(|| SimError::UnknownItem {
            item_id: item_id.to_string(),
        })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

pub fn builtin_items() -> Vec<CatalogItem> {
    fn item(id: &str, name: &str, price: Money, hunger: i32, happiness: i32, social: i32) -> CatalogItem {
        CatalogItem {
            id: id.into(),
            name: name.into(),
            price,
            hunger,
            happiness,
            social,
        }
    }

    vec![
        item("apple",      "Apple",      10, -15,  2,  0),
        item("sandwich",   "Sandwich",   25, -30,  4,  0),
        item("cake",       "Cake",       40, -20, 12,  2),
        item("ball",       "Ball",       30,   4, 10,  3),
        item("board_game", "Board Game", 60,   0,  8, 12),
        item("tea_set",    "Tea Set",    45,  -5,  6,  8),
    ]
}
