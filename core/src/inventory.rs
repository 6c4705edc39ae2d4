//! The household inventory: item id → quantity.
//!
//! RULE: an entry exists only while its quantity is positive. Consuming
//! the last unit removes the entry; it never lingers at zero.

use crate::types::ItemId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryEntry {
    pub item_id: ItemId,
    pub qty:     u32,
}

/// Entries in first-acquired order, unique by item id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<InventoryEntry>", into = "Vec<InventoryEntry>")]
pub struct Inventory {
    entries: Vec<InventoryEntry>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, item_id: &str) -> u32 {
        self.entries
            .iter()
            .find(|e| e.item_id == item_id)
            .map_or(0, |e| e.qty)
    }

    pub fn contains(&self, item_id: &str) -> bool {
        self.quantity(item_id) > 0
    }

    /// Add `qty` units, creating the entry if needed. Adding zero is a no-op.
    pub fn add(&mut self, item_id: &str, qty: u32) {
        if qty == 0 {
            return;
        }
        match self.entries.iter_mut().find(|e| e.item_id == item_id) {
            Some(entry) => entry.qty = entry.qty.saturating_add(qty),
            None => self.entries.push(InventoryEntry {
                item_id: item_id.to_string(),
                qty,
            }),
        }
    }

    /// Take one unit. Returns the remaining quantity, or `None` if there
    /// was nothing to take.
    pub fn take_one(&mut self, item_id: &str) -> Option<u32> {
        let pos = self.entries.iter().position(|e| e.item_id == item_id)?;
        let entry = &mut self.entries[pos];
        entry.qty = entry.qty.checked_sub(1)?;
        let remaining = entry.qty;
        if remaining == 0 {
            self.entries.remove(pos);
        }
        Some(remaining)
    }

    pub fn entries(&self) -> &[InventoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Loading merges duplicate ids and drops zero-quantity records, so a
/// hand-edited save can't break the uniqueness or positivity rules.
impl From<Vec<InventoryEntry>> for Inventory {
    fn from(raw: Vec<InventoryEntry>) -> Self {
        let mut inventory = Self::new();
        for entry in raw {
            inventory.add(&entry.item_id, entry.qty);
        }
        inventory
    }
}

impl From<Inventory> for Vec<InventoryEntry> {
    fn from(inventory: Inventory) -> Self {
        inventory.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_unit_removes_entry() {
        let mut inv = Inventory::new();
        inv.add("apple", 2);
        assert_eq!(inv.take_one("apple"), Some(1));
        assert_eq!(inv.take_one("apple"), Some(0));
        assert!(inv.is_empty());
        assert_eq!(inv.take_one("apple"), None);
    }

    #[test]
    fn loading_merges_duplicates_and_drops_zeros() {
        let raw = vec![
            InventoryEntry { item_id: "apple".into(), qty: 1 },
            InventoryEntry { item_id: "cake".into(),  qty: 0 },
            InventoryEntry { item_id: "apple".into(), qty: 2 },
        ];
        let inv = Inventory::from(raw);
        assert_eq!(inv.len(), 1);
        assert_eq!(inv.quantity("apple"), 3);
        assert!(!inv.contains("cake"));
    }
}
