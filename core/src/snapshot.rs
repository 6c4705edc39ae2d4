//! Snapshot serialization: full game state to/from JSON text.
//!
//! The same shape serves the durable save slot and the portable
//! export/import text:
//!   { "money": 120, "residents": [...], "inventory": [{"itemId", "qty"}],
//!     "settings": { "mode": "manual" } }
//!
//! Loading is lenient where it can be: unknown fields are ignored and
//! missing or null collections fall back to empty/default. A missing or
//! non-numeric `money` is the one thing a snapshot can't do without.

use crate::{
    error::{SimError, SimResult},
    inventory::Inventory,
    resident::Resident,
    state::{GameState, Settings},
    types::{Money, ResidentId},
};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

#[derive(Debug, Deserialize)]
struct SnapshotFile {
    #[serde(default, deserialize_with = "null_as_default")]
    residents: Vec<Resident>,
    #[serde(default, deserialize_with = "null_as_default")]
    inventory: Inventory,
    #[serde(default, deserialize_with = "null_as_default")]
    settings:  Settings,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Compact snapshot for the save slot.
pub fn serialize(state: &GameState) -> SimResult<String> {
    Ok(serde_json::to_string(state)?)
}

/// Parse a snapshot, back-filling missing collections.
pub fn deserialize(text: &str) -> SimResult<GameState> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| SimError::InvalidFormat(format!("not valid JSON: {e}")))?;
    let fields = value
        .as_object()
        .ok_or_else(|| SimError::InvalidFormat("snapshot is not an object".into()))?;
    let money = fields
        .get("money")
        .and_then(money_from_value)
        .ok_or_else(|| SimError::InvalidFormat("missing numeric money field".into()))?;

    let file: SnapshotFile = serde_json::from_value(value)
        .map_err(|e| SimError::InvalidFormat(e.to_string()))?;

    let mut residents = file.residents;
    for resident in &mut residents {
        resident.normalize();
    }

    Ok(GameState {
        money,
        residents,
        inventory: file.inventory,
        settings: file.settings,
    })
}

/// Accept non-negative integers and non-negative finite floats (floored).
fn money_from_value(value: &Value) -> Option<Money> {
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    if f.is_finite() && f >= 0.0 {
        Some(f.floor() as Money)
    } else {
        None
    }
}

/// Human-copyable snapshot: same shape, pretty-printed.
pub fn export_portable(state: &GameState) -> SimResult<String> {
    Ok(serde_json::to_string_pretty(state)?)
}

/// Parse portable text into a replacement state plus the selection that
/// goes with it: the first resident, or none. On error the caller keeps
/// both its current state and `current_selection`.
pub fn import_portable(
    text: &str,
    current_selection: Option<&str>,
) -> SimResult<(GameState, Option<ResidentId>)> {
    let state = deserialize(text)?;
    let selection = state.first_resident_id().map(str::to_string);
    log::debug!(
        "import: selection {:?} -> {:?}, {} residents",
        current_selection,
        selection,
        state.residents.len()
    );
    Ok((state, selection))
}
