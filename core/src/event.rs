//! Events: what every successful operation reports back.
//!
//! The session turns the latest event into the notice text; the runner
//! streams them to whoever is listening. Nothing reads them to decide
//! simulation outcomes.

use crate::{
    clock::TickMode,
    engine::Action,
    types::{ItemId, Money, ResidentId, Tick},
};
use serde::{Deserialize, Serialize};

/// Variants are appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    // ── Residents ──────────────────────────────────
    ResidentCreated {
        resident_id: ResidentId,
        name: String,
    },
    ResidentSelected {
        resident_id: ResidentId,
        name: String,
    },
    ActionPerformed {
        resident_id: ResidentId,
        name: String,
        action: Action,
        /// Item consumed in place of the generic effect, if any.
        item_id: Option<ItemId>,
        /// Coins earned; non-zero only for work.
        earned: Money,
        /// Sleep state after the action.
        asleep: bool,
    },

    // ── Economy ────────────────────────────────────
    ItemPurchased {
        item_id: ItemId,
        qty: u32,
        cost: Money,
        balance: Money,
    },
    ItemConsumed {
        resident_id: ResidentId,
        name: String,
        item_id: ItemId,
        remaining: u32,
    },
    PartyThrown {
        cost: Money,
        guests: usize,
        balance: Money,
    },

    // ── Tick ───────────────────────────────────────
    ResidentStarving {
        tick: Tick,
        resident_id: ResidentId,
        hunger: f64,
    },
    PassiveIncome {
        tick: Tick,
        amount: Money,
        balance: Money,
    },
    TickCompleted {
        tick: Tick,
        residents: usize,
    },
    TickModeChanged {
        mode: TickMode,
    },

    // ── Persistence ────────────────────────────────
    StateSaved {
        bytes: usize,
    },
    StateLoaded {
        residents: usize,
    },
    StateImported {
        residents: usize,
    },
}

impl SimEvent {
    /// Stable snake_case name, matching the serialized `type` tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ResidentCreated { .. }  => "resident_created",
            Self::ResidentSelected { .. } => "resident_selected",
            Self::ActionPerformed { .. }  => "action_performed",
            Self::ItemPurchased { .. }    => "item_purchased",
            Self::ItemConsumed { .. }     => "item_consumed",
            Self::PartyThrown { .. }      => "party_thrown",
            Self::ResidentStarving { .. } => "resident_starving",
            Self::PassiveIncome { .. }    => "passive_income",
            Self::TickCompleted { .. }    => "tick_completed",
            Self::TickModeChanged { .. }  => "tick_mode_changed",
            Self::StateSaved { .. }       => "state_saved",
            Self::StateLoaded { .. }      => "state_loaded",
            Self::StateImported { .. }    => "state_imported",
        }
    }

    /// One-line player-facing text for the notice area.
    pub fn describe(&self) -> String {
        match self {
            Self::ResidentCreated { name, .. } => format!("{name} moved in!"),
            Self::ResidentSelected { name, .. } => format!("Now viewing {name}"),
            Self::ActionPerformed { name, action, item_id, earned, asleep, .. } => match action {
                Action::Feed => match item_id {
                    Some(item) => format!("{name} ate a {item}"),
                    None => format!("{name} had a snack"),
                },
                Action::Play  => format!("{name} played happily"),
                Action::Chat  => format!("{name} enjoyed a chat"),
                Action::Work  => format!("{name} earned {earned} coins"),
                Action::ToggleSleep if *asleep => format!("{name} fell asleep"),
                Action::ToggleSleep => format!("{name} woke up"),
            },
            Self::ItemPurchased { item_id, qty, cost, .. } => {
                format!("Bought {qty} x {item_id} for {cost} coins")
            }
            Self::ItemConsumed { name, item_id, .. } => format!("{name} used {item_id}"),
            Self::PartyThrown { guests, .. } => format!("Party time! {guests} residents cheered up"),
            Self::ResidentStarving { resident_id, .. } => format!("{resident_id} is starving"),
            Self::PassiveIncome { amount, .. } => format!("Passive income: +{amount}"),
            Self::TickCompleted { tick, .. } => format!("Time passes (tick {tick})"),
            Self::TickModeChanged { mode } => format!("Tick mode: {}", mode.name()),
            Self::StateSaved { .. } => "Game saved".to_string(),
            Self::StateLoaded { residents } => format!("Game loaded ({residents} residents)"),
            Self::StateImported { residents } => format!("Save imported ({residents} residents)"),
        }
    }
}
