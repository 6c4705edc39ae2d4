//! Vitals subsystem: ages every resident by one tick.
//!
//! Asleep residents recover: hunger falls, happiness rises.
//! Awake residents get hungrier, lose happiness when starving, drift
//! by personality, and get a little lonelier.
//!
//! Execution: every tick, first in registration order.
//! Each delta is clamped as it is applied, not batched.

use crate::{
    error::SimResult,
    event::SimEvent,
    resident::{Resident, StatDelta},
    state::GameState,
    subsystem::SimSubsystem,
    types::Tick,
};

pub const ASLEEP_HUNGER_DELTA:    f64 = -4.0;
pub const ASLEEP_HAPPINESS_DELTA: f64 = 2.0;
pub const ASLEEP_SOCIAL_DELTA:    f64 = -1.0;

pub const AWAKE_HUNGER_DELTA: f64 = 3.0;
pub const AWAKE_SOCIAL_DELTA: f64 = -1.2;

/// Hunger strictly above this costs happiness every awake tick.
pub const STARVATION_THRESHOLD: f64 = 80.0;
pub const STARVATION_HAPPINESS_PENALTY: f64 = -6.0;

#[derive(Debug, Default)]
pub struct VitalsSubsystem;

impl VitalsSubsystem {
    pub fn new() -> Self {
        Self
    }

    /// Age a single resident. Returns true if the starvation penalty hit.
    pub fn age(resident: &mut Resident) -> bool {
        if resident.asleep {
            resident.apply(StatDelta::hunger(ASLEEP_HUNGER_DELTA));
            resident.apply(StatDelta::happiness(ASLEEP_HAPPINESS_DELTA));
            resident.apply(StatDelta::social(ASLEEP_SOCIAL_DELTA));
            return false;
        }

        resident.apply(StatDelta::hunger(AWAKE_HUNGER_DELTA));
        let starving = resident.hunger > STARVATION_THRESHOLD;
        if starving {
            resident.apply(StatDelta::happiness(STARVATION_HAPPINESS_PENALTY));
        }
        let drift = resident.personality.happiness_drift();
        if drift != 0.0 {
            resident.apply(StatDelta::happiness(drift));
        }
        resident.apply(StatDelta::social(AWAKE_SOCIAL_DELTA));
        starving
    }
}

impl SimSubsystem for VitalsSubsystem {
    fn name(&self) -> &'static str { "vitals" }

    fn update(&mut self, tick: Tick, state: &mut GameState) -> SimResult<Vec<SimEvent>> {
        let mut events = Vec::new();
        for resident in &mut state.residents {
            if Self::age(resident) {
                events.push(SimEvent::ResidentStarving {
                    tick,
                    resident_id: resident.id.clone(),
                    hunger: resident.hunger,
                });
            }
        }

        log::debug!(
            "tick={tick} vitals: aged {} residents, {} starving",
            state.residents.len(),
            events.len()
        );
        Ok(events)
    }
}
