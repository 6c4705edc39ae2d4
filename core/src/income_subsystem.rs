//! Income subsystem: passive money that scales with population.
//!
//! Execution: every tick, after vitals.

use crate::{
    error::SimResult,
    event::SimEvent,
    state::GameState,
    subsystem::SimSubsystem,
    types::{Money, Tick},
};

/// Coins per resident per tick, floored over the whole household.
pub const PASSIVE_INCOME_PER_RESIDENT: f64 = 0.5;

#[derive(Debug, Default)]
pub struct IncomeSubsystem;

impl IncomeSubsystem {
    pub fn new() -> Self {
        Self
    }

    pub fn income_for(resident_count: usize) -> Money {
        (resident_count as f64 * PASSIVE_INCOME_PER_RESIDENT).floor() as Money
    }
}

impl SimSubsystem for IncomeSubsystem {
    fn name(&self) -> &'static str { "income" }

    fn update(&mut self, tick: Tick, state: &mut GameState) -> SimResult<Vec<SimEvent>> {
        let amount = Self::income_for(state.residents.len());
        if amount == 0 {
            return Ok(vec![]);
        }
        state.add_money(amount);
        log::debug!("tick={tick} income: +{amount}, balance={}", state.money);

        Ok(vec![SimEvent::PassiveIncome {
            tick,
            amount,
            balance: state.money,
        }])
    }
}
