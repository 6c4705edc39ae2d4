//! Subsystem trait.
//!
//! RULE: Every per-tick rule implements SimSubsystem.
//! The engine calls update() on each registered subsystem
//! in registration order, every tick.
//! Execution order is fixed and documented in engine.rs.

use crate::{error::SimResult, event::SimEvent, state::GameState, types::Tick};

/// The contract every subsystem must fulfill.
pub trait SimSubsystem {
    /// Unique stable name for this subsystem.
    fn name(&self) -> &'static str;

    /// Called once per tick by the engine.
    ///
    /// - `tick`:  the current tick number
    /// - `state`: the game state, already updated by earlier subsystems
    ///
    /// Returns the events this subsystem produced.
    fn update(&mut self, tick: Tick, state: &mut GameState) -> SimResult<Vec<SimEvent>>;
}
