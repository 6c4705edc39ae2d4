//! Simulation clock: owns the tick counter and the tick mode.

use crate::types::Tick;
use serde::{Deserialize, Serialize};

/// Counts ticks applied since the session started. Not persisted:
/// saves describe the household, not how long it has been simulated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimClock {
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance one tick. Returns the new tick number.
    pub fn advance(&mut self) -> Tick {
        self.current_tick += 1;
        self.current_tick
    }
}

/// Who drives ticks: the player (one per request) or the scheduler.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TickMode {
    #[default]
    Manual,
    Auto,
}

impl TickMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Auto   => "auto",
        }
    }
}

impl std::str::FromStr for TickMode {
    type Err = crate::error::SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(Self::Manual),
            "auto"   => Ok(Self::Auto),
            other    => Err(crate::error::SimError::InvalidFormat(format!(
                "unknown tick mode '{other}'"
            ))),
        }
    }
}
