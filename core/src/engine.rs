//! The simulation engine: residents' discrete actions and the tick.
//!
//! EXECUTION ORDER per tick (fixed):
//!   1. Vitals subsystem   (per-resident aging)
//!   2. Income subsystem   (passive income from population)
//!
//! RULES:
//!   - Actions target the active resident, passed in by the caller.
//!   - Every action except ToggleSleep requires the resident awake.
//!   - All randomness flows through injected RandomSource streams.
//!   - A rejected action leaves the state untouched.

use crate::{
    catalog::{Catalog, DEFAULT_FEED_ITEM},
    clock::SimClock,
    economy,
    error::{SimError, SimResult},
    event::SimEvent,
    income_subsystem::IncomeSubsystem,
    resident::{new_resident_id, Personality, Resident, StatDelta},
    rng::{RandomSource, RngBank, RngSlot},
    state::GameState,
    subsystem::SimSubsystem,
    types::{ItemId, Money},
    vitals_subsystem::VitalsSubsystem,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Feeding with nothing suitable in the inventory.
pub const FEED_FALLBACK: StatDelta = StatDelta::new(-18.0, 3.0, 0.0);
/// Play is fun but tiring.
pub const PLAY_EFFECT: StatDelta = StatDelta::new(6.0, 10.0, 0.0);
pub const CHAT_EFFECT: StatDelta = StatDelta::new(0.0, 4.0, 12.0);
/// The cost of working, paid by the worker.
pub const WORK_EFFECT: StatDelta = StatDelta::new(8.0, -6.0, 0.0);

pub const WORK_EARNINGS_MIN: Money = 10;
pub const WORK_EARNINGS_MAX: Money = 19;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Feed,
    Play,
    Chat,
    Work,
    ToggleSleep,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Feed        => "feed",
            Self::Play        => "play",
            Self::Chat        => "chat",
            Self::Work        => "work",
            Self::ToggleSleep => "toggle_sleep",
        }
    }
}

impl std::str::FromStr for Action {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "feed" => Ok(Self::Feed),
            "play" => Ok(Self::Play),
            "chat" => Ok(Self::Chat),
            "work" => Ok(Self::Work),
            "sleep" | "toggle_sleep" | "sleep-toggle" => Ok(Self::ToggleSleep),
            other => Err(SimError::InvalidFormat(format!("unknown action '{other}'"))),
        }
    }
}

pub struct SimEngine {
    pub state:    GameState,
    pub clock:    SimClock,
    catalog:      Catalog,
    feed_item_id: ItemId,
    earnings_rng: Box<dyn RandomSource>,
    identity_rng: Box<dyn RandomSource>,
    subsystems:   Vec<Box<dyn SimSubsystem>>,
}

impl SimEngine {
    /// A bare engine with no subsystems registered.
    pub fn new(
        state: GameState,
        catalog: Catalog,
        earnings_rng: Box<dyn RandomSource>,
        identity_rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            state,
            clock: SimClock::new(),
            catalog,
            feed_item_id: DEFAULT_FEED_ITEM.to_string(),
            earnings_rng,
            identity_rng,
            subsystems: Vec::new(),
        }
    }

    /// Build a fully wired engine with seeded RNG streams.
    pub fn build(state: GameState, catalog: Catalog, seed: u64) -> Self {
        let bank = RngBank::new(seed);
        Self::build_with_rng(
            state,
            catalog,
            Box::new(bank.for_slot(RngSlot::Earnings)),
            Box::new(bank.for_slot(RngSlot::Identity)),
        )
    }

    /// Build a fully wired engine around caller-supplied randomness.
    pub fn build_with_rng(
        state: GameState,
        catalog: Catalog,
        earnings_rng: Box<dyn RandomSource>,
        identity_rng: Box<dyn RandomSource>,
    ) -> Self {
        let mut engine = Self::new(state, catalog, earnings_rng, identity_rng);
        // EXECUTION ORDER is fixed. See the module docs.
        engine.register(Box::new(VitalsSubsystem::new()));
        engine.register(Box::new(IncomeSubsystem::new()));
        engine
    }

    /// Register a subsystem. Call in the documented execution order.
    pub fn register(&mut self, subsystem: Box<dyn SimSubsystem>) {
        self.subsystems.push(subsystem);
    }

    pub fn with_feed_item(mut self, item_id: &str) -> Self {
        self.feed_item_id = item_id.to_string();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn feed_item_id(&self) -> &str {
        &self.feed_item_id
    }

    /// Swap in a whole new state (load / import).
    pub fn replace_state(&mut self, state: GameState) -> GameState {
        std::mem::replace(&mut self.state, state)
    }

    // ── Residents ──────────────────────────────────────────────

    /// Create a resident and append it to the household.
    pub fn create_resident(
        &mut self,
        name: &str,
        gender: &str,
        personality: Personality,
        now: DateTime<Utc>,
    ) -> SimResult<SimEvent> {
        if name.trim().is_empty() {
            return Err(SimError::InvalidName);
        }
        let id = loop {
            let candidate = new_resident_id(self.identity_rng.as_mut());
            if self.state.resident(&candidate).is_none() {
                break candidate;
            }
        };
        let resident = Resident::create(id, name, gender, personality, now);
        log::debug!("resident created: {} ({})", resident.name, resident.id);

        let event = SimEvent::ResidentCreated {
            resident_id: resident.id.clone(),
            name: resident.name.clone(),
        };
        self.state.residents.push(resident);
        Ok(event)
    }

    // ── Actions ────────────────────────────────────────────────

    /// Perform `action` on the active resident.
    pub fn perform(&mut self, action: Action, active: Option<&str>) -> SimResult<SimEvent> {
        let resident_id = active.ok_or(SimError::NoResidentSelected)?;
        let idx = self
            .state
            .resident_index(resident_id)
            .ok_or(SimError::NoResidentSelected)?;

        if action == Action::ToggleSleep {
            let resident = &mut self.state.residents[idx];
            let asleep = resident.toggle_sleep();
            log::debug!("{} is now {}", resident.name, if asleep { "asleep" } else { "awake" });
            return Ok(SimEvent::ActionPerformed {
                resident_id: resident.id.clone(),
                name: resident.name.clone(),
                action,
                item_id: None,
                earned: 0,
                asleep,
            });
        }

        if self.state.residents[idx].asleep {
            return Err(SimError::ResidentAsleep {
                name: self.state.residents[idx].name.clone(),
            });
        }

        let mut item_id = None;
        let mut earned = 0;
        match action {
            Action::Feed => {
                if self.feed_item_available() {
                    let feed_item = self.feed_item_id.clone();
                    economy::consume(&mut self.state, &self.catalog, resident_id, &feed_item)?;
                    item_id = Some(feed_item);
                } else {
                    self.state.residents[idx].apply(FEED_FALLBACK);
                }
            }
            Action::Play => self.state.residents[idx].apply(PLAY_EFFECT),
            Action::Chat => self.state.residents[idx].apply(CHAT_EFFECT),
            Action::Work => {
                earned = self
                    .earnings_rng
                    .next_in_range(WORK_EARNINGS_MIN, WORK_EARNINGS_MAX);
                self.state.add_money(earned);
                self.state.residents[idx].apply(WORK_EFFECT);
            }
            Action::ToggleSleep => {}
        }

        let resident = &self.state.residents[idx];
        log::debug!(
            "action {} on {}: hunger={:.1} happiness={:.1} social={:.1}",
            action.name(),
            resident.name,
            resident.hunger,
            resident.happiness,
            resident.social
        );
        Ok(SimEvent::ActionPerformed {
            resident_id: resident.id.clone(),
            name: resident.name.clone(),
            action,
            item_id,
            earned,
            asleep: resident.asleep,
        })
    }

    /// The feed item wins over the fallback only when it is both owned
    /// and still in the catalog.
    fn feed_item_available(&self) -> bool {
        self.state.inventory.contains(&self.feed_item_id)
            && self.catalog.get(&self.feed_item_id).is_some()
    }

    // ── Economy ────────────────────────────────────────────────

    pub fn purchase(&mut self, item_id: &str, qty: u32) -> SimResult<SimEvent> {
        economy::purchase(&mut self.state, &self.catalog, item_id, qty)
    }

    pub fn consume(&mut self, resident_id: &str, item_id: &str) -> SimResult<SimEvent> {
        economy::consume(&mut self.state, &self.catalog, resident_id, item_id)
    }

    pub fn throw_party(&mut self) -> SimResult<SimEvent> {
        economy::throw_party(&mut self.state)
    }

    // ── Tick ───────────────────────────────────────────────────

    /// Advance one tick. This is the core simulation step.
    pub fn tick(&mut self) -> SimResult<Vec<SimEvent>> {
        let current_tick = self.clock.advance();
        let mut tick_events = Vec::new();

        for subsystem in &mut self.subsystems {
            let new_events = subsystem.update(current_tick, &mut self.state)?;
            log::trace!("tick={current_tick} {}: {} events", subsystem.name(), new_events.len());
            tick_events.extend(new_events);
        }

        tick_events.push(SimEvent::TickCompleted {
            tick: current_tick,
            residents: self.state.residents.len(),
        });
        Ok(tick_events)
    }

    /// Run n ticks in a loop. Used by the batch runner and tests.
    pub fn run_ticks(&mut self, n: u64) -> SimResult<()> {
        for _ in 0..n {
            self.tick()?;
        }
        Ok(())
    }
}
