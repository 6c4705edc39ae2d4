//! Session: the single owning context for a running household.
//!
//! The presentation layer holds one Session and talks to nothing else.
//! It owns the engine (and through it the GameState), the save store,
//! the scheduler, the active-resident selection, and the notice line.
//!
//! RULES:
//!   - Every command updates the notice, success or failure.
//!   - A failed command leaves the GameState as it was.
//!   - A failed save is reported, never rolled back: the simulation
//!     keeps running on the in-memory state.
//!   - An unreadable save is never overwritten by autosave. Autosave
//!     stays held until the player saves, loads or imports.

use crate::{
    catalog::Catalog,
    clock::TickMode,
    config::SimConfig,
    engine::{Action, SimEngine},
    error::{SimError, SimResult},
    event::SimEvent,
    resident::{Personality, Resident},
    scheduler::{ScheduledTask, Scheduler, VirtualTimer},
    snapshot,
    state::GameState,
    store::SimStore,
    types::ResidentId,
};
use std::time::Duration;

/// The single transient feedback line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message:  String,
    pub duration: Duration,
    pub is_error: bool,
}

pub struct Session {
    engine:          SimEngine,
    store:           SimStore,
    scheduler:       Scheduler<VirtualTimer>,
    active:          Option<ResidentId>,
    notice:          Option<Notice>,
    notice_duration: Duration,
    autosave_held:   bool,
}

impl Session {
    /// Open a session on `store`, resuming its save if there is one.
    /// An unreadable save is reported and replaced by a fresh household.
    pub fn open(store: SimStore, config: &SimConfig, seed: u64) -> SimResult<Self> {
        let catalog = config.build_catalog()?;
        let (state, load_error) = match read_save(&store) {
            Ok(Some(state)) => (state, None),
            Ok(None) => (GameState::new(config.tuning.starting_money), None),
            Err(e) => {
                log::warn!("save unreadable, starting fresh: {e}");
                (GameState::new(config.tuning.starting_money), Some(e))
            }
        };

        let engine = SimEngine::build(state, catalog, seed)
            .with_feed_item(&config.tuning.feed_item_id);
        let mut session = Self::from_parts(engine, store, config);
        if let Some(e) = load_error {
            session.autosave_held = true;
            session.notify_error(format!("Could not load save: {e}"));
        }
        Ok(session)
    }

    /// Wrap an already-built engine. Selects the first resident, starts
    /// autosave, and starts ticking if the state says auto.
    pub fn from_parts(engine: SimEngine, store: SimStore, config: &SimConfig) -> Self {
        let scheduler = Scheduler::new(
            VirtualTimer::new(),
            config.tick_interval(),
            config.autosave_interval(),
        );
        let mut session = Self {
            engine,
            store,
            scheduler,
            active: None,
            notice: None,
            notice_duration: config.notice_duration(),
            autosave_held: false,
        };
        session.active = session.engine.state.first_resident_id().map(str::to_string);
        session.scheduler.start_autosave();
        session.scheduler.set_mode(session.engine.state.settings.mode);
        session
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.engine.state
    }

    pub fn catalog(&self) -> &Catalog {
        self.engine.catalog()
    }

    pub fn active_resident_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn active_resident(&self) -> Option<&Resident> {
        self.active
            .as_deref()
            .and_then(|id| self.engine.state.resident(id))
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_auto_ticking(&self) -> bool {
        self.scheduler.is_ticking()
    }

    pub fn current_tick(&self) -> u64 {
        self.engine.clock.current_tick
    }

    pub fn store(&self) -> &SimStore {
        &self.store
    }

    /// True while autosave is skipping writes to protect an unreadable save.
    pub fn is_autosave_held(&self) -> bool {
        self.autosave_held
    }

    // ── Commands ───────────────────────────────────────────────

    /// Create a resident. The first one to move in becomes active.
    pub fn create_resident(
        &mut self,
        name: &str,
        gender: &str,
        personality: impl Into<Personality>,
    ) -> SimResult<SimEvent> {
        let result = self
            .engine
            .create_resident(name, gender, personality.into(), chrono::Utc::now());
        let event = self.report(result)?;
        if let SimEvent::ResidentCreated { resident_id, .. } = &event {
            if self.active.is_none() {
                self.active = Some(resident_id.clone());
            }
        }
        Ok(event)
    }

    pub fn select_resident(&mut self, resident_id: &str) -> SimResult<SimEvent> {
        let result = match self.engine.state.resident(resident_id) {
            Some(r) => Ok(SimEvent::ResidentSelected {
                resident_id: r.id.clone(),
                name: r.name.clone(),
            }),
            None => Err(SimError::NoResident { resident_id: resident_id.to_string() }),
        };
        let event = self.report(result)?;
        self.active = Some(resident_id.to_string());
        Ok(event)
    }

    /// Feed / play / chat / work / toggle sleep on the active resident.
    pub fn perform(&mut self, action: Action) -> SimResult<SimEvent> {
        let result = self.engine.perform(action, self.active.as_deref());
        self.report(result)
    }

    pub fn purchase(&mut self, item_id: &str, qty: u32) -> SimResult<SimEvent> {
        let result = self.engine.purchase(item_id, qty);
        self.report(result)
    }

    /// Use a specific inventory item on the active resident.
    pub fn use_item(&mut self, item_id: &str) -> SimResult<SimEvent> {
        let result = match self.active.clone() {
            Some(id) => self.engine.consume(&id, item_id),
            None => Err(SimError::NoResidentSelected),
        };
        self.report(result)
    }

    pub fn throw_party(&mut self) -> SimResult<SimEvent> {
        let result = self.engine.throw_party();
        self.report(result)
    }

    /// Switch between manual and automatic ticking.
    pub fn set_tick_mode(&mut self, mode: TickMode) -> SimEvent {
        self.engine.state.settings.mode = mode;
        self.scheduler.set_mode(mode);
        let event = SimEvent::TickModeChanged { mode };
        self.notify(event.describe());
        event
    }

    /// Apply one tick on demand, regardless of mode.
    pub fn tick_now(&mut self) -> SimResult<Vec<SimEvent>> {
        match self.engine.tick() {
            Ok(events) => {
                if let Some(last) = events.last() {
                    self.notify(last.describe());
                }
                Ok(events)
            }
            Err(e) => {
                self.notify_error(e.to_string());
                Err(e)
            }
        }
    }

    pub fn save(&mut self) -> SimResult<SimEvent> {
        let result = self.write_save();
        if result.is_ok() {
            self.autosave_held = false;
        }
        self.report(result)
    }

    /// Replace the state with the saved one.
    pub fn load(&mut self) -> SimResult<SimEvent> {
        let result = match read_save(&self.store) {
            Ok(Some(state)) => Ok(state),
            Ok(None) => Err(SimError::NoSave),
            Err(e) => Err(e),
        };
        let state = match result {
            Ok(state) => state,
            Err(e) => {
                self.notify_error(e.to_string());
                return Err(e);
            }
        };

        let selection = state.first_resident_id().map(str::to_string);
        let event = SimEvent::StateLoaded { residents: state.residents.len() };
        self.install(state, selection);
        self.autosave_held = false;
        log::info!("loaded save: {} residents", self.engine.state.residents.len());
        self.notify(event.describe());
        Ok(event)
    }

    /// Pretty-printed snapshot for copying out.
    pub fn export(&mut self) -> SimResult<String> {
        match snapshot::export_portable(&self.engine.state) {
            Ok(text) => {
                self.notify("Save exported".to_string());
                Ok(text)
            }
            Err(e) => {
                self.notify_error(e.to_string());
                Err(e)
            }
        }
    }

    /// Replace the whole household with pasted text.
    pub fn import(&mut self, text: &str) -> SimResult<SimEvent> {
        let (state, selection) = match snapshot::import_portable(text, self.active.as_deref()) {
            Ok(parts) => parts,
            Err(e) => {
                log::warn!("import rejected: {e}");
                self.notify_error(e.to_string());
                return Err(e);
            }
        };

        let event = SimEvent::StateImported { residents: state.residents.len() };
        self.install(state, selection);
        self.autosave_held = false;
        log::info!("imported save: {} residents", self.engine.state.residents.len());
        self.notify(event.describe());
        Ok(event)
    }

    /// Let `elapsed` wall time pass and run whatever came due.
    /// Autosave failures are reported through the notice, not returned.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for task in self.scheduler.advance(elapsed) {
            match task {
                ScheduledTask::Tick => match self.engine.tick() {
                    Ok(tick_events) => events.extend(tick_events),
                    Err(e) => log::warn!("scheduled tick failed: {e}"),
                },
                ScheduledTask::Autosave if self.autosave_held => {
                    log::debug!("autosave held: existing save could not be read");
                }
                ScheduledTask::Autosave => match self.write_save() {
                    Ok(event) => {
                        log::debug!("autosave ok");
                        events.push(event);
                    }
                    Err(e) => {
                        log::warn!("autosave failed: {e}");
                        self.notify_error(format!("Autosave failed: {e}"));
                    }
                },
            }
        }
        events
    }

    // ── Internals ──────────────────────────────────────────────

    /// Swap in a loaded/imported state and reconcile everything that
    /// hangs off it.
    fn install(&mut self, state: GameState, selection: Option<ResidentId>) {
        let mode = state.settings.mode;
        self.engine.replace_state(state);
        self.active = selection;
        self.scheduler.stop_ticking();
        self.scheduler.set_mode(mode);
    }

    fn write_save(&self) -> SimResult<SimEvent> {
        let json = snapshot::serialize(&self.engine.state)?;
        self.store.save_state(&json)?;
        log::info!("saved {} bytes", json.len());
        Ok(SimEvent::StateSaved { bytes: json.len() })
    }

    fn report(&mut self, result: SimResult<SimEvent>) -> SimResult<SimEvent> {
        match &result {
            Ok(event) => self.notify(event.describe()),
            Err(e) => self.notify_error(e.to_string()),
        }
        result
    }

    fn notify(&mut self, message: String) {
        self.notice = Some(Notice {
            message,
            duration: self.notice_duration,
            is_error: false,
        });
    }

    fn notify_error(&mut self, message: String) {
        self.notice = Some(Notice {
            message,
            duration: self.notice_duration,
            is_error: true,
        });
    }
}

fn read_save(store: &SimStore) -> SimResult<Option<GameState>> {
    match store.load_state()? {
        Some(json) => Ok(Some(snapshot::deserialize(&json)?)),
        None => Ok(None),
    }
}
