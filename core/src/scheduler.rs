//! Scheduler: automatic ticking and periodic autosave.
//!
//! Timers are host-driven: the host tells the timer service how much
//! wall time has passed and gets back the tasks that came due, in order.
//! Nothing here spawns threads, so a fired task always runs to completion
//! before the next command or task is handled.
//!
//! The scheduler holds at most one tick timer and one autosave timer.
//! Changing the tick mode always cancels the old tick timer first.

use crate::clock::TickMode;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};
use std::time::Duration;

/// Shortest period a repeating timer may have.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduledTask {
    Tick,
    Autosave,
}

/// A cancellable repeating-timer facility.
pub trait TimerService {
    /// Fire `task` every `every`, first firing one period from now.
    fn schedule_repeating(&mut self, every: Duration, task: ScheduledTask) -> TimerId;

    /// Stop a timer. Returns false if it was not active.
    fn cancel(&mut self, id: TimerId) -> bool;

    /// Let `elapsed` pass and return every task that came due, oldest first.
    fn advance(&mut self, elapsed: Duration) -> Vec<ScheduledTask>;
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    every: Duration,
    task:  ScheduledTask,
}

/// In-process timer wheel on a virtual clock.
/// Ordering: (due ASC, timer id ASC), so simultaneous firings come out
/// in registration order.
#[derive(Debug, Default)]
pub struct VirtualTimer {
    now:     Duration,
    next_id: u64,
    active:  HashMap<TimerId, TimerEntry>,
    queue:   BinaryHeap<Reverse<(Duration, TimerId)>>,
}

impl VirtualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time since the timer was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

impl TimerService for VirtualTimer {
    fn schedule_repeating(&mut self, every: Duration, task: ScheduledTask) -> TimerId {
        let every = every.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.active.insert(id, TimerEntry { every, task });
        self.queue.push(Reverse((self.now + every, id)));
        id
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        // The queued firing is dropped lazily when it surfaces.
        self.active.remove(&id).is_some()
    }

    fn advance(&mut self, elapsed: Duration) -> Vec<ScheduledTask> {
        let target = self.now.saturating_add(elapsed);
        let mut fired = Vec::new();

        while let Some(&Reverse((due, id))) = self.queue.peek() {
            if due > target {
                break;
            }
            self.queue.pop();
            let Some(entry) = self.active.get(&id).copied() else {
                continue;
            };
            self.now = due;
            fired.push(entry.task);
            self.queue.push(Reverse((due + entry.every, id)));
        }

        self.now = target;
        fired
    }
}

pub struct Scheduler<T: TimerService = VirtualTimer> {
    timer:           T,
    tick_every:      Duration,
    autosave_every:  Duration,
    tick_handle:     Option<TimerId>,
    autosave_handle: Option<TimerId>,
}

impl<T: TimerService> Scheduler<T> {
    pub fn new(timer: T, tick_every: Duration, autosave_every: Duration) -> Self {
        Self {
            timer,
            tick_every,
            autosave_every,
            tick_handle: None,
            autosave_handle: None,
        }
    }

    /// Cancel any running tick timer, then start one if `mode` is auto.
    pub fn set_mode(&mut self, mode: TickMode) {
        self.stop_ticking();
        if mode == TickMode::Auto {
            self.tick_handle = Some(
                self.timer
                    .schedule_repeating(self.tick_every, ScheduledTask::Tick),
            );
            log::debug!("scheduler: auto ticking every {:?}", self.tick_every);
        }
    }

    pub fn stop_ticking(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.timer.cancel(handle);
            log::debug!("scheduler: tick timer cancelled");
        }
    }

    /// (Re)start autosave. Any previous autosave timer is cancelled.
    pub fn start_autosave(&mut self) {
        self.stop_autosave();
        self.autosave_handle = Some(
            self.timer
                .schedule_repeating(self.autosave_every, ScheduledTask::Autosave),
        );
    }

    pub fn stop_autosave(&mut self) {
        if let Some(handle) = self.autosave_handle.take() {
            self.timer.cancel(handle);
        }
    }

    pub fn stop_all(&mut self) {
        self.stop_ticking();
        self.stop_autosave();
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_handle.is_some()
    }

    pub fn is_autosaving(&self) -> bool {
        self.autosave_handle.is_some()
    }

    pub fn tick_every(&self) -> Duration {
        self.tick_every
    }

    /// Let wall time pass; returns the tasks that came due.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ScheduledTask> {
        self.timer.advance(elapsed)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn repeating_timer_fires_once_per_period() {
        let mut timer = VirtualTimer::new();
        timer.schedule_repeating(ms(100), ScheduledTask::Tick);
        assert!(timer.advance(ms(99)).is_empty());
        assert_eq!(timer.advance(ms(1)), vec![ScheduledTask::Tick]);
        assert_eq!(timer.advance(ms(350)).len(), 3);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut timer = VirtualTimer::new();
        let id = timer.schedule_repeating(ms(10), ScheduledTask::Tick);
        assert!(timer.cancel(id));
        assert!(!timer.cancel(id));
        assert!(timer.advance(ms(1_000)).is_empty());
    }

    #[test]
    fn simultaneous_firings_keep_registration_order() {
        let mut timer = VirtualTimer::new();
        timer.schedule_repeating(ms(50), ScheduledTask::Autosave);
        timer.schedule_repeating(ms(50), ScheduledTask::Tick);
        assert_eq!(
            timer.advance(ms(50)),
            vec![ScheduledTask::Autosave, ScheduledTask::Tick]
        );
    }

    #[test]
    fn switching_modes_never_leaves_two_tick_timers() {
        let mut scheduler = Scheduler::new(VirtualTimer::new(), ms(100), ms(10_000));
        scheduler.set_mode(TickMode::Auto);
        scheduler.set_mode(TickMode::Auto);
        scheduler.set_mode(TickMode::Auto);
        assert_eq!(scheduler.timer().active_count(), 1);
        let fired = scheduler.advance(ms(100));
        assert_eq!(fired, vec![ScheduledTask::Tick]);

        scheduler.set_mode(TickMode::Manual);
        assert!(!scheduler.is_ticking());
        assert!(scheduler.advance(ms(1_000)).is_empty());
    }
}
