//! Session timer state machine.
//!
//! The timer has no clock of its own. The caller delivers one `tick()` per
//! elapsed second while the timer is running; the widget controller does this
//! with a [`RepeatingTask`](crate::ticker::RepeatingTask).
//!
//! ## State Transitions
//!
//! ```text
//! Focus(running) --0--> ShortBreak | LongBreak (stopped)
//! Break(running) --0--> Focus (stopped)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut timer = SessionTimer::new();
//! timer.start();
//! // once per second:
//! if let Some(event) = timer.tick() {
//!     // phase completed, play a notification
//! }
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::phase::{is_long_break_after, PhaseKind, FOCUS_SECS, LONG_BREAK_SECS, SHORT_BREAK_SECS};
use crate::events::Event;

/// Observable timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub remaining_secs: u32,
    pub is_running: bool,
    pub is_break: bool,
    pub completed_pomodoros: u32,
}

impl SessionState {
    pub fn phase(&self) -> PhaseKind {
        PhaseKind::derive(self.is_break, self.completed_pomodoros)
    }

    /// Full length of the current phase.
    pub fn phase_duration_secs(&self) -> u32 {
        self.phase().duration_secs()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            remaining_secs: FOCUS_SECS,
            is_running: false,
            is_break: false,
            completed_pomodoros: 0,
        }
    }
}

/// Core session timer.
#[derive(Debug, Clone, Default)]
pub struct SessionTimer {
    state: SessionState,
}

impl SessionTimer {
    /// Fresh timer: focus phase, 25:00, stopped, nothing completed.
    pub fn new() -> Self {
        Self::default()
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.state.remaining_secs
    }

    pub fn phase(&self) -> PhaseKind {
        self.state.phase()
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.is_running || self.state.remaining_secs == 0 {
            return None;
        }
        self.state.is_running = true;
        Some(Event::TimerStarted {
            phase: self.phase(),
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.state.is_running = false;
        Some(Event::TimerPaused {
            remaining_secs: self.state.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Start/pause button.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.state.is_running {
            self.pause()
        } else {
            self.start()
        }
    }

    pub fn reset(&mut self) -> Event {
        self.state = SessionState::default();
        Event::TimerReset { at: Utc::now() }
    }

    /// Advance one second. Returns `Some(Event::PhaseCompleted)` when the
    /// countdown reached zero and the next phase has been loaded.
    ///
    /// Ticks while stopped are ignored.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.is_running {
            return None;
        }
        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs == 0 {
            return Some(self.complete_phase());
        }
        None
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Runs exactly once per phase, in the same call as the tick that hit 0.
    fn complete_phase(&mut self) -> Event {
        // Stopped before anything else changes.
        self.state.is_running = false;
        let finished = self.phase();

        if self.state.is_break {
            self.state.is_break = false;
            self.state.remaining_secs = FOCUS_SECS;
        } else {
            self.state.completed_pomodoros += 1;
            self.state.is_break = true;
            self.state.remaining_secs = if is_long_break_after(self.state.completed_pomodoros) {
                LONG_BREAK_SECS
            } else {
                SHORT_BREAK_SECS
            };
        }

        Event::PhaseCompleted {
            finished,
            next: self.phase(),
            next_duration_secs: self.state.remaining_secs,
            completed_pomodoros: self.state.completed_pomodoros,
            at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_phase(timer: &mut SessionTimer) -> Event {
        timer.start();
        loop {
            if let Some(event) = timer.tick() {
                return event;
            }
        }
    }

    #[test]
    fn starting_state() {
        let timer = SessionTimer::new();
        assert_eq!(timer.remaining_secs(), 1500);
        assert!(!timer.is_running());
        assert!(!timer.state().is_break);
        assert_eq!(timer.state().completed_pomodoros, 0);
        assert_eq!(timer.phase(), PhaseKind::Focus);
    }

    #[test]
    fn start_pause_toggle() {
        let mut timer = SessionTimer::new();
        assert!(timer.start().is_some());
        assert!(timer.is_running());
        assert!(timer.start().is_none());

        assert!(timer.pause().is_some());
        assert!(!timer.is_running());
        assert!(timer.pause().is_none());

        assert!(matches!(timer.toggle(), Some(Event::TimerStarted { .. })));
        assert!(matches!(timer.toggle(), Some(Event::TimerPaused { .. })));
    }

    #[test]
    fn tick_ignored_while_stopped() {
        let mut timer = SessionTimer::new();
        assert!(timer.tick().is_none());
        assert_eq!(timer.remaining_secs(), 1500);
    }

    #[test]
    fn pause_freezes_countdown() {
        let mut timer = SessionTimer::new();
        timer.start();
        for _ in 0..100 {
            timer.tick();
        }
        timer.pause();
        assert_eq!(timer.remaining_secs(), 1400);
        for _ in 0..50 {
            timer.tick();
        }
        assert_eq!(timer.remaining_secs(), 1400);
        timer.start();
        timer.tick();
        assert_eq!(timer.remaining_secs(), 1399);
    }

    #[test]
    fn full_focus_phase_opens_short_break() {
        let mut timer = SessionTimer::new();
        timer.start();
        let mut completion = None;
        for _ in 0..1500 {
            if let Some(event) = timer.tick() {
                completion = Some(event);
            }
        }
        let state = timer.state();
        assert!(state.is_break);
        assert_eq!(state.remaining_secs, 300);
        assert_eq!(state.completed_pomodoros, 1);
        assert!(!state.is_running);
        match completion {
            Some(Event::PhaseCompleted { finished, next, next_duration_secs, .. }) => {
                assert_eq!(finished, PhaseKind::Focus);
                assert_eq!(next, PhaseKind::ShortBreak);
                assert_eq!(next_duration_secs, 300);
            }
            other => panic!("Expected PhaseCompleted, got {other:?}"),
        }
    }

    #[test]
    fn fourth_focus_phase_opens_long_break() {
        let mut timer = SessionTimer::new();
        for n in 1..=4 {
            run_phase(&mut timer); // focus
            if n < 4 {
                assert_eq!(timer.remaining_secs(), 300);
                run_phase(&mut timer); // break
                assert_eq!(timer.phase(), PhaseKind::Focus);
            }
        }
        assert_eq!(timer.state().completed_pomodoros, 4);
        assert_eq!(timer.phase(), PhaseKind::LongBreak);
        assert_eq!(timer.remaining_secs(), 900);
    }

    #[test]
    fn break_completion_returns_to_focus() {
        let mut timer = SessionTimer::new();
        run_phase(&mut timer);
        let event = run_phase(&mut timer);
        assert!(matches!(
            event,
            Event::PhaseCompleted { finished: PhaseKind::ShortBreak, next: PhaseKind::Focus, .. }
        ));
        assert_eq!(timer.remaining_secs(), 1500);
        assert_eq!(timer.state().completed_pomodoros, 1);
        assert!(!timer.is_running());
    }

    #[test]
    fn never_running_at_zero() {
        let mut timer = SessionTimer::new();
        timer.start();
        for _ in 0..5000 {
            timer.tick();
            let s = timer.state();
            assert!(!(s.is_running && s.remaining_secs == 0));
            if !s.is_running {
                timer.start();
            }
        }
    }

    #[test]
    fn reset_restores_defaults() {
        let mut timer = SessionTimer::new();
        run_phase(&mut timer);
        timer.start();
        timer.tick();
        timer.reset();
        assert_eq!(*timer.state(), SessionState::default());
    }
}
