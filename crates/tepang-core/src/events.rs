use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::PhaseKind;

/// Every state change in the widget produces an Event.
/// The front-end logs them; tests assert on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        phase: PhaseKind,
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u32,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// A phase ran down to zero and the next one was loaded.
    PhaseCompleted {
        finished: PhaseKind,
        next: PhaseKind,
        next_duration_secs: u32,
        completed_pomodoros: u32,
        at: DateTime<Utc>,
    },
    MusicStarted {
        track: PathBuf,
        at: DateTime<Utc>,
    },
    MusicStopped {
        at: DateTime<Utc>,
    },
    ThemeToggled {
        dark: bool,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Snake-case name of the variant, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::TimerReset { .. } => "timer_reset",
            Event::PhaseCompleted { .. } => "phase_completed",
            Event::MusicStarted { .. } => "music_started",
            Event::MusicStopped { .. } => "music_stopped",
            Event::ThemeToggled { .. } => "theme_toggled",
        }
    }
}
