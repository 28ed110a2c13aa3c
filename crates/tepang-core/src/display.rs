//! Display values derived from widget state.
//!
//! Everything here is a pure function of the session, music and theme
//! state; front-ends only lay the strings out.

use serde::Serialize;

use crate::music::MusicState;
use crate::theme::{Ring, ThemeState};
use crate::timer::{SessionState, SESSIONS_PER_LONG_BREAK};

pub const TITLE: &str = "Tepang Waktos";

/// Remaining seconds at or below which the clock pulses.
pub const LOW_TIME_SECS: u32 = 10;

/// `MM:SS`, zero padded. Fractions of a second are dropped.
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

pub fn mode_label(state: &SessionState) -> &'static str {
    if state.is_break {
        "Break"
    } else {
        "Focus"
    }
}

pub fn session_label(state: &SessionState) -> String {
    format!(
        "Session {}/{}",
        state.completed_pomodoros + 1,
        SESSIONS_PER_LONG_BREAK
    )
}

pub fn is_time_low(state: &SessionState) -> bool {
    state.remaining_secs > 0 && state.remaining_secs <= LOW_TIME_SECS
}

/// Remaining share of the current phase: 1.0 full, 0.0 empty.
pub fn progress(state: &SessionState) -> f64 {
    let total = state.phase_duration_secs();
    if total == 0 {
        return 0.0;
    }
    (state.remaining_secs as f64 / total as f64).clamp(0.0, 1.0)
}

pub fn progress_degrees(state: &SessionState) -> f64 {
    progress(state) * 360.0
}

pub fn start_label(state: &SessionState) -> &'static str {
    if state.is_running {
        "Pause"
    } else {
        "Start"
    }
}

/// Music panel contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicView {
    pub playing: bool,
    /// Spinning-disc indicator.
    pub spinning: bool,
    pub can_play: bool,
    pub can_stop: bool,
    /// `"MM:SS / MM:SS"` while playing, duration left out until known.
    pub readout: Option<String>,
}

pub fn music_view(music: &MusicState) -> MusicView {
    let readout = music.is_playing.then(|| {
        if music.duration_secs > 0.0 {
            format!(
                "{} / {}",
                format_clock(music.position_secs),
                format_clock(music.duration_secs)
            )
        } else {
            format_clock(music.position_secs)
        }
    });
    MusicView {
        playing: music.is_playing,
        spinning: music.is_playing,
        can_play: !music.is_playing,
        can_stop: music.is_playing,
        readout,
    }
}

/// Everything a front-end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WidgetView {
    pub title: &'static str,
    pub dark: bool,
    /// `"sun"` in dark mode (switch to light), `"moon"` otherwise.
    pub theme_icon: &'static str,
    pub mode: &'static str,
    pub session: String,
    pub clock: String,
    pub time_low: bool,
    pub progress: f64,
    pub progress_degrees: f64,
    pub ring: Ring,
    pub timer_color: &'static str,
    pub start_label: &'static str,
    pub music: MusicView,
}

pub fn widget_view(session: &SessionState, music: &MusicState, theme: &ThemeState) -> WidgetView {
    let palette = theme.palette();
    WidgetView {
        title: TITLE,
        dark: theme.dark,
        theme_icon: if theme.dark { "sun" } else { "moon" },
        mode: mode_label(session),
        session: session_label(session),
        clock: format_clock(session.remaining_secs as f64),
        time_low: is_time_low(session),
        progress: progress(session),
        progress_degrees: progress_degrees(session),
        ring: palette.ring(session.is_break),
        timer_color: palette.timer_text(session.is_break),
        start_label: start_label(session),
        music: music_view(music),
    }
}
