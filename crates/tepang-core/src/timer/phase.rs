use serde::{Deserialize, Serialize};

/// Focus interval length in seconds (25:00).
pub const FOCUS_SECS: u32 = 25 * 60;
/// Short break length in seconds (5:00).
pub const SHORT_BREAK_SECS: u32 = 5 * 60;
/// Long break length in seconds (15:00).
pub const LONG_BREAK_SECS: u32 = 15 * 60;
/// Every n-th completed focus phase is followed by a long break.
pub const SESSIONS_PER_LONG_BREAK: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl PhaseKind {
    /// Phase derived from the break flag and the completed-session count.
    ///
    /// The count is the one *after* the increment that opened the break, so
    /// a break that follows the 4th, 8th, ... session is long.
    pub fn derive(is_break: bool, completed_pomodoros: u32) -> Self {
        if !is_break {
            PhaseKind::Focus
        } else if is_long_break_after(completed_pomodoros) {
            PhaseKind::LongBreak
        } else {
            PhaseKind::ShortBreak
        }
    }

    pub fn duration_secs(self) -> u32 {
        match self {
            PhaseKind::Focus => FOCUS_SECS,
            PhaseKind::ShortBreak => SHORT_BREAK_SECS,
            PhaseKind::LongBreak => LONG_BREAK_SECS,
        }
    }
}

/// Whether the break opened by completing session number `completed` is long.
pub fn is_long_break_after(completed: u32) -> bool {
    completed > 0 && completed % SESSIONS_PER_LONG_BREAK == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_regardless_of_count() {
        assert_eq!(PhaseKind::derive(false, 0), PhaseKind::Focus);
        assert_eq!(PhaseKind::derive(false, 4), PhaseKind::Focus);
    }

    #[test]
    fn every_fourth_break_is_long() {
        assert_eq!(PhaseKind::derive(true, 1), PhaseKind::ShortBreak);
        assert_eq!(PhaseKind::derive(true, 3), PhaseKind::ShortBreak);
        assert_eq!(PhaseKind::derive(true, 4), PhaseKind::LongBreak);
        assert_eq!(PhaseKind::derive(true, 5), PhaseKind::ShortBreak);
        assert_eq!(PhaseKind::derive(true, 8), PhaseKind::LongBreak);
    }

    #[test]
    fn durations() {
        assert_eq!(PhaseKind::Focus.duration_secs(), 1500);
        assert_eq!(PhaseKind::ShortBreak.duration_secs(), 300);
        assert_eq!(PhaseKind::LongBreak.duration_secs(), 900);
    }
}
