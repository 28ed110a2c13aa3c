mod engine;
mod phase;

pub use engine::{SessionState, SessionTimer};
pub use phase::{
    is_long_break_after, PhaseKind, FOCUS_SECS, LONG_BREAK_SECS, SESSIONS_PER_LONG_BREAK,
    SHORT_BREAK_SECS,
};
