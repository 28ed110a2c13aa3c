//! Light/dark theme and the palette each one maps to.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Whatever draws the widget. Receives the theme on every toggle.
pub trait PresentationRoot {
    fn apply_theme(&mut self, dark: bool);
}

/// Root that ignores theme changes, for headless use.
impl PresentationRoot for () {
    fn apply_theme(&mut self, _dark: bool) {}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeState {
    pub dark: bool,
}

impl ThemeState {
    pub fn new(dark: bool) -> Self {
        Self { dark }
    }

    pub fn toggle(&mut self, root: &mut dyn PresentationRoot) -> Event {
        self.dark = !self.dark;
        root.apply_theme(self.dark);
        tracing::info!(dark = self.dark, "theme toggled");
        Event::ThemeToggled {
            dark: self.dark,
            at: Utc::now(),
        }
    }

    pub fn palette(&self) -> &'static Palette {
        if self.dark {
            &DARK
        } else {
            &LIGHT
        }
    }
}

/// Gradient endpoints for the progress ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Ring {
    pub from: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub focus_ring: Ring,
    pub break_ring: Ring,
    pub focus_timer: &'static str,
    pub break_timer: &'static str,
    pub play_button: &'static str,
    pub stop_button: &'static str,
}

impl Palette {
    pub fn ring(&self, is_break: bool) -> Ring {
        if is_break {
            self.break_ring
        } else {
            self.focus_ring
        }
    }

    pub fn timer_text(&self, is_break: bool) -> &'static str {
        if is_break {
            self.break_timer
        } else {
            self.focus_timer
        }
    }
}

const BREAK_RING: Ring = Ring {
    from: "#34d399",
    to: "#06b6d4",
};

pub const LIGHT: Palette = Palette {
    background: "#e0f2fe",
    text: "#1e293b",
    muted_text: "#94a3b8",
    focus_ring: Ring {
        from: "#0ea5e9",
        to: "#60a5fa",
    },
    break_ring: BREAK_RING,
    focus_timer: "#3b82f6",
    break_timer: "#10b981",
    play_button: "#10b981",
    stop_button: "#f43f5e",
};

pub const DARK: Palette = Palette {
    background: "#020617",
    text: "#e5e7eb",
    muted_text: "#6b7280",
    focus_ring: Ring {
        from: "#a78bfa",
        to: "#4fd1c5",
    },
    break_ring: BREAK_RING,
    focus_timer: "#93c5fd",
    break_timer: "#6ee7b7",
    play_button: "#6ee7b7",
    stop_button: "#fda4af",
};

/// Parse `#rrggbb` into its components.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingRoot(Vec<bool>);

    impl PresentationRoot for RecordingRoot {
        fn apply_theme(&mut self, dark: bool) {
            self.0.push(dark);
        }
    }

    #[test]
    fn toggle_flips_and_applies() {
        let mut theme = ThemeState::default();
        let mut root = RecordingRoot::default();
        theme.toggle(&mut root);
        theme.toggle(&mut root);
        theme.toggle(&mut root);
        assert!(theme.dark);
        assert_eq!(root.0, vec![true, false, true]);
    }

    #[test]
    fn break_ring_shared_between_themes() {
        assert_eq!(LIGHT.ring(true), DARK.ring(true));
        assert_ne!(LIGHT.ring(false), DARK.ring(false));
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#0ea5e9"), Some((0x0e, 0xa5, 0xe9)));
        assert_eq!(hex_to_rgb("0ea5e9"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }
}
