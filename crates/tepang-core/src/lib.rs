//! # Tepang Waktos Core Library
//!
//! Business logic for a Pomodoro timer with an ambient-music player and a
//! light/dark theme. Front-ends (the `tepang` CLI) are thin layers over it.
//!
//! ## Architecture
//!
//! - **Session Timer**: a tick-driven state machine; the caller delivers one
//!   `tick()` per second while it runs
//! - **Music Player**: one looping track at a time behind an audio capability
//! - **Theme**: a light/dark flag applied to a presentation root
//! - **Widget**: composes the above and owns the cancellable 1 Hz tasks
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: focus/break state machine
//! - [`MusicPlayer`]: single-track player
//! - [`Widget`]: controller wiring timer, player, theme and tasks together
//! - [`AudioBackend`]: trait for sound output
//! - [`Config`]: application configuration

pub mod assets;
pub mod audio;
pub mod display;
pub mod error;
pub mod events;
pub mod music;
pub mod storage;
pub mod theme;
pub mod ticker;
pub mod timer;
pub mod widget;

pub use assets::{picker_rng, AssetCatalog};
pub use audio::{AudioBackend, SilentBackend, TrackHandle};
#[cfg(feature = "rodio")]
pub use audio::RodioBackend;
pub use display::WidgetView;
pub use error::{AudioError, ConfigError, CoreError};
pub use events::Event;
pub use music::{MusicPlayer, MusicState};
pub use storage::Config;
pub use theme::{PresentationRoot, ThemeState};
pub use timer::{PhaseKind, SessionState, SessionTimer};
pub use widget::{Widget, WidgetMessage};
