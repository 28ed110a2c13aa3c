//! Audio playback capability.
//!
//! The state machines never talk to a sound device directly. They go through
//! [`AudioBackend`], and whatever it returns is only logged.

mod silent;
#[cfg(feature = "rodio")]
mod rodio_backend;

use std::path::Path;

use crate::error::AudioError;

pub use silent::{SilentBackend, SilentTrack};
#[cfg(feature = "rodio")]
pub use rodio_backend::{RodioBackend, RodioTrack};

/// A looping track that is currently loaded.
pub trait TrackHandle {
    /// Playback position within the track, in seconds.
    fn position_secs(&self) -> f64;

    /// Track length in seconds, once the metadata is known.
    fn duration_secs(&self) -> Option<f64>;

    /// Stop output. Dropping the handle must have the same effect.
    fn stop(&mut self);
}

pub trait AudioBackend {
    type Track: TrackHandle;

    /// Play a short sound once, fire-and-forget.
    fn play_once(&mut self, path: &Path) -> Result<(), AudioError>;

    /// Start looping a track until the returned handle is stopped or dropped.
    fn play_looped(&mut self, path: &Path) -> Result<Self::Track, AudioError>;
}

/// Position within the current pass of a repeating track.
///
/// `elapsed_secs` counts across passes; until the length is known it is
/// returned unchanged.
pub fn loop_position(elapsed_secs: f64, duration_secs: Option<f64>) -> f64 {
    match duration_secs {
        Some(len) if len > 0.0 => elapsed_secs % len,
        _ => elapsed_secs,
    }
}

/// Play a notification sound, routing a failure to the log.
pub fn play_notification<B: AudioBackend>(backend: &mut B, path: &Path) {
    match backend.play_once(path) {
        Ok(()) => tracing::debug!(path = %path.display(), "notification sound started"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "notification sound failed"),
    }
}
