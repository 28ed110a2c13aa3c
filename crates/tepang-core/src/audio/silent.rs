use std::path::Path;
use std::time::Instant;

use super::{AudioBackend, TrackHandle};
use crate::error::AudioError;

/// Backend without an output device.
///
/// Tracks advance on the wall clock so the position readout still moves.
#[derive(Debug, Default)]
pub struct SilentBackend;

impl SilentBackend {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug)]
pub struct SilentTrack {
    started: Instant,
    stopped_at: Option<f64>,
}

impl TrackHandle for SilentTrack {
    fn position_secs(&self) -> f64 {
        self.stopped_at
            .unwrap_or_else(|| self.started.elapsed().as_secs_f64())
    }

    fn duration_secs(&self) -> Option<f64> {
        None
    }

    fn stop(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(self.started.elapsed().as_secs_f64());
        }
    }
}

impl AudioBackend for SilentBackend {
    type Track = SilentTrack;

    fn play_once(&mut self, path: &Path) -> Result<(), AudioError> {
        tracing::debug!(path = %path.display(), "audio disabled, skipping sound");
        Ok(())
    }

    fn play_looped(&mut self, path: &Path) -> Result<SilentTrack, AudioError> {
        tracing::debug!(path = %path.display(), "audio disabled, simulating track");
        Ok(SilentTrack {
            started: Instant::now(),
            stopped_at: None,
        })
    }
}
