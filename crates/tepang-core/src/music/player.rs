//! Ambient music player.
//!
//! Holds at most one track handle. Starting a track stops and drops the
//! previous handle before the new one is requested from the backend.

use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioBackend, TrackHandle};
use crate::events::Event;

/// Observable player state (the handle itself stays private).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MusicState {
    pub is_playing: bool,
    pub current_track: Option<PathBuf>,
    pub position_secs: f64,
    pub duration_secs: f64,
}

pub struct MusicPlayer<H: TrackHandle> {
    handle: Option<H>,
    state: MusicState,
}

impl<H: TrackHandle> Default for MusicPlayer<H> {
    fn default() -> Self {
        Self {
            handle: None,
            state: MusicState::default(),
        }
    }
}

impl<H: TrackHandle> MusicPlayer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &MusicState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Whether a backend track is actually loaded.
    pub fn has_track(&self) -> bool {
        self.handle.is_some()
    }

    /// Replace whatever is playing with `track`, looped.
    ///
    /// Playback failures are logged. The player still reports itself as
    /// playing afterwards.
    pub fn play<B>(&mut self, backend: &mut B, track: &Path) -> Event
    where
        B: AudioBackend<Track = H>,
    {
        self.release();

        match backend.play_looped(track) {
            Ok(handle) => {
                tracing::info!(track = %track.display(), "music started");
                self.state.duration_secs = handle.duration_secs().unwrap_or(0.0);
                self.handle = Some(handle);
            }
            Err(e) => {
                tracing::warn!(track = %track.display(), error = %e, "failed to play music");
                self.state.duration_secs = 0.0;
            }
        }
        self.state.is_playing = true;
        self.state.current_track = Some(track.to_path_buf());
        self.state.position_secs = 0.0;

        Event::MusicStarted {
            track: track.to_path_buf(),
            at: Utc::now(),
        }
    }

    /// No-op when nothing is playing.
    pub fn stop(&mut self) -> Option<Event> {
        if !self.state.is_playing {
            return None;
        }
        self.release();
        self.state = MusicState::default();
        tracing::info!("music stopped");
        Some(Event::MusicStopped { at: Utc::now() })
    }

    /// Once-per-second position refresh.
    pub fn poll(&mut self) {
        if !self.state.is_playing {
            self.state.position_secs = 0.0;
            self.state.duration_secs = 0.0;
            return;
        }
        if let Some(handle) = &self.handle {
            self.state.position_secs = handle.position_secs();
            if let Some(duration) = handle.duration_secs() {
                self.state.duration_secs = duration;
            }
        }
    }

    fn release(&mut self) {
        if let Some(mut handle) = self.handle.take() {
            handle.stop();
        }
    }
}

impl<H: TrackHandle> Drop for MusicPlayer<H> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::error::AudioError;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Backend that counts live tracks and records every request.
    #[derive(Default, Clone)]
    pub(crate) struct FakeBackend {
        pub active: Rc<Cell<usize>>,
        pub peak: Rc<Cell<usize>>,
        pub sounds: Rc<RefCell<Vec<PathBuf>>>,
        pub fail: Rc<Cell<bool>>,
        pub position: Rc<Cell<f64>>,
        pub duration: Rc<Cell<Option<f64>>>,
    }

    pub(crate) struct FakeTrack {
        active: Rc<Cell<usize>>,
        position: Rc<Cell<f64>>,
        duration: Rc<Cell<Option<f64>>>,
        live: bool,
    }

    impl TrackHandle for FakeTrack {
        fn position_secs(&self) -> f64 {
            crate::audio::loop_position(self.position.get(), self.duration.get())
        }

        fn duration_secs(&self) -> Option<f64> {
            self.duration.get()
        }

        fn stop(&mut self) {
            if self.live {
                self.live = false;
                self.active.set(self.active.get() - 1);
            }
        }
    }

    impl Drop for FakeTrack {
        fn drop(&mut self) {
            self.stop();
        }
    }

    impl AudioBackend for FakeBackend {
        type Track = FakeTrack;

        fn play_once(&mut self, path: &Path) -> Result<(), AudioError> {
            self.sounds.borrow_mut().push(path.to_path_buf());
            if self.fail.get() {
                return Err(AudioError::Unavailable("blocked".into()));
            }
            Ok(())
        }

        fn play_looped(&mut self, path: &Path) -> Result<FakeTrack, AudioError> {
            if self.fail.get() {
                return Err(AudioError::Decode {
                    path: path.to_path_buf(),
                    message: "bad data".into(),
                });
            }
            self.active.set(self.active.get() + 1);
            self.peak.set(self.peak.get().max(self.active.get()));
            Ok(FakeTrack {
                active: Rc::clone(&self.active),
                position: Rc::clone(&self.position),
                duration: Rc::clone(&self.duration),
                live: true,
            })
        }
    }

    #[test]
    fn second_play_supersedes_first() {
        let mut backend = FakeBackend::default();
        let mut player = MusicPlayer::new();
        player.play(&mut backend, Path::new("a.mp3"));
        player.play(&mut backend, Path::new("b.mp3"));
        assert_eq!(backend.active.get(), 1);
        assert_eq!(backend.peak.get(), 1);
        assert_eq!(player.state().current_track.as_deref(), Some(Path::new("b.mp3")));
    }

    #[test]
    fn stop_releases_track() {
        let mut backend = FakeBackend::default();
        let mut player = MusicPlayer::new();
        player.play(&mut backend, Path::new("a.mp3"));
        assert!(player.stop().is_some());
        assert_eq!(backend.active.get(), 0);
        assert_eq!(*player.state(), MusicState::default());
    }

    #[test]
    fn stop_when_idle_is_noop() {
        let mut player: MusicPlayer<FakeTrack> = MusicPlayer::new();
        assert!(player.stop().is_none());
        assert_eq!(*player.state(), MusicState::default());
    }

    #[test]
    fn failed_play_stays_optimistic() {
        let mut backend = FakeBackend::default();
        backend.fail.set(true);
        let mut player = MusicPlayer::new();
        player.play(&mut backend, Path::new("a.mp3"));
        assert!(player.is_playing());
        assert!(!player.has_track());
        player.poll();
        assert_eq!(player.state().position_secs, 0.0);
    }

    #[test]
    fn poll_tracks_position_and_late_duration() {
        let mut backend = FakeBackend::default();
        let mut player = MusicPlayer::new();
        player.play(&mut backend, Path::new("a.mp3"));
        assert_eq!(player.state().duration_secs, 0.0);

        backend.position.set(12.5);
        backend.duration.set(Some(200.0));
        player.poll();
        assert_eq!(player.state().position_secs, 12.5);
        assert_eq!(player.state().duration_secs, 200.0);
    }

    #[test]
    fn position_wraps_after_duration_arrives() {
        let mut backend = FakeBackend::default();
        let mut player = MusicPlayer::new();
        player.play(&mut backend, Path::new("a.mp3"));

        backend.position.set(250.0);
        player.poll();
        assert_eq!(player.state().position_secs, 250.0);
        assert_eq!(player.state().duration_secs, 0.0);

        // Length measured in the background after several polls.
        backend.duration.set(Some(200.0));
        player.poll();
        assert_eq!(player.state().duration_secs, 200.0);
        assert_eq!(player.state().position_secs, 50.0);

        backend.position.set(410.0);
        player.poll();
        assert_eq!(player.state().position_secs, 10.0);
    }

    #[test]
    fn drop_releases_track() {
        let mut backend = FakeBackend::default();
        {
            let mut player = MusicPlayer::new();
            player.play(&mut backend, Path::new("a.mp3"));
        }
        assert_eq!(backend.active.get(), 0);
    }
}
