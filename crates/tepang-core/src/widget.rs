//! Widget controller.
//!
//! Composes the session timer, the music player and the theme, and keeps one
//! repeating task per running subsystem: a 1 Hz tick while the timer runs and
//! a 1 Hz position poll while music plays. Tasks post [`WidgetMessage`]s onto
//! the channel handed to [`Widget::new`]; the owner feeds them back through
//! [`Widget::handle`].
//!
//! Every command reconciles the tasks before returning, so a task exists
//! exactly when its owning flag is set.

use std::time::Duration;

use rand::RngCore;
use tokio::sync::mpsc::UnboundedSender;

use crate::assets::AssetCatalog;
use crate::audio::{play_notification, AudioBackend};
use crate::display::{widget_view, WidgetView};
use crate::events::Event;
use crate::music::{MusicPlayer, MusicState};
use crate::theme::{PresentationRoot, ThemeState};
use crate::ticker::{Generation, TaskSlot};
use crate::timer::{SessionState, SessionTimer};

pub const TICK_PERIOD: Duration = Duration::from_secs(1);
pub const POLL_PERIOD: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetMessage {
    TimerTick(Generation),
    MusicPoll(Generation),
}

pub struct Widget<B: AudioBackend> {
    backend: B,
    catalog: AssetCatalog,
    rng: Box<dyn RngCore>,
    timer: SessionTimer,
    player: MusicPlayer<B::Track>,
    theme: ThemeState,
    tick_task: TaskSlot,
    poll_task: TaskSlot,
    tx: UnboundedSender<WidgetMessage>,
}

impl<B: AudioBackend> Widget<B> {
    pub fn new(
        backend: B,
        catalog: AssetCatalog,
        rng: Box<dyn RngCore>,
        theme: ThemeState,
        tx: UnboundedSender<WidgetMessage>,
    ) -> Self {
        Self {
            backend,
            catalog,
            rng,
            timer: SessionTimer::new(),
            player: MusicPlayer::new(),
            theme,
            tick_task: TaskSlot::default(),
            poll_task: TaskSlot::default(),
            tx,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session(&self) -> &SessionState {
        self.timer.state()
    }

    pub fn music(&self) -> &MusicState {
        self.player.state()
    }

    pub fn theme(&self) -> ThemeState {
        self.theme
    }

    pub fn is_ticking(&self) -> bool {
        self.tick_task.is_active()
    }

    pub fn is_polling(&self) -> bool {
        self.poll_task.is_active()
    }

    pub fn view(&self) -> WidgetView {
        widget_view(self.timer.state(), self.player.state(), &self.theme)
    }

    // ── Timer commands ───────────────────────────────────────────────

    pub fn start(&mut self) -> Vec<Event> {
        let events = self.timer.start().into_iter().collect();
        self.reconcile();
        events
    }

    pub fn pause(&mut self) -> Vec<Event> {
        let events = self.timer.pause().into_iter().collect();
        self.reconcile();
        events
    }

    pub fn toggle_timer(&mut self) -> Vec<Event> {
        let events = self.timer.toggle().into_iter().collect();
        self.reconcile();
        events
    }

    /// Back to the first focus session. Also stops the music.
    pub fn reset(&mut self) -> Vec<Event> {
        let mut events = vec![self.timer.reset()];
        events.extend(self.player.stop());
        tracing::info!("timer reset");
        self.reconcile();
        events
    }

    // ── Music commands ───────────────────────────────────────────────

    pub fn play_music(&mut self) -> Vec<Event> {
        let Some(track) = self.catalog.pick_track(&mut self.rng) else {
            tracing::warn!("no music tracks configured");
            return Vec::new();
        };
        let event = self.player.play(&mut self.backend, &track);
        self.reconcile();
        vec![event]
    }

    pub fn stop_music(&mut self) -> Vec<Event> {
        let events = self.player.stop().into_iter().collect();
        self.reconcile();
        events
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn toggle_theme(&mut self, root: &mut dyn PresentationRoot) -> Vec<Event> {
        vec![self.theme.toggle(root)]
    }

    // ── Task messages ────────────────────────────────────────────────

    /// Apply a message posted by one of the repeating tasks. Messages from a
    /// task that has been cancelled in the meantime are dropped.
    pub fn handle(&mut self, message: WidgetMessage) -> Vec<Event> {
        match message {
            WidgetMessage::TimerTick(generation) => {
                if !self.tick_task.is_current(generation) {
                    tracing::debug!(generation, "stale timer tick");
                    return Vec::new();
                }
                let completed = self.timer.tick();
                tracing::debug!(remaining = self.timer.remaining_secs(), "tick");
                let events: Vec<Event> = completed.into_iter().collect();
                if let Some(Event::PhaseCompleted { finished, next, completed_pomodoros, .. }) =
                    events.first()
                {
                    tracing::info!(?finished, ?next, completed_pomodoros, "phase completed");
                    self.notify();
                }
                self.reconcile();
                events
            }
            WidgetMessage::MusicPoll(generation) => {
                if !self.poll_task.is_current(generation) {
                    tracing::debug!(generation, "stale music poll");
                    return Vec::new();
                }
                self.player.poll();
                Vec::new()
            }
        }
    }

    /// Cancel both tasks and release the audio track.
    pub fn shutdown(&mut self) {
        self.timer.pause();
        self.player.stop();
        self.reconcile();
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Fire-and-forget; the outcome only reaches the log.
    fn notify(&mut self) {
        match self.catalog.pick_notification(&mut self.rng) {
            Some(sound) => play_notification(&mut self.backend, &sound),
            None => tracing::warn!("no notification sounds configured"),
        }
    }

    fn reconcile(&mut self) {
        if self.timer.is_running() {
            self.tick_task.ensure(TICK_PERIOD, &self.tx, WidgetMessage::TimerTick);
        } else {
            self.tick_task.cancel();
        }

        if self.player.is_playing() {
            self.poll_task.ensure(POLL_PERIOD, &self.tx, WidgetMessage::MusicPoll);
        } else {
            self.poll_task.cancel();
            self.player.poll();
        }
    }
}

impl<B: AudioBackend> Drop for Widget<B> {
    fn drop(&mut self) {
        self.tick_task.cancel();
        self.poll_task.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::picker_rng;
    use crate::music::FakeBackend;
    use crate::timer::PhaseKind;
    use tokio::sync::mpsc::{self, UnboundedReceiver};

    fn widget() -> (Widget<FakeBackend>, UnboundedReceiver<WidgetMessage>, FakeBackend) {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = FakeBackend::default();
        let widget = Widget::new(
            backend.clone(),
            AssetCatalog::default(),
            Box::new(picker_rng(Some(9))),
            ThemeState::default(),
            tx,
        );
        (widget, rx, backend)
    }

    /// Let paused time run for `secs` and deliver whatever the tasks posted.
    /// Call right after starting a task; the extra half second keeps the
    /// wake-up clear of tick instants.
    async fn run_for(
        widget: &mut Widget<FakeBackend>,
        rx: &mut UnboundedReceiver<WidgetMessage>,
        secs: u64,
    ) -> Vec<Event> {
        tokio::time::sleep(Duration::from_secs(secs) + Duration::from_millis(500)).await;
        let mut events = Vec::new();
        while let Ok(message) = rx.try_recv() {
            events.extend(widget.handle(message));
        }
        events
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_only_while_running() {
        let (mut widget, _rx, _) = widget();
        assert!(!widget.is_ticking());
        widget.start();
        assert!(widget.is_ticking());
        widget.pause();
        assert!(!widget.is_ticking());
    }

    #[tokio::test(start_paused = true)]
    async fn focus_phase_runs_to_short_break() {
        let (mut widget, mut rx, backend) = widget();
        widget.start();
        let events = run_for(&mut widget, &mut rx, 1500).await;

        let session = widget.session();
        assert!(session.is_break);
        assert_eq!(session.remaining_secs, 300);
        assert_eq!(session.completed_pomodoros, 1);
        assert!(!session.is_running);
        assert!(!widget.is_ticking());

        let completions = events
            .iter()
            .filter(|e| matches!(e, Event::PhaseCompleted { .. }))
            .count();
        assert_eq!(completions, 1);
        assert_eq!(backend.sounds.borrow().len(), 1);
        assert!(AssetCatalog::default()
            .notification_sounds()
            .contains(&backend.sounds.borrow()[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_remaining() {
        let (mut widget, mut rx, _) = widget();
        widget.start();
        run_for(&mut widget, &mut rx, 10).await;
        widget.pause();
        let frozen = widget.session().remaining_secs;
        assert_eq!(frozen, 1490);

        run_for(&mut widget, &mut rx, 10).await;
        assert_eq!(widget.session().remaining_secs, frozen);

        widget.start();
        run_for(&mut widget, &mut rx, 5).await;
        assert_eq!(widget.session().remaining_secs, frozen - 5);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_tick_is_ignored() {
        let (mut widget, mut rx, _) = widget();
        widget.start();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        // A tick is queued but not yet delivered when the timer pauses.
        widget.pause();
        widget.start();
        while let Ok(message) = rx.try_recv() {
            widget.handle(message);
        }
        assert_eq!(widget.session().remaining_secs, 1500);
    }

    #[tokio::test(start_paused = true)]
    async fn notification_failure_does_not_block_transition() {
        let (mut widget, mut rx, backend) = widget();
        backend.fail.set(true);
        widget.start();
        run_for(&mut widget, &mut rx, 1500).await;
        assert_eq!(widget.session().phase(), PhaseKind::ShortBreak);
        assert_eq!(backend.sounds.borrow().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_music() {
        let (mut widget, mut rx, backend) = widget();
        widget.start();
        widget.play_music();
        run_for(&mut widget, &mut rx, 3).await;
        assert!(widget.is_polling());

        let events = widget.reset();
        assert!(matches!(events[0], Event::TimerReset { .. }));
        assert!(matches!(events[1], Event::MusicStopped { .. }));
        assert_eq!(*widget.session(), SessionState::default());
        assert!(!widget.music().is_playing);
        assert_eq!(backend.active.get(), 0);
        assert!(!widget.is_ticking());
        assert!(!widget.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn play_twice_keeps_one_track() {
        let (mut widget, _rx, backend) = widget();
        widget.play_music();
        widget.play_music();
        assert_eq!(backend.active.get(), 1);
        assert_eq!(backend.peak.get(), 1);
        assert!(widget.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn poll_updates_position() {
        let (mut widget, mut rx, backend) = widget();
        widget.play_music();
        backend.position.set(42.0);
        backend.duration.set(Some(180.0));
        run_for(&mut widget, &mut rx, 1).await;
        assert_eq!(widget.music().position_secs, 42.0);
        assert_eq!(widget.music().duration_secs, 180.0);
        assert_eq!(widget.view().music.readout.as_deref(), Some("00:42 / 03:00"));

        widget.stop_music();
        assert_eq!(widget.music().position_secs, 0.0);
        assert!(!widget.is_polling());
    }

    #[tokio::test(start_paused = true)]
    async fn stop_music_when_idle_is_noop() {
        let (mut widget, _rx, _) = widget();
        assert!(widget.stop_music().is_empty());
        assert_eq!(*widget.music(), MusicState::default());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_track_list_plays_nothing() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut widget = Widget::new(
            FakeBackend::default(),
            AssetCatalog::new(".", vec![], vec![]),
            Box::new(picker_rng(Some(1))),
            ThemeState::default(),
            tx,
        );
        assert!(widget.play_music().is_empty());
        assert!(!widget.music().is_playing);
    }

    #[tokio::test(start_paused = true)]
    async fn theme_toggle_leaves_timer_alone() {
        let (mut widget, _rx, _) = widget();
        widget.start();
        widget.toggle_theme(&mut ());
        assert!(widget.theme().dark);
        assert!(widget.session().is_running);
        assert!(widget.view().dark);
    }
}
