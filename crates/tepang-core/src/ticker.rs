//! Cancellable repeating tasks.
//!
//! A [`RepeatingTask`] posts the same message onto a channel once per period
//! until it is cancelled or dropped. Messages carry the task's generation so
//! the receiver can tell a live task's ticks from ones queued by a task that
//! has since been cancelled.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

pub type Generation = u64;

#[derive(Debug)]
pub struct RepeatingTask {
    generation: Generation,
    handle: JoinHandle<()>,
}

impl RepeatingTask {
    /// Spawn on the current tokio runtime. The first message arrives one
    /// full `period` after spawning.
    pub fn spawn<M>(
        period: Duration,
        generation: Generation,
        tx: UnboundedSender<M>,
        make_message: fn(Generation) -> M,
    ) -> Self
    where
        M: Send + 'static,
    {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(make_message(generation)).is_err() {
                    // Receiver gone.
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cancel(self) {
        // Drop aborts.
    }
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Holds at most one task and hands out generations.
#[derive(Debug, Default)]
pub struct TaskSlot {
    task: Option<RepeatingTask>,
    next_generation: Generation,
}

impl TaskSlot {
    pub fn is_active(&self) -> bool {
        self.task.is_some()
    }

    /// Whether a message with `generation` came from the live task.
    pub fn is_current(&self, generation: Generation) -> bool {
        self.task
            .as_ref()
            .is_some_and(|t| t.generation() == generation)
    }

    /// Start a task unless one is already running.
    pub fn ensure<M>(&mut self, period: Duration, tx: &UnboundedSender<M>, make_message: fn(Generation) -> M)
    where
        M: Send + 'static,
    {
        if self.task.is_some() {
            return;
        }
        self.next_generation += 1;
        self.task = Some(RepeatingTask::spawn(
            period,
            self.next_generation,
            tx.clone(),
            make_message,
        ));
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
        }
    }
}
