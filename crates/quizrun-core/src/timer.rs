//! Session countdown.
//!
//! - [`SessionTimer`] holds the countdown state and decides when it has
//!   expired. It knows nothing about wall-clock time.
//! - [`TickSchedule`] is the cancellable background task that says when the
//!   next tick is due.
//!
//! The engine pairs the two: every pulse from the schedule is fed to
//! [`SessionTimer::tick`], and the schedule is cancelled as soon as the
//! session finishes.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Result of a single [`SessionTimer::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One unit was taken off; carries the seconds left.
    Counted(u64),
    /// The countdown had already reached zero. Reported exactly once.
    Expired,
    /// The timer is not running.
    Idle,
}

/// A whole-second countdown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionTimer {
    remaining_seconds: u64,
    running: bool,
}

impl SessionTimer {
    /// A timer already started at `total_seconds`.
    pub fn started(total_seconds: u64) -> Self {
        let mut timer = Self::default();
        timer.start(total_seconds);
        timer
    }

    pub fn start(&mut self, total_seconds: u64) {
        self.remaining_seconds = total_seconds;
        self.running = true;
    }

    /// Advance the countdown by one unit.
    ///
    /// A tick that finds zero seconds left stops the timer and reports
    /// [`TickOutcome::Expired`]; every later tick is [`TickOutcome::Idle`].
    pub fn tick(&mut self) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        if self.remaining_seconds > 0 {
            self.remaining_seconds -= 1;
            TickOutcome::Counted(self.remaining_seconds)
        } else {
            self.running = false;
            TickOutcome::Expired
        }
    }

    /// Stop without expiring, e.g. after a manual submit.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Remaining time as `MM:SS`.
    pub fn display(&self) -> String {
        format_clock(self.remaining_seconds)
    }
}

/// Format seconds as zero-padded `MM:SS`.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// A background task that emits one pulse per period.
///
/// The first pulse is delivered at once on [`spawn`](Self::spawn), then one
/// per period, so pulse `n` lands `n` periods after the start. Pulses are not drift-corrected: a late consumer delays the following
/// ones. After [`cancel`](Self::cancel) no further pulse is delivered, even
/// one already buffered.
#[derive(Debug)]
pub struct TickSchedule {
    pulses: mpsc::Receiver<()>,
    task: JoinHandle<()>,
    cancelled: bool,
}

impl TickSchedule {
    /// Spawn the schedule on the current tokio runtime.
    pub fn spawn(period: Duration) -> Self {
        let (tx, pulses) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self {
            pulses,
            task,
            cancelled: false,
        }
    }

    /// Wait for the next pulse. Returns `None` once cancelled.
    pub async fn next_tick(&mut self) -> Option<()> {
        if self.cancelled {
            return None;
        }
        self.pulses.recv().await
    }

    /// Stop the schedule and discard any pending pulse.
    pub fn cancel(&mut self) {
        if self.cancelled {
            return;
        }
        self.cancelled = true;
        self.task.abort();
        self.pulses.close();
        while self.pulses.try_recv().is_ok() {}
        tracing::debug!("tick schedule cancelled");
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

impl Drop for TickSchedule {
    fn drop(&mut self) {
        self.task.abort();
    }
}
