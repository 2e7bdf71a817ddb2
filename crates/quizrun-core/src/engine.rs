//! Session engine.
//!
//! Drives one [`QuizSession`] and its countdown from a single event stream:
//! participant intents arriving on a channel, and timer pulses from a
//! [`TickSchedule`]. Both are handled on the same task, one at a time.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::session::{QuizSession, SessionSnapshot};
use crate::timer::{SessionTimer, TickOutcome, TickSchedule};

/// Something the participant asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Choose an option by its text.
    Select(String),
    /// Choose an option by its zero-based display position.
    SelectIndex(usize),
    Previous,
    Next,
    /// Finish the quiz. Only honoured on the last question.
    Submit,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Select(text) => write!(f, "select '{text}'"),
            Intent::SelectIndex(i) => write!(f, "select option {}", i + 1),
            Intent::Previous => write!(f, "previous"),
            Intent::Next => write!(f, "next"),
            Intent::Submit => write!(f, "submit"),
        }
    }
}

/// How a session reached its final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmittedBy {
    Participant,
    Timeout,
}

impl fmt::Display for SubmittedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmittedBy::Participant => write!(f, "participant"),
            SubmittedBy::Timeout => write!(f, "timeout"),
        }
    }
}

/// Summary of a finished run.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub score: f64,
    pub submitted_by: SubmittedBy,
    /// Seconds left on the clock at finalization.
    pub remaining_seconds: u64,
    /// Wall-clock time from start to finalization.
    pub elapsed: Duration,
}

/// Callbacks for the presentation layer.
pub trait SessionObserver: Send + Sync {
    /// The visible question or its navigation state changed.
    fn on_render(&self, snapshot: &SessionSnapshot, clock: &str);
    /// One tick passed; `clock` is `remaining_seconds` as `MM:SS`.
    fn on_tick(&self, remaining_seconds: u64, clock: &str);
    /// An intent was ignored because it is not valid right now.
    fn on_rejected(&self, intent: &Intent);
    fn on_finished(&self, outcome: &SessionOutcome);
}

/// No-op observer.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_render(&self, _: &SessionSnapshot, _: &str) {}
    fn on_tick(&self, _: u64, _: &str) {}
    fn on_rejected(&self, _: &Intent) {}
    fn on_finished(&self, _: &SessionOutcome) {}
}

/// Runs quiz sessions against a countdown.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    tick_interval: Duration,
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl QuizEngine {
    pub fn new(tick_interval: Duration) -> Self {
        Self { tick_interval }
    }

    /// Run `session` until the participant submits or time runs out.
    ///
    /// If the intent channel closes early the session keeps running until
    /// the countdown expires. The tick schedule is cancelled before this
    /// returns, whichever way the session finished.
    pub async fn run(
        &self,
        session: &mut QuizSession,
        mut intents: mpsc::Receiver<Intent>,
        observer: &dyn SessionObserver,
    ) -> SessionOutcome {
        let start = Instant::now();
        let mut timer = SessionTimer::started(session.config().time_limit_seconds());

        if let Some(score) = session.score() {
            return SessionOutcome {
                score,
                submitted_by: SubmittedBy::Participant,
                remaining_seconds: timer.remaining_seconds(),
                elapsed: Duration::ZERO,
            };
        }

        let mut schedule = TickSchedule::spawn(self.tick_interval);
        let mut intents_open = true;
        observer.on_render(&session.snapshot(), &timer.display());

        let submitted_by = loop {
            tokio::select! {
                biased;

                intent = intents.recv(), if intents_open => match intent {
                    Some(intent) => {
                        if apply_intent(session, &intent) {
                            observer.on_render(&session.snapshot(), &timer.display());
                        } else {
                            observer.on_rejected(&intent);
                        }
                        if session.is_finished() {
                            break SubmittedBy::Participant;
                        }
                    }
                    None => {
                        tracing::debug!("intent channel closed, waiting for the timer");
                        intents_open = false;
                    }
                },

                pulse = schedule.next_tick() => {
                    if pulse.is_none() {
                        tracing::warn!("tick schedule ended early, submitting");
                        session.submit();
                        break SubmittedBy::Timeout;
                    }
                    match timer.tick() {
                        TickOutcome::Counted(remaining) => {
                            observer.on_tick(remaining, &timer.display())
                        }
                        TickOutcome::Expired => {
                            tracing::info!("time limit reached, submitting");
                            session.submit();
                            break SubmittedBy::Timeout;
                        }
                        TickOutcome::Idle => {}
                    }
                }
            }
        };

        schedule.cancel();
        timer.stop();

        let outcome = SessionOutcome {
            score: session.submit(),
            submitted_by,
            remaining_seconds: timer.remaining_seconds(),
            elapsed: start.elapsed(),
        };
        observer.on_finished(&outcome);
        outcome
    }
}

/// Apply one intent. Returns `false` if the session ignored it.
fn apply_intent(session: &mut QuizSession, intent: &Intent) -> bool {
    match intent {
        Intent::Select(text) => session.select_answer(text),
        Intent::SelectIndex(position) => session.select_option_index(*position),
        Intent::Previous => session.go_to_previous(),
        Intent::Next => session.go_to_next(),
        Intent::Submit => {
            if !session.can_submit() {
                return false;
            }
            session.submit();
            true
        }
    }
}
