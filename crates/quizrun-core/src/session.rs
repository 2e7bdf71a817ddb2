//! The quiz session state machine.
//!
//! A session starts `Active` at the first question and moves one-way to
//! `Finished` on [`QuizSession::submit`]. While active, the participant may
//! move between questions and change answers freely.
//!
//! Requests that make no sense in the current state (selecting an option the
//! question does not have, moving past either end, mutating a finished
//! session) are silently ignored. Each such method returns `false` when it
//! ignored the request so adapters can tell, but the session itself never
//! reports an error and never changes state on a rejected request.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::SessionConfig;
use crate::model::QuestionRecord;

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SessionState {
    Active { current_index: usize },
    Finished { score: f64 },
}

/// One participant's run through a fixed list of questions.
#[derive(Debug, Clone)]
pub struct QuizSession {
    config: SessionConfig,
    questions: Vec<QuestionRecord>,
    current_index: usize,
    answers: HashMap<usize, String>,
    score: Option<f64>,
}

impl QuizSession {
    /// Start a session over the bank, truncated to the configured count.
    pub fn new(config: SessionConfig, bank: Vec<QuestionRecord>) -> Self {
        let questions = config.select_questions(bank);
        tracing::debug!(questions = questions.len(), "quiz session started");
        Self {
            config,
            questions,
            current_index: 0,
            answers: HashMap::new(),
            score: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn questions(&self) -> &[QuestionRecord] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question on screen, or `None` for an empty session.
    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.questions.get(self.current_index)
    }

    /// The recorded answer for a question, if any.
    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn answers(&self) -> &HashMap<usize, String> {
        &self.answers
    }

    pub fn is_finished(&self) -> bool {
        self.score.is_some()
    }

    /// The final score once finished.
    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn state(&self) -> SessionState {
        match self.score {
            Some(score) => SessionState::Finished { score },
            None => SessionState::Active {
                current_index: self.current_index,
            },
        }
    }

    /// Record `option` as the answer to the current question.
    ///
    /// Ignored if the session is finished or `option` is not one of the
    /// current question's options. Re-selecting the same option is harmless;
    /// selecting a different one replaces the earlier choice.
    pub fn select_answer(&mut self, option: &str) -> bool {
        if self.is_finished() {
            return false;
        }
        let Some(question) = self.current_question() else {
            return false;
        };
        if !question.has_option(option) {
            tracing::debug!(index = self.current_index, option, "ignoring unknown option");
            return false;
        }
        self.answers.insert(self.current_index, option.to_string());
        true
    }

    /// Select the current question's option at a zero-based position.
    pub fn select_option_index(&mut self, position: usize) -> bool {
        let Some(option) = self
            .current_question()
            .and_then(|q| q.option(position))
            .map(str::to_string)
        else {
            return false;
        };
        self.select_answer(&option)
    }

    pub fn has_previous(&self) -> bool {
        !self.is_finished() && self.current_index > 0
    }

    pub fn has_next(&self) -> bool {
        !self.is_finished() && self.current_index + 1 < self.questions.len()
    }

    /// Submission is offered only on the last question.
    pub fn can_submit(&self) -> bool {
        !self.is_finished()
            && !self.questions.is_empty()
            && self.current_index == self.questions.len() - 1
    }

    pub fn go_to_previous(&mut self) -> bool {
        if !self.has_previous() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    pub fn go_to_next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Finalize the session and return the score.
    ///
    /// Callable from any question; [`can_submit`](Self::can_submit) only
    /// gates the participant-facing control. An unanswered question costs the
    /// negative mark exactly like a wrong one. Once finished, later calls
    /// return the same score without recomputing.
    pub fn submit(&mut self) -> f64 {
        if let Some(score) = self.score {
            return score;
        }
        let score = self.compute_score();
        self.score = Some(score);
        tracing::info!(
            score,
            answered = self.answers.len(),
            questions = self.questions.len(),
            "quiz session finished"
        );
        score
    }

    fn compute_score(&self) -> f64 {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| match self.answer(i) {
                Some(answer) if q.is_correct(answer) => self.config.positive_marks(),
                _ => self.config.negative_marks(),
            })
            .sum()
    }

    /// The best achievable score for this session.
    pub fn max_score(&self) -> f64 {
        self.config.positive_marks() * self.questions.len() as f64
    }

    /// Per-question results, in session order.
    pub fn outcomes(&self) -> Vec<QuestionOutcome> {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let selected = self.answer(i).map(str::to_string);
                let correct = selected.as_deref().is_some_and(|a| q.is_correct(a));
                QuestionOutcome {
                    prompt: q.prompt.clone(),
                    selected,
                    correct_option: q.correct_option.clone(),
                    awarded: if correct {
                        self.config.positive_marks()
                    } else {
                        self.config.negative_marks()
                    },
                }
            })
            .collect()
    }

    /// A read-only view for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let question = self.current_question();
        SessionSnapshot {
            number: if question.is_some() {
                self.current_index + 1
            } else {
                0
            },
            total: self.questions.len(),
            prompt: question.map(|q| q.prompt.clone()).unwrap_or_default(),
            options: question.map(|q| q.options.to_vec()).unwrap_or_default(),
            selected: self.answer(self.current_index).map(str::to_string),
            has_previous: self.has_previous(),
            has_next: self.has_next(),
            can_submit: self.can_submit(),
            finished: self.is_finished(),
            score: self.score,
        }
    }
}

/// What the presentation layer needs to draw the current screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// One-based number of the visible question (0 if there are none).
    pub number: usize,
    pub total: usize,
    pub prompt: String,
    pub options: Vec<String>,
    /// The participant's current choice for the visible question.
    pub selected: Option<String>,
    pub has_previous: bool,
    pub has_next: bool,
    pub can_submit: bool,
    pub finished: bool,
    pub score: Option<f64>,
}

/// How one question was answered and scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub prompt: String,
    pub selected: Option<String>,
    pub correct_option: String,
    pub awarded: f64,
}

impl QuestionOutcome {
    pub fn is_correct(&self) -> bool {
        self.selected.as_deref() == Some(self.correct_option.as_str())
    }
}
