//! Core data model types for quizrun.
//!
//! These are the records the loader produces and the session engine consumes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of answer options carried by every question.
pub const OPTION_COUNT: usize = 4;

/// A single multiple-choice question.
///
/// Immutable once loaded. `correct_option` is expected to equal one of
/// `options`; a record where it does not is never scored as correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// The question text shown to the participant.
    pub prompt: String,
    /// The four answer options, in display order.
    pub options: [String; OPTION_COUNT],
    /// The option text that earns positive marks.
    pub correct_option: String,
}

impl QuestionRecord {
    pub fn new(
        prompt: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_option: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            options,
            correct_option: correct_option.into(),
        }
    }

    /// Whether `text` is one of this question's options.
    pub fn has_option(&self, text: &str) -> bool {
        self.options.iter().any(|o| o == text)
    }

    /// Whether `answer` matches the correct option.
    pub fn is_correct(&self, answer: &str) -> bool {
        answer == self.correct_option
    }

    /// The option at a zero-based display position.
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }
}

/// Who is taking the quiz. Recorded in the session report, never verified.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.email.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_question(prompt: &str, correct: &str) -> QuestionRecord {
    QuestionRecord::new(
        prompt,
        ["A".into(), "B".into(), "C".into(), "D".into()],
        correct,
    )
}
