//! Session configuration and the `quizrun.toml` defaults file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::model::QuestionRecord;

/// Input field names reported by [`ConfigError`].
pub mod fields {
    pub const QUESTION_COUNT: &str = "questionCountInput";
    pub const TIME_LIMIT_MINUTES: &str = "timeLimitMinutesInput";
    pub const POSITIVE_MARKS: &str = "positiveMarksInput";
    pub const NEGATIVE_MARKS: &str = "negativeMarksInput";
}

/// Immutable parameters for one quiz session.
///
/// Deserializing goes through [`SessionConfig::new`], so a stored config is
/// held to the same limits as one built from input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredSessionConfig")]
pub struct SessionConfig {
    question_count: usize,
    time_limit_seconds: u64,
    positive_marks: f64,
    negative_marks: f64,
}

#[derive(Deserialize)]
struct StoredSessionConfig {
    question_count: usize,
    time_limit_seconds: u64,
    positive_marks: f64,
    negative_marks: f64,
}

impl TryFrom<StoredSessionConfig> for SessionConfig {
    type Error = ConfigError;

    fn try_from(stored: StoredSessionConfig) -> Result<Self, Self::Error> {
        Self::new(
            stored.question_count,
            stored.time_limit_seconds,
            stored.positive_marks,
            stored.negative_marks,
        )
    }
}

impl SessionConfig {
    /// Build a config from already-typed values.
    ///
    /// Marks are accepted as any finite number; a positive negative-mark is
    /// unusual but allowed.
    pub fn new(
        question_count: usize,
        time_limit_seconds: u64,
        positive_marks: f64,
        negative_marks: f64,
    ) -> Result<Self, ConfigError> {
        if question_count == 0 {
            return Err(ConfigError::NonPositive(fields::QUESTION_COUNT.into()));
        }
        if time_limit_seconds == 0 {
            return Err(ConfigError::NonPositive(fields::TIME_LIMIT_MINUTES.into()));
        }
        if !positive_marks.is_finite() {
            return Err(ConfigError::NotANumber(fields::POSITIVE_MARKS.into()));
        }
        if !negative_marks.is_finite() {
            return Err(ConfigError::NotANumber(fields::NEGATIVE_MARKS.into()));
        }
        Ok(Self {
            question_count,
            time_limit_seconds,
            positive_marks,
            negative_marks,
        })
    }

    pub fn question_count(&self) -> usize {
        self.question_count
    }

    pub fn time_limit_seconds(&self) -> u64 {
        self.time_limit_seconds
    }

    pub fn positive_marks(&self) -> f64 {
        self.positive_marks
    }

    pub fn negative_marks(&self) -> f64 {
        self.negative_marks
    }

    /// Take the first `min(question_count, bank.len())` questions.
    ///
    /// The bank is expected to be shuffled already; this truncates rather
    /// than re-sampling. A short bank is used as-is.
    pub fn select_questions(&self, mut bank: Vec<QuestionRecord>) -> Vec<QuestionRecord> {
        if bank.len() > self.question_count {
            bank.truncate(self.question_count);
        } else if bank.len() < self.question_count {
            tracing::debug!(
                requested = self.question_count,
                available = bank.len(),
                "bank is smaller than the requested question count"
            );
        }
        bank
    }
}

/// Build a [`SessionConfig`] from raw administrator input.
///
/// All four fields are parsed before positivity is checked, so a
/// non-numeric field is reported even when another field is zero.
pub fn create_config(
    question_count_input: &str,
    time_limit_minutes_input: &str,
    positive_marks_input: &str,
    negative_marks_input: &str,
) -> Result<SessionConfig, ConfigError> {
    let question_count = parse_integer(question_count_input, fields::QUESTION_COUNT)?;
    let time_limit_minutes = parse_integer(time_limit_minutes_input, fields::TIME_LIMIT_MINUTES)?;
    let positive_marks = parse_marks(positive_marks_input, fields::POSITIVE_MARKS)?;
    let negative_marks = parse_marks(negative_marks_input, fields::NEGATIVE_MARKS)?;

    if question_count <= 0 {
        return Err(ConfigError::NonPositive(fields::QUESTION_COUNT.into()));
    }
    if time_limit_minutes <= 0 {
        return Err(ConfigError::NonPositive(fields::TIME_LIMIT_MINUTES.into()));
    }

    let question_count = usize::try_from(question_count)
        .map_err(|_| ConfigError::NotANumber(fields::QUESTION_COUNT.into()))?;
    let time_limit_seconds = u64::try_from(time_limit_minutes)
        .ok()
        .and_then(|m| m.checked_mul(60))
        .ok_or_else(|| ConfigError::NotANumber(fields::TIME_LIMIT_MINUTES.into()))?;

    SessionConfig::new(
        question_count,
        time_limit_seconds,
        positive_marks,
        negative_marks,
    )
}

fn parse_integer(input: &str, field: &str) -> Result<i64, ConfigError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ConfigError::NotANumber(field.into()))
}

fn parse_marks(input: &str, field: &str) -> Result<f64, ConfigError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::NotANumber(field.into()))
}

// ---------------------------------------------------------------------------
// quizrun.toml
// ---------------------------------------------------------------------------

/// Administrator defaults read from `quizrun.toml`.
///
/// Values here only prefill the session inputs; they still go through
/// [`create_config`] and its validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizrunConfig {
    /// Default number of questions (None = whole bank).
    #[serde(default)]
    pub question_count: Option<usize>,
    /// Default time limit in minutes.
    #[serde(default = "default_time_limit")]
    pub time_limit_minutes: u64,
    /// Default marks for a correct answer.
    #[serde(default = "default_positive_marks")]
    pub positive_marks: f64,
    /// Default marks for a wrong or missing answer.
    #[serde(default = "default_negative_marks")]
    pub negative_marks: f64,
    /// Length of one timer tick in milliseconds.
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
    /// Where session reports are written (None = not saved).
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_time_limit() -> u64 {
    5
}
fn default_positive_marks() -> f64 {
    1.0
}
fn default_negative_marks() -> f64 {
    -0.5
}
fn default_tick_interval() -> u64 {
    1000
}

impl Default for QuizrunConfig {
    fn default() -> Self {
        Self {
            question_count: None,
            time_limit_minutes: default_time_limit(),
            positive_marks: default_positive_marks(),
            negative_marks: default_negative_marks(),
            tick_interval_ms: default_tick_interval(),
            output_dir: None,
        }
    }
}

impl QuizrunConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    // Substituted values are copied as-is, never scanned again.
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        result.push_str(&rest[..start]);
        let var_name = &rest[start + 2..start + len];
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + len + 1..];
    }
    result.push_str(rest);
    result
}

/// Parse a `quizrun.toml` document.
pub fn parse_config_str(content: &str) -> Result<QuizrunConfig> {
    let mut config: QuizrunConfig =
        toml::from_str(content).context("failed to parse quizrun config")?;
    config.output_dir = config
        .output_dir
        .map(|dir| PathBuf::from(resolve_env_vars(&dir.to_string_lossy())));
    Ok(config)
}

/// Load config from an explicit path, or from `./quizrun.toml` if present.
///
/// Falls back to built-in defaults when no file is found.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizrunConfig> {
    let config_path = match path {
        Some(p) if p.exists() => Some(p.to_path_buf()),
        Some(p) => anyhow::bail!("config file not found: {}", p.display()),
        None => Some(PathBuf::from("quizrun.toml")).filter(|p| p.exists()),
    };

    let Some(config_path) = config_path else {
        tracing::debug!("no quizrun.toml found, using defaults");
        return Ok(QuizrunConfig::default());
    };

    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("failed to read config: {}", config_path.display()))?;
    let config = parse_config_str(&content)
        .with_context(|| format!("invalid config: {}", config_path.display()))?;
    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}
