//! Session reports with JSON persistence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;
use crate::engine::{SessionOutcome, SubmittedBy};
use crate::model::Participant;
use crate::session::{QuestionOutcome, QuizSession};

/// The record of one finished session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Who took the quiz, if they gave their details.
    #[serde(default)]
    pub participant: Option<Participant>,
    pub config: SessionConfig,
    pub score: f64,
    pub max_score: f64,
    pub correct: usize,
    pub wrong: usize,
    pub unanswered: usize,
    pub submitted_by: SubmittedBy,
    /// Seconds left on the clock at finalization.
    pub remaining_seconds: u64,
    /// Wall-clock duration in milliseconds.
    pub duration_ms: u64,
    /// Per-question breakdown, in the order asked.
    pub questions: Vec<QuestionOutcome>,
}

impl SessionReport {
    /// Build a report from a finished session.
    pub fn from_session(
        session: &QuizSession,
        outcome: &SessionOutcome,
        participant: Option<Participant>,
    ) -> Self {
        let questions = session.outcomes();
        let correct = questions.iter().filter(|q| q.is_correct()).count();
        let unanswered = questions.iter().filter(|q| q.selected.is_none()).count();

        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            participant,
            config: session.config().clone(),
            score: outcome.score,
            max_score: session.max_score(),
            correct,
            wrong: questions.len() - correct - unanswered,
            unanswered,
            submitted_by: outcome.submitted_by,
            remaining_seconds: outcome.remaining_seconds,
            duration_ms: outcome.elapsed.as_millis() as u64,
            questions,
        }
    }

    /// File name used when saving into an output directory.
    pub fn file_name(&self) -> String {
        format!(
            "session-{}-{}.json",
            self.created_at.format("%Y-%m-%dT%H%M%S"),
            &self.id.simple().to_string()[..8]
        )
    }

    /// Save into `dir` under [`file_name`](Self::file_name) and return the path.
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        self.save_json(&path)?;
        Ok(path)
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: SessionReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }
}
