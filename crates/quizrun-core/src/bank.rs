//! Question-bank loader.
//!
//! Reads delimited text with a header row naming the columns
//! `question, option1..option4, answer` (in any order), and returns the
//! questions in a fresh random order.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::LoadError;
use crate::model::QuestionRecord;

/// Columns every question bank must provide.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "question", "option1", "option2", "option3", "option4", "answer",
];

/// Load and shuffle a question bank from a file.
pub fn load_bank(path: &Path) -> Result<Vec<QuestionRecord>, LoadError> {
    load_bank_with_rng(path, &mut rand::rng())
}

/// Load a question bank from a file, shuffling with the given RNG.
pub fn load_bank_with_rng<R: Rng + ?Sized>(
    path: &Path,
    rng: &mut R,
) -> Result<Vec<QuestionRecord>, LoadError> {
    let bytes = std::fs::read(path)
        .map_err(|e| LoadError::Unreadable(format!("{}: {e}", path.display())))?;
    let questions = parse_bank_bytes_with_rng(&bytes, rng)?;
    tracing::info!(
        path = %path.display(),
        count = questions.len(),
        "question bank loaded"
    );
    Ok(questions)
}

/// Parse and shuffle a question bank held in memory.
pub fn parse_bank_bytes(bytes: &[u8]) -> Result<Vec<QuestionRecord>, LoadError> {
    parse_bank_bytes_with_rng(bytes, &mut rand::rng())
}

/// Parse a question bank held in memory, shuffling with the given RNG.
pub fn parse_bank_bytes_with_rng<R: Rng + ?Sized>(
    bytes: &[u8],
    rng: &mut R,
) -> Result<Vec<QuestionRecord>, LoadError> {
    let mut questions = read_records(bytes)?;
    if questions.is_empty() {
        return Err(LoadError::EmptyBank);
    }
    questions.shuffle(rng);
    Ok(questions)
}

fn read_records(bytes: &[u8]) -> Result<Vec<QuestionRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()
        .map_err(unreadable)?
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let name = decode_cell(raw);
            let name = if i == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name
            };
            name.trim().to_string()
        })
        .collect();

    let mut positions = [0usize; REQUIRED_COLUMNS.len()];
    let mut missing = BTreeSet::new();
    for (slot, column) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        match headers.iter().position(|h| h == column) {
            Some(i) => *slot = i,
            None => {
                missing.insert(column.to_string());
            }
        }
    }
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing));
    }
    let [question, o1, o2, o3, o4, answer] = positions;

    let mut questions = Vec::new();
    let mut record = csv::ByteRecord::new();
    while reader.read_byte_record(&mut record).map_err(unreadable)? {
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |i: usize| {
            record.get(i).map(decode_cell).ok_or_else(|| {
                LoadError::Unreadable(format!(
                    "line {line}: expected {} fields, found {}",
                    headers.len(),
                    record.len()
                ))
            })
        };

        questions.push(QuestionRecord::new(
            field(question)?,
            [field(o1)?, field(o2)?, field(o3)?, field(o4)?],
            field(answer)?,
        ));
    }

    Ok(questions)
}

/// Decode a cell as UTF-8, falling back to Latin-1.
fn decode_cell(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => s.to_string(),
        Err(_) => raw.iter().map(|&b| char::from(b)).collect(),
    }
}

fn unreadable(err: csv::Error) -> LoadError {
    LoadError::Unreadable(err.to_string())
}

/// A non-fatal problem found in a loaded bank.
#[derive(Debug, Clone)]
pub struct BankWarning {
    /// Position of the question in the loaded bank (if applicable).
    pub index: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Check a loaded bank for records that will behave surprisingly.
pub fn validate_bank(questions: &[QuestionRecord]) -> Vec<BankWarning> {
    let mut warnings = Vec::new();

    let mut seen_prompts = HashSet::new();
    for (i, q) in questions.iter().enumerate() {
        if q.prompt.trim().is_empty() {
            warnings.push(BankWarning {
                index: Some(i),
                message: "question text is empty".into(),
            });
        } else if !seen_prompts.insert(q.prompt.trim()) {
            warnings.push(BankWarning {
                index: Some(i),
                message: format!("duplicate question: {}", q.prompt.trim()),
            });
        }

        if !q.has_option(&q.correct_option) {
            warnings.push(BankWarning {
                index: Some(i),
                message: format!(
                    "answer '{}' matches none of the options and can never be scored correct",
                    q.correct_option
                ),
            });
        }

        let distinct: HashSet<&str> = q.options.iter().map(String::as_str).collect();
        if distinct.len() != q.options.len() {
            warnings.push(BankWarning {
                index: Some(i),
                message: "options are not distinct".into(),
            });
        }
    }

    warnings
}
