//! The `quizrun validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizrun_core::bank::{load_bank, validate_bank};

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let bank = load_bank(&bank_path)
        .with_context(|| format!("failed to load question bank {}", bank_path.display()))?;

    println!(
        "Question bank: {} ({} questions)",
        bank_path.display(),
        bank.len()
    );

    let warnings = validate_bank(&bank);
    for w in &warnings {
        match w.index.and_then(|i| bank.get(i)) {
            Some(q) => println!("  [{}] WARNING: {}", q.prompt.trim(), w.message),
            None => println!("  WARNING: {}", w.message),
        }
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
