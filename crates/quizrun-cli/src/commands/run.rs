//! The `quizrun run` command.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use quizrun_core::bank::{load_bank, validate_bank};
use quizrun_core::config::{create_config, load_config_from};
use quizrun_core::engine::{Intent, QuizEngine, SessionObserver, SessionOutcome, SubmittedBy};
use quizrun_core::model::Participant;
use quizrun_core::report::SessionReport;
use quizrun_core::session::{QuizSession, SessionSnapshot};

/// Arguments for `quizrun run`. Numeric settings stay as text so that bad
/// input is reported the same way whether it came from a flag or a form.
pub struct RunArgs {
    pub bank: PathBuf,
    pub questions: Option<String>,
    pub time_limit: Option<String>,
    pub positive: Option<String>,
    pub negative: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Console presentation of a running session.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_render(&self, snapshot: &SessionSnapshot, clock: &str) {
        println!();
        println!("Time Left: {clock}");
        println!(
            "Question {}/{}: {}",
            snapshot.number, snapshot.total, snapshot.prompt
        );
        for (i, option) in snapshot.options.iter().enumerate() {
            let marker = if snapshot.selected.as_deref() == Some(option.as_str()) {
                '*'
            } else {
                ' '
            };
            println!(" {marker} {}) {option}", i + 1);
        }
        println!("{}", controls(snapshot));
    }

    fn on_tick(&self, remaining_seconds: u64, clock: &str) {
        if remaining_seconds % 60 == 0 || remaining_seconds <= 10 {
            println!("Time Left: {clock}");
        }
    }

    fn on_rejected(&self, intent: &Intent) {
        println!("Not available: {intent}");
    }

    fn on_finished(&self, outcome: &SessionOutcome) {
        if outcome.submitted_by == SubmittedBy::Timeout {
            println!("\nTime is up!");
        }
        println!("\nYour Score: {}", outcome.score);
    }
}

fn controls(snapshot: &SessionSnapshot) -> String {
    let mut parts = vec![format!("[1-{}] choose", snapshot.options.len())];
    if snapshot.has_previous {
        parts.push("[p] previous".into());
    }
    if snapshot.has_next {
        parts.push("[n] next".into());
    }
    if snapshot.can_submit {
        parts.push("[s] submit".into());
    }
    parts.join("  ")
}

/// Turn one line of input into an intent. Blank lines are ignored.
///
/// A number picks an option by position; any other unrecognised text is
/// treated as the option's text.
fn parse_intent(line: &str) -> Option<Intent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let intent = match line.to_lowercase().as_str() {
        "n" | "next" => Intent::Next,
        "p" | "prev" | "previous" => Intent::Previous,
        "s" | "submit" => Intent::Submit,
        _ => match line.parse::<usize>() {
            Ok(n) if n >= 1 => Intent::SelectIndex(n - 1),
            _ => Intent::Select(line.to_string()),
        },
    };
    Some(intent)
}

/// Forward stdin lines as intents from a plain thread, so a pending read
/// never holds up runtime shutdown.
fn spawn_stdin_reader(tx: mpsc::Sender<Intent>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else {
                break;
            };
            let Some(intent) = parse_intent(&line) else {
                continue;
            };
            if tx.blocking_send(intent).is_err() {
                break;
            }
        }
    });
}

pub async fn execute(args: RunArgs) -> Result<()> {
    let file_config = load_config_from(args.config.as_deref())?;

    let bank = load_bank(&args.bank)
        .with_context(|| format!("failed to load question bank {}", args.bank.display()))?;
    for w in validate_bank(&bank) {
        tracing::warn!("question bank: {}", w.message);
    }

    // Flags win over quizrun.toml; the bank size is the last resort.
    let questions = args
        .questions
        .or_else(|| file_config.question_count.map(|n| n.to_string()))
        .unwrap_or_else(|| bank.len().to_string());
    let time_limit = args
        .time_limit
        .unwrap_or_else(|| file_config.time_limit_minutes.to_string());
    let positive = args
        .positive
        .unwrap_or_else(|| file_config.positive_marks.to_string());
    let negative = args
        .negative
        .unwrap_or_else(|| file_config.negative_marks.to_string());

    let config = create_config(&questions, &time_limit, &positive, &negative)
        .context("invalid quiz settings")?;

    let participant = match (args.name, args.email) {
        (None, None) => None,
        (name, email) => Some(Participant {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
        }),
    };

    let mut session = QuizSession::new(config, bank);
    eprintln!(
        "quizrun v{} — {} questions, {} to answer, +{} / {} marks",
        env!("CARGO_PKG_VERSION"),
        session.len(),
        quizrun_core::timer::format_clock(session.config().time_limit_seconds()),
        session.config().positive_marks(),
        session.config().negative_marks(),
    );
    if let Some(p) = &participant {
        eprintln!("Participant: {p}");
    }

    let (tx, rx) = mpsc::channel(16);
    spawn_stdin_reader(tx);

    let engine = QuizEngine::new(file_config.tick_interval());
    let outcome = engine.run(&mut session, rx, &ConsoleObserver).await;

    let report = SessionReport::from_session(&session, &outcome, participant);
    print_summary(&report);

    if let Some(dir) = args.output.or(file_config.output_dir) {
        let path = report.save_to_dir(&dir)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_summary(report: &SessionReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Your Answer", "Correct Answer", "Marks"]);

    for (i, q) in report.questions.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(&q.prompt),
            Cell::new(q.selected.as_deref().unwrap_or("-")),
            Cell::new(&q.correct_option),
            Cell::new(format!("{:+}", q.awarded)),
        ]);
    }

    println!("\n{table}");
    println!(
        "Correct: {}  Wrong: {}  Unanswered: {}  (maximum {})",
        report.correct, report.wrong, report.unanswered, report.max_score
    );
}
