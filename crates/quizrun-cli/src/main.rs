//! quizrun CLI — timed multiple-choice quizzes in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quizrun", version, about = "Timed, scored multiple-choice quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a quiz session
    Run {
        /// Path to the CSV question bank
        #[arg(long)]
        bank: PathBuf,

        /// Number of questions to ask (default: config file, else whole bank)
        #[arg(long)]
        questions: Option<String>,

        /// Time limit in minutes
        #[arg(long, allow_hyphen_values = true)]
        time_limit: Option<String>,

        /// Marks for a correct answer
        #[arg(long, allow_hyphen_values = true)]
        positive: Option<String>,

        /// Marks for a wrong or missing answer
        #[arg(long, allow_hyphen_values = true)]
        negative: Option<String>,

        /// Participant name, recorded in the report
        #[arg(long)]
        name: Option<String>,

        /// Participant email, recorded in the report
        #[arg(long)]
        email: Option<String>,

        /// Directory for the JSON session report
        #[arg(long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Check a question bank for problems
    Validate {
        /// Path to the CSV question bank
        #[arg(long)]
        bank: PathBuf,
    },

    /// Create a starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quizrun=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            bank,
            questions,
            time_limit,
            positive,
            negative,
            name,
            email,
            output,
            config,
        } => {
            commands::run::execute(commands::run::RunArgs {
                bank,
                questions,
                time_limit,
                positive,
                negative,
                name,
                email,
                output,
                config,
            })
            .await
        }
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
