//! The `quizrun init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizrun.toml
    if std::path::Path::new("quizrun.toml").exists() {
        println!("quizrun.toml already exists, skipping.");
    } else {
        std::fs::write("quizrun.toml", SAMPLE_CONFIG)?;
        println!("Created quizrun.toml");
    }

    // Create example question bank
    let bank_path = std::path::Path::new("questions.csv");
    if bank_path.exists() {
        println!("questions.csv already exists, skipping.");
    } else {
        std::fs::write(bank_path, EXAMPLE_BANK)?;
        println!("Created questions.csv");
    }

    println!("\nNext steps:");
    println!("  1. Edit questions.csv with your own questions");
    println!("  2. Run: quizrun validate --bank questions.csv");
    println!("  3. Run: quizrun run --bank questions.csv --name \"Your Name\"");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizrun configuration

# Number of questions per session (omit to use the whole bank)
question_count = 5

# Time limit in minutes
time_limit_minutes = 5

# Marks for a correct answer, and for a wrong or missing one
positive_marks = 1.0
negative_marks = -0.5

# Where JSON session reports are written (omit to skip saving)
output_dir = "./quizrun-results"
"#;

const EXAMPLE_BANK: &str = "\
question,option1,option2,option3,option4,answer
What is the capital of France?,Berlin,Madrid,Paris,Rome,Paris
Which planet is known as the Red Planet?,Venus,Mars,Jupiter,Saturn,Mars
What is 7 x 8?,54,56,63,64,56
Which gas do plants absorb from the air?,Oxygen,Nitrogen,Carbon dioxide,Helium,Carbon dioxide
Who wrote Hamlet?,Charles Dickens,William Shakespeare,Jane Austen,Mark Twain,William Shakespeare
What is the boiling point of water at sea level in Celsius?,90,95,100,110,100
Which ocean is the largest?,Atlantic,Indian,Arctic,Pacific,Pacific
";
