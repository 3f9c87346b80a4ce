//! Quiz Document Inspector
//!
//! Loads a quiz document, prints what it contains and samples one session
//! from it, the way the quiz screen would.
//!
//! ## Usage
//!
//! ```bash
//! # Summary plus a session of the configured default size
//! ./target/release/quiz_inspect /path/to/cuestionario1.json
//!
//! # Ask for a specific session size
//! ./target/release/quiz_inspect /path/to/cuestionario1.json 20
//!
//! # Use a TOML configuration
//! ./target/release/quiz_inspect /path/to/cuestionario1.json 20 quiz.toml
//! ```
//!
//! ## Example Output
//!
//! ```text
//! === Lectura 5 ===
//! --------------------------------
//! Author      : Equipo docente
//! Sections    : 2
//! Questions   : 5
//! --------------------------------
//! ```
//!
//! Set `RUST_LOG=debug` to trace pool assembly and sampling.

use std::env;
use std::error::Error;
use std::process;

use quiz_core::pool::{flatten, kind_counts};
use quiz_core::{loader, QuizSession};
use quiz_types::{QuizConfig, QuizDocument, SessionError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: quiz_inspect <document.json> [count] [config.toml]");
        process::exit(1);
    }

    let config = match args.get(3) {
        Some(path) => QuizConfig::load(path)?,
        None => QuizConfig::default(),
    };

    let count = match args.get(2) {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| format!("invalid question count {raw:?}: {e}"))?,
        None => config.default_question_count,
    };

    let doc = loader::load_document(&args[1])?;
    print_summary(&doc);
    sample_session(&doc, count, &config)?;

    Ok(())
}

fn print_summary(doc: &QuizDocument) {
    let title = if doc.title.is_empty() {
        "(untitled)"
    } else {
        doc.title.as_str()
    };

    println!("=== {title} ===");
    println!("--------------------------------");
    println!("Author      : {}", doc.author);
    if let Some(description) = &doc.description {
        println!("About       : {description}");
    }
    println!("Sections    : {}", doc.sections.len());
    for section in &doc.sections {
        println!("  {:<10}: {}", section.title, section.questions.len());
    }
    println!("Questions   : {}", doc.question_count());
    for (kind, n) in kind_counts(&flatten(doc)) {
        println!("  {:<18}: {}", kind.label(), n);
    }
    println!("--------------------------------\n");
}

fn sample_session(
    doc: &QuizDocument,
    count: usize,
    config: &QuizConfig,
) -> Result<(), SessionError> {
    let pool = flatten(doc);
    let mut session = QuizSession::with_config(config);

    let start = match session.start_session(&pool, count) {
        Ok(start) => start,
        Err(SessionError::EmptyPool) => {
            println!("No questions available. Try another quiz.");
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!("=== Session ===");
    if start.was_clamped {
        println!(
            "Only {} questions available, using all of them.",
            start.effective_count
        );
    }
    for (i, question) in session.questions().iter().enumerate() {
        println!("{:>3}. [{}] {}", i + 1, question.kind(), question.text);
    }
    println!("--------------------------------");
    println!(
        "Presets     : {}",
        config
            .question_count_presets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}
