//! kiddo-quiz - Play a quiz round in the terminal
//!
//! Loads quiz questions through the shared content store and walks through
//! them one at a time, recording every answer in the persistent score
//! counters.

use std::io::{self, BufRead, Write};

use clap::Parser;
use libkiddo::logging::{self, LogFormat, LoggingConfig};
use libkiddo::{Category, Config, ContentItem, ContentStore, KiddoError, Result};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "kiddo-quiz")]
#[command(version)]
#[command(about = "Play a quiz round in the terminal")]
#[command(long_about = r#"Play a quiz round in the terminal.

Questions come from the shared content store: the arithmetic category (math)
is generated locally and works fully offline, while other categories are
fetched from the learning endpoint (falling back to the offline cache when
the network is down). Every answer updates the persistent score counters
shown by kiddo-stats.

EXAMPLES:
    # Play an arithmetic round (default, works offline)
    kiddo-quiz

    # Mint a fresh batch even if questions are already loaded
    kiddo-quiz --reset

    # Quiz on remotely fetched flower questions
    kiddo-quiz --category flower

CONFIGURATION:
    Configuration file: ~/.config/kiddolearn/config.toml
    Database location:  ~/.local/share/kiddolearn/content.db

    [quiz]
    daily_limit = 10  # correct answers per day before play is gated
    batch_size = 8    # questions per arithmetic round

EXIT CODES:
    0 - Session completed (or daily limit already reached)
    1 - Configuration or storage error
    2 - Content endpoint error
    3 - Invalid category
"#)]
struct Cli {
    /// Category to quiz on
    #[arg(short, long, default_value = "math", value_name = "CATEGORY")]
    #[arg(help = "Category: letter, animal, number, vegetable, fruit, flower, or math")]
    category: String,

    /// Load a fresh batch even if questions are already held
    #[arg(short, long)]
    reset: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// A content item reduced to the fields a quiz round needs
struct QuizQuestion {
    prompt: String,
    options: Vec<String>,
    answer: String,
}

/// Keep only items that carry a complete, answerable question
fn quiz_questions(items: Vec<ContentItem>) -> Vec<QuizQuestion> {
    items
        .into_iter()
        .filter_map(|item| match (item.question, item.options, item.correct_answer) {
            // An empty option list would leave nothing to pick from
            (Some(prompt), Some(options), Some(answer)) if !options.is_empty() => {
                Some(QuizQuestion {
                    prompt,
                    options,
                    answer,
                })
            }
            _ => None,
        })
        .collect()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        logging::init_default();
    }

    // Run the main logic and handle errors
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let category: Category = cli.category.parse()?;
    let config = Config::load_or_default()?;
    let store = ContentStore::from_config(&config).await?;

    // Gate the session on the daily limit before loading anything
    let progress = store.progress();
    if progress.completed_count >= config.quiz.daily_limit {
        println!("Daily limit reached! Come back tomorrow.");
        return Ok(());
    }

    let outcome = store.fetch_by_category(category, cli.reset).await?;
    debug!(%outcome, "questions loaded");

    let questions = quiz_questions(store.items());
    if questions.is_empty() {
        return Err(KiddoError::InvalidInput(format!(
            "no quiz questions available for category '{}'",
            category
        )));
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut session_correct = 0u32;
    let mut session_total = 0u32;

    for (number, question) in questions.iter().enumerate() {
        println!();
        println!("Question {} of {}", number + 1, questions.len());
        println!("{}", question.prompt);
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        let picked = match read_choice(&mut lines, question.options.len())? {
            Some(choice) => choice,
            None => {
                println!();
                println!("Session ended early.");
                break;
            }
        };

        let correct = question.options[picked - 1] == question.answer;
        session_total += 1;
        if correct {
            session_correct += 1;
            println!("Correct!");
        } else {
            println!("Not quite. The answer was {}", question.answer);
        }

        let progress = store.track_answer(correct).await?;
        if progress.completed_count >= config.quiz.daily_limit {
            println!();
            println!("Daily limit reached! Come back tomorrow.");
            break;
        }
    }

    let progress = store.progress();
    println!();
    println!("Session score: {} of {} correct", session_correct, session_total);
    println!(
        "All time: {} correct, {} wrong, {} completed",
        progress.correct_count, progress.wrong_count, progress.completed_count
    );

    Ok(())
}

/// Prompt for an option number until a valid one arrives.
///
/// Returns `None` when stdin closes.
fn read_choice(
    lines: &mut io::Lines<io::StdinLock<'_>>,
    max: usize,
) -> Result<Option<usize>> {
    loop {
        print!("Your answer (1-{}): ", max);
        let _ = io::stdout().flush();

        match lines.next() {
            Some(Ok(line)) => match line.trim().parse::<usize>() {
                Ok(n) if (1..=max).contains(&n) => return Ok(Some(n)),
                _ => println!("Please enter a number from 1 to {}", max),
            },
            Some(Err(e)) => {
                return Err(KiddoError::InvalidInput(format!(
                    "could not read answer: {}",
                    e
                )))
            }
            None => return Ok(None),
        }
    }
}
