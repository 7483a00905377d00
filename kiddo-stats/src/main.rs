use anyhow::{Context, Result};
use clap::Parser;
use libkiddo::types::Progress;
use sqlx::sqlite::SqlitePool;
use sqlx::Row;

#[derive(Parser, Debug)]
#[command(name = "kiddo-stats")]
#[command(version, about = "Show quiz score counters")]
#[command(long_about = r#"Show the persistent quiz score counters.

Reads the counters kiddo-quiz records for every answer: completed (correct
answers counting toward the daily limit), correct, and wrong. The database is
opened read-only; this tool never changes any scores.

EXAMPLES:
    # Human-readable summary
    kiddo-stats

    # JSON output for scripting
    kiddo-stats --format json
    kiddo-stats --format json | jq '.correctCount'

EXIT CODES:
    0 - Success
    1 - Error (database not found, query failed, etc.)
"#)]
struct Args {
    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(help = "Output format: text (human-readable) or json")]
    #[arg(value_parser = ["text", "json"])]
    format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::debug!("kiddo-stats started with args: {:?}", args);

    let config = libkiddo::config::Config::load_or_default()
        .context("Failed to load configuration")?;

    let db_path = shellexpand::tilde(&config.database.path).to_string();

    if !std::path::Path::new(&db_path).exists() {
        eprintln!("Error: Database not found at {}", db_path);
        eprintln!("Have you played a quiz yet? Try: kiddo-quiz");
        std::process::exit(1);
    }

    // Open read-only; scores are only ever written by the store
    let db_url = format!("sqlite://{}?mode=ro", db_path.replace('\\', "/"));
    let pool = SqlitePool::connect(&db_url)
        .await
        .context("Failed to connect to database")?;

    let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
        .bind("quiz_progress")
        .fetch_optional(&pool)
        .await
        .context("Failed to query progress")?;

    let progress: Progress = match row {
        Some(row) => {
            let value: String = row.get("value");
            serde_json::from_str(&value).context("Stored progress is not valid JSON")?
        }
        None => Progress::new(),
    };

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&progress)?;
            println!("{}", json);
        }
        _ => {
            let answered = progress.correct_count + progress.wrong_count;

            println!("Completed: {}", progress.completed_count);
            println!("Correct:   {}", progress.correct_count);
            println!("Wrong:     {}", progress.wrong_count);
            if answered > 0 {
                let accuracy = f64::from(progress.correct_count) / f64::from(answered) * 100.0;
                println!("Accuracy:  {:.0}%", accuracy);
            }
            println!("Tracking since: {}", progress.last_reset);
        }
    }

    Ok(())
}
