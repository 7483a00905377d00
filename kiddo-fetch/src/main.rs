use anyhow::{Context, Result};
use clap::Parser;
use libkiddo::logging::{self, LogFormat, LoggingConfig};
use libkiddo::store::FetchOutcome;
use libkiddo::{Category, Config, ContentStore};

#[derive(Parser, Debug)]
#[command(name = "kiddo-fetch")]
#[command(version, about = "Fetch learning content for a category")]
#[command(long_about = r#"Fetch learning content for a category, filling the offline cache.

Content comes from the remote learning endpoint and every successful page is
written to the local cache, so later fetches keep working without a network
connection. The arithmetic category (math) is generated locally and never
touches the network.

EXAMPLES:
    # Fetch the first page of animal content
    kiddo-fetch animal

    # Fetch three pages of fruit content
    kiddo-fetch fruit --pages 3

    # Discard held items and start over from page 1
    kiddo-fetch animal --reset

    # Generate a batch of arithmetic questions (works offline)
    kiddo-fetch math

    # JSON output for scripting
    kiddo-fetch flower --format json
    kiddo-fetch flower --format json | jq '.[] | .title'

    # JSONL output (one JSON object per line)
    kiddo-fetch letter --format jsonl
    kiddo-fetch letter --format jsonl | head -3

OUTPUT FORMATS:
    text  - Human-readable lines with id and title (default)
    json  - JSON array (complete data structure)
    jsonl - JSON lines, one item per line (streaming-friendly)

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (configuration, storage, etc.)
    2 - Content unavailable (network failed and no offline copy exists)
    3 - Invalid category
"#)]
struct Args {
    /// Content category to fetch
    #[arg(value_name = "CATEGORY")]
    #[arg(help = "Category: letter, animal, number, vegetable, fruit, flower, or math")]
    category: String,

    /// Discard held items and restart pagination from the first page
    #[arg(short, long)]
    reset: bool,

    /// Number of pages to fetch
    #[arg(short, long, default_value = "1", value_name = "N")]
    #[arg(help = "How many pages to fetch before printing (default: 1)")]
    pages: u32,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(help = "Output format: text (human-readable), json (array), or jsonl (streaming)")]
    #[arg(value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        LoggingConfig::new(LogFormat::Text, "debug".to_string(), true).init();
    } else {
        logging::init_default();
    }

    tracing::debug!("kiddo-fetch started with args: {:?}", args);

    let category: Category = match args.category.parse() {
        Ok(category) => category,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(3);
        }
    };

    let config = Config::load_or_default().context("Failed to load configuration")?;
    let store = ContentStore::from_config(&config)
        .await
        .context("Failed to initialize content store")?;

    let outcome = store
        .fetch_by_category(category, args.reset)
        .await
        .context("Failed to access the offline cache")?;

    if outcome == FetchOutcome::Failed {
        eprintln!("Error: content unavailable (network failed and no offline copy exists)");
        std::process::exit(2);
    }
    tracing::debug!("initial fetch: {}", outcome);

    // The first call loaded page 1 (or the cache); keep paginating until the
    // requested page count or the end of the data
    for _ in 1..args.pages {
        match store
            .fetch_more(category)
            .await
            .context("Failed to update the offline cache")?
        {
            FetchOutcome::Exhausted => break,
            FetchOutcome::Failed => {
                eprintln!("Warning: pagination failed, printing what loaded so far");
                break;
            }
            other => tracing::debug!("pagination fetch: {}", other),
        }
    }

    let items = store.items();

    match args.format.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&items)?;
            println!("{}", json);
        }
        "jsonl" => {
            for item in items {
                let json = serde_json::to_string(&item)?;
                println!("{}", json);
            }
        }
        _ => {
            for item in items {
                if let Some(ref question) = item.question {
                    println!("{} | {} | {}", item.id, item.title, question);
                } else {
                    println!("{} | {}", item.id, item.title);
                }
            }
        }
    }

    Ok(())
}
