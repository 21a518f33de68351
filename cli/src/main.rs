use anyhow::Result;
use clap::{Parser, Subcommand};
use search_cli::{build_server, load_documents, resolve_stop_words, run_find, run_ids, run_match, Filter};
use search_core::{DocId, DocumentStatus};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank documents by TF-IDF with minus-words and stop-words", long_about = None)]
struct Cli {
    /// Input path (.json / .jsonl file or directory)
    #[arg(long)]
    docs: PathBuf,
    /// Space separated stop-words; falls back to SEARCH_STOP_WORDS
    #[arg(long)]
    stop_words: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Top documents for a query, ACTUAL only unless filtered
    Find {
        #[arg(allow_hyphen_values = true)]
        query: String,
        #[arg(long, conflicts_with = "min_rating")]
        status: Option<DocumentStatus>,
        #[arg(long)]
        min_rating: Option<i32>,
    },
    /// Query words found in one document
    Match {
        #[arg(allow_hyphen_values = true)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
    /// Document ids in insertion order
    Ids,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    let docs = load_documents(&cli.docs)?;
    let server = build_server(&resolve_stop_words(cli.stop_words), &docs)?;

    match cli.command {
        Commands::Find { query, status, min_rating } => {
            let filter = status.map(Filter::Status).or(min_rating.map(Filter::MinRating));
            print_json(&run_find(&server, &query, filter)?)
        }
        Commands::Match { query, id } => print_json(&run_match(&server, &query, id)?),
        Commands::Ids => print_json(&run_ids(&server)?),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
