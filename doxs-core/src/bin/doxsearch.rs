//! Command-line search over a DOXS index.
//!
//! Runs one query and prints the ranked documents, best match first.
//!
//! ## Usage
//!
//! Built only with the `cli` feature.
//!
//! ```bash
//! cargo install --path doxs-core --features cli
//!
//! # every document mentioning words starting with "pars"
//! doxsearch search.idx pars
//!
//! # must mention "token", must not mention "lexer"
//! doxsearch search.idx +token -lexer parser
//!
//! # top five only
//! doxsearch --limit 5 search.idx tree
//! ```
//!
//! Set `RUST_LOG=doxs_core=debug` to trace bucket lookups.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use doxs_core::{RankedDocument, SearchConfig, Searcher};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "doxsearch")]
#[command(about = "Search a precomputed DOXS index", long_about = None)]
struct Args {
    /// Path to the index file
    #[arg(env = "DOXSEARCH_INDEX")]
    index: PathBuf,

    /// Query words; prefix with + to require a word or - to exclude it
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,

    /// Show at most this many documents
    #[arg(long)]
    limit: Option<usize>,

    /// Match index words byte for byte instead of ignoring ASCII case
    #[arg(long)]
    case_sensitive: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = if args.case_sensitive {
        SearchConfig::exact()
    } else {
        SearchConfig::default()
    };
    config.limit = args.limit;

    let query = args.query.join(" ");
    let docs = Searcher::with_config(config)
        .search_file(&args.index, &query)
        .with_context(|| format!("searching {} for {query:?}", args.index.display()))?;
    info!(found = docs.len(), "query finished");

    report(&docs);
    Ok(())
}

fn report(docs: &[RankedDocument]) {
    println!("{}", matches_text(docs.len()));

    for (num, doc) in docs.iter().enumerate() {
        println!("{:>4}. {} <{}> ({:.1})", num + 1, doc.name, doc.url, doc.rank);

        let hits: Vec<String> = doc
            .contributions
            .iter()
            .map(|c| format!("{}[{}]({})", c.word, c.matched_suffix(), c.frequency))
            .collect();
        println!("      Matches: {}", hits.join(" "));
    }
}

fn matches_text(found: usize) -> String {
    match found {
        0 => "Sorry, no documents matching your query.".to_owned(),
        1 => "Found 1 document matching your query.".to_owned(),
        n => format!("Found {n} documents matching your query. Showing best matches first."),
    }
}
