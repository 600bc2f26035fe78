use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::io;
use textindex::loader::load_documents;
use textindex::retrieval::DEFAULT_CONTEXT_SIZE;
use textindex::{InvertedIndex, ResultRetriever, Statistics};
use tracing_subscriber::{fmt, EnvFilter};

mod shell;

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Index a folder of text files and search it", long_about = None)]
struct Cli {
    /// Directory holding the .txt documents
    #[arg(long, default_value = "./docs")]
    dir: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one query and print the ranked results
    Search {
        query: String,
        /// Match documents containing any term instead of all of them
        #[arg(long, default_value_t = false)]
        any: bool,
        /// Result cap; 0 or less prints every result
        #[arg(long, default_value_t = 10, allow_hyphen_values = true)]
        max_results: i64,
        /// Words of context on each side of a snippet hit
        #[arg(long, default_value_t = DEFAULT_CONTEXT_SIZE)]
        context: usize,
    },
    /// Print corpus statistics, or one document's with --doc
    Stats {
        #[arg(long)]
        doc: Option<String>,
        /// How many frequent words to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Interactive menu: search, statistics, quit
    Shell,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let documents = load_documents(&cli.dir)?;
    if documents.is_empty() {
        bail!("no .txt files found in {}", cli.dir);
    }
    let mut index = InvertedIndex::new();
    index.build(&documents)?;
    let stats = Statistics::new(&index, &documents);

    match cli.command {
        Commands::Search { query, any, max_results, context } => {
            let retriever = ResultRetriever::new(&index, &documents)?.with_context_size(context);
            println!("{}", retriever.display_results(&query, !any, max_results));
        }
        Commands::Stats { doc: Some(doc), .. } => {
            println!("{}", stats.display_document_stats(&doc));
        }
        Commands::Stats { doc: None, top } => {
            println!("{}", stats.display_general_stats());
            println!("{}", stats.display_most_frequent_words(top));
        }
        Commands::Shell => {
            let retriever = ResultRetriever::new(&index, &documents)?;
            let stdin = io::stdin();
            shell::run(stdin.lock(), io::stdout(), &retriever, &stats)?;
        }
    }
    Ok(())
}
