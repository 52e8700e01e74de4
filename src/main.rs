//! multicur: command-line interface for the price-range query rewriter

use anyhow::Result;
use clap::{Parser, Subcommand};
use multicur::config::AppConfig;
use multicur::feed::{build_currency_docs, snapshot_date, to_jsonl};
use multicur::query::{QueryTree, RewriteParams};
use multicur::rates::{RateSource, RatesClient, StaticRates};
use multicur::rewriter::PriceRewriter;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// multicur: currency-aware price-range query rewriting
#[derive(Parser)]
#[command(name = "multicur")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rewrite a query for a currency-converted price range
    Rewrite {
        /// Lower price bound
        #[arg(long)]
        min_price: String,

        /// Upper price bound
        #[arg(long)]
        max_price: String,

        /// Currency code the bounds are expressed in
        #[arg(long)]
        currency: String,

        /// Path to a query-tree JSON file; omitted means an empty tree
        #[arg(short, long)]
        query: Option<String>,

        /// Rates service base URL (overrides configuration)
        #[arg(long)]
        rates_url: Option<String>,
    },
    /// Convert a rate XML snapshot into currency feed documents
    Feed {
        /// Path to the rate XML file
        #[arg(short, long)]
        input: String,

        /// Output JSONL path; omitted writes to stdout
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Resolve configuration: file (if given) merged with environment overrides
fn load_config(path: Option<&str>) -> Result<AppConfig> {
    let base = match path {
        Some(path) => AppConfig::from_file(Path::new(path))?,
        None => AppConfig::default(),
    };
    Ok(base.merge_with(&AppConfig::from_env()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Rewrite {
            min_price,
            max_price,
            currency,
            query,
            rates_url,
        } => {
            let tree = match query {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)?;
                    serde_json::from_str(&content)?
                }
                None => QueryTree::new(),
            };

            let params = RewriteParams::new()
                .with_min_price(min_price)
                .with_max_price(max_price)
                .with_currency(currency);

            let source: Box<dyn RateSource> = match rates_url.as_deref().or(config.rates_url()) {
                Some(url) => {
                    tracing::info!("using rates service at {}", url);
                    match config.cache_path() {
                        Some(cache_path) => Box::new(RatesClient::with_cache(url, cache_path)?),
                        None => Box::new(RatesClient::new(url)),
                    }
                }
                None => {
                    tracing::info!("no rates service configured, using built-in tables");
                    Box::new(StaticRates::builtin())
                }
            };

            let rewriter = PriceRewriter::with_config(config.rewrite_config());
            let rewritten = rewriter.rewrite(tree, &params, source.as_ref());

            println!("{}", serde_json::to_string_pretty(&rewritten)?);
            Ok(())
        }
        Commands::Feed { input, output } => {
            let xml = std::fs::read_to_string(&input)?;

            if let Some(date) = snapshot_date(&xml) {
                eprintln!("Rate snapshot dated {}", date.format("%Y-%m-%d"));
            }

            let docs = build_currency_docs(&xml)?;
            let jsonl = to_jsonl(&docs)?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &jsonl)?;
                    eprintln!("Wrote {} currency documents to {}", docs.len(), path);
                }
                None => print!("{}", jsonl),
            }
            Ok(())
        }
    }
}
