mod commands;
mod ingest;
mod report;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use vobvoc_reply::Tone;

use crate::commands::FilterArgs;

#[derive(Debug, Parser)]
#[command(name = "vobvoc")]
#[command(about = "Compare brand promises (VoB) with customer reviews (VoC)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Check whether a review file is fit for analysis
    Quality {
        /// Review file (.json, .yaml, .yml)
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Classify reviews and write the labelled rows as JSON
    Analyze {
        /// Review file (.json, .yaml, .yml)
        file: PathBuf,

        /// Output path; prints to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Score each product and list its top issues
    Report {
        /// Review file (.json, .yaml, .yml)
        file: PathBuf,

        /// Restrict the report to one product name
        #[arg(long)]
        product: Option<String>,

        #[command(flatten)]
        filter: FilterArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare products by risk, issues, and next actions
    Portfolio {
        /// Review file (.json, .yaml, .yml)
        file: PathBuf,

        /// Comma-separated product names to compare (default: all)
        #[arg(long, value_delimiter = ',')]
        products: Option<Vec<String>>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write filtered rows and gap-only rows as JSON files
    Export {
        /// Review file (.json, .yaml, .yml)
        file: PathBuf,

        /// Directory for `filtered_reviews.json` and `gap_reviews.json`
        #[arg(long)]
        out_dir: PathBuf,

        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Draft a customer reply for one negative review
    Reply {
        /// Review file (.json, .yaml, .yml)
        file: PathBuf,

        /// Zero-based row index of the review
        #[arg(long)]
        index: usize,

        /// Reply tone: professional, empathetic, or firm
        #[arg(long, default_value = "professional")]
        tone: Tone,

        /// Also translate the review into Korean
        #[arg(long)]
        translate: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = vobvoc_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::Quality { file, json } => commands::run_quality(&file, json),
        Commands::Analyze { file, out } => commands::run_analyze(&file, out.as_deref()),
        Commands::Report {
            file,
            product,
            filter,
            json,
        } => commands::run_report(&config, &file, product.as_deref(), &filter, json),
        Commands::Portfolio {
            file,
            products,
            json,
        } => commands::run_portfolio(&file, products.as_deref(), json),
        Commands::Export {
            file,
            out_dir,
            filter,
        } => commands::run_export(&file, &out_dir, &filter),
        Commands::Reply {
            file,
            index,
            tone,
            translate,
        } => commands::run_reply(&config, &file, index, tone, translate).await,
    }
}
