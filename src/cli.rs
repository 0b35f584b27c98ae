use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Enrich(EnrichArgs),
    Merge(MergeArgs),
    Run(RunArgs),
}

#[derive(Debug, Args)]
pub struct EnrichArgs {
    /// Input path to the comic metadata feed (JSONL, one comic per line).
    #[arg(long)]
    pub metadata: String,

    /// Path to the dimension store file (created if missing).
    #[arg(long)]
    pub store: String,

    /// Maximum concurrent image fetches.
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Total per-request timeout for image fetches.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Persist a store snapshot after this many completed outcomes.
    #[arg(long, default_value_t = 1)]
    pub flush_every: usize,
}

#[derive(Debug, Args)]
pub struct MergeArgs {
    /// Input path to the comic metadata feed (JSONL, one comic per line).
    #[arg(long)]
    pub metadata: String,

    /// Path to an existing dimension store file (created by `enrich`).
    #[arg(long)]
    pub store: String,

    /// Output file path for the enriched JSONL handed to the seed sink.
    #[arg(long)]
    pub out: String,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Input path to the comic metadata feed (JSONL, one comic per line).
    #[arg(long)]
    pub metadata: String,

    /// Path to the dimension store file (created if missing).
    #[arg(long)]
    pub store: String,

    /// Output file path for the enriched JSONL handed to the seed sink.
    #[arg(long)]
    pub out: String,

    /// Maximum concurrent image fetches.
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Total per-request timeout for image fetches.
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Persist a store snapshot after this many completed outcomes.
    #[arg(long, default_value_t = 1)]
    pub flush_every: usize,
}
