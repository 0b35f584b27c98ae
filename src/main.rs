use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    comicdims::logging::init().context("init logging")?;

    let cli = comicdims::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        comicdims::cli::Command::Enrich(args) => {
            comicdims::enrich::run(args).await.context("enrich")?;
        }
        comicdims::cli::Command::Merge(args) => {
            comicdims::merge::run(args).context("merge")?;
        }
        comicdims::cli::Command::Run(args) => {
            run_pipeline(args).await?;
        }
    }

    Ok(())
}

async fn run_pipeline(args: comicdims::cli::RunArgs) -> anyhow::Result<()> {
    tracing::info!(metadata = %args.metadata, store = %args.store, "run: enrich");
    comicdims::enrich::run(comicdims::cli::EnrichArgs {
        metadata: args.metadata.clone(),
        store: args.store.clone(),
        concurrency: args.concurrency,
        timeout_secs: args.timeout_secs,
        flush_every: args.flush_every,
    })
    .await
    .context("enrich")?;

    tracing::info!(out = %args.out, "run: merge");
    comicdims::merge::run(comicdims::cli::MergeArgs {
        metadata: args.metadata,
        store: args.store,
        out: args.out,
    })
    .context("merge")?;

    Ok(())
}
