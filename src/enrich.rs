use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context as _;

use crate::cli::EnrichArgs;
use crate::fetch::Fetcher;
use crate::store::DimensionStore;

/// Runs one enrichment pass: every comic still at the zero sentinel gets
/// exactly one fetch attempt and exactly one persisted outcome. Per-item
/// failures keep the sentinel and never abort the batch; parse and
/// persistence failures are fatal.
pub async fn run(args: EnrichArgs) -> anyhow::Result<()> {
    let metadata_path = PathBuf::from(&args.metadata);
    let store_path = PathBuf::from(&args.store);

    let comics = crate::metadata::load_feed(&metadata_path).context("load metadata feed")?;

    let mut store =
        DimensionStore::load_or_init(&store_path, &comics).context("load dimension store")?;
    // Snapshot before any fetch: a fresh store's sentinels, and sentinels
    // appended for comics the feed gained since the store was created, must
    // reach disk even when the run has nothing left to fetch.
    store.save(&store_path).context("persist initial dimension store")?;

    let mut skipped = 0usize;
    let mut failed = 0usize;
    let mut queue: Vec<(u32, String)> = Vec::new();
    for comic in &comics {
        if store.is_resolved(comic.id) {
            skipped += 1;
            continue;
        }
        if comic.image_url.trim().is_empty() {
            failed += 1;
            tracing::warn!(id = comic.id, "comic has no image url; keeping sentinel");
            continue;
        }
        queue.push((comic.id, comic.image_url.clone()));
    }

    let fetcher =
        Fetcher::new(Duration::from_secs(args.timeout_secs)).context("build fetcher")?;
    let concurrency = args.concurrency.max(1).min(queue.len().max(1));
    let flush_every = args.flush_every.max(1);
    tracing::info!(
        pending = queue.len(),
        skipped,
        concurrency,
        flush_every,
        "enrich: start"
    );

    // Fill/drain worker loop. Workers only fetch; every outcome comes back
    // here so this loop is the sole writer of the store.
    let mut join_set = tokio::task::JoinSet::new();
    let mut next_idx = 0usize;
    let mut resolved = 0usize;
    let mut unsaved = 0usize;

    while next_idx < queue.len() || !join_set.is_empty() {
        while next_idx < queue.len() && join_set.len() < concurrency {
            let (id, image_url) = queue[next_idx].clone();
            let fetcher = fetcher.clone();
            join_set.spawn(async move {
                tracing::debug!(id, url = %image_url, "fetch image");
                (id, fetcher.fetch(&image_url).await)
            });
            next_idx += 1;
        }

        let Some(joined) = join_set.join_next().await else {
            break;
        };
        let (id, outcome) = joined.context("join image fetch task")?;
        match outcome {
            Ok((width, height)) => {
                if store.resolve(id, width, height) {
                    resolved += 1;
                    tracing::info!(id, width, height, "resolved");
                }
            }
            Err(err) => {
                failed += 1;
                tracing::warn!(id, error = %err, "fetch failed; keeping sentinel");
            }
        }

        unsaved += 1;
        if unsaved >= flush_every || join_set.is_empty() {
            store.save(&store_path).context("persist dimension store")?;
            unsaved = 0;
        }
    }

    tracing::info!(
        total = store.len(),
        resolved,
        failed,
        skipped,
        "enrich: complete"
    );

    Ok(())
}
