use std::fs::OpenOptions;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::cli::MergeArgs;
use crate::formats::Comic;
use crate::store::DimensionStore;

pub fn run(args: MergeArgs) -> anyhow::Result<()> {
    let metadata_path = PathBuf::from(&args.metadata);
    let store_path = PathBuf::from(&args.store);
    let out_path = PathBuf::from(&args.out);

    if !store_path.exists() {
        anyhow::bail!(
            "dimension store does not exist (run `enrich` first): {}",
            store_path.display()
        );
    }
    if out_path.exists() {
        anyhow::bail!("merge output already exists: {}", out_path.display());
    }

    let comics = crate::metadata::load_feed(&metadata_path).context("load metadata feed")?;
    let store =
        DimensionStore::load_or_init(&store_path, &comics).context("load dimension store")?;

    let enriched = merge(comics, &store);
    write_enriched(&out_path, &enriched)?;

    let with_dimensions = enriched.iter().filter(|c| c.width > 0).count();
    tracing::info!(
        comics = enriched.len(),
        with_dimensions,
        out = %out_path.display(),
        "merge: complete"
    );

    Ok(())
}

/// Joins each comic with its resolved dimension record. Comics without a
/// resolved record keep 0/0; none are dropped and feed order is preserved.
pub fn merge(comics: Vec<Comic>, store: &DimensionStore) -> Vec<Comic> {
    comics
        .into_iter()
        .map(|mut comic| {
            if let Some(record) = store.get(comic.id).filter(|r| r.is_resolved()) {
                comic.width = record.width;
                comic.height = record.height;
            } else {
                comic.width = 0;
                comic.height = 0;
            }
            comic
        })
        .collect()
}

fn write_enriched(out_path: &Path, comics: &[Comic]) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(out_path)
        .with_context(|| format!("create merge output: {}", out_path.display()))?;
    let mut out = BufWriter::new(file);

    for comic in comics {
        serde_json::to_writer(&mut out, comic).context("serialize enriched comic")?;
        out.write_all(b"\n").context("write enriched comic newline")?;
    }
    out.flush().context("flush merge output")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comic(id: u32) -> Comic {
        serde_json::from_str(&format!("{{\"id\":{id}}}")).expect("build comic")
    }

    #[test]
    fn merge_copies_resolved_dimensions_and_keeps_order() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let path = temp.path().join("dims.json");
        let comics = vec![comic(3), comic(1), comic(2)];

        let mut store = DimensionStore::load_or_init(&path, &comics).expect("init store");
        assert!(store.resolve(1, 740, 250));

        let enriched = merge(comics, &store);
        assert_eq!(
            enriched.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
        assert_eq!(enriched[0].width, 0);
        assert_eq!((enriched[1].width, enriched[1].height), (740, 250));
        assert_eq!(enriched[2].width, 0);
    }

    #[test]
    fn merge_zeroes_comics_without_a_matching_record() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let path = temp.path().join("dims.json");

        let store = DimensionStore::load_or_init(&path, &[comic(1)]).expect("init store");

        // Feed claims dimensions the store never resolved; merge resets them.
        let mut unmatched = comic(9);
        unmatched.width = 123;
        unmatched.height = 456;

        let enriched = merge(vec![unmatched], &store);
        assert_eq!(enriched.len(), 1);
        assert_eq!((enriched[0].width, enriched[0].height), (0, 0));
    }
}
