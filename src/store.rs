use std::collections::HashMap;
use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;

use crate::formats::{Comic, DimensionRecord};

/// Durable mapping from comic id to its last-known dimension outcome.
/// Records stay in original feed order; each id owns exactly one slot, so a
/// run can never emit two contradicting outcomes for the same comic.
#[derive(Debug)]
pub struct DimensionStore {
    records: Vec<DimensionRecord>,
    index: HashMap<u32, usize>,
}

impl DimensionStore {
    /// Loads the snapshot at `path` if one exists, otherwise initializes one
    /// sentinel record per comic. A loaded store gains sentinels for feed ids
    /// it has not seen yet (the feed grows over time); existing records are
    /// kept as-is.
    pub fn load_or_init(path: &Path, comics: &[Comic]) -> anyhow::Result<Self> {
        let mut records = if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("read dimension store: {}", path.display()))?;
            serde_json::from_str::<Vec<DimensionRecord>>(&contents)
                .with_context(|| format!("parse dimension store: {}", path.display()))?
        } else {
            Vec::with_capacity(comics.len())
        };

        let mut index: HashMap<u32, usize> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| (record.id, idx))
            .collect();

        for comic in comics {
            if index.contains_key(&comic.id) {
                continue;
            }
            index.insert(comic.id, records.len());
            records.push(DimensionRecord::sentinel(comic.id));
        }

        Ok(Self { records, index })
    }

    /// Serializes the full ordered record list over `path`, via a temp file
    /// in the same directory renamed into place. A crash mid-save leaves the
    /// prior snapshot intact, never a truncated file.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let parent_dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let mut temp = match parent_dir {
            Some(dir) => tempfile::NamedTempFile::new_in(dir),
            None => tempfile::NamedTempFile::new_in("."),
        }
        .with_context(|| format!("create temp file for store: {}", path.display()))?;

        serde_json::to_writer_pretty(&mut temp, &self.records)
            .context("serialize dimension store")?;
        temp.write_all(b"\n").context("write store trailing newline")?;
        temp.flush().context("flush dimension store")?;
        temp.persist(path)
            .with_context(|| format!("persist dimension store: {}", path.display()))?;

        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&DimensionRecord> {
        self.index.get(&id).map(|&idx| &self.records[idx])
    }

    pub fn is_resolved(&self, id: u32) -> bool {
        self.get(id).is_some_and(DimensionRecord::is_resolved)
    }

    /// Transitions an unresolved record to resolved. Returns false without
    /// touching the store when the id is unknown or already resolved:
    /// resolved dimensions are final.
    pub fn resolve(&mut self, id: u32, width: u32, height: u32) -> bool {
        let Some(&idx) = self.index.get(&id) else {
            return false;
        };
        let record = &mut self.records[idx];
        if record.is_resolved() || width == 0 {
            return false;
        }
        record.width = width;
        record.height = height;
        true
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn resolved_count(&self) -> usize {
        self.records.iter().filter(|r| r.is_resolved()).count()
    }
}
