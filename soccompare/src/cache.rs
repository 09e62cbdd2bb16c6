use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use soccompare_core::ProcessorRecord;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::sources::Source;

/// Keeps the last loaded catalog around between runs, together with the sources it was
/// loaded from.
pub trait RecordCache: Send + Sync {
    /// The cached records, if there are any, they are still fresh, and they came from
    /// exactly `sources`.
    fn get(&self, sources: &[Source]) -> Option<Vec<ProcessorRecord>>;
    fn set(&self, sources: &[Source], records: &[ProcessorRecord]) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

/// Used when caching is turned off.
pub struct NoCache;

impl RecordCache for NoCache {
    fn get(&self, _sources: &[Source]) -> Option<Vec<ProcessorRecord>> {
        None
    }

    fn set(&self, _sources: &[Source], _records: &[ProcessorRecord]) -> anyhow::Result<()> {
        Ok(())
    }

    fn clear(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CacheBlob {
    saved_at: DateTime<Utc>,
    sources: Vec<Source>,
    records: Vec<ProcessorRecord>,
}

/// Records stored as one JSON file, valid for `max_age` after they were written.
pub struct FileCache {
    path: PathBuf,
    max_age: Duration,
}

impl FileCache {
    pub fn new(path: impl AsRef<Path>, max_age: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_age,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Like [`RecordCache::get`], as of `now`.
    /// A cache written after `now` is not trusted.
    pub fn get_at(&self, sources: &[Source], now: &DateTime<Utc>) -> Option<Vec<ProcessorRecord>> {
        let text = std::fs::read_to_string(&self.path).ok()?;
        let blob: CacheBlob = match serde_json::from_str(&text) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(path = %self.path.display(), "ignoring unreadable cache: {}", e);
                return None;
            }
        };

        if blob.sources != sources {
            debug!(path = %self.path.display(), "cache was built from other sources");
            return None;
        }

        let age = now.signed_duration_since(blob.saved_at);
        if age < Duration::zero() || age >= self.max_age {
            debug!(path = %self.path.display(), age_secs = age.num_seconds(), "cache is stale");
            return None;
        }

        info!(
            path = %self.path.display(),
            records = blob.records.len(),
            "using cached processor records"
        );
        Some(blob.records)
    }

    /// Like [`RecordCache::set`], stamped with `now`.
    pub fn set_at(
        &self,
        sources: &[Source],
        records: &[ProcessorRecord],
        now: &DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let blob = CacheBlob {
            saved_at: *now,
            sources: sources.to_vec(),
            records: records.to_vec(),
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("could not create {}", parent.display()))?;
        }
        std::fs::write(&self.path, serde_json::to_vec(&blob)?)
            .with_context(|| format!("could not write cache {}", self.path.display()))?;
        debug!(path = %self.path.display(), records = records.len(), "cache written");
        Ok(())
    }
}

impl RecordCache for FileCache {
    fn get(&self, sources: &[Source]) -> Option<Vec<ProcessorRecord>> {
        self.get_at(sources, &Utc::now())
    }

    fn set(&self, sources: &[Source], records: &[ProcessorRecord]) -> anyhow::Result<()> {
        self.set_at(sources, records, &Utc::now())
    }

    fn clear(&self) -> anyhow::Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!(path = %self.path.display(), "cache cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("could not remove {}", self.path.display())),
        }
    }
}
