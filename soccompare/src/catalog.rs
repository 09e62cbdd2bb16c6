use serde::Serialize;
use serde_json::Value;
use soccompare_core::{normalize, ComparisonResult, ComponentScores, ProcessorRecord};
use std::{convert::Infallible, str::FromStr};
use tracing::info;

use crate::{
    cache::RecordCache,
    common::Client,
    sources::{fetch_all, Source},
};

/// Picks a processor out of a catalog, either by position or by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Index(usize),
    Name(String),
}

impl FromStr for Selector {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Name(s.trim().to_string()),
        })
    }
}

#[derive(Serialize)]
pub struct CatalogEntry<'a> {
    pub index: usize,
    #[serde(flatten)]
    pub record: &'a ProcessorRecord,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub rank: usize,
    pub index: usize,
    pub name: String,
    pub scores: ComponentScores,
    pub performance_index: f64,
}

/// The normalized records a comparison can choose from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    records: Vec<ProcessorRecord>,
}

impl From<Vec<ProcessorRecord>> for Catalog {
    fn from(records: Vec<ProcessorRecord>) -> Self {
        Self { records }
    }
}

impl Catalog {
    pub fn from_raw(raw: &[Value]) -> Self {
        Self {
            records: raw.iter().map(normalize).collect(),
        }
    }

    /// Load the catalog from the cache if it is fresh and was built from the same
    /// `sources`, otherwise from `sources`, refreshing the cache.
    ///
    /// # Errors
    /// Errors if the cache misses and any source fails. A failure to write the cache
    /// is only logged.
    pub async fn load(
        sources: &[Source],
        client: &Client,
        cache: &dyn RecordCache,
    ) -> anyhow::Result<Self> {
        if let Some(records) = cache.get(sources) {
            return Ok(Self::from(records));
        }

        let raw = fetch_all(client, sources).await?;
        let catalog = Self::from_raw(&raw);
        info!(records = catalog.len(), "catalog loaded");

        if let Err(e) = cache.set(sources, &catalog.records) {
            tracing::warn!("Failed to cache processor records: {:#}", e);
        }
        Ok(catalog)
    }

    pub fn records(&self) -> &[ProcessorRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ProcessorRecord> {
        self.records.get(index)
    }

    pub fn entries(&self) -> impl Iterator<Item = CatalogEntry<'_>> {
        self.records
            .iter()
            .enumerate()
            .map(|(index, record)| CatalogEntry { index, record })
    }

    /// Records whose name or manufacturer contains `query`, ignoring case.
    /// An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<CatalogEntry<'_>> {
        let query = query.trim().to_lowercase();
        self.entries()
            .filter(|entry| {
                query.is_empty()
                    || entry.record.name.to_lowercase().contains(&query)
                    || entry
                        .record
                        .manufacturer
                        .as_ref()
                        .map(|m| m.to_lowercase().contains(&query))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// Position of the selected record. Names match exactly, ignoring case; the first
    /// match wins since names are not unique.
    pub fn resolve(&self, selector: &Selector) -> Option<usize> {
        match selector {
            Selector::Index(index) => Some(*index).filter(|i| *i < self.len()),
            Selector::Name(name) => {
                let name = name.to_lowercase();
                self.records
                    .iter()
                    .position(|record| record.name.to_lowercase() == name)
            }
        }
    }

    pub fn compare(
        &self,
        a: Option<usize>,
        b: Option<usize>,
    ) -> soccompare_core::Result<ComparisonResult> {
        soccompare_core::compare_selection(&self.records, a, b)
    }

    /// Every record with its scores, best performance index first.
    /// Records with equal indices keep their catalog order.
    pub fn ranked(&self) -> Vec<RankedEntry> {
        let mut entries: Vec<RankedEntry> = self
            .records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let scores = ComponentScores::of(record);
                RankedEntry {
                    rank: 0,
                    index,
                    name: record.name.clone(),
                    performance_index: scores.performance_index(),
                    scores,
                }
            })
            .collect();

        entries.sort_by(|a, b| {
            b.performance_index
                .partial_cmp(&a.performance_index)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        for (position, entry) in entries.iter_mut().enumerate() {
            entry.rank = position + 1;
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;
    use soccompare_core::{normalize, Error, ProcessorRecord, SelectionError, Winner};

    use super::{Catalog, Selector};
    use crate::{
        cache::{NoCache, RecordCache},
        common::Client,
        config::HttpConfig,
        sources::Source,
    };

    fn catalog() -> Catalog {
        Catalog::from_raw(&[
            json!({ "name": "Apple M2", "manufacturer": "Apple", "numCores": 8, "frequency": 3.49, "fabProcess": 5 }),
            json!({ "name": "Snapdragon 8 Gen 3", "manufacturer": "Qualcomm", "numCores": 8, "frequency": 3.3, "fabProcess": 4, "gpuCores": 12 }),
            json!({ "name": "Exynos 2400", "manufacturer": "Samsung", "numCores": 10, "frequency": 3.2, "fabProcess": 4 }),
            json!({ "name": "apple m2", "numCores": 8, "frequency": 3.49, "fabProcess": 5 }),
        ])
    }

    /// In-memory cache that remembers what was stored, and from which sources.
    #[derive(Default)]
    struct MemoryCache(Mutex<Option<(Vec<Source>, Vec<ProcessorRecord>)>>);

    impl RecordCache for MemoryCache {
        fn get(&self, sources: &[Source]) -> Option<Vec<ProcessorRecord>> {
            match &*self.0.lock().unwrap() {
                Some((cached, records)) if cached == sources => Some(records.clone()),
                _ => None,
            }
        }

        fn set(&self, sources: &[Source], records: &[ProcessorRecord]) -> anyhow::Result<()> {
            *self.0.lock().unwrap() = Some((sources.to_vec(), records.to_vec()));
            Ok(())
        }

        fn clear(&self) -> anyhow::Result<()> {
            *self.0.lock().unwrap() = None;
            Ok(())
        }
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!("3".parse::<Selector>().unwrap(), Selector::Index(3));
        assert_eq!(
            " Apple M2 ".parse::<Selector>().unwrap(),
            Selector::Name("Apple M2".into())
        );
    }

    #[test]
    fn test_search() {
        let catalog = catalog();
        let names = |query: &str| -> Vec<usize> {
            catalog.search(query).iter().map(|e| e.index).collect()
        };
        assert_eq!(names("apple"), vec![0, 3]);
        assert_eq!(names("QUALCOMM"), vec![1]);
        assert_eq!(names("gen"), vec![1]);
        assert_eq!(names(""), vec![0, 1, 2, 3]);
        assert!(names("tensor").is_empty());
    }

    #[test]
    fn test_resolve() {
        let catalog = catalog();
        assert_eq!(catalog.resolve(&Selector::Index(2)), Some(2));
        assert_eq!(catalog.resolve(&Selector::Index(9)), None);
        assert_eq!(catalog.resolve(&Selector::Name("APPLE M2".into())), Some(0));
        assert_eq!(catalog.resolve(&Selector::Name("Tensor G3".into())), None);
    }

    #[test]
    fn test_compare_rejects_same_record() {
        let catalog = catalog();
        match catalog.compare(Some(2), Some(2)) {
            Err(Error::InvalidSelection(SelectionError::SameRecord(2))) => {}
            other => panic!("expected rejection, got {:?}", other),
        }
        let result = catalog.compare(Some(0), Some(3)).unwrap();
        assert_eq!(result.winner(), Winner::Tie);
    }

    #[test]
    fn test_ranked() {
        let catalog = catalog();
        let ranked = catalog.ranked();
        assert_eq!(ranked.len(), 4);
        assert_eq!(ranked[0].name, "Snapdragon 8 Gen 3");
        assert_eq!(ranked[0].rank, 1);
        for pair in ranked.windows(2) {
            assert!(pair[0].performance_index >= pair[1].performance_index);
        }
        /* the two identical M2 records keep catalog order */
        let m2: Vec<usize> = ranked
            .iter()
            .filter(|e| e.name.to_lowercase() == "apple m2")
            .map(|e| e.index)
            .collect();
        assert_eq!(m2, vec![0, 3]);
    }

    #[tokio::test]
    async fn test_load_prefers_cache() {
        let cache = MemoryCache::default();
        let cached = vec![normalize(&json!({ "name": "Cached" }))];
        cache.set(&[], &cached).unwrap();

        let client = Client::new(&HttpConfig::default()).unwrap();
        /* no sources: would fail if it went past the cache */
        let catalog = Catalog::load(&[], &client, &cache).await.unwrap();
        assert_eq!(catalog.records(), cached.as_slice());
    }

    #[tokio::test]
    async fn test_load_fills_cache() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("socs.json");
        std::fs::write(&path, r#"[{"name": "M3", "numCores": "8"}]"#).unwrap();

        let cache = MemoryCache::default();
        let client = Client::new(&HttpConfig::default()).unwrap();
        let sources = vec![Source::File(path)];
        let catalog = Catalog::load(&sources, &client, &cache).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).unwrap().num_cores, 8);
        assert_eq!(cache.get(&sources).unwrap(), catalog.records());
    }

    #[tokio::test]
    async fn test_load_with_extra_source_skips_cache() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("apple.json");
        let extra = dir.path().join("google.json");
        std::fs::write(&first, r#"[{"name": "M3"}]"#).unwrap();
        std::fs::write(&extra, r#"{"data": [{"name": "Tensor G3"}]}"#).unwrap();

        let cache = MemoryCache::default();
        let client = Client::new(&HttpConfig::default()).unwrap();
        let configured = vec![Source::File(first.clone())];
        assert_eq!(Catalog::load(&configured, &client, &cache).await.unwrap().len(), 1);

        let widened = vec![Source::File(first), Source::File(extra)];
        let catalog = Catalog::load(&widened, &client, &cache).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name, "Tensor G3");
        assert!(cache.get(&configured).is_none());
        assert_eq!(cache.get(&widened).unwrap(), catalog.records());
    }

    #[tokio::test]
    async fn test_load_without_sources_fails() {
        let client = Client::new(&HttpConfig::default()).unwrap();
        assert!(Catalog::load(&[], &client, &NoCache).await.is_err());
    }
}
