//! Retrieval of raw processor records from static JSON documents.
//!
//! A document is either a bare array of records or an object with a `data` array.
//! All sources are fetched concurrently and their records merged in source order;
//! one failing source fails the whole load.

use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{fmt::Display, path::PathBuf, str::FromStr};
use tracing::{debug, info};

use crate::common::Client;

/// Where a JSON document of processor records lives.
#[derive(Debug, Clone, PartialEq, Eq, SerializeDisplay, DeserializeFromStr)]
pub enum Source {
    Url(String),
    File(PathBuf),
}

impl FromStr for Source {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            bail!("empty source");
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Ok(Self::Url(s.to_string()))
        } else {
            Ok(Self::File(PathBuf::from(s)))
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SourceDocument {
    List(Vec<Value>),
    Wrapped { data: Vec<Value> },
}

impl SourceDocument {
    fn into_records(self) -> Vec<Value> {
        match self {
            Self::List(records) => records,
            Self::Wrapped { data } => data,
        }
    }
}

/// Parse one source document.
pub fn parse_document(text: &str) -> anyhow::Result<Vec<Value>> {
    let document: SourceDocument = serde_json::from_str(text)
        .context("expected a JSON array of records, or an object with a `data` array")?;
    Ok(document.into_records())
}

/// Something that yields raw, not yet normalized, records.
#[async_trait]
pub trait RecordProducer {
    async fn produce(&self, client: &Client) -> anyhow::Result<Vec<Value>>;
}

#[async_trait]
impl RecordProducer for Source {
    async fn produce(&self, client: &Client) -> anyhow::Result<Vec<Value>> {
        let text = match self {
            Self::Url(url) => client
                .0
                .get(url.as_str())
                .send()
                .await
                .and_then(|res| res.error_for_status())
                .with_context(|| format!("could not fetch {}", url))?
                .text()
                .await
                .with_context(|| format!("could not read the response from {}", url))?,
            Self::File(path) => tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("could not read {}", path.display()))?,
        };

        let records = parse_document(&text).with_context(|| format!("in source {}", self))?;
        debug!(source = %self, count = records.len(), "fetched source");
        Ok(records)
    }
}

/// Fetch every source at once and merge their records in the order the sources were given.
///
/// # Errors
/// Errors if no sources are given, or if any one of them can't be fetched or parsed.
pub async fn fetch_all(client: &Client, sources: &[Source]) -> anyhow::Result<Vec<Value>> {
    if sources.is_empty() {
        bail!("no sources configured");
    }

    let batches =
        futures::future::try_join_all(sources.iter().map(|source| source.produce(client))).await?;
    let records: Vec<Value> = batches.into_iter().flatten().collect();

    info!(
        sources = sources.len(),
        records = records.len(),
        "fetched processor records"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf};

    use serde_json::json;

    use super::{fetch_all, parse_document, Source};
    use crate::{common::Client, config::HttpConfig};

    fn client() -> Client {
        Client::new(&HttpConfig::default()).unwrap()
    }

    fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> Source {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        Source::File(path)
    }

    #[test]
    fn test_parse_source() {
        assert_eq!(
            "https://example.org/a.json".parse::<Source>().unwrap(),
            Source::Url("https://example.org/a.json".into())
        );
        assert_eq!(
            "HTTP://example.org/a.json".parse::<Source>().unwrap(),
            Source::Url("HTTP://example.org/a.json".into())
        );
        assert_eq!(
            " data/socs.json ".parse::<Source>().unwrap(),
            Source::File(PathBuf::from("data/socs.json"))
        );
        assert!("   ".parse::<Source>().is_err());
    }

    #[test]
    fn test_parse_document_shapes() {
        assert_eq!(
            parse_document(r#"[{"name": "A"}, {"name": "B"}]"#).unwrap(),
            vec![json!({"name": "A"}), json!({"name": "B"})]
        );
        assert_eq!(
            parse_document(r#"{"data": [{"name": "C"}]}"#).unwrap(),
            vec![json!({"name": "C"})]
        );
        assert!(parse_document(r#"{"name": "lonely"}"#).is_err());
        assert!(parse_document("not json").is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_merges_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_source(&dir, "apple.json", r#"[{"name": "M1"}, {"name": "M2"}]"#);
        let second = write_source(&dir, "google.json", r#"{"data": [{"name": "Tensor G3"}]}"#);

        let records = fetch_all(&client(), &[first, second]).await.unwrap();
        let names: Vec<&str> = records
            .iter()
            .map(|r| r["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["M1", "M2", "Tensor G3"]);
    }

    #[tokio::test]
    async fn test_fetch_all_fails_on_any_source() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_source(&dir, "good.json", r#"[{"name": "M1"}]"#);
        let missing = Source::File(dir.path().join("missing.json"));
        assert!(fetch_all(&client(), &[good, missing]).await.is_err());
    }

    #[tokio::test]
    async fn test_fetch_all_needs_sources() {
        assert!(fetch_all(&client(), &[]).await.is_err());
    }
}
