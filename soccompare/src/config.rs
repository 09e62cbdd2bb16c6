use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{
    cache::{FileCache, NoCache, RecordCache},
    sources::Source,
};

pub const DEFAULT_CONFIG_PATH: &str = "soccompare.toml";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub sources: Vec<Source>,
    pub cache: CacheConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub max_age_hours: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: Vec::new(),
            cache: CacheConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: ".soccompare-cache.json".into(),
            max_age_hours: 24,
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: concat!("soccompare/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl CacheConfig {
    pub fn max_age(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.max_age_hours))
    }

    /// The cache described by this section, or a no-op one when caching is off.
    pub fn open(&self) -> Box<dyn RecordCache> {
        if self.enabled {
            Box::new(FileCache::new(&self.path, self.max_age()))
        } else {
            Box::new(NoCache)
        }
    }
}

impl Config {
    /// Parse a TOML document.
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load config from a TOML file. Falls back to defaults if the file doesn't exist
    /// or can't be parsed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!("Config file {} not found, using defaults", path.display());
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    tracing::info!("Config loaded from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {e}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read {}: {e}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
