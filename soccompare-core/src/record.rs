use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

use crate::common::{LenientNumber, LenientText};

/// Fabrication node substituted when the source does not give a usable one.
/// It ranks as the worst possible process in every comparison.
pub const UNKNOWN_FAB_PROCESS: u32 = 999;

/// One processor in the catalog, with every numeric attribute defined.
///
/// Deserializing a [`ProcessorRecord`] always goes through the normalizer, so a record
/// read back from any JSON source (including one serialized by this crate) is well formed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawProcessorRecord")]
pub struct ProcessorRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    /// GHz
    pub frequency: f64,
    pub num_cores: u32,
    pub num_threads: u32,
    /// nm
    pub fab_process: u32,
    pub gpu_cores: u32,
    /// MHz
    pub gpu_clock: f64,
    /// MB
    pub l2_cache: u32,
    /// MB
    pub l3_cache: u32,
    /// GB
    pub max_memory_size: u32,
    pub memory_channels: u32,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub die_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu_architecture: Option<String>,
}

impl Default for ProcessorRecord {
    fn default() -> Self {
        RawProcessorRecord::default().into()
    }
}

impl ProcessorRecord {
    /// Combined L2 and L3 cache, in MB.
    pub fn total_cache(&self) -> u32 {
        self.l2_cache.saturating_add(self.l3_cache)
    }
}

/// Coerce any JSON value into a [`ProcessorRecord`].
///
/// Never fails: anything that is not an object becomes an all-default record, and
/// every field that is missing or unparseable falls back to its default.
pub fn normalize(raw: &serde_json::Value) -> ProcessorRecord {
    /* a struct also deserializes from a sequence, by position */
    if !raw.is_object() {
        return ProcessorRecord::default();
    }
    RawProcessorRecord::deserialize(raw)
        .unwrap_or_default()
        .into()
}

/// A record as it appears in the source data, every field optional.
#[serde_as]
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawProcessorRecord {
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    name: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    manufacturer: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    frequency: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    num_cores: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    num_threads: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    fab_process: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    gpu_cores: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    gpu_clock: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    l2_cache: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    l3_cache: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    max_memory_size: Option<f64>,
    #[serde_as(as = "DefaultOnError<Option<LenientNumber>>")]
    memory_channels: Option<f64>,

    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    architecture: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    launch_date: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    die_size: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    memory_type: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    gpu_name: Option<String>,
    #[serde_as(as = "DefaultOnError<Option<LenientText>>")]
    gpu_architecture: Option<String>,
}

/// Non-negative real, or 0.
fn real(value: Option<f64>) -> f64 {
    value
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

/// Non-negative whole number (truncated), or 0.
fn whole(value: Option<f64>) -> u32 {
    value
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(|v| v.trunc() as u32)
        .unwrap_or(0)
}

impl From<RawProcessorRecord> for ProcessorRecord {
    fn from(raw: RawProcessorRecord) -> Self {
        let fab_process = match whole(raw.fab_process) {
            0 => UNKNOWN_FAB_PROCESS,
            nm => nm,
        };

        Self {
            name: raw.name.unwrap_or_default(),
            manufacturer: raw.manufacturer,
            frequency: real(raw.frequency),
            num_cores: whole(raw.num_cores),
            num_threads: whole(raw.num_threads),
            fab_process,
            gpu_cores: whole(raw.gpu_cores),
            gpu_clock: real(raw.gpu_clock),
            l2_cache: whole(raw.l2_cache),
            l3_cache: whole(raw.l3_cache),
            max_memory_size: whole(raw.max_memory_size),
            memory_channels: whole(raw.memory_channels),
            architecture: raw.architecture,
            launch_date: raw.launch_date,
            die_size: raw.die_size,
            memory_type: raw.memory_type,
            gpu_name: raw.gpu_name,
            gpu_architecture: raw.gpu_architecture,
        }
    }
}
