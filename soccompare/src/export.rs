use anyhow::bail;
use chrono::{DateTime, Utc};
use serde::Serialize;
use soccompare_core::{ComparisonResult, ComponentScores, ProcessorRecord, Winner};
use std::{fmt::Display, str::FromStr};

use crate::common::csv_field;

/// How a comparison is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub const VARIANTS: &'static [&'static str] = &["json", "csv"];
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => bail!("unknown export format {:?}", other),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Json => "json",
                Self::Csv => "csv",
            }
        )
    }
}

/// The structured form of an exported comparison.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument<'a> {
    pub exported_at: DateTime<Utc>,
    pub processors: [&'a ProcessorRecord; 2],
    pub comparison: &'a ComparisonResult,
}

pub fn to_document(result: &ComparisonResult) -> ExportDocument<'_> {
    to_document_at(result, Utc::now())
}

pub fn to_document_at(result: &ComparisonResult, exported_at: DateTime<Utc>) -> ExportDocument<'_> {
    ExportDocument {
        exported_at,
        processors: [result.processor_a(), result.processor_b()],
        comparison: result,
    }
}

pub fn to_json(result: &ComparisonResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&to_document(result))?)
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "N/A".to_string())
}

fn verdict(result: &ComparisonResult, winner: Winner) -> String {
    match winner {
        Winner::A => result.processor_a().name.clone(),
        Winner::B => result.processor_b().name.clone(),
        Winner::Tie => "Tie".to_string(),
    }
}

/// The flat form of a comparison: one row per attribute, one column per processor.
pub fn to_csv(result: &ComparisonResult) -> String {
    let a = result.processor_a();
    let b = result.processor_b();

    let attributes: [(&str, fn(&ProcessorRecord) -> String); 17] = [
        ("Manufacturer", |r| text(&r.manufacturer)),
        ("Architecture", |r| text(&r.architecture)),
        ("Launch Date", |r| text(&r.launch_date)),
        ("CPU Frequency (GHz)", |r| r.frequency.to_string()),
        ("CPU Cores", |r| r.num_cores.to_string()),
        ("CPU Threads", |r| r.num_threads.to_string()),
        ("Fabrication Process (nm)", |r| r.fab_process.to_string()),
        ("Die Size", |r| text(&r.die_size)),
        ("GPU", |r| text(&r.gpu_name)),
        ("GPU Architecture", |r| text(&r.gpu_architecture)),
        ("GPU Cores", |r| r.gpu_cores.to_string()),
        ("GPU Clock (MHz)", |r| r.gpu_clock.to_string()),
        ("L2 Cache (MB)", |r| r.l2_cache.to_string()),
        ("L3 Cache (MB)", |r| r.l3_cache.to_string()),
        ("Max Memory (GB)", |r| r.max_memory_size.to_string()),
        ("Memory Channels", |r| r.memory_channels.to_string()),
        ("Memory Type", |r| text(&r.memory_type)),
    ];
    let scores: [(&str, fn(&ComponentScores) -> f64); 5] = [
        ("CPU Score", |s| s.cpu),
        ("GPU Score", |s| s.gpu),
        ("Memory Score", |s| s.memory),
        ("Efficiency Score", |s| s.efficiency),
        ("Cache Score", |s| s.cache),
    ];

    let mut rows: Vec<(&str, String, String)> = Vec::new();
    for (label, pick) in attributes.iter() {
        rows.push((*label, pick(a), pick(b)));
    }
    for (label, pick) in scores.iter() {
        rows.push((
            *label,
            pick(result.scores_a()).to_string(),
            pick(result.scores_b()).to_string(),
        ));
    }
    rows.push((
        "Performance Index",
        result.performance_index_a().to_string(),
        result.performance_index_b().to_string(),
    ));
    rows.push((
        "Category Wins",
        result.category_wins_a().to_string(),
        result.category_wins_b().to_string(),
    ));

    let mut out = format!("Metric,{},{}\n", csv_field(&a.name), csv_field(&b.name));
    for (label, value_a, value_b) in rows {
        out.push_str(&format!(
            "{},{},{}\n",
            csv_field(label),
            csv_field(value_a),
            csv_field(value_b)
        ));
    }
    out.push_str(&format!(
        "Winner,{},\n",
        csv_field(verdict(result, result.winner()))
    ));
    out.push_str(&format!(
        "Category Leader,{},\n",
        csv_field(verdict(result, result.category_leader()))
    ));
    out
}
