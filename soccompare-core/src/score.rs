//! Component scores and the weighted performance index.
//!
//! Each component scales a few raw attributes against a reference "high end" value so a
//! top-tier chip lands near 100. Components are clamped to `[0, 100]` and rounded to one
//! decimal before they are weighted, and the index is computed from those rounded values.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{common::round_tenth, record::ProcessorRecord};

/// Category weights of the performance index, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weights {
    pub cpu: u32,
    pub gpu: u32,
    pub memory: u32,
    pub efficiency: u32,
    pub cache: u32,
}

impl Weights {
    pub const fn total(&self) -> u32 {
        self.cpu + self.gpu + self.memory + self.efficiency + self.cache
    }
}

pub const WEIGHTS: Weights = Weights {
    cpu: 40,
    gpu: 30,
    memory: 15,
    efficiency: 10,
    cache: 5,
};

const _: () = assert!(WEIGHTS.total() == 100);

fn factor(percent: u32) -> f64 {
    f64::from(percent) / 100.0
}

/// Five sub-scores of one processor, each in `[0, 100]` with one decimal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    pub cpu: f64,
    pub gpu: f64,
    pub memory: f64,
    pub efficiency: f64,
    pub cache: f64,
}

fn capped(value: f64) -> f64 {
    round_tenth(value.clamp(0.0, 100.0))
}

impl ComponentScores {
    pub fn of(record: &ProcessorRecord) -> Self {
        let cores = f64::from(record.num_cores);
        let threads = f64::from(record.num_threads);
        let gpu_cores = f64::from(record.gpu_cores);
        let memory_size = f64::from(record.max_memory_size);
        let channels = f64::from(record.memory_channels);
        let fab_process = f64::from(record.fab_process);
        let l2 = f64::from(record.l2_cache);
        let l3 = f64::from(record.l3_cache);

        let cpu = (cores / 12.0) * 40.0 + (record.frequency / 4.0) * 40.0 + (threads / 16.0) * 20.0;
        let gpu = (gpu_cores / 32.0) * 60.0 + (record.gpu_clock / 1000.0) * 40.0;
        let memory = (memory_size / 24.0) * 50.0 + (channels / 8.0) * 50.0;
        /* smaller node is better, so this one only has a floor */
        let efficiency = 100.0 - (fab_process / 10.0) * 10.0;
        let cache = (l2 / 16.0) * 50.0 + (l3 / 64.0) * 50.0;

        let scores = Self {
            cpu: capped(cpu),
            gpu: capped(gpu),
            memory: capped(memory),
            efficiency: capped(efficiency),
            cache: capped(cache),
        };
        debug!(name = %record.name, ?scores, "scored processor");
        scores
    }

    /// The weighted index over these exact scores.
    pub fn performance_index(&self) -> f64 {
        let weighted = self.cpu * factor(WEIGHTS.cpu)
            + self.gpu * factor(WEIGHTS.gpu)
            + self.memory * factor(WEIGHTS.memory)
            + self.efficiency * factor(WEIGHTS.efficiency)
            + self.cache * factor(WEIGHTS.cache);
        capped(weighted)
    }
}

/// Compute the component scores of a record.
pub fn score(record: &ProcessorRecord) -> ComponentScores {
    ComponentScores::of(record)
}

/// Combine component scores into the performance index.
pub fn aggregate(scores: &ComponentScores) -> f64 {
    scores.performance_index()
}
