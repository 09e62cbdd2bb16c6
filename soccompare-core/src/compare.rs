use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};
use tracing::debug;

use crate::record::ProcessorRecord;

/// Which side of a head-to-head comes out ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    A,
    B,
    Tie,
}

impl Winner {
    /// `Greater` means side A has the larger value.
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Greater => Self::A,
            Ordering::Less => Self::B,
            Ordering::Equal => Self::Tie,
        }
    }

    /// The same outcome seen with the sides exchanged.
    pub fn swapped(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
            Self::Tie => Self::Tie,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::A => "a",
                Self::B => "b",
                Self::Tie => "tie",
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    HigherWins,
    LowerWins,
}

/// The six attributes compared head to head, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Frequency,
    Cores,
    Process,
    Gpu,
    Cache,
    Threads,
}

impl Metric {
    pub const ALL: [Metric; 6] = [
        Self::Frequency,
        Self::Cores,
        Self::Process,
        Self::Gpu,
        Self::Cache,
        Self::Threads,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::Frequency => "frequency",
            Self::Cores => "cores",
            Self::Process => "process",
            Self::Gpu => "gpu",
            Self::Cache => "cache",
            Self::Threads => "threads",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Frequency => "CPU Frequency (GHz)",
            Self::Cores => "CPU Cores",
            Self::Process => "Fabrication Process (nm)",
            Self::Gpu => "GPU Cores",
            Self::Cache => "Total Cache (MB)",
            Self::Threads => "CPU Threads",
        }
    }

    pub fn direction(self) -> Direction {
        match self {
            Self::Process => Direction::LowerWins,
            _ => Direction::HigherWins,
        }
    }

    pub fn value(self, record: &ProcessorRecord) -> f64 {
        match self {
            Self::Frequency => record.frequency,
            Self::Cores => f64::from(record.num_cores),
            Self::Process => f64::from(record.fab_process),
            Self::Gpu => f64::from(record.gpu_cores),
            Self::Cache => f64::from(record.l2_cache) + f64::from(record.l3_cache),
            Self::Threads => f64::from(record.num_threads),
        }
    }

    fn judge(self, a: f64, b: f64) -> Winner {
        /* normalized values are always finite */
        let ordering = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        match self.direction() {
            Direction::HigherWins => Winner::from_ordering(ordering),
            Direction::LowerWins => Winner::from_ordering(ordering.reverse()),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Result of one metric in a head-to-head.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricOutcome {
    pub metric: Metric,
    pub value_a: f64,
    pub value_b: f64,
    pub winner: Winner,
    /// Absolute difference, 0 on a tie.
    pub difference: f64,
}

/// Category tally of a head-to-head, along with the per-metric breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryComparison {
    pub wins_a: usize,
    pub wins_b: usize,
    pub breakdown: Vec<MetricOutcome>,
}

impl CategoryComparison {
    pub fn ties(&self) -> usize {
        Metric::ALL.len() - self.wins_a - self.wins_b
    }

    pub fn outcome(&self, metric: Metric) -> Option<&MetricOutcome> {
        self.breakdown.iter().find(|o| o.metric == metric)
    }

    /// Which side won more categories.
    pub fn leader(&self) -> Winner {
        Winner::from_ordering(self.wins_a.cmp(&self.wins_b))
    }
}

/// Compare two records on every metric in [`Metric::ALL`].
///
/// Defaulted values (including the unknown fabrication process) take part like any
/// other value, so two records missing the same attribute tie on it.
pub fn compare(a: &ProcessorRecord, b: &ProcessorRecord) -> CategoryComparison {
    let breakdown: Vec<MetricOutcome> = Metric::ALL
        .iter()
        .map(|&metric| {
            let value_a = metric.value(a);
            let value_b = metric.value(b);
            let winner = metric.judge(value_a, value_b);
            let difference = match winner {
                Winner::Tie => 0.0,
                _ => (value_a - value_b).abs(),
            };
            MetricOutcome {
                metric,
                value_a,
                value_b,
                winner,
                difference,
            }
        })
        .collect();

    let wins_a = breakdown.iter().filter(|o| o.winner == Winner::A).count();
    let wins_b = breakdown.iter().filter(|o| o.winner == Winner::B).count();

    debug!(a = %a.name, b = %b.name, wins_a, wins_b, "compared categories");

    CategoryComparison {
        wins_a,
        wins_b,
        breakdown,
    }
}
