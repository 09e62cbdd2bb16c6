use serde::Serialize;
use tracing::debug;

use crate::{
    compare::{compare, CategoryComparison, MetricOutcome, Winner},
    error::{Result, SelectionError, Side},
    record::{normalize, ProcessorRecord},
    score::ComponentScores,
};

/// Everything known about one comparison of two processors.
///
/// The index-based [`winner`](Self::winner) and the category-count
/// [`category_leader`](Self::category_leader) are reported separately and may disagree:
/// a processor can take more categories and still have the lower index.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    processor_a: ProcessorRecord,
    processor_b: ProcessorRecord,
    scores_a: ComponentScores,
    scores_b: ComponentScores,
    performance_index_a: f64,
    performance_index_b: f64,
    category_wins_a: usize,
    category_wins_b: usize,
    ties: usize,
    breakdown: Vec<MetricOutcome>,
    winner: Winner,
    category_leader: Winner,
}

impl ComparisonResult {
    pub fn build(a: &ProcessorRecord, b: &ProcessorRecord) -> Self {
        let scores_a = ComponentScores::of(a);
        let scores_b = ComponentScores::of(b);
        let performance_index_a = scores_a.performance_index();
        let performance_index_b = scores_b.performance_index();

        let categories: CategoryComparison = compare(a, b);

        /* both indices are already rounded to one decimal */
        let winner = Winner::from_ordering(
            performance_index_a
                .partial_cmp(&performance_index_b)
                .unwrap_or(std::cmp::Ordering::Equal),
        );
        let category_leader = categories.leader();

        debug!(
            a = %a.name,
            b = %b.name,
            performance_index_a,
            performance_index_b,
            %winner,
            %category_leader,
            "built comparison"
        );

        Self {
            processor_a: a.clone(),
            processor_b: b.clone(),
            scores_a,
            scores_b,
            performance_index_a,
            performance_index_b,
            category_wins_a: categories.wins_a,
            category_wins_b: categories.wins_b,
            ties: categories.ties(),
            breakdown: categories.breakdown,
            winner,
            category_leader,
        }
    }

    /// Normalize two raw records, then compare them.
    pub fn from_raw(a: &serde_json::Value, b: &serde_json::Value) -> Self {
        Self::build(&normalize(a), &normalize(b))
    }

    pub fn processor_a(&self) -> &ProcessorRecord {
        &self.processor_a
    }

    pub fn processor_b(&self) -> &ProcessorRecord {
        &self.processor_b
    }

    pub fn scores_a(&self) -> &ComponentScores {
        &self.scores_a
    }

    pub fn scores_b(&self) -> &ComponentScores {
        &self.scores_b
    }

    pub fn performance_index_a(&self) -> f64 {
        self.performance_index_a
    }

    pub fn performance_index_b(&self) -> f64 {
        self.performance_index_b
    }

    pub fn category_wins_a(&self) -> usize {
        self.category_wins_a
    }

    pub fn category_wins_b(&self) -> usize {
        self.category_wins_b
    }

    pub fn ties(&self) -> usize {
        self.ties
    }

    pub fn breakdown(&self) -> &[MetricOutcome] {
        &self.breakdown
    }

    /// Winner by performance index.
    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// Winner by number of categories won.
    pub fn category_leader(&self) -> Winner {
        self.category_leader
    }

    /// Name of the winning processor, `None` on a tie.
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            Winner::A => Some(self.processor_a.name.as_str()),
            Winner::B => Some(self.processor_b.name.as_str()),
            Winner::Tie => None,
        }
    }
}

/// Pick the two records to compare out of a list.
///
/// # Errors
/// Errors if either side has no selection, points outside `records`,
/// or both sides point at the same record.
pub fn select_pair(
    records: &[ProcessorRecord],
    a: Option<usize>,
    b: Option<usize>,
) -> Result<(&ProcessorRecord, &ProcessorRecord)> {
    let a = a.ok_or(SelectionError::Missing(Side::A))?;
    let b = b.ok_or(SelectionError::Missing(Side::B))?;
    if a == b {
        return Err(SelectionError::SameRecord(a).into());
    }

    let lookup = |side: Side, index: usize| {
        records.get(index).ok_or(SelectionError::OutOfRange {
            side,
            index,
            len: records.len(),
        })
    };

    Ok((lookup(Side::A, a)?, lookup(Side::B, b)?))
}

/// Validate a selection and build the comparison for it.
pub fn compare_selection(
    records: &[ProcessorRecord],
    a: Option<usize>,
    b: Option<usize>,
) -> Result<ComparisonResult> {
    let (a, b) = select_pair(records, a, b)?;
    Ok(ComparisonResult::build(a, b))
}
