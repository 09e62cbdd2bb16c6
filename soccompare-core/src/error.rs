use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One side of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::A => "A",
                Self::B => "B",
            }
        )
    }
}

/// Why a pair of selections cannot be compared.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no processor selected for side {0}")]
    Missing(Side),
    #[error("processor {index} selected for side {side} does not exist (catalog has {len})")]
    OutOfRange { side: Side, index: usize, len: usize },
    #[error("processor {0} is selected for both sides")]
    SameRecord(usize),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid selection: {0}")]
    InvalidSelection(#[from] SelectionError),
}

pub type Result<T> = std::result::Result<T, Error>;
