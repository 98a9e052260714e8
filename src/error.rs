//! Errors raised while loading instances, validating orders or configuring solvers.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlpError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("column `{column}` has {found} entries, expected {expected}")]
    LengthMismatch {
        column: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("aircraft {aircraft}: window violates earliest <= target <= latest ({earliest}, {target}, {latest})")]
    InvalidWindow {
        aircraft: usize,
        earliest: f64,
        target: f64,
        latest: f64,
    },
    #[error("aircraft {aircraft}: `{column}` must be a finite non-negative number, got {value}")]
    InvalidRate {
        aircraft: usize,
        column: &'static str,
        value: f64,
    },
    #[error("aircraft {aircraft}: `{column}` is not finite")]
    NonFinite {
        aircraft: usize,
        column: &'static str,
    },
    #[error("separation must be finite and non-negative, got {0}")]
    InvalidSeparation(f64),
    #[error("not a permutation of 0..{n}: {reason}")]
    InvalidOrder { n: usize, reason: String },
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParams {
        name: &'static str,
        reason: String,
    },
}

pub type AlpResult<T> = Result<T, AlpError>;
