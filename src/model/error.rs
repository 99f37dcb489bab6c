use thiserror::Error;

use crate::formula::FormulaError;

/// Why a rating could not be calculated. Every variant is an expected outcome of
/// configuration or player data; callers decide whether to fall back, skip or report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatingError {
    #[error("no playlist meets its minimum games played with a non-zero weight")]
    NoQualifyingPlaylists,

    #[error("player has no games played in any playlist")]
    NoData,

    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    #[error("algorithm is CUSTOM but no formula is configured")]
    MissingFormula,

    #[error("rating is not a finite number")]
    NonFiniteRating,

    #[error("formula error: {0}")]
    FormulaError(#[from] FormulaError)
}

/// Problems with a configuration that must stop it from being saved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("customFormula is required when algorithm is CUSTOM")]
    MissingFormula,

    #[error("customFormula is invalid: {0}")]
    InvalidFormula(String),

    #[error("{field} must be a finite, non-negative number (got {value})")]
    InvalidWeight { field: String, value: f64 },

    #[error("at least one playlist weight must be greater than 0")]
    NoWeights,

    #[error("ascendancyWeights.current + ascendancyWeights.peak must be greater than 0")]
    ZeroAscendancyWeights
}
