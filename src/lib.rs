pub mod batch;
pub mod formula;
pub mod model;
pub mod utils;

pub use formula::{test_formula, validate_formula, Formula, FormulaError};
pub use model::{
    calculate_rating,
    error::{ConfigError, RatingError},
    structures::{
        algorithm::Algorithm,
        rating_config::RatingConfig,
        rating_inputs::{PlaylistRating, RatingInputs},
        validation_result::ValidationResult
    }
};
