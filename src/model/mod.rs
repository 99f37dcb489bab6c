pub mod ascendancy;
pub mod constants;
pub mod error;
pub mod peak;
pub mod structures;
pub mod weighted_average;

use crate::{
    formula::{Formula, FormulaCache, FormulaError},
    model::{
        error::RatingError,
        structures::{algorithm::Algorithm, rating_config::RatingConfig, rating_inputs::RatingInputs}
    }
};

/// Calculates a player's guild rating with the algorithm `config` selects.
///
/// A custom formula is validated again on every call; neither a previous validation
/// nor `formulaValidated` is trusted.
pub fn calculate_rating(config: &RatingConfig, inputs: &RatingInputs) -> Result<f64, RatingError> {
    match config.algorithm {
        Algorithm::Custom => {
            let source = config.custom_formula().ok_or(RatingError::MissingFormula)?;
            let formula = Formula::compile(source)?;
            Ok(formula.evaluate(inputs).map_err(FormulaError::from)?)
        }
        _ => builtin(config, inputs)
    }
}

/// Same as [`calculate_rating`], but custom formulas are compiled once per distinct
/// source and shared through `cache`. Used when rating many players against the
/// same configuration.
pub fn calculate_rating_cached(
    config: &RatingConfig,
    inputs: &RatingInputs,
    cache: &FormulaCache
) -> Result<f64, RatingError> {
    match config.algorithm {
        Algorithm::Custom => {
            let source = config.custom_formula().ok_or(RatingError::MissingFormula)?;
            let formula = cache.get_or_compile(source)?;
            Ok(formula.evaluate(inputs).map_err(FormulaError::from)?)
        }
        _ => builtin(config, inputs)
    }
}

/// Built-in algorithms never hand back infinity or NaN as a rating.
fn finite(rating: f64) -> Result<f64, RatingError> {
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(RatingError::NonFiniteRating)
    }
}

fn builtin(config: &RatingConfig, inputs: &RatingInputs) -> Result<f64, RatingError> {
    match config.algorithm {
        Algorithm::WeightedAverage => {
            weighted_average::weighted_average(&config.weights(), &config.min_games_played(), inputs)
        }
        Algorithm::PeakMmr => peak::peak_mmr(inputs),
        Algorithm::Ascendancy => ascendancy::ascendancy(&config.ascendancy_weights(), inputs),
        Algorithm::Custom => Err(RatingError::MissingFormula)
    }
}
