use serde::Serialize;

use super::{Formula, FormulaError};
use crate::model::{
    constants::sample_inputs,
    structures::{rating_inputs::RatingInputs, validation_result::ValidationResult}
};

/// What an administrator sees when trying out a formula before saving it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaPreview {
    pub validation: ValidationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The inputs the formula was evaluated against
    pub inputs: RatingInputs
}

/// Validates `source` and, when valid, evaluates it against `inputs`
/// (or a representative sample player when none are given).
pub fn test_formula(source: &str, inputs: Option<&RatingInputs>) -> FormulaPreview {
    let inputs = inputs.cloned().unwrap_or_else(sample_inputs);

    let formula = match Formula::compile(source) {
        Ok(formula) => formula,
        Err(e) => {
            return FormulaPreview {
                validation: ValidationResult::invalid(e.to_string()),
                result: None,
                error: None,
                inputs
            }
        }
    };

    let validation = ValidationResult::valid(Some(formula.normalized().to_string()));
    match formula.evaluate(&inputs).map_err(FormulaError::from) {
        Ok(result) => FormulaPreview {
            validation,
            result: Some(result),
            error: None,
            inputs
        },
        Err(e) => FormulaPreview {
            validation,
            result: None,
            error: Some(e.to_string()),
            inputs
        }
    }
}
