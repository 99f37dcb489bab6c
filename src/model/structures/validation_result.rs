use serde::{Deserialize, Serialize};

/// Outcome of validating a formula, shared by the configuration-write path
/// and the pre-evaluation re-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized_formula: Option<String>
}

impl ValidationResult {
    pub fn valid(normalized_formula: Option<String>) -> ValidationResult {
        ValidationResult {
            valid: true,
            error: None,
            normalized_formula
        }
    }

    pub fn invalid(error: impl Into<String>) -> ValidationResult {
        ValidationResult {
            valid: false,
            error: Some(error.into()),
            normalized_formula: None
        }
    }
}
