use serde::Serialize;

use super::functions::{KNOWN_FUNCTIONS, KNOWN_VARIABLES};

pub const OPERATORS: [&str; 16] = [
    "+", "-", "*", "/", "%", "<", "<=", ">", ">=", "==", "!=", "&&", "||", "!", "?", ":"
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDoc {
    pub name: &'static str,
    pub description: &'static str
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDoc {
    pub name: &'static str,
    pub arity: String,
    pub description: &'static str
}

/// The formula grammar as shown to administrators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaReference {
    pub variables: Vec<VariableDoc>,
    pub operators: Vec<&'static str>,
    pub functions: Vec<FunctionDoc>
}

pub fn formula_reference() -> FormulaReference {
    FormulaReference {
        variables: KNOWN_VARIABLES
            .iter()
            .map(|v| VariableDoc {
                name: v.name(),
                description: v.description()
            })
            .collect(),
        operators: OPERATORS.to_vec(),
        functions: KNOWN_FUNCTIONS
            .iter()
            .map(|f| FunctionDoc {
                name: f.name,
                arity: f.arity.to_string(),
                description: f.description
            })
            .collect()
    }
}
