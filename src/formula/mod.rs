//! Administrator-authored rating formulas.
//!
//! A formula goes through four stages, each of which can only accept what the previous one
//! produced: [`tokenize`] → [`parse`] → [`validate`] → [`evaluate`]. Nothing here executes
//! host code; the grammar is numeric-only and every identifier is checked against a fixed
//! allow-list before evaluation.

pub mod ast;
pub mod cache;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod parser;
pub mod preview;
pub mod reference;
pub mod validator;

pub use ast::Ast;
pub use cache::FormulaCache;
pub use error::{EvalError, FormulaError, LexError, ParseError, ValidationError};
pub use evaluator::evaluate;
pub use functions::{FunctionTable, VariableSet, KNOWN_FUNCTIONS, KNOWN_VARIABLES};
pub use lexer::tokenize;
pub use parser::parse;
pub use preview::{test_formula, FormulaPreview};
pub use reference::{formula_reference, FormulaReference};
pub use validator::{normalize, validate};

use crate::model::{
    constants::{MAX_FORMULA_DEPTH, MAX_FORMULA_LENGTH, MAX_FORMULA_NODES},
    structures::{rating_inputs::RatingInputs, validation_result::ValidationResult}
};

/// Bounds that keep every formula's lexing, parsing and evaluation work small.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormulaLimits {
    /// Characters
    pub max_length: usize,
    /// Nesting levels, enforced while parsing and again on the finished tree
    pub max_depth: usize,
    pub max_nodes: usize
}

impl Default for FormulaLimits {
    fn default() -> Self {
        FormulaLimits {
            max_length: MAX_FORMULA_LENGTH,
            max_depth: MAX_FORMULA_DEPTH,
            max_nodes: MAX_FORMULA_NODES
        }
    }
}

/// Full validation of formula text: lexing, parsing and the allow-list walk.
///
/// On success the result carries the whitespace-collapsed formula to persist. This must be
/// called both before storing a formula and again before evaluating a stored one.
pub fn validate_formula(source: &str) -> ValidationResult {
    validate_formula_with_limits(source, &FormulaLimits::default())
}

pub fn validate_formula_with_limits(source: &str, limits: &FormulaLimits) -> ValidationResult {
    match Formula::compile_with_limits(source, limits) {
        Ok(formula) => ValidationResult::valid(Some(formula.normalized)),
        Err(e) => ValidationResult::invalid(e.to_string())
    }
}

/// A formula that passed validation, ready to evaluate against any number of players.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    normalized: String,
    ast: Ast
}

impl Formula {
    pub fn compile(source: &str) -> Result<Formula, FormulaError> {
        Formula::compile_with_limits(source, &FormulaLimits::default())
    }

    pub fn compile_with_limits(source: &str, limits: &FormulaLimits) -> Result<Formula, FormulaError> {
        let tokens = lexer::tokenize_with_limit(source, limits.max_length)?;
        let ast = parser::parse_with_depth(&tokens, limits.max_depth)?;
        validator::check(&ast, &KNOWN_VARIABLES, &KNOWN_FUNCTIONS, limits)?;

        Ok(Formula {
            source: source.to_string(),
            normalized: normalize(source),
            ast
        })
    }

    pub fn evaluate(&self, inputs: &RatingInputs) -> Result<f64, EvalError> {
        evaluate(&self.ast, inputs)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    pub fn ast(&self) -> &Ast {
        &self.ast
    }
}
