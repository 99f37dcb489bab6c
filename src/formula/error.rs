use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedCharacter { pos: usize, ch: char },

    #[error("formula is {len} characters long, the maximum is {max}")]
    TooLong { len: usize, max: usize },

    #[error("malformed number '{literal}' at position {pos}")]
    InvalidNumber { pos: usize, literal: String }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("expected {expected} at position {pos}, found {found}")]
    UnexpectedToken {
        pos: usize,
        expected: String,
        found: String
    },

    #[error("unbalanced parentheses at position {pos}")]
    UnbalancedParens { pos: usize },

    #[error("formula is nested too deeply (maximum depth is {max})")]
    TooDeep { max: usize },

    #[error("formula is empty")]
    Empty
}

/// Semantic problems found by walking a parsed formula.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown variable '{name}' (allowed: {allowed})")]
    UnknownVariable { name: String, allowed: String },

    #[error("unknown function '{name}' (allowed: {allowed})")]
    UnknownFunction { name: String, allowed: String },

    #[error("function '{name}' expects {expected} argument(s), got {found}")]
    WrongArity {
        name: String,
        expected: String,
        found: usize
    },

    #[error("formula is nested too deeply ({depth} levels, maximum is {max})")]
    TooDeep { depth: usize, max: usize },

    #[error("formula is too large ({count} nodes, maximum is {max})")]
    TooManyNodes { count: usize, max: usize }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid operation '{op}' on operands {operands:?}")]
    InvalidOperation { op: String, operands: Vec<f64> },

    #[error("operation '{op}' produced a non-finite result")]
    NonFinite { op: String },

    /// Only reachable when an AST is evaluated without being validated first.
    #[error("formula was not validated: unresolved identifier '{0}'")]
    Unvalidated(String)
}

/// Any failure along the lex, parse, validate, evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Eval(#[from] EvalError)
}
