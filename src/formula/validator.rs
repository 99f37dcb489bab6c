use itertools::Itertools;

use super::{
    ast::{Ast, Expr},
    error::ValidationError,
    functions::{FunctionTable, VariableSet},
    FormulaLimits
};
use crate::model::structures::validation_result::ValidationResult;

/// Checks that `ast` only uses known variables and allow-listed functions with the right
/// arity, and that it fits within the default limits.
///
/// A valid result carries the tree's fully parenthesized rendering as its normalized
/// formula. [`super::validate_formula`] normalizes the source text instead.
pub fn validate(ast: &Ast, known_vars: &VariableSet, known_funcs: &FunctionTable) -> ValidationResult {
    match check(ast, known_vars, known_funcs, &FormulaLimits::default()) {
        Ok(()) => ValidationResult::valid(Some(ast.to_string())),
        Err(e) => ValidationResult::invalid(e.to_string())
    }
}

/// Same walk as [`validate`] with a typed error. Stops at the first problem found.
pub fn check(
    ast: &Ast,
    known_vars: &VariableSet,
    known_funcs: &FunctionTable,
    limits: &FormulaLimits
) -> Result<(), ValidationError> {
    let count = ast.node_count();
    if count > limits.max_nodes {
        return Err(ValidationError::TooManyNodes {
            count,
            max: limits.max_nodes
        });
    }

    let depth = ast.depth();
    if depth > limits.max_depth {
        return Err(ValidationError::TooDeep {
            depth,
            max: limits.max_depth
        });
    }

    check_expr(&ast.root, known_vars, known_funcs)
}

fn check_expr(expr: &Expr, known_vars: &VariableSet, known_funcs: &FunctionTable) -> Result<(), ValidationError> {
    match expr {
        Expr::Number(_) => Ok(()),
        Expr::Variable(name) => match known_vars.resolve(name) {
            Some(_) => Ok(()),
            None => Err(ValidationError::UnknownVariable {
                name: name.clone(),
                allowed: known_vars.names()
            })
        },
        Expr::Unary { operand, .. } => check_expr(operand, known_vars, known_funcs),
        Expr::Binary { left, right, .. } => {
            check_expr(left, known_vars, known_funcs)?;
            check_expr(right, known_vars, known_funcs)
        }
        Expr::Conditional {
            condition,
            then_branch,
            else_branch
        } => [condition, then_branch, else_branch]
            .into_iter()
            .try_for_each(|e| check_expr(e, known_vars, known_funcs)),
        Expr::Call { name, args } => {
            let Some(function) = known_funcs.resolve(name) else {
                return Err(ValidationError::UnknownFunction {
                    name: name.clone(),
                    allowed: known_funcs.names()
                });
            };

            if !function.arity.accepts(args.len()) {
                return Err(ValidationError::WrongArity {
                    name: name.clone(),
                    expected: function.arity.to_string(),
                    found: args.len()
                });
            }

            args.iter()
                .try_for_each(|arg| check_expr(arg, known_vars, known_funcs))
        }
    }
}

/// Whitespace-collapsed form of a formula, used for storage and as a cache key.
pub fn normalize(source: &str) -> String {
    source.split_whitespace().join(" ")
}
