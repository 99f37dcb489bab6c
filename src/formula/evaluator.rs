use super::{
    ast::{Ast, BinaryOp, Expr, UnaryOp},
    error::EvalError,
    functions::{Bindings, FunctionTable, VariableSet, KNOWN_FUNCTIONS, KNOWN_VARIABLES}
};
use crate::model::structures::rating_inputs::RatingInputs;

/// Evaluates a validated formula against one player's inputs.
///
/// Comparisons and logical operators yield `1.0` or `0.0`; any non-zero value is true.
/// `&&`, `||` and `?:` only evaluate the operand they need. Division or remainder by zero,
/// NaN-producing functions and non-finite values are reported rather than returned.
pub fn evaluate(ast: &Ast, inputs: &RatingInputs) -> Result<f64, EvalError> {
    evaluate_with(ast, &Bindings::from_inputs(inputs), &KNOWN_VARIABLES, &KNOWN_FUNCTIONS)
}

pub fn evaluate_with(
    ast: &Ast,
    bindings: &Bindings,
    known_vars: &VariableSet,
    known_funcs: &FunctionTable
) -> Result<f64, EvalError> {
    Evaluator {
        bindings,
        known_vars,
        known_funcs
    }
    .eval(&ast.root)
}

struct Evaluator<'a> {
    bindings: &'a Bindings,
    known_vars: &'a VariableSet,
    known_funcs: &'a FunctionTable
}

impl Evaluator<'_> {
    fn eval(&self, expr: &Expr) -> Result<f64, EvalError> {
        match expr {
            Expr::Number(value) => checked("literal", *value, &[]),
            Expr::Variable(name) => {
                let variable = self
                    .known_vars
                    .resolve(name)
                    .ok_or_else(|| EvalError::Unvalidated(name.clone()))?;
                checked(name, self.bindings.get(variable), &[])
            }
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(match op {
                    UnaryOp::Neg => -value,
                    UnaryOp::Not => truth(value == 0.0)
                })
            }
            Expr::Binary { op, left, right } => self.binary(*op, left, right),
            Expr::Conditional {
                condition,
                then_branch,
                else_branch
            } => {
                if self.eval(condition)? != 0.0 {
                    self.eval(then_branch)
                } else {
                    self.eval(else_branch)
                }
            }
            Expr::Call { name, args } => self.call(name, args)
        }
    }

    fn binary(&self, op: BinaryOp, left: &Expr, right: &Expr) -> Result<f64, EvalError> {
        let l = self.eval(left)?;

        match op {
            BinaryOp::And if l == 0.0 => return Ok(0.0),
            BinaryOp::Or if l != 0.0 => return Ok(1.0),
            _ => {}
        }

        let r = self.eval(right)?;

        let value = match op {
            BinaryOp::Add => l + r,
            BinaryOp::Sub => l - r,
            BinaryOp::Mul => l * r,
            BinaryOp::Div | BinaryOp::Rem if r == 0.0 => return Err(EvalError::DivisionByZero),
            BinaryOp::Div => l / r,
            BinaryOp::Rem => l % r,
            BinaryOp::Less => truth(l < r),
            BinaryOp::LessEqual => truth(l <= r),
            BinaryOp::Greater => truth(l > r),
            BinaryOp::GreaterEqual => truth(l >= r),
            BinaryOp::Equal => truth(l == r),
            BinaryOp::NotEqual => truth(l != r),
            BinaryOp::And | BinaryOp::Or => truth(r != 0.0)
        };

        checked(op.symbol(), value, &[l, r])
    }

    fn call(&self, name: &str, args: &[Expr]) -> Result<f64, EvalError> {
        let function = self
            .known_funcs
            .resolve(name)
            .filter(|f| f.arity.accepts(args.len()))
            .ok_or_else(|| EvalError::Unvalidated(name.to_string()))?;

        let values = args
            .iter()
            .map(|arg| self.eval(arg))
            .collect::<Result<Vec<_>, _>>()?;

        checked(function.name, function.apply(&values), &values)
    }
}

fn truth(condition: bool) -> f64 {
    if condition {
        1.0
    } else {
        0.0
    }
}

fn checked(op: &str, value: f64, operands: &[f64]) -> Result<f64, EvalError> {
    if value.is_nan() {
        return Err(EvalError::InvalidOperation {
            op: op.to_string(),
            operands: operands.to_vec()
        });
    }
    if value.is_infinite() {
        return Err(EvalError::NonFinite { op: op.to_string() });
    }
    Ok(value)
}
