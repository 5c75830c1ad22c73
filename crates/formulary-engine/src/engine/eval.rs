//! Expression evaluation.
//!
//! [`evaluate`] takes a cleaned expression (see [`validate`](super::validate))
//! together with the declared variable ids and their resolved values, and
//! computes an `f64`. [`evaluate_expression`] runs the whole pipeline:
//! validate, resolve, evaluate.

use std::collections::HashMap;

use super::bindings::resolve;
use super::error::ErrorKind;
use super::parse::{BinOp, Expr, parse};
use super::validate::validate;

/// Result of one evaluation pass.
pub type Outcome = Result<f64, ErrorKind>;

/// Evaluate a cleaned expression with `values[i]` bound to `declared[i]`.
///
/// Non-finite results (division by zero, overflow) are reported as
/// [`ErrorKind::InvalidResult`]; any syntax problem as
/// [`ErrorKind::EvaluationFailed`].
pub fn evaluate<S: AsRef<str>>(cleaned: &str, declared: &[S], values: &[f64]) -> Outcome {
    if declared.len() != values.len() {
        return Err(ErrorKind::EvaluationFailed);
    }
    let expr = parse(cleaned, declared).map_err(|_| ErrorKind::EvaluationFailed)?;
    let result = eval_expr(&expr, values).ok_or(ErrorKind::EvaluationFailed)?;
    if !result.is_finite() {
        return Err(ErrorKind::InvalidResult);
    }
    Ok(result)
}

/// Validate, resolve and evaluate `expression` against the declared ids.
pub fn evaluate_expression<S: AsRef<str>>(
    expression: &str,
    declared: &[S],
    bindings: &HashMap<String, f64>,
) -> Outcome {
    let cleaned = validate(expression, declared)?;
    let values = resolve(declared, bindings);
    evaluate(&cleaned, declared, &values)
}

fn eval_expr(expr: &Expr, values: &[f64]) -> Option<f64> {
    match expr {
        Expr::Number(n) => Some(*n),
        Expr::Var(idx) => values.get(*idx).copied(),
        Expr::Neg(inner) => eval_expr(inner, values).map(|v| -v),
        Expr::Binary { op, left, right } => {
            let l = eval_expr(left, values)?;
            let r = eval_expr(right, values)?;
            Some(match op {
                BinOp::Add => l + r,
                BinOp::Sub => l - r,
                BinOp::Mul => l * r,
                BinOp::Div => l / r,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_positional_binding() {
        assert_eq!(evaluate("U * I", &["U", "I"], &[230.0, 2.0]), Ok(460.0));
        assert_eq!(evaluate("U - I", &["I", "U"], &[2.0, 230.0]), Ok(228.0));
    }

    #[test]
    fn test_evaluate_arity_mismatch() {
        assert_eq!(
            evaluate("U", &["U", "I"], &[1.0]),
            Err(ErrorKind::EvaluationFailed)
        );
    }

    #[test]
    fn test_evaluate_non_finite() {
        assert_eq!(
            evaluate("P / U", &["P", "U"], &[460.0, 0.0]),
            Err(ErrorKind::InvalidResult)
        );
        assert_eq!(
            evaluate("0 / 0", &[] as &[&str], &[]),
            Err(ErrorKind::InvalidResult)
        );
        assert_eq!(
            evaluate("-1 / 0", &[] as &[&str], &[]),
            Err(ErrorKind::InvalidResult)
        );
    }

    #[test]
    fn test_infinite_intermediate_can_still_be_finite() {
        assert_eq!(evaluate("1 / (1 / 0)", &[] as &[&str], &[]), Ok(0.0));
    }

    #[test]
    fn test_evaluate_malformed() {
        for expr in ["3+*2", "()", "U U", "(U)(U)", "1 +", "* 2"] {
            assert_eq!(
                evaluate(expr, &["U"], &[1.0]),
                Err(ErrorKind::EvaluationFailed),
                "{expr}"
            );
        }
    }

    #[test]
    fn test_evaluate_expression_pipeline() {
        let mut bindings = HashMap::new();
        bindings.insert("U".to_string(), 230.0);
        assert_eq!(evaluate_expression(" U * I ", &["U", "I"], &bindings), Ok(0.0));
        bindings.insert("I".to_string(), 2.0);
        assert_eq!(evaluate_expression("U * I", &["U", "I"], &bindings), Ok(460.0));
        assert_eq!(
            evaluate_expression("U * K", &["U", "I"], &bindings),
            Err(ErrorKind::UnknownVariable(vec!["K".to_string()]))
        );
    }
}
