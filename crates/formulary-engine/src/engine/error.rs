//! Classified evaluation errors.
//!
//! Every variant renders as the fixed user-facing message shown in place of a
//! result. The validator produces the first three, the evaluator the last two.

use thiserror::Error;

/// Why an expression did not produce a displayable number.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("Enter an expression to calculate.")]
    EmptyExpression,

    #[error("Expression contains disallowed characters.")]
    IllegalCharacter,

    #[error("Unknown variables: {}.", .0.join(", "))]
    UnknownVariable(Vec<String>),

    #[error("Expression could not be evaluated.")]
    EvaluationFailed,

    #[error("Result is not a number.")]
    InvalidResult,
}

impl ErrorKind {
    /// The message shown to the user instead of a value.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;

    #[test]
    fn test_unknown_variable_message_joins_names() {
        let err = ErrorKind::UnknownVariable(vec!["K".to_string(), "R".to_string()]);
        assert_eq!(err.message(), "Unknown variables: K, R.");
    }

    #[test]
    fn test_fixed_messages() {
        assert_eq!(
            ErrorKind::EmptyExpression.message(),
            "Enter an expression to calculate."
        );
        assert_eq!(
            ErrorKind::IllegalCharacter.message(),
            "Expression contains disallowed characters."
        );
        assert_eq!(
            ErrorKind::EvaluationFailed.message(),
            "Expression could not be evaluated."
        );
        assert_eq!(ErrorKind::InvalidResult.message(), "Result is not a number.");
    }
}
