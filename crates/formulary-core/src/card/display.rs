use formulary_engine::engine::{Outcome, format_number};
use serde::Serialize;

/// Hint shown beneath every card regardless of outcome.
pub const HINT: &str = "Enter a formula according to the licensed standard and adjust the \
variables. The expression supports basic arithmetic operations.";

/// What the UI shows in a card's result box.
///
/// Serializes as `{"value": n}` or `{"errorMessage": "..."}`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CardDisplay {
    Value {
        value: f64,
    },
    Error {
        #[serde(rename = "errorMessage")]
        error_message: String,
    },
}

impl CardDisplay {
    pub fn from_outcome(outcome: &Outcome) -> Self {
        match outcome {
            Ok(value) => CardDisplay::Value { value: *value },
            Err(err) => CardDisplay::Error {
                error_message: err.message(),
            },
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, CardDisplay::Error { .. })
    }

    /// Value to three decimals, or the error message.
    pub fn text(&self) -> String {
        match self {
            CardDisplay::Value { value } => format_number(*value),
            CardDisplay::Error { error_message } => error_message.clone(),
        }
    }
}
