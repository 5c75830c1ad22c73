//! Formula card controller.
//!
//! A [`FormulaCard`] owns the expression text and variable bindings of one
//! catalog entry. Every edit synchronously re-runs validate → resolve →
//! evaluate, and the latest outcome is kept for display.

mod display;

pub use display::{CardDisplay, HINT};

use crate::catalog::FormulaEntry;
use crate::error::{FormularyError, Result};
use formulary_engine::engine::{
    Outcome, VariableBindings, evaluate_expression, normalize_expression,
};

/// Placeholder shown in an empty expression field.
pub const DEFAULT_PLACEHOLDER: &str = "Enter an expression";

/// Parse the text of a variable field.
///
/// Empty text yields `Some(0.0)`. Text that is not a finite decimal number
/// yields `None` and the caller keeps the previous value. Comma decimal
/// separators are accepted.
pub fn parse_variable_text(text: &str) -> Option<f64> {
    let normalized = normalize_expression(text);
    if normalized.is_empty() {
        return Some(0.0);
    }
    // f64::from_str also accepts `inf`/`NaN`; only plain decimals are numbers here.
    let plain = normalized
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'));
    if !plain {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Per-entry state: expression text and one binding per declared variable.
#[derive(Clone, Debug)]
pub struct FormulaCard {
    entry: FormulaEntry,
    allowed: Vec<String>,
    expression: String,
    bindings: VariableBindings,
    outcome: Outcome,
}

impl FormulaCard {
    pub fn new(entry: FormulaEntry) -> Self {
        let allowed = entry.variable_ids();
        let bindings = VariableBindings::new(
            entry
                .variables
                .iter()
                .map(|v| (v.id.as_str(), v.default_value)),
        );
        let expression = entry.expression.clone().unwrap_or_default();
        let mut card = FormulaCard {
            entry,
            allowed,
            expression,
            bindings,
            outcome: Ok(0.0),
        };
        card.recompute();
        tracing::debug!(entry = %card.entry.id, "formula card created");
        card
    }

    pub fn id(&self) -> &str {
        &self.entry.id
    }

    pub fn entry(&self) -> &FormulaEntry {
        &self.entry
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn placeholder(&self) -> &str {
        self.entry
            .expression_placeholder
            .as_deref()
            .unwrap_or(DEFAULT_PLACEHOLDER)
    }

    pub fn bindings(&self) -> &VariableBindings {
        &self.bindings
    }

    /// Current value of a declared variable.
    pub fn value(&self, id: &str) -> Option<f64> {
        self.bindings.get(id)
    }

    /// Replace the expression text and recompute.
    pub fn edit_expression(&mut self, text: &str) -> &Outcome {
        self.expression = text.to_string();
        self.recompute();
        &self.outcome
    }

    /// Apply the text of a variable field and recompute.
    pub fn edit_variable(&mut self, id: &str, text: &str) -> Result<&Outcome> {
        let previous = self.declared_value(id)?;
        let value = match parse_variable_text(text) {
            Some(value) => value,
            None => {
                tracing::trace!(entry = %self.entry.id, variable = id, text, "not a number, keeping previous value");
                previous
            }
        };
        self.set_variable(id, value)
    }

    /// Set a variable to a number and recompute.
    pub fn set_variable(&mut self, id: &str, value: f64) -> Result<&Outcome> {
        if !self.bindings.set(id, value) {
            return Err(self.unknown_variable(id));
        }
        self.recompute();
        Ok(&self.outcome)
    }

    /// Outcome of the most recent recomputation.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Compute the outcome from the current state without touching it.
    pub fn evaluate(&self) -> Outcome {
        evaluate_expression(&self.expression, &self.allowed, self.bindings.as_map())
    }

    pub fn display(&self) -> CardDisplay {
        CardDisplay::from_outcome(&self.outcome)
    }

    fn recompute(&mut self) {
        self.outcome = self.evaluate();
    }

    fn declared_value(&self, id: &str) -> Result<f64> {
        self.bindings.get(id).ok_or_else(|| self.unknown_variable(id))
    }

    fn unknown_variable(&self, id: &str) -> FormularyError {
        FormularyError::UnknownVariableId {
            entry: self.entry.id.clone(),
            id: id.to_string(),
        }
    }
}
