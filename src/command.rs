//! Non-interactive evaluation (`-c`, `--entry`, `--list`).

use anyhow::Result;
use formulary_core::card::parse_variable_text;
use formulary_core::{CardDisplay, FormulaCard, FormulaEntry, FormulaVariable, Formulary};
use formulary_engine::engine::is_identifier;

/// A `NAME=VALUE` pair from `--var`.
#[derive(Clone, Debug, PartialEq)]
pub struct VarAssignment {
    pub name: String,
    pub value: f64,
}

/// clap value parser for `--var NAME=VALUE`.
pub fn parse_assignment(s: &str) -> std::result::Result<VarAssignment, String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if !is_identifier(name) {
        return Err(format!("'{}' is not a valid variable name", name));
    }
    if value.trim().is_empty() {
        return Err(format!("missing value for '{}'", name));
    }
    let value = parse_variable_text(value).ok_or_else(|| format!("'{}' is not a number", value))?;
    Ok(VarAssignment {
        name: name.to_string(),
        value,
    })
}

/// Evaluate an ad-hoc expression whose allow-list is exactly the given names.
/// A repeated name keeps its last value.
pub fn evaluate_adhoc(expression: &str, vars: &[VarAssignment]) -> CardDisplay {
    let mut variables: Vec<FormulaVariable> = Vec::new();
    for var in vars {
        match variables.iter_mut().find(|v| v.id == var.name) {
            Some(existing) => existing.default_value = Some(var.value),
            None => variables.push(FormulaVariable {
                id: var.name.clone(),
                label: var.name.clone(),
                unit: None,
                default_value: Some(var.value),
            }),
        }
    }
    let entry = FormulaEntry {
        id: "command".to_string(),
        name: "command".to_string(),
        description: None,
        expression: Some(expression.to_string()),
        expression_placeholder: None,
        variables,
    };
    FormulaCard::new(entry).display()
}

/// Evaluate a catalog entry, starting from its defaults.
pub fn evaluate_entry(
    formulary: &mut Formulary,
    entry_id: &str,
    expression: Option<&str>,
    vars: &[VarAssignment],
) -> Result<CardDisplay> {
    let card = formulary.card_mut(entry_id)?;
    if let Some(expression) = expression {
        card.edit_expression(expression);
    }
    for var in vars {
        card.set_variable(&var.name, var.value)?;
    }
    Ok(card.display())
}

/// Render a result line: the value, `#ERR <message>`, or the JSON contract.
pub fn render(display: &CardDisplay, json: bool) -> Result<String> {
    if json {
        return Ok(serde_json::to_string(display)?);
    }
    Ok(match display {
        CardDisplay::Value { .. } => display.text(),
        CardDisplay::Error { error_message } => format!("#ERR {}", error_message),
    })
}

/// Plain-text outline of the catalog for `--list`.
pub fn outline(formulary: &Formulary) -> String {
    let mut out = String::new();
    for section in formulary.sections() {
        out.push_str(&section.title);
        out.push('\n');
        for card in &section.cards {
            let entry = card.entry();
            let ids = entry.variable_ids().join(", ");
            out.push_str(&format!("  {}  {}  [{}]\n", entry.id, entry.name, ids));
        }
    }
    out
}
