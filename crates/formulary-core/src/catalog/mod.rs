//! Catalog data model.
//!
//! A catalog is an ordered list of [`FormulaSection`]s, each holding
//! [`FormulaEntry`]s. Entries are read-only once loaded; the variable list of
//! an entry is the complete allow-list for its expression.

mod io;

pub use io::{MAX_CATALOG_FILE_BYTES, load_catalog, parse_catalog_json, parse_catalog_toml};

use crate::error::{FormularyError, Result};
use formulary_engine::engine::is_identifier;
use serde::Deserialize;
use std::collections::HashSet;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaVariable {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub default_value: Option<f64>,
}

impl FormulaVariable {
    /// Label with the unit in parentheses, e.g. `Voltage (V)`.
    pub fn display_label(&self) -> String {
        match self.unit.as_deref() {
            Some(unit) if !unit.is_empty() => format!("{} ({})", self.label, unit),
            _ => self.label.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub expression: Option<String>,
    #[serde(default)]
    pub expression_placeholder: Option<String>,
    #[serde(default)]
    pub variables: Vec<FormulaVariable>,
}

impl FormulaEntry {
    /// Declared variable ids in declaration order.
    pub fn variable_ids(&self) -> Vec<String> {
        self.variables.iter().map(|v| v.id.clone()).collect()
    }

    pub fn variable(&self, id: &str) -> Option<&FormulaVariable> {
        self.variables.iter().find(|v| v.id == id)
    }

    /// Check that every variable id is an identifier token and unique.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for var in &self.variables {
            if !is_identifier(&var.id) {
                return Err(FormularyError::InvalidVariableId {
                    entry: self.id.clone(),
                    id: var.id.clone(),
                });
            }
            if !seen.insert(var.id.as_str()) {
                return Err(FormularyError::DuplicateVariable {
                    entry: self.id.clone(),
                    id: var.id.clone(),
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaSection {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub entries: Vec<FormulaEntry>,
}

/// A loaded, validated set of formula sections.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    /// Page title, when the file carries one.
    pub name: Option<String>,
    pub description: Option<String>,
    pub legal_notice: Option<String>,
    pub sections: Vec<FormulaSection>,
}

impl Catalog {
    /// Build a catalog from sections, validating every entry.
    pub fn new(sections: Vec<FormulaSection>) -> Result<Self> {
        let catalog = Catalog {
            sections,
            ..Catalog::default()
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::new();
        for entry in self.entries() {
            entry.validate()?;
            if !ids.insert(entry.id.as_str()) {
                return Err(FormularyError::DuplicateEntry(entry.id.clone()));
            }
        }
        Ok(())
    }

    /// All entries in section order.
    pub fn entries(&self) -> impl Iterator<Item = &FormulaEntry> {
        self.sections.iter().flat_map(|s| s.entries.iter())
    }

    pub fn entry(&self, id: &str) -> Option<&FormulaEntry> {
        self.entries().find(|e| e.id == id)
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}
