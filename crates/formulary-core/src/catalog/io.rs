use super::{Catalog, FormulaSection};
use crate::error::{FormularyError, Result};
use serde::Deserialize;
use std::path::Path;

pub const MAX_CATALOG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

/// Object form of a catalog file. `formulaSections` is the key used by
/// content pages; `sections` is accepted as a shorter alias.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDocument {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    legal_notice: Option<String>,
    #[serde(alias = "sections")]
    formula_sections: Vec<FormulaSection>,
}

impl From<CatalogDocument> for Catalog {
    fn from(doc: CatalogDocument) -> Self {
        Catalog {
            name: doc.name,
            description: doc.description,
            legal_notice: doc.legal_notice,
            sections: doc.formula_sections,
        }
    }
}

/// Parse a JSON catalog: either a bare array of sections or an object.
pub fn parse_catalog_json(content: &str) -> Result<Catalog> {
    let catalog = if content.trim_start().starts_with('[') {
        let sections: Vec<FormulaSection> = serde_json::from_str(content)?;
        Catalog {
            sections,
            ..Catalog::default()
        }
    } else {
        let doc: CatalogDocument = serde_json::from_str(content)?;
        doc.into()
    };
    catalog.validate()?;
    Ok(catalog)
}

/// Parse a TOML catalog (`[[sections]]` or `[[formulaSections]]` tables).
pub fn parse_catalog_toml(content: &str) -> Result<Catalog> {
    let doc: CatalogDocument = toml::from_str(content)?;
    let catalog: Catalog = doc.into();
    catalog.validate()?;
    Ok(catalog)
}

/// Load a catalog file, choosing the format from its extension.
pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_CATALOG_FILE_BYTES {
        return Err(FormularyError::FileTooLarge {
            path: path.display().to_string(),
            size: meta.len(),
            max: MAX_CATALOG_FILE_BYTES,
        });
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let content = std::fs::read_to_string(path)?;
    let catalog = match ext.as_str() {
        "json" => parse_catalog_json(&content)?,
        "toml" => parse_catalog_toml(&content)?,
        _ => return Err(FormularyError::UnsupportedFormat(path.display().to_string())),
    };

    tracing::info!(
        path = %path.display(),
        sections = catalog.sections.len(),
        entries = catalog.entry_count(),
        "loaded formula catalog"
    );
    Ok(catalog)
}
