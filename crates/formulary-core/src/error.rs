//! Error types for Formulary core.

use thiserror::Error;

/// Errors raised while loading a catalog or driving its cards.
///
/// Evaluation failures are not errors at this level: they are carried as
/// [`ErrorKind`](formulary_engine::engine::ErrorKind) values inside a card's outcome.
#[derive(Error, Debug)]
pub enum FormularyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Refusing to read {path}: catalog file too large ({size} bytes, max {max})")]
    FileTooLarge { path: String, size: u64, max: u64 },

    #[error("Unsupported catalog format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),

    #[error("Entry '{entry}': variable id '{id}' is not a valid identifier")]
    InvalidVariableId { entry: String, id: String },

    #[error("Entry '{entry}': variable '{id}' is declared more than once")]
    DuplicateVariable { entry: String, id: String },

    #[error("Entry id '{0}' is used more than once")]
    DuplicateEntry(String),

    #[error("No formula card with id '{0}'")]
    UnknownCard(String),

    #[error("Variable '{id}' is not declared by '{entry}'")]
    UnknownVariableId { entry: String, id: String },
}

pub type Result<T> = std::result::Result<T, FormularyError>;
