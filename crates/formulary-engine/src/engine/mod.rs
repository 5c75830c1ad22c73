//! Safe expression engine API.
//!
//! - [`validate`] - Character whitelist and allow-list check, returns the cleaned expression
//! - [`resolve`], [`VariableBindings`] - Positional lookup of bound values
//! - [`parse`], [`Expr`] - Recursive-descent parser producing an expression tree
//! - [`evaluate`], [`evaluate_expression`] - Numeric evaluation with classified errors
//! - [`format_number`] - Format values for display

mod bindings;
mod error;
mod eval;
mod format;
mod parse;
mod validate;

pub use bindings::{VariableBindings, resolve};
pub use error::ErrorKind;
pub use eval::{Outcome, evaluate, evaluate_expression};
pub use format::{DISPLAY_DECIMALS, format_number};
pub use parse::{BinOp, Expr, MAX_DEPTH, MAX_HEIGHT, ParseError, Token, parse, tokenize};
pub use validate::{extract_identifiers, is_identifier, normalize_expression, validate};
