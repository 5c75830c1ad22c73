//! formulary-core - UI-agnostic formula catalog model and card controllers.

pub mod card;
pub mod catalog;
pub mod error;
pub mod formulary;

pub use card::{CardDisplay, FormulaCard, HINT};
pub use catalog::{Catalog, FormulaEntry, FormulaSection, FormulaVariable, load_catalog};
pub use error::{FormularyError, Result};
pub use formulary::{Formulary, SectionCards};

pub use formulary_engine::engine::{ErrorKind, Outcome};
