//! Formula catalog state (UI-agnostic).
//!
//! [`Formulary`] instantiates one [`FormulaCard`] per catalog entry, keeping
//! section and entry order. Cards are addressed either by entry id or by a
//! flat index over all entries, which is what list-style front ends use.

use crate::card::FormulaCard;
use crate::catalog::Catalog;
use crate::error::{FormularyError, Result};

/// A section header together with the cards of its entries.
#[derive(Clone, Debug)]
pub struct SectionCards {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cards: Vec<FormulaCard>,
}

/// All live formula cards of a catalog.
#[derive(Clone, Debug, Default)]
pub struct Formulary {
    pub name: Option<String>,
    pub description: Option<String>,
    pub legal_notice: Option<String>,
    sections: Vec<SectionCards>,
}

impl Formulary {
    pub fn new(catalog: Catalog) -> Self {
        let sections: Vec<SectionCards> = catalog
            .sections
            .into_iter()
            .map(|section| SectionCards {
                id: section.id,
                title: section.title,
                description: section.description,
                cards: section.entries.into_iter().map(FormulaCard::new).collect(),
            })
            .collect();
        tracing::debug!(sections = sections.len(), "formulary initialized");
        Formulary {
            name: catalog.name,
            description: catalog.description,
            legal_notice: catalog.legal_notice,
            sections,
        }
    }

    pub fn sections(&self) -> &[SectionCards] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.card_count() == 0
    }

    pub fn card_count(&self) -> usize {
        self.sections.iter().map(|s| s.cards.len()).sum()
    }

    /// All cards in section order.
    pub fn cards(&self) -> impl Iterator<Item = &FormulaCard> {
        self.sections.iter().flat_map(|s| s.cards.iter())
    }

    pub fn card(&self, id: &str) -> Option<&FormulaCard> {
        self.cards().find(|c| c.id() == id)
    }

    pub fn card_mut(&mut self, id: &str) -> Result<&mut FormulaCard> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.cards.iter_mut())
            .find(|c| c.id() == id)
            .ok_or_else(|| FormularyError::UnknownCard(id.to_string()))
    }

    pub fn card_at(&self, index: usize) -> Option<&FormulaCard> {
        self.cards().nth(index)
    }

    pub fn card_at_mut(&mut self, index: usize) -> Option<&mut FormulaCard> {
        self.sections
            .iter_mut()
            .flat_map(|s| s.cards.iter_mut())
            .nth(index)
    }

    /// Index of the section containing the card at a flat index.
    pub fn section_index_of(&self, index: usize) -> Option<usize> {
        let mut remaining = index;
        for (i, section) in self.sections.iter().enumerate() {
            if remaining < section.cards.len() {
                return Some(i);
            }
            remaining -= section.cards.len();
        }
        None
    }
}
