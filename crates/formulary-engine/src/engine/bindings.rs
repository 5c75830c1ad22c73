//! Variable bindings and positional resolution.

use std::collections::HashMap;

/// Current numeric value of every declared variable of one formula.
///
/// The key set is fixed at construction: there is exactly one entry per
/// declared id and unknown ids are never inserted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableBindings {
    values: HashMap<String, f64>,
}

impl VariableBindings {
    /// Build bindings from `(id, default)` pairs. Missing defaults become 0.
    pub fn new<'a, I>(declared: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, Option<f64>)>,
    {
        let values = declared
            .into_iter()
            .map(|(id, default)| (id.to_string(), default.unwrap_or(0.0)))
            .collect();
        VariableBindings { values }
    }

    pub fn get(&self, id: &str) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    /// Update a declared variable. Returns false (and changes nothing) for an
    /// undeclared id.
    pub fn set(&mut self, id: &str, value: f64) -> bool {
        match self.values.get_mut(id) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn as_map(&self) -> &HashMap<String, f64> {
        &self.values
    }
}

/// Resolve the bound value of each declared variable, in declaration order.
/// Ids absent from `bindings` resolve to 0.
pub fn resolve<S: AsRef<str>>(declared: &[S], bindings: &HashMap<String, f64>) -> Vec<f64> {
    declared
        .iter()
        .map(|id| bindings.get(id.as_ref()).copied().unwrap_or(0.0))
        .collect()
}
