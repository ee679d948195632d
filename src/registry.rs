//! Named capacitor ratings, built once from the rating file.

use std::collections::HashMap;

use crate::ir::ComponentSpec;

/// Lookup table of component specs keyed by part name.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    specs: HashMap<String, ComponentSpec>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a spec. A later spec with the same name replaces the earlier one.
    pub fn insert(&mut self, spec: ComponentSpec) -> Option<ComponentSpec> {
        let previous = self.specs.insert(spec.name.clone(), spec);
        if let Some(ref old) = previous {
            tracing::warn!(
                part = %old.name,
                "duplicate capacitor definition, keeping the last one"
            );
        }
        previous
    }

    pub fn get(&self, name: &str) -> Option<&ComponentSpec> {
        self.specs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Part names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl FromIterator<ComponentSpec> for Registry {
    fn from_iter<I: IntoIterator<Item = ComponentSpec>>(iter: I) -> Self {
        let mut registry = Registry::new();
        for spec in iter {
            registry.insert(spec);
        }
        registry
    }
}

impl From<Vec<ComponentSpec>> for Registry {
    fn from(specs: Vec<ComponentSpec>) -> Self {
        specs.into_iter().collect()
    }
}
