//! Dependency tracking between formula outputs and inputs

use crate::formula::FieldRef;
use ahash::{AHashMap, AHashSet};

/// Dependency graph over indicator fields
///
/// Tracks which fields are computed from which other fields, so that a
/// formula list can be checked for cycles and ordered before evaluation.
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// Field → fields computed from it (dependents)
    dependents: AHashMap<FieldRef, AHashSet<FieldRef>>,
    /// Field → fields it is computed from (precedents)
    precedents: AHashMap<FieldRef, AHashSet<FieldRef>>,
}

impl DependencyGraph {
    /// Create a new empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a dependency: dependent is computed from precedent
    pub fn add_dependency(&mut self, precedent: FieldRef, dependent: FieldRef) {
        self.dependents
            .entry(precedent.clone())
            .or_default()
            .insert(dependent.clone());
        self.precedents
            .entry(dependent)
            .or_default()
            .insert(precedent);
    }

    /// Get fields computed from the given field
    pub fn get_dependents<'a>(&'a self, field: &FieldRef) -> impl Iterator<Item = &'a FieldRef> + 'a {
        self.dependents.get(field).into_iter().flat_map(|set| set.iter())
    }

    /// Get fields the given field is computed from
    pub fn get_precedents<'a>(&'a self, field: &FieldRef) -> impl Iterator<Item = &'a FieldRef> + 'a {
        self.precedents.get(field).into_iter().flat_map(|set| set.iter())
    }

    /// Detect circular references involving a field
    pub fn has_circular_reference(&self, field: &FieldRef) -> bool {
        let mut visited = AHashSet::new();
        let mut in_stack = AHashSet::new();
        self.detect_cycle(field, &mut visited, &mut in_stack)
    }

    fn detect_cycle<'a>(
        &'a self,
        field: &'a FieldRef,
        visited: &mut AHashSet<&'a FieldRef>,
        in_stack: &mut AHashSet<&'a FieldRef>,
    ) -> bool {
        if in_stack.contains(field) {
            return true;
        }
        if visited.contains(field) {
            return false;
        }

        visited.insert(field);
        in_stack.insert(field);

        if let Some(precedents) = self.precedents.get(field) {
            for precedent in precedents {
                if self.detect_cycle(precedent, visited, in_stack) {
                    return true;
                }
            }
        }

        in_stack.remove(field);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(name: &str) -> FieldRef {
        FieldRef::new("g", name)
    }

    #[test]
    fn test_add_dependency() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(f("a"), f("b"));

        assert!(graph.get_dependents(&f("a")).any(|c| *c == f("b")));
        assert!(graph.get_precedents(&f("b")).any(|c| *c == f("a")));
        assert!(!graph.has_circular_reference(&f("b")));
    }

    #[test]
    fn test_circular_reference() {
        let mut graph = DependencyGraph::new();

        // a -> b -> c -> a
        graph.add_dependency(f("a"), f("b"));
        graph.add_dependency(f("b"), f("c"));
        graph.add_dependency(f("c"), f("a"));

        assert!(graph.has_circular_reference(&f("a")));
        assert!(graph.has_circular_reference(&f("b")));
        assert!(graph.has_circular_reference(&f("c")));
    }

    #[test]
    fn test_self_reference() {
        let mut graph = DependencyGraph::new();
        graph.add_dependency(f("a"), f("a"));
        assert!(graph.has_circular_reference(&f("a")));
    }
}
