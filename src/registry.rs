//! Benchmark registry: named groups of candidates.
//!
//! Candidates are registered under a namespace. Every candidate in a
//! namespace is measured in the same group and, when the group has a
//! baseline, compared against it.

use std::collections::BTreeMap;

use crate::utils::routine::{IntoRoutine, Routine};

/// One function under measurement
#[derive(Debug)]
pub struct Candidate<'a> {
    pub is_baseline: bool,
    pub label: String,
    pub routine: Routine<'a>,
}

/// A named group of candidates, in registration order
#[derive(Debug)]
pub struct Namespace<'a> {
    name: String,
    candidates: Vec<Candidate<'a>>,
}

impl<'a> Namespace<'a> {
    fn new(name: String) -> Self {
        Self {
            name,
            candidates: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn candidates(&self) -> &[Candidate<'a>] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Whether the group runs through the comparison path
    pub fn has_baseline(&self) -> bool {
        self.candidates.iter().any(|c| c.is_baseline)
    }

    /// Move baseline-tagged candidates to the front, keeping relative order
    pub(crate) fn sort_baseline_first(&mut self) {
        // `sort_by_key` is stable; `!is_baseline` puts `true` tags first.
        self.candidates.sort_by_key(|c| !c.is_baseline);
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Candidate<'a>>) {
        (self.name, self.candidates)
    }
}

/// All groups registered for a run
#[derive(Debug, Default)]
pub struct BenchmarkRegistry<'a> {
    namespaces: BTreeMap<String, Namespace<'a>>,
}

impl<'a> BenchmarkRegistry<'a> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            namespaces: BTreeMap::new(),
        }
    }

    /// Register a candidate under `namespace`, creating the group if needed.
    ///
    /// Duplicate labels are kept as separate entries.
    pub fn register<M>(
        &mut self,
        namespace: &str,
        label: &str,
        is_baseline: bool,
        candidate: impl IntoRoutine<'a, M>,
    ) -> &mut Self {
        self.namespaces
            .entry(namespace.to_string())
            .or_insert_with(|| Namespace::new(namespace.to_string()))
            .candidates
            .push(Candidate {
                is_baseline,
                label: label.to_string(),
                routine: candidate.into_routine(),
            });
        self
    }

    /// Register a baseline-tagged candidate
    pub fn baseline<M>(
        &mut self,
        namespace: &str,
        label: &str,
        candidate: impl IntoRoutine<'a, M>,
    ) -> &mut Self {
        self.register(namespace, label, true, candidate)
    }

    /// Register a regular candidate
    pub fn candidate<M>(
        &mut self,
        namespace: &str,
        label: &str,
        candidate: impl IntoRoutine<'a, M>,
    ) -> &mut Self {
        self.register(namespace, label, false, candidate)
    }

    /// All groups, ordered by name
    pub fn enumerate(&self) -> impl Iterator<Item = &Namespace<'a>> {
        self.namespaces.values()
    }

    /// Find a group by name
    pub fn find(&self, name: &str) -> Option<&Namespace<'a>> {
        self.namespaces.get(name)
    }

    /// List group names
    pub fn group_names(&self) -> Vec<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    /// Keep only the groups whose name satisfies `keep`
    pub fn retain_groups<F: FnMut(&str) -> bool>(&mut self, mut keep: F) {
        self.namespaces.retain(|name, _| keep(name));
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.namespaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.namespaces.is_empty()
    }

    pub(crate) fn into_namespaces(self) -> impl Iterator<Item = Namespace<'a>> {
        self.namespaces.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(ns: &Namespace<'_>) -> Vec<String> {
        ns.candidates().iter().map(|c| c.label.clone()).collect()
    }

    #[test]
    fn test_register_creates_groups() {
        let mut registry = BenchmarkRegistry::new();
        assert!(registry.is_empty());

        registry
            .candidate("math", "naive", || {})
            .candidate("strings", "concat", || {})
            .candidate("math", "fast", || {});

        assert_eq!(registry.len(), 2);
        let math = registry.find("math").unwrap();
        assert_eq!(labels(math), vec!["naive", "fast"]);
        assert!(!math.has_baseline());
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn test_duplicate_labels_are_distinct() {
        let mut registry = BenchmarkRegistry::new();
        registry
            .candidate("math", "same", || {})
            .candidate("math", "same", || {});

        assert_eq!(registry.find("math").unwrap().len(), 2);
    }

    #[test]
    fn test_enumerate_is_deterministic() {
        let mut registry = BenchmarkRegistry::new();
        for name in ["zeta", "alpha", "mid"] {
            registry.candidate(name, "x", || {});
        }

        let names: Vec<&str> = registry.enumerate().map(|ns| ns.name()).collect();
        assert_eq!(names, vec!["alpha", "mid", "zeta"]);
        assert_eq!(registry.group_names(), names);
    }

    #[test]
    fn test_stable_baseline_sort() {
        let mut registry = BenchmarkRegistry::new();
        registry
            .candidate("g", "a", || {})
            .baseline("g", "b1", || {})
            .candidate("g", "c", || {})
            .baseline("g", "b2", || {})
            .candidate("g", "d", || {});

        let mut ns = registry.into_namespaces().next().unwrap();
        ns.sort_baseline_first();

        assert_eq!(labels(&ns), vec!["b1", "b2", "a", "c", "d"]);
        assert!(ns.has_baseline());
    }

    #[test]
    fn test_sort_without_baseline_keeps_order() {
        let mut registry = BenchmarkRegistry::new();
        registry
            .candidate("g", "3", || {})
            .candidate("g", "1", || {})
            .candidate("g", "2", || {});

        let mut ns = registry.into_namespaces().next().unwrap();
        ns.sort_baseline_first();

        assert_eq!(labels(&ns), vec!["3", "1", "2"]);
    }

    #[test]
    fn test_retain_groups() {
        let mut registry = BenchmarkRegistry::new();
        registry
            .candidate("math", "x", || {})
            .candidate("memory", "x", || {})
            .candidate("strings", "x", || {});

        registry.retain_groups(|name| name.starts_with("m"));

        assert_eq!(registry.group_names(), vec!["math", "memory"]);
    }

    #[test]
    fn test_register_accepts_all_shapes() {
        use crate::utils::routine::Shape;

        let mut registry = BenchmarkRegistry::new();
        registry
            .register("g", "batched", false, |n: u64| n)
            .register("g", "exact", false, |_n: u64| {})
            .register("g", "counted", false, || 8u64)
            .register("g", "single", false, || {});

        let shapes: Vec<Shape> = registry
            .find("g")
            .unwrap()
            .candidates()
            .iter()
            .map(|c| c.routine.shape())
            .collect();
        assert_eq!(
            shapes,
            vec![Shape::Batched, Shape::Exact, Shape::Counted, Shape::Single]
        );
    }
}
