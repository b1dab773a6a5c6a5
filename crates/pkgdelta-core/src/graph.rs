use indexmap::IndexMap;

/// Reverse dependency edges: full package name to the packages that depend on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    dependents: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `dependent` depends on `target`.
    ///
    /// Self-edges and duplicates are stored as given.
    pub fn add_dependency(&mut self, dependent: impl Into<String>, target: impl Into<String>) {
        self.dependents
            .entry(target.into())
            .or_default()
            .push(dependent.into());
    }

    /// Packages that directly depend on `full_name`, in declaration order.
    #[must_use]
    pub fn dependents_of(&self, full_name: &str) -> &[String] {
        self.dependents
            .get(full_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dependents.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dependents.len()
    }
}
