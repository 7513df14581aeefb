use std::collections::BTreeMap;

/// Tally of component occurrences keyed by component type
pub type TypeCounts = BTreeMap<String, usize>;

/// CbomAnalysis value object: what one tool found in one repository
///
/// The emptiness flag is derived from the component count, so a result can
/// never claim to be empty while reporting components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CbomAnalysis {
    total_components: usize,
    component_types: TypeCounts,
    error: Option<String>,
}

impl CbomAnalysis {
    /// Builds an analysis from a type tally; the total is the sum of the tally
    pub fn from_type_counts(component_types: TypeCounts) -> Self {
        let total_components = component_types.values().sum();
        Self {
            total_components,
            component_types,
            error: None,
        }
    }

    /// Zero-count analysis carrying an error marker
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            total_components: 0,
            component_types: TypeCounts::new(),
            error: Some(error.into()),
        }
    }

    pub fn total_components(&self) -> usize {
        self.total_components
    }

    pub fn is_empty(&self) -> bool {
        self.total_components == 0
    }

    pub fn component_types(&self) -> &TypeCounts {
        &self.component_types
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_parts(self) -> (usize, TypeCounts, Option<String>) {
        (self.total_components, self.component_types, self.error)
    }
}
