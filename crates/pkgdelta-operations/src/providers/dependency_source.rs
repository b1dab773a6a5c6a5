use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use pkgdelta_core::DependencyGraph;
use serde::Deserialize;

use crate::Result;
use crate::error::OperationError;
use crate::traits::DependencySource;

/// Dependency declaration in the project-graph JSON layout:
/// ```json
/// { "graph": { "dependencies": { "pkg-b": [{ "target": "pkg-a" }] } } }
/// ```
#[derive(Debug, Deserialize)]
struct Declaration {
    graph: GraphSection,
}

#[derive(Debug, Deserialize)]
struct GraphSection {
    #[serde(default)]
    dependencies: IndexMap<String, Vec<Edge>>,
}

#[derive(Debug, Deserialize)]
struct Edge {
    target: String,
}

pub struct JsonDependencySource;

impl JsonDependencySource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonDependencySource {
    fn default() -> Self {
        Self::new()
    }
}

impl DependencySource for JsonDependencySource {
    fn load(&self, path: &Path) -> Result<DependencyGraph> {
        let content = fs::read_to_string(path).map_err(|source| OperationError::DependencyRead {
            path: path.to_path_buf(),
            source,
        })?;

        let declaration: Declaration =
            serde_json::from_str(&content).map_err(|source| OperationError::DependencyParse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut graph = DependencyGraph::new();
        for (dependent, edges) in declaration.graph.dependencies {
            for edge in edges {
                graph.add_dependency(dependent.clone(), edge.target);
            }
        }

        Ok(graph)
    }
}
