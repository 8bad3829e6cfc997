//! Crawl snapshots
//!
//! A snapshot is the JSON form of a finished (or interrupted) crawl: the
//! graph, its depth table and the visited job ids. `jobnet render` and
//! `jobnet stats` work from snapshots without touching the network.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::JobGraph;

/// Snapshot schema version
pub const SNAPSHOT_SCHEMA_VERSION: &str = "1.0.0";

/// Snapshot read/validation failures
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("cannot access snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Structurally valid JSON that breaks a graph invariant
    #[error("invalid snapshot: {0}")]
    Invalid(String),
}

impl SnapshotError {
    pub fn code(&self) -> &'static str {
        match self {
            SnapshotError::Io { .. } => crate::error_codes::JOB_IO_001_SNAPSHOT_IO,
            SnapshotError::Parse { .. } | SnapshotError::Invalid(_) => {
                crate::error_codes::JOB_IO_002_SNAPSHOT_INVALID
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotNode {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<usize>,
    pub degree: usize,
}

/// Serialized crawl result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlSnapshot {
    pub schema_version: String,
    pub seed_id: String,
    pub seed_name: String,
    pub max_depth: usize,
    /// False when the crawl was interrupted before finishing
    pub completed: bool,
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<(String, String)>,
    pub visited: Vec<String>,
}

impl CrawlSnapshot {
    pub fn new<'a>(
        seed_id: &str,
        seed_name: &str,
        max_depth: usize,
        completed: bool,
        graph: &JobGraph,
        visited: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let nodes = graph
            .nodes()
            .map(|name| SnapshotNode {
                name: name.to_string(),
                depth: graph.depth(name),
                degree: graph.degree(name),
            })
            .collect();
        let edges = graph
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        let mut visited: Vec<String> = visited.into_iter().map(str::to_string).collect();
        visited.sort();

        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            seed_id: seed_id.to_string(),
            seed_name: seed_name.to_string(),
            max_depth,
            completed,
            nodes,
            edges,
            visited,
        }
    }

    /// Rebuild the graph described by this snapshot
    ///
    /// # Errors
    /// Returns [`SnapshotError::Invalid`] if an edge names a node that is
    /// not listed in `nodes`.
    pub fn to_graph(&self) -> Result<JobGraph, SnapshotError> {
        let mut graph = JobGraph::new();
        for node in &self.nodes {
            graph.add_node(&node.name);
            if let Some(depth) = node.depth {
                graph.record_depth(&node.name, depth);
            }
        }
        for (a, b) in &self.edges {
            for endpoint in [a, b] {
                if !graph.contains(endpoint) {
                    return Err(SnapshotError::Invalid(format!(
                        "edge endpoint '{}' is not a listed node",
                        endpoint
                    )));
                }
            }
            graph.add_edge(a, b);
        }
        Ok(graph)
    }

    /// Validate and rebuild, recomputing every node's degree from the edges
    ///
    /// # Errors
    /// Same as [`CrawlSnapshot::to_graph`].
    pub fn normalized(&self) -> Result<Self, SnapshotError> {
        let graph = self.to_graph()?;
        Ok(Self::new(
            &self.seed_id,
            &self.seed_name,
            self.max_depth,
            self.completed,
            &graph,
            self.visited.iter().map(String::as_str),
        ))
    }

    pub fn read(path: &Path) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| SnapshotError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
