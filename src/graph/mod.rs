//! In-memory job graph
//!
//! Undirected, simple, unweighted graph keyed by job display name, plus a
//! side table recording the discovery depth of each node.
//!
//! # Invariants
//!
//! - Node and edge collections only grow.
//! - Every node with a recorded depth is present in the graph.
//! - Every edge connects two present, distinct nodes.
//! - Iteration order is insertion order, so exports are deterministic for a
//!   given crawl.
//!
//! The store knows nothing about the network or about rendering; the crawler
//! writes into it and [`export`], [`stats`] and [`snapshot`] read from it.

pub mod export;
pub mod palette;
pub mod snapshot;
pub mod stats;

use std::collections::{BTreeSet, HashMap};

pub use export::{render, ExportFormat, RenderConfig};
pub use palette::ColorScheme;
pub use snapshot::{CrawlSnapshot, SnapshotError};
pub use stats::GraphStatistics;

/// Errors raised by read-side graph views
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The graph has no nodes
    #[error("graph has no nodes; nothing to report")]
    Empty,
}

impl GraphError {
    /// Stable error code for JSON error output
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::Empty => crate::error_codes::JOB_GRF_001_EMPTY_GRAPH,
        }
    }
}

/// Undirected job graph with a node -> depth side table
#[derive(Debug, Clone, Default)]
pub struct JobGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    adjacency: Vec<BTreeSet<usize>>,
    edges: Vec<(usize, usize)>,
    depths: Vec<Option<usize>>,
}

impl JobGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node (idempotent)
    ///
    /// Returns true if the node was newly inserted.
    pub fn add_node(&mut self, name: &str) -> bool {
        if self.index.contains_key(name) {
            return false;
        }
        self.insert_node(name);
        true
    }

    /// Add an undirected edge, creating missing endpoints (idempotent)
    ///
    /// A self-loop only ensures the node exists; the graph stays simple.
    /// Returns true if a new edge was inserted.
    pub fn add_edge(&mut self, a: &str, b: &str) -> bool {
        let ia = self.node_id(a);
        let ib = self.node_id(b);
        if ia == ib || self.adjacency[ia].contains(&ib) {
            return false;
        }
        self.adjacency[ia].insert(ib);
        self.adjacency[ib].insert(ia);
        self.edges.push((ia, ib));
        true
    }

    /// Record the discovery depth of a node, creating it if needed
    ///
    /// The first recorded depth wins. Two job ids that share a display name
    /// collapse into one node, and that node keeps the depth of whichever
    /// was discovered first.
    pub fn record_depth(&mut self, name: &str, depth: usize) {
        let id = self.node_id(name);
        self.depths[id].get_or_insert(depth);
    }

    /// Depth recorded for a node
    pub fn depth(&self, name: &str) -> Option<usize> {
        self.index.get(name).and_then(|&id| self.depths[id])
    }

    /// Number of neighbours of a node (0 for unknown names)
    pub fn degree(&self, name: &str) -> usize {
        self.index
            .get(name)
            .map(|&id| self.adjacency[id].len())
            .unwrap_or(0)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Node names in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    /// Edges in insertion order, as (first endpoint, second endpoint)
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.edges
            .iter()
            .map(|&(a, b)| (self.names[a].as_str(), self.names[b].as_str()))
    }

    /// Nodes that have a recorded depth, in insertion order
    pub fn depths(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.names
            .iter()
            .zip(&self.depths)
            .filter_map(|(name, depth)| depth.map(|d| (name.as_str(), d)))
    }

    /// Deepest recorded depth, if any node has one
    pub fn max_recorded_depth(&self) -> Option<usize> {
        self.depths.iter().flatten().copied().max()
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    fn node_id(&mut self, name: &str) -> usize {
        match self.index.get(name) {
            Some(&id) => id,
            None => self.insert_node(name),
        }
    }

    fn insert_node(&mut self, name: &str) -> usize {
        let id = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), id);
        self.adjacency.push(BTreeSet::new());
        self.depths.push(None);
        id
    }
}
