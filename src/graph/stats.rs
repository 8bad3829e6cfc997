//! Summary statistics over a finished crawl

use serde::{Deserialize, Serialize};

use super::{GraphError, JobGraph};

/// Statistics reported after a crawl
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Depth limit the crawl was configured with
    pub max_depth: usize,
    /// Deepest depth actually recorded
    pub actual_depth: usize,
    /// Sum of node degrees divided by node count
    pub average_degree: f64,
    /// Distinct job ids visited (seed included)
    pub visited_jobs: usize,
}

impl GraphStatistics {
    /// Compute statistics for a graph
    ///
    /// # Errors
    /// Returns [`GraphError::Empty`] when the graph has no nodes.
    pub fn compute(
        graph: &JobGraph,
        max_depth: usize,
        visited_jobs: usize,
    ) -> Result<Self, GraphError> {
        if graph.is_empty() {
            return Err(GraphError::Empty);
        }

        let degree_sum: usize = graph.nodes().map(|n| graph.degree(n)).sum();

        Ok(Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            max_depth,
            actual_depth: graph.max_recorded_depth().unwrap_or(0),
            average_degree: degree_sum as f64 / graph.node_count() as f64,
            visited_jobs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_graph_statistics() {
        let mut graph = JobGraph::new();
        graph.record_depth("A", 0);
        graph.add_edge("A", "B");
        graph.add_edge("A", "C");
        graph.record_depth("B", 1);
        graph.record_depth("C", 1);

        let stats = GraphStatistics::compute(&graph, 3, 3).unwrap();
        assert_eq!(stats.node_count, 3);
        assert_eq!(stats.edge_count, 2);
        assert_eq!(stats.max_depth, 3);
        assert_eq!(stats.actual_depth, 1);
        assert!((stats.average_degree - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.visited_jobs, 3);
    }

    #[test]
    fn test_empty_graph_is_refused() {
        let graph = JobGraph::new();
        let err = GraphStatistics::compute(&graph, 3, 0).unwrap_err();
        assert!(matches!(err, GraphError::Empty));
        assert_eq!(err.code(), "JOB-GRF-001");
    }

    #[test]
    fn test_single_node_has_zero_degree() {
        let mut graph = JobGraph::new();
        graph.record_depth("A", 0);
        let stats = GraphStatistics::compute(&graph, 0, 1).unwrap();
        assert_eq!(stats.average_degree, 0.0);
        assert_eq!(stats.actual_depth, 0);
    }
}
