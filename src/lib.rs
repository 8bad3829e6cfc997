//! jobnet: explore a job site's "similar jobs" network
//!
//! Starting from a seed job id, jobnet follows the site's related-jobs
//! recommendations depth-first up to a configured depth, builds an
//! undirected graph keyed by job name with the discovery depth of every
//! node, and renders it for Graphviz or as JSON/CSV.
//!
//! # Layers
//!
//! - [`source`]: the [`JobSource`] trait, the HTTP implementation with
//!   retries/backoff/pacing, payload parsing, and an in-memory source.
//! - [`crawl`]: the depth-bounded traversal that owns the visited set.
//! - [`graph`]: the graph store and its read-only views (statistics,
//!   snapshots, rendering).
//! - [`output`]: JSON envelopes and human reports for the CLI.
//!
//! # Example
//!
//! ```
//! use jobnet::{crawl, CrawlConfig, JobId, MemoryJobSource};
//!
//! let source = MemoryJobSource::new()
//!     .with_job("a1", "Backend Engineer")
//!     .with_related("a1", &[("b1", "SRE"), ("c1", "Data Engineer")]);
//!
//! let outcome = crawl(source, &CrawlConfig::new(JobId::new("a1"), 2)).unwrap();
//! assert_eq!(outcome.graph.node_count(), 3);
//! assert_eq!(outcome.graph.depth("SRE"), Some(1));
//! ```

pub mod crawl;
pub mod error_codes;
pub mod graph;
pub mod logging;
pub mod output;
pub mod source;
pub mod version;

pub use crawl::{crawl, CrawlConfig, CrawlError, CrawlOutcome, Crawler};
pub use graph::{
    render, ColorScheme, CrawlSnapshot, ExportFormat, GraphError, GraphStatistics, JobGraph,
    RenderConfig, SnapshotError,
};
pub use output::{generate_execution_id, output_json, JsonResponse, OutputFormat};
pub use source::{
    FetchConfig, FetchError, HttpJobSource, JobId, JobSource, MemoryJobSource, RelatedJob,
};
