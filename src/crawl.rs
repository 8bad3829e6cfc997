//! Depth-bounded related-jobs crawl
//!
//! The crawler walks the "similar jobs" relation depth-first from a seed job.
//! The seed is registered at depth 0 and expanded with call depth 1; a job
//! discovered while expanding at call depth `d` is recorded at depth `d` and
//! expanded at `d + 1`, until `max_depth` is exceeded.
//!
//! # Deduplication
//!
//! - A related job whose id was already visited is skipped, so the first
//!   discoverer owns the edge and mutual references cannot recurse forever.
//! - A job id is expanded at most once. The seed is exempt from this guard
//!   on its first expansion.
//!
//! # Failures
//!
//! Only an unresolvable seed aborts the crawl. A failed related-jobs lookup
//! leaves that job as a leaf and the walk continues with its siblings.
//!
//! # Interruption
//!
//! An optional shared flag is polled before every expansion and once more
//! after the walk. Once set, the crawl stops expanding and returns what it
//! has; the graph is consistent at every poll point, so a partial result can
//! still be reported and rendered. A source that gives up on a request with
//! [`FetchError::Interrupted`] also marks the crawl interrupted, not failed.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error_codes;
use crate::graph::{CrawlSnapshot, GraphError, GraphStatistics, JobGraph};
use crate::source::{FetchError, JobId, JobSource};

/// What to crawl
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    pub seed: JobId,
    /// Deepest depth recorded in the graph; 0 keeps only the seed
    pub max_depth: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seed: JobId::new("83ix3"),
            max_depth: 3,
        }
    }
}

impl CrawlConfig {
    pub fn new(seed: JobId, max_depth: usize) -> Self {
        Self { seed, max_depth }
    }
}

/// Errors that abort a crawl
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    /// The seed's name could not be fetched; there is no root node
    #[error("cannot resolve seed job {job_id}: {source}")]
    SeedResolution {
        job_id: JobId,
        #[source]
        source: FetchError,
    },
}

impl CrawlError {
    pub fn code(&self) -> &'static str {
        match self {
            CrawlError::SeedResolution { .. } => error_codes::JOB_SEED_001_UNRESOLVED,
        }
    }
}

/// Progress callback: (current depth, nodes so far)
pub type CrawlProgress = dyn Fn(usize, usize);

/// Result of a crawl, complete or interrupted
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub seed_id: JobId,
    pub seed_name: String,
    pub max_depth: usize,
    pub graph: JobGraph,
    pub visited: BTreeSet<JobId>,
    /// False when the interrupt flag stopped the walk early
    pub completed: bool,
    /// Jobs whose related listing could not be fetched
    pub failed_expansions: usize,
}

impl CrawlOutcome {
    pub fn statistics(&self) -> Result<GraphStatistics, GraphError> {
        GraphStatistics::compute(&self.graph, self.max_depth, self.visited.len())
    }

    pub fn snapshot(&self) -> CrawlSnapshot {
        CrawlSnapshot::new(
            self.seed_id.as_str(),
            &self.seed_name,
            self.max_depth,
            self.completed,
            &self.graph,
            self.visited.iter().map(JobId::as_str),
        )
    }
}

/// Traversal session: owns the graph, visited set and expansion set
pub struct Crawler<S: JobSource> {
    source: S,
    max_depth: usize,
    graph: JobGraph,
    visited: HashSet<JobId>,
    expanded: HashSet<JobId>,
    interrupt: Option<Arc<AtomicBool>>,
    progress: Option<Box<CrawlProgress>>,
    interrupted: bool,
    failed_expansions: usize,
}

impl<S: JobSource> Crawler<S> {
    pub fn new(source: S, max_depth: usize) -> Self {
        Self {
            source,
            max_depth,
            graph: JobGraph::new(),
            visited: HashSet::new(),
            expanded: HashSet::new(),
            interrupt: None,
            progress: None,
            interrupted: false,
            failed_expansions: 0,
        }
    }

    /// Stop expanding once `flag` is set
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    pub fn with_progress(mut self, progress: impl Fn(usize, usize) + 'static) -> Self {
        self.progress = Some(Box::new(progress));
        self
    }

    /// Crawl from `seed`
    ///
    /// # Errors
    /// [`CrawlError::SeedResolution`] if the seed's name cannot be fetched.
    pub fn run(mut self, seed: &JobId) -> Result<CrawlOutcome, CrawlError> {
        let seed_name =
            self.source
                .resolve_job_name(seed)
                .map_err(|source| CrawlError::SeedResolution {
                    job_id: seed.clone(),
                    source,
                })?;
        info!("seed job: {} ({})", seed_name, seed);

        self.graph.add_node(&seed_name);
        self.graph.record_depth(&seed_name, 0);
        self.visited.insert(seed.clone());

        self.expand(seed, 1, &seed_name);
        // an interrupt during the last expansion is not seen by any later poll
        self.interrupt_requested();

        if self.interrupted {
            warn!(
                "crawl interrupted with {} nodes; returning partial graph",
                self.graph.node_count()
            );
        }

        Ok(CrawlOutcome {
            seed_id: seed.clone(),
            seed_name,
            max_depth: self.max_depth,
            graph: self.graph,
            visited: self.visited.into_iter().collect(),
            completed: !self.interrupted,
            failed_expansions: self.failed_expansions,
        })
    }

    fn interrupt_requested(&mut self) -> bool {
        if !self.interrupted {
            self.interrupted = self
                .interrupt
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::SeqCst));
        }
        self.interrupted
    }

    fn expand(&mut self, job_id: &JobId, depth: usize, parent: &str) {
        if depth > self.max_depth {
            return;
        }
        if depth > 1 && self.expanded.contains(job_id) {
            debug!("{} already expanded", job_id);
            return;
        }
        if self.interrupt_requested() {
            return;
        }
        self.expanded.insert(job_id.clone());

        info!("depth {}/{}: {}", depth, self.max_depth, parent);
        let related = match self.source.resolve_related(job_id) {
            Ok(related) => related,
            Err(FetchError::Interrupted { .. }) => {
                debug!("related jobs for {} abandoned on interrupt", job_id);
                self.interrupted = true;
                return;
            }
            Err(e) => {
                warn!("related jobs for {} ({}) unavailable: {}", parent, job_id, e);
                self.failed_expansions += 1;
                return;
            }
        };

        for job in related {
            if self.visited.contains(&job.id) {
                continue;
            }

            self.graph.add_node(&job.name);
            self.graph.add_edge(parent, &job.name);
            self.graph.record_depth(&job.name, depth);
            self.visited.insert(job.id.clone());

            if let Some(progress) = &self.progress {
                progress(depth, self.graph.node_count());
            }

            self.expand(&job.id, depth + 1, &job.name);
            if self.interrupted {
                break;
            }
        }
    }
}

/// Crawl with default session settings
pub fn crawl<S: JobSource>(source: S, config: &CrawlConfig) -> Result<CrawlOutcome, CrawlError> {
    Crawler::new(source, config.max_depth).run(&config.seed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemoryJobSource;

    #[test]
    fn test_max_depth_zero_keeps_only_seed_and_makes_no_related_calls() {
        let mut source = MemoryJobSource::new()
            .with_job("a", "A")
            .with_related("a", &[("b", "B")]);

        let outcome = Crawler::new(&mut source, 0).run(&JobId::new("a")).unwrap();
        assert_eq!(outcome.graph.node_count(), 1);
        assert_eq!(outcome.graph.depth("A"), Some(0));
        assert!(source.related_calls().is_empty());
    }

    #[test]
    fn test_seed_failure_is_fatal() {
        let source = MemoryJobSource::new();
        let err = crawl(source, &CrawlConfig::new(JobId::new("gone"), 2)).unwrap_err();
        assert_eq!(err.code(), "JOB-SEED-001");
    }

    #[test]
    fn test_interrupt_before_start_returns_seed_only() {
        let source = MemoryJobSource::new()
            .with_job("a", "A")
            .with_related("a", &[("b", "B")]);
        let flag = Arc::new(AtomicBool::new(true));

        let outcome = Crawler::new(source, 3)
            .with_interrupt(flag)
            .run(&JobId::new("a"))
            .unwrap();
        assert!(!outcome.completed);
        assert_eq!(outcome.graph.node_count(), 1);
    }

    #[test]
    fn test_interrupt_during_last_expansion_marks_outcome_partial() {
        let source = MemoryJobSource::new()
            .with_job("a", "A")
            .with_related("a", &[("b", "B")]);
        let flag = Arc::new(AtomicBool::new(false));
        let trigger = flag.clone();

        // depth 1 is the last level, so no later expansion polls the flag
        let outcome = Crawler::new(source, 1)
            .with_interrupt(flag)
            .with_progress(move |_, _| trigger.store(true, Ordering::SeqCst))
            .run(&JobId::new("a"))
            .unwrap();

        assert_eq!(outcome.graph.node_count(), 2);
        assert!(!outcome.completed);
    }
}
