//! Crawl behavior tests against the in-memory job source
//!
//! Each test builds a small related-jobs network and checks the graph,
//! depths and visited set the crawler produces.

use std::cell::Cell;
use std::collections::BTreeSet;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use jobnet::{crawl, CrawlConfig, Crawler, GraphStatistics, JobId, MemoryJobSource};

fn edge_set(outcome: &jobnet::CrawlOutcome) -> BTreeSet<(String, String)> {
    outcome
        .graph
        .edges()
        .map(|(a, b)| {
            let (a, b) = if a <= b { (a, b) } else { (b, a) };
            (a.to_string(), b.to_string())
        })
        .collect()
}

fn pair(a: &str, b: &str) -> (String, String) {
    (a.to_string(), b.to_string())
}

/// A -> {B, C}; B -> {A, D}
fn diamond_source() -> MemoryJobSource {
    MemoryJobSource::new()
        .with_job("seed_id", "A")
        .with_related("seed_id", &[("b1", "B"), ("c1", "C")])
        .with_related("b1", &[("seed_id", "A"), ("d1", "D")])
}

#[test]
fn test_mutual_reference_to_seed_is_suppressed() {
    let outcome = crawl(diamond_source(), &CrawlConfig::new(JobId::new("seed_id"), 2)).unwrap();

    let nodes: BTreeSet<&str> = outcome.graph.nodes().collect();
    assert_eq!(nodes, BTreeSet::from(["A", "B", "C", "D"]));

    assert_eq!(
        edge_set(&outcome),
        BTreeSet::from([pair("A", "B"), pair("A", "C"), pair("B", "D")])
    );

    assert_eq!(outcome.graph.depth("A"), Some(0));
    assert_eq!(outcome.graph.depth("B"), Some(1));
    assert_eq!(outcome.graph.depth("C"), Some(1));
    assert_eq!(outcome.graph.depth("D"), Some(2));
    assert!(outcome.completed);
}

#[test]
fn test_no_depth_exceeds_max_depth() {
    // chain a -> b -> c -> d -> e -> f
    let ids = ["a", "b", "c", "d", "e", "f"];
    let mut source = MemoryJobSource::new().with_job("a", "Job a");
    for link in ids.windows(2) {
        let name = format!("Job {}", link[1]);
        source = source.with_related(link[0], &[(link[1], name.as_str())]);
    }

    for max_depth in 0..=6 {
        let outcome = crawl(source.clone(), &CrawlConfig::new(JobId::new("a"), max_depth)).unwrap();
        assert!(
            outcome.graph.depths().all(|(_, depth)| depth <= max_depth),
            "depth bound violated for max_depth={}",
            max_depth
        );
        assert_eq!(outcome.graph.node_count(), (max_depth + 1).min(ids.len()));
    }
}

#[test]
fn test_depth_limit_stops_related_requests() {
    let mut source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("b", "B")])
        .with_related("b", &[("c", "C")])
        .with_related("c", &[("d", "D")]);

    let outcome = Crawler::new(&mut source, 2).run(&JobId::new("a")).unwrap();

    assert_eq!(outcome.graph.node_count(), 3);
    assert!(!outcome.graph.contains("D"));
    // leaves at max depth are never expanded
    assert_eq!(source.related_calls(), &[JobId::new("a"), JobId::new("b")]);
}

#[test]
fn test_seed_always_has_depth_zero() {
    let outcome = crawl(diamond_source(), &CrawlConfig::new(JobId::new("seed_id"), 5)).unwrap();
    assert_eq!(outcome.graph.depth(&outcome.seed_name), Some(0));
    assert_eq!(outcome.seed_name, "A");
}

#[test]
fn test_visited_count_bounded_by_distinct_ids_seen() {
    let source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("b", "B"), ("c", "C"), ("b", "B")])
        .with_related("b", &[("c", "C"), ("a", "A"), ("d", "D")])
        .with_related("c", &[("d", "D"), ("b", "B")]);

    let outcome = crawl(source, &CrawlConfig::new(JobId::new("a"), 4)).unwrap();

    let expected: BTreeSet<JobId> = ["a", "b", "c", "d"].into_iter().map(JobId::new).collect();
    assert_eq!(outcome.visited, expected);
}

#[test]
fn test_failed_expansion_leaves_leaf_and_siblings_continue() {
    let source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("b", "B"), ("c", "C")])
        .with_related("b", &[("x", "X")])
        .with_failing_related("b")
        .with_related("c", &[("e", "E")]);

    let outcome = crawl(source, &CrawlConfig::new(JobId::new("a"), 3)).unwrap();

    assert_eq!(outcome.graph.degree("B"), 1);
    assert!(!outcome.graph.contains("X"));
    assert_eq!(outcome.graph.depth("E"), Some(2));
    assert_eq!(outcome.failed_expansions, 1);
    assert!(outcome.completed);
}

#[test]
fn test_seed_listing_itself_adds_no_self_loop() {
    let mut source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("a", "A"), ("b", "B")]);

    let outcome = Crawler::new(&mut source, 3).run(&JobId::new("a")).unwrap();

    assert_eq!(outcome.graph.node_count(), 2);
    assert_eq!(outcome.graph.edge_count(), 1);
    assert_eq!(outcome.graph.degree("A"), 1);
    // the seed is expanded exactly once
    let seed_calls = source
        .related_calls()
        .iter()
        .filter(|id| id.as_str() == "a")
        .count();
    assert_eq!(seed_calls, 1);
}

#[test]
fn test_distinct_ids_sharing_a_name_collapse_into_one_node() {
    let source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("b1", "Engineer"), ("c", "C")])
        .with_related("c", &[("b2", "Engineer")]);

    let outcome = crawl(source, &CrawlConfig::new(JobId::new("a"), 3)).unwrap();

    assert_eq!(outcome.graph.node_count(), 3);
    // first discovery wins the depth
    assert_eq!(outcome.graph.depth("Engineer"), Some(1));
    assert_eq!(outcome.graph.degree("Engineer"), 2);
    assert_eq!(outcome.visited.len(), 4);
}

#[test]
fn test_statistics_after_crawl() {
    let source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("b", "B"), ("c", "C")]);

    let outcome = crawl(source, &CrawlConfig::new(JobId::new("a"), 3)).unwrap();
    let stats: GraphStatistics = outcome.statistics().unwrap();

    assert_eq!(stats.node_count, 3);
    assert_eq!(stats.edge_count, 2);
    assert_eq!(stats.max_depth, 3);
    assert_eq!(stats.actual_depth, 1);
    assert!((stats.average_degree - 4.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.visited_jobs, 3);
}

#[test]
fn test_interrupt_mid_crawl_returns_partial_graph() {
    let source = MemoryJobSource::new()
        .with_job("a", "A")
        .with_related("a", &[("b", "B"), ("c", "C")])
        .with_related("b", &[("d", "D")])
        .with_related("c", &[("e", "E")]);

    let flag = Arc::new(AtomicBool::new(false));
    let trigger = flag.clone();
    let discovered = Rc::new(Cell::new(0));
    let seen = discovered.clone();

    let outcome = Crawler::new(source, 3)
        .with_interrupt(flag)
        .with_progress(move |_depth, nodes| {
            seen.set(nodes);
            // stop as soon as the first child is in the graph
            trigger.store(true, Ordering::SeqCst);
        })
        .run(&JobId::new("a"))
        .unwrap();

    assert!(!outcome.completed);
    assert!(outcome.graph.contains("B"));
    assert!(!outcome.graph.contains("D"));
    // siblings of the interrupted branch are not added either
    assert!(!outcome.graph.contains("C"));
    assert_eq!(discovered.get(), 2);
    // the partial graph still renders and reports
    assert!(outcome.statistics().is_ok());
    assert!(!outcome.snapshot().completed);
}

#[test]
fn test_snapshot_round_trips_graph_shape() {
    let outcome = crawl(diamond_source(), &CrawlConfig::new(JobId::new("seed_id"), 2)).unwrap();
    let snapshot = outcome.snapshot();
    let graph = snapshot.to_graph().unwrap();

    assert_eq!(graph.node_count(), outcome.graph.node_count());
    assert_eq!(graph.edge_count(), outcome.graph.edge_count());
    assert_eq!(graph.depth("D"), Some(2));
    assert_eq!(snapshot.visited.len(), outcome.visited.len());
}
