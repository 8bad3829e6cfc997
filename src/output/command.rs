//! JSON and human output types for CLI commands
//!
//! Every JSON document printed by the CLI is wrapped in a [`JsonResponse`]
//! carrying the schema version, an execution id and a timestamp, so callers
//! can parse output from different jobnet versions safely.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::graph::GraphStatistics;

/// Current JSON output schema version
pub const JOBNET_JSON_SCHEMA_VERSION: &str = "1.0.0";

/// Wrapper for all JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse<T> {
    pub schema_version: String,
    pub execution_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub data: T,
    /// Set when the data describes an interrupted crawl
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partial: Option<bool>,
}

impl<T> JsonResponse<T> {
    pub fn new(data: T, execution_id: &str) -> Self {
        JsonResponse {
            schema_version: JOBNET_JSON_SCHEMA_VERSION.to_string(),
            execution_id: execution_id.to_string(),
            tool: Some("jobnet".to_string()),
            timestamp: Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
            data,
            partial: None,
        }
    }

    /// Mark the response as partial
    pub fn with_partial(mut self, partial: bool) -> Self {
        self.partial = Some(partial);
        self
    }
}

/// Response for `jobnet stats`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub seed_id: String,
    pub seed_name: String,
    #[serde(flatten)]
    pub statistics: GraphStatistics,
}

impl StatsResponse {
    /// Human-readable statistics block
    pub fn to_human(&self) -> String {
        let stats = &self.statistics;
        let rule = "=".repeat(50);
        let mut out = String::new();
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "Graph statistics");
        let _ = writeln!(out, "{}", rule);
        let _ = writeln!(out, "seed: {} ({})", self.seed_name, self.seed_id);
        let _ = writeln!(out, "nodes: {}", stats.node_count);
        let _ = writeln!(out, "edges: {}", stats.edge_count);
        let _ = writeln!(out, "max_depth: {}", stats.max_depth);
        let _ = writeln!(out, "actual_depth: {}", stats.actual_depth);
        let _ = writeln!(out, "average_degree: {:.2}", stats.average_degree);
        let _ = writeln!(out, "visited_jobs: {}", stats.visited_jobs);
        let _ = writeln!(out, "{}", rule);
        out
    }
}

/// Response for `jobnet crawl`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResponse {
    #[serde(flatten)]
    pub stats: StatsResponse,
    pub completed: bool,
    pub failed_expansions: usize,
    /// Where the rendered graph was written, if not stdout
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Error payload for JSON mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Stable error code (JOB-*)
    pub code: String,
    pub message: String,
}

/// Output format for command reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Human,
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    Pretty,
}

impl OutputFormat {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "human" | "text" => Some(OutputFormat::Human),
            "json" => Some(OutputFormat::Json),
            "pretty" => Some(OutputFormat::Pretty),
            _ => None,
        }
    }

    pub fn is_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Pretty)
    }
}

/// Unique id for this run: hex timestamp + hex pid
pub fn generate_execution_id() -> String {
    let timestamp = chrono::Utc::now().timestamp().max(0);
    format!("{:x}-{:x}", timestamp, std::process::id())
}

/// Serialize to JSON, pretty-printed for [`OutputFormat::Pretty`]
pub fn format_json<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(data)?,
        _ => serde_json::to_string(data)?,
    })
}

/// Print JSON to stdout in the requested format
pub fn output_json<T: Serialize>(data: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", format_json(data, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> StatsResponse {
        StatsResponse {
            seed_id: "a1".into(),
            seed_name: "A".into(),
            statistics: GraphStatistics {
                node_count: 3,
                edge_count: 2,
                max_depth: 3,
                actual_depth: 1,
                average_degree: 4.0 / 3.0,
                visited_jobs: 3,
            },
        }
    }

    #[test]
    fn test_json_response_envelope() {
        let response = JsonResponse::new(stats(), "abc-1").with_partial(true);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["schema_version"], JOBNET_JSON_SCHEMA_VERSION);
        assert_eq!(value["execution_id"], "abc-1");
        assert_eq!(value["tool"], "jobnet");
        assert_eq!(value["partial"], true);
        // statistics are flattened into data
        assert_eq!(value["data"]["node_count"], 3);
        assert_eq!(value["data"]["seed_id"], "a1");
    }

    #[test]
    fn test_human_stats_use_two_decimals() {
        let text = stats().to_human();
        assert!(text.contains("nodes: 3"));
        assert!(text.contains("edges: 2"));
        assert!(text.contains("average_degree: 1.33"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("pretty"), Some(OutputFormat::Pretty));
        assert_eq!(OutputFormat::from_str("text"), Some(OutputFormat::Human));
        assert_eq!(OutputFormat::from_str("xml"), None);
        assert!(!OutputFormat::Human.is_json());
    }

    #[test]
    fn test_execution_id_format() {
        let id = generate_execution_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|p| p.chars().all(|c| c.is_ascii_hexdigit())));
    }
}
