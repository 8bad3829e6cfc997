//! CLI output
//!
//! Schema-versioned JSON envelopes and human-readable reports.

pub mod command;

pub use command::{
    format_json, generate_execution_id, output_json, CrawlResponse, ErrorResponse, JsonResponse, OutputFormat,
    StatsResponse, JOBNET_JSON_SCHEMA_VERSION,
};
