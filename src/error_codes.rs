//! jobnet error codes
//!
//! Error codes follow the pattern: JOB-{CATEGORY}-{3-digit number}
//!
//! Categories (1-4 uppercase letters):
//! - SEED: Seed job resolution
//! - NET: Remote job source failures (network, status, payload shape)
//! - GRF: Graph store and derived views
//! - IO: Snapshot files and output paths
//!
//! Each error code is stable and should not be reused.
//!
//! | Code | Description | Remediation |
//! |------|-------------|-------------|
//! | JOB-SEED-001 | Seed job unresolved | Check the job id exists and the site is reachable |
//! | JOB-NET-001 | Request failed | Check connectivity; raise `--timeout-secs` |
//! | JOB-NET-002 | Bad status | The site may be rate limiting; raise `--delay-ms` |
//! | JOB-NET-003 | Malformed payload | The endpoint changed shape; file a bug |
//! | JOB-NET-004 | Retries exhausted | Raise `--retries` or retry later |
//! | JOB-NET-005 | Interrupted | The run was stopped by SIGINT/SIGTERM |
//! | JOB-GRF-001 | Empty graph | Crawl produced nothing; check the seed id |
//! | JOB-IO-001 | Snapshot I/O | Check file path and permissions |
//! | JOB-IO-002 | Snapshot invalid | Re-export with `jobnet crawl --format json` |

/// Seed job name could not be resolved; the crawl cannot start
pub const JOB_SEED_001_UNRESOLVED: &str = "JOB-SEED-001";

/// Network error talking to the job source
pub const JOB_NET_001_REQUEST_FAILED: &str = "JOB-NET-001";

/// Job source answered with a non-success status
pub const JOB_NET_002_BAD_STATUS: &str = "JOB-NET-002";

/// Job source payload did not have the expected shape
pub const JOB_NET_003_MALFORMED_PAYLOAD: &str = "JOB-NET-003";

/// Retry budget exhausted
pub const JOB_NET_004_RETRIES_EXHAUSTED: &str = "JOB-NET-004";

/// Request abandoned because the run was interrupted
pub const JOB_NET_005_INTERRUPTED: &str = "JOB-NET-005";

/// Graph has no nodes; nothing to report or render
pub const JOB_GRF_001_EMPTY_GRAPH: &str = "JOB-GRF-001";

/// Snapshot file could not be read or written
pub const JOB_IO_001_SNAPSHOT_IO: &str = "JOB-IO-001";

/// Snapshot file is not a valid jobnet snapshot
pub const JOB_IO_002_SNAPSHOT_INVALID: &str = "JOB-IO-002";
