//! Remote job sources
//!
//! A [`JobSource`] answers two questions about a job id: what is its display
//! name, and which jobs does the site list as related. The crawler only sees
//! this trait, so the HTTP implementation ([`HttpJobSource`]) and the
//! in-memory one ([`MemoryJobSource`]) are interchangeable.

pub mod http;
pub mod memory;
pub mod parse;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error_codes;

pub use http::{FetchConfig, HttpJobSource};
pub use memory::MemoryJobSource;
pub use parse::{EntrySkip, JobLinkPattern};

/// Opaque job identifier used as the remote API key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        JobId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One entry of a related-jobs listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedJob {
    pub id: JobId,
    pub name: String,
}

impl RelatedJob {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        RelatedJob {
            id: JobId::new(id),
            name: name.into(),
        }
    }
}

/// Failure to fetch from a job source
#[derive(Debug, Clone, thiserror::Error)]
pub enum FetchError {
    /// Connection, DNS, TLS or timeout failure
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// Non-success HTTP status
    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    /// Body arrived but did not have the expected shape
    #[error("malformed payload from {url}: {reason}")]
    MalformedPayload { url: String, reason: String },

    /// The run was interrupted before the request could complete
    #[error("request to {url} abandoned: interrupted")]
    Interrupted { url: String },

    /// Every attempt failed; `last` is the final attempt's error
    #[error("gave up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Stable error code for JSON error output
    pub fn code(&self) -> &'static str {
        match self {
            FetchError::Request { .. } => error_codes::JOB_NET_001_REQUEST_FAILED,
            FetchError::Status { .. } => error_codes::JOB_NET_002_BAD_STATUS,
            FetchError::MalformedPayload { .. } => error_codes::JOB_NET_003_MALFORMED_PAYLOAD,
            FetchError::RetriesExhausted { .. } => error_codes::JOB_NET_004_RETRIES_EXHAUSTED,
            FetchError::Interrupted { .. } => error_codes::JOB_NET_005_INTERRUPTED,
        }
    }
}

/// Source of job names and related-job listings
pub trait JobSource {
    /// Resolve a job's display name
    ///
    /// Implementations fall back to the raw id when the job exists but its
    /// name cannot be extracted; only an unreachable job is an error.
    fn resolve_job_name(&mut self, job_id: &JobId) -> Result<String, FetchError>;

    /// List the jobs related to `job_id`, in the source's order
    ///
    /// Malformed individual entries are dropped, not reported as errors.
    fn resolve_related(&mut self, job_id: &JobId) -> Result<Vec<RelatedJob>, FetchError>;
}

impl<S: JobSource + ?Sized> JobSource for &mut S {
    fn resolve_job_name(&mut self, job_id: &JobId) -> Result<String, FetchError> {
        (**self).resolve_job_name(job_id)
    }

    fn resolve_related(&mut self, job_id: &JobId) -> Result<Vec<RelatedJob>, FetchError> {
        (**self).resolve_related(job_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_id_serializes_as_plain_string() {
        let id = JobId::new("83ix3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"83ix3\"");
        assert_eq!(id.to_string(), "83ix3");
    }

    #[test]
    fn test_fetch_error_codes() {
        let inner = FetchError::Status {
            url: "u".into(),
            status: 503,
        };
        assert_eq!(inner.code(), "JOB-NET-002");
        let exhausted = FetchError::RetriesExhausted {
            url: "u".into(),
            attempts: 4,
            last: Box::new(inner),
        };
        assert_eq!(exhausted.code(), "JOB-NET-004");
        assert!(exhausted.to_string().contains("HTTP 503"));
    }
}
