//! In-memory job source
//!
//! Serves names and related-job listings from maps. Used by the test suite
//! and handy for exercising the crawler without network access.

use std::collections::{HashMap, HashSet};

use super::{FetchError, JobId, JobSource, RelatedJob};

#[derive(Debug, Clone, Default)]
pub struct MemoryJobSource {
    names: HashMap<JobId, String>,
    related: HashMap<JobId, Vec<RelatedJob>>,
    failing: HashSet<JobId>,
    related_calls: Vec<JobId>,
}

impl MemoryJobSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a job's display name
    pub fn with_job(mut self, id: &str, name: &str) -> Self {
        self.names.insert(JobId::new(id), name.to_string());
        self
    }

    /// Register the related-jobs listing for `id`, as (id, name) pairs
    pub fn with_related(mut self, id: &str, related: &[(&str, &str)]) -> Self {
        let jobs = related
            .iter()
            .map(|(rid, name)| RelatedJob::new(*rid, *name))
            .collect();
        self.related.insert(JobId::new(id), jobs);
        self
    }

    /// Make related-jobs lookups for `id` fail as if retries were exhausted
    pub fn with_failing_related(mut self, id: &str) -> Self {
        self.failing.insert(JobId::new(id));
        self
    }

    /// Job ids whose related listing was requested, in call order
    pub fn related_calls(&self) -> &[JobId] {
        &self.related_calls
    }

    fn url_for(job_id: &JobId) -> String {
        format!("memory://job/{}", job_id)
    }
}

impl JobSource for MemoryJobSource {
    fn resolve_job_name(&mut self, job_id: &JobId) -> Result<String, FetchError> {
        self.names
            .get(job_id)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: Self::url_for(job_id),
                status: 404,
            })
    }

    fn resolve_related(&mut self, job_id: &JobId) -> Result<Vec<RelatedJob>, FetchError> {
        self.related_calls.push(job_id.clone());

        if self.failing.contains(job_id) {
            let url = Self::url_for(job_id);
            return Err(FetchError::RetriesExhausted {
                url: url.clone(),
                attempts: 1,
                last: Box::new(FetchError::Request {
                    url,
                    reason: "connection reset".to_string(),
                }),
            });
        }

        Ok(self.related.get(job_id).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_job_name_is_not_found() {
        let mut source = MemoryJobSource::new();
        let err = source.resolve_job_name(&JobId::new("nope")).unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[test]
    fn test_related_calls_are_recorded() {
        let mut source = MemoryJobSource::new()
            .with_related("a", &[("b", "B")])
            .with_failing_related("b");

        let related = source.resolve_related(&JobId::new("a")).unwrap();
        assert_eq!(related, vec![RelatedJob::new("b", "B")]);
        assert!(source.resolve_related(&JobId::new("b")).is_err());
        assert!(source.resolve_related(&JobId::new("c")).unwrap().is_empty());
        assert_eq!(
            source.related_calls(),
            &[JobId::new("a"), JobId::new("b"), JobId::new("c")]
        );
    }
}
