//! HTTP job source with retry, backoff, pacing and timeouts.

use anyhow::{Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, REFERER};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::parse::{extract_job_name, parse_related, JobLinkPattern};
use super::{FetchError, JobId, JobSource, RelatedJob};

/// Configuration for the HTTP job source.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Site root, e.g. `https://www.104.com.tw`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Backoff unit; retry `n` waits `retry_delay * n`.
    pub retry_delay: Duration,
    /// Minimum gap between consecutive requests. Zero disables pacing.
    pub request_delay: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.104.com.tw".to_string(),
            timeout: Duration::from_secs(10),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            request_delay: Duration::from_millis(300),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string(),
        }
    }
}

impl FetchConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn with_retry_delay(mut self, retry_delay: Duration) -> Self {
        self.retry_delay = retry_delay;
        self
    }

    pub fn with_request_delay(mut self, request_delay: Duration) -> Self {
        self.request_delay = request_delay;
        self
    }

    fn site_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// Job source backed by the job site's detail pages and similar-jobs API.
#[derive(Debug)]
pub struct HttpJobSource {
    config: FetchConfig,
    client: reqwest::blocking::Client,
    links: JobLinkPattern,
    last_request: Option<Instant>,
    interrupt: Option<Arc<AtomicBool>>,
}

/// Longest uninterrupted sleep while waiting out a backoff or pacing delay
const SLEEP_SLICE: Duration = Duration::from_millis(50);

impl HttpJobSource {
    /// Build a source whose requests carry a `Referer` for `seed`.
    pub fn new(config: FetchConfig, seed: &JobId) -> Result<Self> {
        let base = reqwest::Url::parse(config.site_root())
            .with_context(|| format!("invalid base URL: {}", config.base_url))?;
        let host = base
            .host_str()
            .with_context(|| format!("base URL has no host: {}", config.base_url))?;
        let authority = match base.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        let links = JobLinkPattern::for_authority(&authority)?;

        let referer = format!(
            "{}/jobs/apply/analysis/{}?jobsource=my104_apply",
            config.site_root(),
            seed
        );
        let mut headers = HeaderMap::new();
        headers.insert(REFERER, HeaderValue::from_str(&referer)?);

        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .gzip(true)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            config,
            client,
            links,
            last_request: None,
            interrupt: None,
        })
    }

    /// Give up on pending retries and delays once `flag` is set
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }

    /// Sleep for `duration` in short slices; false if interrupted meanwhile.
    fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if self.interrupted() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            std::thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }

    /// Sleep until `request_delay` has passed since the previous request.
    fn pace(&mut self) -> bool {
        let mut completed = true;
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.config.request_delay {
                completed = self.sleep(self.config.request_delay - elapsed);
            }
        }
        self.last_request = Some(Instant::now());
        completed
    }

    /// One GET; any non-2xx status is an error.
    fn get_once(&mut self, url: &str) -> Result<String, FetchError> {
        if !self.pace() {
            return Err(FetchError::Interrupted {
                url: url.to_string(),
            });
        }

        let response = self.client.get(url).send().map_err(|e| FetchError::Request {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().map_err(|e| FetchError::Request {
            url: url.to_string(),
            reason: format!("reading body: {}", e),
        })
    }

    /// GET `url` and decode it, retrying transport, status and decode failures.
    ///
    /// An interrupt stops the loop before the next attempt and cuts any
    /// backoff short with [`FetchError::Interrupted`].
    fn get_with_retry<T>(
        &mut self,
        url: &str,
        decode: impl Fn(&str) -> Result<T, String>,
    ) -> Result<T, FetchError> {
        let attempts = self.config.max_retries + 1;
        let mut last_err = FetchError::Request {
            url: url.to_string(),
            reason: "no attempt made".to_string(),
        };

        for attempt in 0..attempts {
            if attempt > 0 {
                let backoff = self.config.retry_delay * attempt;
                debug!(
                    "retry {}/{} for {} after {:?}",
                    attempt, self.config.max_retries, url, backoff
                );
                if !self.sleep(backoff) {
                    debug!("interrupted while backing off from {}", url);
                    return Err(FetchError::Interrupted {
                        url: url.to_string(),
                    });
                }
            }

            let result = self.get_once(url).and_then(|body| {
                decode(&body).map_err(|reason| FetchError::MalformedPayload {
                    url: url.to_string(),
                    reason,
                })
            });

            match result {
                Ok(value) => return Ok(value),
                Err(e @ FetchError::Interrupted { .. }) => return Err(e),
                Err(e) => {
                    debug!("attempt {}/{} failed: {}", attempt + 1, attempts, e);
                    last_err = e;
                }
            }
        }

        Err(FetchError::RetriesExhausted {
            url: url.to_string(),
            attempts,
            last: Box::new(last_err),
        })
    }
}

impl JobSource for HttpJobSource {
    fn resolve_job_name(&mut self, job_id: &JobId) -> Result<String, FetchError> {
        let url = format!("{}/job/{}", self.config.site_root(), job_id);
        let page = self.get_with_retry(&url, |body| Ok(body.to_string()))?;

        match extract_job_name(&page) {
            Some(name) => Ok(name),
            None => {
                warn!("no job name in page title for {}; using the id", job_id);
                Ok(job_id.to_string())
            }
        }
    }

    fn resolve_related(&mut self, job_id: &JobId) -> Result<Vec<RelatedJob>, FetchError> {
        let url = format!("{}/job/ajax/similarJobs/{}", self.config.site_root(), job_id);
        let links = self.links.clone();
        let listing = self.get_with_retry(&url, |body| parse_related(body, &links))?;

        for skip in &listing.skipped {
            debug!("{}: skipped related entry: {}", job_id, skip);
        }
        info!(
            "{}: {} related jobs ({} skipped)",
            job_id,
            listing.jobs.len(),
            listing.skipped.len()
        );
        Ok(listing.jobs)
    }
}
