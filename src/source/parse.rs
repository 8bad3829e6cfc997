//! Payload extraction for the job site
//!
//! Pure functions over response bodies: no I/O, no retries. Deterministic
//! failures here are never retried at the entry level; a whole payload with
//! the wrong shape is reported so the fetch layer can decide.

use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

use super::RelatedJob;

/// Job name is the `<title>` text up to the full-width bar delimiter.
static TITLE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<title>(.*?)｜").ok());

/// Extract and HTML-unescape the job name from a detail page
///
/// Returns `None` when the page has no title in the expected form.
pub fn extract_job_name(html: &str) -> Option<String> {
    let re = TITLE_RE.as_ref()?;
    let raw = re.captures(html)?.get(1)?.as_str();
    let name = html_escape::decode_html_entities(raw).trim().to_string();
    (!name.is_empty()).then_some(name)
}

/// Matches job links such as `//www.104.com.tw/job/83ix3?jobsource=...`
#[derive(Debug, Clone)]
pub struct JobLinkPattern {
    re: Regex,
}

impl JobLinkPattern {
    /// Build the pattern for a site authority (`host` or `host:port`)
    pub fn for_authority(authority: &str) -> Result<Self, regex::Error> {
        let re = Regex::new(&format!(r"//{}/job/(\w+)", regex::escape(authority)))?;
        Ok(Self { re })
    }

    /// Job id embedded in a link, if the link points at a job page
    pub fn job_id<'a>(&self, link: &'a str) -> Option<&'a str> {
        self.re.captures(link)?.get(1).map(|m| m.as_str())
    }
}

/// Why a related-jobs entry was skipped
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntrySkip {
    #[error("entry {index}: missing job name")]
    MissingName { index: usize },

    #[error("entry {index}: missing job link")]
    MissingLink { index: usize },

    #[error("entry {index}: link '{link}' does not point at a job")]
    UnrecognizedLink { index: usize, link: String },

    #[error("entry {index}: {reason}")]
    Malformed { index: usize, reason: String },
}

#[derive(Debug, Deserialize)]
struct SimilarJobsPayload {
    data: SimilarJobsData,
}

#[derive(Debug, Deserialize)]
struct SimilarJobsData {
    list: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct SimilarJobEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    link: Option<EntryLink>,
}

#[derive(Debug, Deserialize)]
struct EntryLink {
    #[serde(default)]
    job: Option<String>,
}

/// Parsed related-jobs listing
#[derive(Debug, Default)]
pub struct RelatedListing {
    pub jobs: Vec<RelatedJob>,
    pub skipped: Vec<EntrySkip>,
}

/// Parse a `similarJobs` response body
///
/// # Errors
/// Returns a reason string when the body is not JSON or lacks `data.list`.
/// Individual bad entries are collected in [`RelatedListing::skipped`].
pub fn parse_related(body: &str, links: &JobLinkPattern) -> Result<RelatedListing, String> {
    let payload: SimilarJobsPayload =
        serde_json::from_str(body).map_err(|e| format!("expected data.list: {}", e))?;

    let mut listing = RelatedListing::default();
    for (index, value) in payload.data.list.into_iter().enumerate() {
        match parse_entry(index, value, links) {
            Ok(job) => listing.jobs.push(job),
            Err(skip) => listing.skipped.push(skip),
        }
    }
    Ok(listing)
}

fn parse_entry(
    index: usize,
    value: serde_json::Value,
    links: &JobLinkPattern,
) -> Result<RelatedJob, EntrySkip> {
    let entry: SimilarJobEntry = serde_json::from_value(value).map_err(|e| EntrySkip::Malformed {
        index,
        reason: e.to_string(),
    })?;

    let name = entry
        .name
        .filter(|n| !n.is_empty())
        .ok_or(EntrySkip::MissingName { index })?;
    let link = entry
        .link
        .and_then(|l| l.job)
        .filter(|l| !l.is_empty())
        .ok_or(EntrySkip::MissingLink { index })?;
    let id = links
        .job_id(&link)
        .ok_or_else(|| EntrySkip::UnrecognizedLink {
            index,
            link: link.clone(),
        })?;

    Ok(RelatedJob::new(id, name))
}
