//! Render command implementation
//!
//! Re-renders a crawl snapshot (the JSON written by `jobnet crawl --format json`)
//! without touching the network.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use jobnet::{render, CrawlSnapshot, RenderConfig};

/// Write a rendered document to `output`, or stdout when absent
pub fn write_rendered(output: Option<&Path>, rendered: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("graph written to {}", path.display());
        }
        None => print!("{}", rendered),
    }
    Ok(())
}

pub fn run_render(input: PathBuf, config: RenderConfig, output: Option<PathBuf>) -> Result<()> {
    // stored degrees are not trusted; they are rebuilt from the edge list
    let snapshot = CrawlSnapshot::read(&input)?.normalized()?;

    let rendered = render(&snapshot, &config)?;
    write_rendered(output.as_deref(), &rendered)
}
