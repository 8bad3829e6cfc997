//! Crawl command implementation
//!
//! The rendered graph goes to `--output` or stdout. The statistics report
//! goes to stdout when the graph was written to a file, and to stderr when
//! stdout already carries the graph. In JSON mode logging is limited to
//! errors, so that stderr report is the only other output.

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use jobnet::output::{
    format_json, generate_execution_id, CrawlResponse, JsonResponse, StatsResponse,
};
use jobnet::{
    render, CrawlConfig, Crawler, FetchConfig, HttpJobSource, OutputFormat, RenderConfig,
};

fn spinner(enabled: bool) -> ProgressBar {
    if !enabled {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {msg}")
    {
        bar.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub fn run_crawl(
    crawl: CrawlConfig,
    fetch: FetchConfig,
    render_config: RenderConfig,
    output: Option<PathBuf>,
    show_stats: bool,
    output_format: OutputFormat,
) -> Result<()> {
    // Create interrupt flag
    let interrupt = Arc::new(AtomicBool::new(false));
    let interrupt_clone = interrupt.clone();

    // Register signal handlers for SIGINT and SIGTERM
    #[cfg(unix)]
    {
        use signal_hook::consts::signal;
        use signal_hook::iterator::Signals;

        let mut signals = Signals::new([signal::SIGTERM, signal::SIGINT])?;

        // First signal stops the crawl gracefully; a second one exits at once
        std::thread::spawn(move || {
            for signal in &mut signals {
                if interrupt_clone.swap(true, Ordering::SeqCst) {
                    std::process::exit(128 + signal);
                }
                warn!("interrupt received; finishing with the partial graph (repeat to abort)");
            }
        });
    }

    let source = HttpJobSource::new(fetch, &crawl.seed)?.with_interrupt(interrupt.clone());

    let bar = spinner(!output_format.is_json() && std::io::stderr().is_terminal());
    let progress_bar = bar.clone();

    let result = Crawler::new(source, crawl.max_depth)
        .with_interrupt(interrupt.clone())
        .with_progress(move |depth, nodes| {
            progress_bar.set_message(format!("depth {} | {} jobs", depth, nodes));
        })
        .run(&crawl.seed);
    bar.finish_and_clear();
    let outcome = result?;

    if !outcome.completed {
        warn!("interrupted; rendering the partial graph");
    }
    if outcome.failed_expansions > 0 {
        warn!(
            "{} job(s) could not be expanded and were kept as leaves",
            outcome.failed_expansions
        );
    }

    let snapshot = outcome.snapshot();
    let rendered = render(&snapshot, &render_config)?;
    crate::render_cmd::write_rendered(output.as_deref(), &rendered)?;

    if !show_stats {
        return Ok(());
    }

    let stats = StatsResponse {
        seed_id: outcome.seed_id.to_string(),
        seed_name: outcome.seed_name.clone(),
        statistics: outcome.statistics()?,
    };

    let report = if output_format.is_json() {
        let response = CrawlResponse {
            stats,
            completed: outcome.completed,
            failed_expansions: outcome.failed_expansions,
            output: output.as_ref().map(|p| p.display().to_string()),
        };
        let envelope = JsonResponse::new(response, &generate_execution_id())
            .with_partial(!outcome.completed);
        format!("{}\n", format_json(&envelope, output_format)?)
    } else {
        stats.to_human()
    };

    if output.is_some() {
        print!("{}", report);
    } else {
        eprint!("{}", report);
    }
    Ok(())
}
