//! jobnet CLI - related-jobs network explorer
//!
//! Usage: jobnet <command> [arguments]

mod cli;
mod crawl_cmd;
mod render_cmd;
mod stats_cmd;

use jobnet::output::{generate_execution_id, output_json, ErrorResponse, JsonResponse};
use jobnet::{CrawlError, FetchError, GraphError, OutputFormat, SnapshotError};
use std::process::ExitCode;

use cli::{parse_args, print_usage, Command};

/// Stable error code for the innermost typed error in the chain
fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<CrawlError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<FetchError>() {
            Some(e.code())
        } else if let Some(e) = cause.downcast_ref::<SnapshotError>() {
            Some(e.code())
        } else {
            cause.downcast_ref::<GraphError>().map(GraphError::code)
        }
    })
}

fn report_error(err: &anyhow::Error, output_format: OutputFormat) {
    if output_format.is_json() {
        if let Some(code) = error_code(err) {
            let response = JsonResponse::new(
                ErrorResponse {
                    code: code.to_string(),
                    message: format!("{:#}", err),
                },
                &generate_execution_id(),
            );
            if output_json(&response, output_format).is_ok() {
                return;
            }
        }
    }
    eprintln!("Error: {:#}", err);
}

fn main() -> ExitCode {
    let command = match parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_usage();
            return ExitCode::from(1);
        }
    };

    jobnet::logging::init(command.verbose(), command.json_output());

    let (result, output_format) = match command {
        Command::Crawl {
            crawl,
            fetch,
            render,
            output,
            show_stats,
            output_format,
            verbose: _,
        } => (
            crawl_cmd::run_crawl(crawl, fetch, render, output, show_stats, output_format),
            output_format,
        ),
        Command::Render {
            input,
            render,
            output,
            verbose: _,
        } => (
            render_cmd::run_render(input, render, output),
            OutputFormat::Human,
        ),
        Command::Stats {
            input,
            output_format,
            verbose: _,
        } => (stats_cmd::run_stats(input, output_format), output_format),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, output_format);
            ExitCode::from(1)
        }
    }
}
