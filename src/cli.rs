//! CLI argument parsing for jobnet
//!
//! Defines the Command enum and parse_args() for all subcommands.

use anyhow::Result;
use jobnet::{ColorScheme, CrawlConfig, ExportFormat, FetchConfig, JobId, OutputFormat, RenderConfig};
use std::path::PathBuf;
use std::time::Duration;

pub fn print_usage() {
    eprintln!("jobnet - Related-jobs network explorer");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  jobnet <command> [arguments]");
    eprintln!("  jobnet --help");
    eprintln!("  jobnet --version");
    eprintln!();
    eprintln!("  jobnet crawl [--job-id <ID>] [--depth <N>] [--output <PATH>] [--format dot|json|csv] [--color <SCHEME>] [--no-stats] [--json] [--verbose]");
    eprintln!("  jobnet render --input <SNAPSHOT> [--format dot|json|csv] [--output <PATH>] [--color <SCHEME>]");
    eprintln!("  jobnet stats --input <SNAPSHOT> [--json]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  crawl     Crawl related jobs from a seed job and render the graph");
    eprintln!("  render    Render a saved crawl snapshot (JSON) in another format");
    eprintln!("  stats     Print statistics for a saved crawl snapshot");
    eprintln!();
    eprintln!("Crawl arguments:");
    eprintln!("  -j, --job-id <ID>      Seed job id (default: 83ix3)");
    eprintln!("  -d, --depth <N>        Maximum crawl depth (default: 3)");
    eprintln!("  -o, --output <PATH>    Write the rendered graph to a file instead of stdout");
    eprintln!("  --format <FORMAT>      dot (default), json (snapshot) or csv; inferred from --output extension");
    eprintln!("  --color <SCHEME>       viridis (default), plasma, rainbow, coolwarm, spring, winter");
    eprintln!("  --no-stats             Do not print graph statistics (stderr when the graph goes to stdout)");
    eprintln!("  --base-url <URL>       Job site root (default: https://www.104.com.tw)");
    eprintln!("  --delay-ms <N>         Minimum gap between requests (default: 300, 0 disables)");
    eprintln!("  --retries <N>          Retries per request after the first attempt (default: 3)");
    eprintln!("  --retry-delay-ms <N>   Backoff unit between retries (default: 1000)");
    eprintln!("  --timeout-secs <N>     Per-request timeout (default: 10)");
    eprintln!("  --json                 Print statistics as JSON; logs are limited to errors");
    eprintln!("  -v, --verbose          Debug logging (RUST_LOG overrides)");
    eprintln!();
    eprintln!("Render arguments:");
    eprintln!("  --input <PATH>         Snapshot written by `jobnet crawl --format json`");
    eprintln!("  --format <FORMAT>      dot (default), json or csv");
    eprintln!("  -o, --output <PATH>    Write to a file instead of stdout");
    eprintln!("  --color <SCHEME>       Depth color scheme");
    eprintln!();
    eprintln!("Stats arguments:");
    eprintln!("  --input <PATH>         Snapshot file");
    eprintln!("  --json                 Print statistics as JSON; logs are limited to errors");
}

pub enum Command {
    Crawl {
        crawl: CrawlConfig,
        fetch: FetchConfig,
        render: RenderConfig,
        output: Option<PathBuf>,
        show_stats: bool,
        output_format: OutputFormat,
        verbose: bool,
    },
    Render {
        input: PathBuf,
        render: RenderConfig,
        output: Option<PathBuf>,
        verbose: bool,
    },
    Stats {
        input: PathBuf,
        output_format: OutputFormat,
        verbose: bool,
    },
}

impl Command {
    pub fn verbose(&self) -> bool {
        match self {
            Command::Crawl { verbose, .. }
            | Command::Render { verbose, .. }
            | Command::Stats { verbose, .. } => *verbose,
        }
    }

    /// True when the command reports in JSON
    pub fn json_output(&self) -> bool {
        match self {
            Command::Crawl { output_format, .. } | Command::Stats { output_format, .. } => {
                output_format.is_json()
            }
            Command::Render { .. } => false,
        }
    }
}

/// Value following the flag at `args[i]`
fn flag_value<'a>(args: &'a [String], i: usize) -> Result<&'a str> {
    args.get(i + 1)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("{} requires an argument", args[i]))
}

fn parse_number<T: std::str::FromStr>(args: &[String], i: usize) -> Result<T> {
    let raw = flag_value(args, i)?;
    raw.parse::<T>().map_err(|_| {
        anyhow::anyhow!("{} must be a non-negative integer, got '{}'", args[i], raw)
    })
}

fn parse_color(args: &[String], i: usize) -> Result<ColorScheme> {
    let raw = flag_value(args, i)?;
    ColorScheme::from_str(raw).ok_or_else(|| {
        let names: Vec<&str> = ColorScheme::ALL.iter().map(|s| s.name()).collect();
        anyhow::anyhow!("Unknown color scheme '{}' (expected one of: {})", raw, names.join(", "))
    })
}

fn parse_format(args: &[String], i: usize) -> Result<ExportFormat> {
    let raw = flag_value(args, i)?;
    ExportFormat::from_str(raw)
        .ok_or_else(|| anyhow::anyhow!("Unknown format '{}' (expected dot, json or csv)", raw))
}

/// Explicit format, else the output extension, else DOT
fn resolve_format(explicit: Option<ExportFormat>, output: &Option<PathBuf>) -> ExportFormat {
    explicit
        .or_else(|| output.as_deref().and_then(ExportFormat::from_extension))
        .unwrap_or_default()
}

/// Parse CLI arguments (including the program name) into a Command
///
/// `--help` prints usage and exits; `--version` calls `print_version` and
/// exits.
pub fn parse_args_impl<F>(args: &[String], print_version: F) -> Result<Command>
where
    F: FnOnce(),
{
    if args.len() < 2 {
        return Err(anyhow::anyhow!("Missing command"));
    }

    let command = &args[1];

    if command == "--version" || command == "-V" {
        print_version();
        std::process::exit(0);
    }
    if command == "--help" || command == "-h" {
        print_usage();
        std::process::exit(0);
    }

    match command.as_str() {
        "crawl" => {
            let mut crawl = CrawlConfig::default();
            let mut fetch = FetchConfig::default();
            let mut color = ColorScheme::default();
            let mut format: Option<ExportFormat> = None;
            let mut output: Option<PathBuf> = None;
            let mut show_stats = true;
            let mut output_format = OutputFormat::Human;
            let mut verbose = false;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--job-id" | "-j" => {
                        crawl.seed = JobId::new(flag_value(args, i)?);
                        i += 2;
                    }
                    "--depth" | "-d" => {
                        crawl.max_depth = parse_number(args, i)?;
                        i += 2;
                    }
                    "--output" | "-o" => {
                        output = Some(PathBuf::from(flag_value(args, i)?));
                        i += 2;
                    }
                    "--format" => {
                        format = Some(parse_format(args, i)?);
                        i += 2;
                    }
                    "--color" => {
                        color = parse_color(args, i)?;
                        i += 2;
                    }
                    "--base-url" => {
                        fetch = fetch.with_base_url(flag_value(args, i)?);
                        i += 2;
                    }
                    "--delay-ms" => {
                        fetch = fetch.with_request_delay(Duration::from_millis(parse_number(args, i)?));
                        i += 2;
                    }
                    "--retries" => {
                        fetch = fetch.with_max_retries(parse_number(args, i)?);
                        i += 2;
                    }
                    "--retry-delay-ms" => {
                        fetch = fetch.with_retry_delay(Duration::from_millis(parse_number(args, i)?));
                        i += 2;
                    }
                    "--timeout-secs" => {
                        let secs: u64 = parse_number(args, i)?;
                        if secs == 0 {
                            return Err(anyhow::anyhow!("--timeout-secs must be at least 1"));
                        }
                        fetch = fetch.with_timeout(Duration::from_secs(secs));
                        i += 2;
                    }
                    "--no-stats" => {
                        show_stats = false;
                        i += 1;
                    }
                    "--json" => {
                        output_format = OutputFormat::Json;
                        i += 1;
                    }
                    "--verbose" | "-v" => {
                        verbose = true;
                        i += 1;
                    }
                    _ => {
                        return Err(anyhow::anyhow!("Unknown argument: {}", args[i]));
                    }
                }
            }

            if crawl.seed.as_str().is_empty() {
                return Err(anyhow::anyhow!("--job-id must not be empty"));
            }

            let render = RenderConfig::new(resolve_format(format, &output)).with_color_scheme(color);

            Ok(Command::Crawl {
                crawl,
                fetch,
                render,
                output,
                show_stats,
                output_format,
                verbose,
            })
        }
        "render" => {
            let mut input: Option<PathBuf> = None;
            let mut output: Option<PathBuf> = None;
            let mut format: Option<ExportFormat> = None;
            let mut color = ColorScheme::default();
            let mut verbose = false;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--input" | "-i" => {
                        input = Some(PathBuf::from(flag_value(args, i)?));
                        i += 2;
                    }
                    "--output" | "-o" => {
                        output = Some(PathBuf::from(flag_value(args, i)?));
                        i += 2;
                    }
                    "--format" => {
                        format = Some(parse_format(args, i)?);
                        i += 2;
                    }
                    "--color" => {
                        color = parse_color(args, i)?;
                        i += 2;
                    }
                    "--verbose" | "-v" => {
                        verbose = true;
                        i += 1;
                    }
                    _ => {
                        return Err(anyhow::anyhow!("Unknown argument: {}", args[i]));
                    }
                }
            }

            let input = input.ok_or_else(|| anyhow::anyhow!("--input is required"))?;
            let render = RenderConfig::new(resolve_format(format, &output)).with_color_scheme(color);

            Ok(Command::Render {
                input,
                render,
                output,
                verbose,
            })
        }
        "stats" => {
            let mut input: Option<PathBuf> = None;
            let mut output_format = OutputFormat::Human;
            let mut verbose = false;

            let mut i = 2;
            while i < args.len() {
                match args[i].as_str() {
                    "--input" | "-i" => {
                        input = Some(PathBuf::from(flag_value(args, i)?));
                        i += 2;
                    }
                    "--json" => {
                        output_format = OutputFormat::Json;
                        i += 1;
                    }
                    "--verbose" | "-v" => {
                        verbose = true;
                        i += 1;
                    }
                    _ => {
                        return Err(anyhow::anyhow!("Unknown argument: {}", args[i]));
                    }
                }
            }

            let input = input.ok_or_else(|| anyhow::anyhow!("--input is required"))?;

            Ok(Command::Stats {
                input,
                output_format,
                verbose,
            })
        }
        _ => Err(anyhow::anyhow!("Unknown command: {}", command)),
    }
}

/// Parse the process arguments
pub fn parse_args() -> Result<Command> {
    let args: Vec<String> = std::env::args().collect();
    parse_args_impl(&args, || {
        println!("{}", jobnet::version::version());
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        let mut full = vec!["jobnet".to_string()];
        full.extend(args.iter().map(|s| s.to_string()));
        parse_args_impl(&full, || {})
    }

    #[test]
    fn test_crawl_defaults() {
        let Ok(Command::Crawl {
            crawl,
            fetch,
            render,
            output,
            show_stats,
            output_format,
            verbose,
        }) = parse(&["crawl"])
        else {
            panic!("expected crawl command");
        };
        assert_eq!(crawl.seed.as_str(), "83ix3");
        assert_eq!(crawl.max_depth, 3);
        assert_eq!(fetch.max_retries, 3);
        assert_eq!(render.format, ExportFormat::Dot);
        assert_eq!(render.color_scheme, ColorScheme::Viridis);
        assert!(output.is_none());
        assert!(show_stats);
        assert_eq!(output_format, OutputFormat::Human);
        assert!(!verbose);
    }

    #[test]
    fn test_json_output_only_for_json_reports() {
        assert!(parse(&["crawl", "--json"]).unwrap().json_output());
        assert!(parse(&["stats", "--input", "s.json", "--json"]).unwrap().json_output());
        assert!(!parse(&["crawl"]).unwrap().json_output());
        assert!(!parse(&["render", "-i", "s.json"]).unwrap().json_output());
    }

    #[test]
    fn test_crawl_flags() {
        let Ok(Command::Crawl {
            crawl,
            fetch,
            render,
            output,
            show_stats,
            output_format,
            verbose,
        }) = parse(&[
            "crawl", "-j", "7xk2q", "-d", "2", "-o", "net.csv", "--color", "plasma", "--no-stats",
            "--delay-ms", "0", "--retries", "1", "--json", "-v",
        ])
        else {
            panic!("expected crawl command");
        };
        assert_eq!(crawl.seed.as_str(), "7xk2q");
        assert_eq!(crawl.max_depth, 2);
        assert_eq!(fetch.request_delay, Duration::ZERO);
        assert_eq!(fetch.max_retries, 1);
        assert_eq!(render.format, ExportFormat::Csv);
        assert_eq!(render.color_scheme, ColorScheme::Plasma);
        assert_eq!(output, Some(PathBuf::from("net.csv")));
        assert!(!show_stats);
        assert_eq!(output_format, OutputFormat::Json);
        assert!(verbose);
    }

    #[test]
    fn test_explicit_format_beats_extension() {
        let Ok(Command::Render { render, .. }) =
            parse(&["render", "--input", "s.json", "-o", "out.csv", "--format", "dot"])
        else {
            panic!("expected render command");
        };
        assert_eq!(render.format, ExportFormat::Dot);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse(&["crawl", "--depth", "-1"]).is_err());
        assert!(parse(&["crawl", "--depth"]).is_err());
        assert!(parse(&["crawl", "--color", "jet"]).is_err());
        assert!(parse(&["crawl", "--format", "png"]).is_err());
        assert!(parse(&["crawl", "--timeout-secs", "0"]).is_err());
        assert!(parse(&["crawl", "--bogus"]).is_err());
        assert!(parse(&["render"]).is_err());
        assert!(parse(&["stats"]).is_err());
        assert!(parse(&["explode"]).is_err());
        assert!(parse(&[]).is_err());
    }
}
