//! Stats command implementation

use anyhow::Result;
use std::path::PathBuf;

use jobnet::output::{generate_execution_id, output_json, JsonResponse, StatsResponse};
use jobnet::{CrawlSnapshot, GraphStatistics, OutputFormat};

pub fn run_stats(input: PathBuf, output_format: OutputFormat) -> Result<()> {
    let snapshot = CrawlSnapshot::read(&input)?;
    let graph = snapshot.to_graph()?;
    let statistics = GraphStatistics::compute(&graph, snapshot.max_depth, snapshot.visited.len())?;

    let response = StatsResponse {
        seed_id: snapshot.seed_id.clone(),
        seed_name: snapshot.seed_name.clone(),
        statistics,
    };

    if output_format.is_json() {
        let json = JsonResponse::new(response, &generate_execution_id())
            .with_partial(!snapshot.completed);
        output_json(&json, output_format)?;
    } else {
        print!("{}", response.to_human());
        if !snapshot.completed {
            println!("(snapshot of an interrupted crawl)");
        }
    }
    Ok(())
}
