use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

use ooni_extract::logging;
use ooni_extract::pipeline::aggregation;
use ooni_extract::pipeline::storage::{self, SNAPSHOT_SUFFIX};

#[derive(Parser)]
#[command(name = "ooni_extract")]
#[command(about = "OONI measurement archive extractor")]
#[command(version = "0.1.0")]
struct Cli {
    /// Input directory laid out as <schema>/<date>/<archive>.gz
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory for the CSV datasets and the aggregate snapshot
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("extract_run", run_id = %run_id);
    let _enter = span.enter();
    let started = Utc::now();

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("failed to create output directory {}", cli.output.display()))?;

    println!("🔄 Aggregating measurement archives from {}...", cli.input.display());
    let aggregate = aggregation::aggregate_all(&cli.input)?;

    // The snapshot is named after the input root
    let base = cli
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("input");
    let snapshot_path = cli.output.join(format!("{base}{SNAPSHOT_SUFFIX}"));
    storage::write_snapshot(&aggregate.datasets, &snapshot_path)?;
    println!("💾 Snapshot: {}", snapshot_path.display());

    for (schema, records) in &aggregate.datasets {
        let csv_path = cli.output.join(format!("{schema}.csv"));
        storage::write_csv(records, &csv_path)?;
        println!("   {} -> {}", schema, csv_path.display());
    }

    println!("\n📊 Extraction summary:");
    let mut total_records = 0usize;
    for (schema, stats) in &aggregate.stats {
        total_records += stats.records_projected;
        println!(
            "   {}: {} records from {} archives ({} unparseable lines, {} faulted records)",
            schema,
            stats.records_projected,
            stats.archives_read,
            stats.lines_skipped,
            stats.records_faulted
        );
    }
    let elapsed = (Utc::now() - started).num_milliseconds() as f64 / 1000.0;
    println!(
        "✅ Extracted {} records across {} schemas in {:.1}s",
        total_records,
        aggregate.datasets.len(),
        elapsed
    );
    info!(
        records = total_records,
        schemas = aggregate.datasets.len(),
        "extraction run finished"
    );

    Ok(())
}
