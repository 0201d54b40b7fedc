use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use series_ingest::cleaning::prune_missing;
use series_ingest::config::Config;
use series_ingest::ingest::{self, pipeline};
use series_ingest::model::Observation;
use series_ingest::partition::{partition_by_category, partition_by_kind};
use series_ingest::summary::{self, GroupSummary};
use series_ingest::utils::split_series_id;

#[derive(Parser)]
#[command(name = "series-ingest")]
#[command(about = "Normalize a multi-sheet series workbook into metadata and observation tables", long_about = None)]
struct Cli {
    /// Path to the workbook file (xls/xlsx/ods)
    #[arg(long, env = "SERIES_WORKBOOK")]
    workbook: PathBuf,

    /// Directory receiving the CSV artifacts
    #[arg(long, env = "SERIES_OUTPUT_DIR", default_value = "data/processed")]
    output_dir: PathBuf,

    /// Skip writing CSV artifacts
    #[arg(long)]
    no_export: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing with environment filter support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,series_ingest=debug")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::new(cli.workbook, cli.output_dir, !cli.no_export);
    info!("Starting ingestion with config: {:?}", config);

    run(&config)
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let sheets = ingest::load_sheets(&config.workbook_path)?;

    let progress = ProgressBar::new(sheets.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40}] {pos}/{len}")?
            .progress_chars("=>-"),
    );
    progress.set_message("Scanning sheets");

    let mut scans = Vec::with_capacity(sheets.len());
    for sheet in &sheets {
        scans.push(ingest::scan_sheet(sheet));
        progress.inc(1);
    }
    progress.finish_and_clear();

    let metadata_candidates: usize = scans.iter().map(|s| s.series.len()).sum();
    let observation_candidates: usize = scans.iter().map(|s| s.observations.len()).sum();

    let metadata = pipeline::assemble_metadata(&scans);
    let observations = pipeline::assemble_observations(&scans);
    info!(
        "Metadata: {} candidates, {} with both classification axes",
        metadata_candidates,
        metadata.len()
    );
    info!(
        "Observations: {} candidates, {} with a parsed date",
        observation_candidates,
        observations.len()
    );

    let (metadata, filtered_observations) = pipeline::filter_realized(&metadata, &observations);
    info!(
        "After referential filter: {} series, {} observations",
        metadata.len(),
        filtered_observations.len()
    );
    report_dropped_rows(&observations, &filtered_observations);

    let observations = prune_missing(&filtered_observations);
    info!("After null pruning: {} observations", observations.len());

    let by_kind = partition_by_kind(&metadata, &observations);
    let by_category = partition_by_category(&metadata, &observations);
    let kind_summary = summary::summarize_partitions(&by_kind);
    let category_summary = summary::summarize_partitions(&by_category);

    print_summary("SUMMARY BY KIND", &kind_summary);
    print_summary("SUMMARY BY CATEGORY", &category_summary);

    if config.export {
        let enriched = summary::enrich_observations(&observations, &metadata);
        let written = summary::export_csv_artifacts(
            &config.output_dir,
            &kind_summary,
            &category_summary,
            &enriched,
        )?;
        for path in written {
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}

/// Per-sheet account of observation rows eliminated by the referential
/// filter, for workbook authors chasing why a series disappeared.
fn report_dropped_rows(before: &[Observation], after: &[Observation]) {
    if before.len() == after.len() {
        return;
    }

    let surviving: HashSet<&str> = after.iter().map(|o| o.series_id.as_str()).collect();
    let mut dropped_per_sheet: BTreeMap<String, usize> = BTreeMap::new();
    for obs in before {
        if !surviving.contains(obs.series_id.as_str()) {
            let sheet = split_series_id(&obs.series_id)
                .map(|(sheet, _)| sheet)
                .unwrap_or("<unknown>");
            *dropped_per_sheet.entry(sheet.to_string()).or_default() += 1;
        }
    }

    for (sheet, count) in &dropped_per_sheet {
        warn!(
            "Sheet '{}': dropped {} observation rows from unrealized or unclassified series",
            sheet, count
        );
    }
}

fn print_summary(title: &str, rows: &[GroupSummary]) {
    println!("== {title} ==");
    for row in rows {
        println!(
            "• {}: {} series, {} records",
            row.group_label, row.series_count, row.record_count
        );
    }
    println!();
}
