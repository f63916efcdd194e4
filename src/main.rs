//! Property Aggregation CLI
//!
//! Loads a geocoded book of business, applies carrier / line-of-business
//! filters and prints the exposure summaries. Optionally writes the filtered
//! book as CSV and the map markers as GeoJSON.
//!
//! The exposure column can also be set with the EXPOSURE_COLUMN environment
//! variable; `--exposure-column` takes precedence.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, ValueEnum};
use log::info;
use property_aggregation::export::{export_report, summary_csv, ExportOptions};
use property_aggregation::exposure::{
    ExposureConfig, ExposureReport, FilterSelection, ReportSummary, RiskThresholds,
    HIGH_EXPOSURE_THRESHOLD, MEDIUM_EXPOSURE_THRESHOLD, ZIP_SUMMARY_LIMIT,
};
use property_aggregation::format::format_currency;
use property_aggregation::map::map_layer;
use property_aggregation::policy::{ColumnMapping, DEFAULT_BOOK_PATH};
use property_aggregation::Dashboard;
use serde::Serialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Which exposure measure the book reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// Report as "Dwelling Limit"
    DwellingLimit,
    /// Report as Coverage A ("CovA")
    CovA,
}

#[derive(Debug, Parser)]
#[command(name = "property_aggregation", version, about = "Property aggregation exposure summaries")]
struct Args {
    /// Geocoded book of business (CSV)
    #[arg(short, long, default_value = DEFAULT_BOOK_PATH)]
    input: PathBuf,

    /// Exposure measure label
    #[arg(long, value_enum, default_value_t = Variant::DwellingLimit)]
    variant: Variant,

    /// Source column holding the exposure amount
    #[arg(long)]
    exposure_column: Option<String>,

    /// Parent company to include (repeatable; default: all)
    #[arg(long = "company")]
    companies: Vec<String>,

    /// Line of business to include (repeatable; default: all)
    #[arg(long = "lob")]
    lines_of_business: Vec<String>,

    /// Cluster totals at or above this are high risk
    #[arg(long, default_value_t = HIGH_EXPOSURE_THRESHOLD)]
    high_threshold: f64,

    /// Cluster totals at or above this are medium risk
    #[arg(long, default_value_t = MEDIUM_EXPOSURE_THRESHOLD)]
    medium_threshold: f64,

    /// Rows shown in the ZIP summary
    #[arg(long, default_value_t = ZIP_SUMMARY_LIMIT)]
    zip_limit: usize,

    /// Write the filtered book to this CSV path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Add a formatted exposure column to the export
    #[arg(long)]
    formatted: bool,

    /// Write carrier and ZIP summaries as CSV into this directory
    #[arg(long)]
    summaries: Option<PathBuf>,

    /// Write map markers to this GeoJSON path
    #[arg(long)]
    map: Option<PathBuf>,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    input: String,
    exposure_label: &'a str,
    selection: &'a FilterSelection,
    summary: ReportSummary,
    report: &'a ExposureReport<'a>,
}

fn column_mapping(args: &Args) -> ColumnMapping {
    let mapping = match args.variant {
        Variant::DwellingLimit => ColumnMapping::dwelling_limit(),
        Variant::CovA => ColumnMapping::cov_a(),
    };

    let column = args
        .exposure_column
        .clone()
        .or_else(|| env::var("EXPOSURE_COLUMN").ok().filter(|s| !s.is_empty()));

    match column {
        Some(column) => mapping.with_exposure_column(column),
        None => mapping,
    }
}

fn print_report(report: &ExposureReport<'_>, mapping: &ColumnMapping) {
    let label = &mapping.exposure_label;

    println!("Total {} (Filtered): {}", label, format_currency(report.total_exposure));
    println!("Policies: {}\n", report.policy_count());

    println!("Carrier Comparison:");
    println!("{:<32} {:>18} {:>12}", "Parent Company", mapping.total_column_name(), "PolicyCount");
    println!("{}", "-".repeat(64));
    for row in &report.carrier_summary {
        println!("{:<32} {:>18} {:>12}", row.key, format_currency(row.total_exposure), row.policy_count);
    }

    println!("\nTop ZIP Codes by Total {}:", label);
    println!("{:<32} {:>18} {:>12}", "Cust Zip", mapping.total_column_name(), "PolicyCount");
    println!("{}", "-".repeat(64));
    for row in &report.zip_summary {
        println!("{:<32} {:>18} {:>12}", row.key, format_currency(row.total_exposure), row.policy_count);
    }

    let summary = report.summary();
    println!("\nProperty Aggregation Map:");
    println!("  Clusters: {}", summary.cluster_count);
    println!("  High (red):      {}", summary.high_clusters);
    println!("  Medium (orange): {}", summary.medium_clusters);
    println!("  Low (green):     {}", summary.low_clusters);
    println!("  Largest cluster: {}", format_currency(summary.largest_cluster));
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let mapping = column_mapping(&args);
    let config = ExposureConfig {
        thresholds: RiskThresholds::new(args.high_threshold, args.medium_threshold)?,
        zip_summary_limit: args.zip_limit,
    };

    let dashboard = Dashboard::from_csv(&args.input, mapping)
        .with_context(|| format!("Failed to load book from {}", args.input.display()))?
        .with_config(config);

    let mut selection = dashboard.default_selection();
    if !args.companies.is_empty() {
        selection.companies = args.companies.iter().cloned().collect();
    }
    if !args.lines_of_business.is_empty() {
        selection.lines_of_business = args.lines_of_business.iter().cloned().collect();
    }

    let report = dashboard.evaluate(&selection);
    let mapping = dashboard.mapping();

    if args.json {
        let output = JsonReport {
            generated_at: Utc::now(),
            input: args.input.display().to_string(),
            exposure_label: &mapping.exposure_label,
            selection: &selection,
            summary: report.summary(),
            report: &report,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_report(&report, mapping);
    }

    if let Some(path) = &args.export {
        let options = ExportOptions {
            include_labelled_exposure: args.variant == Variant::CovA,
            include_formatted_exposure: args.formatted,
        };
        let artifact = export_report(dashboard.book(), &report, options)?;
        fs::write(path, &artifact.bytes)
            .with_context(|| format!("Failed to write export to {}", path.display()))?;
        info!("Wrote {} filtered records to {}", report.policy_count(), path.display());
    }

    if let Some(dir) = &args.summaries {
        fs::create_dir_all(dir)?;
        let carriers = summary_csv(&report.carrier_summary, &mapping.company, mapping)?;
        let zips = summary_csv(&report.zip_summary, &mapping.zip, mapping)?;
        fs::write(dir.join("carrier_summary.csv"), carriers)?;
        fs::write(dir.join("zip_summary.csv"), zips)?;
        info!("Wrote carrier and ZIP summaries to {}", dir.display());
    }

    if let Some(path) = &args.map {
        let layer = map_layer(&report.geo_clusters, &mapping.exposure_label);
        fs::write(path, serde_json::to_string_pretty(&layer)?)
            .with_context(|| format!("Failed to write map layer to {}", path.display()))?;
        info!("Wrote {} map markers to {}", report.geo_clusters.len(), path.display());
    }

    Ok(())
}
