//! Batch processing command for multiple text files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use voterroll_core::{ExtractedRecord, RecordExtractor};

use super::output::{OutputFormat, format_records};
use super::{expand_inputs, extract_file, load_config, resolve_gender};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short = 'd', long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Gender for records without a gender label
    #[arg(short, long)]
    gender: Option<String>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,
}

/// Result of processing a single file.
struct FileResult {
    path: PathBuf,
    records: Option<Vec<ExtractedRecord>>,
    error: Option<String>,
    processing_time_ms: u64,
}

impl FileResult {
    fn record_count(&self) -> usize {
        self.records.as_ref().map_or(0, Vec::len)
    }
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files = expand_inputs(&args.input)?;

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let extractor = RecordExtractor::from_config(&config);
    let gender = resolve_gender(args.gender.as_deref(), &config);

    // A failing file is recorded and never stops the rest of the batch.
    let mut results = Vec::with_capacity(files.len());
    for path in files {
        let file_start = Instant::now();
        let result = extract_file(&path, &extractor, gender);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(records) => results.push(FileResult {
                path,
                records: Some(records),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = format!("{:#}", e);
                warn!("Failed to process {}: {}", path.display(), error_msg);
                results.push(FileResult {
                    path,
                    records: None,
                    error: Some(error_msg),
                    processing_time_ms,
                });
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    let format = OutputFormat::resolve(args.format, config.output.format);
    if let Some(output_dir) = &args.output_dir {
        for result in &results {
            if let Some(records) = &result.records {
                let output_path = output_path_for(&result.path, output_dir, format);
                fs::write(&output_path, format_records(records, format)?)?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful: Vec<_> = results.iter().filter(|r| r.records.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();
    let total_records: usize = successful.iter().map(|r| r.record_count()).sum();

    println!();
    for result in &successful {
        println!(
            "  {} {}: {} records",
            style("✓").green(),
            result.path.display(),
            result.record_count()
        );
    }
    for result in &failed {
        println!(
            "  {} {}: {}",
            style("✗").red(),
            result.path.display(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} records accepted",
        style(successful.len()).green(),
        style(failed.len()).red(),
        style(total_records).bold()
    );

    Ok(())
}

fn output_path_for(input: &Path, output_dir: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("records");
    output_dir.join(format!("{}.{}", stem, format.extension()))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["filename", "status", "records", "processing_time_ms", "error"])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let status = if result.records.is_some() { "success" } else { "error" };

        wtr.write_record([
            filename,
            status,
            &result.record_count().to_string(),
            &result.processing_time_ms.to_string(),
            result.error.as_deref().unwrap_or(""),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
