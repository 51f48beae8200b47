//! Extract command - pull records out of a single text file.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use voterroll_core::RecordExtractor;

use super::output::{OutputFormat, format_records};
use super::{extract_file, load_config, resolve_gender};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Gender for records without a gender label
    #[arg(short, long)]
    gender: Option<String>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let extractor = RecordExtractor::from_config(&config);
    let gender = resolve_gender(args.gender.as_deref(), &config);
    let records = extract_file(&args.input, &extractor, gender)?;

    let format = OutputFormat::resolve(args.format, config.output.format);
    let output = format_records(&records, format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            records.len(),
            output_path.display()
        );
    } else {
        println!("{}", output);
        eprintln!(
            "{} Extracted {} records from {}",
            style("ℹ").blue(),
            records.len(),
            args.input.display()
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
