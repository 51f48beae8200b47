//! Analyze command - aggregate statistics over extracted records.

use clap::Args;

use voterroll_core::{RecordExtractor, summarize};

use super::{expand_inputs, extract_all, load_config, resolve_gender};

/// Arguments for the analyze command.
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Width of age groups in years (default: from config)
    #[arg(long)]
    bucket_width: Option<u32>,

    /// Gender for records without a gender label
    #[arg(short, long)]
    gender: Option<String>,
}

pub async fn run(args: AnalyzeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let files = expand_inputs(&args.input)?;

    let extractor = RecordExtractor::from_config(&config);
    let gender = resolve_gender(args.gender.as_deref(), &config);
    let records = extract_all(&files, &extractor, gender);

    let width = args
        .bucket_width
        .unwrap_or(config.analysis.age_bucket_width);
    let summary = summarize(&records, width);

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
