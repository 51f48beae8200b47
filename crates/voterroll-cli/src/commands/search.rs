//! Search command - filter extracted records by field values.

use clap::Args;
use console::style;

use voterroll_core::{Field, RecordExtractor, RecordQuery};

use super::output::{OutputFormat, format_records};
use super::{expand_inputs, extract_all, load_config, resolve_gender};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Name contains
    #[arg(long)]
    name: Option<String>,

    /// Voter number contains
    #[arg(long)]
    voter_number: Option<String>,

    /// Father's name contains
    #[arg(long)]
    father_name: Option<String>,

    /// Mother's name contains
    #[arg(long)]
    mother_name: Option<String>,

    /// Occupation contains
    #[arg(long)]
    occupation: Option<String>,

    /// Address contains
    #[arg(long)]
    address: Option<String>,

    /// Gender equals ("সব" matches any)
    #[arg(long = "with-gender")]
    with_gender: Option<String>,

    /// Gender for records without a gender label
    #[arg(short, long)]
    gender: Option<String>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

impl SearchArgs {
    fn query(&self) -> RecordQuery {
        let criteria = [
            (Field::Name, &self.name),
            (Field::VoterNumber, &self.voter_number),
            (Field::FatherName, &self.father_name),
            (Field::MotherName, &self.mother_name),
            (Field::Occupation, &self.occupation),
            (Field::Address, &self.address),
            (Field::Gender, &self.with_gender),
        ];

        criteria
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .fold(RecordQuery::new(), |query, (field, value)| query.with(field, value))
    }
}

pub async fn run(args: SearchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let files = expand_inputs(&args.input)?;

    let extractor = RecordExtractor::from_config(&config);
    let gender = resolve_gender(args.gender.as_deref(), &config);
    let records = extract_all(&files, &extractor, gender);

    let matches: Vec<_> = args
        .query()
        .filter(&records)
        .into_iter()
        .cloned()
        .collect();

    let format = OutputFormat::resolve(args.format, config.output.format);
    println!("{}", format_records(&matches, format)?);
    eprintln!(
        "{} {} of {} records matched",
        style("ℹ").blue(),
        matches.len(),
        records.len()
    );

    Ok(())
}
