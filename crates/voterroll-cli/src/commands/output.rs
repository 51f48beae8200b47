//! Record output formatting.

use voterroll_core::models::config::OutputFormat as ConfigFormat;
use voterroll_core::{ExtractedRecord, Field};

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }

    /// Explicit choice if given, otherwise the configured format.
    pub fn resolve(arg: Option<OutputFormat>, configured: ConfigFormat) -> Self {
        arg.unwrap_or(match configured {
            ConfigFormat::Json => OutputFormat::Json,
            ConfigFormat::Csv => OutputFormat::Csv,
            ConfigFormat::Text => OutputFormat::Text,
        })
    }
}

pub fn format_records(records: &[ExtractedRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[ExtractedRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header: Vec<&str> = Field::ALL.iter().map(Field::column_name).collect();
    header.push("age");
    wtr.write_record(&header)?;

    for record in records {
        let mut row: Vec<String> = Field::ALL
            .iter()
            .map(|f| record.get(*f).unwrap_or_default().to_string())
            .collect();
        row.push(record.age.map(|a| a.to_string()).unwrap_or_default());
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[ExtractedRecord]) -> String {
    let mut output = String::new();

    for record in records {
        output.push_str(&format!(
            "#{} {}\n",
            record.serial_number().unwrap_or_default(),
            record.name().unwrap_or_default()
        ));
        for (field, value) in record.fields() {
            if matches!(field, Field::SerialNumber | Field::Name) {
                continue;
            }
            output.push_str(&format!("  {}: {}\n", field, value.replace('\n', " ")));
        }
        match record.age {
            Some(age) => output.push_str(&format!("  age: {}\n", age)),
            None => output.push_str("  age: -\n"),
        }
        output.push('\n');
    }

    output
}
