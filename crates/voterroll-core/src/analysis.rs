//! Aggregate statistics over extracted records.

use std::collections::HashMap;

use serde::Serialize;

use crate::age::AgeCalculator;
use crate::models::record::{ExtractedRecord, Field};

/// Label for records whose age is not known.
pub const UNKNOWN_AGE_GROUP: &str = "Unknown";

/// How many records share a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub value: String,
    pub count: usize,
}

/// Summary statistics for a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordSummary {
    /// Number of records summarized.
    pub total_records: usize,
    /// Records per gender, most common first.
    pub genders: Vec<CountEntry>,
    /// Records per occupation, most common first.
    pub occupations: Vec<CountEntry>,
    /// Records per age group, youngest first with unknown ages leading.
    pub age_groups: Vec<CountEntry>,
}

/// Count records per non-empty value of `field`.
///
/// Ordered by descending count, ties broken by value.
pub fn distribution(records: &[ExtractedRecord], field: Field) -> Vec<CountEntry> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in records.iter().filter_map(|r| r.get(field)) {
        let value = value.trim();
        if !value.is_empty() {
            *counts.entry(value).or_default() += 1;
        }
    }

    let mut entries: Vec<CountEntry> = counts
        .into_iter()
        .map(|(value, count)| CountEntry {
            value: value.to_string(),
            count,
        })
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    entries
}

/// Start of the bucket `age` falls into, or `None` for unknown ages.
fn age_bucket(age: Option<i32>, width: u32) -> Option<i32> {
    let width = width.max(1) as i32;
    age.filter(|a| *a >= 0).map(|a| a - a % width)
}

/// Label of the age group `age` falls into, e.g. `30-39` for width 10.
pub fn age_group(age: Option<i32>, width: u32) -> String {
    match age_bucket(age, width) {
        Some(start) => format!("{}-{}", start, start + width.max(1) as i32 - 1),
        None => UNKNOWN_AGE_GROUP.to_string(),
    }
}

/// Count records per age group.
pub fn age_distribution(records: &[ExtractedRecord], width: u32) -> Vec<CountEntry> {
    let mut counts: HashMap<Option<i32>, usize> = HashMap::new();
    for record in records {
        *counts.entry(age_bucket(record.age, width)).or_default() += 1;
    }

    let mut buckets: Vec<(Option<i32>, usize)> = counts.into_iter().collect();
    // `None` sorts before every `Some`, which puts unknown ages first.
    buckets.sort_by_key(|(start, _)| *start);

    buckets
        .into_iter()
        .map(|(start, count)| CountEntry {
            value: match start {
                Some(start) => age_group(Some(start), width),
                None => UNKNOWN_AGE_GROUP.to_string(),
            },
            count,
        })
        .collect()
}

/// Summarize gender, occupation, and age distributions.
pub fn summarize(records: &[ExtractedRecord], age_bucket_width: u32) -> RecordSummary {
    RecordSummary {
        total_records: records.len(),
        genders: distribution(records, Field::Gender),
        occupations: distribution(records, Field::Occupation),
        age_groups: age_distribution(records, age_bucket_width),
    }
}

/// Re-derive ages from dates of birth.
///
/// Only records whose date of birth parses are touched; returns how many were
/// updated.
pub fn recalculate_ages(records: &mut [ExtractedRecord], calculator: &AgeCalculator) -> usize {
    let mut updated = 0;
    for record in records.iter_mut() {
        if let Some(age) = record.date_of_birth().and_then(|dob| calculator.compute(dob)) {
            record.age = Some(age);
            updated += 1;
        }
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::FieldMap;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn record(gender: Option<&str>, occupation: Option<&str>, age: Option<i32>) -> ExtractedRecord {
        let mut fields = FieldMap::new();
        fields.insert(Field::SerialNumber, "1".to_string());
        if let Some(gender) = gender {
            fields.insert(Field::Gender, gender.to_string());
        }
        if let Some(occupation) = occupation {
            fields.insert(Field::Occupation, occupation.to_string());
        }
        ExtractedRecord::new(fields, age)
    }

    fn entry(value: &str, count: usize) -> CountEntry {
        CountEntry {
            value: value.to_string(),
            count,
        }
    }

    #[test]
    fn test_gender_distribution() {
        let records = vec![
            record(Some("Male"), None, None),
            record(Some("Female"), None, None),
            record(Some("Male"), None, None),
            record(None, None, None),
            record(Some(""), None, None),
        ];

        assert_eq!(
            distribution(&records, Field::Gender),
            vec![entry("Male", 2), entry("Female", 1)]
        );
    }

    #[test]
    fn test_ties_are_ordered_by_value() {
        let records = vec![
            record(None, Some("কৃষক"), None),
            record(None, Some("ছাত্র"), None),
            record(None, Some("ব্যবসা"), None),
            record(None, Some("ছাত্র"), None),
        ];

        let occupations = distribution(&records, Field::Occupation);
        assert_eq!(occupations[0], entry("ছাত্র", 2));
        assert!(occupations[1].value < occupations[2].value);
    }

    #[test]
    fn test_age_groups() {
        assert_eq!(age_group(Some(34), 10), "30-39");
        assert_eq!(age_group(Some(0), 10), "0-9");
        assert_eq!(age_group(Some(18), 5), "15-19");
        assert_eq!(age_group(None, 10), UNKNOWN_AGE_GROUP);
        assert_eq!(age_group(Some(-2), 10), UNKNOWN_AGE_GROUP);
        assert_eq!(age_group(Some(7), 0), "7-7");
    }

    #[test]
    fn test_age_distribution_order() {
        let records = vec![
            record(None, None, Some(45)),
            record(None, None, Some(22)),
            record(None, None, None),
            record(None, None, Some(29)),
        ];

        assert_eq!(
            age_distribution(&records, 10),
            vec![entry("Unknown", 1), entry("20-29", 2), entry("40-49", 1)]
        );
    }

    #[test]
    fn test_summarize() {
        let records = vec![
            record(Some("Male"), Some("কৃষক"), Some(40)),
            record(Some("Male"), Some("কৃষক"), None),
        ];
        let summary = summarize(&records, 10);

        assert_eq!(summary.total_records, 2);
        assert_eq!(summary.genders, vec![entry("Male", 2)]);
        assert_eq!(summary.occupations, vec![entry("কৃষক", 2)]);
        assert_eq!(summary.age_groups.len(), 2);
    }

    #[test]
    fn test_recalculate_ages() {
        let mut with_dob = record(None, None, Some(1));
        with_dob.set(Field::DateOfBirth, "01-01-2000");
        let mut bad_dob = record(None, None, Some(5));
        bad_dob.set(Field::DateOfBirth, "someday");
        let mut records = vec![with_dob, bad_dob, record(None, None, Some(9))];

        let calculator = AgeCalculator::new()
            .with_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .with_sink(std::sync::Arc::new(crate::diagnostics::NullSink));

        assert_eq!(recalculate_ages(&mut records, &calculator), 1);
        assert_eq!(records[0].age, Some(24));
        assert_eq!(records[1].age, Some(5));
        assert_eq!(records[2].age, Some(9));
    }
}
