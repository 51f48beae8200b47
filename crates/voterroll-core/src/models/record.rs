//! Extracted record model and the fixed field vocabulary.

use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Field values keyed by field, iterated in vocabulary order.
pub type FieldMap = BTreeMap<Field, String>;

/// Fields every retained record must carry.
pub const REQUIRED_FIELDS: [Field; 3] = [Field::SerialNumber, Field::Name, Field::VoterNumber];

/// The fixed vocabulary of extractable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Per-record counter (ক্রমিক নং).
    SerialNumber,
    /// Full name (নাম).
    Name,
    /// Voter number (ভোটার নং).
    VoterNumber,
    /// Father's name (পিতা).
    FatherName,
    /// Mother's name (মাতা).
    MotherName,
    /// Occupation (পেশা).
    Occupation,
    /// Date of birth as written (জন্ম তারিখ).
    DateOfBirth,
    /// Address (ঠিকানা).
    Address,
    /// Gender (লিঙ্গ).
    Gender,
}

impl Field {
    /// All fields in vocabulary order.
    pub const ALL: [Field; 9] = [
        Field::SerialNumber,
        Field::Name,
        Field::VoterNumber,
        Field::FatherName,
        Field::MotherName,
        Field::Occupation,
        Field::DateOfBirth,
        Field::Address,
        Field::Gender,
    ];

    /// Column name used by the storage layer.
    pub fn column_name(&self) -> &'static str {
        match self {
            Field::SerialNumber => "ক্রমিক_নং",
            Field::Name => "নাম",
            Field::VoterNumber => "ভোটার_নং",
            Field::FatherName => "পিতার_নাম",
            Field::MotherName => "মাতার_নাম",
            Field::Occupation => "পেশা",
            Field::DateOfBirth => "জন্ম_তারিখ",
            Field::Address => "ঠিকানা",
            Field::Gender => "gender",
        }
    }

    /// Look up a field by its storage column name.
    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }

    /// Whether a record without this field is discarded.
    pub fn is_required(&self) -> bool {
        REQUIRED_FIELDS.contains(self)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

/// Required fields that are missing or empty in `fields`.
pub fn missing_required_fields(fields: &FieldMap) -> Vec<Field> {
    REQUIRED_FIELDS
        .into_iter()
        .filter(|f| fields.get(f).is_none_or(|v| v.trim().is_empty()))
        .collect()
}

/// Whether `fields` holds non-empty values for every required field.
pub fn is_complete(fields: &FieldMap) -> bool {
    missing_required_fields(fields).is_empty()
}

/// One structured record pulled out of a document.
///
/// Serializes as a flat map keyed by storage column names plus `age`, which is
/// always present (`null` when it could not be determined).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedRecord {
    fields: FieldMap,

    /// Age in whole years derived from the date of birth.
    pub age: Option<i32>,
}

impl ExtractedRecord {
    /// Create a record from extracted field values.
    pub fn new(fields: FieldMap, age: Option<i32>) -> Self {
        Self { fields, age }
    }

    /// Value of a field, if present.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Set a field value, replacing any previous one.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    /// All present fields in vocabulary order.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    pub fn serial_number(&self) -> Option<&str> {
        self.get(Field::SerialNumber)
    }

    pub fn name(&self) -> Option<&str> {
        self.get(Field::Name)
    }

    pub fn voter_number(&self) -> Option<&str> {
        self.get(Field::VoterNumber)
    }

    pub fn gender(&self) -> Option<&str> {
        self.get(Field::Gender)
    }

    pub fn date_of_birth(&self) -> Option<&str> {
        self.get(Field::DateOfBirth)
    }

    /// Whether every required field is present and non-empty.
    pub fn is_complete(&self) -> bool {
        is_complete(&self.fields)
    }
}

impl Serialize for ExtractedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        for (field, value) in &self.fields {
            map.serialize_entry(field.column_name(), value)?;
        }
        map.serialize_entry("age", &self.age)?;
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fields(pairs: &[(Field, &str)]) -> FieldMap {
        pairs.iter().map(|(f, v)| (*f, v.to_string())).collect()
    }

    #[test]
    fn test_complete_record() {
        let map = fields(&[
            (Field::SerialNumber, "1"),
            (Field::Name, "করিম"),
            (Field::VoterNumber, "৭৮৯"),
        ]);
        assert!(is_complete(&map));
    }

    #[test]
    fn test_missing_voter_number() {
        let map = fields(&[
            (Field::SerialNumber, "1"),
            (Field::Name, "করিম"),
            (Field::FatherName, "রহিম"),
        ]);
        assert!(!is_complete(&map));
        assert_eq!(missing_required_fields(&map), vec![Field::VoterNumber]);
    }

    #[test]
    fn test_empty_required_value_is_missing() {
        let map = fields(&[
            (Field::SerialNumber, "1"),
            (Field::Name, "  "),
            (Field::VoterNumber, "12"),
        ]);
        assert_eq!(missing_required_fields(&map), vec![Field::Name]);
    }

    #[test]
    fn test_column_name_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_column_name(field.column_name()), Some(field));
        }
        assert_eq!(Field::from_column_name("age"), None);
    }

    #[test]
    fn test_serialize_flat_map_with_null_age() {
        let record = ExtractedRecord::new(
            fields(&[(Field::SerialNumber, "3"), (Field::Name, "Rina")]),
            None,
        );
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["ক্রমিক_নং"], "3");
        assert_eq!(json["নাম"], "Rina");
        assert!(json["age"].is_null());
        assert!(json.get("gender").is_none());
    }
}
