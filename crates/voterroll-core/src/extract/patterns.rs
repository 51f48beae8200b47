//! Regex patterns for voter roll field extraction.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::record::Field;

/// How a field value is taken from a pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// The whole match, with the trailing period removed.
    MatchSpan,
    /// The first capture group.
    FirstGroup,
}

/// A labeled field pattern.
#[derive(Debug)]
pub struct FieldPattern {
    pub field: Field,
    pub pattern: Regex,
    pub mode: CaptureMode,
}

impl FieldPattern {
    fn new(field: Field, pattern: &str, mode: CaptureMode) -> Self {
        Self {
            field,
            pattern: Regex::new(pattern).unwrap(),
            mode,
        }
    }

    /// Apply this pattern to a block, returning the trimmed value.
    pub fn capture<'t>(&self, block: &'t str) -> Option<&'t str> {
        let raw = match self.mode {
            CaptureMode::MatchSpan => {
                let m = self.pattern.find(block)?;
                m.as_str().trim().trim_end_matches('.')
            }
            CaptureMode::FirstGroup => self.pattern.captures(block)?.get(1)?.as_str(),
        };
        Some(raw.trim())
    }
}

lazy_static! {
    /// Boundary before a line that starts a new record: "12." or "১২.".
    ///
    /// Group 1 is the serial marker, which stays with the following block.
    pub static ref RECORD_BOUNDARY: Regex = Regex::new(
        r"\n\s*((?:[০-৯]+|[0-9]+)\.)"
    ).unwrap();

    /// Field table, applied in order to every candidate block.
    pub static ref FIELD_PATTERNS: Vec<FieldPattern> = vec![
        FieldPattern::new(
            Field::SerialNumber,
            r"(?m)^(?:[০-৯]+|[0-9]+)\.",
            CaptureMode::MatchSpan,
        ),
        FieldPattern::new(Field::Name, r"নাম:?\s*([^,\n।]+)", CaptureMode::FirstGroup),
        FieldPattern::new(
            Field::VoterNumber,
            r"ভোটার\s*নং:?\s*([^,\n।]+)",
            CaptureMode::FirstGroup,
        ),
        FieldPattern::new(Field::FatherName, r"পিতা:?\s*([^,\n।]+)", CaptureMode::FirstGroup),
        FieldPattern::new(Field::MotherName, r"মাতা:?\s*([^,\n।]+)", CaptureMode::FirstGroup),
        FieldPattern::new(Field::Occupation, r"পেশা:?\s*([^,।\n]+)", CaptureMode::FirstGroup),
        FieldPattern::new(
            Field::DateOfBirth,
            r"জন্ম\s*তারিখ:?\s*([^,\n।]+)",
            CaptureMode::FirstGroup,
        ),
        // Addresses run on across commas and line breaks.
        FieldPattern::new(
            Field::Address,
            r"ঠিকানা:?\s*([^,\n।]+(?:[,\n।][^,\n।]+)*)",
            CaptureMode::FirstGroup,
        ),
        FieldPattern::new(
            Field::Gender,
            r"(?i)লিঙ্গ:?\s*(পুরুষ|মহিলা|অন্যান্য|Male|Female|Other)",
            CaptureMode::FirstGroup,
        ),
    ];
}

/// The pattern registered for `field`.
pub fn pattern_for(field: Field) -> Option<&'static FieldPattern> {
    FIELD_PATTERNS.iter().find(|p| p.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn capture(field: Field, block: &str) -> Option<&str> {
        pattern_for(field).unwrap().capture(block)
    }

    #[test]
    fn test_table_covers_every_field_once() {
        let fields: Vec<Field> = FIELD_PATTERNS.iter().map(|p| p.field).collect();
        assert_eq!(fields, Field::ALL.to_vec());
    }

    #[test]
    fn test_only_serial_number_uses_match_span() {
        for pattern in FIELD_PATTERNS.iter() {
            let expected = if pattern.field == Field::SerialNumber {
                CaptureMode::MatchSpan
            } else {
                CaptureMode::FirstGroup
            };
            assert_eq!(pattern.mode, expected, "{:?}", pattern.field);
        }
    }

    #[test]
    fn test_serial_number_strips_period() {
        assert_eq!(capture(Field::SerialNumber, "১২. নাম: করিম"), Some("১২"));
        assert_eq!(capture(Field::SerialNumber, "7. Name"), Some("7"));
        assert_eq!(capture(Field::SerialNumber, "নাম: করিম"), None);
    }

    #[test]
    fn test_serial_number_on_later_line() {
        assert_eq!(capture(Field::SerialNumber, "header\n3. নাম: x"), Some("3"));
    }

    #[test]
    fn test_value_stops_at_delimiters() {
        let block = "নাম: করিম, ভোটার নং: ৭৮৯। পিতা: রহিম\nমাতা: জমিলা";
        assert_eq!(capture(Field::Name, block), Some("করিম"));
        assert_eq!(capture(Field::VoterNumber, block), Some("৭৮৯"));
        assert_eq!(capture(Field::FatherName, block), Some("রহিম"));
        assert_eq!(capture(Field::MotherName, block), Some("জমিলা"));
    }

    #[test]
    fn test_colon_is_optional() {
        assert_eq!(capture(Field::Occupation, "পেশা কৃষক"), Some("কৃষক"));
        assert_eq!(capture(Field::VoterNumber, "ভোটারনং ১২৩"), Some("১২৩"));
        assert_eq!(
            capture(Field::DateOfBirth, "জন্ম তারিখ: ০১-০১-১৯৮০"),
            Some("০১-০১-১৯৮০")
        );
    }

    #[test]
    fn test_address_spans_segments() {
        let block = "ঠিকানা: গ্রাম রামপুর, ডাকঘর সদর\nজেলা ঢাকা";
        assert_eq!(
            capture(Field::Address, block),
            Some("গ্রাম রামপুর, ডাকঘর সদর\nজেলা ঢাকা")
        );
    }

    #[test]
    fn test_gender_is_case_insensitive() {
        assert_eq!(capture(Field::Gender, "লিঙ্গ: FEMALE"), Some("FEMALE"));
        assert_eq!(capture(Field::Gender, "লিঙ্গ: পুরুষ"), Some("পুরুষ"));
        assert_eq!(capture(Field::Gender, "লিঙ্গ: unknown"), None);
    }
}
