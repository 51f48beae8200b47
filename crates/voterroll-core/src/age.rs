//! Date of birth parsing and age calculation.

use std::sync::Arc;

use chrono::{Datelike, Local, NaiveDate};

use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::numerals::normalize_numerals;

/// A literal date layout accepted for dates of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// 15-01-1990
    DayMonthYearDash,
    /// 1990-01-15
    YearMonthDayDash,
    /// 01-15-1990
    MonthDayYearDash,
    /// 15/01/1990
    DayMonthYearSlash,
    /// 1990/01/15
    YearMonthDaySlash,
    /// 01/15/1990
    MonthDayYearSlash,
}

/// Layouts in the order they are tried.
///
/// Day-month-year comes before month-day-year, so `01-02-2000` is the first
/// of February. Reordering changes the ages of already stored records.
pub const DATE_LAYOUTS: [DateLayout; 6] = [
    DateLayout::DayMonthYearDash,
    DateLayout::YearMonthDayDash,
    DateLayout::MonthDayYearDash,
    DateLayout::DayMonthYearSlash,
    DateLayout::YearMonthDaySlash,
    DateLayout::MonthDayYearSlash,
];

impl DateLayout {
    /// `chrono` format string for this layout.
    pub fn format(&self) -> &'static str {
        match self {
            DateLayout::DayMonthYearDash => "%d-%m-%Y",
            DateLayout::YearMonthDayDash => "%Y-%m-%d",
            DateLayout::MonthDayYearDash => "%m-%d-%Y",
            DateLayout::DayMonthYearSlash => "%d/%m/%Y",
            DateLayout::YearMonthDaySlash => "%Y/%m/%d",
            DateLayout::MonthDayYearSlash => "%m/%d/%Y",
        }
    }

    fn separator(&self) -> char {
        match self {
            DateLayout::DayMonthYearDash
            | DateLayout::YearMonthDayDash
            | DateLayout::MonthDayYearDash => '-',
            _ => '/',
        }
    }

    fn year_first(&self) -> bool {
        matches!(
            self,
            DateLayout::YearMonthDayDash | DateLayout::YearMonthDaySlash
        )
    }

    /// Whether `text` has this layout's shape: a four digit year and one or
    /// two digit day and month, ASCII digits only.
    fn accepts_shape(&self, text: &str) -> bool {
        let parts: Vec<&str> = text.split(self.separator()).collect();
        let &[first, second, third] = parts.as_slice() else {
            return false;
        };
        let (year, day_month) = if self.year_first() {
            (first, [second, third])
        } else {
            (third, [first, second])
        };

        let digits = |part: &str, min: usize, max: usize| {
            (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
        };
        digits(year, 4, 4) && day_month.iter().all(|&part| digits(part, 1, 2))
    }

    /// Parse `text` with this layout alone.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        if !self.accepts_shape(text) {
            return None;
        }
        NaiveDate::parse_from_str(text, self.format()).ok()
    }
}

/// Parse a date of birth, accepting either numeral script.
///
/// Returns the date and the first layout that accepted it.
pub fn parse_date_of_birth(text: &str) -> Option<(NaiveDate, DateLayout)> {
    let normalized = normalize_numerals(text);
    let normalized = normalized.trim();
    if normalized.is_empty() {
        return None;
    }

    DATE_LAYOUTS
        .iter()
        .find_map(|layout| layout.parse(normalized).map(|date| (date, *layout)))
}

/// Whole calendar years between `birth` and `today`.
///
/// One less than the year difference when this year's birthday is still ahead.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let birthday_pending = (today.month(), today.day()) < (birth.month(), birth.day());
    today.year() - birth.year() - i32::from(birthday_pending)
}

/// Computes ages from date of birth strings.
#[derive(Clone)]
pub struct AgeCalculator {
    /// Fixed reference date; the local date when unset.
    today: Option<NaiveDate>,
    sink: Arc<dyn DiagnosticSink>,
}

impl AgeCalculator {
    /// Create a calculator using the local date and the tracing sink.
    pub fn new() -> Self {
        Self {
            today: None,
            sink: Arc::new(TracingSink),
        }
    }

    /// Compute ages against a fixed date instead of the local date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Report unparseable dates to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The date ages are computed against.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Age for a date of birth string, or `None` when it cannot be parsed.
    pub fn compute(&self, date_of_birth: &str) -> Option<i32> {
        if date_of_birth.trim().is_empty() {
            return None;
        }

        match parse_date_of_birth(date_of_birth) {
            Some((birth, _)) => Some(age_on(birth, self.today())),
            None => {
                self.sink.emit(&Diagnostic::UnparseableDate {
                    value: date_of_birth.to_string(),
                });
                None
            }
        }
    }
}

impl Default for AgeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AgeCalculator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgeCalculator")
            .field("today", &self.today)
            .finish_non_exhaustive()
    }
}

/// Age for a date of birth string as of the local date.
pub fn compute_age(date_of_birth: &str) -> Option<i32> {
    AgeCalculator::new().compute(date_of_birth)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expected_age(today: NaiveDate, y: i32, m: u32, d: u32) -> i32 {
        today.year() - y - i32::from((today.month(), today.day()) < (m, d))
    }

    #[test]
    fn test_each_layout_parses() {
        let cases = [
            ("15-01-1990", DateLayout::DayMonthYearDash),
            ("1990-01-15", DateLayout::YearMonthDayDash),
            ("01-15-1990", DateLayout::MonthDayYearDash),
            ("15/01/1990", DateLayout::DayMonthYearSlash),
            ("1990/01/15", DateLayout::YearMonthDaySlash),
            ("01/15/1990", DateLayout::MonthDayYearSlash),
        ];

        for (input, layout) in cases {
            assert_eq!(
                parse_date_of_birth(input),
                Some((date(1990, 1, 15), layout)),
                "input {}",
                input
            );
        }
    }

    #[test]
    fn test_ambiguous_date_prefers_day_first() {
        assert_eq!(
            parse_date_of_birth("01-02-2000"),
            Some((date(2000, 2, 1), DateLayout::DayMonthYearDash))
        );
        assert_eq!(
            parse_date_of_birth("03/04/2001"),
            Some((date(2001, 4, 3), DateLayout::DayMonthYearSlash))
        );
    }

    #[test]
    fn test_bengali_numerals() {
        assert_eq!(
            parse_date_of_birth("১৫-০১-১৯৯০"),
            Some((date(1990, 1, 15), DateLayout::DayMonthYearDash))
        );
    }

    #[test]
    fn test_age_formula() {
        let today = date(2024, 6, 15);
        assert_eq!(age_on(date(1990, 6, 15), today), 34);
        assert_eq!(age_on(date(1990, 6, 16), today), 33);
        assert_eq!(age_on(date(1990, 1, 1), today), 34);
        assert_eq!(age_on(date(1990, 12, 31), today), 33);
    }

    #[test]
    fn test_age_matches_formula_for_every_layout() {
        let today = date(2025, 3, 10);
        let calculator = AgeCalculator::new()
            .with_today(today)
            .with_sink(Arc::new(crate::diagnostics::NullSink));

        for input in [
            "20-07-1985",
            "1985-07-20",
            "07-20-1985",
            "20/07/1985",
            "1985/07/20",
            "07/20/1985",
        ] {
            assert_eq!(
                calculator.compute(input),
                Some(expected_age(today, 1985, 7, 20)),
                "input {}",
                input
            );
        }
    }

    #[test]
    fn test_invalid_calendar_date_is_absent() {
        let sink = Arc::new(CollectingSink::new());
        let calculator = AgeCalculator::new()
            .with_today(date(2024, 1, 1))
            .with_sink(sink.clone());

        assert_eq!(calculator.compute("31-02-2020"), None);
        assert_eq!(
            sink.diagnostics(),
            vec![Diagnostic::UnparseableDate {
                value: "31-02-2020".to_string()
            }]
        );
    }

    #[test]
    fn test_garbage_is_absent() {
        assert_eq!(compute_age("unknown"), None);
        assert_eq!(compute_age("15.01.1990"), None);
        assert_eq!(compute_age(""), None);
    }

    #[test]
    fn test_year_must_have_four_digits() {
        let calculator = AgeCalculator::new()
            .with_today(date(2024, 6, 15))
            .with_sink(Arc::new(crate::diagnostics::NullSink));

        assert_eq!(parse_date_of_birth("15-01-90"), None);
        assert_eq!(calculator.compute("15-01-90"), None);
        assert_eq!(calculator.compute("1-2-3"), None);
        assert_eq!(calculator.compute("+2000-01-02"), None);
        assert_eq!(calculator.compute("15-01-01990"), None);
        assert_eq!(calculator.compute("১৫-০১-৯০"), None);
    }

    #[test]
    fn test_single_digit_day_and_month() {
        assert_eq!(
            parse_date_of_birth("5-1-1990"),
            Some((date(1990, 1, 5), DateLayout::DayMonthYearDash))
        );
        assert_eq!(
            parse_date_of_birth("1990/1/5"),
            Some((date(1990, 1, 5), DateLayout::YearMonthDaySlash))
        );
        assert_eq!(parse_date_of_birth("005-01-1990"), None);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let calculator = AgeCalculator::new().with_today(date(2020, 1, 1));
        assert_eq!(calculator.compute("  01-01-2000 "), Some(20));
    }
}
