//! Bengali / Western numeral normalization.

/// Bengali digit glyphs paired with their Western equivalents, in digit order.
pub const NUMERAL_MAP: [(char, char); 10] = [
    ('০', '0'),
    ('১', '1'),
    ('২', '2'),
    ('৩', '3'),
    ('৪', '4'),
    ('৫', '5'),
    ('৬', '6'),
    ('৭', '7'),
    ('৮', '8'),
    ('৯', '9'),
];

/// Value of a Bengali digit glyph.
pub fn bengali_digit_value(c: char) -> Option<u32> {
    NUMERAL_MAP
        .iter()
        .position(|&(bengali, _)| bengali == c)
        .map(|i| i as u32)
}

/// Whether `c` is a digit in either supported numeral script.
pub fn is_numeral_digit(c: char) -> bool {
    c.is_ascii_digit() || bengali_digit_value(c).is_some()
}

/// Replace every Bengali digit with its Western equivalent.
///
/// Everything else passes through untouched, so applying this twice is the
/// same as applying it once.
pub fn normalize_numerals(text: &str) -> String {
    text.chars()
        .map(|c| match bengali_digit_value(c) {
            Some(value) => NUMERAL_MAP[value as usize].1,
            None => c,
        })
        .collect()
}

/// Replace every Western digit with its Bengali equivalent.
pub fn to_bengali_numerals(text: &str) -> String {
    text.chars()
        .map(|c| match c.to_digit(10) {
            Some(value) if c.is_ascii_digit() => NUMERAL_MAP[value as usize].0,
            _ => c,
        })
        .collect()
}
