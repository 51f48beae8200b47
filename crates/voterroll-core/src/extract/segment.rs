//! Document preprocessing and record segmentation.

use std::ops::Range;

use super::patterns::RECORD_BOUNDARY;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Drop byte-order marks, trim the document, and normalize line breaks to `\n`.
///
/// Indentation after a leading mark is trimmed too.
pub fn preprocess(text: &str) -> String {
    text.replace(BYTE_ORDER_MARK, "")
        .trim()
        .replace("\r\n", "\n")
        .replace('\r', "\n")
}

/// Iterator over candidate record blocks of a preprocessed document.
///
/// A new block starts at every line that begins with a serial marker such as
/// `12.` or `১২.`; the line break and indentation before the marker are
/// dropped. Blank blocks are skipped.
///
/// `Blocks` over a `&str` yields the blocks directly. Over an owned `String`
/// it hands out byte ranges through [`Blocks::next_range`].
#[derive(Debug, Clone)]
pub struct Blocks<T> {
    text: T,
    position: usize,
}

impl<T: AsRef<str>> Blocks<T> {
    pub fn new(text: T) -> Self {
        Self { text, position: 0 }
    }

    /// The document being segmented.
    pub fn text(&self) -> &str {
        self.text.as_ref()
    }

    /// Byte range of the next non-blank block.
    pub fn next_range(&mut self) -> Option<Range<usize>> {
        let text = self.text.as_ref();

        while self.position < text.len() {
            let start = self.position;
            let (end, next_start) = match RECORD_BOUNDARY.captures_at(text, start) {
                Some(caps) => (caps.get(0)?.start(), caps.get(1)?.start()),
                None => (text.len(), text.len()),
            };

            // The marker always follows a line break, so this moves forward.
            self.position = next_start;

            if !text[start..end].trim().is_empty() {
                return Some(start..end);
            }
        }
        None
    }
}

impl<'t> Iterator for Blocks<&'t str> {
    type Item = &'t str;

    fn next(&mut self) -> Option<Self::Item> {
        let range = self.next_range()?;
        let text: &'t str = self.text;
        Some(&text[range])
    }
}

/// Split a preprocessed document into candidate record blocks.
pub fn split_records(text: &str) -> Vec<&str> {
    Blocks::new(text).collect()
}
