//! Custom reading plans: free-form passage references typed by the user,
//! one per line.
//!
//! References are tidied up for display but never checked against a
//! list of books; whatever the user writes is what they will read.

use super::errors::*;
use super::schedule::{ScheduleRow, Version};
use super::state::StoredDay;

/// The largest number of days a custom plan may have.
pub const MAX_CUSTOM_LINES: usize = 2000;

/// Tidies up a single passage reference, e.g. `"1john2,3"` becomes
/// `"1 John 2, 3"`.
///
/// Spaces are inserted after commas and semicolons and between letters
/// and digits, then each word is capitalized.
pub fn normalize(line: &str) -> String {
    let mut spaced = String::with_capacity(line.len() + 8);
    let mut prev: Option<char> = None;

    for c in line.trim().chars() {
        if let Some(p) = prev {
            let after_separator = (p == ',' || p == ';') && !c.is_whitespace();
            let letter_digit = p.is_alphabetic() && c.is_ascii_digit();
            let digit_letter = p.is_ascii_digit() && c.is_alphabetic();
            if after_separator || letter_digit || digit_letter {
                spaced.push(' ');
            }
        }
        spaced.push(c);
        prev = Some(c);
    }

    spaced.split_whitespace().map(title_case).collect::<Vec<_>>().join(" ")
}

/// Capitalizes the first character of a word and lowercases the rest.
fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Builds a custom schedule from text with one passage reference per
/// line. Blank lines are ignored; each remaining line becomes one day,
/// in order.
pub fn build_custom(text: &str, version: Version) -> Result<Vec<ScheduleRow>> {
    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    if lines.is_empty() || lines.len() > MAX_CUSTOM_LINES {
        return Err(ErrorKind::LineCountOutOfRange(lines.len()).into());
    }

    Ok(lines.iter()
        .enumerate()
        .map(|(i, l)| ScheduleRow::new(i as u32 + 1, normalize(l), version))
        .collect())
}

/// Rebuilds the rows of a stored custom schedule. URLs are not stored, so
/// they are derived again for the current version.
pub fn rows_from_stored(days: &[StoredDay], version: Version) -> Vec<ScheduleRow> {
    days.iter().map(|d| ScheduleRow::new(d.day, d.passages.clone(), version)).collect()
}
