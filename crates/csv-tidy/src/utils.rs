//! Shared string utilities for the cleaning stages.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Missing Value Markers
// =============================================================================

/// Cell texts that are read as missing values by default.
///
/// This is the NA vocabulary most CSV producers (spreadsheets, pandas, R)
/// emit, so tables exported from those tools load with their gaps intact.
pub const DEFAULT_NULL_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// =============================================================================
// Column Name Utilities
// =============================================================================

/// Matches any character that is not a letter, digit or underscore.
static NON_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\W").expect("Invalid regex: non-word"));

/// Strip every non-word character from a column name.
///
/// # Example
///
/// ```rust,ignore
/// use csv_tidy::utils::normalize_column_name;
///
/// assert_eq!(normalize_column_name(" Goal 1 "), "Goal1");
/// assert_eq!(normalize_column_name("Array (raw)"), "Arrayraw");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    NON_WORD.replace_all(name, "").into_owned()
}

// =============================================================================
// Goal Value Utilities
// =============================================================================

/// Check whether every character of `s` is an ASCII decimal digit.
///
/// The empty string qualifies vacuously; its canonical form is itself.
pub fn is_digit_string(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit())
}

/// Sort the characters of a string ascending.
fn sort_chars(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars.sort_unstable();
    chars.into_iter().collect()
}

/// Canonical form of a goal value.
///
/// Digit-only values are a multiset of goal codes, so `"312"` and `"213"`
/// both become `"123"`. Anything else is returned as-is.
pub fn canonical_goal(value: &str) -> String {
    if is_digit_string(value) {
        sort_chars(value)
    } else {
        value.to_string()
    }
}

// =============================================================================
// Tests
// =============================================================================
