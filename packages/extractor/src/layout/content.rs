//! Content line validation.
//!
//! Register descriptions are interleaved with bit-field diagrams whose cells
//! come out of the PDF reader as short fragments (`rw`, `rc_w0`, `31 30 29`)
//! or as tiled tokens from symbol fonts (`rc_rc_rc_`). These filters keep
//! such noise out of the accumulated content. They never affect header or
//! field detection.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Lowercase letters and underscores only.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LOWER_WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z_]+$").expect("valid regex"));

/// Digits and whitespace only.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DIGITS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s]+$").expect("valid regex"));

/// Any character that is neither a word character nor whitespace.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SPECIAL_CHAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Ratio of special characters above which a short line is noise.
const MAX_SPECIAL_CHAR_RATIO: f64 = 0.7;

/// Check whether a line should be kept as register content.
///
/// Each rule rejects independently; a line is kept only if no rule fires.
///
/// # Examples
/// ```
/// use regscan_extractor::layout::is_valid_content_line;
///
/// assert!(is_valid_content_line("Bit 31 Reserved, must be kept at reset value"));
/// assert!(!is_valid_content_line("rc_rc_rc_"));
/// assert!(!is_valid_content_line("---"));
/// ```
#[must_use]
pub fn is_valid_content_line(line: &str) -> bool {
    let line = line.trim();
    let chars: Vec<char> = line.chars().collect();
    let len = chars.len();

    if len <= 1 {
        return false;
    }

    if line.split_whitespace().count() == 1 {
        return false;
    }

    if len <= 4 {
        let lower = line.to_lowercase();
        if LOWER_WORD_PATTERN.is_match(&lower) {
            return false;
        }
        if distinct_chars(lower.chars().filter(|c| *c != '_')) <= 2 {
            return false;
        }
    }

    if DIGITS_PATTERN.is_match(line) && len < 5 {
        return false;
    }

    let special = SPECIAL_CHAR_PATTERN.find_iter(line).count();
    if special as f64 / len as f64 > MAX_SPECIAL_CHAR_RATIO && len < 10 {
        return false;
    }

    if distinct_chars(chars.iter().copied().filter(|c| *c != ' ')) <= 2 && len > 3 {
        return false;
    }

    !is_tiled_pattern(&chars)
}

/// Whether the line is a 2–4 character prefix repeated to fill its length.
fn is_tiled_pattern(chars: &[char]) -> bool {
    let len = chars.len();
    if len <= 4 {
        return false;
    }

    (2..=4.min(len / 2)).any(|period| {
        chars
            .iter()
            .enumerate()
            .all(|(idx, c)| *c == chars[idx % period])
    })
}

fn distinct_chars(chars: impl Iterator<Item = char>) -> usize {
    chars.collect::<HashSet<_>>().len()
}
