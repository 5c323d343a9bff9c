//! Configuration constants and validation functions for the extractor.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{ExtractorError, Result};
use crate::types::PageRange;

/// Maximum vertical distance (in layout units) between a glyph and the first
/// glyph of a line for both to belong to the same line.
pub const LINE_TOLERANCE: f32 = 2.0;

/// Minimum average font size of a register header line.
///
/// Register headings in the reference manuals are set at 11pt or larger;
/// body text and table cells stay at 9pt or below.
pub const HEADER_MIN_FONT_SIZE: f32 = 10.5;

/// Maximum number of pages a single register definition may span.
pub const MAX_PAGES_PER_RECORD: usize = 4;

/// Width of the `=` separator written between registers in text output.
pub const SEPARATOR_WIDTH: usize = 70;

/// Default file name for the JSON rendering.
pub const JSON_FILE_NAME: &str = "registers.json";

/// Default file name for the plain-text rendering.
pub const TEXT_FILE_NAME: &str = "registers_all.txt";

/// Default location of the records file used by `search`.
pub const DEFAULT_REGISTERS_PATH: &str = "extracted/registers.json";

/// Page range pattern: a page number, optionally followed by `-` and an end page.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static PAGE_RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)(?:-(\d+))?$").expect("valid regex"));

/// Tunable parameters of the layout engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanConfig {
    /// Vertical tolerance used by the line assembler.
    pub line_tolerance: f32,

    /// Minimum average font size for header candidacy.
    pub header_min_font_size: f32,

    /// Page budget for one register, header page included.
    pub max_pages_per_record: usize,
}

impl ScanConfig {
    /// Set the line tolerance.
    #[must_use]
    pub fn with_line_tolerance(mut self, tolerance: f32) -> Self {
        self.line_tolerance = tolerance;
        self
    }

    /// Set the header font size threshold.
    #[must_use]
    pub fn with_header_min_font_size(mut self, size: f32) -> Self {
        self.header_min_font_size = size;
        self
    }

    /// Set the page budget per register. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_pages_per_record(mut self, pages: usize) -> Self {
        self.max_pages_per_record = pages.max(1);
        self
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            line_tolerance: LINE_TOLERANCE,
            header_min_font_size: HEADER_MIN_FONT_SIZE,
            max_pages_per_record: MAX_PAGES_PER_RECORD,
        }
    }
}

/// Validate and parse a page range.
///
/// # Arguments
/// * `text` - `N` or `N-M`, 1-based and inclusive
///
/// # Returns
/// * `Ok(PageRange)` if the format is valid and `1 <= N <= M`
/// * `Err(ExtractorError::InvalidPageRange)` otherwise
///
/// # Examples
/// ```
/// use regscan_extractor::config::validate_page_range;
///
/// let range = validate_page_range("572-573").unwrap();
/// assert_eq!((range.start, range.end), (572, 573));
/// assert!(validate_page_range("12").is_ok());
/// assert!(validate_page_range("0").is_err());
/// assert!(validate_page_range("9-3").is_err());
/// ```
pub fn validate_page_range(text: &str) -> Result<PageRange> {
    let invalid = || ExtractorError::InvalidPageRange(text.to_string());

    let caps = PAGE_RANGE_PATTERN.captures(text.trim()).ok_or_else(invalid)?;
    let start: usize = caps[1].parse().map_err(|_| invalid())?;
    let end: usize = match caps.get(2) {
        Some(m) => m.as_str().parse().map_err(|_| invalid())?,
        None => start,
    };

    if start == 0 || end < start {
        return Err(invalid());
    }

    Ok(PageRange::new(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_config_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.line_tolerance, 2.0);
        assert_eq!(config.header_min_font_size, 10.5);
        assert_eq!(config.max_pages_per_record, 4);
    }

    #[test]
    fn test_scan_config_builder() {
        let config = ScanConfig::default()
            .with_line_tolerance(3.0)
            .with_header_min_font_size(12.0)
            .with_max_pages_per_record(0);

        assert_eq!(config.line_tolerance, 3.0);
        assert_eq!(config.header_min_font_size, 12.0);
        assert_eq!(config.max_pages_per_record, 1);
    }

    #[test]
    fn test_validate_page_range_valid() {
        assert_eq!(validate_page_range("1").unwrap(), PageRange::new(1, 1));
        assert_eq!(validate_page_range("724").unwrap(), PageRange::new(724, 724));
        assert_eq!(validate_page_range("10-12").unwrap(), PageRange::new(10, 12));
        assert_eq!(validate_page_range(" 5-5 ").unwrap(), PageRange::new(5, 5));
    }

    #[test]
    fn test_validate_page_range_invalid() {
        assert!(validate_page_range("").is_err());
        assert!(validate_page_range("0").is_err());
        assert!(validate_page_range("0-3").is_err());
        assert!(validate_page_range("8-2").is_err());
        assert!(validate_page_range("a-b").is_err());
        assert!(validate_page_range("3-").is_err());
        assert!(validate_page_range("1,2").is_err());
    }
}
