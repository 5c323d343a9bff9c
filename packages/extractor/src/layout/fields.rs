//! Field scanning for a single register definition.
//!
//! After a header, the scanner reads lines until the next register header,
//! the page budget or the end of the document. Along the way it picks up the
//! two mandatory fields and collects content lines that pass validation.

use regex::Regex;
use std::sync::LazyLock;

use super::content::is_valid_content_line;
use super::continuation::{Advance, PageContinuation, PageCursor};
use super::header::{Header, HeaderClassifier};
use crate::types::RegisterRecord;

/// `Address offset: 0x..` field.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ADDRESS_OFFSET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Address\s+offset:\s*(0x[0-9A-Fa-f]+)").expect("valid regex")
});

/// `Reset value: 0x.. ..` field; the value may be split into spaced groups.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static RESET_VALUE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Reset\s+value:\s*(0x[0-9A-Fa-f\s]+)").expect("valid regex")
});

/// Why a field scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The next register header was reached. It is left unconsumed.
    Boundary,

    /// The per-register page budget ran out.
    PageLimit,

    /// No lines remain in the document.
    EndOfDocument,
}

/// Fields collected so far for the register being scanned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialFields {
    pub address_offset: Option<String>,
    pub reset_value: Option<String>,
    pub content: Vec<String>,
}

impl PartialFields {
    /// Offer a line to the field matchers.
    ///
    /// Returns `true` when the line was consumed as a field value. Each field
    /// is only matched until it has been found once.
    fn take_field(&mut self, text: &str) -> bool {
        if self.address_offset.is_none() {
            if let Some(caps) = ADDRESS_OFFSET_PATTERN.captures(text) {
                self.address_offset = Some(caps[1].to_string());
                return true;
            }
        }

        if self.reset_value.is_none() {
            if let Some(caps) = RESET_VALUE_PATTERN.captures(text) {
                self.reset_value = Some(normalize_whitespace(&caps[1]));
                return true;
            }
        }

        false
    }

    /// Whether both mandatory fields are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.address_offset.is_some() && self.reset_value.is_some()
    }
}

/// Working state while a register definition is being scanned.
#[derive(Debug, Clone)]
pub struct ExtractionCursor<'a> {
    /// The header that opened this definition.
    pub header: Header,

    /// Page on which the header sits.
    pub start_page: usize,

    /// Line cursor, positioned after the header.
    pub lines: PageCursor<'a>,

    /// Page budget for this definition.
    pub continuation: PageContinuation,

    /// Fields found so far.
    pub fields: PartialFields,
}

impl<'a> ExtractionCursor<'a> {
    /// Open a definition for `header`, whose line the cursor has just passed.
    #[must_use]
    pub fn new(header: Header, lines: PageCursor<'a>, max_pages: usize) -> Self {
        let start_page = lines.page();
        Self {
            header,
            start_page,
            lines,
            continuation: PageContinuation::new(start_page, max_pages),
            fields: PartialFields::default(),
        }
    }
}

/// Result of scanning one register definition.
#[derive(Debug, Clone)]
pub struct ScanOutcome<'a> {
    /// The finished record, or `None` when a mandatory field was missing.
    pub record: Option<RegisterRecord>,

    /// Highest page visited, set even when no record was produced.
    pub end_page: usize,

    /// Why scanning stopped.
    pub stop: StopReason,

    /// Where header scanning should resume.
    pub resume: PageCursor<'a>,
}

/// Reads the body of a register definition.
#[derive(Debug, Clone, Copy)]
pub struct FieldScanner {
    classifier: HeaderClassifier,
}

impl FieldScanner {
    /// Create a scanner that stops at headers recognized by `classifier`.
    #[must_use]
    pub fn new(classifier: HeaderClassifier) -> Self {
        Self { classifier }
    }

    /// Scan until the definition ends, then build the record if complete.
    #[must_use]
    pub fn scan<'a>(&self, mut cursor: ExtractionCursor<'a>) -> ScanOutcome<'a> {
        // Set once the budget is spent: one more line is read, then scanning stops.
        let mut final_page = false;

        let stop = loop {
            let Some(line) = cursor.lines.current() else {
                if final_page {
                    break StopReason::PageLimit;
                }
                match cursor.continuation.advance(&mut cursor.lines) {
                    Advance::Continued => continue,
                    Advance::LimitReached => {
                        final_page = true;
                        continue;
                    }
                    Advance::EndOfDocument => break StopReason::EndOfDocument,
                }
            };

            let text = line.trimmed();
            if text.is_empty() {
                cursor.lines.advance();
                continue;
            }

            if self.classifier.is_boundary(line) {
                break StopReason::Boundary;
            }

            if !cursor.fields.take_field(text) && is_valid_content_line(text) {
                let text = text.to_string();
                cursor.fields.content.push(text);
            }
            cursor.lines.advance();

            if final_page {
                break StopReason::PageLimit;
            }
        };

        let end_page = cursor.continuation.end_page();
        let record = build_record(&cursor, end_page);

        if record.is_none() {
            tracing::debug!(
                name = %cursor.header.full_name,
                start_page = cursor.start_page,
                end_page,
                ?stop,
                "Dropping incomplete register"
            );
        }

        ScanOutcome {
            record,
            end_page,
            stop,
            resume: cursor.lines,
        }
    }
}

fn build_record(cursor: &ExtractionCursor<'_>, end_page: usize) -> Option<RegisterRecord> {
    let fields = &cursor.fields;
    let (Some(address_offset), Some(reset_value)) = (&fields.address_offset, &fields.reset_value)
    else {
        return None;
    };

    Some(RegisterRecord {
        section: cursor.header.section.clone(),
        full_name: cursor.header.full_name.clone(),
        short_name: cursor.header.short_name.clone(),
        address_offset: address_offset.clone(),
        reset_value: reset_value.clone(),
        start_page: cursor.start_page,
        end_page,
        content: fields.content.join("\n").trim().to_string(),
    })
}

fn normalize_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}
