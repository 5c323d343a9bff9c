//! Document driver: the state machine that turns pages into register records.
//!
//! ```text
//!                 header found
//!   ScanningForHeader ───────────▶ ScanningFields
//!        ▲    │                         │
//!        │    │ no pages left           │ scan finished (record emitted
//!        │    ▼                         │ or dropped), resume where the
//!        │   Done                       │ scan stopped
//!        └──────────────────────────────┘
//! ```

use std::iter::FusedIterator;
use std::mem;

use super::continuation::PageCursor;
use super::fields::{ExtractionCursor, FieldScanner};
use super::header::{Classification, HeaderClassifier};
use super::lines::LineAssembler;
use crate::config::ScanConfig;
use crate::types::{Document, RegisterRecord};

/// Driver states. Each state owns the cursor it works with.
#[derive(Debug)]
enum DriverState<'a> {
    ScanningForHeader(PageCursor<'a>),
    ScanningFields(ExtractionCursor<'a>),
    Done,
}

/// Iterator over the register records of a document, in page and line order.
///
/// # Example
///
/// ```
/// use regscan_extractor::config::ScanConfig;
/// use regscan_extractor::layout::DocumentDriver;
/// use regscan_extractor::types::{Document, Glyph, Page};
///
/// fn line(text: &str, top: f32, font: &str, size: f32) -> Vec<Glyph> {
///     text.chars().map(|c| Glyph::new(c.to_string(), top, font, size)).collect()
/// }
///
/// let mut glyphs = line("3.4.3 Control register (CRC_CR)", 10.0, "Arial-BoldMT", 11.0);
/// glyphs.extend(line("Address offset: 0x08", 30.0, "ArialMT", 9.0));
/// glyphs.extend(line("Reset value: 0x0000 0000", 45.0, "ArialMT", 9.0));
/// let doc = Document::new(vec![Page::new(glyphs)]);
///
/// let records: Vec<_> = DocumentDriver::new(&doc, &ScanConfig::default()).collect();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].short_name, "CRC_CR");
/// ```
#[derive(Debug)]
pub struct DocumentDriver<'a> {
    state: DriverState<'a>,
    classifier: HeaderClassifier,
    scanner: FieldScanner,
    max_pages_per_record: usize,
}

impl<'a> DocumentDriver<'a> {
    /// Start scanning `document` at page 1, line 0.
    #[must_use]
    pub fn new(document: &'a Document, config: &ScanConfig) -> Self {
        let assembler = LineAssembler::new(config.line_tolerance);
        let classifier = HeaderClassifier::new(config.header_min_font_size);
        Self {
            state: DriverState::ScanningForHeader(PageCursor::new(document, assembler)),
            classifier,
            scanner: FieldScanner::new(classifier),
            max_pages_per_record: config.max_pages_per_record,
        }
    }

    /// Perform one transition, returning the next state and any finished record.
    fn step(&self, state: DriverState<'a>) -> (DriverState<'a>, Option<RegisterRecord>) {
        match state {
            DriverState::ScanningForHeader(mut cursor) => {
                let Some(line) = cursor.current() else {
                    if cursor.next_page() {
                        return (DriverState::ScanningForHeader(cursor), None);
                    }
                    return (DriverState::Done, None);
                };

                match self.classifier.classify(line) {
                    Classification::Register(header) => {
                        tracing::debug!(
                            page = cursor.page(),
                            section = header.section.as_deref().unwrap_or(""),
                            name = %header.full_name,
                            "Register header"
                        );
                        cursor.advance();
                        let extraction =
                            ExtractionCursor::new(header, cursor, self.max_pages_per_record);
                        (DriverState::ScanningFields(extraction), None)
                    }
                    Classification::BodyText | Classification::Heading => {
                        cursor.advance();
                        (DriverState::ScanningForHeader(cursor), None)
                    }
                }
            }
            DriverState::ScanningFields(extraction) => {
                let outcome = self.scanner.scan(extraction);
                (DriverState::ScanningForHeader(outcome.resume), outcome.record)
            }
            DriverState::Done => (DriverState::Done, None),
        }
    }
}

impl Iterator for DocumentDriver<'_> {
    type Item = RegisterRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let state = mem::replace(&mut self.state, DriverState::Done);
            if matches!(state, DriverState::Done) {
                return None;
            }

            let (next, record) = self.step(state);
            self.state = next;
            if record.is_some() {
                return record;
            }
        }
    }
}

impl FusedIterator for DocumentDriver<'_> {}

/// Extract every complete register definition from a document.
#[must_use]
pub fn extract_registers(document: &Document, config: &ScanConfig) -> Vec<RegisterRecord> {
    let records: Vec<_> = DocumentDriver::new(document, config).collect();
    tracing::info!(
        pages = document.page_count(),
        registers = records.len(),
        "Extraction finished"
    );
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Glyph, Page};
    use pretty_assertions::assert_eq;

    const BODY: (&str, f32) = ("ArialMT", 9.0);
    const HEAD: (&str, f32) = ("Arial-BoldMT", 11.0);

    fn page(lines: &[(&str, (&str, f32))]) -> Page {
        let mut glyphs = Vec::new();
        for (idx, (text, (font, size))) in lines.iter().enumerate() {
            for c in text.chars() {
                glyphs.push(Glyph::new(c.to_string(), 40.0 + 14.0 * idx as f32, *font, *size));
            }
        }
        Page::new(glyphs)
    }

    fn extract(pages: Vec<Page>) -> Vec<RegisterRecord> {
        extract_registers(&Document::new(pages), &ScanConfig::default())
    }

    fn register(start_page: usize, end_page: usize) -> RegisterRecord {
        RegisterRecord {
            section: Some("3.4.3".to_string()),
            full_name: "Control register (CRC_CR)".to_string(),
            short_name: "CRC_CR".to_string(),
            address_offset: "0x08".to_string(),
            reset_value: "0x0000 0000".to_string(),
            start_page,
            end_page,
            content: String::new(),
        }
    }

    #[test]
    fn test_single_register() {
        let records = extract(vec![page(&[
            ("RM0008 Reference manual", BODY),
            ("3.4.3 Control register (CRC_CR)", HEAD),
            ("Address offset: 0x08", BODY),
            ("Reset value: 0x0000 0000", BODY),
        ])]);
        assert_eq!(records, vec![register(1, 1)]);
    }

    #[test]
    fn test_empty_document() {
        assert!(extract(Vec::new()).is_empty());
        assert!(extract(vec![Page::default(), Page::default()]).is_empty());
    }

    #[test]
    fn test_consecutive_registers_keep_order() {
        let records = extract(vec![page(&[
            ("3.4.1 Data register (CRC_DR)", HEAD),
            ("Address offset: 0x00", BODY),
            ("Reset value: 0xFFFF FFFF", BODY),
            ("Bits 31:0 Data register bits", BODY),
            ("3.4.2 Independent data register (CRC_IDR)", HEAD),
            ("Address offset: 0x04", BODY),
            ("Reset value: 0x0000 0000", BODY),
        ])]);

        let names: Vec<_> = records.iter().map(|r| r.short_name.as_str()).collect();
        assert_eq!(names, vec!["CRC_DR", "CRC_IDR"]);
        assert_eq!(records[0].content, "Bits 31:0 Data register bits");
        assert_eq!(records[1].address_offset, "0x04");
    }

    #[test]
    fn test_incomplete_header_is_dropped_and_next_one_found() {
        let records = extract(vec![page(&[
            ("Refer to the CRC register map", HEAD),
            ("See Section 3.4.4 for details", BODY),
            ("3.4.3 Control register (CRC_CR)", HEAD),
            ("Address offset: 0x08", BODY),
            ("Reset value: 0x0000 0000", BODY),
        ])]);
        assert_eq!(records, vec![register(1, 1)]);
    }

    #[test]
    fn test_numbered_non_register_heading_does_not_interrupt() {
        let records = extract(vec![page(&[
            ("3.4.3 Control register (CRC_CR)", HEAD),
            ("Address offset: 0x08", BODY),
            ("3.4.9 Overview of Peripherals", HEAD),
            ("Reset value: 0x0000 0000", BODY),
        ])]);
        let mut expected = register(1, 1);
        expected.content = "3.4.9 Overview of Peripherals".to_string();
        assert_eq!(records, vec![expected]);
    }

    #[test]
    fn test_multi_page_register_then_header_on_same_page() {
        let records = extract(vec![
            page(&[
                ("3.4.3 Control register (CRC_CR)", HEAD),
                ("Address offset: 0x08", BODY),
            ]),
            page(&[
                ("Reset value: 0x0000 0000", BODY),
                ("3.4.4 Status register (CRC_SR)", HEAD),
                ("Address offset: 0x0C", BODY),
                ("Reset value: 0x0000 0001", BODY),
            ]),
        ]);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0], register(1, 2));
        assert_eq!(records[1].short_name, "CRC_SR");
        assert_eq!((records[1].start_page, records[1].end_page), (2, 2));
    }

    #[test]
    fn test_fields_beyond_first_line_of_budget_page_are_not_attached() {
        let mut pages = vec![page(&[("3.4.3 Control register (CRC_CR)", HEAD)])];
        for _ in 0..3 {
            pages.push(page(&[("Filler paragraph of body text", BODY)]));
        }
        pages.push(page(&[
            ("Address offset: 0x08", BODY),
            ("Reset value: 0x0000 0000", BODY),
        ]));

        assert!(extract(pages).is_empty());
    }

    #[test]
    fn test_fields_on_last_budgeted_page() {
        let mut pages = vec![page(&[("3.4.3 Control register (CRC_CR)", HEAD)])];
        for _ in 0..2 {
            pages.push(page(&[("Filler paragraph of body text", BODY)]));
        }
        pages.push(page(&[
            ("Address offset: 0x08", BODY),
            ("Reset value: 0x0000 0000", BODY),
        ]));

        let records = extract(pages);
        assert_eq!(records.len(), 1);
        assert_eq!((records[0].start_page, records[0].end_page), (1, 4));
        assert_eq!(
            records[0].content,
            "Filler paragraph of body text\nFiller paragraph of body text"
        );
    }

    #[test]
    fn test_header_after_budget_exhaustion_is_found() {
        let mut pages = vec![page(&[
            ("3.4.3 Control register (CRC_CR)", HEAD),
            ("Address offset: 0x08", BODY),
            ("Reset value: 0x0000 0000", BODY),
        ])];
        for _ in 0..3 {
            pages.push(page(&[("Filler paragraph of body text", BODY)]));
        }
        pages.push(page(&[
            ("3.4.4 Status register (CRC_SR)", HEAD),
            ("Address offset: 0x0C", BODY),
            ("Reset value: 0x0000 0001", BODY),
        ]));

        let records = extract(pages);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].end_page, 5);
        assert_eq!(records[1].start_page, 5);
        assert_eq!(records[1].short_name, "CRC_SR");
    }

    #[test]
    fn test_field_on_first_line_past_budget_is_attached() {
        let mut pages = vec![page(&[
            ("3.4.3 Control register (CRC_CR)", HEAD),
            ("Address offset: 0x08", BODY),
        ])];
        for _ in 0..3 {
            pages.push(page(&[("Filler paragraph of body text", BODY)]));
        }
        pages.push(page(&[("Reset value: 0x0000 0000", BODY)]));

        let mut expected = register(1, 5);
        expected.content = ["Filler paragraph of body text"; 3].join("\n");
        assert_eq!(extract(pages), vec![expected]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let doc = Document::new(vec![page(&[
            ("3.4.3 Control register (CRC_CR)", HEAD),
            ("Address offset: 0x08", BODY),
            ("Reset value: 0x0000 0000", BODY),
            ("Bit 0 RESET: resets the CRC calculation unit", BODY),
        ])]);
        let config = ScanConfig::default();
        assert_eq!(extract_registers(&doc, &config), extract_registers(&doc, &config));
    }

    #[test]
    fn test_driver_is_fused() {
        let doc = Document::default();
        let mut driver = DocumentDriver::new(&doc, &ScanConfig::default());
        assert!(driver.next().is_none());
        assert!(driver.next().is_none());
    }
}
