//! Core data types for the extractor.
//!
//! Glyphs and pages are the input model produced by a PDF reader; register
//! records are the output of the layout engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One positioned character as emitted by the PDF reader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Glyph {
    /// The character text (usually one char, sometimes a ligature).
    pub text: String,

    /// Distance of the glyph's top edge from the top of the page.
    pub top: f32,

    /// PostScript font name, e.g. `Arial-BoldMT`.
    #[serde(alias = "fontname")]
    pub font_name: String,

    /// Font size in points.
    #[serde(alias = "size")]
    pub font_size: f32,
}

impl Glyph {
    /// Create a new glyph.
    #[must_use]
    pub fn new(text: impl Into<String>, top: f32, font_name: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            top,
            font_name: font_name.into(),
            font_size,
        }
    }

    /// Whether the glyph's font name marks it as bold.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.font_name.to_lowercase().contains("bold")
    }

    /// Whether the font name carries a `Bold` or abbreviated `Bd` weight tag,
    /// as in `Helvetica-Bd`. Used for font inspection only.
    #[must_use]
    pub fn has_bold_weight_tag(&self) -> bool {
        self.font_name.contains("Bold") || self.font_name.contains("Bd")
    }
}

/// The glyphs of one page in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default, alias = "chars")]
    pub glyphs: Vec<Glyph>,
}

impl Page {
    /// Create a page from its glyphs.
    #[must_use]
    pub fn new(glyphs: Vec<Glyph>) -> Self {
        Self { glyphs }
    }
}

/// A whole document: pages in order, numbered from 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a document from its pages.
    #[must_use]
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Total number of pages.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by its 1-based number.
    #[must_use]
    pub fn page(&self, number: usize) -> Option<&Page> {
        number.checked_sub(1).and_then(|idx| self.pages.get(idx))
    }
}

/// Inclusive, 1-based page span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    pub start: usize,
    pub end: usize,
}

impl PageRange {
    /// Create a page range.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Iterate over the page numbers in the range.
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

impl fmt::Display for PageRange {
    /// Renders `N` for a single page and `N-M` otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A hardware register definition recovered from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRecord {
    /// Hierarchical section number, e.g. `3.4.3`.
    pub section: Option<String>,

    /// Header text without the section number.
    pub full_name: String,

    /// Parenthesized register mnemonic, e.g. `CRC_CR`. Empty when absent.
    pub short_name: String,

    /// Offset from the peripheral base address, e.g. `0x00`.
    pub address_offset: String,

    /// Reset value with internal whitespace collapsed, e.g. `0x0000 0000`.
    pub reset_value: String,

    /// First page of the definition.
    pub start_page: usize,

    /// Last page visited while scanning the definition.
    pub end_page: usize,

    /// Validated body lines joined by newlines.
    pub content: String,
}

impl RegisterRecord {
    /// Pages covered by this record.
    #[must_use]
    pub fn page_range(&self) -> PageRange {
        PageRange::new(self.start_page, self.end_page)
    }
}
