//! Register header classification.
//!
//! A header must first pass a font gate (large enough and bold) before any
//! text pattern is tried. Headings carrying a `D.D.D` section number are only
//! accepted when the remaining title mentions a register; unnumbered headings
//! are accepted whenever they mention one.

use regex::Regex;
use std::sync::LazyLock;

use super::lines::Line;

/// Leading three-level section number followed by the heading title.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\d+\.\d+)\s+(.+)").expect("valid regex"));

/// First parenthesized mnemonic, e.g. `(CRC_CR)` or `(CAN_TDLxR)`.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SHORT_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Za-z0-9_]+)\)").expect("valid regex"));

/// A parsed register header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// Section number such as `3.4.3`, when the heading is numbered.
    pub section: Option<String>,

    /// Heading text without the section number.
    pub full_name: String,

    /// Register mnemonic from the first parenthesized group, or empty.
    pub short_name: String,
}

impl Header {
    /// Build a header from its title, extracting the short name.
    #[must_use]
    pub fn new(section: Option<String>, full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let short_name = SHORT_NAME_PATTERN
            .captures(&full_name)
            .map(|caps| caps[1].to_string())
            .unwrap_or_default();

        Self {
            section,
            full_name,
            short_name,
        }
    }
}

/// Outcome of classifying one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Failed the font gate (too small, not bold, or blank).
    BodyText,

    /// Looks like a heading but does not introduce a register.
    Heading,

    /// A register header.
    Register(Header),
}

/// Decides whether lines introduce register definitions.
#[derive(Debug, Clone, Copy)]
pub struct HeaderClassifier {
    min_font_size: f32,
}

impl HeaderClassifier {
    /// Create a classifier with the given minimum header font size.
    #[must_use]
    pub fn new(min_font_size: f32) -> Self {
        Self { min_font_size }
    }

    /// Classify a line.
    #[must_use]
    pub fn classify(&self, line: &Line<'_>) -> Classification {
        let text = line.trimmed();
        if text.is_empty() || !self.passes_font_gate(line) {
            return Classification::BodyText;
        }

        if let Some(caps) = SECTION_PATTERN.captures(text) {
            let full_name = caps[2].trim();
            if !mentions_register(full_name) {
                return Classification::Heading;
            }
            return Classification::Register(Header::new(Some(caps[1].to_string()), full_name));
        }

        if mentions_register(text) {
            return Classification::Register(Header::new(None, text));
        }

        Classification::Heading
    }

    /// Whether a line ends the register currently being scanned.
    ///
    /// This is the font gate plus a `register` mention anywhere in the text,
    /// without the section-number check of [`classify`](Self::classify).
    #[must_use]
    pub fn is_boundary(&self, line: &Line<'_>) -> bool {
        self.passes_font_gate(line) && mentions_register(line.trimmed())
    }

    fn passes_font_gate(&self, line: &Line<'_>) -> bool {
        line.font_size() >= self.min_font_size && line.is_bold()
    }
}

fn mentions_register(text: &str) -> bool {
    text.to_lowercase().contains("register")
}
