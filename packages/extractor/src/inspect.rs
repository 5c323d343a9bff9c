//! Font inspection of assembled lines.
//!
//! Useful when tuning the header font size threshold for a new manual.

use std::fmt;

use crate::error::{ExtractorError, Result};
use crate::layout::LineAssembler;
use crate::types::{Document, Glyph, PageRange};

/// Font summary of one non-blank line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFont {
    pub page: usize,
    pub text: String,
    pub font_size: f32,
    pub bold: bool,
}

impl fmt::Display for LineFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[Size: {:.1}, Bold: {}] {}",
            self.font_size, self.bold, self.text
        )
    }
}

/// List the font of every non-blank line on the pages of `range`.
///
/// Fails with [`ExtractorError::PageOutOfRange`] when the range ends past the
/// last page.
pub fn inspect_pages(
    document: &Document,
    range: PageRange,
    assembler: LineAssembler,
) -> Result<Vec<LineFont>> {
    let total = document.page_count();
    let mut fonts = Vec::new();

    for number in range.pages() {
        let page = document
            .page(number)
            .ok_or(ExtractorError::PageOutOfRange { page: number, total })?;

        fonts.extend(
            assembler
                .lines(&page.glyphs)
                .filter(|line| !line.is_blank())
                .map(|line| LineFont {
                    page: number,
                    text: line.trimmed().to_string(),
                    font_size: line.font_size(),
                    bold: line.glyphs().iter().any(Glyph::has_bold_weight_tag),
                }),
        );
    }

    Ok(fonts)
}
