//! Page cursor and bounded page continuation.
//!
//! Lines are assembled one page at a time. The [`PageCursor`] owns the lines
//! of the page it points at; [`PageContinuation`] moves it forward when a
//! register definition runs past the bottom of a page, charging each move
//! against the per-register page budget.

use super::lines::{Line, LineAssembler};
use crate::types::Document;

/// Location of a line inside the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    /// 1-based page number.
    pub page: usize,

    /// 0-based index into the page's assembled lines.
    pub line: usize,
}

/// Walks the assembled lines of a document page by page.
#[derive(Debug, Clone)]
pub struct PageCursor<'a> {
    document: &'a Document,
    assembler: LineAssembler,
    page: usize,
    lines: Vec<Line<'a>>,
    line: usize,
}

impl<'a> PageCursor<'a> {
    /// Create a cursor at the first line of page 1.
    #[must_use]
    pub fn new(document: &'a Document, assembler: LineAssembler) -> Self {
        let mut cursor = Self {
            document,
            assembler,
            page: 1,
            lines: Vec::new(),
            line: 0,
        };
        cursor.load_page();
        cursor
    }

    /// Current 1-based page number.
    #[must_use]
    pub fn page(&self) -> usize {
        self.page
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            page: self.page,
            line: self.line,
        }
    }

    /// The line under the cursor, or `None` once the page is exhausted.
    #[must_use]
    pub fn current(&self) -> Option<&Line<'a>> {
        self.lines.get(self.line)
    }

    /// Move to the next line on the same page.
    pub fn advance(&mut self) {
        if self.line < self.lines.len() {
            self.line += 1;
        }
    }

    /// Move to the first line of the next page.
    ///
    /// Returns `false` (and stays put) when the current page is the last one.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.document.page_count() {
            return false;
        }
        self.page += 1;
        self.load_page();
        true
    }

    /// Whether the current page produced no lines at all.
    #[must_use]
    pub fn page_is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn load_page(&mut self) {
        self.lines = self
            .document
            .page(self.page)
            .map(|page| self.assembler.lines(&page.glyphs).collect())
            .unwrap_or_default();
        self.line = 0;
    }
}

/// Result of asking for the next page mid-record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The cursor sits on the first line of a new page; keep scanning.
    Continued,

    /// The page budget is spent. The cursor sits on the first line of the
    /// final page, of which only the first non-blank line may be read.
    LimitReached,

    /// No pages remain.
    EndOfDocument,
}

/// Page budget bookkeeping for one register definition.
#[derive(Debug, Clone)]
pub struct PageContinuation {
    max_pages: usize,
    consumed: usize,
    last_visited: usize,
}

impl PageContinuation {
    /// Start a budget for a definition beginning on `start_page`.
    ///
    /// `max_pages` counts the header page, so a value of 4 allows three full
    /// continuation pages plus the first line of a fourth.
    #[must_use]
    pub fn new(start_page: usize, max_pages: usize) -> Self {
        Self {
            max_pages,
            consumed: 0,
            last_visited: start_page,
        }
    }

    /// Move the cursor to the next non-empty page if the budget allows it.
    ///
    /// Pages without any glyphs are stepped over without being charged and
    /// without counting as visited.
    pub fn advance(&mut self, cursor: &mut PageCursor<'_>) -> Advance {
        loop {
            if !cursor.next_page() {
                return Advance::EndOfDocument;
            }
            if cursor.page_is_empty() {
                tracing::trace!(page = cursor.page(), "Skipping empty page");
                continue;
            }

            self.consumed += 1;
            self.last_visited = cursor.page();
            if self.consumed >= self.max_pages {
                return Advance::LimitReached;
            }
            return Advance::Continued;
        }
    }

    /// Number of continuation pages charged so far.
    #[must_use]
    pub fn pages_consumed(&self) -> usize {
        self.consumed
    }

    /// Highest page scanned for this definition.
    #[must_use]
    pub fn end_page(&self) -> usize {
        self.last_visited
    }
}
