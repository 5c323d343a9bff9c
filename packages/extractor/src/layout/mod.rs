//! Layout engine for register reference manuals.
//!
//! Turns the positioned glyphs of each page into register records using only
//! visual cues: vertical position, font size, boldness and text patterns.
//!
//! ```text
//! DocumentDriver ─▶ LineAssembler ─▶ HeaderClassifier ─▶ FieldScanner
//!                                                         ├─▶ is_valid_content_line
//!                                                         └─▶ PageContinuation
//! ```

mod content;
mod continuation;
mod driver;
mod fields;
mod header;
mod lines;

pub use content::is_valid_content_line;
pub use continuation::{Advance, PageContinuation, PageCursor, Position};
pub use driver::{extract_registers, DocumentDriver};
pub use fields::{ExtractionCursor, FieldScanner, PartialFields, ScanOutcome, StopReason};
pub use header::{Classification, Header, HeaderClassifier};
pub use lines::{Line, LineAssembler, Lines};
