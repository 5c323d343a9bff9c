//! Regscan Extractor - Pull register definitions out of reference manuals.
//!
//! Microcontroller reference manuals describe each hardware register under a
//! numbered bold heading followed by its address offset, reset value and bit
//! descriptions. This crate recovers those definitions from the positioned
//! glyphs of each page using visual cues only, without relying on document
//! structure.
//!
//! # Example
//!
//! ```
//! use regscan_extractor::{extract_registers, Document, Glyph, Page, ScanConfig};
//!
//! fn line(text: &str, top: f32, font: &str, size: f32) -> Vec<Glyph> {
//!     text.chars().map(|c| Glyph::new(c.to_string(), top, font, size)).collect()
//! }
//!
//! let mut glyphs = line("9.2.1 Port configuration register low (GPIOx_CRL)", 20.0, "Arial-BoldMT", 11.0);
//! glyphs.extend(line("Address offset: 0x00", 40.0, "ArialMT", 9.0));
//! glyphs.extend(line("Reset value: 0x4444 4444", 55.0, "ArialMT", 9.0));
//!
//! let records = extract_registers(&Document::new(vec![Page::new(glyphs)]), &ScanConfig::default());
//! assert_eq!(records[0].short_name, "GPIOx_CRL");
//! assert_eq!(records[0].reset_value, "0x4444 4444");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Configuration constants and validation
//! - [`types`]: Core data types (Glyph, Page, Document, RegisterRecord)
//! - [`error`]: Error types and Result alias
//! - [`source`]: Loading documents from PDF or JSON glyph dumps
//! - [`layout`]: Line assembly, header classification and field scanning
//! - [`render`]: JSON and plain-text output
//! - [`lookup`]: Searching previously extracted records
//! - [`inspect`]: Per-line font listing for tuning
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod inspect;
pub mod layout;
pub mod lookup;
pub mod render;
pub mod source;
pub mod types;

// Re-export main functions
pub use layout::extract_registers;
pub use source::load_document;

// Re-export commonly used items
pub use config::{validate_page_range, ScanConfig};
pub use error::{ExtractorError, Result};
pub use types::{Document, Glyph, Page, PageRange, RegisterRecord};
