//! Loading glyph documents from disk.
//!
//! Two inputs are understood: JSON glyph dumps (the shape of [`Document`],
//! also accepting pdfplumber's `chars`/`fontname`/`size` keys) and, with the
//! `pdf` feature, PDF files read through pdfium.

use std::fs;
use std::path::Path;

use crate::error::{ExtractorError, Result};
use crate::types::Document;

/// Load a document, choosing the reader from the file extension.
pub fn load_document(path: &Path) -> Result<Document> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let document = match extension.as_str() {
        "json" => parse_glyph_dump(&fs::read_to_string(path)?)?,
        "pdf" => load_pdf(path)?,
        _ => {
            return Err(ExtractorError::UnsupportedInput {
                path: path.display().to_string(),
                reason: "expected a .pdf or .json file".to_string(),
            })
        }
    };

    tracing::debug!(
        path = %path.display(),
        pages = document.page_count(),
        "Loaded document"
    );
    Ok(document)
}

/// Parse a JSON glyph dump.
///
/// # Examples
/// ```
/// use regscan_extractor::source::parse_glyph_dump;
///
/// let doc = parse_glyph_dump(
///     r#"{"pages": [{"chars": [{"text": "A", "top": 10, "fontname": "Arial", "size": 9}]}]}"#,
/// ).unwrap();
/// assert_eq!(doc.page_count(), 1);
/// assert_eq!(doc.pages[0].glyphs[0].font_name, "Arial");
/// ```
pub fn parse_glyph_dump(json: &str) -> Result<Document> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(feature = "pdf")]
fn load_pdf(path: &Path) -> Result<Document> {
    pdf::load_pdf(path)
}

#[cfg(not(feature = "pdf"))]
fn load_pdf(path: &Path) -> Result<Document> {
    Err(ExtractorError::UnsupportedInput {
        path: path.display().to_string(),
        reason: "PDF input requires building with the `pdf` feature".to_string(),
    })
}

#[cfg(feature = "pdf")]
mod pdf {
    use std::path::Path;

    use pdfium_render::prelude::*;

    use crate::error::{ExtractorError, Result};
    use crate::types::{Document, Glyph, Page};

    fn pdf_error(err: PdfiumError) -> ExtractorError {
        ExtractorError::Pdf(err.to_string())
    }

    /// Read every character of every page with its font metadata.
    ///
    /// pdfium reports bounds in bottom-up page coordinates; `top` is converted
    /// to a distance from the top edge so that reading order means growing
    /// `top`.
    #[allow(deprecated)] // PdfRect field access deprecated in 0.8.28, removed in 0.9.0
    pub(super) fn load_pdf(path: &Path) -> Result<Document> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(pdf_error)?;
        let pdfium = Pdfium::new(bindings);
        let document = pdfium.load_pdf_from_file(path, None).map_err(pdf_error)?;

        let mut pages = Vec::new();
        for (page_idx, page) in document.pages().iter().enumerate() {
            let height = page.height().value;
            let text = page.text().map_err(pdf_error)?;
            let mut glyphs = Vec::new();

            for ch in text.chars().iter() {
                let (Some(unicode_ch), Ok(rect)) = (ch.unicode_char(), ch.loose_bounds()) else {
                    continue;
                };
                let top = height - rect.top.value;
                if !top.is_finite() {
                    tracing::warn!(page = page_idx + 1, "Skipping glyph with invalid position");
                    continue;
                }
                glyphs.push(Glyph::new(
                    unicode_ch.to_string(),
                    top,
                    ch.font_name(),
                    ch.scaled_font_size().value,
                ));
            }

            pages.push(Page::new(glyphs));
        }

        Ok(Document::new(pages))
    }
}
