//! Line assembly: grouping positioned glyphs into text lines.

use std::iter::FusedIterator;

use crate::types::Glyph;

/// A run of consecutive glyphs that share a vertical band.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    glyphs: &'a [Glyph],
    text: String,
    font_size: f32,
    bold: bool,
}

impl<'a> Line<'a> {
    /// Build a line from a non-empty glyph run.
    fn new(glyphs: &'a [Glyph]) -> Self {
        let text: String = glyphs.iter().map(|g| g.text.as_str()).collect();
        let font_size = if glyphs.is_empty() {
            0.0
        } else {
            glyphs.iter().map(|g| g.font_size).sum::<f32>() / glyphs.len() as f32
        };
        let bold = glyphs.iter().any(Glyph::is_bold);

        Self {
            glyphs,
            text,
            font_size,
            bold,
        }
    }

    /// The glyphs making up this line, in input order.
    #[must_use]
    pub fn glyphs(&self) -> &'a [Glyph] {
        self.glyphs
    }

    /// Concatenated glyph text, untrimmed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Concatenated glyph text without surrounding whitespace.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Average font size over all glyphs.
    #[must_use]
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Whether any glyph uses a bold font.
    #[must_use]
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    /// Vertical position of the line (its first glyph).
    #[must_use]
    pub fn top(&self) -> f32 {
        self.glyphs.first().map_or(0.0, |g| g.top)
    }

    /// Whether the line carries no visible text.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Groups glyphs into lines using a fixed vertical tolerance.
///
/// Glyphs are expected in reading order (top to bottom, left to right), which
/// is what PDF readers emit; no sorting takes place.
#[derive(Debug, Clone, Copy)]
pub struct LineAssembler {
    tolerance: f32,
}

impl LineAssembler {
    /// Create an assembler with the given vertical tolerance.
    #[must_use]
    pub fn new(tolerance: f32) -> Self {
        Self { tolerance }
    }

    /// Lazily assemble the lines of one page.
    #[must_use]
    pub fn lines<'a>(&self, glyphs: &'a [Glyph]) -> Lines<'a> {
        Lines {
            rest: glyphs,
            tolerance: self.tolerance,
        }
    }
}

/// Iterator over the lines of a glyph slice.
///
/// Holds only a view of the remaining glyphs, so clones iterate independently.
#[derive(Debug, Clone)]
pub struct Lines<'a> {
    rest: &'a [Glyph],
    tolerance: f32,
}

impl<'a> Iterator for Lines<'a> {
    type Item = Line<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let anchor = self.rest.first()?.top;
        let len = self
            .rest
            .iter()
            .position(|g| (g.top - anchor).abs() > self.tolerance)
            .unwrap_or(self.rest.len());

        let (line, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(Line::new(line))
    }
}

impl FusedIterator for Lines<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyphs_at(text: &str, top: f32) -> Vec<Glyph> {
        text.chars()
            .map(|c| Glyph::new(c.to_string(), top, "ArialMT", 9.0))
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_lines() {
        let assembler = LineAssembler::new(2.0);
        assert_eq!(assembler.lines(&[]).count(), 0);
    }

    #[test]
    fn test_groups_by_vertical_band() {
        let mut glyphs = glyphs_at("Bit 0", 100.0);
        glyphs.extend(glyphs_at("EN", 101.5));
        glyphs.extend(glyphs_at("Next", 112.0));

        let lines: Vec<_> = LineAssembler::new(2.0).lines(&glyphs).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Bit 0EN");
        assert_eq!(lines[1].text(), "Next");
        assert_eq!(lines[1].top(), 112.0);
    }

    #[test]
    fn test_tolerance_measured_from_first_glyph() {
        // Drifting glyphs each within 2 units of their neighbour, but the
        // third is 3 units below the first and must start a new line.
        let glyphs = vec![
            Glyph::new("a", 10.0, "F", 9.0),
            Glyph::new("b", 11.5, "F", 9.0),
            Glyph::new("c", 13.0, "F", 9.0),
        ];
        let lines: Vec<_> = LineAssembler::new(2.0).lines(&glyphs).collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "ab");
        assert_eq!(lines[1].text(), "c");
    }

    #[test]
    fn test_no_sorting_is_applied() {
        let mut glyphs = glyphs_at("low", 200.0);
        glyphs.extend(glyphs_at("high", 50.0));
        glyphs.extend(glyphs_at("low", 200.0));

        let texts: Vec<_> = LineAssembler::new(2.0)
            .lines(&glyphs)
            .map(|l| l.text().to_string())
            .collect();
        assert_eq!(texts, vec!["low", "high", "low"]);
    }

    #[test]
    fn test_lines_are_contiguous_and_cover_input() {
        let mut glyphs = glyphs_at("one", 10.0);
        glyphs.extend(glyphs_at("two", 20.0));
        glyphs.extend(glyphs_at("three", 21.0));
        glyphs.extend(glyphs_at("four", 40.0));

        let lines: Vec<_> = LineAssembler::new(2.0).lines(&glyphs).collect();
        let total: usize = lines.iter().map(|l| l.glyphs().len()).sum();
        assert_eq!(total, glyphs.len());

        let mut offset = 0;
        for line in &lines {
            assert_eq!(line.glyphs(), &glyphs[offset..offset + line.glyphs().len()]);
            let anchor = line.glyphs()[0].top;
            assert!(line.glyphs().iter().all(|g| (g.top - anchor).abs() <= 2.0));
            offset += line.glyphs().len();
        }
    }

    #[test]
    fn test_restartable() {
        let glyphs = glyphs_at("same", 5.0);
        let assembler = LineAssembler::new(2.0);
        let first: Vec<_> = assembler.lines(&glyphs).map(|l| l.text().to_string()).collect();
        let second: Vec<_> = assembler.lines(&glyphs).map(|l| l.text().to_string()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_font_size_and_bold() {
        let glyphs = vec![
            Glyph::new("A", 10.0, "Arial-BoldMT", 12.0),
            Glyph::new("b", 10.0, "ArialMT", 10.0),
        ];
        let line = LineAssembler::new(2.0).lines(&glyphs).next().unwrap();
        assert_eq!(line.font_size(), 11.0);
        assert!(line.is_bold());
    }

    #[test]
    fn test_blank_line() {
        let glyphs = glyphs_at("   ", 10.0);
        let line = LineAssembler::new(2.0).lines(&glyphs).next().unwrap();
        assert!(line.is_blank());
        assert_eq!(line.trimmed(), "");
    }
}
