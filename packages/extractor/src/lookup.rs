//! Register lookup over previously extracted records.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{ExtractorError, Result};
use crate::render::parse_json;
use crate::types::RegisterRecord;

/// Searchable collection of register records.
#[derive(Debug, Clone, Default)]
pub struct RegisterIndex {
    records: Vec<RegisterRecord>,
}

impl RegisterIndex {
    /// Build an index over records.
    #[must_use]
    pub fn new(records: Vec<RegisterRecord>) -> Self {
        Self { records }
    }

    /// Load an index from a records JSON file.
    ///
    /// A missing file yields an empty index, so every query simply finds
    /// nothing.
    pub fn load(path: &Path) -> Result<Self> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Records file not found");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&json)
    }

    /// Build an index from a records JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(parse_json(json)?))
    }

    /// All records, in file order.
    #[must_use]
    pub fn records(&self) -> &[RegisterRecord] {
        &self.records
    }

    /// Find every record matching `name`, case-insensitively.
    ///
    /// A record matches when its short name equals the query, when the query
    /// occurs in the full or short name, or when the short name occurs in the
    /// query (so `"CRC_CR register"` still finds `CRC_CR`).
    ///
    /// # Examples
    /// ```
    /// use regscan_extractor::lookup::RegisterIndex;
    /// use regscan_extractor::types::RegisterRecord;
    ///
    /// let index = RegisterIndex::new(vec![RegisterRecord {
    ///     section: None,
    ///     full_name: "Control register (CRC_CR)".to_string(),
    ///     short_name: "CRC_CR".to_string(),
    ///     address_offset: "0x08".to_string(),
    ///     reset_value: "0x0000 0000".to_string(),
    ///     start_page: 65,
    ///     end_page: 65,
    ///     content: String::new(),
    /// }]);
    /// assert_eq!(index.search("crc_cr").len(), 1);
    /// assert_eq!(index.search("control").len(), 1);
    /// assert!(index.search("USART_SR").is_empty());
    /// ```
    #[must_use]
    pub fn search(&self, name: &str) -> Vec<&RegisterRecord> {
        let query = name.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                let full_name = record.full_name.to_lowercase();
                let short_name = record.short_name.to_lowercase();

                short_name == query
                    || full_name.contains(&query)
                    || short_name.contains(&query)
                    || (!short_name.is_empty() && query.contains(&short_name))
            })
            .collect()
    }

    /// Find the best single match for `name`.
    ///
    /// Prefers an exact short-name match, then the first match in file order.
    pub fn find(&self, name: &str) -> Result<&RegisterRecord> {
        let query = name.trim().to_lowercase();
        let matches = self.search(name);

        matches
            .iter()
            .find(|record| record.short_name.to_lowercase() == query)
            .or_else(|| matches.first())
            .copied()
            .ok_or_else(|| ExtractorError::RegisterNotFound(name.to_string()))
    }
}
