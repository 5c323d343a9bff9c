//! JSON rendering of register records.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::RegisterRecord;

/// Register representation for JSON (de)serialization.
///
/// Field order is the output key order. `page_range` is derived from the
/// page numbers and ignored when reading.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct JsonRegister {
    start_page: usize,
    end_page: usize,
    #[serde(default, skip_deserializing)]
    page_range: String,
    #[serde(default)]
    section: String,
    full_name: String,
    #[serde(default)]
    short_name: String,
    address_offset: String,
    reset_value: String,
    #[serde(default)]
    content: String,
}

impl From<&RegisterRecord> for JsonRegister {
    fn from(r: &RegisterRecord) -> Self {
        Self {
            start_page: r.start_page,
            end_page: r.end_page,
            page_range: r.page_range().to_string(),
            section: r.section.clone().unwrap_or_default(),
            full_name: r.full_name.clone(),
            short_name: r.short_name.clone(),
            address_offset: r.address_offset.clone(),
            reset_value: r.reset_value.clone(),
            content: r.content.clone(),
        }
    }
}

impl From<JsonRegister> for RegisterRecord {
    fn from(r: JsonRegister) -> Self {
        Self {
            section: Some(r.section).filter(|s| !s.is_empty()),
            full_name: r.full_name,
            short_name: r.short_name,
            address_offset: r.address_offset,
            reset_value: r.reset_value,
            start_page: r.start_page,
            end_page: r.end_page,
            content: r.content,
        }
    }
}

/// Render records as a pretty-printed JSON array.
pub fn render_json(records: &[RegisterRecord]) -> Result<String> {
    let registers: Vec<JsonRegister> = records.iter().map(JsonRegister::from).collect();
    Ok(serde_json::to_string_pretty(&registers)?)
}

/// Parse a JSON array of records, as produced by [`render_json`].
pub fn parse_json(json: &str) -> Result<Vec<RegisterRecord>> {
    let registers: Vec<JsonRegister> = serde_json::from_str(json)?;
    Ok(registers.into_iter().map(RegisterRecord::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> RegisterRecord {
        RegisterRecord {
            section: None,
            full_name: "Port configuration register low (GPIOx_CRL) (x=A..G)".to_string(),
            short_name: "GPIOx_CRL".to_string(),
            address_offset: "0x00".to_string(),
            reset_value: "0x4444 4444".to_string(),
            start_page: 171,
            end_page: 172,
            content: "Bits 31:30 CNF7[1:0]: Port x configuration bits".to_string(),
        }
    }

    #[test]
    fn test_render_json_shape() {
        let json = render_json(&[record()]).unwrap();
        let expected = r#"[
  {
    "start_page": 171,
    "end_page": 172,
    "page_range": "171-172",
    "section": "",
    "full_name": "Port configuration register low (GPIOx_CRL) (x=A..G)",
    "short_name": "GPIOx_CRL",
    "address_offset": "0x00",
    "reset_value": "0x4444 4444",
    "content": "Bits 31:30 CNF7[1:0]: Port x configuration bits"
  }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_render_json_single_page_range() {
        let mut single = record();
        single.end_page = 171;
        single.section = Some("9.2.1".to_string());
        let json = render_json(&[single]).unwrap();
        assert!(json.contains(r#""page_range": "171""#));
        assert!(json.contains(r#""section": "9.2.1""#));
    }

    #[test]
    fn test_render_json_keeps_non_ascii() {
        let mut r = record();
        r.content = "Bits 15:0 Reserved – must be kept at reset value".to_string();
        let json = render_json(&[r]).unwrap();
        assert!(json.contains('–'));
    }

    #[test]
    fn test_parse_json_restores_records() {
        let original = vec![record()];
        let parsed = parse_json(&render_json(&original).unwrap()).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_parse_json_tolerates_missing_optional_keys() {
        let parsed = parse_json(
            r#"[{"start_page": 3, "end_page": 3, "full_name": "Status register",
                 "address_offset": "0x04", "reset_value": "0x0000 0000", "extra": true}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0].section, None);
        assert_eq!(parsed[0].short_name, "");
        assert_eq!(parsed[0].content, "");
    }
}
