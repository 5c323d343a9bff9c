//! Output renderings for extracted registers.

mod json;
mod text;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

pub use json::{parse_json, render_json};
pub use text::{render_record, render_text};

use crate::config::{JSON_FILE_NAME, TEXT_FILE_NAME};
use crate::error::{ExtractorError, Result};
use crate::types::RegisterRecord;

/// Paths written by [`write_outputs`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenOutputs {
    pub json: PathBuf,
    pub text: PathBuf,
}

/// Write both renderings into an existing directory.
pub fn write_outputs(output_dir: &Path, records: &[RegisterRecord]) -> Result<WrittenOutputs> {
    if !output_dir.is_dir() {
        return Err(ExtractorError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Output directory does not exist: {}", output_dir.display()),
        )));
    }

    let json = output_dir.join(JSON_FILE_NAME);
    write_atomic(&json, &render_json(records)?)?;

    let text = output_dir.join(TEXT_FILE_NAME);
    write_atomic(&text, &render_text(records))?;

    Ok(WrittenOutputs { json, text })
}

/// Write to a temp file first, then sync and rename over the target.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}
