use std::{fs, path::Path};

use crate::core::error::ProbeError;

/// Overwrite `path` with one word per line. Nothing is written for an empty
/// list; the return value says whether the file was touched.
pub fn write_available(words: &[String], path: &Path) -> Result<bool, ProbeError> {
    if words.is_empty() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, words.join("\n"))?;
    Ok(true)
}
