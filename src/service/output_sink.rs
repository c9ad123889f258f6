use std::fs;
use std::path::Path;

use crate::errors::CalendarError;

/// Writes the finished document, creating the parent directory if needed.
/// Any previous file at `path` is replaced.
pub fn write_calendar(path: &Path, document: &str) -> Result<(), CalendarError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, document)?;
    Ok(())
}
