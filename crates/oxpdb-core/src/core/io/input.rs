use std::path::Path;
use thiserror::Error;

/// Represents errors that can occur while reading an input script.
#[derive(Debug, Error)]
pub enum InputError {
    /// Indicates that the script file could not be read from disk.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        /// The path to the file that could not be read.
        path: String,
        /// The underlying I/O error that occurred.
        source: std::io::Error,
    },
    /// Indicates that the requested parameter is not assigned in the script.
    #[error("Parameter '{key}' not found in input script '{path}'")]
    MissingKey { key: String, path: String },
}

/// Returns the trimmed value assigned to `key` in a simulation input script.
///
/// Input scripts are `key = value` lines with `#` starting a comment that
/// runs to the end of the line. Keys are matched exactly after trimming.
/// When a key is assigned more than once, the last assignment wins.
///
/// # Errors
///
/// Returns `InputError::Io` if the script cannot be read, or
/// `InputError::MissingKey` if no line assigns `key`.
pub fn input_parameter(path: &Path, key: &str) -> Result<String, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    let mut value = None;
    for line in content.lines() {
        let line = line.split('#').next().unwrap_or("");
        let Some((lhs, rhs)) = line.split_once('=') else {
            continue;
        };
        if lhs.trim() == key {
            value = Some(rhs.trim().to_string());
        }
    }

    value.ok_or_else(|| InputError::MissingKey {
        key: key.to_string(),
        path: path.to_string_lossy().to_string(),
    })
}
