use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RmsfError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Decoration file '{path}' has no bracketed value list")]
    MissingBrackets { path: String },
    #[error("Invalid decoration value '{value}': {source}")]
    InvalidValue {
        value: String,
        source: std::num::ParseFloatError,
    },
}

/// Per-monomer b-factor decorations, typically root-mean-square fluctuation
/// values exported by an analysis run.
///
/// Values are keyed by conf index. Monomers beyond the stored range fall
/// back to 1.0, the same value an absent file decorates everything with.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecorationMap {
    values: Vec<f64>,
}

impl DecorationMap {
    /// Returns the uniform decoration used when no file is supplied.
    pub fn uniform() -> Self {
        Self::default()
    }

    /// Loads decorations from the bracketed list in `path`.
    ///
    /// Everything between the first `[` and the following `]` is split on
    /// commas and parsed as floats, in conf-index order. Text outside the
    /// brackets is ignored, which tolerates the label prefixes analysis
    /// tools print around the array.
    ///
    /// # Errors
    ///
    /// Returns `RmsfError::Io` if the file cannot be read,
    /// `RmsfError::MissingBrackets` if no `[…]` span exists, and
    /// `RmsfError::InvalidValue` if an entry does not parse as a float.
    pub fn load(path: &Path) -> Result<Self, RmsfError> {
        let content = std::fs::read_to_string(path).map_err(|e| RmsfError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;

        let list = content.find('[').and_then(|start| {
            content[start + 1..]
                .find(']')
                .map(|len| &content[start + 1..start + 1 + len])
        });
        let Some(list) = list else {
            return Err(RmsfError::MissingBrackets {
                path: path.to_string_lossy().to_string(),
            });
        };

        let mut values = Vec::new();
        for raw in list.split(',') {
            let raw = raw.trim();
            values.push(raw.parse().map_err(|e| RmsfError::InvalidValue {
                value: raw.to_string(),
                source: e,
            })?);
        }
        Ok(Self { values })
    }

    /// Returns the decoration for a conf index, defaulting to 1.0.
    pub fn value(&self, conf_index: usize) -> f64 {
        self.values.get(conf_index).copied().unwrap_or(1.0)
    }

    /// Returns the number of values read from the file.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no file-backed values are stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
