use crate::core::models::conf::{Configuration, MonomerState};
use nalgebra::{Point3, Vector3};
use std::path::Path;
use thiserror::Error;

const ROW_FIELDS: [&str; 9] = ["x", "y", "z", "a1x", "a1y", "a1z", "a3x", "a3y", "a3z"];

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Configuration ended before the '{header} =' header line")]
    MissingHeader { header: String },
    #[error("Malformed configuration on line {line}: {kind}")]
    Parse { line: usize, kind: ConfParseErrorKind },
    #[error("Configuration holds {found} monomer rows but the topology declares {expected}")]
    RowCount { expected: usize, found: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfParseErrorKind {
    #[error("expected a '{expected} =' header assignment")]
    Header { expected: String },
    #[error("expected at least {expected} whitespace-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid float in field '{field}' (value: '{value}')")]
    InvalidFloat { field: String, value: String },
}

/// Loads the first frame of a trajectory file.
///
/// # Errors
///
/// Returns `ConfError::Io` if the file cannot be read, otherwise whatever
/// [`parse_first`] reports for its content.
pub fn load_first(path: &Path, n_monomers: usize) -> Result<Configuration, ConfError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    let conf = parse_first(&content, n_monomers)?;
    tracing::debug!(
        time = conf.time,
        monomers = n_monomers,
        "first trajectory frame loaded"
    );
    Ok(conf)
}

/// Parses the first frame out of trajectory text.
///
/// A frame starts with the three header lines `t = …`, `b = Lx Ly Lz` and
/// `E = …`, followed by one row per monomer holding at least nine floats:
/// position, the a1 vector and the a3 vector. Velocity columns beyond the
/// ninth field are ignored, as is everything after the frame (a trajectory
/// with more frames contributes only its first one).
///
/// # Errors
///
/// Returns `ConfError::MissingHeader` when the text ends inside the header
/// region, `ConfError::Parse` for malformed header or monomer lines, and
/// `ConfError::RowCount` when fewer than `n_monomers` rows follow the
/// headers.
pub fn parse_first(content: &str, n_monomers: usize) -> Result<Configuration, ConfError> {
    let mut lines = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (idx, line) = lines.next().ok_or_else(|| missing("t"))?;
    let time = parse_float(header_value(line, "t", idx + 1)?, "t", idx + 1)?;

    let (idx, line) = lines.next().ok_or_else(|| missing("b"))?;
    let value = header_value(line, "b", idx + 1)?;
    let fields: Vec<&str> = value.split_whitespace().collect();
    if fields.len() < 3 {
        return Err(ConfError::Parse {
            line: idx + 1,
            kind: ConfParseErrorKind::FieldCount {
                expected: 3,
                found: fields.len(),
            },
        });
    }
    let box_size = Vector3::new(
        parse_float(fields[0], "box x", idx + 1)?,
        parse_float(fields[1], "box y", idx + 1)?,
        parse_float(fields[2], "box z", idx + 1)?,
    );

    let (idx, line) = lines.next().ok_or_else(|| missing("E"))?;
    header_value(line, "E", idx + 1)?;

    let mut monomers = Vec::with_capacity(n_monomers);
    while monomers.len() < n_monomers {
        let Some((idx, line)) = lines.next() else {
            break;
        };
        let line_num = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < ROW_FIELDS.len() {
            return Err(ConfError::Parse {
                line: line_num,
                kind: ConfParseErrorKind::FieldCount {
                    expected: ROW_FIELDS.len(),
                    found: fields.len(),
                },
            });
        }
        let mut values = [0.0_f64; 9];
        for (slot, field) in ROW_FIELDS.iter().enumerate() {
            values[slot] = parse_float(fields[slot], field, line_num)?;
        }
        monomers.push(MonomerState {
            position: Point3::new(values[0], values[1], values[2]),
            a1: Vector3::new(values[3], values[4], values[5]),
            a3: Vector3::new(values[6], values[7], values[8]),
        });
    }
    if monomers.len() < n_monomers {
        return Err(ConfError::RowCount {
            expected: n_monomers,
            found: monomers.len(),
        });
    }

    Ok(Configuration {
        time,
        box_size,
        monomers,
    })
}

fn missing(header: &str) -> ConfError {
    ConfError::MissingHeader {
        header: header.to_string(),
    }
}

fn header_value<'a>(line: &'a str, expected: &str, line_num: usize) -> Result<&'a str, ConfError> {
    match line.split_once('=') {
        Some((lhs, rhs)) if lhs.trim() == expected => Ok(rhs.trim()),
        _ => Err(ConfError::Parse {
            line: line_num,
            kind: ConfParseErrorKind::Header {
                expected: expected.to_string(),
            },
        }),
    }
}

fn parse_float(value: &str, field: &str, line: usize) -> Result<f64, ConfError> {
    value.parse().map_err(|_| ConfError::Parse {
        line,
        kind: ConfParseErrorKind::InvalidFloat {
            field: field.to_string(),
            value: value.to_string(),
        },
    })
}
