use crate::core::models::system::{Monomer, Strand, System};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Malformed topology on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: TopologyParseErrorKind,
    },
    #[error("Topology declares {declared} monomers but lists {found}")]
    MonomerCount { declared: usize, found: usize },
    #[error("Topology declares {declared} strands but lists {found}")]
    StrandCount { declared: usize, found: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TopologyParseErrorKind {
    #[error("missing header line")]
    MissingHeader,
    #[error("expected {expected} whitespace-separated fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("invalid integer in field '{field}' (value: '{value}')")]
    InvalidInt { field: String, value: String },
}

/// Loads a topology file and builds the strand-level system description.
///
/// # Errors
///
/// Returns `TopologyError::Io` if the file cannot be read, otherwise
/// whatever [`parse`] reports for its content.
pub fn load(path: &Path) -> Result<System, TopologyError> {
    let content = std::fs::read_to_string(path).map_err(|e| TopologyError::Io {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;
    parse(&content)
}

/// Parses classic topology text into a [`System`].
///
/// The first line is the header `N_monomers N_strands`; every following
/// non-empty line declares one monomer as `strand_id type n3 n5`, where the
/// neighbour fields hold conf indices and -1 marks a free end. Strands keep
/// their order of first appearance, monomers keep declaration order, and a
/// strand is circular when its first monomer already has a 3' neighbour.
///
/// # Errors
///
/// Returns `TopologyError::Parse` for a malformed header or monomer line,
/// and `TopologyError::MonomerCount` / `TopologyError::StrandCount` when the
/// body does not match the header's declared totals.
pub fn parse(content: &str) -> Result<System, TopologyError> {
    let mut lines = content.lines().enumerate();

    let (_, header) = lines.next().ok_or(TopologyError::Parse {
        line: 1,
        kind: TopologyParseErrorKind::MissingHeader,
    })?;
    let fields: Vec<&str> = header.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(TopologyError::Parse {
            line: 1,
            kind: TopologyParseErrorKind::FieldCount {
                expected: 2,
                found: fields.len(),
            },
        });
    }
    let declared_monomers: usize = parse_field(fields[0], "monomer count", 1)?;
    let declared_strands: usize = parse_field(fields[1], "strand count", 1)?;

    let mut strands: Vec<Strand> = Vec::new();
    let mut index_by_id: HashMap<i64, usize> = HashMap::new();
    let mut conf_index = 0usize;

    for (idx, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let line_num = idx + 1;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(TopologyError::Parse {
                line: line_num,
                kind: TopologyParseErrorKind::FieldCount {
                    expected: 4,
                    found: fields.len(),
                },
            });
        }
        let strand_id: i64 = parse_field(fields[0], "strand id", line_num)?;
        let monomer = Monomer {
            code: fields[1].to_string(),
            conf_index,
            n3: parse_field(fields[2], "3' neighbour", line_num)?,
            n5: parse_field(fields[3], "5' neighbour", line_num)?,
        };

        let slot = *index_by_id.entry(strand_id).or_insert_with(|| {
            strands.push(Strand {
                id: strand_id,
                monomers: Vec::new(),
                circular: false,
            });
            strands.len() - 1
        });
        if strands[slot].monomers.is_empty() {
            strands[slot].circular = monomer.n3 != -1;
        }
        strands[slot].monomers.push(monomer);
        conf_index += 1;
    }

    if conf_index != declared_monomers {
        return Err(TopologyError::MonomerCount {
            declared: declared_monomers,
            found: conf_index,
        });
    }
    if strands.len() != declared_strands {
        return Err(TopologyError::StrandCount {
            declared: declared_strands,
            found: strands.len(),
        });
    }

    Ok(System { strands })
}

fn parse_field<T: std::str::FromStr>(
    value: &str,
    field: &str,
    line: usize,
) -> Result<T, TopologyError> {
    value.parse().map_err(|_| TopologyError::Parse {
        line,
        kind: TopologyParseErrorKind::InvalidInt {
            field: field.to_string(),
            value: value.to_string(),
        },
    })
}
