use crate::core::models::atom::Atom;
use nalgebra::Point3;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Line is too short for an ATOM/HETATM record (must cover the coordinate fields)")]
    LineTooShort,
}

/// Closing information for a TER record, taken from the last atom of a chain.
#[derive(Debug, Clone, PartialEq)]
pub struct TerRecord {
    pub serial: usize,
    pub residue_name: String,
    pub chain_id: String,
    pub residue_serial: isize,
}

/// One line of assembled output: an atom record or a chain terminator.
///
/// A bare terminator (`Ter(None)`) serializes as `TER` alone, which is how
/// nucleic-acid chains are closed at assembly time; the compliance rewriter
/// replaces these with fully populated terminators when proteins force a
/// renumbering pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Atom(Atom),
    Ter(Option<TerRecord>),
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn parse_int(line: &str, start: usize, end: usize, line_num: usize) -> Result<isize, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidInt {
            columns: format!("{}-{}", start + 1, end),
            value: value.to_string(),
        },
    })
}

fn parse_float(line: &str, start: usize, end: usize, line_num: usize) -> Result<f64, PdbError> {
    let value = slice_and_trim(line, start, end);
    value.parse().map_err(|_| PdbError::Parse {
        line: line_num,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: format!("{}-{}", start + 1, end),
            value: value.to_string(),
        },
    })
}

pub fn is_atom_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETATM")
}

/// Parses one fixed-column ATOM/HETATM line into an [`Atom`].
///
/// Only the fields the reconstruction needs are read: name, residue name,
/// chain id, residue serial, and coordinates. Atom serials, occupancies, and
/// temperature factors are stamped later. A `*` in the atom name is an older
/// convention for the prime character and is normalized to `'`.
pub fn parse_atom_line(line: &str, line_num: usize) -> Result<Atom, PdbError> {
    if line.len() < 54 {
        return Err(PdbError::Parse {
            line: line_num,
            kind: PdbParseErrorKind::LineTooShort,
        });
    }

    let name = slice_and_trim(line, 12, 16).replace('*', "'");
    let residue_name = slice_and_trim(line, 17, 20).to_string();
    let chain_id = slice_and_trim(line, 21, 22).to_string();
    let residue_serial = parse_int(line, 22, 26, line_num)?;
    let x = parse_float(line, 30, 38, line_num)?;
    let y = parse_float(line, 38, 46, line_num)?;
    let z = parse_float(line, 46, 54, line_num)?;

    let mut atom = Atom::new(&name, &residue_name, Point3::new(x, y, z));
    atom.chain_id = chain_id;
    atom.residue_serial = residue_serial;
    Ok(atom)
}

/// Serializes an atom into one 80-column PDB record.
pub fn format_atom_line(atom: &Atom) -> String {
    format!(
        "{:<6}{:>5} {:^4}{:1}{:<3}{:>2}{:>4}{:1}   {:>8.3}{:>8.3}{:>8.3}{:>6.2}{:>6.2}          {:>2}{:2}",
        "ATOM",
        atom.serial,
        atom.name,
        " ",
        atom.residue_name,
        atom.chain_id,
        atom.residue_serial,
        " ",
        atom.position.x,
        atom.position.y,
        atom.position.z,
        atom.occupancy,
        atom.temp_factor,
        "",
        ""
    )
}

pub fn format_ter_line(ter: &Option<TerRecord>) -> String {
    match ter {
        None => "TER".to_string(),
        Some(t) => format!(
            "TER   {:>5}      {:<3}{:>2}{:>4}",
            t.serial, t.residue_name, t.chain_id, t.residue_serial
        ),
    }
}

/// Streams a block of records to a writer, one line per record.
pub fn write_records<W: Write>(writer: &mut W, records: &[Record]) -> io::Result<()> {
    for record in records {
        match record {
            Record::Atom(atom) => writeln!(writer, "{}", format_atom_line(atom))?,
            Record::Ter(ter) => writeln!(writer, "{}", format_ter_line(ter))?,
        }
    }
    Ok(())
}
