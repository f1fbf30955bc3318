use crate::core::io::pdb::{Record, TerRecord};
use crate::engine::error::EngineError;
use tracing::debug;

const ALPHABET_LEN: usize = 26;

/// Renumbers a record stream into one PDB-compliant unit.
///
/// Runs only when peptide strands were rebuilt; their atoms arrive carrying
/// whatever chain letters and residue serials the protein template used, so
/// serials can collide and chains can repeat. The pass walks atoms in
/// emission order, assigns a strictly increasing atom serial, bumps a global
/// residue serial whenever the source (chain, residue serial) identity
/// changes, and relabels chains from a deterministic alphabet. Incoming
/// terminators are dropped; a populated terminator is emitted at every chain
/// change, mirroring the closing chain's last atom. The final chain stays
/// open.
pub(crate) fn rewrite(records: &[Record]) -> Result<Vec<Record>, EngineError> {
    let mut output: Vec<Record> = Vec::with_capacity(records.len());
    let mut next_serial: usize = 1;
    let mut residue_counter: usize = 0;
    let mut chain_index: usize = 0;
    let mut previous: Option<(String, isize)> = None;

    for record in records {
        let Record::Atom(atom) = record else {
            continue;
        };

        match &previous {
            None => {
                residue_counter = 1;
            }
            Some((chain, residue_serial)) => {
                if *chain != atom.chain_id {
                    output.push(Record::Ter(closing_terminator(&output)));
                    chain_index += 1;
                    residue_counter += 1;
                } else if *residue_serial != atom.residue_serial {
                    residue_counter += 1;
                }
            }
        }
        previous = Some((atom.chain_id.clone(), atom.residue_serial));

        let mut rewritten = atom.clone();
        rewritten.serial = next_serial;
        next_serial += 1;
        rewritten.residue_serial = residue_counter as isize;
        rewritten.chain_id = chain_label(chain_index)?;
        output.push(Record::Atom(rewritten));
    }

    debug!(
        atoms = next_serial - 1,
        chains = if previous.is_some() { chain_index + 1 } else { 0 },
        "Rewrote records for compliance"
    );
    Ok(output)
}

fn closing_terminator(output: &[Record]) -> Option<TerRecord> {
    match output.last() {
        Some(Record::Atom(atom)) => Some(TerRecord {
            serial: atom.serial,
            residue_name: atom.residue_name.clone(),
            chain_id: atom.chain_id.clone(),
            residue_serial: atom.residue_serial,
        }),
        _ => None,
    }
}

/// The deterministic chain alphabet: `A`..`Z`, then `AA`..`ZZ`.
fn chain_label(index: usize) -> Result<String, EngineError> {
    if index < ALPHABET_LEN {
        return Ok(((b'A' + index as u8) as char).to_string());
    }
    let pair = index - ALPHABET_LEN;
    if pair >= ALPHABET_LEN * ALPHABET_LEN {
        return Err(EngineError::Internal(format!(
            "chain alphabet exhausted after {} chains",
            ALPHABET_LEN + ALPHABET_LEN * ALPHABET_LEN
        )));
    }
    let first = (b'A' + (pair / ALPHABET_LEN) as u8) as char;
    let second = (b'A' + (pair % ALPHABET_LEN) as u8) as char;
    Ok(format!("{}{}", first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    fn atom(chain: &str, residue_serial: isize, name: &str) -> Record {
        let mut a = Atom::new(name, "ALA", Point3::new(0.0, 0.0, 0.0));
        a.chain_id = chain.to_string();
        a.residue_serial = residue_serial;
        Record::Atom(a)
    }

    fn atoms_of(records: &[Record]) -> Vec<&Atom> {
        records
            .iter()
            .filter_map(|r| match r {
                Record::Atom(a) => Some(a),
                Record::Ter(_) => None,
            })
            .collect()
    }

    #[test]
    fn chain_labels_run_through_single_then_double_letters() {
        assert_eq!(chain_label(0).unwrap(), "A");
        assert_eq!(chain_label(25).unwrap(), "Z");
        assert_eq!(chain_label(26).unwrap(), "AA");
        assert_eq!(chain_label(27).unwrap(), "AB");
        assert_eq!(chain_label(51).unwrap(), "AZ");
        assert_eq!(chain_label(52).unwrap(), "BA");
        assert_eq!(chain_label(701).unwrap(), "ZZ");
        assert!(matches!(chain_label(702), Err(EngineError::Internal(_))));
    }

    #[test]
    fn bare_terminators_are_dropped_and_chains_renumbered() {
        let records = vec![
            atom("A", 1, "N1"),
            atom("A", 1, "C2"),
            Record::Ter(None),
            atom("P", 7, "CA"),
            atom("P", 8, "CA"),
        ];

        let rewritten = rewrite(&records).unwrap();

        assert_eq!(rewritten.len(), 5);
        let ter = &rewritten[2];
        match ter {
            Record::Ter(Some(info)) => {
                assert_eq!(info.serial, 2);
                assert_eq!(info.chain_id, "A");
                assert_eq!(info.residue_serial, 1);
                assert_eq!(info.residue_name, "ALA");
            }
            other => panic!("expected a populated terminator, got {:?}", other),
        }

        let atoms = atoms_of(&rewritten);
        let serials: Vec<usize> = atoms.iter().map(|a| a.serial).collect();
        assert_eq!(serials, [1, 2, 3, 4]);
        assert_eq!(atoms[2].chain_id, "B");
        assert_eq!(atoms[2].residue_serial, 2);
        assert_eq!(atoms[3].residue_serial, 3);
        assert!(!matches!(rewritten.last(), Some(Record::Ter(_))));
    }

    #[test]
    fn residue_serial_bumps_on_source_serial_changes() {
        let records = vec![
            atom("A", 1, "N1"),
            atom("A", 1, "C2"),
            atom("A", 2, "N1"),
            atom("A", 5, "N1"),
        ];

        let rewritten = rewrite(&records).unwrap();
        let residues: Vec<isize> = atoms_of(&rewritten).iter().map(|a| a.residue_serial).collect();
        assert_eq!(residues, [1, 1, 2, 3]);
    }

    #[test]
    fn a_chain_change_bumps_the_residue_serial_even_when_serials_match() {
        let records = vec![atom("A", 3, "N1"), atom("B", 3, "N1")];

        let rewritten = rewrite(&records).unwrap();
        let atoms = atoms_of(&rewritten);
        assert_eq!(atoms[0].residue_serial, 1);
        assert_eq!(atoms[1].residue_serial, 2);
        assert_eq!(atoms[0].chain_id, "A");
        assert_eq!(atoms[1].chain_id, "B");
    }

    #[test]
    fn a_single_chain_gets_no_terminator() {
        let records = vec![atom("Q", 1, "N1"), atom("Q", 2, "C2")];

        let rewritten = rewrite(&records).unwrap();
        assert_eq!(rewritten.len(), 2);
        assert!(rewritten.iter().all(|r| matches!(r, Record::Atom(_))));
        assert!(atoms_of(&rewritten).iter().all(|a| a.chain_id == "A"));
    }

    #[test]
    fn the_twenty_seventh_chain_is_double_lettered() {
        let mut records = Vec::new();
        for i in 0..27 {
            records.push(atom(&format!("c{}", i), 1, "CA"));
        }

        let rewritten = rewrite(&records).unwrap();
        let atoms = atoms_of(&rewritten);
        assert_eq!(atoms.len(), 27);
        assert_eq!(atoms[25].chain_id, "Z");
        assert_eq!(atoms[26].chain_id, "AA");
    }

    #[test]
    fn exhausting_the_chain_alphabet_is_fatal() {
        let mut records = Vec::new();
        for i in 0..703 {
            records.push(atom(&format!("c{}", i), 1, "CA"));
        }

        let result = rewrite(&records);
        assert!(matches!(result, Err(EngineError::Internal(_))));
    }

    #[test]
    fn empty_input_stays_empty() {
        let rewritten = rewrite(&[]).unwrap();
        assert!(rewritten.is_empty());
    }
}
