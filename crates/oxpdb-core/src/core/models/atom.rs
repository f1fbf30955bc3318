use nalgebra::Point3;

/// Represents the positional group of an atom within a nucleotide fragment.
///
/// This enum categorizes atoms by the chemical moiety they belong to, which
/// controls serialization order (base first, then phosphate, then sugar) and
/// lets terminal-residue handling strip or synthesize whole groups at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomGroup {
    /// Atoms of the nitrogenous base ring and its substituents.
    Base,
    /// Atoms of the phosphate group, including the synthesized 5' hydroxyl hydrogen.
    Phosphate,
    /// Atoms of the sugar ring, identified by a primed atom name.
    Sugar,
}

impl AtomGroup {
    /// Classifies an atom by its PDB name.
    ///
    /// Names containing `P` belong to the phosphate group, as does the `HO5'`
    /// hydrogen that replaces it on 5' termini. Any other primed name belongs
    /// to the sugar; everything else is part of the base.
    ///
    /// # Arguments
    ///
    /// * `name` - The PDB atom name (e.g., "OP1", "C1'", "N9").
    pub fn classify(name: &str) -> Self {
        if name.contains('P') || name == "HO5'" {
            AtomGroup::Phosphate
        } else if name.contains('\'') {
            AtomGroup::Sugar
        } else {
            AtomGroup::Base
        }
    }
}

/// Represents a single atom of a reference fragment or an output record.
///
/// This struct carries exactly the fields of a fixed-column PDB atom record,
/// so a placed atom can be serialized without consulting any other state.
/// Fragment atoms keep serial 0 and an empty chain id until the placement
/// pipeline stamps them.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The atom serial number within the output file.
    pub serial: usize,
    /// The PDB atom name (e.g., "CA", "C1'", "OP1").
    pub name: String,
    /// The name of the residue this atom belongs to (e.g., "DG", "DG5").
    pub residue_name: String,
    /// The chain identifier, one or two characters.
    pub chain_id: String,
    /// The residue serial number within the chain.
    pub residue_serial: isize,
    /// The 3D coordinates of the atom in Angstroms.
    pub position: Point3<f64>,
    /// The occupancy value of the output record.
    pub occupancy: f64,
    /// The temperature factor field, which carries per-monomer decoration values.
    pub temp_factor: f64,
}

impl Atom {
    /// Creates a new `Atom` with default values for the bookkeeping fields.
    ///
    /// This constructor initializes an atom with the provided name, residue
    /// name, and position. Serial and chain assignment happen later, during
    /// placement; occupancy and temperature factor default to 1.0.
    ///
    /// # Arguments
    ///
    /// * `name` - The PDB atom name.
    /// * `residue_name` - The name of the owning residue.
    /// * `position` - The 3D coordinates of the atom in Angstroms.
    pub fn new(name: &str, residue_name: &str, position: Point3<f64>) -> Self {
        Self {
            serial: 0,
            name: name.to_string(),
            residue_name: residue_name.to_string(),
            chain_id: String::new(),
            residue_serial: 0,
            position,
            occupancy: 1.0,
            temp_factor: 1.0,
        }
    }

    /// Returns the positional group this atom belongs to.
    pub fn group(&self) -> AtomGroup {
        AtomGroup::classify(&self.name)
    }

    /// Returns `true` if this atom is a hydrogen by PDB naming convention.
    pub fn is_hydrogen(&self) -> bool {
        self.name.contains('H')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_atom_has_expected_default_fields() {
        let atom = Atom::new("C1'", "DG", Point3::new(1.0, 2.0, 3.0));

        assert_eq!(atom.serial, 0);
        assert_eq!(atom.name, "C1'");
        assert_eq!(atom.residue_name, "DG");
        assert_eq!(atom.chain_id, "");
        assert_eq!(atom.residue_serial, 0);
        assert_eq!(atom.position, Point3::new(1.0, 2.0, 3.0));
        assert_eq!(atom.occupancy, 1.0);
        assert_eq!(atom.temp_factor, 1.0);
    }

    #[test]
    fn classify_assigns_phosphorus_names_to_phosphate() {
        assert_eq!(AtomGroup::classify("P"), AtomGroup::Phosphate);
        assert_eq!(AtomGroup::classify("OP1"), AtomGroup::Phosphate);
        assert_eq!(AtomGroup::classify("OP2"), AtomGroup::Phosphate);
    }

    #[test]
    fn classify_assigns_terminal_hydroxyl_hydrogen_to_phosphate() {
        assert_eq!(AtomGroup::classify("HO5'"), AtomGroup::Phosphate);
    }

    #[test]
    fn classify_assigns_primed_names_to_sugar() {
        assert_eq!(AtomGroup::classify("C1'"), AtomGroup::Sugar);
        assert_eq!(AtomGroup::classify("O4'"), AtomGroup::Sugar);
        assert_eq!(AtomGroup::classify("O5'"), AtomGroup::Sugar);
        assert_eq!(AtomGroup::classify("HO3'"), AtomGroup::Sugar);
    }

    #[test]
    fn classify_assigns_unprimed_names_to_base() {
        assert_eq!(AtomGroup::classify("N9"), AtomGroup::Base);
        assert_eq!(AtomGroup::classify("C2"), AtomGroup::Base);
        assert_eq!(AtomGroup::classify("H1"), AtomGroup::Base);
    }

    #[test]
    fn is_hydrogen_matches_naming_convention() {
        assert!(Atom::new("H1'", "DG", Point3::origin()).is_hydrogen());
        assert!(Atom::new("HO5'", "DG", Point3::origin()).is_hydrogen());
        assert!(!Atom::new("C1'", "DG", Point3::origin()).is_hydrogen());
        assert!(!Atom::new("P", "DG", Point3::origin()).is_hydrogen());
    }

    #[test]
    fn atom_equality_and_clone_works() {
        let mut atom1 = Atom::new("N9", "DG", Point3::new(0.0, 0.0, 0.0));
        atom1.chain_id = "A".to_string(); // Also test non-default fields
        let atom2 = atom1.clone();
        assert_eq!(atom1, atom2);
    }
}
