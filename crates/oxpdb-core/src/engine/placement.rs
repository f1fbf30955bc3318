use crate::core::fragments::fragment::Fragment;
use crate::core::fragments::library::FragmentLibrary;
use crate::core::io::rmsf::DecorationMap;
use crate::core::models::atom::Atom;
use crate::core::models::conf::MonomerState;
use crate::core::models::system::Monomer;
use crate::core::utils::codes;
use crate::engine::alignment;
use crate::engine::error::EngineError;
use nalgebra::{Point3, Vector3};
use tracing::warn;

/// Conversion factor from oxDNA length units to Angstroms.
pub(crate) const FROM_OXDNA_TO_ANGSTROM: f64 = 8.518;

/// Highest atom serial the five-column field can hold.
const MAX_ATOM_SERIAL: usize = 99_999;

/// Residue serials repeat past this value, an inherited quirk that maps an
/// intra-strand index of exactly 9999 to serial 0.
const RESIDUE_SERIAL_MODULUS: usize = 9_999;

/// Box edge, in Angstroms, beyond which coordinates can overflow their
/// eight-column fields and atoms are wrapped back into the box.
const MAX_UNWRAPPED_BOX: f64 = 999.0;

/// Chemical end of a nucleic strand a residue sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Terminus {
    None,
    ThreePrime,
    FivePrime,
}

/// Hands out atom serials, wrapping back to 1 past the field limit.
#[derive(Debug, Clone)]
pub(crate) struct SerialCounter {
    next: usize,
}

impl SerialCounter {
    pub(crate) fn new() -> Self {
        Self { next: 1 }
    }

    pub(crate) fn take(&mut self) -> usize {
        let serial = self.next;
        self.next += 1;
        if self.next > MAX_ATOM_SERIAL {
            self.next = 1;
        }
        serial
    }
}

/// Turns one coarse-grained monomer at a time into decorated atom records.
///
/// The pipeline owns the per-run serial state and the once-per-run warning
/// flags; the fragment library and decoration map are shared by reference
/// and never mutated.
pub(crate) struct PlacementPipeline<'a> {
    library: &'a FragmentLibrary,
    decorations: &'a DecorationMap,
    box_angstrom: Vector3<f64>,
    needs_wrapping: bool,
    include_hydrogens: bool,
    uniform_residue_names: bool,
    serials: SerialCounter,
    warned_large_box: bool,
    warned_uracil: bool,
}

impl<'a> PlacementPipeline<'a> {
    pub(crate) fn new(
        library: &'a FragmentLibrary,
        decorations: &'a DecorationMap,
        box_angstrom: Vector3<f64>,
        include_hydrogens: bool,
        uniform_residue_names: bool,
    ) -> Self {
        let needs_wrapping = box_angstrom.iter().any(|&length| length > MAX_UNWRAPPED_BOX);
        Self {
            library,
            decorations,
            box_angstrom,
            needs_wrapping,
            include_hydrogens,
            uniform_residue_names,
            serials: SerialCounter::new(),
            warned_large_box: false,
            warned_uracil: false,
        }
    }

    /// Places one monomer and returns its atom records in emission order.
    ///
    /// The reference fragment selected by the monomer's type code is cloned,
    /// aligned to the simulated orientation, and translated so its base-ring
    /// centroid sits at the scaled position. Terminal residues lose or gain
    /// atoms per their chemistry and carry a residue-name suffix unless
    /// uniform naming is on. `residue_number` is the 1-based position in the
    /// strand's output order.
    pub(crate) fn place(
        &mut self,
        monomer: &Monomer,
        state: &MonomerState,
        strand_id: i64,
        chain_id: &str,
        residue_number: usize,
        terminus: Terminus,
    ) -> Result<Vec<Atom>, EngineError> {
        let mut fragment = self.fragment_for_code(&monomer.code, strand_id)?;

        alignment::align(&mut fragment, &state.a1, &state.a3);
        fragment.set_base_centroid(state.position * FROM_OXDNA_TO_ANGSTROM);

        if self.needs_wrapping {
            if !self.warned_large_box {
                warn!(
                    "at least one box dimension exceeds {} Angstroms, atoms outside the box are wrapped back through periodic boundary conditions",
                    MAX_UNWRAPPED_BOX
                );
                self.warned_large_box = true;
            }
            fragment.wrap_into_box(&self.box_angstrom);
        }

        let suffix = match terminus {
            Terminus::ThreePrime if !self.uniform_residue_names => "3",
            Terminus::FivePrime if !self.uniform_residue_names => "5",
            _ => "",
        };
        let residue_name = format!("{}{}", fragment.name, suffix);
        let residue_serial = (residue_number % RESIDUE_SERIAL_MODULUS) as isize;
        let decoration = self.decorations.value(monomer.conf_index);

        let mut emitted: Vec<Atom> = Vec::with_capacity(fragment.atom_count() + 1);
        let mut phosphorus: Option<Point3<f64>> = None;
        let mut o5_prime: Option<Point3<f64>> = None;
        let mut o3_prime: Option<Point3<f64>> = None;

        for atom in fragment.atoms() {
            if !self.include_hydrogens && atom.is_hydrogen() {
                continue;
            }
            match terminus {
                Terminus::FivePrime => {
                    // The whole phosphate group stays in the simulation but
                    // not in a 5' residue; the bare P is still needed below
                    // to direct the replacement hydrogen.
                    if atom.name.contains('P') {
                        if atom.name == "P" {
                            phosphorus = Some(atom.position);
                        }
                        continue;
                    }
                    if atom.name == "O5'" {
                        o5_prime = Some(atom.position);
                    }
                }
                Terminus::ThreePrime => {
                    if atom.name == "O3'" {
                        o3_prime = Some(atom.position);
                    }
                }
                Terminus::None => {}
            }
            emitted.push(self.output_atom(
                &atom.name,
                &residue_name,
                chain_id,
                residue_serial,
                atom.position,
                decoration,
            ));
        }

        match terminus {
            Terminus::FivePrime => {
                if let (Some(p), Some(o5)) = (phosphorus, o5_prime) {
                    let direction = (p - o5).normalize();
                    emitted.push(self.output_atom(
                        "HO5'",
                        &residue_name,
                        chain_id,
                        residue_serial,
                        o5 + direction,
                        decoration,
                    ));
                }
            }
            Terminus::ThreePrime => {
                if let Some(o3) = o3_prime {
                    let frame = fragment.frame;
                    let direction = (0.2 * frame.a2 - 0.2 * frame.a1 - frame.a3).normalize();
                    emitted.push(self.output_atom(
                        "HO3'",
                        &residue_name,
                        chain_id,
                        residue_serial,
                        o3 + direction,
                        decoration,
                    ));
                }
            }
            Terminus::None => {}
        }

        Ok(emitted)
    }

    fn output_atom(
        &mut self,
        name: &str,
        residue_name: &str,
        chain_id: &str,
        residue_serial: isize,
        position: Point3<f64>,
        decoration: f64,
    ) -> Atom {
        let mut atom = Atom::new(name, residue_name, position);
        atom.serial = self.serials.take();
        atom.chain_id = chain_id.to_string();
        atom.residue_serial = residue_serial;
        atom.temp_factor = decoration;
        atom
    }

    /// Resolves a topology type code to a cloned library fragment.
    ///
    /// Numeric codes use the fixed 0/1/2/3 table; letter codes are matched
    /// case-insensitively. A uracil code without a uracil fragment falls
    /// back to thymine, once-warned, since the two share their ring atoms.
    fn fragment_for_code(&mut self, code: &str, strand_id: i64) -> Result<Fragment, EngineError> {
        let unknown = || EngineError::UnknownUnitType {
            code: code.to_string(),
            strand_id,
        };

        let trimmed = code.trim();
        let letter = match trimmed.parse::<i64>() {
            Ok(number) => codes::base_letter_for_numeric(number)
                .map(str::to_string)
                .ok_or_else(unknown)?,
            Err(_) => {
                let upper = trimmed.to_uppercase();
                if !codes::is_base_letter(&upper) {
                    return Err(unknown());
                }
                upper
            }
        };

        if let Some(fragment) = self.library.fragment(&letter) {
            return Ok(fragment.clone());
        }
        if letter == "U" {
            if !self.warned_uracil {
                warn!("no uracil fragment in the reference template, substituting thymine");
                self.warned_uracil = true;
            }
            if let Some(fragment) = self.library.fragment("T") {
                return Ok(fragment.clone());
            }
        }
        Err(unknown())
    }
}
