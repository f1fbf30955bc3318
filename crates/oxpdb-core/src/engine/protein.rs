use crate::core::fragments::library::TemplateError;
use crate::core::io::pdb;
use crate::core::models::atom::Atom;
use crate::engine::placement::FROM_OXDNA_TO_ANGSTROM;
use nalgebra::{Point3, Vector3};
use std::fs;
use std::path::Path;
use tracing::debug;

/// One residue of an all-atom protein template.
#[derive(Debug, Clone)]
pub(crate) struct TemplateResidue {
    pub(crate) atoms: Vec<Atom>,
    ca_index: Option<usize>,
}

impl TemplateResidue {
    /// The point translated onto a bead position, the alpha carbon when the
    /// residue has one and the plain atom centroid otherwise.
    fn anchor(&self) -> Point3<f64> {
        if let Some(index) = self.ca_index {
            return self.atoms[index].position;
        }
        let sum: Vector3<f64> = self.atoms.iter().map(|a| a.position.coords).sum();
        Point3::from(sum / self.atoms.len() as f64)
    }
}

/// An all-atom protein structure consumed residue by residue as peptide
/// strands are rebuilt.
#[derive(Debug, Clone)]
pub(crate) struct ProteinTemplate {
    pub(crate) residues: Vec<TemplateResidue>,
}

impl ProteinTemplate {
    /// Loads a template from a PDB file, splitting its ATOM records into
    /// residues wherever the chain letter or residue serial changes.
    ///
    /// Unlike nucleic reference templates these span several chains, so the
    /// serial alone cannot mark residue boundaries.
    pub(crate) fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut residues: Vec<TemplateResidue> = Vec::new();
        let mut current: Vec<Atom> = Vec::new();

        for (index, line) in content.lines().enumerate() {
            if !pdb::is_atom_record(line) {
                continue;
            }
            let atom =
                pdb::parse_atom_line(line, index + 1).map_err(|source| TemplateError::Parse {
                    path: path.display().to_string(),
                    source,
                })?;
            if let Some(last) = current.last() {
                if last.chain_id != atom.chain_id || last.residue_serial != atom.residue_serial {
                    residues.push(Self::seal(std::mem::take(&mut current)));
                }
            }
            current.push(atom);
        }
        if !current.is_empty() {
            residues.push(Self::seal(current));
        }

        if residues.is_empty() {
            return Err(TemplateError::Empty {
                path: path.display().to_string(),
            });
        }
        debug!(
            path = %path.display(),
            residues = residues.len(),
            "Loaded protein template"
        );
        Ok(Self { residues })
    }

    fn seal(atoms: Vec<Atom>) -> TemplateResidue {
        let ca_index = atoms.iter().position(|a| a.name == "CA");
        TemplateResidue { atoms, ca_index }
    }

    pub(crate) fn len(&self) -> usize {
        self.residues.len()
    }
}

/// Outcome of rebuilding one peptide strand against a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlacerSignal {
    /// The strand fit and the template has residues left; the cursor for the
    /// next strand is returned.
    Placed { next_cursor: usize },
    /// Either the template lacked enough residues (nothing was written) or
    /// the strand consumed it exactly; the caller tells the two apart by
    /// whether the sink grew.
    Exhausted,
}

/// Strategy for turning peptide bead positions into all-atom residues.
pub(crate) trait ProteinPlacer {
    fn place_strand(
        &self,
        template: &ProteinTemplate,
        positions: &[Point3<f64>],
        cursor: usize,
        sink: &mut Vec<Atom>,
    ) -> PlacerSignal;
}

/// Rigidly translates template residues so their anchors land on the scaled
/// bead positions, one residue per bead in template order.
///
/// Orientation is taken from the template as-is; peptide beads carry no
/// usable frame, so no rotation is applied.
pub(crate) struct CaAnchorPlacer;

impl ProteinPlacer for CaAnchorPlacer {
    fn place_strand(
        &self,
        template: &ProteinTemplate,
        positions: &[Point3<f64>],
        cursor: usize,
        sink: &mut Vec<Atom>,
    ) -> PlacerSignal {
        let remaining = template.residues.len().saturating_sub(cursor);
        if remaining < positions.len() {
            return PlacerSignal::Exhausted;
        }

        for (offset, position) in positions.iter().enumerate() {
            let residue = &template.residues[cursor + offset];
            let target = *position * FROM_OXDNA_TO_ANGSTROM;
            let delta = target - residue.anchor();
            for atom in &residue.atoms {
                let mut placed = atom.clone();
                placed.position += delta;
                sink.push(placed);
            }
        }

        let next_cursor = cursor + positions.len();
        if next_cursor >= template.residues.len() {
            PlacerSignal::Exhausted
        } else {
            PlacerSignal::Placed { next_cursor }
        }
    }
}
