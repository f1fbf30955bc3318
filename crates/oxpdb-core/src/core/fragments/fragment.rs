use super::library::TemplateError;
use crate::core::models::atom::{Atom, AtomGroup};
use crate::core::models::frame::Frame;
use crate::core::utils::codes;
use nalgebra::{Point3, Rotation3, Vector3};

/// Distance from the base-ring centroid to the coarse-grained base site, in Angstroms.
pub const BASE_SHIFT: f64 = 1.13;

const RING_ATOM_NAMES: [&str; 6] = ["C2", "C4", "C5", "C6", "N1", "N3"];

const PYRIMIDINE_A1_PAIRS: [(&str, &str); 3] = [("N3", "C6"), ("C2", "N1"), ("C4", "C5")];
const PURINE_A1_PAIRS: [(&str, &str); 3] = [("N1", "C4"), ("C2", "N3"), ("C6", "C5")];

/// An atomistic nucleotide template with an orientation frame derived from its geometry.
///
/// Fragments are parsed once from the reference PDB and cloned for every placed
/// monomer; the clone is rotated and translated in place while the library copy
/// stays untouched. Atoms are partitioned into base, phosphate, and sugar
/// groups and always iterate in that order, preserving insertion order inside
/// each group.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// The residue name from the template (e.g., "DG").
    pub name: String,
    /// The one-letter base label this fragment is selected by (e.g., "G").
    pub base: String,
    /// The orientation frame last computed from atom geometry.
    pub frame: Frame,
    base_atoms: Vec<Atom>,
    phosphate_atoms: Vec<Atom>,
    sugar_atoms: Vec<Atom>,
    ring_indices: Vec<usize>,
    a1_pairs: [(usize, usize); 3],
    o4_index: usize,
}

impl Fragment {
    /// Builds a fragment from the atoms of one template residue.
    ///
    /// Atoms are partitioned into their positional groups, the atoms required
    /// for frame computation are resolved by name, and the initial frame is
    /// computed. Pyrimidines (C, T, U) and purines use different atom pairs
    /// for the `a1` axis.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::MissingAtom` if any of the six ring atoms or
    /// the O4' sugar oxygen is absent, since the frame cannot be derived from
    /// incomplete geometry.
    pub fn from_template_atoms(name: &str, atoms: Vec<Atom>) -> Result<Self, TemplateError> {
        let base = codes::fragment_base_label(name);
        if base == "U" {
            tracing::warn!(
                residue = name,
                "unsupported uracil template residue, use at your own risk"
            );
        }

        let mut base_atoms = Vec::new();
        let mut phosphate_atoms = Vec::new();
        let mut sugar_atoms = Vec::new();
        for atom in atoms {
            match atom.group() {
                AtomGroup::Base => base_atoms.push(atom),
                AtomGroup::Phosphate => phosphate_atoms.push(atom),
                AtomGroup::Sugar => sugar_atoms.push(atom),
            }
        }

        let find_base_atom = |needle: &str| {
            base_atoms
                .iter()
                .position(|a| a.name == needle)
                .ok_or_else(|| TemplateError::MissingAtom {
                    residue: name.to_string(),
                    atom: needle.to_string(),
                })
        };

        let ring_indices = RING_ATOM_NAMES
            .iter()
            .map(|&ring_name| find_base_atom(ring_name))
            .collect::<Result<Vec<_>, _>>()?;

        let pair_names = if is_pyrimidine(&base) {
            PYRIMIDINE_A1_PAIRS
        } else {
            PURINE_A1_PAIRS
        };
        let mut a1_pairs = [(0usize, 0usize); 3];
        for (slot, (p, q)) in a1_pairs.iter_mut().zip(pair_names) {
            *slot = (find_base_atom(p)?, find_base_atom(q)?);
        }

        let o4_index = sugar_atoms
            .iter()
            .position(|a| a.name == "O4'")
            .ok_or_else(|| TemplateError::MissingAtom {
                residue: name.to_string(),
                atom: "O4'".to_string(),
            })?;

        let mut fragment = Self {
            name: name.to_string(),
            base,
            frame: Frame::from_a1_a3(Vector3::x(), Vector3::z()),
            base_atoms,
            phosphate_atoms,
            sugar_atoms,
            ring_indices,
            a1_pairs,
            o4_index,
        };
        fragment.frame = fragment.compute_frame();
        Ok(fragment)
    }

    /// Iterates all atoms in serialization order: base, then phosphate, then sugar.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.base_atoms
            .iter()
            .chain(&self.phosphate_atoms)
            .chain(&self.sugar_atoms)
    }

    fn atoms_mut(&mut self) -> impl Iterator<Item = &mut Atom> {
        self.base_atoms
            .iter_mut()
            .chain(self.phosphate_atoms.iter_mut())
            .chain(self.sugar_atoms.iter_mut())
    }

    /// Looks up an atom by its PDB name.
    pub fn named_atom(&self, name: &str) -> Option<&Atom> {
        self.atoms().find(|a| a.name == name)
    }

    /// Returns the number of atoms across all groups.
    pub fn atom_count(&self) -> usize {
        self.base_atoms.len() + self.phosphate_atoms.len() + self.sugar_atoms.len()
    }

    /// The center of mass over every atom of the fragment.
    pub fn center_of_mass(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self.atoms().map(|a| a.position.coords).sum();
        Point3::from(sum / self.atom_count() as f64)
    }

    fn ring_centroid(&self) -> Point3<f64> {
        let sum: Vector3<f64> = self
            .ring_indices
            .iter()
            .map(|&i| self.base_atoms[i].position.coords)
            .sum();
        Point3::from(sum / self.ring_indices.len() as f64)
    }

    /// Rotates every atom about the fragment's center of mass and refreshes the frame.
    pub fn rotate(&mut self, rotation: &Rotation3<f64>) {
        let com = self.center_of_mass();
        for atom in self.atoms_mut() {
            atom.position = com + rotation * (atom.position - com);
        }
        self.frame = self.compute_frame();
    }

    /// Moves the fragment so its base-ring centroid lands at `target`, offset
    /// backwards along the current `a1` axis by the base shift, then refreshes
    /// the frame.
    pub fn set_base_centroid(&mut self, target: Point3<f64>) {
        let shift = target - self.ring_centroid() - BASE_SHIFT * self.frame.a1;
        for atom in self.atoms_mut() {
            atom.position += shift;
        }
        self.frame = self.compute_frame();
    }

    /// Folds every atom coordinate back into the periodic box, component-wise.
    ///
    /// The frame is intentionally left untouched: wrapping can move atoms to
    /// opposite box faces, and the pre-wrap frame is still the one terminal
    /// hydrogen synthesis must use.
    pub fn wrap_into_box(&mut self, box_size: &Vector3<f64>) {
        for atom in self.atoms_mut() {
            for axis in 0..3 {
                let length = box_size[axis];
                atom.position[axis] -= (atom.position[axis] / length).round() * length;
            }
        }
    }

    /// Replaces the cached frame with its Gram-Schmidt corrected version.
    pub fn orthonormalize_frame(&mut self) {
        self.frame = self.frame.orthonormalized();
    }

    /// Returns the distortion metric of the current frame.
    pub fn distortion(&self) -> f64 {
        self.frame.distortion()
    }

    fn compute_frame(&self) -> Frame {
        Frame::from_a1_a3(self.compute_a1(), self.compute_a3())
    }

    fn compute_a1(&self) -> Vector3<f64> {
        let mut a1 = Vector3::zeros();
        for &(p, q) in &self.a1_pairs {
            a1 += self.base_atoms[p].position - self.base_atoms[q].position;
        }
        a1.normalize()
    }

    // Averages the normalized normals of every ordered ring-atom triple, each
    // sign-corrected toward the O4' oxygen, which sits on the 5' side of the
    // base centroid in any non-pathological nucleotide.
    fn compute_a3(&self) -> Vector3<f64> {
        let base_sum: Vector3<f64> = self.base_atoms.iter().map(|a| a.position.coords).sum();
        let base_com = Point3::from(base_sum / self.base_atoms.len() as f64);
        let parallel_to = self.sugar_atoms[self.o4_index].position - base_com;

        let mut a3_sum = Vector3::zeros();
        for &pi in &self.ring_indices {
            for &qi in &self.ring_indices {
                if qi == pi {
                    continue;
                }
                for &ri in &self.ring_indices {
                    if ri == pi || ri == qi {
                        continue;
                    }
                    let p = self.base_atoms[pi].position;
                    let v1 = (p - self.base_atoms[qi].position).normalize();
                    let v2 = (p - self.base_atoms[ri].position).normalize();
                    let mut a3 = v1.cross(&v2).normalize();
                    if a3.dot(&parallel_to) < 0.0 {
                        a3 = -a3;
                    }
                    a3_sum += a3;
                }
            }
        }
        a3_sum.normalize()
    }
}

fn is_pyrimidine(base: &str) -> bool {
    matches!(base, "C" | "T" | "U")
}
