use super::fragment::Fragment;
use crate::core::io::pdb::{self, PdbError};
use crate::core::models::atom::Atom;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Holds the best reference fragment for each base type found in a template.
///
/// The library is built once at startup from a reference PDB (typically a
/// clean B-DNA duplex) and is immutable afterwards. Placement clones the
/// registered fragment for every monomer, so the stored copies are never
/// mutated during a conversion.
#[derive(Debug, Clone, Default)]
pub struct FragmentLibrary {
    fragments: HashMap<String, Fragment>,
}

/// Represents errors that can occur while loading the reference template.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Indicates that the template file could not be read from disk.
    #[error("File I/O error for '{path}': {source}")]
    Io {
        /// The path to the file that could not be read.
        path: String,
        /// The underlying I/O error that occurred.
        source: std::io::Error,
    },
    /// Indicates that an atom record in the template is malformed.
    #[error("Malformed atom record in '{path}': {source}")]
    Parse {
        /// The path to the file that could not be parsed.
        path: String,
        /// The underlying record-level parse error.
        source: PdbError,
    },
    /// Indicates that an atom needed for frame computation is absent.
    ///
    /// Every template residue must contain the six base-ring atoms and the
    /// O4' sugar oxygen; without them the orientation frame is undefined.
    #[error("Missing atom '{atom}' required for frame computation in residue '{residue}'")]
    MissingAtom { residue: String, atom: String },
    /// Indicates that the template contained no atom records at all.
    #[error("No nucleotide residues found in template '{path}'")]
    Empty { path: String },
}

impl FragmentLibrary {
    /// Loads and indexes reference fragments from a template PDB file.
    ///
    /// Atom records are grouped into residues on every change of the
    /// residue-serial field, each residue becomes a [`Fragment`] with a frame
    /// derived from its geometry, and duplicates per base label are resolved
    /// by keeping the fragment with the strictly smaller distortion. Every
    /// retained frame is orthonormalized at the end so downstream rotation
    /// math starts from exactly perpendicular axes.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::Io` if the file cannot be read.
    /// Returns `TemplateError::Parse` if an atom record is malformed.
    /// Returns `TemplateError::MissingAtom` if a residue lacks frame atoms.
    /// Returns `TemplateError::Empty` if no atom records are present.
    pub fn load(template_path: &Path) -> Result<Self, TemplateError> {
        let content = std::fs::read_to_string(template_path).map_err(|e| TemplateError::Io {
            path: template_path.to_string_lossy().to_string(),
            source: e,
        })?;
        let path_label = template_path.to_string_lossy().to_string();

        // Phase 1: group atom records into template residues
        let mut residues: Vec<(String, Vec<Atom>)> = Vec::new();
        let mut previous_serial: Option<isize> = None;
        for (idx, line) in content.lines().enumerate() {
            if !pdb::is_atom_record(line) {
                continue;
            }
            let atom = pdb::parse_atom_line(line, idx + 1).map_err(|e| TemplateError::Parse {
                path: path_label.clone(),
                source: e,
            })?;
            if previous_serial != Some(atom.residue_serial) {
                previous_serial = Some(atom.residue_serial);
                residues.push((atom.residue_name.clone(), Vec::new()));
            }
            if let Some((_, atoms)) = residues.last_mut() {
                atoms.push(atom);
            }
        }
        if residues.is_empty() {
            return Err(TemplateError::Empty { path: path_label });
        }

        // Phase 2: build fragments, keeping the best one per base label
        let mut fragments: HashMap<String, Fragment> = HashMap::new();
        for (name, atoms) in residues {
            let fragment = Fragment::from_template_atoms(&name, atoms)?;
            match fragments.get(&fragment.base) {
                Some(existing) if existing.distortion() <= fragment.distortion() => {}
                _ => {
                    fragments.insert(fragment.base.clone(), fragment);
                }
            }
        }

        // Phase 3: orthonormalize the retained frames
        for fragment in fragments.values_mut() {
            fragment.orthonormalize_frame();
        }

        tracing::debug!(
            fragments = fragments.len(),
            template = %path_label,
            "reference fragment library loaded"
        );

        Ok(Self { fragments })
    }

    /// Returns the fragment registered for a one-letter base label.
    pub fn fragment(&self, base: &str) -> Option<&Fragment> {
        self.fragments.get(base)
    }

    /// Returns the number of distinct base types in the library.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` if no fragments are registered.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    fn template_line(serial: isize, name: &str, residue: &str, pos: [f64; 3]) -> String {
        let mut atom = Atom::new(name, residue, Point3::new(pos[0], pos[1], pos[2]));
        atom.chain_id = "A".to_string();
        atom.residue_serial = serial;
        pdb::format_atom_line(&atom)
    }

    // Planar hexagonal ring plus the sugar/phosphate atoms every fragment
    // needs. `pucker` lifts N1 out of the ring plane to raise the distortion.
    fn residue_lines(serial: isize, residue: &str, offset: f64, pucker: f64) -> Vec<String> {
        let ring = [
            ("N1", 0.0_f64, pucker),
            ("C2", 60.0, 0.0),
            ("N3", 120.0, 0.0),
            ("C4", 180.0, 0.0),
            ("C5", 240.0, 0.0),
            ("C6", 300.0, 0.0),
        ];
        let mut lines = Vec::new();
        for (name, degrees, z) in ring {
            let rad = degrees.to_radians();
            lines.push(template_line(
                serial,
                name,
                residue,
                [1.2 * rad.cos() + offset, 1.2 * rad.sin(), z],
            ));
        }
        lines.push(template_line(serial, "P", residue, [3.5 + offset, 1.5, 1.0]));
        lines.push(template_line(serial, "O4'", residue, [offset, 0.0, 1.5]));
        lines.push(template_line(serial, "C1'", residue, [1.8 + offset, -1.2, 0.3]));
        lines.push(template_line(serial, "O5'", residue, [2.5 + offset, 1.0, 0.5]));
        lines.push(template_line(serial, "O3'", residue, [2.0 + offset, -2.0, 0.0]));
        lines
    }

    fn write_template(lines: &[String]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.pdb");
        let mut content = String::from("REMARK  synthetic reference duplex\n");
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn load_groups_residues_on_serial_changes() {
        let mut lines = residue_lines(1, "DG", 0.0, 0.0);
        lines.extend(residue_lines(2, "DA", 20.0, 0.0));
        let (_dir, path) = write_template(&lines);

        let library = FragmentLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 2);
        assert!(library.fragment("G").is_some());
        assert!(library.fragment("A").is_some());
        assert!(library.fragment("T").is_none());
    }

    #[test]
    fn load_orthonormalizes_retained_frames() {
        let (_dir, path) = write_template(&residue_lines(1, "DG", 0.0, 0.4));
        let library = FragmentLibrary::load(&path).unwrap();
        let frame = library.fragment("G").unwrap().frame;
        assert!((frame.a1.norm() - 1.0).abs() < 1e-9);
        assert!((frame.a2.norm() - 1.0).abs() < 1e-9);
        assert!((frame.a3.norm() - 1.0).abs() < 1e-9);
        assert!(frame.a1.dot(&frame.a3).abs() < 1e-9);
        assert!(frame.a1.dot(&frame.a2).abs() < 1e-9);
    }

    #[test]
    fn duplicate_base_types_keep_the_lower_distortion() {
        let mut lines = residue_lines(1, "DG", 0.0, 0.4);
        lines.extend(residue_lines(2, "DG", 20.0, 0.0));
        let (_dir, path) = write_template(&lines);

        let library = FragmentLibrary::load(&path).unwrap();
        assert_eq!(library.len(), 1);
        let fragment = library.fragment("G").unwrap();
        assert!(fragment.named_atom("C4").unwrap().position.x > 10.0);
    }

    #[test]
    fn equal_distortion_keeps_the_first_fragment() {
        let mut lines = residue_lines(1, "DG", 0.0, 0.0);
        lines.extend(residue_lines(2, "DG", 20.0, 0.0));
        let (_dir, path) = write_template(&lines);

        let library = FragmentLibrary::load(&path).unwrap();
        let fragment = library.fragment("G").unwrap();
        assert!(fragment.named_atom("C4").unwrap().position.x < 10.0);
    }

    #[test]
    fn empty_template_is_an_error() {
        let (_dir, path) = write_template(&[]);
        assert!(matches!(
            FragmentLibrary::load(&path),
            Err(TemplateError::Empty { .. })
        ));
    }

    #[test]
    fn unreadable_template_is_an_io_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("does_not_exist.pdb");
        assert!(matches!(
            FragmentLibrary::load(&path),
            Err(TemplateError::Io { .. })
        ));
    }

    #[test]
    fn malformed_coordinates_are_a_parse_error() {
        let mut lines = residue_lines(1, "DG", 0.0, 0.0);
        lines[0].replace_range(30..38, "  badnum");
        let (_dir, path) = write_template(&lines);
        assert!(matches!(
            FragmentLibrary::load(&path),
            Err(TemplateError::Parse { .. })
        ));
    }

    #[test]
    fn residue_without_ring_atoms_is_rejected() {
        let lines: Vec<String> = residue_lines(1, "DG", 0.0, 0.0)
            .into_iter()
            .filter(|l| !l.contains(" C5 "))
            .collect();
        let (_dir, path) = write_template(&lines);
        assert!(matches!(
            FragmentLibrary::load(&path),
            Err(TemplateError::MissingAtom { ref atom, .. }) if atom == "C5"
        ));
    }
}
