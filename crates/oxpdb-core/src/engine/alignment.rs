use crate::core::fragments::fragment::Fragment;
use crate::core::utils::geometry;
use nalgebra::Vector3;

/// Rotations whose angle has a sine at or below this are skipped outright.
const MIN_ROTATION_SINE: f64 = 1e-3;

/// Rotates `fragment` so its frame coincides with the target orientation.
///
/// Two single-axis rotations run in sequence: first the fragment's a3 axis is
/// brought onto `target_a3`, then the recomputed a1 axis onto `target_a1`.
/// Each rotation spins every atom about the fragment's center of mass around
/// the cross product of the two axes, and is skipped entirely when the angle
/// between them has a sine at or below 1e-3, leaving an already aligned
/// fragment bit-for-bit untouched. The sequential two-pass scheme is the
/// contract here; a joint least-squares fit would change the output.
pub(crate) fn align(fragment: &mut Fragment, target_a1: &Vector3<f64>, target_a3: &Vector3<f64>) {
    let a3 = fragment.frame.a3;
    rotate_axis_onto(fragment, &a3, target_a3);
    let a1 = fragment.frame.a1;
    rotate_axis_onto(fragment, &a1, target_a1);
}

fn rotate_axis_onto(fragment: &mut Fragment, current: &Vector3<f64>, target: &Vector3<f64>) {
    let theta = geometry::angle_between(current, target);
    if theta.sin() > MIN_ROTATION_SINE {
        let axis = current.cross(target);
        fragment.rotate(&geometry::rotation_about_axis(&axis, theta));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use nalgebra::Point3;

    // Hexagonal base ring in the z = 0 plane with N1 on +x, giving the
    // fragment a frame of exactly a1 = +x, a2 = +y, a3 = +z.
    fn setup_fragment() -> Fragment {
        let ring = [
            ("N1", 0.0_f64),
            ("C2", 60.0),
            ("N3", 120.0),
            ("C4", 180.0),
            ("C5", 240.0),
            ("C6", 300.0),
        ];
        let mut atoms = Vec::new();
        for (name, degrees) in ring {
            let rad = degrees.to_radians();
            atoms.push(Atom::new(
                name,
                "DG",
                Point3::new(1.2 * rad.cos(), 1.2 * rad.sin(), 0.0),
            ));
        }
        atoms.push(Atom::new("P", "DG", Point3::new(3.5, 1.5, 1.0)));
        atoms.push(Atom::new("O4'", "DG", Point3::new(0.0, 0.0, 1.5)));
        atoms.push(Atom::new("C1'", "DG", Point3::new(1.8, -1.2, 0.3)));
        atoms.push(Atom::new("O5'", "DG", Point3::new(2.5, 1.0, 0.5)));
        atoms.push(Atom::new("O3'", "DG", Point3::new(2.0, -2.0, 0.0)));
        Fragment::from_template_atoms("DG", atoms).unwrap()
    }

    fn positions(fragment: &Fragment) -> Vec<Point3<f64>> {
        fragment.atoms().map(|a| a.position).collect()
    }

    #[test]
    fn parallel_frames_leave_the_fragment_untouched() {
        let mut fragment = setup_fragment();
        let before = positions(&fragment);
        align(&mut fragment, &Vector3::x(), &Vector3::z());
        assert_eq!(positions(&fragment), before);
    }

    #[test]
    fn sub_threshold_angles_are_skipped() {
        let mut fragment = setup_fragment();
        let before = positions(&fragment);
        let nearly_z = Vector3::new((5e-4_f64).sin(), 0.0, (5e-4_f64).cos());
        align(&mut fragment, &Vector3::x(), &nearly_z);
        assert_eq!(positions(&fragment), before);
    }

    #[test]
    fn antiparallel_axes_are_skipped_too() {
        let mut fragment = setup_fragment();
        let before = positions(&fragment);
        align(&mut fragment, &-Vector3::x(), &Vector3::z());
        assert_eq!(positions(&fragment), before);
    }

    #[test]
    fn quarter_turn_about_z_aligns_a1() {
        let mut fragment = setup_fragment();
        let n1_before = fragment.named_atom("N1").unwrap().position;
        let c2_before = fragment.named_atom("C2").unwrap().position;

        align(&mut fragment, &Vector3::y(), &Vector3::z());

        assert!((fragment.frame.a1 - Vector3::y()).norm() < 1e-9);
        assert!((fragment.frame.a3 - Vector3::z()).norm() < 1e-9);

        // Relative geometry turns with the frame: v' = Rz(90) * v.
        let v = n1_before - c2_before;
        let expected = Vector3::new(-v.y, v.x, v.z);
        let rotated =
            fragment.named_atom("N1").unwrap().position - fragment.named_atom("C2").unwrap().position;
        assert!((rotated - expected).norm() < 1e-9);
    }

    #[test]
    fn both_passes_run_for_a_full_reorientation() {
        let mut fragment = setup_fragment();
        align(&mut fragment, &Vector3::y(), &Vector3::x());
        assert!((fragment.frame.a1 - Vector3::y()).norm() < 1e-9);
        assert!((fragment.frame.a3 - Vector3::x()).norm() < 1e-9);
    }

    #[test]
    fn alignment_preserves_internal_distances() {
        let mut fragment = setup_fragment();
        let before = positions(&fragment);
        align(
            &mut fragment,
            &Vector3::new(0.0, 0.6, 0.8),
            &Vector3::new(0.0, 0.8, -0.6),
        );
        let after = positions(&fragment);
        for i in 0..before.len() {
            for j in (i + 1)..before.len() {
                let d_before = (before[i] - before[j]).norm();
                let d_after = (after[i] - after[j]).norm();
                assert!((d_before - d_after).abs() < 1e-9);
            }
        }
    }
}
