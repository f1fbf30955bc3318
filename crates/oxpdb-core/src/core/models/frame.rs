use nalgebra::Vector3;

/// An orientation triple describing a monomer's or fragment's local axes.
///
/// The oxDNA convention stores two vectors per nucleotide: `a1` points from
/// the backbone site toward the base, and `a3` along the helical axis. The
/// third axis is derived as `a2 = a3 × a1`. Frames computed from atom
/// geometry are only approximately orthonormal and must be corrected before
/// rotation math runs on them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// The backbone-to-base axis.
    pub a1: Vector3<f64>,
    /// The derived third axis, `a3 × a1`.
    pub a2: Vector3<f64>,
    /// The helical axis.
    pub a3: Vector3<f64>,
}

impl Frame {
    /// Builds a frame from the two stored oxDNA vectors, deriving `a2`.
    ///
    /// # Arguments
    ///
    /// * `a1` - The backbone-to-base vector.
    /// * `a3` - The helical-axis vector.
    pub fn from_a1_a3(a1: Vector3<f64>, a3: Vector3<f64>) -> Self {
        Self {
            a1,
            a2: a3.cross(&a1),
            a3,
        }
    }

    /// Returns a Gram-Schmidt corrected copy of this frame.
    ///
    /// `a1` is normalized first; `a2` then has its component along the
    /// corrected `a1` removed; `a3` has its components along both corrected
    /// axes removed. Each vector is renormalized in turn, so the result is
    /// orthonormal up to floating-point rounding.
    pub fn orthonormalized(&self) -> Self {
        let a1 = self.a1.normalize();
        let a2 = (self.a2 - self.a2.dot(&a1) * a1).normalize();
        let a3 = (self.a3 - self.a3.dot(&a1) * a1 - self.a3.dot(&a2) * a2).normalize();
        Self { a1, a2, a3 }
    }

    /// Measures how far the frame is from orthogonal, as `|a1 · a3|`.
    ///
    /// Template residues sharing a base type are deduplicated by this metric,
    /// keeping the residue with the smaller value.
    pub fn distortion(&self) -> f64 {
        self.a1.dot(&self.a3).abs()
    }
}
