use nalgebra::{Point3, Vector3};
use std::f64::consts::PI;

/// The state of one monomer within a trajectory frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonomerState {
    /// The center-of-mass position in oxDNA length units.
    pub position: Point3<f64>,
    /// The backbone-to-base orientation vector.
    pub a1: Vector3<f64>,
    /// The helical-axis orientation vector.
    pub a3: Vector3<f64>,
}

/// One frame of an oxDNA trajectory.
///
/// Holds the simulation time, the periodic box, and the per-monomer state
/// rows in topology order. Positions stay in oxDNA length units until the
/// placement pipeline scales them to Angstroms.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    /// The simulation time of this frame.
    pub time: f64,
    /// The periodic box dimensions in oxDNA length units.
    pub box_size: Vector3<f64>,
    /// Per-monomer positions and orientation vectors, in topology order.
    pub monomers: Vec<MonomerState>,
}

impl Configuration {
    /// Wraps all positions into the periodic box and centers the structure.
    ///
    /// A structure diffusing under periodic boundaries may sit far outside the
    /// box, or straddle a face so that a naive modulus would split it. Each
    /// axis is therefore treated as an angle around the box to compute a
    /// circular-mean center of mass; the frame is shifted so that center sits
    /// at the box center, then every coordinate is folded into `[0, box)`.
    pub fn inbox_centered(&mut self) {
        if self.monomers.is_empty() {
            return;
        }
        let n = self.monomers.len() as f64;
        for axis in 0..3 {
            let length = self.box_size[axis];
            if length <= 0.0 {
                continue;
            }
            let scale = 2.0 * PI / length;
            let mut cos_sum = 0.0;
            let mut sin_sum = 0.0;
            for m in &self.monomers {
                let angle = m.position[axis] * scale;
                cos_sum += angle.cos();
                sin_sum += angle.sin();
            }
            let com = length / (2.0 * PI) * ((-sin_sum / n).atan2(-cos_sum / n) + PI);
            let shift = length / 2.0 - com;
            for m in &mut self.monomers {
                m.position[axis] = (m.position[axis] + shift).rem_euclid(length);
            }
        }
    }
}
