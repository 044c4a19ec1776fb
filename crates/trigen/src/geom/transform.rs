//! Rigid placement of base triangles inside a half-extents box.
//!
//! Draw order (fixed; downstream reproducibility depends on it):
//! 1. translation `t`, each component uniform in `[-h_i, h_i]`;
//! 2. `ROTATION_STEPS` times: axis with components uniform in `[-1, 1]`, then
//!    angle uniform in `[0, 2π)`.
//!
//! Composition is `T · R1 · R2 · R3` (each rotation post-multiplied onto the
//! accumulated transform), so a vertex maps to `R1 R2 R3 v + t`.

use super::Triangle;
use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};
use rand::Rng;
use std::f64::consts::TAU;

/// Number of random-axis rotations composed per triangle.
pub const ROTATION_STEPS: usize = 3;

/// Axes shorter than this are redrawn instead of normalized.
const AXIS_EPS: f64 = 1e-12;

/// Raw random draws behind one rigid transform.
#[derive(Clone, Debug, PartialEq)]
pub struct RigidDraw {
    pub translation: Vector3<f64>,
    /// `(unit axis, angle)` in application order.
    pub rotations: Vec<(Unit<Vector3<f64>>, f64)>,
}

/// Draw a translation inside `half` plus `steps` random-axis rotations.
pub fn draw_rigid<R: Rng>(rng: &mut R, half: &Vector3<f64>, steps: usize) -> RigidDraw {
    let translation = Vector3::new(
        rng.gen_range(-half.x..=half.x),
        rng.gen_range(-half.y..=half.y),
        rng.gen_range(-half.z..=half.z),
    );
    let rotations = (0..steps)
        .map(|_| {
            let axis = draw_axis(rng);
            let angle = rng.gen_range(0.0..TAU);
            (axis, angle)
        })
        .collect();
    RigidDraw {
        translation,
        rotations,
    }
}

fn draw_axis<R: Rng>(rng: &mut R) -> Unit<Vector3<f64>> {
    loop {
        let raw = Vector3::new(
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
            rng.gen_range(-1.0..=1.0),
        );
        if let Some(axis) = Unit::try_new(raw, AXIS_EPS) {
            return axis;
        }
    }
}

/// Identity, then translate, then post-multiply each rotation in order.
pub fn compose_rigid(draw: &RigidDraw) -> Isometry3<f64> {
    let mut iso = Isometry3::identity();
    iso *= Translation3::from(draw.translation);
    for (axis, angle) in &draw.rotations {
        iso *= UnitQuaternion::from_axis_angle(axis, *angle);
    }
    iso
}

/// Apply `iso` to each vertex, then round to `digits` decimals.
pub fn place(base: &Triangle, iso: &Isometry3<f64>, digits: u32) -> Triangle {
    base.map(|v| iso.transform_point(&Point3::from(v)).coords)
        .rounded(digits)
}
