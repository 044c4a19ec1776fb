//! Triangle geometry in R³ (plain value types, no topology).
//!
//! Purpose
//! - Hold the `Triangle` value type shared by the synthesizer, the transform
//!   composer, the serializer and the oracle adapter.
//! - Keep numeric conventions in one place: rounding mode and the degeneracy
//!   threshold used after rounding.
//!
//! Conventions
//! - Points are `nalgebra::Vector3<f64>`; vertex order `(a, b, c)` is preserved
//!   end to end and is the order used on the wire.
//! - Rounding is half-away-from-zero; `-0.0` is normalized to `+0.0`.
//! - A triangle is degenerate when `|(b−a)×(c−a)| <= DEGENERATE_REL · max_edge²`.

pub mod transform;

pub use transform::{compose_rigid, draw_rigid, place, RigidDraw, ROTATION_STEPS};

use nalgebra::Vector3;

/// Relative area threshold below which a triangle counts as collinear/coincident.
pub const DEGENERATE_REL: f64 = 1e-12;

/// Ordered triple of vertices.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub a: Vector3<f64>,
    pub b: Vector3<f64>,
    pub c: Vector3<f64>,
}

impl Triangle {
    #[inline]
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [Vector3<f64>; 3] {
        [self.a, self.b, self.c]
    }

    /// Edge lengths `(|ab|, |bc|, |ca|)`.
    pub fn edge_lengths(&self) -> [f64; 3] {
        [
            (self.b - self.a).norm(),
            (self.c - self.b).norm(),
            (self.a - self.c).norm(),
        ]
    }

    /// Twice the area, i.e. `|(b−a)×(c−a)|`.
    #[inline]
    pub fn doubled_area(&self) -> f64 {
        (self.b - self.a).cross(&(self.c - self.a)).norm()
    }

    /// Collinear or coincident vertices (scale-relative).
    pub fn is_degenerate(&self) -> bool {
        let [ab, bc, ca] = self.edge_lengths();
        let longest = ab.max(bc).max(ca);
        if !longest.is_finite() || longest == 0.0 {
            return true;
        }
        self.doubled_area() <= DEGENERATE_REL * longest * longest
    }

    /// Apply `f` to every vertex, preserving order.
    pub fn map(&self, mut f: impl FnMut(Vector3<f64>) -> Vector3<f64>) -> Self {
        Self::new(f(self.a), f(self.b), f(self.c))
    }

    /// Round every coordinate to `digits` decimals.
    pub fn rounded(&self, digits: u32) -> Self {
        self.map(|v| v.map(|x| round_to(x, digits)))
    }
}

/// Round half-away-from-zero to `digits` decimals; never returns `-0.0`.
pub fn round_to(x: f64, digits: u32) -> f64 {
    let scale = 10f64.powi(digits as i32);
    let r = (x * scale).round() / scale;
    // -0.0 + 0.0 == +0.0
    r + 0.0
}

/// Per-coordinate error bound introduced by `round_to(_, digits)`.
#[inline]
pub fn rounding_tolerance(digits: u32) -> f64 {
    0.5 * 10f64.powi(-(digits as i32))
}

#[cfg(test)]
mod tests;
