//! Radius sampling and base-triangle synthesis.
//!
//! Model
//! - Radii are `|X|` with `X ~ N(mean, std)`. This folds the negative tail onto
//!   the positive axis (half-normal-like length model); it is not a truncated
//!   normal and its mean differs from `mean` when `std` is comparable to it.
//! - The base triangle puts vertex `k` at `r_k · d_k` for the unit directions
//!   `(1, 0, 0)`, `(−√3/2, 1/2, 0)`, `(−√3/2, −1/2, 0)` in the XY plane. These
//!   sit at 0°, 150° and 210°: equal radii give an isosceles triangle with
//!   `|BC| = r` and `|AB| = |CA| = r·√(2+√3)`. The directions are pairwise
//!   independent, so at most one zero radius still leaves a proper triangle.

use crate::error::TrigenError;
use crate::geom::Triangle;
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Normal};

const HALF_SQRT_3: f64 = 0.866_025_403_784_438_6;

/// Unit directions for vertices A, B, C.
pub const DIRECTIONS: [[f64; 3]; 3] = [
    [1.0, 0.0, 0.0],
    [-HALF_SQRT_3, 0.5, 0.0],
    [-HALF_SQRT_3, -0.5, 0.0],
];

/// Draws non-negative vertex radii.
#[derive(Clone, Copy, Debug)]
pub struct RadiusSampler {
    normal: Normal<f64>,
}

impl RadiusSampler {
    pub fn new(mean: f64, std: f64) -> Result<Self, TrigenError> {
        if !mean.is_finite() {
            return Err(TrigenError::invalid("radius mean must be finite"));
        }
        if !(std.is_finite() && std >= 0.0) {
            return Err(TrigenError::invalid(format!(
                "radius std must be finite and non-negative, got {std}"
            )));
        }
        let normal = Normal::new(mean, std)
            .map_err(|e| TrigenError::invalid(format!("radius distribution: {e}")))?;
        Ok(Self { normal })
    }

    #[inline]
    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        self.normal.sample(rng).abs()
    }

    /// Three independent radii in vertex order A, B, C.
    pub fn sample_triple<R: Rng>(&self, rng: &mut R) -> [f64; 3] {
        [self.sample(rng), self.sample(rng), self.sample(rng)]
    }
}

/// Build the canonical base triangle from radii `(r_a, r_b, r_c)`.
///
/// Fails when two or more radii are zero (vertices collapse onto the origin).
pub fn base_triangle(radii: [f64; 3]) -> Result<Triangle, TrigenError> {
    if radii.iter().any(|r| !r.is_finite() || *r < 0.0) {
        return Err(TrigenError::degenerate(format!(
            "radii must be finite and non-negative, got {radii:?}"
        )));
    }
    if radii.iter().filter(|r| **r == 0.0).count() >= 2 {
        return Err(TrigenError::degenerate(format!(
            "at least two zero radii in {radii:?}"
        )));
    }
    let vertex = |k: usize| Vector3::from(DIRECTIONS[k]) * radii[k];
    Ok(Triangle::new(vertex(0), vertex(1), vertex(2)))
}
