//! parry-backed phases: Qbvh broad phase, support-map narrow phase.

use super::{Contacts, Oracle, OracleError, Verdict};
use crate::geom::Triangle;
use nalgebra::{Isometry3, Point3};
use parry3d_f64::bounding_volume::{Aabb, BoundingVolume};
use parry3d_f64::partitioning::Qbvh;
use parry3d_f64::query;
use parry3d_f64::shape;

pub(crate) fn to_parry(tri: &Triangle) -> shape::Triangle {
    shape::Triangle::new(
        Point3::from(tri.a),
        Point3::from(tri.b),
        Point3::from(tri.c),
    )
}

/// World-space AABB of a triangle.
pub(crate) fn aabb(tri: &Triangle) -> Aabb {
    to_parry(tri).local_aabb()
}

/// Closed-box overlap; touching boxes count.
#[inline]
pub(crate) fn boxes_overlap(lhs: &Aabb, rhs: &Aabb) -> bool {
    lhs.intersects(rhs)
}

/// Exact-ish intersection test for two world-space triangles (identity poses).
pub fn triangles_intersect(lhs: &Triangle, rhs: &Triangle) -> Result<bool, OracleError> {
    let id = Isometry3::identity();
    query::intersection_test(&id, &to_parry(lhs), &id, &to_parry(rhs)).map_err(|e| {
        OracleError::Unsupported {
            reason: format!("{e:?}"),
        }
    })
}

/// Candidate pairs `(i, j)`, `i < j`, whose AABBs overlap, found through a Qbvh.
pub fn candidate_pairs(triangles: &[Triangle]) -> Vec<(usize, usize)> {
    let boxes: Vec<Aabb> = triangles.iter().map(aabb).collect();
    let mut qbvh = Qbvh::new();
    qbvh.clear_and_rebuild(boxes.iter().copied().enumerate(), 0.0);
    let mut pairs = Vec::new();
    let mut hits: Vec<usize> = Vec::new();
    for (i, b) in boxes.iter().enumerate() {
        hits.clear();
        qbvh.intersect_aabb(b, &mut hits);
        pairs.extend(hits.iter().filter(|&&j| j > i).map(|&j| (i, j)));
    }
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}

/// Default oracle: parry Qbvh broad phase, parry narrow phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParryOracle;

impl Oracle for ParryOracle {
    fn evaluate(&self, triangles: &[Triangle]) -> Result<Verdict, OracleError> {
        let mut contacts = Contacts::new(triangles.len());
        for (i, j) in candidate_pairs(triangles) {
            if triangles_intersect(&triangles[i], &triangles[j])? {
                contacts.insert(i, j);
            }
        }
        Ok(Verdict::Known(contacts))
    }
}
