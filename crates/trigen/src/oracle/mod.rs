//! Oracle adapter: the intersection ground truth for a scene.
//!
//! Purpose
//! - Define the `Oracle` seam the generator depends on. The core never decides
//!   intersections itself; it hands the placed triangles to an oracle and
//!   serializes whatever verdict comes back.
//! - Provide the default parry-backed oracle (Qbvh broad phase + support-map
//!   narrow phase), an all-pairs cross-check, and a stub. Both phases come
//!   from parry; nothing here decides intersections on its own.
//!
//! Contract
//! - `evaluate` is a pure function of the triangles; no state survives between
//!   scenes.
//! - A `Verdict::Unknown` is not an answer: rendering it fails, so no test file
//!   is written without its answer.

mod narrow;

pub use narrow::{candidate_pairs, triangles_intersect, ParryOracle};

use crate::geom::Triangle;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The oracle produced no verdict for this scene.
    NoVerdict,
    /// The backing algorithm cannot handle the primitives.
    Unsupported { reason: String },
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVerdict => write!(f, "oracle returned no verdict"),
            Self::Unsupported { reason } => write!(f, "unsupported query: {reason}"),
        }
    }
}

impl std::error::Error for OracleError {}

/// Intersecting pairs of a scene, `(i, j)` with `i < j`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    pub triangle_count: usize,
    pub pairs: BTreeSet<(usize, usize)>,
}

impl Contacts {
    pub fn new(triangle_count: usize) -> Self {
        Self {
            triangle_count,
            pairs: BTreeSet::new(),
        }
    }

    /// Record a pair in canonical order; self-pairs are ignored.
    pub fn insert(&mut self, i: usize, j: usize) {
        if i != j {
            self.pairs.insert((i.min(j), i.max(j)));
        }
    }

    #[inline]
    pub fn any(&self) -> bool {
        !self.pairs.is_empty()
    }

    /// Ascending indices of triangles in at least one intersecting pair.
    pub fn colliding(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.pairs.iter().flat_map(|&(i, j)| [i, j]).collect();
        set.into_iter().collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Known(Contacts),
    Unknown,
}

impl Verdict {
    pub fn contacts(&self) -> Result<&Contacts, OracleError> {
        match self {
            Self::Known(c) => Ok(c),
            Self::Unknown => Err(OracleError::NoVerdict),
        }
    }
}

/// Intersection ground truth for a list of triangles.
pub trait Oracle {
    fn evaluate(&self, triangles: &[Triangle]) -> Result<Verdict, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn evaluate(&self, triangles: &[Triangle]) -> Result<Verdict, OracleError> {
        (**self).evaluate(triangles)
    }
}

/// Stub that never knows the answer.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnknownOracle;

impl Oracle for UnknownOracle {
    fn evaluate(&self, _triangles: &[Triangle]) -> Result<Verdict, OracleError> {
        Ok(Verdict::Unknown)
    }
}

/// All pairs, AABB rejection, then the parry narrow phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForceOracle;

impl Oracle for BruteForceOracle {
    fn evaluate(&self, triangles: &[Triangle]) -> Result<Verdict, OracleError> {
        let boxes: Vec<_> = triangles.iter().map(narrow::aabb).collect();
        let mut contacts = Contacts::new(triangles.len());
        for i in 0..triangles.len() {
            for j in (i + 1)..triangles.len() {
                if narrow::boxes_overlap(&boxes[i], &boxes[j])
                    && triangles_intersect(&triangles[i], &triangles[j])?
                {
                    contacts.insert(i, j);
                }
            }
        }
        Ok(Verdict::Known(contacts))
    }
}
