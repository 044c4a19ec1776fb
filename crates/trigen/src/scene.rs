//! Scene assembly: count draw plus per-triangle sample → synthesize → place.

use crate::config::GroupConfig;
use crate::error::TrigenError;
use crate::geom::{compose_rigid, draw_rigid, place, RigidDraw, Triangle, ROTATION_STEPS};
use crate::sample::{base_triangle, RadiusSampler};
use nalgebra::Vector3;
use rand::Rng;
use std::ops::Range;

/// Ordered list of placed triangles.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub triangles: Vec<Triangle>,
}

impl Scene {
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }
}

/// Everything drawn for one accepted triangle; kept for property checks.
#[derive(Clone, Debug)]
pub struct TriangleDraw {
    pub radii: [f64; 3],
    pub base: Triangle,
    pub rigid: RigidDraw,
    pub placed: Triangle,
}

/// Statistical parameters of one group, validated.
#[derive(Clone, Debug)]
pub struct SceneParams {
    pub half: Vector3<f64>,
    pub count: Range<usize>,
    pub radius: RadiusSampler,
    pub digits: u32,
    pub max_attempts: u32,
}

impl SceneParams {
    pub fn from_group(group: &GroupConfig) -> Result<Self, TrigenError> {
        group.validate()?;
        Ok(Self {
            half: group.half.to_vector(),
            count: group.length.min..group.length.max,
            radius: RadiusSampler::new(group.mean, group.std)?,
            digits: group.round,
            max_attempts: group.max_attempts,
        })
    }
}

/// One triangle attempt; `DegenerateTriangle` if radii or the rounded result collapse.
pub fn try_draw_triangle<R: Rng>(
    rng: &mut R,
    params: &SceneParams,
) -> Result<TriangleDraw, TrigenError> {
    let radii = params.radius.sample_triple(rng);
    // Transform draws happen even when the radii are unusable, so the stream
    // position after an attempt does not depend on its outcome.
    let rigid = draw_rigid(rng, &params.half, ROTATION_STEPS);
    let base = base_triangle(radii)?;
    let placed = place(&base, &compose_rigid(&rigid), params.digits);
    if placed.is_degenerate() {
        return Err(TrigenError::degenerate(format!(
            "placed triangle collapses after rounding to {} digits (radii {radii:?})",
            params.digits
        )));
    }
    Ok(TriangleDraw {
        radii,
        base,
        rigid,
        placed,
    })
}

/// Draw a non-degenerate triangle, resampling up to `max_attempts` times.
pub fn draw_triangle<R: Rng>(
    rng: &mut R,
    params: &SceneParams,
) -> Result<TriangleDraw, TrigenError> {
    let attempts = params.max_attempts.max(1);
    let mut last = None;
    for attempt in 0..attempts {
        match try_draw_triangle(rng, params) {
            Ok(draw) => return Ok(draw),
            Err(err @ TrigenError::DegenerateTriangle { .. }) => {
                tracing::debug!(attempt, %err, "resampling degenerate triangle");
                last = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    let reason = last.map(|e| e.to_string()).unwrap_or_default();
    Err(TrigenError::degenerate(format!(
        "exceeded {attempts} attempts without a valid triangle ({reason})"
    )))
}

/// Draw the count from `[min, max)`, then that many triangles.
pub fn build_scene<R: Rng>(rng: &mut R, params: &SceneParams) -> Result<Scene, TrigenError> {
    if params.count.is_empty() {
        return Err(TrigenError::invalid(format!(
            "triangle count range {}..{} is empty",
            params.count.start, params.count.end
        )));
    }
    let n = rng.gen_range(params.count.clone());
    let mut triangles = Vec::with_capacity(n);
    for _ in 0..n {
        triangles.push(draw_triangle(rng, params)?.placed);
    }
    Ok(Scene { triangles })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnswerFormat, CountRange, GroupConfig, HalfExtents};
    use crate::geom::rounding_tolerance;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn group(min: usize, max: usize, mean: f64, std: f64, round: u32) -> GroupConfig {
        GroupConfig {
            half: HalfExtents {
                x: 10.0,
                y: 10.0,
                z: 10.0,
            },
            number: 1,
            length: CountRange { min, max },
            mean,
            std,
            round,
            test_fmt_string: "t{}.dat".into(),
            ans_fmt_string: "t{}.dat.ans".into(),
            ans_format: AnswerFormat::default(),
            max_attempts: 8,
        }
    }

    #[test]
    fn zero_std_gives_exact_radii() {
        let params = SceneParams::from_group(&group(1, 2, 5.0, 0.0, 2)).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let draw = draw_triangle(&mut rng, &params).unwrap();
        assert_eq!(draw.radii, [5.0, 5.0, 5.0]);
        // Per-coordinate bound 0.5·10^-d, scaled by √3 for a 3-D distance.
        let tol = rounding_tolerance(2) * 3f64.sqrt() + 1e-12;
        for v in draw.placed.vertices() {
            assert!(((v - draw.rigid.translation).norm() - 5.0).abs() <= tol);
        }
    }

    #[test]
    fn single_triangle_scene() {
        let params = SceneParams::from_group(&group(1, 2, 5.0, 0.0, 2)).unwrap();
        let scene = build_scene(&mut StdRng::seed_from_u64(2), &params).unwrap();
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn empty_count_range_is_rejected() {
        let err = SceneParams::from_group(&group(3, 3, 5.0, 1.0, 2)).unwrap_err();
        assert!(matches!(err, TrigenError::InvalidConfig { .. }));
    }

    #[test]
    fn collapsing_triangles_exhaust_attempts() {
        // Radii around 1e-3 vanish when rounded to integers.
        let params = SceneParams::from_group(&group(1, 2, 1e-3, 0.0, 0)).unwrap();
        let err = draw_triangle(&mut StdRng::seed_from_u64(4), &params).unwrap_err();
        assert!(matches!(err, TrigenError::DegenerateTriangle { .. }));
    }

    #[test]
    fn scenes_are_reproducible_per_seed() {
        let params = SceneParams::from_group(&group(2, 9, 3.0, 1.0, 4)).unwrap();
        let a = build_scene(&mut StdRng::seed_from_u64(77), &params).unwrap();
        let b = build_scene(&mut StdRng::seed_from_u64(77), &params).unwrap();
        let c = build_scene(&mut StdRng::seed_from_u64(78), &params).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn count_stays_in_half_open_range(seed in any::<u64>(), min in 0usize..6, span in 1usize..6) {
            let params = SceneParams::from_group(&group(min, min + span, 2.0, 0.5, 3)).unwrap();
            let scene = build_scene(&mut StdRng::seed_from_u64(seed), &params).unwrap();
            prop_assert!(scene.len() >= min && scene.len() < min + span);
            prop_assert!(scene.triangles.iter().all(|t| !t.is_degenerate()));
        }
    }
}
