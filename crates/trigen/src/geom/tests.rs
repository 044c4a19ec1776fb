use super::*;
use crate::sample::base_triangle;
use nalgebra::{vector, Unit, Vector3};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use std::f64::consts::FRAC_PI_2;

#[test]
fn round_half_away_from_zero() {
    assert_eq!(round_to(0.125, 2), 0.13);
    assert_eq!(round_to(-0.125, 2), -0.13);
    assert_eq!(round_to(2.5, 0), 3.0);
    assert_eq!(round_to(-2.5, 0), -3.0);
}

#[test]
fn round_never_yields_negative_zero() {
    let r = round_to(-0.001, 2);
    assert_eq!(r, 0.0);
    assert!(r.is_sign_positive());
}

#[test]
fn collinear_and_coincident_are_degenerate() {
    let line = Triangle::new(
        vector![0.0, 0.0, 0.0],
        vector![1.0, 1.0, 1.0],
        vector![2.0, 2.0, 2.0],
    );
    assert!(line.is_degenerate());
    let point = Triangle::new(Vector3::zeros(), Vector3::zeros(), Vector3::zeros());
    assert!(point.is_degenerate());
    let ok = Triangle::new(
        vector![0.0, 0.0, 0.0],
        vector![1.0, 0.0, 0.0],
        vector![0.0, 1e-3, 0.0],
    );
    assert!(!ok.is_degenerate());
}

#[test]
fn composition_translates_then_rotates_in_local_frame() {
    // T · Rz(90°): (1,0,0) -> (0,1,0) + t
    let draw = RigidDraw {
        translation: vector![10.0, 0.0, 0.0],
        rotations: vec![(Unit::new_normalize(vector![0.0, 0.0, 2.0]), FRAC_PI_2)],
    };
    let iso = compose_rigid(&draw);
    let tri = Triangle::new(
        vector![1.0, 0.0, 0.0],
        vector![0.0, 1.0, 0.0],
        vector![0.0, 0.0, 1.0],
    );
    let placed = place(&tri, &iso, 9);
    assert!((placed.a - vector![10.0, 1.0, 0.0]).norm() < 1e-9);
    assert!((placed.b - vector![9.0, 0.0, 0.0]).norm() < 1e-9);
    assert!((placed.c - vector![10.0, 0.0, 1.0]).norm() < 1e-9);
}

#[test]
fn rotations_post_multiply_in_draw_order() {
    // Rx(90°) then Rz(90°): v -> Rx · Rz · v. (1,0,0) -Rz-> (0,1,0) -Rx-> (0,0,1).
    let draw = RigidDraw {
        translation: Vector3::zeros(),
        rotations: vec![
            (Vector3::x_axis(), FRAC_PI_2),
            (Vector3::z_axis(), FRAC_PI_2),
        ],
    };
    let iso = compose_rigid(&draw);
    let p = iso * nalgebra::Point3::new(1.0, 0.0, 0.0);
    assert!((p.coords - vector![0.0, 0.0, 1.0]).norm() < 1e-12);
}

#[test]
fn draw_respects_half_extents_and_step_count() {
    let mut rng = StdRng::seed_from_u64(5);
    let half = vector![1.0, 0.0, 3.0];
    for _ in 0..200 {
        let d = draw_rigid(&mut rng, &half, ROTATION_STEPS);
        assert_eq!(d.rotations.len(), ROTATION_STEPS);
        assert!(d.translation.x.abs() <= 1.0);
        assert_eq!(d.translation.y, 0.0);
        assert!(d.translation.z.abs() <= 3.0);
        for (axis, angle) in &d.rotations {
            assert!((axis.norm() - 1.0).abs() < 1e-12);
            assert!((0.0..std::f64::consts::TAU).contains(angle));
        }
    }
}

#[test]
fn same_seed_same_draw() {
    let half = vector![4.0, 4.0, 4.0];
    let a = draw_rigid(&mut StdRng::seed_from_u64(99), &half, 3);
    let b = draw_rigid(&mut StdRng::seed_from_u64(99), &half, 3);
    assert_eq!(a, b);
}

proptest! {
    #[test]
    fn placed_vertices_stay_at_radius_from_translation(
        seed in any::<u64>(),
        ra in 0.1f64..50.0,
        rb in 0.1f64..50.0,
        rc in 0.1f64..50.0,
        digits in 0u32..6,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let half = vector![100.0, 100.0, 100.0];
        let draw = draw_rigid(&mut rng, &half, ROTATION_STEPS);
        let iso = compose_rigid(&draw);
        let base = base_triangle([ra, rb, rc]).unwrap();
        let placed = place(&base, &iso, digits);
        // The per-coordinate rounding bound 0.5·10^-d becomes 0.5·10^-d·√3 for a
        // 3-D distance, since all three coordinates may move at once.
        let tol = rounding_tolerance(digits) * 3f64.sqrt() + 1e-9;
        for (v, r) in placed.vertices().iter().zip([ra, rb, rc]) {
            let d = (v - draw.translation).norm();
            prop_assert!((d - r).abs() <= tol, "dist {} vs radius {} (tol {})", d, r, tol);
        }
    }

    #[test]
    fn placement_preserves_edge_lengths(
        seed in any::<u64>(),
        ra in 0.1f64..50.0,
        rb in 0.1f64..50.0,
        rc in 0.1f64..50.0,
        digits in 0u32..6,
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let draw = draw_rigid(&mut rng, &vector![10.0, 20.0, 30.0], ROTATION_STEPS);
        let iso = compose_rigid(&draw);
        let base = base_triangle([ra, rb, rc]).unwrap();
        let placed = place(&base, &iso, digits);
        // Each endpoint may move by tol·√3.
        let tol = 2.0 * rounding_tolerance(digits) * 3f64.sqrt() + 1e-9;
        for (lb, lp) in base.edge_lengths().iter().zip(placed.edge_lengths()) {
            prop_assert!((lb - lp).abs() <= tol);
        }
    }
}
