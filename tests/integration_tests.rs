// tests/integration_tests.rs
//! Integration tests for the public transform API

use approx::assert_abs_diff_eq;
use css3d_math::{Matrix4, Quaternion, ValidationConfig, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

const EPS: f64 = 1e-12;

/// A handful of matrices of every kind, including non-invertible ones.
fn assorted_matrices() -> Vec<Matrix4> {
    vec![
        Matrix4::identity(),
        Matrix4::new(core::array::from_fn(|i| (i as f64 - 7.5) * 0.37)),
        Matrix4::rotation_x(0.3) * Matrix4::translation(-4.0, 2.0, 9.0),
        Matrix4::scale(2.0, -3.0, 0.5),
        Matrix4::projection(75.0, 1920.0, 1080.0, 0.1, 1000.0),
        Matrix4::look_at(Vector3::new(1.0, 2.0, 3.0), Vector3::zero(), Vector3::new(0.0, 1.0, 0.0)),
    ]
}

fn rigid_matrices() -> Vec<Matrix4> {
    let axis = Vector3::new(1.0, -2.0, 0.5).normalize();
    vec![
        Matrix4::rotation_x(0.9),
        Matrix4::translation(3.0, -1.0, 2.0) * Matrix4::rotation_y(-1.3),
        Matrix4::rotation_z(2.2) * Matrix4::translation(0.5, 0.5, -8.0) * Matrix4::rotation_x(0.1),
        Matrix4::rotation_axis(axis, 4.0) * Matrix4::translation(1.0, 1.0, 1.0),
    ]
}

#[test]
fn test_identity_is_neutral_for_multiply() {
    for m in assorted_matrices() {
        assert_eq!(Matrix4::identity() * m, m);
        assert_eq!(m * Matrix4::identity(), m);
    }
}

#[test]
fn test_multiply_is_associative() {
    let [a, b, c]: [Matrix4; 3] = [
        Matrix4::rotation_x(0.4),
        Matrix4::translation(1.0, 2.0, 3.0),
        Matrix4::scale(2.0, 1.0, 0.5),
    ];
    assert_abs_diff_eq!((a * b) * c, a * (b * c), epsilon = EPS);
}

#[test]
fn test_transpose_twice_is_identity_operation() {
    for m in assorted_matrices() {
        assert_eq!(m.transpose().transpose(), m);
    }
}

#[test]
fn test_fast_inverse_of_rigid_compositions() {
    for m in rigid_matrices() {
        assert_abs_diff_eq!(m * m.fast_inverse(), Matrix4::identity(), epsilon = 1e-9);
        assert!(m.is_rigid(&ValidationConfig::default()));
    }
}

#[test]
fn test_rotation_z_zero_is_identity() {
    assert_eq!(Matrix4::rotation_z(0.0), Matrix4::identity());
}

#[test]
fn test_rotation_x_pi_flips_y() {
    let flipped = Matrix4::rotation_x(PI).transform_direction(Vector3::new(0.0, 1.0, 0.0));
    assert_abs_diff_eq!(flipped, Vector3::new(0.0, -1.0, 0.0), epsilon = EPS);
}

#[test]
fn test_scale_leaves_translation_untouched() {
    let t = Matrix4::translation(5.0, 6.0, 7.0);
    let m = Matrix4::scale(2.0, 3.0, 4.0) * t;
    let expected = [
        2.0, 0.0, 0.0, 10.0,
        0.0, 3.0, 0.0, 18.0,
        0.0, 0.0, 4.0, 28.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    // scale applied first keeps the translation column as is
    let n = t * Matrix4::scale(2.0, 3.0, 4.0);
    for i in 0..16 {
        assert_eq!(m[i], expected[i], "element {i}");
    }
    assert_eq!((n[3], n[7], n[11]), (5.0, 6.0, 7.0));
    assert_eq!((n[0], n[5], n[10]), (2.0, 3.0, 4.0));
}

#[test]
fn test_look_at_camera_looks_down_negative_z() {
    let m = Matrix4::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));
    assert_abs_diff_eq!(m.forward(), Vector3::new(0.0, 0.0, -1.0), epsilon = EPS);
    assert_abs_diff_eq!(m.back(), Vector3::new(0.0, 0.0, 1.0), epsilon = EPS);
    // the recomputed up is cross(forward axis, right axis), so the
    // extracted (negated) column comes back as the world up
    assert_abs_diff_eq!(m.up(), Vector3::new(0.0, 1.0, 0.0), epsilon = EPS);
    assert_abs_diff_eq!(m.right(), Vector3::new(-1.0, 0.0, 0.0), epsilon = EPS);
    assert!(m.is_rotation(&ValidationConfig::default()));
}

#[test]
fn test_identity_to_string() {
    let expected = "1.00,\t0.00,\t0.00,\t0.00,\n\
                    0.00,\t1.00,\t0.00,\t0.00,\n\
                    0.00,\t0.00,\t1.00,\t0.00,\n\
                    0.00,\t0.00,\t0.00,\t1.00";
    let text = Matrix4::<f64>::identity().to_string();
    assert_eq!(text, expected);
    assert_eq!(text.lines().count(), 4);
}

#[test]
fn test_look_at_to_string_has_no_negative_zero() {
    let m = Matrix4::look_at(Vector3::new(0.0, 0.0, 5.0), Vector3::zero(), Vector3::new(0.0, 1.0, 0.0));
    assert!(!m.to_string().contains("-0.00"));
}

#[test]
fn test_to_axis_angle_rotation_x_quarter_turn() {
    let result = Matrix4::rotation_x(FRAC_PI_2).to_axis_angle();
    assert_abs_diff_eq!(result.axis, Vector3::new(1.0, 0.0, 0.0), epsilon = EPS);
    assert_abs_diff_eq!(result.angle, FRAC_PI_2, epsilon = EPS);
}

#[test]
fn test_to_axis_angle_round_trips_through_rotation_axis() {
    let axis = Vector3::new(-0.3, 0.4, 0.2).normalize();
    for angle in [0.2, 1.0, 2.5, 3.0] {
        let result = Matrix4::rotation_axis(axis, angle).to_axis_angle();
        assert_abs_diff_eq!(result.axis, axis, epsilon = 1e-9);
        assert_abs_diff_eq!(result.angle, angle, epsilon = 1e-9);
    }
}

#[test]
fn test_to_axis_angle_small_rotation_rebuilds_input() {
    let m: Matrix4 = Matrix4::rotation_y(0.0015);
    let result = m.to_axis_angle();
    assert_abs_diff_eq!(result.axis, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-9);
    assert_abs_diff_eq!(result.angle, 0.0015, epsilon = 1e-12);
    assert_abs_diff_eq!(Matrix4::rotation_axis(result.axis, result.angle), m, epsilon = 1e-12);
}

#[test]
fn test_rotation_axis_x_matches_rotation_x() {
    let mut angle = -2.0 * PI;
    while angle <= 2.0 * PI {
        assert_abs_diff_eq!(
            Matrix4::rotation_axis(Vector3::new(1.0, 0.0, 0.0), angle),
            Matrix4::rotation_x(angle),
            epsilon = EPS
        );
        angle += 0.25;
    }
}

#[test]
fn test_quaternion_and_matrix_agree() {
    let axis = Vector3::new(0.0, 0.6, -0.8);
    let q = Quaternion::from_axis_angle(axis, 1.7);
    assert_abs_diff_eq!(q.to_matrix4(), Matrix4::rotation_axis(axis, 1.7), epsilon = EPS);
    assert_abs_diff_eq!(Quaternion::from_matrix4(&q.to_matrix4()), q, epsilon = 1e-9);
}

#[test]
fn test_projection_maps_view_space_into_clip_cube() {
    let p = Matrix4::projection(60.0, 800.0, 600.0, 1.0, 50.0);
    let near_center = p.transform_point(Vector3::new(0.0, 0.0, -1.0));
    let far_center = p.transform_point(Vector3::new(0.0, 0.0, -50.0));
    assert_abs_diff_eq!(near_center.z, -1.0, epsilon = EPS);
    assert_abs_diff_eq!(far_center.z, 1.0, epsilon = 1e-9);

    // top edge of the near plane sits at tan(30°)
    let top = p.transform_point(Vector3::new(0.0, (30.0_f64).to_radians().tan(), -1.0));
    assert_abs_diff_eq!(top.y, 1.0, epsilon = 1e-9);
}

#[test]
fn test_unchecked_degeneration_patterns() {
    // zero-length direction: NaN, not a panic
    let m = Matrix4::look_at(Vector3::one(), Vector3::one(), Vector3::new(0.0, 1.0, 0.0));
    assert!(m.first_non_finite().is_some());

    // depth extent zero: division by zero gives infinities
    let f: Matrix4 = Matrix4::frustum(-1.0, 1.0, -1.0, 1.0, 2.0, 2.0);
    assert!(f[10].is_infinite() || f[10].is_nan());
    assert!(f[11].is_infinite());

    // non-rigid input: a finite but wrong inverse
    let s = Matrix4::scale(3.0, 1.0, 1.0);
    assert!(s.fast_inverse().first_non_finite().is_none());
    assert_ne!(s * s.fast_inverse(), Matrix4::identity());
}

#[test]
fn test_operations_leave_inputs_untouched() {
    let m = Matrix4::translation(1.0, 2.0, 3.0) * Matrix4::rotation_z(0.5);
    let copy = m;
    let _ = m.transpose();
    let _ = m.fast_inverse();
    let _ = m * m;
    assert_eq!(m, copy);
}
