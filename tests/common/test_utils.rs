use cgmath::{InnerSpace, Matrix4, SquareMatrix, Vector3};

pub(crate) const EPSILON: f32 = 1e-5;

pub(crate) fn assert_near(actual: f32, expected: f32, tolerance: f32) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}

pub(crate) fn assert_vec3_near(actual: Vector3<f32>, expected: Vector3<f32>, tolerance: f32) {
    assert!(
        (actual - expected).magnitude() <= tolerance,
        "expected {expected:?} ± {tolerance}, got {actual:?}"
    );
}

pub(crate) fn is_identity(m: Matrix4<f32>) -> bool {
    m == Matrix4::identity()
}

/// Normal of the triangle `a b c`; it points to the side from which the
/// corners appear counter-clockwise.
pub(crate) fn triangle_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> Vector3<f32> {
    let (a, b, c): (Vector3<f32>, Vector3<f32>, Vector3<f32>) = (a.into(), b.into(), c.into());
    (b - a).cross(c - a)
}

/// A handful of translations and (positive) half extents to run geometric
/// checks against.
pub(crate) fn sample_transforms() -> Vec<(Vector3<f32>, Vector3<f32>)> {
    vec![
        (Vector3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 1.0, 1.0)),
        (Vector3::new(-5.0, 6.0, -12.0), Vector3::new(1.5, 6.0, 1.5)),
        (Vector3::new(4.75, 2.5, 0.25), Vector3::new(3.25, 2.5, 0.5)),
        (Vector3::new(100.0, -3.0, 7.5), Vector3::new(0.1, 20.0, 0.25)),
    ]
}
