/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    let v = matrix * nalgebra::Vector4::new(point.x, point.y, point.z, 1.0);
    if (v.w - 1.0).abs() > TOLERANCE && v.w.abs() > TOLERANCE {
        return Point3::new(v.x / v.w, v.y / v.w, v.z / v.w);
    }
    Point3::new(v.x, v.y, v.z)
}

/// Returns the translation column of an affine matrix as a point.
#[must_use]
pub fn translation_of(matrix: &Matrix4) -> Point3 {
    Point3::new(matrix[(0, 3)], matrix[(1, 3)], matrix[(2, 3)])
}
