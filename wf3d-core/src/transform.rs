/// 4x4 transformation matrices and rotation state
///
/// Matrices are nalgebra `Matrix4<f32>`, stored column-major: the element at
/// column `c`, row `r` lives at `as_slice()[c * 4 + r]`.
use nalgebra::{Matrix4, Vector3, Vector4};

use crate::vector::Vec3;

pub type Mat4 = Matrix4<f32>;

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn from_vector(v: &Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    pub fn matrix(&self) -> Mat4 {
        Transform::rotation_xyz(self.x, self.y, self.z)
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Transform builder for 3D transformations
pub struct Transform;

impl Transform {
    pub fn identity() -> Mat4 {
        Matrix4::identity()
    }

    /// Translation lives in the last column (`m[12]`, `m[13]`, `m[14]`)
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Mat4 {
        Matrix4::new_translation(&Vector3::new(tx, ty, tz))
    }

    pub fn scale(sx: f32, sy: f32, sz: f32) -> Mat4 {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Elementary rotation about the X axis.
    ///
    /// The three elementary rotations are written column by column, which
    /// makes a positive angle turn clockwise when looking down the axis
    /// towards the origin.
    #[rustfmt::skip]
    pub fn rotation_x(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_column_slice(&[
            1.0, 0.0, 0.0, 0.0,
            0.0, c, -s, 0.0,
            0.0, s, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_column_slice(&[
            c, 0.0, s, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -s, 0.0, c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    #[rustfmt::skip]
    pub fn rotation_z(angle: f32) -> Mat4 {
        let (s, c) = angle.sin_cos();
        Mat4::from_column_slice(&[
            c, -s, 0.0, 0.0,
            s, c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Combined rotation `(Rx * Ry) * Rz`.
    ///
    /// Applied to a column vector this rotates about Z first, then Y, then X.
    /// The order is fixed; reversing it gives a different rotation.
    pub fn rotation_xyz(rx: f32, ry: f32, rz: f32) -> Mat4 {
        let xy = Self::multiply(&Self::rotation_x(rx), &Self::rotation_y(ry));
        Self::multiply(&xy, &Self::rotation_z(rz))
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Mat4 {
        rotation.matrix()
    }

    /// Off-center perspective projection (OpenGL `glFrustum` layout)
    pub fn frustum_asymmetric(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Mat4 {
        let mut m = Matrix4::zeros();
        let data = m.as_mut_slice();
        data[0] = (2.0 * n) / (r - l);
        data[5] = (2.0 * n) / (t - b);
        data[8] = (r + l) / (r - l);
        data[9] = (t + b) / (t - b);
        data[10] = -(f + n) / (f - n);
        data[11] = -1.0;
        data[14] = -(2.0 * f * n) / (f - n);
        data[15] = 0.0;
        m
    }

    /// `result[c, r] = sum_k a[r, k] * b[k, c]`: applies `b` first, then `a`
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        a * b
    }

    /// Lift a point to `(x, y, z, 1)` and transform it
    pub fn transform_point(m: &Mat4, point: &Vec3) -> Vector4<f32> {
        m * point.push(1.0)
    }

    /// Create a model-view-projection matrix
    pub fn mvp_matrix(model: &Mat4, view: &Mat4, projection: &Mat4) -> Mat4 {
        Self::multiply(projection, &Self::multiply(view, model))
    }
}
