/// Camera setup and vertex projection to screen space
use nalgebra::Vector4;

use crate::canvas::Canvas;
use crate::transform::{Mat4, Transform};
use crate::vector::Vec3;

/// Below this `|w|` the perspective divide is skipped
const W_EPSILON: f32 = 1e-6;

/// Camera configuration for 3D rendering
///
/// Looks down -Z from `position` with a symmetric perspective frustum.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Vertical field of view in radians
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            fov: std::f32::consts::PI / 3.0, // 60 degrees
            aspect: width as f32 / height as f32,
            near: 0.1,
            far: 100.0,
        }
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Mat4 {
        Transform::translation(-self.position.x, -self.position.y, -self.position.z)
    }

    /// Create the projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        let top = self.near * (self.fov / 2.0).tan();
        let right = top * self.aspect;
        Transform::frustum_asymmetric(-right, right, -top, top, self.near, self.far)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(800, 600)
    }
}

/// Project an object-space vertex to `(screen_x, screen_y, ndc_z)`.
///
/// The vertex passes through `world`, `view` and `proj` in that order. NDC
/// x/y in [-1, 1] map onto `[0, width] x [0, height]` with Y pointing down.
/// Non-finite input is not guarded and comes out non-finite.
pub fn project_vertex(
    vertex: &Vec3,
    world: &Mat4,
    view: &Mat4,
    proj: &Mat4,
    width: usize,
    height: usize,
) -> Vec3 {
    let local: Vector4<f32> = vertex.push(1.0);
    let world_space = world * local;
    let view_space = view * world_space;
    let mut clip = proj * view_space;

    if clip.w.abs() > W_EPSILON {
        clip.x /= clip.w;
        clip.y /= clip.w;
        clip.z /= clip.w;
    }

    Vec3::new(
        (clip.x + 1.0) * 0.5 * width as f32,
        (1.0 - clip.y) * 0.5 * height as f32,
        clip.z,
    )
}

/// True when `(x, y)` lies inside the circle of radius `min(width, height) / 2`
/// centred on the canvas. Used instead of rectangular clipping.
pub fn clip_to_circular_viewport(canvas: &Canvas, x: f32, y: f32) -> bool {
    let center_x = canvas.width() as f32 / 2.0;
    let center_y = canvas.height() as f32 / 2.0;
    let radius = canvas.width().min(canvas.height()) as f32 / 2.0;

    let dx = x - center_x;
    let dy = y - center_y;
    dx * dx + dy * dy <= radius * radius
}
