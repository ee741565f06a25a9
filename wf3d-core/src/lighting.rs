/// Per-edge Lambertian lighting
use log::debug;

use crate::geometry::Mesh;
use crate::vector::Vec3;

/// A directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub direction: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(direction: Vec3, intensity: f32) -> Self {
        Self {
            direction,
            intensity,
        }
    }
}

/// Cosine term between an edge direction and a light direction, clamped at 0.
///
/// Zero-length directions contribute nothing.
pub fn lambert_intensity(edge_dir: &Vec3, light_dir: &Vec3) -> f32 {
    match (edge_dir.try_normalize(f32::EPSILON), light_dir.try_normalize(f32::EPSILON)) {
        (Some(edge), Some(light)) => edge.dot(&light).max(0.0),
        _ => 0.0,
    }
}

/// Store a clamped `[0, 1]` intensity on every edge of `mesh`
pub fn apply_lighting(mesh: &mut Mesh, lights: &[Light]) {
    for edge in &mut mesh.edges {
        let direction = edge.direction();
        let total: f32 = lights
            .iter()
            .map(|light| lambert_intensity(&direction, &light.direction) * light.intensity)
            .sum();
        edge.intensity = Some(total.clamp(0.0, 1.0));
    }
    debug!("lit {} edges with {} lights", mesh.len(), lights.len());
}
