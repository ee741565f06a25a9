/// Vector helpers with spherical coordinates derived on demand
use nalgebra::Vector3;

pub type Vec3 = Vector3<f32>;

/// Below this `sin(theta)` slerp falls back to linear interpolation
const SLERP_EPSILON: f32 = 1e-4;

/// Spherical form of a vector.
///
/// `theta` is the azimuth measured in the XY plane from +X, `phi` is the
/// polar angle measured from +Z. Always computed from cartesian state, so it
/// cannot go stale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub theta: f32,
    pub phi: f32,
}

impl Spherical {
    pub fn new(radius: f32, theta: f32, phi: f32) -> Self {
        Self { radius, theta, phi }
    }

    pub fn from_cartesian(v: &Vec3) -> Self {
        let radius = v.norm();
        Self {
            radius,
            theta: v.y.atan2(v.x),
            // Offset keeps the zero vector at phi = acos(0)
            phi: (v.z / (radius + 1e-8)).acos(),
        }
    }

    pub fn to_cartesian(&self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.radius * sin_phi * cos_theta,
            self.radius * sin_phi * sin_theta,
            self.radius * cos_phi,
        )
    }
}

impl From<&Vec3> for Spherical {
    fn from(v: &Vec3) -> Self {
        Self::from_cartesian(v)
    }
}

/// Build a cartesian vector from radius, azimuth and polar angle
pub fn from_spherical(radius: f32, theta: f32, phi: f32) -> Vec3 {
    Spherical::new(radius, theta, phi).to_cartesian()
}

/// Spherical coordinates of `v`
pub fn spherical(v: &Vec3) -> Spherical {
    Spherical::from_cartesian(v)
}

/// Rescale to unit length. A zero vector yields non-finite components.
pub fn normalize(v: &Vec3) -> Vec3 {
    let inv_len = 1.0 / v.norm();
    v * inv_len
}

/// Spherical linear interpolation along the great-circle arc from `a` to `b`.
///
/// Near-parallel (or antiparallel) inputs use plain linear interpolation.
/// The result is always renormalized.
pub fn slerp(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
    let theta = a.dot(b).clamp(-1.0, 1.0).acos();
    let sin_theta = theta.sin();

    let result = if sin_theta < SLERP_EPSILON {
        a + (b - a) * t
    } else {
        let a_coeff = ((1.0 - t) * theta).sin() / sin_theta;
        let b_coeff = (t * theta).sin() / sin_theta;
        a * a_coeff + b * b_coeff
    };

    normalize(&result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

    #[test]
    fn test_from_spherical_round_trips_angles() {
        let v = from_spherical(5.0, FRAC_PI_4, FRAC_PI_6);
        let s = spherical(&v);
        assert_relative_eq!(s.radius, 5.0, epsilon = 1e-5);
        assert_relative_eq!(s.theta, FRAC_PI_4, epsilon = 1e-5);
        assert_relative_eq!(s.phi, FRAC_PI_6, epsilon = 1e-4);
    }

    #[test]
    fn test_from_spherical_axes() {
        let z = from_spherical(2.0, 0.0, 0.0);
        assert_relative_eq!(z, Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-6);

        let y = from_spherical(1.0, FRAC_PI_2, FRAC_PI_2);
        assert_relative_eq!(y, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_normalize_updates_spherical_view() {
        let v = from_spherical(5.0, FRAC_PI_4, FRAC_PI_6);
        let n = normalize(&v);
        assert_relative_eq!(n.norm(), 1.0, epsilon = 1e-6);

        let s = spherical(&n);
        assert_relative_eq!(s.radius, 1.0, epsilon = 1e-6);
        assert_relative_eq!(s.theta, FRAC_PI_4, epsilon = 1e-5);
        assert_relative_eq!(s.phi, FRAC_PI_6, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_vector_spherical() {
        let s = spherical(&Vec3::zeros());
        assert_eq!(s.radius, 0.0);
        assert_relative_eq!(s.phi, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_slerp_midpoint_on_arc() {
        let a = Vec3::x();
        let b = Vec3::y();
        let mid = slerp(&a, &b, 0.5);
        let h = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(mid, Vec3::new(h, h, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_endpoints() {
        let a = Vec3::x();
        let b = Vec3::z();
        assert_relative_eq!(slerp(&a, &b, 0.0), a, epsilon = 1e-5);
        assert_relative_eq!(slerp(&a, &b, 1.0), b, epsilon = 1e-5);
    }

    #[test]
    fn test_slerp_parallel_falls_back_to_lerp() {
        let a = Vec3::new(0.0, 0.0, 1.0);
        let b = Vec3::new(0.0, 0.0, 1.0);
        let r = slerp(&a, &b, 0.3);
        assert!(r.iter().all(|c| c.is_finite()));
        assert_relative_eq!(r, a, epsilon = 1e-6);
    }
}
