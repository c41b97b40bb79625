//! Vector helpers shared by the camera, primitives and materials.
//!
//! glam already provides the arithmetic (componentwise ops, dot, cross,
//! length). What lives here is the handful of geometric operations a path
//! tracer needs that glam spells differently or not at all.

use crate::Vec3;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB color, one channel per component.
pub type Color = Vec3;

/// Components below this magnitude count as zero.
const NEAR_ZERO_EPSILON: f32 = 1e-8;

/// Scale `v` to length 1.
///
/// `v` must not be the zero vector; callers build directions and normals
/// from non-degenerate geometry.
#[inline]
pub fn unit_vector(v: Vec3) -> Vec3 {
    v / v.length()
}

/// True if every component of `v` is close to zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Mirror `v` about the surface normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Bend the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the surface.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_unit_vector_length() {
        let vectors = [
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.001, 0.002, 0.0005),
            Vec3::new(1e3, -2e3, 5e2),
            Vec3::new(0.0, 0.0, -7.0),
        ];
        for v in vectors {
            let u = unit_vector(v);
            assert!((u.length() - 1.0).abs() < EPSILON, "{v:?} -> {u:?}");
        }
    }

    #[test]
    fn test_unit_vector_idempotent() {
        let u = unit_vector(Vec3::new(1.0, 2.0, -2.0));
        let uu = unit_vector(u);
        assert!((u - uu).length() < EPSILON);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::ZERO));
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_same_medium_passes_straight() {
        let uv = unit_vector(Vec3::new(1.0, -1.0, 0.0));
        let refracted = refract(uv, Vec3::Y, 1.0);
        assert!((refracted - uv).length() < EPSILON);
    }
}
