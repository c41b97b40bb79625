//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use glint_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
///
/// The material is shared: many spheres may point at the same instance.
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // A point has no surface to shade and no normal to divide out.
        if self.radius <= 0.0 {
            return false;
        }

        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(rec.t);
        let outward_normal = (rec.p - self.center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Absorber, Lambertian};
    use glint_math::{Color, Vec3};

    const EPSILON: f32 = 1e-5;

    fn unit_sphere_at(center: Vec3) -> Sphere {
        Sphere::new(center, 0.5, Arc::new(Lambertian::new(Color::splat(0.5))))
    }

    fn shading_interval() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, shading_interval(), &mut rec));
        assert!((rec.t - 0.5).abs() < EPSILON);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < EPSILON);
    }

    #[test]
    fn test_sphere_miss_pointing_away() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        for direction in [Vec3::Z, Vec3::Y, Vec3::new(1.0, 1.0, 0.5)] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert!(!sphere.hit(&ray, shading_interval(), &mut rec));
        }
        // Untouched on a miss
        assert_eq!(rec.t, 0.0);
        assert_eq!(rec.normal, Vec3::ZERO);
    }

    #[test]
    fn test_sphere_miss_behind_origin() {
        // Both roots are negative: the sphere sits behind the ray.
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, 3.0));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, shading_interval(), &mut rec));
    }

    #[test]
    fn test_normal_opposes_ray_through_center() {
        let center = Vec3::new(1.0, 2.0, -5.0);
        let sphere = Sphere::new(center, 1.5, Arc::new(Absorber));
        let direction = Vec3::new(1.0, 2.0, -5.0) - Vec3::new(-1.0, 0.5, 2.0);
        let ray = Ray::new(Vec3::new(-1.0, 0.5, 2.0), direction);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, shading_interval(), &mut rec));
        assert!(rec.front_face);
        let expected = -direction.normalize();
        assert!((rec.normal - expected).length() < 1e-4);
        assert!((rec.normal.length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_farther_root_when_nearer_outside_interval() {
        // Roots at t = 1 and t = 3; only the farther one is inside (1.5, inf).
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Arc::new(Absorber));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, Interval::new(1.5, f32::INFINITY), &mut rec));
        assert!((rec.t - 3.0).abs() < EPSILON);
        assert!(!rec.front_face);
        // Exiting the sphere, so the outward normal (+z) gets flipped.
        assert!((rec.normal - -Vec3::Z).length() < EPSILON);
    }

    #[test]
    fn test_no_root_in_interval() {
        let sphere = Sphere::new(Vec3::ZERO, 1.0, Arc::new(Absorber));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, Interval::new(1.2, 2.5), &mut rec));
    }

    #[test]
    fn test_camera_inside_sphere() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0, Arc::new(Absorber));
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, shading_interval(), &mut rec));
        assert!((rec.t - 2.0).abs() < EPSILON);
        assert!(!rec.front_face);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -3.0, Arc::new(Absorber));
        assert_eq!(sphere.radius(), 0.0);
        assert_eq!(sphere.center(), Vec3::ZERO);
    }

    #[test]
    fn test_zero_radius_never_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), -1.0, Arc::new(Absorber));
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, shading_interval(), &mut rec));
        assert!(!sphere.hit(&ray, Interval::UNIVERSE, &mut rec));
        assert!(!rec.normal.is_nan());
    }
}
