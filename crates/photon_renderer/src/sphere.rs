//! Sphere primitive for ray tracing.

use std::sync::Arc;

use photon_math::{Interval, Point3, Ray, VectorExt};

use crate::hittable::{HitRecord, Hittable};
use crate::Material;

/// A sphere primitive sharing its material with other primitives.
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot_fma(oc);
        let c = oc.dot_fma(oc) - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        // A point sphere has no surface direction; it faces the ray.
        let outward_normal = if self.radius > 0.0 {
            (p - self.center) / self.radius
        } else {
            -ray.direction().unit_vector()
        };

        Some(HitRecord::new(ray, root, outward_normal, self.material.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use photon_math::{Color, Vec3};

    fn test_sphere(center: Point3, radius: f64) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Color::splat(0.5))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = test_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!(rec.front_face);
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_sphere_miss_pointing_away() {
        let sphere = test_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let interval = Interval::new(0.001, f64::INFINITY);

        for direction in [Vec3::Y, Vec3::Z, Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, 0.0, 0.2)] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert!(sphere.hit(&ray, interval).is_none(), "hit for {:?}", direction);
        }
    }

    #[test]
    fn test_analytic_hits_have_unit_outward_normals() {
        let center = Vec3::new(1.0, -2.0, -5.0);
        let radius = 2.0;
        let sphere = test_sphere(center, radius);

        // Aim at several points on the surface from outside
        let origin = Vec3::new(0.0, 0.0, 3.0);
        for target_dir in [Vec3::Z, Vec3::new(0.3, 0.2, 1.0), Vec3::new(-0.4, 0.5, 0.8)] {
            let target = center + radius * target_dir.normalize();
            let direction = (target - origin) * 0.5;
            let ray = Ray::new(origin, direction);

            let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
            // The aimed point is on the near side, reached at t = 2
            assert!((rec.t - 2.0).abs() < 1e-9, "t = {}", rec.t);
            assert!((rec.normal.length() - 1.0).abs() < 1e-9);
            assert!(rec.normal.dot(rec.p - center) > 0.0);
            assert!(rec.normal.dot(ray.direction()) < 0.0);
        }
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let sphere = test_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::X);
    }

    #[test]
    fn test_interval_rejects_both_roots() {
        let sphere = test_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, 0.4)).is_none());
        assert!(sphere.hit(&ray, Interval::new(1.6, 10.0)).is_none());

        // Only the far root lies in the interval
        let rec = sphere.hit(&ray, Interval::new(0.6, 10.0)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = test_sphere(Vec3::new(1.0, 2.0, 3.0), -3.0);
        assert_eq!(sphere.radius(), 0.0);
        assert_eq!(sphere.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_point_sphere() {
        let sphere = test_sphere(Vec3::new(0.0, 0.0, -2.0), 0.0);
        let interval = Interval::new(0.001, f64::INFINITY);

        // Exactly through the point
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = sphere.hit(&ray, interval).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!((rec.normal.length() - 1.0).abs() < 1e-12);

        // Any offset misses
        let ray = Ray::new(Vec3::new(1e-6, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.hit(&ray, interval).is_none());
    }
}
