//! Double-precision math primitives for the Photon ray tracer.
//!
//! Re-exports the `glam` f64 vector types under the names the renderer
//! uses (`Vec3`, `Point3`, `Color`) and adds the pieces glam does not
//! provide: FMA-ordered dot products, near-zero tests, reflection and
//! refraction, rays, intervals and random sampling helpers.

pub use glam::DVec3;

mod interval;
mod ray;
pub mod sampling;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract, VectorExt};

/// 3-component double-precision vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, components nominally in [0, 1].
pub type Color = DVec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(b / 2.0, Vec3::new(2.0, 2.5, 3.0));
    }

    #[test]
    fn test_divide_by_zero_is_infinite() {
        let v = Vec3::new(1.0, 2.0, 3.0) / 0.0;
        assert!(v.x.is_infinite() && v.y.is_infinite() && v.z.is_infinite());
    }
}
