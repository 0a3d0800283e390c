//! Vector operations glam does not provide in the form the tracer needs.

use crate::Vec3;

/// Components below this magnitude count as zero in [`VectorExt::near_zero`].
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Extra operations on [`Vec3`].
pub trait VectorExt {
    /// Dot product evaluated as `fma(x, x', fma(y, y', z * z'))`.
    ///
    /// The fixed evaluation order keeps results bit-identical across
    /// platforms regardless of how the compiler vectorises `dot`.
    fn dot_fma(self, rhs: Self) -> f64;

    /// True if every component is smaller than 1e-8 in magnitude.
    fn near_zero(self) -> bool;

    /// Divide by the length. Zero vectors produce NaN components, so callers
    /// must not pass them.
    fn unit_vector(self) -> Self;
}

impl VectorExt for Vec3 {
    #[inline]
    fn dot_fma(self, rhs: Self) -> f64 {
        self.x.mul_add(rhs.x, self.y.mul_add(rhs.y, self.z * rhs.z))
    }

    #[inline]
    fn near_zero(self) -> bool {
        self.x.abs() < NEAR_ZERO_EPSILON
            && self.y.abs() < NEAR_ZERO_EPSILON
            && self.z.abs() < NEAR_ZERO_EPSILON
    }

    #[inline]
    fn unit_vector(self) -> Self {
        self / self.length_squared().sqrt()
    }
}

/// Reflect a vector about a normal.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot_fma(n) * n
}

/// Refract a unit vector through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of the refractive index on the incident
/// side to the index on the transmitted side.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot_fma(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_fma_matches_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);
        assert_eq!(a.dot_fma(b), 12.0);
        assert!((a.dot_fma(b) - a.dot(b)).abs() < 1e-12);
    }

    #[test]
    fn test_cross() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);
    }

    #[test]
    fn test_near_zero() {
        assert!(Vec3::ZERO.near_zero());
        assert!(Vec3::new(1e-9, -1e-9, 0.0).near_zero());
        assert!(!Vec3::new(1e-9, 1e-7, 0.0).near_zero());
        assert!(!Vec3::new(0.0, 0.0, -1e-8).near_zero());
    }

    #[test]
    fn test_unit_vector() {
        let v = Vec3::new(3.0, 0.0, 4.0).unit_vector();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v - Vec3::new(0.6, 0.0, 0.8)).length() < 1e-12);
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        let reflected = reflect(v, Vec3::Y);
        assert_eq!(reflected, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_ratio_one_is_straight() {
        let uv = Vec3::new(1.0, -2.0, 0.5).unit_vector();
        let refracted = refract(uv, Vec3::Y, 1.0);
        assert!((refracted - uv).length() < 1e-12);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        // Entering a denser medium bends the ray towards -normal.
        let uv = Vec3::new(1.0, -1.0, 0.0).unit_vector();
        let refracted = refract(uv, Vec3::Y, 1.0 / 1.5);
        assert!((refracted.length() - 1.0).abs() < 1e-12);
        assert!(refracted.x < uv.x);
        assert!(refracted.y < 0.0);
    }
}
