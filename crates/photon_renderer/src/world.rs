//! Turning a scene description into renderable objects.

use std::sync::Arc;

use photon_core::{MaterialKind, SceneDescription, SceneError, SceneResult};
use photon_math::{Interval, Ray};

use crate::{
    Camera, Dielectric, HitRecord, Hittable, HittableList, Lambertian, Material, Metal,
    RenderConfig, Sphere,
};

/// A scene ready for rendering.
pub struct World {
    pub name: String,
    pub objects: HittableList,
    pub camera: Camera,
    pub seed: u64,
}

impl World {
    /// Render configuration carrying this scene's seed.
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::with_seed(self.seed)
    }
}

impl Hittable for World {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.objects.hit(ray, ray_t)
    }
}

fn build_material(kind: &MaterialKind) -> Arc<dyn Material> {
    match *kind {
        MaterialKind::Lambertian { albedo } => Arc::new(Lambertian::new(albedo)),
        MaterialKind::Metal { albedo, fuzz } => Arc::new(Metal::new(albedo, fuzz)),
        MaterialKind::Dielectric { refraction_index } => Arc::new(Dielectric::new(refraction_index)),
    }
}

/// Validate a scene description and build its world.
///
/// Each material table entry is built once and shared by every sphere
/// that names it.
pub fn build_world(desc: &SceneDescription) -> SceneResult<World> {
    desc.validate()?;

    let materials: Vec<Arc<dyn Material>> =
        desc.materials.iter().map(|m| build_material(&m.kind)).collect();

    let mut objects = HittableList::new();
    for (index, sphere) in desc.spheres.iter().enumerate() {
        let material = desc
            .material_index(&sphere.material)
            .map(|i| materials[i].clone())
            .ok_or_else(|| SceneError::UnknownMaterial {
                index,
                name: sphere.material.clone(),
            })?;
        objects.push(Sphere::new(sphere.center, sphere.radius, material));
    }

    log::debug!(
        "Built world '{}': {} materials, {} spheres",
        desc.name,
        materials.len(),
        objects.len()
    );

    Ok(World {
        name: desc.name.clone(),
        objects,
        camera: Camera::from(&desc.camera),
        seed: desc.seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_core::builtin;
    use photon_math::{Color, Point3, Vec3};

    #[test]
    fn test_build_two_spheres() {
        let world = build_world(&builtin::two_spheres()).unwrap();
        assert_eq!(world.objects.len(), 2);
        assert_eq!(world.camera.image_width, 1280);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_material_rejected() {
        let desc = SceneDescription::new("broken")
            .with_material("red", MaterialKind::Lambertian { albedo: Color::X })
            .with_sphere(Point3::ZERO, 1.0, "blue");

        match build_world(&desc) {
            Err(SceneError::UnknownMaterial { index, name }) => {
                assert_eq!(index, 0);
                assert_eq!(name, "blue");
            }
            other => panic!("expected UnknownMaterial, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_spheres_share_table_materials() {
        let desc = SceneDescription::new("shared")
            .with_material("glass", MaterialKind::Dielectric { refraction_index: 1.5 })
            .with_sphere(Point3::new(-1.0, 0.0, -3.0), 0.5, "glass")
            .with_sphere(Point3::new(1.0, 0.0, -3.0), 0.5, "glass");
        let world = build_world(&desc).unwrap();

        let ray_t = Interval::new(0.001, f64::INFINITY);
        let left = world
            .hit(&Ray::new(Vec3::ZERO, Vec3::new(-1.0, 0.0, -3.0)), ray_t)
            .unwrap();
        let right = world
            .hit(&Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -3.0)), ray_t)
            .unwrap();

        assert!(std::ptr::addr_eq(left.material, right.material));
    }

    #[test]
    fn test_seed_carried_into_config() {
        let mut desc = builtin::two_spheres();
        desc.seed = 99;
        let world = build_world(&desc).unwrap();
        assert_eq!(world.render_config().seed, 99);
        assert_eq!(world.name, "two spheres");
    }
}
