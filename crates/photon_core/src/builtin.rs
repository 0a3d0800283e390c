//! Scenes that ship with the renderer.

use photon_math::sampling::{random_f64, random_range, random_vec, random_vec_range};
use photon_math::{Color, Point3, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::{SceneError, SceneResult};
use crate::scene::{CameraSettings, MaterialKind, SceneDescription};

/// Names accepted by [`builtin`].
pub const BUILTIN_SCENES: &[&str] = &["two-spheres", "materials", "book-cover"];

/// Look up a builtin scene by name.
pub fn builtin(name: &str) -> SceneResult<SceneDescription> {
    match name {
        "two-spheres" => Ok(two_spheres()),
        "materials" => Ok(materials()),
        "book-cover" => Ok(book_cover(0)),
        _ => Err(SceneError::UnknownBuiltin(name.to_string())),
    }
}

/// A gray sphere resting on a large gray ground sphere.
pub fn two_spheres() -> SceneDescription {
    SceneDescription::new("two spheres")
        .with_material("gray", MaterialKind::Lambertian { albedo: Color::splat(0.5) })
        .with_sphere(Point3::new(0.0, 0.0, -1.0), 0.5, "gray")
        .with_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "gray")
}

/// One sphere of each material, including a hollow glass shell.
pub fn materials() -> SceneDescription {
    let camera = CameraSettings {
        image_width: 800,
        samples_per_pixel: 100,
        max_depth: 50,
        vfov: 20.0,
        lookfrom: Point3::new(-2.0, 2.0, 1.0),
        lookat: Point3::new(0.0, 0.0, -1.0),
        vup: Vec3::Y,
        defocus_angle: 10.0,
        focus_dist: 3.4,
        ..Default::default()
    };

    SceneDescription::new("materials")
        .with_camera(camera)
        .with_material("ground", MaterialKind::Lambertian { albedo: Color::new(0.8, 0.8, 0.0) })
        .with_material("center", MaterialKind::Lambertian { albedo: Color::new(0.1, 0.2, 0.5) })
        .with_material("glass", MaterialKind::Dielectric { refraction_index: 1.5 })
        .with_material("bubble", MaterialKind::Dielectric { refraction_index: 1.0 / 1.5 })
        .with_material(
            "gold",
            MaterialKind::Metal { albedo: Color::new(0.8, 0.6, 0.2), fuzz: 1.0 },
        )
        .with_sphere(Point3::new(0.0, -100.5, -1.0), 100.0, "ground")
        .with_sphere(Point3::new(0.0, 0.0, -1.2), 0.5, "center")
        .with_sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, "glass")
        .with_sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, "bubble")
        .with_sphere(Point3::new(1.0, 0.0, -1.0), 0.5, "gold")
}

/// The random sphere field: a 22x22 grid of small spheres around three
/// large feature spheres. The layout is fully determined by `seed`.
pub fn book_cover(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);

    let camera = CameraSettings {
        image_width: 1200,
        samples_per_pixel: 50,
        max_depth: 50,
        vfov: 20.0,
        lookfrom: Point3::new(13.0, 2.0, 3.0),
        lookat: Point3::ZERO,
        vup: Vec3::Y,
        defocus_angle: 0.6,
        focus_dist: 10.0,
        ..Default::default()
    };

    let mut scene = SceneDescription::new("book cover")
        .with_camera(camera)
        .with_material("ground", MaterialKind::Lambertian { albedo: Color::splat(0.5) })
        .with_material("glass", MaterialKind::Dielectric { refraction_index: 1.5 })
        .with_sphere(Point3::new(0.0, -1000.0, 0.0), 1000.0, "ground");
    scene.seed = seed;

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(&mut rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(&mut rng),
                0.2,
                b as f64 + 0.9 * random_f64(&mut rng),
            );

            // Keep clear of the large metal sphere
            if (center - Point3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = random_vec(&mut rng) * random_vec(&mut rng);
                Some(MaterialKind::Lambertian { albedo })
            } else if choose_mat < 0.95 {
                let albedo = random_vec_range(&mut rng, 0.5, 1.0);
                let fuzz = random_range(&mut rng, 0.0, 0.5);
                Some(MaterialKind::Metal { albedo, fuzz })
            } else {
                None
            };

            let name = match material {
                Some(kind) => {
                    let name = format!("sphere_{}_{}", a, b);
                    scene = scene.with_material(name.clone(), kind);
                    name
                }
                // Glass spheres share one material
                None => "glass".to_string(),
            };
            scene = scene.with_sphere(center, 0.2, name);
        }
    }

    scene
        .with_material("brown", MaterialKind::Lambertian { albedo: Color::new(0.4, 0.2, 0.1) })
        .with_material(
            "mirror",
            MaterialKind::Metal { albedo: Color::new(0.7, 0.6, 0.5), fuzz: 0.0 },
        )
        .with_sphere(Point3::new(0.0, 1.0, 0.0), 1.0, "glass")
        .with_sphere(Point3::new(-4.0, 1.0, 0.0), 1.0, "brown")
        .with_sphere(Point3::new(4.0, 1.0, 0.0), 1.0, "mirror")
}
