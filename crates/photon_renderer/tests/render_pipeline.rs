//! End-to-end rendering from scene descriptions to RGBA buffers.

use photon_core::{builtin, CameraSettings, SceneDescription};
use photon_renderer::{build_world, render, render_parallel, Camera, ImageBuffer, RenderConfig};

fn small_camera(settings: &CameraSettings, width: u32, spp: u32, depth: u32) -> Camera {
    Camera::from(settings)
        .with_resolution(width, settings.aspect_ratio)
        .with_quality(spp, depth)
}

fn blue_sum(image: &ImageBuffer, y: u32) -> u32 {
    (0..image.width).map(|x| image.pixel(x, y)[2] as u32).sum()
}

#[test]
fn two_spheres_single_bounce() {
    let world = build_world(&builtin::two_spheres()).unwrap();
    let mut camera = Camera::from(&builtin::two_spheres().camera)
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(1, 1);

    let image = render(&mut camera, &world, &RenderConfig::default());

    assert_eq!((image.width, image.height), (400, 225));
    assert_eq!(image.as_bytes().len(), 400 * 225 * 4);
    assert!(image.as_bytes().chunks(4).all(|px| px[3] == 255));

    // One bounce allowed: the sphere's scattered ray has no depth left
    assert_eq!(image.pixel(200, 112), [0, 0, 0, 255]);
    assert_ne!(image.pixel(200, 112), image.pixel(200, 0));

    // Sky at the top, ground at the bottom
    assert!(blue_sum(&image, 0) > blue_sum(&image, 224));
}

#[test]
fn sequential_render_is_deterministic() {
    let desc = builtin::materials();
    let world = build_world(&desc).unwrap();
    let config = RenderConfig::with_seed(17);

    let first = render(&mut small_camera(&desc.camera, 48, 4, 8), &world, &config);
    let second = render(&mut small_camera(&desc.camera, 48, 4, 8), &world, &config);
    assert_eq!(first, second);

    let other = render(
        &mut small_camera(&desc.camera, 48, 4, 8),
        &world,
        &RenderConfig::with_seed(18),
    );
    assert_ne!(first, other);
}

#[test]
fn parallel_render_ignores_thread_count() {
    let desc = builtin::materials();
    let world = build_world(&desc).unwrap();
    let config = RenderConfig {
        seed: 5,
        bucket_size: 16,
    };

    let pooled = render_parallel(&mut small_camera(&desc.camera, 60, 3, 8), &world, &config);
    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap()
        .install(|| render_parallel(&mut small_camera(&desc.camera, 60, 3, 8), &world, &config));

    assert_eq!(pooled.as_bytes().len(), 60 * 33 * 4);
    assert_eq!(pooled, single);
}

#[test]
fn render_from_json_scene() {
    let json = r#"{
        "name": "json spheres",
        "camera": { "image_width": 32, "aspect_ratio": 2.0, "samples_per_pixel": 2, "max_depth": 4 },
        "materials": [
            { "name": "ground", "type": "lambertian", "albedo": [0.8, 0.8, 0.0] },
            { "name": "mirror", "type": "metal", "albedo": [0.9, 0.9, 0.9], "fuzz": 0.0 },
            { "name": "glass", "type": "dielectric", "refraction_index": 1.5 }
        ],
        "spheres": [
            { "center": [0, -100.5, -1], "radius": 100, "material": "ground" },
            { "center": [-1, 0, -1], "radius": 0.5, "material": "mirror" },
            { "center": [1, 0, -1], "radius": 0.5, "material": "glass" }
        ],
        "seed": 3
    }"#;

    let desc = SceneDescription::from_json(json).unwrap();
    let mut world = build_world(&desc).unwrap();
    assert_eq!(world.objects.len(), 3);

    let config = world.render_config();
    let image = render_parallel(&mut world.camera, &world.objects, &config);
    assert_eq!((image.width, image.height), (32, 16));
    assert!(image.as_bytes().chunks(4).any(|px| px[..3] != [0, 0, 0]));
}

#[test]
fn book_cover_builds() {
    let desc = builtin::book_cover(11);
    let world = build_world(&desc).unwrap();
    assert_eq!(world.objects.len(), desc.spheres.len());
    assert!(world.objects.len() > 4);
}
