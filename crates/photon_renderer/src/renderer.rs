//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing bounded by the camera's max depth
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization into an RGBA buffer

use std::path::Path;
use std::time::Instant;

use photon_math::{Color, Interval, Ray, VectorExt};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

use crate::bucket::{bucket_rng, generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::{Camera, Hittable};

/// Lower bound on hit distance, avoiding self-intersection ("shadow acne").
const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Linear color range mapped onto the byte range.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Render configuration not owned by the camera.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Seed for the random streams; equal seeds give identical images
    pub seed: u64,
    /// Bucket edge length in pixels for parallel rendering
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            bucket_size: DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Compute the color seen by a ray.
///
/// Each bounce multiplies by the material's attenuation. Rays that exhaust
/// `depth` or get absorbed contribute black; rays that escape see the sky.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    // Bounce budget exhausted, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, world, depth - 1, rng),
        None => Color::ZERO,
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().unit_vector();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-corrected 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let quantize = |c: f64| (256.0 * INTENSITY.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z), 255]
}

/// Write a pixel into a row-major RGBA buffer `width` pixels wide.
pub fn write_color(data: &mut [u8], i: u32, j: u32, width: u32, pixel_color: Color) {
    let offset = 4 * (j as usize * width as usize + i as usize);
    data[offset..offset + 4].copy_from_slice(&color_to_rgba(pixel_color));
}

/// Render a single pixel with multi-sampling, returning the averaged
/// linear color. The camera must be initialized.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    pixel_color * camera.pixel_samples_scale()
}

/// A finished RGBA8 image, row-major with the origin at the top left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    /// Exactly `width * height * 4` bytes
    pub data: Vec<u8>,
}

impl ImageBuffer {
    /// Create a new fully transparent black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Get the RGBA bytes of pixel (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let offset = 4 * (y as usize * self.width as usize + x as usize);
        [
            self.data[offset],
            self.data[offset + 1],
            self.data[offset + 2],
            self.data[offset + 3],
        ]
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Save as an 8-bit PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        image::save_buffer(
            path.as_ref(),
            &self.data,
            self.width,
            self.height,
            image::ColorType::Rgba8,
        )?;
        log::info!("Saved {}x{} image to {}", self.width, self.height, path.as_ref().display());
        Ok(())
    }
}

/// Render the entire scene on the calling thread.
///
/// Pixels are visited row by row from the top left, drawing from a single
/// generator seeded with `config.seed`.
pub fn render(camera: &mut Camera, world: &dyn Hittable, config: &RenderConfig) -> ImageBuffer {
    camera.initialize();
    let camera = &*camera;
    let (width, height) = (camera.image_width, camera.image_height());

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} (single thread)",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth
    );
    let start = Instant::now();

    let mut image = ImageBuffer::new(width, height);
    let mut rng = StdRng::seed_from_u64(config.seed);

    for j in 0..height {
        for i in 0..width {
            let color = render_pixel(camera, world, i, j, &mut rng);
            write_color(&mut image.data, i, j, width, color);
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}

/// Render the scene in buckets on the rayon thread pool.
///
/// Each bucket draws from its own generator derived from `config.seed` and
/// the bucket index, so the result does not depend on the thread count.
pub fn render_parallel(
    camera: &mut Camera,
    world: &dyn Hittable,
    config: &RenderConfig,
) -> ImageBuffer {
    camera.initialize();
    let camera = &*camera;
    let (width, height) = (camera.image_width, camera.image_height());
    let buckets = generate_buckets(width, height, config.bucket_size);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {} ({} buckets on {} threads)",
        width,
        height,
        camera.samples_per_pixel,
        camera.max_depth,
        buckets.len(),
        rayon::current_num_threads()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = bucket_rng(config.seed, bucket.index);
            BucketResult::new(*bucket, render_bucket(bucket, camera, world, &mut rng))
        })
        .collect();

    let mut image = ImageBuffer::new(width, height);
    for result in &results {
        let bucket = &result.bucket;
        for (n, color) in result.pixels.iter().enumerate() {
            let local_x = n as u32 % bucket.width;
            let local_y = n as u32 / bucket.width;
            write_color(&mut image.data, bucket.x + local_x, bucket.y + local_y, width, *color);
        }
    }

    log::info!("Rendered in {:.2?}", start.elapsed());
    image
}
