//! Photon Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer in the "Ray Tracing in One Weekend" style:
//! spheres, three scattering materials, a thin-lens camera and a recursive
//! radiance estimate, quantized into an RGBA8 buffer.
//!
//! Rendering is deterministic for a given seed, both in the sequential
//! [`render`] and the bucketed [`render_parallel`].

mod bucket;
mod camera;
mod hittable;
mod material;
mod renderer;
mod sphere;
mod world;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use renderer::{
    color_to_rgba, linear_to_gamma, ray_color, render, render_parallel, render_pixel,
    write_color, ImageBuffer, RenderConfig,
};
pub use sphere::Sphere;
pub use world::{build_world, World};

/// Re-export the math types used throughout the public API
pub use photon_math::{Color, Interval, Point3, Ray, Vec3};
