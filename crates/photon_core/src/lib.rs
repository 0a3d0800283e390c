//! Photon Core - scene descriptions for the Photon ray tracer.
//!
//! This crate provides:
//!
//! - **Scene description types**: `SceneDescription`, `CameraSettings`,
//!   `MaterialDesc`, `SphereDesc`, serialisable to and from JSON
//! - **Validation**: reference and camera checks before anything is built
//! - **Builtin scenes**: the two-sphere reference scene, a material
//!   showcase and the random "book cover" field
//!
//! The renderer turns a validated description into intersectable objects;
//! this crate only deals with data.
//!
//! # Example
//!
//! ```ignore
//! use photon_core::load_scene;
//!
//! let scene = load_scene("scenes/two_spheres.json")?;
//! println!("{} spheres, {} materials", scene.spheres.len(), scene.materials.len());
//! ```

pub mod builtin;
mod error;
pub mod scene;

pub use builtin::{builtin, BUILTIN_SCENES};
pub use error::{SceneError, SceneResult};
pub use scene::{load_scene, CameraSettings, MaterialDesc, MaterialKind, SceneDescription, SphereDesc};
