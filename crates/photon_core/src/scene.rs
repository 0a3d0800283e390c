//! Scene description types.
//!
//! A scene is a table of named materials, a list of spheres referencing
//! those materials by name, and the camera settings to render it with.
//! Materials live in a table so that every sphere naming the same entry
//! ends up sharing one material instance when the scene is built.

use std::collections::HashSet;
use std::path::Path;

use photon_math::{Color, Point3, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};

/// Camera configuration as stored in a scene file.
///
/// Every field is optional in JSON and falls back to the default camera.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Number of random samples per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    pub lookfrom: Point3,
    pub lookat: Point3,
    pub vup: Vec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from the camera to the plane of perfect focus
    pub focus_dist: f64,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 1280,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::ZERO,
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraSettings {
    /// Image height derived from width and aspect ratio, never below 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    fn validate(&self) -> SceneResult<()> {
        let scalars = [
            ("camera.aspect_ratio", self.aspect_ratio),
            ("camera.vfov", self.vfov),
            ("camera.defocus_angle", self.defocus_angle),
            ("camera.focus_dist", self.focus_dist),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(SceneError::NonFinite(field.to_string()));
            }
        }
        let vectors = [
            ("camera.lookfrom", self.lookfrom),
            ("camera.lookat", self.lookat),
            ("camera.vup", self.vup),
        ];
        for (field, value) in vectors {
            if !value.is_finite() {
                return Err(SceneError::NonFinite(field.to_string()));
            }
        }

        if self.image_width == 0 {
            return Err(SceneError::InvalidCamera("image_width must be at least 1".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(SceneError::InvalidCamera("samples_per_pixel must be at least 1".into()));
        }
        if self.aspect_ratio <= 0.0 {
            return Err(SceneError::InvalidCamera(format!(
                "aspect_ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.vfov <= 0.0 || self.vfov >= 180.0 {
            return Err(SceneError::InvalidCamera(format!(
                "vfov must be within (0, 180) degrees, got {}",
                self.vfov
            )));
        }
        if self.focus_dist <= 0.0 {
            return Err(SceneError::InvalidCamera(format!(
                "focus_dist must be positive, got {}",
                self.focus_dist
            )));
        }

        let view = self.lookfrom - self.lookat;
        if view.length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera("lookfrom and lookat coincide".into()));
        }
        if self.vup.cross(view).length_squared() == 0.0 {
            return Err(SceneError::InvalidCamera("vup is parallel to the view direction".into()));
        }

        Ok(())
    }
}

/// Surface scattering model of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialKind {
    /// Diffuse surface
    Lambertian { albedo: Color },
    /// Reflective surface; `fuzz` is clamped to [0, 1] when built
    Metal { albedo: Color, fuzz: f64 },
    /// Clear refractive medium (glass, water, air bubbles)
    Dielectric { refraction_index: f64 },
}

/// A named entry in the material table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDesc {
    pub name: String,
    #[serde(flatten)]
    pub kind: MaterialKind,
}

/// A sphere referencing a material by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SphereDesc {
    pub center: Point3,
    /// Negative radii are clamped to 0 when built
    pub radius: f64,
    pub material: String,
}

/// Complete description of a renderable scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    pub name: String,
    pub camera: CameraSettings,
    pub materials: Vec<MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
    /// Seed for the render's random streams
    pub seed: u64,
}

impl SceneDescription {
    /// Create an empty scene with default camera settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material to the table.
    pub fn with_material(mut self, name: impl Into<String>, kind: MaterialKind) -> Self {
        self.materials.push(MaterialDesc {
            name: name.into(),
            kind,
        });
        self
    }

    /// Add a sphere using a material from the table.
    pub fn with_sphere(mut self, center: Point3, radius: f64, material: impl Into<String>) -> Self {
        self.spheres.push(SphereDesc {
            center,
            radius,
            material: material.into(),
        });
        self
    }

    /// Replace the camera settings.
    pub fn with_camera(mut self, camera: CameraSettings) -> Self {
        self.camera = camera;
        self
    }

    /// Index of the named material in the table.
    pub fn material_index(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Check material references, camera settings and numeric sanity.
    pub fn validate(&self) -> SceneResult<()> {
        self.camera.validate()?;

        let mut names = HashSet::with_capacity(self.materials.len());
        for (index, material) in self.materials.iter().enumerate() {
            if material.name.is_empty() {
                return Err(SceneError::EmptyMaterialName(index));
            }
            if !names.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateMaterial(material.name.clone()));
            }
            let finite = match &material.kind {
                MaterialKind::Lambertian { albedo } => albedo.is_finite(),
                MaterialKind::Metal { albedo, fuzz } => albedo.is_finite() && fuzz.is_finite(),
                MaterialKind::Dielectric { refraction_index } => refraction_index.is_finite(),
            };
            if !finite {
                return Err(SceneError::NonFinite(format!("material '{}'", material.name)));
            }
        }

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() || !sphere.radius.is_finite() {
                return Err(SceneError::NonFinite(format!("sphere {}", index)));
            }
            if !names.contains(sphere.material.as_str()) {
                return Err(SceneError::UnknownMaterial {
                    index,
                    name: sphere.material.clone(),
                });
            }
        }

        Ok(())
    }

    /// Parse a scene from JSON and validate it.
    pub fn from_json(content: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(content)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Serialise the scene as pretty-printed JSON.
    pub fn to_json(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load and validate a JSON scene file.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<SceneDescription> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let mut scene = SceneDescription::from_json(&content)?;

    if scene.name.is_empty() {
        scene.name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
    }

    log::info!(
        "Loaded scene '{}' from {}: {} materials, {} spheres",
        scene.name,
        path.display(),
        scene.materials.len(),
        scene.spheres.len()
    );

    Ok(scene)
}
