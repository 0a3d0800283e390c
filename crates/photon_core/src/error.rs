use thiserror::Error;

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {index} references unknown material '{name}'")]
    UnknownMaterial { index: usize, name: String },

    #[error("Duplicate material name '{0}'")]
    DuplicateMaterial(String),

    #[error("Material at index {0} has an empty name")]
    EmptyMaterialName(usize),

    #[error("Invalid camera settings: {0}")]
    InvalidCamera(String),

    #[error("Non-finite value in {0}")]
    NonFinite(String),

    #[error("Unknown builtin scene '{0}'")]
    UnknownBuiltin(String),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;
