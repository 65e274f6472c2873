//! Scene persistence: the JSON structure the editing layer saves and loads
//!
//! The core owns the format only; deciding when to save is the editing
//! layer's job. A loaded scene feeds straight into
//! `ThermalSimulation::initialize`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core_types::{Container, Sample};

/// A saved bench setup: the container plus its sample list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub container: Container,
    pub samples: Vec<Sample>,
}

/// Scene (de)serialization failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    LoadFailed(String),
    ParseFailed(String),
    SerializeFailed(String),
    SaveFailed(String),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::LoadFailed(msg) => write!(f, "failed to read scene: {msg}"),
            SceneError::ParseFailed(msg) => write!(f, "failed to parse scene: {msg}"),
            SceneError::SerializeFailed(msg) => write!(f, "failed to serialize scene: {msg}"),
            SceneError::SaveFailed(msg) => write!(f, "failed to write scene: {msg}"),
        }
    }
}

impl std::error::Error for SceneError {}

impl Scene {
    /// Bundle a container and samples into a scene.
    #[must_use]
    pub fn new(container: Container, samples: Vec<Sample>) -> Self {
        Scene { container, samples }
    }

    /// Parse a scene from its JSON form.
    ///
    /// # Errors
    /// Returns `SceneError::ParseFailed` for malformed input.
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        serde_json::from_str(json).map_err(|e| SceneError::ParseFailed(e.to_string()))
    }

    /// Serialize the scene to pretty JSON.
    ///
    /// # Errors
    /// Returns `SceneError::SerializeFailed` when serialization fails.
    pub fn to_json(&self) -> Result<String, SceneError> {
        serde_json::to_string_pretty(self).map_err(|e| SceneError::SerializeFailed(e.to_string()))
    }

    /// Load a scene from a JSON file.
    ///
    /// # Errors
    /// Returns `SceneError` if the file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneError> {
        let contents =
            fs::read_to_string(path).map_err(|e| SceneError::LoadFailed(e.to_string()))?;
        Scene::from_json(&contents)
    }

    /// Save the scene to a JSON file.
    ///
    /// # Errors
    /// Returns `SceneError` if the scene cannot be serialized or written.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneError> {
        let contents = self.to_json()?;
        fs::write(path, contents).map_err(|e| SceneError::SaveFailed(e.to_string()))
    }
}
