//! Scene files and autosave

use std::path::{Path, PathBuf};

use shared::SceneDescription;

use super::SceneState;
use crate::error::EditorError;

impl SceneState {
    /// Build a scene from a description. Models keep the file order.
    pub fn from_description(desc: &SceneDescription) -> Self {
        let mut scene = Self::default();
        for model in &desc.models {
            scene.add_model(model);
        }
        scene
    }

    pub fn to_description(&self) -> SceneDescription {
        SceneDescription {
            models: self.models.iter().map(|m| m.to_description()).collect(),
            ..SceneDescription::default()
        }
    }

    pub fn load_json(json: &str) -> Result<Self, EditorError> {
        let desc: SceneDescription = serde_json::from_str(json)?;
        Ok(Self::from_description(&desc))
    }

    pub fn load_file(path: &Path) -> Result<Self, EditorError> {
        let json = std::fs::read_to_string(path)?;
        let scene = Self::load_json(&json)?;
        tracing::info!("Loaded {} models from {}", scene.model_count(), path.display());
        Ok(scene)
    }

    pub fn export_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.to_description())?)
    }

    /// Get autosave file path
    fn autosave_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "graph-ops", "graph-ops")
            .map(|dirs| dirs.data_dir().join("autosave.json"))
    }

    /// Save scene to the autosave file
    pub fn autosave(&self) -> Result<(), EditorError> {
        let Some(path) = Self::autosave_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.export_json()?)?;
        tracing::debug!("Autosaved to {}", path.display());
        Ok(())
    }

    /// Load scene from the autosave file
    pub fn load_autosave() -> Option<SceneDescription> {
        let path = Self::autosave_path()?;
        let json = std::fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&json) {
            Ok(desc) => Some(desc),
            Err(e) => {
                tracing::warn!("Ignoring autosave at {}: {e}", path.display());
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::state::model::{Axis, ModelId};

    const SCENE: &str = r#"{
        "models": [
            {"label": "Sphere", "primitive": {"type": "sphere", "radius": 0.5},
             "transform": {"position": [0, 0, -2.5]}, "texture": "earth"},
            {"label": "Link", "primitive": {"type": "cube", "width": 1, "height": 0.2, "depth": 1},
             "transform": {"position": [0, -0.5, 0]}, "color": [0.3, 0.6, 0.9, 0.5]}
        ]
    }"#;

    #[test]
    fn test_load_keeps_order() {
        let s = SceneState::load_json(SCENE).unwrap();
        assert_eq!(s.model_count(), 2);
        assert_eq!(s.model(ModelId(0)).unwrap().label, "Sphere");
        assert!(s.model(ModelId(0)).unwrap().has_texture());
        assert_eq!(s.model(ModelId(1)).unwrap().position(), Vec3::new(0.0, -0.5, 0.0));
    }

    #[test]
    fn test_export_then_load_preserves_positions() {
        let mut s = SceneState::load_json(SCENE).unwrap();
        s.translate_model(ModelId(1), Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let again = SceneState::load_json(&s.export_json().unwrap()).unwrap();
        let p = again.model(ModelId(1)).unwrap().position();
        assert!(p.abs_diff_eq(Vec3::new(1.0, -0.5, 0.0), 1e-6));
        assert!(again.model(ModelId(1)).unwrap().is_translucent());
    }

    #[test]
    fn test_export_then_load_preserves_rotated_bounds() {
        let mut s = SceneState::load_json(SCENE).unwrap();
        let link = ModelId(1);
        s.rotate_model(link, Axis::Z, 90.0).unwrap();
        s.rotate_model(link, Axis::X, 90.0).unwrap();
        let before = *s.model(link).unwrap().bounds();

        let again = SceneState::load_json(&s.export_json().unwrap()).unwrap();
        let after = again.model(link).unwrap().bounds();
        assert!(after.min.abs_diff_eq(before.min, 1e-3));
        assert!(after.max.abs_diff_eq(before.max, 1e-3));
        assert_eq!(again.model(link).unwrap().rotation_degrees(), Vec3::new(90.0, 0.0, 90.0));
    }

    #[test]
    fn test_invalid_scene_json() {
        assert!(matches!(
            SceneState::load_json("{\"models\": 3}"),
            Err(EditorError::InvalidJson(_))
        ));
    }
}
