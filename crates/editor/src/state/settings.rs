//! Application settings

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::viewport::picking::PickStrategyKind;

/// Fly camera settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Start position in world space
    pub position: [f32; 3],
    /// Start yaw (radians)
    pub horizontal_angle: f32,
    /// Start pitch (radians)
    pub vertical_angle: f32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Height of the eye above the collision probe
    pub eye_height: f32,
    /// Downward drift in world units per second
    pub gravity: f32,
    /// Lowest allowed eye height
    pub floor_height: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 2.0],
            horizontal_angle: 3.15,
            vertical_angle: -0.2,
            fov_degrees: 90.0,
            near: 0.1,
            far: 100.0,
            speed: 5.0,
            eye_height: 0.5,
            gravity: 1.0,
            floor_height: 0.0,
        }
    }
}

/// Picking and gizmo drag settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PickingSettings {
    /// Which hit wins when several boxes are under the cursor
    pub strategy: PickStrategyKind,
    /// Mouse pixels per world unit while dragging an arrow
    pub pixels_per_unit: f32,
    /// Distance from the model origin to each arrow along its axis
    pub arrow_offset: f32,
    /// Use the alternative vertical convention for Y/Z arrows
    pub invert_vertical: bool,
    /// Dragging the picked model itself moves it in world X/Y
    pub free_drag: bool,
}

impl Default for PickingSettings {
    fn default() -> Self {
        Self {
            strategy: PickStrategyKind::FirstHit,
            pixels_per_unit: 140.0,
            arrow_offset: 0.29,
            invert_vertical: false,
            free_drag: false,
        }
    }
}

/// Viewport settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

impl ViewportSettings {
    pub fn size(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width, self.height)
    }
}

/// All application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub picking: PickingSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
}

impl AppSettings {
    fn config_path() -> Option<std::path::PathBuf> {
        directories::ProjectDirs::from("com", "graph-ops", "graph-ops")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Load settings from file, or return default if not found
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|e| {
                tracing::warn!("Ignoring settings at {}: {e}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), EditorError> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
