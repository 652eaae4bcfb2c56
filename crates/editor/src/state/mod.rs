pub mod model;
pub mod scene;
pub mod selection;
pub mod settings;

pub use model::{Axis, Model, ModelId, TextureHandle};
pub use scene::SceneState;
pub use selection::SelectionState;
pub use settings::{AppSettings, CameraSettings, PickingSettings, ViewportSettings};

use crate::viewport::camera::{CameraView, FlyCamera};

/// Combined application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub scene: SceneState,
    pub camera: FlyCamera,
    pub settings: AppSettings,
}

impl AppState {
    /// State seeded from settings: camera start pose and gizmo offset
    pub fn with_settings(settings: AppSettings) -> Self {
        let mut scene = SceneState::default();
        scene.arrow_offset = settings.picking.arrow_offset;
        Self {
            scene,
            camera: FlyCamera::from_settings(&settings.camera),
            settings,
        }
    }

    /// Replace the scene, keeping the configured gizmo offset
    pub fn set_scene(&mut self, mut scene: SceneState) {
        scene.arrow_offset = self.settings.picking.arrow_offset;
        self.scene = scene;
    }

    /// Camera matrices for the configured viewport size
    pub fn camera_view(&self) -> CameraView {
        self.camera.view_state(self.settings.viewport.size())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(AppSettings::load())
    }
}
