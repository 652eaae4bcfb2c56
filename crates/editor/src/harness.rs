//! Headless test harness for driving the editor without a window.
//!
//! Feeds synthetic mouse frames through the same picking/drag update the
//! viewport runs, so tests and the command protocol exercise the real path.

use glam::{Vec2, Vec3};
use shared::{ModelDescription, Primitive, SceneDescription, Transform};

use crate::error::EditorError;
use crate::state::model::{Model, ModelId};
use crate::state::scene::SceneState;
use crate::state::settings::AppSettings;
use crate::state::AppState;
use crate::viewport::camera::{CameraView, MoveInput, WalkOutcome};
use crate::viewport::interaction::{
    DragController, InputSample, InteractionPhase, MouseButtonState, PickEvent,
};

/// Headless test harness: app state, picking controller and pointer state
pub struct TestHarness {
    pub state: AppState,
    pub controller: DragController,
    mouse: Vec2,
    button_down: bool,
}

impl TestHarness {
    /// Create a new empty harness with default settings.
    /// Does not read the settings file.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let controller = DragController::from_settings(&settings.picking);
        Self {
            state: AppState::with_settings(settings),
            controller,
            mouse: Vec2::ZERO,
            button_down: false,
        }
    }

    /// Place the camera looking along `horizontal_angle`/`vertical_angle`
    pub fn look_from(&mut self, position: Vec3, horizontal_angle: f32, vertical_angle: f32) {
        let camera = &mut self.state.camera;
        camera.position = position;
        camera.horizontal_angle = horizontal_angle;
        camera.vertical_angle = vertical_angle;
    }

    // ── Scene manipulation ────────────────────────────────────

    pub fn add_model(&mut self, desc: &ModelDescription) -> ModelId {
        self.state.scene.add_model(desc)
    }

    /// Create a cube and return its ID
    pub fn add_cube(&mut self, label: &str, w: f32, h: f32, d: f32, pos: [f32; 3]) -> ModelId {
        self.state.scene.add_primitive(
            label,
            &Primitive::Cube {
                width: w,
                height: h,
                depth: d,
            },
            &Transform::at(pos),
        )
    }

    /// Create a sphere and return its ID
    pub fn add_sphere(&mut self, label: &str, radius: f32, pos: [f32; 3]) -> ModelId {
        self.state.scene.add_primitive(
            label,
            &Primitive::Sphere {
                radius,
                rings: 16,
                sectors: 32,
            },
            &Transform::at(pos),
        )
    }

    /// Load a scene (replaces current, drops any gesture in progress)
    pub fn load_scene(&mut self, desc: &SceneDescription) {
        self.state.set_scene(SceneState::from_description(desc));
        self.button_down = false;
    }

    pub fn load_scene_json(&mut self, json: &str) -> Result<(), EditorError> {
        let desc: SceneDescription = serde_json::from_str(json)?;
        self.load_scene(&desc);
        Ok(())
    }

    /// Export the current scene as JSON
    pub fn export_scene_json(&self) -> Result<String, EditorError> {
        self.state.scene.export_json()
    }

    // ── Pointer ───────────────────────────────────────────────

    /// Run one frame of picking/drag with an explicit sample
    pub fn frame(&mut self, input: InputSample) -> Vec<PickEvent> {
        self.mouse = input.mouse;
        if input.button.pressed {
            self.button_down = true;
        }
        if input.button.released {
            self.button_down = false;
        }
        let camera = self.state.camera_view();
        self.controller
            .update_picking_and_drag(&mut self.state.scene, &camera, &input)
    }

    /// Button down at a screen position
    pub fn press(&mut self, screen: Vec2) -> Vec<PickEvent> {
        self.frame(InputSample::new(screen, MouseButtonState::press()))
    }

    /// Move the pointer. Counts as a held frame while the button is down.
    pub fn move_mouse(&mut self, screen: Vec2) -> Vec<PickEvent> {
        let button = if self.button_down {
            MouseButtonState::hold()
        } else {
            MouseButtonState::default()
        };
        self.frame(InputSample::new(screen, button))
    }

    /// Button up at the current pointer position
    pub fn release(&mut self) -> Vec<PickEvent> {
        self.frame(InputSample::new(self.mouse, MouseButtonState::release()))
    }

    /// Press and release at a screen position
    pub fn click(&mut self, screen: Vec2) -> Vec<PickEvent> {
        let mut events = self.press(screen);
        events.extend(self.release());
        events
    }

    /// Press at `from`, move to `to` in one held frame, release
    pub fn drag(&mut self, from: Vec2, to: Vec2) -> Vec<PickEvent> {
        let mut events = self.press(from);
        events.extend(self.move_mouse(to));
        events.extend(self.release());
        events
    }

    // ── Camera ────────────────────────────────────────────────

    pub fn camera_view(&self) -> CameraView {
        self.state.camera_view()
    }

    /// Screen position of a world point, if in front of the camera
    pub fn screen_pos_of(&self, world: Vec3) -> Option<Vec2> {
        self.camera_view().project(world)
    }

    /// Screen position of a model's origin
    pub fn screen_pos_of_model(&self, id: ModelId) -> Option<Vec2> {
        self.model(id).and_then(|m| self.screen_pos_of(m.position()))
    }

    pub fn walk(&mut self, input: MoveInput, dt: f32) -> WalkOutcome {
        let obstacles = self.state.scene.obstacles();
        self.state.camera.walk(&input, dt, &obstacles)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn scene(&self) -> &SceneState {
        &self.state.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneState {
        &mut self.state.scene
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.state.scene.model(id)
    }

    pub fn model_count(&self) -> usize {
        self.state.scene.model_count()
    }

    pub fn selected(&self) -> Option<ModelId> {
        self.state.scene.selection.primary()
    }

    pub fn phase(&self) -> InteractionPhase {
        self.controller.phase(&self.state.scene)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
