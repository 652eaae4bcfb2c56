//! Per-frame picking and drag handling.
//!
//! Runs once per frame after input is polled:
//! 1. press edge: grab an arrow of the selected model, else pick a model
//! 2. held: translate the selected model and its arrows
//! 3. release edge: drop every drag flag

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::camera::CameraView;
use super::gizmo::{DragMapping, GizmoAxis, PixelScaleMapping};
use super::picking::{FastRay, FirstHit, PickStrategy};
use crate::state::model::{Axis, ModelId};
use crate::state::settings::PickingSettings;
use crate::state::SceneState;

/// Primary mouse button edges for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MouseButtonState {
    /// Went down this frame
    pub pressed: bool,
    /// Is down (also true on the press frame)
    pub held: bool,
    /// Went up this frame
    pub released: bool,
}

impl MouseButtonState {
    pub fn press() -> Self {
        Self {
            pressed: true,
            held: true,
            released: false,
        }
    }

    pub fn hold() -> Self {
        Self {
            pressed: false,
            held: true,
            released: false,
        }
    }

    pub fn release() -> Self {
        Self {
            pressed: false,
            held: false,
            released: true,
        }
    }
}

/// Input polled for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputSample {
    /// Mouse position in screen pixels, origin top-left
    pub mouse: Vec2,
    pub button: MouseButtonState,
    /// A UI widget owns the pointer; presses are not picked
    pub ui_captured: bool,
}

impl InputSample {
    pub fn new(mouse: Vec2, button: MouseButtonState) -> Self {
        Self {
            mouse,
            button,
            ui_captured: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "axis", rename_all = "snake_case")]
pub enum InteractionPhase {
    Idle,
    ModelSelected,
    DraggingModel,
    DraggingAxisArrow(GizmoAxis),
}

impl InteractionPhase {
    /// Derive the phase from selection and drag flags
    pub fn of(scene: &SceneState) -> Self {
        if let Some(axis) = scene.arrows.active_axis() {
            InteractionPhase::DraggingAxisArrow(axis)
        } else if scene.held_model().is_some() {
            InteractionPhase::DraggingModel
        } else if scene.selection.has_selection() {
            InteractionPhase::ModelSelected
        } else {
            InteractionPhase::Idle
        }
    }
}

/// What a frame changed
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickEvent {
    /// A press hit nothing while nothing was selected
    Nothing,
    ArrowGrabbed(GizmoAxis),
    Selected(ModelId),
    Deselected,
    Moved(Vec3),
    Released,
}

/// Picking and drag state machine.
///
/// Selection and drag flags live in [`SceneState`]; the controller only keeps
/// the pick policy, the drag mapping and the last mouse position of the
/// current gesture.
pub struct DragController {
    strategy: Box<dyn PickStrategy>,
    mapping: Box<dyn DragMapping>,
    /// Holding the button on a model drags it in world X/Y
    pub free_drag: bool,
    prev_mouse: Option<Vec2>,
}

impl DragController {
    pub fn new(strategy: Box<dyn PickStrategy>, mapping: Box<dyn DragMapping>) -> Self {
        Self {
            strategy,
            mapping,
            free_drag: false,
            prev_mouse: None,
        }
    }

    pub fn from_settings(settings: &PickingSettings) -> Self {
        let mapping = if settings.invert_vertical {
            PixelScaleMapping::inverted_vertical(settings.pixels_per_unit)
        } else {
            PixelScaleMapping::new(settings.pixels_per_unit)
        };
        Self {
            free_drag: settings.free_drag,
            ..Self::new(settings.strategy.build(), Box::new(mapping))
        }
    }

    pub fn set_strategy(&mut self, strategy: Box<dyn PickStrategy>) {
        self.strategy = strategy;
    }

    pub fn set_mapping(&mut self, mapping: Box<dyn DragMapping>) {
        self.mapping = mapping;
    }

    pub fn phase(&self, scene: &SceneState) -> InteractionPhase {
        InteractionPhase::of(scene)
    }

    /// Advance one frame. Steps run in order press, held, release, so a
    /// sample carrying several edges is handled consistently.
    pub fn update_picking_and_drag(
        &mut self,
        scene: &mut SceneState,
        camera: &CameraView,
        input: &InputSample,
    ) -> Vec<PickEvent> {
        let mut events = Vec::new();

        if input.button.pressed && !input.ui_captured {
            self.prev_mouse = Some(input.mouse);
            events.push(self.pick(scene, camera, input.mouse));
        }

        if input.button.held && !input.button.pressed {
            if let Some(delta) = self.drag(scene, input.mouse) {
                events.push(PickEvent::Moved(delta));
            }
        }

        if input.button.released {
            self.prev_mouse = None;
            if scene.release_drag() {
                tracing::debug!("drag released");
                events.push(PickEvent::Released);
            }
        }

        events
    }

    fn pick(&self, scene: &mut SceneState, camera: &CameraView, mouse: Vec2) -> PickEvent {
        let ray = FastRay::from(camera.ray(mouse));

        // Arrows only exist while a model is selected, and always win over models
        if scene.selection.has_selection() {
            if let Some(i) = FirstHit.pick(&ray, &scene.arrows.bounds()) {
                let axis = Axis::ALL[i];
                scene.arrows.grab(axis);
                tracing::debug!("grabbed {axis:?} arrow");
                return PickEvent::ArrowGrabbed(axis);
            }
        }

        match self.strategy.pick(&ray, &scene.model_bounds()) {
            Some(i) => {
                let id = ModelId(i);
                scene.select(id);
                if let Err(e) = scene.grab_model(id) {
                    tracing::warn!("picked model vanished: {e}");
                }
                tracing::info!("selected {id}");
                PickEvent::Selected(id)
            }
            None if scene.selection.has_selection() => {
                scene.clear_selection();
                tracing::info!("selection cleared");
                PickEvent::Deselected
            }
            None => PickEvent::Nothing,
        }
    }

    fn drag(&mut self, scene: &mut SceneState, mouse: Vec2) -> Option<Vec3> {
        let mouse_delta = self.prev_mouse.map_or(Vec2::ZERO, |prev| mouse - prev);
        self.prev_mouse = Some(mouse);

        let delta = if let Some(axis) = scene.arrows.active_axis() {
            self.mapping.axis_delta(axis, mouse_delta)
        } else if self.free_drag && scene.held_model().is_some() {
            self.mapping.free_delta(mouse_delta)
        } else {
            return None;
        };

        if delta == Vec3::ZERO {
            return None;
        }

        match scene.apply_drag_delta(delta) {
            Ok(()) => {
                tracing::debug!("dragged by {delta:?}");
                Some(delta)
            }
            Err(e) => {
                tracing::debug!("drag ignored: {e}");
                None
            }
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(Box::new(FirstHit), Box::new(PixelScaleMapping::default()))
    }
}
