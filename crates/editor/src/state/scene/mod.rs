//! Scene state management
//!
//! Owns the model list, the selection and the gizmo arrows. Callers pass it
//! by reference into the per-frame picking update.

mod model_ops;
mod persistence;
mod transform_ops;

use crate::viewport::gizmo::GizmoArrows;
use crate::viewport::picking::Aabb;

use super::model::{Model, ModelId};
use super::selection::SelectionState;

pub const DEFAULT_ARROW_OFFSET: f32 = 0.29;

/// Models, selection and gizmo arrows
#[derive(Debug, Clone)]
pub struct SceneState {
    /// Models in insertion order. Picking walks this order.
    pub(crate) models: Vec<Model>,
    pub selection: SelectionState,
    pub arrows: GizmoArrows,
    /// Distance from the selected model's origin to each arrow
    pub arrow_offset: f32,
    /// Monotonically increasing version counter, bumped on every mutation
    pub(crate) version: u64,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            selection: SelectionState::default(),
            arrows: GizmoArrows::new(),
            arrow_offset: DEFAULT_ARROW_OFFSET,
            version: 0,
        }
    }
}

impl SceneState {
    /// Current scene version (increments on every mutation)
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.0)
    }

    pub(crate) fn model_mut(&mut self, id: ModelId) -> Option<&mut Model> {
        self.models.get_mut(id.0)
    }

    pub fn selected_model(&self) -> Option<&Model> {
        self.selection.primary().and_then(|id| self.model(id))
    }

    /// World boxes of every model, in list order
    pub fn model_bounds(&self) -> Vec<Aabb> {
        self.models.iter().map(|m| *m.bounds()).collect()
    }

    /// Boxes the camera collides with
    pub fn obstacles(&self) -> Vec<Aabb> {
        self.model_bounds()
    }

    /// Opaque models first, then translucent ones; stable within each group
    pub fn draw_order(&self) -> Vec<ModelId> {
        let (opaque, translucent): (Vec<&Model>, Vec<&Model>) =
            self.models.iter().partition(|m| !m.is_translucent());
        opaque
            .into_iter()
            .chain(translucent)
            .map(|m| m.id)
            .collect()
    }

    /// Bump version without any other change
    pub fn notify_mutated(&mut self) {
        self.version += 1;
    }
}
