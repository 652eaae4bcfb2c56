//! Model creation and selection

use shared::{ModelDescription, Primitive, Transform};

use super::SceneState;
use crate::state::model::{Model, ModelId};

impl SceneState {
    /// Append a model described by a scene file entry
    pub fn add_model(&mut self, desc: &ModelDescription) -> ModelId {
        let id = ModelId(self.models.len());
        self.models.push(Model::from_description(id, desc));
        self.version += 1;
        tracing::debug!("Added model {} ({})", id, desc.label);
        id
    }

    pub fn add_primitive(
        &mut self,
        label: &str,
        primitive: &Primitive,
        transform: &Transform,
    ) -> ModelId {
        let desc = ModelDescription {
            transform: transform.clone(),
            ..ModelDescription::new(label, primitive.clone())
        };
        self.add_model(&desc)
    }

    /// Copy the selected model, or the first model when nothing is selected.
    /// The copy starts at the identity transform.
    pub fn duplicate_selected(&mut self) -> Option<ModelId> {
        let source = self.selected_model().or_else(|| self.models.first())?;
        let id = ModelId(self.models.len());
        let copy = source.duplicate(id);
        tracing::info!("Duplicated {} as {}", source.id, id);
        self.models.push(copy);
        self.version += 1;
        Some(id)
    }

    /// Select a model and move the gizmo to it. Returns false for unknown ids.
    pub fn select(&mut self, id: ModelId) -> bool {
        if self.model(id).is_none() {
            return false;
        }
        self.selection.select(id);
        self.sync_gizmo();
        true
    }

    /// Startup selection: the first model, with the gizmo on it
    pub fn select_first(&mut self) -> Option<ModelId> {
        let id = self.models.first()?.id;
        self.select(id);
        Some(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.arrows.clear_drag();
    }
}
