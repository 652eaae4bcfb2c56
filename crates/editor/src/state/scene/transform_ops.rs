//! Transform/drag operations

use glam::Vec3;

use super::SceneState;
use crate::error::EditorError;
use crate::state::model::{Axis, ModelId};

impl SceneState {
    /// Translate a model. The gizmo follows when the model is selected.
    pub fn translate_model(&mut self, id: ModelId, delta: Vec3) -> Result<(), EditorError> {
        let model = self.model_mut(id).ok_or(EditorError::UnknownModel(id))?;
        model.move_by(delta);
        self.version += 1;
        if self.selection.is_selected(id) {
            self.arrows.move_by(delta);
        }
        Ok(())
    }

    pub fn move_model_to(&mut self, id: ModelId, position: Vec3) -> Result<(), EditorError> {
        let model = self.model_mut(id).ok_or(EditorError::UnknownModel(id))?;
        model.move_to(position);
        self.version += 1;
        if self.selection.is_selected(id) {
            self.sync_gizmo();
        }
        Ok(())
    }

    /// Position slider on one axis
    pub fn set_model_position_axis(
        &mut self,
        id: ModelId,
        axis: Axis,
        value: f32,
    ) -> Result<(), EditorError> {
        let model = self.model_mut(id).ok_or(EditorError::UnknownModel(id))?;
        model.set_position_axis(axis, value);
        self.version += 1;
        if self.selection.is_selected(id) {
            self.sync_gizmo();
        }
        Ok(())
    }

    pub fn rotate_model(
        &mut self,
        id: ModelId,
        axis: Axis,
        degrees: f32,
    ) -> Result<(), EditorError> {
        let model = self.model_mut(id).ok_or(EditorError::UnknownModel(id))?;
        model.rotate_by(axis, degrees);
        self.version += 1;
        Ok(())
    }

    /// Rotation slider on one axis, in degrees
    pub fn set_model_rotation(
        &mut self,
        id: ModelId,
        axis: Axis,
        degrees: f32,
    ) -> Result<(), EditorError> {
        let model = self.model_mut(id).ok_or(EditorError::UnknownModel(id))?;
        model.set_rotation_degrees(axis, degrees);
        self.version += 1;
        Ok(())
    }

    /// Move the selected model and the arrows by the same delta
    pub fn apply_drag_delta(&mut self, delta: Vec3) -> Result<(), EditorError> {
        let id = self.selection.primary().ok_or(EditorError::NothingSelected)?;
        self.translate_model(id, delta)
    }

    /// Mark a model as held by the pointer
    pub fn grab_model(&mut self, id: ModelId) -> Result<(), EditorError> {
        let model = self.model_mut(id).ok_or(EditorError::UnknownModel(id))?;
        model.drag = true;
        Ok(())
    }

    /// Model currently held by the pointer, if any
    pub fn held_model(&self) -> Option<ModelId> {
        self.models.iter().find(|m| m.drag).map(|m| m.id)
    }

    /// Clear every drag flag on arrows and models.
    /// Returns whether anything was being dragged.
    pub fn release_drag(&mut self) -> bool {
        let mut released = self.arrows.any_dragging();
        self.arrows.clear_drag();
        for model in &mut self.models {
            released |= model.drag;
            model.drag = false;
        }
        released
    }

    /// Put the arrows back on the selected model
    pub fn sync_gizmo(&mut self) {
        if let Some(position) = self.selected_model().map(|m| m.position()) {
            let offset = self.arrow_offset;
            self.arrows.attach_to(position, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::{Primitive, Transform};

    use super::*;

    fn scene_with_cube() -> (SceneState, ModelId) {
        let mut s = SceneState::default();
        let id = s.add_primitive(
            "cube",
            &Primitive::Cube {
                width: 1.0,
                height: 1.0,
                depth: 1.0,
            },
            &Transform::new(),
        );
        (s, id)
    }

    #[test]
    fn test_translate_unselected_leaves_gizmo() {
        let (mut s, id) = scene_with_cube();
        let before = s.arrows.arrow(Axis::Y).position();
        s.translate_model(id, Vec3::X).unwrap();
        assert_eq!(s.model(id).unwrap().position(), Vec3::X);
        assert_eq!(s.arrows.arrow(Axis::Y).position(), before);
    }

    #[test]
    fn test_drag_delta_moves_model_and_arrows() {
        let (mut s, id) = scene_with_cube();
        s.select(id);
        s.apply_drag_delta(Vec3::new(0.5, 0.0, -1.0)).unwrap();

        assert_eq!(s.model(id).unwrap().position(), Vec3::new(0.5, 0.0, -1.0));
        let y = s.arrows.arrow(Axis::Y).position();
        assert!(y.abs_diff_eq(Vec3::new(0.5, 0.29, -1.0), 1e-6));
        assert!(s.model(id).unwrap().bounds().min.abs_diff_eq(Vec3::new(0.0, -0.5, -1.5), 1e-6));
    }

    #[test]
    fn test_drag_delta_without_selection() {
        let (mut s, _) = scene_with_cube();
        assert!(matches!(
            s.apply_drag_delta(Vec3::X),
            Err(EditorError::NothingSelected)
        ));
    }

    #[test]
    fn test_unknown_model() {
        let (mut s, _) = scene_with_cube();
        let err = s.rotate_model(ModelId(9), Axis::X, 10.0).unwrap_err();
        assert!(matches!(err, EditorError::UnknownModel(ModelId(9))));
    }

    #[test]
    fn test_release_drag_clears_everything() {
        let (mut s, id) = scene_with_cube();
        s.select(id);
        s.grab_model(id).unwrap();
        s.arrows.grab(Axis::Y);
        assert_eq!(s.held_model(), Some(id));

        assert!(s.release_drag());
        assert_eq!(s.held_model(), None);
        assert!(!s.arrows.any_dragging());
        assert!(!s.release_drag());
    }

    #[test]
    fn test_slider_resyncs_gizmo() {
        let (mut s, id) = scene_with_cube();
        s.select(id);
        s.set_model_position_axis(id, Axis::Z, 2.0).unwrap();
        let z = s.arrows.arrow(Axis::Z).position();
        assert!(z.abs_diff_eq(Vec3::new(0.0, 0.0, 2.29), 1e-6));
    }

    #[test]
    fn test_rotation_slider_leaves_gizmo() {
        let (mut s, id) = scene_with_cube();
        s.select(id);
        s.set_model_position_axis(id, Axis::X, 1.0).unwrap();
        let arrows: Vec<Vec3> = Axis::ALL
            .iter()
            .map(|&a| s.arrows.arrow(a).position())
            .collect();
        let version = s.version();

        s.set_model_rotation(id, Axis::Y, 30.0).unwrap();
        s.set_model_rotation(id, Axis::Y, 45.0).unwrap();

        let model = s.model(id).unwrap();
        assert_eq!(model.rotation_degrees(), Vec3::new(0.0, 45.0, 0.0));
        assert_eq!(model.position(), Vec3::X);
        let half = 0.5 * 2f32.sqrt();
        assert!(model.bounds().max.abs_diff_eq(Vec3::new(1.0 + half, 0.5, half), 1e-5));
        for (axis, before) in Axis::ALL.iter().zip(arrows) {
            assert_eq!(s.arrows.arrow(*axis).position(), before);
        }
        assert!(s.version() > version);
    }

    #[test]
    fn test_rotation_slider_unknown_model() {
        let (mut s, _) = scene_with_cube();
        assert!(matches!(
            s.set_model_rotation(ModelId(4), Axis::Z, 10.0),
            Err(EditorError::UnknownModel(ModelId(4)))
        ));
    }
}
