//! JSON command protocol for scripted sessions.
//!
//! Each command runs against a [`TestHarness`]; pointer commands go through
//! the same per-frame picking update as the viewport.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use shared::{ModelDescription, Primitive, Transform};

use crate::error::EditorError;
use crate::harness::TestHarness;
use crate::state::model::{Axis, ModelId};
use crate::viewport::camera::MoveInput;
use crate::viewport::interaction::PickEvent;

/// A command a script can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Append a model to the scene
    AddModel {
        label: String,
        primitive: Primitive,
        #[serde(default)]
        transform: Transform,
        #[serde(default)]
        color: Option<[f32; 4]>,
        #[serde(default)]
        texture: Option<String>,
    },
    /// Copy the selected model (or the first one) at the origin
    DuplicateSelected,
    Select {
        id: ModelId,
    },
    ClearSelection,
    /// Translate a model; defaults to the selected one
    MoveBy {
        #[serde(default)]
        id: Option<ModelId>,
        delta: [f32; 3],
    },
    MoveTo {
        #[serde(default)]
        id: Option<ModelId>,
        position: [f32; 3],
    },
    /// Rotate a model about one of its local axes, in degrees
    Rotate {
        #[serde(default)]
        id: Option<ModelId>,
        axis: Axis,
        degrees: f32,
    },
    /// Position slider: set one coordinate of a model
    SetPosition {
        #[serde(default)]
        id: Option<ModelId>,
        axis: Axis,
        value: f32,
    },
    /// Rotation slider: set one axis angle in degrees
    SetRotation {
        #[serde(default)]
        id: Option<ModelId>,
        axis: Axis,
        degrees: f32,
    },
    /// Mouse button down at screen pixels
    Press {
        x: f32,
        y: f32,
    },
    MoveMouse {
        x: f32,
        y: f32,
    },
    Release,
    /// Walk the camera for `dt` seconds
    Walk {
        #[serde(default)]
        forward: f32,
        #[serde(default)]
        right: f32,
        #[serde(default)]
        up: f32,
        dt: f32,
    },
    /// List models, selection and interaction phase
    Inspect,
    /// Export the scene as JSON
    ExportScene,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

impl From<Result<serde_json::Value, EditorError>> for CommandResponse {
    fn from(result: Result<serde_json::Value, EditorError>) -> Self {
        match result {
            Ok(serde_json::Value::Null) => Self::ok(),
            Ok(data) => Self::ok_with_data(data),
            Err(e) => {
                tracing::warn!("command rejected: {e}");
                Self::err(e.to_string())
            }
        }
    }
}

fn target(harness: &TestHarness, id: Option<ModelId>) -> Result<ModelId, EditorError> {
    id.or_else(|| harness.selected()).ok_or(EditorError::NothingSelected)
}

fn pointer_data(harness: &TestHarness, events: Vec<PickEvent>) -> serde_json::Value {
    serde_json::json!({
        "events": events,
        "selected": harness.selected(),
        "phase": harness.phase(),
    })
}

fn run(harness: &mut TestHarness, cmd: EditorCommand) -> Result<serde_json::Value, EditorError> {
    let data = match cmd {
        EditorCommand::AddModel {
            label,
            primitive,
            transform,
            color,
            texture,
        } => {
            let mut desc = ModelDescription {
                transform,
                texture,
                ..ModelDescription::new(label, primitive)
            };
            if let Some(color) = color {
                desc.color = color;
            }
            let id = harness.state.scene.add_model(&desc);
            serde_json::json!({ "id": id })
        }

        EditorCommand::DuplicateSelected => {
            let id = harness
                .state
                .scene
                .duplicate_selected()
                .ok_or(EditorError::NothingSelected)?;
            serde_json::json!({ "id": id })
        }

        EditorCommand::Select { id } => {
            if !harness.state.scene.select(id) {
                return Err(EditorError::UnknownModel(id));
            }
            serde_json::json!({ "selected": id })
        }

        EditorCommand::ClearSelection => {
            harness.state.scene.clear_selection();
            serde_json::Value::Null
        }

        EditorCommand::MoveBy { id, delta } => {
            let id = target(harness, id)?;
            harness.state.scene.translate_model(id, Vec3::from(delta))?;
            serde_json::json!({ "position": harness.model(id).map(|m| m.position()) })
        }

        EditorCommand::MoveTo { id, position } => {
            let id = target(harness, id)?;
            harness.state.scene.move_model_to(id, Vec3::from(position))?;
            serde_json::json!({ "position": harness.model(id).map(|m| m.position()) })
        }

        EditorCommand::Rotate { id, axis, degrees } => {
            let id = target(harness, id)?;
            harness.state.scene.rotate_model(id, axis, degrees)?;
            serde_json::json!({ "bounds": harness.model(id).map(|m| *m.bounds()) })
        }

        EditorCommand::SetPosition { id, axis, value } => {
            let id = target(harness, id)?;
            harness.state.scene.set_model_position_axis(id, axis, value)?;
            serde_json::json!({
                "position": harness.model(id).map(|m| m.position()),
                "bounds": harness.model(id).map(|m| *m.bounds()),
            })
        }

        EditorCommand::SetRotation { id, axis, degrees } => {
            let id = target(harness, id)?;
            harness.state.scene.set_model_rotation(id, axis, degrees)?;
            serde_json::json!({
                "rotation": harness.model(id).map(|m| m.rotation_degrees()),
                "bounds": harness.model(id).map(|m| *m.bounds()),
            })
        }

        EditorCommand::Press { x, y } => {
            let events = harness.press(Vec2::new(x, y));
            pointer_data(harness, events)
        }

        EditorCommand::MoveMouse { x, y } => {
            let events = harness.move_mouse(Vec2::new(x, y));
            pointer_data(harness, events)
        }

        EditorCommand::Release => {
            let events = harness.release();
            pointer_data(harness, events)
        }

        EditorCommand::Walk {
            forward,
            right,
            up,
            dt,
        } => {
            let outcome = harness.walk(MoveInput { forward, right, up }, dt);
            serde_json::json!({
                "position": harness.state.camera.position,
                "blocked": outcome.blocked,
                "grounded": outcome.grounded,
            })
        }

        EditorCommand::Inspect => {
            let models: Vec<serde_json::Value> = harness
                .state
                .scene
                .models()
                .iter()
                .map(|m| {
                    serde_json::json!({
                        "id": m.id,
                        "label": m.label,
                        "position": m.position(),
                        "bounds": m.bounds(),
                        "textured": m.has_texture(),
                        "translucent": m.is_translucent(),
                    })
                })
                .collect();
            serde_json::json!({
                "model_count": models.len(),
                "models": models,
                "selected": harness.selected(),
                "phase": harness.phase(),
                "camera": harness.state.camera.position,
            })
        }

        EditorCommand::ExportScene => {
            let json = harness.export_scene_json()?;
            serde_json::json!({ "scene_json": json })
        }
    };
    Ok(data)
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: EditorCommand) -> CommandResponse {
    tracing::debug!("execute {cmd:?}");
    run(harness, cmd).into()
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, EditorError> {
    let cmd: EditorCommand = serde_json::from_str(json)?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, EditorError> {
    let cmds: Vec<EditorCommand> = serde_json::from_str(json)?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_serde_release() {
        let cmd: EditorCommand = serde_json::from_str(r#"{"command": "release"}"#).unwrap();
        assert!(matches!(cmd, EditorCommand::Release));
    }

    #[test]
    fn test_command_serde_add_model() {
        let json = r#"{"command": "add_model", "label": "Box",
            "primitive": {"type": "cube", "width": 1.0, "height": 1.0, "depth": 1.0}}"#;
        let cmd: EditorCommand = serde_json::from_str(json).unwrap();
        match cmd {
            EditorCommand::AddModel { label, transform, color, .. } => {
                assert_eq!(label, "Box");
                assert_eq!(transform, Transform::new());
                assert!(color.is_none());
            }
            _ => panic!("Expected AddModel"),
        }
    }

    #[test]
    fn test_command_serde_rotate() {
        let json = r#"{"command": "rotate", "axis": "y", "degrees": 45}"#;
        match serde_json::from_str::<EditorCommand>(json).unwrap() {
            EditorCommand::Rotate { id, axis, degrees } => {
                assert!(id.is_none());
                assert_eq!(axis, Axis::Y);
                assert_eq!(degrees, 45.0);
            }
            _ => panic!("Expected Rotate"),
        }
    }

    #[test]
    fn test_execute_add_and_inspect() {
        let mut h = TestHarness::new();
        let json = r#"{"command": "add_model", "label": "Box",
            "primitive": {"type": "cube", "width": 2.0, "height": 2.0, "depth": 2.0},
            "transform": {"position": [0, 0, -3]}}"#;
        let resp = execute_json(&mut h, json).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["id"], 0);

        let resp = execute_json(&mut h, r#"{"command": "inspect"}"#).unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["model_count"], 1);
        assert_eq!(data["models"][0]["label"], "Box");
        assert_eq!(data["phase"]["phase"], "idle");
    }

    #[test]
    fn test_move_by_without_selection_fails() {
        let mut h = TestHarness::new();
        h.add_cube("c", 1.0, 1.0, 1.0, [0.0, 0.0, 0.0]);
        let resp = execute_json(&mut h, r#"{"command": "move_by", "delta": [1, 0, 0]}"#).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("no model selected"));
    }

    #[test]
    fn test_set_position_slider_moves_gizmo() {
        let mut h = TestHarness::new();
        let id = h.add_cube("c", 1.0, 1.0, 1.0, [0.0, 0.0, 0.0]);
        h.state.scene.select(id);

        let resp = execute_json(
            &mut h,
            r#"{"command": "set_position", "axis": "z", "value": -2}"#,
        )
        .unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["position"][2], -2.0);
        let z = h.scene().arrows.arrow(Axis::Z).position();
        assert!(z.abs_diff_eq(Vec3::new(0.0, 0.0, -1.71), 1e-5));
    }

    #[test]
    fn test_set_rotation_slider_keeps_gizmo() {
        let mut h = TestHarness::new();
        let id = h.add_cube("c", 2.0, 2.0, 2.0, [0.0, 0.0, 0.0]);
        h.state.scene.select(id);
        let before = h.scene().arrows.arrow(Axis::X).position();

        let resp = execute_json(
            &mut h,
            r#"{"command": "set_rotation", "id": 0, "axis": "y", "degrees": 45}"#,
        )
        .unwrap();
        let data = resp.data.unwrap();
        assert_eq!(data["rotation"][1], 45.0);
        let max_x = data["bounds"]["max"][0].as_f64().unwrap();
        assert!((max_x - 2f64.sqrt()).abs() < 1e-4, "max_x = {max_x}");
        assert_eq!(h.scene().arrows.arrow(Axis::X).position(), before);
    }

    #[test]
    fn test_select_unknown_model() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "select", "id": 3}"#).unwrap();
        assert!(!resp.success);
    }

    #[test]
    fn test_clear_selection_has_no_data() {
        let mut h = TestHarness::new();
        let resp = execute_json(&mut h, r#"{"command": "clear_selection"}"#).unwrap();
        assert!(resp.success);
        assert!(resp.data.is_none());
    }

    #[test]
    fn test_execute_invalid_json() {
        let mut h = TestHarness::new();
        assert!(matches!(
            execute_json(&mut h, "not valid json"),
            Err(EditorError::InvalidJson(_))
        ));
    }
}
