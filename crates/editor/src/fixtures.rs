//! Factory functions for scenes and models used by tests, the command
//! protocol and the replay binary.

use shared::*;

// ── Model factories ──────────────────────────────────────────────

/// Cube model description at a position
pub fn cube_at(label: &str, w: f32, h: f32, d: f32, pos: [f32; 3]) -> ModelDescription {
    ModelDescription {
        transform: Transform::at(pos),
        ..ModelDescription::new(
            label,
            Primitive::Cube {
                width: w,
                height: h,
                depth: d,
            },
        )
    }
}

/// Unit cube (1x1x1) at a position
pub fn unit_cube_at(label: &str, pos: [f32; 3]) -> ModelDescription {
    cube_at(label, 1.0, 1.0, 1.0, pos)
}

/// Sphere model description at a position
pub fn sphere_at(label: &str, radius: f32, pos: [f32; 3]) -> ModelDescription {
    ModelDescription {
        transform: Transform::at(pos),
        ..ModelDescription::new(
            label,
            Primitive::Sphere {
                radius,
                rings: 16,
                sectors: 32,
            },
        )
    }
}

// ── Scene factories ──────────────────────────────────────────────

/// Scene from a list of models
pub fn scene_with(models: Vec<ModelDescription>) -> SceneDescription {
    SceneDescription {
        models,
        ..SceneDescription::default()
    }
}

/// Scene loaded at startup: a textured sphere ahead of the camera and a
/// translucent slab under it.
pub fn default_scene() -> SceneDescription {
    let sphere = ModelDescription {
        texture: Some("earth".into()),
        color: [1.0, 1.0, 1.0, 1.0],
        ..sphere_at("Sphere", 0.5, [0.0, 0.0, -2.5])
    };
    let link = ModelDescription {
        color: [0.3, 0.6, 0.9, 0.5],
        ..cube_at("Link", 1.0, 0.2, 1.0, [0.0, -0.5, 0.0])
    };
    scene_with(vec![sphere, link])
}

/// Two unit cubes side by side on the X axis, two units apart
pub fn two_boxes_scene() -> SceneDescription {
    scene_with(vec![
        unit_cube_at("Left", [-1.0, 0.0, 0.0]),
        unit_cube_at("Right", [1.0, 0.0, 0.0]),
    ])
}
