use serde::{Deserialize, Serialize};

/// Procedural geometry a model can be built from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Cube {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        #[serde(default = "default_rings")]
        rings: u32,
        #[serde(default = "default_sectors")]
        sectors: u32,
    },
    /// Arrow pointing along +Y, starting at the origin
    Arrow {
        length: f32,
        #[serde(default = "default_shaft_radius")]
        shaft_radius: f32,
    },
}

fn default_rings() -> u32 {
    16
}

fn default_sectors() -> u32 {
    32
}

fn default_shaft_radius() -> f32 {
    0.02
}

fn default_color() -> [f32; 4] {
    [1.0, 0.0, 1.0, 1.0]
}

/// Model transform as edited in the property panel.
///
/// `rotation` holds the orientation as Euler angles in degrees, applied X
/// then Y then Z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f32; 3],
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
}

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    pub fn at(position: [f32; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// One model in a scene file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescription {
    pub label: String,
    pub primitive: Primitive,
    #[serde(default)]
    pub transform: Transform,
    #[serde(default = "default_color")]
    pub color: [f32; 4],
    /// Texture asset name; `None` renders the model with its flat color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    /// Rotation slider values in degrees. Sliders rotate about local axes in
    /// the order they are moved, so these can differ from `transform.rotation`.
    /// Missing means the sliders start at `transform.rotation`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_sliders: Option<[f32; 3]>,
}

impl ModelDescription {
    pub fn new(label: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            label: label.into(),
            primitive,
            transform: Transform::new(),
            color: default_color(),
            texture: None,
            rotation_sliders: None,
        }
    }
}

fn default_version() -> u32 {
    1
}

/// Scene file: ordered list of models. Order is significant for picking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default = "default_version")]
    pub version: u32,
    pub models: Vec<ModelDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            version: default_version(),
            models: Vec::new(),
        }
    }
}
