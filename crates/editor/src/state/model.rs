//! Scene model entity: vertex data, transform and tracked bounds

use std::fmt;

use glam::{EulerRot, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};
use shared::{ModelDescription, Primitive, Transform};

use crate::viewport::mesh::MeshData;
use crate::viewport::picking::{compute_world_bounds, Aabb};

/// Index of a model in the scene's model list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(pub usize);

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// World axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Iteration order used wherever axes compete
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Y => Vec3::Y,
            Axis::Z => Vec3::Z,
        }
    }
}

/// Named texture asset bound to a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureHandle(pub String);

/// A model in the scene.
///
/// `bounds` is derived from `original_box` and the current matrix and is
/// recomputed on every transform change, never edited in place.
#[derive(Debug, Clone)]
pub struct Model {
    pub id: ModelId,
    pub label: String,
    /// Geometry the model was built from, kept for export
    pub primitive: Primitive,
    pub mesh: MeshData,
    matrix: Mat4,
    /// Rotation slider values in degrees
    rotation: Vec3,
    pub color: [f32; 4],
    pub texture: Option<TextureHandle>,
    original_box: Aabb,
    bounds: Aabb,
    pub drag: bool,
}

impl Model {
    pub fn new(id: ModelId, label: impl Into<String>, primitive: Primitive) -> Self {
        let mesh = MeshData::from_primitive(&primitive);
        let original_box = Aabb::from_mesh(&mesh);
        Self {
            id,
            label: label.into(),
            primitive,
            mesh,
            matrix: Mat4::IDENTITY,
            rotation: Vec3::ZERO,
            color: [1.0, 0.0, 1.0, 1.0],
            texture: None,
            original_box,
            bounds: original_box,
            drag: false,
        }
    }

    pub fn from_description(id: ModelId, desc: &ModelDescription) -> Self {
        let mut model = Self::new(id, desc.label.clone(), desc.primitive.clone());
        model.color = desc.color;
        model.texture = desc.texture.clone().map(TextureHandle);
        model.rotation = Vec3::from(desc.rotation_sliders.unwrap_or(desc.transform.rotation));
        model.set_matrix(transform_matrix(&desc.transform));
        model
    }

    /// Description of the current matrix. The orientation is re-expressed as
    /// XYZ Euler degrees; the slider values travel alongside it.
    pub fn to_description(&self) -> ModelDescription {
        let (scale, rotation, translation) = self.matrix.to_scale_rotation_translation();
        let (rx, ry, rz) = rotation.to_euler(EulerRot::XYZ);
        let euler = Vec3::new(rx, ry, rz) * (180.0 / std::f32::consts::PI);
        let sliders = self.rotation;
        let rotation_sliders = (!sliders.abs_diff_eq(euler, 1e-4)).then_some(sliders.to_array());
        ModelDescription {
            label: self.label.clone(),
            primitive: self.primitive.clone(),
            transform: Transform {
                position: translation.to_array(),
                rotation: euler.to_array(),
                scale: scale.to_array(),
            },
            color: self.color,
            texture: self.texture.as_ref().map(|t| t.0.clone()),
            rotation_sliders,
        }
    }

    /// Copy with the same geometry, label, color and texture at the identity transform
    pub fn duplicate(&self, id: ModelId) -> Self {
        Self {
            id,
            label: self.label.clone(),
            primitive: self.primitive.clone(),
            mesh: self.mesh.clone(),
            matrix: Mat4::IDENTITY,
            rotation: Vec3::ZERO,
            color: self.color,
            texture: self.texture.clone(),
            original_box: self.original_box,
            bounds: self.original_box,
            drag: false,
        }
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn position(&self) -> Vec3 {
        self.matrix.w_axis.truncate()
    }

    pub fn rotation_degrees(&self) -> Vec3 {
        self.rotation
    }

    /// Model-space bounds from the raw vertex extents
    pub fn original_bounds(&self) -> &Aabb {
        &self.original_box
    }

    /// Current world-space bounds
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    pub fn has_texture(&self) -> bool {
        self.texture.is_some()
    }

    pub fn is_translucent(&self) -> bool {
        self.color[3] < 1.0
    }

    pub fn set_matrix(&mut self, matrix: Mat4) {
        self.matrix = matrix;
        self.refresh_bounds();
    }

    pub fn move_by(&mut self, delta: Vec3) {
        self.matrix.w_axis += delta.extend(0.0);
        self.refresh_bounds();
    }

    pub fn move_to(&mut self, position: Vec3) {
        self.matrix.w_axis = position.extend(1.0);
        self.refresh_bounds();
    }

    /// Position slider on one axis
    pub fn set_position_axis(&mut self, axis: Axis, value: f32) {
        self.matrix.w_axis[axis.index()] = value;
        self.refresh_bounds();
    }

    /// Rotate about a local axis, right-multiplied onto the current matrix
    pub fn rotate_by(&mut self, axis: Axis, degrees: f32) {
        if degrees == 0.0 {
            return;
        }
        self.rotation[axis.index()] += degrees;
        self.matrix *= Mat4::from_axis_angle(axis.unit(), degrees.to_radians());
        self.refresh_bounds();
    }

    /// Rotation slider: applies only the change from the previous slider value
    pub fn set_rotation_degrees(&mut self, axis: Axis, degrees: f32) {
        let prev = self.rotation[axis.index()];
        if degrees == prev {
            return;
        }
        self.matrix *= Mat4::from_axis_angle(axis.unit(), (degrees - prev).to_radians());
        self.rotation[axis.index()] = degrees;
        self.refresh_bounds();
    }

    fn refresh_bounds(&mut self) {
        self.bounds = compute_world_bounds(&self.original_box, &self.matrix);
    }
}

/// Translation * rotation (XYZ Euler, degrees) * scale
pub fn transform_matrix(t: &Transform) -> Mat4 {
    let [rx, ry, rz] = t.rotation;
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        rx.to_radians(),
        ry.to_radians(),
        rz.to_radians(),
    );
    Mat4::from_scale_rotation_translation(
        Vec3::from(t.scale),
        rotation,
        Vec3::from(t.position),
    )
}
