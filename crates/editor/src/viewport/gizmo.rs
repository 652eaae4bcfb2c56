use glam::{Vec2, Vec3};
use shared::Primitive;

use super::picking::Aabb;
use crate::state::model::{Axis, Model, ModelId};

/// Which axis a gizmo arrow belongs to
pub type GizmoAxis = Axis;

pub const ARROW_LENGTH: f32 = 0.5;
pub const ARROW_SHAFT_RADIUS: f32 = 0.02;

/// Arrow ids live at the top of the id space, outside the scene's model list.
const ARROW_ID_BASE: usize = usize::MAX - 2;

/// The three translation arrows, ordered X, Y, Z.
///
/// At most one arrow has `drag` set; [`GizmoArrows::grab`] enforces it.
#[derive(Debug, Clone)]
pub struct GizmoArrows {
    arrows: [Model; 3],
}

impl GizmoArrows {
    /// Arrows built from one +Y arrow mesh: X is turned 270° about Z, Z 90° about X.
    pub fn new() -> Self {
        let primitive = Primitive::Arrow {
            length: ARROW_LENGTH,
            shaft_radius: ARROW_SHAFT_RADIUS,
        };

        let mut x = Model::new(ModelId(ARROW_ID_BASE), "X axis arrow", primitive.clone());
        x.color = [1.0, 0.0, 0.0, 1.0];
        x.rotate_by(Axis::Z, 270.0);

        let mut y = Model::new(ModelId(ARROW_ID_BASE + 1), "Y axis arrow", primitive.clone());
        y.color = [0.0, 1.0, 0.0, 1.0];

        let mut z = Model::new(ModelId(ARROW_ID_BASE + 2), "Z axis arrow", primitive);
        z.color = [0.0, 0.0, 1.0, 1.0];
        z.rotate_by(Axis::X, 90.0);

        Self { arrows: [x, y, z] }
    }

    pub fn arrow(&self, axis: GizmoAxis) -> &Model {
        &self.arrows[axis.index()]
    }

    pub fn arrow_mut(&mut self, axis: GizmoAxis) -> &mut Model {
        &mut self.arrows[axis.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Model> {
        self.arrows.iter()
    }

    /// Current arrow boxes in X, Y, Z order
    pub fn bounds(&self) -> [Aabb; 3] {
        [
            *self.arrows[0].bounds(),
            *self.arrows[1].bounds(),
            *self.arrows[2].bounds(),
        ]
    }

    /// Place each arrow `offset` units from `position` along its own axis.
    pub fn attach_to(&mut self, position: Vec3, offset: f32) {
        for axis in Axis::ALL {
            self.arrow_mut(axis).move_to(position + axis.unit() * offset);
        }
    }

    pub fn move_by(&mut self, delta: Vec3) {
        for arrow in &mut self.arrows {
            arrow.move_by(delta);
        }
    }

    /// Start dragging `axis`, releasing any other arrow.
    pub fn grab(&mut self, axis: GizmoAxis) {
        for arrow in &mut self.arrows {
            arrow.drag = false;
        }
        self.arrow_mut(axis).drag = true;
    }

    /// First dragging arrow in X, Y, Z order
    pub fn active_axis(&self) -> Option<GizmoAxis> {
        Axis::ALL.into_iter().find(|a| self.arrow(*a).drag)
    }

    pub fn any_dragging(&self) -> bool {
        self.arrows.iter().any(|a| a.drag)
    }

    pub fn clear_drag(&mut self) {
        for arrow in &mut self.arrows {
            arrow.drag = false;
        }
    }
}

impl Default for GizmoArrows {
    fn default() -> Self {
        Self::new()
    }
}

// ── Drag mapping ─────────────────────────────────────────────

/// Converts a mouse delta in pixels into a world-space translation.
pub trait DragMapping {
    /// Translation for dragging one axis arrow
    fn axis_delta(&self, axis: GizmoAxis, mouse_delta: Vec2) -> Vec3;

    /// Translation for dragging a model directly
    fn free_delta(&self, mouse_delta: Vec2) -> Vec3;
}

/// Fixed pixel-to-world scale.
///
/// Default convention: horizontal motion drives X; moving the mouse up raises
/// Y; moving it down pushes Z toward +Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelScaleMapping {
    pub pixels_per_unit: f32,
    /// `1.0` for the default convention, `-1.0` flips both Y and Z
    pub vertical_sign: f32,
}

impl PixelScaleMapping {
    pub fn new(pixels_per_unit: f32) -> Self {
        Self {
            pixels_per_unit,
            vertical_sign: 1.0,
        }
    }

    /// Alternative convention: mouse down raises Y and pulls Z toward -Z.
    pub fn inverted_vertical(pixels_per_unit: f32) -> Self {
        Self {
            pixels_per_unit,
            vertical_sign: -1.0,
        }
    }
}

impl Default for PixelScaleMapping {
    fn default() -> Self {
        Self::new(140.0)
    }
}

impl DragMapping for PixelScaleMapping {
    fn axis_delta(&self, axis: GizmoAxis, mouse_delta: Vec2) -> Vec3 {
        let d = mouse_delta / self.pixels_per_unit;
        match axis {
            Axis::X => Vec3::new(d.x, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, -d.y * self.vertical_sign, 0.0),
            Axis::Z => Vec3::new(0.0, 0.0, d.y * self.vertical_sign),
        }
    }

    fn free_delta(&self, mouse_delta: Vec2) -> Vec3 {
        let d = mouse_delta / self.pixels_per_unit;
        Vec3::new(d.x, -d.y * self.vertical_sign, 0.0)
    }
}
