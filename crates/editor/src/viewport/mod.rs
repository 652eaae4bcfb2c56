//! 3D viewport: camera, picking, gizmo arrows and mesh generation

pub mod camera;
pub mod gizmo;
pub mod interaction;
pub mod mesh;
pub mod picking;

pub use camera::{cast_ray, CameraView, FlyCamera, MoveInput, WalkOutcome};
pub use gizmo::{DragMapping, GizmoArrows, GizmoAxis, PixelScaleMapping};
pub use interaction::{DragController, InputSample, InteractionPhase, MouseButtonState, PickEvent};
pub use picking::{
    box_box_intersect, compute_world_bounds, hit_distance, intersect, point_in_box, Aabb, FastRay,
    FirstHit, NearestHit, PickStrategy, PickStrategyKind, Ray,
};
