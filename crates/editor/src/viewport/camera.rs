use glam::{Mat4, Vec2, Vec3, Vec4};

use super::picking::{point_in_box, Aabb, Ray};
use crate::state::settings::CameraSettings;

/// Convert a screen position to a normalized world-space ray direction.
///
/// Screen Y grows downward, clip Y upward. The unprojected eye-space vector is
/// forced to `z = -1, w = 0` so the inverse view treats it as a direction.
/// Both matrices must be invertible.
pub fn cast_ray(
    screen_x: f32,
    screen_y: f32,
    viewport_width: f32,
    viewport_height: f32,
    view: &Mat4,
    projection: &Mat4,
) -> Vec3 {
    let x = (2.0 * screen_x) / viewport_width - 1.0;
    let y = 1.0 - (2.0 * screen_y) / viewport_height;

    let ray_clip = Vec4::new(x, y, -1.0, 1.0);
    let ray_eye = projection.inverse() * ray_clip;
    let ray_eye = Vec4::new(ray_eye.x, ray_eye.y, -1.0, 0.0);

    let ray_world = view.inverse() * ray_eye;
    ray_world.truncate().normalize()
}

/// Camera matrices for one frame, as consumed by picking
#[derive(Clone, Copy, Debug)]
pub struct CameraView {
    pub view: Mat4,
    pub projection: Mat4,
    /// Camera position in world space
    pub eye: Vec3,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl CameraView {
    /// Picking ray from the eye through a screen position
    pub fn ray(&self, screen: Vec2) -> Ray {
        let direction = cast_ray(
            screen.x,
            screen.y,
            self.viewport.x,
            self.viewport.y,
            &self.view,
            &self.projection,
        );
        Ray::new(self.eye, direction)
    }

    /// Project a world point to screen pixels. `None` when behind the camera.
    pub fn project(&self, point: Vec3) -> Option<Vec2> {
        let p = self.projection * self.view * point.extend(1.0);
        if p.w <= 0.0 {
            return None;
        }
        let ndc = p.truncate() / p.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }
}

/// Keyboard movement for one frame, each axis in [-1, 1]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveInput {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
}

/// Result of [`FlyCamera::walk`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WalkOutcome {
    /// The keyboard move was rejected by a collision
    pub blocked: bool,
    /// Gravity was rejected by a collision or the floor
    pub grounded: bool,
}

/// First-person camera driven by yaw/pitch angles
#[derive(Clone, Debug)]
pub struct FlyCamera {
    pub position: Vec3,
    /// Yaw (radians)
    pub horizontal_angle: f32,
    /// Pitch (radians)
    pub vertical_angle: f32,
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Movement speed in world units per second
    pub speed: f32,
    /// Distance from the eye down to the collision probe
    pub eye_height: f32,
    /// Downward drift in world units per second
    pub gravity: f32,
    pub floor_height: f32,
}

impl FlyCamera {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            position: Vec3::from(settings.position),
            horizontal_angle: settings.horizontal_angle,
            vertical_angle: settings.vertical_angle,
            fov_degrees: settings.fov_degrees,
            near: settings.near,
            far: settings.far,
            speed: settings.speed,
            eye_height: settings.eye_height,
            gravity: settings.gravity,
            floor_height: settings.floor_height,
        }
    }

    /// Unit view direction
    pub fn direction(&self) -> Vec3 {
        let (sh, ch) = self.horizontal_angle.sin_cos();
        let (sv, cv) = self.vertical_angle.sin_cos();
        Vec3::new(cv * sh, sv, cv * ch)
    }

    /// Horizontal right vector
    pub fn right(&self) -> Vec3 {
        let a = self.horizontal_angle - std::f32::consts::FRAC_PI_2;
        Vec3::new(a.sin(), 0.0, a.cos())
    }

    /// View matrix (world -> camera)
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.direction(), Vec3::Y)
    }

    /// Projection matrix (camera -> clip)
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    pub fn view_state(&self, viewport: Vec2) -> CameraView {
        CameraView {
            view: self.view_matrix(),
            projection: self.projection_matrix(viewport.x / viewport.y),
            eye: self.position,
            viewport,
        }
    }

    /// Cast a ray from a screen position into the scene
    pub fn screen_ray(&self, screen: Vec2, viewport: Vec2) -> Ray {
        self.view_state(viewport).ray(screen)
    }

    /// Move for one frame, then apply gravity.
    ///
    /// Each step is reverted if the probe point below the eye ends up inside
    /// any obstacle. The camera never sinks below the floor.
    pub fn walk(&mut self, input: &MoveInput, dt: f32, obstacles: &[Aabb]) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        let step = self.speed * dt;

        let mut forward = self.direction();
        forward.y = 0.0;

        let prev = self.position;
        self.position += forward * input.forward * step;
        self.position += self.right() * input.right * step;
        self.position.y += input.up * step;

        if self.collides(obstacles) {
            self.position = prev;
            outcome.blocked = true;
        }

        let prev = self.position;
        self.position.y -= self.gravity * dt;

        if self.collides(obstacles) {
            self.position = prev;
            outcome.grounded = true;
        }

        if self.position.y < self.floor_height {
            self.position.y = self.floor_height;
            outcome.grounded = true;
        }

        if outcome.blocked {
            tracing::debug!("camera move rejected at {:?}", self.position);
        }

        outcome
    }

    fn collides(&self, obstacles: &[Aabb]) -> bool {
        let probe = self.position - Vec3::new(0.0, self.eye_height, 0.0);
        obstacles.iter().any(|b| point_in_box(probe, b))
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1024.0, 768.0);

    fn camera_at(position: Vec3, h: f32, v: f32) -> FlyCamera {
        FlyCamera {
            position,
            horizontal_angle: h,
            vertical_angle: v,
            ..FlyCamera::default()
        }
    }

    #[test]
    fn test_center_ray_is_forward() {
        let cameras = [
            camera_at(Vec3::new(0.0, 2.0, 2.0), 3.15, -0.2),
            camera_at(Vec3::new(5.0, -1.0, 3.0), 0.4, 0.6),
            camera_at(Vec3::ZERO, -2.0, 0.0),
        ];
        for cam in cameras {
            let view = cam.view_state(VIEWPORT);
            let dir = cast_ray(512.0, 384.0, 1024.0, 768.0, &view.view, &view.projection);
            assert!(dir.abs_diff_eq(cam.direction(), 1e-5), "{dir:?} vs {:?}", cam.direction());
        }
    }

    #[test]
    fn test_ray_is_normalized() {
        let cam = FlyCamera::default();
        let ray = cam.screen_ray(Vec2::new(10.0, 700.0), VIEWPORT);
        assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn test_screen_y_flipped() {
        // Looking down -Z, the top of the screen maps to +Y
        let cam = camera_at(Vec3::ZERO, std::f32::consts::PI, 0.0);
        let top = cam.screen_ray(Vec2::new(512.0, 0.0), VIEWPORT);
        let bottom = cam.screen_ray(Vec2::new(512.0, 768.0), VIEWPORT);
        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
    }

    #[test]
    fn test_project_then_cast_points_at_target() {
        let cam = FlyCamera::default();
        let view = cam.view_state(VIEWPORT);
        let target = Vec3::new(0.4, 1.1, -1.5);
        let screen = view.project(target).unwrap();
        let ray = view.ray(screen);
        let expected = (target - cam.position).normalize();
        assert!(ray.direction.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn test_project_behind_camera() {
        let cam = camera_at(Vec3::ZERO, std::f32::consts::PI, 0.0);
        let view = cam.view_state(VIEWPORT);
        assert!(view.project(Vec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_walk_free_space() {
        let mut cam = camera_at(Vec3::new(0.0, 2.0, 0.0), 0.0, 0.0);
        cam.gravity = 0.0;
        let out = cam.walk(&MoveInput { forward: 1.0, ..Default::default() }, 0.5, &[]);
        assert!(!out.blocked);
        assert!(cam.position.abs_diff_eq(Vec3::new(0.0, 2.0, 2.5), 1e-5));
    }

    #[test]
    fn test_walk_into_box_reverts() {
        let mut cam = camera_at(Vec3::new(0.0, 1.0, 0.0), 0.0, 0.0);
        cam.gravity = 0.0;
        let wall = Aabb::new(Vec3::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 2.0, 3.0));
        let out = cam.walk(&MoveInput { forward: 1.0, ..Default::default() }, 0.4, &[wall]);
        assert!(out.blocked);
        assert_eq!(cam.position, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_gravity_stops_on_box() {
        let floor = Aabb::new(Vec3::new(-2.0, 0.0, -2.0), Vec3::new(2.0, 1.0, 2.0));
        // Probe sits just above the box top
        let mut cam = camera_at(Vec3::new(0.0, 1.55, 0.0), 0.0, 0.0);
        let out = cam.walk(&MoveInput::default(), 0.1, &[floor]);
        assert!(out.grounded);
        assert_eq!(cam.position.y, 1.55);
    }

    #[test]
    fn test_floor_clamp() {
        let mut cam = camera_at(Vec3::new(0.0, 0.01, 0.0), 0.0, 0.0);
        let out = cam.walk(&MoveInput::default(), 1.0, &[]);
        assert!(out.grounded);
        assert_eq!(cam.position.y, 0.0);
    }
}
