use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::mesh::MeshData;

/// A ray in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Precompute the reciprocal direction for repeated box tests.
    pub fn precompute(&self) -> FastRay {
        FastRay::from(self)
    }
}

/// Ray with a precomputed componentwise `1 / direction`.
///
/// Zero direction components become signed infinities. The slab test relies on
/// that, so they are never clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FastRay {
    pub origin: Vec3,
    pub inv_direction: Vec3,
}

impl From<&Ray> for FastRay {
    fn from(ray: &Ray) -> Self {
        Self {
            origin: ray.origin,
            inv_direction: Vec3::new(
                1.0 / ray.direction.x,
                1.0 / ray.direction.y,
                1.0 / ray.direction.z,
            ),
        }
    }
}

impl From<Ray> for FastRay {
    fn from(ray: Ray) -> Self {
        Self::from(&ray)
    }
}

/// Anything the slab test can run against
pub trait RayCast {
    fn origin(&self) -> Vec3;
    fn inv_direction(&self) -> Vec3;
}

impl RayCast for Ray {
    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn inv_direction(&self) -> Vec3 {
        Vec3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        )
    }
}

impl RayCast for FastRay {
    fn origin(&self) -> Vec3 {
        self.origin
    }

    fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tight box around a point set. An empty set yields a degenerate box at the origin.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;

        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }

        if any {
            Self { min, max }
        } else {
            Self::new(Vec3::ZERO, Vec3::ZERO)
        }
    }

    /// Raw vertex extents of a mesh, in model space
    pub fn from_mesh(data: &MeshData) -> Self {
        Self::from_points(data.positions())
    }

    /// All 8 min/max combinations
    pub fn corners(&self) -> [Vec3; 8] {
        let (a, b) = (self.min, self.max);
        [
            a,
            Vec3::new(a.x, a.y, b.z),
            Vec3::new(a.x, b.y, a.z),
            Vec3::new(b.x, a.y, a.z),
            Vec3::new(a.x, b.y, b.z),
            Vec3::new(b.x, a.y, b.z),
            Vec3::new(b.x, b.y, a.z),
            b,
        ]
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Axis-aligned bound of this box after `transform`. See [`compute_world_bounds`].
    pub fn transformed(&self, transform: &Mat4) -> Self {
        compute_world_bounds(self, transform)
    }

    pub fn contains_point(&self, p: Vec3) -> bool {
        point_in_box(p, self)
    }

    pub fn intersects(&self, other: &Aabb) -> bool {
        box_box_intersect(self, other)
    }
}

/// World-space bounds of `original` under `transform`.
///
/// Transforms the 8 corners as points (w = 1) and takes their componentwise
/// min/max. Rotated boxes are bounded loosely; translations are exact.
pub fn compute_world_bounds(original: &Aabb, transform: &Mat4) -> Aabb {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);

    for corner in original.corners() {
        let p = transform.transform_point3(corner);
        min = min.min(p);
        max = max.max(p);
    }

    Aabb { min, max }
}

/// Slab fold. Returns `(tmin, tmax)` over all three axes.
fn slab(ray: &impl RayCast, b: &Aabb) -> (f32, f32) {
    let origin = ray.origin();
    let inv = ray.inv_direction();

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let t1 = (b.min[axis] - origin[axis]) * inv[axis];
        let t2 = (b.max[axis] - origin[axis]) * inv[axis];
        tmin = tmin.max(t1.min(t2));
        tmax = tmax.min(t1.max(t2));
    }

    (tmin, tmax)
}

/// Ray-AABB hit test using the slab method. Boxes entirely behind the origin miss.
pub fn intersect(ray: &impl RayCast, b: &Aabb) -> bool {
    let (tmin, tmax) = slab(ray, b);
    tmax >= tmin.max(0.0)
}

/// Like [`intersect`], returning the entry distance (0 when the origin is inside).
pub fn hit_distance(ray: &impl RayCast, b: &Aabb) -> Option<f32> {
    let (tmin, tmax) = slab(ray, b);
    let entry = tmin.max(0.0);
    (tmax >= entry).then_some(entry)
}

/// Closed-interval containment on every axis
pub fn point_in_box(p: Vec3, b: &Aabb) -> bool {
    (p.x >= b.min.x && p.x <= b.max.x)
        && (p.y >= b.min.y && p.y <= b.max.y)
        && (p.z >= b.min.z && p.z <= b.max.z)
}

/// Overlap on all three axes. Touching faces count.
pub fn box_box_intersect(a: &Aabb, b: &Aabb) -> bool {
    (a.min.x <= b.max.x && a.max.x >= b.min.x)
        && (a.min.y <= b.max.y && a.max.y >= b.min.y)
        && (a.min.z <= b.max.z && a.max.z >= b.min.z)
}

// ── Pick strategies ──────────────────────────────────────────

/// Chooses one box among candidates hit by a ray.
pub trait PickStrategy {
    /// Index into `candidates` of the chosen box, if any is hit.
    fn pick(&self, ray: &FastRay, candidates: &[Aabb]) -> Option<usize>;
}

/// First box in list order that the ray hits
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstHit;

impl PickStrategy for FirstHit {
    fn pick(&self, ray: &FastRay, candidates: &[Aabb]) -> Option<usize> {
        candidates.iter().position(|b| intersect(ray, b))
    }
}

/// Box with the smallest entry distance; ties go to list order
#[derive(Clone, Copy, Debug, Default)]
pub struct NearestHit;

impl PickStrategy for NearestHit {
    fn pick(&self, ray: &FastRay, candidates: &[Aabb]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;

        for (i, b) in candidates.iter().enumerate() {
            if let Some(dist) = hit_distance(ray, b) {
                if best.map_or(true, |(_, d)| dist < d) {
                    best = Some((i, dist));
                }
            }
        }

        best.map(|(i, _)| i)
    }
}

/// Serializable strategy selector used by settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickStrategyKind {
    #[default]
    FirstHit,
    NearestHit,
}

impl PickStrategyKind {
    pub fn build(self) -> Box<dyn PickStrategy> {
        match self {
            PickStrategyKind::FirstHit => Box::new(FirstHit),
            PickStrategyKind::NearestHit => Box::new(NearestHit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0))
    }

    #[test]
    fn test_identity_bounds_unchanged() {
        let b = Aabb::new(Vec3::new(-1.0, 0.5, -3.0), Vec3::new(2.0, 0.75, 4.0));
        assert_eq!(compute_world_bounds(&b, &Mat4::IDENTITY), b);
    }

    #[test]
    fn test_translation_bounds_exact() {
        let b = Aabb::new(Vec3::new(-0.3, -0.7, 0.1), Vec3::new(0.9, 0.2, 1.3));
        let t = Vec3::new(1.25, -3.5, 0.125);
        let moved = compute_world_bounds(&b, &Mat4::from_translation(t));
        assert_eq!(moved.min, b.min + t);
        assert_eq!(moved.max, b.max + t);
    }

    #[test]
    fn test_rotated_bounds_contain_all_corners() {
        let b = Aabb::new(Vec3::new(-1.0, -0.5, -0.25), Vec3::new(2.0, 0.5, 0.25));
        let rotations = [
            Quat::from_rotation_x(0.7),
            Quat::from_rotation_y(-1.3),
            Quat::from_rotation_z(2.1),
            Quat::from_euler(glam::EulerRot::XYZ, 0.3, 0.9, -0.4),
        ];
        for q in rotations {
            let m = Mat4::from_quat(q);
            let world = compute_world_bounds(&b, &m);
            for c in b.corners() {
                let p = m.transform_point3(c);
                assert!(p.cmpge(world.min).all() && p.cmple(world.max).all());
            }
        }
    }

    #[test]
    fn test_rotation_is_conservative() {
        // 45° about Y grows a unit cube's X/Z extent to sqrt(2)
        let rotation = Mat4::from_rotation_y(std::f32::consts::FRAC_PI_4);
        let world = compute_world_bounds(&unit_box(), &rotation);
        assert!((world.max.x - std::f32::consts::SQRT_2).abs() < 1e-5);
        assert!((world.max.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_points_degenerate_axis() {
        let b = Aabb::from_points([Vec3::new(0.0, 1.0, 0.0), Vec3::new(2.0, 1.0, 3.0)]);
        assert_eq!(b.min.y, b.max.y);
        assert_eq!(b.extent(), Vec3::new(2.0, 0.0, 3.0));
    }

    #[test]
    fn test_from_points_empty() {
        let b = Aabb::from_points(std::iter::empty());
        assert_eq!(b, Aabb::new(Vec3::ZERO, Vec3::ZERO));
    }

    #[test]
    fn test_ray_inside_box_hits() {
        let dirs = [Vec3::X, Vec3::NEG_Y, Vec3::new(0.3, -0.4, 0.866).normalize()];
        for d in dirs {
            let ray = Ray::new(Vec3::ZERO, d);
            assert!(intersect(&ray, &unit_box()));
            assert!(intersect(&ray.precompute(), &unit_box()));
        }
    }

    #[test]
    fn test_box_behind_ray_misses() {
        let b = Aabb::new(Vec3::new(-1.0, -1.0, -5.0), Vec3::new(1.0, 1.0, -3.0));
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!intersect(&ray, &b));
        assert!(!intersect(&ray.precompute(), &b));
    }

    #[test]
    fn test_axis_parallel_ray_hits() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        let fast = ray.precompute();
        assert!(fast.inv_direction.y.is_infinite());
        assert!(fast.inv_direction.z.is_infinite());
        assert!(intersect(&ray, &unit_box()));
        assert!(intersect(&fast, &unit_box()));
    }

    #[test]
    fn test_axis_parallel_ray_outside_slab_misses() {
        let ray = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        assert!(!intersect(&ray.precompute(), &unit_box()));
    }

    #[test]
    fn test_negative_zero_direction() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(-0.0, 0.0, -1.0));
        assert!(intersect(&ray.precompute(), &unit_box()));
    }

    #[test]
    fn test_diagonal_ray_miss() {
        let ray = Ray::new(Vec3::new(-5.0, 3.0, 0.0), Vec3::new(1.0, 0.1, 0.0).normalize());
        assert!(!intersect(&ray, &unit_box()));
    }

    #[test]
    fn test_hit_distance() {
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);
        assert_eq!(hit_distance(&ray, &unit_box()), Some(4.0));
        let inside = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(hit_distance(&inside, &unit_box()), Some(0.0));
        let away = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::NEG_X);
        assert_eq!(hit_distance(&away, &unit_box()), None);
    }

    #[test]
    fn test_point_in_box_boundaries() {
        let b = unit_box();
        assert!(point_in_box(Vec3::ZERO, &b));
        assert!(point_in_box(Vec3::ONE, &b));
        assert!(point_in_box(Vec3::splat(-1.0), &b));
        assert!(!point_in_box(Vec3::new(1.0001, 0.0, 0.0), &b));
    }

    #[test]
    fn test_box_box_touching_counts() {
        let a = unit_box();
        let touching = Aabb::new(Vec3::new(1.0, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0));
        let apart = Aabb::new(Vec3::new(1.01, -1.0, -1.0), Vec3::new(3.0, 1.0, 1.0));
        assert!(box_box_intersect(&a, &touching));
        assert!(box_box_intersect(&touching, &a));
        assert!(!box_box_intersect(&a, &apart));
    }

    #[test]
    fn test_box_box_needs_all_axes() {
        let a = unit_box();
        let b = Aabb::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.5, 3.0, 0.5));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_first_hit_prefers_list_order() {
        let near = unit_box();
        let far = Aabb::new(Vec3::new(-1.0, -1.0, -10.0), Vec3::new(1.0, 1.0, -8.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z).precompute();
        assert_eq!(FirstHit.pick(&ray, &[far, near]), Some(0));
        assert_eq!(NearestHit.pick(&ray, &[far, near]), Some(1));
    }

    #[test]
    fn test_strategies_no_hit() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, 5.0), Vec3::NEG_Z).precompute();
        assert_eq!(FirstHit.pick(&ray, &[unit_box()]), None);
        assert_eq!(NearestHit.pick(&ray, &[unit_box()]), None);
        assert_eq!(FirstHit.pick(&ray, &[]), None);
    }

    #[test]
    fn test_strategy_kind_serde() {
        let k: PickStrategyKind = serde_json::from_str(r#""nearest_hit""#).unwrap();
        assert_eq!(k, PickStrategyKind::NearestHit);
        assert_eq!(PickStrategyKind::default(), PickStrategyKind::FirstHit);
    }
}
