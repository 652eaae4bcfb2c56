use glam::Vec3;
use shared::Primitive;

/// Floats per vertex: position(3) + normal(3) + uv(2)
pub const STRIDE: usize = 8;

const ARROW_SEGMENTS: u32 = 12;

/// CPU-side mesh data, interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z, u, v]
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / STRIDE
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex positions in model space
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(STRIDE)
            .map(|v| Vec3::new(v[0], v[1], v[2]))
    }

    pub fn from_primitive(primitive: &Primitive) -> Self {
        match primitive {
            Primitive::Cube {
                width,
                height,
                depth,
            } => cube(*width, *height, *depth),
            Primitive::Sphere {
                radius,
                rings,
                sectors,
            } => sphere(*radius, (*rings).max(2), (*sectors).max(3)),
            Primitive::Arrow {
                length,
                shaft_radius,
            } => arrow(*length, *shaft_radius, ARROW_SEGMENTS),
        }
    }
}

/// Box centered at the origin
pub fn cube(w: f32, h: f32, d: f32) -> MeshData {
    let half = Vec3::new(w, h, d) * 0.5;

    // Outward normal, then the two in-plane axes the quad spans
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let uvs = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

    let mut vertices = Vec::with_capacity(24 * STRIDE);
    let mut indices = Vec::with_capacity(36);

    for (normal, u, v) in faces {
        let base = (vertices.len() / STRIDE) as u32;
        let quad = [normal - u - v, normal + u - v, normal + u + v, normal - u + v];
        for (corner, uv) in quad.into_iter().zip(uvs) {
            push_vert(&mut vertices, corner * half, normal, uv);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    MeshData { vertices, indices }
}

/// UV sphere centered at the origin
pub fn sphere(radius: f32, rings: u32, sectors: u32) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for r in 0..=rings {
        let phi = std::f32::consts::PI * r as f32 / rings as f32;
        let sp = phi.sin();
        let cp = phi.cos();

        for s in 0..=sectors {
            let theta = std::f32::consts::TAU * s as f32 / sectors as f32;
            let n = Vec3::new(sp * theta.cos(), cp, sp * theta.sin());
            let uv = [s as f32 / sectors as f32, r as f32 / rings as f32];
            push_vert(&mut vertices, n * radius, n, uv);
        }
    }

    for r in 0..rings {
        for s in 0..sectors {
            let i0 = r * (sectors + 1) + s;
            let i1 = i0 + 1;
            let i2 = i0 + sectors + 1;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData { vertices, indices }
}

/// Gizmo arrow along +Y: a shaft over the first 80% of `length`, then a cone head.
pub fn arrow(length: f32, shaft_radius: f32, segments: u32) -> MeshData {
    let shaft_len = length * 0.8;
    let head_radius = shaft_radius * 2.5;
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..segments {
        let (c0, s0, c1, s1) = ring_angles(i, segments);
        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);

        // Shaft quad
        let base = (vertices.len() / STRIDE) as u32;
        push_vert(&mut vertices, n0 * shaft_radius, n0, [0.0, 0.0]);
        push_vert(&mut vertices, n1 * shaft_radius, n1, [1.0, 0.0]);
        push_vert(&mut vertices, n1 * shaft_radius + Vec3::Y * shaft_len, n1, [1.0, 1.0]);
        push_vert(&mut vertices, n0 * shaft_radius + Vec3::Y * shaft_len, n0, [0.0, 1.0]);
        indices.extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);

        // Head side
        let base = (vertices.len() / STRIDE) as u32;
        let tip_normal = (n0 + n1).normalize_or_zero();
        push_vert(&mut vertices, Vec3::Y * length, tip_normal, [0.5, 1.0]);
        push_vert(&mut vertices, n0 * head_radius + Vec3::Y * shaft_len, n0, [0.0, 0.0]);
        push_vert(&mut vertices, n1 * head_radius + Vec3::Y * shaft_len, n1, [1.0, 0.0]);
        indices.extend_from_slice(&[base, base + 2, base + 1]);

        // Head base
        let base = (vertices.len() / STRIDE) as u32;
        push_vert(&mut vertices, Vec3::Y * shaft_len, Vec3::NEG_Y, [0.5, 0.5]);
        push_vert(&mut vertices, n0 * head_radius + Vec3::Y * shaft_len, Vec3::NEG_Y, [0.0, 0.0]);
        push_vert(&mut vertices, n1 * head_radius + Vec3::Y * shaft_len, Vec3::NEG_Y, [1.0, 0.0]);
        indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    MeshData { vertices, indices }
}

// ── Helpers ──────────────────────────────────────────────────

fn ring_angles(i: u32, segments: u32) -> (f32, f32, f32, f32) {
    let a0 = (i as f32) * std::f32::consts::TAU / segments as f32;
    let a1 = ((i + 1) as f32) * std::f32::consts::TAU / segments as f32;
    (a0.cos(), a0.sin(), a1.cos(), a1.sin())
}

fn push_vert(v: &mut Vec<f32>, p: Vec3, n: Vec3, uv: [f32; 2]) {
    v.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z, uv[0], uv[1]]);
}
