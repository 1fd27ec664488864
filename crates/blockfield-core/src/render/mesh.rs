#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct MeshVertex {
    pub(crate) position: [f32; 3],
    pub(crate) normal: [f32; 3],
}

// (normal, tangent u, tangent v) per face; u x v == normal keeps CCW winding
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
];

/// Unit cube centered on the origin, 36 vertices, outward normals.
pub(crate) fn unit_cube() -> Vec<MeshVertex> {
    let mut verts = Vec::with_capacity(36);
    for (n, u, v) in FACES {
        let corner = |su: f32, sv: f32| MeshVertex {
            position: [
                0.5 * (n[0] + su * u[0] + sv * v[0]),
                0.5 * (n[1] + su * u[1] + sv * v[1]),
                0.5 * (n[2] + su * u[2] + sv * v[2]),
            ],
            normal: n,
        };
        let (a, b, c, d) = (
            corner(-1.0, -1.0),
            corner(1.0, -1.0),
            corner(1.0, 1.0),
            corner(-1.0, 1.0),
        );
        verts.extend_from_slice(&[a, b, c, a, c, d]);
    }
    verts
}

/// Billboard quad corners for particles, two triangles.
pub(crate) const QUAD_CORNERS: [[f32; 2]; 6] = [
    [-0.5, -0.5],
    [0.5, -0.5],
    [0.5, 0.5],
    [-0.5, -0.5],
    [0.5, 0.5],
    [-0.5, 0.5],
];

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn cube_triangles_face_outward() {
        let verts = unit_cube();
        assert_eq!(verts.len(), 36);
        for tri in verts.chunks(3) {
            let p0 = Vec3::from(tri[0].position);
            let p1 = Vec3::from(tri[1].position);
            let p2 = Vec3::from(tri[2].position);
            let face_normal = (p1 - p0).cross(p2 - p0).normalize();
            assert!(face_normal.dot(Vec3::from(tri[0].normal)) > 0.99);
            for v in tri {
                assert!(Vec3::from(v.position).abs().max_element() <= 0.5 + 1e-6);
            }
        }
    }
}
