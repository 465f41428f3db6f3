//! Geometry for the sample programs
//!
//! All solids are centred on the origin and wound counter-clockwise when seen
//! from outside.

use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::foundation::math::Vector3;

/// Upper bound on sphere `slices` and `stacks`
pub const MAX_SPHERE_RESOLUTION: u32 = 1024;

/// Index list drawing [`rectangle`] as two triangles
pub const RECTANGLE_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Unit square centred on the origin, counter-clockwise from the bottom left
pub const fn rectangle() -> [Vertex; 4] {
    [
        Vertex::flat(-0.5, -0.5),
        Vertex::flat(0.5, -0.5),
        Vertex::flat(0.5, 0.5),
        Vertex::flat(-0.5, 0.5),
    ]
}

/// Octahedron edges as one continuous line loop
pub fn octahedron() -> Vec<Vertex> {
    const PATH: [[f32; 3]; 14] = [
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [0.0, -1.0, 0.0],
        [0.0, 0.0, -1.0],
        [0.0, 1.0, 0.0],
        [-1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
    ];
    PATH.iter().map(|&p| Vertex::colored(p, [0.0; 3])).collect()
}

/// Corners of the cube `[-1, 1]^3`, each with its own color
pub fn wire_cube_vertices() -> [Vertex; 8] {
    [
        Vertex::colored([-1.0, -1.0, -1.0], [0.0, 0.0, 0.0]),
        Vertex::colored([-1.0, -1.0, 1.0], [0.0, 0.0, 0.8]),
        Vertex::colored([-1.0, 1.0, 1.0], [0.0, 0.8, 0.0]),
        Vertex::colored([-1.0, 1.0, -1.0], [0.0, 0.8, 0.8]),
        Vertex::colored([1.0, 1.0, -1.0], [0.8, 0.0, 0.0]),
        Vertex::colored([1.0, -1.0, -1.0], [0.8, 0.0, 0.8]),
        Vertex::colored([1.0, -1.0, 1.0], [0.8, 0.8, 0.0]),
        Vertex::colored([1.0, 1.0, 1.0], [0.8, 0.8, 0.8]),
    ]
}

/// The twelve cube edges as index pairs into [`wire_cube_vertices`]
pub const WIRE_CUBE_INDICES: [u32; 24] = [
    1, 0, 2, 7, 3, 0, 4, 7, 5, 0, 6, 7, 1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 1,
];

/// Outward normal and in-face up direction of each cube face
const CUBE_FACES: [([f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, -1.0]),
    ([0.0, -1.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
];

/// Cube `[-1, 1]^3` with four vertices per face carrying the face normal
///
/// Returns the vertices and the triangle index list.
pub fn solid_cube() -> (Vec<Vertex>, Vec<u32>) {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, up) in CUBE_FACES {
        let n = Vector3::from(normal);
        let v = Vector3::from(up);
        // u = v x n, so u x v = n and the corners below run counter-clockwise
        let u = v.cross(&n);
        let base = vertices.len() as u32;

        for (su, sv) in [(-1.0_f32, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = n + u * su + v * sv;
            vertices.push(Vertex::new(position.into(), normal));
        }

        indices.extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    (vertices, indices)
}

/// [`solid_cube`] with each face painted a different color
pub fn solid_cube_colored() -> (Vec<Vertex>, Vec<u32>) {
    let (mut vertices, indices) = solid_cube();
    for vertex in &mut vertices {
        let n = vertex.attribute;
        // positive axes bright, negative axes dark
        vertex.attribute = [
            0.1 + 0.7 * n[0].abs() * (1.0 + n[0]) * 0.5 + 0.2 * n[1].abs(),
            0.1 + 0.7 * n[1].abs() * (1.0 + n[1]) * 0.5 + 0.2 * n[2].abs(),
            0.1 + 0.7 * n[2].abs() * (1.0 + n[2]) * 0.5 + 0.2 * n[0].abs(),
        ];
    }
    (vertices, indices)
}

/// Unit sphere split into `slices` around the y axis and `stacks` from pole to pole
///
/// Positions double as normals. Returns the vertices and the triangle index
/// list. `slices` is clamped to `3..=MAX_SPHERE_RESOLUTION` and `stacks` to
/// `2..=MAX_SPHERE_RESOLUTION`, which keeps every index within `u32`.
pub fn sphere(slices: u32, stacks: u32) -> (Vec<Vertex>, Vec<u32>) {
    let slices = slices.clamp(3, MAX_SPHERE_RESOLUTION);
    let stacks = stacks.clamp(2, MAX_SPHERE_RESOLUTION);

    let mut vertices = Vec::with_capacity(((slices + 1) * (stacks + 1)) as usize);
    for j in 0..=stacks {
        let t = j as f32 / stacks as f32;
        let (r, y) = (PI * t).sin_cos();

        for i in 0..=slices {
            let s = i as f32 / slices as f32;
            let (sin, cos) = (2.0 * PI * s).sin_cos();
            let p = [r * sin, y, r * cos];
            vertices.push(Vertex::new(p, p));
        }
    }

    let mut indices = Vec::with_capacity((slices * stacks * 6) as usize);
    for j in 0..stacks {
        for i in 0..slices {
            let k0 = (slices + 1) * j + i;
            let k1 = k0 + 1;
            let k2 = k1 + slices;
            let k3 = k2 + 1;

            indices.extend([k0, k2, k3, k0, k3, k1]);
        }
    }

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn position(vertices: &[Vertex], index: u32) -> Vector3<f32> {
        Vector3::from(vertices[index as usize].position)
    }

    /// Twice-area normal and centroid of each indexed triangle
    fn triangle_normals<'a>(
        vertices: &'a [Vertex],
        indices: &'a [u32],
    ) -> impl Iterator<Item = (Vector3<f32>, Vector3<f32>)> + 'a {
        indices.chunks(3).map(move |tri| {
            let a = position(vertices, tri[0]);
            let b = position(vertices, tri[1]);
            let c = position(vertices, tri[2]);
            ((b - a).cross(&(c - a)), (a + b + c) / 3.0)
        })
    }

    fn contains(tri: [[f32; 3]; 3], p: [f32; 2]) -> bool {
        let edge = |a: [f32; 3], b: [f32; 3]| {
            (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
        };
        edge(tri[0], tri[1]) >= 0.0 && edge(tri[1], tri[2]) >= 0.0 && edge(tri[2], tri[0]) >= 0.0
    }

    #[test]
    fn test_rectangle_triangles_cover_unit_square() {
        let vertices = rectangle();
        let triangles: Vec<[[f32; 3]; 3]> = RECTANGLE_INDICES
            .chunks(3)
            .map(|t| {
                [
                    vertices[t[0] as usize].position,
                    vertices[t[1] as usize].position,
                    vertices[t[2] as usize].position,
                ]
            })
            .collect();
        assert_eq!(triangles.len(), 2);

        // Both counter-clockwise, half the square each
        let total: f32 = triangle_normals(&vertices, &RECTANGLE_INDICES)
            .map(|(n, _)| {
                assert!(n.z > 0.0);
                n.z * 0.5
            })
            .sum();
        assert_relative_eq!(total, 1.0);

        for step_x in 0..=10 {
            for step_y in 0..=10 {
                let p = [-0.5 + step_x as f32 * 0.1, -0.5 + step_y as f32 * 0.1];
                assert!(
                    triangles.iter().any(|&tri| contains(tri, p)),
                    "({}, {}) not covered",
                    p[0],
                    p[1]
                );
            }
        }
        assert!(!triangles.iter().any(|&tri| contains(tri, [0.6, 0.0])));
    }

    #[test]
    fn test_octahedron_loop_stays_on_vertices() {
        let path = octahedron();
        assert_eq!(path.len(), 14);

        for vertex in &path {
            let p = vertex.position;
            assert_relative_eq!(p[0].abs() + p[1].abs() + p[2].abs(), 1.0);
        }

        // Every segment, including the closing one, is an octahedron edge
        for (a, b) in path.iter().zip(path.iter().cycle().skip(1)) {
            let (a, b) = (Vector3::from(a.position), Vector3::from(b.position));
            assert_relative_eq!(a.dot(&b), 0.0);
        }
    }

    #[test]
    fn test_wire_cube_indices_are_edges() {
        let vertices = wire_cube_vertices();
        let mut edges: Vec<(u32, u32)> = WIRE_CUBE_INDICES
            .chunks(2)
            .map(|e| (e[0].min(e[1]), e[0].max(e[1])))
            .collect();

        for &(a, b) in &edges {
            let d = position(&vertices, a) - position(&vertices, b);
            let changed = d.iter().filter(|c| c.abs() > 0.0).count();
            assert_eq!(changed, 1, "{a}-{b} is not an edge");
        }

        edges.sort_unstable();
        edges.dedup();
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn test_solid_cube_is_closed_and_outward() {
        let (vertices, indices) = solid_cube();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        let mut area = 0.0;
        for (n, centroid) in triangle_normals(&vertices, &indices) {
            assert!(n.dot(&centroid) > 0.0, "triangle faces inward");
            area += n.norm() * 0.5;
        }
        assert_relative_eq!(area, 24.0, epsilon = 1e-4);

        for vertex in &vertices {
            // corners of [-1, 1]^3, normal on the matching face
            assert!(vertex.position.iter().all(|c| c.abs() == 1.0));
            let (p, n) = (Vector3::from(vertex.position), Vector3::from(vertex.attribute));
            assert_relative_eq!(p.dot(&n), 1.0);
        }
    }

    #[test]
    fn test_solid_cube_colors_differ_per_face() {
        let (vertices, _) = solid_cube_colored();
        let mut colors: Vec<[u32; 3]> = vertices
            .chunks(4)
            .map(|face| face[0].attribute.map(f32::to_bits))
            .collect();
        colors.sort_unstable();
        colors.dedup();

        assert_eq!(colors.len(), 6);
        assert!(vertices.iter().flat_map(|v| v.attribute).all(|c| (0.0..=1.0).contains(&c)));
    }

    #[test]
    fn test_sphere_counts_and_range() {
        let (slices, stacks) = (16, 8);
        let (vertices, indices) = sphere(slices, stacks);

        assert_eq!(vertices.len(), ((slices + 1) * (stacks + 1)) as usize);
        assert_eq!(indices.len(), (slices * stacks * 6) as usize);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));

        for vertex in &vertices {
            assert_relative_eq!(Vector3::from(vertex.position).norm(), 1.0, epsilon = 1e-5);
            assert_eq!(vertex.position, vertex.attribute);
        }
    }

    #[test]
    fn test_sphere_triangles_face_outward() {
        let (vertices, indices) = sphere(12, 6);

        for (n, centroid) in triangle_normals(&vertices, &indices) {
            // pole triangles collapse to zero area
            if n.norm_squared() < 1e-10 {
                continue;
            }
            assert!(n.dot(&centroid) > 0.0, "triangle faces inward");
        }
    }

    #[test]
    fn test_sphere_clamps_resolution() {
        let (vertices, indices) = sphere(0, 0);
        assert_eq!(vertices.len(), 4 * 3);
        assert_eq!(indices.len(), 3 * 2 * 6);

        let max = MAX_SPHERE_RESOLUTION as usize;
        let (vertices, indices) = sphere(u32::MAX, 2);
        assert_eq!(vertices.len(), (max + 1) * 3);
        assert_eq!(indices.len(), max * 2 * 6);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }
}
