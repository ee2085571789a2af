/// Wireframe geometry for the decorative scene
use std::collections::{BTreeSet, HashMap};

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Shape description handed to a scene backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Geometry {
    /// Geodesic sphere; `detail` splits every face edge into `detail + 1` segments
    Icosahedron { radius: f32, detail: u32 },
    /// Axis-aligned box with equal sides
    Cube { size: f32 },
}

impl Geometry {
    pub fn build(&self) -> WireMesh {
        match *self {
            Geometry::Icosahedron { radius, detail } => WireMesh::icosahedron(radius, detail),
            Geometry::Cube { size } => WireMesh::cube(size),
        }
    }
}

/// A mesh reduced to what a wireframe needs: corner points and the edges between them
#[derive(Debug, Clone, Default)]
pub struct WireMesh {
    pub vertices: Vec<Point3<f32>>,
    pub edges: Vec<(usize, usize)>,
}

#[rustfmt::skip]
const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5], [0, 5, 1], [0, 1, 7], [0, 7, 10], [0, 10, 11],
    [1, 5, 9], [5, 11, 4], [11, 10, 2], [10, 7, 6], [7, 1, 8],
    [3, 9, 4], [3, 4, 2], [3, 2, 6], [3, 6, 8], [3, 8, 9],
    [4, 9, 5], [2, 4, 11], [6, 2, 10], [8, 6, 7], [9, 8, 1],
];

impl WireMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Low-poly sphere built by subdividing an icosahedron and pushing every
    /// new vertex out to `radius`
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        let t = (1.0 + 5f32.sqrt()) / 2.0;
        let corners = [
            Vector3::new(-1.0, t, 0.0),
            Vector3::new(1.0, t, 0.0),
            Vector3::new(-1.0, -t, 0.0),
            Vector3::new(1.0, -t, 0.0),
            Vector3::new(0.0, -1.0, t),
            Vector3::new(0.0, 1.0, t),
            Vector3::new(0.0, -1.0, -t),
            Vector3::new(0.0, 1.0, -t),
            Vector3::new(t, 0.0, -1.0),
            Vector3::new(t, 0.0, 1.0),
            Vector3::new(-t, 0.0, -1.0),
            Vector3::new(-t, 0.0, 1.0),
        ];

        let segments = detail as usize + 1;
        let mut builder = WireBuilder::default();

        for face in ICOSAHEDRON_FACES {
            let (a, b, c) = (corners[face[0]], corners[face[1]], corners[face[2]]);

            // Row-major triangular grid of vertex ids over the face
            let mut grid: Vec<Vec<usize>> = Vec::with_capacity(segments + 1);
            for i in 0..=segments {
                let mut row = Vec::with_capacity(segments + 1 - i);
                for j in 0..=(segments - i) {
                    let u = i as f32 / segments as f32;
                    let v = j as f32 / segments as f32;
                    let p = a + (b - a) * u + (c - a) * v;
                    row.push(builder.vertex(Point3::from(p.normalize() * radius)));
                }
                grid.push(row);
            }

            for i in 0..segments {
                for j in 0..(segments - i) {
                    let (p0, p1, p2) = (grid[i][j], grid[i + 1][j], grid[i][j + 1]);
                    builder.triangle(p0, p1, p2);
                    if j + 1 < segments - i {
                        builder.triangle(p1, grid[i + 1][j + 1], p2);
                    }
                }
            }
        }

        builder.finish()
    }

    /// Cube centred on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut vertices = Vec::with_capacity(8);
        for &x in &[-half, half] {
            for &y in &[-half, half] {
                for &z in &[-half, half] {
                    vertices.push(Point3::new(x, y, z));
                }
            }
        }

        // Corners differing in exactly one coordinate share an edge
        let mut edges = Vec::with_capacity(12);
        for a in 0..8usize {
            for bit in [1usize, 2, 4] {
                let b = a ^ bit;
                if a < b {
                    edges.push((a, b));
                }
            }
        }

        Self { vertices, edges }
    }
}

/// Welds coincident vertices and collects each undirected edge once
#[derive(Default)]
struct WireBuilder {
    vertices: Vec<Point3<f32>>,
    lookup: HashMap<(i64, i64, i64), usize>,
    edges: BTreeSet<(usize, usize)>,
}

impl WireBuilder {
    fn vertex(&mut self, p: Point3<f32>) -> usize {
        let key = (
            (p.x * 1e4).round() as i64,
            (p.y * 1e4).round() as i64,
            (p.z * 1e4).round() as i64,
        );
        let vertices = &mut self.vertices;
        *self.lookup.entry(key).or_insert_with(|| {
            vertices.push(p);
            vertices.len() - 1
        })
    }

    fn triangle(&mut self, a: usize, b: usize, c: usize) {
        for (p, q) in [(a, b), (b, c), (c, a)] {
            self.edges.insert((p.min(q), p.max(q)));
        }
    }

    fn finish(self) -> WireMesh {
        WireMesh {
            vertices: self.vertices,
            edges: self.edges.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_icosahedron_counts() {
        let mesh = WireMesh::icosahedron(1.0, 0);
        assert_eq!(mesh.vertices.len(), 12);
        assert_eq!(mesh.edges.len(), 30);
    }

    #[test]
    fn test_subdivided_icosahedron_counts() {
        let mesh = WireMesh::icosahedron(10.0, 1);
        assert_eq!(mesh.vertices.len(), 42);
        assert_eq!(mesh.edges.len(), 120);
    }

    #[test]
    fn test_icosahedron_vertices_on_sphere() {
        let mesh = WireMesh::icosahedron(10.0, 1);
        for v in &mesh.vertices {
            assert!((v.coords.norm() - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn test_cube_edges() {
        let mesh = WireMesh::cube(2.0);
        assert_eq!(mesh.vertices.len(), 8);
        assert_eq!(mesh.edges.len(), 12);
        for &(a, b) in &mesh.edges {
            let length = (mesh.vertices[a] - mesh.vertices[b]).norm();
            assert!((length - 2.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_geometry_build_dispatch() {
        let mesh = Geometry::Cube { size: 1.0 }.build();
        assert_eq!(mesh.edges.len(), 12);
        let mesh = Geometry::Icosahedron { radius: 10.0, detail: 1 }.build();
        assert_eq!(mesh.edges.len(), 120);
    }
}
