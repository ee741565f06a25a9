/// Edge meshes and mesh generators
use std::collections::HashSet;

use log::debug;

use crate::error::{Error, Result};
use crate::vector::Vec3;

/// A line segment between two object-space vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub v0: Vec3,
    pub v1: Vec3,
    /// Brightness used when drawing; `None` means full intensity
    pub intensity: Option<f32>,
}

impl Edge {
    pub fn new(v0: Vec3, v1: Vec3) -> Self {
        Self {
            v0,
            v1,
            intensity: None,
        }
    }

    pub fn direction(&self) -> Vec3 {
        self.v1 - self.v0
    }
}

/// An ordered collection of edges
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub edges: Vec<Edge>,
}

impl Mesh {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    /// Like `with_capacity`, but reports allocation failure instead of aborting
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut edges = Vec::new();
        edges.try_reserve_exact(capacity)?;
        Ok(Self { edges })
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Build edges from a vertex list and index pairs
    pub fn from_indexed(vertices: &[Vec3], pairs: &[[usize; 2]]) -> Result<Self> {
        let mut mesh = Self::try_with_capacity(pairs.len())?;
        for &[a, b] in pairs {
            let v0 = vertices.get(a).ok_or(Error::InvalidEdgeIndex {
                index: a,
                len: vertices.len(),
            })?;
            let v1 = vertices.get(b).ok_or(Error::InvalidEdgeIndex {
                index: b,
                len: vertices.len(),
            })?;
            mesh.add_edge(Edge::new(*v0, *v1));
        }
        Ok(mesh)
    }

    /// Collect the unique undirected edges of a triangle soup.
    ///
    /// Vertices are matched by exact bit pattern, so shared edges written
    /// with identical coordinates collapse into one.
    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Result<Self> {
        let mut mesh = Self::try_with_capacity(triangles.len() * 3 / 2)?;
        let mut seen = HashSet::new();

        for tri in triangles {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let (ka, kb) = (vertex_key(&tri[a]), vertex_key(&tri[b]));
                if ka == kb {
                    continue;
                }
                let key = if ka < kb { (ka, kb) } else { (kb, ka) };
                if seen.insert(key) {
                    mesh.add_edge(Edge::new(tri[a], tri[b]));
                }
            }
        }

        debug!(
            "extracted {} unique edges from {} triangles",
            mesh.len(),
            triangles.len()
        );
        Ok(mesh)
    }

    /// Axis-aligned cube centred on the origin: 8 vertices, 12 edges
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let vertices = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        #[rustfmt::skip]
        const PAIRS: [[usize; 2]; 12] = [
            // back face
            [0, 1], [1, 2], [2, 3], [3, 0],
            // front face
            [4, 5], [5, 6], [6, 7], [7, 4],
            // connecting edges
            [0, 4], [1, 5], [2, 6], [3, 7],
        ];

        let edges = PAIRS
            .iter()
            .map(|&[a, b]| Edge::new(vertices[a], vertices[b]))
            .collect();
        Self { edges }
    }

    /// Truncated icosahedron ("soccer ball") with the given circumradius:
    /// 60 vertices joined by 90 edges.
    pub fn soccer_ball(radius: f32) -> Self {
        let vertices = truncated_icosahedron_vertices();
        // Unscaled edge length is exactly 2
        let scale = radius / vertices[0].norm();

        let mut edges = Vec::with_capacity(90);
        for i in 0..vertices.len() {
            for j in (i + 1)..vertices.len() {
                if ((vertices[i] - vertices[j]).norm() - 2.0).abs() < 1e-3 {
                    edges.push(Edge::new(vertices[i] * scale, vertices[j] * scale));
                }
            }
        }
        Self { edges }
    }
}

fn vertex_key(v: &Vec3) -> [u32; 3] {
    // +0.0 and -0.0 are the same vertex
    let bits = |c: f32| if c == 0.0 { 0 } else { c.to_bits() };
    [bits(v.x), bits(v.y), bits(v.z)]
}

/// Cyclic permutations of (0, ±1, ±3φ), (±1, ±(2+φ), ±2φ) and (±φ, ±2, ±φ³)
fn truncated_icosahedron_vertices() -> Vec<Vec3> {
    let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
    let bases = [
        [0.0, 1.0, 3.0 * phi],
        [1.0, 2.0 + phi, 2.0 * phi],
        [phi, 2.0, phi * phi * phi],
    ];

    let mut vertices = Vec::with_capacity(60);
    for base in bases {
        for shift in 0..3 {
            let p = [base[shift % 3], base[(shift + 1) % 3], base[(shift + 2) % 3]];
            for signs in 0..8u8 {
                let flip = |axis: u8, c: f32| if signs & (1 << axis) != 0 { -c } else { c };
                // Zero components only have one sign
                if (0..3).any(|axis| signs & (1 << axis) != 0 && p[axis as usize] == 0.0) {
                    continue;
                }
                vertices.push(Vec3::new(flip(0, p[0]), flip(1, p[1]), flip(2, p[2])));
            }
        }
    }
    vertices
}
