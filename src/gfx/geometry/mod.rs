//! # Procedural Geometry Generation
//!
//! Every mesh in the showcase is generated in code from a handful of
//! parametric primitives. Parameters follow the usual web-3D conventions
//! (segment counts, phi/theta ranges, open-ended cylinders, partial tori), so
//! a figure described with those literals can be reproduced exactly.
//!
//! ## Supported Primitives
//!
//! - **Box**: axis-aligned box of any size
//! - **Sphere**: UV sphere, optionally a phi/theta section of one
//! - **Cylinder** / **Cone**: tapered, optionally open-ended or partial
//! - **Torus**: ring with configurable arc
//! - **Circle** / **Plane**: flat shapes in the XY plane facing +Z
//! - **Extrusion**: a 2D [`Shape`] outline pushed along +Z
//!
//! ## Usage
//!
//! ```rust
//! use courtside::gfx::geometry::{generate_box, generate_sphere, generate_torus};
//!
//! let head = generate_sphere(0.22, 32, 24);
//! let mustache = generate_box(0.12, 0.04, 0.06);
//! let collar = generate_torus(0.39, 0.012, 16, 100, std::f32::consts::TAU);
//! assert!(head.triangle_count() > mustache.triangle_count());
//! assert_eq!(collar.vertex_count(), 17 * 101);
//! ```

pub mod extrude;
pub mod primitives;

pub use extrude::{extrude_shape, Shape};
pub use primitives::*;

use std::collections::HashSet;

use crate::gfx::{color::Color, scene::vertex::Vertex3D};

/// Axis-aligned bounds of a geometry in its local space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

impl BoundingBox {
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }

    pub fn center(&self) -> [f32; 3] {
        [
            (self.min[0] + self.max[0]) * 0.5,
            (self.min[1] + self.max[1]) * 0.5,
            (self.min[2] + self.max[2]) * 0.5,
        ]
    }
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex colours; empty means white
    pub colors: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
    }

    /// Computes the local-space bounds, or `None` for an empty geometry
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let first = *self.vertices.first()?;
        let mut bounds = BoundingBox {
            min: first,
            max: first,
        };
        for v in &self.vertices[1..] {
            for axis in 0..3 {
                bounds.min[axis] = bounds.min[axis].min(v[axis]);
                bounds.max[axis] = bounds.max[axis].max(v[axis]);
            }
        }
        Some(bounds)
    }

    /// Paints a vertical colour ramp over the geometry
    ///
    /// Each vertex gets `bottom.lerp(top, t)` where `t` is its height
    /// normalised to the bounding box. A geometry with no vertical extent is
    /// painted entirely with `bottom`.
    ///
    /// # Arguments
    /// * `top` - Colour at the highest vertex
    /// * `bottom` - Colour at the lowest vertex
    pub fn apply_vertical_gradient(&mut self, top: Color, bottom: Color) {
        let Some(bounds) = self.bounding_box() else {
            return;
        };
        let height = bounds.max[1] - bounds.min[1];

        self.colors = self
            .vertices
            .iter()
            .map(|v| {
                let t = if height > f32::EPSILON {
                    (v[1] - bounds.min[1]) / height
                } else {
                    0.0
                };
                bottom.lerp(top, t).to_array()
            })
            .collect();
    }

    /// Builds a line-list index buffer with every triangle edge exactly once
    ///
    /// Edges shared by two triangles are emitted a single time, in the order
    /// they are first met.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        let mut seen = HashSet::with_capacity(self.indices.len());
        let mut lines = Vec::with_capacity(self.indices.len() * 2);

        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = (a.min(b), a.max(b));
                if a != b && seen.insert(key) {
                    lines.push(a);
                    lines.push(b);
                }
            }
        }

        lines
    }

    /// Interleaves positions, normals and colours into GPU vertices
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                color: self.colors.get(i).copied().unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_of_body_cylinder() {
        let body = generate_cylinder(0.38, 0.23, 1.22, 40);
        let bounds = body.bounding_box().unwrap();
        assert!((bounds.min[1] + 0.61).abs() < 1e-5);
        assert!((bounds.max[1] - 0.61).abs() < 1e-5);
        assert!((bounds.max[0] - 0.38).abs() < 1e-3);
    }

    #[test]
    fn test_empty_geometry_has_no_bounds() {
        assert!(GeometryData::new().bounding_box().is_none());
    }

    #[test]
    fn test_vertical_gradient_runs_bottom_to_top() {
        let top = Color::from_hex(0x9C6B3B);
        let bottom = Color::from_hex(0x6B3A1B);
        let mut head = generate_sphere(0.22, 32, 24);
        head.apply_vertical_gradient(top, bottom);

        assert_eq!(head.colors.len(), head.vertices.len());
        // first ring is the north pole, last ring the south pole
        let north = head.colors[0];
        let south = head.colors[head.colors.len() - 1];
        assert!((north[0] - top.r).abs() < 1e-5);
        assert!((south[0] - bottom.r).abs() < 1e-5);
    }

    #[test]
    fn test_flat_geometry_gradient_uses_bottom_color() {
        let mut strip = GeometryData::new();
        strip.push_vertex([0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0]);
        strip.push_vertex([1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [1.0, 0.0]);
        strip.apply_vertical_gradient(Color::WHITE, Color::BLACK);
        assert_eq!(strip.colors, vec![[0.0, 0.0, 0.0], [0.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_wireframe_edges_are_unique() {
        let quad = generate_plane(1.0, 1.0, 1, 1);
        // two triangles share the diagonal: 6 edges minus 1 duplicate
        let lines = quad.wireframe_indices();
        assert_eq!(lines.len(), 5 * 2);

        let cube = generate_box(1.0, 1.0, 1.0);
        // 6 faces * (4 sides + 1 diagonal), faces do not share vertices
        assert_eq!(cube.wireframe_indices().len(), 30 * 2);
    }

    #[test]
    fn test_to_vertices_defaults_to_white() {
        let cube = generate_box(1.0, 2.0, 3.0);
        let vertices = cube.to_vertices();
        assert_eq!(vertices.len(), 24);
        assert!(vertices.iter().all(|v| v.color == [1.0, 1.0, 1.0]));
    }
}
