//! # Procedural Geometry Generation
//!
//! Generates the primitive shapes used by the demo scene, so no model files
//! are needed.
//!
//! ## Supported Primitives
//!
//! - **Cube**: unit cube centred at the origin, hard per-face normals
//! - **Icosahedron**: 20-face polyhedron inscribed in the unit sphere
//! - **Icosphere**: subdivided icosahedron projected onto the unit sphere
//! - **Square**: unit quad in the XY plane facing +Z
//!
//! ## Usage
//!
//! ```rust
//! use ruya::gfx::geometry::{generate_cube, generate_icosphere, Shape};
//!
//! let cube = generate_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let sphere = generate_icosphere(2);
//! assert_eq!(sphere.triangle_count(), 320);
//!
//! let mesh = Shape::Square.mesh();
//! assert_eq!(mesh.triangle_count(), 2);
//! ```

pub mod primitives;

use std::sync::Arc;

pub use primitives::*;

use crate::gfx::scene::{mesh::Mesh, vertex::Vertex3D};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, Default)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions, normals and texture coordinates into the
    /// vertex format used by the renderer
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

/// The closed set of shapes the demo knows how to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Cube,
    Icosahedron,
    Icosphere { subdivisions: u32 },
    Square,
}

impl Shape {
    pub fn label(&self) -> String {
        match self {
            Shape::Cube => "Cube".to_string(),
            Shape::Icosahedron => "Icosahedron".to_string(),
            Shape::Icosphere { subdivisions } => format!("Icosphere({subdivisions})"),
            Shape::Square => "Square".to_string(),
        }
    }

    pub fn geometry(&self) -> GeometryData {
        match *self {
            Shape::Cube => generate_cube(),
            Shape::Icosahedron => generate_icosahedron(),
            Shape::Icosphere { subdivisions } => generate_icosphere(subdivisions),
            Shape::Square => generate_square(),
        }
    }

    /// Builds a fresh shared mesh for this shape
    pub fn mesh(&self) -> Arc<Mesh> {
        Arc::new(Mesh::from_geometry(self.label(), &self.geometry()))
    }
}
