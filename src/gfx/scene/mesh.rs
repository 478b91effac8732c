//! Immutable triangle meshes shared between scene entities
//!
//! A [`Mesh`] is handed around as `Arc<Mesh>`: any number of objects and
//! light markers may reference the same geometry, nobody can mutate it, and
//! the GPU buffers go away with the last reference.

use std::sync::OnceLock;

use wgpu::util::DeviceExt;

use crate::gfx::geometry::GeometryData;

use super::vertex::Vertex3D;

/// GPU vertex and index buffers for one mesh
pub struct MeshBuffers {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

pub struct Mesh {
    label: String,
    vertices: Vec<Vertex3D>,
    indices: Vec<u32>,
    buffers: OnceLock<MeshBuffers>,
}

impl Mesh {
    pub fn new(label: impl Into<String>, vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        Self {
            label: label.into(),
            vertices,
            indices,
            buffers: OnceLock::new(),
        }
    }

    pub fn from_geometry(label: impl Into<String>, geometry: &GeometryData) -> Self {
        Self::new(label, geometry.to_vertices(), geometry.indices.clone())
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertices(&self) -> &[Vertex3D] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the GPU buffers have been created yet
    pub fn is_uploaded(&self) -> bool {
        self.buffers.get().is_some()
    }

    /// Returns the GPU buffers, uploading the geometry on first use
    ///
    /// Shared meshes are uploaded exactly once no matter how many entities
    /// reference them.
    pub fn gpu_buffers(&self, device: &wgpu::Device) -> &MeshBuffers {
        self.buffers.get_or_init(|| {
            log::debug!(
                "Uploading mesh '{}' ({} vertices, {} triangles)",
                self.label,
                self.vertices.len(),
                self.triangle_count()
            );

            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", self.label)),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", self.label)),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

            MeshBuffers {
                vertex_buffer,
                index_buffer,
                index_count: self.indices.len() as u32,
            }
        })
    }

    /// The uploaded buffers, if [`Mesh::gpu_buffers`] has run
    pub fn uploaded_buffers(&self) -> Option<&MeshBuffers> {
        self.buffers.get()
    }
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("label", &self.label)
            .field("vertices", &self.vertices.len())
            .field("indices", &self.indices.len())
            .field("uploaded", &self.is_uploaded())
            .finish()
    }
}

pub trait DrawMesh {
    fn draw_mesh(&mut self, buffers: &MeshBuffers);
}

impl DrawMesh for wgpu::RenderPass<'_> {
    fn draw_mesh(&mut self, buffers: &MeshBuffers) {
        self.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
        self.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..buffers.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::gfx::geometry::Shape;

    #[test]
    fn shared_mesh_is_released_with_last_reference() {
        let mesh = Shape::Cube.mesh();
        let marker_mesh = Arc::clone(&mesh);
        assert_eq!(Arc::strong_count(&mesh), 2);

        drop(marker_mesh);
        assert_eq!(Arc::strong_count(&mesh), 1);
        assert!(!mesh.is_uploaded());
    }

    #[test]
    fn mesh_keeps_geometry_counts() {
        let mesh = Shape::Icosphere { subdivisions: 1 }.mesh();
        assert_eq!(mesh.vertex_count(), 42);
        assert_eq!(mesh.triangle_count(), 80);
        assert_eq!(mesh.label(), "Icosphere(1)");
    }
}
