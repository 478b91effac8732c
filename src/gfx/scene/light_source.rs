use std::sync::Arc;

use cgmath::Vector3;

use super::{mesh::Mesh, object::Object};

/// Number of light slots in the frame uniform block
///
/// MUST match `MAX_LIGHTS` in the shaders.
pub const MAX_LIGHTS: usize = 8;

/// One light slot of the frame uniform block
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 4],
    pub ambient: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
}

/// A point light drawn as an emissive marker object
///
/// The marker's position is the light's position; its color is the emissive
/// color used by the light marker program.
#[derive(Debug)]
pub struct LightSource {
    pub marker: Object,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
}

impl LightSource {
    /// White light with a small marker built from `mesh`
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            marker: Object::new(mesh).with_name("Light").with_uniform_scale(0.2),
            ambient: [0.2, 0.2, 0.2],
            diffuse: [0.7, 0.7, 0.7],
            specular: [1.0, 1.0, 1.0],
        }
    }

    pub fn with_intensities(mut self, ambient: [f32; 3], diffuse: [f32; 3], specular: [f32; 3]) -> Self {
        self.ambient = ambient;
        self.diffuse = diffuse;
        self.specular = specular;
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.marker.position = position;
        self
    }

    pub fn position(&self) -> Vector3<f32> {
        self.marker.position
    }

    pub fn set_position(&mut self, position: Vector3<f32>) {
        self.marker.position = position;
    }

    pub fn uniform(&self) -> LightUniform {
        let p = self.marker.position;
        let rgba = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        LightUniform {
            position: [p.x, p.y, p.z, 1.0],
            ambient: rgba(self.ambient),
            diffuse: rgba(self.diffuse),
            specular: rgba(self.specular),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Shape;

    #[test]
    fn marker_position_is_light_position() {
        let mut light = LightSource::new(Shape::Cube.mesh());
        light.set_position(Vector3::new(7.5, 5.0, 3.0));
        assert_eq!(light.marker.position, Vector3::new(7.5, 5.0, 3.0));
        assert_eq!(light.uniform().position, [7.5, 5.0, 3.0, 1.0]);
    }

    #[test]
    fn marker_can_share_a_mesh_with_an_object() {
        let mesh = Shape::Cube.mesh();
        let object = Object::new(Arc::clone(&mesh));
        let light = LightSource::new(Arc::clone(&mesh));
        assert!(Arc::ptr_eq(object.mesh(), light.marker.mesh()));
        assert_eq!(Arc::strong_count(&mesh), 3);
    }

    #[test]
    fn light_slot_is_four_vec4s() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
    }
}
