use std::sync::Arc;

use cgmath::{Deg, Matrix, Matrix4, SquareMatrix, Vector3};

use crate::gfx::{
    camera::camera_utils::convert_matrix4_to_array,
    resources::{
        material::Material,
        object_bindings::{ObjectBindings, ObjectUBO},
        texture_resource::TextureResource,
    },
};

use super::mesh::{DrawMesh, Mesh, MeshBuffers};

/// Smallest scale component an object accepts
pub const MIN_SCALE: f32 = 1e-4;

/// Per-object uniform block, bind group 1 binding 0
///
/// MUST match the `ObjectUniform` struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub material_ambient: [f32; 4],
    pub material_diffuse: [f32; 4],
    /// Specular reflectance, shininess in `w`
    pub material_specular: [f32; 4],
    pub use_texture: u32,
    _padding: [u32; 3],
}

// GPU resources owned by one object: its uniform buffer and bind group
pub struct ObjectGpuResources {
    pub uniform: ObjectUBO,
    pub bind_group: wgpu::BindGroup,
}

/// A drawable entity: transform, surface appearance and a shared mesh
///
/// Rotation is stored as Euler angles in degrees and applied X, then Y, then Z.
pub struct Object {
    name: String,
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    scale: Vector3<f32>,
    pub color: [f32; 3],
    pub material: Material,
    mesh: Arc<Mesh>,
    texture: Option<Arc<TextureResource>>,
    gpu_resources: Option<ObjectGpuResources>, // None until prepare_gpu is called
}

impl Object {
    /// Create a white object with the default material at the origin
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            name: mesh.label().to_string(),
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            color: [1.0, 1.0, 1.0],
            material: Material::Default,
            mesh,
            texture: None,
            gpu_resources: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_position(mut self, position: Vector3<f32>) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Vector3<f32>) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vector3<f32>) -> Self {
        self.set_scale(scale);
        self
    }

    pub fn with_uniform_scale(self, scale: f32) -> Self {
        self.with_scale(Vector3::new(scale, scale, scale))
    }

    pub fn with_color(mut self, color: [f32; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    pub fn with_texture(mut self, texture: Arc<TextureResource>) -> Self {
        self.set_texture(Some(texture));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scale(&self) -> Vector3<f32> {
        self.scale
    }

    /// Sets the scale; non-positive components are raised to [`MIN_SCALE`]
    pub fn set_scale(&mut self, scale: Vector3<f32>) {
        let clamped = Vector3::new(
            scale.x.max(MIN_SCALE),
            scale.y.max(MIN_SCALE),
            scale.z.max(MIN_SCALE),
        );
        if clamped != scale {
            log::warn!(
                "Object '{}': scale {:?} clamped to {:?}",
                self.name,
                scale,
                clamped
            );
        }
        self.scale = clamped;
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn texture(&self) -> Option<&Arc<TextureResource>> {
        self.texture.as_ref()
    }

    /// Replaces the texture; the bind group is rebuilt on the next prepare
    pub fn set_texture(&mut self, texture: Option<Arc<TextureResource>>) {
        self.texture = texture;
        self.gpu_resources = None;
    }

    /// model = T(position) · Rx · Ry · Rz · S(scale)
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Inverse transpose of the model matrix, for transforming normals
    pub fn normal_matrix(&self) -> Matrix4<f32> {
        self.model_matrix()
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity)
    }

    pub fn uniform(&self) -> ObjectUniform {
        let [ambient, diffuse, specular] = self.material.coefficients().to_uniform();
        ObjectUniform {
            model: convert_matrix4_to_array(self.model_matrix()),
            normal_matrix: convert_matrix4_to_array(self.normal_matrix()),
            color: [self.color[0], self.color[1], self.color[2], 1.0],
            material_ambient: ambient,
            material_diffuse: diffuse,
            material_specular: specular,
            use_texture: self.texture.is_some() as u32,
            _padding: [0; 3],
        }
    }

    /// Creates GPU resources on first use and uploads this frame's uniforms
    ///
    /// Untextured objects bind `default_texture` with the texture flag off.
    pub fn prepare_gpu(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bindings: &ObjectBindings,
        default_texture: &TextureResource,
    ) {
        self.mesh.gpu_buffers(device);

        let content = self.uniform();
        match &mut self.gpu_resources {
            Some(resources) => {
                resources.uniform.update_content(queue, content);
            }
            None => {
                let uniform = ObjectUBO::new_with_data(device, &content);
                let texture = self.texture.as_deref().unwrap_or(default_texture);
                let bind_group = bindings.create_bind_group(
                    device,
                    &uniform,
                    texture,
                    &format!("{} Bind Group", self.name),
                );
                log::debug!("Created GPU resources for object '{}'", self.name);
                self.gpu_resources = Some(ObjectGpuResources {
                    uniform,
                    bind_group,
                });
            }
        }
    }

    fn draw_buffers(&self) -> Option<(&wgpu::BindGroup, &MeshBuffers)> {
        let resources = self.gpu_resources.as_ref()?;
        let buffers = self.mesh.uploaded_buffers()?;
        Some((&resources.bind_group, buffers))
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("material", &self.material)
            .field("mesh", &self.mesh.label())
            .field("textured", &self.texture.is_some())
            .finish()
    }
}

pub trait DrawObject {
    /// Binds the object's group 1 and draws its mesh; returns false when
    /// the object has not been prepared yet
    fn draw_object(&mut self, object: &Object) -> bool;
}

impl DrawObject for wgpu::RenderPass<'_> {
    fn draw_object(&mut self, object: &Object) -> bool {
        match object.draw_buffers() {
            Some((bind_group, buffers)) => {
                self.set_bind_group(1, bind_group, &[]);
                self.draw_mesh(buffers);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::Shape;
    use cgmath::{assert_abs_diff_eq, Vector4};

    fn cube() -> Object {
        Object::new(Shape::Cube.mesh())
    }

    #[test]
    fn model_matrix_applies_scale_then_rotation_then_translation() {
        let object = cube()
            .with_position(Vector3::new(1.0, 0.0, 0.0))
            .with_rotation(Vector3::new(0.0, 90.0, 0.0))
            .with_uniform_scale(2.0);

        let world = object.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        let expected = Vector4::new(1.0, 0.0, -2.0, 1.0);
        assert_abs_diff_eq!(world, expected, epsilon = 1e-5);
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        let object = cube().with_rotation(Vector3::new(90.0, 90.0, 0.0));
        // Ry sends +X to -Z, then Rx sends -Z to +Y
        let world = object.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_abs_diff_eq!(world, Vector4::new(0.0, 1.0, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let object = cube().with_scale(Vector3::new(4.0, 1.0, 1.0));
        let normal = object.normal_matrix() * Vector4::new(1.0, 1.0, 0.0, 0.0);
        // Stretching along X flattens a 45° normal towards Y
        assert!(normal.y > normal.x);
    }

    #[test]
    fn non_positive_scale_is_clamped() {
        let object = cube().with_scale(Vector3::new(0.0, -2.0, 3.0));
        assert_eq!(object.scale(), Vector3::new(MIN_SCALE, MIN_SCALE, 3.0));
    }

    #[test]
    fn uniform_packs_material_and_texture_flag() {
        let object = cube()
            .with_color([0.9, 0.9, 0.9])
            .with_material(Material::Chrome);
        let uniform = object.uniform();
        assert_eq!(uniform.color, [0.9, 0.9, 0.9, 1.0]);
        assert_eq!(uniform.material_specular[3], 76.8);
        assert_eq!(uniform.use_texture, 0);
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 208);
    }

    #[test]
    fn name_defaults_to_mesh_label() {
        assert_eq!(cube().name(), "Cube");
        assert_eq!(cube().with_name("floor").name(), "floor");
    }
}
