//! Global uniform bindings for camera and light data
//!
//! Manages the GPU uniform buffer and bind group for per-frame state shared
//! by every draw: camera matrices, camera position and the light array.

use crate::{
    gfx::{
        camera::FpsCamera,
        scene::{LightUniform, Scene, MAX_LIGHTS},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Global uniform buffer content structure
///
/// Uploaded once per frame and bound to slot 0 of every pipeline.
/// MUST match the FrameUniform struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view: [[f32; 4]; 4],
    projection: [[f32; 4]; 4],
    view_position: [f32; 4], // Camera position (homogeneous coordinates)
    light_count: [u32; 4],   // x = active lights, yzw padding
    lights: [LightUniform; MAX_LIGHTS],
}
// Total: 64 + 64 + 16 + 16 + 64 * MAX_LIGHTS bytes

impl GlobalUBOContent {
    /// Collects the camera and every scene light into the frame block
    ///
    /// Light slots follow the scene's light order; unused slots stay zeroed.
    pub fn from_frame(camera: &FpsCamera, scene: &Scene) -> Self {
        let camera_uniform = camera.uniform();
        let mut lights = [LightUniform::default(); MAX_LIGHTS];
        let mut count = 0;
        for (slot, light) in lights.iter_mut().zip(scene.lights()) {
            *slot = light.uniform();
            count += 1;
        }

        Self {
            view: camera_uniform.view,
            projection: camera_uniform.projection,
            view_position: camera_uniform.view_position,
            light_count: [count, 0, 0, 0],
            lights,
        }
    }

    pub fn light_count(&self) -> u32 {
        self.light_count[0]
    }

    pub fn light(&self, slot: usize) -> Option<&LightUniform> {
        self.lights[..self.light_count() as usize].get(slot)
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer from the camera and scene lights
///
/// Should be called once per frame before any draw is recorded.
///
/// # Arguments
/// * `ubo` - The global uniform buffer to update
/// * `queue` - WGPU command queue for buffer updates
/// * `camera` - Camera providing view, projection and eye position
/// * `scene` - Scene providing the lights
pub fn update_global_ubo(ubo: &mut GlobalUBO, queue: &wgpu::Queue, camera: &FpsCamera, scene: &Scene) {
    ubo.update_content(queue, GlobalUBOContent::from_frame(camera, scene));
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// This is bound to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    /// Sets up the bind group layout for global uniforms but doesn't
    /// create the actual bind group until `create_bind_group()` is called.
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Camera + lights
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Returns the bind group layout
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Returns the bind group for rendering, if created
    pub fn bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.bind_group.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{geometry::Shape, scene::LightSource};
    use cgmath::{Point3, Vector3};

    #[test]
    fn lights_fill_slots_in_scene_order() {
        let camera = FpsCamera::new(Point3::new(0.0, 0.0, 3.0), 1.0);
        let mut scene = Scene::new();
        for x in [1.0, 2.0] {
            scene
                .add_light(
                    LightSource::new(Shape::Cube.mesh()).with_position(Vector3::new(x, 0.0, 0.0)),
                )
                .unwrap();
        }

        let content = GlobalUBOContent::from_frame(&camera, &scene);
        assert_eq!(content.light_count(), 2);
        assert_eq!(content.light(0).unwrap().position[0], 1.0);
        assert_eq!(content.light(1).unwrap().position[0], 2.0);
        assert!(content.light(2).is_none());
        assert_eq!(content.view_position, [0.0, 0.0, 3.0, 1.0]);
    }

    #[test]
    fn layout_size_matches_frame_block() {
        assert_eq!(
            std::mem::size_of::<GlobalUBOContent>(),
            64 + 64 + 16 + 16 + 64 * MAX_LIGHTS
        );
    }
}
