// src/wgpu_utils/uniform_buffer.rs
use std::marker::PhantomData;

use wgpu::util::DeviceExt;

/// A uniform buffer holding exactly one `Content` value
///
/// Keeps a copy of the last uploaded bytes; writing identical content again
/// is a no-op, so per-frame updates of static objects cost nothing.
pub struct UniformBuffer<Content> {
    buffer: wgpu::Buffer,
    uploaded: Vec<u8>,
    _content: PhantomData<Content>,
}

impl<Content: bytemuck::Pod> UniformBuffer<Content> {
    const USAGE: wgpu::BufferUsages =
        wgpu::BufferUsages::UNIFORM.union(wgpu::BufferUsages::COPY_DST);

    /// Zero-initialised buffer
    pub fn new(device: &wgpu::Device) -> Self {
        Self::new_with_data(device, &<Content as bytemuck::Zeroable>::zeroed())
    }

    pub fn new_with_data(device: &wgpu::Device, initial_content: &Content) -> Self {
        let bytes = bytemuck::bytes_of(initial_content);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&buffer_label::<Content>()),
            contents: bytes,
            usage: Self::USAGE,
        });
        log::debug!("Created {} ({} bytes)", buffer_label::<Content>(), bytes.len());

        Self {
            buffer,
            uploaded: bytes.to_vec(),
            _content: PhantomData,
        }
    }

    /// Queues a write of `content` unless it equals the last upload
    ///
    /// Returns whether a write was queued.
    pub fn update_content(&mut self, queue: &wgpu::Queue, content: Content) -> bool {
        let bytes = bytemuck::bytes_of(&content);
        if self.uploaded.as_slice() == bytes {
            return false;
        }
        queue.write_buffer(&self.buffer, 0, bytes);
        self.uploaded.clear();
        self.uploaded.extend_from_slice(bytes);
        true
    }

    pub fn binding_resource(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }

    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }
}

/// "Uniform <TypeName>", without the module path
fn buffer_label<Content>() -> String {
    let type_name = std::any::type_name::<Content>();
    let short = type_name.rsplit("::").next().unwrap_or(type_name);
    format!("Uniform {short}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::ObjectUniform;

    #[test]
    fn label_drops_module_path() {
        assert_eq!(buffer_label::<ObjectUniform>(), "Uniform ObjectUniform");
        assert_eq!(buffer_label::<u32>(), "Uniform u32");
    }
}
