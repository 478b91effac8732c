use crate::gfx::resources::{object_bindings::ObjectBindings, texture_resource::TextureResource};

use super::{
    light_source::{LightSource, MAX_LIGHTS},
    object::Object,
};

/// Stable index of an object inside its [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(usize);

/// Stable index of a light inside its [`Scene`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightHandle(usize);

impl ObjectHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl LightHandle {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("cannot add light: scene already holds the maximum of {capacity} lights")]
    LightCapacityExceeded { capacity: usize },
}

/// Per-frame totals reported by the overlay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    pub objects: usize,
    pub lights: usize,
    pub draw_calls: usize,
    pub triangles: usize,
}

/// Arena owning every object and light by value
///
/// Insertion order is draw order. Handles stay valid until [`Scene::clear`].
#[derive(Debug)]
pub struct Scene {
    objects: Vec<Object>,
    lights: Vec<LightSource>,
    light_capacity: usize,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            lights: Vec::new(),
            light_capacity: MAX_LIGHTS,
        }
    }

    /// Scene admitting at most `capacity` lights, never more than [`MAX_LIGHTS`]
    pub fn with_light_capacity(capacity: usize) -> Self {
        let light_capacity = if capacity > MAX_LIGHTS {
            log::warn!(
                "Light capacity {} exceeds the {} shader slots, clamping",
                capacity,
                MAX_LIGHTS
            );
            MAX_LIGHTS
        } else {
            capacity
        };

        Self {
            light_capacity,
            ..Self::new()
        }
    }

    pub fn light_capacity(&self) -> usize {
        self.light_capacity
    }

    pub fn add_object(&mut self, object: Object) -> ObjectHandle {
        self.objects.push(object);
        ObjectHandle(self.objects.len() - 1)
    }

    pub fn add_light(&mut self, light: LightSource) -> Result<LightHandle, SceneError> {
        if self.lights.len() >= self.light_capacity {
            return Err(SceneError::LightCapacityExceeded {
                capacity: self.light_capacity,
            });
        }
        self.lights.push(light);
        Ok(LightHandle(self.lights.len() - 1))
    }

    pub fn object(&self, handle: ObjectHandle) -> Option<&Object> {
        self.objects.get(handle.0)
    }

    pub fn object_mut(&mut self, handle: ObjectHandle) -> Option<&mut Object> {
        self.objects.get_mut(handle.0)
    }

    pub fn light(&self, handle: LightHandle) -> Option<&LightSource> {
        self.lights.get(handle.0)
    }

    pub fn light_mut(&mut self, handle: LightHandle) -> Option<&mut LightSource> {
        self.lights.get_mut(handle.0)
    }

    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.objects.iter()
    }

    pub fn lights(&self) -> impl Iterator<Item = &LightSource> {
        self.lights.iter()
    }

    /// Handles of every object, in draw order
    pub fn object_handles(&self) -> impl Iterator<Item = ObjectHandle> {
        (0..self.objects.len()).map(ObjectHandle)
    }

    pub fn light_handles(&self) -> impl Iterator<Item = LightHandle> {
        (0..self.lights.len()).map(LightHandle)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Drops every object and light, together with their GPU resources
    pub fn clear(&mut self) {
        log::info!(
            "Tearing down scene ({} objects, {} lights)",
            self.objects.len(),
            self.lights.len()
        );
        self.objects.clear();
        self.lights.clear();
    }

    /// Uploads mesh buffers and per-entity uniforms for the coming frame
    pub fn prepare_gpu(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bindings: &ObjectBindings,
        default_texture: &TextureResource,
    ) {
        for object in &mut self.objects {
            object.prepare_gpu(device, queue, bindings, default_texture);
        }
        for light in &mut self.lights {
            light
                .marker
                .prepare_gpu(device, queue, bindings, default_texture);
        }
    }

    pub fn stats(&self) -> SceneStats {
        let markers = self.lights.iter().map(|light| &light.marker);
        let triangles = self
            .objects
            .iter()
            .chain(markers)
            .map(|object| object.mesh().triangle_count())
            .sum();

        SceneStats {
            objects: self.objects.len(),
            lights: self.lights.len(),
            draw_calls: self.objects.len() + self.lights.len(),
            triangles,
        }
    }
}
