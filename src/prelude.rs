//! # Ruya Prelude
//!
//! Commonly used types in one import.
//!
//! ```rust
//! use ruya::prelude::*;
//!
//! let mut scene = Scene::new();
//! let cube = Shape::Cube.mesh();
//! scene.add_object(Object::new(cube.clone()).with_material(Material::Gold));
//! scene.add_light(LightSource::new(cube)).unwrap();
//! assert_eq!(frame_plan(&scene, ShadingMode::Flat).count(), 2);
//! ```

pub use crate::app::RuyaApp;
pub use crate::config::DemoConfig;
pub use crate::gfx::{
    camera::{CameraController, FpsCamera},
    geometry::Shape,
    rendering::{frame_plan, RenderEngine, ShadingMode},
    resources::{Material, TextureResource},
    scene::{LightHandle, LightSource, Mesh, Object, ObjectHandle, Scene, SceneError},
};
pub use crate::input::{Action, InputState, KeyBindings};

// Math types used throughout the public API
pub use cgmath::{Deg, Point3, Rad, Vector3};
