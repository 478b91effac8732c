//! # Graphics Module
//!
//! Camera, renderer, scene and GPU resource handling.
//!
//! - **Camera** ([`camera`]) - First-person yaw/pitch camera and its
//!   keyboard/mouse controller
//! - **Rendering** ([`rendering`]) - Shader programs, pipelines, the shading
//!   mode and the per-frame render pass
//! - **Scene** ([`scene`]) - Arena of objects and lights, meshes and vertices
//! - **Resources** ([`resources`]) - Uniform bindings, textures and the Phong
//!   material catalog
//! - **Geometry** ([`geometry`]) - Cube, icosahedron, icosphere and square
//!
//! ```no_run
//! use ruya::gfx::{geometry::Shape, scene::{Object, Scene}};
//!
//! let mut scene = Scene::new();
//! scene.add_object(Object::new(Shape::Cube.mesh()));
//! // let stats = render_engine.render_scene_simple(&mut scene, &camera)?;
//! ```

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::FpsCamera;
pub use rendering::RenderEngine;
