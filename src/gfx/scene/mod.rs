//! # Scene Module
//!
//! The scene is an arena: it owns every [`Object`] and [`LightSource`] by value
//! and hands out copyable handles. Meshes are shared between entities as
//! `Arc<Mesh>` and upload their GPU buffers lazily on first draw.
//!
//! ## Key Components
//!
//! - [`Scene`] - Objects in draw order plus a bounded list of lights
//! - [`Object`] - Transform, color, material, mesh and optional texture
//! - [`LightSource`] - Point light with an emissive marker object
//! - [`Mesh`] - Immutable vertex and index data
//! - [`Vertex3D`] - Position, normal and texture coordinates
//!
//! ## Usage
//!
//! ```
//! use cgmath::Vector3;
//! use ruya::gfx::geometry::Shape;
//! use ruya::gfx::scene::{LightSource, Object, Scene};
//!
//! let cube = Shape::Cube.mesh();
//! let mut scene = Scene::new();
//! scene.add_object(Object::new(cube.clone()).with_position(Vector3::new(0.0, 2.5, -1.0)));
//! let light = scene.add_light(LightSource::new(cube)).unwrap();
//! scene.light_mut(light).unwrap().set_position(Vector3::new(7.5, 5.0, 3.0));
//! assert_eq!(scene.stats().draw_calls, 2);
//! ```

pub mod light_source;
pub mod mesh;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light_source::{LightSource, LightUniform, MAX_LIGHTS};
pub use mesh::{DrawMesh, Mesh};
pub use object::{DrawObject, Object, ObjectUniform};
pub use scene::{LightHandle, ObjectHandle, Scene, SceneError, SceneStats};
pub use vertex::Vertex3D;
