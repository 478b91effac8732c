//! The demo scene: a row of textured cubes, a spinning cube, a large floor and
//! one orbiting light

use std::sync::Arc;

use anyhow::Context;
use cgmath::Vector3;

use crate::{
    assets::AssetPaths,
    gfx::{
        geometry::Shape,
        rendering::RenderEngine,
        resources::{Material, TextureResource},
        scene::{LightHandle, LightSource, Object, ObjectHandle, Scene},
    },
};

/// Texture applied to the row of cubes, relative to `<root>/resources`
pub const CUBE_TEXTURE: &str = "asphalt_1k/asphalt010_1k_color.png";

const ROW_LENGTH: usize = 6;
const ROW_SPACING: f32 = 2.5;
const SPIN_RATES: Vector3<f32> = Vector3::new(0.45, 0.90, 0.15);
const LIGHT_ORBIT_RADIUS: f32 = 7.5;

pub struct DemoScene {
    pub scene: Scene,
    spinner: ObjectHandle,
    light: LightHandle,
}

impl DemoScene {
    /// Loads the cube texture and builds the scene
    ///
    /// # Errors
    /// Fails when the cube texture cannot be read or decoded.
    pub fn load(renderer: &RenderEngine, assets: &AssetPaths) -> anyhow::Result<Self> {
        let path = assets.resource(CUBE_TEXTURE);
        let texture = renderer
            .load_texture(&path)
            .with_context(|| format!("failed to load cube texture '{}'", path.display()))?;

        let demo = Self::build(Some(Arc::new(texture)))?;
        let stats = demo.scene.stats();
        log::info!(
            "Scene initialised: {} objects, {} lights",
            stats.objects,
            stats.lights
        );
        Ok(demo)
    }

    /// Builds the scene, sharing one cube mesh between every entity
    pub fn build(cube_texture: Option<Arc<TextureResource>>) -> anyhow::Result<Self> {
        let cube = Shape::Cube.mesh();
        let mut scene = Scene::new();

        for i in 0..ROW_LENGTH {
            let x = (i as f32 - 3.0) * ROW_SPACING;
            let mut object = Object::new(cube.clone())
                .with_name(format!("Textured Cube {i}"))
                .with_position(Vector3::new(x, 2.5, -1.0));
            if let Some(texture) = &cube_texture {
                object = object.with_texture(texture.clone());
            }
            scene.add_object(object);
        }

        let spinner = scene.add_object(
            Object::new(cube.clone())
                .with_name("Spinning Cube")
                .with_position(Vector3::new(3.0, -1.0, -2.0)),
        );

        scene.add_object(
            Object::new(cube.clone())
                .with_name("Floor")
                .with_position(Vector3::new(0.0, -60.0, 0.0))
                .with_uniform_scale(100.0)
                .with_color([0.9, 0.9, 0.9])
                .with_material(Material::Chrome),
        );

        let light = scene
            .add_light(
                LightSource::new(cube)
                    .with_intensities([0.2; 3], [0.7; 3], [1.0; 3])
                    .with_position(light_position(0.0)),
            )
            .context("failed to add the demo light")?;

        Ok(Self {
            scene,
            spinner,
            light,
        })
    }

    /// Poses the animated entities for `elapsed` seconds since startup
    pub fn animate(&mut self, elapsed: f32) {
        if let Some(spinner) = self.scene.object_mut(self.spinner) {
            spinner.rotation = SPIN_RATES * elapsed.to_degrees();
        }
        if let Some(light) = self.scene.light_mut(self.light) {
            light.set_position(light_position(elapsed));
        }
    }
}

fn light_position(elapsed: f32) -> Vector3<f32> {
    Vector3::new(elapsed.cos() * LIGHT_ORBIT_RADIUS, 5.0, 3.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::assert_abs_diff_eq;

    #[test]
    fn scene_layout() {
        let demo = DemoScene::build(None).unwrap();
        let stats = demo.scene.stats();
        assert_eq!(stats.objects, 8);
        assert_eq!(stats.lights, 1);

        let xs: Vec<f32> = demo.scene.objects().take(6).map(|o| o.position.x).collect();
        assert_eq!(xs, vec![-7.5, -5.0, -2.5, 0.0, 2.5, 5.0]);

        let floor = demo.scene.objects().last().unwrap();
        assert_eq!(floor.material, Material::Chrome);
        assert_eq!(floor.scale(), Vector3::new(100.0, 100.0, 100.0));
        assert_eq!(floor.position.y, -60.0);
    }

    #[test]
    fn light_marker_shares_the_cube_mesh() {
        let demo = DemoScene::build(None).unwrap();
        let cube = demo.scene.objects().next().unwrap().mesh();
        let light = demo.scene.lights().next().unwrap();
        assert!(Arc::ptr_eq(cube, light.marker.mesh()));
        assert_eq!(light.marker.color, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn animation_spins_the_cube_and_orbits_the_light() {
        let mut demo = DemoScene::build(None).unwrap();
        let t = std::f32::consts::PI;
        demo.animate(t);

        let spinner = demo.scene.object(demo.spinner).unwrap();
        assert_abs_diff_eq!(spinner.rotation, Vector3::new(81.0, 162.0, 27.0), epsilon = 1e-3);

        let light = demo.scene.light(demo.light).unwrap();
        assert_abs_diff_eq!(light.position(), Vector3::new(-7.5, 5.0, 3.0), epsilon = 1e-4);
    }

    #[test]
    fn shipped_cube_texture_decodes() {
        let assets = AssetPaths::from_root(env!("CARGO_MANIFEST_DIR"));
        let image = image::open(assets.resource(CUBE_TEXTURE)).unwrap();
        assert!(image.width() > 0 && image.height() > 0);
    }
}
