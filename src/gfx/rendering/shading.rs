//! Shading-mode state and the per-frame draw plan
//!
//! The renderer resolves the object program from the shading mode once per
//! frame; [`frame_plan`] spells out every draw of a frame in submission order
//! so the ordering rules can be checked without a GPU.

use crate::gfx::scene::{LightHandle, ObjectHandle, Scene};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ShadingMode {
    /// One normal per triangle, derived in the fragment stage
    Flat,
    /// Interpolated vertex normals with per-fragment Phong lighting
    #[default]
    Smooth,
}

impl ShadingMode {
    pub const ALL: [ShadingMode; 2] = [ShadingMode::Flat, ShadingMode::Smooth];

    pub fn toggled(self) -> Self {
        match self {
            ShadingMode::Flat => ShadingMode::Smooth,
            ShadingMode::Smooth => ShadingMode::Flat,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ShadingMode::Flat => "Flat",
            ShadingMode::Smooth => "Smooth (Phong)",
        }
    }

    /// Program used for scene objects in this mode
    pub fn object_program(self) -> ProgramKind {
        match self {
            ShadingMode::Flat => ProgramKind::Flat,
            ShadingMode::Smooth => ProgramKind::PhongObjects,
        }
    }
}

/// The three compiled shader programs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgramKind {
    PhongObjects,
    PhongLights,
    Flat,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 3] = [
        ProgramKind::PhongObjects,
        ProgramKind::PhongLights,
        ProgramKind::Flat,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProgramKind::PhongObjects => "Phong Objects",
            ProgramKind::PhongLights => "Phong Light Markers",
            ProgramKind::Flat => "Flat",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTarget {
    Object(ObjectHandle),
    Light(LightHandle),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawCommand {
    pub program: ProgramKind,
    pub target: DrawTarget,
}

/// Every draw of one frame: objects in insertion order with the mode's
/// program, then each light marker with the light program
pub fn frame_plan(scene: &Scene, mode: ShadingMode) -> impl Iterator<Item = DrawCommand> + '_ {
    let object_program = mode.object_program();

    let objects = scene.object_handles().map(move |handle| DrawCommand {
        program: object_program,
        target: DrawTarget::Object(handle),
    });
    let lights = scene.light_handles().map(|handle| DrawCommand {
        program: ProgramKind::PhongLights,
        target: DrawTarget::Light(handle),
    });

    objects.chain(lights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        geometry::Shape,
        scene::{LightSource, Object},
    };

    fn scene() -> (Scene, Vec<ObjectHandle>, LightHandle) {
        let mesh = Shape::Cube.mesh();
        let mut scene = Scene::new();
        let objects = (0..3)
            .map(|_| scene.add_object(Object::new(mesh.clone())))
            .collect();
        let light = scene.add_light(LightSource::new(mesh)).unwrap();
        (scene, objects, light)
    }

    #[test]
    fn initial_mode_is_smooth() {
        assert_eq!(ShadingMode::default(), ShadingMode::Smooth);
    }

    #[test]
    fn toggling_twice_restores_mode() {
        for mode in ShadingMode::ALL {
            assert_ne!(mode.toggled(), mode);
            assert_eq!(mode.toggled().toggled(), mode);
        }
    }

    #[test]
    fn objects_are_drawn_in_insertion_order_before_lights() {
        let (scene, objects, light) = scene();
        let plan: Vec<DrawCommand> = frame_plan(&scene, ShadingMode::Smooth).collect();

        let targets: Vec<DrawTarget> = plan.iter().map(|command| command.target).collect();
        let mut expected: Vec<DrawTarget> = objects.into_iter().map(DrawTarget::Object).collect();
        expected.push(DrawTarget::Light(light));
        assert_eq!(targets, expected);
    }

    #[test]
    fn flat_mode_swaps_only_the_object_program() {
        let (scene, _, _) = scene();
        for mode in ShadingMode::ALL {
            for command in frame_plan(&scene, mode) {
                let expected = match command.target {
                    DrawTarget::Object(_) => mode.object_program(),
                    DrawTarget::Light(_) => ProgramKind::PhongLights,
                };
                assert_eq!(command.program, expected);
            }
        }
        assert_eq!(ShadingMode::Flat.object_program(), ProgramKind::Flat);
    }

    #[test]
    fn empty_scene_plans_nothing() {
        assert_eq!(frame_plan(&Scene::new(), ShadingMode::Flat).count(), 0);
    }
}
