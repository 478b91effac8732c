//! Locating shaders and textures on disk
//!
//! Assets live next to the executable, not the working directory:
//! `<root>/shaders/...` and `<root>/resources/...`. The root can be
//! overridden with `RUYA_ASSET_DIR`; a `cargo run` build, whose executable
//! sits under `target/`, falls back to the crate directory.

use std::path::{Path, PathBuf};

use crate::gfx::rendering::{shader_program::ShaderSources, shading::ProgramKind};

/// Environment variable overriding the asset root
pub const ASSET_DIR_ENV: &str = "RUYA_ASSET_DIR";

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot determine the executable directory: {0}")]
    ExecutableDir(#[source] std::io::Error),
    #[error("no shaders/ directory under '{}'", .root.display())]
    MissingShaders { root: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    root: PathBuf,
}

impl AssetPaths {
    /// Uses `root` as is, without checking it
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Finds the asset root for this process
    ///
    /// # Errors
    /// [`AssetError::MissingShaders`] when no candidate holds a `shaders/`
    /// directory.
    pub fn resolve() -> Result<Self, AssetError> {
        let override_dir = std::env::var_os(ASSET_DIR_ENV).map(PathBuf::from);
        let exe_dir = std::env::current_exe()
            .map_err(AssetError::ExecutableDir)?
            .parent()
            .map(Path::to_path_buf);

        let paths = Self::resolve_from(
            override_dir,
            exe_dir,
            Path::new(env!("CARGO_MANIFEST_DIR")),
        )?;
        log::info!("Asset root: {}", paths.root.display());
        Ok(paths)
    }

    fn resolve_from(
        override_dir: Option<PathBuf>,
        exe_dir: Option<PathBuf>,
        manifest_dir: &Path,
    ) -> Result<Self, AssetError> {
        if let Some(root) = override_dir {
            return Self::checked(root);
        }

        if let Some(exe_dir) = exe_dir {
            if has_shaders(&exe_dir) {
                return Ok(Self::from_root(exe_dir));
            }
            log::debug!(
                "No shaders next to the executable in '{}', trying the crate directory",
                exe_dir.display()
            );
        }

        Self::checked(manifest_dir.to_path_buf())
    }

    fn checked(root: PathBuf) -> Result<Self, AssetError> {
        if has_shaders(&root) {
            Ok(Self::from_root(root))
        } else {
            Err(AssetError::MissingShaders { root })
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn shader_dir(&self) -> PathBuf {
        self.root.join("shaders")
    }

    /// Path of a file under `<root>/resources`
    pub fn resource(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root.join("resources").join(relative)
    }

    /// Source files making up one of the renderer's programs
    pub fn program_sources(&self, kind: ProgramKind) -> ShaderSources {
        let shaders = self.shader_dir();
        let phong = shaders.join("phong");
        let flat = shaders.join("flat");

        let sources = match kind {
            ProgramKind::PhongObjects => {
                ShaderSources::new(phong.join("object.vert.wgsl"), phong.join("object.frag.wgsl"))
            }
            ProgramKind::PhongLights => ShaderSources::new(
                phong.join("object.vert.wgsl"),
                phong.join("light_source.frag.wgsl"),
            ),
            ProgramKind::Flat => ShaderSources::new(
                flat.join("flat_vert.vert.wgsl"),
                flat.join("flat_frag.frag.wgsl"),
            )
            .with_geometry(flat.join("flat_geom.geom.wgsl")),
        };

        sources.with_prelude(shaders.join("uniforms.wgsl"))
    }
}

fn has_shaders(root: &Path) -> bool {
    root.join("shaders").is_dir()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str, with_shaders: bool) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("ruya-assets-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        if with_shaders {
            std::fs::create_dir_all(dir.join("shaders")).unwrap();
        }
        dir
    }

    fn manifest_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    #[test]
    fn override_wins_when_it_has_shaders() {
        let override_dir = scratch_dir("override", true);
        let exe_dir = scratch_dir("override-exe", true);
        let paths =
            AssetPaths::resolve_from(Some(override_dir.clone()), Some(exe_dir), &manifest_dir())
                .unwrap();
        assert_eq!(paths.root(), override_dir.as_path());
    }

    #[test]
    fn override_without_shaders_is_an_error() {
        let override_dir = scratch_dir("bad-override", false);
        let result = AssetPaths::resolve_from(Some(override_dir), None, &manifest_dir());
        assert!(matches!(result, Err(AssetError::MissingShaders { .. })));
    }

    #[test]
    fn executable_dir_is_preferred_over_crate_dir() {
        let exe_dir = scratch_dir("exe", true);
        let paths = AssetPaths::resolve_from(None, Some(exe_dir.clone()), &manifest_dir()).unwrap();
        assert_eq!(paths.root(), exe_dir.as_path());
    }

    #[test]
    fn falls_back_to_crate_dir() {
        let exe_dir = scratch_dir("bare-exe", false);
        let paths = AssetPaths::resolve_from(None, Some(exe_dir), &manifest_dir()).unwrap();
        assert_eq!(paths.root(), manifest_dir().as_path());
    }

    #[test]
    fn flat_program_carries_geometry_source() {
        let paths = AssetPaths::from_root("/opt/ruya");
        let flat = paths.program_sources(ProgramKind::Flat);
        assert_eq!(
            flat.geometry,
            Some(PathBuf::from("/opt/ruya/shaders/flat/flat_geom.geom.wgsl"))
        );
        assert!(paths
            .program_sources(ProgramKind::PhongObjects)
            .geometry
            .is_none());
        assert_eq!(
            paths.program_sources(ProgramKind::PhongLights).fragment,
            PathBuf::from("/opt/ruya/shaders/phong/light_source.frag.wgsl")
        );
    }

    #[test]
    fn shipped_shader_sources_are_readable() {
        let paths = AssetPaths::from_root(manifest_dir());
        for kind in ProgramKind::ALL {
            let (vertex, fragment) = paths.program_sources(kind).load().unwrap();
            assert!(vertex.contains("fn vs_main"));
            assert!(fragment.contains("fn fs_main"));
        }
    }

    #[test]
    fn shader_light_array_matches_host_capacity() {
        let prelude =
            std::fs::read_to_string(manifest_dir().join("shaders/uniforms.wgsl")).unwrap();
        let declaration = format!(
            "const MAX_LIGHTS: u32 = {}u;",
            crate::gfx::scene::MAX_LIGHTS
        );
        assert!(prelude.contains(&declaration));
    }

    #[test]
    fn flat_fragment_uses_face_normals() {
        let paths = AssetPaths::from_root(manifest_dir());
        let (_, fragment) = paths.program_sources(ProgramKind::Flat).load().unwrap();
        assert!(fragment.contains("fn face_normal"));
        assert!(fragment.contains("face_normal(in.world_position)"));
    }
}
