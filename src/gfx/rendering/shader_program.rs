//! Shader programs assembled from WGSL source files
//!
//! A program is a vertex module plus a fragment module. Every stage is
//! prefixed with the shared uniform declarations. wgpu has no geometry stage,
//! so an optional geometry source is compiled into the fragment module ahead
//! of the fragment source; it provides per-primitive helpers such as the face
//! normal used by flat shading.

use std::path::{Path, PathBuf};

/// Entry point every vertex source must define
pub const VERTEX_ENTRY: &str = "vs_main";
/// Entry point every fragment source must define
pub const FRAGMENT_ENTRY: &str = "fs_main";

#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader source '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("shader '{label}' failed to compile: {message}")]
    Compile { label: String, message: String },
    #[error("render pipeline '{label}' could not be created: {message}")]
    Pipeline { label: String, message: String },
}

/// Source file paths for one program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub prelude: Option<PathBuf>,
    pub vertex: PathBuf,
    pub fragment: PathBuf,
    pub geometry: Option<PathBuf>,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<PathBuf>, fragment: impl Into<PathBuf>) -> Self {
        Self {
            prelude: None,
            vertex: vertex.into(),
            fragment: fragment.into(),
            geometry: None,
        }
    }

    pub fn with_geometry(mut self, geometry: impl Into<PathBuf>) -> Self {
        self.geometry = Some(geometry.into());
        self
    }

    /// Source prepended to every stage
    pub fn with_prelude(mut self, prelude: impl Into<PathBuf>) -> Self {
        self.prelude = Some(prelude.into());
        self
    }

    /// Reads every file and returns the (vertex, fragment) WGSL text
    pub fn load(&self) -> Result<(String, String), ShaderError> {
        let prelude = self
            .prelude
            .as_deref()
            .map(read_source)
            .transpose()?
            .unwrap_or_default();
        let geometry = self
            .geometry
            .as_deref()
            .map(read_source)
            .transpose()?
            .unwrap_or_default();

        let vertex = compose(&[&prelude, &read_source(&self.vertex)?]);
        let fragment = compose(&[&prelude, &geometry, &read_source(&self.fragment)?]);
        Ok((vertex, fragment))
    }
}

fn read_source(path: &Path) -> Result<String, ShaderError> {
    std::fs::read_to_string(path).map_err(|source| ShaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn compose(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compiled vertex and fragment modules
pub struct ShaderProgram {
    label: String,
    vertex: wgpu::ShaderModule,
    fragment: wgpu::ShaderModule,
}

impl ShaderProgram {
    /// Reads, composes and compiles a program
    ///
    /// # Errors
    /// [`ShaderError::Io`] for unreadable files, [`ShaderError::Compile`]
    /// when the device rejects either module.
    pub fn from_files(
        device: &wgpu::Device,
        label: &str,
        sources: &ShaderSources,
    ) -> Result<Self, ShaderError> {
        let (vertex_source, fragment_source) = sources.load()?;
        Self::from_wgsl(device, label, &vertex_source, &fragment_source)
    }

    pub fn from_wgsl(
        device: &wgpu::Device,
        label: &str,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let vertex = compile_module(device, &format!("{label} Vertex"), vertex_source)?;
        let fragment = compile_module(device, &format!("{label} Fragment"), fragment_source)?;
        log::debug!("Compiled shader program '{}'", label);

        Ok(Self {
            label: label.to_string(),
            vertex,
            fragment,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn vertex(&self) -> &wgpu::ShaderModule {
        &self.vertex
    }

    pub fn fragment(&self) -> &wgpu::ShaderModule {
        &self.fragment
    }
}

/// Compiles one WGSL module, turning validation failures into errors
/// instead of the device's uncaptured-error panic
pub fn compile_module(
    device: &wgpu::Device,
    label: &str,
    source: &str,
) -> Result<wgpu::ShaderModule, ShaderError> {
    device.push_error_scope(wgpu::ErrorFilter::Validation);
    let module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.into()),
    });
    match pollster::block_on(device.pop_error_scope()) {
        Some(error) => Err(ShaderError::Compile {
            label: label.to_string(),
            message: error.to_string(),
        }),
        None => Ok(module),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_an_io_error_naming_the_path() {
        let sources = ShaderSources::new("no/such/vertex.wgsl", "no/such/fragment.wgsl");
        match sources.load() {
            Err(ShaderError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("no/such/vertex.wgsl"))
            }
            other => panic!("expected an I/O error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn compose_skips_empty_parts() {
        assert_eq!(compose(&["a", "", "b"]), "a\nb");
    }
}
