// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles shader programs, render pipelines, the shading-mode state and
//! frame rendering.

pub mod pipeline_manager;
pub mod render_engine;
pub mod shader_program;
pub mod shading;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::{FrameStats, RenderEngine, RendererError};
pub use shader_program::{ShaderError, ShaderProgram, ShaderSources};
pub use shading::{frame_plan, DrawCommand, DrawTarget, ProgramKind, ShadingMode};
