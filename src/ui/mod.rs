//! # User Interface Module
//!
//! Dear ImGui overlay drawn on top of the scene after the main render pass.
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, input capture and
//!   frame-by-frame rendering
//! - [`overlay_panel`] - The default panel: frame statistics, shading mode,
//!   camera state, scene counts and control help
//!
//! Extra windows can be added with [`RuyaApp::set_ui`].
//!
//! [`RuyaApp::set_ui`]: crate::app::RuyaApp::set_ui

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{overlay_panel, OverlayInfo};
