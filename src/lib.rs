// src/lib.rs
//! Ruya
//!
//! A small real-time forward renderer built on wgpu and winit: a scene of
//! cubes and a point light, a first-person camera, flat and Phong shading
//! modes and a Dear ImGui overlay.

pub mod app;
pub mod assets;
pub mod config;
pub mod demo;
pub mod gfx;
pub mod input;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::RuyaApp;
pub use config::DemoConfig;
