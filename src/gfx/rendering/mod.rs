// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Handles render pipelines, GPU copies of the scene, and frame rendering.

pub mod gpu_scene;
pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use gpu_scene::{DrawKind, GpuScene};
pub use pipeline_manager::{PipelineConfig, PipelineError, PipelineManager, PipelineStats};
pub use render_engine::RenderEngine;
