// src/lib.rs
//! Courtside
//!
//! A wgpu showcase that renders a stylized basketball player assembled from
//! primitive meshes, a basketball and a court floor, with tweened shoot and
//! dribble animations, a wireframe toggle and an orbit camera.
//!
//! The scene and its animations live in [`court::Showcase`] and need no GPU;
//! [`CourtsideApp`] puts them in a window.

pub mod animation;
pub mod app;
pub mod config;
pub mod court;
pub mod error;
pub mod gfx;
pub mod performance;
pub mod prelude;
pub mod ui;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::CourtsideApp;
pub use court::Showcase;
pub use error::CourtsideError;
