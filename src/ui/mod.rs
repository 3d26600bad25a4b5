//! # User Interface Module
//!
//! Dear ImGui overlay for the showcase.
//!
//! ## Key Components
//!
//! - [`UiManager`] - ImGui integration with winit and wgpu, input capture
//! - [`courtside_panel`] - The control panel with one button per [`ShowcaseAction`]
//!
//! ## Input Handling
//!
//! When ImGui wants the mouse or keyboard, window input stops there and
//! camera movement is disabled.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{courtside_panel, ShowcaseAction};
