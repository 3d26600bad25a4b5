// src/wgpu_utils/mod.rs
//! Small wgpu helpers shared by the render engine and the resource modules
//!
//! Bind group layouts and their bind groups are built with the same
//! positional builders, and every uniform block lives in a [`UniformBuffer`].

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;
