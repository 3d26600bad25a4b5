//! GPU resource management
//!
//! Handles materials, depth textures, and the global bind groups.

pub mod global_bindings;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUBO, GlobalUBOContent, ShadowBindings};
pub use material::{Material, MaterialId, MaterialManager};
pub use texture_resource::TextureResource;
