//! # Scene Management Module
//!
//! This module provides the node hierarchy the showcase is assembled into.
//!
//! ## Key Components
//!
//! - [`Scene`] - Arena of nodes plus shared geometries, materials and lights
//! - [`Node`] / [`NodeId`] - Group or mesh node with a local [`Transform`]
//! - [`NodeBuilder`] - Fluent placement of freshly added nodes
//! - [`Light`] - Ambient and directional lights, optionally shadow casting
//! - [`Vertex3D`] - GPU vertex with position, normal and colour
//!
//! ## Usage
//!
//! ```
//! use courtside::gfx::geometry::generate_sphere;
//! use courtside::gfx::resources::material::Material;
//! use courtside::gfx::scene::Scene;
//!
//! let mut scene = Scene::new();
//! let sphere = scene.add_geometry(generate_sphere(0.12, 32, 32));
//! let orange = scene.add_material(Material::lambert("ball", 0xFF6B35));
//! let ball = scene
//!     .add_mesh(None, "basketball", sphere, orange)
//!     .position(-0.6, 0.95, 0.2)
//!     .cast_shadow()
//!     .id();
//! assert_eq!(scene.mesh_count(), 1);
//! assert!(scene.node(ball).unwrap().cast_shadow);
//! ```

pub mod light;
pub mod node;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{Light, ShadowConfig};
pub use node::{GeometryId, Node, NodeBuilder, NodeId, NodeKind, Transform};
pub use scene::{Scene, SceneStatistics};
pub use vertex::Vertex3D;
