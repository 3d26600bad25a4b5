//! # Graphics Module
//!
//! Everything between the court description and the pixels: procedural
//! geometry, the scene graph, materials and GPU resources, the orbit camera
//! and the render engine.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Procedural primitives and shape extrusion
//! - **Scene Management** ([`scene`]) - Node hierarchy, lights and statistics
//! - **Resource Management** ([`resources`]) - Materials, global uniforms and depth textures
//! - **Camera System** ([`camera`]) - Damped orbit camera with distance limits
//! - **Rendering Pipeline** ([`rendering`]) - Lambert shading with shadow mapping
//!
//! ## Usage
//!
//! Scenes are plain data and can be built without a GPU:
//!
//! ```no_run
//! use courtside::gfx::{geometry::generate_sphere, resources::Material, scene::Scene};
//!
//! let mut scene = Scene::new();
//! let sphere = scene.add_geometry(generate_sphere(0.5, 16, 12));
//! let red = scene.add_material(Material::lambert("red", 0xff0000));
//! scene.add_mesh(None, "ball", sphere, red).position(0.0, 1.0, 0.0);
//! assert_eq!(scene.mesh_count(), 1);
//! ```

pub mod camera;
pub mod color;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use color::Color;
pub use rendering::render_engine::RenderEngine;
