//! Orbit camera around the player
//!
//! [`OrbitCamera`] keeps spherical coordinates around a target with damped
//! input, [`CameraController`] turns mouse and keyboard events into camera
//! motion, and [`CameraManager`] owns both.

pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;

pub use camera_controller::CameraController;
pub use camera_utils::{CameraManager, CameraUniform};
pub use orbit_camera::OrbitCamera;
