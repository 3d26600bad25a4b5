//! # Viewer Configuration
//!
//! Plain settings structs for the window, camera, orbit controls and renderer.
//! Every struct has a `Default` matching the showcase scene, plus `with_*`
//! builder methods for overrides.
//!
//! ```no_run
//! use courtside::config::ViewerConfig;
//!
//! let config = ViewerConfig::default()
//!     .with_title("Practice court")
//!     .with_window_size(1600, 900)
//!     .with_distance_bounds(3.0, 8.0);
//! assert!(config.validate().is_ok());
//! ```

use cgmath::Vector3;

use crate::error::ConfigError;

/// Window creation settings
#[derive(Debug, Clone, PartialEq)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Courtside".to_string(),
            width: 1200,
            height: 800,
            vsync: true,
        }
    }
}

/// Perspective camera placement
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            eye: Vector3::new(0.0, 1.8, 4.0),
            target: Vector3::new(0.0, 0.0, 0.0),
        }
    }
}

/// Orbit control tuning
#[derive(Debug, Clone, PartialEq)]
pub struct ControlsConfig {
    /// Fraction of the pending rotation applied (and removed) per update
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            damping_factor: 0.05,
            min_distance: 2.0,
            max_distance: 10.0,
            rotate_speed: 0.005,
            zoom_speed: 0.95,
            pan_speed: 0.002,
        }
    }
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq)]
pub struct RendererConfig {
    /// Exposure fed into the ACES tone mapping curve
    pub exposure: f32,
    /// Overrides the shadow map resolution requested by the scene's key light
    pub shadow_map_size: Option<u32>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            exposure: 1.2,
            shadow_map_size: None,
        }
    }
}

/// Complete viewer configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewerConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub controls: ControlsConfig,
    pub renderer: RendererConfig,
}

impl ViewerConfig {
    pub fn with_title(mut self, title: &str) -> Self {
        self.window.title = title.to_owned();
        self
    }

    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window.width = width;
        self.window.height = height;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.window.vsync = vsync;
        self
    }

    /// Sets the orbit distance limits (builder pattern)
    ///
    /// # Arguments
    /// * `min` - Closest the camera may get to its target
    /// * `max` - Farthest the camera may get from its target
    pub fn with_distance_bounds(mut self, min: f32, max: f32) -> Self {
        self.controls.min_distance = min;
        self.controls.max_distance = max;
        self
    }

    pub fn with_damping(mut self, damping_factor: f32) -> Self {
        self.controls.damping_factor = damping_factor;
        self
    }

    pub fn with_exposure(mut self, exposure: f32) -> Self {
        self.renderer.exposure = exposure;
        self
    }

    pub fn with_camera_eye(mut self, eye: Vector3<f32>) -> Self {
        self.camera.eye = eye;
        self
    }

    /// Checks that every setting is usable
    ///
    /// # Returns
    /// The first problem found, if any
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ZeroWindowSize {
                width: self.window.width,
                height: self.window.height,
            });
        }

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::InvalidFov(fov));
        }

        if !(self.camera.near > 0.0 && self.camera.near < self.camera.far) {
            return Err(ConfigError::InvalidClipPlanes {
                near: self.camera.near,
                far: self.camera.far,
            });
        }

        let controls = &self.controls;
        if !(controls.min_distance > 0.0 && controls.min_distance <= controls.max_distance) {
            return Err(ConfigError::InvalidDistanceBounds {
                min: controls.min_distance,
                max: controls.max_distance,
            });
        }

        if !(controls.damping_factor > 0.0 && controls.damping_factor <= 1.0) {
            return Err(ConfigError::InvalidDamping(controls.damping_factor));
        }

        Ok(())
    }
}
