//! Error types for the Courtside viewer
//!
//! Library code reports failures through these enums; the binary wraps them
//! in `anyhow` with context.

use thiserror::Error;

/// Failures while bringing up the GPU surface and device.
#[derive(Debug, Error)]
pub enum CourtsideError {
    #[error("failed to create rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Invalid values in [`crate::config::ViewerConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    ZeroWindowSize { width: u32, height: u32 },

    #[error("camera distance bounds are inverted or non-positive (min {min}, max {max})")]
    InvalidDistanceBounds { min: f32, max: f32 },

    #[error("field of view must lie in (0, 180) degrees, got {0}")]
    InvalidFov(f32),

    #[error("clip planes must satisfy 0 < near < far (near {near}, far {far})")]
    InvalidClipPlanes { near: f32, far: f32 },

    #[error("damping factor must lie in (0, 1], got {0}")]
    InvalidDamping(f32),
}

/// Failures while generating procedural geometry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GeometryError {
    #[error("shape outline needs at least 3 distinct points, got {0}")]
    DegenerateShape(usize),

    #[error("extrusion depth must be positive, got {0}")]
    InvalidDepth(f32),

    #[error("could not triangulate shape outline with {0} points")]
    Triangulation(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CourtsideError::NoSurfaceFormat.to_string(),
            "surface reports no supported texture formats"
        );
        let error = ConfigError::ZeroWindowSize {
            width: 0,
            height: 800,
        };
        assert_eq!(error.to_string(), "window size must be non-zero, got 0x800");
    }
}
