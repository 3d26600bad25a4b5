//! Scene lights

use cgmath::{ortho, Matrix4, Point3, Vector3};

use crate::gfx::{camera::orbit_camera::OPENGL_TO_WGPU_MATRIX, color::Color};

/// Orthographic shadow camera of a directional light
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowConfig {
    /// Width and height of the square depth map in texels
    pub map_size: u32,
    pub near: f32,
    pub far: f32,
    /// Half width and half height of the orthographic frustum
    pub half_extent: f32,
}

impl Default for ShadowConfig {
    fn default() -> Self {
        Self {
            map_size: 2048,
            near: 0.5,
            far: 50.0,
            half_extent: 10.0,
        }
    }
}

impl ShadowConfig {
    /// Light-space view-projection looking from `position` at the origin
    pub fn view_proj(&self, position: Vector3<f32>) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(
            Point3::new(position.x, position.y, position.z),
            Point3::new(0.0, 0.0, 0.0),
            Vector3::unit_y(),
        );
        let e = self.half_extent;
        OPENGL_TO_WGPU_MATRIX * ortho(-e, e, -e, e, self.near, self.far) * view
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient {
        color: Color,
        intensity: f32,
    },
    /// Parallel light shining from `position` towards the origin
    Directional {
        color: Color,
        intensity: f32,
        position: Vector3<f32>,
        shadow: Option<ShadowConfig>,
    },
}

impl Light {
    pub fn ambient(color: Color, intensity: f32) -> Self {
        Light::Ambient { color, intensity }
    }

    pub fn directional(color: Color, intensity: f32, position: Vector3<f32>) -> Self {
        Light::Directional {
            color,
            intensity,
            position,
            shadow: None,
        }
    }

    /// Enables shadow casting (directional lights only)
    pub fn with_shadow(self, config: ShadowConfig) -> Self {
        match self {
            Light::Directional {
                color,
                intensity,
                position,
                ..
            } => Light::Directional {
                color,
                intensity,
                position,
                shadow: Some(config),
            },
            ambient => ambient,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Light::Ambient { color, .. } | Light::Directional { color, .. } => *color,
        }
    }

    pub fn intensity(&self) -> f32 {
        match self {
            Light::Ambient { intensity, .. } | Light::Directional { intensity, .. } => *intensity,
        }
    }

    pub fn shadow(&self) -> Option<&ShadowConfig> {
        match self {
            Light::Directional { shadow, .. } => shadow.as_ref(),
            Light::Ambient { .. } => None,
        }
    }

    /// Linear-space colour premultiplied by intensity
    pub fn radiance(&self) -> [f32; 3] {
        let [r, g, b] = self.color().to_linear();
        let i = self.intensity();
        [r * i, g * i, b * i]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Vector4;

    #[test]
    fn test_shadow_only_on_directional() {
        let ambient = Light::ambient(Color::from_hex(0x404040), 0.4).with_shadow(ShadowConfig::default());
        assert!(ambient.shadow().is_none());

        let key = Light::directional(Color::WHITE, 1.0, Vector3::new(5.0, 10.0, 5.0))
            .with_shadow(ShadowConfig::default());
        assert_eq!(key.shadow().map(|s| s.map_size), Some(2048));
    }

    #[test]
    fn test_origin_projects_inside_shadow_frustum() {
        let config = ShadowConfig::default();
        let clip = config.view_proj(Vector3::new(5.0, 10.0, 5.0)) * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.x.abs() < 1e-4 && clip.y.abs() < 1e-4);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn test_radiance_scales_with_intensity() {
        let rim = Light::directional(Color::WHITE, 0.2, Vector3::new(0.0, 5.0, -10.0));
        let r = rim.radiance();
        assert!((r[0] - 0.2).abs() < 1e-6);
    }
}
