use cgmath::{Matrix4, SquareMatrix, Vector3};
use winit::event::{DeviceEvent, KeyEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};
use crate::config::ViewerConfig;

/// The orbit camera and the input controller that drives it
pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn from_config(config: &ViewerConfig, aspect: f32) -> Self {
        Self {
            camera: OrbitCamera::new(&config.camera, &config.controls, aspect),
            controller: CameraController::new(&config.controls),
        }
    }

    /// Mouse motion, buttons and wheel
    pub fn process_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller.process_events(event, &mut self.camera)
    }

    /// Modifier tracking and the Shift+C view reset
    ///
    /// # Returns
    /// `true` when the camera consumed the key
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        self.controller.process_keyed_events(event, &mut self.camera)
    }

    /// Applies damping and refreshes the camera uniform
    pub fn update(&mut self) {
        self.camera.update();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize_projection(width, height);
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// Eye position, padded to a vec4 for uniform alignment
    pub view_position: [f32; 4],
    pub view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new(eye: Vector3<f32>, view_proj: Matrix4<f32>) -> Self {
        Self {
            view_position: eye.extend(1.0).into(),
            view_proj: view_proj.into(),
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Vector3::new(0.0, 0.0, 0.0), Matrix4::identity())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    #[test]
    fn test_uniform_layout() {
        let view_proj = Matrix4::from_translation(Vector3::new(1.0, 2.0, 3.0));
        let uniform = CameraUniform::new(Vector3::new(0.0, 1.8, 4.0), view_proj);

        assert_eq!(uniform.view_position, [0.0, 1.8, 4.0, 1.0]);
        // column-major: translation sits in the last column
        assert_eq!(uniform.view_proj[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), 80);
    }

    #[test]
    fn test_manager_tracks_config() {
        let config = ViewerConfig::default();
        let mut manager = CameraManager::from_config(&config, 1.5);
        manager.update();

        let [x, y, z, w] = manager.camera.uniform.view_position;
        assert_eq!(w, 1.0);
        let eye = Vector3::new(x, y, z);
        assert!((eye - config.camera.eye).magnitude2() < 1e-3);
    }
}
