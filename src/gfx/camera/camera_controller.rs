use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
};

use super::orbit_camera::OrbitCamera;
use crate::config::ControlsConfig;

/// Translates raw mouse and keyboard input into orbit camera motion
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
}

impl CameraController {
    pub fn new(controls: &ControlsConfig) -> Self {
        Self {
            rotate_speed: controls.rotate_speed,
            zoom_speed: controls.zoom_speed,
            pan_speed: controls.pan_speed,
            is_shift_held: false,
            is_mouse_pressed: false,
        }
    }

    /// Feeds a device event to the camera
    ///
    /// # Returns
    /// `true` when the camera received motion
    pub fn process_events(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
                false
            }
            DeviceEvent::MouseWheel { delta } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => *y as f32 / 40.0,
                };
                // scrolling up moves the camera closer
                camera.zoom(self.zoom_speed.powf(lines));
                true
            }
            DeviceEvent::MouseMotion { delta } if self.is_mouse_pressed => {
                if self.is_shift_held {
                    camera.pan((
                        -delta.0 as f32 * self.pan_speed,
                        delta.1 as f32 * self.pan_speed,
                    ));
                } else {
                    camera.rotate_left(delta.0 as f32 * self.rotate_speed);
                    camera.rotate_up(delta.1 as f32 * self.rotate_speed);
                }
                true
            }
            _ => false,
        }
    }

    /// Tracks shift and handles Shift+C
    ///
    /// # Returns
    /// `true` if the key was consumed by the camera
    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
                false
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } if self.is_shift_held => {
                log::debug!("Resetting camera to default position");
                camera.reset_to_default();
                true
            }
            _ => false,
        }
    }

    /// Drops a held mouse button, e.g. when the UI captures the pointer
    pub fn release(&mut self) {
        self.is_mouse_pressed = false;
    }

    pub fn is_panning(&self) -> bool {
        self.is_mouse_pressed && self.is_shift_held
    }

    pub fn is_rotating(&self) -> bool {
        self.is_mouse_pressed && !self.is_shift_held
    }

    pub fn is_shift_held(&self) -> bool {
        self.is_shift_held
    }
}
