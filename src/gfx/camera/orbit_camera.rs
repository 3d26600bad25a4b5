use cgmath::*;

use super::camera_utils::{Camera, CameraUniform};
use crate::config::{CameraConfig, ControlsConfig};

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Keeps the polar angle off the poles so `look_at` stays well defined
const POLE_EPSILON: f32 = 1e-4;

/// Y-up orbit camera with damped rotation and panning
///
/// The eye sits on a sphere around `target`: `theta` is the azimuth around
/// +Y measured from +Z, `phi` the polar angle measured from +Y. Input only
/// queues deltas; [`OrbitCamera::update`] applies `damping_factor` of the
/// pending rotation and pan each call and decays the rest by the same factor.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub theta: f32,
    pub phi: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub damping_factor: f32,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    pending: PendingMotion,
    home: (Vector3<f32>, Vector3<f32>),
}

#[derive(Debug, Clone, Copy)]
struct PendingMotion {
    theta: f32,
    phi: f32,
    zoom_scale: f32,
    pan: Vector3<f32>,
}

impl Default for PendingMotion {
    fn default() -> Self {
        Self {
            theta: 0.0,
            phi: 0.0,
            zoom_scale: 1.0,
            pan: Vector3::zero(),
        }
    }
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    /// Creates a camera placed at `camera.eye` looking at `camera.target`
    pub fn new(camera: &CameraConfig, controls: &ControlsConfig, aspect: f32) -> Self {
        let mut orbit = Self {
            distance: 1.0,
            theta: 0.0,
            phi: std::f32::consts::FRAC_PI_2,
            eye: camera.eye,
            target: camera.target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds {
                min_distance: controls.min_distance,
                max_distance: controls.max_distance,
                ..Default::default()
            },
            damping_factor: controls.damping_factor,
            aspect,
            fovy: Deg(camera.fov_degrees).into(),
            znear: camera.near,
            zfar: camera.far,
            uniform: CameraUniform::default(),
            pending: PendingMotion::default(),
            home: (camera.eye, camera.target),
        };
        orbit.look_from(camera.eye, camera.target);
        orbit
    }

    /// Re-derives the spherical coordinates from an eye and target
    fn look_from(&mut self, eye: Vector3<f32>, target: Vector3<f32>) {
        let offset = eye - target;
        self.target = target;
        self.distance = offset.magnitude();
        self.theta = offset.x.atan2(offset.z);
        self.phi = if self.distance > 0.0 {
            (offset.y / self.distance).clamp(-1.0, 1.0).acos()
        } else {
            std::f32::consts::FRAC_PI_2
        };
        self.apply_bounds();
        self.update_eye();
        self.update_view_proj();
    }

    pub fn reset_to_default(&mut self) {
        self.pending = PendingMotion::default();
        let (eye, target) = self.home;
        self.look_from(eye, target);
    }

    /// Queues a rotation around the vertical axis
    pub fn rotate_left(&mut self, angle: f32) {
        self.pending.theta -= angle;
    }

    /// Queues a change of the polar angle
    pub fn rotate_up(&mut self, angle: f32) {
        self.pending.phi -= angle;
    }

    /// Scales the distance on the next update; values below 1 zoom in
    pub fn zoom(&mut self, scale: f32) {
        if scale > 0.0 {
            self.pending.zoom_scale *= scale;
        }
    }

    /// Queues a pan relative to the current view direction
    ///
    /// delta.0 = horizontal pan (left/right relative to camera view)
    /// delta.1 = vertical pan (up/down relative to camera view)
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // scale by distance for consistent feel at all zoom levels
        let pan_scale = self.distance;
        self.pending.pan += (right * delta.0 + up * delta.1) * pan_scale;
    }

    /// Applies damped input and refreshes the eye position
    ///
    /// Zoom is applied in full; rotation and pan approach their queued
    /// values geometrically.
    pub fn update(&mut self) {
        let damping = self.damping_factor;

        self.theta += self.pending.theta * damping;
        self.phi += self.pending.phi * damping;
        self.distance *= self.pending.zoom_scale;
        self.target += self.pending.pan * damping;

        self.pending.theta *= 1.0 - damping;
        self.pending.phi *= 1.0 - damping;
        self.pending.pan *= 1.0 - damping;
        self.pending.zoom_scale = 1.0;

        self.apply_bounds();
        self.update_eye();
        self.update_view_proj();
    }

    fn apply_bounds(&mut self) {
        self.phi = self.phi.clamp(
            self.bounds.min_phi.max(POLE_EPSILON),
            self.bounds.max_phi.min(std::f32::consts::PI - POLE_EPSILON),
        );
        self.distance = self
            .distance
            .clamp(self.bounds.min_distance, self.bounds.max_distance);
    }

    fn update_eye(&mut self) {
        self.eye = calculate_cartesian_eye_position(self.phi, self.theta, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_view_proj();
    }

    pub fn update_view_proj(&mut self) {
        self.uniform = CameraUniform::new(self.eye, self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_phi: f32,
    pub max_phi: f32,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: 2.0,
            max_distance: 10.0,
            min_phi: 0.0,
            max_phi: std::f32::consts::PI,
        }
    }
}

fn calculate_cartesian_eye_position(
    phi: f32,
    theta: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * phi.sin() * theta.sin(),
        distance * phi.cos(),
        distance * phi.sin() * theta.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;

    fn court_camera() -> OrbitCamera {
        OrbitCamera::new(&CameraConfig::default(), &ControlsConfig::default(), 1.5)
    }

    #[test]
    fn test_initial_eye_matches_config() {
        let camera = court_camera();
        assert!((camera.eye - Vector3::new(0.0, 1.8, 4.0)).magnitude() < 1e-4);
        assert!((camera.distance - (1.8f32 * 1.8 + 16.0).sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_distance_clamping() {
        let mut camera = court_camera();
        camera.zoom(100.0);
        camera.update();
        assert_eq!(camera.distance, 10.0);

        camera.zoom(0.0001);
        camera.update();
        assert_eq!(camera.distance, 2.0);
    }

    #[test]
    fn test_damping_converges_to_queued_rotation() {
        let mut camera = court_camera();
        let start = camera.theta;
        camera.rotate_left(1.0);

        camera.update();
        // first step applies only the damping fraction
        assert!((camera.theta - (start - 0.05)).abs() < 1e-5);

        for _ in 0..500 {
            camera.update();
        }
        assert!((camera.theta - (start - 1.0)).abs() < 1e-3);
    }

    #[test]
    fn test_polar_angle_stays_off_poles() {
        let mut camera = court_camera();
        camera.damping_factor = 1.0;
        camera.rotate_up(10.0);
        camera.update();
        assert!(camera.phi > 0.0);
        assert!(camera.eye.x.is_finite() && camera.eye.z.is_finite());
    }

    #[test]
    fn test_reset_restores_home_view() {
        let mut camera = court_camera();
        camera.damping_factor = 1.0;
        camera.rotate_left(0.7);
        camera.pan((0.3, 0.1));
        camera.update();
        camera.reset_to_default();
        assert!((camera.eye - Vector3::new(0.0, 1.8, 4.0)).magnitude() < 1e-4);
        assert!(camera.target.magnitude() < 1e-6);

        // nothing queued survives the reset
        camera.update();
        assert!((camera.eye - Vector3::new(0.0, 1.8, 4.0)).magnitude() < 1e-4);
    }

    #[test]
    fn test_zero_resize_keeps_aspect() {
        let mut camera = court_camera();
        camera.resize_projection(0, 600);
        assert_eq!(camera.aspect, 1.5);
        camera.resize_projection(1200, 800);
        assert_eq!(camera.aspect, 1.5);
    }
}
