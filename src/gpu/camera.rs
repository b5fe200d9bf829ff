//! Orbit camera with damped rotation.

use crate::config::ViewConfig;
use crate::uniforms::CameraUniforms;
use glam::{Mat4, Vec3};

const PITCH_LIMIT: f32 = 1.5;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 50.0;
/// Remaining rotation below this is dropped.
const SETTLE_EPSILON: f32 = 1e-5;

/// Orbit camera for viewing the show.
///
/// Input is accumulated as pending rotation. With damping, each
/// [`update`](Camera::update) applies a `damping` fraction of what is left, so
/// the view glides to a stop and the total rotation equals the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Horizontal rotation angle in radians, measured from +Z.
    pub yaw: f32,
    /// Vertical rotation angle in radians.
    pub pitch: f32,
    /// Distance from the target point.
    pub distance: f32,
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Fraction of pending rotation applied per update. 0 applies it at once.
    pub damping: f32,
    pending_yaw: f32,
    pending_pitch: f32,
}

impl Camera {
    /// Camera at `position` looking at `target`.
    pub fn from_position(position: Vec3, target: Vec3) -> Self {
        let offset = position - target;
        let distance = offset.length().max(MIN_DISTANCE);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            distance,
            target,
            fov: 25.0,
            near: 0.1,
            far: 100.0,
            damping: 0.05,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
        }
    }

    pub fn from_config(view: &ViewConfig) -> Self {
        Self {
            fov: view.fov,
            near: view.near,
            far: view.far,
            damping: view.damping,
            ..Self::from_position(Vec3::from_array(view.camera_position), Vec3::ZERO)
        }
    }

    /// Calculate the camera's world position.
    pub fn position(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.target + Vec3::new(x, y, z)
    }

    /// Calculate the view matrix for rendering.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov.to_radians(), aspect, self.near, self.far)
    }

    pub fn uniforms(&self, aspect: f32) -> CameraUniforms {
        CameraUniforms::new(self.view_matrix(), self.projection(aspect))
    }

    /// Queue a rotation in radians.
    pub fn rotate(&mut self, yaw: f32, pitch: f32) {
        self.pending_yaw += yaw;
        self.pending_pitch += pitch;
        if self.damping <= 0.0 {
            self.update();
        }
    }

    /// Move toward (positive) or away from the target.
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Apply pending rotation. Call once per frame.
    pub fn update(&mut self) {
        let factor = if self.damping > 0.0 { self.damping } else { 1.0 };
        let yaw = self.pending_yaw * factor;
        let pitch = self.pending_pitch * factor;
        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        if self.pending_yaw.abs() < SETTLE_EPSILON {
            self.pending_yaw = 0.0;
        }
        if self.pending_pitch.abs() < SETTLE_EPSILON {
            self.pending_pitch = 0.0;
        }

        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    /// Whether rotation is still gliding.
    pub fn is_moving(&self) -> bool {
        self.pending_yaw != 0.0 || self.pending_pitch != 0.0
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&ViewConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_position_round_trips() {
        let position = Vec3::new(1.5, 0.0, 6.0);
        let camera = Camera::from_position(position, Vec3::ZERO);
        assert!((camera.position() - position).length() < 1e-4);

        let raised = Vec3::new(-2.0, 1.0, 3.0);
        let camera = Camera::from_position(raised, Vec3::ZERO);
        assert!((camera.position() - raised).length() < 1e-4);
    }

    #[test]
    fn test_default_matches_view_config() {
        let camera = Camera::default();
        assert_eq!(camera.fov, 25.0);
        assert!((camera.position() - Vec3::new(1.5, 0.0, 6.0)).length() < 1e-4);
    }

    #[test]
    fn test_damped_rotation_sums_to_input() {
        let mut camera = Camera::default();
        let start = camera.yaw;
        camera.rotate(0.5, 0.0);
        assert!(camera.is_moving());
        for _ in 0..1000 {
            camera.update();
        }
        assert!(!camera.is_moving());
        assert!((camera.yaw - start - 0.5).abs() < 1e-3);
    }

    #[test]
    fn test_undamped_rotation_is_immediate() {
        let mut camera = Camera::default();
        camera.damping = 0.0;
        let start = camera.yaw;
        camera.rotate(0.25, 0.0);
        assert!((camera.yaw - start - 0.25).abs() < 1e-6);
        assert!(!camera.is_moving());
    }

    #[test]
    fn test_pitch_and_zoom_are_clamped() {
        let mut camera = Camera::default();
        camera.damping = 0.0;
        camera.rotate(0.0, 10.0);
        assert_eq!(camera.pitch, PITCH_LIMIT);
        camera.zoom(100.0);
        assert_eq!(camera.distance, MIN_DISTANCE);
        camera.zoom(-100.0);
        assert_eq!(camera.distance, MAX_DISTANCE);
    }
}
