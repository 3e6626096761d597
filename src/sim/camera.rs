//! Orbit camera follower
//!
//! The camera itself is cosmetic. What the simulation needs from it is the
//! yaw-only movement basis that turns WASD into camera-relative directions.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::tick::InputIntent;
use crate::approach_factor;
use crate::consts::*;

/// Camera-relative horizontal movement directions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveBasis {
    /// Away from the camera, flattened onto the ground plane
    pub forward: Vec3,
    pub right: Vec3,
}

impl Default for MoveBasis {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

impl MoveBasis {
    /// Basis for a camera orbiting at `yaw` (pitch never tilts movement)
    pub fn from_yaw(yaw: f32) -> Self {
        let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        Self { forward, right }
    }

    /// Normalized wish direction for the held keys
    ///
    /// Opposing keys cancel; a zero result stays zero rather than being
    /// normalized into an undefined direction.
    pub fn wish(&self, intent: &InputIntent) -> Vec3 {
        let (x, z) = intent.axes();
        (self.right * x + self.forward * z).normalize_or_zero()
    }
}

/// Orbiting third-person camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraFollower {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    /// Smoothed eye position
    pub position: Vec3,
    /// Point the camera looks at
    pub look_at: Vec3,
}

impl Default for CameraFollower {
    fn default() -> Self {
        Self::new(0.0, CAMERA_DEFAULT_PITCH, CAMERA_DEFAULT_DISTANCE)
    }
}

impl CameraFollower {
    pub fn new(yaw: f32, pitch: f32, distance: f32) -> Self {
        Self {
            yaw,
            pitch: pitch.clamp(CAMERA_PITCH_MIN, CAMERA_PITCH_MAX),
            distance: distance.clamp(CAMERA_DISTANCE_MIN, CAMERA_DISTANCE_MAX),
            position: Vec3::ZERO,
            look_at: Vec3::ZERO,
        }
    }

    /// Offset from the target to the desired eye position
    pub fn orbit_offset(&self) -> Vec3 {
        let (sin_y, cos_y) = self.yaw.sin_cos();
        let (sin_p, cos_p) = self.pitch.sin_cos();
        Vec3::new(sin_y * cos_p, sin_p, cos_y * cos_p) * self.distance
    }

    /// Where the eye wants to be when following `target`
    pub fn desired_position(&self, target: Vec3) -> Vec3 {
        target + self.orbit_offset()
    }

    /// Smoothly follow `target`
    pub fn update(&mut self, dt: f32, target: Vec3) {
        let desired = self.desired_position(target);
        self.position = self
            .position
            .lerp(desired, approach_factor(CAMERA_SMOOTHING, dt));
        self.look_at = target + Vec3::Y * CAMERA_LOOK_HEIGHT;
    }

    /// Jump straight to the desired pose (level load, respawn)
    pub fn snap(&mut self, target: Vec3) {
        self.position = self.desired_position(target);
        self.look_at = target + Vec3::Y * CAMERA_LOOK_HEIGHT;
    }

    /// Movement basis for the current orbit
    pub fn basis(&self) -> MoveBasis {
        MoveBasis::from_yaw(self.yaw)
    }

    /// Apply a pointer/touch drag in pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.yaw -= dx * 0.005;
        self.pitch = (self.pitch - dy * 0.005).clamp(CAMERA_PITCH_MIN, CAMERA_PITCH_MAX);
    }

    /// Apply a wheel delta
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance + delta * 0.01).clamp(CAMERA_DISTANCE_MIN, CAMERA_DISTANCE_MAX);
    }

    /// Apply a pinch gesture: `scale` > 1 means fingers spread (zoom in)
    pub fn pinch(&mut self, start_distance: f32, scale: f32) {
        if scale > 0.0 {
            self.distance = (start_distance / scale).clamp(CAMERA_DISTANCE_MIN, CAMERA_DISTANCE_MAX);
        }
    }
}
