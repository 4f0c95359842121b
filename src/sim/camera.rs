//! Follow camera with screen shake
//!
//! The camera trails the player at a fixed offset in the car's frame and eases
//! toward it every tick. A shake is a timed effect: while it runs it owns the
//! camera output and the smoothing is paused.

use glam::{Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{
    CAMERA_LOOK_AHEAD, CAMERA_OFFSET, CAMERA_SMOOTHING, INTRO_CAMERA_POSITION, INTRO_CAMERA_TARGET,
};
use crate::forward_from_yaw;

/// Jitter effect started by a traffic collision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenShake {
    /// Seconds left
    pub remaining: f32,
    /// Max jitter per axis (world units, peak to peak)
    pub intensity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    /// Output position (smoothed follow position plus any shake jitter)
    pub position: Vec3,
    /// Look-at point
    pub target: Vec3,
    /// Smoothed follow position without jitter
    anchor: Vec3,
    pub shake: Option<ScreenShake>,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::intro()
    }
}

impl CameraRig {
    /// Fixed framing of the showroom car
    pub fn intro() -> Self {
        Self {
            position: INTRO_CAMERA_POSITION,
            target: INTRO_CAMERA_TARGET,
            anchor: INTRO_CAMERA_POSITION,
            shake: None,
        }
    }

    /// Return to the showroom framing and drop any shake
    pub fn reset_to_intro(&mut self) {
        *self = Self::intro();
    }

    /// Where the camera wants to be for a player pose
    pub fn follow_position(player_position: Vec3, player_yaw: f32) -> Vec3 {
        player_position + Quat::from_rotation_y(player_yaw) * CAMERA_OFFSET
    }

    pub fn look_at(player_position: Vec3, player_yaw: f32) -> Vec3 {
        player_position + forward_from_yaw(player_yaw) * CAMERA_LOOK_AHEAD
    }

    /// Jump straight to the follow pose (run start)
    pub fn snap_to(&mut self, player_position: Vec3, player_yaw: f32) {
        self.anchor = Self::follow_position(player_position, player_yaw);
        self.position = self.anchor;
        self.target = Self::look_at(player_position, player_yaw);
        self.shake = None;
    }

    /// Start (or restart) a shake
    pub fn start_shake(&mut self, duration: f32, intensity: f32) {
        self.shake = Some(ScreenShake {
            remaining: duration,
            intensity,
        });
    }

    #[inline]
    pub fn is_shaking(&self) -> bool {
        self.shake.is_some()
    }

    /// Per-tick update while running
    pub fn follow(&mut self, player_position: Vec3, player_yaw: f32, dt: f32, rng: &mut impl Rng) {
        self.target = Self::look_at(player_position, player_yaw);

        if let Some(shake) = self.shake.as_mut() {
            if shake.remaining > 0.0 {
                let jitter = Vec3::new(
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                    rng.random::<f32>() - 0.5,
                ) * shake.intensity;
                self.position = self.anchor + jitter;
                self.target += jitter * 2.0;
                shake.remaining -= dt;
                return;
            }
            self.shake = None;
        }

        let desired = Self::follow_position(player_position, player_yaw);
        self.anchor = self.anchor.lerp(desired, CAMERA_SMOOTHING);
        self.position = self.anchor;
    }
}
