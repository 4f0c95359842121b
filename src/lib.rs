//! Trash Crash - A city-grid arcade driving game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, movement, collisions, game state)
//! - `platform`: Host-facing plumbing (keyboard state to tick input)
//! - `settings`: Tunable game settings and boundary coercion

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{GameVariant, Settings, SettingsForm};

/// Game configuration constants
pub mod consts {
    use glam::Vec3;

    /// Longest frame step the simulation accepts (stalls are clamped to this)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Road grid layout
    pub const GRID_SIZE: u32 = 5;
    pub const BLOCK_SIZE: f32 = 60.0;
    /// Width of the driving lane
    pub const LANE_WIDTH: f32 = 10.0;
    /// Width of the sidewalk on EACH side of the lane
    pub const SIDEWALK_WIDTH: f32 = 3.0;
    pub const TOTAL_ROAD_WIDTH: f32 = LANE_WIDTH + 2.0 * SIDEWALK_WIDTH;
    /// Road segments span this fraction of the world extent
    pub const ROAD_LENGTH_FRACTION: f32 = 0.9;
    /// Open land around the outermost roads, in blocks
    pub const WORLD_MARGIN_BLOCKS: f32 = 1.5;

    /// Player movement (units/s = speed setting * scale)
    pub const FORWARD_SCALE: f32 = 100.0;
    pub const REVERSE_SCALE: f32 = 80.0;
    /// Traffic movement (units/s = speed * scale)
    pub const TRAFFIC_SPEED_SCALE: f32 = 100.0;

    /// Player spawn height and starting score
    pub const PLAYER_RIDE_HEIGHT: f32 = 0.5;
    pub const STARTING_SCORE: f32 = 100.0;

    /// Intro/game-over showroom pose
    pub const SHOWROOM_POSITION: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const SHOWROOM_YAW: f32 = std::f32::consts::PI * 0.8;
    /// Idle spin while not running (radians per tick)
    pub const SHOWROOM_SPIN: f32 = 0.005;

    /// Static obstacle placement
    pub const PLACEMENT_ATTEMPTS: u32 = 30;
    pub const HOUSE_ROAD_BUFFER: f32 = TOTAL_ROAD_WIDTH / 2.0 + 2.0;
    pub const TREE_ROAD_BUFFER: f32 = TOTAL_ROAD_WIDTH / 2.0 + 1.0;
    pub const HOUSE_MIN_SPACING: f32 = 2.0;
    pub const TREE_HOUSE_SPACING: f32 = 8.0;
    pub const TREE_MIN_SPACING: f32 = 3.0;
    /// Gap kept between an obstacle's bounding volume and any road footprint
    pub const OBSTACLE_ROAD_CLEARANCE: f32 = 0.5;

    /// Destructible placement
    pub const DESTRUCTIBLE_ATTEMPTS: u32 = 50;
    pub const DESTRUCTIBLE_SPACING: f32 = 2.0;
    pub const DESTRUCTIBLE_LENGTH_FRACTION: f32 = 0.95;
    pub const TRASH_CAN_CHANCE: f64 = 0.6;

    /// Traffic placement
    pub const TRAFFIC_START_FRACTION: f32 = 0.8;
    pub const TRAFFIC_SPEED_JITTER: f32 = 0.2;
    pub const TRAFFIC_RIDE_HEIGHT: f32 = 0.5;
    pub const TRAFFIC_COOLDOWN: f32 = 1.0;

    /// Destructible flight
    pub const GRAVITY: f32 = 9.8 * 2.0;
    pub const FLIGHT_DEPTH_LIMIT: f32 = -5.0;
    pub const LAUNCH_LIFT_MIN: f32 = 1.0;
    pub const LAUNCH_LIFT_RANGE: f32 = 0.5;
    pub const LAUNCH_SPEED_MIN: f32 = 15.0;
    pub const LAUNCH_SPEED_RANGE: f32 = 10.0;
    /// Max spin magnitude (radians per tick)
    pub const FLIGHT_SPIN_MAX: f32 = 0.1;

    /// Off-road check is lenient so intersections don't drain
    pub const OFFROAD_BUFFER: f32 = 1.0;
    /// How long the score flashes red after a penalty (seconds)
    pub const PENALTY_FLASH: f32 = 0.15;

    /// Follow camera
    pub const CAMERA_OFFSET: Vec3 = Vec3::new(0.0, 6.0, 12.0);
    pub const CAMERA_LOOK_AHEAD: f32 = 5.0;
    pub const CAMERA_SMOOTHING: f32 = 0.15;
    pub const INTRO_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 4.0, 10.0);
    pub const INTRO_CAMERA_TARGET: Vec3 = Vec3::new(0.0, 1.0, 0.0);
    pub const SHAKE_DURATION: f32 = 0.12;
    pub const SHAKE_INTENSITY: f32 = 10.0;
}

/// Horizontal forward direction for a yaw angle (yaw 0 faces -Z)
#[inline]
pub fn forward_from_yaw(yaw: f32) -> glam::Vec3 {
    glam::Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

/// Half-extent of the world square derived from the road grid
#[inline]
pub fn world_half_extent(grid_size: u32, block_size: f32, total_road_width: f32) -> f32 {
    let half_grid_span = grid_size.saturating_sub(1) as f32 / 2.0 * block_size;
    (half_grid_span * 2.0 + total_road_width + block_size * consts::WORLD_MARGIN_BLOCKS) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_forward_from_yaw() {
        let f = forward_from_yaw(0.0);
        assert!((f.z + 1.0).abs() < 1e-6);
        let f = forward_from_yaw(FRAC_PI_2);
        assert!((f.x + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_world_half_extent() {
        // 5x5 grid at 60 spacing: (240 + 16 + 90) / 2
        let half = world_half_extent(5, 60.0, 16.0);
        assert!((half - 173.0).abs() < 1e-4);
    }
}
