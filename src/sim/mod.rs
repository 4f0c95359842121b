//! Deterministic simulation module
//!
//! All gameplay logic lives here. Given the same seed, settings and inputs a
//! session plays out identically:
//! - Seeded RNG only, owned by `GameState`
//! - Stable iteration order (entity lists are never reordered)
//! - No rendering or platform dependencies

pub mod aabb;
pub mod camera;
pub mod collision;
pub mod entities;
pub mod movement;
pub mod placement;
pub mod road;
pub mod state;
pub mod tick;
pub mod world;
pub mod worldgen;

pub use aabb::{Aabb, GroundRect, LocalBox};
pub use camera::{CameraRig, ScreenShake};
pub use collision::{collide_traffic, is_off_road, launch_velocity, resolve_static_collision, smash_destructibles};
pub use entities::{
    Body, Destructible, DestructibleKind, DestructibleState, ObstacleKind, PlayerCar, StaticObstacle, TrafficCar,
};
pub use movement::{step_flight, step_player, step_traffic};
pub use placement::{ground, is_too_close, is_within_road_footprint, overlaps_road_footprint};
pub use road::{Orientation, RoadSegment, generate_road_grid};
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
pub use world::{RemainingCounters, World, player_start};
pub use worldgen::{
    ObstacleCategory, PlacementRules, generate_world, place_destructibles, place_static_obstacles, place_traffic,
};
