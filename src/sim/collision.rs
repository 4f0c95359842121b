//! Collision detection and response
//!
//! Everything collides as world-aligned boxes. Static scenery blocks the
//! player; street furniture gets launched; traffic costs points.

use glam::Vec3;
use rand::Rng;

use super::aabb::Aabb;
use super::entities::{Destructible, DestructibleState, PlayerCar, StaticObstacle, TrafficCar};
use super::placement::{ground, is_within_road_footprint};
use super::road::RoadSegment;
use crate::consts::{
    FLIGHT_SPIN_MAX, LAUNCH_LIFT_MIN, LAUNCH_LIFT_RANGE, LAUNCH_SPEED_MIN, LAUNCH_SPEED_RANGE, OFFROAD_BUFFER,
    TRAFFIC_COOLDOWN,
};

/// Undo the player's last translation if it ended inside scenery
///
/// Stops at the first obstacle hit, in list order. The yaw from the same step
/// is kept so the car can still pivot away from a wall. Returns the index of
/// the obstacle that blocked the move.
pub fn resolve_static_collision(player: &mut PlayerCar, obstacles: &[StaticObstacle], previous: Vec3) -> Option<usize> {
    let hit = obstacles
        .iter()
        .position(|obstacle| player.body.bounds.intersects(&obstacle.body.bounds))?;
    player.body.position = previous;
    player.refresh_bounds();
    Some(hit)
}

/// Velocity for an item knocked away from the player
pub fn launch_velocity(object: Vec3, player: Vec3, rng: &mut impl Rng) -> Vec3 {
    let mut direction = (object - player).normalize_or_zero();
    direction.y = LAUNCH_LIFT_MIN + rng.random::<f32>() * LAUNCH_LIFT_RANGE;
    direction * (LAUNCH_SPEED_MIN + rng.random::<f32>() * LAUNCH_SPEED_RANGE)
}

/// Random flight state for a freshly hit item
fn launch(object: Vec3, player: Vec3, rng: &mut impl Rng) -> DestructibleState {
    let velocity = launch_velocity(object, player, rng);
    let spin_axis = Vec3::new(
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() - 0.5,
        rng.random::<f32>() - 0.5,
    )
    .try_normalize()
    .unwrap_or(Vec3::Y);
    let spin_speed = (rng.random::<f32>() - 0.5) * 2.0 * FLIGHT_SPIN_MAX;
    DestructibleState::Flying {
        velocity,
        spin_axis,
        spin_speed,
    }
}

/// Launch every standing item the player overlaps
///
/// All hits in one tick are processed. Returns their indices in list order.
pub fn smash_destructibles(
    destructibles: &mut [Destructible],
    player_bounds: &Aabb,
    player_position: Vec3,
    rng: &mut impl Rng,
) -> Vec<usize> {
    let mut smashed = Vec::new();
    for (index, item) in destructibles.iter_mut().enumerate() {
        if !item.is_active() || !player_bounds.intersects(&item.body.bounds) {
            continue;
        }
        item.state = launch(item.body.position, player_position, rng);
        smashed.push(index);
    }
    smashed
}

/// Find traffic cars the player is touching and start their cooldown
///
/// Cars still cooling down from an earlier hit are ignored. Returns the
/// indices of the cars that registered a new hit.
pub fn collide_traffic(traffic: &mut [TrafficCar], player_bounds: &Aabb) -> Vec<usize> {
    let mut hits = Vec::new();
    for (index, car) in traffic.iter_mut().enumerate() {
        if !car.is_ready() || !player_bounds.intersects(&car.body.bounds) {
            continue;
        }
        car.cooldown = TRAFFIC_COOLDOWN;
        hits.push(index);
    }
    hits
}

/// True when the player is clear of every road footprint (lenient buffer)
#[inline]
pub fn is_off_road(position: Vec3, roads: &[RoadSegment]) -> bool {
    !is_within_road_footprint(ground(position), roads, OFFROAD_BUFFER)
}
