//! Kinematic integration
//!
//! Nothing here is force based: the player turns and slides along its facing,
//! traffic shuttles back and forth on its segment, and smashed items follow a
//! plain ballistic arc.

use glam::{Quat, Vec3};
use std::f32::consts::PI;

use super::entities::{Destructible, DestructibleState, PlayerCar, TrafficCar};
use super::road::{Orientation, RoadSegment};
use super::tick::TickInput;
use crate::consts::{FLIGHT_DEPTH_LIMIT, FORWARD_SCALE, GRAVITY, REVERSE_SCALE, TRAFFIC_SPEED_SCALE};
use crate::forward_from_yaw;

/// Apply one tick of driving input to the player
///
/// Turning is per tick, not per second. Reverse beats forward and right beats
/// left when both of a pair are held. Returns the position before the move so
/// a blocked step can be undone.
pub fn step_player(player: &mut PlayerCar, input: &TickInput, speed: f32, turn_speed: f32, dt: f32) -> Vec3 {
    let previous = player.body.position;

    let distance = if input.backward {
        -speed * REVERSE_SCALE * dt
    } else if input.forward {
        speed * FORWARD_SCALE * dt
    } else {
        0.0
    };

    if input.turn_right {
        player.body.yaw -= turn_speed;
    } else if input.turn_left {
        player.body.yaw += turn_speed;
    }

    player.body.position += forward_from_yaw(player.body.yaw) * distance;
    player.refresh_bounds();
    previous
}

/// Advance every traffic car along its segment, bouncing at the lane ends
pub fn step_traffic(traffic: &mut [TrafficCar], roads: &[RoadSegment], dt: f32) {
    for car in traffic.iter_mut() {
        let Some(road) = roads.get(car.segment) else {
            continue;
        };

        car.body.position += car.direction * car.speed * TRAFFIC_SPEED_SCALE * dt;

        let half_length = road.driving_length / 2.0;
        let offset = road.along(car.body.position) - road.center_along();
        let heading = car.direction.dot(road.orientation.axis());
        if offset.abs() > half_length && offset * heading > 0.0 {
            let clamped = road.center_along() + half_length * offset.signum();
            match road.orientation {
                Orientation::AlongX => car.body.position.x = clamped,
                Orientation::AlongZ => car.body.position.z = clamped,
            }
            car.direction = -car.direction;
            car.body.yaw += PI;
        }

        if car.cooldown > 0.0 {
            car.cooldown -= dt;
        }
        car.refresh_bounds();
    }
}

/// Integrate every flying destructible; items that drop below the depth limit
/// are retired for the rest of the session
pub fn step_flight(destructibles: &mut [Destructible], dt: f32) {
    for item in destructibles.iter_mut() {
        let DestructibleState::Flying {
            velocity,
            spin_axis,
            spin_speed,
        } = &mut item.state
        else {
            continue;
        };

        item.body.position += *velocity * dt;
        item.tumble = (Quat::from_axis_angle(*spin_axis, *spin_speed) * item.tumble).normalize();
        velocity.y -= GRAVITY * dt;

        if item.body.position.y < FLIGHT_DEPTH_LIMIT {
            item.state = DestructibleState::Gone;
        }
        item.refresh_bounds();
    }
}
