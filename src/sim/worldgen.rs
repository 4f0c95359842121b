//! Procedural world generation
//!
//! Static decor is scattered by rejection sampling: draw a random spot, throw
//! it away if it breaks a placement rule, try again up to a fixed budget. A
//! spot that never fits is simply skipped, so the final count may come in
//! under the request.

use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use super::entities::{Destructible, DestructibleKind, ObstacleKind, PlayerCar, StaticObstacle, TrafficCar};
use super::placement::{ground, is_too_close, is_within_road_footprint, overlaps_any, overlaps_road_footprint};
use super::road::{Orientation, RoadSegment, generate_road_grid};
use super::world::{World, player_start};
use crate::consts::*;
use crate::settings::Settings;
use crate::world_half_extent;

/// Which kind of scenery a placement pass produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleCategory {
    House,
    Tree,
}

/// Rejection rules for one placement pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRules {
    /// Candidate centers closer than this to a road footprint are rejected
    pub road_buffer: f32,
    /// Minimum center distance to any house
    pub house_spacing: f32,
    /// Minimum center distance to any tree
    pub tree_spacing: f32,
    /// Half-size of the square the candidates are drawn from
    pub half_extent: f32,
    /// Tries per requested obstacle
    pub attempts: u32,
}

impl PlacementRules {
    pub fn houses(half_extent: f32) -> Self {
        Self {
            road_buffer: HOUSE_ROAD_BUFFER,
            house_spacing: HOUSE_MIN_SPACING,
            tree_spacing: 0.0,
            half_extent,
            attempts: PLACEMENT_ATTEMPTS,
        }
    }

    pub fn trees(half_extent: f32) -> Self {
        Self {
            road_buffer: TREE_ROAD_BUFFER,
            house_spacing: TREE_HOUSE_SPACING,
            tree_spacing: TREE_MIN_SPACING,
            half_extent,
            attempts: PLACEMENT_ATTEMPTS,
        }
    }
}

/// Uniform in [-0.5, 0.5)
#[inline]
fn centered(rng: &mut impl Rng) -> f32 {
    rng.random::<f32>() - 0.5
}

#[inline]
fn random_sign(rng: &mut impl Rng) -> f32 {
    if rng.random_bool(0.5) { 1.0 } else { -1.0 }
}

fn random_obstacle_kind(category: ObstacleCategory, rng: &mut impl Rng) -> (ObstacleKind, f32) {
    match category {
        ObstacleCategory::House => {
            let width = 5.0 + rng.random::<f32>() * 8.0;
            let depth = 5.0 + rng.random::<f32>() * 8.0;
            let height = 4.0 + rng.random::<f32>() * 5.0;
            let yaw = rng.random::<f32>() * TAU;
            (ObstacleKind::House { width, depth, height }, yaw)
        }
        ObstacleCategory::Tree => {
            let trunk_radius = 0.3 + rng.random::<f32>() * 0.4;
            let trunk_height = 3.0 + rng.random::<f32>() * 4.0;
            (
                ObstacleKind::Tree {
                    trunk_radius,
                    trunk_height,
                },
                0.0,
            )
        }
    }
}

/// Scatter up to `count` obstacles of one category
///
/// `existing` holds obstacles from earlier passes; new ones are checked against
/// both those and each other.
pub fn place_static_obstacles(
    count: u32,
    category: ObstacleCategory,
    rules: &PlacementRules,
    roads: &[RoadSegment],
    existing: &[StaticObstacle],
    rng: &mut impl Rng,
) -> Vec<StaticObstacle> {
    let mut placed: Vec<StaticObstacle> = Vec::new();

    for _ in 0..count {
        for _ in 0..rules.attempts {
            let x = centered(rng) * 2.0 * rules.half_extent;
            let z = centered(rng) * 2.0 * rules.half_extent;
            let spot = Vec2::new(x, z);

            if is_within_road_footprint(spot, roads, rules.road_buffer) {
                continue;
            }

            let neighbours = || existing.iter().chain(placed.iter());
            let houses = neighbours()
                .filter(|o| o.kind.is_house())
                .map(|o| ground(o.body.position));
            if is_too_close(spot, houses, rules.house_spacing) {
                continue;
            }
            let trees = neighbours()
                .filter(|o| !o.kind.is_house())
                .map(|o| ground(o.body.position));
            if is_too_close(spot, trees, rules.tree_spacing) {
                continue;
            }

            let (kind, yaw) = random_obstacle_kind(category, rng);
            let candidate = StaticObstacle::new(kind, Vec3::new(x, 0.0, z), yaw);
            if overlaps_road_footprint(&candidate.body.bounds, roads, OBSTACLE_ROAD_CLEARANCE) {
                continue;
            }
            if overlaps_any(&candidate.body.bounds, neighbours().map(|o| &o.body.bounds)) {
                continue;
            }

            placed.push(candidate);
            break;
        }
    }

    log::info!(
        "Placed {} of {} {:?} obstacles",
        placed.len(),
        count,
        category
    );
    placed
}

/// Line sidewalks with trash cans and mailboxes
///
/// Each item sits on the midline of a sidewalk strip, on a random side of a
/// random segment, somewhere along 95% of its length.
pub fn place_destructibles(count: u32, roads: &[RoadSegment], rng: &mut impl Rng) -> Vec<Destructible> {
    let mut placed: Vec<Destructible> = Vec::new();
    if roads.is_empty() {
        log::warn!("No road segments, skipping {} destructibles", count);
        return placed;
    }

    for _ in 0..count {
        for _ in 0..DESTRUCTIBLE_ATTEMPTS {
            let road = &roads[rng.random_range(0..roads.len())];
            let across = (road.driving_width / 2.0 + road.sidewalk_width() / 2.0) * random_sign(rng);
            let along = centered(rng) * road.driving_length * DESTRUCTIBLE_LENGTH_FRACTION;
            let spot = road.point_at(along, across);

            if is_too_close(spot, placed.iter().map(|d| ground(d.body.position)), DESTRUCTIBLE_SPACING) {
                continue;
            }

            let kind = if rng.random_bool(TRASH_CAN_CHANCE) {
                DestructibleKind::TrashCan
            } else {
                DestructibleKind::Mailbox
            };
            placed.push(Destructible::new(kind, Vec3::new(spot.x, 0.0, spot.y)));
            break;
        }
    }

    let trash_cans = placed
        .iter()
        .filter(|d| d.kind == DestructibleKind::TrashCan)
        .count();
    log::info!(
        "Placed {} of {} destructibles ({} trash cans, {} mailboxes)",
        placed.len(),
        count,
        trash_cans,
        placed.len() - trash_cans
    );
    placed
}

/// Travel direction and facing for a car in the lane at `lane_sign` side
///
/// Cars on the positive side of a road drive toward the negative end.
pub fn lane_heading(orientation: Orientation, lane_sign: f32) -> (Vec3, f32) {
    match (orientation, lane_sign > 0.0) {
        (Orientation::AlongZ, true) => (Vec3::NEG_Z, PI),
        (Orientation::AlongZ, false) => (Vec3::Z, 0.0),
        (Orientation::AlongX, true) => (Vec3::NEG_X, FRAC_PI_2),
        (Orientation::AlongX, false) => (Vec3::X, -FRAC_PI_2),
    }
}

fn spawn_traffic_car(
    segment: usize,
    road: &RoadSegment,
    lane_sign: f32,
    base_speed: f32,
    rng: &mut impl Rng,
) -> TrafficCar {
    let across = road.driving_width / 4.0 * lane_sign;
    let along = centered(rng) * road.driving_length * TRAFFIC_START_FRACTION;
    let spot = road.point_at(along, across);
    let (direction, yaw) = lane_heading(road.orientation, lane_sign);
    let speed = base_speed * (1.0 - TRAFFIC_SPEED_JITTER + rng.random::<f32>() * 2.0 * TRAFFIC_SPEED_JITTER);
    TrafficCar::new(
        Vec3::new(spot.x, TRAFFIC_RIDE_HEIGHT, spot.y),
        yaw,
        segment,
        direction,
        speed,
    )
}

/// Spread `count` cars over the road segments
///
/// Every segment gets an even share (at least one) with lanes alternating by
/// order; whatever is left over lands on random segments and lanes.
pub fn place_traffic(count: u32, roads: &[RoadSegment], base_speed: f32, rng: &mut impl Rng) -> Vec<TrafficCar> {
    let count = count as usize;
    let segment_count = roads.len().max(1);
    let per_segment = (count / segment_count).max(1);

    let mut cars = Vec::with_capacity(count);
    'segments: for (index, road) in roads.iter().enumerate() {
        for slot in 0..per_segment {
            if cars.len() >= count {
                break 'segments;
            }
            let lane_sign = if slot % 2 == 0 { 1.0 } else { -1.0 };
            cars.push(spawn_traffic_car(index, road, lane_sign, base_speed, rng));
        }
    }

    while cars.len() < count && !roads.is_empty() {
        let index = rng.random_range(0..roads.len());
        let lane_sign = random_sign(rng);
        cars.push(spawn_traffic_car(index, &roads[index], lane_sign, base_speed, rng));
    }

    log::info!("Created {} traffic cars", cars.len());
    cars
}

/// Build a complete world for a new run
pub fn generate_world(settings: &Settings, rng: &mut impl Rng) -> World {
    let roads = generate_road_grid(GRID_SIZE, BLOCK_SIZE, LANE_WIDTH, SIDEWALK_WIDTH);
    let half_extent = world_half_extent(GRID_SIZE, BLOCK_SIZE, TOTAL_ROAD_WIDTH);

    let mut obstacles = place_static_obstacles(
        settings.house_count,
        ObstacleCategory::House,
        &PlacementRules::houses(half_extent),
        &roads,
        &[],
        rng,
    );
    let trees = place_static_obstacles(
        settings.tree_count,
        ObstacleCategory::Tree,
        &PlacementRules::trees(half_extent),
        &roads,
        &obstacles,
        rng,
    );
    obstacles.extend(trees);

    let (position, yaw) = player_start();
    let mut world = World::with_roads(roads, PlayerCar::new(position, yaw));
    world.obstacles = obstacles;
    world.destructibles = place_destructibles(settings.destructible_count, &world.roads, rng);
    world.traffic = place_traffic(settings.traffic_count, &world.roads, settings.traffic_speed, rng);
    world
}
