//! Road grid geometry
//!
//! The city is a square lattice of straight, axis-aligned road segments. Each
//! segment is a driving lane flanked by a sidewalk strip on both sides.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::GroundRect;
use crate::consts::ROAD_LENGTH_FRACTION;
use crate::world_half_extent;

/// Direction a road segment runs in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// East-west road
    AlongX,
    /// North-south road
    AlongZ,
}

impl Orientation {
    /// Unit vector pointing along the road
    pub fn axis(&self) -> Vec3 {
        match self {
            Orientation::AlongX => Vec3::X,
            Orientation::AlongZ => Vec3::Z,
        }
    }

    /// Unit vector pointing across the road
    pub fn cross_axis(&self) -> Vec3 {
        match self {
            Orientation::AlongX => Vec3::Z,
            Orientation::AlongZ => Vec3::X,
        }
    }
}

/// One straight road: driving lane plus sidewalks
///
/// Width is measured across the road, length along it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadSegment {
    /// Center on the ground plane (x, z)
    pub center: Vec2,
    pub orientation: Orientation,
    pub driving_width: f32,
    pub driving_length: f32,
    pub total_width: f32,
    pub total_length: f32,
}

impl RoadSegment {
    pub fn new(
        center: Vec2,
        orientation: Orientation,
        lane_width: f32,
        length: f32,
        sidewalk_width: f32,
    ) -> Self {
        Self {
            center,
            orientation,
            driving_width: lane_width,
            driving_length: length,
            total_width: lane_width + 2.0 * sidewalk_width,
            total_length: length,
        }
    }

    /// Width of one sidewalk strip
    #[inline]
    pub fn sidewalk_width(&self) -> f32 {
        (self.total_width - self.driving_width) / 2.0
    }

    /// Map (across, along) sizes onto world (x, z)
    fn world_size(&self, width: f32, length: f32) -> Vec2 {
        match self.orientation {
            Orientation::AlongX => Vec2::new(length, width),
            Orientation::AlongZ => Vec2::new(width, length),
        }
    }

    /// World (x, z) extent of the driving lane
    pub fn driving_size(&self) -> Vec2 {
        self.world_size(self.driving_width, self.driving_length)
    }

    /// World (x, z) extent of lane plus sidewalks
    pub fn total_size(&self) -> Vec2 {
        self.world_size(self.total_width, self.total_length)
    }

    pub fn driving_rect(&self) -> GroundRect {
        GroundRect::from_center(self.center, self.driving_size())
    }

    /// Full footprint grown by `buffer` on every side
    pub fn footprint(&self, buffer: f32) -> GroundRect {
        GroundRect::from_center(self.center, self.total_size()).expanded(buffer)
    }

    /// Ground-plane point at `along` units down the road and `across` units to its side
    pub fn point_at(&self, along: f32, across: f32) -> Vec2 {
        match self.orientation {
            Orientation::AlongX => self.center + Vec2::new(along, across),
            Orientation::AlongZ => self.center + Vec2::new(across, along),
        }
    }

    /// Coordinate of a world position along this road's axis
    #[inline]
    pub fn along(&self, position: Vec3) -> f32 {
        position.dot(self.orientation.axis())
    }

    /// Center coordinate along this road's axis
    #[inline]
    pub fn center_along(&self) -> f32 {
        match self.orientation {
            Orientation::AlongX => self.center.x,
            Orientation::AlongZ => self.center.y,
        }
    }
}

/// Build the road lattice: `grid_size` north-south roads then `grid_size`
/// east-west roads, `block_size` apart and centred on the origin.
pub fn generate_road_grid(
    grid_size: u32,
    block_size: f32,
    lane_width: f32,
    sidewalk_width: f32,
) -> Vec<RoadSegment> {
    let total_width = lane_width + 2.0 * sidewalk_width;
    let length = world_half_extent(grid_size, block_size, total_width) * 2.0 * ROAD_LENGTH_FRACTION;
    let start = -(grid_size.saturating_sub(1) as f32) / 2.0 * block_size;

    let mut roads = Vec::with_capacity(grid_size as usize * 2);
    for i in 0..grid_size {
        let x = start + i as f32 * block_size;
        roads.push(RoadSegment::new(
            Vec2::new(x, 0.0),
            Orientation::AlongZ,
            lane_width,
            length,
            sidewalk_width,
        ));
    }
    for i in 0..grid_size {
        let z = start + i as f32 * block_size;
        roads.push(RoadSegment::new(
            Vec2::new(0.0, z),
            Orientation::AlongX,
            lane_width,
            length,
            sidewalk_width,
        ));
    }
    log::info!("Created {} road segments", roads.len());
    roads
}
