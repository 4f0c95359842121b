//! Entity types
//!
//! Every entity composes a [`Body`] (position, yaw, bounding volume) with its
//! kind-specific data. Shapes are local boxes re-wrapped into a world AABB
//! whenever the body moves.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::aabb::{Aabb, LocalBox};

/// Shared transform + bounding volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub position: Vec3,
    /// Rotation about the vertical axis (radians)
    pub yaw: f32,
    pub bounds: Aabb,
}

impl Body {
    pub fn new(position: Vec3, yaw: f32, shape: &LocalBox) -> Self {
        Self {
            position,
            yaw,
            bounds: Aabb::from_local(shape, position, yaw),
        }
    }

    /// Recompute the bounding volume after moving
    #[inline]
    pub fn refresh_bounds(&mut self, shape: &LocalBox) {
        self.bounds = Aabb::from_local(shape, self.position, self.yaw);
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }
}

/// Station wagon: body, cabin and wheels, logo decal on the nose
pub const PLAYER_SHAPE: LocalBox = LocalBox::new(Vec3::new(-1.2, -0.08, -2.52), Vec3::new(1.2, 1.5, 2.52));
/// Traffic sedan including wheels
pub const TRAFFIC_SHAPE: LocalBox = LocalBox::new(Vec3::new(-1.05, -0.04, -2.0), Vec3::new(1.05, 1.3, 2.0));
/// Cylinder bin, radius 0.5, standing 2 units tall
pub const TRASH_CAN_SHAPE: LocalBox = LocalBox::new(Vec3::new(-0.5, 0.0, -0.5), Vec3::new(0.5, 2.0, 0.5));
/// Post plus letter box on top
pub const MAILBOX_SHAPE: LocalBox = LocalBox::new(Vec3::new(-0.3, 0.0, -0.6), Vec3::new(0.3, 1.7, 0.5));

/// The player's car
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerCar {
    pub body: Body,
}

impl PlayerCar {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self {
            body: Body::new(position, yaw, &PLAYER_SHAPE),
        }
    }

    /// Teleport (start pose, showroom pose)
    pub fn place(&mut self, position: Vec3, yaw: f32) {
        self.body.position = position;
        self.body.yaw = yaw;
        self.refresh_bounds();
    }

    #[inline]
    pub fn refresh_bounds(&mut self) {
        self.body.refresh_bounds(&PLAYER_SHAPE);
    }
}

/// An AI car shuttling along one road segment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrafficCar {
    pub body: Body,
    /// Index into the world's road list
    pub segment: usize,
    /// Unit travel direction (always along the segment axis)
    pub direction: Vec3,
    /// Speed factor (scaled by `TRAFFIC_SPEED_SCALE`)
    pub speed: f32,
    /// Seconds until this car can penalize the player again
    pub cooldown: f32,
}

impl TrafficCar {
    pub fn new(position: Vec3, yaw: f32, segment: usize, direction: Vec3, speed: f32) -> Self {
        Self {
            body: Body::new(position, yaw, &TRAFFIC_SHAPE),
            segment,
            direction,
            speed,
            cooldown: 0.0,
        }
    }

    #[inline]
    pub fn refresh_bounds(&mut self) {
        self.body.refresh_bounds(&TRAFFIC_SHAPE);
    }

    /// Can collide with the player this tick
    #[inline]
    pub fn is_ready(&self) -> bool {
        self.cooldown <= 0.0
    }
}

/// Street furniture worth points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestructibleKind {
    TrashCan,
    Mailbox,
}

impl DestructibleKind {
    pub fn shape(&self) -> &'static LocalBox {
        match self {
            DestructibleKind::TrashCan => &TRASH_CAN_SHAPE,
            DestructibleKind::Mailbox => &MAILBOX_SHAPE,
        }
    }
}

/// Lifecycle of a destructible
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DestructibleState {
    /// Standing on the sidewalk, can be hit
    Active,
    /// Knocked away, tumbling ballistically
    Flying {
        velocity: Vec3,
        spin_axis: Vec3,
        /// Radians per tick
        spin_speed: f32,
    },
    /// Fell below the depth limit; hidden until the next reset
    Gone,
}

/// A trash can or mailbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Destructible {
    pub body: Body,
    pub kind: DestructibleKind,
    pub state: DestructibleState,
    /// Accumulated tumble on top of the yaw
    pub tumble: Quat,
}

impl Destructible {
    pub fn new(kind: DestructibleKind, position: Vec3) -> Self {
        Self {
            body: Body::new(position, 0.0, kind.shape()),
            kind,
            state: DestructibleState::Active,
            tumble: Quat::IDENTITY,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.state, DestructibleState::Active)
    }

    #[inline]
    pub fn is_flying(&self) -> bool {
        matches!(self.state, DestructibleState::Flying { .. })
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        !matches!(self.state, DestructibleState::Gone)
    }

    /// Full orientation for rendering
    pub fn rotation(&self) -> Quat {
        self.body.rotation() * self.tumble
    }

    #[inline]
    pub fn refresh_bounds(&mut self) {
        self.body.refresh_bounds(self.kind.shape());
    }
}

/// Static scenery kinds, each with the dimensions of its solid base
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Box base; the roof is decorative and excluded from collision
    House { width: f32, depth: f32, height: f32 },
    /// Trunk only; the canopy is decorative
    Tree { trunk_radius: f32, trunk_height: f32 },
}

impl ObstacleKind {
    pub fn shape(&self) -> LocalBox {
        match *self {
            ObstacleKind::House { width, depth, height } => LocalBox::grounded(width, height, depth),
            ObstacleKind::Tree {
                trunk_radius,
                trunk_height,
            } => LocalBox::grounded(trunk_radius * 2.0, trunk_height, trunk_radius * 2.0),
        }
    }

    pub fn is_house(&self) -> bool {
        matches!(self, ObstacleKind::House { .. })
    }
}

/// A house or tree; never moves after generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticObstacle {
    pub body: Body,
    pub kind: ObstacleKind,
}

impl StaticObstacle {
    pub fn new(kind: ObstacleKind, position: Vec3, yaw: f32) -> Self {
        Self {
            body: Body::new(position, yaw, &kind.shape()),
            kind,
        }
    }
}
