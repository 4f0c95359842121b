//! Entity registry
//!
//! Owns every live collection for one generated world. A `World` is built in
//! one piece by the generator and swapped in whole on reset, so a tick never
//! sees a half-built city.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::entities::{Destructible, DestructibleKind, PlayerCar, StaticObstacle, TrafficCar};
use super::road::RoadSegment;
use crate::consts::{BLOCK_SIZE, PLAYER_RIDE_HEIGHT, SHOWROOM_POSITION, SHOWROOM_YAW};

/// Where the player's car sits when a run starts
pub fn player_start() -> (Vec3, f32) {
    (Vec3::new(0.0, PLAYER_RIDE_HEIGHT, BLOCK_SIZE), 0.0)
}

/// Destructibles still standing, per kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemainingCounters {
    pub trash_cans: u32,
    pub mailboxes: u32,
}

impl RemainingCounters {
    /// Count the active destructibles of each kind
    pub fn tally(destructibles: &[Destructible]) -> Self {
        destructibles
            .iter()
            .filter(|d| d.is_active())
            .fold(Self::default(), |mut counters, d| {
                match d.kind {
                    DestructibleKind::TrashCan => counters.trash_cans += 1,
                    DestructibleKind::Mailbox => counters.mailboxes += 1,
                }
                counters
            })
    }

    /// Record one smashed item; returns the remaining count for that kind
    pub fn record_hit(&mut self, kind: DestructibleKind) -> u32 {
        let counter = match kind {
            DestructibleKind::TrashCan => &mut self.trash_cans,
            DestructibleKind::Mailbox => &mut self.mailboxes,
        };
        *counter = counter.saturating_sub(1);
        *counter
    }

    pub fn total(&self) -> u32 {
        self.trash_cans + self.mailboxes
    }
}

/// All entities of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    /// Road grid (immutable once generated)
    pub roads: Vec<RoadSegment>,
    /// Houses and trees, houses first
    pub obstacles: Vec<StaticObstacle>,
    pub destructibles: Vec<Destructible>,
    pub traffic: Vec<TrafficCar>,
    pub player: PlayerCar,
}

impl World {
    /// Empty world with the car on display (intro screen)
    pub fn showroom() -> Self {
        Self::with_roads(Vec::new(), PlayerCar::new(SHOWROOM_POSITION, SHOWROOM_YAW))
    }

    /// World with roads and the player only; callers add the rest
    pub fn with_roads(roads: Vec<RoadSegment>, player: PlayerCar) -> Self {
        Self {
            roads,
            obstacles: Vec::new(),
            destructibles: Vec::new(),
            traffic: Vec::new(),
            player,
        }
    }

    pub fn counters(&self) -> RemainingCounters {
        RemainingCounters::tally(&self.destructibles)
    }

    pub fn houses(&self) -> impl Iterator<Item = &StaticObstacle> {
        self.obstacles.iter().filter(|o| o.kind.is_house())
    }

    pub fn trees(&self) -> impl Iterator<Item = &StaticObstacle> {
        self.obstacles.iter().filter(|o| !o.kind.is_house())
    }
}
