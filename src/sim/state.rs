//! Game state and session lifecycle
//!
//! `GameState` is the whole simulation context: settings, phase, score, the
//! current world and the seeded RNG every random draw goes through. One value
//! per session; tests build a fresh one each.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraRig;
use super::entities::DestructibleKind;
use super::world::{RemainingCounters, World};
use super::worldgen::generate_world;
use crate::consts::*;
use crate::settings::{RestartFlow, Settings};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, car on display
    Intro,
    /// Active gameplay
    Running,
    /// Score ran out
    GameOver,
    /// Every trash can smashed
    Win,
}

impl GamePhase {
    /// Phases where the car idles on the turntable
    pub fn is_showroom(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }
}

/// Things the presentation layer may want to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    ObjectSmashed { kind: DestructibleKind, position: Vec3 },
    TrafficCollision { position: Vec3 },
    GameOver { score: i64 },
    Win { score: i64 },
}

/// Everything an overlay needs to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub phase: GamePhase,
    /// Score floored at zero
    pub score: i64,
    pub trash_cans: u32,
    pub mailboxes: u32,
    /// Score is flashing after a penalty
    pub penalty_flash: bool,
    /// Seconds spent running this session
    pub elapsed: f32,
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Applied at the next world generation
    pub settings: Settings,
    pub phase: GamePhase,
    /// Internal score; may go negative
    pub score: f32,
    pub world: World,
    pub counters: RemainingCounters,
    pub camera: CameraRig,
    /// Seconds left on the penalty flash
    pub penalty_flash: f32,
    /// Seconds spent in `Running` since the last start
    pub elapsed: f32,
    /// Simulation tick counter (all phases)
    pub time_ticks: u64,
    events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// New session on the intro screen
    pub fn new(settings: Settings, seed: u64) -> Self {
        Self {
            seed,
            settings: settings.sanitized(),
            phase: GamePhase::Intro,
            score: STARTING_SCORE,
            world: World::showroom(),
            counters: RemainingCounters::default(),
            camera: CameraRig::intro(),
            penalty_flash: 0.0,
            elapsed: 0.0,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generate a fresh world and start running
    pub fn start(&mut self) {
        let world = generate_world(&self.settings, &mut self.rng);
        self.start_with_world(world);
    }

    /// Start running on a prepared world
    ///
    /// The player keeps the pose it has in `world`.
    pub fn start_with_world(&mut self, world: World) {
        self.counters = world.counters();
        self.world = world;
        self.score = STARTING_SCORE;
        self.penalty_flash = 0.0;
        self.elapsed = 0.0;
        let player = &self.world.player.body;
        self.camera.snap_to(player.position, player.yaw);
        self.phase = GamePhase::Running;
        self.events.push(GameEvent::Started);
        log::info!(
            "Run started: {} trash cans, {} mailboxes, {} traffic cars",
            self.counters.trash_cans,
            self.counters.mailboxes,
            self.world.traffic.len()
        );
    }

    /// Back to the title screen with the car on display
    pub fn enter_intro(&mut self) {
        self.phase = GamePhase::Intro;
        self.show_car();
        log::info!("Intro");
    }

    /// Restart from game over / win according to the variant's flow
    pub fn restart(&mut self) {
        match self.settings.variant.restart_flow() {
            RestartFlow::Direct => self.start(),
            RestartFlow::ViaIntro => self.enter_intro(),
        }
    }

    /// Replace the settings used by the next world generation
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings.sanitized();
    }

    /// Add a score delta; negative deltas flash the score
    pub fn add_score(&mut self, delta: f32) {
        self.score += delta;
        if delta < 0.0 {
            self.penalty_flash = PENALTY_FLASH;
        }
    }

    /// Running -> GameOver. Returns false if not running.
    pub fn trigger_game_over(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::GameOver;
        self.show_car();
        let score = self.display_score();
        self.events.push(GameEvent::GameOver { score });
        log::info!("Game over after {:.1}s", self.elapsed);
        true
    }

    /// Running -> Win. Returns false if not running.
    pub fn trigger_win(&mut self) -> bool {
        if self.phase != GamePhase::Running {
            return false;
        }
        self.phase = GamePhase::Win;
        self.show_car();
        let score = self.display_score();
        self.events.push(GameEvent::Win { score });
        log::info!("All trash cans smashed in {:.1}s, score {}", self.elapsed, score);
        true
    }

    fn show_car(&mut self) {
        self.world.player.place(SHOWROOM_POSITION, SHOWROOM_YAW);
        self.camera.reset_to_intro();
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> i64 {
        self.score.floor().max(0.0) as i64
    }

    pub fn hud(&self) -> Hud {
        Hud {
            phase: self.phase,
            score: self.display_score(),
            trash_cans: self.counters.trash_cans,
            mailboxes: self.counters.mailboxes,
            penalty_flash: self.penalty_flash > 0.0,
            elapsed: self.elapsed,
        }
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take the pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
