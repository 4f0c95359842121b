//! Per-frame simulation tick
//!
//! Drives the phase machine. Only `Running` moves anything; the other phases
//! spin the car on its turntable and wait for a confirm.

use std::f32::consts::{PI, TAU};

use super::collision::{collide_traffic, is_off_road, resolve_static_collision, smash_destructibles};
use super::entities::DestructibleKind;
use super::movement::{step_flight, step_player, step_traffic};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::forward_from_yaw;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Start / restart (Enter or the on-screen button)
    pub confirm: bool,
    /// Demo mode - the car drives itself toward the nearest trash can
    pub autopilot: bool,
}

/// Advance the game by one frame of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // A NaN or infinite frame time freezes the frame
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
    state.time_ticks += 1;

    let mut input = *input;
    if input.autopilot {
        input = autopilot_input(state, input);
    }

    match state.phase {
        GamePhase::Running => {}
        GamePhase::Intro => {
            spin_showroom(state);
            if input.confirm {
                state.start();
            }
            return;
        }
        GamePhase::GameOver | GamePhase::Win => {
            spin_showroom(state);
            if input.confirm {
                state.restart();
            }
            return;
        }
    }

    state.elapsed += dt;
    if state.penalty_flash > 0.0 {
        state.penalty_flash = (state.penalty_flash - dt).max(0.0);
    }

    // Player, blocked by scenery
    let previous = step_player(
        &mut state.world.player,
        &input,
        state.settings.player_speed,
        state.settings.turn_speed,
        dt,
    );
    if let Some(index) = resolve_static_collision(&mut state.world.player, &state.world.obstacles, previous) {
        log::trace!("Blocked by obstacle {}", index);
    }

    step_traffic(&mut state.world.traffic, &state.world.roads, dt);
    step_flight(&mut state.world.destructibles, dt);

    // Street furniture
    let player_bounds = state.world.player.body.bounds;
    let player_position = state.world.player.body.position;
    let smashed = smash_destructibles(
        &mut state.world.destructibles,
        &player_bounds,
        player_position,
        &mut state.rng,
    );
    for index in smashed {
        let item = &state.world.destructibles[index];
        let (kind, position) = (item.kind, item.body.position);
        state.add_score(state.settings.hit_bonus);
        let remaining = state.counters.record_hit(kind);
        state.push_event(GameEvent::ObjectSmashed { kind, position });
        log::debug!("Smashed {:?}, {} left", kind, remaining);

        if kind == DestructibleKind::TrashCan && remaining == 0 && state.settings.variant.has_win_condition() {
            state.trigger_win();
        }
    }

    // Traffic
    for index in collide_traffic(&mut state.world.traffic, &player_bounds) {
        let position = state.world.traffic[index].body.position;
        state.add_score(state.settings.traffic_penalty);
        if state.phase == GamePhase::Running {
            state.camera.start_shake(SHAKE_DURATION, SHAKE_INTENSITY);
        }
        state.push_event(GameEvent::TrafficCollision { position });
        log::debug!("Traffic collision, score {:.1}", state.score);
    }

    if state.phase != GamePhase::Running {
        return;
    }

    if is_off_road(state.world.player.body.position, &state.world.roads) {
        state.add_score(state.settings.offroad_penalty_per_sec * dt);
    }

    let player = &state.world.player.body;
    state.camera.follow(player.position, player.yaw, dt, &mut state.rng);

    if state.score <= 0.0 {
        state.trigger_game_over();
    }
}

fn spin_showroom(state: &mut GameState) {
    let player = &mut state.world.player;
    player.body.yaw += SHOWROOM_SPIN;
    player.refresh_bounds();
}

/// Wrap an angle into [-PI, PI)
fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Steer toward the nearest standing trash can (or mailbox once those run out)
fn autopilot_input(state: &GameState, input: TickInput) -> TickInput {
    let mut steered = TickInput {
        confirm: input.confirm || state.phase == GamePhase::Intro,
        ..TickInput::default()
    };
    if state.phase != GamePhase::Running {
        return steered;
    }

    let player = &state.world.player.body;
    let nearest = |kind: Option<DestructibleKind>| {
        state
            .world
            .destructibles
            .iter()
            .filter(|d| d.is_active() && kind.is_none_or(|k| d.kind == k))
            .map(|d| d.body.position)
            .min_by(|a, b| {
                a.distance_squared(player.position)
                    .partial_cmp(&b.distance_squared(player.position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    };
    let Some(target) = nearest(Some(DestructibleKind::TrashCan)).or_else(|| nearest(None)) else {
        return steered;
    };

    let to_target = target - player.position;
    let desired_yaw = (-to_target.x).atan2(-to_target.z);
    let error = wrap_angle(desired_yaw - player.yaw);
    let tolerance = state.settings.turn_speed / 2.0;
    steered.turn_left = error > tolerance;
    steered.turn_right = error < -tolerance;
    // Back up out of tight turns instead of circling the target
    let facing = forward_from_yaw(player.yaw).dot(to_target.normalize_or_zero());
    steered.forward = facing > -0.5;
    steered.backward = !steered.forward;
    steered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameVariant, Settings};

    const DT: f32 = 1.0 / 60.0;

    fn small_settings(variant: GameVariant) -> Settings {
        Settings {
            variant,
            house_count: 30,
            tree_count: 30,
            destructible_count: 20,
            traffic_count: 10,
            ..Settings::default()
        }
    }

    #[test]
    fn test_tick_intro_to_running() {
        let mut state = GameState::new(small_settings(GameVariant::TrashCrash), 12345);
        let yaw = state.world.player.body.yaw;

        tick(&mut state, &TickInput::default(), DT);
        assert_eq!(state.phase, GamePhase::Intro);
        assert!((state.world.player.body.yaw - yaw - SHOWROOM_SPIN).abs() < 1e-6);

        let input = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, STARTING_SCORE);
        assert!(!state.world.roads.is_empty());
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut state = GameState::new(small_settings(GameVariant::TrashCrash), 1);
        state.start();
        tick(&mut state, &TickInput::default(), 5.0);
        assert!((state.elapsed - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut state = GameState::new(small_settings(GameVariant::TrashCrash), 1);
        state.start();
        let before = state.world.player.body.position;
        let forward = TickInput {
            forward: true,
            ..Default::default()
        };
        for dt in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            tick(&mut state, &forward, dt);
        }
        assert_eq!(state.elapsed, 0.0);
        assert!(state.score.is_finite());
        assert_eq!(state.world.player.body.position, before);
        assert!(state.camera.position.is_finite());
        assert!(state.world.traffic.iter().all(|car| car.body.position.is_finite()));

        // Normal frames still advance afterwards
        tick(&mut state, &forward, DT);
        assert!((state.elapsed - DT).abs() < 1e-6);
    }

    #[test]
    fn test_game_over_restarts_directly() {
        let mut state = GameState::new(small_settings(GameVariant::TrashCrash), 3);
        state.start();
        state.score = 0.5;
        // Park the car far from every road so the drain finishes the run
        state.world.player.place(glam::Vec3::new(500.0, 0.5, 500.0), 0.0);
        tick(&mut state, &TickInput::default(), 0.1);
        assert_eq!(state.phase, GamePhase::GameOver);

        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, DT);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, STARTING_SCORE);
    }

    #[test]
    fn test_classic_restart_goes_through_intro() {
        let mut state = GameState::new(small_settings(GameVariant::Classic), 3);
        state.start();
        state.trigger_game_over();
        let confirm = TickInput {
            confirm: true,
            ..Default::default()
        };
        tick(&mut state, &confirm, DT);
        assert_eq!(state.phase, GamePhase::Intro);
        tick(&mut state, &confirm, DT);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_wrap_angle() {
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(-3.0 * PI / 2.0) - PI / 2.0).abs() < 1e-5);
        assert!((wrap_angle(0.25) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_autopilot_starts_and_drives() {
        let mut state = GameState::new(small_settings(GameVariant::TrashCrash), 77);
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        tick(&mut state, &input, DT);
        assert_eq!(state.phase, GamePhase::Running);
        let start = state.world.player.body.position;
        for _ in 0..30 {
            tick(&mut state, &input, DT);
        }
        assert_ne!(state.world.player.body.position, start);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(small_settings(GameVariant::TrashCrash), 99999);
        let mut state2 = GameState::new(small_settings(GameVariant::TrashCrash), 99999);

        let inputs = [
            TickInput {
                confirm: true,
                ..Default::default()
            },
            TickInput {
                forward: true,
                ..Default::default()
            },
            TickInput {
                forward: true,
                turn_left: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..20 {
            for input in &inputs {
                tick(&mut state1, input, DT);
                tick(&mut state2, input, DT);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.world.player.body.position, state2.world.player.body.position);
        for (a, b) in state1.world.traffic.iter().zip(&state2.world.traffic) {
            assert_eq!(a.body.position, b.body.position);
        }
    }
}
