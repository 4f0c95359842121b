//! End-to-end sessions on small hand-built worlds

use glam::{Vec2, Vec3};

use trash_crash::consts::STARTING_SCORE;
use trash_crash::sim::{
    Destructible, DestructibleKind, GameEvent, GamePhase, GameState, ObstacleKind, Orientation, PlayerCar,
    RoadSegment, StaticObstacle, TickInput, TrafficCar, World, tick,
};
use trash_crash::{GameVariant, Settings};

const DT: f32 = 1.0 / 60.0;

/// One north-south road through the origin
fn one_road_world(player: Vec3) -> World {
    let road = RoadSegment::new(Vec2::ZERO, Orientation::AlongZ, 10.0, 200.0, 3.0);
    World::with_roads(vec![road], PlayerCar::new(player, 0.0))
}

fn running(world: World, variant: GameVariant) -> GameState {
    let mut state = GameState::new(Settings::for_variant(variant), 7);
    state.start_with_world(world);
    state.drain_events();
    state
}

fn forward() -> TickInput {
    TickInput {
        forward: true,
        ..Default::default()
    }
}

#[test]
fn test_hit_bonus_and_flight() {
    let mut world = one_road_world(Vec3::new(6.5, 0.5, -4.0));
    world
        .destructibles
        .push(Destructible::new(DestructibleKind::Mailbox, Vec3::new(6.5, 0.0, -10.0)));
    let mut state = running(world, GameVariant::TrashCrash);
    assert_eq!(state.score, STARTING_SCORE);

    let mut ticks = 0;
    while state.world.destructibles[0].is_active() {
        tick(&mut state, &forward(), DT);
        ticks += 1;
        assert!(ticks < 30, "never reached the mailbox");
    }
    assert_eq!(state.score, 115.0);
    assert_eq!(state.counters.mailboxes, 0);
    assert_eq!(state.phase, GamePhase::Running);
    assert!(state.world.destructibles[0].is_flying());
    assert!(matches!(
        state.drain_events().as_slice(),
        [GameEvent::ObjectSmashed {
            kind: DestructibleKind::Mailbox,
            ..
        }]
    ));

    // Rises, falls, and vanishes below the ground
    let mut peak = f32::MIN;
    for _ in 0..600 {
        tick(&mut state, &TickInput::default(), DT);
        peak = peak.max(state.world.destructibles[0].body.position.y);
        if !state.world.destructibles[0].is_visible() {
            break;
        }
    }
    assert!(peak > 1.0);
    assert!(!state.world.destructibles[0].is_visible());
    assert_eq!(state.score, 115.0);
}

#[test]
fn test_off_road_drain() {
    let world = one_road_world(Vec3::new(100.0, 0.5, 100.0));
    let mut state = running(world, GameVariant::Classic);

    for _ in 0..120 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert!((state.score - (STARTING_SCORE - 20.0)).abs() < 1e-3);
    assert_eq!(state.hud().score, 80);
}

#[test]
fn test_static_obstacle_reverts_translation_keeps_turn() {
    let start = Vec3::new(0.0, 0.5, 0.0);
    let mut world = one_road_world(start);
    world.obstacles.push(StaticObstacle::new(
        ObstacleKind::House {
            width: 6.0,
            depth: 6.0,
            height: 5.0,
        },
        Vec3::new(0.0, 0.0, -6.0),
        0.0,
    ));
    let mut state = running(world, GameVariant::Classic);
    let turn = state.settings.turn_speed;

    let input = TickInput {
        forward: true,
        turn_left: true,
        ..Default::default()
    };
    tick(&mut state, &input, DT);

    assert_eq!(state.world.player.body.position, start);
    assert!((state.world.player.body.yaw - turn).abs() < 1e-6);
    assert!(
        !state
            .world
            .player
            .body
            .bounds
            .intersects(&state.world.obstacles[0].body.bounds)
    );
}

#[test]
fn test_traffic_cooldown_blocks_repeat_penalty() {
    let mut world = one_road_world(Vec3::new(0.0, 0.5, 0.0));
    world
        .traffic
        .push(TrafficCar::new(Vec3::new(1.5, 0.5, 0.0), 0.0, 0, Vec3::Z, 0.0));
    let mut state = running(world, GameVariant::Classic);

    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.score, 80.0);
    assert!(state.camera.is_shaking());
    assert!(state.hud().penalty_flash);

    // Still overlapping for most of a second: no further penalty
    for _ in 0..50 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert_eq!(state.score, 80.0);

    // Cooldown runs out while the cars still touch
    for _ in 0..20 {
        tick(&mut state, &TickInput::default(), DT);
    }
    assert_eq!(state.score, 60.0);

    let collisions = state
        .drain_events()
        .iter()
        .filter(|e| matches!(e, GameEvent::TrafficCollision { .. }))
        .count();
    assert_eq!(collisions, 2);
}

#[test]
fn test_last_trash_can_wins_despite_mailboxes() {
    let mut world = one_road_world(Vec3::new(0.0, 0.5, 0.0));
    world
        .destructibles
        .push(Destructible::new(DestructibleKind::TrashCan, Vec3::new(0.0, 0.0, -2.0)));
    for z in [40.0, 50.0, 60.0] {
        world
            .destructibles
            .push(Destructible::new(DestructibleKind::Mailbox, Vec3::new(6.5, 0.0, z)));
    }
    let mut state = running(world, GameVariant::TrashCrash);
    assert_eq!(state.counters.trash_cans, 1);
    assert_eq!(state.counters.mailboxes, 3);

    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.phase, GamePhase::Win);
    assert_eq!(state.counters.mailboxes, 3);
    let events = state.drain_events();
    assert!(events.iter().any(|e| matches!(e, GameEvent::Win { score: 115 })));

    // Restart drops straight back into a fresh run
    let confirm = TickInput {
        confirm: true,
        ..Default::default()
    };
    state.apply_settings(Settings {
        house_count: 5,
        tree_count: 5,
        traffic_count: 3,
        destructible_count: 8,
        ..Settings::default()
    });
    tick(&mut state, &confirm, DT);
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.score, STARTING_SCORE);
    assert_eq!(state.world.traffic.len(), 3);
}

#[test]
fn test_classic_has_no_win() {
    let mut world = one_road_world(Vec3::new(0.0, 0.5, 0.0));
    world
        .destructibles
        .push(Destructible::new(DestructibleKind::TrashCan, Vec3::new(0.0, 0.0, -2.0)));
    let mut state = running(world, GameVariant::Classic);

    tick(&mut state, &TickInput::default(), DT);
    assert_eq!(state.phase, GamePhase::Running);
    assert_eq!(state.counters.trash_cans, 0);
    assert_eq!(state.score, 115.0);
}

#[test]
fn test_win_and_traffic_hit_in_same_tick() {
    let mut world = one_road_world(Vec3::new(0.0, 0.5, 0.0));
    world
        .destructibles
        .push(Destructible::new(DestructibleKind::TrashCan, Vec3::new(0.0, 0.0, -2.0)));
    world
        .traffic
        .push(TrafficCar::new(Vec3::new(1.5, 0.5, 0.0), 0.0, 0, Vec3::Z, 0.0));
    let mut state = running(world, GameVariant::TrashCrash);

    tick(&mut state, &TickInput::default(), DT);
    // Both deltas land; the win stands
    assert_eq!(state.phase, GamePhase::Win);
    assert_eq!(state.score, 95.0);
    assert!(!state.camera.is_shaking());
}
