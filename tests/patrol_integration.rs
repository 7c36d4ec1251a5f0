//! Patrol flight integration tests: the flight system on its own and a full
//! [`Game`] running the bundled nest level.

use bevy_ecs::observer::On;
use bevy_ecs::prelude::*;
use std::sync::{Arc, Mutex};

use pixelkin::components::animation::AnimationRequest;
use pixelkin::components::conversation::Conversation;
use pixelkin::components::facing::Facing;
use pixelkin::components::mapposition::MapPosition;
use pixelkin::components::patrol::{PatrolFlight, PatrolSettings, PatrolState};
use pixelkin::components::rigidbody::RigidBody;
use pixelkin::error::PixelkinError;
use pixelkin::events::patrol::{JumpCue, PatrolStateChanged};
use pixelkin::game::Game;
use pixelkin::resources::level::Level;
use pixelkin::resources::physicsconfig::PhysicsConfig;
use pixelkin::resources::worldtime::WorldTime;
use pixelkin::systems::patrol::patrol_flight_system;
use pixelkin::systems::time::update_world_time;

const DT: f32 = 1.0 / 60.0;
const NEST_LEVEL: &str = include_str!("../assets/levels/nest.json");

fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(PhysicsConfig::new());
    world.init_resource::<Messages<JumpCue>>();
    world
}

fn tick_patrol(world: &mut World) {
    update_world_time(world, DT);
    let mut schedule = Schedule::default();
    schedule.add_systems(patrol_flight_system);
    schedule.run(world);
}

fn flyer(state: PatrolState, min_altitude: f32) -> PatrolFlight {
    let mut patrol = PatrolFlight::new(min_altitude, PatrolSettings::default());
    patrol.state = state;
    patrol
}

fn record_transitions(world: &mut World) -> Arc<Mutex<Vec<(PatrolState, PatrolState)>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    world.add_observer(move |trigger: On<PatrolStateChanged>| {
        let ev = trigger.event();
        sink.lock().unwrap().push((ev.from, ev.to));
    });
    log
}

// =============================================================================
// Flight system
// =============================================================================

#[test]
fn flyer_below_its_altitude_flaps() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(50.0, 90.0),
            RigidBody::with_max_speed(4.0),
            flyer(PatrolState::FlyingRight, 100.0),
        ))
        .id();

    tick_patrol(&mut world);

    let rigidbody = world.get::<RigidBody>(entity).unwrap();
    assert!((rigidbody.velocity.y - (2.0_f32 * 1.5 * 15.0).sqrt()).abs() < 1e-5);
    let patrol = world.get::<PatrolFlight>(entity).unwrap();
    assert_eq!(patrol.jump_timer, 0.3);
    assert!(!patrol.can_jump());

    let cues: Vec<JumpCue> = world.resource_mut::<Messages<JumpCue>>().drain().collect();
    assert_eq!(
        cues,
        vec![JumpCue {
            entity,
            x: 50.0,
            y: 110.0,
            particles: 20,
        }]
    );
}

#[test]
fn flyer_waits_for_the_cooldown_before_flapping_again() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(50.0, 90.0),
            RigidBody::with_max_speed(4.0),
            flyer(PatrolState::FlyingLeft, 100.0),
        ))
        .id();

    // The 0.3s cooldown spans 18 frames at 60 fps.
    let mut flaps = 0;
    for _ in 0..25 {
        tick_patrol(&mut world);
        flaps += world.resource_mut::<Messages<JumpCue>>().drain().count();
    }
    assert_eq!(flaps, 2);
    assert!(world.get::<PatrolFlight>(entity).unwrap().jump_timer > 0.0);
}

#[test]
fn flyer_at_altitude_does_not_flap() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(50.0, 100.0),
            RigidBody::with_max_speed(4.0),
            flyer(PatrolState::FlyingRight, 100.0),
        ))
        .id();

    tick_patrol(&mut world);

    assert_eq!(world.get::<RigidBody>(entity).unwrap().velocity.y, 0.0);
    assert_eq!(world.resource_mut::<Messages<JumpCue>>().drain().count(), 0);
}

#[test]
fn flight_accelerates_turns_and_respects_max_speed() {
    let mut world = make_world();
    let entity = world
        .spawn((
            MapPosition::new(50.0, 100.0),
            RigidBody::with_max_speed(4.0),
            flyer(PatrolState::FlyingLeft, 100.0),
            Facing::default(),
            AnimationRequest::new("idle"),
        ))
        .id();

    tick_patrol(&mut world);
    let vx = world.get::<RigidBody>(entity).unwrap().velocity.x;
    assert!((vx + 10.0 * DT).abs() < 1e-5);
    assert_eq!(*world.get::<Facing>(entity).unwrap(), Facing(-1));

    for _ in 0..120 {
        tick_patrol(&mut world);
    }
    assert_eq!(world.get::<RigidBody>(entity).unwrap().velocity.x, -4.0);
}

#[test]
fn waiting_flyer_brakes_to_rest() {
    let mut world = make_world();
    let mut rigidbody = RigidBody::with_max_speed(4.0);
    rigidbody.velocity.x = 1.0;
    let entity = world
        .spawn((
            MapPosition::new(50.0, 100.0),
            rigidbody,
            flyer(PatrolState::WaitingRight, 100.0),
        ))
        .id();

    for _ in 0..12 {
        tick_patrol(&mut world);
    }

    assert_eq!(world.get::<RigidBody>(entity).unwrap().velocity.x, 0.0);
}

#[test]
fn conversation_holds_the_flyer_in_its_nest() {
    let mut world = make_world();
    let transitions = record_transitions(&mut world);
    let entity = world
        .spawn((
            MapPosition::new(50.0, 100.0),
            RigidBody::with_max_speed(4.0),
            flyer(PatrolState::WaitingLeft, 100.0),
            Conversation { active: true },
        ))
        .id();
    assert!(world.get::<PatrolFlight>(entity).unwrap().is_ready_for_conversation());

    // Ten seconds of dialog.
    for _ in 0..600 {
        tick_patrol(&mut world);
    }
    assert!(transitions.lock().unwrap().is_empty());
    assert_eq!(world.get::<PatrolFlight>(entity).unwrap().wait_timer, 0.0);

    world.get_mut::<Conversation>(entity).unwrap().active = false;
    for _ in 0..301 {
        tick_patrol(&mut world);
    }
    assert_eq!(
        *transitions.lock().unwrap(),
        vec![(PatrolState::WaitingLeft, PatrolState::FlyingRight)]
    );
    assert_eq!(
        world.get::<PatrolFlight>(entity).unwrap().state,
        PatrolState::FlyingRight
    );
}

// =============================================================================
// Full game
// =============================================================================

#[test]
fn nest_level_loads_one_flyer() {
    let level = Level::from_json_str(NEST_LEVEL).unwrap();
    let mut game = Game::new(PhysicsConfig::new());
    let spawned = game.load_level(&level).unwrap();
    assert_eq!(spawned.len(), 1);

    let patrol = game.world.get::<PatrolFlight>(spawned[0]).unwrap();
    assert_eq!(patrol.state, PatrolState::WaitingLeft);
    assert_eq!(patrol.min_altitude, 96.0);
    assert_eq!(patrol.settings.fly_tag, "fly");
}

#[test]
fn reloading_a_level_replaces_its_flyers() {
    let level = Level::from_json_str(NEST_LEVEL).unwrap();
    let mut game = Game::new(PhysicsConfig::new());
    let first = game.load_level(&level).unwrap();
    let second = game.load_level(&level).unwrap();

    let flyers: Vec<Entity> = game
        .world
        .query_filtered::<Entity, With<PatrolFlight>>()
        .iter(&game.world)
        .collect();
    assert_eq!(flyers, second);
    assert!(game.world.get_entity(first[0]).is_err());

    game.step(DT);
    assert_eq!(game.drain_frames().len(), 1);
}

#[test]
fn game_rejects_level_with_unknown_sprite() {
    let mut level = Level::from_json_str(NEST_LEVEL).unwrap();
    level.patrols[0].sprite = "owl".to_string();
    let mut game = Game::new(PhysicsConfig::new());
    assert!(matches!(
        game.load_level(&level),
        Err(PixelkinError::MissingSpriteSheet(_))
    ));
    assert_eq!(game.world.query::<&PatrolFlight>().iter(&game.world).count(), 0);
}

#[test]
fn game_submits_a_frame_every_step() {
    let level = Level::from_json_str(NEST_LEVEL).unwrap();
    let mut game = Game::new(PhysicsConfig::new());
    let bird = game.load_level(&level).unwrap()[0];

    for _ in 0..3 {
        game.step(DT);
        let frames = game.drain_frames();
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].entity, bird);
        assert_eq!(frames[0].tag, "idle");
    }
}

#[test]
fn bird_completes_a_full_patrol_cycle() {
    let level = Level::from_json_str(NEST_LEVEL).unwrap();
    let mut game = Game::new(PhysicsConfig::new());
    let bird = game.load_level(&level).unwrap()[0];
    let transitions = record_transitions(&mut game.world);

    let mut flaps = 0;
    let mut fly_frames = 0;
    // Two waits of 5s and two flights of roughly 7s each.
    for _ in 0..(35 * 60) {
        game.step(DT);
        flaps += game.drain_jump_cues().len();
        fly_frames += game
            .drain_frames()
            .iter()
            .filter(|f| f.tag == "fly")
            .count();
    }

    let transitions = transitions.lock().unwrap();
    assert!(transitions.len() >= 4, "transitions: {:?}", *transitions);
    assert_eq!(
        transitions[..4],
        [
            (PatrolState::WaitingLeft, PatrolState::FlyingRight),
            (PatrolState::FlyingRight, PatrolState::WaitingRight),
            (PatrolState::WaitingRight, PatrolState::FlyingLeft),
            (PatrolState::FlyingLeft, PatrolState::WaitingLeft),
        ]
    );
    assert!(flaps > 0);
    assert!(fly_frames > 0);

    // The bird never leaves the map.
    let pos = game.world.get::<MapPosition>(bird).unwrap().pos;
    assert!(pos.x > 16.0 && pos.x < 624.0);
    assert!(pos.y >= 16.0 && pos.y < 240.0);
}
