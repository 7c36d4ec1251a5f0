//! Simulation setup and frame stepping.
//!
//! [`Game`] owns the ECS [`World`] and the per-frame [`Schedule`]. The frame
//! order is fixed:
//!
//! 1. [`update_world_time`] (outside the schedule, needs `&mut World`)
//! 2. [`update_frame_messages`] – rotate message queues
//! 3. [`patrol_flight_system`] – behavior decides intent, flaps, transitions
//! 4. [`movement`] – integrate velocity, resolve against terrain
//! 5. [`animation`] – advance timelines and submit frames
//!
//! Systems are chained, so within one frame every entity sees them in this
//! order. Entity iteration order inside a system is unspecified.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;

use crate::components::animation::{AnimationRequest, Animator};
use crate::components::boxcollider::BoxCollider;
use crate::components::conversation::Conversation;
use crate::components::facing::Facing;
use crate::components::mapposition::MapPosition;
use crate::components::patrol::{PatrolFlight, PatrolSettings};
use crate::components::rigidbody::RigidBody;
use crate::components::terraincollision::TerrainCollision;
use crate::error::PixelkinError;
use crate::events::animation::AnimationFrame;
use crate::events::patrol::JumpCue;
use crate::resources::level::{Level, PatrolSpawn};
use crate::resources::physicsconfig::PhysicsConfig;
use crate::resources::spritesheetstore::SpriteSheetStore;
use crate::resources::tileworld::TileWorld;
use crate::resources::worldtime::WorldTime;
use crate::systems::animation::animation;
use crate::systems::messages::update_frame_messages;
use crate::systems::movement::movement;
use crate::systems::patrol::patrol_flight_system;
use crate::systems::time::update_world_time;

pub struct Game {
    pub world: World,
    schedule: Schedule,
}

impl Game {
    /// Create an empty simulation. Load a level before stepping to get
    /// terrain and sprites; without one entities move freely and draw nothing.
    pub fn new(config: PhysicsConfig) -> Self {
        let mut world = World::new();
        world.insert_resource(WorldTime::default());
        world.insert_resource(config);
        world.insert_resource(SpriteSheetStore::default());
        world.init_resource::<Messages<AnimationFrame>>();
        world.init_resource::<Messages<JumpCue>>();

        let mut schedule = Schedule::default();
        schedule.add_systems(
            (
                update_frame_messages,
                patrol_flight_system,
                movement,
                animation,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// Install the level geometry and sprite sheets, then spawn its patrols.
    ///
    /// Replaces any previously loaded terrain and sheets, and despawns the
    /// patrol flyers of the previous level. Fails before touching the world
    /// when the level is inconsistent.
    pub fn load_level(&mut self, level: &Level) -> Result<Vec<Entity>, PixelkinError> {
        level.validate()?;
        let tiles = TileWorld::from_level(level)?;

        let mut sheets = SpriteSheetStore::default();
        for (key, sheet) in &level.sprites {
            sheets.insert(key.clone(), sheet.clone());
        }

        self.world.insert_resource(tiles);
        self.world.insert_resource(sheets);

        let stale: Vec<Entity> = self
            .world
            .query_filtered::<Entity, With<PatrolFlight>>()
            .iter(&self.world)
            .collect();
        for entity in &stale {
            self.world.despawn(*entity);
        }
        if !stale.is_empty() {
            info!("Despawned {} patrol flyers from the previous level", stale.len());
        }

        let spawned: Vec<Entity> = level
            .patrols
            .iter()
            .map(|spawn| spawn_patrol_flyer(&mut self.world, spawn))
            .collect();
        info!("Spawned {} patrol flyers", spawned.len());
        Ok(spawned)
    }

    /// Advance the simulation by `dt` seconds (unscaled).
    pub fn step(&mut self, dt: f32) {
        update_world_time(&mut self.world, dt);
        self.schedule.run(&mut self.world);
        self.world.clear_trackers();
    }

    /// Take every frame submission not yet consumed.
    pub fn drain_frames(&mut self) -> Vec<AnimationFrame> {
        self.world
            .resource_mut::<Messages<AnimationFrame>>()
            .drain()
            .collect()
    }

    /// Take every flap cue not yet consumed.
    pub fn drain_jump_cues(&mut self) -> Vec<JumpCue> {
        self.world.resource_mut::<Messages<JumpCue>>().drain().collect()
    }
}

/// Spawn a patrol flyer with the bundle the systems expect.
///
/// The spawn altitude becomes the altitude the flyer holds while flying.
pub fn spawn_patrol_flyer(world: &mut World, spawn: &PatrolSpawn) -> Entity {
    let config = world.resource::<PhysicsConfig>().clone();

    let mut rigidbody = RigidBody::with_max_speed(config.max_speed);
    rigidbody.add_force("gravity", Vec2::new(0.0, -config.gravity));

    let settings = PatrolSettings {
        wait_time: config.wait_time,
        jump_interval: config.jump_interval,
        jump_height: config.jump_height,
        nest_left: spawn.nest_left.as_str().into(),
        nest_right: spawn.nest_right.as_str().into(),
        wait_tag: spawn.wait_tag.clone(),
        fly_tag: spawn.fly_tag.clone(),
    };
    let patrol = PatrolFlight::new(spawn.y, settings);
    let request = AnimationRequest::new(patrol.animation_tag());

    world
        .spawn((
            MapPosition::new(spawn.x, spawn.y),
            rigidbody,
            BoxCollider::new(spawn.width, spawn.height),
            TerrainCollision::all(),
            Facing::default(),
            Animator::new(spawn.sprite.clone()),
            request,
            patrol,
            Conversation::default(),
        ))
        .id()
}
