use glam::Vec3;
use hecs::{Entity, World};
use log::{info, trace};

use crate::{
    collision::CollisionDebug,
    config::{GenerationParams, WorldConfig, WorldSize},
    error::WorldError,
    systems::{
        physics::{
            Grounded, Transform, Velocity, system_gravity, system_movement,
            system_voxel_collisions, world_velocity,
        },
        player::{self, MovementInput, PLAYER_HEIGHT, spawn_player, system_player_input},
    },
    voxels::VoxelWorld,
};

/// Snapshot of the player after a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub yaw: f32,
    /// Entity frame
    pub velocity: Vec3,
    pub world_velocity: Vec3,
    pub grounded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub contacts: usize,
    pub grounded: bool,
    pub position: Vec3,
}

/// Single-threaded loop driving one player capsule through a generated world.
pub struct Simulation {
    ecs: World,
    world: VoxelWorld,
    player: Entity,
    debug: CollisionDebug,
    ticks: u64,
}

impl Simulation {
    pub fn new(config: &WorldConfig) -> Result<Simulation, WorldError> {
        Ok(Self::with_world(VoxelWorld::new(config)?))
    }

    pub fn with_world(world: VoxelWorld) -> Simulation {
        let mut ecs = World::new();
        let spawn = world.spawn_point(PLAYER_HEIGHT);
        let player = spawn_player(&mut ecs, spawn);
        info!("Player spawned at {spawn:.2}");
        Self {
            ecs,
            world,
            player,
            debug: CollisionDebug::default(),
            ticks: 0,
        }
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    /// Mutable access for the renderer back-references
    pub fn world_mut(&mut self) -> &mut VoxelWorld {
        &mut self.world
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_input(&mut self, input: MovementInput) {
        if let Ok(mut current) = self.ecs.get::<&mut MovementInput>(self.player) {
            *current = input;
        }
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        if let Ok(mut transform) = self.ecs.get::<&mut Transform>(self.player) {
            transform.yaw = yaw;
        }
    }

    /// Toggles recording of broad-phase candidates and contact points
    pub fn set_debug(&mut self, enabled: bool) {
        self.debug = CollisionDebug::new(enabled);
    }

    /// Candidates and contacts recorded during the last tick
    pub fn debug(&self) -> &CollisionDebug {
        &self.debug
    }

    /// Advances by `dt` seconds: gravity, input and integration, then
    /// collision detection and resolution.
    pub fn tick(&mut self, dt: f32) -> TickReport {
        self.debug.clear();
        system_gravity(&mut self.ecs, dt);
        system_player_input(&mut self.ecs);
        system_movement(&mut self.ecs, dt);
        let contacts = system_voxel_collisions(&mut self.ecs, self.world.grid(), &mut self.debug);
        self.ticks += 1;

        let (position, grounded) = self
            .player_state()
            .map_or((Vec3::ZERO, false), |state| (state.position, state.grounded));
        trace!("Tick {}: {contacts} contacts at {position:.2}", self.ticks);
        TickReport {
            tick: self.ticks,
            contacts,
            grounded,
            position,
        }
    }

    /// Replaces the world and respawns the player on success. On error the
    /// previous world and player state are kept.
    pub fn regenerate(&mut self, size: WorldSize, params: GenerationParams) -> Result<(), WorldError> {
        self.world.regenerate(size, params)?;
        self.respawn();
        Ok(())
    }

    pub fn respawn(&mut self) {
        let spawn = self.world.spawn_point(PLAYER_HEIGHT);
        player::respawn(&mut self.ecs, spawn);
        info!("Player respawned at {spawn:.2}");
    }

    pub fn player_state(&self) -> Option<PlayerState> {
        let mut query = self
            .ecs
            .query_one::<(&Transform, &Velocity, &Grounded)>(self.player)
            .ok()?;
        let (transform, velocity, grounded) = query.get()?;
        Some(PlayerState {
            position: transform.position,
            yaw: transform.yaw,
            velocity: velocity.0,
            world_velocity: world_velocity(velocity.0, transform.yaw),
            grounded: grounded.0,
        })
    }
}
