use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use log::debug;

use crate::{
    systems::physics::{GRAVITY, Gravity, Grounded, Transform, Velocity},
    voxels::VoxelCollider,
};

pub const PLAYER_RADIUS: f32 = 0.5;
pub const PLAYER_HEIGHT: f32 = 1.75;

pub struct Player;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerMovement {
    pub max_speed: f32,
    pub jump_speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            jump_speed: 10.0,
        }
    }
}

/// Movement intent for the next tick. `direction.x` strafes right,
/// `direction.y` moves forward; each axis is expected in [-1, 1].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct MovementInput {
    pub direction: Vec2,
    pub jump: bool,
}

pub fn spawn_player(world: &mut World, position: Vec3) -> Entity {
    world.spawn((
        Player,
        Transform::new(position),
        Velocity(Vec3::ZERO),
        Gravity(GRAVITY),
        Grounded::default(),
        VoxelCollider::Capsule {
            radius: PLAYER_RADIUS,
            height: PLAYER_HEIGHT,
        },
        PlayerMovement::default(),
        MovementInput::default(),
    ))
}

/// Writes the horizontal input into the local velocity and applies a pending
/// jump if the player stood on something after the previous tick.
pub fn system_player_input(world: &mut World) {
    for (_entity, (velocity, movement, input, grounded)) in world.query_mut::<(
        &mut Velocity,
        &PlayerMovement,
        &mut MovementInput,
        &Grounded,
    )>() {
        let direction = input.direction.clamp_length_max(1.0) * movement.max_speed;
        velocity.0.x = direction.x;
        velocity.0.z = direction.y;
        if input.jump && grounded.0 {
            debug!("Jump");
            velocity.0.y += movement.jump_speed;
        }
        input.jump = false;
    }
}

/// Puts every player back at `position` at rest
pub fn respawn(world: &mut World, position: Vec3) {
    for (_entity, (_player, transform, velocity, grounded)) in
        world.query_mut::<(&Player, &mut Transform, &mut Velocity, &mut Grounded)>()
    {
        transform.position = position;
        velocity.0 = Vec3::ZERO;
        grounded.0 = false;
    }
}
