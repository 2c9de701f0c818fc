use glam::{Quat, Vec3};
use hecs::World;
use log::trace;

use crate::{
    collision::{CollisionDebug, ContactAxis, resolve_collisions},
    voxels::{VoxelCollider, VoxelGrid, collision::detect_capsule_collisions},
};

pub const GRAVITY: f32 = 32.0;

/// Position of the capsule top in grid space plus heading about +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub yaw: f32,
}

impl Transform {
    pub fn new(position: Vec3) -> Transform {
        Self {
            position,
            yaw: 0.0,
        }
    }
}

/// Velocity in the entity frame: x strafes right, y is up, z is forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec3);

/// Downward acceleration applied every tick
pub struct Gravity(pub f32);

/// Set by the collision system when the last resolution had a vertical contact.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Grounded(pub bool);

/// Entity frame to world frame. Forward at yaw 0 is -Z.
pub fn world_velocity(local: Vec3, yaw: f32) -> Vec3 {
    Quat::from_rotation_y(yaw) * Vec3::new(local.x, local.y, -local.z)
}

/// Inverse of [`world_velocity`]
pub fn local_velocity(world: Vec3, yaw: f32) -> Vec3 {
    let v = Quat::from_rotation_y(-yaw) * world;
    Vec3::new(v.x, v.y, -v.z)
}

pub fn system_gravity(world: &mut World, dt: f32) {
    for (_entity, (velocity, gravity)) in world.query_mut::<(&mut Velocity, &Gravity)>() {
        velocity.0.y -= gravity.0 * dt;
    }
}

pub fn system_movement(world: &mut World, dt: f32) {
    for (_entity, (transform, velocity)) in world.query_mut::<(&mut Transform, &Velocity)>() {
        transform.position += world_velocity(velocity.0, transform.yaw) * dt;
    }
}

/// Pushes every collider out of the grid and strips the velocity component
/// along each contact normal. Returns the number of contacts resolved.
pub fn system_voxel_collisions(
    world: &mut World,
    grid: &VoxelGrid,
    debug: &mut CollisionDebug,
) -> usize {
    let mut total = 0;
    for (entity, (transform, velocity, collider, grounded)) in world.query_mut::<(
        &mut Transform,
        &mut Velocity,
        &VoxelCollider,
        &mut Grounded,
    )>() {
        grounded.0 = false;
        let capsule = collider.at(transform.position);
        let mut collisions = detect_capsule_collisions(grid, &capsule, debug);
        if collisions.is_empty() {
            continue;
        }

        let mut velocity_world = world_velocity(velocity.0, transform.yaw);
        resolve_collisions(&mut collisions, &mut transform.position, &mut velocity_world);
        velocity.0 = local_velocity(velocity_world, transform.yaw);
        grounded.0 = collisions.iter().any(|c| c.axis == ContactAxis::Vertical);

        trace!(
            "{entity:?} resolved {} contacts, now at {:.2}",
            collisions.len(),
            transform.position
        );
        total += collisions.len();
    }
    total
}
