use glam::Vec3;

use super::CollisionInfo;

/// Orders contacts so the least penetrating one is resolved first.
pub fn sort_by_overlap(collisions: &mut [CollisionInfo]) {
    collisions.sort_by(|a, b| a.overlap.total_cmp(&b.overlap));
}

/// Pushes the capsule out of every contact, smallest overlap first.
///
/// Each contact moves `position` by `normal * overlap` and removes the part of
/// `velocity` (world frame) that points along the normal. Contacts are applied
/// one after another on the state the previous one left behind.
pub fn resolve_collisions(collisions: &mut [CollisionInfo], position: &mut Vec3, velocity: &mut Vec3) {
    sort_by_overlap(collisions);
    for collision in collisions.iter() {
        *position += collision.normal * collision.overlap;
        let magnitude = velocity.dot(collision.normal);
        *velocity -= collision.normal * magnitude;
    }
}
