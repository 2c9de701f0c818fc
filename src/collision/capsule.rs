use glam::{IVec3, Vec3};

use crate::bounds::AABB;

use super::{Capsule, CollisionInfo, ContactAxis};

/// Below this squared horizontal distance the contact sits on the capsule axis
/// and has no usable horizontal direction.
const AXIS_EPSILON_SQ: f32 = 1e-8;

/// True if `point` lies strictly inside the capsule's bounding cylinder
pub fn point_in_capsule(capsule: &Capsule, point: Vec3) -> bool {
    let offset = point - capsule.center();
    let r_sq = offset.x * offset.x + offset.z * offset.z;
    offset.y.abs() < capsule.height / 2.0 && r_sq < capsule.radius * capsule.radius
}

/// Narrow phase for one grid cell, treated as a unit cube centered on `cell`.
///
/// Separates along whichever axis overlaps least. Vertical contacts carry a
/// normal of (0, +-1, 0), horizontal ones point from the contact back to the
/// capsule axis in the xz plane.
pub fn get_capsule_cell_collision_info(capsule: &Capsule, cell: IVec3) -> Option<CollisionInfo> {
    let center = capsule.center();
    // Closest point on the cube to the capsule's central axis
    let cube = AABB::new_center(&cell.as_vec3(), 1.0);
    let closest = cube.closest_point(center);
    if !point_in_capsule(capsule, closest) {
        return None;
    }

    let offset = closest - center;
    let horizontal_sq = offset.x * offset.x + offset.z * offset.z;
    let overlap_vertical = capsule.height / 2.0 - offset.y.abs();
    let overlap_horizontal = capsule.radius - horizontal_sq.sqrt();

    if overlap_vertical < overlap_horizontal || horizontal_sq < AXIS_EPSILON_SQ {
        // Center inside the cube (offset.y == 0) resolves upward
        let normal = if offset.y > 0.0 { Vec3::NEG_Y } else { Vec3::Y };
        Some(CollisionInfo {
            cell,
            contact_point: closest,
            normal,
            overlap: overlap_vertical,
            axis: ContactAxis::Vertical,
        })
    } else {
        Some(CollisionInfo {
            cell,
            contact_point: closest,
            normal: Vec3::new(-offset.x, 0.0, -offset.z).normalize(),
            overlap: overlap_horizontal,
            axis: ContactAxis::Horizontal,
        })
    }
}
