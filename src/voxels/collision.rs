use glam::{IVec3, Vec3};
use log::trace;

use crate::{
    bounds::{AABB, IAabb},
    collision::{Capsule, CollisionDebug, CollisionInfo, get_capsule_cell_collision_info},
};

use super::VoxelGrid;

pub enum VoxelCollider {
    /// Upright capsule hanging below the entity position
    Capsule { radius: f32, height: f32 },
}

impl VoxelCollider {
    pub fn at(&self, position: Vec3) -> Capsule {
        match self {
            VoxelCollider::Capsule { radius, height } => Capsule::new(position, *radius, *height),
        }
    }
}

/// Integer cell range the capsule can touch: floor/ceil of its bounding box
pub fn capsule_extent(capsule: &Capsule) -> IAabb {
    let reach = Vec3::new(capsule.radius, 0.0, capsule.radius);
    let bb = AABB::new(capsule.bottom() - reach, capsule.position + reach);
    IAabb::from(&bb)
}

/// Broad phase. Yields every solid, in-bounds cell inside the capsule extent.
/// Never mutates the grid.
pub fn iter_capsule_candidates<'a>(
    grid: &'a VoxelGrid,
    capsule: &Capsule,
) -> impl Iterator<Item = IVec3> + 'a {
    debug_assert!(capsule.position.is_finite());
    let region = grid
        .bounds()
        .and_then(|bounds| bounds.intersection(&capsule_extent(capsule)));
    region
        .into_iter()
        .flat_map(|region| region.iter_points())
        .filter(|pos| !grid.block_at(*pos).is_empty())
}

/// Broad and narrow phase for one capsule. Contacts come back unordered.
pub fn detect_capsule_collisions(
    grid: &VoxelGrid,
    capsule: &Capsule,
    debug: &mut CollisionDebug,
) -> Vec<CollisionInfo> {
    let mut collisions = Vec::new();
    let mut candidates = 0;
    for cell in iter_capsule_candidates(grid, capsule) {
        candidates += 1;
        debug.add_candidate(cell);
        if let Some(info) = get_capsule_cell_collision_info(capsule, cell) {
            debug.add_contact(info.contact_point);
            collisions.push(info);
        }
    }
    trace!(
        "Capsule at {:.2}: {candidates} candidates, {} collisions",
        capsule.position,
        collisions.len()
    );
    collisions
}

#[cfg(test)]
mod tests {
    use glam::{IVec3, Vec3};

    use crate::{
        bounds::IAabb,
        collision::{Capsule, CollisionDebug, resolve_collisions},
        voxels::{BlockKind, VoxelGrid},
    };

    use super::{capsule_extent, detect_capsule_collisions, iter_capsule_candidates};

    const RADIUS: f32 = 0.5;
    const HEIGHT: f32 = 1.75;

    fn single_cell_grid(cell: IVec3) -> VoxelGrid {
        let mut grid = VoxelGrid::new(4, 8);
        grid.set_block_id(cell, BlockKind::Stone);
        grid
    }

    fn floor_grid() -> VoxelGrid {
        let mut grid = VoxelGrid::new(6, 8);
        for x in 0..6 {
            for z in 0..6 {
                grid.set_block_id(IVec3::new(x, 0, z), BlockKind::Bedrock);
            }
        }
        grid
    }

    #[test]
    fn test_extent_covers_capsule() {
        let capsule = Capsule::new(Vec3::new(2.3, 5.0, 1.5), RADIUS, HEIGHT);
        let extent = capsule_extent(&capsule);
        assert_eq!(
            extent,
            IAabb::new_rect(IVec3::new(1, 3, 1), IVec3::new(3, 5, 2))
        );
    }

    #[test]
    fn test_candidates_only_solid_cells() {
        let grid = floor_grid();
        let capsule = Capsule::new(Vec3::new(2.0, 2.5, 2.0), RADIUS, HEIGHT);
        let candidates: Vec<IVec3> = iter_capsule_candidates(&grid, &capsule).collect();
        assert_eq!(candidates.len(), 9);
        assert!(candidates.iter().all(|c| c.y == 0));
    }

    #[test]
    fn test_outside_grid_yields_nothing() {
        let grid = floor_grid();
        for position in [
            Vec3::new(-10.0, 1.0, -10.0),
            Vec3::new(3.0, 100.0, 3.0),
            Vec3::new(50.0, 0.5, 2.0),
        ] {
            let capsule = Capsule::new(position, RADIUS, HEIGHT);
            assert_eq!(iter_capsule_candidates(&grid, &capsule).count(), 0);
            let mut debug = CollisionDebug::default();
            assert!(detect_capsule_collisions(&grid, &capsule, &mut debug).is_empty());
        }
    }

    #[test]
    fn test_half_embedded_single_cell() {
        let grid = single_cell_grid(IVec3::ZERO);
        let capsule = Capsule::new(Vec3::new(0.0, HEIGHT, 0.0), RADIUS, HEIGHT);
        let mut debug = CollisionDebug::default();
        let collisions = detect_capsule_collisions(&grid, &capsule, &mut debug);
        assert_eq!(collisions.len(), 1);
        assert!(collisions[0].overlap > 0.0);
        assert_eq!(collisions[0].normal, Vec3::Y);
        assert_eq!(collisions[0].cell, IVec3::ZERO);
    }

    #[test]
    fn test_no_residual_collision_after_resolution() {
        let cell = IVec3::new(1, 1, 1);
        let grid = single_cell_grid(cell);
        let starts = [
            // Sinking into the top face
            Vec3::new(1.0, 1.5 + HEIGHT - 0.25, 1.0),
            // Pushing into the +x face
            Vec3::new(1.8, 2.0, 1.0),
            // Pushing into the -z face
            Vec3::new(1.1, 2.0, 0.3),
        ];
        for start in starts {
            let mut position = start;
            let mut velocity = Vec3::new(1.0, -4.0, 1.0);
            let mut debug = CollisionDebug::default();
            let mut collisions =
                detect_capsule_collisions(&grid, &Capsule::new(position, RADIUS, HEIGHT), &mut debug);
            assert_eq!(collisions.len(), 1, "start {start}");
            resolve_collisions(&mut collisions, &mut position, &mut velocity);

            let residual = detect_capsule_collisions(
                &grid,
                &Capsule::new(position, RADIUS, HEIGHT),
                &mut debug,
            );
            assert!(
                residual.iter().all(|c| c.overlap <= 1e-5),
                "start {start} left {residual:?}"
            );
        }
    }

    #[test]
    fn test_debug_records_candidates_and_contacts() {
        let grid = floor_grid();
        let capsule = Capsule::new(Vec3::new(2.0, 0.5 + HEIGHT - 0.1, 2.0), RADIUS, HEIGHT);
        let mut debug = CollisionDebug::new(true);
        let collisions = detect_capsule_collisions(&grid, &capsule, &mut debug);
        assert_eq!(debug.candidates.len(), 9);
        assert_eq!(debug.contacts.len(), collisions.len());

        let mut disabled = CollisionDebug::new(false);
        detect_capsule_collisions(&grid, &capsule, &mut disabled);
        assert!(disabled.candidates.is_empty());
    }
}
