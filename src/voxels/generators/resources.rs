use glam::IVec3;

use crate::voxels::{
    BlockKind, VoxelGrid,
    block::{RESOURCES, ResourceParams},
    seed::{NoiseSource, SeededNoise},
};

use super::GenerationPass;

/// Seeds resource blocks into underground stone.
///
/// Only cells that are stone after the underground pass can host a resource.
/// Resources are applied in catalog order and a later resource replaces an
/// earlier one on the same cell.
pub struct ResourcePass {
    depth: usize,
    resources: Vec<(BlockKind, ResourceParams)>,
    noise: SeededNoise,
}

impl ResourcePass {
    pub fn new(depth: usize, source: &mut NoiseSource) -> ResourcePass {
        let resources = RESOURCES
            .iter()
            .filter_map(|kind| kind.resource().map(|params| (*kind, params)))
            .collect();
        Self {
            depth,
            resources,
            noise: source.next_noise(),
        }
    }

    fn sample(&self, pos: IVec3, params: &ResourceParams) -> f64 {
        let p = pos.as_dvec3() / params.scale;
        self.noise.noise_3d(p.x, p.y, p.z)
    }

    /// Resource that ends up in a stone cell at `pos`, if any.
    pub fn resource_at(&self, pos: IVec3) -> Option<BlockKind> {
        self.resources
            .iter()
            .filter(|(_, params)| self.sample(pos, params) > params.scarcity)
            .map(|(kind, _)| *kind)
            .last()
    }
}

impl GenerationPass for ResourcePass {
    fn name(&self) -> &'static str {
        "resources"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        let width = grid.width() as i32;
        let depth = self.depth.min(grid.total_height()) as i32;
        for x in 0..width {
            for y in 1..depth {
                for z in 0..width {
                    let pos = IVec3::new(x, y, z);
                    if grid.block_at(pos) != BlockKind::Stone {
                        continue;
                    }
                    if let Some(kind) = self.resource_at(pos) {
                        grid.set_block_id(pos, kind);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::IVec3;

    use crate::{
        config::Seed,
        voxels::{
            BlockKind, VoxelGrid,
            block::FLOOR_BLOCK,
            generators::{GenerationPass, UNDERGROUND_DEPTH},
            seed::NoiseSource,
        },
    };

    use super::ResourcePass;

    fn stone_grid(width: usize) -> VoxelGrid {
        let mut grid = VoxelGrid::new(width, UNDERGROUND_DEPTH + 2);
        for x in 0..width as i32 {
            for z in 0..width as i32 {
                grid.set_block_id(IVec3::new(x, 0, z), FLOOR_BLOCK);
                for y in 1..UNDERGROUND_DEPTH as i32 {
                    grid.set_block_id(IVec3::new(x, y, z), BlockKind::Stone);
                }
            }
        }
        grid
    }

    #[test]
    fn test_resources_follow_noise() {
        let mut source = NoiseSource::new(&Seed::from(21));
        let pass = ResourcePass::new(UNDERGROUND_DEPTH, &mut source);
        let mut grid = stone_grid(12);
        pass.apply(&mut grid);
        for x in 0..12 {
            for y in 1..UNDERGROUND_DEPTH as i32 {
                for z in 0..12 {
                    let pos = IVec3::new(x, y, z);
                    let expected = pass.resource_at(pos).unwrap_or(BlockKind::Stone);
                    assert_eq!(grid.block_at(pos), expected, "{pos}");
                }
            }
        }
    }

    #[test]
    fn test_only_stone_hosts_resources() {
        let mut source = NoiseSource::new(&Seed::from(21));
        let pass = ResourcePass::new(UNDERGROUND_DEPTH, &mut source);
        // Caves and floor stay what they are
        let mut grid = VoxelGrid::new(8, UNDERGROUND_DEPTH);
        for x in 0..8 {
            for z in 0..8 {
                grid.set_block_id(IVec3::new(x, 0, z), FLOOR_BLOCK);
            }
        }
        let before = grid.clone();
        pass.apply(&mut grid);
        assert!(grid.same_blocks(&before));
    }

    #[test]
    fn test_later_resource_wins() {
        let mut source = NoiseSource::new(&Seed::from(77));
        let pass = ResourcePass::new(UNDERGROUND_DEPTH, &mut source);
        // Whenever iron qualifies, iron is chosen no matter what coal says
        for x in 0..32 {
            for y in 1..UNDERGROUND_DEPTH as i32 {
                for z in 0..32 {
                    let pos = IVec3::new(x, y, z);
                    let (kind, params) = pass.resources.last().unwrap();
                    if pass.sample(pos, params) > params.scarcity {
                        assert_eq!(pass.resource_at(pos), Some(*kind));
                    }
                }
            }
        }
    }
}
