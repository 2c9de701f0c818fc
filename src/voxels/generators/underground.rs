use glam::IVec3;

use crate::voxels::{
    BlockKind, VoxelGrid,
    block::FLOOR_BLOCK,
    seed::{NoiseSource, SeededNoise},
};

use super::GenerationPass;

// TUNING
const CAVE_SCALE: f64 = 20.0;
const CAVE_THRESHOLD: f64 = 0.3;

/// Bedrock floor plus stone carved by a thresholded 3D noise field.
pub struct UndergroundPass {
    depth: usize,
    caves: SeededNoise,
}

impl UndergroundPass {
    pub fn new(depth: usize, source: &mut NoiseSource) -> UndergroundPass {
        Self {
            depth,
            caves: source.next_noise(),
        }
    }

    pub fn is_cave(&self, x: i32, y: i32, z: i32) -> bool {
        let value = self.caves.noise_3d(
            x as f64 / CAVE_SCALE,
            y as f64 / CAVE_SCALE,
            z as f64 / CAVE_SCALE,
        );
        value > CAVE_THRESHOLD
    }
}

impl GenerationPass for UndergroundPass {
    fn name(&self) -> &'static str {
        "underground"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        let width = grid.width() as i32;
        let depth = self.depth.min(grid.total_height()) as i32;
        for x in 0..width {
            for z in 0..width {
                grid.set_block_id(IVec3::new(x, 0, z), FLOOR_BLOCK);
                for y in 1..depth {
                    let kind = if self.is_cave(x, y, z) {
                        BlockKind::Empty
                    } else {
                        BlockKind::Stone
                    };
                    grid.set_block_id(IVec3::new(x, y, z), kind);
                }
            }
        }
    }
}
