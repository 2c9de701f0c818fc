use glam::IVec3;

use crate::{
    config::TerrainParams,
    voxels::{
        BlockKind, VoxelGrid,
        seed::{NoiseSource, SeededNoise},
    },
};

use super::GenerationPass;

/// Number of empty cells below the grass that turn into dirt
pub const DIRT_LAYER_DEPTH: i32 = 4;
// TUNING
const PATCH_SCALE: f64 = 0.1;
const PATCH_THRESHOLD: f64 = 0.7;

/// Heightmap surface: grass on top, a dirt layer, then stone with dirt pockets.
/// Never overwrites a cell an earlier pass has filled.
pub struct OverworldPass {
    depth: usize,
    height: usize,
    terrain: TerrainParams,
    surface: SeededNoise,
    patches: SeededNoise,
}

impl OverworldPass {
    pub fn new(
        depth: usize,
        height: usize,
        terrain: TerrainParams,
        source: &mut NoiseSource,
    ) -> OverworldPass {
        let surface = source.next_noise();
        let patches = source.next_noise();
        Self {
            depth,
            height,
            terrain,
            surface,
            patches,
        }
    }

    /// Surface height above the underground layer, in [0, height - 1].
    pub fn surface_height(&self, x: i32, z: i32) -> i32 {
        let value = self.surface.noise_2d(
            x as f64 / self.terrain.scale,
            z as f64 / self.terrain.scale,
        );
        let scaled = self.terrain.offset + self.terrain.magnitude * value;
        let height = (self.height as f64 * scaled).floor() as i32;
        height.clamp(0, self.height as i32 - 1)
    }

    /// Absolute grid row of the grass block in column (x, z).
    pub fn surface_index(&self, x: i32, z: i32) -> i32 {
        self.depth as i32 + self.surface_height(x, z)
    }

    fn is_dirt_patch(&self, pos: IVec3) -> bool {
        let p = pos.as_dvec3() * PATCH_SCALE;
        self.patches.noise_3d(p.x, p.y, p.z) > PATCH_THRESHOLD
    }
}

impl GenerationPass for OverworldPass {
    fn name(&self) -> &'static str {
        "overworld"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        let width = grid.width() as i32;
        let depth = self.depth as i32;
        for x in 0..width {
            for z in 0..width {
                let surface_index = self.surface_index(x, z);
                grid.set_block_id(IVec3::new(x, surface_index, z), BlockKind::Grass);

                for y in (depth..surface_index).rev() {
                    let pos = IVec3::new(x, y, z);
                    if !grid.block_at(pos).is_empty() {
                        continue;
                    }
                    let kind = if surface_index - y <= DIRT_LAYER_DEPTH || self.is_dirt_patch(pos) {
                        BlockKind::Dirt
                    } else {
                        BlockKind::Stone
                    };
                    grid.set_block_id(pos, kind);
                }
            }
        }
    }
}
