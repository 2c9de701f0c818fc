use std::collections::BTreeMap;

use glam::{IVec3, Vec3};
use log::{info, warn};

use crate::{
    config::{GenerationParams, WorldConfig, WorldSize},
    error::WorldError,
    voxels::{
        BlockKind, VoxelGrid,
        generators::{UNDERGROUND_DEPTH, generate_grid},
    },
};

/// Owns the current voxel grid together with the parameters it was built from.
///
/// The renderer and the collision systems read the grid through `grid()`.
/// The only write access from outside is the renderer back-reference.
pub struct VoxelWorld {
    grid: VoxelGrid,
    size: WorldSize,
    params: GenerationParams,
}

impl VoxelWorld {
    pub fn new(config: &WorldConfig) -> Result<VoxelWorld, WorldError> {
        let grid = generate_grid(&config.size, &config.params)?;
        Ok(Self {
            grid,
            size: config.size,
            params: config.params.clone(),
        })
    }

    /// Wraps a hand-built grid. The grid is treated as already generated.
    pub fn from_grid(grid: VoxelGrid) -> VoxelWorld {
        let size = WorldSize {
            width: grid.width(),
            height: grid.total_height().saturating_sub(UNDERGROUND_DEPTH),
        };
        Self {
            grid,
            size,
            params: GenerationParams::default(),
        }
    }

    /// Rebuilds the world from its current size and parameters.
    pub fn generate(&mut self) -> Result<(), WorldError> {
        self.regenerate(self.size, self.params.clone())
    }

    /// Builds a fresh grid and swaps it in. On error the current grid,
    /// size and parameters are kept as they are.
    pub fn regenerate(&mut self, size: WorldSize, params: GenerationParams) -> Result<(), WorldError> {
        match generate_grid(&size, &params) {
            Ok(grid) => {
                self.grid = grid;
                self.size = size;
                self.params = params;
                info!("World replaced");
                Ok(())
            }
            Err(err) => {
                warn!("Regeneration rejected, keeping previous world: {err}");
                Err(err)
            }
        }
    }

    pub fn grid(&self) -> &VoxelGrid {
        &self.grid
    }

    pub fn size(&self) -> WorldSize {
        self.size
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    /// Everything needed to rebuild this exact world
    pub fn config(&self) -> WorldConfig {
        WorldConfig {
            size: self.size,
            params: self.params.clone(),
        }
    }

    pub fn set_instance_ref(&mut self, pos: IVec3, instance: Option<u32>) {
        self.grid.set_instance_ref(pos, instance);
    }

    /// Row of the highest solid cell in column (x, z)
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..self.grid.total_height() as i32)
            .rev()
            .find(|y| !self.grid.block_at(IVec3::new(x, *y, z)).is_empty())
    }

    pub fn count_blocks(&self) -> BTreeMap<BlockKind, usize> {
        let mut counts = BTreeMap::new();
        for (_, cell) in self.grid.iter() {
            *counts.entry(cell.kind).or_insert(0) += 1;
        }
        counts
    }

    /// Solid cells with at least one exposed face, paired with their render
    /// position (the underground layer sits below y = 0).
    pub fn iter_visible(&self) -> impl Iterator<Item = (IVec3, Vec3, BlockKind)> + '_ {
        self.grid
            .iter()
            .filter(|(pos, cell)| !cell.kind.is_empty() && !self.grid.is_fully_occluded(*pos))
            .map(|(pos, cell)| {
                let render_position = Vec3::new(
                    pos.x as f32,
                    (pos.y - UNDERGROUND_DEPTH as i32) as f32,
                    pos.z as f32,
                );
                (pos, render_position, cell.kind)
            })
    }

    /// Capsule top position that puts a capsule of `height` right on top of
    /// the center column.
    pub fn spawn_point(&self, height: f32) -> Vec3 {
        let x = (self.size.width / 2) as i32;
        let z = x;
        let ground = self.surface_height(x, z).unwrap_or(0);
        Vec3::new(x as f32, ground as f32 + 0.5 + height, z as f32)
    }
}
