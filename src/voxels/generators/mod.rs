use std::time::Instant;

use log::{debug, info};

use crate::{
    config::{self, GenerationParams, WorldSize},
    error::WorldError,
    voxels::{
        VoxelGrid,
        seed::NoiseSource,
    },
};

pub mod overworld;
pub mod resources;
pub mod underground;

use overworld::OverworldPass;
use resources::ResourcePass;
use underground::UndergroundPass;

/// Thickness of the cave and ore layer below the overworld.
pub const UNDERGROUND_DEPTH: usize = 20;

pub trait GenerationPass {
    fn name(&self) -> &'static str;
    /// Applies the pass to a grid that all previous passes have already run on.
    fn apply(&self, grid: &mut VoxelGrid);
}

/// Resets every cell to empty so the following passes start from air.
pub struct InitializePass;

impl GenerationPass for InitializePass {
    fn name(&self) -> &'static str {
        "initialize"
    }

    fn apply(&self, grid: &mut VoxelGrid) {
        grid.clear();
    }
}

/// Builds the passes in their fixed order. Each one draws its noise from
/// `source` as it is created, so this order is part of the seed contract.
pub fn build_passes(
    size: &WorldSize,
    params: &GenerationParams,
    source: &mut NoiseSource,
) -> Vec<Box<dyn GenerationPass>> {
    vec![
        Box::new(InitializePass),
        Box::new(UndergroundPass::new(UNDERGROUND_DEPTH, source)),
        Box::new(ResourcePass::new(UNDERGROUND_DEPTH, source)),
        Box::new(OverworldPass::new(
            UNDERGROUND_DEPTH,
            size.height,
            params.terrain,
            source,
        )),
    ]
}

/// Runs the whole pipeline into a freshly allocated grid.
pub fn generate_grid(size: &WorldSize, params: &GenerationParams) -> Result<VoxelGrid, WorldError> {
    config::validate(size, params)?;
    info!(
        "Generating world {}x{}x{} (seed {:?}, terrain {:?})",
        size.width,
        size.height + UNDERGROUND_DEPTH,
        size.width,
        params.seed,
        params.terrain
    );
    let start = Instant::now();

    let mut source = NoiseSource::new(&params.seed);
    let passes = build_passes(size, params, &mut source);
    let mut grid = VoxelGrid::new(size.width, size.height + UNDERGROUND_DEPTH);
    for pass in &passes {
        let pass_start = Instant::now();
        pass.apply(&mut grid);
        debug!(
            "Pass '{}' took {}ms",
            pass.name(),
            pass_start.elapsed().as_secs_f32() * 1000.0
        );
    }

    info!(
        "World generation: {} cells in {}ms",
        grid.len(),
        start.elapsed().as_secs_f32() * 1000.0
    );
    Ok(grid)
}
