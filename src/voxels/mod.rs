pub mod block;
pub mod collision;
pub mod generators;
pub mod grid;
pub mod seed;
pub mod world;

pub use crate::voxels::block::BlockKind;
pub use crate::voxels::collision::VoxelCollider;
pub use crate::voxels::generators::UNDERGROUND_DEPTH;
pub use crate::voxels::grid::Cell;
pub use crate::voxels::grid::VoxelGrid;
pub use crate::voxels::world::VoxelWorld;
