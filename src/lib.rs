pub mod bounds;
pub mod collision;
pub mod config;
pub mod error;
pub mod simulation;
pub mod systems;
pub mod voxels;
