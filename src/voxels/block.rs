use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// Closed catalog of block types. The discriminant is the block id;
/// `Empty` (0) is the air sentinel.
#[repr(u8)]
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    #[default]
    Empty = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    CoalOre = 4,
    IronOre = 5,
    Sand = 6,
    Water = 7,
    Bedrock = 8,
}

/// Generation parameters for a block that is seeded into the underground.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ResourceParams {
    /// Per-axis noise stretch. Sample point is `position / scale`.
    pub scale: DVec3,
    /// Noise values above this threshold place the resource.
    pub scarcity: f64,
}

/// Resource seeding order. Later entries win where they overlap earlier ones.
pub const RESOURCES: [BlockKind; 3] = [BlockKind::Stone, BlockKind::CoalOre, BlockKind::IronOre];

/// Indestructible bottom row of the world.
pub const FLOOR_BLOCK: BlockKind = BlockKind::Bedrock;

impl BlockKind {
    pub const ALL: [BlockKind; 9] = [
        BlockKind::Empty,
        BlockKind::Grass,
        BlockKind::Dirt,
        BlockKind::Stone,
        BlockKind::CoalOre,
        BlockKind::IronOre,
        BlockKind::Sand,
        BlockKind::Water,
        BlockKind::Bedrock,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<BlockKind> {
        BlockKind::ALL.get(id as usize).copied()
    }

    pub fn is_empty(self) -> bool {
        matches!(self, BlockKind::Empty)
    }

    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Empty => "empty",
            BlockKind::Grass => "grass",
            BlockKind::Dirt => "dirt",
            BlockKind::Stone => "stone",
            BlockKind::CoalOre => "coal",
            BlockKind::IronOre => "iron",
            BlockKind::Sand => "sand",
            BlockKind::Water => "water",
            BlockKind::Bedrock => "bedrock",
        }
    }

    pub fn resource(self) -> Option<ResourceParams> {
        match self {
            BlockKind::Stone => Some(ResourceParams {
                scale: DVec3::splat(30.0),
                scarcity: 0.5,
            }),
            BlockKind::CoalOre => Some(ResourceParams {
                scale: DVec3::splat(20.0),
                scarcity: 0.8,
            }),
            BlockKind::IronOre => Some(ResourceParams {
                scale: DVec3::splat(60.0),
                scarcity: 0.9,
            }),
            _ => None,
        }
    }
}

/// Checks every resource in [`RESOURCES`] for usable noise parameters.
pub fn validate_resources() -> Result<(), WorldError> {
    for kind in RESOURCES {
        let Some(params) = kind.resource() else {
            return Err(WorldError::InvalidConfiguration(format!(
                "{} is listed as resource but has no resource parameters",
                kind.name()
            )));
        };
        for (axis, value) in [
            ("x", params.scale.x),
            ("y", params.scale.y),
            ("z", params.scale.z),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WorldError::DegenerateNoiseInput {
                    what: format!("{}.scale.{axis}", kind.name()),
                    value,
                });
            }
        }
        if !(0.0..=1.0).contains(&params.scarcity) {
            return Err(WorldError::InvalidConfiguration(format!(
                "{}.scarcity must be within [0, 1], got {}",
                kind.name(),
                params.scarcity
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{BlockKind, RESOURCES, validate_resources};

    #[test]
    fn test_ids_are_dense_from_zero() {
        for (index, kind) in BlockKind::ALL.iter().enumerate() {
            assert_eq!(kind.id() as usize, index);
            assert_eq!(BlockKind::from_id(index as u8), Some(*kind));
        }
        assert!(BlockKind::from_id(BlockKind::ALL.len() as u8).is_none());
    }

    #[test]
    fn test_only_empty_is_empty() {
        assert!(BlockKind::Empty.is_empty());
        assert_eq!(BlockKind::default(), BlockKind::Empty);
        assert_eq!(BlockKind::ALL.iter().filter(|k| k.is_empty()).count(), 1);
    }

    #[test]
    fn test_resource_catalog_is_valid() {
        assert!(validate_resources().is_ok());
        assert!(RESOURCES.iter().all(|k| k.resource().is_some()));
        assert!(BlockKind::Grass.resource().is_none());
    }
}
