use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::WorldError,
    voxels::{block, generators::UNDERGROUND_DEPTH, grid::Cell},
};

/// Largest grid generation will allocate, in cells
pub const MAX_CELLS: usize = 1 << 28;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// 64-bit FNV-1a over the UTF-8 bytes. Fixed so text seeds build the same
/// world across toolchains.
fn fnv1a(text: &str) -> u64 {
    text.bytes()
        .fold(FNV_OFFSET, |hash, byte| (hash ^ byte as u64).wrapping_mul(FNV_PRIME))
}

/// World seed as entered by the user. Either a plain number or free text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Seed {
    Number(i64),
    Text(String),
}

impl Seed {
    /// Collapses the seed into the value the noise source is seeded with.
    /// Numeric text parses like a number, so `"42"` and `42` build the same world.
    pub fn to_u64(&self) -> u64 {
        match self {
            Seed::Number(n) => *n as u64,
            Seed::Text(text) => match text.trim().parse::<i64>() {
                Ok(n) => n as u64,
                Err(_) => fnv1a(text),
            },
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Number(0)
    }
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed::Number(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct TerrainParams {
    /// Horizontal stretch of the surface noise. Larger is smoother.
    pub scale: f64,
    /// Share of the overworld height the noise may swing by, in [0, 1].
    pub magnitude: f64,
    /// Base surface level as share of the overworld height, in [0, 1].
    pub offset: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: 30.0,
            magnitude: 0.5,
            offset: 0.2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GenerationParams {
    pub seed: Seed,
    pub terrain: TerrainParams,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldSize {
    /// Extent along x and z
    pub width: usize,
    /// Overworld height above the underground layer
    pub height: usize,
}

impl Default for WorldSize {
    fn default() -> Self {
        Self {
            width: 64,
            height: 32,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct WorldConfig {
    pub size: WorldSize,
    pub params: GenerationParams,
}

impl WorldConfig {
    pub fn load(path: &Path) -> Result<WorldConfig, WorldError> {
        let content = fs::read_to_string(path)?;
        let config: WorldConfig = serde_json::from_str(&content)?;
        debug!("Loaded world config from {}", path.display());
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), WorldError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("Saved world config to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), WorldError> {
        validate(&self.size, &self.params)
    }
}

/// Rejects any size or parameter set that generation cannot handle.
/// Runs before a single cell is allocated.
pub fn validate(size: &WorldSize, params: &GenerationParams) -> Result<(), WorldError> {
    if size.width == 0 {
        return Err(WorldError::InvalidConfiguration(
            "width must be at least 1".to_string(),
        ));
    }
    if size.height == 0 {
        return Err(WorldError::InvalidConfiguration(
            "height must be at least 1".to_string(),
        ));
    }
    let total_height = size.height.saturating_add(UNDERGROUND_DEPTH);
    // Grid coordinates are i32
    if size.width > i32::MAX as usize || total_height > i32::MAX as usize {
        return Err(WorldError::InvalidConfiguration(format!(
            "world of {}x{}x{} cells exceeds the coordinate range",
            size.width, total_height, size.width
        )));
    }
    let fits = size
        .width
        .checked_mul(size.width)
        .and_then(|area| area.checked_mul(total_height))
        .filter(|cells| *cells <= MAX_CELLS)
        .and_then(|cells| cells.checked_mul(size_of::<Cell>()))
        .is_some_and(|bytes| bytes <= isize::MAX as usize);
    if !fits {
        return Err(WorldError::InvalidConfiguration(format!(
            "world of {}x{}x{} cells is too large (at most {MAX_CELLS} cells)",
            size.width, total_height, size.width
        )));
    }

    let terrain = &params.terrain;
    if !terrain.scale.is_finite() || terrain.scale <= 0.0 {
        return Err(WorldError::DegenerateNoiseInput {
            what: "terrain.scale".to_string(),
            value: terrain.scale,
        });
    }
    check_unit_interval("terrain.magnitude", terrain.magnitude)?;
    check_unit_interval("terrain.offset", terrain.offset)?;

    block::validate_resources()
}

fn check_unit_interval(name: &str, value: f64) -> Result<(), WorldError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(WorldError::InvalidConfiguration(format!(
            "{name} must be within [0, 1], got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::env;

    use crate::error::WorldError;

    use super::{
        GenerationParams, MAX_CELLS, Seed, TerrainParams, WorldConfig, WorldSize, validate,
    };

    #[test]
    fn test_default_config_is_valid() {
        assert!(WorldConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_width_rejected() {
        let size = WorldSize {
            width: 0,
            height: 8,
        };
        let res = validate(&size, &GenerationParams::default());
        assert!(matches!(res, Err(WorldError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_zero_height_rejected() {
        let size = WorldSize {
            width: 8,
            height: 0,
        };
        let res = validate(&size, &GenerationParams::default());
        assert!(matches!(res, Err(WorldError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_oversized_world_rejected() {
        for size in [
            // Fits usize but not memory
            WorldSize {
                width: 1 << 29,
                height: 8,
            },
            WorldSize {
                width: i32::MAX as usize + 1,
                height: 1,
            },
            WorldSize {
                width: 1,
                height: usize::MAX,
            },
        ] {
            let res = validate(&size, &GenerationParams::default());
            assert!(
                matches!(res, Err(WorldError::InvalidConfiguration(_))),
                "{size:?} was accepted"
            );
        }
    }

    #[test]
    fn test_largest_world_accepted() {
        let size = WorldSize {
            width: 1 << 11,
            height: (MAX_CELLS >> 22) - 20,
        };
        assert!(validate(&size, &GenerationParams::default()).is_ok());
        let too_tall = WorldSize {
            height: size.height + 1,
            ..size
        };
        assert!(validate(&too_tall, &GenerationParams::default()).is_err());
    }

    #[test]
    fn test_degenerate_terrain_scale_rejected() {
        for scale in [0.0, -3.0, f64::NAN] {
            let params = GenerationParams {
                seed: Seed::default(),
                terrain: TerrainParams {
                    scale,
                    ..TerrainParams::default()
                },
            };
            let res = validate(&WorldSize::default(), &params);
            assert!(
                matches!(res, Err(WorldError::DegenerateNoiseInput { .. })),
                "scale {scale} was accepted"
            );
        }
    }

    #[test]
    fn test_magnitude_and_offset_outside_unit_interval_rejected() {
        let mut params = GenerationParams::default();
        params.terrain.magnitude = 1.5;
        assert!(validate(&WorldSize::default(), &params).is_err());

        let mut params = GenerationParams::default();
        params.terrain.offset = -0.1;
        assert!(validate(&WorldSize::default(), &params).is_err());
    }

    #[test]
    fn test_numeric_text_seed_matches_number() {
        assert_eq!(Seed::from("42").to_u64(), Seed::from(42).to_u64());
        assert_eq!(Seed::from(" 7 ").to_u64(), 7);
    }

    #[test]
    fn test_text_seed_is_stable() {
        let a = Seed::from("hello world").to_u64();
        let b = Seed::from("hello world").to_u64();
        assert_eq!(a, b);
        assert_ne!(a, Seed::from("hello worlds").to_u64());
    }

    #[test]
    fn test_text_seed_hash_is_pinned() {
        // Saved configs must keep building the same world
        assert_eq!(Seed::from("hello").to_u64(), 0xa430d84680aabd0b);
        assert_eq!(Seed::from("").to_u64(), 0xcbf29ce484222325);
    }

    #[test]
    fn test_seed_deserializes_from_number_or_text() {
        let number: Seed = serde_json::from_str("12").unwrap();
        let text: Seed = serde_json::from_str("\"minecraft\"").unwrap();
        assert_eq!(number, Seed::Number(12));
        assert_eq!(text, Seed::Text("minecraft".to_string()));
    }

    #[test]
    fn test_config_file_round_trip() {
        let config = WorldConfig {
            size: WorldSize {
                width: 16,
                height: 12,
            },
            params: GenerationParams {
                seed: Seed::from("caves"),
                terrain: TerrainParams {
                    scale: 42.5,
                    magnitude: 0.3,
                    offset: 0.6,
                },
            },
        };
        let path = env::temp_dir().join(format!("voxel-sim-config-{}.json", std::process::id()));
        config.save(&path).unwrap();
        let loaded = WorldConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let path = env::temp_dir().join("voxel-sim-does-not-exist.json");
        let res = WorldConfig::load(&path);
        assert!(matches!(res, Err(WorldError::Io(_))));
    }
}
