//! # World Configuration
//!
//! Everything a [`World`](crate::voxels::world::World) reads while generating and
//! meshing: the seed, how far the spawn region and view reach, the generation
//! policy and the texture atlas layout.
//!
//! Configs deserialize from JSON with every field optional; missing fields take
//! the defaults below. Values loaded from text are validated, while the world's
//! setters clamp instead.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rendering::atlas::TextureAtlas;
use crate::voxels::chunk::CHUNK_HEIGHT;

/// Upper bound for the view distance, in chunks.
pub const SIMULATION_DISTANCE_MAX: i32 = 64;
/// Inclusive bounds for the spawn radius, in chunks.
pub const SPAWN_RADIUS_RANGE: (i32, i32) = (1, 25);

/// How chunk contents are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMethod {
    /// Independent per-voxel sampling with a depth-banded density.
    #[default]
    Scatter,
    /// Coherent Perlin noise thresholded by the same depth-banded density.
    Perlin,
    /// Every voxel solid.
    Solid,
    /// Every voxel air.
    Empty,
}

/// Settings consumed by block population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Generation strategy.
    pub method: GenerationMethod,
    /// Blocks with `y` below this level use the below-sea-level density.
    pub sea_level: u32,
    /// One in this many voxels is solid below sea level.
    pub below_sea_level_divisor: u32,
    /// One in this many voxels is solid at or above sea level.
    pub above_sea_level_divisor: u32,
    /// World-to-noise scale for the Perlin method.
    pub perlin_scale: f64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            method: GenerationMethod::Scatter,
            sea_level: 64,
            below_sea_level_divisor: 5,
            above_sea_level_divisor: 100,
            perlin_scale: 0.05,
        }
    }
}

impl GenerationSettings {
    /// The density divisor for a block at height `y`. Never less than 1.
    pub fn divisor_at(&self, y: usize) -> u32 {
        let divisor = if (y as u64) < self.sea_level as u64 {
            self.below_sea_level_divisor
        } else {
            self.above_sea_level_divisor
        };
        divisor.max(1)
    }
}

/// Complete configuration of a world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Seed of the shared generation RNG.
    pub seed: i64,
    /// Half-width of the square spawn region, in chunks.
    pub spawn_radius: i32,
    /// View distance in chunks.
    pub view_distance: i32,
    /// Block population settings.
    pub generation: GenerationSettings,
    /// Texture atlas layout used for UVs.
    pub atlas: TextureAtlas,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 8_675_309,
            spawn_radius: 3,
            view_distance: 6,
            generation: GenerationSettings::default(),
            atlas: TextureAtlas::default(),
        }
    }
}

impl WorldConfig {
    /// Parses and validates a config from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the config as pretty JSON.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every field against its permitted range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "spawn_radius",
            self.spawn_radius as i64,
            SPAWN_RADIUS_RANGE.0 as i64,
            SPAWN_RADIUS_RANGE.1 as i64,
        )?;
        check_range(
            "view_distance",
            self.view_distance as i64,
            1,
            SIMULATION_DISTANCE_MAX as i64,
        )?;
        check_range(
            "generation.sea_level",
            self.generation.sea_level as i64,
            0,
            CHUNK_HEIGHT as i64,
        )?;
        check_range(
            "generation.below_sea_level_divisor",
            self.generation.below_sea_level_divisor as i64,
            1,
            u32::MAX as i64,
        )?;
        check_range(
            "generation.above_sea_level_divisor",
            self.generation.above_sea_level_divisor as i64,
            1,
            u32::MAX as i64,
        )?;
        check_range(
            "atlas.tiles_per_row",
            self.atlas.tiles_per_row as i64,
            1,
            u16::MAX as i64,
        )?;
        check_range(
            "atlas.tiles_per_column",
            self.atlas.tiles_per_column as i64,
            1,
            u16::MAX as i64,
        )?;
        Ok(())
    }
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Clamps a spawn radius into its permitted range.
pub fn clamp_spawn_radius(radius: i32) -> i32 {
    radius.clamp(SPAWN_RADIUS_RANGE.0, SPAWN_RADIUS_RANGE.1)
}

/// Clamps a view distance into its permitted range.
pub fn clamp_view_distance(distance: i32) -> i32 {
    distance.clamp(1, SIMULATION_DISTANCE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        WorldConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "seed": 42, "generation": { "method": "perlin", "sea_level": 100 } }"#,
        )
        .unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.spawn_radius, 3);
        assert_eq!(config.generation.method, GenerationMethod::Perlin);
        assert_eq!(config.generation.sea_level, 100);
        assert_eq!(config.generation.below_sea_level_divisor, 5);
    }

    #[test]
    fn zero_divisor_is_rejected() {
        let err = WorldConfig::from_json_str(
            r#"{ "generation": { "above_sea_level_divisor": 0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange {
                field: "generation.above_sea_level_divisor",
                ..
            }
        ));
    }

    #[test]
    fn spawn_radius_out_of_range_is_rejected() {
        let err = WorldConfig::from_json_str(r#"{ "spawn_radius": 26 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "spawn_radius", value: 26, .. }));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            WorldConfig::from_json_str("{ seed: }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn json_round_trip() {
        let config = WorldConfig {
            seed: -7,
            ..WorldConfig::default()
        };
        let text = config.to_json_string().unwrap();
        assert_eq!(WorldConfig::from_json_str(&text).unwrap(), config);
    }

    #[test]
    fn divisor_switches_at_sea_level() {
        let settings = GenerationSettings::default();
        assert_eq!(settings.divisor_at(63), 5);
        assert_eq!(settings.divisor_at(64), 100);

        let zero = GenerationSettings {
            below_sea_level_divisor: 0,
            ..GenerationSettings::default()
        };
        assert_eq!(zero.divisor_at(0), 1);
    }

    #[test]
    fn setters_clamp() {
        assert_eq!(clamp_spawn_radius(0), 1);
        assert_eq!(clamp_spawn_radius(100), 25);
        assert_eq!(clamp_view_distance(-3), 1);
        assert_eq!(clamp_view_distance(65), 64);
    }
}
