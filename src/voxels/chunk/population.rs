//! # Block Population
//!
//! Fills a chunk's block buffer procedurally. All chunks of a world draw from a
//! single seeded RNG, so a fixed seed, fixed settings and a fixed chunk order
//! always reproduce the same world.
//!
//! The default `Scatter` method samples every voxel independently: a voxel is
//! solid with probability `1 / K`, where `K` is the below- or above-sea-level
//! divisor. Solid voxels get a random material in `1..MaterialType::COUNT`
//! (index 0 is reserved) and reuse that index as their texture tile.
//!
//! The `Perlin` method keeps the same expected density but lets a noise field
//! bend it: the draw succeeds with probability `(1 + n) / K` for the noise value
//! `n` in `[-1, 1]` at the voxel, which clusters solids where `n` is high.

use noise::{NoiseFn, Perlin};

use crate::config::{GenerationMethod, GenerationSettings};
use crate::voxels::block::{material_type::MaterialType, Block, MaterialTypeSize, TextureId};

use super::{Chunk, LocalPos, CHUNK_AXIS_LENGTH, CHUNK_HEIGHT};

/// Texture used for `GenerationMethod::Solid` fills.
const SOLID_FILL_TEXTURE: TextureId = 1;

/// Folds a 64-bit world seed into the 32-bit seed the noise field takes.
fn noise_seed(seed: i64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Generates chunk contents from a seed and generation settings.
pub struct BlockPopulator {
    rng: fastrand::Rng,
    perlin: Perlin,
    settings: GenerationSettings,
}

impl BlockPopulator {
    /// Creates a populator whose RNG and noise field are derived from `seed`.
    pub fn new(seed: i64, settings: GenerationSettings) -> Self {
        BlockPopulator {
            rng: fastrand::Rng::with_seed(seed as u64),
            perlin: Perlin::new(noise_seed(seed)),
            settings,
        }
    }

    /// Restarts the RNG and noise field from `seed`.
    pub fn reseed(&mut self, seed: i64) {
        self.rng = fastrand::Rng::with_seed(seed as u64);
        self.perlin = Perlin::new(noise_seed(seed));
    }

    /// The settings in use.
    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    /// Replaces the settings used by later population passes.
    pub fn set_settings(&mut self, settings: GenerationSettings) {
        self.settings = settings;
    }

    /// Overwrites every block of `chunk` in place and marks it populated.
    pub fn populate(&mut self, chunk: &mut Chunk) {
        match self.settings.method {
            GenerationMethod::Scatter => self.scatter(chunk),
            GenerationMethod::Perlin => self.perlin(chunk),
            GenerationMethod::Solid => chunk
                .blocks_mut()
                .fill(Block::new(MaterialType::GENERIC, SOLID_FILL_TEXTURE)),
            GenerationMethod::Empty => chunk.blocks_mut().fill(Block::AIR),
        }
        chunk.mark_populated();
    }

    fn scatter(&mut self, chunk: &mut Chunk) {
        let blocks = chunk.blocks_mut();
        for y in 0..CHUNK_HEIGHT {
            let divisor = self.settings.divisor_at(y);
            for z in 0..CHUNK_AXIS_LENGTH {
                for x in 0..CHUNK_AXIS_LENGTH {
                    let solid = self.rng.u32(1..=divisor) == 1;
                    let block = if solid {
                        self.random_solid_block()
                    } else {
                        Block::AIR
                    };
                    blocks[LocalPos { x, y, z }.index()] = block;
                }
            }
        }
    }

    fn perlin(&mut self, chunk: &mut Chunk) {
        let origin = chunk.coord().placement();
        let scale = self.settings.perlin_scale;
        for y in 0..CHUNK_HEIGHT {
            let divisor = self.settings.divisor_at(y);
            let density = 1.0 / divisor as f64;
            for z in 0..CHUNK_AXIS_LENGTH {
                for x in 0..CHUNK_AXIS_LENGTH {
                    let sample = self.perlin.get([
                        (origin.x as f64 + x as f64) * scale,
                        y as f64 * scale,
                        (origin.z as f64 + z as f64) * scale,
                    ]);
                    // Noise is symmetric around zero, so the mean rate stays 1/K.
                    let solid = divisor == 1 || self.rng.f64() < density * (1.0 + sample);
                    let block = if solid {
                        self.random_solid_block()
                    } else {
                        Block::AIR
                    };
                    chunk.blocks_mut()[LocalPos { x, y, z }.index()] = block;
                }
            }
        }
    }

    /// A solid block of a random generated material; index 0 is never drawn.
    fn random_solid_block(&mut self) -> Block {
        let index = self.rng.u8(1..MaterialType::COUNT as MaterialTypeSize);
        let material = MaterialType::from_int(index).unwrap_or(MaterialType::GENERIC);
        Block::new(material, index as TextureId)
    }
}
