#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! A chunked voxel world with procedural block population and a neighbor-aware
//! face-culling mesher that batches surfaces by material.
//!
//! This crate owns the world data and produces renderable geometry; the host
//! application owns the scene and GPU resources and receives meshes through a
//! [`RenderTarget`].
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, chunks, population and the chunk registry (`World`)
//! * `rendering` - Texture atlas addressing, palette, mesher and presentation
//! * `config` - World configuration, loadable from JSON
//! * `error` - Error types returned by world and config operations
//!
//! ## Usage
//!
//! ```no_run
//! use voxel_terrain::{World, WorldConfig};
//!
//! voxel_terrain::init_logging();
//! let mut world = World::new(WorldConfig::default());
//! world.build_spawn().unwrap();
//! println!("{} chunks", world.chunk_count());
//! ```
//!
//! ## Performance Considerations
//!
//! * Blocks are stored densely in one buffer per chunk and rewritten in place
//! * Culling resolves opacity into a padded bit mask before emitting faces
//! * Bulk generation meshes each chunk once, after all of its neighbors exist

use log::info;

pub mod config;
pub mod error;
pub mod rendering;
pub mod voxels;

// Re-export commonly used types
pub use config::{GenerationMethod, GenerationSettings, WorldConfig};
pub use error::{ConfigError, VoxelError};
pub use rendering::{ChunkPresentation, NullRenderTarget, Palette, RenderTarget, TextureAtlas};
pub use voxels::{
    block::{block_side::BlockSide, material_type::MaterialType, Block},
    chunk::{Chunk, ChunkCoord, ChunkState},
    world::{RemeshOutcome, World},
};

/// Installs an `env_logger` logger writing to stdout, filtered by `RUST_LOG`.
///
/// Calling this more than once, or after the host installed its own logger,
/// has no effect.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init()
        .is_ok();
    if installed {
        info!("Logger initialized");
    }
}
