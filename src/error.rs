//! # Error Types
//!
//! Failures that indicate a sequencing bug in the caller (touching a chunk that
//! does not exist, meshing one that was never populated, reading outside a
//! chunk) are reported through [`VoxelError`]. Configuration loading has its own
//! [`ConfigError`].
//!
//! Recoverable data defects, such as an unrecognized material value on a block,
//! never surface here: they are logged and coerced where they are found.

use thiserror::Error;

use crate::voxels::chunk::ChunkCoord;

/// Errors raised by chunk and world operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoxelError {
    /// A local block coordinate fell outside the chunk bounds.
    #[error("local coordinate ({x}, {y}, {z}) is outside the chunk bounds")]
    OutOfRange {
        /// Requested x
        x: usize,
        /// Requested y
        y: usize,
        /// Requested z
        z: usize,
    },

    /// No chunk is registered at the coordinate.
    #[error("no chunk is registered at {0}")]
    MissingChunk(ChunkCoord),

    /// A chunk is already registered at the coordinate.
    #[error("a chunk is already registered at {0}")]
    ChunkExists(ChunkCoord),

    /// The chunk has never been populated and cannot be meshed.
    #[error("chunk {0} has not been populated yet")]
    NotPopulated(ChunkCoord),
}

/// Errors raised while loading or validating a [`WorldConfig`](crate::config::WorldConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read world config: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration text is not valid JSON for the schema.
    #[error("failed to parse world config: {0}")]
    Json(#[from] serde_json::Error),

    /// A field holds a value outside its permitted range.
    #[error("`{field}` must be within {min}..={max}, got {value}")]
    OutOfRange {
        /// Name of the offending field
        field: &'static str,
        /// Value found in the config
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// The config was accepted but rebuilding the world with it failed.
    #[error("rebuild after config change failed: {0}")]
    Rebuild(#[from] VoxelError),
}
