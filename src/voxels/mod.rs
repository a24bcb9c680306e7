//! # Voxel World
//!
//! The data model of the terrain and the operations that keep it consistent.
//!
//! ## Architecture
//!
//! * **Block**: a plain value describing one voxel
//! * **Chunk**: a dense 16x512x16 column of blocks plus its lifecycle state
//! * **World**: the chunk registry, which drives population and meshing
//!
//! ## Data Flow
//!
//! 1. World creates a chunk at a grid coordinate (all air, locked)
//! 2. World populates it from the shared seeded generator
//! 3. World meshes it against its populated neighbors
//! 4. The mesh is handed to the render target

pub mod block;
pub mod chunk;
pub mod world;
