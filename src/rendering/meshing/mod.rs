//! # Meshing
//!
//! Turns a chunk's blocks into renderable surface geometry. The mesher is a pure
//! function of the chunk, its neighbors and the atlas layout; handing the result
//! to a renderer is a separate step (see [`presentation`](crate::rendering::presentation)).

pub mod culling;
pub mod face;
pub mod mesh;

pub use culling::{build_chunk_mesh, ChunkNeighbors};
pub use mesh::{Aabb, ChunkMesh, MeshBatch};
