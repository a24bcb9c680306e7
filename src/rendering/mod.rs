//! Rendering-side data for chunk meshes.
//!
//! This module contains everything between block data and a renderer: the
//! texture atlas layout, the material palette, the mesher and the presentation
//! hand-off. Nothing here talks to a GPU directly.

pub mod atlas;
pub mod meshing;
pub mod palette;
pub mod presentation;
pub mod vertex;

// Re-export commonly used types
pub use atlas::TextureAtlas;
pub use palette::{MaterialDescriptor, Palette};
pub use presentation::{ChunkPresentation, NullRenderTarget, RenderTarget, Surface};
pub use vertex::Vertex;
