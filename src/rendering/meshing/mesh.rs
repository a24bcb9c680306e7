//! Mesh data structures for chunk surfaces.
//!
//! A [`ChunkMesh`] is a list of [`MeshBatch`]es, one per material class that has
//! at least one visible face. Each batch is one draw call for the host renderer.

use cgmath::{Point3, Vector2, Vector3};

use crate::rendering::vertex::Vertex;
use crate::voxels::block::material_type::MaterialType;
use crate::voxels::chunk::{CHUNK_AXIS_LENGTH, CHUNK_HEIGHT};

use super::face::Face;

/// Vertices written per face.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices written per face.
pub const INDICES_PER_FACE: usize = 6;
/// Triangle indices of one quad, relative to its first vertex.
pub const FACE_INDICES: [u32; INDICES_PER_FACE] = [0, 2, 1, 0, 3, 2];

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner
    pub min: Point3<f32>,
    /// Maximum corner
    pub max: Point3<f32>,
}

impl Aabb {
    /// The full extent of a chunk in chunk-local space.
    pub fn chunk_extent() -> Self {
        Aabb {
            min: Point3::new(0.0, 0.0, 0.0),
            max: Point3::new(
                CHUNK_AXIS_LENGTH as f32,
                CHUNK_HEIGHT as f32,
                CHUNK_AXIS_LENGTH as f32,
            ),
        }
    }

    fn from_point(p: Vector3<f32>) -> Self {
        Aabb {
            min: Point3::new(p.x, p.y, p.z),
            max: Point3::new(p.x, p.y, p.z),
        }
    }

    fn include(&mut self, p: Vector3<f32>) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// The smallest box containing both boxes.
    pub fn union(self, other: Aabb) -> Aabb {
        let mut merged = self;
        merged.include(Vector3::new(other.min.x, other.min.y, other.min.z));
        merged.include(Vector3::new(other.max.x, other.max.y, other.max.z));
        merged
    }
}

/// All faces of one material class within a chunk.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshBatch {
    /// Material class shared by every face in the batch
    pub material: MaterialType,
    /// Vertex positions in chunk-local space
    pub vertices: Vec<Vector3<f32>>,
    /// One normal per vertex
    pub normals: Vec<Vector3<f32>>,
    /// One atlas UV per vertex
    pub uvs: Vec<Vector2<f32>>,
    /// Triangle list into `vertices`
    pub indices: Vec<u32>,
}

impl MeshBatch {
    /// Creates an empty batch for a material class.
    pub fn new(material: MaterialType) -> Self {
        MeshBatch {
            material,
            vertices: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends one quad with per-corner UVs.
    pub fn push_face(&mut self, face: &Face, uvs: [Vector2<f32>; 4]) {
        let base_index = self.vertices.len() as u32;
        let normal = face.block_side.normal();

        self.vertices.extend_from_slice(&face.corners);
        self.normals.extend_from_slice(&[normal; VERTICES_PER_FACE]);
        self.uvs.extend_from_slice(&uvs);
        self.indices
            .extend(FACE_INDICES.iter().map(|index| base_index + index));
    }

    /// Label of the batch, used as the surface name.
    pub fn name(&self) -> &'static str {
        self.material.name()
    }

    /// Whether the batch holds no faces.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Number of quads in the batch.
    pub fn face_count(&self) -> usize {
        self.indices.len() / INDICES_PER_FACE
    }

    /// Bounds of the batch's vertices, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb> {
        let (first, rest) = self.vertices.split_first()?;
        let mut bounds = Aabb::from_point(*first);
        for vertex in rest {
            bounds.include(*vertex);
        }
        Some(bounds)
    }

    /// Positions, normals and UVs interleaved for upload.
    pub fn interleaved(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((position, normal), uv)| Vertex::new(*position, *normal, *uv))
            .collect()
    }

    /// The interleaved vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.interleaved()).to_vec()
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// The surface geometry of a chunk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    batches: Vec<MeshBatch>,
}

impl ChunkMesh {
    /// Creates a mesh from batches already in draw order.
    pub fn new(batches: Vec<MeshBatch>) -> Self {
        ChunkMesh { batches }
    }

    /// Batches in draw order.
    pub fn batches(&self) -> &[MeshBatch] {
        &self.batches
    }

    /// The batch for a material class, if the mesh has one.
    pub fn batch(&self, material: MaterialType) -> Option<&MeshBatch> {
        self.batches.iter().find(|batch| batch.material == material)
    }

    /// Whether the mesh should be shown at all.
    pub fn is_visible(&self) -> bool {
        !self.batches.is_empty()
    }

    /// Total number of quads over all batches.
    pub fn face_count(&self) -> usize {
        self.batches.iter().map(MeshBatch::face_count).sum()
    }

    /// Total number of vertices over all batches.
    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.vertices.len()).sum()
    }

    /// Total number of indices over all batches.
    pub fn index_count(&self) -> usize {
        self.batches.iter().map(|batch| batch.indices.len()).sum()
    }

    /// Combined bounds of every batch, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        self.batches
            .iter()
            .filter_map(MeshBatch::bounds)
            .reduce(Aabb::union)
    }
}
