//! # World Module
//!
//! This module provides the `World` struct which owns every chunk and drives
//! their lifecycle: creation, population, meshing and presentation.
//!
//! ## Architecture
//!
//! Chunks live in a hash map keyed by [`ChunkCoord::key`]. Chunks never hold a
//! reference back to the world; every operation that needs neighbors is a world
//! method taking the chunk's coordinate, so the world can lend its chunks
//! immutably to the mesher and then update the one being meshed.
//!
//! ## Bulk Generation
//!
//! Building the spawn region and rebuilding after a settings change follow the
//! same three passes over the coordinates in sorted order:
//!
//! 1. create (or lock) every chunk of the region,
//! 2. populate every chunk, which cannot mesh anything still locked,
//! 3. unlock and mesh each chunk once.
//!
//! All population passes share the world's seeded RNG, so a fixed seed, fixed
//! settings and a fixed region always produce the same blocks.

use std::collections::HashMap;

use cgmath::Vector3;
use log::{debug, info};
use web_time::Instant;

use crate::config::{
    clamp_spawn_radius, clamp_view_distance, GenerationSettings, WorldConfig,
};
use crate::error::{ConfigError, VoxelError};
use crate::rendering::{
    meshing::{build_chunk_mesh, ChunkNeighbors},
    palette::Palette,
    presentation::{ChunkPresentation, NullRenderTarget, RenderTarget},
};

use super::block::Block;
use super::chunk::{
    population::BlockPopulator, Chunk, ChunkCoord, ChunkState, LocalPos, CHUNK_AXIS_LENGTH,
};

/// Result of a remesh request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemeshOutcome {
    /// A new mesh was built and presented.
    Meshed,
    /// The chunk is locked; nothing happened.
    Locked,
}

/// A chunked voxel world.
pub struct World {
    config: WorldConfig,
    palette: Palette,
    chunks: HashMap<u64, Chunk>,
    populator: BlockPopulator,
    render_target: Box<dyn RenderTarget>,
}

impl Default for World {
    fn default() -> Self {
        World::new(WorldConfig::default())
    }
}

impl World {
    /// Creates an empty, headless world with the stock palette.
    ///
    /// No chunks exist until [`World::build_spawn`] or
    /// [`World::generate_chunk`] is called.
    pub fn new(config: WorldConfig) -> Self {
        World::with_render_target(config, Palette::default(), Box::new(NullRenderTarget))
    }

    /// Creates an empty world that presents its meshes to `render_target`.
    ///
    /// # Arguments
    /// * `config` - Seed, region sizes, generation settings and atlas layout
    /// * `palette` - Materials used to shade each batch
    /// * `render_target` - Receiver of every freshly built chunk mesh
    pub fn with_render_target(
        config: WorldConfig,
        palette: Palette,
        render_target: Box<dyn RenderTarget>,
    ) -> Self {
        let config = WorldConfig {
            spawn_radius: clamp_spawn_radius(config.spawn_radius),
            view_distance: clamp_view_distance(config.view_distance),
            atlas: config.atlas.clamped(),
            ..config
        };
        let populator = BlockPopulator::new(config.seed, config.generation.clone());
        World {
            config,
            palette,
            chunks: HashMap::new(),
            populator,
            render_target,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// The seed of the generation RNG.
    pub fn seed(&self) -> i64 {
        self.config.seed
    }

    /// Half-width of the spawn region, in chunks.
    pub fn spawn_radius(&self) -> i32 {
        self.config.spawn_radius
    }

    /// View distance, in chunks.
    pub fn view_distance(&self) -> i32 {
        self.config.view_distance
    }

    /// Settings used by block population.
    pub fn generation_settings(&self) -> &GenerationSettings {
        &self.config.generation
    }

    /// The material palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Changes the seed and rebuilds the world.
    pub fn set_seed(&mut self, seed: i64) -> Result<(), VoxelError> {
        self.config.seed = seed;
        self.rebuild()
    }

    /// Changes the spawn radius, clamped to its permitted range, and rebuilds.
    pub fn set_spawn_radius(&mut self, radius: i32) -> Result<(), VoxelError> {
        self.config.spawn_radius = clamp_spawn_radius(radius);
        self.rebuild()
    }

    /// Changes the view distance, clamped to its permitted range, and rebuilds.
    pub fn set_view_distance(&mut self, distance: i32) -> Result<(), VoxelError> {
        self.config.view_distance = clamp_view_distance(distance);
        self.rebuild()
    }

    /// Replaces the generation settings and rebuilds.
    pub fn set_generation_settings(
        &mut self,
        settings: GenerationSettings,
    ) -> Result<(), VoxelError> {
        self.config.generation = settings;
        self.rebuild()
    }

    /// Replaces the whole configuration after validating it, then rebuilds.
    ///
    /// # Errors
    /// [`ConfigError::OutOfRange`] if a field is outside its permitted range;
    /// the world is left untouched in that case. [`ConfigError::Rebuild`] if
    /// the accepted config could not be rebuilt.
    pub fn set_config(&mut self, config: WorldConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.rebuild()?;
        Ok(())
    }

    /// Replaces the palette and presents every meshed chunk again.
    ///
    /// Blocks are not regenerated.
    pub fn set_palette(&mut self, palette: Palette) -> Result<(), VoxelError> {
        self.palette = palette;
        self.remesh_all()
    }

    /// Number of registered chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Coordinates of every registered chunk, sorted.
    pub fn coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> =
            self.chunks.keys().map(|key| ChunkCoord::from_key(*key)).collect();
        coords.sort();
        coords
    }

    /// The chunk registered at `coord`, if any.
    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord.key())
    }

    /// World-space position of a chunk's origin corner.
    pub fn placement(&self, coord: ChunkCoord) -> Vector3<f32> {
        coord.placement()
    }

    /// The populated chunks adjacent to `coord`.
    ///
    /// Chunks that exist but have not been populated are reported as absent so
    /// the mesher never reads placeholder air.
    pub fn neighbors(&self, coord: ChunkCoord) -> ChunkNeighbors<'_> {
        let [pos_x, neg_x, pos_z, neg_z] = coord
            .neighbors()
            .map(|n| self.chunk(n).filter(|chunk| chunk.is_populated()));
        ChunkNeighbors {
            pos_x,
            neg_x,
            pos_z,
            neg_z,
        }
    }

    /// Coordinates of the spawn region: `-r..r` on both axes.
    pub fn spawn_region(&self) -> Vec<ChunkCoord> {
        let r = self.config.spawn_radius;
        let mut coords = Vec::with_capacity((2 * r * 2 * r) as usize);
        for x in -r..r {
            for z in -r..r {
                coords.push(ChunkCoord::new(x, z));
            }
        }
        coords
    }

    /// Generates and meshes every chunk of the spawn region that does not exist yet.
    pub fn build_spawn(&mut self) -> Result<(), VoxelError> {
        let start = Instant::now();
        let missing: Vec<ChunkCoord> = self
            .spawn_region()
            .into_iter()
            .filter(|coord| !self.chunks.contains_key(&coord.key()))
            .collect();
        self.generate_region(&missing)?;
        info!(
            "Built spawn region of radius {}: {} new chunks in {:?}",
            self.config.spawn_radius,
            missing.len(),
            start.elapsed()
        );
        Ok(())
    }

    /// Reseeds the generator and regenerates every chunk.
    ///
    /// The spawn region is created first if any of it is missing. Every chunk
    /// is repopulated in sorted order and then meshed once.
    pub fn rebuild(&mut self) -> Result<(), VoxelError> {
        let start = Instant::now();
        self.populator.reseed(self.config.seed);
        self.populator.set_settings(self.config.generation.clone());

        let mut region = self.coords();
        region.extend(
            self.spawn_region()
                .into_iter()
                .filter(|coord| !self.chunks.contains_key(&coord.key())),
        );
        region.sort();
        self.generate_region(&region)?;

        info!(
            "Rebuilt {} chunks with seed {} in {:?}",
            region.len(),
            self.config.seed,
            start.elapsed()
        );
        Ok(())
    }

    fn generate_region(&mut self, region: &[ChunkCoord]) -> Result<(), VoxelError> {
        let mut sorted = region.to_vec();
        sorted.sort();

        for coord in &sorted {
            match self.chunks.get_mut(&coord.key()) {
                Some(chunk) => chunk.lock(),
                None => {
                    self.create_chunk(*coord)?;
                }
            }
        }
        for coord in &sorted {
            self.populate_chunk(*coord)?;
        }
        for coord in &sorted {
            self.unlock(*coord)?;
            self.remesh(*coord)?;
        }
        Ok(())
    }

    /// Registers a new, empty and locked chunk at `coord`.
    ///
    /// # Errors
    /// [`VoxelError::ChunkExists`] if a chunk is already registered there.
    pub fn create_chunk(&mut self, coord: ChunkCoord) -> Result<&Chunk, VoxelError> {
        let key = coord.key();
        if self.chunks.contains_key(&key) {
            return Err(VoxelError::ChunkExists(coord));
        }
        debug!("Creating chunk at {}", coord);
        Ok(self.chunks.entry(key).or_insert_with(|| Chunk::new(coord)))
    }

    /// Creates, populates and meshes a single chunk, then remeshes its neighbors.
    pub fn generate_chunk(&mut self, coord: ChunkCoord) -> Result<RemeshOutcome, VoxelError> {
        self.create_chunk(coord)?;
        self.populate_chunk(coord)?;
        self.unlock(coord)?;
        self.remesh(coord)
    }

    /// Regenerates the blocks of the chunk at `coord`.
    ///
    /// The chunk is remeshed unless it is locked, and its populated neighbors
    /// are remeshed so their border faces match the new contents.
    pub fn populate_chunk(&mut self, coord: ChunkCoord) -> Result<(), VoxelError> {
        let chunk = self
            .chunks
            .get_mut(&coord.key())
            .ok_or(VoxelError::MissingChunk(coord))?;
        self.populator.populate(chunk);
        if !chunk.is_locked() {
            self.remesh(coord)?;
        }
        self.remesh_neighbors(coord)
    }

    /// Allows the chunk at `coord` to be meshed.
    pub fn unlock(&mut self, coord: ChunkCoord) -> Result<(), VoxelError> {
        self.chunks
            .get_mut(&coord.key())
            .ok_or(VoxelError::MissingChunk(coord))?
            .unlock();
        Ok(())
    }

    /// Rebuilds the mesh of the chunk at `coord` and presents it.
    ///
    /// # Returns
    /// [`RemeshOutcome::Locked`] without doing anything if the chunk is locked.
    ///
    /// # Errors
    /// * [`VoxelError::MissingChunk`] if no chunk is registered at `coord`
    /// * [`VoxelError::NotPopulated`] if the chunk has never been populated
    pub fn remesh(&mut self, coord: ChunkCoord) -> Result<RemeshOutcome, VoxelError> {
        let key = coord.key();
        let chunk = self.chunk(coord).ok_or(VoxelError::MissingChunk(coord))?;
        if chunk.is_locked() {
            return Ok(RemeshOutcome::Locked);
        }
        if chunk.state() == ChunkState::Empty {
            return Err(VoxelError::NotPopulated(coord));
        }

        let mesh = build_chunk_mesh(chunk, &self.neighbors(coord), &self.config.atlas);
        if let Some(chunk) = self.chunks.get_mut(&key) {
            chunk.install_mesh(mesh);
        }

        if let Some(chunk) = self.chunks.get(&key) {
            let presentation = ChunkPresentation::new(coord, chunk.mesh(), &self.palette);
            self.render_target.present(&presentation);
        }
        Ok(RemeshOutcome::Meshed)
    }

    /// Remeshes every populated chunk adjacent to `coord`.
    pub fn remesh_neighbors(&mut self, coord: ChunkCoord) -> Result<(), VoxelError> {
        for neighbor in coord.neighbors() {
            if self.chunk(neighbor).is_some_and(Chunk::is_populated) {
                self.remesh(neighbor)?;
            }
        }
        Ok(())
    }

    /// Remeshes every populated chunk in sorted order.
    pub fn remesh_all(&mut self) -> Result<(), VoxelError> {
        for coord in self.coords() {
            if self.chunk(coord).is_some_and(Chunk::is_populated) {
                self.remesh(coord)?;
            }
        }
        Ok(())
    }

    /// Gets a block by chunk coordinate and chunk-local position.
    pub fn block_at(
        &self,
        coord: ChunkCoord,
        x: usize,
        y: usize,
        z: usize,
    ) -> Result<&Block, VoxelError> {
        self.chunk(coord)
            .ok_or(VoxelError::MissingChunk(coord))?
            .block_at(x, y, z)
    }

    /// Replaces one block and remeshes whatever can see it.
    ///
    /// The chunk itself is remeshed if it is populated. When the block lies on a
    /// horizontal border, the populated chunk across that border is remeshed
    /// too, since its border faces may have been hidden or exposed.
    pub fn set_block(
        &mut self,
        coord: ChunkCoord,
        x: usize,
        y: usize,
        z: usize,
        block: Block,
    ) -> Result<(), VoxelError> {
        let chunk = self
            .chunks
            .get_mut(&coord.key())
            .ok_or(VoxelError::MissingChunk(coord))?;
        chunk.set_block(x, y, z, block)?;
        if !chunk.is_populated() {
            return Ok(());
        }
        self.remesh(coord)?;

        let pos = LocalPos::new(x, y, z)?;
        if !pos.is_on_horizontal_border() {
            return Ok(());
        }
        let last = CHUNK_AXIS_LENGTH - 1;
        let mut across = Vec::with_capacity(2);
        if pos.x == 0 {
            across.push(coord.offset(-1, 0));
        }
        if pos.x == last {
            across.push(coord.offset(1, 0));
        }
        if pos.z == 0 {
            across.push(coord.offset(0, -1));
        }
        if pos.z == last {
            across.push(coord.offset(0, 1));
        }
        for neighbor in across {
            if self.chunk(neighbor).is_some_and(Chunk::is_populated) {
                self.remesh(neighbor)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationMethod;
    use crate::voxels::block::material_type::MaterialType;

    fn solid_world() -> World {
        World::new(WorldConfig {
            spawn_radius: 1,
            generation: GenerationSettings {
                method: GenerationMethod::Solid,
                ..GenerationSettings::default()
            },
            ..WorldConfig::default()
        })
    }

    #[test]
    fn duplicate_chunk_is_rejected() {
        let mut world = solid_world();
        let coord = ChunkCoord::new(4, -4);
        world.create_chunk(coord).unwrap();
        assert_eq!(
            world.create_chunk(coord).err(),
            Some(VoxelError::ChunkExists(coord))
        );
    }

    #[test]
    fn remesh_errors_and_lock() {
        let mut world = solid_world();
        let coord = ChunkCoord::new(0, 0);
        assert_eq!(world.remesh(coord), Err(VoxelError::MissingChunk(coord)));

        world.create_chunk(coord).unwrap();
        assert_eq!(world.remesh(coord), Ok(RemeshOutcome::Locked));

        world.unlock(coord).unwrap();
        assert_eq!(world.remesh(coord), Err(VoxelError::NotPopulated(coord)));
    }

    #[test]
    fn generate_chunk_meshes_it() {
        let mut world = solid_world();
        let coord = ChunkCoord::new(2, 3);
        assert_eq!(world.generate_chunk(coord), Ok(RemeshOutcome::Meshed));
        let chunk = world.chunk(coord).unwrap();
        assert_eq!(chunk.state(), ChunkState::Meshed);
        assert!(!chunk.is_locked());
        // A lone solid chunk only shows its outer shell.
        let l = CHUNK_AXIS_LENGTH;
        let h = crate::voxels::chunk::CHUNK_HEIGHT;
        assert_eq!(chunk.mesh().face_count(), 2 * l * l + 4 * l * h);
    }

    #[test]
    fn empty_neighbors_are_hidden() {
        let mut world = solid_world();
        world.generate_chunk(ChunkCoord::new(0, 0)).unwrap();
        world.create_chunk(ChunkCoord::new(1, 0)).unwrap();
        let neighbors = world.neighbors(ChunkCoord::new(0, 0));
        assert!(neighbors.pos_x.is_none());
        assert_eq!(neighbors.count(), 0);
    }

    #[test]
    fn spawn_region_is_two_r_square() {
        let mut world = solid_world();
        world.build_spawn().unwrap();
        assert_eq!(
            world.coords(),
            vec![
                ChunkCoord::new(-1, -1),
                ChunkCoord::new(-1, 0),
                ChunkCoord::new(0, -1),
                ChunkCoord::new(0, 0),
            ]
        );
        for coord in world.coords() {
            assert_eq!(world.chunk(coord).unwrap().state(), ChunkState::Meshed);
        }
    }

    #[test]
    fn setters_clamp() {
        let mut world = solid_world();
        world.set_spawn_radius(0).unwrap();
        assert_eq!(world.spawn_radius(), 1);
        world.set_view_distance(1000).unwrap();
        assert_eq!(world.view_distance(), crate::config::SIMULATION_DISTANCE_MAX);
    }

    #[test]
    fn set_block_on_unpopulated_chunk_does_not_mesh() {
        let mut world = solid_world();
        let coord = ChunkCoord::new(0, 0);
        world.create_chunk(coord).unwrap();
        world
            .set_block(coord, 1, 1, 1, Block::new(MaterialType::METAL, 3))
            .unwrap();
        assert_eq!(world.chunk(coord).unwrap().state(), ChunkState::Empty);
    }

    #[test]
    fn invalid_config_leaves_world_untouched() {
        let mut world = solid_world();
        let bad = WorldConfig {
            spawn_radius: 40,
            ..WorldConfig::default()
        };
        assert!(world.set_config(bad).is_err());
        assert_eq!(world.spawn_radius(), 1);
        assert_eq!(world.chunk_count(), 0);
    }

    #[test]
    fn accepted_config_rebuilds_the_world() {
        let mut world = solid_world();
        world.build_spawn().unwrap();
        let config = WorldConfig {
            spawn_radius: 2,
            generation: GenerationSettings {
                method: GenerationMethod::Empty,
                ..GenerationSettings::default()
            },
            ..WorldConfig::default()
        };
        world.set_config(config).unwrap();
        assert_eq!(world.chunk_count(), 16);
        for coord in world.coords() {
            let chunk = world.chunk(coord).unwrap();
            assert_eq!(chunk.state(), ChunkState::Meshed);
            assert_eq!(chunk.solid_blocks().count(), 0);
        }
    }

    #[test]
    fn zero_sized_atlas_is_clamped() {
        let mut world = World::new(WorldConfig {
            spawn_radius: 1,
            generation: GenerationSettings {
                method: GenerationMethod::Solid,
                ..GenerationSettings::default()
            },
            atlas: crate::rendering::atlas::TextureAtlas {
                tiles_per_row: 0,
                tiles_per_column: 0,
                ..Default::default()
            },
            ..WorldConfig::default()
        });
        assert_eq!(world.config().atlas.tiles_per_row, 1);
        assert_eq!(world.config().atlas.tiles_per_column, 1);
        world.build_spawn().unwrap();
        assert!(world.chunk(ChunkCoord::new(0, 0)).unwrap().mesh().is_visible());
    }
}
