use crate::biome;
use crate::config::{BiomeThresholds, PlanetGenConfig};
use crate::mesh_data::{Mesh, Overlay};
use crate::plate::Plate;
use crate::tile::Tile;
use crate::water;

/// Ranges recorded while the passes run, used to scale overlays and UI sliders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanetStats {
    pub min_height: f32,
    pub max_height: f32,
    pub min_year_temperature: f32,
    pub max_year_temperature: f32,
}

/// A fully generated planet: render mesh, tile graph and the plates over it.
///
/// Tile `i` is drawn by vertices `3 * i .. 3 * i + 3` of the mesh.
#[derive(Debug, Clone)]
pub struct Planet {
    pub mesh: Mesh,
    pub tiles: Vec<Tile>,
    pub plates: Vec<Plate>,
    pub stats: PlanetStats,
    /// Parameters the planet was generated with.
    pub config: PlanetGenConfig,
    /// Overlay the mesh scalars currently show.
    pub overlay: Overlay,
}

impl Planet {
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Re-runs water placement and both classifiers with new thresholds.
    ///
    /// Geometry, plates and the climate fields are kept; only kinds, water
    /// distances and the vertex palette change.
    pub fn reclassify(&mut self, thresholds: BiomeThresholds) {
        let terrain = &self.config.terrain;
        water::find_water(
            &mut self.tiles,
            terrain.water_level,
            terrain.peak_level,
            self.config.climate.axial_tilt,
        );
        biome::categorize_tiles(&mut self.tiles);
        biome::final_categorize_tiles(&mut self.tiles, &thresholds);

        self.config.biomes = thresholds;
        self.refresh_mesh(self.overlay);
    }

    /// Tiles visited walking from `tile` toward the nearest water, ending on the water
    /// tile. Empty when no water is reachable; `[tile]` when it is water itself.
    pub fn path_to_water(&self, tile: usize) -> Vec<usize> {
        if self.tiles[tile].distance_to_water.is_none() {
            return Vec::new();
        }

        let mut path = vec![tile];
        let mut current = tile;
        while let Some(next) = self.tiles[current].next_tile_to_water {
            path.push(next);
            current = next;
        }
        path
    }

    pub fn refresh_mesh(&mut self, overlay: Overlay) {
        self.overlay = overlay;
        self.mesh.refresh(&self.tiles, overlay, self.plates.len());
    }
}
