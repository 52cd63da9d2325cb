use crate::config::PlanetGenConfig;
use crate::icosphere::Icosphere;
use crate::mesh_data::{Mesh, Overlay};
use crate::noise_field::{NoiseOracle, PerlinNoise};
use crate::pipeline::{PassContext, Pipeline};
use crate::planet::Planet;
use crate::tile::Tile;
use crate::tools::Xorshift128Plus;
use log::info;
use rand::SeedableRng;
use std::time::Instant;

/// Builds planets from one parameter set.
///
/// A run is fully determined by the configuration (its seed included) and the noise
/// oracle; generating twice gives identical planets.
pub struct PlanetGenerator<N: NoiseOracle = PerlinNoise> {
    config: PlanetGenConfig,
    noise: N,
    pipeline: Pipeline,
}

impl PlanetGenerator {
    /// Generator with Perlin noise seeded from `config.seed`.
    pub fn new(config: &PlanetGenConfig) -> Self {
        Self::with_noise(config.clone(), PerlinNoise::new(config.seed as u32))
    }
}

impl<N: NoiseOracle> PlanetGenerator<N> {
    pub fn with_noise(config: PlanetGenConfig, noise: N) -> Self {
        Self {
            config: config.sanitized(),
            noise,
            pipeline: Pipeline::standard(),
        }
    }

    /// Replaces the standard pass sequence, e.g. to stop after a given pass.
    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn config(&self) -> &PlanetGenConfig {
        &self.config
    }

    /// Builds the icosphere and tile graph, then runs every pass over it.
    pub fn generate(&self) -> Planet {
        let start = Instant::now();
        let config = &self.config;

        let mut rng = Xorshift128Plus::seed_from_u64(config.seed);
        let sphere = Icosphere::build(config.mesh.order, &mut rng);
        let mut mesh = Mesh::from_icosphere(&sphere);

        let tiles: Vec<Tile> = sphere
            .link_neighbors()
            .into_iter()
            .enumerate()
            .map(|(t, neighbors)| Tile {
                center: mesh.tile_center(t),
                neighbors,
                ..Default::default()
            })
            .collect();
        info!("icosphere of order {} built with {} tiles", config.mesh.order, tiles.len());

        let mut ctx = PassContext::new(tiles, config, &self.noise, &mut rng);
        self.pipeline.run(&mut ctx);
        let PassContext { tiles, plates, stats, .. } = ctx;

        mesh.refresh(&tiles, Overlay::None, plates.len());
        info!(
            "planet generated in {:.2?}: seed {}, {} tiles, {} plates, height {:.2}..{:.2}, temperature {:.1}..{:.1}",
            start.elapsed(),
            config.seed,
            tiles.len(),
            plates.len(),
            stats.min_height,
            stats.max_height,
            stats.min_year_temperature,
            stats.max_year_temperature
        );

        Planet {
            mesh,
            tiles,
            plates,
            stats,
            config: config.clone(),
            overlay: Overlay::None,
        }
    }
}
