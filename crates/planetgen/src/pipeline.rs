//! Ordered generation passes over the tile graph.
//!
//! Every pass reads fields written by earlier passes and writes its own. The
//! [`Pipeline`] checks that contract up front so a misordered pass list is
//! rejected before any tile is touched.

use crate::config::PlanetGenConfig;
use crate::error::PipelineError;
use crate::noise_field::NoiseOracle;
use crate::planet::PlanetStats;
use crate::plate::Plate;
use crate::tile::Tile;
use crate::tools::Xorshift128Plus;
use crate::{biome, boundaries, elevation, humidity, plate, pressure, temperature, water, wind};
use log::debug;
use std::fmt;
use std::time::Instant;

/// Identifies a generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PassId {
    Height,
    Plates,
    Water,
    CoarseCategorize,
    YearTemperature,
    BasePressure,
    MacroWind,
    OrographicBlocking,
    Humidity,
    FinalClassifier,
}

impl PassId {
    pub fn name(&self) -> &'static str {
        match self {
            PassId::Height => "height",
            PassId::Plates => "plates",
            PassId::Water => "water",
            PassId::CoarseCategorize => "coarse categorize",
            PassId::YearTemperature => "year temperature",
            PassId::BasePressure => "base pressure",
            PassId::MacroWind => "macro wind",
            PassId::OrographicBlocking => "orographic blocking",
            PassId::Humidity => "humidity",
            PassId::FinalClassifier => "final classifier",
        }
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything a pass may read or write during one run.
pub struct PassContext<'a> {
    pub tiles: Vec<Tile>,
    pub plates: Vec<Plate>,
    pub stats: PlanetStats,
    pub config: &'a PlanetGenConfig,
    pub noise: &'a dyn NoiseOracle,
    pub rng: &'a mut Xorshift128Plus,
}

impl<'a> PassContext<'a> {
    pub fn new(
        tiles: Vec<Tile>,
        config: &'a PlanetGenConfig,
        noise: &'a dyn NoiseOracle,
        rng: &'a mut Xorshift128Plus,
    ) -> Self {
        Self {
            tiles,
            plates: Vec::new(),
            stats: PlanetStats::default(),
            config,
            noise,
            rng,
        }
    }
}

/// A single step of planet generation.
pub trait GenerationPass {
    fn id(&self) -> PassId;

    /// Passes that must have run before this one.
    fn dependencies(&self) -> &'static [PassId] {
        &[]
    }

    fn run(&self, ctx: &mut PassContext);
}

pub struct HeightPass;

impl GenerationPass for HeightPass {
    fn id(&self) -> PassId {
        PassId::Height
    }

    fn run(&self, ctx: &mut PassContext) {
        let t = &ctx.config.terrain;
        let (min, max) = elevation::fill_height(&mut ctx.tiles, ctx.noise, t.octaves, t.roughness, t.lacunarity);
        ctx.stats.min_height = min;
        ctx.stats.max_height = max;
    }
}

pub struct PlatesPass;

impl GenerationPass for PlatesPass {
    fn id(&self) -> PassId {
        PassId::Plates
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::Height]
    }

    fn run(&self, ctx: &mut PassContext) {
        let p = &ctx.config.plates;
        ctx.plates = plate::grow_plates(&mut ctx.tiles, p.count, p.speed, &mut *ctx.rng);
        boundaries::apply_plate_boundaries(&mut ctx.tiles, &ctx.plates, p.smoothing_iterations, p.smoothing_factor);
    }
}

pub struct WaterPass;

impl GenerationPass for WaterPass {
    fn id(&self) -> PassId {
        PassId::Water
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::Height, PassId::Plates]
    }

    fn run(&self, ctx: &mut PassContext) {
        let t = &ctx.config.terrain;
        water::find_water(&mut ctx.tiles, t.water_level, t.peak_level, ctx.config.climate.axial_tilt);
    }
}

pub struct CoarseCategorizePass;

impl GenerationPass for CoarseCategorizePass {
    fn id(&self) -> PassId {
        PassId::CoarseCategorize
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::Water]
    }

    fn run(&self, ctx: &mut PassContext) {
        biome::categorize_tiles(&mut ctx.tiles);
    }
}

pub struct YearTemperaturePass;

impl GenerationPass for YearTemperaturePass {
    fn id(&self) -> PassId {
        PassId::YearTemperature
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::CoarseCategorize]
    }

    fn run(&self, ctx: &mut PassContext) {
        let c = &ctx.config.climate;
        let (min, max) = temperature::fill_year_temperature(&mut ctx.tiles, c.average_temperature, c.axial_tilt);
        ctx.stats.min_year_temperature = min;
        ctx.stats.max_year_temperature = max;
    }
}

pub struct BasePressurePass;

impl GenerationPass for BasePressurePass {
    fn id(&self) -> PassId {
        PassId::BasePressure
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::YearTemperature]
    }

    fn run(&self, ctx: &mut PassContext) {
        pressure::fill_base_pressure(&mut ctx.tiles, ctx.config.climate.axial_tilt);
    }
}

pub struct MacroWindPass;

impl GenerationPass for MacroWindPass {
    fn id(&self) -> PassId {
        PassId::MacroWind
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::BasePressure]
    }

    fn run(&self, ctx: &mut PassContext) {
        wind::fill_macro_wind(&mut ctx.tiles);
    }
}

pub struct OrographicBlockingPass;

impl GenerationPass for OrographicBlockingPass {
    fn id(&self) -> PassId {
        PassId::OrographicBlocking
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::MacroWind]
    }

    fn run(&self, ctx: &mut PassContext) {
        wind::fill_wind_step_to_mountain(&mut ctx.tiles);
    }
}

pub struct HumidityPass;

impl GenerationPass for HumidityPass {
    fn id(&self) -> PassId {
        PassId::Humidity
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::YearTemperature, PassId::OrographicBlocking]
    }

    fn run(&self, ctx: &mut PassContext) {
        humidity::fill_humidity(&mut ctx.tiles);
    }
}

pub struct FinalClassifierPass;

impl GenerationPass for FinalClassifierPass {
    fn id(&self) -> PassId {
        PassId::FinalClassifier
    }

    fn dependencies(&self) -> &'static [PassId] {
        &[PassId::Humidity]
    }

    fn run(&self, ctx: &mut PassContext) {
        biome::final_categorize_tiles(&mut ctx.tiles, &ctx.config.biomes);
    }
}

/// Validated, ordered list of passes.
pub struct Pipeline {
    passes: Vec<Box<dyn GenerationPass>>,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl Pipeline {
    /// Checks that every pass comes after its dependencies and appears once.
    pub fn new(passes: Vec<Box<dyn GenerationPass>>) -> Result<Self, PipelineError> {
        let mut seen: Vec<PassId> = Vec::with_capacity(passes.len());

        for pass in &passes {
            let id = pass.id();
            if seen.contains(&id) {
                return Err(PipelineError::DuplicatePass(id));
            }
            if let Some(&requires) = pass.dependencies().iter().find(|dep| !seen.contains(dep)) {
                return Err(PipelineError::MissingDependency { pass: id, requires });
            }
            seen.push(id);
        }

        Ok(Self { passes })
    }

    /// Height, plates, water, coarse categories, temperature, pressure, wind,
    /// orographic blocking, humidity and the final classifier.
    pub fn standard() -> Self {
        Self {
            passes: vec![
                Box::new(HeightPass),
                Box::new(PlatesPass),
                Box::new(WaterPass),
                Box::new(CoarseCategorizePass),
                Box::new(YearTemperaturePass),
                Box::new(BasePressurePass),
                Box::new(MacroWindPass),
                Box::new(OrographicBlockingPass),
                Box::new(HumidityPass),
                Box::new(FinalClassifierPass),
            ],
        }
    }

    pub fn ids(&self) -> Vec<PassId> {
        self.passes.iter().map(|p| p.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn run(&self, ctx: &mut PassContext) {
        for pass in &self.passes {
            let start = Instant::now();
            pass.run(ctx);
            debug!("pass '{}' took {:.2?}", pass.id(), start.elapsed());
        }
    }
}
