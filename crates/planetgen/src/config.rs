use crate::error::ConfigError;
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Highest subdivision order accepted; 20 * 4^8 is about 1.3M tiles.
pub const MAX_ORDER: usize = 8;
pub const MAX_OCTAVES: usize = 16;
pub const MAX_LACUNARITY: f32 = 16.0;
pub const MAX_PLATE_SPEED: f32 = 100.0;
pub const MAX_SMOOTHING_ITERATIONS: usize = 64;
/// Accepted planetary mean temperature, celsius.
pub const TEMPERATURE_RANGE: (f32, f32) = (-100.0, 100.0);

pub const DEFAULT_CONFIG_PATH: &str = "planetgen_config.toml";

/// Full parameter bundle for one generation run.
///
/// Supplied wholesale before generation starts and never mutated while a run is in
/// progress. Any change means regenerating from the icosphere onward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetGenConfig {
    pub seed: u64,
    pub mesh: MeshConfig,
    pub terrain: TerrainConfig,
    pub plates: PlateConfig,
    pub climate: ClimateConfig,
    pub biomes: BiomeThresholds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Number of icosahedron subdivisions; the planet has `20 * 4^order` tiles.
    pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    pub octaves: usize,
    pub roughness: f32,
    pub lacunarity: f32,
    /// Fraction of tiles that become ocean.
    pub water_level: f32,
    /// Tiles ranked above this fraction become peaks.
    pub peak_level: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlateConfig {
    pub count: usize,
    pub speed: f32,
    pub smoothing_iterations: usize,
    pub smoothing_factor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClimateConfig {
    /// Mean planetary temperature in celsius.
    pub average_temperature: f32,
    /// Axial tilt in degrees.
    pub axial_tilt: f32,
}

/// Cut-offs used by the final terrain classifier. Temperatures in celsius,
/// humidities in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiomeThresholds {
    pub min_temp_desert: f32,
    pub max_temp_tundra: f32,
    pub humidity_desert: f32,
    pub humidity_steppe: f32,
    pub humidity_rainforest: f32,
    pub snow_peak_factor: f32,
    pub max_ice_temp: f32,
    pub max_snow_temp: f32,
}

impl Default for PlanetGenConfig {
    fn default() -> Self {
        Self {
            seed: 1234,
            mesh: MeshConfig::default(),
            terrain: TerrainConfig::default(),
            plates: PlateConfig::default(),
            climate: ClimateConfig::default(),
            biomes: BiomeThresholds::default(),
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self { order: 6 }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            octaves: 5,
            roughness: 0.3,
            lacunarity: 10.0,
            water_level: 0.7,
            peak_level: 0.985,
        }
    }
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            count: 50,
            speed: 4.0,
            smoothing_iterations: 9,
            smoothing_factor: 0.65,
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            average_temperature: 20.0,
            axial_tilt: 22.5,
        }
    }
}

impl Default for BiomeThresholds {
    fn default() -> Self {
        Self {
            min_temp_desert: 30.0,
            max_temp_tundra: 29.75,
            humidity_desert: 0.19,
            humidity_steppe: 0.195,
            humidity_rainforest: 0.2,
            snow_peak_factor: 0.8,
            max_ice_temp: 25.0,
            max_snow_temp: 28.0,
        }
    }
}

impl PlanetGenConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: PlanetGenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns a copy with every parameter clamped to a range the generator can handle.
    pub fn sanitized(&self) -> Self {
        let mut out = self.clone();

        out.mesh.order = clamp_usize("mesh.order", out.mesh.order, 0, MAX_ORDER);

        let t = &mut out.terrain;
        t.octaves = clamp_usize("terrain.octaves", t.octaves, 1, MAX_OCTAVES);
        t.roughness = clamp_f32("terrain.roughness", t.roughness, 0.0, 1.0);
        t.lacunarity = clamp_f32("terrain.lacunarity", t.lacunarity, 0.0, MAX_LACUNARITY);
        t.water_level = clamp_f32("terrain.water_level", t.water_level, 0.0, 1.0);
        t.peak_level = clamp_f32("terrain.peak_level", t.peak_level, 0.0, 1.0);

        // a plate beyond the tile count could never own a tile
        let max_plates = out.tile_count();
        let p = &mut out.plates;
        p.count = clamp_usize("plates.count", p.count, 1, max_plates);
        p.speed = clamp_f32("plates.speed", p.speed, 0.0, MAX_PLATE_SPEED);
        p.smoothing_iterations = clamp_usize(
            "plates.smoothing_iterations",
            p.smoothing_iterations,
            0,
            MAX_SMOOTHING_ITERATIONS,
        );
        p.smoothing_factor = clamp_f32("plates.smoothing_factor", p.smoothing_factor, 0.0, 1.0);

        let c = &mut out.climate;
        c.axial_tilt = clamp_f32("climate.axial_tilt", c.axial_tilt, 0.0, 90.0);
        if c.average_temperature.is_nan() {
            warn!("climate.average_temperature is NaN, using the default");
            c.average_temperature = ClimateConfig::default().average_temperature;
        }
        let (min_temp, max_temp) = TEMPERATURE_RANGE;
        c.average_temperature = clamp_f32("climate.average_temperature", c.average_temperature, min_temp, max_temp);

        out
    }

    /// Number of tiles the configured mesh will have.
    pub fn tile_count(&self) -> usize {
        20 * 4usize.pow(self.mesh.order as u32)
    }
}

fn clamp_usize(name: &str, value: usize, min: usize, max: usize) -> usize {
    let clamped = value.clamp(min, max);
    if clamped != value {
        warn!("{name} = {value} is out of range, clamped to {clamped}");
    }
    clamped
}

fn clamp_f32(name: &str, value: f32, min: f32, max: f32) -> f32 {
    // NaN falls back to the lower bound
    let clamped = if value.is_nan() { min } else { value.clamp(min, max) };
    if clamped != value {
        warn!("{name} = {value} is out of range, clamped to {clamped}");
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_are_already_sane() {
        let config = PlanetGenConfig::default();
        assert_eq!(config.sanitized(), config);
    }

    #[test]
    fn toml_roundtrip_keeps_values() {
        let mut config = PlanetGenConfig::default();
        config.seed = 99;
        config.plates.count = 7;
        let text = toml::to_string_pretty(&config).unwrap();
        let back: PlanetGenConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: PlanetGenConfig = toml::from_str("seed = 5\n[mesh]\norder = 2\n").unwrap();
        assert_eq!(config.seed, 5);
        assert_eq!(config.mesh.order, 2);
        assert_eq!(config.terrain, TerrainConfig::default());
        assert_eq!(config.biomes, BiomeThresholds::default());
    }

    #[test]
    fn file_roundtrip() {
        let path = std::env::temp_dir().join(format!("planetgen_cfg_{}.toml", std::process::id()));
        let config = PlanetGenConfig::default();
        config.save_to_file(&path).unwrap();
        let loaded = PlanetGenConfig::load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = PlanetGenConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        let path = std::env::temp_dir().join(format!("planetgen_bad_{}.toml", std::process::id()));
        std::fs::write(&path, "seed = [not toml").unwrap();
        let err = PlanetGenConfig::load_from_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[rstest]
    #[case(0, 20)]
    #[case(1, 80)]
    #[case(3, 1280)]
    fn tile_count_follows_order(#[case] order: usize, #[case] expected: usize) {
        let mut config = PlanetGenConfig::default();
        config.mesh.order = order;
        assert_eq!(config.tile_count(), expected);
    }

    #[test]
    fn sanitize_clamps_out_of_range_values() {
        let mut config = PlanetGenConfig::default();
        config.mesh.order = 40;
        config.terrain.octaves = 0;
        config.terrain.water_level = 1.5;
        config.terrain.peak_level = f32::NAN;
        config.plates.count = 0;
        config.plates.speed = -3.0;
        config.climate.axial_tilt = 120.0;

        let s = config.sanitized();
        assert_eq!(s.mesh.order, MAX_ORDER);
        assert_eq!(s.terrain.octaves, 1);
        assert_eq!(s.terrain.water_level, 1.0);
        assert_eq!(s.terrain.peak_level, 0.0);
        assert_eq!(s.plates.count, 1);
        assert_eq!(s.plates.speed, 0.0);
        assert_eq!(s.climate.axial_tilt, 90.0);
    }

    #[test]
    fn plate_count_is_bounded_by_tile_count() {
        let mut config = PlanetGenConfig::default();
        config.mesh.order = 0;
        config.plates.count = 1 << 40;
        assert_eq!(config.sanitized().plates.count, 20);
    }

    #[rstest]
    #[case(3.0e38, 100.0)]
    #[case(-1.0e9, -100.0)]
    #[case(f32::INFINITY, 100.0)]
    #[case(f32::NAN, 20.0)]
    #[case(15.0, 15.0)]
    fn average_temperature_is_kept_physical(#[case] value: f32, #[case] expected: f32) {
        let mut config = PlanetGenConfig::default();
        config.climate.average_temperature = value;
        assert_eq!(config.sanitized().climate.average_temperature, expected);
    }

    #[test]
    fn smoothing_and_lacunarity_have_upper_bounds() {
        let mut config = PlanetGenConfig::default();
        config.plates.smoothing_iterations = usize::MAX;
        config.terrain.lacunarity = f32::MAX;
        config.plates.speed = f32::INFINITY;
        let s = config.sanitized();
        assert_eq!(s.plates.smoothing_iterations, MAX_SMOOTHING_ITERATIONS);
        assert_eq!(s.terrain.lacunarity, MAX_LACUNARITY);
        assert_eq!(s.plates.speed, MAX_PLATE_SPEED);
    }
}
