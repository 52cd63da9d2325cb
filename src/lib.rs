use clap::Parser;
use log::{info, warn};
use planetgen::biome::kind_histogram;
use planetgen::config::DEFAULT_CONFIG_PATH;
use planetgen::plate::tiles_per_plate;
use planetgen::tools::{expand_seed64, generate_seed8};
use planetgen::{ConfigError, Planet, PlanetGenConfig, TileKind};
use std::path::{Path, PathBuf};

/// Reads the generation parameters, falling back to defaults when the file is absent.
///
/// A file that exists but cannot be parsed is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<PlanetGenConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        warn!("{} not found, using default parameters", path.display());
        return Ok(PlanetGenConfig::default());
    }
    let config = PlanetGenConfig::load_from_file(path)?;
    info!("parameters loaded from {}", path.display());
    Ok(config)
}

/// Generates one planet and logs what it is made of.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "icoworld")]
pub struct Args {
    /// Path to the TOML generation parameters.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    pub config_path: PathBuf,

    /// Ignore the configured seed and draw a fresh 8-digit one.
    #[arg(long)]
    pub new_seed: bool,
}

/// Replaces the configured seed with one expanded from a fresh 8-digit code.
pub fn reseed(config: &mut PlanetGenConfig) -> u32 {
    let code = generate_seed8();
    config.seed = expand_seed64(code);
    info!("drew seed code {code:08}");
    code
}

/// Share of the surface taken by each terrain kind, in palette order.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainSummary {
    pub tiles: usize,
    /// `(name, tile count)`, unclassified last.
    pub kinds: Vec<(&'static str, usize)>,
    pub ocean_tiles: usize,
    pub largest_plate: usize,
    pub smallest_plate: usize,
}

impl TerrainSummary {
    pub fn of(planet: &Planet) -> Self {
        let counts = kind_histogram(&planet.tiles);
        let mut kinds: Vec<(&'static str, usize)> = TileKind::ALL.iter().map(|k| (k.name(), counts[*k as usize])).collect();
        kinds.push(("Unclassified", counts[TileKind::COUNT]));

        let plate_sizes = tiles_per_plate(&planet.tiles, planet.plates.len());

        Self {
            tiles: planet.tile_count(),
            kinds,
            ocean_tiles: planet.tiles.iter().filter(|t| t.is_ocean()).count(),
            largest_plate: plate_sizes.iter().copied().max().unwrap_or(0),
            smallest_plate: plate_sizes.iter().copied().min().unwrap_or(0),
        }
    }

    pub fn percent(&self, count: usize) -> f32 {
        if self.tiles == 0 {
            0.0
        } else {
            count as f32 * 100.0 / self.tiles as f32
        }
    }

    /// One line per terrain kind present on the planet.
    pub fn lines(&self) -> Vec<String> {
        self.kinds
            .iter()
            .filter(|(_, count)| *count > 0)
            .map(|(name, count)| format!("{name:>14}: {count:>7} tiles ({:5.1}%)", self.percent(*count)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planetgen::PlanetGenerator;
    use rstest::rstest;

    fn planet() -> Planet {
        let mut config = PlanetGenConfig::default();
        config.mesh.order = 2;
        config.plates.count = 4;
        PlanetGenerator::new(&config).generate()
    }

    #[test]
    fn summary_accounts_for_every_tile() {
        let planet = planet();
        let summary = TerrainSummary::of(&planet);
        assert_eq!(summary.tiles, 320);
        assert_eq!(summary.kinds.iter().map(|(_, c)| c).sum::<usize>(), 320);
        assert!(summary.smallest_plate <= summary.largest_plate);
        assert!(summary.ocean_tiles < summary.tiles);
    }

    #[test]
    fn lines_skip_missing_kinds() {
        let summary = TerrainSummary {
            tiles: 4,
            kinds: vec![("Forest", 3), ("Desert", 0), ("Beach", 1)],
            ocean_tiles: 0,
            largest_plate: 4,
            smallest_plate: 4,
        };
        let lines = summary.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Forest") && lines[0].contains("75.0%"));
    }

    #[rstest]
    #[case(vec!["icoworld"], DEFAULT_CONFIG_PATH, false)]
    #[case(vec!["icoworld", "other.toml"], "other.toml", false)]
    #[case(vec!["icoworld", "--new-seed"], DEFAULT_CONFIG_PATH, true)]
    #[case(vec!["icoworld", "--new-seed", "other.toml"], "other.toml", true)]
    fn args_from_command_line(#[case] argv: Vec<&str>, #[case] path: &str, #[case] new_seed: bool) {
        let args = Args::try_parse_from(argv).unwrap();
        assert_eq!(args.config_path, PathBuf::from(path));
        assert_eq!(args.new_seed, new_seed);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Args::try_parse_from(["icoworld", "--bogus"]).is_err());
    }

    #[test]
    fn reseed_uses_the_expanded_code() {
        let mut config = PlanetGenConfig::default();
        let code = reseed(&mut config);
        assert!(code < 100_000_000);
        assert_eq!(config.seed, expand_seed64(code));
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let config = load_config("definitely/not/here.toml").unwrap();
        assert_eq!(config, PlanetGenConfig::default());
    }
}
