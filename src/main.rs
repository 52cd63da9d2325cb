use clap::Parser;
use icoworld::{Args, TerrainSummary, load_config, reseed};
use log::info;
use planetgen::PlanetGenerator;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = load_config(&args.config_path)?;
    if args.new_seed {
        reseed(&mut config);
    }
    let planet = PlanetGenerator::new(&config).generate();

    let summary = TerrainSummary::of(&planet);
    info!(
        "{} tiles, {:.1}% ocean, plates of {}..{} tiles",
        summary.tiles,
        summary.percent(summary.ocean_tiles),
        summary.smallest_plate,
        summary.largest_plate
    );
    for line in summary.lines() {
        info!("{line}");
    }

    Ok(())
}
