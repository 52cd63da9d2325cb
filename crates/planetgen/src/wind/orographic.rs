use super::diffusion::{DiffusionParams, WindDiffusion};
use crate::tile::Tile;
use crate::tools::normalize_min_max;

/// Whether a tile is tall enough to stop an air parcel.
pub fn is_blocking(height: f32, max_height: f32) -> bool {
    height > 0.0 && (height / max_height).sqrt() > 0.3
}

/// Scores every tile by how much of its upwind air has crossed a mountain.
///
/// The raw scores are min-max normalised into `wind_step_to_mountain`.
pub fn fill_wind_step_to_mountain(tiles: &mut [Tile]) {
    let max_height = tiles.iter().fold(0.0f32, |m, t| m.max(t.height));

    let mut diffusion = WindDiffusion::new(tiles.len());
    let mut scores: Vec<f32> = (0..tiles.len())
        .map(|i| diffusion.run(tiles, i, DiffusionParams::OROGRAPHIC, |t| is_blocking(t.height, max_height)))
        .collect();

    normalize_min_max(&mut scores);
    for (tile, score) in tiles.iter_mut().zip(scores) {
        tile.wind_step_to_mountain = score;
    }
}
