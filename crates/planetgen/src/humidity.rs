//! Moisture carried inland from the oceans.
//!
//! Every tile traces its air downwind until it reaches the sea; the weight that
//! arrives is the tile's raw moisture supply. The supply is then scaled by warmth,
//! lowered with altitude, blurred, and cut behind mountain ranges.

use crate::tile::Tile;
use crate::tools::normalize_min_max;
use crate::wind::{DiffusionParams, WindDiffusion};

/// Neighbour-averaging rounds applied to the raw humidity.
pub const SMOOTHING_ROUNDS: usize = 4;

/// Raw moisture supply of every tile, normalised to [0, 1].
pub fn moisture_supply(tiles: &[Tile]) -> Vec<f32> {
    let mut diffusion = WindDiffusion::new(tiles.len());
    let mut supply: Vec<f32> = (0..tiles.len())
        .map(|i| diffusion.run(tiles, i, DiffusionParams::MOISTURE, Tile::is_ocean))
        .collect();
    normalize_min_max(&mut supply);
    supply
}

/// Replaces every value by the mean of itself and the mean of its neighbours.
/// Tiles without neighbours keep their value.
fn smooth(tiles: &[Tile], values: &[f32]) -> Vec<f32> {
    tiles
        .iter()
        .enumerate()
        .map(|(i, tile)| {
            let (sum, count) = tile.neighbors().fold((0.0, 0usize), |(s, c), n| (s + values[n], c + 1));
            if count == 0 {
                values[i]
            } else {
                (values[i] + sum / count as f32) / 2.0
            }
        })
        .collect()
}

/// Fills `humidity` on every tile.
///
/// Needs ocean kinds, `year_temperature`, `macro_wind` and `wind_step_to_mountain`.
/// Land ends up in [0, 1]; ocean tiles are exactly 1.
pub fn fill_humidity(tiles: &mut [Tile]) {
    let supply = moisture_supply(tiles);

    let mut humidity: Vec<f32> = tiles
        .iter()
        .zip(&supply)
        .map(|(tile, &s)| (s * 0.8 + 0.2) * tile.year_temperature - tile.height / 20.0)
        .collect();

    for _ in 0..SMOOTHING_ROUNDS {
        humidity = smooth(tiles, &humidity);
    }

    // rain shadow
    for (h, tile) in humidity.iter_mut().zip(tiles.iter()) {
        *h *= (1.0 - tile.wind_step_to_mountain.sqrt().sqrt()) * 0.5 + 0.25;
    }

    let land: Vec<usize> = (0..tiles.len()).filter(|&i| !tiles[i].is_ocean()).collect();
    let mut land_humidity: Vec<f32> = land.iter().map(|&i| humidity[i]).collect();
    normalize_min_max(&mut land_humidity);

    for tile in tiles.iter_mut() {
        tile.humidity = 1.0;
    }
    for (&i, h) in land.iter().zip(land_humidity) {
        tiles[i].humidity = h.clamp(0.0, 1.0);
    }
}
