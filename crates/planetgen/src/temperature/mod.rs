// Yearly temperature from latitude and terrain

pub mod insolation;

use crate::tile::{Tile, TileKind};
use crate::tools::{latitude, rotation_axis};
use insolation::annual_insolation;

/// How strongly a terrain kind damps the temperature swing around the planetary mean.
pub fn heat_divisor(kind: Option<TileKind>) -> f32 {
    match kind {
        Some(TileKind::DeepOcean) => 1.05,
        Some(TileKind::ShallowOcean) => 1.01,
        Some(TileKind::Beach) => 1.005,
        Some(TileKind::Forest) => 0.95,
        Some(TileKind::Peak) => 1.3,
        _ => 1.0,
    }
}

/// Fills `heat_quantity` and `year_temperature` for every tile.
///
/// # Arguments
/// * `average_temperature` - Planetary mean in celsius
/// * `axial_tilt` - Tilt in degrees
///
/// # Returns
/// Lowest and highest yearly temperature, `(0, 0)` for an empty slice.
pub fn fill_year_temperature(tiles: &mut [Tile], average_temperature: f32, axial_tilt: f32) -> (f32, f32) {
    if tiles.is_empty() {
        return (0.0, 0.0);
    }

    let axis = rotation_axis(axial_tilt);
    let tilt = axial_tilt.to_radians();
    let mut min_temp = f32::MAX;
    let mut max_temp = f32::MIN;

    for tile in tiles.iter_mut() {
        let sig = annual_insolation(latitude(axis, tile.center).sin(), tilt);
        tile.heat_quantity = sig * 10.0 + average_temperature;

        let intensity = (sig + average_temperature) / (1.0 + (heat_divisor(tile.kind) - 1.0) / 75.0);
        let temperature = 10.0 * (intensity - average_temperature) + average_temperature;

        tile.year_temperature = temperature;
        min_temp = min_temp.min(temperature);
        max_temp = max_temp.max(temperature);
    }

    (min_temp, max_temp)
}
