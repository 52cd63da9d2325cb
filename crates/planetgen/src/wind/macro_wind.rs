use crate::tile::{Tile, direction_between};
use glam::Vec3;

/// Unit wind direction at tile `i`, pointing down the local pressure gradient.
///
/// Each neighbour pulls along the direction toward it, weighted by how much lower its
/// pressure is. A tile without neighbours or without any gradient gets zero wind.
pub fn macro_wind_at(tiles: &[Tile], i: usize) -> Vec3 {
    let curr = tiles[i].base_pressure;
    tiles[i]
        .neighbors()
        .map(|n| (curr - tiles[n].base_pressure) * direction_between(tiles, i, n))
        .sum::<Vec3>()
        .normalize_or_zero()
}

pub fn fill_macro_wind(tiles: &mut [Tile]) {
    let winds: Vec<Vec3> = (0..tiles.len()).map(|i| macro_wind_at(tiles, i)).collect();
    for (tile, wind) in tiles.iter_mut().zip(winds) {
        tile.macro_wind = wind;
    }
}
