use crate::constants::HEIGHT_SCALE;
use crate::noise_field::NoiseOracle;
use crate::tile::Tile;
use glam::Vec3;

/// Samples fractal noise at every tile center and stores it as the tile height.
///
/// Centers are remapped from [-1, 1] to [0, 1] before sampling.
///
/// # Returns
/// The lowest and highest height written, or `(0, 0)` for an empty slice.
pub fn fill_height<N: NoiseOracle + ?Sized>(
    tiles: &mut [Tile],
    noise: &N,
    octaves: usize,
    roughness: f32,
    lacunarity: f32,
) -> (f32, f32) {
    if tiles.is_empty() {
        return (0.0, 0.0);
    }

    let mut min_height = f32::MAX;
    let mut max_height = f32::MIN;

    for tile in tiles.iter_mut() {
        let p = tile.center * 0.5 + Vec3::splat(0.5);
        let height = noise.fractal_sample(p, octaves, roughness, lacunarity) * HEIGHT_SCALE;

        tile.height = height;
        min_height = min_height.min(height);
        max_height = max_height.max(height);
    }

    (min_height, max_height)
}
