//! Plate boundary relief
//!
//! Estimates how fast neighbouring plates move apart or together at every tile and
//! turns that into extra relief along the boundaries.

use crate::plate::Plate;
use crate::tile::{NO_TILE, Tile, direction_between};
use glam::Vec3;
use log::debug;

/// Type of plate boundary interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundaryType {
    /// Plates colliding
    Convergent,
    /// Plates spreading apart
    Divergent,
    /// Plates sliding past each other, or a plate interior
    Transform,
}

impl BoundaryType {
    /// Divergences closer to zero than this count as transform motion.
    const THRESHOLD: f32 = 1e-3;

    pub fn from_divergence(divergence: f32) -> Self {
        if divergence > Self::THRESHOLD {
            BoundaryType::Convergent
        } else if divergence < -Self::THRESHOLD {
            BoundaryType::Divergent
        } else {
            BoundaryType::Transform
        }
    }
}

/// Speed and tangent direction of the plate owning `tile`.
fn plate_motion(tiles: &[Tile], plates: &[Plate], tile: usize) -> (f32, Vec3) {
    match plates.get(tiles[tile].plate_index) {
        Some(plate) => (plate.speed, plate.direction_at(tiles[tile].center)),
        None => (0.0, Vec3::ZERO),
    }
}

/// Signed, contrast-sharpened divergence of plate motion at tile `i`.
///
/// Positive values mean the tile closes in on its neighbours, negative values mean
/// they drift apart. A missing neighbour contributes nothing.
pub fn divergence_at(tiles: &[Tile], plates: &[Plate], i: usize) -> f32 {
    let (si, vi) = plate_motion(tiles, plates, i);

    let mut div = 0.0;
    let mut total_speed = 3.0 * si;

    for n in tiles[i].neighbors {
        let (sk, vk, dk) = if n == NO_TILE {
            (si, vi, Vec3::ZERO)
        } else {
            let (sk, vk) = plate_motion(tiles, plates, n);
            (sk, vk, direction_between(tiles, i, n))
        };
        div += si * vi.dot(dk) - sk * vk.dot(dk);
        total_speed += sk;
    }

    div /= total_speed.max(0.1);
    // cube, keeping the sign
    div *= (div * div).abs();
    div * total_speed
}

/// Adds boundary relief to every tile height.
///
/// Each tile first gets `height * |divergence|`. That field is then spread
/// `iterations` times, every tile handing `factor / 3` of its value to each
/// neighbour while keeping its own, before being added to the heights.
pub fn apply_plate_boundaries(tiles: &mut [Tile], plates: &[Plate], iterations: usize, factor: f32) {
    let mut divergent = 0;
    let mut convergent = 0;

    let mut relief: Vec<f32> = (0..tiles.len())
        .map(|i| {
            let div = divergence_at(tiles, plates, i);
            match BoundaryType::from_divergence(div) {
                BoundaryType::Divergent => divergent += 1,
                BoundaryType::Convergent => convergent += 1,
                BoundaryType::Transform => {}
            }
            tiles[i].height * div.abs()
        })
        .collect();
    debug!("plate boundaries: {divergent} divergent, {convergent} convergent tiles");

    for _ in 0..iterations {
        let mut next = relief.clone();
        for (j, tile) in tiles.iter().enumerate() {
            let share = relief[j] * factor / 3.0;
            for n in tile.neighbors() {
                next[n] += share;
            }
        }
        relief = next;
    }

    for (tile, r) in tiles.iter_mut().zip(relief) {
        tile.height += r;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::plate_color;
    use crate::tile::link;

    fn plate(id: usize, angle: f32, speed: f32) -> Plate {
        Plate {
            id,
            angle,
            speed,
            growth_weight: 1,
            debug_color: plate_color(id),
        }
    }

    /// Two tiles at the north pole side by side along x.
    fn pair(plate_a: usize, plate_b: usize) -> Vec<Tile> {
        let mut tiles = vec![
            Tile::new(Vec3::new(-0.01, 0.0, 1.0)),
            Tile::new(Vec3::new(0.01, 0.0, 1.0)),
        ];
        tiles[0].plate_index = plate_a;
        tiles[1].plate_index = plate_b;
        link(&mut tiles, 0, 0, 1, 0);
        tiles
    }

    #[test]
    fn same_plate_has_no_divergence() {
        let tiles = pair(0, 0);
        let plates = vec![plate(0, 0.3, 2.0)];
        assert!(divergence_at(&tiles, &plates, 0).abs() < 1e-4);
    }

    #[test]
    fn plates_moving_apart_diverge() {
        // plate 0 heads to -x, plate 1 to +x
        let tiles = pair(0, 1);
        let plates = vec![plate(0, std::f32::consts::PI, 1.0), plate(1, 0.0, 1.0)];
        let div = divergence_at(&tiles, &plates, 0);
        assert_eq!(BoundaryType::from_divergence(div), BoundaryType::Divergent);
    }

    #[test]
    fn plates_moving_together_converge() {
        let tiles = pair(0, 1);
        let plates = vec![plate(0, 0.0, 1.0), plate(1, std::f32::consts::PI, 1.0)];
        let div = divergence_at(&tiles, &plates, 0);
        assert_eq!(BoundaryType::from_divergence(div), BoundaryType::Convergent);
    }

    #[test]
    fn moving_apart_and_together_have_opposite_signs() {
        let tiles = pair(0, 1);
        let apart = vec![plate(0, std::f32::consts::PI, 1.0), plate(1, 0.0, 1.0)];
        let together = vec![plate(0, 0.0, 1.0), plate(1, std::f32::consts::PI, 1.0)];
        let a = divergence_at(&tiles, &apart, 0);
        let t = divergence_at(&tiles, &together, 0);
        assert!(a * t < 0.0, "expected opposite signs, got {a} and {t}");
        assert_ne!(BoundaryType::from_divergence(a), BoundaryType::from_divergence(t));
    }

    #[test]
    fn isolated_tile_is_transform() {
        let tiles = vec![Tile::new(Vec3::Z)];
        let plates = vec![plate(0, 1.0, 3.0)];
        let div = divergence_at(&tiles, &plates, 0);
        assert_eq!(BoundaryType::from_divergence(div), BoundaryType::Transform);
    }

    #[test]
    fn smoothing_adds_without_removing() {
        // relief only on tile 0; one round with factor 0.75 gives tile 1 a quarter of it
        let mut tiles = pair(0, 1);
        tiles[0].height = 1.0;
        tiles[1].height = 0.0;
        let plates = vec![plate(0, std::f32::consts::PI, 1.0), plate(1, 0.0, 1.0)];
        let div = divergence_at(&tiles, &plates, 0).abs();

        apply_plate_boundaries(&mut tiles, &plates, 1, 0.75);

        assert!((tiles[0].height - (1.0 + div)).abs() < 1e-5);
        assert!((tiles[1].height - div * 0.25).abs() < 1e-5);
    }

    #[test]
    fn zero_iterations_only_adds_raw_relief() {
        let mut tiles = pair(0, 0);
        tiles[0].height = 2.0;
        let plates = vec![plate(0, 0.0, 1.0)];
        apply_plate_boundaries(&mut tiles, &plates, 0, 0.65);
        assert!((tiles[0].height - 2.0).abs() < 1e-4);
    }
}
