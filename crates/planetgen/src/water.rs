use crate::tile::{NO_TILE, Tile, TileKind};
use crate::tools::rotation_axis;
use log::debug;
use std::collections::VecDeque;

/// Sort key for water placement: height flattened toward the poles.
fn water_metric(tile: &Tile, axis: glam::Vec3) -> f32 {
    let d = tile.center.normalize_or_zero().dot(axis);
    tile.height * (1.0 - d * d) * 100.0
}

/// Assigns ocean and peak kinds by rank, then measures the distance to water.
///
/// Tiles are ranked by a latitude-weighted height. The lowest `0.9 * water_level`
/// share becomes deep ocean, the rest up to `water_level` shallow ocean, and the
/// share above `peak_level` becomes peaks. Every other tile is left unclassified.
pub fn find_water(tiles: &mut [Tile], water_level: f32, peak_level: f32, axial_tilt: f32) {
    let n = tiles.len();
    let axis = rotation_axis(axial_tilt);

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| water_metric(&tiles[a], axis).total_cmp(&water_metric(&tiles[b], axis)));

    let deep_end = ((0.9 * water_level as f64 * n as f64).ceil() as usize).min(n);
    let water_end = ((water_level as f64 * n as f64).ceil() as usize).clamp(deep_end, n);
    let peak_start = ((peak_level * n as f32).floor() as usize).clamp(water_end, n);

    for (rank, &i) in order.iter().enumerate() {
        tiles[i].kind = if rank < deep_end {
            Some(TileKind::DeepOcean)
        } else if rank < water_end {
            Some(TileKind::ShallowOcean)
        } else if rank >= peak_start {
            Some(TileKind::Peak)
        } else {
            None
        };
    }
    debug!(
        "water: {} deep, {} shallow, {} peak tiles",
        deep_end,
        water_end - deep_end,
        n - peak_start
    );

    fill_distance_to_water(tiles);
}

/// Multi-source breadth-first search from every ocean tile.
///
/// Ocean tiles get distance 0. Every reachable tile gets its hop count and the
/// neighbour one hop closer to water; unreachable tiles keep `None` for both.
pub fn fill_distance_to_water(tiles: &mut [Tile]) {
    let mut open = VecDeque::new();
    let mut closed = vec![false; tiles.len()];

    for (i, tile) in tiles.iter_mut().enumerate() {
        tile.next_tile_to_water = None;
        if tile.is_ocean() {
            tile.distance_to_water = Some(0);
            closed[i] = true;
            open.push_back(i);
        } else {
            tile.distance_to_water = None;
        }
    }

    while let Some(i) = open.pop_front() {
        let distance = tiles[i].distance_to_water.map_or(0, |d| d + 1);
        for n in tiles[i].neighbors {
            if n == NO_TILE || closed[n] {
                continue;
            }
            closed[n] = true;
            tiles[n].distance_to_water = Some(distance);
            tiles[n].next_tile_to_water = Some(i);
            open.push_back(n);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::link;
    use glam::Vec3;
    use rstest::rstest;

    /// A chain of `n` tiles on the equator with heights 0, 1, 2, ...
    fn chain(n: usize) -> Vec<Tile> {
        let mut tiles: Vec<Tile> = (0..n)
            .map(|i| {
                let a = i as f32 * 0.1;
                Tile {
                    center: Vec3::new(a.cos(), a.sin(), 0.0),
                    height: i as f32,
                    ..Default::default()
                }
            })
            .collect();
        for i in 1..n {
            link(&mut tiles, i - 1, 1, i, 0);
        }
        tiles
    }

    #[test]
    fn lowest_tiles_become_ocean() {
        let mut tiles = chain(10);
        find_water(&mut tiles, 0.5, 0.9, 0.0);

        let kinds: Vec<_> = tiles.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[..5], [Some(TileKind::DeepOcean); 5]);
        assert_eq!(kinds[5..9], [None; 4]);
        assert_eq!(kinds[9], Some(TileKind::Peak));
    }

    #[test]
    fn shallow_band_sits_between_deep_and_land() {
        let mut tiles = chain(20);
        find_water(&mut tiles, 0.5, 1.0, 0.0);
        // ceil(0.9 * 0.5 * 20) = 9 deep, then 1 shallow
        assert_eq!(tiles[8].kind, Some(TileKind::DeepOcean));
        assert_eq!(tiles[9].kind, Some(TileKind::ShallowOcean));
        assert_eq!(tiles[10].kind, None);
    }

    #[test]
    fn distances_count_hops_along_the_chain() {
        let mut tiles = chain(6);
        find_water(&mut tiles, 0.2, 1.0, 0.0);
        // tiles 0 and 1 are water
        let distances: Vec<_> = tiles.iter().map(|t| t.distance_to_water).collect();
        assert_eq!(distances, vec![Some(0), Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(tiles[4].next_tile_to_water, Some(3));
        assert_eq!(tiles[1].next_tile_to_water, None);
    }

    #[test]
    fn no_water_leaves_everything_unreachable() {
        let mut tiles = chain(5);
        find_water(&mut tiles, 0.0, 1.0, 0.0);
        assert!(tiles.iter().all(|t| t.kind.is_none()));
        assert!(tiles.iter().all(|t| t.distance_to_water.is_none() && t.next_tile_to_water.is_none()));
    }

    #[test]
    fn full_water_floods_every_tile() {
        let mut tiles = chain(5);
        find_water(&mut tiles, 1.0, 1.0, 0.0);
        assert!(tiles.iter().all(Tile::is_ocean));
    }

    #[test]
    fn peaks_never_overwrite_water() {
        let mut tiles = chain(8);
        find_water(&mut tiles, 0.5, 0.25, 0.0);
        let ocean = tiles.iter().filter(|t| t.is_ocean()).count();
        let peaks = tiles.iter().filter(|t| t.kind == Some(TileKind::Peak)).count();
        assert_eq!((ocean, peaks), (4, 4));
    }

    #[test]
    fn poles_favour_water() {
        // equal heights, the polar tile ranks lowest
        let mut tiles = vec![
            Tile {
                center: Vec3::X,
                height: 1.0,
                ..Default::default()
            },
            Tile {
                center: Vec3::new(0.0, 0.1, 1.0),
                height: 1.0,
                ..Default::default()
            },
        ];
        find_water(&mut tiles, 0.5, 1.0, 0.0);
        assert_eq!(tiles[1].kind, Some(TileKind::DeepOcean));
        assert_eq!(tiles[0].kind, None);
    }

    #[rstest]
    #[case(0.1, 0.3)]
    #[case(0.3, 0.7)]
    #[case(0.5, 0.9)]
    fn more_water_keeps_existing_water(#[case] low: f32, #[case] high: f32) {
        let mut a = chain(30);
        let mut b = chain(30);
        find_water(&mut a, low, 1.0, 22.5);
        find_water(&mut b, high, 1.0, 22.5);
        for (x, y) in a.iter().zip(&b) {
            if x.is_ocean() {
                assert!(y.is_ocean());
            }
        }
    }
}
