//! Terrain classification from accumulated tile attributes.
//!
//! A coarse pass right after water placement sorts land into beach and forest by
//! distance to the sea. The final pass refines that with temperature and humidity.

use crate::config::BiomeThresholds;
use crate::tile::{Tile, TileKind};

/// Land within this many hops of water is beach.
pub const BEACH_DISTANCE: usize = 3;

/// Classifies tiles the water pass left unset: beach near water, forest elsewhere,
/// including tiles from which no water can be reached.
pub fn categorize_tiles(tiles: &mut [Tile]) {
    for tile in tiles.iter_mut().filter(|t| t.kind.is_none()) {
        tile.kind = match tile.distance_to_water {
            Some(d) if (1..BEACH_DISTANCE).contains(&d) => Some(TileKind::Beach),
            Some(0) => None,
            _ => Some(TileKind::Forest),
        };
    }
}

/// Final kind of one tile; the first matching rule wins.
pub fn classify_tile(tile: &Tile, t: &BiomeThresholds) -> Option<TileKind> {
    let temp = tile.year_temperature;

    match tile.kind {
        Some(TileKind::DeepOcean) => {
            return if temp < t.max_ice_temp { Some(TileKind::Snow) } else { tile.kind };
        }
        Some(TileKind::ShallowOcean) => {
            return if temp < t.max_snow_temp { Some(TileKind::Ice) } else { tile.kind };
        }
        _ => {}
    }

    if temp < t.max_snow_temp {
        return Some(TileKind::Snow);
    }

    match tile.kind {
        Some(TileKind::Beach) => tile.kind,
        Some(TileKind::Peak) => {
            if tile.height * t.snow_peak_factor > temp {
                Some(TileKind::SnowPeak)
            } else {
                tile.kind
            }
        }
        _ if tile.humidity < t.humidity_desert => {
            if temp > t.min_temp_desert {
                Some(TileKind::Desert)
            } else if temp < t.max_temp_tundra {
                Some(TileKind::Tundra)
            } else {
                tile.kind
            }
        }
        _ if tile.humidity < t.humidity_steppe => Some(TileKind::Steppe),
        _ if tile.humidity > t.humidity_rainforest => Some(TileKind::RainForest),
        _ => tile.kind,
    }
}

pub fn final_categorize_tiles(tiles: &mut [Tile], thresholds: &BiomeThresholds) {
    for tile in tiles.iter_mut() {
        tile.kind = classify_tile(tile, thresholds);
    }
}

/// Number of tiles of each kind, indexed by palette index (last slot: unclassified).
pub fn kind_histogram(tiles: &[Tile]) -> [usize; TileKind::COUNT + 1] {
    let mut counts = [0usize; TileKind::COUNT + 1];
    for tile in tiles {
        counts[TileKind::palette_index(tile.kind) as usize] += 1;
    }
    counts
}
