use glam::Vec3;
use serde::{Deserialize, Serialize};

/// "No neighbour" marker in [`Tile::neighbors`].
pub const NO_TILE: usize = usize::MAX;
/// Plate index of a tile no plate has claimed yet.
pub const NO_PLATE: usize = usize::MAX;

/// Terrain category of a tile. Discriminants double as palette indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TileKind {
    DeepOcean = 0,
    ShallowOcean = 1,
    Beach = 2,
    Desert = 3,
    Tundra = 4,
    Steppe = 5,
    Forest = 6,
    RainForest = 7,
    Peak = 8,
    Snow = 9,
    SnowPeak = 10,
    Ice = 11,
}

impl TileKind {
    pub const COUNT: usize = 12;

    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::DeepOcean,
        TileKind::ShallowOcean,
        TileKind::Beach,
        TileKind::Desert,
        TileKind::Tundra,
        TileKind::Steppe,
        TileKind::Forest,
        TileKind::RainForest,
        TileKind::Peak,
        TileKind::Snow,
        TileKind::SnowPeak,
        TileKind::Ice,
    ];

    pub fn is_ocean(self) -> bool {
        matches!(self, TileKind::DeepOcean | TileKind::ShallowOcean)
    }

    pub fn name(self) -> &'static str {
        match self {
            TileKind::DeepOcean => "deep ocean",
            TileKind::ShallowOcean => "shallow ocean",
            TileKind::Beach => "beach",
            TileKind::Desert => "desert",
            TileKind::Tundra => "tundra",
            TileKind::Steppe => "steppe",
            TileKind::Forest => "forest",
            TileKind::RainForest => "rain forest",
            TileKind::Peak => "peak",
            TileKind::Snow => "snow",
            TileKind::SnowPeak => "snow peak",
            TileKind::Ice => "ice",
        }
    }

    /// Palette slot for an optional kind; unclassified tiles use the slot after the last kind.
    pub fn palette_index(kind: Option<TileKind>) -> u32 {
        kind.map_or(Self::COUNT as u32, |k| k as u32)
    }
}

/// One mesh triangle and all simulation state attached to it.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    /// Centroid of the triangle's corners, not renormalised.
    pub center: Vec3,
    /// Elevation delta from the planet radius.
    pub height: f32,
    /// Mean yearly temperature in celsius.
    pub year_temperature: f32,
    pub heat_quantity: f32,
    pub base_pressure: f32,
    pub humidity: f32,
    /// Unit direction of the prevailing wind (zero when there is no gradient).
    pub macro_wind: Vec3,
    /// `None` until a pass classifies the tile.
    pub kind: Option<TileKind>,
    /// Graph distance to the nearest water tile, `None` when no water is reachable.
    pub distance_to_water: Option<usize>,
    /// Next step on a shortest path toward water.
    pub next_tile_to_water: Option<usize>,
    /// Neighbours across edges (a-b, b-c, c-a); [`NO_TILE`] marks a missing one.
    pub neighbors: [usize; 3],
    pub plate_index: usize,
    /// Share of upwind air that crossed a mountain, normalised to [0, 1].
    pub wind_step_to_mountain: f32,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            center: Vec3::ZERO,
            height: 0.0,
            year_temperature: 0.0,
            heat_quantity: 0.0,
            base_pressure: 0.0,
            humidity: 0.0,
            macro_wind: Vec3::ZERO,
            kind: None,
            distance_to_water: None,
            next_tile_to_water: None,
            neighbors: [NO_TILE; 3],
            plate_index: NO_PLATE,
            wind_step_to_mountain: 0.0,
        }
    }
}

impl Tile {
    pub fn new(center: Vec3) -> Self {
        Self {
            center,
            ..Default::default()
        }
    }

    /// Existing neighbours, in slot order.
    pub fn neighbors(&self) -> impl Iterator<Item = usize> + '_ {
        self.neighbors.iter().copied().filter(|&n| n != NO_TILE)
    }

    pub fn is_ocean(&self) -> bool {
        self.kind.is_some_and(TileKind::is_ocean)
    }
}

/// Unit direction from tile `from` toward tile `to`; zero if the centers coincide.
pub fn direction_between(tiles: &[Tile], from: usize, to: usize) -> Vec3 {
    (tiles[to].center - tiles[from].center).normalize_or_zero()
}

/// Links two tiles through the given slots. Used to hand-build graphs.
pub fn link(tiles: &mut [Tile], a: usize, slot_a: usize, b: usize, slot_b: usize) {
    tiles[a].neighbors[slot_a] = b;
    tiles[b].neighbors[slot_b] = a;
}
