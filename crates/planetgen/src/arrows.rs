use crate::plate::Plate;
use crate::tile::Tile;
use glam::{Quat, Vec3};

/// Lift of wind arrows above the tile they belong to.
const WIND_ARROW_LIFT: f32 = 1.001;
const WIND_ARROW_SCALE: f32 = 0.003;
/// Plate arrows are larger and float higher than wind arrows.
const PLATE_ARROW_LIFT: f32 = 1.02;
const PLATE_ARROW_SCALE: f32 = 0.05;

/// Data needed to render one arrow instance on the planet surface
#[derive(Debug, Clone, PartialEq)]
pub struct ArrowInstance {
    pub position: Vec3,
    /// Unit direction the arrow points along; zero for a calm tile
    pub direction: Vec3,
    /// Outward surface normal at `position`
    pub up: Vec3,
    pub scale: f32,
}

impl ArrowInstance {
    /// Rotation taking a +Z arrow model onto `direction`.
    pub fn rotation(&self) -> Quat {
        if self.direction == Vec3::ZERO {
            Quat::IDENTITY
        } else {
            Quat::from_rotation_arc(Vec3::Z, self.direction)
        }
    }
}

/// One arrow per tile showing the prevailing wind.
pub fn wind_arrows(tiles: &[Tile]) -> Vec<ArrowInstance> {
    tiles
        .iter()
        .map(|tile| ArrowInstance {
            position: tile.center * WIND_ARROW_LIFT,
            direction: tile.macro_wind,
            up: tile.center.normalize_or_zero(),
            scale: WIND_ARROW_SCALE,
        })
        .collect()
}

/// Calculate arrow positions and orientations for all tectonic plates
///
/// Returns one arrow per plate that owns at least one tile, positioned above the
/// plate's mean tile center and pointing along the plate's motion there.
pub fn plate_arrows(tiles: &[Tile], plates: &[Plate]) -> Vec<ArrowInstance> {
    plates
        .iter()
        .filter_map(|plate| {
            let center = plate_center(tiles, plate.id)?;
            let up = center.normalize_or_zero();
            Some(ArrowInstance {
                position: up * PLATE_ARROW_LIFT,
                direction: plate.direction_at(center),
                up,
                scale: PLATE_ARROW_SCALE,
            })
        })
        .collect()
}

/// Mean center of every tile owned by `plate`, `None` when it owns nothing.
fn plate_center(tiles: &[Tile], plate: usize) -> Option<Vec3> {
    let (sum, count) = tiles
        .iter()
        .filter(|t| t.plate_index == plate)
        .fold((Vec3::ZERO, 0usize), |(s, c), t| (s + t.center, c + 1));

    (count > 0).then(|| sum / count as f32)
}
