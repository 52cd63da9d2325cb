use crate::tile::TileKind;

/// Vertical scale applied to the fractal noise when sampling tile height.
pub const HEIGHT_SCALE: f32 = 10.0;

/// Jitter amplitude at order 0; halves with every subdivision.
pub const JITTER_AMPLITUDE: f32 = 0.15;

/// Default RGBA colour per [`TileKind`], indexed by palette index.
/// The last slot is used for tiles no pass has classified.
pub const PALETTE: [[f32; 4]; TileKind::COUNT + 1] = [
    [0.0, 0.102, 0.2, 1.0],     // deep ocean
    [0.0, 0.4, 0.8, 1.0],       // shallow ocean
    [0.627, 0.565, 0.467, 1.0], // beach
    [0.780, 0.733, 0.333, 1.0], // desert
    [0.388, 0.447, 0.314, 1.0], // tundra
    [0.518, 0.553, 0.243, 1.0], // steppe
    [0.2, 0.467, 0.333, 1.0],   // forest
    [0.082, 0.235, 0.157, 1.0], // rain forest
    [0.588, 0.6, 0.592, 1.0],   // peak
    [1.0, 1.0, 1.0, 1.0],       // snow
    [0.894, 0.894, 0.894, 1.0], // snow peak
    [0.773, 0.859, 0.945, 1.0], // ice
    [1.0, 0.0, 1.0, 1.0],       // unclassified
];

/// Per-plate tint for debug views, cycled by plate index.
pub const DEBUG_COLORS: &[[f32; 4]] = &[
    [1.0, 0.0, 0.0, 1.0], // red
    [0.0, 1.0, 0.0, 1.0], // green
    [0.0, 0.0, 1.0, 1.0], // blue
    [1.0, 1.0, 0.0, 1.0], // yellow
    [1.0, 0.0, 1.0, 1.0], // magenta
    [0.0, 1.0, 1.0, 1.0], // cyan
    [1.0, 0.5, 0.0, 1.0], // orange
    [0.5, 0.0, 1.0, 1.0], // violet
    [0.0, 0.5, 1.0, 1.0], // sky blue
    [0.5, 1.0, 0.0, 1.0], // lime
];

// Empirical pressure model coefficients. Tuned by hand, kept as-is.
pub const PRESSURE_HEAT_COEFF: f32 = 0.287;
pub const PRESSURE_HEAT_DIVISOR: f32 = 5.0;
pub const PRESSURE_ALTITUDE_COEFF: f32 = 6.87535e-6;
pub const FEET_PER_UNIT: f32 = 3281.0;
pub const PRESSURE_ALTITUDE_EXPONENT: f32 = 5.2561;
pub const PRESSURE_ALTITUDE_DIVISOR: f32 = 30.0;
/// Number of high/low pressure belts per half turn.
pub const PRESSURE_BELTS: f32 = 6.0;

/// Colour for a tile kind, falling back to the unclassified slot.
pub fn kind_color(kind: Option<TileKind>) -> [f32; 4] {
    PALETTE[TileKind::palette_index(kind) as usize]
}

pub fn plate_color(plate_index: usize) -> [f32; 4] {
    DEBUG_COLORS[plate_index % DEBUG_COLORS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_a_slot_per_kind_plus_unclassified() {
        assert_eq!(kind_color(Some(TileKind::Snow)), [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(kind_color(None), PALETTE[TileKind::COUNT]);
    }

    #[test]
    fn plate_colors_cycle() {
        assert_eq!(plate_color(0), plate_color(DEBUG_COLORS.len()));
    }
}
