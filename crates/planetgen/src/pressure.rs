//! Sea-level pressure model.
//!
//! Empirical mix of heat, a barometric falloff with altitude and a periodic
//! latitude/longitude term standing in for the semi-permanent pressure belts.

use crate::constants::{
    FEET_PER_UNIT, PRESSURE_ALTITUDE_COEFF, PRESSURE_ALTITUDE_DIVISOR, PRESSURE_ALTITUDE_EXPONENT,
    PRESSURE_BELTS, PRESSURE_HEAT_COEFF, PRESSURE_HEAT_DIVISOR,
};
use crate::tile::Tile;
use crate::tools::{latitude, rotation_axis, zero_longitude_axis};
use glam::Vec3;

/// Angle between the zero meridian and the meridian through `n`, in [0, pi].
/// Points on the spin axis have longitude 0.
pub fn longitude(axis: Vec3, zero: Vec3, n: Vec3) -> f32 {
    let projected = (n - axis * n.dot(axis)).normalize_or_zero();
    if projected == Vec3::ZERO {
        0.0
    } else {
        zero.angle_between(projected)
    }
}

/// Barometric-like falloff; only positive altitudes reduce it.
pub fn altitude_factor(height: f32) -> f32 {
    let x = (PRESSURE_ALTITUDE_COEFF * FEET_PER_UNIT * height.max(0.0)).clamp(0.0, 1.0);
    (1.0 - x).powf(PRESSURE_ALTITUDE_EXPONENT) / PRESSURE_ALTITUDE_DIVISOR
}

/// Pressure of one tile from its heat, height and position.
pub fn base_pressure(tile: &Tile, axis: Vec3, zero: Vec3) -> f32 {
    let n = tile.center.normalize_or_zero();
    let theta = latitude(axis, n);

    let y = 1.0 - (theta * PRESSURE_BELTS).cos();
    let x = (PRESSURE_BELTS * longitude(axis, zero, n)).cos();

    let p = PRESSURE_HEAT_COEFF * tile.heat_quantity / PRESSURE_HEAT_DIVISOR;
    let factor_lat_long = y * (theta.cos() * theta.cos() * 0.25 * x + 0.5);

    p * altitude_factor(tile.height) + factor_lat_long
}

pub fn fill_base_pressure(tiles: &mut [Tile], axial_tilt: f32) {
    let axis = rotation_axis(axial_tilt);
    let zero = zero_longitude_axis(axial_tilt);
    for tile in tiles.iter_mut() {
        tile.base_pressure = base_pressure(tile, axis, zero);
    }
}
