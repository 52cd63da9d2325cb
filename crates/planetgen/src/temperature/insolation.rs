//! Mean annual insolation by latitude.
//!
//! Even Legendre polynomials of the axial tilt and of the sine of latitude give a
//! closed-form approximation of the yearly averaged solar intensity, normalised so
//! that the planetary mean is 1.

pub fn p2(x: f32) -> f32 {
    (3.0 * x * x - 1.0) / 2.0
}

pub fn p4(x: f32) -> f32 {
    let x2 = x * x;
    (35.0 * x2 * x2 - 30.0 * x2 + 3.0) / 8.0
}

pub fn p6(x: f32) -> f32 {
    let x2 = x * x;
    (231.0 * x2 * x2 * x2 - 315.0 * x2 * x2 + 105.0 * x2 - 5.0) / 16.0
}

/// Relative yearly insolation.
///
/// # Arguments
/// * `sin_latitude` - Sine of the latitude
/// * `tilt` - Axial tilt in radians
pub fn annual_insolation(sin_latitude: f32, tilt: f32) -> f32 {
    let b = tilt.cos();
    1.0 - 5.0 * p2(b) * p2(sin_latitude) / 8.0
        - 9.0 * p4(b) * p4(sin_latitude) / 64.0
        - 65.0 * p6(b) * p6(sin_latitude) / 1024.0
}
