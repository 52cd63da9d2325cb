use glam::{Quat, Vec3};
use rand::distr::Uniform;
use rand::{Rng, RngCore, SeedableRng};

/// Draws a fresh human-friendly seed (at most 8 decimal digits).
pub fn generate_seed8() -> u32 {
    let mut rng = rand::rng();
    rng.sample(Uniform::new(0u32, 100_000_000u32).unwrap())
}

pub fn expand_seed64(code: u32) -> u64 {
    splitmix64(code as u64)
}

pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

/// Planet spin axis: +Z tilted about +X by `axial_tilt` degrees.
pub fn rotation_axis(axial_tilt: f32) -> Vec3 {
    Quat::from_rotation_x(axial_tilt.to_radians()) * Vec3::Z
}

/// Direction of zero longitude, +X under the same tilt as [`rotation_axis`].
pub fn zero_longitude_axis(axial_tilt: f32) -> Vec3 {
    Quat::from_rotation_x(axial_tilt.to_radians()) * Vec3::X
}

/// Latitude of `position` in radians relative to the tilted spin axis, in [-pi/2, pi/2].
pub fn latitude(axis: Vec3, position: Vec3) -> f32 {
    let n = position.normalize_or_zero();
    if n == Vec3::ZERO {
        return 0.0;
    }
    std::f32::consts::FRAC_PI_2 - axis.angle_between(n)
}

/// Rescales `values` to [0, 1] in place. A flat input becomes 0.5 everywhere.
pub fn normalize_min_max(values: &mut [f32]) {
    let (min, max) = values
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let range = max - min;
    for v in values.iter_mut() {
        *v = if range > f32::EPSILON { (*v - min) / range } else { 0.5 };
    }
}

/// xorshift128+ generator.
///
/// Every stage that needs randomness receives this state by `&mut`, so a run is fully
/// determined by the seed it was created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift128Plus {
    s: [u64; 2],
}

impl Xorshift128Plus {
    /// Used when a caller hands over an all-zero state, which would only ever yield zeros.
    const FALLBACK_STATE: [u64; 2] = [1234, 5678];

    pub fn from_state(s: [u64; 2]) -> Self {
        if s == [0, 0] {
            Self {
                s: Self::FALLBACK_STATE,
            }
        } else {
            Self { s }
        }
    }

    pub fn state(&self) -> [u64; 2] {
        self.s
    }
}

impl RngCore for Xorshift128Plus {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        let mut s1 = self.s[0];
        let s0 = self.s[1];
        let result = s0.wrapping_add(s1);
        self.s[0] = s0;
        s1 ^= s1 << 23;
        self.s[1] = s1 ^ s0 ^ (s1 >> 18) ^ (s0 >> 5);
        result
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

impl SeedableRng for Xorshift128Plus {
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        Self::from_state([u64::from_le_bytes(lo), u64::from_le_bytes(hi)])
    }

    fn seed_from_u64(state: u64) -> Self {
        let a = splitmix64(state);
        let b = splitmix64(a);
        Self::from_state([a, b])
    }
}
