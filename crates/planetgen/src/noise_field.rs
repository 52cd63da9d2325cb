use glam::Vec3;
use noise::{NoiseFn, Perlin};

/// Deterministic scalar field sampled by the height pass.
pub trait NoiseOracle {
    fn sample(&self, p: Vec3) -> f32;

    /// Sum of `octaves` samples, each at `lacunarity` times the previous frequency and
    /// `roughness` times the previous amplitude, divided by the total amplitude.
    fn fractal_sample(&self, p: Vec3, octaves: usize, roughness: f32, lacunarity: f32) -> f32 {
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut sum = 0.0;
        let mut total = 0.0;
        for _ in 0..octaves {
            sum += amplitude * self.sample(p * frequency);
            total += amplitude;
            frequency *= lacunarity;
            amplitude *= roughness;
        }
        if total > 0.0 { sum / total } else { 0.0 }
    }
}

/// Perlin noise with a fixed permutation seed.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    perlin: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseOracle for PerlinNoise {
    fn sample(&self, p: Vec3) -> f32 {
        self.perlin.get([p.x as f64, p.y as f64, p.z as f64]) as f32
    }
}
