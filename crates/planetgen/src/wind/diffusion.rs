//! Weighted breadth-first tracing of air parcels across the tile graph.
//!
//! A unit of weight starts on a seed tile and is handed on to the neighbours that lie
//! along the seed's wind direction, losing a fixed share per hop. Weight reaching a
//! sink tile is collected; weight falling under [`MIN_WEIGHT`] is dropped.

use crate::tile::{Tile, direction_between};

/// Parcels lighter than this are no longer followed.
pub const MIN_WEIGHT: f32 = 0.01;

/// Shape of one diffusion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionParams {
    /// Added to the alignment with the wind before clamping, so that side
    /// neighbours still receive some weight.
    pub bias: f32,
    /// Share of the weight kept on every hop.
    pub decay: f32,
}

impl DiffusionParams {
    /// Tracing air toward mountain ranges.
    pub const OROGRAPHIC: Self = Self {
        bias: 0.6,
        decay: 0.975,
    };
    /// Tracing moisture toward the sea.
    pub const MOISTURE: Self = Self {
        bias: 0.4,
        decay: 0.95,
    };

    /// Unnormalised share of the outflow for a neighbour with the given wind alignment.
    fn share(&self, alignment: f32) -> f32 {
        ((alignment + self.bias) / (1.0 + self.bias)).max(0.0)
    }
}

/// Scratch buffers reused across every seed of one pass.
pub struct WindDiffusion {
    open: Vec<usize>,
    weights: Vec<f32>,
}

impl WindDiffusion {
    pub fn new(tile_count: usize) -> Self {
        Self {
            open: Vec::new(),
            weights: vec![0.0; tile_count],
        }
    }

    /// Total weight that reaches a sink when a unit parcel leaves `seed`.
    ///
    /// Every hop follows the wind of the seed tile, not of the tile being left.
    pub fn run(&mut self, tiles: &[Tile], seed: usize, params: DiffusionParams, is_sink: impl Fn(&Tile) -> bool) -> f32 {
        let wind = tiles[seed].macro_wind;
        let mut sum = 0.0;

        self.open.clear();
        self.open.push(seed);
        self.weights[seed] = 1.0;

        let mut cursor = 0;
        while cursor < self.open.len() {
            let idx = self.open[cursor];
            cursor += 1;

            let w = std::mem::take(&mut self.weights[idx]);
            if w < MIN_WEIGHT {
                continue;
            }

            if is_sink(&tiles[idx]) {
                sum += w;
                continue;
            }

            let mut shares = [(0usize, 0.0f32); 3];
            let mut dsum = 0.0;
            for (slot, n) in tiles[idx].neighbors().enumerate() {
                let s = params.share(direction_between(tiles, idx, n).dot(wind));
                shares[slot] = (n, s);
                dsum += s;
            }
            if dsum <= 0.0 {
                continue;
            }

            for &(n, s) in &shares {
                if s > 0.0 {
                    self.weights[n] += w * s / dsum * params.decay;
                    self.open.push(n);
                }
            }
        }

        for &i in &self.open {
            self.weights[i] = 0.0;
        }

        sum
    }
}
