use crate::constants::JITTER_AMPLITUDE;
use crate::tile::NO_TILE;
use glam::Vec3;
use rand::Rng;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Index-based triangulated sphere built by subdividing an icosahedron.
#[derive(Debug, Clone)]
pub struct Icosphere {
    /// Shared vertex positions, unit length after [`Icosphere::build`].
    pub positions: Vec<Vec3>,
    /// Vertex indices of each triangle.
    pub triangles: Vec<[u32; 3]>,
}

const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [11, 10, 2],
    [5, 11, 4],
    [1, 5, 9],
    [7, 1, 8],
    [10, 7, 6],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [9, 8, 1],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
];

impl Icosphere {
    /// Regular icosahedron with 12 unit vertices and 20 faces.
    pub fn icosahedron() -> Self {
        let f = (1.0 + 5f32.sqrt()) / 2.0;
        let positions = [
            Vec3::new(-1.0, f, 0.0),
            Vec3::new(1.0, f, 0.0),
            Vec3::new(-1.0, -f, 0.0),
            Vec3::new(1.0, -f, 0.0),
            Vec3::new(0.0, -1.0, f),
            Vec3::new(0.0, 1.0, f),
            Vec3::new(0.0, -1.0, -f),
            Vec3::new(0.0, 1.0, -f),
            Vec3::new(f, 0.0, -1.0),
            Vec3::new(f, 0.0, 1.0),
            Vec3::new(-f, 0.0, -1.0),
            Vec3::new(-f, 0.0, 1.0),
        ]
        .into_iter()
        .map(Vec3::normalize)
        .collect();

        Self {
            positions,
            triangles: ICOSAHEDRON_FACES.to_vec(),
        }
    }

    /// Builds a jittered icosphere with `20 * 4^order` triangles.
    ///
    /// # Arguments
    /// * `order` - Number of subdivision rounds
    /// * `rng` - Source of the per-vertex jitter, three draws per vertex
    pub fn build(order: usize, rng: &mut impl Rng) -> Self {
        let mut sphere = Self::icosahedron();
        for _ in 0..order {
            sphere.subdivide();
        }
        sphere.jitter(JITTER_AMPLITUDE / 2f32.powi(order as i32), rng);
        sphere
    }

    /// Splits every triangle into four, sharing each edge midpoint between both faces of the edge.
    pub fn subdivide(&mut self) {
        let old = std::mem::take(&mut self.triangles);
        let mut midpoints: HashMap<(u32, u32), u32> = HashMap::with_capacity(old.len() * 3 / 2);
        let mut triangles = Vec::with_capacity(old.len() * 4);

        for [v1, v2, v3] in old {
            let a = self.midpoint(&mut midpoints, v1, v2);
            let b = self.midpoint(&mut midpoints, v2, v3);
            let c = self.midpoint(&mut midpoints, v3, v1);

            triangles.push([v1, a, c]);
            triangles.push([v2, b, a]);
            triangles.push([v3, c, b]);
            triangles.push([a, b, c]);
        }

        self.triangles = triangles;
    }

    fn midpoint(&mut self, cache: &mut HashMap<(u32, u32), u32>, a: u32, b: u32) -> u32 {
        match cache.entry(edge_key(a, b)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let mid = ((self.positions[a as usize] + self.positions[b as usize]) * 0.5).normalize_or_zero();
                let index = self.positions.len() as u32;
                self.positions.push(mid);
                *e.insert(index)
            }
        }
    }

    /// Pushes every vertex along a random direction, then back onto the unit sphere.
    fn jitter(&mut self, amplitude: f32, rng: &mut impl Rng) {
        for p in &mut self.positions {
            let offset = Vec3::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            )
            .normalize_or_zero();
            let moved = (*p + offset * amplitude).normalize_or_zero();
            if moved != Vec3::ZERO {
                *p = moved;
            }
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Corner positions of triangle `t`.
    pub fn corners(&self, t: usize) -> [Vec3; 3] {
        self.triangles[t].map(|v| self.positions[v as usize])
    }

    /// Finds, for every triangle, the triangle across each of its edges.
    ///
    /// Slot 0 is the edge (a, b), slot 1 is (b, c), slot 2 is (c, a). The first triangle
    /// to see an edge records it; the second one links both sides.
    pub fn link_neighbors(&self) -> Vec<[usize; 3]> {
        let mut neighbors = vec![[NO_TILE; 3]; self.triangles.len()];
        let mut edge_owner: HashMap<(u32, u32), (usize, usize)> = HashMap::with_capacity(self.triangles.len() * 3 / 2);

        for (t, &[a, b, c]) in self.triangles.iter().enumerate() {
            for (slot, (u, v)) in [(a, b), (b, c), (c, a)].into_iter().enumerate() {
                if u == v {
                    continue;
                }
                match edge_owner.entry(edge_key(u, v)) {
                    Entry::Occupied(e) => {
                        let (other, other_slot) = *e.get();
                        neighbors[t][slot] = other;
                        neighbors[other][other_slot] = t;
                    }
                    Entry::Vacant(e) => {
                        e.insert((t, slot));
                    }
                }
            }
        }

        neighbors
    }
}

/// Order-independent key for the edge between two vertices.
fn edge_key(a: u32, b: u32) -> (u32, u32) {
    if a < b { (a, b) } else { (b, a) }
}
