use crate::constants::plate_color;
use crate::tile::{NO_PLATE, NO_TILE, Tile};
use glam::{Quat, Vec3};
use log::debug;
use rand::Rng;
use std::f32::consts::{PI, TAU};

/// Rigid tangential motion shared by every tile of a plate.
#[derive(Debug, Clone, PartialEq)]
pub struct Plate {
    pub id: usize,
    /// Motion direction in the tile-local tangent frame, radians.
    pub angle: f32,
    pub speed: f32,
    /// Grows once every `growth_weight` flood-fill rounds.
    pub growth_weight: usize,
    pub debug_color: [f32; 4],
}

impl Plate {
    /// Unit tangent direction of this plate's motion at a point on the sphere.
    ///
    /// The planar direction `(cos angle, sin angle, 0)` is carried from the north pole
    /// onto the tangent plane at `position`.
    pub fn direction_at(&self, position: Vec3) -> Vec3 {
        let local = Vec3::new(self.angle.cos(), self.angle.sin(), 0.0);
        Quat::from_rotation_arc(Vec3::Z, position.normalize_or_zero()) * local
    }
}

/// `n` evenly spread directions on the unit sphere.
pub fn fibonacci_sphere(n: usize) -> Vec<Vec3> {
    let golden_angle = PI * (5f32.sqrt() - 1.0);
    let denom = (n.max(2) - 1) as f32;

    (0..n)
        .map(|i| {
            let y = 1.0 - (i as f32 / denom) * 2.0;
            let t = golden_angle * i as f32;
            let r = (1.0 - y * y).max(0.0).sqrt();
            Vec3::new(t.cos() * r, y, t.sin() * r).normalize_or_zero()
        })
        .collect()
}

/// Unclaimed tile whose center is best aligned with `direction`.
fn nearest_unclaimed_tile(tiles: &[Tile], direction: Vec3) -> Option<usize> {
    let mut best = None;
    let mut best_dot = f32::MIN;
    for (i, tile) in tiles.iter().enumerate() {
        if tile.plate_index != NO_PLATE {
            continue;
        }
        let d = direction.dot(tile.center);
        if d > best_dot {
            best_dot = d;
            best = Some(i);
        }
    }
    best
}

/// Slowdown weight: 1 in 75% of plates, 2 in 20%, 3 in 5%.
fn growth_weight(rng: &mut impl Rng) -> usize {
    let u: f32 = rng.random();
    if u < 0.05 {
        3
    } else if u < 0.25 {
        2
    } else {
        1
    }
}

/// Partitions the tile graph into `count` plates and gives each a random motion.
///
/// Seeds sit on a Fibonacci sphere. All plates then grow at once, one FIFO step per
/// round, a plate only growing on rounds divisible by its weight. A tile belongs to the
/// first plate that reaches it.
///
/// # Arguments
/// * `tiles` - Tile graph; every `plate_index` is overwritten
/// * `count` - Number of plates to create
/// * `plate_speed` - Upper bound of the random plate speed
/// * `rng` - Draws one weight per plate, then `(speed, angle)` per plate
///
/// # Returns
/// The plates, indexed by `Tile::plate_index`.
pub fn grow_plates(tiles: &mut [Tile], count: usize, plate_speed: f32, rng: &mut impl Rng) -> Vec<Plate> {
    for tile in tiles.iter_mut() {
        tile.plate_index = NO_PLATE;
    }

    let mut open_lists: Vec<Vec<usize>> = vec![Vec::new(); count];
    let mut cursors = vec![0usize; count];

    for (plate_idx, direction) in fibonacci_sphere(count).into_iter().enumerate() {
        if let Some(seed) = nearest_unclaimed_tile(tiles, direction) {
            tiles[seed].plate_index = plate_idx;
            open_lists[plate_idx].push(seed);
        }
    }

    let weights: Vec<usize> = (0..count).map(|_| growth_weight(rng)).collect();

    let mut iteration = 0usize;
    while open_lists.iter().zip(&cursors).any(|(list, &cursor)| cursor < list.len()) {
        for plate_idx in 0..count {
            if cursors[plate_idx] >= open_lists[plate_idx].len() || iteration % weights[plate_idx] != 0 {
                continue;
            }

            let current = open_lists[plate_idx][cursors[plate_idx]];
            cursors[plate_idx] += 1;

            for n in tiles[current].neighbors {
                if n != NO_TILE && tiles[n].plate_index == NO_PLATE {
                    tiles[n].plate_index = plate_idx;
                    open_lists[plate_idx].push(n);
                }
            }
        }
        iteration += 1;
    }
    debug!("plates grown in {iteration} rounds");

    (0..count)
        .map(|id| {
            let r: f32 = rng.random();
            let t: f32 = rng.random();
            Plate {
                id,
                angle: t * TAU,
                speed: r * plate_speed,
                growth_weight: weights[id],
                debug_color: plate_color(id),
            }
        })
        .collect()
}

/// Number of tiles owned by each plate. Unassigned tiles are not counted.
pub fn tiles_per_plate(tiles: &[Tile], plate_count: usize) -> Vec<usize> {
    let mut counts = vec![0usize; plate_count];
    for tile in tiles {
        if let Some(c) = counts.get_mut(tile.plate_index) {
            *c += 1;
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icosphere::Icosphere;
    use crate::tile::link;
    use crate::tools::Xorshift128Plus;
    use rand::SeedableRng;
    use rstest::rstest;
    use std::collections::VecDeque;

    fn sphere_tiles(order: usize) -> Vec<Tile> {
        let mut rng = Xorshift128Plus::seed_from_u64(11);
        let sphere = Icosphere::build(order, &mut rng);
        let neighbors = sphere.link_neighbors();
        (0..sphere.triangle_count())
            .map(|t| {
                let [a, b, c] = sphere.corners(t);
                Tile {
                    center: (a + b + c) / 3.0,
                    neighbors: neighbors[t],
                    ..Default::default()
                }
            })
            .collect()
    }

    #[test]
    fn fibonacci_points_are_unit_and_start_at_the_pole() {
        let points = fibonacci_sphere(10);
        assert_eq!(points.len(), 10);
        assert!((points[0] - Vec3::Y).length() < 1e-6);
        assert!((points[9] - Vec3::NEG_Y).length() < 1e-3);
        for p in points {
            assert!((p.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn single_plate_point_does_not_divide_by_zero() {
        let points = fibonacci_sphere(1);
        assert!(points[0].is_finite());
    }

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(50)]
    fn every_tile_gets_a_plate(#[case] count: usize) {
        let mut tiles = sphere_tiles(2);
        let mut rng = Xorshift128Plus::seed_from_u64(3);
        let plates = grow_plates(&mut tiles, count, 4.0, &mut rng);

        assert_eq!(plates.len(), count);
        assert!(tiles.iter().all(|t| t.plate_index < count));
        assert_eq!(tiles_per_plate(&tiles, count).iter().sum::<usize>(), tiles.len());
    }

    #[test]
    fn plates_are_contiguous() {
        let mut tiles = sphere_tiles(2);
        let mut rng = Xorshift128Plus::seed_from_u64(8);
        grow_plates(&mut tiles, 6, 4.0, &mut rng);

        for plate in 0..6 {
            let members: Vec<usize> = (0..tiles.len()).filter(|&i| tiles[i].plate_index == plate).collect();
            let Some(&start) = members.first() else { continue };

            let mut seen = vec![false; tiles.len()];
            let mut queue = VecDeque::from([start]);
            seen[start] = true;
            let mut reached = 0;
            while let Some(i) = queue.pop_front() {
                reached += 1;
                for n in tiles[i].neighbors() {
                    if !seen[n] && tiles[n].plate_index == plate {
                        seen[n] = true;
                        queue.push_back(n);
                    }
                }
            }
            assert_eq!(reached, members.len(), "plate {plate} is split");
        }
    }

    #[test]
    fn more_plates_than_tiles_leaves_some_empty() {
        let mut tiles = vec![Tile::default(), Tile::default()];
        link(&mut tiles, 0, 0, 1, 0);
        let mut rng = Xorshift128Plus::seed_from_u64(1);
        let plates = grow_plates(&mut tiles, 5, 1.0, &mut rng);

        assert_eq!(plates.len(), 5);
        let counts = tiles_per_plate(&tiles, 5);
        assert_eq!(counts.iter().sum::<usize>(), 2);
        assert_eq!(counts.iter().filter(|&&c| c == 1).count(), 2);
    }

    #[test]
    fn isolated_tiles_stay_with_their_seed_or_unassigned() {
        let mut tiles = vec![Tile::new(Vec3::Y), Tile::new(Vec3::NEG_Y)];
        assert_eq!(tiles[0].neighbors, [NO_TILE; 3]);
        let mut rng = Xorshift128Plus::seed_from_u64(1);
        grow_plates(&mut tiles, 1, 1.0, &mut rng);
        assert_eq!(tiles[0].plate_index, 0);
        assert_eq!(tiles[1].plate_index, NO_PLATE);
    }

    #[test]
    fn motion_is_bounded_by_plate_speed() {
        let mut tiles = sphere_tiles(1);
        let mut rng = Xorshift128Plus::seed_from_u64(21);
        for plate in grow_plates(&mut tiles, 10, 2.5, &mut rng) {
            assert!((0.0..2.5).contains(&plate.speed));
            assert!((0.0..TAU).contains(&plate.angle));
            assert!([1, 2, 3].contains(&plate.growth_weight));
        }
    }

    #[test]
    fn same_seed_same_partition() {
        let mut a = sphere_tiles(2);
        let mut b = sphere_tiles(2);
        let pa = grow_plates(&mut a, 12, 4.0, &mut Xorshift128Plus::seed_from_u64(99));
        let pb = grow_plates(&mut b, 12, 4.0, &mut Xorshift128Plus::seed_from_u64(99));
        assert_eq!(pa, pb);
        assert!(a.iter().zip(&b).all(|(x, y)| x.plate_index == y.plate_index));
    }

    #[test]
    fn direction_is_tangent_to_the_sphere() {
        let plate = Plate {
            id: 0,
            angle: 0.7,
            speed: 1.0,
            growth_weight: 1,
            debug_color: plate_color(0),
        };
        let p = Vec3::new(0.3, -0.5, 0.8).normalize();
        let d = plate.direction_at(p);
        assert!(d.dot(p).abs() < 1e-5);
        assert!((d.length() - 1.0).abs() < 1e-5);
    }
}
