use crate::icosphere::Icosphere;
use crate::tile::{NO_PLATE, Tile, TileKind};
use crate::tools::normalize_min_max;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Per-tile scalar shown on top of the terrain palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Height,
    WaterDistance,
    TectonicPlates,
    Temperature,
    Pressure,
    /// Pressure scalar plus the wind arrow field.
    MacroWind,
    WindStepToMountain,
    Humidity,
    HeatQuantity,
}

impl Overlay {
    pub const ALL: [Overlay; 10] = [
        Overlay::None,
        Overlay::Height,
        Overlay::WaterDistance,
        Overlay::TectonicPlates,
        Overlay::Temperature,
        Overlay::Pressure,
        Overlay::MacroWind,
        Overlay::WindStepToMountain,
        Overlay::Humidity,
        Overlay::HeatQuantity,
    ];

    /// Whether the renderer should also draw [`crate::arrows::wind_arrows`].
    pub fn shows_vector_field(self) -> bool {
        self == Overlay::MacroWind
    }
}

/// GPU-ready vertex. Three consecutive vertices make one tile.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Overlay value, normalised to [0, 1].
    pub scalar: f32,
    pub palette_index: u32,
    /// Corner of the triangle this vertex is (0, 1 or 2).
    pub corner: u32,
}

/// Raw mesh data that can be used by any rendering engine
#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
}

impl Mesh {
    /// Unrolls the icosphere into a flat vertex list with one flat-shaded triangle per tile.
    pub fn from_icosphere(sphere: &Icosphere) -> Self {
        let mut vertices = Vec::with_capacity(sphere.triangle_count() * 3);

        for t in 0..sphere.triangle_count() {
            let [a, b, c] = sphere.corners(t);
            let center = (a + b + c) / 3.0;

            // face the normal away from the planet whatever the winding
            let mut normal = (b - a).cross(c - a).normalize_or_zero();
            if normal.dot(center) < 0.0 {
                normal = -normal;
            }

            for (corner, p) in [a, b, c].into_iter().enumerate() {
                vertices.push(Vertex {
                    position: p.to_array(),
                    normal: normal.to_array(),
                    scalar: 0.0,
                    palette_index: TileKind::palette_index(None),
                    corner: corner as u32,
                });
            }
        }

        Self { vertices }
    }

    pub fn tile_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Centroid of tile `t`, not pushed back onto the sphere.
    pub fn tile_center(&self, t: usize) -> Vec3 {
        let [a, b, c] = [0, 1, 2].map(|k| Vec3::from(self.vertices[t * 3 + k].position));
        (a + b + c) / 3.0
    }

    /// Rewrites the palette index and overlay scalar of every vertex from the tile data.
    ///
    /// # Arguments
    /// * `tiles` - Tile graph, one entry per triangle of this mesh
    /// * `overlay` - Which tile field drives the scalar
    /// * `plate_count` - Number of plates, used to spread plate indices over [0, 1]
    pub fn refresh(&mut self, tiles: &[Tile], overlay: Overlay, plate_count: usize) {
        let scalars = overlay_scalars(tiles, overlay, plate_count);

        for (i, vertex) in self.vertices.iter_mut().enumerate() {
            let tile = i / 3;
            vertex.palette_index = TileKind::palette_index(tiles[tile].kind);
            vertex.scalar = scalars[tile];
        }
    }

    /// Vertex buffer as bytes, ready for upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// One normalised overlay value per tile.
pub fn overlay_scalars(tiles: &[Tile], overlay: Overlay, plate_count: usize) -> Vec<f32> {
    match overlay {
        Overlay::None => vec![0.0; tiles.len()],
        Overlay::Height => normalized(tiles, |t| t.height),
        Overlay::Temperature => normalized(tiles, |t| t.year_temperature),
        Overlay::Pressure | Overlay::MacroWind => normalized(tiles, |t| t.base_pressure),
        Overlay::WindStepToMountain => normalized(tiles, |t| t.wind_step_to_mountain),
        Overlay::Humidity => normalized(tiles, |t| t.humidity),
        Overlay::HeatQuantity => normalized(tiles, |t| t.heat_quantity),
        Overlay::WaterDistance => {
            let max_distance = tiles.iter().filter_map(|t| t.distance_to_water).max().unwrap_or(0);
            tiles
                .iter()
                .map(|t| match t.distance_to_water {
                    None => 1.0,
                    Some(_) if max_distance == 0 => 0.0,
                    Some(d) => d as f32 / max_distance as f32,
                })
                .collect()
        }
        Overlay::TectonicPlates => tiles
            .iter()
            .map(|t| {
                if t.plate_index == NO_PLATE || plate_count == 0 {
                    0.0
                } else {
                    t.plate_index as f32 / plate_count as f32
                }
            })
            .collect(),
    }
}

/// Min-max normalisation; a flat field maps to 0.5.
fn normalized(tiles: &[Tile], field: impl Fn(&Tile) -> f32) -> Vec<f32> {
    let mut values: Vec<f32> = tiles.iter().map(field).collect();
    normalize_min_max(&mut values);
    values
}
