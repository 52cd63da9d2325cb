pub mod arrows;
pub mod biome;
pub mod boundaries;
pub mod config;
pub mod constants;
pub mod elevation;
pub mod error;
pub mod generator;
pub mod humidity;
pub mod icosphere;
pub mod mesh_data;
pub mod noise_field;
pub mod pipeline;
pub mod planet;
pub mod plate;
pub mod pressure;
pub mod temperature;
pub mod tile;
pub mod tools;
pub mod water;
pub mod wind;

pub use config::{BiomeThresholds, PlanetGenConfig};
pub use error::{ConfigError, PipelineError};
pub use generator::PlanetGenerator;
pub use mesh_data::{Mesh, Overlay, Vertex};
pub use planet::{Planet, PlanetStats};
pub use tile::{Tile, TileKind};
