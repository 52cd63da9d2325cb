// Prevailing winds and the air-parcel tracing built on them

pub mod diffusion;
pub mod macro_wind;
pub mod orographic;

pub use diffusion::{DiffusionParams, WindDiffusion};
pub use macro_wind::{fill_macro_wind, macro_wind_at};
pub use orographic::{fill_wind_step_to_mountain, is_blocking};
