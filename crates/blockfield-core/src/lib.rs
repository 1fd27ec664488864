pub mod blocks;
pub mod camera;
pub mod config;
pub mod constants;
pub mod frame;
pub mod instances;
pub mod interaction;
pub mod particles;
pub mod picking;
pub mod scene;
pub mod stats;

#[cfg(feature = "gpu")]
pub mod render;

pub use blocks::*;
pub use camera::*;
pub use config::*;
pub use constants::*;
pub use frame::*;
pub use interaction::*;
pub use particles::*;
pub use picking::*;
pub use scene::*;
pub use stats::*;

#[cfg(feature = "gpu")]
pub use render::GpuState;
