pub mod clock;
pub mod config;
pub mod driver;
pub mod gpu;
pub mod grid;
pub mod palette;
pub mod points;
pub mod scene;
pub mod variants;
pub mod wave;

pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");

pub use clock::*;
pub use config::*;
pub use driver::*;
pub use gpu::*;
pub use grid::*;
pub use palette::*;
pub use points::*;
pub use scene::*;
pub use wave::*;
