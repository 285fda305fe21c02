pub mod error;
pub mod geometry;

pub use geometry::{LayoutStyle, OutputGeometry};
