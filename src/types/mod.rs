//! Data types shared by the grid model, layout and rendering.

mod config;
mod geometry;
mod image;
mod style;

pub use config::*;
pub use geometry::*;
pub use image::*;
pub use style::*;
