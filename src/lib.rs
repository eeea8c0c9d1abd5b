//! panelfig - multi-panel scientific figure layout
//!
//! Arranges calibrated images in a grid and renders them to a paginated
//! vector document:
//! - Per-column/row real-world extents and one figure-wide scale
//! - Rows flowing onto extra pages when they don't fit
//! - Row/column headers, a title, panel labels, image titles and scale bars
//! - Pluggable drawing surfaces (SVG pages, in-memory recording)
//!
//! # Usage
//!
//! ```no_run
//! use panelfig::{Figure, ResizePolicy, SourceImage, Calibration};
//! use panelfig::render::SvgDocument;
//!
//! let mut figure = Figure::new();
//! figure.set_title("Cells");
//! figure.set_column_header(0, "DAPI");
//! let image = SourceImage::new("dapi", 512, 512).with_calibration(Calibration {
//!     pixel_width: 0.1,
//!     pixel_height: 0.1,
//!     unit: "um".to_string(),
//! });
//! figure.add_image(0, 0, image, ResizePolicy::MatchMagnification);
//!
//! let doc = figure.export(&mut SvgDocument::new())?;
//! let zip = panelfig::export::write_bundle(&doc)?;
//! # Ok::<(), panelfig::FigureError>(())
//! ```

pub mod color;
pub mod description;
pub mod error;
pub mod export;
pub mod figure;
pub mod grid;
pub mod labels;
pub mod layout;
pub mod render;
pub mod types;

pub use color::Rgb;
pub use description::FigureDescription;
pub use error::{FigureError, Result};
pub use figure::Figure;
pub use grid::{Header, PanelCell, PanelGrid};
pub use labels::{label_text, PanelLabel};
pub use layout::{compute_layout, FigureLayout};
pub use types::*;

/// Library version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
