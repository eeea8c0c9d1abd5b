//! Rendering with pluggable drawing surfaces.
//!
//! This module provides:
//! - The [`DrawingSurface`] and [`TextMetrics`] traits
//! - Anchor resolution for rotated primitives
//! - An SVG surface and a recording surface
//! - The per-page painter that drives any surface from a computed layout

mod anchor;
mod backend;
mod metrics;
mod painter;
mod recording;
mod svg;

pub use anchor::resolve_anchor;
pub use backend::{DrawingSurface, Paint, TextMetrics};
pub use metrics::{EstimatedMetrics, MM_PER_POINT};
pub use painter::{paint_page, scalebar_rect};
pub use recording::{DrawCommand, Recording, RecordingSurface};
pub use svg::{SvgDocument, VectorDocument};
