//! Drawing surface trait for pluggable output backends.
//!
//! The layout engine only ever talks to a [`DrawingSurface`]: document and
//! page lifecycle, graphics state, and anchor-relative primitives. Vector
//! files, previews and test recorders implement the same trait.

use serde::Serialize;

use crate::color::Rgb;
use crate::error::Result;
use crate::types::{Anchor, Font, Rect, SourceImage};

/// Whether a primitive is outlined, filled, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Paint {
    pub stroke: bool,
    pub fill: bool,
}

impl Paint {
    pub const NONE: Self = Self::new(false, false);
    pub const STROKE: Self = Self::new(true, false);
    pub const FILL: Self = Self::new(false, true);
    pub const BOTH: Self = Self::new(true, true);

    pub const fn new(stroke: bool, fill: bool) -> Self {
        Self { stroke, fill }
    }
}

/// Text measurement, needed by layout before any drawing happens.
pub trait TextMetrics {
    /// Bounds of `text` set in `font`. `x`/`y` are the offsets of the box
    /// from the text origin (`y` is negative: the ascent above the baseline).
    fn measure_text(&self, text: &str, font: &Font) -> Rect;
}

/// Trait for drawing backends.
///
/// Coordinates passed to primitives locate the point named by `anchor` on
/// the primitive's bounding box. The rotation set by [`rotate_by`] applies
/// around the box center.
///
/// [`rotate_by`]: DrawingSurface::rotate_by
pub trait DrawingSurface: TextMetrics {
    /// What [`end_document`](DrawingSurface::end_document) hands back.
    type Artifact;

    /// Open a document whose pages are `width` x `height` and start page 0.
    fn begin_document(&mut self, width: f64, height: f64) -> Result<()>;

    /// Finish the current page and start the next one.
    fn new_page(&mut self) -> Result<()>;

    /// Finish the document and release the surface. Must be safe to call
    /// after a failed primitive.
    fn end_document(&mut self) -> Result<Self::Artifact>;

    fn set_stroke_color(&mut self, color: Rgb);

    fn set_stroke_width(&mut self, width: f64);

    fn set_fill_color(&mut self, color: Rgb);

    fn set_font(&mut self, font: &Font);

    /// Set the rotation, in degrees, applied to subsequent primitives.
    /// `rotate_by(0.0)` restores upright drawing.
    fn rotate_by(&mut self, degrees: f64);

    fn draw_rectangle(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()>;

    fn draw_oval(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()>;

    /// Draw the visible field of view of `image` stretched to `bounds`.
    fn draw_image(
        &mut self,
        image: &SourceImage,
        bounds: Rect,
        anchor: Anchor,
        paint: Paint,
    ) -> Result<()>;

    /// Draw `text` in the current font and fill color, returning the placed
    /// bounds.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, anchor: Anchor) -> Result<Rect>;
}
