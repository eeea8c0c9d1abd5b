//! Font-file-free text measurement.
//!
//! Glyph shaping is out of scope, so text boxes are estimated from average
//! advance widths per family. Good enough for sizing header blocks and
//! anchoring labels.

use super::TextMetrics;
use crate::types::{Font, FontFamily, FontStyle, Rect};

/// Millimetres per typographic point.
pub const MM_PER_POINT: f64 = 25.4 / 72.0;

/// Line box height relative to the font size.
const LINE_HEIGHT: f64 = 1.2;

/// Ascent relative to the font size.
const ASCENT: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EstimatedMetrics {
    /// Page units per point.
    pub units_per_point: f64,
}

impl Default for EstimatedMetrics {
    fn default() -> Self {
        Self {
            units_per_point: MM_PER_POINT,
        }
    }
}

impl EstimatedMetrics {
    /// Font size in page units.
    pub fn font_size(&self, font: &Font) -> f64 {
        font.size * self.units_per_point
    }
}

fn average_advance(font: &Font) -> f64 {
    let base = match font.family {
        FontFamily::Helvetica | FontFamily::Arial => 0.55,
        FontFamily::Times => 0.5,
        FontFamily::Courier => 0.6,
    };
    match (font.family, font.style) {
        (FontFamily::Courier, _) => base,
        (_, FontStyle::Bold) => base + 0.05,
        _ => base,
    }
}

impl TextMetrics for EstimatedMetrics {
    fn measure_text(&self, text: &str, font: &Font) -> Rect {
        let size = self.font_size(font);
        let chars = text.chars().count() as f64;
        Rect::new(
            0.0,
            -ASCENT * size,
            chars * average_advance(font) * size,
            LINE_HEIGHT * size,
        )
    }
}
