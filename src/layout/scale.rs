//! Page insets and the global real-world → page scale.

use serde::Serialize;

use super::Extents;
use crate::error::{FigureError, Result};
use crate::grid::PanelGrid;
use crate::render::TextMetrics;
use crate::types::{Axis, FigureConfig, Font, PageFit};

/// Glyph measured to size header and title blocks.
pub const REFERENCE_GLYPH: &str = "X";

/// Scale used when the grid has no extent to fit.
pub const FALLBACK_SCALE: f64 = 1.0;

/// Offsets of the first tile from the page origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insets {
    /// Top of the first row on page 0 (title + column headers).
    pub first_page_top: f64,
    /// Top of the first row on later pages (column headers only).
    pub top: f64,
    /// Left of the first column (row headers).
    pub left: f64,
    /// Height of the title block on page 0, 0 without a title.
    pub title_block: f64,
    /// Height of the column header block, 0 without column headers.
    pub column_header_block: f64,
    /// Width of the (rotated) row header block, 0 without row headers.
    pub row_header_block: f64,
}

impl Insets {
    pub fn compute(config: &FigureConfig, grid: &PanelGrid, metrics: &dyn TextMetrics) -> Self {
        let borders = &config.borders;

        let title_block = if config.visible_title().is_some() {
            glyph_height(metrics, &config.title_style.font) + borders.top / 2.0
        } else {
            0.0
        };
        let column_header_block = header_block(config, grid, metrics, Axis::Column);
        let row_header_block = header_block(config, grid, metrics, Axis::Row);

        let top = borders.top + column_header_block;
        Self {
            first_page_top: top + title_block,
            top,
            left: borders.left + row_header_block,
            title_block,
            column_header_block,
            row_header_block,
        }
    }

    /// Top of the first row on `page`.
    pub fn top(&self, page: usize) -> f64 {
        if page == 0 {
            self.first_page_top
        } else {
            self.top
        }
    }
}

fn glyph_height(metrics: &dyn TextMetrics, font: &Font) -> f64 {
    metrics.measure_text(REFERENCE_GLYPH, font).height
}

/// Tallest header font along `axis` plus the gap, or 0 without headers.
fn header_block(
    config: &FigureConfig,
    grid: &PanelGrid,
    metrics: &dyn TextMetrics,
    axis: Axis,
) -> f64 {
    let count = match axis {
        Axis::Row => grid.n_rows(),
        Axis::Column => grid.n_cols(),
    };
    let tallest = (0..count)
        .filter_map(|i| grid.header(axis, i))
        .map(|h| glyph_height(metrics, &h.style.font))
        .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |a| a.max(h))));
    tallest.map_or(0.0, |h| h + config.gap)
}

/// Outcome of fitting the grid's real-world extent into the printable area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSolution {
    pub available_width: f64,
    pub available_height: f64,
    /// `None` when the grid has no width.
    pub scale_x: Option<f64>,
    /// `None` when the grid has no height.
    pub scale_y: Option<f64>,
    pub scale: f64,
}

/// Solve the single figure-wide scale factor.
///
/// `FitToWidth` takes `scale_x`; `FitToHeight` takes the smaller of the two.
/// A grid without extent gets [`FALLBACK_SCALE`].
pub fn solve_scale(
    config: &FigureConfig,
    extents: &Extents,
    insets: &Insets,
    n_rows: usize,
    n_cols: usize,
) -> Result<ScaleSolution> {
    let borders = &config.borders;
    let col_gaps = n_cols.saturating_sub(1) as f64 * config.gap;
    let row_gaps = n_rows.saturating_sub(1) as f64 * config.gap;

    let available_width = config.page_width - insets.left - borders.right - col_gaps;
    let available_height =
        config.page_height - insets.top(0) - borders.bottom - row_gaps;

    let scale_x = (extents.total_width > 0.0).then(|| available_width / extents.total_width);
    let scale_y = (extents.total_height > 0.0).then(|| available_height / extents.total_height);

    let chosen = match config.page_fit {
        PageFit::FitToWidth => scale_x.or(scale_y),
        PageFit::FitToHeight => match (scale_x, scale_y) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (x, y) => x.or(y),
        },
    };

    let scale = match chosen {
        Some(s) if s.is_finite() && s > 0.0 => s,
        Some(s) => {
            return Err(FigureError::config(format!(
                "no room for panels: available {available_width:.2}x{available_height:.2} \
                 gives scale {s}"
            )));
        }
        None => {
            tracing::warn!(
                rows = n_rows,
                cols = n_cols,
                "grid has no real-world extent, using fallback scale"
            );
            FALLBACK_SCALE
        }
    };

    Ok(ScaleSolution {
        available_width,
        available_height,
        scale_x,
        scale_y,
        scale,
    })
}
