//! Real-world column widths and row heights.

use serde::Serialize;

use crate::grid::PanelGrid;

/// Per-axis extents in real-world (calibrated image) units.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extents {
    pub column_widths: Vec<f64>,
    pub row_heights: Vec<f64>,
    pub total_width: f64,
    pub total_height: f64,
}

impl Extents {
    /// Measure every column and row of `grid`.
    pub fn measure(grid: &PanelGrid, uniform_cols: bool, uniform_rows: bool) -> Self {
        let column_widths: Vec<f64> = (0..grid.n_cols())
            .map(|c| column_width(grid, c, uniform_cols))
            .collect();
        let row_heights: Vec<f64> = (0..grid.n_rows())
            .map(|r| row_height(grid, r, uniform_rows))
            .collect();
        Self {
            total_width: column_widths.iter().sum(),
            total_height: row_heights.iter().sum(),
            column_widths,
            row_heights,
        }
    }

    pub fn column_width(&self, col: usize) -> f64 {
        self.column_widths.get(col).copied().unwrap_or(0.0)
    }

    pub fn row_height(&self, row: usize) -> f64 {
        self.row_heights.get(row).copied().unwrap_or(0.0)
    }
}

/// Widest image in column `col`, or in the whole grid when `uniform`.
/// Empty columns measure 0.
pub fn column_width(grid: &PanelGrid, col: usize, uniform: bool) -> f64 {
    if uniform {
        grid.occupied()
            .map(|(_, _, cell)| cell.image.real_width())
            .fold(0.0, f64::max)
    } else {
        grid.col_cells(col)
            .map(|(_, cell)| cell.image.real_width())
            .fold(0.0, f64::max)
    }
}

/// Tallest image in row `row`, or in the whole grid when `uniform`.
pub fn row_height(grid: &PanelGrid, row: usize, uniform: bool) -> f64 {
    if uniform {
        grid.occupied()
            .map(|(_, _, cell)| cell.image.real_height())
            .fold(0.0, f64::max)
    } else {
        grid.row_cells(row)
            .map(|(_, cell)| cell.image.real_height())
            .fold(0.0, f64::max)
    }
}
