//! Sparse table of panels and headers.
//!
//! The grid only grows. Inserting past the current extent widens or deepens
//! the table, keeping existing entries at their positions and filling new
//! slots with nothing.

use crate::types::{Axis, HeaderStyle, ImageEntry, PanelStyle};

/// Header text with the style captured when it was set.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub text: String,
    pub style: HeaderStyle,
}

/// Occupied cell: the image and the panel styling around it.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCell {
    pub image: ImageEntry,
    pub panel: PanelStyle,
}

#[derive(Debug, Clone, Default)]
pub struct PanelGrid {
    n_rows: usize,
    n_cols: usize,
    /// Row-major, `n_rows * n_cols` slots.
    cells: Vec<Option<PanelCell>>,
    row_headers: Vec<Option<Header>>,
    col_headers: Vec<Option<Header>>,
}

impl PanelGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// True when no cell holds an image.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Grow to at least `rows` x `cols`.
    pub fn ensure_size(&mut self, rows: usize, cols: usize) {
        let rows = rows.max(self.n_rows);
        let cols = cols.max(self.n_cols);
        if rows == self.n_rows && cols == self.n_cols {
            return;
        }

        let mut cells: Vec<Option<PanelCell>> = Vec::with_capacity(rows * cols);
        cells.resize_with(rows * cols, || None);
        let old_cols = self.n_cols;
        for (idx, cell) in std::mem::take(&mut self.cells).into_iter().enumerate() {
            if cell.is_none() || old_cols == 0 {
                continue;
            }
            let (r, c) = (idx / old_cols, idx % old_cols);
            if let Some(slot) = cells.get_mut(r * cols + c) {
                *slot = cell;
            }
        }

        self.cells = cells;
        self.n_rows = rows;
        self.n_cols = cols;
        self.row_headers.resize_with(rows, || None);
        self.col_headers.resize_with(cols, || None);
    }

    pub fn set_header(&mut self, axis: Axis, index: usize, header: Header) {
        let slot = match axis {
            Axis::Row => {
                self.ensure_size(index + 1, 0);
                self.row_headers.get_mut(index)
            }
            Axis::Column => {
                self.ensure_size(0, index + 1);
                self.col_headers.get_mut(index)
            }
        };
        if let Some(slot) = slot {
            *slot = Some(header);
        }
    }

    pub fn set_cell(&mut self, row: usize, col: usize, cell: PanelCell) {
        self.ensure_size(row + 1, col + 1);
        let idx = row * self.n_cols + col;
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = Some(cell);
        }
    }

    pub fn header(&self, axis: Axis, index: usize) -> Option<&Header> {
        let headers = match axis {
            Axis::Row => &self.row_headers,
            Axis::Column => &self.col_headers,
        };
        headers.get(index).and_then(Option::as_ref)
    }

    /// Whether any header is set along `axis`.
    pub fn has_headers(&self, axis: Axis) -> bool {
        match axis {
            Axis::Row => self.row_headers.iter().any(Option::is_some),
            Axis::Column => self.col_headers.iter().any(Option::is_some),
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&PanelCell> {
        if row >= self.n_rows || col >= self.n_cols {
            return None;
        }
        self.cells
            .get(row * self.n_cols + col)
            .and_then(Option::as_ref)
    }

    pub fn image(&self, row: usize, col: usize) -> Option<&ImageEntry> {
        self.cell(row, col).map(|c| &c.image)
    }

    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some()
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, &PanelCell)> + '_ {
        let cols = self.n_cols;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.as_ref().map(|c| (idx / cols, idx % cols, c))
        })
    }

    /// Occupied cells of one row, left to right.
    pub fn row_cells(&self, row: usize) -> impl Iterator<Item = (usize, &PanelCell)> + '_ {
        (0..self.n_cols).filter_map(move |c| self.cell(row, c).map(|cell| (c, cell)))
    }

    /// Occupied cells of one column, top to bottom.
    pub fn col_cells(&self, col: usize) -> impl Iterator<Item = (usize, &PanelCell)> + '_ {
        (0..self.n_rows).filter_map(move |r| self.cell(r, col).map(|cell| (r, cell)))
    }
}
