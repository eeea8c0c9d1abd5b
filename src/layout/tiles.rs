//! Absolute tile rectangles on each page.

use serde::Serialize;

use super::{Extents, Insets, PageMap};
use crate::grid::PanelGrid;
use crate::types::Rect;

/// Page-space rectangle of one occupied cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    pub row: usize,
    pub col: usize,
    pub page: usize,
    pub rect: Rect,
}

/// Row and column origins plus one tile per occupied cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileGrid {
    /// Left edge of each column (identical on every page).
    pub column_lefts: Vec<f64>,
    /// Top edge of each row on its own page.
    pub row_tops: Vec<f64>,
    /// Row-major, occupied cells only.
    pub tiles: Vec<Tile>,
}

impl TileGrid {
    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.row == row && t.col == col)
    }

    pub fn tiles_on(&self, page: usize) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter().filter(move |t| t.page == page)
    }
}

/// Lay tiles out page by page: rows stack downward from the page's top inset,
/// columns run rightward from the left inset, separated by `gap`.
pub fn layout_tiles(
    grid: &PanelGrid,
    extents: &Extents,
    scale: f64,
    pages: &PageMap,
    insets: &Insets,
    gap: f64,
) -> TileGrid {
    let mut column_lefts = Vec::with_capacity(grid.n_cols());
    let mut x = insets.left;
    for col in 0..grid.n_cols() {
        column_lefts.push(x);
        x += extents.column_width(col) * scale + gap;
    }

    let mut row_tops = Vec::with_capacity(grid.n_rows());
    let mut tiles = Vec::new();
    let mut page = 0;
    let mut y = insets.top(page);

    for row in 0..grid.n_rows() {
        let row_page = pages.page_of(row).unwrap_or(page);
        if row_page != page {
            page = row_page;
            y = insets.top(page);
        }
        row_tops.push(y);

        let height = extents.row_height(row) * scale;
        for (col, _) in grid.row_cells(row) {
            let left = column_lefts.get(col).copied().unwrap_or(insets.left);
            tiles.push(Tile {
                row,
                col,
                page,
                rect: Rect::new(left, y, extents.column_width(col) * scale, height),
            });
        }
        y += height + gap;
    }

    TileGrid {
        column_lefts,
        row_tops,
        tiles,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::grid::PanelCell;
    use crate::types::{ImageEntry, ImageStyle, PanelStyle, ResizePolicy, SourceImage};

    fn grid_with(cells: &[(usize, usize, u32, u32)]) -> PanelGrid {
        let mut grid = PanelGrid::new();
        for &(r, c, w, h) in cells {
            grid.set_cell(
                r,
                c,
                PanelCell {
                    image: ImageEntry {
                        source: SourceImage::new("img", w, h),
                        resize: ResizePolicy::MatchSize,
                        style: ImageStyle::default(),
                    },
                    panel: PanelStyle::default(),
                },
            );
        }
        grid
    }

    fn insets() -> Insets {
        Insets {
            first_page_top: 30.0,
            top: 20.0,
            left: 15.0,
            ..Insets::default()
        }
    }

    #[test]
    fn test_tiles_advance_by_size_and_gap() {
        let grid = grid_with(&[(0, 0, 10, 5), (0, 1, 20, 5), (1, 0, 10, 8)]);
        let extents = Extents::measure(&grid, false, false);
        let pages = PageMap {
            row_to_page: vec![0, 0],
            page_count: 1,
        };
        let tiles = layout_tiles(&grid, &extents, 2.0, &pages, &insets(), 1.0);

        assert_eq!(tiles.column_lefts, vec![15.0, 36.0]);
        assert_eq!(tiles.row_tops, vec![30.0, 41.0]);
        assert_eq!(tiles.tiles.len(), 3);
        assert_eq!(tiles.tile(0, 1).unwrap().rect, Rect::new(36.0, 30.0, 40.0, 10.0));
        assert_eq!(tiles.tile(1, 0).unwrap().rect, Rect::new(15.0, 41.0, 20.0, 16.0));
        assert!(tiles.tile(1, 1).is_none());
    }

    #[test]
    fn test_new_page_resets_vertical_cursor() {
        let grid = grid_with(&[(0, 0, 10, 10), (1, 0, 10, 10), (2, 0, 10, 10)]);
        let extents = Extents::measure(&grid, false, false);
        let pages = PageMap {
            row_to_page: vec![0, 1, 1],
            page_count: 2,
        };
        let tiles = layout_tiles(&grid, &extents, 1.0, &pages, &insets(), 2.0);

        assert_eq!(tiles.row_tops, vec![30.0, 20.0, 32.0]);
        let page1: Vec<_> = tiles.tiles_on(1).map(|t| t.row).collect();
        assert_eq!(page1, vec![1, 2]);
        assert_eq!(tiles.tile(1, 0).unwrap().page, 1);
    }

    #[test]
    fn test_empty_row_still_takes_gap() {
        let grid = grid_with(&[(0, 0, 10, 10), (2, 0, 10, 10)]);
        let extents = Extents::measure(&grid, false, false);
        let pages = PageMap {
            row_to_page: vec![0, 0, 0],
            page_count: 1,
        };
        let tiles = layout_tiles(&grid, &extents, 1.0, &pages, &insets(), 2.0);
        assert_eq!(tiles.row_tops, vec![30.0, 42.0, 44.0]);
        assert_eq!(tiles.tiles.len(), 2);
    }
}
