//! Panel grid layout engine.
//!
//! This module handles:
//! - Real-world column widths and row heights from calibrated images
//! - The single figure-wide scale that fits the grid on the page
//! - Splitting rows across pages
//! - Absolute tile rectangles and per-image drawing rectangles
//!
//! Everything is recomputed from the configuration and grid on each call to
//! [`compute_layout`]; nothing is cached between exports.

mod paginate;
mod placement;
mod scale;
mod sizing;
mod tiles;

pub use paginate::{paginate, PageFrame, PageMap, PAGE_BREAK_TOLERANCE};
pub use placement::{fit_within, place_image, Placement};
pub use scale::{solve_scale, Insets, ScaleSolution, FALLBACK_SCALE, REFERENCE_GLYPH};
pub use sizing::{column_width, row_height, Extents};
pub use tiles::{layout_tiles, Tile, TileGrid};

use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::grid::PanelGrid;
use crate::labels::{assign_labels, PanelLabel};
use crate::render::TextMetrics;
use crate::types::FigureConfig;

/// Stages of one export, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Init,
    Size,
    Scale,
    Paginate,
    Tile,
    Place,
    Render,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Size => "size",
            Self::Scale => "scale",
            Self::Paginate => "paginate",
            Self::Tile => "tile",
            Self::Place => "place",
            Self::Render => "render",
            Self::Done => "done",
        };
        f.write_str(name)
    }
}

/// Complete geometry of a figure for one export.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FigureLayout {
    pub page_width: f64,
    pub page_height: f64,
    pub extents: Extents,
    pub insets: Insets,
    pub scale: ScaleSolution,
    pub pages: PageMap,
    pub tiles: TileGrid,
    pub placements: Vec<Placement>,
    pub labels: Vec<PanelLabel>,
    #[serde(skip)]
    index: CellIndex,
}

/// Row-major lookup from a cell to its position in the tile, placement and
/// label vectors.
#[derive(Debug, Clone, Default, PartialEq)]
struct CellIndex {
    n_cols: usize,
    tiles: Vec<Option<usize>>,
    placements: Vec<Option<usize>>,
    labels: Vec<Option<usize>>,
}

impl CellIndex {
    fn build(
        n_rows: usize,
        n_cols: usize,
        tiles: &TileGrid,
        placements: &[Placement],
        labels: &[PanelLabel],
    ) -> Self {
        let len = n_rows.saturating_mul(n_cols);
        Self {
            n_cols,
            tiles: slots(len, n_cols, tiles.tiles.iter().map(|t| (t.row, t.col))),
            placements: slots(len, n_cols, placements.iter().map(|p| (p.row, p.col))),
            labels: slots(len, n_cols, labels.iter().map(|l| (l.row, l.col))),
        }
    }

    fn get(&self, slots: &[Option<usize>], row: usize, col: usize) -> Option<usize> {
        if col >= self.n_cols {
            return None;
        }
        let at = row.checked_mul(self.n_cols)?.checked_add(col)?;
        slots.get(at).copied().flatten()
    }
}

fn slots(
    len: usize,
    n_cols: usize,
    cells: impl Iterator<Item = (usize, usize)>,
) -> Vec<Option<usize>> {
    let mut slots = vec![None; len];
    for (i, (row, col)) in cells.enumerate() {
        if let Some(slot) = slots.get_mut(row * n_cols + col) {
            *slot = Some(i);
        }
    }
    slots
}

impl FigureLayout {
    pub fn page_count(&self) -> usize {
        self.pages.page_count
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale.scale
    }

    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        let i = self.index.get(&self.index.tiles, row, col)?;
        self.tiles.tiles.get(i)
    }

    pub fn placement(&self, row: usize, col: usize) -> Option<&Placement> {
        let i = self.index.get(&self.index.placements, row, col)?;
        self.placements.get(i)
    }

    pub fn label(&self, row: usize, col: usize) -> Option<&str> {
        let i = self.index.get(&self.index.labels, row, col)?;
        self.labels.get(i).map(|l| l.text.as_str())
    }

    /// Scaled width of column `col`.
    pub fn column_width(&self, col: usize) -> f64 {
        self.extents.column_width(col) * self.scale.scale
    }

    /// Scaled height of row `row`.
    pub fn row_height(&self, row: usize) -> f64 {
        self.extents.row_height(row) * self.scale.scale
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Run the layout pipeline: size, scale, paginate, tile, place, label.
pub fn compute_layout(
    config: &FigureConfig,
    grid: &PanelGrid,
    metrics: &dyn TextMetrics,
) -> Result<FigureLayout> {
    tracing::debug!(stage = %Stage::Init, rows = grid.n_rows(), cols = grid.n_cols(), "layout");
    config.validate()?;
    for (_, _, cell) in grid.occupied() {
        cell.image.source.validate()?;
    }

    tracing::debug!(stage = %Stage::Size, "layout");
    let extents = Extents::measure(grid, config.uniform_columns, config.uniform_rows);

    tracing::debug!(stage = %Stage::Scale, "layout");
    let insets = Insets::compute(config, grid, metrics);
    let scale = solve_scale(config, &extents, &insets, grid.n_rows(), grid.n_cols())?;
    tracing::debug!(
        scale = scale.scale,
        total_width = extents.total_width,
        total_height = extents.total_height,
        "solved scale"
    );

    tracing::debug!(stage = %Stage::Paginate, "layout");
    let pages = paginate(
        &extents.row_heights,
        scale.scale,
        &insets,
        PageFrame {
            page_height: config.page_height,
            border_bottom: config.borders.bottom,
            gap: config.gap,
        },
    );
    tracing::debug!(pages = pages.page_count, "paginated");

    tracing::debug!(stage = %Stage::Tile, "layout");
    let tiles = layout_tiles(grid, &extents, scale.scale, &pages, &insets, config.gap);

    tracing::debug!(stage = %Stage::Place, "layout");
    let placements: Vec<Placement> = tiles
        .tiles
        .iter()
        .filter_map(|tile| {
            let image = grid.image(tile.row, tile.col)?;
            let within_tile = place_image(
                extents.column_width(tile.col),
                extents.row_height(tile.row),
                image.real_width(),
                image.real_height(),
                image.resize,
                scale.scale,
            );
            Some(Placement {
                row: tile.row,
                col: tile.col,
                page: tile.page,
                within_tile,
                rect: within_tile.translated(tile.rect.x, tile.rect.y),
            })
        })
        .collect();

    let labels = assign_labels(grid, &pages, config.label_scheme);
    let index = CellIndex::build(grid.n_rows(), grid.n_cols(), &tiles, &placements, &labels);

    Ok(FigureLayout {
        page_width: config.page_width,
        page_height: config.page_height,
        extents,
        insets,
        scale,
        pages,
        tiles,
        placements,
        labels,
        index,
    })
}
