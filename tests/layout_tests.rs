//! Layout pipeline tests for panelfig
//!
//! Tests for column/row extents, the figure-wide scale, pagination, tile
//! origins, image placement and panel labels on complete figures.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{calibrated, close, small_page, uniform_figure};
use panelfig::render::EstimatedMetrics;
use panelfig::{
    Borders, Calibration, Figure, FigureConfig, FigureError, LabelScheme, PageFit, PixelRect,
    ResizePolicy, SourceImage,
};
use test_case::test_case;

fn metrics() -> EstimatedMetrics {
    EstimatedMetrics::default()
}

/// 2x2 grid of 10x10 images on a page that holds only one scaled row.
fn overflowing_figure() -> Figure {
    uniform_figure(small_page(100.0, 90.0, 10.0, 2.0, PageFit::FitToWidth), 2, 2, 10)
}

// ============================================================================
// Sizing
// ============================================================================

#[test]
fn test_column_width_is_widest_image() {
    let mut fig = Figure::new();
    fig.add_image(0, 0, calibrated("a", 100, 10, 0.5), ResizePolicy::MatchSize);
    fig.add_image(1, 0, calibrated("b", 30, 10, 1.0), ResizePolicy::MatchSize);
    fig.add_image(1, 1, calibrated("c", 20, 40, 1.0), ResizePolicy::MatchSize);

    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.extents.column_widths, vec![50.0, 20.0]);
    assert_eq!(layout.extents.row_heights, vec![5.0, 40.0]);
    assert_eq!(layout.extents.total_width, 70.0);
}

#[test]
fn test_uniform_columns_use_grid_maximum() {
    let mut fig = Figure::new();
    fig.set_uniform_columns(true);
    fig.add_image(0, 0, calibrated("a", 10, 10, 1.0), ResizePolicy::MatchSize);
    fig.add_image(0, 1, calibrated("b", 30, 10, 1.0), ResizePolicy::MatchSize);
    fig.add_image(0, 3, calibrated("c", 5, 10, 1.0), ResizePolicy::MatchSize);

    let layout = fig.layout(&metrics()).unwrap();
    // The empty column takes the uniform width too.
    assert_eq!(layout.extents.column_widths, vec![30.0; 4]);
}

#[test]
fn test_empty_column_measures_zero() {
    let mut fig = Figure::new();
    fig.add_image(0, 0, calibrated("a", 10, 10, 1.0), ResizePolicy::MatchSize);
    fig.add_image(0, 2, calibrated("b", 10, 10, 1.0), ResizePolicy::MatchSize);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.extents.column_width(1), 0.0);
}

#[test]
fn test_field_of_view_sets_real_extent() {
    let mut fig = Figure::new();
    let image = calibrated("a", 100, 100, 2.0).with_field_of_view(PixelRect::new(10, 10, 20, 5));
    fig.add_image(0, 0, image, ResizePolicy::MatchSize);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.extents.column_widths, vec![40.0]);
    assert_eq!(layout.extents.row_heights, vec![10.0]);
}

// ============================================================================
// Scale
// ============================================================================

#[test]
fn test_fit_to_height_takes_smaller_scale() {
    let mut fig = Figure::with_config(small_page(120.0, 220.0, 10.0, 0.0, PageFit::FitToHeight));
    fig.add_image(0, 0, calibrated("a", 50, 400, 1.0), ResizePolicy::MatchSize);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.scale.scale_x, Some(2.0));
    assert_eq!(layout.scale.scale_y, Some(0.5));
    assert_eq!(layout.scale_factor(), 0.5);
}

#[test]
fn test_fit_to_width_takes_horizontal_scale() {
    let fig = overflowing_figure();
    let layout = fig.layout(&metrics()).unwrap();
    // (100 - 10 - 10 - 2) / 20
    assert!(close(layout.scale_factor(), 3.9));
    assert_eq!(layout.scale.scale_x, Some(layout.scale_factor()));
}

#[test_case(1, 1)]
#[test_case(3, 2)]
#[test_case(5, 7)]
fn test_scale_is_positive_and_finite(rows: usize, cols: usize) {
    let fig = uniform_figure(FigureConfig::default(), rows, cols, 64);
    let scale = fig.layout(&metrics()).unwrap().scale_factor();
    assert!(scale.is_finite());
    assert!(scale > 0.0);
}

#[test]
fn test_empty_grid_uses_fallback_scale() {
    let layout = Figure::new().layout(&metrics()).unwrap();
    assert_eq!(layout.scale_factor(), panelfig::layout::FALLBACK_SCALE);
    assert_eq!(layout.page_count(), 1);
    assert!(layout.tiles.tiles.is_empty());
}

#[test]
fn test_scaled_grid_fits_printable_width() {
    let config = FigureConfig {
        page_fit: PageFit::FitToHeight,
        ..FigureConfig::default()
    };
    let fig = uniform_figure(config.clone(), 2, 3, 100);
    let layout = fig.layout(&metrics()).unwrap();
    let right = layout
        .tiles
        .tiles
        .iter()
        .map(|t| t.rect.right())
        .fold(0.0, f64::max);
    assert!(right <= config.page_width - config.borders.right + 1e-9);
}

// ============================================================================
// Pagination
// ============================================================================

#[test]
fn test_single_image_is_one_page() {
    let fig = uniform_figure(FigureConfig::default(), 1, 1, 256);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.page_count(), 1);
    assert_eq!(layout.pages.row_to_page, vec![0]);
}

#[test]
fn test_overflowing_row_moves_to_next_page() {
    let layout = overflowing_figure().layout(&metrics()).unwrap();
    assert_eq!(layout.pages.row_to_page, vec![0, 1]);
    assert_eq!(layout.page_count(), 2);
}

#[test]
fn test_fit_to_height_keeps_grid_on_one_page() {
    let fig = uniform_figure(FigureConfig::default(), 6, 2, 100);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.page_count(), 1);
}

#[test]
fn test_pagination_is_monotonic_and_idempotent() {
    let fig = uniform_figure(small_page(100.0, 90.0, 10.0, 2.0, PageFit::FitToWidth), 7, 2, 10);
    let first = fig.layout(&metrics()).unwrap();
    let second = fig.layout(&metrics()).unwrap();
    assert_eq!(first, second);
    assert!(first
        .pages
        .row_to_page
        .windows(2)
        .all(|w| w[0] <= w[1] && w[1] <= w[0] + 1));
    assert_eq!(first.page_count(), 7);
}

// ============================================================================
// Tiles and placement
// ============================================================================

#[test]
fn test_rows_restart_at_page_top() {
    let layout = overflowing_figure().layout(&metrics()).unwrap();
    let first = layout.tile(0, 0).unwrap();
    let second = layout.tile(1, 0).unwrap();
    assert_eq!(second.page, 1);
    assert!(close(first.rect.y, 10.0));
    assert!(close(second.rect.y, layout.insets.top(1)));
}

#[test]
fn test_columns_are_separated_by_gap() {
    let layout = overflowing_figure().layout(&metrics()).unwrap();
    let a = layout.tile(0, 0).unwrap().rect;
    let b = layout.tile(0, 1).unwrap().rect;
    assert!(close(b.x - a.right(), 2.0));
    assert_eq!(layout.tiles.column_lefts.len(), 2);
}

#[test]
fn test_title_reserves_space_on_first_page_only() {
    let mut fig = overflowing_figure();
    fig.set_title("Overflow");
    let layout = fig.layout(&metrics()).unwrap();
    assert!(layout.insets.title_block > 0.0);
    assert!(close(layout.tile(0, 0).unwrap().rect.y, layout.insets.top(0)));
    assert!(close(layout.tile(1, 0).unwrap().rect.y, 10.0));
}

#[test]
fn test_headers_reserve_blocks() {
    let mut fig = overflowing_figure();
    fig.set_column_header(0, "Left");
    fig.set_row_header(1, "Second");
    let layout = fig.layout(&metrics()).unwrap();
    assert!(layout.insets.column_header_block > 2.0);
    assert!(close(layout.insets.row_header_block, layout.insets.column_header_block));
    assert!(close(layout.insets.top(1), 10.0 + layout.insets.column_header_block));
    assert!(close(layout.insets.left, 10.0 + layout.insets.row_header_block));
}

#[test]
fn test_match_magnification_keeps_true_scale() {
    let mut fig = Figure::with_config(small_page(120.0, 220.0, 10.0, 0.0, PageFit::FitToWidth));
    fig.add_image(0, 0, calibrated("wide", 50, 10, 1.0), ResizePolicy::MatchSize);
    fig.add_image(1, 0, calibrated("small", 20, 10, 1.0), ResizePolicy::MatchMagnification);
    let layout = fig.layout(&metrics()).unwrap();
    // scale 2: the 20-wide image is 40 wide, centered in a 100-wide tile.
    let p = layout.placement(1, 0).unwrap();
    assert!(close(p.within_tile.x, 30.0));
    assert!(close(p.within_tile.width, 40.0));
    assert!(close(p.rect.x, 40.0));
}

#[test]
fn test_match_size_fills_tile() {
    let mut fig = Figure::with_config(small_page(120.0, 220.0, 10.0, 0.0, PageFit::FitToWidth));
    fig.add_image(0, 0, calibrated("wide", 100, 50, 1.0), ResizePolicy::MatchSize);
    fig.add_image(0, 1, calibrated("square", 10, 10, 1.0), ResizePolicy::MatchSize);
    let layout = fig.layout(&metrics()).unwrap();
    let tile = layout.tile(0, 1).unwrap().rect;
    let p = layout.placement(0, 1).unwrap();
    // The 10x10 image grows to the tile width and is centered vertically.
    assert!(close(p.rect.width, tile.width));
    assert!(close(p.rect.height, tile.width));
    assert!(close(p.rect.center_y(), tile.center_y()));
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn test_labels_skip_empty_cells() {
    let mut fig = Figure::new();
    fig.add_image(0, 0, calibrated("a", 10, 10, 1.0), ResizePolicy::MatchSize);
    fig.add_image(0, 2, calibrated("b", 10, 10, 1.0), ResizePolicy::MatchSize);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.label(0, 0), Some("a"));
    assert_eq!(layout.label(0, 1), None);
    assert_eq!(layout.label(0, 2), Some("b"));
}

#[test]
fn test_labels_restart_on_each_page() {
    let layout = overflowing_figure().layout(&metrics()).unwrap();
    let texts: Vec<_> = layout.labels.iter().map(|l| (l.page, l.text.as_str())).collect();
    assert_eq!(texts, vec![(0, "a"), (0, "b"), (1, "a"), (1, "b")]);
}

#[test_case(LabelScheme::UppercaseLetters, "B")]
#[test_case(LabelScheme::Numbers, "2")]
fn test_label_schemes(scheme: LabelScheme, second: &str) {
    let mut fig = uniform_figure(FigureConfig::default(), 1, 2, 10);
    fig.set_label_scheme(scheme);
    let layout = fig.layout(&metrics()).unwrap();
    assert_eq!(layout.label(0, 1), Some(second));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_borders_covering_page_are_rejected() {
    let mut fig = uniform_figure(FigureConfig::default(), 1, 1, 10);
    fig.set_borders(Borders::uniform(150.0));
    assert!(matches!(
        fig.layout(&metrics()),
        Err(FigureError::Configuration(_))
    ));
}

#[test]
fn test_invalid_calibration_is_rejected() {
    let mut fig = Figure::new();
    let image = SourceImage::new("bad", 10, 10).with_calibration(Calibration {
        pixel_width: 0.0,
        pixel_height: 1.0,
        unit: "um".to_string(),
    });
    fig.add_image(0, 0, image, ResizePolicy::MatchSize);
    let err = fig.layout(&metrics()).unwrap_err();
    assert!(err.to_string().contains("bad"));
}

#[test]
fn test_layout_serializes_to_json() {
    let json = overflowing_figure().layout(&metrics()).unwrap().to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["pages"]["pageCount"], 2);
    assert_eq!(value["labels"][0]["text"], "a");
}

#[test]
fn test_cell_lookups_on_sparse_grid() {
    let mut fig = Figure::new();
    for (r, c) in [(0, 0), (0, 2), (1, 1)] {
        let image = calibrated(&format!("r{r}c{c}"), 10, 10, 1.0);
        fig.add_image(r, c, image, ResizePolicy::MatchSize);
    }
    let layout = fig.layout(&metrics()).unwrap();

    assert_eq!(layout.label(0, 0), Some("a"));
    assert_eq!(layout.label(0, 2), Some("b"));
    assert_eq!(layout.label(1, 1), Some("c"));
    assert_eq!(layout.label(0, 1), None);
    assert_eq!(layout.label(0, 3), None);
    assert_eq!(layout.label(5, 0), None);

    let placement = layout.placement(1, 1).unwrap();
    assert_eq!((placement.row, placement.col), (1, 1));
    assert!(layout.placement(1, 0).is_none());
    assert_eq!(layout.tile(0, 2).unwrap().col, 2);
    assert!(layout.tile(1, 2).is_none());
}
