//! Per-page drawing of a computed [`FigureLayout`].
//!
//! The painter turns layout geometry into surface calls; it never measures
//! or moves anything itself apart from anchoring text and scale bars.

use super::{DrawingSurface, Paint};
use crate::error::Result;
use crate::grid::{Header, PanelGrid};
use crate::layout::FigureLayout;
use crate::types::{Anchor, Axis, FigureConfig, ImageEntry, Rect, ScalebarPosition};

/// Draw everything that belongs on `page`.
pub fn paint_page<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    config: &FigureConfig,
    grid: &PanelGrid,
    layout: &FigureLayout,
    page: usize,
) -> Result<()> {
    for tile in layout.tiles.tiles_on(page) {
        let (Some(entry), Some(placement)) = (
            grid.image(tile.row, tile.col),
            layout.placement(tile.row, tile.col),
        ) else {
            continue;
        };
        paint_image(surface, entry, placement.rect, tile.rect)?;
    }

    for tile in layout.tiles.tiles_on(page) {
        let Some(cell) = grid.cell(tile.row, tile.col) else {
            continue;
        };
        let panel = &cell.panel;
        if let Some(text) = layout.label(tile.row, tile.col) {
            surface.set_font(&panel.label_font);
            surface.set_fill_color(panel.label_color);
            let (x, y) = tile.rect.anchor_point(panel.label_position, panel.label_gap);
            surface.draw_text(text, x, y, panel.label_position)?;
        }
        if panel.frame_visible {
            surface.set_stroke_color(panel.frame_color);
            surface.set_stroke_width(panel.frame_thickness);
            surface.draw_rectangle(tile.rect, Anchor::TopLeft, Paint::STROKE)?;
        }
    }

    paint_column_headers(surface, config, grid, layout, page)?;
    paint_row_headers(surface, config, grid, layout, page)?;

    if page == 0 {
        if let Some(title) = config.visible_title() {
            surface.set_font(&config.title_style.font);
            surface.set_fill_color(config.title_style.color);
            surface.draw_text(
                title,
                config.page_width / 2.0,
                config.borders.top,
                Anchor::TopCenter,
            )?;
        }
    }
    Ok(())
}

/// Draw one image into `rect`. The title is anchored to the whole `tile` so
/// titles line up along a row whatever the image size.
fn paint_image<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    entry: &ImageEntry,
    rect: Rect,
    tile: Rect,
) -> Result<()> {
    let style = &entry.style;

    let paint = if style.frame_visible {
        surface.set_stroke_color(style.frame_color);
        surface.set_stroke_width(style.frame_thickness);
        Paint::STROKE
    } else {
        Paint::NONE
    };
    surface.draw_image(&entry.source, rect, Anchor::TopLeft, paint)?;

    if let Some(bar) = scalebar_rect(entry, rect) {
        surface.set_fill_color(style.scalebar.color);
        surface.draw_rectangle(bar, Anchor::TopLeft, Paint::FILL)?;
    }

    if style.title_visible {
        if let Some(title) = entry.source.title() {
            surface.set_font(&style.title_font);
            surface.set_fill_color(style.title_color);
            let (x, y) = tile.anchor_point(style.title_position, style.title_gap);
            surface.draw_text(title, x, y, style.title_position)?;
        }
    }
    Ok(())
}

/// Page rectangle of the scale bar over an image drawn into `drawn`, or
/// `None` when the bar is hidden or has no length.
pub fn scalebar_rect(entry: &ImageEntry, drawn: Rect) -> Option<Rect> {
    let bar = &entry.style.scalebar;
    let real_width = entry.real_width();
    if !bar.visible || bar.length <= 0.0 || real_width <= 0.0 {
        return None;
    }
    let length = bar.length * drawn.width / real_width;
    let x = match bar.position {
        ScalebarPosition::LowerLeft | ScalebarPosition::UpperLeft => drawn.x + bar.offset,
        ScalebarPosition::LowerRight | ScalebarPosition::UpperRight => {
            drawn.right() - bar.offset - length
        }
    };
    let y = match bar.position {
        ScalebarPosition::UpperLeft | ScalebarPosition::UpperRight => drawn.y + bar.offset,
        ScalebarPosition::LowerLeft | ScalebarPosition::LowerRight => {
            drawn.bottom() - bar.offset - bar.thickness
        }
    };
    Some(Rect::new(x, y, length, bar.thickness))
}

fn paint_header_frame<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    header: &Header,
    frame: Rect,
) -> Result<()> {
    let style = &header.style;
    if !style.frame_visible {
        return Ok(());
    }
    surface.set_stroke_color(style.frame_color);
    surface.set_stroke_width(style.frame_thickness);
    let paint = match style.background {
        Some(color) => {
            surface.set_fill_color(color);
            Paint::BOTH
        }
        None => Paint::STROKE,
    };
    surface.draw_rectangle(frame, Anchor::TopLeft, paint)
}

fn paint_column_headers<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    config: &FigureConfig,
    grid: &PanelGrid,
    layout: &FigureLayout,
    page: usize,
) -> Result<()> {
    let block = layout.insets.column_header_block;
    let top = layout.insets.top(page);
    for col in 0..grid.n_cols() {
        let (Some(header), Some(left)) = (
            grid.header(Axis::Column, col),
            layout.tiles.column_lefts.get(col).copied(),
        ) else {
            continue;
        };
        let width = layout.column_width(col);
        let frame = Rect::new(left, top - block, width, block - config.gap);
        paint_header_frame(surface, header, frame)?;

        surface.set_font(&header.style.font);
        surface.set_fill_color(header.style.text_color);
        surface.draw_text(
            &header.text,
            left + width / 2.0,
            top - config.gap,
            Anchor::BottomCenter,
        )?;
    }
    Ok(())
}

fn paint_row_headers<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    config: &FigureConfig,
    grid: &PanelGrid,
    layout: &FigureLayout,
    page: usize,
) -> Result<()> {
    let block = layout.insets.row_header_block;
    let left = layout.insets.left;
    for row in layout.pages.rows_on(page) {
        let (Some(header), Some(top)) = (
            grid.header(Axis::Row, row),
            layout.tiles.row_tops.get(row).copied(),
        ) else {
            continue;
        };
        let height = layout.row_height(row);
        let frame = Rect::new(left - block, top, block - config.gap, height);
        paint_header_frame(surface, header, frame)?;

        surface.set_font(&header.style.font);
        surface.set_fill_color(header.style.text_color);
        surface.rotate_by(-90.0);
        let drawn = surface.draw_text(
            &header.text,
            left - config.gap,
            top + height / 2.0,
            Anchor::CenterRight,
        );
        surface.rotate_by(0.0);
        drawn?;
    }
    Ok(())
}
