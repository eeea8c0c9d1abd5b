//! Figure builder and export orchestration.
//!
//! A [`Figure`] holds the configuration, the panel grid and the *current*
//! header, image and panel styles. Adding a header or an image snapshots the
//! current styles into the grid, so later style changes only affect later
//! insertions.

use crate::error::Result;
use crate::grid::{Header, PanelCell, PanelGrid};
use crate::layout::{compute_layout, FigureLayout, Stage};
use crate::render::{paint_page, DrawingSurface, TextMetrics};
use crate::types::{
    Axis, Borders, FigureConfig, Font, HeaderStyle, ImageEntry, ImageStyle, LabelScheme,
    Orientation, PageFit, PanelStyle, PaperSize, ResizePolicy, SourceImage,
};

#[derive(Debug, Clone, Default)]
pub struct Figure {
    config: FigureConfig,
    header_style: HeaderStyle,
    image_style: ImageStyle,
    panel_style: PanelStyle,
    grid: PanelGrid,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: FigureConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut FigureConfig {
        &mut self.config
    }

    pub fn grid(&self) -> &PanelGrid {
        &self.grid
    }

    // --- page setup ---

    pub fn set_paper(&mut self, size: PaperSize, orientation: Orientation) {
        self.config.set_paper(size, orientation);
    }

    pub fn set_page_size(&mut self, width: f64, height: f64) {
        self.config.page_width = width;
        self.config.page_height = height;
    }

    pub fn set_borders(&mut self, borders: Borders) {
        self.config.borders = borders;
    }

    pub fn set_gap(&mut self, gap: f64) {
        self.config.gap = gap;
    }

    pub fn set_page_fit(&mut self, fit: PageFit) {
        self.config.page_fit = fit;
    }

    pub fn set_uniform_rows(&mut self, uniform: bool) {
        self.config.uniform_rows = uniform;
    }

    pub fn set_uniform_columns(&mut self, uniform: bool) {
        self.config.uniform_columns = uniform;
    }

    pub fn set_label_scheme(&mut self, scheme: LabelScheme) {
        self.config.label_scheme = scheme;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.config.title = Some(title.into());
    }

    pub fn set_title_font(&mut self, font: Font) {
        self.config.title_style.font = font;
    }

    // --- current styles ---

    pub fn header_style(&self) -> &HeaderStyle {
        &self.header_style
    }

    /// Style applied to headers set from now on.
    pub fn header_style_mut(&mut self) -> &mut HeaderStyle {
        &mut self.header_style
    }

    pub fn image_style(&self) -> &ImageStyle {
        &self.image_style
    }

    /// Style applied to images added from now on.
    pub fn image_style_mut(&mut self) -> &mut ImageStyle {
        &mut self.image_style
    }

    pub fn panel_style(&self) -> &PanelStyle {
        &self.panel_style
    }

    /// Style applied to panels added from now on.
    pub fn panel_style_mut(&mut self) -> &mut PanelStyle {
        &mut self.panel_style
    }

    // --- content ---

    pub fn set_row_header(&mut self, row: usize, text: impl Into<String>) {
        self.set_header(Axis::Row, row, text.into());
    }

    pub fn set_column_header(&mut self, col: usize, text: impl Into<String>) {
        self.set_header(Axis::Column, col, text.into());
    }

    fn set_header(&mut self, axis: Axis, index: usize, text: String) {
        self.grid.set_header(
            axis,
            index,
            Header {
                text,
                style: self.header_style.clone(),
            },
        );
    }

    /// Put `image` at (`row`, `col`), replacing whatever was there.
    pub fn add_image(&mut self, row: usize, col: usize, image: SourceImage, resize: ResizePolicy) {
        self.add_image_with_styles(
            row,
            col,
            image,
            resize,
            self.image_style.clone(),
            self.panel_style.clone(),
        );
    }

    /// Like [`add_image`](Self::add_image) but with explicit style snapshots.
    pub fn add_image_with_styles(
        &mut self,
        row: usize,
        col: usize,
        image: SourceImage,
        resize: ResizePolicy,
        style: ImageStyle,
        panel: PanelStyle,
    ) {
        self.grid.set_cell(
            row,
            col,
            PanelCell {
                image: ImageEntry {
                    source: image,
                    resize,
                    style,
                },
                panel,
            },
        );
    }

    /// Like [`set_row_header`](Self::set_row_header) but with an explicit
    /// style snapshot.
    pub fn set_header_with_style(
        &mut self,
        axis: Axis,
        index: usize,
        text: impl Into<String>,
        style: HeaderStyle,
    ) {
        self.grid.set_header(
            axis,
            index,
            Header {
                text: text.into(),
                style,
            },
        );
    }

    // --- layout & export ---

    pub fn layout(&self, metrics: &dyn TextMetrics) -> Result<FigureLayout> {
        compute_layout(&self.config, &self.grid, metrics)
    }

    /// Lay the figure out and draw every page onto `surface`.
    ///
    /// The surface is always released: if layout succeeds but drawing fails,
    /// `end_document` is still called before the error is returned.
    pub fn export<S: DrawingSurface>(&self, surface: &mut S) -> Result<S::Artifact> {
        let layout = self.layout(&*surface)?;

        tracing::debug!(stage = %Stage::Render, pages = layout.page_count(), "export");
        surface.begin_document(self.config.page_width, self.config.page_height)?;

        if let Err(err) = self.render_pages(surface, &layout) {
            if let Err(release) = surface.end_document() {
                tracing::warn!(error = %release, "failed to release surface after error");
            }
            return Err(err);
        }

        let artifact = surface.end_document()?;
        tracing::debug!(stage = %Stage::Done, "export");
        Ok(artifact)
    }

    fn render_pages<S: DrawingSurface>(&self, surface: &mut S, layout: &FigureLayout) -> Result<()> {
        for page in 0..layout.page_count() {
            if page > 0 {
                surface.new_page()?;
            }
            tracing::debug!(page, "render page");
            paint_page(surface, &self.config, &self.grid, layout, page)?;
        }
        Ok(())
    }
}
