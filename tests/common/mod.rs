//! Common test utilities: figure builders and a surface that fails on demand.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use panelfig::error::{FigureError, Result};
use panelfig::render::{
    DrawingSurface, Paint, Recording, RecordingSurface, TextMetrics,
};
use panelfig::{
    Anchor, Borders, Calibration, Figure, FigureConfig, Font, PageFit, Rect, ResizePolicy, Rgb,
    SourceImage,
};

/// Image with square pixels of `pixel` units.
pub fn calibrated(key: &str, width_px: u32, height_px: u32, pixel: f64) -> SourceImage {
    SourceImage::new(key, width_px, height_px).with_calibration(Calibration {
        pixel_width: pixel,
        pixel_height: pixel,
        unit: "um".to_string(),
    })
}

/// Small page with uniform borders and no title.
pub fn small_page(width: f64, height: f64, border: f64, gap: f64, fit: PageFit) -> FigureConfig {
    FigureConfig {
        page_width: width,
        page_height: height,
        borders: Borders::uniform(border),
        gap,
        page_fit: fit,
        ..FigureConfig::default()
    }
}

/// `rows` x `cols` figure of identical `size` x `size` images.
pub fn uniform_figure(config: FigureConfig, rows: usize, cols: usize, size: u32) -> Figure {
    let mut figure = Figure::with_config(config);
    for r in 0..rows {
        for c in 0..cols {
            figure.add_image(
                r,
                c,
                calibrated(&format!("r{r}c{c}"), size, size, 1.0),
                ResizePolicy::MatchMagnification,
            );
        }
    }
    figure
}

pub fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

/// Recording surface that fails the `fail_on`-th image draw (1-based) and
/// remembers whether the document was released.
#[derive(Default)]
pub struct FailingSurface {
    inner: RecordingSurface,
    pub fail_on: usize,
    pub images_drawn: usize,
    pub begun: bool,
    pub ended: bool,
}

impl FailingSurface {
    pub fn new(fail_on: usize) -> Self {
        Self {
            fail_on,
            ..Self::default()
        }
    }
}

impl TextMetrics for FailingSurface {
    fn measure_text(&self, text: &str, font: &Font) -> Rect {
        self.inner.measure_text(text, font)
    }
}

impl DrawingSurface for FailingSurface {
    type Artifact = Recording;

    fn begin_document(&mut self, width: f64, height: f64) -> Result<()> {
        self.begun = true;
        self.inner.begin_document(width, height)
    }

    fn new_page(&mut self) -> Result<()> {
        self.inner.new_page()
    }

    fn end_document(&mut self) -> Result<Recording> {
        self.ended = true;
        self.inner.end_document()
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.inner.set_stroke_color(color);
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.inner.set_stroke_width(width);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.inner.set_fill_color(color);
    }

    fn set_font(&mut self, font: &Font) {
        self.inner.set_font(font);
    }

    fn rotate_by(&mut self, degrees: f64) {
        self.inner.rotate_by(degrees);
    }

    fn draw_rectangle(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()> {
        self.inner.draw_rectangle(bounds, anchor, paint)
    }

    fn draw_oval(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()> {
        self.inner.draw_oval(bounds, anchor, paint)
    }

    fn draw_image(
        &mut self,
        image: &SourceImage,
        bounds: Rect,
        anchor: Anchor,
        paint: Paint,
    ) -> Result<()> {
        self.images_drawn += 1;
        if self.images_drawn == self.fail_on {
            return Err(FigureError::Render(format!("cannot draw {}", image.key())));
        }
        self.inner.draw_image(image, bounds, anchor, paint)
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, anchor: Anchor) -> Result<Rect> {
        self.inner.draw_text(text, x, y, anchor)
    }
}
