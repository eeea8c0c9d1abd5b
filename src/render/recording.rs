//! Drawing surface that records primitives instead of producing a file.

use serde::Serialize;

use super::anchor::resolve_anchor;
use super::{DrawingSurface, EstimatedMetrics, Paint, TextMetrics};
use crate::color::Rgb;
use crate::error::{FigureError, Result};
use crate::types::{Anchor, Font, Rect, SourceImage};

/// One recorded call. Primitive rectangles are stored after anchor
/// resolution, unrotated, alongside the rotation in effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    StrokeColor { color: Rgb },
    StrokeWidth { width: f64 },
    FillColor { color: Rgb },
    Font { font: Font },
    Rotate { degrees: f64 },
    Rectangle { rect: Rect, paint: Paint, angle: f64 },
    Oval { rect: Rect, paint: Paint, angle: f64 },
    Image { key: String, rect: Rect, paint: Paint, angle: f64 },
    Text { text: String, rect: Rect, angle: f64 },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Recording {
    pub width: f64,
    pub height: f64,
    pub pages: Vec<Vec<DrawCommand>>,
}

impl Recording {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Texts drawn on `page`, in drawing order.
    pub fn texts_on(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|cmds| {
                cmds.iter()
                    .filter_map(|c| match c {
                        DrawCommand::Text { text, .. } => Some(text.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Keys of the images drawn on `page`.
    pub fn images_on(&self, page: usize) -> Vec<&str> {
        self.pages
            .get(page)
            .map(|cmds| {
                cmds.iter()
                    .filter_map(|c| match c {
                        DrawCommand::Image { key, .. } => Some(key.as_str()),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// [`DrawingSurface`] that keeps every call in memory.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    metrics: EstimatedMetrics,
    recording: Option<Recording>,
    angle: f64,
    font: Font,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metrics(metrics: EstimatedMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    /// Whether a document is open.
    pub fn is_open(&self) -> bool {
        self.recording.is_some()
    }

    fn push(&mut self, cmd: DrawCommand) -> Result<()> {
        let page = self
            .recording
            .as_mut()
            .and_then(|r| r.pages.last_mut())
            .ok_or_else(|| FigureError::render("no open page"))?;
        page.push(cmd);
        Ok(())
    }

    /// State setters can't fail; outside a document they are dropped.
    fn push_state(&mut self, cmd: DrawCommand) {
        if let Some(page) = self.recording.as_mut().and_then(|r| r.pages.last_mut()) {
            page.push(cmd);
        }
    }
}

impl TextMetrics for RecordingSurface {
    fn measure_text(&self, text: &str, font: &Font) -> Rect {
        self.metrics.measure_text(text, font)
    }
}

impl DrawingSurface for RecordingSurface {
    type Artifact = Recording;

    fn begin_document(&mut self, width: f64, height: f64) -> Result<()> {
        if self.recording.is_some() {
            return Err(FigureError::render("document already open"));
        }
        self.angle = 0.0;
        self.recording = Some(Recording {
            width,
            height,
            pages: vec![Vec::new()],
        });
        Ok(())
    }

    fn new_page(&mut self) -> Result<()> {
        let recording = self
            .recording
            .as_mut()
            .ok_or_else(|| FigureError::render("no open document"))?;
        recording.pages.push(Vec::new());
        Ok(())
    }

    fn end_document(&mut self) -> Result<Recording> {
        self.recording
            .take()
            .ok_or_else(|| FigureError::render("no open document"))
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.push_state(DrawCommand::StrokeColor { color });
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.push_state(DrawCommand::StrokeWidth { width });
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.push_state(DrawCommand::FillColor { color });
    }

    fn set_font(&mut self, font: &Font) {
        self.font = *font;
        self.push_state(DrawCommand::Font { font: *font });
    }

    fn rotate_by(&mut self, degrees: f64) {
        self.angle = degrees;
        self.push_state(DrawCommand::Rotate { degrees });
    }

    fn draw_rectangle(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()> {
        let rect = resolve_anchor(bounds, anchor, self.angle);
        self.push(DrawCommand::Rectangle {
            rect,
            paint,
            angle: self.angle,
        })
    }

    fn draw_oval(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()> {
        let rect = resolve_anchor(bounds, anchor, self.angle);
        self.push(DrawCommand::Oval {
            rect,
            paint,
            angle: self.angle,
        })
    }

    fn draw_image(
        &mut self,
        image: &SourceImage,
        bounds: Rect,
        anchor: Anchor,
        paint: Paint,
    ) -> Result<()> {
        let rect = resolve_anchor(bounds, anchor, self.angle);
        self.push(DrawCommand::Image {
            key: image.key().to_string(),
            rect,
            paint,
            angle: self.angle,
        })
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, anchor: Anchor) -> Result<Rect> {
        let size = self.metrics.measure_text(text, &self.font);
        let rect = resolve_anchor(Rect::new(x, y, size.width, size.height), anchor, self.angle);
        self.push(DrawCommand::Text {
            text: text.to_string(),
            rect,
            angle: self.angle,
        })?;
        Ok(rect)
    }
}
