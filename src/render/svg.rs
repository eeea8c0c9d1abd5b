//! SVG drawing surface.
//!
//! Each page becomes a standalone SVG document whose user units equal page
//! units (millimetres by default). Images are embedded as base64 data URIs
//! inside a nested viewport that crops to the field of view, so overlay
//! shapes can be drawn in source pixel coordinates.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

use super::anchor::resolve_anchor;
use super::{DrawingSurface, EstimatedMetrics, Paint, TextMetrics};
use crate::color::Rgb;
use crate::error::{FigureError, Result};
use crate::types::{Anchor, Font, FontStyle, OverlayShape, Rect, SourceImage};

/// Finished multi-page vector document.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDocument {
    pub width: f64,
    pub height: f64,
    /// One SVG document per page.
    pub pages: Vec<String>,
}

impl VectorDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
struct GraphicsState {
    stroke: Rgb,
    fill: Rgb,
    stroke_width: f64,
    font: Font,
    angle: f64,
}

impl Default for GraphicsState {
    fn default() -> Self {
        Self {
            stroke: Rgb::BLACK,
            fill: Rgb::WHITE,
            stroke_width: 1.0,
            font: Font::default(),
            angle: 0.0,
        }
    }
}

type PageWriter = Writer<Cursor<Vec<u8>>>;

/// [`DrawingSurface`] that writes SVG.
#[derive(Default)]
pub struct SvgDocument {
    metrics: EstimatedMetrics,
    width: f64,
    height: f64,
    page: Option<PageWriter>,
    pages: Vec<String>,
    state: GraphicsState,
    open: bool,
}

fn num(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn paint_attr(enabled: bool, color: Rgb) -> String {
    if enabled {
        color.to_hex()
    } else {
        "none".to_string()
    }
}

fn element<'a>(name: &'a str, attrs: &[(&str, String)]) -> BytesStart<'a> {
    let mut el = BytesStart::new(name);
    for (key, value) in attrs {
        el.push_attribute((*key, value.as_str()));
    }
    el
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use custom text metrics (e.g. when page units are points).
    pub fn with_metrics(metrics: EstimatedMetrics) -> Self {
        Self {
            metrics,
            ..Self::default()
        }
    }

    fn writer(&mut self) -> Result<&mut PageWriter> {
        self.page
            .as_mut()
            .ok_or_else(|| FigureError::render("no open page; call begin_document first"))
    }

    fn start_page(&mut self) -> Result<()> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        let root = element(
            "svg",
            &[
                ("xmlns", "http://www.w3.org/2000/svg".to_string()),
                ("xmlns:xlink", "http://www.w3.org/1999/xlink".to_string()),
                ("version", "1.1".to_string()),
                ("width", format!("{}mm", num(self.width))),
                ("height", format!("{}mm", num(self.height))),
                (
                    "viewBox",
                    format!("0 0 {} {}", num(self.width), num(self.height)),
                ),
            ],
        );
        writer.write_event(Event::Start(root))?;
        self.page = Some(writer);
        Ok(())
    }

    fn finish_page(&mut self) -> Result<()> {
        let Some(mut writer) = self.page.take() else {
            return Ok(());
        };
        writer.write_event(Event::End(BytesEnd::new("svg")))?;
        let bytes = writer.into_inner().into_inner();
        let svg = String::from_utf8(bytes)
            .map_err(|e| FigureError::render(format!("SVG output is not UTF-8: {e}")))?;
        self.pages.push(svg);
        Ok(())
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer()?.write_event(event)?;
        Ok(())
    }

    /// Open a rotation group around the center of `rect` if a rotation is set.
    fn begin_rotation(&mut self, rect: &Rect) -> Result<bool> {
        if self.state.angle.abs() < f64::EPSILON {
            return Ok(false);
        }
        let transform = format!(
            "rotate({} {} {})",
            num(self.state.angle),
            num(rect.center_x()),
            num(rect.center_y())
        );
        self.write(Event::Start(element("g", &[("transform", transform)])))?;
        Ok(true)
    }

    fn end_rotation(&mut self, rotated: bool) -> Result<()> {
        if rotated {
            self.write(Event::End(BytesEnd::new("g")))?;
        }
        Ok(())
    }

    fn shape_attrs(&self, paint: Paint) -> Vec<(&'static str, String)> {
        vec![
            ("fill", paint_attr(paint.fill, self.state.fill)),
            ("stroke", paint_attr(paint.stroke, self.state.stroke)),
            ("stroke-width", num(self.state.stroke_width)),
        ]
    }

    fn rect_event(&self, rect: &Rect, paint: Paint) -> BytesStart<'static> {
        let mut attrs = vec![
            ("x", num(rect.x)),
            ("y", num(rect.y)),
            ("width", num(rect.width)),
            ("height", num(rect.height)),
        ];
        attrs.extend(self.shape_attrs(paint));
        element("rect", &attrs)
    }

    fn write_image_content(&mut self, image: &SourceImage) -> Result<()> {
        let (w, h) = (image.width_px(), image.height_px());
        let content = match image.data() {
            Some(data) => element(
                "image",
                &[
                    ("x", "0".to_string()),
                    ("y", "0".to_string()),
                    ("width", w.to_string()),
                    ("height", h.to_string()),
                    ("preserveAspectRatio", "none".to_string()),
                    (
                        "xlink:href",
                        format!("data:{};base64,{}", data.mime, STANDARD.encode(&data.bytes)),
                    ),
                ],
            ),
            None => element(
                "rect",
                &[
                    ("x", "0".to_string()),
                    ("y", "0".to_string()),
                    ("width", w.to_string()),
                    ("height", h.to_string()),
                    ("fill", Rgb::LIGHT_GRAY.to_hex()),
                    ("data-key", image.key().to_string()),
                ],
            ),
        };
        self.write(Event::Empty(content))?;

        for shape in image.overlay() {
            let el = match shape {
                OverlayShape::Rectangle {
                    bounds,
                    color,
                    stroke_width,
                } => element(
                    "rect",
                    &[
                        ("x", num(bounds.x)),
                        ("y", num(bounds.y)),
                        ("width", num(bounds.width)),
                        ("height", num(bounds.height)),
                        ("fill", "none".to_string()),
                        ("stroke", color.to_hex()),
                        ("stroke-width", num(*stroke_width)),
                    ],
                ),
                OverlayShape::Oval {
                    bounds,
                    color,
                    stroke_width,
                } => element(
                    "ellipse",
                    &[
                        ("cx", num(bounds.center_x())),
                        ("cy", num(bounds.center_y())),
                        ("rx", num(bounds.width / 2.0)),
                        ("ry", num(bounds.height / 2.0)),
                        ("fill", "none".to_string()),
                        ("stroke", color.to_hex()),
                        ("stroke-width", num(*stroke_width)),
                    ],
                ),
            };
            self.write(Event::Empty(el))?;
        }
        Ok(())
    }
}

impl TextMetrics for SvgDocument {
    fn measure_text(&self, text: &str, font: &Font) -> Rect {
        self.metrics.measure_text(text, font)
    }
}

impl DrawingSurface for SvgDocument {
    type Artifact = VectorDocument;

    fn begin_document(&mut self, width: f64, height: f64) -> Result<()> {
        if self.open {
            return Err(FigureError::render("document already open"));
        }
        if !(width > 0.0 && height > 0.0) {
            return Err(FigureError::render(format!(
                "invalid page size {width}x{height}"
            )));
        }
        self.width = width;
        self.height = height;
        self.pages.clear();
        self.state = GraphicsState::default();
        self.open = true;
        self.start_page()
    }

    fn new_page(&mut self) -> Result<()> {
        if !self.open {
            return Err(FigureError::render("no open document"));
        }
        self.finish_page()?;
        self.start_page()
    }

    fn end_document(&mut self) -> Result<VectorDocument> {
        if !self.open {
            return Err(FigureError::render("no open document"));
        }
        self.open = false;
        let finished = self.finish_page();
        let pages = std::mem::take(&mut self.pages);
        finished?;
        tracing::debug!(pages = pages.len(), "finished SVG document");
        Ok(VectorDocument {
            width: self.width,
            height: self.height,
            pages,
        })
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.state.stroke = color;
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.state.stroke_width = width;
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.state.fill = color;
    }

    fn set_font(&mut self, font: &Font) {
        self.state.font = *font;
    }

    fn rotate_by(&mut self, degrees: f64) {
        self.state.angle = degrees;
    }

    fn draw_rectangle(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()> {
        let rect = resolve_anchor(bounds, anchor, self.state.angle);
        let rotated = self.begin_rotation(&rect)?;
        let el = self.rect_event(&rect, paint);
        self.write(Event::Empty(el))?;
        self.end_rotation(rotated)
    }

    fn draw_oval(&mut self, bounds: Rect, anchor: Anchor, paint: Paint) -> Result<()> {
        let rect = resolve_anchor(bounds, anchor, self.state.angle);
        let rotated = self.begin_rotation(&rect)?;
        let mut attrs = vec![
            ("cx", num(rect.center_x())),
            ("cy", num(rect.center_y())),
            ("rx", num(rect.width / 2.0)),
            ("ry", num(rect.height / 2.0)),
        ];
        attrs.extend(self.shape_attrs(paint));
        self.write(Event::Empty(element("ellipse", &attrs)))?;
        self.end_rotation(rotated)
    }

    fn draw_image(
        &mut self,
        image: &SourceImage,
        bounds: Rect,
        anchor: Anchor,
        paint: Paint,
    ) -> Result<()> {
        let rect = resolve_anchor(bounds, anchor, self.state.angle);
        let rotated = self.begin_rotation(&rect)?;

        if paint.fill {
            let background = self.rect_event(&rect, Paint::FILL);
            self.write(Event::Empty(background))?;
        }

        let fov = image.field_of_view();
        let viewport = element(
            "svg",
            &[
                ("x", num(rect.x)),
                ("y", num(rect.y)),
                ("width", num(rect.width)),
                ("height", num(rect.height)),
                (
                    "viewBox",
                    format!("{} {} {} {}", fov.x, fov.y, fov.width, fov.height),
                ),
                ("preserveAspectRatio", "none".to_string()),
                ("overflow", "hidden".to_string()),
            ],
        );
        self.write(Event::Start(viewport))?;
        self.write_image_content(image)?;
        self.write(Event::End(BytesEnd::new("svg")))?;

        if paint.stroke {
            let frame = self.rect_event(&rect, Paint::STROKE);
            self.write(Event::Empty(frame))?;
        }
        self.end_rotation(rotated)
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, anchor: Anchor) -> Result<Rect> {
        let font = self.state.font;
        let bounds = self.metrics.measure_text(text, &font);
        let rect = resolve_anchor(
            Rect::new(x, y, bounds.width, bounds.height),
            anchor,
            self.state.angle,
        );
        let rotated = self.begin_rotation(&rect)?;

        let mut attrs = vec![
            ("x", num(rect.x - bounds.x)),
            ("y", num(rect.y - bounds.y)),
            ("font-family", font.family.css_name().to_string()),
            ("font-size", num(self.metrics.font_size(&font))),
            ("fill", self.state.fill.to_hex()),
        ];
        match font.style {
            FontStyle::Plain => {}
            FontStyle::Bold => attrs.push(("font-weight", "bold".to_string())),
            FontStyle::Italic => attrs.push(("font-style", "italic".to_string())),
        }
        self.write(Event::Start(element("text", &attrs)))?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.write(Event::End(BytesEnd::new("text")))?;

        self.end_rotation(rotated)?;
        Ok(rect)
    }
}
