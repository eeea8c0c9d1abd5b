//! JSON figure descriptions.
//!
//! A description lists the configuration, the starting styles, headers and
//! images of a figure. Image bytes are read from `path` relative to the
//! description's directory.
//!
//! ```json
//! {
//!   "config": { "title": "Cells", "gap": 3 },
//!   "columnHeaders": [{ "index": 0, "text": "DAPI" }],
//!   "images": [
//!     { "row": 0, "col": 0, "key": "dapi", "widthPx": 512, "heightPx": 512,
//!       "calibration": { "pixelWidth": 0.1, "pixelHeight": 0.1, "unit": "um" },
//!       "path": "dapi.png" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::figure::Figure;
use crate::types::{
    Axis, Calibration, FigureConfig, HeaderStyle, ImageStyle, OverlayShape, PanelStyle, PixelRect,
    ResizePolicy, SourceImage,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigureDescription {
    pub config: FigureConfig,
    pub header_style: HeaderStyle,
    pub image_style: ImageStyle,
    pub panel_style: PanelStyle,
    pub row_headers: Vec<HeaderSpec>,
    pub column_headers: Vec<HeaderSpec>,
    pub images: Vec<ImageSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSpec {
    pub index: usize,
    pub text: String,
    /// Overrides the description-wide header style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<HeaderStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSpec {
    pub row: usize,
    pub col: usize,
    pub key: String,
    pub width_px: u32,
    pub height_px: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<Calibration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_of_view: Option<PixelRect>,
    #[serde(default)]
    pub resize: ResizePolicy,
    /// Encoded image file, relative to the description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// MIME type of `path`; guessed from the extension when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub overlay: Vec<OverlayShape>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ImageStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel: Option<PanelStyle>,
}

/// MIME type for an image file name.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        Some("tif" | "tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

impl FigureDescription {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build the figure, reading image files relative to `base_dir`.
    pub fn into_figure(self, base_dir: &Path) -> Result<Figure> {
        let mut figure = Figure::with_config(self.config);
        *figure.header_style_mut() = self.header_style;
        *figure.image_style_mut() = self.image_style;
        *figure.panel_style_mut() = self.panel_style;

        let headers = self
            .row_headers
            .into_iter()
            .map(|h| (Axis::Row, h))
            .chain(self.column_headers.into_iter().map(|h| (Axis::Column, h)));
        for (axis, header) in headers {
            let style = header
                .style
                .unwrap_or_else(|| figure.header_style().clone());
            figure.set_header_with_style(axis, header.index, header.text, style);
        }

        for mut spec in self.images {
            let (row, col, resize) = (spec.row, spec.col, spec.resize);
            let style = spec
                .style
                .take()
                .unwrap_or_else(|| figure.image_style().clone());
            let panel = spec
                .panel
                .take()
                .unwrap_or_else(|| figure.panel_style().clone());
            let image = spec.into_source(base_dir)?;
            figure.add_image_with_styles(row, col, image, resize, style, panel);
        }

        tracing::debug!(
            rows = figure.grid().n_rows(),
            cols = figure.grid().n_cols(),
            "built figure from description"
        );
        Ok(figure)
    }
}

impl ImageSpec {
    fn into_source(self, base_dir: &Path) -> Result<SourceImage> {
        let mut image = SourceImage::new(self.key, self.width_px, self.height_px);
        if let Some(title) = self.title {
            image = image.with_title(title);
        }
        if let Some(calibration) = self.calibration {
            image = image.with_calibration(calibration);
        }
        if let Some(fov) = self.field_of_view {
            image = image.with_field_of_view(fov);
        }
        if let Some(path) = self.path {
            let full = base_dir.join(&path);
            let bytes = std::fs::read(&full)?;
            let mime = self
                .mime
                .unwrap_or_else(|| mime_for_path(&path).to_string());
            image = image.with_data(mime, bytes);
        }
        for shape in self.overlay {
            image = image.with_overlay(shape);
        }
        Ok(image)
    }
}
