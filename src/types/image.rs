//! Source images, their calibration and overlays, and grid entries.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ImageStyle, Rect};
use crate::color::Rgb;
use crate::error::{FigureError, Result};

/// How an image is sized inside its tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizePolicy {
    /// Keep the true physical scale, centered in the tile.
    #[default]
    MatchMagnification,
    /// Fit the tile while preserving aspect ratio.
    MatchSize,
}

/// Physical size of one pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Calibration {
    pub pixel_width: f64,
    pub pixel_height: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

fn default_unit() -> String {
    "pixel".to_string()
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            pixel_width: 1.0,
            pixel_height: 1.0,
            unit: default_unit(),
        }
    }
}

/// Pixel-space rectangle inside the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Encoded image bytes shared between every entry that shows the same image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    pub mime: String,
    pub bytes: Arc<[u8]>,
}

/// Overlay annotation in source-image pixel coordinates. Only drawing
/// surfaces look at these; layout ignores them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OverlayShape {
    Rectangle {
        bounds: Rect,
        color: Rgb,
        #[serde(default = "default_overlay_width")]
        stroke_width: f64,
    },
    Oval {
        bounds: Rect,
        color: Rgb,
        #[serde(default = "default_overlay_width")]
        stroke_width: f64,
    },
}

fn default_overlay_width() -> f64 {
    1.0
}

/// A calibrated source image: pixel extent, pixel size, the visible field of
/// view and an opaque drawable handle.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    key: String,
    title: Option<String>,
    width_px: u32,
    height_px: u32,
    calibration: Calibration,
    field_of_view: PixelRect,
    data: Option<ImageData>,
    overlay: Vec<OverlayShape>,
}

impl SourceImage {
    /// An uncalibrated image showing its full extent.
    pub fn new(key: impl Into<String>, width_px: u32, height_px: u32) -> Self {
        Self {
            key: key.into(),
            title: None,
            width_px,
            height_px,
            calibration: Calibration::default(),
            field_of_view: PixelRect::new(0, 0, width_px, height_px),
            data: None,
            overlay: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_calibration(mut self, calibration: Calibration) -> Self {
        self.calibration = calibration;
        self
    }

    /// Restrict the visible area; clamped to the image bounds.
    #[must_use]
    pub fn with_field_of_view(mut self, fov: PixelRect) -> Self {
        let x = fov.x.min(self.width_px);
        let y = fov.y.min(self.height_px);
        self.field_of_view = PixelRect::new(
            x,
            y,
            fov.width.min(self.width_px - x),
            fov.height.min(self.height_px - y),
        );
        self
    }

    #[must_use]
    pub fn with_data(mut self, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        self.data = Some(ImageData {
            mime: mime.into(),
            bytes: bytes.into(),
        });
        self
    }

    #[must_use]
    pub fn with_overlay(mut self, shape: OverlayShape) -> Self {
        self.overlay.push(shape);
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    pub fn calibration(&self) -> &Calibration {
        &self.calibration
    }

    pub fn field_of_view(&self) -> PixelRect {
        self.field_of_view
    }

    pub fn data(&self) -> Option<&ImageData> {
        self.data.as_ref()
    }

    pub fn overlay(&self) -> &[OverlayShape] {
        &self.overlay
    }

    /// Field-of-view width times pixel width.
    pub fn real_width(&self) -> f64 {
        f64::from(self.field_of_view.width) * self.calibration.pixel_width
    }

    /// Field-of-view height times pixel height.
    pub fn real_height(&self) -> f64 {
        f64::from(self.field_of_view.height) * self.calibration.pixel_height
    }

    /// Reject images without a usable physical extent.
    pub fn validate(&self) -> Result<()> {
        let c = &self.calibration;
        if !(c.pixel_width.is_finite() && c.pixel_width > 0.0)
            || !(c.pixel_height.is_finite() && c.pixel_height > 0.0)
        {
            return Err(FigureError::config(format!(
                "image '{}': pixel size must be positive, got {}x{}",
                self.key, c.pixel_width, c.pixel_height
            )));
        }
        if self.field_of_view.width == 0 || self.field_of_view.height == 0 {
            return Err(FigureError::config(format!(
                "image '{}': empty field of view",
                self.key
            )));
        }
        Ok(())
    }
}

/// An image placed in a grid cell, with the style captured at insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageEntry {
    pub source: SourceImage,
    pub resize: ResizePolicy,
    pub style: ImageStyle,
}

impl ImageEntry {
    pub fn real_width(&self) -> f64 {
        self.source.real_width()
    }

    pub fn real_height(&self) -> f64 {
        self.source.real_height()
    }
}
