//! Fonts and the style snapshots for headers, images, panels and the title.

use serde::{Deserialize, Serialize};

use super::Anchor;
use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontFamily {
    #[default]
    Helvetica,
    Arial,
    Times,
    Courier,
}

impl FontFamily {
    /// Generic CSS family name, used by SVG output.
    pub fn css_name(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica, Arial, sans-serif",
            Self::Arial => "Arial, Helvetica, sans-serif",
            Self::Times => "'Times New Roman', Times, serif",
            Self::Courier => "'Courier New', Courier, monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontStyle {
    #[default]
    Plain,
    Bold,
    Italic,
}

/// Font selection. `size` is in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Font {
    #[serde(default)]
    pub family: FontFamily,
    #[serde(default)]
    pub style: FontStyle,
    pub size: f64,
}

impl Font {
    pub const fn new(family: FontFamily, style: FontStyle, size: f64) -> Self {
        Self {
            family,
            style,
            size,
        }
    }

    pub const fn helvetica(size: f64) -> Self {
        Self::new(FontFamily::Helvetica, FontStyle::Plain, size)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::helvetica(10.0)
    }
}

/// Style snapshot of a row or column header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HeaderStyle {
    pub font: Font,
    pub text_color: Rgb,
    pub frame_visible: bool,
    pub frame_thickness: f64,
    pub frame_color: Rgb,
    /// Filled behind the header text when set (requires a visible frame).
    pub background: Option<Rgb>,
}

impl Default for HeaderStyle {
    fn default() -> Self {
        Self {
            font: Font::helvetica(10.0),
            text_color: Rgb::BLACK,
            frame_visible: true,
            frame_thickness: 0.1,
            frame_color: Rgb::BLACK,
            background: None,
        }
    }
}

/// Corner of the drawn image that carries the scale bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScalebarPosition {
    #[default]
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

/// Scale bar policy captured with each image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScalebarStyle {
    pub visible: bool,
    /// Length in the image's calibrated (real-world) unit.
    pub length: f64,
    pub position: ScalebarPosition,
    pub color: Rgb,
    pub thickness: f64,
    /// Distance from the image edges.
    pub offset: f64,
}

impl Default for ScalebarStyle {
    fn default() -> Self {
        Self {
            visible: false,
            length: 0.0,
            position: ScalebarPosition::LowerLeft,
            color: Rgb::WHITE,
            thickness: 0.4,
            offset: 3.0,
        }
    }
}

/// Style snapshot of an image: title, frame and scale bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageStyle {
    pub title_font: Font,
    pub title_color: Rgb,
    pub title_position: Anchor,
    pub title_gap: f64,
    pub title_visible: bool,
    pub frame_visible: bool,
    pub frame_thickness: f64,
    pub frame_color: Rgb,
    pub scalebar: ScalebarStyle,
}

impl Default for ImageStyle {
    fn default() -> Self {
        Self {
            title_font: Font::helvetica(10.0),
            title_color: Rgb::WHITE,
            title_position: Anchor::BottomCenter,
            title_gap: 2.0,
            title_visible: true,
            frame_visible: true,
            frame_thickness: 0.1,
            frame_color: Rgb::BLACK,
            scalebar: ScalebarStyle::default(),
        }
    }
}

/// Style snapshot of a panel: label and frame around the tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PanelStyle {
    pub label_font: Font,
    pub label_color: Rgb,
    pub label_position: Anchor,
    pub label_gap: f64,
    pub frame_visible: bool,
    pub frame_thickness: f64,
    pub frame_color: Rgb,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            label_font: Font::helvetica(10.0),
            label_color: Rgb::BLACK,
            label_position: Anchor::TopLeft,
            label_gap: 2.0,
            frame_visible: false,
            frame_thickness: 0.1,
            frame_color: Rgb::BLACK,
        }
    }
}

/// Figure title styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TitleStyle {
    pub font: Font,
    pub color: Rgb,
}

impl Default for TitleStyle {
    fn default() -> Self {
        Self {
            font: Font::helvetica(24.0),
            color: Rgb::BLACK,
        }
    }
}
