//! Page and figure configuration with validation.

use serde::{Deserialize, Serialize};

use super::TitleStyle;
use crate::error::{FigureError, Result};

/// How the global scale is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageFit {
    /// Fill the printable width; rows that don't fit flow onto later pages.
    FitToWidth,
    /// Fit the whole grid on the first page.
    #[default]
    FitToHeight,
}

/// Symbols used for panel labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelScheme {
    #[default]
    LowercaseLetters,
    UppercaseLetters,
    Numbers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// ISO 216 paper sizes, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
}

impl PaperSize {
    /// Portrait (width, height).
    pub const fn dimensions(self) -> (f64, f64) {
        match self {
            Self::A0 => (841.0, 1189.0),
            Self::A1 => (594.0, 841.0),
            Self::A2 => (420.0, 594.0),
            Self::A3 => (297.0, 420.0),
            Self::A4 => (210.0, 297.0),
            Self::A5 => (148.0, 210.0),
        }
    }

    pub const fn oriented(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Page borders, in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Borders {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Borders {
    pub const fn uniform(v: f64) -> Self {
        Self {
            top: v,
            left: v,
            bottom: v,
            right: v,
        }
    }
}

impl Default for Borders {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}

/// Figure-wide configuration. Page units are millimetres for the built-in
/// paper sizes; the layout itself is unit-agnostic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FigureConfig {
    pub page_width: f64,
    pub page_height: f64,
    pub borders: Borders,
    /// Space between neighbouring tiles and between headers and tiles.
    pub gap: f64,
    pub title: Option<String>,
    pub title_style: TitleStyle,
    pub uniform_rows: bool,
    pub uniform_columns: bool,
    pub page_fit: PageFit,
    pub label_scheme: LabelScheme,
}

impl Default for FigureConfig {
    fn default() -> Self {
        let (page_width, page_height) = PaperSize::A4.dimensions();
        Self {
            page_width,
            page_height,
            borders: Borders::default(),
            gap: 2.0,
            title: None,
            title_style: TitleStyle::default(),
            uniform_rows: false,
            uniform_columns: false,
            page_fit: PageFit::default(),
            label_scheme: LabelScheme::default(),
        }
    }
}

impl FigureConfig {
    pub fn set_paper(&mut self, size: PaperSize, orientation: Orientation) {
        let (w, h) = size.oriented(orientation);
        self.page_width = w;
        self.page_height = h;
    }

    /// The title, if it has any visible text.
    pub fn visible_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// Reject page geometry that cannot hold any content.
    pub fn validate(&self) -> Result<()> {
        let finite_positive = |v: f64| v.is_finite() && v > 0.0;
        if !finite_positive(self.page_width) || !finite_positive(self.page_height) {
            return Err(FigureError::config(format!(
                "page size must be positive, got {}x{}",
                self.page_width, self.page_height
            )));
        }
        let b = &self.borders;
        if [b.top, b.left, b.bottom, b.right]
            .iter()
            .any(|v| !v.is_finite() || *v < 0.0)
        {
            return Err(FigureError::config("borders must be non-negative"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(FigureError::config("gap must be non-negative"));
        }
        if b.left + b.right >= self.page_width || b.top + b.bottom >= self.page_height {
            return Err(FigureError::config(format!(
                "borders leave no printable area on a {}x{} page",
                self.page_width, self.page_height
            )));
        }
        Ok(())
    }
}
