//! Page geometry: rectangles, anchors and alignment.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page units (x grows right, y grows down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Multiply position and size by `factor`.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
            width: self.width * factor,
            height: self.height * factor,
        }
    }

    #[must_use]
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// The point of this rectangle named by `anchor`, pulled `inset` units
    /// towards the center on every non-centered side.
    pub fn anchor_point(&self, anchor: Anchor, inset: f64) -> (f64, f64) {
        let x = match anchor.h() {
            HAlign::Left => self.x + inset,
            HAlign::Center => self.center_x(),
            HAlign::Right => self.right() - inset,
        };
        let y = match anchor.v() {
            VAlign::Top => self.y + inset,
            VAlign::Center => self.center_y(),
            VAlign::Bottom => self.bottom() - inset,
        };
        (x, y)
    }
}

/// Horizontal component of an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical component of an [`Anchor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

/// One of nine named points of a box. A primitive's coordinate argument is
/// interpreted as the position of this point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    TopLeft,
    CenterLeft,
    BottomLeft,
    TopCenter,
    Center,
    BottomCenter,
    TopRight,
    CenterRight,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::CenterLeft,
        Self::BottomLeft,
        Self::TopCenter,
        Self::Center,
        Self::BottomCenter,
        Self::TopRight,
        Self::CenterRight,
        Self::BottomRight,
    ];

    pub const fn h(self) -> HAlign {
        match self {
            Self::TopLeft | Self::CenterLeft | Self::BottomLeft => HAlign::Left,
            Self::TopCenter | Self::Center | Self::BottomCenter => HAlign::Center,
            Self::TopRight | Self::CenterRight | Self::BottomRight => HAlign::Right,
        }
    }

    pub const fn v(self) -> VAlign {
        match self {
            Self::TopLeft | Self::TopCenter | Self::TopRight => VAlign::Top,
            Self::CenterLeft | Self::Center | Self::CenterRight => VAlign::Center,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight => VAlign::Bottom,
        }
    }
}

/// Grid axis addressed by a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Row,
    Column,
}
