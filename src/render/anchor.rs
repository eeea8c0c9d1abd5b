//! Anchor resolution for rotated primitives.

use crate::types::{Anchor, HAlign, Rect, VAlign};

/// Unrotated rectangle to draw (and rotate about its center) so that the
/// rotated shape's bounding box has its `anchor` point at `(bounds.x, bounds.y)`.
pub fn resolve_anchor(bounds: Rect, anchor: Anchor, degrees: f64) -> Rect {
    let Rect {
        x,
        y,
        width,
        height,
    } = bounds;
    let rad = degrees.to_radians();
    let (sin, cos) = (rad.sin().abs(), rad.cos().abs());
    let rotated_w = width * cos + height * sin;
    let rotated_h = width * sin + height * cos;

    let left = match anchor.h() {
        HAlign::Left => x - width / 2.0 + rotated_w / 2.0,
        HAlign::Center => x - width / 2.0,
        HAlign::Right => x - width / 2.0 - rotated_w / 2.0,
    };
    let top = match anchor.v() {
        VAlign::Top => y - height / 2.0 + rotated_h / 2.0,
        VAlign::Center => y - height / 2.0,
        VAlign::Bottom => y - height / 2.0 - rotated_h / 2.0,
    };
    Rect::new(left, top, width, height)
}
