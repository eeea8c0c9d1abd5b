//! Drawing rectangle of each image inside its tile.

use serde::Serialize;

use crate::types::{Rect, ResizePolicy};

/// Final drawing rectangle of one image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    pub page: usize,
    /// Offset and size relative to the tile origin, in page units.
    pub within_tile: Rect,
    /// Absolute page rectangle.
    pub rect: Rect,
}

/// Position an image of real size `(image_w, image_h)` inside a tile of real
/// size `(tile_w, tile_h)`. The result is in real-world units, relative to the
/// tile origin; callers apply the global scale.
///
/// `MatchMagnification` keeps the physical size and centers it, overflowing
/// small tiles. `MatchSize` scales to touch the tile on the limiting axis and
/// centers along the other one.
pub fn fit_within(tile_w: f64, tile_h: f64, image_w: f64, image_h: f64, policy: ResizePolicy) -> Rect {
    match policy {
        ResizePolicy::MatchMagnification => Rect::new(
            (tile_w - image_w) / 2.0,
            (tile_h - image_h) / 2.0,
            image_w,
            image_h,
        ),
        ResizePolicy::MatchSize => {
            if image_w <= 0.0 || image_h <= 0.0 || tile_h <= 0.0 {
                return Rect::new(tile_w / 2.0, tile_h / 2.0, 0.0, 0.0);
            }
            if image_w / image_h > tile_w / tile_h {
                let height = image_h / image_w * tile_w;
                Rect::new(0.0, (tile_h - height) / 2.0, tile_w, height)
            } else {
                let width = image_w / image_h * tile_h;
                Rect::new((tile_w - width) / 2.0, 0.0, width, tile_h)
            }
        }
    }
}

/// [`fit_within`] followed by the global scale.
pub fn place_image(
    tile_w: f64,
    tile_h: f64,
    image_w: f64,
    image_h: f64,
    policy: ResizePolicy,
    scale: f64,
) -> Rect {
    fit_within(tile_w, tile_h, image_w, image_h, policy).scaled(scale)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_match_magnification_centers_true_size() {
        let r = fit_within(100.0, 50.0, 40.0, 20.0, ResizePolicy::MatchMagnification);
        assert_eq!(r, Rect::new(30.0, 15.0, 40.0, 20.0));
    }

    #[test]
    fn test_match_magnification_may_overflow() {
        let r = fit_within(10.0, 10.0, 30.0, 20.0, ResizePolicy::MatchMagnification);
        assert_eq!(r, Rect::new(-10.0, -5.0, 30.0, 20.0));
    }

    #[test]
    fn test_match_size_taller_image_pads_sides() {
        let r = fit_within(100.0, 50.0, 80.0, 80.0, ResizePolicy::MatchSize);
        assert_eq!(r, Rect::new(25.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_match_size_wider_image_pads_top_and_bottom() {
        let r = fit_within(100.0, 100.0, 200.0, 50.0, ResizePolicy::MatchSize);
        assert_eq!(r, Rect::new(0.0, 37.5, 100.0, 25.0));
    }

    #[test_case(ResizePolicy::MatchMagnification ; "magnification")]
    #[test_case(ResizePolicy::MatchSize ; "size")]
    fn test_scale_applies_to_every_component(policy: ResizePolicy) {
        let unscaled = fit_within(100.0, 50.0, 40.0, 20.0, policy);
        let scaled = place_image(100.0, 50.0, 40.0, 20.0, policy, 0.5);
        assert_eq!(scaled, unscaled.scaled(0.5));
    }

    #[test]
    fn test_match_size_degenerate_image() {
        let r = fit_within(100.0, 50.0, 0.0, 20.0, ResizePolicy::MatchSize);
        assert_eq!(r, Rect::new(50.0, 25.0, 0.0, 0.0));
    }
}
