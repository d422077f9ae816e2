//! Coordinate math shared by the canvas engine.
//!
//! Everything here is a pure function of its inputs so the interaction
//! state machine and the replay engine agree on the numbers.

use egui::{Pos2, Rect, Vec2};

pub mod hit_testing;

pub use hit_testing::{Grab, ImageHit, contains, hit_test, in_resize_handle};

/// Euclidean distance between two points (circle radius from its drag).
pub fn distance(a: Pos2, b: Pos2) -> f32 {
    a.distance(b)
}

/// Natural aspect ratio (width / height) of a raster size.
///
/// Degenerate heights fall back to a square ratio.
pub fn aspect_ratio(natural: Vec2) -> f32 {
    if natural.y > 0.0 && natural.x > 0.0 {
        natural.x / natural.y
    } else {
        1.0
    }
}

/// Fit a dragged size to `ratio`.
///
/// When the dragged box is wider than the ratio, the height drives the
/// result; otherwise the width does.
pub fn aspect_fit_size(drag: Vec2, ratio: f32) -> Vec2 {
    if drag.x / drag.y > ratio {
        Vec2::new(drag.y * ratio, drag.y)
    } else {
        Vec2::new(drag.x, drag.x / ratio)
    }
}

/// Grow `size` uniformly until neither side is below `min_side`.
pub fn clamp_min_size(size: Vec2, min_side: f32) -> Vec2 {
    if !size.x.is_finite() || !size.y.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
        return size;
    }
    let scale = (min_side / size.x).max(min_side / size.y).max(1.0);
    size * scale
}

/// Resize an image anchored at `top_left` so its bottom-right corner
/// follows `pointer`, keeping `ratio` and a minimum side length.
pub fn aspect_resize(top_left: Pos2, pointer: Pos2, ratio: f32, min_side: f32) -> Vec2 {
    let fitted = aspect_fit_size(pointer - top_left, ratio);
    if fitted.x.is_finite() && fitted.y.is_finite() && fitted.x > 0.0 && fitted.y > 0.0 {
        clamp_min_size(fitted, min_side)
    } else {
        // Dragged past the anchor: collapse to the smallest allowed box.
        clamp_min_size(Vec2::new(ratio, 1.0), min_side)
    }
}

/// Where a freshly pasted image lands.
///
/// The image is scaled down (never up) to fit `max_fraction` of the
/// viewport and centered in it.
pub fn paste_placement(natural: Vec2, viewport: Vec2, max_fraction: f32) -> Rect {
    let scale = (viewport.x * max_fraction / natural.x)
        .min(viewport.y * max_fraction / natural.y)
        .min(1.0);
    let size = natural * scale;
    let min = Pos2::new((viewport.x - size.x) / 2.0, (viewport.y - size.y) / 2.0);
    Rect::from_min_size(min, size)
}
