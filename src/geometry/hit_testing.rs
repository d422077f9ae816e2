use egui::{Pos2, Rect, Vec2};

use crate::image::{ImageId, PastedImage};

/// How a pointer-down grabbed an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grab {
    /// Grabbed the body; `offset` is pointer minus the image's top-left corner.
    Body { offset: Vec2 },
    /// Grabbed the bottom-right resize handle.
    ResizeHandle,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageHit {
    pub id: ImageId,
    pub grab: Grab,
}

/// Inclusive point-in-rectangle test.
pub fn contains(rect: Rect, pos: Pos2) -> bool {
    pos.x >= rect.min.x && pos.x <= rect.max.x && pos.y >= rect.min.y && pos.y <= rect.max.y
}

/// True when `pos` lies in the square of side `handle_size` anchored at the
/// bottom-right corner of `rect`.
///
/// Only meaningful for points already known to be inside `rect`.
pub fn in_resize_handle(rect: Rect, pos: Pos2, handle_size: f32) -> bool {
    pos.x >= rect.max.x - handle_size && pos.y >= rect.max.y - handle_size
}

/// Find the image under `pos`.
///
/// Images are tested in iteration order and the first hit wins, so callers
/// control the tie-break for overlapping images through the order they pass.
pub fn hit_test<'a>(
    images: impl IntoIterator<Item = &'a PastedImage>,
    pos: Pos2,
    handle_size: f32,
) -> Option<ImageHit> {
    let image = images.into_iter().find(|image| contains(image.rect(), pos))?;
    let grab = if in_resize_handle(image.rect(), pos, handle_size) {
        Grab::ResizeHandle
    } else {
        Grab::Body {
            offset: pos - image.position,
        }
    };
    Some(ImageHit { id: image.id, grab })
}
