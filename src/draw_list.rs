use egui::{Color32, Rect};

use crate::image::{ImageId, PastedImage};
use crate::renderer::DrawTarget;
use crate::shape::ShapeGeometry;
use crate::stroke::LineSegment;

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Segment(LineSegment),
    Shape {
        geometry: ShapeGeometry,
        color: Color32,
        width: f32,
    },
    Image {
        id: ImageId,
        rect: Rect,
    },
}

/// A draw target that records calls instead of rasterizing them.
///
/// Two replays of the same log produce equal lists, which makes the list a
/// cheap way to compare renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    calls: Vec<DrawCall>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Rectangles of the images drawn since the last clear, in draw order.
    pub fn image_rects(&self) -> Vec<(ImageId, Rect)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image { id, rect } => Some((*id, *rect)),
                _ => None,
            })
            .collect()
    }
}

impl DrawTarget for DrawList {
    fn clear(&mut self) {
        self.calls.clear();
        self.calls.push(DrawCall::Clear);
    }

    fn stroke_segment(&mut self, segment: &LineSegment) {
        self.calls.push(DrawCall::Segment(*segment));
    }

    fn stroke_shape(&mut self, geometry: ShapeGeometry, color: Color32, width: f32) {
        self.calls.push(DrawCall::Shape {
            geometry,
            color,
            width,
        });
    }

    fn draw_image(&mut self, image: &PastedImage) {
        self.calls.push(DrawCall::Image {
            id: image.id,
            rect: image.rect(),
        });
    }
}
