use egui::{Color32, Vec2};
use tiny_skia::{
    FilterQuality, LineCap, Paint, PathBuilder, Pixmap, PixmapPaint, Stroke, Transform,
};

use crate::image::PastedImage;
use crate::renderer::DrawTarget;
use crate::shape::ShapeGeometry;
use crate::stroke::LineSegment;

/// An RGBA raster the canvas draws into.
///
/// Pixels are stored premultiplied. `generation` increases on every change
/// so a display layer knows when to upload a new frame.
#[derive(Clone)]
pub struct Surface {
    pixmap: Pixmap,
    generation: u64,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("generation", &self.generation)
            .finish()
    }
}

fn paint(color: Color32) -> Paint<'static> {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

impl Surface {
    /// Allocate a transparent surface. `None` for a zero-sized or
    /// unrepresentable viewport.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Premultiplied RGBA bytes, row-major.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    /// Premultiplied RGBA of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let pixel = self.pixmap.pixel(x, y)?;
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// True when no pixel has been painted.
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&byte| byte == 0)
    }

    /// Draw `top` over this surface, pixel for pixel.
    pub fn composite(&mut self, top: &Surface) {
        self.pixmap.draw_pixmap(
            0,
            0,
            top.pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        self.generation += 1;
    }

    pub fn to_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_premultiplied(
            [self.width() as usize, self.height() as usize],
            self.pixmap.data(),
        )
    }

    fn stroke_path(&mut self, path: &tiny_skia::Path, color: Color32, stroke: &Stroke) {
        self.pixmap
            .stroke_path(path, &paint(color), stroke, Transform::identity(), None);
        self.generation += 1;
    }
}

impl DrawTarget for Surface {
    fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.generation += 1;
    }

    fn stroke_segment(&mut self, segment: &LineSegment) {
        let mut builder = PathBuilder::new();
        builder.move_to(segment.start.x, segment.start.y);
        builder.line_to(segment.end.x, segment.end.y);
        let Some(path) = builder.finish() else {
            return;
        };
        let stroke = Stroke {
            width: segment.width,
            line_cap: LineCap::Round,
            ..Stroke::default()
        };
        self.stroke_path(&path, segment.color, &stroke);
    }

    fn stroke_shape(&mut self, geometry: ShapeGeometry, color: Color32, width: f32) {
        let path = match geometry {
            ShapeGeometry::Line { from, to } => {
                let mut builder = PathBuilder::new();
                builder.move_to(from.x, from.y);
                builder.line_to(to.x, to.y);
                builder.finish()
            }
            ShapeGeometry::Rectangle(rect) => {
                let mut builder = PathBuilder::new();
                builder.move_to(rect.min.x, rect.min.y);
                builder.line_to(rect.max.x, rect.min.y);
                builder.line_to(rect.max.x, rect.max.y);
                builder.line_to(rect.min.x, rect.max.y);
                builder.close();
                builder.finish()
            }
            ShapeGeometry::Circle { center, radius } => {
                PathBuilder::from_circle(center.x, center.y, radius)
            }
        };
        // Degenerate geometry (zero radius, zero-length line) draws nothing
        let Some(path) = path else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Stroke::default()
        };
        self.stroke_path(&path, color, &stroke);
    }

    fn draw_image(&mut self, image: &PastedImage) {
        let raster = image.raster.pixmap();
        let scale_x = image.size.x / raster.width() as f32;
        let scale_y = image.size.y / raster.height() as f32;
        if !(scale_x.is_finite() && scale_y.is_finite()) || scale_x == 0.0 || scale_y == 0.0 {
            return;
        }
        let transform = Transform::from_row(
            scale_x,
            0.0,
            0.0,
            scale_y,
            image.position.x,
            image.position.y,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, raster.as_ref(), &paint, transform, None);
        self.generation += 1;
    }
}
