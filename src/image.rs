use egui::{Pos2, Rect, Vec2};
use std::sync::Arc;
use tiny_skia::{ColorU8, Pixmap};

use crate::error::PasteError;
use crate::geometry;

/// Identifier of a pasted image, unique within one canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(pub u64);

impl std::fmt::Display for ImageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A decoded raster, stored premultiplied and ready to be drawn.
#[derive(Clone)]
pub struct Raster {
    pixmap: Pixmap,
}

// Pixel data is not useful in debug output
impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

impl Raster {
    /// Build a raster from straight (non-premultiplied) RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, pixels: &[u8]) -> Result<Self, PasteError> {
        if width == 0 || height == 0 {
            return Err(PasteError::EmptyImage { width, height });
        }
        let mut pixmap = Pixmap::new(width, height).ok_or(PasteError::InvalidRaster)?;
        if pixels.len() != pixmap.data().len() {
            return Err(PasteError::InvalidRaster);
        }
        for (dst, src) in pixmap.pixels_mut().iter_mut().zip(pixels.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }
        Ok(Self { pixmap })
    }

    pub fn from_dynamic(image: &::image::DynamicImage) -> Result<Self, PasteError> {
        let rgba = image.to_rgba8();
        Self::from_rgba8(rgba.width(), rgba.height(), rgba.as_raw())
    }

    /// A raster filled with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self, PasteError> {
        let pixels: Vec<u8> = rgba
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self::from_rgba8(width, height, &pixels)
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Size in pixels before any on-canvas scaling.
    pub fn natural_size(&self) -> Vec2 {
        Vec2::new(self.width() as f32, self.height() as f32)
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// An image on the canvas.
///
/// `position` and `size` describe where the image is drawn. Snapshots taken
/// from the replay engine carry the latest committed move and resize.
#[derive(Clone)]
pub struct PastedImage {
    pub id: ImageId,
    pub raster: Arc<Raster>,
    pub position: Pos2,
    pub size: Vec2,
}

impl std::fmt::Debug for PastedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PastedImage")
            .field("id", &self.id)
            .field("raster", &self.raster)
            .field("position", &self.position)
            .field("size", &self.size)
            .finish()
    }
}

// Rasters compare by identity: two images are equal only if they share the
// same decoded handle.
impl PartialEq for PastedImage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.position == other.position
            && self.size == other.size
            && Arc::ptr_eq(&self.raster, &other.raster)
    }
}

impl PastedImage {
    pub fn new(id: ImageId, raster: Arc<Raster>, position: Pos2, size: Vec2) -> Self {
        Self {
            id,
            raster,
            position,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size)
    }

    /// Width over height of the decoded raster, independent of display size.
    pub fn natural_aspect_ratio(&self) -> f32 {
        geometry::aspect_ratio(self.raster.natural_size())
    }
}
