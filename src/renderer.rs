//! Replay engine.
//!
//! The visible picture is never edited incrementally: every redraw clears
//! the target and folds the whole [`ActionLog`] from scratch. Strokes and
//! shapes are drawn in log order while the fold runs; images are collected
//! into an [`ImageState`] and composited on top once the fold is complete.

use std::collections::BTreeMap;

use egui::Color32;

use crate::action::{Action, ActionLog};
use crate::image::{ImageId, PastedImage};
use crate::shape::{ShapeGeometry, ShapeRecord};
use crate::stroke::LineSegment;

/// Anything the replay engine can draw into.
pub trait DrawTarget {
    /// Erase everything.
    fn clear(&mut self);

    fn stroke_segment(&mut self, segment: &LineSegment);

    fn stroke_shape(&mut self, geometry: ShapeGeometry, color: Color32, width: f32);

    /// Draw `image` scaled into its current rectangle.
    fn draw_image(&mut self, image: &PastedImage);
}

/// Draw a committed or candidate shape with its own stroke style.
pub fn draw_shape<T: DrawTarget + ?Sized>(target: &mut T, shape: &ShapeRecord) {
    target.stroke_shape(shape.geometry(), shape.color, shape.width);
}

/// Images materialized by a replay, keyed and ordered by id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageState {
    images: BTreeMap<ImageId, PastedImage>,
}

impl ImageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one action into the image map. Returns `false` when a move or
    /// resize names an image that does not exist.
    fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::Paste { image } => {
                self.images.insert(image.id, image.clone());
                true
            }
            Action::Move { image_id, to, .. } => match self.images.get_mut(image_id) {
                Some(image) => {
                    image.position = *to;
                    true
                }
                None => false,
            },
            Action::Resize { image_id, to, .. } => match self.images.get_mut(image_id) {
                Some(image) => {
                    image.size = *to;
                    true
                }
                None => false,
            },
            Action::Draw { .. } | Action::Shape { .. } => true,
        }
    }

    pub fn get(&self, id: ImageId) -> Option<&PastedImage> {
        self.images.get(&id)
    }

    pub fn contains(&self, id: ImageId) -> bool {
        self.images.contains_key(&id)
    }

    /// Images in ascending id order, the order they are composited in.
    pub fn iter(&self) -> impl Iterator<Item = &PastedImage> {
        self.images.values()
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Fold `actions` into image state without drawing anything.
pub fn fold_images(actions: &ActionLog) -> ImageState {
    let mut images = ImageState::new();
    for action in actions {
        if !images.apply(action) {
            log::debug!("ignoring {} of unknown image", action.name());
        }
    }
    images
}

/// Redraw `target` from `actions` and return the images it materialized.
pub fn replay<T: DrawTarget + ?Sized>(actions: &ActionLog, target: &mut T) -> ImageState {
    target.clear();

    let mut images = ImageState::new();
    for action in actions {
        match action {
            Action::Draw { lines } => {
                for segment in lines {
                    target.stroke_segment(segment);
                }
            }
            Action::Shape { shape } => draw_shape(target, shape),
            Action::Paste { .. } | Action::Move { .. } | Action::Resize { .. } => {
                if !images.apply(action) {
                    log::debug!("ignoring {} of unknown image", action.name());
                }
            }
        }
    }

    for image in images.iter() {
        target.draw_image(image);
    }
    images
}
