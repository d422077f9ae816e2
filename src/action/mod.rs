//! The action log: the canvas's only source of truth.
//!
//! Every visible change is an [`Action`] appended to the [`ActionLog`];
//! the picture on screen is rebuilt from the log by the replay engine.

mod history;

pub use history::{ActionLog, Appended};

use egui::{Pos2, Vec2};

use crate::image::{ImageId, PastedImage};
use crate::shape::ShapeRecord;
use crate::stroke::LineSegment;

/// A committed canvas operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A finished freehand stroke, all segments in one entry
    Draw { lines: Vec<LineSegment> },
    /// Introduces a new image
    Paste { image: PastedImage },
    /// Relocates an image; replay only reads `to`
    Move { image_id: ImageId, from: Pos2, to: Pos2 },
    /// Resizes an image; replay only reads `to`
    Resize { image_id: ImageId, from: Vec2, to: Vec2 },
    /// A finished line, rectangle or circle
    Shape { shape: ShapeRecord },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Draw { .. } => "draw",
            Action::Paste { .. } => "paste",
            Action::Move { .. } => "move",
            Action::Resize { .. } => "resize",
            Action::Shape { .. } => "shape",
        }
    }

    /// True for a `Move` of `id`.
    pub fn is_move_of(&self, id: ImageId) -> bool {
        matches!(self, Action::Move { image_id, .. } if *image_id == id)
    }

    /// True for a `Resize` of `id`.
    pub fn is_resize_of(&self, id: ImageId) -> bool {
        matches!(self, Action::Resize { image_id, .. } if *image_id == id)
    }
}
