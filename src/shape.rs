use egui::{Color32, Pos2, Rect};
use serde::{Deserialize, Serialize};

use crate::geometry;

/// Drawing tool selected in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    #[default]
    Freehand,
    Line,
    Rectangle,
    Circle,
}

impl Tool {
    pub const ALL: [Tool; 4] = [Tool::Freehand, Tool::Line, Tool::Rectangle, Tool::Circle];

    pub fn name(&self) -> &'static str {
        match self {
            Tool::Freehand => "Freehand",
            Tool::Line => "Line",
            Tool::Rectangle => "Rectangle",
            Tool::Circle => "Circle",
        }
    }

    /// The parametric shape this tool commits, `None` for freehand.
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            Tool::Freehand => None,
            Tool::Line => Some(ShapeKind::Line),
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Line,
    Rectangle,
    Circle,
}

/// A committed parametric shape.
///
/// Only the drag endpoints are stored; the drawable geometry is derived
/// on demand by [`ShapeRecord::geometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeRecord {
    pub kind: ShapeKind,
    pub start: Pos2,
    pub end: Pos2,
    pub color: Color32,
    pub width: f32,
}

/// Geometry of a shape, ready to be stroked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Line { from: Pos2, to: Pos2 },
    Rectangle(Rect),
    Circle { center: Pos2, radius: f32 },
}

impl ShapeRecord {
    pub fn new(kind: ShapeKind, start: Pos2, end: Pos2, color: Color32, width: f32) -> Self {
        Self {
            kind,
            start,
            end,
            color,
            width,
        }
    }

    pub fn geometry(&self) -> ShapeGeometry {
        match self.kind {
            ShapeKind::Line => ShapeGeometry::Line {
                from: self.start,
                to: self.end,
            },
            ShapeKind::Rectangle => ShapeGeometry::Rectangle(Rect::from_two_pos(self.start, self.end)),
            ShapeKind::Circle => ShapeGeometry::Circle {
                center: self.start,
                radius: geometry::distance(self.start, self.end),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_radius_from_drag() {
        let shape = ShapeRecord::new(
            ShapeKind::Circle,
            Pos2::new(10.0, 10.0),
            Pos2::new(13.0, 14.0),
            Color32::BLACK,
            2.0,
        );
        assert_eq!(
            shape.geometry(),
            ShapeGeometry::Circle {
                center: Pos2::new(10.0, 10.0),
                radius: 5.0
            }
        );
    }

    #[test]
    fn test_rectangle_normalizes_corners() {
        let shape = ShapeRecord::new(
            ShapeKind::Rectangle,
            Pos2::new(60.0, 40.0),
            Pos2::new(10.0, 10.0),
            Color32::BLACK,
            2.0,
        );
        let ShapeGeometry::Rectangle(rect) = shape.geometry() else {
            panic!("expected a rectangle");
        };
        assert_eq!(rect.min, Pos2::new(10.0, 10.0));
        assert_eq!(rect.max, Pos2::new(60.0, 40.0));
    }

    #[test]
    fn test_freehand_has_no_shape() {
        assert_eq!(Tool::Freehand.shape_kind(), None);
        assert_eq!(Tool::Circle.shape_kind(), Some(ShapeKind::Circle));
    }
}
