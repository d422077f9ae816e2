#![warn(clippy::all, rust_2018_idioms)]

pub mod action;
pub mod app;
pub mod canvas;
pub mod draw_list;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod image;
pub mod input;
pub mod panels;
pub mod paste;
pub mod preview;
pub mod renderer;
pub mod settings;
pub mod shape;
pub mod slides;
pub mod state;
pub mod stroke;
pub mod surface;

pub use action::{Action, ActionLog};
pub use app::SlideboardApp;
pub use canvas::CanvasEngine;
pub use draw_list::{DrawCall, DrawList};
pub use error::{ColorParseError, PasteError, StateTransitionError};
pub use image::{ImageId, PastedImage, Raster};
pub use input::{CanvasEvent, InputHandler};
pub use paste::{ClipboardItem, PastePayload};
pub use renderer::{DrawTarget, ImageState};
pub use settings::{CanvasConfig, ToolSettings};
pub use shape::{ShapeKind, ShapeRecord, Tool};
pub use slides::SlideDeck;
pub use state::InteractionState;
pub use stroke::LineSegment;
pub use surface::Surface;
