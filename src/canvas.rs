//! The canvas engine: one per slide.
//!
//! A [`CanvasEngine`] owns the action log, the image state derived from it,
//! the visible surface with its preview buffer, and the interaction state.
//! Every input event is handled synchronously; the only asynchronous step
//! is image decoding, whose results arrive through [`PasteInbox`] and are
//! picked up by [`CanvasEngine::poll_pastes`].

use std::sync::Arc;

use egui::{Color32, Pos2, Rect};

use crate::action::{Action, ActionLog};
use crate::geometry::{self, Grab, ImageHit};
use crate::id_generator::IdGenerator;
use crate::image::{ImageId, PastedImage, Raster};
use crate::input::CanvasEvent;
use crate::paste::{self, ClipboardItem, PasteInbox, PastePayload, PasteSender};
use crate::preview::PreviewCompositor;
use crate::renderer::{self, DrawTarget, ImageState};
use crate::settings::{self, CanvasConfig, ToolSettings};
use crate::shape::{ShapeRecord, Tool};
use crate::state::InteractionState;
use crate::surface::Surface;

/// Called from the decoding thread once a paste is ready to be polled.
pub type RepaintHook = Arc<dyn Fn() + Send + Sync>;

/// Visible surface and preview buffer, always the same size.
#[derive(Debug)]
struct Viewport {
    visible: Surface,
    preview: PreviewCompositor,
}

impl Viewport {
    fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            visible: Surface::new(width, height)?,
            preview: PreviewCompositor::new(Surface::new(width, height)?),
        })
    }
}

pub struct CanvasEngine {
    config: CanvasConfig,
    settings: ToolSettings,
    log: ActionLog,
    /// Derived from `log` by the last render; never edited directly
    images: ImageState,
    viewport: Option<Viewport>,
    state: InteractionState,
    ids: IdGenerator,
    pastes: PasteInbox,
    repaint: Option<RepaintHook>,
    last_pointer: Option<Pos2>,
}

impl std::fmt::Debug for CanvasEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasEngine")
            .field("settings", &self.settings)
            .field("actions", &self.log.len())
            .field("images", &self.images.len())
            .field("state", &self.state.name())
            .field("viewport", &self.surface().map(Surface::size))
            .finish_non_exhaustive()
    }
}

impl Default for CanvasEngine {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl CanvasEngine {
    pub fn new(config: CanvasConfig) -> Self {
        Self {
            config,
            settings: ToolSettings::default(),
            log: ActionLog::new(),
            images: ImageState::new(),
            viewport: None,
            state: InteractionState::Idle,
            ids: IdGenerator::new(),
            pastes: PasteInbox::new(),
            repaint: None,
            last_pointer: None,
        }
    }

    /// Engine with a viewport already allocated.
    pub fn with_size(config: CanvasConfig, width: u32, height: u32) -> Self {
        let mut engine = Self::new(config);
        engine.resize(width, height);
        engine
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    pub fn log(&self) -> &ActionLog {
        &self.log
    }

    pub fn images(&self) -> &ImageState {
        &self.images
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn settings(&self) -> ToolSettings {
        self.settings
    }

    /// The visible surface, if the viewport has a non-zero size.
    pub fn surface(&self) -> Option<&Surface> {
        self.viewport.as_ref().map(|viewport| &viewport.visible)
    }

    pub fn surface_generation(&self) -> Option<u64> {
        self.surface().map(Surface::generation)
    }

    /// The id the next completed paste will get.
    pub fn next_image_id(&self) -> ImageId {
        self.ids.peek()
    }

    // --- Viewport and rendering ---

    /// Reallocate the visible surface and preview buffer, then replay.
    ///
    /// A zero-sized viewport drops both buffers; the log is kept.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Viewport::new(width, height);
        if self.viewport.is_none() {
            log::warn!("canvas viewport {width}x{height} has no pixels; rendering suspended");
        } else {
            log::debug!("canvas viewport resized to {width}x{height}");
        }
        self.render();
    }

    /// Rebuild the visible picture and the image state from the log.
    ///
    /// An uncommitted freehand stroke is drawn again on top, so a replay
    /// in the middle of a stroke does not wipe it.
    pub fn render(&mut self) {
        let Some(viewport) = &mut self.viewport else {
            self.images = renderer::fold_images(&self.log);
            return;
        };
        self.images = renderer::replay(&self.log, &mut viewport.visible);
        if let InteractionState::Drawing { stroke, .. } = &self.state {
            for segment in stroke.segments() {
                viewport.visible.stroke_segment(segment);
            }
        }
    }

    // --- Pointer input ---

    pub fn pointer_down(&mut self, pos: Pos2) {
        self.last_pointer = Some(pos);
        let next = match geometry::hit_test(self.images.iter(), pos, self.config.handle_size) {
            Some(ImageHit {
                id,
                grab: Grab::ResizeHandle,
            }) => InteractionState::resizing(id),
            Some(ImageHit {
                id,
                grab: Grab::Body { offset },
            }) => InteractionState::dragging(id, offset),
            None => InteractionState::drawing(pos),
        };
        if let Err(err) = self.state.transition_to(next) {
            log::warn!("ignoring pointer-down at {pos:?}: {err}");
        }
    }

    pub fn pointer_move(&mut self, pos: Pos2) {
        self.last_pointer = Some(pos);
        let ToolSettings {
            tool,
            color,
            line_width,
        } = self.settings;

        let mut needs_render = false;
        match &mut self.state {
            InteractionState::Idle => {}
            InteractionState::Drawing { anchor, stroke } => match tool.shape_kind() {
                None => {
                    let segment = stroke.extend_to(pos, color, line_width);
                    if let Some(viewport) = &mut self.viewport {
                        viewport.visible.stroke_segment(&segment);
                    }
                }
                Some(kind) => {
                    let candidate = ShapeRecord::new(kind, *anchor, pos, color, line_width);
                    if let Some(viewport) = &mut self.viewport {
                        self.images = viewport
                            .preview
                            .show(&candidate, &self.log, &mut viewport.visible);
                    }
                }
            },
            InteractionState::DraggingImage {
                image_id,
                offset,
                logged,
            } => {
                let image_id = *image_id;
                let Some(image) = self.images.get(image_id) else {
                    log::debug!("ignoring move of vanished image {image_id}");
                    return;
                };
                let from = image.position;
                let to = pos - *offset;
                let coalesce = *logged;
                self.log.coalesce_or_append(
                    |last| coalesce && last.is_move_of(image_id),
                    |last| {
                        if let Action::Move { to: current, .. } = last {
                            *current = to;
                        }
                    },
                    || Action::Move { image_id, from, to },
                );
                *logged = true;
                needs_render = true;
            }
            InteractionState::ResizingImage { image_id, logged } => {
                let image_id = *image_id;
                let Some(image) = self.images.get(image_id) else {
                    log::debug!("ignoring resize of vanished image {image_id}");
                    return;
                };
                let from = image.size;
                let to = geometry::aspect_resize(
                    image.position,
                    pos,
                    image.natural_aspect_ratio(),
                    self.config.min_image_size,
                );
                let coalesce = *logged;
                self.log.coalesce_or_append(
                    |last| coalesce && last.is_resize_of(image_id),
                    |last| {
                        if let Action::Resize { to: current, .. } = last {
                            *current = to;
                        }
                    },
                    || Action::Resize { image_id, from, to },
                );
                *logged = true;
                needs_render = true;
            }
        }

        if needs_render {
            self.render();
        }
    }

    /// End the current gesture at `pos`, committing a stroke or shape if
    /// one was being drawn.
    pub fn pointer_up(&mut self, pos: Pos2) {
        self.last_pointer = Some(pos);
        match self.state.finish() {
            InteractionState::Drawing { anchor, mut stroke } => {
                match self.settings.tool.shape_kind() {
                    None => {
                        if stroke.is_empty() {
                            return;
                        }
                        let lines = stroke.take_segments();
                        log::info!("committed stroke of {} segments", lines.len());
                        self.log.append(Action::Draw { lines });
                        self.render();
                    }
                    Some(kind) => {
                        let shape = ShapeRecord::new(
                            kind,
                            anchor,
                            pos,
                            self.settings.color,
                            self.settings.line_width,
                        );
                        log::info!("committed {:?} from {:?} to {:?}", kind, anchor, pos);
                        self.log.append(Action::Shape { shape });
                        self.render();
                    }
                }
            }
            InteractionState::DraggingImage { image_id, .. }
            | InteractionState::ResizingImage { image_id, .. } => {
                log::debug!("released image {image_id}");
            }
            InteractionState::Idle => {}
        }
    }

    /// The pointer left the canvas. Handled exactly like a release at the
    /// last known pointer position, so an in-progress stroke or shape is
    /// committed.
    pub fn pointer_leave(&mut self) {
        if self.state.is_idle() {
            return;
        }
        let pos = match (&self.state, self.last_pointer) {
            (_, Some(pos)) => pos,
            (InteractionState::Drawing { anchor, .. }, None) => *anchor,
            (_, None) => Pos2::ZERO,
        };
        log::debug!("pointer left the canvas during {}", self.state.name());
        self.pointer_up(pos);
    }

    // --- History ---

    /// Drop the most recent action and replay. Works in any interaction
    /// state; does nothing on an empty log.
    pub fn undo(&mut self) {
        let Some(action) = self.log.undo_last() else {
            log::debug!("nothing to undo");
            return;
        };
        log::info!("undid {}", action.name());
        self.state.reset_coalescing();
        self.render();
    }

    /// Empty the log. Image ids keep counting from where they were.
    pub fn clear(&mut self) {
        log::info!("cleared canvas ({} actions)", self.log.len());
        self.log.clear();
        self.state.reset_coalescing();
        self.render();
    }

    // --- Tool settings ---

    pub fn set_settings(&mut self, settings: ToolSettings) {
        self.set_tool(settings.tool);
        self.set_color(settings.color);
        self.set_line_width(settings.line_width);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.settings.tool != tool {
            log::debug!("tool: {}", tool.name());
        }
        self.settings.tool = tool;
    }

    pub fn set_color(&mut self, color: Color32) {
        self.settings.color = color;
    }

    /// Set the stroke color from a color input value such as `#ff8800`.
    /// Invalid values leave the color unchanged.
    pub fn change_color(&mut self, value: &str) {
        match settings::parse_color(value) {
            Ok(color) => self.set_color(color),
            Err(err) => log::warn!("keeping stroke color: {err}"),
        }
    }

    pub fn set_line_width(&mut self, width: f32) {
        let (min, max) = (self.config.min_line_width, self.config.max_line_width);
        self.settings.line_width = if width.is_finite() {
            width.clamp(min, max)
        } else {
            log::warn!("ignoring line width {width}");
            self.settings.line_width
        };
    }

    // --- Paste ---

    /// Register a callback run when a background decode finishes.
    pub fn set_repaint_hook(&mut self, hook: RepaintHook) {
        self.repaint = Some(hook);
    }

    pub fn paste_sender(&self) -> PasteSender {
        self.pastes.sender()
    }

    /// Start decoding `payload` in the background.
    pub fn start_paste(&self, payload: PastePayload) {
        let repaint = self.repaint.clone();
        self.paste_sender().spawn(payload, move || {
            if let Some(repaint) = repaint {
                repaint();
            }
        });
    }

    /// Handle the items of a paste event. Returns `false` when the event
    /// carried no usable image.
    pub fn paste_items(&self, items: &[ClipboardItem]) -> bool {
        match paste::select_image_item(items) {
            Ok(payload) => {
                self.start_paste(payload);
                true
            }
            Err(err) => {
                log::warn!("ignoring paste: {err}");
                false
            }
        }
    }

    /// Paste whatever image the OS clipboard currently holds.
    pub fn paste_from_system_clipboard(&self) -> bool {
        match paste::read_system_clipboard() {
            Ok(payload) => {
                self.start_paste(payload);
                true
            }
            Err(err) => {
                log::warn!("ignoring paste: {err}");
                false
            }
        }
    }

    /// Append every decoded paste that has arrived. Returns how many.
    pub fn poll_pastes(&mut self) -> usize {
        let mut count = 0;
        while let Some(raster) = self.pastes.try_recv() {
            self.complete_paste(raster);
            count += 1;
        }
        count
    }

    /// Place a decoded raster on the canvas and log it.
    ///
    /// The id is assigned here, so ids follow completion order.
    pub fn complete_paste(&mut self, raster: Raster) -> ImageId {
        let natural = raster.natural_size();
        let rect = match &self.viewport {
            Some(viewport) => geometry::paste_placement(
                natural,
                viewport.visible.size(),
                self.config.paste_max_fraction,
            ),
            None => Rect::from_min_size(Pos2::ZERO, natural),
        };
        let id = self.ids.generate();
        log::info!(
            "pasted image {id}: {}x{} at {:?}",
            raster.width(),
            raster.height(),
            rect
        );
        self.log.append(Action::Paste {
            image: PastedImage::new(id, Arc::new(raster), rect.min, rect.size()),
        });
        self.render();
        id
    }

    // --- Event dispatch ---

    pub fn handle_event(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::PointerDown(pos) => self.pointer_down(pos),
            CanvasEvent::PointerMove(pos) => self.pointer_move(pos),
            CanvasEvent::PointerUp(pos) => self.pointer_up(pos),
            CanvasEvent::PointerLeave => self.pointer_leave(),
            CanvasEvent::Undo => self.undo(),
            CanvasEvent::Paste(items) => {
                self.paste_items(&items);
            }
            CanvasEvent::ClipboardImageRequested => {
                self.paste_from_system_clipboard();
            }
            CanvasEvent::Resize { width, height } => self.resize(width, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn engine() -> CanvasEngine {
        CanvasEngine::with_size(CanvasConfig::default(), 200, 100)
    }

    fn raster(width: u32, height: u32) -> Raster {
        Raster::solid(width, height, [0, 0, 255, 255]).unwrap()
    }

    #[test]
    fn test_paste_is_scaled_and_centered() {
        let mut canvas = engine();
        let id = canvas.complete_paste(raster(200, 100));
        let image = canvas.images().get(id).unwrap();
        // min(100/200, 50/100, 1) = 0.5
        assert_eq!(image.size, Vec2::new(100.0, 50.0));
        assert_eq!(image.position, Pos2::new(50.0, 25.0));
    }

    #[test]
    fn test_small_paste_is_not_upscaled() {
        let mut canvas = engine();
        let id = canvas.complete_paste(raster(10, 20));
        let image = canvas.images().get(id).unwrap();
        assert_eq!(image.size, Vec2::new(10.0, 20.0));
        assert_eq!(image.position, Pos2::new(95.0, 40.0));
    }

    #[test]
    fn test_pointer_down_on_handle_starts_resize() {
        let mut canvas = engine();
        let id = canvas.complete_paste(raster(100, 50));
        // Image spans (50,25)..(150,75)
        canvas.pointer_down(Pos2::new(145.0, 70.0));
        assert_eq!(canvas.state(), &InteractionState::resizing(id));
    }

    #[test]
    fn test_pointer_down_on_body_records_offset() {
        let mut canvas = engine();
        let id = canvas.complete_paste(raster(100, 50));
        canvas.pointer_down(Pos2::new(60.0, 30.0));
        assert_eq!(
            canvas.state(),
            &InteractionState::dragging(id, Vec2::new(10.0, 5.0))
        );
    }

    #[test]
    fn test_second_pointer_down_is_ignored() {
        let mut canvas = engine();
        canvas.pointer_down(Pos2::new(5.0, 5.0));
        canvas.pointer_move(Pos2::new(10.0, 5.0));
        canvas.pointer_down(Pos2::new(50.0, 50.0));
        match canvas.state() {
            InteractionState::Drawing { anchor, stroke } => {
                assert_eq!(*anchor, Pos2::new(5.0, 5.0));
                assert_eq!(stroke.segments().len(), 1);
            }
            other => panic!("unexpected state {other:?}"),
        }
    }

    #[test]
    fn test_resize_keeps_aspect_ratio() {
        let mut canvas = engine();
        let id = canvas.complete_paste(raster(100, 50));
        canvas.pointer_down(Pos2::new(148.0, 73.0));
        canvas.pointer_move(Pos2::new(190.0, 80.0));
        canvas.pointer_up(Pos2::new(190.0, 80.0));

        let image = canvas.images().get(id).unwrap();
        // Drag box 140x55 is wider than 2:1, so the height drives
        assert_eq!(image.size, Vec2::new(110.0, 55.0));
        assert_eq!(canvas.log().len(), 2);
    }

    #[test]
    fn test_freehand_commit_keeps_drawn_pixels() {
        let mut canvas = engine();
        canvas.set_line_width(4.0);
        canvas.pointer_down(Pos2::new(10.0, 10.0));
        canvas.pointer_move(Pos2::new(50.0, 10.0));
        canvas.pointer_up(Pos2::new(50.0, 10.0));

        assert_eq!(canvas.surface().unwrap().pixel(30, 10).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_replay_mid_stroke_keeps_the_stroke() {
        let mut canvas = engine();
        canvas.set_line_width(4.0);
        canvas.pointer_down(Pos2::new(10.0, 10.0));
        canvas.pointer_move(Pos2::new(50.0, 10.0));
        canvas.render();
        assert_eq!(canvas.surface().unwrap().pixel(30, 10).map(|p| p[3]), Some(255));
    }

    #[test]
    fn test_click_without_move_commits_nothing() {
        let mut canvas = engine();
        canvas.pointer_down(Pos2::new(10.0, 10.0));
        canvas.pointer_up(Pos2::new(10.0, 10.0));
        assert!(canvas.log().is_empty());
        assert!(canvas.state().is_idle());
    }

    #[test]
    fn test_shape_uses_style_at_commit() {
        let mut canvas = engine();
        canvas.set_tool(Tool::Circle);
        canvas.change_color("#ff0000");
        canvas.set_line_width(5.0);
        canvas.pointer_down(Pos2::new(100.0, 50.0));
        canvas.pointer_move(Pos2::new(120.0, 50.0));
        canvas.pointer_up(Pos2::new(130.0, 50.0));

        canvas.change_color("#00ff00");
        canvas.set_line_width(9.0);

        match canvas.log().last() {
            Some(Action::Shape { shape }) => {
                assert_eq!(shape.color, Color32::RED);
                assert_eq!(shape.width, 5.0);
                assert_eq!(shape.end, Pos2::new(130.0, 50.0));
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn test_invalid_color_is_ignored() {
        let mut canvas = engine();
        canvas.change_color("#123456");
        canvas.change_color("not a color");
        assert_eq!(canvas.settings().color, Color32::from_rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn test_line_width_is_clamped() {
        let mut canvas = engine();
        canvas.set_line_width(0.0);
        assert_eq!(canvas.settings().line_width, 1.0);
        canvas.set_line_width(45.0);
        assert_eq!(canvas.settings().line_width, 20.0);
        canvas.set_line_width(f32::NAN);
        assert_eq!(canvas.settings().line_width, 20.0);
    }

    #[test]
    fn test_undo_on_empty_log_is_noop() {
        let mut canvas = engine();
        canvas.undo();
        assert!(canvas.log().is_empty());
    }

    #[test]
    fn test_undo_mid_drag_starts_a_new_move() {
        let mut canvas = engine();
        let id = canvas.complete_paste(raster(100, 50));
        canvas.pointer_down(Pos2::new(60.0, 30.0));
        canvas.pointer_move(Pos2::new(70.0, 30.0));
        canvas.pointer_move(Pos2::new(80.0, 30.0));
        assert_eq!(canvas.log().len(), 2);

        canvas.undo();
        assert_eq!(canvas.images().get(id).unwrap().position, Pos2::new(50.0, 25.0));

        canvas.pointer_move(Pos2::new(90.0, 30.0));
        assert_eq!(canvas.log().len(), 2);
        assert_eq!(
            canvas.log().last(),
            Some(&Action::Move {
                image_id: id,
                from: Pos2::new(50.0, 25.0),
                to: Pos2::new(80.0, 25.0),
            })
        );
    }

    #[test]
    fn test_drag_of_undone_paste_is_ignored() {
        let mut canvas = engine();
        canvas.complete_paste(raster(100, 50));
        canvas.pointer_down(Pos2::new(60.0, 30.0));
        canvas.undo();
        canvas.pointer_move(Pos2::new(90.0, 30.0));
        assert!(canvas.log().is_empty());
        canvas.pointer_up(Pos2::new(90.0, 30.0));
        assert!(canvas.state().is_idle());
    }

    #[test]
    fn test_zero_viewport_suspends_rendering() {
        let mut canvas = engine();
        canvas.resize(0, 0);
        assert!(canvas.surface().is_none());
        let id = canvas.complete_paste(raster(10, 10));
        assert_eq!(canvas.images().get(id).unwrap().position, Pos2::ZERO);

        canvas.resize(50, 50);
        assert!(!canvas.surface().unwrap().is_blank());
    }
}
