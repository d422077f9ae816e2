use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2, Rect};

use crate::paste::{self, ClipboardItem};

/// Input the canvas engine understands, in canvas-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    PointerDown(Pos2),
    PointerMove(Pos2),
    PointerUp(Pos2),
    /// The pointer left the canvas or the window
    PointerLeave,
    Undo,
    /// A paste or drop carrying its own data
    Paste(Vec<ClipboardItem>),
    /// Paste shortcut: read the OS clipboard
    ClipboardImageRequested,
    Resize { width: u32, height: u32 },
}

/// Ctrl+Z, or Cmd+Z on macOS. Shift+Z is left for redo-style bindings.
pub fn is_undo_shortcut(key: Key, modifiers: Modifiers) -> bool {
    key == Key::Z && modifiers.command && !modifiers.shift
}

pub fn is_paste_shortcut(key: Key, modifiers: Modifiers) -> bool {
    key == Key::V && modifiers.command
}

/// Turns raw egui input into [`CanvasEvent`]s for one canvas rectangle.
#[derive(Debug, Default)]
pub struct InputHandler {
    /// Whether the pointer was over the canvas after the last event
    inside: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect this frame's canvas events.
    pub fn process_input(&mut self, ctx: &Context, canvas_rect: Rect) -> Vec<CanvasEvent> {
        let (mut events, dropped) = ctx.input(|input| {
            (
                self.translate(&input.events, canvas_rect, input.pixels_per_point),
                input.raw.dropped_files.clone(),
            )
        });
        events.extend(
            dropped
                .iter()
                .filter_map(dropped_file_item)
                .map(|item| CanvasEvent::Paste(vec![item])),
        );
        events
    }

    /// Translate egui events. Positions are made relative to `canvas_rect`
    /// and scaled from points to physical pixels.
    pub fn translate(
        &mut self,
        events: &[Event],
        canvas_rect: Rect,
        pixels_per_point: f32,
    ) -> Vec<CanvasEvent> {
        let local = |pos: Pos2| ((pos - canvas_rect.min) * pixels_per_point).to_pos2();
        let mut out = Vec::new();
        let mut paste_requested = false;

        for event in events {
            match event {
                Event::PointerMoved(pos) => {
                    if canvas_rect.contains(*pos) {
                        self.inside = true;
                        out.push(CanvasEvent::PointerMove(local(*pos)));
                    } else if self.inside {
                        self.inside = false;
                        out.push(CanvasEvent::PointerLeave);
                    }
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } => {
                    if !canvas_rect.contains(*pos) {
                        // A release outside still has to end the gesture
                        if !*pressed && self.inside {
                            self.inside = false;
                            out.push(CanvasEvent::PointerLeave);
                        }
                        continue;
                    }
                    self.inside = true;
                    out.push(if *pressed {
                        CanvasEvent::PointerDown(local(*pos))
                    } else {
                        CanvasEvent::PointerUp(local(*pos))
                    });
                }
                Event::PointerGone => {
                    if self.inside {
                        self.inside = false;
                        out.push(CanvasEvent::PointerLeave);
                    }
                }
                Event::Key {
                    key,
                    pressed: true,
                    modifiers,
                    ..
                } => {
                    if is_undo_shortcut(*key, *modifiers) {
                        out.push(CanvasEvent::Undo);
                    } else if is_paste_shortcut(*key, *modifiers) && !paste_requested {
                        paste_requested = true;
                        out.push(CanvasEvent::ClipboardImageRequested);
                    }
                }
                // Text paste; the clipboard may still hold an image
                Event::Paste(_) if !paste_requested => {
                    paste_requested = true;
                    out.push(CanvasEvent::ClipboardImageRequested);
                }
                _ => {}
            }
        }
        out
    }
}

/// A dropped file as a clipboard item, MIME inferred from the name when
/// the platform gives none.
fn dropped_file_item(file: &egui::DroppedFile) -> Option<ClipboardItem> {
    let name = match &file.path {
        Some(path) => path.display().to_string(),
        None => file.name.clone(),
    };
    let mime = if file.mime.is_empty() {
        paste::mime_from_file_name(&name).unwrap_or_default().to_owned()
    } else {
        file.mime.clone()
    };

    let bytes = match (&file.bytes, &file.path) {
        (Some(bytes), _) => Some(bytes.to_vec()),
        #[cfg(not(target_arch = "wasm32"))]
        (None, Some(path)) => match std::fs::read(path) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                log::error!("failed to read dropped file {name}: {err}");
                return None;
            }
        },
        _ => None,
    };
    log::info!("file dropped: {name} ({mime})");
    Some(ClipboardItem { mime, bytes })
}
