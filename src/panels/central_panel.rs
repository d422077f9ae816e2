use egui::{Color32, Context, Pos2, Rect, TextureHandle, TextureOptions};

use crate::SlideboardApp;
use crate::slides::SlideDeck;

/// The GPU copy of the current slide's visible surface.
///
/// Re-uploaded only when the slide, its size, or its surface generation
/// changes.
#[derive(Default)]
pub struct CanvasTexture {
    handle: Option<TextureHandle>,
    /// (slide id, width, height, generation) of the uploaded frame
    version: Option<(u32, u32, u32, u64)>,
}

impl CanvasTexture {
    fn sync(&mut self, ctx: &Context, deck: &SlideDeck) {
        let slide = deck.current_slide();
        let Some(surface) = slide.engine.surface() else {
            self.handle = None;
            self.version = None;
            return;
        };
        let version = (slide.id, surface.width(), surface.height(), surface.generation());
        if self.version == Some(version) {
            return;
        }

        let image = surface.to_color_image();
        match &mut self.handle {
            Some(handle) => handle.set(image, TextureOptions::LINEAR),
            None => self.handle = Some(ctx.load_texture("canvas", image, TextureOptions::LINEAR)),
        }
        self.version = Some(version);
    }
}

pub fn central_panel(app: &mut SlideboardApp, ctx: &Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        // One surface pixel per physical pixel
        let pixels_per_point = ctx.pixels_per_point();
        let size = (
            (canvas_rect.width() * pixels_per_point).round().max(0.0) as u32,
            (canvas_rect.height() * pixels_per_point).round().max(0.0) as u32,
        );
        if app.viewport != Some(size) {
            app.viewport = Some(size);
            app.deck.resize(size.0, size.1);
        }

        // Handle input
        let events = app.input.process_input(ctx, canvas_rect);
        let engine = app.deck.current_mut();
        for event in events {
            engine.handle_event(event);
        }

        // Render the canvas
        app.texture.sync(ctx, &app.deck);
        painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);
        if let Some(handle) = &app.texture.handle {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(handle.id(), canvas_rect, uv, Color32::WHITE);
        }
    });
}
