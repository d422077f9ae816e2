use std::sync::Arc;

use crate::input::InputHandler;
use crate::panels::{CanvasTexture, central_panel, tools_panel};
use crate::settings::{CanvasConfig, ToolSettings};
use crate::slides::SlideDeck;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
///
/// Only the tool settings survive a restart; drawings are not persisted.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SlideboardApp {
    pub(crate) settings: ToolSettings,
    #[serde(skip)]
    pub(crate) deck: SlideDeck,
    #[serde(skip)]
    pub(crate) input: InputHandler,
    #[serde(skip)]
    pub(crate) texture: CanvasTexture,
    /// Canvas size in points as of the last frame
    #[serde(skip)]
    pub(crate) viewport: Option<(u32, u32)>,
}

impl Default for SlideboardApp {
    fn default() -> Self {
        Self {
            settings: ToolSettings::default(),
            deck: SlideDeck::new(CanvasConfig::default()),
            input: InputHandler::new(),
            texture: CanvasTexture::default(),
            viewport: None,
        }
    }
}

impl SlideboardApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = match cc.storage {
            Some(storage) => eframe::get_value(storage, eframe::APP_KEY).unwrap_or_default(),
            None => Self::default(),
        };

        let ctx = cc.egui_ctx.clone();
        app.deck
            .set_repaint_hook(Arc::new(move || ctx.request_repaint()));
        app.deck.set_settings(app.settings);
        app.settings = app.deck.settings();
        app
    }

    pub fn deck(&self) -> &SlideDeck {
        &self.deck
    }

    pub fn deck_mut(&mut self) -> &mut SlideDeck {
        &mut self.deck
    }

    /// Apply edited tool settings to every slide.
    pub fn update_settings(&mut self, settings: ToolSettings) {
        if settings == self.settings {
            return;
        }
        self.deck.set_settings(settings);
        self.settings = self.deck.settings();
    }
}

impl eframe::App for SlideboardApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let arrived = self.deck.poll_pastes();
        if arrived > 0 {
            log::debug!("{arrived} pasted image(s) arrived");
        }

        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
