use crate::canvas::{CanvasEngine, RepaintHook};
use crate::settings::{CanvasConfig, ToolSettings};

/// One slide and the canvas that belongs to it.
#[derive(Debug)]
pub struct Slide {
    pub id: u32,
    pub engine: CanvasEngine,
}

/// An ordered set of slides, each with its own independent canvas.
///
/// There is always at least one slide. Tool settings and the viewport size
/// are shared: they are pushed into every engine, so switching slides
/// keeps the current tool.
pub struct SlideDeck {
    slides: Vec<Slide>,
    current: usize,
    next_id: u32,
    config: CanvasConfig,
    settings: ToolSettings,
    viewport: Option<(u32, u32)>,
    repaint: Option<RepaintHook>,
}

impl std::fmt::Debug for SlideDeck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlideDeck")
            .field("slides", &self.slides)
            .field("current", &self.current)
            .field("settings", &self.settings)
            .field("viewport", &self.viewport)
            .finish_non_exhaustive()
    }
}

impl Default for SlideDeck {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl SlideDeck {
    pub fn new(config: CanvasConfig) -> Self {
        let mut deck = Self {
            slides: Vec::new(),
            current: 0,
            next_id: 1,
            config,
            settings: ToolSettings::default(),
            viewport: None,
            repaint: None,
        };
        deck.push_slide();
        deck
    }

    fn push_slide(&mut self) {
        let mut engine = CanvasEngine::new(self.config.clone());
        engine.set_settings(self.settings);
        if let Some(hook) = &self.repaint {
            engine.set_repaint_hook(hook.clone());
        }
        if let Some((width, height)) = self.viewport {
            engine.resize(width, height);
        }
        self.slides.push(Slide {
            id: self.next_id,
            engine,
        });
        self.next_id += 1;
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn current_slide(&self) -> &Slide {
        &self.slides[self.current]
    }

    pub fn current(&self) -> &CanvasEngine {
        &self.slides[self.current].engine
    }

    pub fn current_mut(&mut self) -> &mut CanvasEngine {
        &mut self.slides[self.current].engine
    }

    pub fn settings(&self) -> ToolSettings {
        self.settings
    }

    /// Append a slide and switch to it. Refused once the deck is full.
    pub fn add_slide(&mut self) -> bool {
        if self.slides.len() >= self.config.max_slides {
            log::warn!("slide limit of {} reached", self.config.max_slides);
            return false;
        }
        self.push_slide();
        self.current = self.slides.len() - 1;
        log::info!("added slide {} of {}", self.current + 1, self.slides.len());
        true
    }

    /// Remove the current slide. The last remaining slide is never removed.
    pub fn remove_current(&mut self) -> bool {
        if self.slides.len() <= 1 {
            log::warn!("cannot remove the only slide");
            return false;
        }
        let removed = self.slides.remove(self.current);
        self.current = self.current.min(self.slides.len() - 1);
        log::info!("removed slide #{}", removed.id);
        true
    }

    /// Make slide `index` current. Out-of-range indices are ignored.
    pub fn switch_to(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            log::debug!("no slide at index {index}");
            return false;
        }
        self.current = index;
        true
    }

    pub fn next(&mut self) -> bool {
        self.switch_to(self.current + 1)
    }

    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.switch_to(index),
            None => false,
        }
    }

    pub fn clear_current(&mut self) {
        self.current_mut().clear();
    }

    pub fn undo_current(&mut self) {
        self.current_mut().undo();
    }

    /// Resize every slide's viewport.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = Some((width, height));
        for slide in &mut self.slides {
            slide.engine.resize(width, height);
        }
    }

    pub fn set_settings(&mut self, settings: ToolSettings) {
        for slide in &mut self.slides {
            slide.engine.set_settings(settings);
        }
        // Read back so the deck holds the clamped values
        self.settings = self.current().settings();
    }

    pub fn set_repaint_hook(&mut self, hook: RepaintHook) {
        for slide in &mut self.slides {
            slide.engine.set_repaint_hook(hook.clone());
        }
        self.repaint = Some(hook);
    }

    /// Drain finished pastes on every slide. Returns how many arrived.
    pub fn poll_pastes(&mut self) -> usize {
        self.slides
            .iter_mut()
            .map(|slide| slide.engine.poll_pastes())
            .sum()
    }
}
