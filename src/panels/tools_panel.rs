use crate::SlideboardApp;
use crate::shape::Tool;

pub fn tools_panel(app: &mut SlideboardApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            let mut settings = app.settings;
            for tool in Tool::ALL {
                if ui
                    .selectable_label(settings.tool == tool, tool.name())
                    .clicked()
                {
                    log::info!("Tool selected from UI: {}", tool.name());
                    settings.tool = tool;
                }
            }
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Color");
                ui.color_edit_button_srgba(&mut settings.color);
            });
            let (min_width, max_width) = {
                let config = app.deck.current().config();
                (config.min_line_width, config.max_line_width)
            };
            ui.add(egui::Slider::new(&mut settings.line_width, min_width..=max_width).text("Width"));
            app.update_settings(settings);

            ui.separator();

            // Undo/Clear section
            ui.horizontal(|ui| {
                let can_undo = !app.deck.current().log().is_empty();
                if ui.add_enabled(can_undo, egui::Button::new("Undo")).clicked() {
                    app.deck.undo_current();
                }
                if ui.button("Clear").clicked() {
                    app.deck.clear_current();
                }
            });

            ui.separator();
            ui.heading("Slides");

            let mut selected = None;
            for (index, slide) in app.deck.slides().iter().enumerate() {
                let label = format!("Slide {}", index + 1);
                if ui
                    .selectable_label(index == app.deck.current_index(), label)
                    .on_hover_text(format!("{} actions", slide.engine.log().len()))
                    .clicked()
                {
                    selected = Some(index);
                }
            }
            if let Some(index) = selected {
                app.deck.switch_to(index);
            }

            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    app.deck.previous();
                }
                if ui.button("▶").clicked() {
                    app.deck.next();
                }
                if ui.button("Add").clicked() {
                    app.deck.add_slide();
                }
                let can_remove = app.deck.len() > 1;
                if ui.add_enabled(can_remove, egui::Button::new("Remove")).clicked() {
                    app.deck.remove_current();
                }
            });

            ui.separator();

            let log = app.deck.current().log();
            ui.label(format!("Action log: {} entries", log.len()));
            egui::ScrollArea::vertical().show(ui, |ui| {
                egui::Grid::new("action_log_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for (index, action) in log.iter().enumerate() {
                            ui.label(format!("{}", index + 1));
                            ui.label(action.name());
                            ui.end_row();
                        }
                    });
            });
        });
}
