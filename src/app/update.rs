use eframe::egui;
use tracing::trace;

use super::render::{PainterSurface, draw_background, mode_button};
use super::{Button, GraphApp, Mode};

fn editor_button(button: egui::PointerButton) -> Option<Button> {
    match button {
        egui::PointerButton::Primary => Some(Button::Primary),
        egui::PointerButton::Secondary => Some(Button::Secondary),
        _ => None,
    }
}

impl eframe::App for GraphApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let wants_keyboard = ctx.wants_keyboard_input();
        ctx.input_mut(|i| {
            if i.consume_key(egui::Modifiers::NONE, egui::Key::F1) {
                self.show_help = true;
            }
            if wants_keyboard {
                return;
            }
            if i.consume_key(egui::Modifiers::NONE, egui::Key::Escape) {
                self.editor.cancel();
            }
            for mode in Mode::ALL {
                let key = match mode {
                    Mode::Pan => egui::Key::P,
                    Mode::NodeEdit => egui::Key::N,
                    Mode::EdgeEdit => egui::Key::E,
                };
                if i.consume_key(egui::Modifiers::NONE, key) {
                    self.editor.select_mode(mode);
                }
            }
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Mode", |ui| {
                    let current = self.editor.mode();
                    for mode in Mode::ALL {
                        if mode_button(ui, mode, current) {
                            self.editor.select_mode(mode);
                            ui.close();
                        }
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.checkbox(&mut self.settings.show_grid, "Show grid").changed() {
                        self.persist_settings();
                    }
                    ui.separator();
                    ui.small(format!("File: {}", self.settings_path));
                    if ui.button("Reload settings").clicked() {
                        self.reload_settings();
                        ui.close();
                    }
                    if ui.button("Save settings").clicked() {
                        self.persist_settings();
                        ui.close();
                    }
                });
                if ui.button("Help (F1)").clicked() {
                    self.show_help = true;
                }
            });
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.status_text());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let offset = self.editor.view().offset;
                    ui.label(format!("Offset: {:.0}, {:.0}", offset.x, offset.y));
                    ui.separator();
                    ui.label(format!("Links: {}", self.editor.graph().edges().len()));
                    ui.separator();
                    ui.label(format!("Nodes: {}", self.editor.graph().nodes().len()));
                    ui.separator();
                    ui.label(format!("Mode: {}", self.editor.mode().label()));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());
            let origin = rect.min;
            // False while a window or menu popup covers the pointer.
            let canvas_has_pointer = response.contains_pointer();
            self.editor.set_canvas_size(rect.size());

            let events = ctx.input(|i| i.events.clone());
            for event in &events {
                match event {
                    egui::Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        ..
                    } => {
                        let Some(button) = editor_button(*button) else {
                            continue;
                        };
                        let local = (*pos - origin).to_pos2();
                        if !*pressed {
                            self.editor.on_pointer_up(local);
                        } else if canvas_has_pointer && rect.contains(*pos) {
                            self.press_canvas(local, button);
                        }
                    }
                    egui::Event::PointerMoved(pos) => {
                        self.editor.on_pointer_move((*pos - origin).to_pos2());
                    }
                    egui::Event::PointerGone => self.editor.on_pointer_leave(),
                    _ => {}
                }
            }

            let scroll_delta = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll_delta.abs() > 0.0 && canvas_has_pointer {
                // egui reports wheel-up as positive.
                self.editor.on_wheel(-scroll_delta);
            }

            let painter = ui.painter_at(rect);
            if self.settings.show_grid {
                draw_background(&painter, rect, self.editor.view(), self.settings.grid_size);
            }
            let mut surface = PainterSurface::new(&painter, origin, &self.settings);
            self.editor.scene().replay(&mut surface);
            trace!(redraws = self.editor.redraws(), "canvas painted");
        });

        super::help::draw_help_window(ctx, &mut self.show_help);
    }
}
