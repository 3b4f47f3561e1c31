use eframe::egui;

use super::Mode;

pub(super) fn draw_help_window(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Help")
        .open(open)
        .resizable(true)
        .default_width(420.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Modes");
                ui.separator();
                for mode in Mode::ALL {
                    help_row(ui, mode.glyph(), mode.label());
                }
                help_row(ui, "Wheel", "Cycle through modes");
                help_row(ui, "Escape", "Cancel drag or pending link");
                help_row(ui, "F1", "Show this window");

                ui.add_space(10.0);
                ui.label("Pan");
                help_row(ui, "Drag", "Move the canvas");

                ui.add_space(10.0);
                ui.label("Node editing");
                help_row(ui, "Click", "Place a node, or grab one nearby");
                help_row(ui, "Drag", "Move the grabbed node");
                help_row(ui, "Right-click", "Delete node and its links");

                ui.add_space(10.0);
                ui.label("Link editing");
                help_row(ui, "Click, click", "Link two nodes");
                help_row(ui, "Right-click", "Delete the nearest link");

                ui.add_space(20.0);
                ui.heading("Tips");
                ui.separator();
                ui.label("• Node numbers follow creation order and close up after a delete");
                ui.label("• Settings are read from ~/.config/graphsketch.toml or settings.toml");
            });
        });
}

fn help_row(ui: &mut egui::Ui, shortcut: &str, description: &str) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [100.0, 16.0],
            egui::Label::new(egui::RichText::new(shortcut).monospace().strong()),
        );
        ui.label(description);
    });
}
