use egui::Ui;

use crate::structs::settings::Settings;

pub fn renderer_input(ui: &mut Ui, settings: &mut Settings) {
    ui.horizontal(|ui| {
        ui.label("Renderer command: ");
        ui.text_edit_singleline(&mut settings.renderer_path);

        if ui.button("Browse...").clicked() {
            if let Some(path) = rfd::FileDialog::new().pick_file() {
                settings.renderer_path = path.display().to_string();
            }
        }
    });

    ui.label("Command name resolved through PATH, or a full path to the executable.");

    ui.add_space(8.0);

    ui.add(
        egui::Slider::new(&mut settings.timeout_secs, 5..=600)
            .text("Timeout (seconds)")
            .show_value(true),
    );
}
