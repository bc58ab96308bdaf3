#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;

mod components;
mod process;
mod structs;
mod ui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        centered: true,
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "PlantUML Viewer",
        options,
        Box::new(|cc| {
            // File and PNG loaders for the rendered diagrams.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::<ui::App>::default())
        }),
    )
}
