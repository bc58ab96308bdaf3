use std::path::{Path, PathBuf};
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{channel, Receiver},
        Arc,
    },
    thread,
    time::Duration,
};

use eframe::egui;

use crate::{
    components::renderer::renderer_input,
    process::run_conversion,
    structs::{request::ConversionRequest, settings::Settings, update::Update},
};

const LOG_LENGTH: usize = 12;

#[derive(PartialEq, Clone, Copy)]
enum Page {
    Viewer,
    Settings,
    About,
}

pub struct App {
    settings: Settings,

    page: Page,

    // Communication
    stop_flag: Arc<AtomicBool>,
    receiver: Option<Receiver<Update>>,

    // Messages
    messages: Vec<String>,

    image_uri: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self {
            settings: Settings::default(),

            page: Page::Viewer,

            // Communication
            stop_flag: Arc::new(AtomicBool::new(false)),
            receiver: None,
            messages: Vec::new(),

            image_uri: None,
        }
    }
}

impl App {
    fn stop_conversion(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    fn handle_completion(&mut self) {
        self.receiver = None;
        self.stop_flag.store(false, Ordering::Relaxed);
    }

    fn open_file(&mut self) {
        // One conversion at a time; the button is hidden while converting,
        // this also covers the keyboard shortcut.
        if self.receiver.is_some() {
            return;
        }

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PlantUML diagrams", &["puml"])
            .pick_file()
        else {
            log::info!("No file chosen");
            self.push_message("No file chosen".to_string());
            return;
        };

        self.start_conversion(path);
    }

    fn start_conversion(&mut self, source: PathBuf) {
        self.stop_flag.store(false, Ordering::Relaxed);
        let (sender, receiver) = channel::<Update>();
        self.receiver = Some(receiver);

        let request = ConversionRequest::new(source);
        let settings = self.settings.clone();
        let stop_flag = Arc::clone(&self.stop_flag);

        thread::spawn(move || {
            run_conversion(sender, stop_flag, request, settings);
        });
    }

    fn handle_messages(&mut self, ctx: &egui::Context) {
        let Some(receiver) = &self.receiver else {
            return;
        };

        let Ok(update) = receiver.try_recv() else {
            return;
        };

        let message = match update {
            Update::Started(path) => format!("Rendering '{}'...", file_label(&path)),
            Update::Finished(request, duration) => {
                let message = format!("Rendered '{}' ({:.2?})", request.file_name(), duration);
                self.refresh_image(ctx, &request);
                self.handle_completion();
                message
            }
            Update::Failed(path, reason) => {
                self.handle_completion();
                format!("Failed to render '{}': {}", file_label(&path), reason)
            }
        };

        self.push_message(message);
    }

    fn refresh_image(&mut self, ctx: &egui::Context, request: &ConversionRequest) {
        let uri = format!("file://{}", request.target.display());

        // The same target is overwritten on every conversion, so evict any
        // cached copy before pointing the widget at it.
        ctx.forget_image(&uri);
        self.image_uri = Some(uri);

        ctx.send_viewport_cmd(egui::ViewportCommand::Title(request.file_name()));
    }

    fn push_message(&mut self, message: String) {
        self.messages.push(message);

        if self.messages.len() > LOG_LENGTH {
            self.messages.remove(0);
        }
    }

    // Pages
    fn viewer_page(&mut self, ui: &mut egui::Ui) {
        match &self.image_uri {
            Some(uri) => {
                egui::ScrollArea::both()
                    .max_height(ui.available_height() - 120.0)
                    .show(ui, |ui| {
                        ui.add(egui::Image::from_uri(uri.as_str()).fit_to_original_size(1.0));
                    });
            }
            None => {
                ui.label("Open a .puml file to render it here.");
            }
        }

        ui.add_space(8.0);

        ui.heading("Log");
        ui.label(self.messages.join("\n"));
    }

    fn settings_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("Renderer");
        renderer_input(ui, &mut self.settings);
    }

    fn about_page(&mut self, ui: &mut egui::Ui) {
        ui.heading("About");
        ui.label("Pick a .puml file, render it with an external renderer, view the result.");
        ui.label("The image is written next to the source file as '<name>.puml.png'.");
        ui.with_layout(egui::Layout::left_to_right(egui::Align::Min), |ui| {
            ui.label("Diagrams are rendered by");
            ui.hyperlink_to("PlantUML", "https://plantuml.com/");
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // State
        self.handle_messages(ctx);

        if self.receiver.is_some() {
            // Worker messages arrive without user input; keep polling.
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        if ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::O)) {
            self.open_file();
        }

        // Render
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(4.0);

            // Nav
            ui.horizontal(|ui| {
                for page in &[Page::Viewer, Page::Settings, Page::About] {
                    let label = match page {
                        Page::Viewer => "Viewer",
                        Page::Settings => "Settings",
                        Page::About => "About",
                    };

                    if ui.selectable_label(self.page == *page, label).clicked() {
                        self.page = *page;
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Max), |ui| {
                    ui.add_space(10.0);
                    if self.receiver.is_none() {
                        // Open button
                        if ui.button("Open .puml File").clicked() {
                            self.open_file();
                        }
                    } else {
                        // Cancel button (disabled once the stop flag is set)
                        ui.add_enabled_ui(!self.stop_flag.load(Ordering::Relaxed), |ui| {
                            if ui.button("Cancel").clicked() {
                                self.stop_conversion();
                            }
                        });
                        ui.spinner();
                    }
                });
            });

            ui.add_space(8.0);

            ui.separator();

            ui.add_space(8.0);

            // Content
            match self.page {
                Page::Viewer => self.viewer_page(ui),
                Page::Settings => self.settings_page(ui),
                Page::About => self.about_page(ui),
            }
        });
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
