mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use app::DtiViewerApp;
use config::AppConfig;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::resolve();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Digital Transformation Index Viewer",
        options,
        Box::new(|cc| {
            ui::fonts::install_cjk_font(&cc.egui_ctx);
            Ok(Box::new(DtiViewerApp::new(config)))
        }),
    )
}
