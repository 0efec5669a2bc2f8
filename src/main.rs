mod app;
mod assets;
mod color;
mod config;
mod data;
mod format;
mod state;
mod ui;

use app::DashboardApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "La Liga Squad Efficiency",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render the club logos.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(DashboardApp::default()))
        }),
    )
}
