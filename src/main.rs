use clap::Parser;

use tjpaint::app::TjPaintApp;
use tjpaint::cli::CliArgs;
use tjpaint::settings::Settings;
use tjpaint::{log_info, logger};

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    logger::init();

    let settings = args.apply(Settings::load());
    log_info!(
        "Launch settings: {}×{} canvas, brush {} size {}, zoom step {}, on fault: {}",
        settings.canvas_width,
        settings.canvas_height,
        settings.brush.color,
        settings.brush.size,
        settings.zoom_step,
        settings.fault_policy.as_str()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_title("TJPaint"),
        ..Default::default()
    };

    eframe::run_native(
        "TJPaint",
        options,
        Box::new(move |_cc| Box::new(TjPaintApp::new(settings))),
    )
}
