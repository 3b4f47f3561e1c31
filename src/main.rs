mod app;
mod geometry;
mod model;

use tracing_subscriber::EnvFilter;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Graph Sketch",
        native_options,
        Box::new(|cc| Ok(Box::new(app::GraphApp::new(cc)))),
    )
}
