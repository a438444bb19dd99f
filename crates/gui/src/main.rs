mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::i18n`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use geotutor_gui_lib::canvas;
pub use geotutor_gui_lib::client;
pub use geotutor_gui_lib::i18n;
pub use geotutor_gui_lib::interaction;
pub use geotutor_gui_lib::state;

use app::TutorApp;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geotutor=info,geotutor_gui_lib=info".into()),
        )
        .init();

    // Parse --scene <path> argument
    let initial_scene = parse_scene_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("GeoTutor — Gia sư hình học")
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "geotutor",
        native_options,
        Box::new(move |cc| Ok(Box::new(TutorApp::new(cc, initial_scene)))),
    ) {
        tracing::error!("Failed to start application: {e}");
    }
}

fn parse_scene_arg() -> Option<shared::Scene> {
    let args: Vec<String> = std::env::args().collect();
    let path = args
        .iter()
        .position(|a| a == "--scene")
        .and_then(|i| args.get(i + 1))?;
    match state::SceneState::load_file(std::path::Path::new(path)) {
        Ok(scene) => {
            tracing::info!("Loaded scene from {path} ({})", scene.summary());
            Some(scene)
        }
        Err(e) => {
            tracing::error!("{e}");
            None
        }
    }
}
