// Library crate: exposes the drawing surface core for integration tests and the agent interface.
// GUI-specific modules (app, ui, egui painting) remain in the binary crate.

pub mod canvas;
pub mod client;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod i18n;
pub mod interaction;
pub mod state;

/// Projection, picking and frame building. The egui painter that consumes
/// the frame stays in the binary crate.
pub mod viewport {
    pub mod controller;
    pub mod frame;
    pub mod markers;
    pub mod picking;
    pub mod projection;
}
