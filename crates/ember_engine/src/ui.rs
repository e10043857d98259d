//! Overlay-UI seam and the engine's reserved overlay layer

use crate::layer::Layer;

/// Debug-overlay UI backend
///
/// `begin`/`end` bracket the overlay render pass each frame. A real backend
/// would start and submit an immediate-mode UI frame here.
pub trait OverlayUi {
    /// Begin a UI frame
    fn begin(&mut self);

    /// End and submit the UI frame
    fn end(&mut self);
}

/// Overlay-UI backend that draws nothing
///
/// Pairs with [`HeadlessWindow`](crate::window::HeadlessWindow) for tests and
/// display-less hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl OverlayUi for NullOverlay {
    fn begin(&mut self) {}

    fn end(&mut self) {}
}

/// The reserved overlay layer the application pushes at construction
///
/// Sits above every user layer so the debug UI gets first refusal on events
/// once it grows interactive widgets. The default implementation consumes
/// nothing.
#[derive(Debug, Default)]
pub struct UiLayer;

impl Layer for UiLayer {
    fn name(&self) -> &str {
        "ui"
    }

    fn on_attach(&mut self) {
        log::debug!("ui overlay ready");
    }
}
