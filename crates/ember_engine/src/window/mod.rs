//! Window backend seam
//!
//! The engine never talks to a native windowing API directly; it drives a
//! [`Window`] trait object. A backend creates the native window, pumps OS
//! events into engine [`Event`]s, presents frames, and reports a monotonic
//! clock. The in-crate [`HeadlessWindow`] backend serves tests and headless
//! hosts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::events::Event;

mod headless;

pub use headless::HeadlessWindow;

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Window width
    pub width: u32,

    /// Window height
    pub height: u32,

    /// VSync setting
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Ember Engine Application".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Window backend errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// Native window creation failed
    #[error("window creation failed: {0}")]
    CreationFailed(String),

    /// The backend cannot run in this environment
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),
}

/// A native window owned by the application
///
/// `pump` is the opaque synchronous boundary of the frame loop: it processes
/// the backend's queued OS events and presents the frame. The application
/// drains the returned events into its own event routing, so delivery happens
/// on the loop thread, after the update and overlay passes of the same
/// iteration.
pub trait Window {
    /// The configuration the window was created with
    fn config(&self) -> &WindowConfig;

    /// Current framebuffer size in pixels
    fn size(&self) -> (u32, u32);

    /// Change the window title
    fn set_title(&mut self, title: &str);

    /// Monotonic time in fractional seconds
    fn time(&self) -> f64;

    /// Process pending OS events and present the frame
    ///
    /// Returns the events raised since the previous pump, oldest first.
    fn pump(&mut self) -> Vec<Event>;
}
