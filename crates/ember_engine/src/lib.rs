//! # Ember Engine
//!
//! A layered application run-loop engine. One long-lived [`Application`]
//! owns a window, drives a fixed update/render cycle, and routes input and
//! window events through an ordered stack of pluggable [`Layer`]s.
//!
//! ## Features
//!
//! - **Layer Stack**: Runtime-composable handlers with two insertion regions
//!   (regular layers and always-on-top overlays)
//! - **Event Dispatch**: Typed event routing with handled short-circuiting
//! - **Frame Loop**: Delta-time computation passed to every update hook
//! - **Backend Seams**: Window and overlay-UI backends plug in via traits
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ember_engine::prelude::*;
//!
//! struct MyLayer;
//!
//! impl Layer for MyLayer {
//!     fn name(&self) -> &str {
//!         "my_layer"
//!     }
//!
//!     fn on_update(&mut self, timestep: Timestep, _commands: &mut StackCommands) {
//!         // Per-frame logic, `timestep` is the frame delta in seconds
//!         let _ = timestep.seconds();
//!     }
//! }
//!
//! fn main() -> Result<(), ApplicationError> {
//!     ember_engine::foundation::logging::init();
//!     let window = HeadlessWindow::new(WindowConfig::default())?;
//!     let mut app = Application::new(Box::new(window), Box::new(NullOverlay));
//!     app.push_layer(Box::new(MyLayer));
//!     app.run();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod events;
pub mod foundation;
pub mod input;
pub mod layer;
pub mod ui;
pub mod window;

mod application;

pub use application::{AppState, Application, ApplicationError};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{ConfigError, EngineConfig},
        events::{Event, EventCategory, EventDispatcher, EventKind},
        foundation::time::Timestep,
        input::{KeyCode, MouseButton},
        layer::{Layer, LayerId, StackCommands},
        ui::{NullOverlay, OverlayUi},
        window::{HeadlessWindow, Window, WindowConfig, WindowError},
        AppState, Application, ApplicationError,
    };
}
