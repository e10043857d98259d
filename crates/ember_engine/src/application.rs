//! Application lifecycle and frame loop
//!
//! The [`Application`] is the single top-level event sink: it owns the window
//! backend, the layer stack, and the overlay-UI backend, and drives the
//! update / overlay-render / window passes every frame. Exactly one instance
//! may be live per process.

use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;

use crate::config::ConfigError;
use crate::events::{Event, EventDispatcher, WindowClose};
use crate::foundation::time::Timestep;
use crate::layer::{Layer, LayerId, LayerStack, StackCommands};
use crate::ui::{OverlayUi, UiLayer};
use crate::window::{Window, WindowError};

static APPLICATION_LIVE: AtomicBool = AtomicBool::new(false);

/// Lifecycle states of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Window and reserved overlay are being set up
    Constructing,
    /// The frame loop is executing
    Running,
    /// The frame loop has exited; teardown pending
    ShuttingDown,
    /// All layers detached; the instance is being destroyed
    Terminated,
}

/// Application-level errors surfaced to the hosting process
#[derive(Error, Debug)]
pub enum ApplicationError {
    /// Window backend error
    #[error("window error: {0}")]
    Window(#[from] WindowError),

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// The engine's run-loop owner and top-level event sink
///
/// Construction claims the process-wide instance slot and pushes the reserved
/// UI overlay; [`run`](Self::run) then blocks until a window-close event is
/// handled. Hosts compose behavior by pushing [`Layer`]s before or during the
/// run.
pub struct Application {
    window: Box<dyn Window>,
    ui: Box<dyn OverlayUi>,
    layers: LayerStack,
    commands: StackCommands,
    state: AppState,
    running: bool,
    last_frame_time: f64,
    ui_layer: LayerId,
}

impl Application {
    /// Create the application around a window and overlay-UI backend
    ///
    /// # Panics
    ///
    /// Panics if another `Application` is already live in this process; the
    /// one-instance rule is an invariant, not a recoverable condition.
    pub fn new(window: Box<dyn Window>, ui: Box<dyn OverlayUi>) -> Self {
        assert!(
            !APPLICATION_LIVE.swap(true, Ordering::SeqCst),
            "Application already exists"
        );
        log::info!("application starting up");

        let last_frame_time = window.time();
        let mut layers = LayerStack::new();
        let ui_layer = layers.push_overlay(Box::new(UiLayer));

        Self {
            window,
            ui,
            layers,
            commands: StackCommands::new(),
            state: AppState::Constructing,
            running: true,
            last_frame_time,
            ui_layer,
        }
    }

    /// Push a regular layer below all overlays
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) -> LayerId {
        self.layers.push_layer(layer)
    }

    /// Push an overlay above everything, including the reserved UI overlay
    pub fn push_overlay(&mut self, layer: Box<dyn Layer>) -> LayerId {
        self.layers.push_overlay(layer)
    }

    /// Remove a regular layer; an absent id is a logged no-op
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        self.layers.pop_layer(id)
    }

    /// Remove an overlay; an absent id is a logged no-op
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        self.layers.pop_overlay(id)
    }

    /// Whether the frame loop will run another iteration
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Current lifecycle state
    pub fn state(&self) -> AppState {
        self.state
    }

    /// The window the application owns
    pub fn window(&self) -> &dyn Window {
        &*self.window
    }

    /// Mutable access to the window
    pub fn window_mut(&mut self) -> &mut dyn Window {
        &mut *self.window
    }

    /// Id of the reserved UI overlay layer
    pub fn ui_layer(&self) -> LayerId {
        self.ui_layer
    }

    /// Run the frame loop until shutdown
    ///
    /// Each iteration computes the frame timestep, updates every layer
    /// bottom-up, renders the debug overlay, then pumps the window backend,
    /// routing every raised event through [`on_event`](Self::on_event). The
    /// loop exits at the iteration boundary once a window-close event has
    /// been handled; no partial frame is abandoned mid-update.
    pub fn run(&mut self) {
        self.state = AppState::Running;
        log::info!("entering main loop");

        while self.running {
            let now = self.window.time();
            let timestep = Timestep::new((now - self.last_frame_time) as f32);
            self.last_frame_time = now;

            // Update pass, bottom-up; every layer updates unconditionally
            for id in self.layers.update_order() {
                if let Some(layer) = self.layers.get_mut(id) {
                    layer.on_update(timestep, &mut self.commands);
                }
            }
            self.layers.apply(&mut self.commands);

            // Debug-overlay pass, same order as update
            self.ui.begin();
            for id in self.layers.update_order() {
                if let Some(layer) = self.layers.get_mut(id) {
                    layer.on_overlay_render();
                }
            }
            self.ui.end();

            // Window pass: pump OS events and present
            for event in self.window.pump() {
                self.on_event(event);
            }
        }

        self.state = AppState::ShuttingDown;
        log::info!("main loop exited");
    }

    /// Route one event through core handling and then the layer stack
    ///
    /// Window-close goes to the internal shutdown handler before any layer
    /// sees the event, so no layer can suppress it. Delivery then walks the
    /// stack topmost-first and stops once a layer marks the event handled.
    /// An empty stack degenerates to a no-op.
    pub fn on_event(&mut self, mut event: Event) {
        log::trace!("event: {event}");

        let mut dispatcher = EventDispatcher::new(&mut event);
        dispatcher.dispatch::<WindowClose, _>(|_| self.on_window_close());

        for id in self.layers.event_order() {
            if let Some(layer) = self.layers.get_mut(id) {
                layer.on_event(&mut event, &mut self.commands);
                if event.is_handled() {
                    break;
                }
            }
        }
        self.layers.apply(&mut self.commands);
    }

    fn on_window_close(&mut self) -> bool {
        log::info!("window close requested, shutting down");
        self.running = false;
        true
    }
}

impl Drop for Application {
    fn drop(&mut self) {
        self.state = AppState::Terminated;
        // Layers detach topmost-first while the window is still alive
        self.layers.clear();
        APPLICATION_LIVE.store(false, Ordering::SeqCst);
        log::info!("application terminated");
    }
}
