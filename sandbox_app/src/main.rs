//! Sandbox application
//!
//! Minimal host for the engine: pushes one example layer, injects a few
//! input events, and runs the frame loop against the headless window backend
//! until the scripted close fires.

use ember_engine::events::{KeyPressed, MouseScrolled};
use ember_engine::prelude::*;

/// Example layer that reports updates and reacts to input
#[derive(Default)]
struct ExampleLayer {
    frames: u64,
}

impl Layer for ExampleLayer {
    fn name(&self) -> &str {
        "example"
    }

    fn on_attach(&mut self) {
        log::info!("example layer attached");
    }

    fn on_update(&mut self, timestep: Timestep, _commands: &mut StackCommands) {
        self.frames += 1;
        if self.frames % 60 == 0 {
            log::info!("frame {} ({timestep})", self.frames);
        }
    }

    fn on_event(&mut self, event: &mut Event, _commands: &mut StackCommands) {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch::<KeyPressed, _>(|key| {
            log::info!("key pressed: {:?}", key.keycode);
            // Consume keyboard input so nothing below reacts to it
            true
        });
        dispatcher.dispatch::<MouseScrolled, _>(|scroll| {
            log::info!("scrolled by {}, {}", scroll.dx, scroll.dy);
            false
        });
    }
}

fn main() -> Result<(), ApplicationError> {
    ember_engine::foundation::logging::init();

    let config = EngineConfig::default();
    let mut window = HeadlessWindow::new(config.window)?;
    window.inject(Event::new(EventKind::KeyPressed {
        keycode: KeyCode::Space,
        repeat: false,
    }));
    window.inject(Event::new(EventKind::MouseScrolled { dx: 0.0, dy: 1.5 }));
    window.close_after(240);

    let mut app = Application::new(Box::new(window), Box::new(NullOverlay));
    app.push_layer(Box::new(ExampleLayer::default()));
    app.run();

    Ok(())
}
