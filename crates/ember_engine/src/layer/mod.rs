//! Layer abstraction and runtime stack composition
//!
//! A [`Layer`] is a composable unit of per-frame behavior and event handling.
//! Layers live in a [`LayerStack`] with two insertion regions: regular layers
//! and always-on-top overlays. Update passes run bottom-up (regular layers in
//! push order, then overlays); event delivery runs in the exact reverse so the
//! topmost-drawn layer gets first refusal on every event.

use slotmap::new_key_type;

use crate::events::Event;
use crate::foundation::time::Timestep;

mod stack;

pub use stack::LayerStack;

new_key_type! {
    /// Stable handle to a layer owned by a [`LayerStack`]
    pub struct LayerId;
}

/// A pluggable unit of per-frame behavior and event handling
///
/// All hooks default to no-ops so implementors only override what they need.
/// Hooks must not panic; a failing layer converts its failure into a logged
/// no-op, since the frame loop has no per-layer recovery path.
pub trait Layer {
    /// Layer name, used for diagnostics only
    fn name(&self) -> &str {
        "layer"
    }

    /// Called once when the layer is inserted into the stack
    fn on_attach(&mut self) {}

    /// Called once when the layer is removed from the stack
    fn on_detach(&mut self) {}

    /// Called every frame with the frame delta
    ///
    /// Structural changes to the stack must go through `commands`; they take
    /// effect once the in-progress pass completes.
    fn on_update(&mut self, _timestep: Timestep, _commands: &mut StackCommands) {}

    /// Called for every event delivered to this layer
    ///
    /// Mark the event handled to stop delivery to layers below this one.
    fn on_event(&mut self, _event: &mut Event, _commands: &mut StackCommands) {}

    /// Called during the debug-overlay render pass, bracketed by the
    /// overlay-UI backend's begin/end
    fn on_overlay_render(&mut self) {}
}

pub(crate) enum StackOp {
    PushLayer(Box<dyn Layer>),
    PushOverlay(Box<dyn Layer>),
    PopLayer(LayerId),
    PopOverlay(LayerId),
}

/// Queue of pending structural mutations to a [`LayerStack`]
///
/// Layer hooks run while the stack is being iterated, so they cannot mutate
/// it directly. They queue operations here instead; the stack owner flushes
/// the queue at pass boundaries via [`LayerStack::apply`], which keeps the
/// in-progress iteration free of skipped or double-visited layers.
#[derive(Default)]
pub struct StackCommands {
    ops: Vec<StackOp>,
}

impl StackCommands {
    /// Create an empty command queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a regular-layer push
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) {
        self.ops.push(StackOp::PushLayer(layer));
    }

    /// Queue an overlay push
    pub fn push_overlay(&mut self, layer: Box<dyn Layer>) {
        self.ops.push(StackOp::PushOverlay(layer));
    }

    /// Queue removal of a regular layer
    pub fn pop_layer(&mut self, id: LayerId) {
        self.ops.push(StackOp::PopLayer(id));
    }

    /// Queue removal of an overlay
    pub fn pop_overlay(&mut self, id: LayerId) {
        self.ops.push(StackOp::PopOverlay(id));
    }

    /// Whether any operations are queued
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub(crate) fn drain(&mut self) -> Vec<StackOp> {
        std::mem::take(&mut self.ops)
    }
}
