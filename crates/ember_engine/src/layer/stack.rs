//! Ordered layer container with regular and overlay regions

use slotmap::SlotMap;

use super::{Layer, LayerId, StackCommands, StackOp};

/// Ordered container of layers split into `[regular layers...][overlays...]`
///
/// The stack exclusively owns each layer for its lifetime and guarantees the
/// detach hook runs before a layer leaves the stack. Iteration works on id
/// snapshots so a layer removed between snapshot and visit is skipped rather
/// than faulted on.
#[derive(Default)]
pub struct LayerStack {
    layers: SlotMap<LayerId, Box<dyn Layer>>,
    order: Vec<LayerId>,
    // Index of the first overlay in `order`; regular layers insert here
    boundary: usize,
}

impl LayerStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a regular layer after all existing regular layers and below
    /// every overlay, then invoke its attach hook
    pub fn push_layer(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let id = self.layers.insert(layer);
        self.order.insert(self.boundary, id);
        self.boundary += 1;
        let layer = &mut self.layers[id];
        log::debug!("layer '{}' attached", layer.name());
        layer.on_attach();
        id
    }

    /// Insert an overlay at the very end (topmost), then invoke its attach hook
    pub fn push_overlay(&mut self, layer: Box<dyn Layer>) -> LayerId {
        let id = self.layers.insert(layer);
        self.order.push(id);
        let layer = &mut self.layers[id];
        log::debug!("overlay '{}' attached", layer.name());
        layer.on_attach();
        id
    }

    /// Remove a regular layer, invoking its detach hook first
    ///
    /// Returns the layer so the caller decides its fate; an id not present in
    /// the regular region is a logged no-op returning `None`.
    pub fn pop_layer(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let Some(pos) = self.order[..self.boundary].iter().position(|&k| k == id) else {
            log::warn!("pop_layer: layer not found in regular region");
            return None;
        };
        self.order.remove(pos);
        self.boundary -= 1;
        self.detach(id)
    }

    /// Remove an overlay, invoking its detach hook first
    ///
    /// An id not present in the overlay region is a logged no-op returning
    /// `None`.
    pub fn pop_overlay(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let Some(pos) = self.order[self.boundary..].iter().position(|&k| k == id) else {
            log::warn!("pop_overlay: overlay not found in overlay region");
            return None;
        };
        self.order.remove(self.boundary + pos);
        self.detach(id)
    }

    fn detach(&mut self, id: LayerId) -> Option<Box<dyn Layer>> {
        let mut layer = self.layers.remove(id)?;
        log::debug!("layer '{}' detached", layer.name());
        layer.on_detach();
        Some(layer)
    }

    /// Number of layers currently in the stack (both regions)
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the stack holds no layers
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Snapshot of ids in update order: regular layers in push order, then
    /// overlays in push order (bottom-up)
    pub fn update_order(&self) -> Vec<LayerId> {
        self.order.clone()
    }

    /// Snapshot of ids in event-delivery order: overlays in reverse push
    /// order, then regular layers in reverse push order (top-down)
    pub fn event_order(&self) -> Vec<LayerId> {
        self.order.iter().rev().copied().collect()
    }

    /// Get a layer by id, `None` if it has been removed
    pub fn get_mut(&mut self, id: LayerId) -> Option<&mut dyn Layer> {
        self.layers.get_mut(id).map(|boxed| &mut **boxed as &mut dyn Layer)
    }

    /// Flush queued structural operations in the order they were requested
    pub fn apply(&mut self, commands: &mut StackCommands) {
        for op in commands.drain() {
            match op {
                StackOp::PushLayer(layer) => {
                    self.push_layer(layer);
                }
                StackOp::PushOverlay(layer) => {
                    self.push_overlay(layer);
                }
                StackOp::PopLayer(id) => {
                    self.pop_layer(id);
                }
                StackOp::PopOverlay(id) => {
                    self.pop_overlay(id);
                }
            }
        }
    }

    /// Detach and drop every layer, topmost (overlay) first
    ///
    /// Used at application teardown so no layer observes a destroyed window
    /// during its own detach.
    pub fn clear(&mut self) {
        while let Some(id) = self.order.pop() {
            self.detach(id);
        }
        self.boundary = 0;
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::events::{Event, EventKind};
    use crate::foundation::time::Timestep;

    /// Records every hook invocation into a shared journal
    struct RecordingLayer {
        name: String,
        journal: Rc<RefCell<Vec<String>>>,
        consume_events: bool,
    }

    impl RecordingLayer {
        fn boxed(
            name: &str,
            journal: &Rc<RefCell<Vec<String>>>,
            consume_events: bool,
        ) -> Box<Self> {
            Box::new(Self {
                name: name.to_string(),
                journal: Rc::clone(journal),
                consume_events,
            })
        }

        fn record(&self, hook: &str) {
            self.journal.borrow_mut().push(format!("{}:{}", self.name, hook));
        }
    }

    impl Layer for RecordingLayer {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_attach(&mut self) {
            self.record("attach");
        }

        fn on_detach(&mut self) {
            self.record("detach");
        }

        fn on_update(&mut self, _timestep: Timestep, _commands: &mut StackCommands) {
            self.record("update");
        }

        fn on_event(&mut self, event: &mut Event, _commands: &mut StackCommands) {
            self.record("event");
            if self.consume_events {
                event.mark_handled();
            }
        }
    }

    fn run_update_pass(stack: &mut LayerStack, commands: &mut StackCommands) {
        for id in stack.update_order() {
            if let Some(layer) = stack.get_mut(id) {
                layer.on_update(Timestep::new(0.016), commands);
            }
        }
        stack.apply(commands);
    }

    fn deliver_event(stack: &mut LayerStack, event: &mut Event, commands: &mut StackCommands) {
        for id in stack.event_order() {
            if let Some(layer) = stack.get_mut(id) {
                layer.on_event(event, commands);
                if event.is_handled() {
                    break;
                }
            }
        }
        stack.apply(commands);
    }

    #[test]
    fn test_update_order_regular_then_overlays() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        let mut commands = StackCommands::new();

        stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        stack.push_overlay(RecordingLayer::boxed("c", &journal, false));
        // Pushed after the overlay, but must update before it
        stack.push_layer(RecordingLayer::boxed("b", &journal, false));

        journal.borrow_mut().clear();
        run_update_pass(&mut stack, &mut commands);

        assert_eq!(
            *journal.borrow(),
            vec!["a:update", "b:update", "c:update"]
        );
    }

    #[test]
    fn test_event_order_is_reverse_of_update_order() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        let mut commands = StackCommands::new();

        stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        stack.push_layer(RecordingLayer::boxed("b", &journal, false));
        stack.push_overlay(RecordingLayer::boxed("c", &journal, false));
        stack.push_overlay(RecordingLayer::boxed("d", &journal, false));

        journal.borrow_mut().clear();
        let mut event = Event::new(EventKind::AppTick);
        deliver_event(&mut stack, &mut event, &mut commands);

        assert_eq!(
            *journal.borrow(),
            vec!["d:event", "c:event", "b:event", "a:event"]
        );
    }

    #[test]
    fn test_handled_event_stops_delivery() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        let mut commands = StackCommands::new();

        // Scenario from the engine contract: A and B regular, C overlay;
        // B consumes, so delivery is C, B and A is never invoked.
        stack.push_layer(RecordingLayer::boxed("a", &journal, true));
        stack.push_layer(RecordingLayer::boxed("b", &journal, true));
        stack.push_overlay(RecordingLayer::boxed("c", &journal, false));

        journal.borrow_mut().clear();
        let mut event = Event::new(EventKind::AppTick);
        deliver_event(&mut stack, &mut event, &mut commands);

        assert_eq!(*journal.borrow(), vec!["c:event", "b:event"]);
        assert!(event.is_handled());
    }

    #[test]
    fn test_push_layer_calls_attach() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();

        stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        stack.push_overlay(RecordingLayer::boxed("b", &journal, false));

        assert_eq!(*journal.borrow(), vec!["a:attach", "b:attach"]);
    }

    #[test]
    fn test_pop_calls_detach_and_returns_layer() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();

        let id = stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        let popped = stack.pop_layer(id);

        assert!(popped.is_some());
        assert_eq!(popped.unwrap().name(), "a");
        assert_eq!(*journal.borrow(), vec!["a:attach", "a:detach"]);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_pop_absent_layer_is_noop() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();

        let id = stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        stack.pop_layer(id);

        // Second pop of the same id must not fault or change the stack
        assert!(stack.pop_layer(id).is_none());
        assert_eq!(stack.len(), 0);
    }

    #[test]
    fn test_pop_layer_does_not_remove_overlay() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();

        let overlay = stack.push_overlay(RecordingLayer::boxed("c", &journal, false));

        // Wrong-region pop is a no-op
        assert!(stack.pop_layer(overlay).is_none());
        assert_eq!(stack.len(), 1);
        assert!(stack.pop_overlay(overlay).is_some());
    }

    #[test]
    fn test_regular_region_grows_below_overlays() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        let mut commands = StackCommands::new();

        stack.push_overlay(RecordingLayer::boxed("overlay", &journal, false));
        stack.push_layer(RecordingLayer::boxed("first", &journal, false));
        stack.push_layer(RecordingLayer::boxed("second", &journal, false));

        journal.borrow_mut().clear();
        run_update_pass(&mut stack, &mut commands);

        assert_eq!(
            *journal.borrow(),
            vec!["first:update", "second:update", "overlay:update"]
        );
    }

    /// Layer that queues its own removal the first time it sees an event
    struct SelfRemovingLayer {
        name: String,
        journal: Rc<RefCell<Vec<String>>>,
        own_id: Rc<RefCell<Option<LayerId>>>,
    }

    impl Layer for SelfRemovingLayer {
        fn name(&self) -> &str {
            &self.name
        }

        fn on_detach(&mut self) {
            self.journal
                .borrow_mut()
                .push(format!("{}:detach", self.name));
        }

        fn on_event(&mut self, _event: &mut Event, commands: &mut StackCommands) {
            self.journal
                .borrow_mut()
                .push(format!("{}:event", self.name));
            if let Some(id) = *self.own_id.borrow() {
                commands.pop_layer(id);
            }
        }
    }

    #[test]
    fn test_layer_removing_itself_does_not_corrupt_iteration() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let own_id = Rc::new(RefCell::new(None));
        let mut stack = LayerStack::new();
        let mut commands = StackCommands::new();

        stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        let id = stack.push_layer(Box::new(SelfRemovingLayer {
            name: "b".to_string(),
            journal: Rc::clone(&journal),
            own_id: Rc::clone(&own_id),
        }));
        *own_id.borrow_mut() = Some(id);
        stack.push_layer(RecordingLayer::boxed("c", &journal, false));

        journal.borrow_mut().clear();
        let mut event = Event::new(EventKind::AppTick);
        deliver_event(&mut stack, &mut event, &mut commands);

        // All three layers are visited exactly once; removal lands after
        assert_eq!(
            *journal.borrow(),
            vec!["c:event", "b:event", "a:event", "b:detach"]
        );
        assert_eq!(stack.len(), 2);

        // Next delivery no longer reaches the removed layer
        journal.borrow_mut().clear();
        let mut event = Event::new(EventKind::AppTick);
        deliver_event(&mut stack, &mut event, &mut commands);
        assert_eq!(*journal.borrow(), vec!["c:event", "a:event"]);
    }

    #[test]
    fn test_apply_queued_pushes() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();
        let mut commands = StackCommands::new();

        commands.push_layer(RecordingLayer::boxed("a", &journal, false));
        commands.push_overlay(RecordingLayer::boxed("b", &journal, false));
        assert!(!commands.is_empty());

        stack.apply(&mut commands);
        assert!(commands.is_empty());
        assert_eq!(stack.len(), 2);
        assert_eq!(*journal.borrow(), vec!["a:attach", "b:attach"]);
    }

    #[test]
    fn test_clear_detaches_topmost_first() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut stack = LayerStack::new();

        stack.push_layer(RecordingLayer::boxed("a", &journal, false));
        stack.push_layer(RecordingLayer::boxed("b", &journal, false));
        stack.push_overlay(RecordingLayer::boxed("c", &journal, false));

        journal.borrow_mut().clear();
        stack.clear();

        assert_eq!(
            *journal.borrow(),
            vec!["c:detach", "b:detach", "a:detach"]
        );
        assert!(stack.is_empty());
    }
}
