//! Typed event dispatch with handled short-circuiting

use super::{Event, FromEvent};

/// Routes one event to kind-matching handlers
///
/// A dispatcher binds a single mutable [`Event`]. Each call to
/// [`dispatch`](Self::dispatch) fires only when the bound event's kind
/// matches the requested payload type and the event has not already been
/// consumed. Multiple `dispatch` calls may be chained on the same instance;
/// each is independent.
pub struct EventDispatcher<'a> {
    event: &'a mut Event,
}

impl<'a> EventDispatcher<'a> {
    /// Bind a dispatcher to the given event
    pub fn new(event: &'a mut Event) -> Self {
        Self { event }
    }

    /// Invoke `handler` if the bound event's kind matches payload type `P`
    ///
    /// The handler receives the concrete payload and returns whether it
    /// consumed the event; a `true` return marks the event handled. Returns
    /// whether the kind matched, regardless of consumption. Non-matching
    /// kinds are a no-op and the handler is not invoked; the same applies
    /// when the event was already handled by an earlier dispatch.
    pub fn dispatch<P, F>(&mut self, handler: F) -> bool
    where
        P: FromEvent,
        F: FnOnce(&P) -> bool,
    {
        let Some(payload) = P::from_event(self.event) else {
            return false;
        };
        if !self.event.is_handled() && handler(&payload) {
            self.event.mark_handled();
        }
        true
    }
}
