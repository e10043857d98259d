//! Event system for window and input occurrences
//!
//! Key principles:
//! - Events carry a fixed kind plus kind-specific payload fields
//! - A one-way `handled` flag marks semantic consumption; later handlers may
//!   still inspect a handled event but must not act on it
//! - Typed dispatch routes an event to the single handler whose payload type
//!   matches the event's kind (see [`EventDispatcher`])

use std::fmt;

use bitflags::bitflags;

use crate::input::{KeyCode, MouseButton};

mod dispatcher;

pub use dispatcher::EventDispatcher;

/// Event kind identification with kind-specific payload fields
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventKind {
    /// Window close was requested
    WindowClose,
    /// Window was resized
    WindowResize {
        /// New window width in pixels
        width: u32,
        /// New window height in pixels
        height: u32,
    },
    /// Window gained focus
    WindowFocus,
    /// Window lost focus
    WindowLostFocus,
    /// Window was moved on screen
    WindowMoved {
        /// New X position
        x: i32,
        /// New Y position
        y: i32,
    },
    /// Application tick
    AppTick,
    /// Application update
    AppUpdate,
    /// Application render
    AppRender,
    /// Key was pressed
    KeyPressed {
        /// The key that was pressed
        keycode: KeyCode,
        /// Whether this is an OS key-repeat
        repeat: bool,
    },
    /// Key was released
    KeyReleased {
        /// The key that was released
        keycode: KeyCode,
    },
    /// Mouse button was pressed
    MouseButtonPressed {
        /// The button that was pressed
        button: MouseButton,
    },
    /// Mouse button was released
    MouseButtonReleased {
        /// The button that was released
        button: MouseButton,
    },
    /// Mouse cursor moved
    MouseMoved {
        /// New X coordinate
        x: f32,
        /// New Y coordinate
        y: f32,
    },
    /// Mouse wheel scrolled
    MouseScrolled {
        /// Horizontal scroll offset
        dx: f32,
        /// Vertical scroll offset
        dy: f32,
    },
}

bitflags! {
    /// Category mask for coarse event filtering
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct EventCategory: u8 {
        /// Application lifecycle events
        const APPLICATION = 1 << 0;
        /// Any input device event
        const INPUT = 1 << 1;
        /// Keyboard events
        const KEYBOARD = 1 << 2;
        /// Mouse movement and scroll events
        const MOUSE = 1 << 3;
        /// Mouse button events
        const MOUSE_BUTTON = 1 << 4;
    }
}

impl EventKind {
    /// Get the category mask for this kind
    pub fn categories(&self) -> EventCategory {
        match self {
            Self::WindowClose
            | Self::WindowResize { .. }
            | Self::WindowFocus
            | Self::WindowLostFocus
            | Self::WindowMoved { .. }
            | Self::AppTick
            | Self::AppUpdate
            | Self::AppRender => EventCategory::APPLICATION,
            Self::KeyPressed { .. } | Self::KeyReleased { .. } => {
                EventCategory::INPUT | EventCategory::KEYBOARD
            }
            Self::MouseButtonPressed { .. } | Self::MouseButtonReleased { .. } => {
                EventCategory::INPUT | EventCategory::MOUSE | EventCategory::MOUSE_BUTTON
            }
            Self::MouseMoved { .. } | Self::MouseScrolled { .. } => {
                EventCategory::INPUT | EventCategory::MOUSE
            }
        }
    }
}

/// An occurrence reported by the window backend or the engine itself
///
/// The kind and payload are immutable once built; only the `handled` flag
/// changes, and only from `false` to `true`.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventKind,
    handled: bool,
}

impl Event {
    /// Create a new unhandled event of the given kind
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            handled: false,
        }
    }

    /// Get the event kind
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// Whether a handler has consumed this event's semantic effect
    pub fn is_handled(&self) -> bool {
        self.handled
    }

    /// Mark this event as consumed
    ///
    /// The flag is one-way: once set it stays set for dispatch purposes.
    pub fn mark_handled(&mut self) {
        self.handled = true;
    }

    /// Check whether the event belongs to the given category
    pub fn is_in_category(&self, category: EventCategory) -> bool {
        self.kind.categories().intersects(category)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            EventKind::WindowClose => write!(f, "WindowClose"),
            EventKind::WindowResize { width, height } => {
                write!(f, "WindowResize: {width}x{height}")
            }
            EventKind::WindowFocus => write!(f, "WindowFocus"),
            EventKind::WindowLostFocus => write!(f, "WindowLostFocus"),
            EventKind::WindowMoved { x, y } => write!(f, "WindowMoved: {x}, {y}"),
            EventKind::AppTick => write!(f, "AppTick"),
            EventKind::AppUpdate => write!(f, "AppUpdate"),
            EventKind::AppRender => write!(f, "AppRender"),
            EventKind::KeyPressed { keycode, repeat } => {
                write!(f, "KeyPressed: {keycode:?} (repeat: {repeat})")
            }
            EventKind::KeyReleased { keycode } => write!(f, "KeyReleased: {keycode:?}"),
            EventKind::MouseButtonPressed { button } => {
                write!(f, "MouseButtonPressed: {button:?}")
            }
            EventKind::MouseButtonReleased { button } => {
                write!(f, "MouseButtonReleased: {button:?}")
            }
            EventKind::MouseMoved { x, y } => write!(f, "MouseMoved: {x}, {y}"),
            EventKind::MouseScrolled { dx, dy } => write!(f, "MouseScrolled: {dx}, {dy}"),
        }
    }
}

/// Extraction of a typed payload from an [`Event`]
///
/// Implemented by one payload struct per [`EventKind`] variant so that
/// [`EventDispatcher::dispatch`] can hand handlers the concrete payload.
pub trait FromEvent: Sized {
    /// Build the payload if the event's kind matches, `None` otherwise
    fn from_event(event: &Event) -> Option<Self>;
}

macro_rules! unit_payload {
    ($(#[$doc:meta] $name:ident),+ $(,)?) => {
        $(
            #[$doc]
            #[derive(Debug, Clone, Copy, PartialEq, Eq)]
            pub struct $name;

            impl FromEvent for $name {
                fn from_event(event: &Event) -> Option<Self> {
                    matches!(event.kind(), EventKind::$name).then_some(Self)
                }
            }
        )+
    };
}

unit_payload! {
    /// Payload of [`EventKind::WindowClose`]
    WindowClose,
    /// Payload of [`EventKind::WindowFocus`]
    WindowFocus,
    /// Payload of [`EventKind::WindowLostFocus`]
    WindowLostFocus,
    /// Payload of [`EventKind::AppTick`]
    AppTick,
    /// Payload of [`EventKind::AppUpdate`]
    AppUpdate,
    /// Payload of [`EventKind::AppRender`]
    AppRender,
}

/// Payload of [`EventKind::WindowResize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowResize {
    /// New window width in pixels
    pub width: u32,
    /// New window height in pixels
    pub height: u32,
}

impl FromEvent for WindowResize {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::WindowResize { width, height } => Some(Self { width, height }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::WindowMoved`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowMoved {
    /// New X position
    pub x: i32,
    /// New Y position
    pub y: i32,
}

impl FromEvent for WindowMoved {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::WindowMoved { x, y } => Some(Self { x, y }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::KeyPressed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPressed {
    /// The key that was pressed
    pub keycode: KeyCode,
    /// Whether this is an OS key-repeat
    pub repeat: bool,
}

impl FromEvent for KeyPressed {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::KeyPressed { keycode, repeat } => Some(Self { keycode, repeat }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::KeyReleased`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyReleased {
    /// The key that was released
    pub keycode: KeyCode,
}

impl FromEvent for KeyReleased {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::KeyReleased { keycode } => Some(Self { keycode }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::MouseButtonPressed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonPressed {
    /// The button that was pressed
    pub button: MouseButton,
}

impl FromEvent for MouseButtonPressed {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::MouseButtonPressed { button } => Some(Self { button }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::MouseButtonReleased`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseButtonReleased {
    /// The button that was released
    pub button: MouseButton,
}

impl FromEvent for MouseButtonReleased {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::MouseButtonReleased { button } => Some(Self { button }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::MouseMoved`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoved {
    /// New X coordinate
    pub x: f32,
    /// New Y coordinate
    pub y: f32,
}

impl FromEvent for MouseMoved {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::MouseMoved { x, y } => Some(Self { x, y }),
            _ => None,
        }
    }
}

/// Payload of [`EventKind::MouseScrolled`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseScrolled {
    /// Horizontal scroll offset
    pub dx: f32,
    /// Vertical scroll offset
    pub dy: f32,
}

impl FromEvent for MouseScrolled {
    fn from_event(event: &Event) -> Option<Self> {
        match *event.kind() {
            EventKind::MouseScrolled { dx, dy } => Some(Self { dx, dy }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_event_is_unhandled() {
        let event = Event::new(EventKind::AppTick);
        assert!(!event.is_handled());
    }

    #[test]
    fn test_handled_flag_is_one_way() {
        let mut event = Event::new(EventKind::WindowClose);
        event.mark_handled();
        event.mark_handled();
        assert!(event.is_handled());
    }

    #[test]
    fn test_categories() {
        let key = Event::new(EventKind::KeyPressed {
            keycode: KeyCode::A,
            repeat: false,
        });
        assert!(key.is_in_category(EventCategory::KEYBOARD));
        assert!(key.is_in_category(EventCategory::INPUT));
        assert!(!key.is_in_category(EventCategory::MOUSE));

        let scroll = Event::new(EventKind::MouseScrolled { dx: 0.0, dy: 1.0 });
        assert!(scroll.is_in_category(EventCategory::MOUSE));
        assert!(!scroll.is_in_category(EventCategory::MOUSE_BUTTON));

        let close = Event::new(EventKind::WindowClose);
        assert!(close.is_in_category(EventCategory::APPLICATION));
        assert!(!close.is_in_category(EventCategory::INPUT));
    }

    #[test]
    fn test_payload_extraction() {
        let event = Event::new(EventKind::WindowResize {
            width: 1280,
            height: 720,
        });
        let resize = WindowResize::from_event(&event).unwrap();
        assert_eq!(resize.width, 1280);
        assert_eq!(resize.height, 720);
        assert!(WindowClose::from_event(&event).is_none());
    }

    #[test]
    fn test_display_formatting() {
        let event = Event::new(EventKind::WindowResize {
            width: 800,
            height: 600,
        });
        assert_eq!(event.to_string(), "WindowResize: 800x600");
    }
}
