//! Headless window backend
//!
//! No native window is created; events are injected programmatically and the
//! clock is the process monotonic clock. Used by tests and by hosts that run
//! the engine without a display.

use std::collections::VecDeque;
use std::time::Instant;

use crate::events::{Event, EventKind};

use super::{Window, WindowConfig, WindowError};

/// Window backend without a native window
pub struct HeadlessWindow {
    config: WindowConfig,
    start: Instant,
    pending: VecDeque<Event>,
    close_after: Option<u64>,
    pumps: u64,
}

impl HeadlessWindow {
    /// Create a headless window with the given configuration
    pub fn new(config: WindowConfig) -> Result<Self, WindowError> {
        if config.width == 0 || config.height == 0 {
            return Err(WindowError::CreationFailed(format!(
                "invalid size {}x{}",
                config.width, config.height
            )));
        }
        log::info!(
            "headless window '{}' created ({}x{})",
            config.title,
            config.width,
            config.height
        );
        Ok(Self {
            config,
            start: Instant::now(),
            pending: VecDeque::new(),
            close_after: None,
            pumps: 0,
        })
    }

    /// Queue an event for delivery on the next pump
    pub fn inject(&mut self, event: Event) {
        self.pending.push_back(event);
    }

    /// Raise a window-close event automatically after `frames` pumps
    ///
    /// Keeps demo hosts terminating without real input.
    pub fn close_after(&mut self, frames: u64) {
        self.close_after = Some(frames);
    }
}

impl Window for HeadlessWindow {
    fn config(&self) -> &WindowConfig {
        &self.config
    }

    fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    fn set_title(&mut self, title: &str) {
        self.config.title = title.to_string();
    }

    fn time(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    fn pump(&mut self) -> Vec<Event> {
        self.pumps += 1;
        let mut events: Vec<Event> = self.pending.drain(..).collect();
        if self.close_after.is_some_and(|frames| self.pumps >= frames) {
            events.push(Event::new(EventKind::WindowClose));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_zero_size() {
        let config = WindowConfig {
            width: 0,
            ..WindowConfig::default()
        };
        assert!(matches!(
            HeadlessWindow::new(config),
            Err(WindowError::CreationFailed(_))
        ));
    }

    #[test]
    fn test_injected_events_drain_in_order() {
        let mut window = HeadlessWindow::new(WindowConfig::default()).unwrap();
        window.inject(Event::new(EventKind::AppTick));
        window.inject(Event::new(EventKind::WindowFocus));

        let events = window.pump();
        assert_eq!(events.len(), 2);
        assert_eq!(*events[0].kind(), EventKind::AppTick);
        assert_eq!(*events[1].kind(), EventKind::WindowFocus);
        assert!(window.pump().is_empty());
    }

    #[test]
    fn test_close_after_raises_window_close() {
        let mut window = HeadlessWindow::new(WindowConfig::default()).unwrap();
        window.close_after(2);

        assert!(window.pump().is_empty());
        let events = window.pump();
        assert_eq!(events.len(), 1);
        assert_eq!(*events[0].kind(), EventKind::WindowClose);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let window = HeadlessWindow::new(WindowConfig::default()).unwrap();
        let t0 = window.time();
        let t1 = window.time();
        assert!(t1 >= t0);
    }
}
