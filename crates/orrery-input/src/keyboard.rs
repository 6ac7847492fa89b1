//! Keyboard state tracker.
//!
//! [`KeyboardState`] accumulates winit key events between frames. It keeps
//! the order in which keys went down, so shortcuts fire in the order the user
//! typed them.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

/// Tracks keyboard state using physical (scan-code) keys.
///
/// Forward every [`KeyEvent`] to [`process_event`](Self::process_event), drain
/// new presses with [`take_presses`](Self::take_presses) once per frame. A
/// key held down counts as one press until it is released.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
    press_order: Vec<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Platform-independent entry point. Auto-repeat events are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.pressed.insert(event.key) {
                    self.press_order.push(event.key);
                }
            }
            ElementState::Released => {
                self.pressed.remove(&event.key);
            }
        }
    }

    /// Keys that went down since the last call, oldest first.
    pub fn take_presses(&mut self) -> Vec<PhysicalKey> {
        std::mem::take(&mut self.press_order)
    }

    /// Forget everything, e.g. when the window loses focus.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.press_order.clear();
    }
}
