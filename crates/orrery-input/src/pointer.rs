//! Pointer events in window pixel coordinates.
//!
//! winit reports button presses without a position and wheel motion in two
//! different units. [`PointerTranslator`] remembers the last cursor position
//! and turns the raw events into self-contained [`PointerEvent`]s.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Wheel distance reported for one line (notch) of a line-based wheel.
pub const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

impl PointerButton {
    /// `None` for the extra side buttons, which the viewer does not use.
    #[must_use]
    pub fn from_winit(button: MouseButton) -> Option<Self> {
        match button {
            MouseButton::Left => Some(Self::Primary),
            MouseButton::Right => Some(Self::Secondary),
            MouseButton::Middle => Some(Self::Middle),
            MouseButton::Back | MouseButton::Forward | MouseButton::Other(_) => None,
        }
    }
}

/// A pointer event with its window position in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { button: PointerButton, position: Vec2 },
    Move { position: Vec2 },
    Up { button: PointerButton, position: Vec2 },
    /// Positive values scroll toward the user (zoom out).
    Wheel { delta_y: f32 },
}

/// Converts winit window events into [`PointerEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct PointerTranslator {
    position: Vec2,
}

impl PointerTranslator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor_moved(&mut self, x: f64, y: f64) -> PointerEvent {
        self.position = Vec2::new(x as f32, y as f32);
        PointerEvent::Move {
            position: self.position,
        }
    }

    pub fn button(&mut self, button: MouseButton, state: ElementState) -> Option<PointerEvent> {
        let button = PointerButton::from_winit(button)?;
        let position = self.position;
        Some(match state {
            ElementState::Pressed => PointerEvent::Down { button, position },
            ElementState::Released => PointerEvent::Up { button, position },
        })
    }

    /// winit scrolls positive away from the user; the result uses the
    /// opposite sign and is expressed in pixels.
    pub fn wheel(&mut self, delta: MouseScrollDelta) -> PointerEvent {
        let delta_y = match delta {
            MouseScrollDelta::LineDelta(_, y) => -y * PIXELS_PER_LINE,
            MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
        };
        PointerEvent::Wheel { delta_y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_button_carries_last_position() {
        let mut t = PointerTranslator::new();
        t.cursor_moved(120.0, 48.5);
        let event = t.button(MouseButton::Left, ElementState::Pressed);
        assert_eq!(
            event,
            Some(PointerEvent::Down {
                button: PointerButton::Primary,
                position: Vec2::new(120.0, 48.5),
            })
        );
        let event = t.button(MouseButton::Right, ElementState::Released);
        assert_eq!(
            event,
            Some(PointerEvent::Up {
                button: PointerButton::Secondary,
                position: Vec2::new(120.0, 48.5),
            })
        );
    }

    #[test]
    fn test_side_buttons_are_dropped() {
        let mut t = PointerTranslator::new();
        assert!(t.button(MouseButton::Back, ElementState::Pressed).is_none());
        assert!(t.button(MouseButton::Other(9), ElementState::Pressed).is_none());
    }

    #[test]
    fn test_line_wheel_up_zooms_in() {
        let mut t = PointerTranslator::new();
        let PointerEvent::Wheel { delta_y } = t.wheel(MouseScrollDelta::LineDelta(0.0, 1.0))
        else {
            panic!("expected wheel event");
        };
        assert_eq!(delta_y, -PIXELS_PER_LINE);
    }

    #[test]
    fn test_pixel_wheel_keeps_magnitude() {
        let mut t = PointerTranslator::new();
        let event = t.wheel(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -30.0)));
        assert_eq!(event, PointerEvent::Wheel { delta_y: 30.0 });
    }
}
