//! Turns pointer events into camera actions.

use glam::Vec2;
use orrery_input::{PointerButton, PointerEvent};

/// What a pointer event asks the view to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Primary drag, in pixels since the previous move.
    Rotate(Vec2),
    /// Secondary drag, in pixels since the previous move.
    Pan(Vec2),
    /// Wheel travel; positive zooms out.
    Zoom(f32),
    /// Primary press and release without dragging, at this pixel.
    Click(Vec2),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    button: PointerButton,
    origin: Vec2,
    last: Vec2,
    /// Farthest the pointer got from `origin`.
    travel: f32,
}

#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    drag: Option<Drag>,
    click_slop: f32,
}

impl InputRouter {
    #[must_use]
    pub fn new(click_slop: f32) -> Self {
        Self {
            drag: None,
            click_slop,
        }
    }

    /// A button is held.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn handle(&mut self, event: PointerEvent) -> Option<PointerAction> {
        match event {
            PointerEvent::Down { button, position } => {
                self.drag = Some(Drag {
                    button,
                    origin: position,
                    last: position,
                    travel: 0.0,
                });
                None
            }
            PointerEvent::Move { position } => {
                let drag = self.drag.as_mut()?;
                let delta = position - drag.last;
                drag.last = position;
                drag.travel = drag.travel.max(position.distance(drag.origin));
                match drag.button {
                    PointerButton::Primary => Some(PointerAction::Rotate(delta)),
                    PointerButton::Secondary => Some(PointerAction::Pan(delta)),
                    PointerButton::Middle => None,
                }
            }
            PointerEvent::Up { button, position } => {
                let drag = self.drag.take()?;
                let travel = drag.travel.max(position.distance(drag.origin));
                (button == PointerButton::Primary
                    && drag.button == PointerButton::Primary
                    && travel <= self.click_slop)
                    .then_some(PointerAction::Click(position))
            }
            PointerEvent::Wheel { delta_y } => Some(PointerAction::Zoom(delta_y)),
        }
    }

    /// Forget any held button, e.g. when the window loses focus.
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(button: PointerButton, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Down {
            button,
            position: Vec2::new(x, y),
        }
    }

    fn up(button: PointerButton, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Up {
            button,
            position: Vec2::new(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            position: Vec2::new(x, y),
        }
    }

    #[test]
    fn test_moves_without_button_do_nothing() {
        let mut router = InputRouter::new(4.0);
        assert_eq!(router.handle(moved(10.0, 10.0)), None);
        assert!(!router.is_dragging());
    }

    #[test]
    fn test_primary_drag_rotates_by_delta() {
        let mut router = InputRouter::new(4.0);
        router.handle(down(PointerButton::Primary, 100.0, 100.0));
        assert_eq!(
            router.handle(moved(110.0, 95.0)),
            Some(PointerAction::Rotate(Vec2::new(10.0, -5.0)))
        );
        assert_eq!(
            router.handle(moved(111.0, 95.0)),
            Some(PointerAction::Rotate(Vec2::new(1.0, 0.0)))
        );
        assert!(router.is_dragging());
        assert_eq!(router.handle(up(PointerButton::Primary, 111.0, 95.0)), None);
        assert!(!router.is_dragging());
    }

    #[test]
    fn test_secondary_drag_pans() {
        let mut router = InputRouter::new(4.0);
        router.handle(down(PointerButton::Secondary, 0.0, 0.0));
        assert_eq!(
            router.handle(moved(3.0, 4.0)),
            Some(PointerAction::Pan(Vec2::new(3.0, 4.0)))
        );
        assert_eq!(router.handle(up(PointerButton::Secondary, 3.0, 4.0)), None);
    }

    #[test]
    fn test_click_within_slop() {
        let mut router = InputRouter::new(4.0);
        router.handle(down(PointerButton::Primary, 50.0, 50.0));
        router.handle(moved(52.0, 51.0));
        assert_eq!(
            router.handle(up(PointerButton::Primary, 52.0, 51.0)),
            Some(PointerAction::Click(Vec2::new(52.0, 51.0)))
        );
    }

    #[test]
    fn test_drag_that_returns_is_not_a_click() {
        let mut router = InputRouter::new(4.0);
        router.handle(down(PointerButton::Primary, 50.0, 50.0));
        router.handle(moved(150.0, 50.0));
        router.handle(moved(50.0, 50.0));
        assert_eq!(router.handle(up(PointerButton::Primary, 50.0, 50.0)), None);
    }

    #[test]
    fn test_wheel_zooms() {
        let mut router = InputRouter::new(4.0);
        assert_eq!(
            router.handle(PointerEvent::Wheel { delta_y: 120.0 }),
            Some(PointerAction::Zoom(120.0))
        );
    }

    #[test]
    fn test_cancel_drops_drag() {
        let mut router = InputRouter::new(4.0);
        router.handle(down(PointerButton::Primary, 0.0, 0.0));
        router.cancel();
        assert_eq!(router.handle(moved(5.0, 5.0)), None);
    }
}
