use std::any::Any;
use std::rc::Rc;

use super::geom::Point;
use super::tree::ControlId;

/// Opaque data carried from a drag source to its receiver.
pub type DragPayload = Rc<dyn Any>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Middle, MouseButton::Right];

    fn index(self) -> usize {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Raw input delivered once per tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Motion { pos: Point, rel: Point },
    ButtonDown { button: MouseButton, pos: Point },
    ButtonUp { button: MouseButton, pos: Point },
    Wheel { delta: i32, pos: Point },
    Quit,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonTrack {
    pub pressed: bool,
    pub press_ms: u64,
    pub release_ms: u64,
    pub anchor: Point,
    /// Set when a down event for this button arrived in the current tick.
    pub(crate) fresh: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PointerState {
    buttons: [ButtonTrack; 3],
    pub pos: Point,
}

impl PointerState {
    pub fn button(&self, button: MouseButton) -> &ButtonTrack {
        &self.buttons[button.index()]
    }

    pub(crate) fn button_mut(&mut self, button: MouseButton) -> &mut ButtonTrack {
        &mut self.buttons[button.index()]
    }

    pub(crate) fn press(&mut self, button: MouseButton, pos: Point, now_ms: u64) {
        let track = self.button_mut(button);
        track.pressed = true;
        track.fresh = true;
        track.press_ms = now_ms;
        track.anchor = pos;
    }

    /// Returns whether the button was held.
    pub(crate) fn release(&mut self, button: MouseButton, now_ms: u64) -> bool {
        let track = self.button_mut(button);
        let was_pressed = track.pressed;
        track.pressed = false;
        track.release_ms = now_ms;
        was_pressed
    }

    /// Held buttons whose down event is older than the current tick.
    pub(crate) fn stale_held(&self) -> impl Iterator<Item = MouseButton> + '_ {
        MouseButton::ALL
            .into_iter()
            .filter(|b| self.button(*b).pressed && !self.button(*b).fresh)
    }

    pub(crate) fn end_tick(&mut self) {
        for track in &mut self.buttons {
            track.fresh = false;
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
    pub button: Option<MouseButton>,
    pub accept: bool,
    pub receiver: Option<ControlId>,
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/input.rs"]
mod tests;
