//! Button family: a shared pressed-state machine plus the push button.

use std::rc::Rc;

use crate::ui::core::control::{default_process, Appearance, ControlClass};
use crate::ui::core::error::Result;
use crate::ui::core::event::{EventArgs, EventKind};
use crate::ui::core::geom::{Rect, Size};
use crate::ui::core::message::{Message, Reply};
use crate::ui::core::runtime::{ControlOptions, Ui};
use crate::ui::core::tree::{ControlId, ControlNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PressedState {
    #[default]
    Normal,
    Hilighted,
    Pressed,
}

impl PressedState {
    /// Skin state name.
    pub fn state_name(self) -> &'static str {
        match self {
            PressedState::Normal => "normal",
            PressedState::Hilighted => "hilighted",
            PressedState::Pressed => "pressed",
        }
    }
}

/// State shared by push buttons, check boxes and radio buttons.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    pub pressed: PressedState,
    pub checked: bool,
    pub text: String,
}

impl ButtonState {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

pub(crate) fn button_appearance(node: &ControlNode, enabled: bool) -> Appearance<'_> {
    let Some(state) = node.data::<ButtonState>() else {
        return Appearance::plain(enabled);
    };
    Appearance {
        state: if enabled {
            state.pressed.state_name()
        } else {
            "disabled"
        },
        text: &state.text,
        checked: state.checked,
        scroll: None,
    }
}

/// Runs the pressed-state transitions for `msg`, then the base handling.
///
/// `NORMAL -enter-> HILIGHTED -press-> PRESSED`, release goes back to `HILIGHTED` when still
/// hovering and `NORMAL` otherwise, leave drops `HILIGHTED` to `NORMAL`.
pub(crate) fn process_button(
    ui: &mut Ui,
    id: ControlId,
    class: &'static str,
    msg: &Message,
) -> Result<Reply> {
    if let Message::TextChanged(text) = msg {
        ui.state_mut::<ButtonState>(id, class)?.text = text.clone();
        ui.invalidate(id)?;
        return Ok(Reply::Handled);
    }

    if ui.tree().is_enabled(id) {
        let state = ui.state_mut::<ButtonState>(id, class)?;
        let before = state.pressed;
        state.pressed = match (msg, before) {
            (Message::MouseEnter, PressedState::Normal) => PressedState::Hilighted,
            (Message::MouseLeave, PressedState::Hilighted) => PressedState::Normal,
            (Message::MousePress { .. }, _) => PressedState::Pressed,
            (Message::MouseRelease { hovering: true }, PressedState::Pressed) => {
                PressedState::Hilighted
            }
            (Message::MouseRelease { hovering: false }, PressedState::Pressed) => {
                PressedState::Normal
            }
            (_, current) => current,
        };
        if state.pressed != before {
            ui.invalidate(id)?;
        }
    }
    default_process(ui, id, msg)
}

/// True when `msg` is the release that completes a press on this control.
pub(crate) fn is_activating_release(
    ui: &Ui,
    id: ControlId,
    class: &'static str,
    msg: &Message,
) -> Result<bool> {
    let Message::MouseRelease { hovering: true } = msg else {
        return Ok(false);
    };
    let pressed = ui.state::<ButtonState>(id, class)?.pressed == PressedState::Pressed;
    Ok(pressed && ui.tree().is_enabled(id))
}

/// Size of `text` plus the control's padding.
pub(crate) fn text_extent(ui: &Ui, id: ControlId, text: &str) -> Result<Size> {
    let padding = ui.node(id)?.padding();
    let measured = ui.measure_text(id, text)?;
    Ok(Size::new(
        measured.width + padding.horizontal(),
        measured.height + padding.vertical(),
    ))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PushButton;

impl PushButton {
    pub const CLASS: &'static str = "PushButton";
}

impl ControlClass for PushButton {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn has_channel(&self, kind: EventKind) -> bool {
        kind.is_base() || kind == EventKind::Pressed
    }

    fn appearance<'a>(&self, node: &'a ControlNode, enabled: bool) -> Appearance<'a> {
        button_appearance(node, enabled)
    }

    fn process(&self, ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
        let activating = is_activating_release(ui, id, Self::CLASS, msg)?;
        let reply = process_button(ui, id, Self::CLASS, msg)?;
        if activating {
            ui.fire(id, EventKind::Pressed, &EventArgs::None)?;
        }
        if matches!(msg, Message::TextChanged(_)) {
            fit_push_button(ui, id)?;
        }
        Ok(reply)
    }
}

/// Resizes a push button around its label.
pub fn fit_push_button(ui: &mut Ui, id: ControlId) -> Result<()> {
    let text = ui.state::<ButtonState>(id, PushButton::CLASS)?.text.clone();
    if text.is_empty() {
        return Ok(());
    }
    let size = text_extent(ui, id, &text)?;
    let location = ui.node(id)?.bounds().location();
    ui.set_bounds(id, Rect::from_parts(location, size))
}

/// Creates a push button labelled `text`, sized to fit unless `options` fixes a size.
pub fn push_button(ui: &mut Ui, text: &str, options: ControlOptions) -> Result<ControlId> {
    let sized = options.size.is_some();
    let id = ui.create(Rc::new(PushButton), Box::new(ButtonState::new(text)), options)?;
    if !sized {
        fit_push_button(ui, id)?;
    }
    Ok(id)
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/button.rs"]
mod tests;
