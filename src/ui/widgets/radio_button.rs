use std::rc::Rc;

use super::button::{button_appearance, is_activating_release, process_button, ButtonState};
use super::check_box::{apply_check, fit_check, has_check_channel};
use crate::ui::core::control::{Appearance, ControlClass};
use crate::ui::core::error::Result;
use crate::ui::core::event::EventKind;
use crate::ui::core::message::{Message, Reply};
use crate::ui::core::runtime::{ControlOptions, Ui};
use crate::ui::core::tree::{Behavior, ControlId, ControlNode};

/// One-of-many choice among sibling radio buttons.
#[derive(Clone, Copy, Debug, Default)]
pub struct RadioButton;

impl RadioButton {
    pub const CLASS: &'static str = "RadioButton";
}

impl ControlClass for RadioButton {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn behavior(&self) -> Behavior {
        Behavior::SELECTABLE | Behavior::FIXED_HEIGHT
    }

    fn has_channel(&self, kind: EventKind) -> bool {
        has_check_channel(kind)
    }

    fn appearance<'a>(&self, node: &'a ControlNode, enabled: bool) -> Appearance<'a> {
        button_appearance(node, enabled)
    }

    fn process(&self, ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
        let activating = is_activating_release(ui, id, Self::CLASS, msg)?;
        let reply = process_button(ui, id, Self::CLASS, msg)?;
        if activating {
            select_radio(ui, id)?;
        }
        if matches!(msg, Message::TextChanged(_)) {
            fit_check(ui, id, Self::CLASS)?;
        }
        Ok(reply)
    }
}

/// Checks `id` and unchecks every sibling radio button. Clicking a checked one is a no-op.
pub fn select_radio(ui: &mut Ui, id: ControlId) -> Result<bool> {
    if !apply_check(ui, id, RadioButton::CLASS, true)? {
        return Ok(false);
    }
    let siblings: Vec<ControlId> = match ui.node(id)?.parent() {
        Some(parent) => ui.node(parent)?.children().to_vec(),
        None => ui.tree().topmost().to_vec(),
    };
    for sibling in siblings {
        if sibling != id && ui.node(sibling)?.class_name() == RadioButton::CLASS {
            apply_check(ui, sibling, RadioButton::CLASS, false)?;
        }
    }
    Ok(true)
}

pub fn radio_button(ui: &mut Ui, text: &str, options: ControlOptions) -> Result<ControlId> {
    let sized = options.size.is_some();
    let id = ui.create(Rc::new(RadioButton), Box::new(ButtonState::new(text)), options)?;
    if !sized {
        fit_check(ui, id, RadioButton::CLASS)?;
    }
    Ok(id)
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/radio_button.rs"]
mod tests;
