use std::rc::Rc;

use super::button::{
    button_appearance, is_activating_release, process_button, text_extent, ButtonState,
};
use crate::ui::core::control::{Appearance, ControlClass};
use crate::ui::core::error::Result;
use crate::ui::core::event::{CheckState, EventArgs, EventKind};
use crate::ui::core::geom::{Rect, Size};
use crate::ui::core::message::{Message, Reply};
use crate::ui::core::runtime::{ControlOptions, Ui};
use crate::ui::core::tree::{Behavior, ControlId, ControlNode};

pub(crate) fn has_check_channel(kind: EventKind) -> bool {
    kind.is_base()
        || matches!(
            kind,
            EventKind::Checked | EventKind::Unchecked | EventKind::CheckChanged
        )
}

/// Sets the checked flag and notifies `Checked`/`Unchecked` then `CheckChanged`.
/// Returns whether anything changed.
pub(crate) fn apply_check(
    ui: &mut Ui,
    id: ControlId,
    class: &'static str,
    checked: bool,
) -> Result<bool> {
    let state = ui.state_mut::<ButtonState>(id, class)?;
    if state.checked == checked {
        return Ok(false);
    }
    state.checked = checked;
    ui.invalidate(id)?;

    let (kind, state) = if checked {
        (EventKind::Checked, CheckState::Checked)
    } else {
        (EventKind::Unchecked, CheckState::Unchecked)
    };
    ui.fire(id, kind, &EventArgs::None)?;
    ui.fire(id, EventKind::CheckChanged, &EventArgs::Check { state })?;
    Ok(true)
}

/// Indicator plus label, never smaller than the skin size. Height is fixed.
pub(crate) fn fit_check(ui: &mut Ui, id: ControlId, class: &'static str) -> Result<()> {
    let text = ui.state::<ButtonState>(id, class)?.text.clone();
    let base = ui.renderer().skin().layout_for(class).size;
    let extent = text_extent(ui, id, &text)?;
    let indicator = base.height;
    let size = Size::new(base.width.max(extent.width + indicator), base.height);
    let location = ui.node(id)?.bounds().location();
    ui.set_bounds(id, Rect::from_parts(location, size))
}

/// Two-state toggle.
#[derive(Clone, Copy, Debug, Default)]
pub struct CheckBox;

impl CheckBox {
    pub const CLASS: &'static str = "CheckBox";
}

impl ControlClass for CheckBox {
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
            let checked = ui.state::<ButtonState>(id, Self::CLASS)?.checked;
            apply_check(ui, id, Self::CLASS, !checked)?;
        }
        if matches!(msg, Message::TextChanged(_)) {
            fit_check(ui, id, Self::CLASS)?;
        }
        Ok(reply)
    }
}

pub fn check_box(ui: &mut Ui, text: &str, options: ControlOptions) -> Result<ControlId> {
    let sized = options.size.is_some();
    let id = ui.create(Rc::new(CheckBox), Box::new(ButtonState::new(text)), options)?;
    if !sized {
        fit_check(ui, id, CheckBox::CLASS)?;
    }
    Ok(id)
}

pub fn is_checked(ui: &Ui, id: ControlId) -> Result<bool> {
    let class = ui.node(id)?.class_name();
    Ok(ui.state::<ButtonState>(id, class)?.checked)
}

pub fn set_checked(ui: &mut Ui, id: ControlId, checked: bool) -> Result<bool> {
    apply_check(ui, id, CheckBox::CLASS, checked)
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/check_box.rs"]
mod tests;
