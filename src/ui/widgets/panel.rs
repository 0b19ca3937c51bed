use std::rc::Rc;

use crate::ui::core::control::ControlClass;
use crate::ui::core::error::Result;
use crate::ui::core::runtime::{ControlOptions, Ui};
use crate::ui::core::tree::ControlId;

/// Plain container. Draws a filled, bordered box behind its children.
#[derive(Clone, Copy, Debug, Default)]
pub struct Panel;

impl Panel {
    pub const CLASS: &'static str = "Panel";
}

impl ControlClass for Panel {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn is_container(&self) -> bool {
        true
    }
}

pub fn panel(ui: &mut Ui, options: ControlOptions) -> Result<ControlId> {
    ui.create(Rc::new(Panel), Box::new(()), options)
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/panel.rs"]
mod tests;
