use std::rc::Rc;

use crate::ui::core::control::{default_process, Appearance, ControlClass};
use crate::ui::core::error::{Result, UiError};
use crate::ui::core::event::{EventArgs, EventKind};
use crate::ui::core::geom::Point;
use crate::ui::core::message::{Message, Reply};
use crate::ui::core::runtime::{ControlOptions, Ui};
use crate::ui::core::tree::{Behavior, ControlId, ControlNode};

/// Value range shared by bar-like controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BarState {
    minimum: i32,
    maximum: i32,
    value: i32,
    /// Units per wheel notch.
    pub step: i32,
}

impl Default for BarState {
    fn default() -> Self {
        Self {
            minimum: 0,
            maximum: 100,
            value: 0,
            step: 1,
        }
    }
}

impl BarState {
    pub fn new(minimum: i32, maximum: i32) -> Result<Self> {
        let mut bar = Self::default();
        bar.set_range(minimum, maximum)?;
        Ok(bar)
    }

    pub fn minimum(&self) -> i32 {
        self.minimum
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn set_range(&mut self, minimum: i32, maximum: i32) -> Result<()> {
        if minimum > maximum {
            return Err(UiError::InvalidRange { minimum, maximum });
        }
        self.minimum = minimum;
        self.maximum = maximum;
        self.value = self.value.clamp(minimum, maximum);
        Ok(())
    }

    /// Clamps into range; returns whether the value moved.
    pub fn set_value(&mut self, value: i32) -> bool {
        let value = value.clamp(self.minimum, self.maximum);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Position of the value within the range, `0.0..=1.0`.
    pub fn fraction(&self) -> f32 {
        let span = self.span();
        if span == 0 {
            return 0.0;
        }
        ((i64::from(self.value) - i64::from(self.minimum)) as f64 / span as f64) as f32
    }

    /// Width of the range. Wider than `i32` for ranges spanning most of it.
    fn span(&self) -> i64 {
        i64::from(self.maximum) - i64::from(self.minimum)
    }

    /// Value under `offset` along a track `length` long.
    pub fn value_at(&self, offset: i32, length: i32) -> i32 {
        if length <= 0 {
            return self.minimum;
        }
        let ratio = (f64::from(offset) / f64::from(length)).clamp(0.0, 1.0);
        let value = i64::from(self.minimum) + (self.span() as f64 * ratio).round() as i64;
        value.clamp(i64::from(self.minimum), i64::from(self.maximum)) as i32
    }
}

/// Vertical scroll bar. Drives a value by wheel, click, or drag along its track.
#[derive(Clone, Copy, Debug, Default)]
pub struct VScrollBar;

impl VScrollBar {
    pub const CLASS: &'static str = "VScrollBar";
}

impl ControlClass for VScrollBar {
    fn class_name(&self) -> &'static str {
        Self::CLASS
    }

    fn behavior(&self) -> Behavior {
        Behavior::NON_CLIENT
    }

    fn has_channel(&self, kind: EventKind) -> bool {
        kind.is_base() || kind == EventKind::ValueChanged
    }

    fn appearance<'a>(&self, node: &'a ControlNode, enabled: bool) -> Appearance<'a> {
        let mut appearance = Appearance::plain(enabled);
        appearance.scroll = node.data::<BarState>().map(BarState::fraction);
        appearance
    }

    fn process(&self, ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
        if ui.tree().is_enabled(id) {
            match msg {
                Message::MouseWheel { delta } => {
                    let bar = ui.state::<BarState>(id, Self::CLASS)?;
                    let step = bar.step * ui.config().wheel_step;
                    let target = bar.value() - delta * step;
                    set_value(ui, id, target)?;
                }
                Message::MousePress { pos, .. } | Message::MouseDragMove { pos, .. } => {
                    track_to(ui, id, *pos)?;
                }
                _ => {}
            }
        }
        default_process(ui, id, msg)
    }
}

fn track_to(ui: &mut Ui, id: ControlId, pos: Point) -> Result<()> {
    let bounds = ui.tree().screen_bounds(id)?;
    let bar = ui.state::<BarState>(id, VScrollBar::CLASS)?;
    let target = bar.value_at(pos.y - bounds.top(), bounds.height());
    set_value(ui, id, target)?;
    Ok(())
}

pub fn v_scroll_bar(ui: &mut Ui, options: ControlOptions) -> Result<ControlId> {
    ui.create(Rc::new(VScrollBar), Box::new(BarState::default()), options)
}

pub fn value(ui: &Ui, id: ControlId) -> Result<i32> {
    Ok(ui.state::<BarState>(id, VScrollBar::CLASS)?.value())
}

/// Clamps and stores `value`, notifying `ValueChanged` when it moved.
pub fn set_value(ui: &mut Ui, id: ControlId, value: i32) -> Result<bool> {
    let bar = ui.state_mut::<BarState>(id, VScrollBar::CLASS)?;
    if !bar.set_value(value) {
        return Ok(false);
    }
    let value = bar.value();
    ui.invalidate(id)?;
    ui.fire(id, EventKind::ValueChanged, &EventArgs::Value { value })?;
    Ok(true)
}

pub fn set_range(ui: &mut Ui, id: ControlId, minimum: i32, maximum: i32) -> Result<()> {
    let bar = ui.state_mut::<BarState>(id, VScrollBar::CLASS)?;
    bar.set_range(minimum, maximum)?;
    ui.invalidate(id)
}

pub fn set_step(ui: &mut Ui, id: ControlId, step: i32) -> Result<()> {
    ui.state_mut::<BarState>(id, VScrollBar::CLASS)?.step = step;
    Ok(())
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/scroll_bar.rs"]
mod tests;
