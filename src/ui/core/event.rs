//! Typed event channels that application code subscribes to.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::error::Result;
use super::geom::Point;
use super::input::{DragPayload, MouseButton};
use super::runtime::Ui;
use super::tree::ControlId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    Created,
    MouseEnter,
    MouseLeave,
    MousePress,
    MouseDown,
    MouseRelease,
    MouseClick,
    MouseWheel,
    Focused,
    Defocused,
    Activated,
    Deactivated,
    DragStarted,
    DragStopped,
    DataDropped,
    /// A push button was released while the pointer was still over it.
    Pressed,
    Checked,
    Unchecked,
    CheckChanged,
    ValueChanged,
}

impl EventKind {
    /// Channels every control exposes.
    pub const BASE: &'static [EventKind] = &[
        EventKind::Created,
        EventKind::MouseEnter,
        EventKind::MouseLeave,
        EventKind::MousePress,
        EventKind::MouseDown,
        EventKind::MouseRelease,
        EventKind::MouseClick,
        EventKind::MouseWheel,
        EventKind::Focused,
        EventKind::Defocused,
        EventKind::Activated,
        EventKind::Deactivated,
        EventKind::DragStarted,
        EventKind::DragStopped,
        EventKind::DataDropped,
    ];

    pub fn is_base(self) -> bool {
        Self::BASE.contains(&self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CheckState {
    Unchecked,
    Checked,
}

#[derive(Clone, Debug, Default)]
pub enum EventArgs {
    #[default]
    None,
    Mouse {
        button: MouseButton,
        pos: Point,
    },
    Release {
        hovering: bool,
    },
    Wheel {
        delta: i32,
    },
    Drag {
        button: MouseButton,
        start: Point,
    },
    Drop {
        payload: Option<DragPayload>,
    },
    Check {
        state: CheckState,
    },
    Value {
        value: i32,
    },
}

pub type Handler = Rc<dyn Fn(&mut Ui, ControlId, &EventArgs) -> Result<()>>;

/// Observer lists, keyed by channel.
#[derive(Default, Clone)]
pub struct EventChannels {
    handlers: FxHashMap<EventKind, Vec<Handler>>,
}

impl EventChannels {
    pub fn attach(&mut self, kind: EventKind, handler: Handler) {
        self.handlers.entry(kind).or_default().push(handler);
    }

    pub fn detach_all(&mut self, kind: EventKind) {
        self.handlers.remove(&kind);
    }

    pub fn handlers(&self, kind: EventKind) -> &[Handler] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self, kind: EventKind) -> usize {
        self.handlers(kind).len()
    }
}

impl fmt::Debug for EventChannels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (kind, list) in &self.handlers {
            map.entry(kind, &list.len());
        }
        map.finish()
    }
}
