//! Messages routed through `ControlClass::process`.

use super::cursor::LayoutCursor;
use super::geom::{Point, Rect};
use super::input::{DragPayload, MouseButton};
use super::tree::ControlId;

/// Part of a control under the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HitRegion {
    #[default]
    None,
    NonClient,
    Client,
    Caption,
    SizeBorder,
}

#[derive(Clone, Debug)]
pub enum Message {
    // Pointer.
    HitTest { pos: Point },
    MouseEnter,
    MouseHover,
    MouseMove { pos: Point },
    MousePress { button: MouseButton, pos: Point },
    MouseDown { button: MouseButton, pos: Point },
    MouseRelease { hovering: bool },
    MouseClick,
    MouseWheel { delta: i32 },
    MouseStartDrag { button: MouseButton, start: Point },
    MouseDragMove { button: MouseButton, start: Point, pos: Point },
    MouseStopDrag { button: MouseButton, start: Point, pos: Point },
    MouseLeave,

    // Drag and drop.
    DragAccept { source: ControlId },
    DragSendData,
    DragRecvData { payload: Option<DragPayload> },

    // Rendering. `clip` is the region inherited from the caller, in screen coordinates.
    RenderBackground { clip: Rect },
    Render { clip: Rect },
    RenderForeground { clip: Rect },
    EraseChild { region: Rect },

    // Structure and lifecycle.
    Created,
    Activated,
    Deactivated,
    AddChild(ControlId),
    RemoveChild(ControlId),
    RemoveChildren,
    LayoutChildren(LayoutCursor),
    ChildIndex(ControlId),
    Select(ControlId),
    Selected,
    Focused,
    Defocused,
    TextChanged(String),
    /// Sent after the bounds were resized; `old` is the previous screen rectangle.
    SizeChanged { old: Rect },
}

impl Message {
    pub fn name(&self) -> &'static str {
        match self {
            Message::HitTest { .. } => "HIT_TEST",
            Message::MouseEnter => "MOUSE_ENTER",
            Message::MouseHover => "MOUSE_HOVER",
            Message::MouseMove { .. } => "MOUSE_MOVE",
            Message::MousePress { .. } => "MOUSE_PRESS",
            Message::MouseDown { .. } => "MOUSE_DOWN",
            Message::MouseRelease { .. } => "MOUSE_RELEASE",
            Message::MouseClick => "MOUSE_CLICK",
            Message::MouseWheel { .. } => "MOUSE_WHEEL",
            Message::MouseStartDrag { .. } => "MOUSE_STARTDRAG",
            Message::MouseDragMove { .. } => "MOUSE_DRAGMOVE",
            Message::MouseStopDrag { .. } => "MOUSE_STOPDRAG",
            Message::MouseLeave => "MOUSE_LEAVE",
            Message::DragAccept { .. } => "DRAG_ACCEPT",
            Message::DragSendData => "DRAG_SENDDATA",
            Message::DragRecvData { .. } => "DRAG_RECVDATA",
            Message::RenderBackground { .. } => "RENDER_BACKGROUND",
            Message::Render { .. } => "RENDER",
            Message::RenderForeground { .. } => "RENDER_FOREGROUND",
            Message::EraseChild { .. } => "ERASE_CHILD",
            Message::Created => "CREATED",
            Message::Activated => "ACTIVATED",
            Message::Deactivated => "DEACTIVATED",
            Message::AddChild(_) => "ADD_CHILD",
            Message::RemoveChild(_) => "REMOVE_CHILD",
            Message::RemoveChildren => "REMOVE_CHILDREN",
            Message::LayoutChildren(_) => "LAYOUT_CHILDREN",
            Message::ChildIndex(_) => "CHILD_INDEX",
            Message::Select(_) => "SELECT",
            Message::Selected => "SELECTED",
            Message::Focused => "FOCUSED",
            Message::Defocused => "DEFOCUSED",
            Message::TextChanged(_) => "TEXTCHANGED",
            Message::SizeChanged { .. } => "SIZECHANGED",
        }
    }
}

/// Result of processing a message. `Unhandled` is what the default handler returns
/// for messages a control does not understand.
#[derive(Clone, Debug, Default)]
pub enum Reply {
    #[default]
    Unhandled,
    Handled,
    Bool(bool),
    Hit(Option<ControlId>, HitRegion),
    Index(Option<usize>),
    Target(Option<ControlId>),
    Payload(Option<DragPayload>),
    Text(String),
}

impl Reply {
    pub fn is_handled(&self) -> bool {
        !matches!(self, Reply::Unhandled)
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, Reply::Bool(true))
    }

    pub fn hit(&self) -> Option<ControlId> {
        match self {
            Reply::Hit(id, _) => *id,
            _ => None,
        }
    }

    pub fn target(&self) -> Option<ControlId> {
        match self {
            Reply::Target(id) => *id,
            _ => None,
        }
    }

    pub fn into_payload(self) -> Option<DragPayload> {
        match self {
            Reply::Payload(p) => p,
            _ => None,
        }
    }
}
