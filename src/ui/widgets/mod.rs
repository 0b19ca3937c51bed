//! Built-in control classes.

pub mod button;
pub mod check_box;
pub mod panel;
pub mod radio_button;
pub mod scroll_bar;

pub use button::{push_button, ButtonState, PressedState, PushButton};
pub use check_box::{check_box, CheckBox};
pub use panel::{panel, Panel};
pub use radio_button::{radio_button, RadioButton};
pub use scroll_bar::{v_scroll_bar, BarState, VScrollBar};
