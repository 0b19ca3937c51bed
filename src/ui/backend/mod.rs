//! Rendering backends.
//!
//! A backend turns paint commands into pixels and knows how large text is. Everything above it
//! (clipping, damage, skins) is backend independent.

use crate::ui::core::color::Color;
use crate::ui::core::geom::{Rect, Size};
use crate::ui::core::painter::PaintCmd;
use crate::ui::core::theme::FontSpec;

pub trait Backend {
    /// Draws `cmds`, discarding anything outside `clip`.
    fn draw(&mut self, clip: Rect, cmds: &[PaintCmd]);

    fn clear(&mut self, clip: Rect, color: Color);

    fn measure_text(&self, text: &str, font: &FontSpec) -> Size;

    /// Presents only the damaged rectangles.
    fn present(&mut self, damage: &[Rect]);

    /// Presents the whole frame.
    fn present_all(&mut self);

    fn display_size(&self) -> Size;
}
