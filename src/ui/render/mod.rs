//! The renderer contract the control tree draws through.

use std::any::Any;

use crate::ui::core::color::Color;
use crate::ui::core::control::Appearance;
use crate::ui::core::error::Result;
use crate::ui::core::geom::{Rect, Size};
use crate::ui::core::layout::Spacing;
use crate::ui::core::theme::{FontKind, RenderLayers, Skin};
use crate::ui::core::tree::ControlId;

pub mod clip;
pub mod methods;
pub mod skin;

pub use clip::{ClipStack, Damage};
pub use skin::{RenderCx, RenderMethod, SkinRenderer};

/// What a renderer gets to see of a control.
#[derive(Clone, Copy, Debug)]
pub struct ControlView<'a> {
    pub id: ControlId,
    pub class: &'static str,
    pub name: &'a str,
    pub padding: Spacing,
    pub appearance: Appearance<'a>,
}

pub trait Renderer: Any {
    fn skin(&self) -> &Skin;

    /// Layers the class draws in. Fails when the class has no render method or no skin entry.
    fn render_layers(&self, class: &str) -> Result<RenderLayers>;

    fn render(
        &mut self,
        control: &ControlView<'_>,
        render_bounds: Rect,
        bounds: Rect,
        layer: RenderLayers,
    ) -> Result<()>;

    fn measure_text(&self, class: &str, text: &str, font: FontKind) -> Result<Size>;

    /// Narrows the clip to `rect` intersected with the current one.
    fn push_clip_rect(&mut self, rect: Rect);

    fn pop_clip_rect(&mut self) -> Result<()>;

    fn clip_rect(&self) -> Rect;

    fn add_invalidated_rect(&mut self, rect: Rect);

    /// Fills the current clip with `color`.
    fn clear(&mut self, color: Color);

    /// Flushes the accumulated damage.
    fn update(&mut self);

    /// Presents the whole frame and drops the accumulated damage.
    fn flip(&mut self);

    fn display_size(&self) -> Size;

    fn erase_color(&self) -> Color {
        self.skin().erase_color()
    }

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl dyn Renderer {
    pub fn downcast_ref<T: Renderer>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Renderer>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }
}
