use std::any::Any;
use std::rc::Rc;

use rustc_hash::FxHashMap;

use super::clip::{ClipStack, Damage};
use super::methods::builtin_methods;
use super::{ControlView, Renderer};
use crate::ui::backend::Backend;
use crate::ui::core::color::Color;
use crate::ui::core::error::{Result, UiError};
use crate::ui::core::geom::{Point, Rect, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::theme::{Element, FontKind, FontSpec, RenderLayers, Skin, VisualState};

/// Draws one layer of one control class.
pub type RenderMethod = Rc<dyn Fn(&mut RenderCx<'_>) -> Result<()>>;

/// Everything a render method may look at while drawing one layer.
pub struct RenderCx<'a> {
    pub view: &'a ControlView<'a>,
    pub element: &'a Element,
    pub state: &'a VisualState,
    pub font: &'a FontSpec,
    pub backend: &'a dyn Backend,
    pub painter: &'a mut Painter,
    /// Bounds plus margin, in screen space.
    pub render_bounds: Rect,
    /// Screen-space bounds.
    pub bounds: Rect,
    pub layer: RenderLayers,
}

impl RenderCx<'_> {
    pub fn measure(&self, text: &str) -> Size {
        self.backend.measure_text(text, self.font)
    }

    /// Bounds minus padding.
    pub fn client(&self) -> Rect {
        self.bounds.reduce(self.view.padding)
    }

    /// Draws `text` inside `area` using the element's text alignment.
    pub fn aligned_text(&mut self, area: Rect, text: &str, color: Color) {
        if text.is_empty() {
            return;
        }
        let size = self.measure(text);
        let placed = Rect::from_parts(Point::ZERO, size).align_to(&area, self.element.style.alignment());
        self.painter.text(placed.location(), text, color, self.font);
    }
}

/// Renderer that looks up a draw method and a skin element per control class.
pub struct SkinRenderer<B: Backend> {
    backend: B,
    skin: Skin,
    methods: FxHashMap<String, RenderMethod>,
    clip: ClipStack,
    damage: Damage,
    painter: Painter,
}

impl<B: Backend + 'static> SkinRenderer<B> {
    /// Renderer with the built-in methods registered.
    pub fn new(backend: B, skin: Skin) -> Self {
        let display = Rect::from_parts(Point::ZERO, backend.display_size());
        let methods = builtin_methods()
            .into_iter()
            .map(|(class, method)| (class.to_string(), method))
            .collect();
        Self {
            backend,
            skin,
            methods,
            clip: ClipStack::new(display),
            damage: Damage::default(),
            painter: Painter::new(),
        }
    }

    pub fn add_render_method(&mut self, class: impl Into<String>, method: RenderMethod) {
        self.methods.insert(class.into(), method);
    }

    pub fn remove_render_method(&mut self, class: &str) -> Option<RenderMethod> {
        self.methods.remove(class)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn skin_mut(&mut self) -> &mut Skin {
        &mut self.skin
    }

    pub fn damage(&self) -> &[Rect] {
        self.damage.rects()
    }

    pub fn clip_depth(&self) -> usize {
        self.clip.depth()
    }

    fn method(&self, class: &str) -> Result<RenderMethod> {
        self.methods
            .get(class)
            .cloned()
            .ok_or_else(|| UiError::NoRenderMethod {
                class: class.to_string(),
            })
    }
}

impl<B: Backend + 'static> Renderer for SkinRenderer<B> {
    fn skin(&self) -> &Skin {
        &self.skin
    }

    fn render_layers(&self, class: &str) -> Result<RenderLayers> {
        self.method(class)?;
        Ok(self.skin.element(class)?.render_layers)
    }

    fn render(
        &mut self,
        control: &ControlView<'_>,
        render_bounds: Rect,
        bounds: Rect,
        layer: RenderLayers,
    ) -> Result<()> {
        let method = self.method(control.class)?;
        let element = self.skin.element(control.class)?;
        let state = element.state(control.appearance.state).ok_or_else(|| {
            UiError::Skin(format!("{} has no normal state", control.class))
        })?;
        let font = self.skin.font_for(control.class, FontKind::Gui)?;

        self.painter.clear();
        let mut cx = RenderCx {
            view: control,
            element,
            state,
            font: &font,
            backend: &self.backend,
            painter: &mut self.painter,
            render_bounds,
            bounds,
            layer,
        };
        method(&mut cx)?;

        self.backend.draw(self.clip.current(), self.painter.cmds());
        Ok(())
    }

    fn measure_text(&self, class: &str, text: &str, font: FontKind) -> Result<Size> {
        let font = self.skin.font_for(class, font)?;
        Ok(self.backend.measure_text(text, &font))
    }

    fn push_clip_rect(&mut self, rect: Rect) {
        self.clip.push(rect);
    }

    fn pop_clip_rect(&mut self) -> Result<()> {
        self.clip.pop().map(|_| ())
    }

    fn clip_rect(&self) -> Rect {
        self.clip.current()
    }

    fn add_invalidated_rect(&mut self, rect: Rect) {
        self.damage.add(rect);
    }

    fn clear(&mut self, color: Color) {
        self.backend.clear(self.clip.current(), color);
    }

    fn update(&mut self) {
        if self.damage.is_empty() {
            return;
        }
        tracing::trace!(rects = self.damage.rects().len(), "present damage");
        self.backend.present(self.damage.rects());
        self.damage.clear();
    }

    fn flip(&mut self) {
        self.backend.present_all();
        self.damage.clear();
    }

    fn display_size(&self) -> Size {
        self.backend.display_size()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/render/skin.rs"]
mod tests;
