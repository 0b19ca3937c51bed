use crate::ui::core::error::{Result, UiError};
use crate::ui::core::geom::Rect;

/// Nested clip rectangles. Each push narrows to the intersection with the current top,
/// which is the full display when the stack is empty.
#[derive(Clone, Debug)]
pub struct ClipStack {
    display: Rect,
    stack: Vec<Rect>,
}

impl ClipStack {
    pub fn new(display: Rect) -> Self {
        Self {
            display,
            stack: Vec::new(),
        }
    }

    pub fn current(&self) -> Rect {
        self.stack.last().copied().unwrap_or(self.display)
    }

    pub fn push(&mut self, rect: Rect) -> Rect {
        let clip = self.current().intersection(&rect);
        self.stack.push(clip);
        clip
    }

    pub fn pop(&mut self) -> Result<Rect> {
        self.stack.pop().ok_or(UiError::UnbalancedClip)?;
        Ok(self.current())
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn display(&self) -> Rect {
        self.display
    }
}

/// Rectangles drawn since the last flush.
#[derive(Clone, Debug, Default)]
pub struct Damage {
    rects: Vec<Rect>,
}

impl Damage {
    pub fn add(&mut self, rect: Rect) {
        if !rect.is_empty() {
            self.rects.push(rect);
        }
    }

    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/render/clip.rs"]
mod tests;
