use super::color::Color;
use super::geom::{Point, Rect};
use super::theme::FontSpec;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaintCmd {
    FillRect {
        rect: Rect,
        color: Color,
    },
    /// One-pixel outline drawn inside `rect`.
    StrokeRect {
        rect: Rect,
        color: Color,
    },
    FillEllipse {
        rect: Rect,
        color: Color,
    },
    StrokeEllipse {
        rect: Rect,
        color: Color,
    },
    Text {
        pos: Point,
        text: String,
        color: Color,
        font: FontSpec,
    },
}

#[derive(Debug, Default)]
pub struct Painter {
    cmds: Vec<PaintCmd>,
}

impl Painter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    pub fn cmds(&self) -> &[PaintCmd] {
        &self.cmds
    }

    pub fn push(&mut self, cmd: PaintCmd) {
        self.cmds.push(cmd);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(PaintCmd::FillRect { rect, color });
    }

    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        self.cmds.push(PaintCmd::StrokeRect { rect, color });
    }

    pub fn fill_ellipse(&mut self, rect: Rect, color: Color) {
        self.cmds.push(PaintCmd::FillEllipse { rect, color });
    }

    pub fn stroke_ellipse(&mut self, rect: Rect, color: Color) {
        self.cmds.push(PaintCmd::StrokeEllipse { rect, color });
    }

    pub fn text(&mut self, pos: Point, text: impl Into<String>, color: Color, font: &FontSpec) {
        self.cmds.push(PaintCmd::Text {
            pos,
            text: text.into(),
            color,
            font: font.clone(),
        });
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/painter.rs"]
mod tests;
