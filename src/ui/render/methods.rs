//! Render methods for the built-in widget classes.

use std::rc::Rc;

use super::skin::{RenderCx, RenderMethod};
use crate::ui::core::color::Color;
use crate::ui::core::error::Result;
use crate::ui::core::geom::{Rect, Size};
use crate::ui::core::theme::RenderLayers;

const THUMB_MIN: i32 = 6;

pub fn builtin_methods() -> Vec<(&'static str, RenderMethod)> {
    vec![
        ("PushButton", Rc::new(push_button) as RenderMethod),
        ("Panel", Rc::new(panel)),
        ("CheckBox", Rc::new(check_box)),
        ("RadioButton", Rc::new(radio_button)),
        ("VScrollBar", Rc::new(v_scroll_bar)),
    ]
}

fn fore(cx: &RenderCx<'_>) -> Color {
    cx.state.color.unwrap_or(Color::BLACK)
}

fn back(cx: &RenderCx<'_>) -> Color {
    cx.state.backcolor.unwrap_or(Color::WHITE)
}

fn border(cx: &RenderCx<'_>) -> Color {
    cx.state.bordercolor.unwrap_or_else(|| fore(cx))
}

fn mark(cx: &RenderCx<'_>) -> Color {
    cx.state.checkmark.unwrap_or_else(|| fore(cx))
}

pub fn push_button(cx: &mut RenderCx<'_>) -> Result<()> {
    let bounds = cx.bounds;
    match cx.layer {
        RenderLayers::BACKGROUND => {
            let color = back(cx);
            cx.painter.fill_rect(bounds, color);
        }
        RenderLayers::ABOVE_BACKGROUND => {
            let color = fore(cx);
            let client = cx.client();
            let text = cx.view.appearance.text;
            cx.aligned_text(client, text, color);
        }
        RenderLayers::FOREGROUND => {
            let color = border(cx);
            cx.painter.stroke_rect(bounds, color);
        }
        _ => {}
    }
    Ok(())
}

pub fn panel(cx: &mut RenderCx<'_>) -> Result<()> {
    let bounds = cx.bounds;
    match cx.layer {
        RenderLayers::BACKGROUND => {
            let color = back(cx);
            cx.painter.fill_rect(bounds, color);
        }
        RenderLayers::FOREGROUND => {
            let color = border(cx);
            cx.painter.stroke_rect(bounds, color);
        }
        _ => {}
    }
    Ok(())
}

/// Square indicator on the left, label in the rest of the client area.
fn indicator(cx: &RenderCx<'_>) -> (Rect, Rect) {
    let client = cx.client();
    let side = client.height().min(client.width());
    let (_, label) = client.split_h(client.left() + side + i32::from(cx.view.padding.right));
    (Rect::from_parts(client.location(), Size::new(side, side)), label)
}

pub fn check_box(cx: &mut RenderCx<'_>) -> Result<()> {
    if cx.layer != RenderLayers::ABOVE_BACKGROUND {
        return Ok(());
    }
    let (boxed, label) = indicator(cx);
    let color = back(cx);
    cx.painter.fill_rect(boxed, color);
    let color = border(cx);
    cx.painter.stroke_rect(boxed, color);
    if cx.view.appearance.checked {
        let color = mark(cx);
        cx.painter.fill_rect(boxed.shrink(3), color);
    }
    let color = fore(cx);
    let text = cx.view.appearance.text;
    cx.aligned_text(label, text, color);
    Ok(())
}

pub fn radio_button(cx: &mut RenderCx<'_>) -> Result<()> {
    if cx.layer != RenderLayers::ABOVE_BACKGROUND {
        return Ok(());
    }
    let (dot, label) = indicator(cx);
    let color = back(cx);
    cx.painter.fill_ellipse(dot, color);
    let color = border(cx);
    cx.painter.stroke_ellipse(dot, color);
    if cx.view.appearance.checked {
        let color = mark(cx);
        cx.painter.fill_ellipse(dot.shrink(3), color);
    }
    let color = fore(cx);
    let text = cx.view.appearance.text;
    cx.aligned_text(label, text, color);
    Ok(())
}

pub fn v_scroll_bar(cx: &mut RenderCx<'_>) -> Result<()> {
    let bounds = cx.bounds;
    match cx.layer {
        RenderLayers::BACKGROUND => {
            let color = back(cx);
            cx.painter.fill_rect(bounds, color);
            let color = border(cx);
            cx.painter.stroke_rect(bounds, color);
        }
        RenderLayers::ABOVE_BACKGROUND => {
            let track = cx.client().shrink(1);
            let thumb_h = (track.height() / 5).max(THUMB_MIN).min(track.height());
            let travel = track.height() - thumb_h;
            let pos = cx.view.appearance.scroll.unwrap_or(0.0).clamp(0.0, 1.0);
            let top = track.top() + (travel as f32 * pos).round() as i32;
            let thumb = Rect::new(track.left(), top, track.width(), thumb_h);
            let color = fore(cx);
            cx.painter.fill_rect(thumb, color);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/render/methods.rs"]
mod tests;
