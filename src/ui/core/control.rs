//! Per-class message dispatch.
//!
//! Every control has a `ControlClass`. Its `process` handles the messages the class cares about
//! and hands the rest to [`default_process`], which runs the plain control behavior or, for
//! containers, the container behavior layered on top of it.

use super::error::{Result, UiError};
use super::event::{EventArgs, EventKind};
use super::geom::Rect;
use super::message::{HitRegion, Message, Reply};
use super::runtime::Ui;
use super::theme::RenderLayers;
use super::tree::{Behavior, ControlId, ControlNode};
use crate::ui::render::ControlView;

/// Visual data a control exposes to its render method.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance<'a> {
    /// Name of the skin state to draw with.
    pub state: &'static str,
    pub text: &'a str,
    pub checked: bool,
    /// Position within a scrollable range, `0.0..=1.0`.
    pub scroll: Option<f32>,
}

impl Appearance<'_> {
    pub fn plain(enabled: bool) -> Self {
        Self {
            state: if enabled { "normal" } else { "disabled" },
            text: "",
            checked: false,
            scroll: None,
        }
    }
}

pub trait ControlClass {
    /// Key into the renderer's method table and the skin.
    fn class_name(&self) -> &'static str;

    fn behavior(&self) -> Behavior {
        Behavior::SELECTABLE
    }

    fn is_container(&self) -> bool {
        false
    }

    fn has_channel(&self, kind: EventKind) -> bool {
        kind.is_base()
    }

    fn appearance<'a>(&self, _node: &'a ControlNode, enabled: bool) -> Appearance<'a> {
        Appearance::plain(enabled)
    }

    fn process(&self, ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
        default_process(ui, id, msg)
    }
}

/// Base behavior: container handling for container classes, plain control handling otherwise.
pub fn default_process(ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
    if ui.tree.get(id)?.class.is_container() {
        process_container(ui, id, msg)
    } else {
        process_control(ui, id, msg)
    }
}

pub fn process_control(ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
    match msg {
        Message::HitTest { pos } => {
            let node = ui.tree.get(id)?;
            if node.visible && ui.tree.screen_bounds(id)?.contains(*pos) {
                Ok(Reply::Hit(Some(id), HitRegion::Client))
            } else {
                Ok(Reply::Hit(None, HitRegion::None))
            }
        }
        Message::RenderBackground { clip } => render_stage(ui, id, Stage::Background, *clip),
        Message::Render { clip } => render_stage(ui, id, Stage::Content, *clip),
        Message::RenderForeground { clip } => render_stage(ui, id, Stage::Foreground, *clip),
        Message::EraseChild { region } => {
            ui.erase_in_owner(id, *region)?;
            Ok(Reply::Handled)
        }
        Message::SizeChanged { old } => {
            if ui.presented {
                let margin = ui.tree.get(id)?.margin;
                let region = old.expand(margin).union(&ui.tree.render_bounds(id)?);
                ui.erase_in_owner(id, region)?;
            }
            Ok(Reply::Handled)
        }
        Message::Selected => {
            let selectable = ui.tree.get(id)?.behavior.contains(Behavior::SELECTABLE);
            Ok(Reply::Target(selectable.then_some(id)))
        }
        Message::MouseHover => Ok(Reply::Text(ui.tree.get(id)?.tooltip.clone())),
        Message::DragAccept { .. } => Ok(Reply::Bool(ui.tree.get(id)?.accepts_drops)),
        Message::DragSendData => Ok(Reply::Payload(ui.tree.get(id)?.drag_data.clone())),
        Message::DragRecvData { payload } => {
            let args = EventArgs::Drop {
                payload: payload.clone(),
            };
            ui.fire(id, EventKind::DataDropped, &args)?;
            Ok(Reply::Handled)
        }
        Message::MouseEnter => fire_if_enabled(ui, id, EventKind::MouseEnter, EventArgs::None),
        Message::MouseLeave => fire_if_enabled(ui, id, EventKind::MouseLeave, EventArgs::None),
        Message::MousePress { button, pos } => {
            let args = EventArgs::Mouse {
                button: *button,
                pos: *pos,
            };
            fire_if_enabled(ui, id, EventKind::MousePress, args)
        }
        Message::MouseDown { button, pos } => {
            let args = EventArgs::Mouse {
                button: *button,
                pos: *pos,
            };
            fire_if_enabled(ui, id, EventKind::MouseDown, args)
        }
        Message::MouseRelease { hovering } => {
            let args = EventArgs::Release {
                hovering: *hovering,
            };
            fire_if_enabled(ui, id, EventKind::MouseRelease, args)
        }
        Message::MouseClick => fire_if_enabled(ui, id, EventKind::MouseClick, EventArgs::None),
        Message::MouseWheel { delta } => {
            let args = EventArgs::Wheel { delta: *delta };
            fire_if_enabled(ui, id, EventKind::MouseWheel, args)
        }
        Message::MouseStartDrag { button, start } => {
            let args = EventArgs::Drag {
                button: *button,
                start: *start,
            };
            fire_if_enabled(ui, id, EventKind::DragStarted, args)
        }
        Message::MouseStopDrag { button, start, .. } => {
            let args = EventArgs::Drag {
                button: *button,
                start: *start,
            };
            fire_if_enabled(ui, id, EventKind::DragStopped, args)
        }
        Message::MouseMove { .. } | Message::MouseDragMove { .. } => Ok(Reply::Handled),
        Message::Created => fire(ui, id, EventKind::Created),
        Message::Focused => fire(ui, id, EventKind::Focused),
        Message::Defocused => fire(ui, id, EventKind::Defocused),
        Message::Activated => fire(ui, id, EventKind::Activated),
        Message::Deactivated => fire(ui, id, EventKind::Deactivated),
        Message::AddChild(_)
        | Message::RemoveChild(_)
        | Message::RemoveChildren
        | Message::LayoutChildren(_)
        | Message::ChildIndex(_)
        | Message::Select(_)
        | Message::TextChanged(_) => Ok(Reply::Unhandled),
    }
}

pub fn process_container(ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
    match msg {
        Message::HitTest { pos } => {
            let node = ui.tree.get(id)?;
            if !node.visible || !ui.tree.screen_bounds(id)?.contains(*pos) {
                return Ok(Reply::Hit(None, HitRegion::None));
            }
            let children = node.children.clone();
            let mut hit = Reply::Hit(Some(id), HitRegion::Client);
            for child in children {
                let reply = ui.send(child, msg)?;
                if reply.hit().is_some() {
                    hit = reply;
                }
            }
            Ok(hit)
        }
        Message::AddChild(child) => {
            let node = ui.tree.get_mut(id)?;
            if node.children.contains(child) {
                return Ok(Reply::Bool(false));
            }
            node.children.push(*child);
            ui.tree.get_mut(*child)?.parent = Some(id);
            Ok(Reply::Bool(true))
        }
        Message::RemoveChild(child) => {
            let Some(idx) = ui.tree.get(id)?.children.iter().position(|c| c == child) else {
                return Ok(Reply::Bool(false));
            };
            let region = ui.tree.render_bounds(*child)?;
            let node = ui.tree.get_mut(id)?;
            node.children.remove(idx);
            if let Some(sel) = node.selected {
                if idx <= sel {
                    node.selected = sel.checked_sub(1);
                }
            }
            ui.destroy_subtree(*child);
            erase_own_region(ui, id, region)?;
            Ok(Reply::Bool(true))
        }
        Message::RemoveChildren => {
            let children = std::mem::take(&mut ui.tree.get_mut(id)?.children);
            ui.tree.get_mut(id)?.selected = None;
            let mut region = Rect::ZERO;
            for child in &children {
                region = region.union(&ui.tree.render_bounds(*child)?);
            }
            for child in children {
                ui.destroy_subtree(child);
            }
            erase_own_region(ui, id, region)?;
            Ok(Reply::Handled)
        }
        Message::ChildIndex(child) => {
            let node = ui.tree.get(id)?;
            Ok(Reply::Index(node.children.iter().position(|c| c == child)))
        }
        Message::LayoutChildren(cursor) => {
            let origin = ui.tree.get(id)?.padding.top_left();
            let cascade = ui.config.cascade_offset;
            cursor.apply(&mut ui.tree.nodes, Some(id), origin, cascade);
            Ok(Reply::Handled)
        }
        Message::Select(child) => {
            let node = ui.tree.get_mut(id)?;
            match node.children.iter().position(|c| c == child) {
                Some(idx) => {
                    node.selected = Some(idx);
                    Ok(Reply::Bool(true))
                }
                None => Ok(Reply::Bool(false)),
            }
        }
        Message::Selected => {
            let node = ui.tree.get(id)?;
            if node.behavior.contains(Behavior::SELECTABLE) {
                return Ok(Reply::Target(Some(id)));
            }
            for child in node.children.clone() {
                let reply = ui.send(child, msg)?;
                if reply.target().is_some() {
                    return Ok(reply);
                }
            }
            Ok(Reply::Target(None))
        }
        Message::EraseChild { region } => {
            let region = region.intersection(&ui.tree.render_bounds(id)?);
            if region.is_empty() || !ui.tree.is_visible(id) {
                return Ok(Reply::Handled);
            }
            render_pass(ui, id, region)?;
            Ok(Reply::Handled)
        }
        _ => process_control(ui, id, msg),
    }
}

fn erase_own_region(ui: &mut Ui, id: ControlId, region: Rect) -> Result<()> {
    if ui.presented && ui.tree.is_visible(id) && !region.is_empty() {
        ui.send(id, &Message::EraseChild { region })?;
    }
    Ok(())
}

fn fire(ui: &mut Ui, id: ControlId, kind: EventKind) -> Result<Reply> {
    ui.fire(id, kind, &EventArgs::None)?;
    Ok(Reply::Handled)
}

fn fire_if_enabled(ui: &mut Ui, id: ControlId, kind: EventKind, args: EventArgs) -> Result<Reply> {
    if ui.tree.is_enabled(id) {
        ui.fire(id, kind, &args)?;
    }
    Ok(Reply::Handled)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stage {
    Background,
    Content,
    Foreground,
}

/// Runs all three render stages on `id` over `clip`. An abort is logged once, here, and returned.
pub(crate) fn render_pass(ui: &mut Ui, id: ControlId, clip: Rect) -> Result<()> {
    let result = send_render_stages(ui, id, clip);
    if let Err(err) = &result {
        let control = ui.tree.get(id).map(|n| n.name().to_string()).unwrap_or_default();
        tracing::error!(control = %control, error = %err, "render pass aborted");
    }
    result
}

fn send_render_stages(ui: &mut Ui, id: ControlId, clip: Rect) -> Result<()> {
    ui.send(id, &Message::RenderBackground { clip })?;
    ui.send(id, &Message::Render { clip })?;
    ui.send(id, &Message::RenderForeground { clip })?;
    Ok(())
}

const CONTENT_LAYERS: RenderLayers = RenderLayers::ABOVE_BACKGROUND.union(RenderLayers::BELOW_FOREGROUND);

fn render_stage(ui: &mut Ui, id: ControlId, stage: Stage, clip: Rect) -> Result<Reply> {
    let node = ui.tree.get(id)?;
    let class = node.class_name();
    let container = node.class.is_container();
    let layers = ui.renderer.render_layers(class)?;
    if stage == Stage::Content && layers.contains(CONTENT_LAYERS) {
        return Err(UiError::ConflictingRenderLayers {
            class: class.to_string(),
        });
    }

    let wanted = match stage {
        Stage::Background => RenderLayers::BACKGROUND,
        Stage::Content => CONTENT_LAYERS,
        Stage::Foreground => RenderLayers::FOREGROUND,
    };
    let recurse = stage == Stage::Content && container;
    if !layers.intersects(wanted) && !recurse {
        return Ok(Reply::Handled);
    }

    let bounds = ui.tree.screen_bounds(id)?;
    let render_bounds = ui.tree.render_bounds(id)?;
    let invalidated = clip.intersection(&render_bounds);
    if invalidated.is_empty() {
        return Ok(Reply::Handled);
    }

    ui.renderer.push_clip_rect(invalidated);
    let drawn = draw_stage(ui, id, stage, layers, invalidated, render_bounds, bounds);
    let popped = ui.renderer.pop_clip_rect();
    drawn?;
    popped?;
    ui.renderer.add_invalidated_rect(invalidated);
    Ok(Reply::Handled)
}

fn draw_stage(
    ui: &mut Ui,
    id: ControlId,
    stage: Stage,
    layers: RenderLayers,
    invalidated: Rect,
    render_bounds: Rect,
    bounds: Rect,
) -> Result<()> {
    match stage {
        Stage::Background => draw(ui, id, render_bounds, bounds, RenderLayers::BACKGROUND),
        Stage::Foreground => draw(ui, id, render_bounds, bounds, RenderLayers::FOREGROUND),
        Stage::Content => {
            if layers.contains(RenderLayers::ABOVE_BACKGROUND) {
                draw(ui, id, render_bounds, bounds, RenderLayers::ABOVE_BACKGROUND)?;
            }
            let node = ui.tree.get(id)?;
            if node.class.is_container() {
                for child in node.children.clone() {
                    if !ui.tree.is_visible(child)
                        || !ui.tree.render_bounds(child)?.intersects(&invalidated)
                    {
                        continue;
                    }
                    let clip = invalidated;
                    ui.send(child, &Message::RenderBackground { clip })?;
                    ui.send(child, &Message::Render { clip })?;
                    ui.send(child, &Message::RenderForeground { clip })?;
                }
            }
            if layers.contains(RenderLayers::BELOW_FOREGROUND) {
                draw(ui, id, render_bounds, bounds, RenderLayers::BELOW_FOREGROUND)?;
            }
            Ok(())
        }
    }
}

fn draw(
    ui: &mut Ui,
    id: ControlId,
    render_bounds: Rect,
    bounds: Rect,
    layer: RenderLayers,
) -> Result<()> {
    let enabled = ui.tree.is_enabled(id);
    let node = ui.tree.get(id)?;
    let view = ControlView {
        id,
        class: node.class_name(),
        name: node.name(),
        padding: node.padding,
        appearance: node.class.appearance(node, enabled),
    };
    ui.renderer.render(&view, render_bounds, bounds, layer)
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/control.rs"]
mod tests;
