//! Control arena: every control lives in one slot map and refers to its parent by id.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use compact_str::CompactString;
use slotmap::{new_key_type, SlotMap};

use super::control::ControlClass;
use super::error::{Result, UiError};
use super::event::EventChannels;
use super::geom::{flag_ops, Point, Rect};
use super::input::DragPayload;
use super::layout::Spacing;

new_key_type! {
    pub struct ControlId;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Behavior(u8);

impl Behavior {
    pub const SELECTABLE: Self = Self(1);
    pub const FIXED_WIDTH: Self = Self(2);
    pub const FIXED_HEIGHT: Self = Self(4);
    pub const FIXED_SIZE: Self = Self(Self::FIXED_WIDTH.0 | Self::FIXED_HEIGHT.0);
    pub const MODAL: Self = Self(8);
    pub const MODELESS: Self = Self(16);
    pub const NON_CLIENT: Self = Self(32);
}

flag_ops!(Behavior);

pub struct ControlNode {
    pub(crate) class: Rc<dyn ControlClass>,
    pub(crate) name: CompactString,
    pub(crate) parent: Option<ControlId>,
    /// Relative to the parent's origin.
    pub(crate) bounds: Rect,
    pub(crate) margin: Spacing,
    pub(crate) padding: Spacing,
    pub(crate) behavior: Behavior,
    pub(crate) visible: bool,
    pub(crate) enabled: bool,
    pub(crate) tooltip: String,
    pub(crate) children: Vec<ControlId>,
    pub(crate) selected: Option<usize>,
    pub(crate) data: Box<dyn Any>,
    pub(crate) events: EventChannels,
    pub(crate) drag_data: Option<DragPayload>,
    pub(crate) accepts_drops: bool,
}

impl ControlNode {
    pub fn new(class: Rc<dyn ControlClass>, name: impl Into<CompactString>) -> Self {
        let behavior = class.behavior();
        Self {
            class,
            name: name.into(),
            parent: None,
            bounds: Rect::ZERO,
            margin: Spacing::default(),
            padding: Spacing::default(),
            behavior,
            visible: true,
            enabled: true,
            tooltip: String::new(),
            children: Vec::new(),
            selected: None,
            data: Box::new(()),
            events: EventChannels::default(),
            drag_data: None,
            accepts_drops: false,
        }
    }

    pub fn with_data(mut self, data: Box<dyn Any>) -> Self {
        self.data = data;
        self
    }

    pub fn class_name(&self) -> &'static str {
        self.class.class_name()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<ControlId> {
        self.parent
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn margin(&self) -> Spacing {
        self.margin
    }

    pub fn padding(&self) -> Spacing {
        self.padding
    }

    pub fn behavior(&self) -> Behavior {
        self.behavior
    }

    pub fn children(&self) -> &[ControlId] {
        &self.children
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn tooltip(&self) -> &str {
        &self.tooltip
    }

    pub fn data<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref()
    }

    pub fn data_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.data.downcast_mut()
    }
}

impl fmt::Debug for ControlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlNode")
            .field("class", &self.class.class_name())
            .field("name", &self.name)
            .field("parent", &self.parent)
            .field("bounds", &self.bounds)
            .field("visible", &self.visible)
            .field("enabled", &self.enabled)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Owns every control plus the z-ordered topmost list (last is frontmost).
#[derive(Debug, Default)]
pub struct ControlTree {
    pub(crate) nodes: SlotMap<ControlId, ControlNode>,
    pub(crate) topmost: Vec<ControlId>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ControlId) -> Result<&ControlNode> {
        self.nodes.get(id).ok_or(UiError::UnknownControl)
    }

    pub fn get_mut(&mut self, id: ControlId) -> Result<&mut ControlNode> {
        self.nodes.get_mut(id).ok_or(UiError::UnknownControl)
    }

    pub fn contains(&self, id: ControlId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn topmost(&self) -> &[ControlId] {
        &self.topmost
    }

    pub fn is_topmost(&self, id: ControlId) -> bool {
        self.topmost.contains(&id)
    }

    /// Adds `id` as the frontmost window; no-op if already listed.
    pub fn push_topmost(&mut self, id: ControlId) {
        if !self.topmost.contains(&id) {
            self.topmost.push(id);
        }
    }

    pub fn bring_to_front(&mut self, id: ControlId) {
        if let Some(idx) = self.topmost.iter().position(|t| *t == id) {
            let id = self.topmost.remove(idx);
            self.topmost.push(id);
        }
    }

    pub fn ancestors(&self, id: ControlId) -> impl Iterator<Item = ControlId> + '_ {
        std::iter::successors(self.nodes.get(id).and_then(|n| n.parent), move |p| {
            self.nodes.get(*p).and_then(|n| n.parent)
        })
    }

    /// The window owning `id`, which may be `id` itself.
    pub fn topmost_of(&self, id: ControlId) -> Option<ControlId> {
        let root = self.ancestors(id).last().unwrap_or(id);
        self.is_topmost(root).then_some(root)
    }

    pub fn is_descendant_of(&self, id: ControlId, ancestor: ControlId) -> bool {
        id == ancestor || self.ancestors(id).any(|a| a == ancestor)
    }

    /// `id` and everything under it, parents first.
    pub fn subtree(&self, id: ControlId) -> Vec<ControlId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let Some(node) = self.nodes.get(next) else {
                continue;
            };
            out.push(next);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Local flag ANDed with every ancestor's. Detached controls are never visible.
    pub fn is_visible(&self, id: ControlId) -> bool {
        self.effective(id, |n| n.visible)
    }

    pub fn is_enabled(&self, id: ControlId) -> bool {
        self.effective(id, |n| n.enabled)
    }

    fn effective(&self, id: ControlId, flag: impl Fn(&ControlNode) -> bool) -> bool {
        let mut cur = id;
        loop {
            let Some(node) = self.nodes.get(cur) else {
                return false;
            };
            if !flag(node) {
                return false;
            }
            match node.parent {
                Some(parent) => cur = parent,
                None => return self.is_topmost(cur),
            }
        }
    }

    /// Absolute origin of the control.
    pub fn position(&self, id: ControlId) -> Result<Point> {
        let mut pos = self.get(id)?.bounds.location();
        for ancestor in self.ancestors(id) {
            pos += self.get(ancestor)?.bounds.location();
        }
        Ok(pos)
    }

    pub fn screen_bounds(&self, id: ControlId) -> Result<Rect> {
        let node = self.get(id)?;
        Ok(Rect::from_parts(self.position(id)?, node.bounds.size()))
    }

    /// Screen bounds expanded by the margin.
    pub fn render_bounds(&self, id: ControlId) -> Result<Rect> {
        let margin = self.get(id)?.margin;
        Ok(self.screen_bounds(id)?.expand(margin))
    }

    pub fn to_local(&self, id: ControlId, screen: Point) -> Result<Point> {
        Ok(screen - self.position(id)?)
    }

    pub fn to_screen(&self, id: ControlId, local: Point) -> Result<Point> {
        Ok(local + self.position(id)?)
    }

    pub fn find_child(&self, parent: ControlId, name: &str) -> Option<ControlId> {
        let node = self.nodes.get(parent)?;
        node.children
            .iter()
            .copied()
            .find(|c| self.nodes.get(*c).is_some_and(|n| n.name == name))
    }

    pub fn find_topmost(&self, name: &str) -> Option<ControlId> {
        self.topmost
            .iter()
            .copied()
            .find(|t| self.nodes.get(*t).is_some_and(|n| n.name == name))
    }

    /// Resolves `window/child/grandchild`.
    pub fn find_path(&self, path: &str) -> Option<ControlId> {
        let mut parts = path.split('/').filter(|p| !p.is_empty());
        let mut cur = self.find_topmost(parts.next()?)?;
        for part in parts {
            cur = self.find_child(cur, part)?;
        }
        Some(cur)
    }

    /// Follows selected-child indices down from `id` to the control that should hold focus.
    pub fn selected_chain(&mut self, id: ControlId) -> Option<ControlId> {
        let node = self.nodes.get(id)?;
        if let Some(idx) = node.selected {
            if let Some(child) = node.children.get(idx).copied() {
                return self.selected_chain(child);
            }
            if let Some(node) = self.nodes.get_mut(id) {
                node.selected = None;
            }
        }
        let node = self.nodes.get(id)?;
        node.behavior.contains(Behavior::SELECTABLE).then_some(id)
    }

    /// Drops `id` and its descendants from the arena; returns the removed ids.
    pub(crate) fn free_subtree(&mut self, id: ControlId) -> Vec<ControlId> {
        let removed = self.subtree(id);
        for r in &removed {
            self.nodes.remove(*r);
        }
        self.topmost.retain(|t| !removed.contains(t));
        removed
    }

    pub(crate) fn sibling_named(&self, parent: Option<ControlId>, name: &str) -> bool {
        match parent {
            Some(p) => self.find_child(p, name).is_some(),
            None => self.find_topmost(name).is_some(),
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/tree.rs"]
mod tests;
