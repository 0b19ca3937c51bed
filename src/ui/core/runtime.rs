//! The runtime object: owns the control tree, the renderer, and all pointer, focus and
//! activation state, and turns raw input into messages.

use std::any::Any;
use std::rc::Rc;

use compact_str::{format_compact, CompactString};
use rustc_hash::FxHashMap;

use super::control::{render_pass, ControlClass};
use super::cursor::{LayoutCursor, Placement};
use super::error::{Result, UiError};
use super::event::{EventArgs, EventKind, Handler};
use super::geom::{Point, Rect, Size};
use super::input::{DragPayload, DragState, InputEvent, MouseButton, PointerState};
use super::message::{Message, Reply};
use super::scope::Scope;
use super::theme::FontKind;
use super::tree::{Behavior, ControlId, ControlNode, ControlTree};
use crate::config::UiConfig;
use crate::ui::render::Renderer;

/// How a new control is named and placed.
#[derive(Clone, Debug, Default)]
pub struct ControlOptions {
    /// Defaults to the lowercased class name plus a counter.
    pub name: Option<CompactString>,
    pub placement: Placement,
    /// Overrides the skin's default size.
    pub size: Option<Size>,
    pub location: Option<Point>,
}

impl ControlOptions {
    pub fn named(name: impl Into<CompactString>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickStatus {
    pub quit: bool,
}

#[derive(Debug)]
struct ConstructionContext {
    /// `None` for the base context, which collects topmost windows.
    owner: Option<ControlId>,
    cursor: LayoutCursor,
}

pub struct Ui {
    pub(crate) tree: ControlTree,
    pub(crate) renderer: Box<dyn Renderer>,
    pub(crate) config: UiConfig,
    pointer: PointerState,
    drag: DragState,
    captured: Option<ControlId>,
    hovered: Option<ControlId>,
    focused: Option<ControlId>,
    active: Option<ControlId>,
    contexts: Vec<ConstructionContext>,
    name_counters: FxHashMap<&'static str, u32>,
    /// Set after the first validate pass; the erase contract only runs once something is on screen.
    pub(crate) presented: bool,
}

impl Ui {
    pub fn new(renderer: Box<dyn Renderer>, config: UiConfig) -> Self {
        let display = renderer.display_size();
        let (width, height) = (display.width, display.height);
        tracing::info!(width, height, "ui runtime started");
        Self {
            tree: ControlTree::new(),
            renderer,
            config,
            pointer: PointerState::default(),
            drag: DragState::default(),
            captured: None,
            hovered: None,
            focused: None,
            active: None,
            contexts: vec![ConstructionContext {
                owner: None,
                cursor: LayoutCursor::new(),
            }],
            name_counters: FxHashMap::default(),
            presented: false,
        }
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    pub fn node(&self, id: ControlId) -> Result<&ControlNode> {
        self.tree.get(id)
    }

    pub fn renderer(&self) -> &(dyn Renderer + 'static) {
        self.renderer.as_ref()
    }

    pub fn renderer_mut(&mut self) -> &mut (dyn Renderer + 'static) {
        self.renderer.as_mut()
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    pub fn hovered(&self) -> Option<ControlId> {
        self.hovered
    }

    pub fn captured(&self) -> Option<ControlId> {
        self.captured
    }

    pub fn focused(&self) -> Option<ControlId> {
        self.focused
    }

    pub fn active(&self) -> Option<ControlId> {
        self.active
    }

    pub fn is_presented(&self) -> bool {
        self.presented
    }

    pub fn find(&self, path: &str) -> Option<ControlId> {
        self.tree.find_path(path)
    }

    // ---------------------------------------------------------------------
    // Dispatch
    // ---------------------------------------------------------------------

    /// Routes `msg` to the control's class.
    pub fn send(&mut self, id: ControlId, msg: &Message) -> Result<Reply> {
        let class = Rc::clone(&self.tree.get(id)?.class);
        tracing::trace!(message = msg.name(), class = class.class_name(), "dispatch");
        class.process(self, id, msg)
    }

    /// Runs every handler attached to `kind`, in attach order.
    pub fn fire(&mut self, id: ControlId, kind: EventKind, args: &EventArgs) -> Result<()> {
        let handlers: Vec<Handler> = self.tree.get(id)?.events.handlers(kind).to_vec();
        for handler in handlers {
            handler(self, id, args)?;
        }
        Ok(())
    }

    pub fn attach<F>(&mut self, id: ControlId, kind: EventKind, handler: F) -> Result<()>
    where
        F: Fn(&mut Ui, ControlId, &EventArgs) -> Result<()> + 'static,
    {
        let node = self.tree.get_mut(id)?;
        if !node.class.has_channel(kind) {
            return Err(UiError::UnknownChannel {
                class: node.class_name().to_string(),
                channel: format!("{kind:?}"),
            });
        }
        node.events.attach(kind, Rc::new(handler));
        Ok(())
    }

    pub fn detach_all(&mut self, id: ControlId, kind: EventKind) -> Result<()> {
        self.tree.get_mut(id)?.events.detach_all(kind);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Creates a control under the currently open scope, or as a new topmost window when
    /// no scope is open.
    pub fn create(
        &mut self,
        class: Rc<dyn ControlClass>,
        data: Box<dyn Any>,
        options: ControlOptions,
    ) -> Result<ControlId> {
        let class_name = class.class_name();
        let metrics = self.renderer.skin().layout_for(class_name);
        let parent = self.current_owner();
        let name = match options.name {
            Some(name) => name,
            None => self.auto_name(class_name, parent),
        };
        if self.tree.sibling_named(parent, &name) {
            return Err(UiError::DuplicateName {
                name: name.to_string(),
            });
        }

        let mut node = ControlNode::new(class, name).with_data(data);
        node.margin = metrics.margin;
        node.padding = metrics.padding;
        node.bounds = Rect::from_parts(
            options.location.unwrap_or(Point::ZERO),
            options.size.unwrap_or(metrics.size),
        );
        let id = self.tree.nodes.insert(node);

        match parent {
            Some(parent) => {
                let added = self.send(parent, &Message::AddChild(id));
                if !matches!(added, Ok(Reply::Bool(true))) {
                    self.tree.nodes.remove(id);
                    added?;
                    return Err(UiError::NotAContainer {
                        class: self.tree.get(parent)?.class_name().to_string(),
                    });
                }
            }
            None => self.tree.push_topmost(id),
        }
        self.current_cursor().push(id, options.placement);
        tracing::debug!(class = class_name, parent = ?parent, "control created");

        self.send(id, &Message::Created)?;
        Ok(id)
    }

    /// Opens a construction scope on `id`: controls created through the returned guard
    /// become its children and are laid out when the guard closes.
    pub fn open(&mut self, id: ControlId) -> Result<Scope<'_>> {
        self.tree.get(id)?;
        self.contexts.push(ConstructionContext {
            owner: Some(id),
            cursor: LayoutCursor::new(),
        });
        Ok(Scope::new(self, id))
    }

    /// Pops the innermost scope and lays out what it collected.
    pub(crate) fn exit_context(&mut self) -> Result<()> {
        if self.contexts.len() <= 1 {
            return Ok(());
        }
        let Some(context) = self.contexts.pop() else {
            return Ok(());
        };
        match context.owner {
            Some(owner) if self.tree.contains(owner) => {
                self.send(owner, &Message::LayoutChildren(context.cursor))?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Places the topmost windows created since the last call.
    pub fn layout_topmost(&mut self) {
        let Some(base) = self.contexts.first_mut() else {
            return;
        };
        let cursor = std::mem::take(&mut base.cursor);
        let origin = self.renderer.skin().metrics.default.padding.top_left();
        cursor.apply(&mut self.tree.nodes, None, origin, self.config.cascade_offset);
    }

    fn current_owner(&self) -> Option<ControlId> {
        self.contexts.last().and_then(|c| c.owner)
    }

    fn current_cursor(&mut self) -> &mut LayoutCursor {
        if self.contexts.is_empty() {
            self.contexts.push(ConstructionContext {
                owner: None,
                cursor: LayoutCursor::new(),
            });
        }
        let last = self.contexts.len() - 1;
        &mut self.contexts[last].cursor
    }

    fn auto_name(&mut self, class: &'static str, parent: Option<ControlId>) -> CompactString {
        let base = class.to_lowercase();
        loop {
            let counter = self.name_counters.entry(class).or_insert(0);
            let name = match *counter {
                0 => CompactString::from(base.as_str()),
                n => format_compact!("{base}{n}"),
            };
            *counter += 1;
            if !self.tree.sibling_named(parent, &name) {
                return name;
            }
        }
    }

    // ---------------------------------------------------------------------
    // Control state
    // ---------------------------------------------------------------------

    /// Resizes a control. Fixed axes keep their size.
    pub fn set_size(&mut self, id: ControlId, size: Size) -> Result<()> {
        let node = self.tree.get_mut(id)?;
        let old = node.bounds;
        let mut bounds = old;
        if !node.behavior.contains(Behavior::FIXED_WIDTH) {
            bounds.set_width(size.width);
        }
        if !node.behavior.contains(Behavior::FIXED_HEIGHT) {
            bounds.set_height(size.height);
        }
        self.set_bounds(id, bounds)
    }

    pub fn set_location(&mut self, id: ControlId, location: Point) -> Result<()> {
        let mut bounds = self.tree.get(id)?.bounds;
        bounds.set_location(location);
        self.set_bounds(id, bounds)
    }

    /// Replaces the local bounds and runs the erase contract over the old and new area.
    pub(crate) fn set_bounds(&mut self, id: ControlId, bounds: Rect) -> Result<()> {
        let node = self.tree.get_mut(id)?;
        let old = node.bounds;
        if old == bounds {
            return Ok(());
        }
        node.bounds = bounds;
        let offset = self.tree.screen_bounds(id)?.location() - bounds.location();
        self.send(
            id,
            &Message::SizeChanged {
                old: old.translate(offset),
            },
        )?;
        Ok(())
    }

    pub fn set_visible(&mut self, id: ControlId, visible: bool) -> Result<()> {
        let node = self.tree.get_mut(id)?;
        if node.visible == visible {
            return Ok(());
        }
        if visible {
            node.visible = true;
            return self.invalidate(id);
        }

        let was_shown = self.tree.is_visible(id);
        let region = self.tree.render_bounds(id)?;
        self.tree.get_mut(id)?.visible = false;
        self.release_hidden(id);
        if self.presented && was_shown {
            self.erase_in_owner(id, region)?;
        }
        Ok(())
    }

    pub fn set_enabled(&mut self, id: ControlId, enabled: bool) -> Result<()> {
        let node = self.tree.get_mut(id)?;
        if node.enabled == enabled {
            return Ok(());
        }
        node.enabled = enabled;
        self.invalidate(id)
    }

    pub fn set_text(&mut self, id: ControlId, text: impl Into<String>) -> Result<Reply> {
        self.send(id, &Message::TextChanged(text.into()))
    }

    pub fn set_tooltip(&mut self, id: ControlId, tooltip: impl Into<String>) -> Result<()> {
        self.tree.get_mut(id)?.tooltip = tooltip.into();
        Ok(())
    }

    /// Tooltip text, asked of the control itself so classes can compute it.
    pub fn tooltip(&mut self, id: ControlId) -> Result<String> {
        match self.send(id, &Message::MouseHover)? {
            Reply::Text(text) => Ok(text),
            _ => Ok(String::new()),
        }
    }

    pub fn set_drag_data(&mut self, id: ControlId, payload: Option<DragPayload>) -> Result<()> {
        self.tree.get_mut(id)?.drag_data = payload;
        Ok(())
    }

    pub fn set_accepts_drops(&mut self, id: ControlId, accepts: bool) -> Result<()> {
        self.tree.get_mut(id)?.accepts_drops = accepts;
        Ok(())
    }

    pub fn set_behavior(&mut self, id: ControlId, behavior: Behavior) -> Result<()> {
        self.tree.get_mut(id)?.behavior = behavior;
        Ok(())
    }

    /// Typed per-class state of a control.
    pub fn state<T: Any>(&self, id: ControlId, expected: &'static str) -> Result<&T> {
        let node = self.tree.get(id)?;
        node.data::<T>().ok_or(UiError::ClassMismatch {
            expected,
            found: node.class_name(),
        })
    }

    pub fn state_mut<T: Any>(&mut self, id: ControlId, expected: &'static str) -> Result<&mut T> {
        let node = self.tree.get_mut(id)?;
        let found = node.class_name();
        node.data_mut::<T>()
            .ok_or(UiError::ClassMismatch { expected, found })
    }

    pub fn measure_text(&self, id: ControlId, text: &str) -> Result<Size> {
        let class = self.tree.get(id)?.class_name();
        self.renderer.measure_text(class, text, FontKind::Gui)
    }

    /// Repaints the control's render bounds once something has been presented.
    pub fn invalidate(&mut self, id: ControlId) -> Result<()> {
        if !self.presented || !self.tree.is_visible(id) {
            return Ok(());
        }
        let region = self.tree.render_bounds(id)?;
        self.erase_in_owner(id, region)
    }

    /// Makes `window` the active topmost window and brings it to the front.
    pub fn activate(&mut self, window: ControlId) -> Result<()> {
        if !self.tree.is_topmost(window) {
            return Err(UiError::UnknownControl);
        }
        self.tree.bring_to_front(window);
        self.switch_active(window)
    }

    /// Removes a control: through its parent's `RemoveChild`, or directly for a topmost window.
    pub fn remove(&mut self, id: ControlId) -> Result<bool> {
        match self.tree.get(id)?.parent {
            Some(parent) => Ok(self.send(parent, &Message::RemoveChild(id))?.as_bool()),
            None => {
                let region = self.tree.render_bounds(id)?;
                let visible = self.tree.is_visible(id);
                self.destroy_subtree(id);
                if self.presented && visible {
                    self.erase(region)?;
                }
                Ok(true)
            }
        }
    }

    /// Frees `id` and everything under it and forgets any runtime reference into it.
    pub(crate) fn destroy_subtree(&mut self, id: ControlId) {
        let removed = self.tree.free_subtree(id);
        for slot in [
            &mut self.hovered,
            &mut self.captured,
            &mut self.focused,
            &mut self.active,
        ] {
            if slot.is_some_and(|c| removed.contains(&c)) {
                *slot = None;
            }
        }
        if self.captured.is_none() {
            self.drag = DragState::default();
        }
        if self.drag.receiver.is_some_and(|r| removed.contains(&r)) {
            self.drag.receiver = None;
            self.drag.accept = false;
        }
        tracing::debug!(count = removed.len(), "controls removed");
    }

    fn release_hidden(&mut self, id: ControlId) {
        let tree = &self.tree;
        for slot in [&mut self.hovered, &mut self.captured, &mut self.focused] {
            if slot.is_some_and(|c| tree.is_descendant_of(c, id)) {
                *slot = None;
            }
        }
        if self.captured.is_none() {
            self.drag = DragState::default();
        }
    }

    // ---------------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------------

    /// One frame: consume the input batch, then run a single validate pass.
    pub fn tick(&mut self, events: &[InputEvent], now_ms: u64) -> Result<TickStatus> {
        let status = self.process_events(events, now_ms)?;
        if !status.quit {
            self.validate()?;
        }
        Ok(status)
    }

    pub fn process_events(&mut self, events: &[InputEvent], now_ms: u64) -> Result<TickStatus> {
        for event in events {
            match *event {
                InputEvent::Motion { pos, .. } => self.on_motion(pos)?,
                InputEvent::ButtonDown { button, pos } => self.on_button_down(button, pos, now_ms)?,
                InputEvent::ButtonUp { button, pos } => self.on_button_up(button, pos, now_ms)?,
                InputEvent::Wheel { delta, pos } => self.on_wheel(delta, pos)?,
                InputEvent::Quit => {
                    tracing::info!("quit requested");
                    return Ok(TickStatus { quit: true });
                }
            }
        }

        let held: Vec<MouseButton> = self.pointer.stale_held().collect();
        if let Some(hovered) = self.hovered {
            let pos = self.pointer.pos;
            for button in held {
                self.send(hovered, &Message::MouseDown { button, pos })?;
            }
        }
        self.pointer.end_tick();
        Ok(TickStatus::default())
    }

    /// Frontmost control under `pos`.
    pub fn hit_test(&mut self, pos: Point) -> Result<Option<ControlId>> {
        let mut hit = None;
        for window in self.tree.topmost.clone() {
            if let Some(found) = self.send(window, &Message::HitTest { pos })?.hit() {
                hit = Some(found);
            }
        }
        Ok(hit)
    }

    fn on_motion(&mut self, pos: Point) -> Result<()> {
        self.pointer.pos = pos;
        let hit = self.hit_test(pos)?;

        let Some(captured) = self.captured else {
            if hit == self.hovered {
                if let Some(hovered) = hit {
                    self.send(hovered, &Message::MouseMove { pos })?;
                }
                return Ok(());
            }
            return self.change_hover(hit);
        };

        if self.drag.button.is_none() {
            let threshold = self.config.drag_threshold;
            let started = MouseButton::ALL.into_iter().find(|b| {
                let track = self.pointer.button(*b);
                track.pressed && (pos - track.anchor).max_abs() > threshold
            });
            match started {
                Some(button) => {
                    self.drag.button = Some(button);
                    let start = self.pointer.button(button).anchor;
                    tracing::debug!(?button, x = start.x, y = start.y, "drag started");
                    self.send(captured, &Message::MouseStartDrag { button, start })?;
                }
                None => {
                    self.send(captured, &Message::MouseMove { pos })?;
                }
            }
        }

        if let Some(button) = self.drag.button {
            let start = self.pointer.button(button).anchor;
            self.send(captured, &Message::MouseDragMove { button, start, pos })?;
            match hit {
                Some(candidate) if candidate != captured => {
                    let accept = self
                        .send(candidate, &Message::DragAccept { source: captured })?
                        .as_bool();
                    self.drag.accept = accept;
                    self.drag.receiver = Some(candidate);
                }
                _ => {
                    self.drag.accept = false;
                    self.drag.receiver = None;
                }
            }
        }
        Ok(())
    }

    fn change_hover(&mut self, hit: Option<ControlId>) -> Result<()> {
        if hit == self.hovered {
            return Ok(());
        }
        if let Some(old) = self.hovered.take() {
            if self.tree.contains(old) {
                self.send(old, &Message::MouseLeave)?;
            }
        }
        self.hovered = hit;
        if let Some(new) = hit {
            self.send(new, &Message::MouseEnter)?;
        }
        Ok(())
    }

    fn on_button_down(&mut self, button: MouseButton, pos: Point, now_ms: u64) -> Result<()> {
        self.pointer.pos = pos;
        self.pointer.press(button, pos, now_ms);
        if button != MouseButton::Left {
            return Ok(());
        }

        if self.captured.is_none() {
            let hit = self.hit_test(pos)?;
            self.change_hover(hit)?;
        }
        let Some(target) = self.hovered else {
            return Ok(());
        };

        if let Some(window) = self.tree.topmost_of(target) {
            if !self.activate_on_click(window)? {
                tracing::debug!("activation refused by modal window");
            }
        }

        let chained = self.active.and_then(|a| self.tree.selected_chain(a));
        self.captured = Some(target);
        tracing::debug!(control = %self.tree.get(target)?.name(), "pointer captured");

        // Focus never leaves the active window.
        let selected = self
            .send(target, &Message::Selected)?
            .target()
            .filter(|s| self.active.is_some_and(|a| self.tree.is_descendant_of(*s, a)));
        if let Some(selected) = selected {
            self.select_path(selected)?;
        }
        self.set_focus(selected.or(chained))?;

        self.send(target, &Message::MousePress { button, pos })?;
        Ok(())
    }

    /// Applies the modal/modeless activation policy. Returns `false` when activation is refused;
    /// the click itself still goes through.
    fn activate_on_click(&mut self, window: ControlId) -> Result<bool> {
        let Some(active) = self.active else {
            self.tree.bring_to_front(window);
            self.switch_active(window)?;
            return Ok(true);
        };
        if active == window {
            return Ok(true);
        }

        let behavior = self.tree.get(active)?.behavior;
        let modal = behavior.contains(Behavior::MODAL);
        let modeless = behavior.contains(Behavior::MODELESS);
        match (modal, modeless) {
            (false, false) => {
                self.tree.bring_to_front(window);
                self.switch_active(window)?;
            }
            (true, false) => return Ok(false),
            (false, true) => self.tree.bring_to_front(window),
            (true, true) => self.switch_active(window)?,
        }
        Ok(true)
    }

    fn switch_active(&mut self, window: ControlId) -> Result<()> {
        if self.active == Some(window) {
            return Ok(());
        }
        if let Some(old) = self.active.take() {
            if self.tree.contains(old) {
                self.send(old, &Message::Deactivated)?;
            }
        }
        self.active = Some(window);
        tracing::debug!(window = %self.tree.get(window)?.name(), "window activated");
        self.send(window, &Message::Activated)?;
        Ok(())
    }

    fn set_focus(&mut self, target: Option<ControlId>) -> Result<()> {
        if target == self.focused {
            return Ok(());
        }
        if let Some(old) = self.focused.take() {
            if self.tree.contains(old) {
                self.send(old, &Message::Defocused)?;
            }
        }
        self.focused = target;
        if let Some(new) = target {
            self.send(new, &Message::Focused)?;
        }
        Ok(())
    }

    /// Records `id` as the selected child at every level up to its window.
    fn select_path(&mut self, id: ControlId) -> Result<()> {
        let mut child = id;
        while let Some(parent) = self.tree.get(child)?.parent {
            self.send(parent, &Message::Select(child))?;
            child = parent;
        }
        Ok(())
    }

    fn on_button_up(&mut self, button: MouseButton, pos: Point, now_ms: u64) -> Result<()> {
        self.pointer.pos = pos;
        let was_pressed = self.pointer.release(button, now_ms);
        let track = *self.pointer.button(button);

        let dragged = self.drag.button == Some(button);
        if dragged {
            let drag = std::mem::take(&mut self.drag);
            if let Some(source) = self.captured.filter(|c| self.tree.contains(*c)) {
                let start = track.anchor;
                self.send(source, &Message::MouseStopDrag { button, start, pos })?;
                let receiver = drag.receiver.filter(|r| self.tree.contains(*r));
                if let (true, Some(receiver)) = (drag.accept, receiver) {
                    let payload = self.send(source, &Message::DragSendData)?.into_payload();
                    tracing::debug!(has_payload = payload.is_some(), "drop committed");
                    self.send(receiver, &Message::DragRecvData { payload })?;
                }
            }
        }

        if button != MouseButton::Left {
            return Ok(());
        }
        let Some(captured) = self.captured.take() else {
            return Ok(());
        };
        if !self.tree.contains(captured) {
            return Ok(());
        }

        let hit = self.hit_test(pos)?;
        let hovering = hit == Some(captured);
        let quick = now_ms.saturating_sub(track.press_ms) < self.config.click_ms;
        if !dragged && was_pressed && quick && hovering {
            self.send(captured, &Message::MouseClick)?;
        }
        self.send(captured, &Message::MouseRelease { hovering })?;
        self.change_hover(hit)
    }

    fn on_wheel(&mut self, delta: i32, pos: Point) -> Result<()> {
        self.pointer.pos = pos;
        if let Some(hovered) = self.hovered {
            self.send(hovered, &Message::MouseWheel { delta })?;
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// Renders every visible window inside the current clip, then flushes the damage.
    pub fn validate(&mut self) -> Result<()> {
        let clip = self.renderer.clip_rect();
        for window in self.tree.topmost.clone() {
            if self.tree.is_visible(window) {
                self.render_window(window, clip)?;
            }
        }
        self.renderer.update();
        self.presented = true;
        Ok(())
    }

    pub fn flip(&mut self) {
        self.renderer.flip();
    }

    /// Clears `region` to the erase color and repaints the windows it touches, back to front.
    pub fn erase(&mut self, region: Rect) -> Result<()> {
        let display = Rect::from_parts(Point::ZERO, self.renderer.display_size());
        let region = region.intersection(&display);
        if region.is_empty() {
            return Ok(());
        }

        self.renderer.push_clip_rect(region);
        let color = self.renderer.erase_color();
        self.renderer.clear(color);
        self.renderer.pop_clip_rect()?;
        self.renderer.add_invalidated_rect(region);

        for window in self.tree.topmost.clone() {
            if self.tree.is_visible(window) && self.tree.render_bounds(window)?.intersects(&region) {
                self.render_window(window, region)?;
            }
        }
        Ok(())
    }

    /// Sends the erase request to whoever owns `id`: its parent, or the runtime for a window.
    pub(crate) fn erase_in_owner(&mut self, id: ControlId, region: Rect) -> Result<()> {
        match self.tree.get(id)?.parent {
            Some(parent) => {
                self.send(parent, &Message::EraseChild { region })?;
            }
            None => self.erase(region)?,
        }
        Ok(())
    }

    fn render_window(&mut self, window: ControlId, clip: Rect) -> Result<()> {
        render_pass(self, window, clip)
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/runtime.rs"]
mod tests;
