use super::*;
use crate::ui::backend::test::TestBackend;
use crate::ui::core::color::Color;
use crate::ui::core::control::default_process;
use crate::ui::core::theme::{RenderLayers, Skin};
use crate::ui::render::SkinRenderer;
use std::cell::RefCell;
use std::sync::{Arc, Mutex};

type Log = Rc<RefCell<Vec<String>>>;
type Skinned = SkinRenderer<TestBackend>;

/// Records every message except hit tests and rendering as `name:MESSAGE`.
struct Probe {
    class: &'static str,
    container: bool,
    log: Log,
}

impl ControlClass for Probe {
    fn class_name(&self) -> &'static str {
        self.class
    }

    fn is_container(&self) -> bool {
        self.container
    }

    fn process(&self, ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
        let entry = match msg {
            Message::HitTest { .. }
            | Message::RenderBackground { .. }
            | Message::Render { .. }
            | Message::RenderForeground { .. }
            | Message::EraseChild { .. } => None,
            Message::MouseRelease { hovering } => Some(format!("MOUSE_RELEASE({hovering})")),
            other => Some(other.name().to_string()),
        };
        if let Some(entry) = entry {
            let name = ui.node(id)?.name().to_string();
            self.log.borrow_mut().push(format!("{name}:{entry}"));
        }
        default_process(ui, id, msg)
    }
}

/// Container whose layout always fails.
struct BrokenLayout;

impl ControlClass for BrokenLayout {
    fn class_name(&self) -> &'static str {
        "Panel"
    }

    fn is_container(&self) -> bool {
        true
    }

    fn process(&self, ui: &mut Ui, id: ControlId, msg: &Message) -> Result<Reply> {
        if matches!(msg, Message::LayoutChildren(_)) {
            return Err(UiError::UnknownControl);
        }
        default_process(ui, id, msg)
    }
}

#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl std::io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` under a subscriber that keeps WARN and above; returns the formatted output.
fn capture_logs(f: impl FnOnce()) -> String {
    let buf = LogBuf::default();
    let sink = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || sink.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    tracing::subscriber::with_default(subscriber, f);
    let bytes = buf.0.lock().unwrap().clone();
    String::from_utf8_lossy(&bytes).into_owned()
}

struct Fixture {
    ui: Ui,
    log: Log,
}

impl Fixture {
    fn new() -> Self {
        let renderer = SkinRenderer::new(TestBackend::new(320, 200), Skin::builtin().unwrap());
        Self {
            ui: Ui::new(Box::new(renderer), UiConfig::default()),
            log: Rc::default(),
        }
    }

    fn probe(&self, class: &'static str, container: bool) -> Rc<dyn ControlClass> {
        Rc::new(Probe {
            class,
            container,
            log: Rc::clone(&self.log),
        })
    }

    fn window(&mut self, name: &str, bounds: Rect) -> ControlId {
        let class = self.probe("Panel", true);
        let options = ControlOptions::named(name)
            .placement(Placement::Manual)
            .location(bounds.location())
            .size(bounds.size());
        self.ui.create(class, Box::new(()), options).unwrap()
    }

    /// 60x20 leaf children created in one scope.
    fn children(&mut self, parent: ControlId, specs: &[(&str, Placement)]) -> Vec<ControlId> {
        let class = self.probe("PushButton", false);
        let mut scope = self.ui.open(parent).unwrap();
        let mut ids = Vec::new();
        for (name, placement) in specs {
            let options = ControlOptions::named(*name)
                .placement(*placement)
                .size(Size::new(60, 20));
            ids.push(scope.create(Rc::clone(&class), Box::new(()), options).unwrap());
        }
        scope.close().unwrap();
        ids
    }

    /// Window `win` at (10,10) holding one child at screen (13,13,60,20).
    fn simple() -> (Self, ControlId, ControlId) {
        let mut fx = Self::new();
        let win = fx.window("win", Rect::new(10, 10, 200, 100));
        let child = fx.children(win, &[("child", Placement::NewLine)])[0];
        fx.tick(&[], 0);
        fx.clear();
        (fx, win, child)
    }

    fn tick(&mut self, events: &[InputEvent], now: u64) -> TickStatus {
        self.ui.tick(events, now).unwrap()
    }

    fn entries(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    fn clear(&self) {
        self.log.borrow_mut().clear();
    }

    fn skinned(&mut self) -> &mut Skinned {
        self.ui.renderer_mut().downcast_mut::<Skinned>().unwrap()
    }

    fn pixel(&self, x: i32, y: i32) -> Color {
        let renderer = self.ui.renderer().downcast_ref::<Skinned>().unwrap();
        renderer.backend().buffer().pixel(x, y).unwrap()
    }

    fn center(&self, id: ControlId) -> Point {
        self.ui.tree().screen_bounds(id).unwrap().center()
    }
}

fn motion(pos: Point) -> InputEvent {
    InputEvent::Motion {
        pos,
        rel: Point::ZERO,
    }
}

fn down(pos: Point) -> InputEvent {
    InputEvent::ButtonDown {
        button: MouseButton::Left,
        pos,
    }
}

fn up(pos: Point) -> InputEvent {
    InputEvent::ButtonUp {
        button: MouseButton::Left,
        pos,
    }
}

fn gray(v: u8) -> Color {
    Color::rgb(v, v, v)
}

#[test]
fn click_runs_the_full_message_sequence() {
    let (mut fx, win, child) = Fixture::simple();
    let pos = fx.center(child);

    fx.tick(&[motion(pos), down(pos)], 100);
    fx.tick(&[up(pos)], 150);

    assert_eq!(
        fx.entries(),
        vec![
            "child:MOUSE_ENTER",
            "win:ACTIVATED",
            "child:SELECTED",
            "win:SELECT",
            "child:FOCUSED",
            "child:MOUSE_PRESS",
            "child:MOUSE_CLICK",
            "child:MOUSE_RELEASE(true)",
        ]
    );
    assert_eq!(fx.ui.active(), Some(win));
    assert_eq!(fx.ui.focused(), Some(child));
    assert_eq!(fx.ui.captured(), None);
    assert_eq!(fx.ui.node(win).unwrap().selected_index(), Some(0));
}

#[test]
fn slow_press_is_not_a_click() {
    let (mut fx, _win, child) = Fixture::simple();
    let pos = fx.center(child);

    fx.tick(&[motion(pos), down(pos)], 0);
    fx.tick(&[up(pos)], 200);

    let entries = fx.entries();
    assert!(!entries.contains(&"child:MOUSE_CLICK".to_string()));
    assert_eq!(entries.last().unwrap(), "child:MOUSE_RELEASE(true)");
}

#[test]
fn held_button_repeats_mouse_down_each_later_tick() {
    let (mut fx, _win, child) = Fixture::simple();
    let pos = fx.center(child);

    fx.tick(&[motion(pos), down(pos)], 0);
    let count = |fx: &Fixture| {
        fx.entries()
            .iter()
            .filter(|e| *e == "child:MOUSE_DOWN")
            .count()
    };
    assert_eq!(count(&fx), 0);
    fx.tick(&[], 16);
    assert_eq!(count(&fx), 1);
    fx.tick(&[], 32);
    assert_eq!(count(&fx), 2);
    fx.tick(&[up(pos)], 48);
    fx.tick(&[], 64);
    assert_eq!(count(&fx), 2);
}

#[test]
fn every_held_button_repeats_mouse_down_once_per_tick() {
    let (mut fx, _win, child) = Fixture::simple();
    let pos = fx.center(child);
    let right = InputEvent::ButtonDown {
        button: MouseButton::Right,
        pos,
    };

    fx.tick(&[motion(pos), down(pos), right], 0);
    fx.clear();
    fx.tick(&[], 16);
    assert_eq!(fx.entries(), vec!["child:MOUSE_DOWN", "child:MOUSE_DOWN"]);

    fx.clear();
    fx.tick(
        &[InputEvent::ButtonUp {
            button: MouseButton::Right,
            pos,
        }],
        32,
    );
    assert_eq!(fx.entries(), vec!["child:MOUSE_DOWN"]);
}

#[test]
fn release_outside_reports_not_hovering() {
    let (mut fx, win, child) = Fixture::simple();
    let pos = fx.center(child);

    fx.tick(&[motion(pos), down(pos)], 0);
    fx.clear();
    fx.tick(&[up(Point::new(150, 80))], 20);

    assert_eq!(
        fx.entries(),
        vec![
            "child:MOUSE_RELEASE(false)",
            "child:MOUSE_LEAVE",
            "win:MOUSE_ENTER",
        ]
    );
    assert_eq!(fx.ui.hovered(), Some(win));
}

#[test]
fn captured_control_keeps_pointer_until_release() {
    let (mut fx, win, child) = Fixture::simple();
    let pos = fx.center(child);

    fx.tick(&[motion(pos), down(pos)], 0);
    fx.clear();
    fx.tick(&[motion(Point::new(150, 80))], 10);

    let entries = fx.entries();
    assert_eq!(entries[..3], ["child:MOUSE_STARTDRAG", "child:MOUSE_DRAGMOVE", "win:DRAG_ACCEPT"]);
    assert!(!entries.iter().any(|e| e.ends_with("MOUSE_ENTER") || e.ends_with("MOUSE_LEAVE")));
    assert_eq!(fx.ui.hovered(), Some(child));
    assert_eq!(fx.ui.captured(), Some(child));
    assert_eq!(fx.ui.drag().button, Some(MouseButton::Left));
    // The window is not a drop target.
    assert!(!fx.ui.drag().accept);
    assert_eq!(fx.ui.drag().receiver, Some(win));

    fx.clear();
    fx.tick(&[up(Point::new(150, 80))], 20);
    assert_eq!(
        fx.entries(),
        vec![
            "child:MOUSE_STOPDRAG",
            "child:MOUSE_RELEASE(false)",
            "child:MOUSE_LEAVE",
            "win:MOUSE_ENTER",
        ]
    );
    assert_eq!(fx.ui.drag().button, None);
}

#[test]
fn drag_threshold_is_exclusive() {
    let (mut fx, _win, child) = Fixture::simple();
    let pos = fx.center(child);

    fx.tick(&[motion(pos), down(pos)], 0);
    fx.clear();
    fx.tick(&[motion(pos + Point::new(4, -4))], 10);
    // The held button also repeats MOUSE_DOWN at the end of the tick.
    assert_eq!(fx.entries(), vec!["child:MOUSE_MOVE", "child:MOUSE_DOWN"]);
    assert_eq!(fx.ui.drag().button, None);

    fx.clear();
    fx.tick(&[motion(pos + Point::new(0, 5))], 20);
    assert_eq!(fx.entries()[0], "child:MOUSE_STARTDRAG");

    // A drag suppresses the click even when released over the source.
    fx.clear();
    fx.tick(&[up(pos)], 30);
    assert!(!fx.entries().contains(&"child:MOUSE_CLICK".to_string()));
    assert!(fx.entries().contains(&"child:MOUSE_RELEASE(true)".to_string()));
}

#[test]
fn accepted_drop_delivers_payload() {
    let mut fx = Fixture::new();
    let win = fx.window("win", Rect::new(10, 10, 200, 100));
    let ids = fx.children(win, &[("src", Placement::NewLine), ("dst", Placement::SameLine)]);
    let (src, dst) = (ids[0], ids[1]);
    fx.ui.set_drag_data(src, Some(Rc::new(42i32) as DragPayload)).unwrap();
    fx.ui.set_accepts_drops(dst, true).unwrap();

    let received = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&received);
    fx.ui
        .attach(dst, EventKind::DataDropped, move |_, _, args| {
            if let EventArgs::Drop { payload } = args {
                *sink.borrow_mut() = payload
                    .as_ref()
                    .and_then(|p| p.downcast_ref::<i32>().copied());
            }
            Ok(())
        })
        .unwrap();
    fx.tick(&[], 0);

    let (from, to) = (fx.center(src), fx.center(dst));
    fx.tick(&[motion(from), down(from)], 10);
    fx.tick(&[motion(to)], 20);
    assert!(fx.ui.drag().accept);
    assert_eq!(fx.ui.drag().receiver, Some(dst));

    fx.clear();
    fx.tick(&[up(to)], 30);
    assert_eq!(*received.borrow(), Some(42));
    assert_eq!(
        fx.entries()[..3],
        ["src:MOUSE_STOPDRAG", "src:DRAG_SENDDATA", "dst:DRAG_RECVDATA"]
    );
}

#[test]
fn refused_drop_is_not_delivered() {
    let mut fx = Fixture::new();
    let win = fx.window("win", Rect::new(10, 10, 200, 100));
    let ids = fx.children(win, &[("src", Placement::NewLine), ("dst", Placement::SameLine)]);
    let (from, to) = (fx.center(ids[0]), fx.center(ids[1]));
    fx.tick(&[motion(from), down(from)], 0);
    fx.tick(&[motion(to)], 10);
    fx.clear();
    fx.tick(&[up(to)], 20);
    assert!(!fx.entries().iter().any(|e| e.contains("DRAG_")));
}

fn two_windows() -> (Fixture, ControlId, ControlId) {
    let mut fx = Fixture::new();
    let a = fx.window("a", Rect::new(0, 0, 100, 100));
    let b = fx.window("b", Rect::new(150, 0, 100, 100));
    fx.ui.activate(a).unwrap();
    fx.tick(&[], 0);
    fx.clear();
    (fx, a, b)
}

fn click(fx: &mut Fixture, pos: Point, now: u64) {
    fx.tick(&[motion(pos), down(pos), up(pos)], now);
}

#[test]
fn plain_windows_activate_and_raise_on_click() {
    let (mut fx, a, b) = two_windows();
    assert_eq!(fx.ui.tree().topmost(), &[b, a]);

    click(&mut fx, Point::new(200, 50), 10);
    assert_eq!(fx.ui.active(), Some(b));
    assert_eq!(fx.ui.tree().topmost(), &[a, b]);
    let entries = fx.entries();
    assert!(entries.contains(&"a:DEACTIVATED".to_string()));
    assert!(entries.contains(&"b:ACTIVATED".to_string()));
    assert!(entries.contains(&"b:MOUSE_PRESS".to_string()));
}

#[test]
fn modal_window_keeps_activation_but_the_press_goes_through() {
    let (mut fx, a, b) = two_windows();
    fx.ui.set_behavior(a, Behavior::SELECTABLE | Behavior::MODAL).unwrap();
    let pos = Point::new(200, 50);

    fx.tick(&[motion(pos), down(pos)], 10);
    assert_eq!(fx.ui.active(), Some(a));
    assert_eq!(fx.ui.tree().topmost(), &[b, a]);
    assert_eq!(fx.ui.captured(), Some(b));
    assert_eq!(fx.ui.focused(), Some(a));
    let entries = fx.entries();
    assert!(entries.contains(&"b:MOUSE_PRESS".to_string()));
    assert!(!entries.contains(&"b:ACTIVATED".to_string()));
    assert!(!entries.contains(&"a:DEACTIVATED".to_string()));

    fx.tick(&[up(pos)], 20);
    assert_eq!(fx.ui.captured(), None);
    assert_eq!(fx.ui.active(), Some(a));
    assert!(!fx.ui.pointer().button(MouseButton::Left).pressed);
}

#[test]
fn modeless_window_only_raises_the_other() {
    let (mut fx, a, b) = two_windows();
    fx.ui.set_behavior(a, Behavior::SELECTABLE | Behavior::MODELESS).unwrap();

    click(&mut fx, Point::new(200, 50), 10);
    assert_eq!(fx.ui.active(), Some(a));
    assert_eq!(fx.ui.tree().topmost(), &[a, b]);
    assert!(fx.entries().contains(&"b:MOUSE_PRESS".to_string()));
    // Focus stays with the active window.
    assert_eq!(fx.ui.focused(), Some(a));
}

#[test]
fn modal_and_modeless_switches_without_raising() {
    let (mut fx, a, b) = two_windows();
    fx.ui
        .set_behavior(a, Behavior::SELECTABLE | Behavior::MODAL | Behavior::MODELESS)
        .unwrap();

    click(&mut fx, Point::new(200, 50), 10);
    assert_eq!(fx.ui.active(), Some(b));
    assert_eq!(fx.ui.tree().topmost(), &[b, a]);
    assert_eq!(fx.ui.focused(), Some(b));
}

#[test]
fn wheel_goes_to_hovered_control() {
    let (mut fx, _win, child) = Fixture::simple();
    let pos = fx.center(child);
    fx.tick(&[motion(pos), InputEvent::Wheel { delta: -1, pos }], 0);
    assert_eq!(fx.entries(), vec!["child:MOUSE_ENTER", "child:MOUSE_WHEEL"]);
}

#[test]
fn dropped_scope_lays_out_children() {
    let mut fx = Fixture::new();
    let win = fx.window("win", Rect::new(0, 0, 200, 100));
    let class = fx.probe("PushButton", false);
    let mut ids = Vec::new();
    {
        let mut scope = fx.ui.open(win).unwrap();
        for (name, placement) in [
            ("a", Placement::NewLine),
            ("b", Placement::SameLine),
            ("c", Placement::NewLine),
        ] {
            let options = ControlOptions::named(name)
                .placement(placement)
                .size(Size::new(60, 20));
            ids.push(scope.create(Rc::clone(&class), Box::new(()), options).unwrap());
        }
    }

    let bounds: Vec<Rect> = ids
        .iter()
        .map(|id| fx.ui.node(*id).unwrap().bounds())
        .collect();
    assert_eq!(
        bounds,
        vec![
            Rect::new(3, 3, 60, 20),
            Rect::new(65, 3, 60, 20),
            Rect::new(3, 25, 60, 20),
        ]
    );
    assert!(fx.entries().contains(&"win:LAYOUT_CHILDREN".to_string()));
}

#[test]
fn topmost_windows_cascade_from_skin_padding() {
    let mut fx = Fixture::new();
    let class = fx.probe("Panel", true);
    let first = fx
        .ui
        .create(Rc::clone(&class), Box::new(()), ControlOptions::named("first"))
        .unwrap();
    let second = fx
        .ui
        .create(
            class,
            Box::new(()),
            ControlOptions::named("second").placement(Placement::Cascade),
        )
        .unwrap();
    fx.ui.layout_topmost();

    let first_at = fx.ui.node(first).unwrap().bounds().location();
    assert_eq!(first_at, Point::new(4, 4));
    assert_eq!(fx.ui.node(second).unwrap().bounds().location(), Point::new(36, 36));
}

#[test]
fn auto_names_are_unique_per_class() {
    let mut fx = Fixture::new();
    let class = fx.probe("Panel", true);
    let first = fx.ui.create(Rc::clone(&class), Box::new(()), ControlOptions::default()).unwrap();
    let second = fx.ui.create(class, Box::new(()), ControlOptions::default()).unwrap();
    assert_eq!(fx.ui.node(first).unwrap().name(), "panel");
    assert_eq!(fx.ui.node(second).unwrap().name(), "panel1");
    assert_eq!(fx.ui.find("panel1"), Some(second));

    // A taken name is skipped rather than duplicated.
    let class = fx.probe("Panel", true);
    fx.ui
        .create(Rc::clone(&class), Box::new(()), ControlOptions::named("panel2"))
        .unwrap();
    let third = fx.ui.create(class, Box::new(()), ControlOptions::default()).unwrap();
    assert_eq!(fx.ui.node(third).unwrap().name(), "panel3");
}

#[test]
fn creation_errors() {
    let mut fx = Fixture::new();
    let win = fx.window("win", Rect::new(0, 0, 200, 100));
    let leaf = fx.children(win, &[("leaf", Placement::NewLine)])[0];
    let count = fx.ui.tree().len();

    let class = fx.probe("PushButton", false);
    {
        let mut scope = fx.ui.open(win).unwrap();
        let err = scope
            .create(Rc::clone(&class), Box::new(()), ControlOptions::named("leaf"))
            .unwrap_err();
        assert!(matches!(err, UiError::DuplicateName { ref name } if name == "leaf"));
    }
    {
        let mut scope = fx.ui.open(leaf).unwrap();
        let err = scope
            .create(Rc::clone(&class), Box::new(()), ControlOptions::named("inner"))
            .unwrap_err();
        assert!(matches!(err, UiError::NotAContainer { ref class } if class == "PushButton"));
    }
    assert_eq!(fx.ui.tree().len(), count);

    let err = fx.ui.attach(leaf, EventKind::Pressed, |_, _, _| Ok(())).unwrap_err();
    assert!(matches!(err, UiError::UnknownChannel { .. }));
}

#[test]
fn state_access_checks_the_type() {
    let mut fx = Fixture::new();
    let class = fx.probe("Panel", true);
    let id = fx
        .ui
        .create(class, Box::new(7u32), ControlOptions::named("w"))
        .unwrap();
    assert_eq!(*fx.ui.state::<u32>(id, "Panel").unwrap(), 7);
    *fx.ui.state_mut::<u32>(id, "Panel").unwrap() = 9;
    assert_eq!(*fx.ui.state::<u32>(id, "Panel").unwrap(), 9);
    let err = fx.ui.state::<String>(id, "Other").unwrap_err();
    assert!(matches!(err, UiError::ClassMismatch { expected: "Other", found: "Panel" }));
}

#[test]
fn conflicting_layers_surface_from_tick() {
    let (mut fx, _win, _child) = Fixture::simple();
    fx.skinned()
        .skin_mut()
        .elements
        .get_mut("PushButton")
        .unwrap()
        .render_layers = RenderLayers::ABOVE_BACKGROUND | RenderLayers::BELOW_FOREGROUND;

    let mut result = Ok(TickStatus::default());
    let logs = capture_logs(|| result = fx.ui.tick(&[], 10));
    assert!(matches!(result, Err(UiError::ConflictingRenderLayers { .. })));
    assert_eq!(fx.skinned().clip_depth(), 0);

    let aborts: Vec<&str> = logs
        .lines()
        .filter(|l| l.contains("render pass aborted"))
        .collect();
    assert_eq!(aborts.len(), 1);
    assert!(aborts[0].contains("ERROR"));
    assert!(aborts[0].contains("control=win"));
}

#[test]
fn failed_layout_on_scope_drop_is_a_warning() {
    let mut fx = Fixture::new();
    let owner = fx
        .ui
        .create(Rc::new(BrokenLayout), Box::new(()), ControlOptions::named("broken"))
        .unwrap();

    let logs = capture_logs(|| {
        let _scope = fx.ui.open(owner).unwrap();
    });
    assert!(logs.contains("WARN"));
    assert!(logs.contains("layout on scope exit failed"));
    assert!(!logs.contains("ERROR"));

    // Closing explicitly surfaces the same failure instead.
    let scope = fx.ui.open(owner).unwrap();
    assert!(matches!(scope.close(), Err(UiError::UnknownControl)));
}

#[test]
fn removing_controls_repaints_what_was_behind() {
    let (mut fx, win, child) = Fixture::simple();
    let pos = fx.center(child);
    assert_eq!(fx.pixel(pos.x, pos.y), gray(232));

    assert!(fx.ui.remove(child).unwrap());
    assert_eq!(fx.pixel(pos.x, pos.y), gray(192));
    assert!(!fx.ui.tree().contains(child));

    assert!(fx.ui.remove(win).unwrap());
    assert_eq!(fx.pixel(pos.x, pos.y), Color::WHITE);
    assert!(fx.ui.tree().is_empty());
}

#[test]
fn removal_forgets_runtime_references() {
    let (mut fx, win, child) = Fixture::simple();
    let pos = fx.center(child);
    fx.tick(&[motion(pos), down(pos)], 0);
    assert_eq!(fx.ui.captured(), Some(child));

    fx.ui.remove(child).unwrap();
    assert_eq!(fx.ui.hovered(), None);
    assert_eq!(fx.ui.captured(), None);
    assert_eq!(fx.ui.focused(), None);
    assert_eq!(fx.ui.active(), Some(win));
    fx.tick(&[up(pos)], 10);
}

#[test]
fn hiding_releases_pointer_and_erases() {
    let (mut fx, _win, child) = Fixture::simple();
    let pos = fx.center(child);
    fx.tick(&[motion(pos)], 0);
    assert_eq!(fx.ui.hovered(), Some(child));

    fx.ui.set_visible(child, false).unwrap();
    assert_eq!(fx.ui.hovered(), None);
    assert_eq!(fx.pixel(pos.x, pos.y), gray(192));
    assert_eq!(fx.ui.hit_test(pos).unwrap(), fx.ui.node(child).unwrap().parent());

    fx.ui.set_visible(child, true).unwrap();
    assert_eq!(fx.pixel(pos.x, pos.y), gray(232));
}

#[test]
fn resizing_repaints_old_and_new_area() {
    let (mut fx, _win, child) = Fixture::simple();
    // Old area (13..73); right part must return to the window color.
    fx.ui.set_size(child, Size::new(30, 20)).unwrap();
    assert_eq!(fx.pixel(60, 23), gray(192));
    assert_eq!(fx.pixel(20, 23), gray(232));
}

#[test]
fn quit_stops_the_batch_and_skips_validate() {
    let mut fx = Fixture::new();
    let win = fx.window("win", Rect::new(0, 0, 100, 100));
    let status = fx.tick(&[InputEvent::Quit, motion(Point::new(50, 50))], 0);
    assert!(status.quit);
    assert!(!fx.ui.is_presented());
    assert_ne!(fx.ui.hovered(), Some(win));
}

#[test]
fn validate_presents_damage_once() {
    let (mut fx, _win, _child) = Fixture::simple();
    let before = fx.skinned().backend().presented().len();
    fx.tick(&[], 10);
    assert_eq!(fx.skinned().backend().presented().len(), before + 1);
    assert!(fx.skinned().damage().is_empty());

    fx.ui.flip();
    assert_eq!(fx.skinned().backend().flips(), 1);
}
