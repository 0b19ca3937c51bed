use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use grusin::ui::backend::test::TestBackend;
use grusin::ui::core::cursor::Placement;
use grusin::ui::core::event::{EventArgs, EventKind};
use grusin::ui::core::geom::{Point, Size};
use grusin::ui::core::input::{InputEvent, MouseButton};
use grusin::ui::core::theme::Skin;
use grusin::ui::render::SkinRenderer;
use grusin::ui::widgets::{check_box, panel, push_button, radio_button, v_scroll_bar};
use grusin::{ControlOptions, Ui, UiConfig};

fn main() -> grusin::Result<()> {
    let mut frames: usize = 300;
    let mut width: i32 = 640;
    let mut height: i32 = 480;

    for arg in std::env::args().skip(1) {
        if let Some(value) = arg.strip_prefix("--frames=") {
            frames = value.parse().unwrap_or(frames);
        } else if let Some(value) = arg.strip_prefix("--width=") {
            width = value.parse().unwrap_or(width);
        } else if let Some(value) = arg.strip_prefix("--height=") {
            height = value.parse().unwrap_or(height);
        }
    }

    let config = UiConfig::load_or_default();
    let _logging = grusin::logging::init(config.resolved_log_dir(), &config.log_filter);

    let skin = match &config.skin {
        Some(path) => Skin::load(path)?,
        None => Skin::builtin()?,
    };
    let renderer = SkinRenderer::new(TestBackend::new(width, height), skin);
    let mut ui = Ui::new(Box::new(renderer), config);

    let log = Rc::new(RefCell::new(Vec::<String>::new()));
    let window = panel(&mut ui, ControlOptions::named("main").size(Size::new(300, 200)))?;
    let (ok, toggle) = {
        let mut scope = ui.open(window)?;
        let ok = push_button(&mut scope, "OK", ControlOptions::named("ok"))?;
        push_button(
            &mut scope,
            "Cancel",
            ControlOptions::named("cancel").placement(Placement::SameLine),
        )?;
        let toggle = check_box(&mut scope, "Verbose", ControlOptions::named("verbose"))?;
        radio_button(&mut scope, "Small", ControlOptions::named("small"))?;
        radio_button(
            &mut scope,
            "Large",
            ControlOptions::named("large").placement(Placement::SameLine),
        )?;
        v_scroll_bar(
            &mut scope,
            ControlOptions::named("scroll")
                .placement(Placement::Manual)
                .location(Point::new(270, 10)),
        )?;
        scope.close()?;
        (ok, toggle)
    };
    ui.layout_topmost();
    ui.activate(window)?;

    for (id, kind) in [(ok, EventKind::Pressed), (toggle, EventKind::CheckChanged)] {
        let log = Rc::clone(&log);
        ui.attach(id, kind, move |ui, id, args| {
            let name = ui.node(id)?.name().to_string();
            let line = match args {
                EventArgs::Check { state } => format!("{name}: {state:?}"),
                _ => format!("{name}: {kind:?}"),
            };
            log.borrow_mut().push(line);
            Ok(())
        })?;
    }

    ui.tick(&[], 0)?;

    let mut now = 0u64;
    for id in [ok, toggle] {
        let center = ui.tree().screen_bounds(id)?.center();
        let script = [
            InputEvent::Motion {
                pos: center,
                rel: Point::ZERO,
            },
            InputEvent::ButtonDown {
                button: MouseButton::Left,
                pos: center,
            },
        ];
        now += 16;
        ui.tick(&script, now)?;
        now += 50;
        ui.tick(
            &[InputEvent::ButtonUp {
                button: MouseButton::Left,
                pos: center,
            }],
            now,
        )?;
    }

    let render_start = Instant::now();
    for _ in 0..frames {
        now += 16;
        ui.tick(&[], now)?;
        ui.flip();
    }
    let elapsed = render_start.elapsed();

    let per_frame = elapsed.as_secs_f64() * 1000.0 / frames.max(1) as f64;
    println!("frames: {frames}, total: {elapsed:?}, per frame: {per_frame:.3} ms");
    println!("controls: {}", ui.tree().len());
    for line in log.borrow().iter() {
        println!("event {line}");
    }

    let status = ui.tick(&[InputEvent::Quit], now)?;
    println!("quit: {}", status.quit);
    Ok(())
}
