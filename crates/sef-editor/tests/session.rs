//! Integration tests: session file commands and pointer-driven editing.

use pretty_assertions::assert_eq;
use sef_core::{Circle, Figure, Geometry, Point, ShapeKind, codec};
use sef_editor::*;
use std::cell::RefCell;
use std::rc::Rc;

// ─── Helpers ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct Prompts {
    answer: bool,
    confirms: Vec<String>,
    errors: Vec<String>,
}

#[derive(Clone)]
struct ScriptedDialogs(Rc<RefCell<Prompts>>);

impl Dialogs for ScriptedDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        let mut p = self.0.borrow_mut();
        p.confirms.push(message.to_string());
        p.answer
    }

    fn error(&mut self, message: &str) {
        self.0.borrow_mut().errors.push(message.to_string());
    }
}

fn session(answer: bool) -> (Session, Rc<RefCell<Prompts>>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let prompts = Rc::new(RefCell::new(Prompts {
        answer,
        ..Prompts::default()
    }));
    let s = Session::new(
        EditorConfig::default(),
        Box::new(ScriptedDialogs(prompts.clone())),
    );
    (s, prompts)
}

fn feed(s: &mut Session, events: &[InputEvent]) {
    for e in events {
        s.handle_input(e);
    }
}

fn drag(from: (f64, f64), to: (f64, f64)) -> [InputEvent; 3] {
    [
        InputEvent::down(from.0, from.1),
        InputEvent::moved(to.0, to.1),
        InputEvent::up(to.0, to.1),
    ]
}

// ─── File commands ───────────────────────────────────────────────────────

#[test]
fn declined_new_keeps_drawing() {
    let (mut s, prompts) = session(false);
    s.set_mode(Mode::DrawCircle);
    feed(&mut s, &drag((0.0, 0.0), (3.0, 4.0)));
    assert_eq!(s.engine().drawing().len(), 1);

    assert!(!s.new_drawing());
    assert_eq!(s.engine().drawing().len(), 1);
    assert_eq!(prompts.borrow().confirms, vec!["Abandon the current job?"]);
}

#[test]
fn save_as_appends_extension_and_reopens() {
    let (mut s, prompts) = session(true);
    s.set_mode(Mode::DrawRectangle);
    feed(&mut s, &drag((1.0, 1.0), (5.0, 7.0)));

    let dir = tempfile::tempdir().unwrap();
    assert!(s.save_as(&dir.path().join("sketch")));
    let saved = dir.path().join("sketch.sef");
    assert_eq!(s.opened_file(), Some(saved.as_path()));
    assert_eq!(s.save(), SaveOutcome::Saved(saved.clone()));

    let (mut other, _) = session(true);
    assert!(other.open(&saved));
    assert_eq!(other.opened_file(), Some(saved.as_path()));
    let kinds: Vec<ShapeKind> = other.engine().drawing().iter().map(Figure::kind).collect();
    assert_eq!(kinds, vec![ShapeKind::Rectangle]);
    assert!(prompts.borrow().errors.is_empty());
}

#[test]
fn corrupt_file_shows_error_and_keeps_drawing() {
    let (mut s, prompts) = session(true);
    s.set_mode(Mode::DrawCircle);
    feed(&mut s, &drag((0.0, 0.0), (3.0, 4.0)));
    let before = s.engine().drawing().ids();

    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.sef");
    assert!(s.save_as(&good));

    let bad = dir.path().join("bad.sef");
    std::fs::write(&bad, b"definitely not a drawing").unwrap();
    assert!(!s.open(&bad));

    assert_eq!(s.engine().drawing().ids(), before);
    assert_eq!(s.opened_file(), None);
    assert_eq!(prompts.borrow().errors, vec!["Impossible to open the file"]);
}

#[test]
fn unwritable_target_reports_save_error() {
    let (mut s, prompts) = session(true);
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("no_such_dir").join("art.sef");

    assert!(!s.save_as(&target));
    assert_eq!(s.opened_file(), None);
    assert_eq!(
        prompts.borrow().errors,
        vec!["Unable to save the drawing in the chosen file"]
    );
}

#[test]
fn new_forgets_the_file() {
    let (mut s, _) = session(true);
    let dir = tempfile::tempdir().unwrap();
    assert!(s.save_as(&dir.path().join("a.sef")));
    assert!(s.new_drawing());
    assert_eq!(s.opened_file(), None);
    assert_eq!(s.dispatch(ShortcutAction::Save), Some(ShortcutAction::SaveAs));
}

#[test]
fn quit_asks_for_confirmation() {
    let (mut s, prompts) = session(false);
    assert!(!s.request_quit());
    assert_eq!(
        prompts.borrow().confirms,
        vec!["Quit and abandon this drawing?"]
    );
}

// ─── Editing ─────────────────────────────────────────────────────────────

#[test]
fn drawn_figures_use_the_palette_and_stack_in_front() {
    let (mut s, _) = session(true);
    let red = Palette {
        fill: sef_core::Color::rgb8(255, 0, 0),
        ..Palette::default()
    };
    s.set_palette(red);
    s.set_mode(Mode::DrawTriangle);
    feed(&mut s, &drag((0.0, 0.0), (10.0, 10.0)));
    s.set_mode(Mode::DrawCircle);
    feed(&mut s, &drag((50.0, 50.0), (55.0, 50.0)));

    let figures = s.engine().drawing().figures();
    assert_eq!(figures[0].kind(), ShapeKind::Circle);
    assert_eq!(figures[1].kind(), ShapeKind::Triangle);
    assert!(figures.iter().all(|f| f.fill == red.fill));
}

#[test]
fn move_drag_translates_selection() {
    let (mut s, _) = session(true);
    let id = s
        .engine_mut()
        .add_figure(Figure::with_default_paint(Circle::new(Point::ORIGIN, 5.0)));

    feed(
        &mut s,
        &[InputEvent::down(0.0, 0.0), InputEvent::moved(10.0, 0.0)],
    );
    assert!(s.engine().figure(id).unwrap().is_transparent());
    feed(
        &mut s,
        &[InputEvent::moved(10.0, 10.0), InputEvent::up(10.0, 10.0)],
    );

    let f = s.engine().figure(id).unwrap();
    assert_eq!(f.center(), Point::new(10.0, 10.0));
    assert!(f.is_selected());
    assert!(!f.is_transparent());
}

#[test]
fn marquee_then_delete_removes_enclosed_figures() {
    let (mut s, _) = session(true);
    let keep = s
        .engine_mut()
        .add_figure(Figure::with_default_paint(Circle::new(
            Point::new(100.0, 100.0),
            3.0,
        )));
    for x in [10.0, 20.0] {
        s.engine_mut()
            .add_figure(Figure::with_default_paint(Circle::new(
                Point::new(x, 10.0),
                3.0,
            )));
    }

    s.handle_input(&InputEvent::key("s"));
    assert_eq!(s.mode(), Mode::Select);
    feed(&mut s, &drag((0.0, 0.0), (30.0, 30.0)));
    assert_eq!(s.engine().count_selected(), 2);

    s.handle_input(&InputEvent::key("Delete"));
    assert_eq!(s.engine().drawing().ids(), vec![keep]);
}

#[test]
fn select_all_and_escape_shortcuts() {
    let (mut s, _) = session(true);
    s.set_mode(Mode::DrawRectangle);
    feed(&mut s, &drag((0.0, 0.0), (4.0, 4.0)));
    feed(&mut s, &drag((10.0, 0.0), (14.0, 4.0)));

    let cmd = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    s.handle_input(&InputEvent::key_with("a", cmd));
    assert_eq!(s.engine().count_selected(), 2);
    s.handle_input(&InputEvent::key("Escape"));
    assert_eq!(s.engine().count_selected(), 0);
}

#[test]
fn saved_file_decodes_with_core_codec() {
    let (mut s, _) = session(true);
    s.set_mode(Mode::DrawPolygon);
    feed(
        &mut s,
        &[
            InputEvent::down(0.0, 0.0),
            InputEvent::down(8.0, 0.0),
            InputEvent::down(4.0, 8.0),
            InputEvent::key("Enter"),
        ],
    );
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poly.sef");
    assert!(s.save_as(&path));

    let loaded = codec::load_from_path(&path).unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded.figures()[0].kind(), ShapeKind::Polygon);
    assert_eq!(loaded.figures()[0].center(), Point::new(4.0, 8.0 / 3.0));
}
