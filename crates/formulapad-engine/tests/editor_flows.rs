//! End-to-end flows through the public API: documents driven by commands the
//! way a frontend issues them, including the joystick gesture path.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use formulapad_engine::{Clock, Cmd, Document, Joystick, Mode, ScriptKind};

#[derive(Clone, Default)]
struct FakeClock(Rc<Cell<Duration>>);

impl FakeClock {
    fn advance(&self, by: Duration) {
        self.0.set(self.0.get() + by);
    }
}

impl Clock for FakeClock {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// Apply whatever command a gesture step produced.
fn drive(doc: &mut Document, cmd: Option<Cmd>) {
    if let Some(cmd) = cmd {
        doc.apply(cmd);
    }
}

#[test]
fn typing_a_polynomial_term() {
    // Build "3x^2 + y_i" the way a user would: type, enter scripts, exit.
    let mut doc = Document::new();
    for ch in ['3', 'x'] {
        doc.apply(Cmd::InsertChar { ch });
    }
    doc.apply(Cmd::EnterSuperscript);
    doc.apply(Cmd::InsertChar { ch: '2' });
    doc.apply(Cmd::ExitScript);
    for ch in ['+', 'y'] {
        doc.apply(Cmd::InsertChar { ch });
    }
    doc.apply(Cmd::EnterSubscript);
    doc.apply(Cmd::InsertChar { ch: 'i' });
    doc.apply(Cmd::ExitScript);

    assert_eq!(doc.glyphs().collect::<String>(), "3x+y");
    let snapshot = doc.snapshot();
    assert_eq!(snapshot.blocks[2].superscripts, vec!['2']);
    assert_eq!(snapshot.blocks[4].subscripts, vec!['i']);
    assert_eq!(doc.cursor().mode, Mode::Main);
    assert_eq!(doc.cursor().block_index, 4);
}

#[test]
fn select_and_delete_middle_of_formula() {
    let mut doc = Document::from_glyphs("abc").unwrap();
    doc.apply(Cmd::MoveLeft);
    doc.apply(Cmd::MoveLeft); // onto 'a'
    doc.apply(Cmd::StartSelection);
    doc.apply(Cmd::ExpandSelectionRight);
    doc.apply(Cmd::DeleteSelection);

    assert_eq!(doc.glyphs().collect::<String>(), "c");
    assert_eq!(doc.cursor().block_index, 1);
    assert_eq!(doc.selection(), None);
}

#[test]
fn joystick_navigation_steps_discretely() {
    let clock = FakeClock::default();
    let mut joy = Joystick::new(clock, 100.0);
    let mut doc = Document::from_glyphs("ab").unwrap();

    joy.press();
    let cmd = joy.deflect(-100.0, 0.0, &doc);
    drive(&mut doc, cmd);
    assert_eq!(doc.cursor().block_index, 1);

    // Holding left must not keep moving: one step per distinct direction.
    let cmd = joy.deflect(-95.0, 3.0, &doc);
    drive(&mut doc, cmd);
    assert_eq!(doc.cursor().block_index, 1);

    // Through neutral and left again: a second step.
    let cmd = joy.deflect(0.0, 0.0, &doc);
    drive(&mut doc, cmd);
    let cmd = joy.deflect(-100.0, 0.0, &doc);
    drive(&mut doc, cmd);
    assert_eq!(doc.cursor().block_index, 0);
    joy.release();
}

#[test]
fn joystick_long_press_creates_superscript() {
    let clock = FakeClock::default();
    let mut joy = Joystick::new(clock.clone(), 100.0);
    let mut doc = Document::from_glyphs("x").unwrap();

    joy.press();
    // No superscript yet: the diagonal arms a delayed entry instead of
    // switching modes immediately.
    let cmd = joy.deflect(70.0, -70.0, &doc);
    drive(&mut doc, cmd);
    assert_eq!(doc.cursor().mode, Mode::Main);

    clock.advance(Duration::from_millis(501));
    drive(&mut doc, joy.poll());
    assert_eq!(doc.cursor().mode, Mode::Script(ScriptKind::Superscript));

    doc.apply(Cmd::InsertChar { ch: '2' });
    joy.release();

    // Next gesture: the superscript now exists, entry is immediate.
    doc.apply(Cmd::ExitScript);
    joy.press();
    let cmd = joy.deflect(70.0, -70.0, &doc);
    drive(&mut doc, cmd);
    assert_eq!(doc.cursor().mode, Mode::Script(ScriptKind::Superscript));
    assert_eq!(doc.cursor().script_index, 1);
}

#[test]
fn joystick_selection_gesture_end_to_end() {
    let clock = FakeClock::default();
    let mut joy = Joystick::new(clock.clone(), 100.0);
    let mut doc = Document::from_glyphs("abc").unwrap();
    doc.apply(Cmd::MoveLeft); // onto 'b'

    joy.press();
    clock.advance(Duration::from_millis(651));
    drive(&mut doc, joy.poll());
    assert!(joy.is_selecting());
    assert_eq!(doc.selection().map(|s| (s.start, s.end)), Some((2, 3)));

    // Clockwise-ish deflection widens leftwards, then release keeps the
    // selection for a later delete.
    let cmd = joy.deflect(50.0, 50.0, &doc);
    drive(&mut doc, cmd);
    assert_eq!(doc.selection().map(|s| (s.start, s.end)), Some((1, 3)));
    joy.release();
    assert!(!joy.is_selecting());
    assert_eq!(doc.selection().map(|s| (s.start, s.end)), Some((1, 3)));

    doc.apply(Cmd::DeleteSelection);
    assert_eq!(doc.glyphs().collect::<String>(), "c");
}

#[test]
fn stale_timer_never_fires_into_a_new_gesture() {
    let clock = FakeClock::default();
    let mut joy = Joystick::new(clock.clone(), 100.0);
    let mut doc = Document::from_glyphs("x").unwrap();

    // Arm a delayed superscript, release, and start a new gesture. The old
    // timer must not leak into it.
    joy.press();
    let cmd = joy.deflect(70.0, -70.0, &doc);
    drive(&mut doc, cmd);
    joy.release();

    joy.press();
    clock.advance(Duration::from_millis(550));
    // Only the fresh selection hold is armed, and it has not elapsed yet.
    assert_eq!(joy.poll(), None);
    assert_eq!(doc.cursor().mode, Mode::Main);
}
