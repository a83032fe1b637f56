use std::time::Duration;

use log::{debug, trace};

use crate::editing::{Cmd, Document};
use crate::gesture::classifier::{self, Direction, NAV_DEADZONE, SELECTION_DEADZONE};
use crate::gesture::clock::Clock;

/// Default delay before a long-press creates a script level.
pub const DEFAULT_LONG_PRESS: Duration = Duration::from_millis(500);

/// Default hold time before a gesture becomes a selection gesture.
pub const DEFAULT_SELECTION_HOLD: Duration = Duration::from_millis(650);

/// A one-shot action armed behind a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingAction {
    EnterSuperscript,
    EnterSubscript,
    EnterSelectionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    action: PendingAction,
    armed_at: Duration,
    fires_at: Duration,
}

/// Virtual joystick translating a pointer gesture stream into editor
/// commands.
///
/// Dispatch is edge-triggered: a direction command fires at most once per
/// distinct new direction, and re-entering the same direction without
/// passing through neutral does not repeat it. At most one delayed action is
/// armed at a time, and any direction change (including back to neutral),
/// a new gesture, or a release cancels it before anything else happens — a
/// timer that fires after the user has moved on would apply a stale mode
/// change.
///
/// Navigation mapping: left/right move the cursor; up, down and the two
/// left diagonals exit the active script; the right diagonals enter the
/// corresponding script immediately when it already has content, otherwise
/// they arm a delayed entry. Holding the stick at center from the start of
/// the gesture escalates into selection mode, where deflections expand the
/// selection by angle sign only.
pub struct Joystick<C: Clock> {
    clock: C,
    radius: f32,
    long_press: Duration,
    selection_hold: Duration,
    engaged: bool,
    selecting: bool,
    last_direction: Option<Direction>,
    pending: Option<Pending>,
}

impl<C: Clock> Joystick<C> {
    pub fn new(clock: C, radius: f32) -> Self {
        Self::with_delays(clock, radius, DEFAULT_LONG_PRESS, DEFAULT_SELECTION_HOLD)
    }

    pub fn with_delays(
        clock: C,
        radius: f32,
        long_press: Duration,
        selection_hold: Duration,
    ) -> Self {
        Self {
            clock,
            radius,
            long_press,
            selection_hold,
            engaged: false,
            selecting: false,
            last_direction: None,
            pending: None,
        }
    }

    /// Whether a gesture is currently in progress.
    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// True while a selection gesture is in progress. Renderers use this to
    /// suppress the blinking caret.
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Begin a gesture at the neutral position.
    ///
    /// Arms the selection-mode hold: if the stick stays at center until the
    /// hold elapses, [`Joystick::poll`] switches to selection mode and
    /// returns [`Cmd::StartSelection`].
    pub fn press(&mut self) {
        self.cancel_pending();
        self.engaged = true;
        self.selecting = false;
        self.last_direction = None;
        self.arm(PendingAction::EnterSelectionMode, self.selection_hold);
    }

    /// The pointer moved to offset `(x, y)` from the gesture origin.
    ///
    /// Returns the command the deflection maps to, if the classified
    /// direction changed and maps to an immediate command.
    pub fn deflect(&mut self, x: f32, y: f32, doc: &Document) -> Option<Cmd> {
        if !self.engaged {
            return None;
        }
        let deadzone = if self.selecting {
            SELECTION_DEADZONE
        } else {
            NAV_DEADZONE
        };
        let direction = classifier::classify(x, y, self.radius, deadzone);
        if direction == self.last_direction {
            // Edge-triggered: holding a direction never repeats its command.
            return None;
        }
        self.cancel_pending();
        self.last_direction = direction;
        let direction = direction?;
        trace!("direction change: {direction:?}");

        if self.selecting {
            // Coarse one-bit proxy for expansion direction: lower half-plane
            // widens leftwards, upper half-plane widens rightwards.
            return Some(if classifier::angle_deg(x, y) > 0.0 {
                Cmd::ExpandSelectionLeft
            } else {
                Cmd::ExpandSelectionRight
            });
        }

        match direction {
            Direction::Left => Some(Cmd::MoveLeft),
            Direction::Right => Some(Cmd::MoveRight),
            Direction::Up | Direction::Down | Direction::UpLeft | Direction::DownLeft => {
                Some(Cmd::ExitScript)
            }
            Direction::UpRight => {
                if doc.has_superscript() {
                    Some(Cmd::EnterSuperscript)
                } else {
                    self.arm(PendingAction::EnterSuperscript, self.long_press);
                    None
                }
            }
            Direction::DownRight => {
                if doc.has_subscript() {
                    Some(Cmd::EnterSubscript)
                } else {
                    self.arm(PendingAction::EnterSubscript, self.long_press);
                    None
                }
            }
        }
    }

    /// Fire the armed delayed action once its deadline has passed.
    ///
    /// Call regularly (any UI tick rate works); the action fires at most
    /// once.
    pub fn poll(&mut self) -> Option<Cmd> {
        let pending = self.pending?;
        if self.clock.now() < pending.fires_at {
            return None;
        }
        self.pending = None;
        debug!("delayed action fired: {:?}", pending.action);
        match pending.action {
            PendingAction::EnterSuperscript => Some(Cmd::EnterSuperscript),
            PendingAction::EnterSubscript => Some(Cmd::EnterSubscript),
            PendingAction::EnterSelectionMode => {
                self.selecting = true;
                Some(Cmd::StartSelection)
            }
        }
    }

    /// End the gesture: cancel pending work, clear direction memory, leave
    /// selection mode. Any document selection persists until a command
    /// removes it.
    pub fn release(&mut self) {
        self.cancel_pending();
        self.engaged = false;
        self.selecting = false;
        self.last_direction = None;
    }

    /// Fraction of the armed delay already elapsed, in `[0, 1]`. Feed for a
    /// progress-ring indicator; `None` when nothing is armed.
    pub fn pending_progress(&self) -> Option<f32> {
        let pending = self.pending?;
        let total = pending.fires_at - pending.armed_at;
        if total.is_zero() {
            return Some(1.0);
        }
        let elapsed = self.clock.now().saturating_sub(pending.armed_at);
        Some((elapsed.as_secs_f32() / total.as_secs_f32()).min(1.0))
    }

    fn arm(&mut self, action: PendingAction, delay: Duration) {
        let now = self.clock.now();
        trace!("arming {action:?} in {delay:?}");
        self.pending = Some(Pending {
            action,
            armed_at: now,
            fires_at: now + delay,
        });
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            trace!("cancelled pending {:?}", pending.action);
        }
    }
}
