/*!
 * # Gesture Module
 *
 * Virtual-joystick input for the formula editor.
 *
 * A pointer gesture (press, move, release) is turned into editor commands in
 * two stages:
 *
 * - the [`classifier`] maps a deflection offset into one of eight compass
 *   directions, with a dead zone whose size depends on whether a selection
 *   gesture is active
 * - the [`Joystick`] controller owns the gesture state machine:
 *   edge-triggered direction dispatch (a command fires once per distinct new
 *   direction), the long-press escalations (delayed script entry, selection
 *   mode), and the cancel-before-rearm discipline that keeps a stale timer
 *   from firing after the user has moved on
 *
 * Time is injected through the [`Clock`] trait so tests drive it
 * deterministically instead of sleeping.
 */

pub mod classifier;
pub mod clock;
pub mod controller;

pub use classifier::{Direction, NAV_DEADZONE, SELECTION_DEADZONE};
pub use clock::{Clock, SystemClock};
pub use controller::Joystick;
