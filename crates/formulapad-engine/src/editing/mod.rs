/*!
 * # Editing Core Module
 *
 * The formula document model and its command interpreter.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Mutable Aggregate
 * - The whole formula lives in one [`Document`]: an ordered block sequence,
 *   exactly one cursor, and at most one selection
 * - A sentinel start block sits at index 0 for the lifetime of the document;
 *   the caret rests on it when the formula is empty
 * - There is exactly one logical writer (the input-event handler) and one
 *   logical reader (the render step), both on the same cooperative timeline
 *
 * ### 2. Command-Based Editing
 * - All edits flow through the [`Cmd`] enum via [`Document::apply`]
 * - Every command is total: failed preconditions are no-ops, never errors,
 *   so any gesture is always safe to issue
 * - Each applied command bumps the document version for change detection
 *
 * ### 3. Stable Block IDs
 * - Blocks carry a [`BlockId`] assigned at creation that survives edits
 *   around them, so UI layers can track a block across inserts and deletes
 *
 * ### 4. Read API: Immutable Snapshots
 * - Renderers consume [`Snapshot`]s and never touch the mutable aggregate
 * - Snapshots carry per-block cursor/selection flags and the script-width
 *   layout hint, which is all a display tree needs
 *
 * ## Usage Pattern
 *
 * ```rust
 * use formulapad_engine::editing::{Cmd, Document, Mode};
 *
 * let mut doc = Document::new();
 * doc.apply(Cmd::InsertChar { ch: 'x' });
 * doc.apply(Cmd::EnterSuperscript);
 * doc.apply(Cmd::InsertChar { ch: '2' });
 * doc.apply(Cmd::ExitScript);
 *
 * let snapshot = doc.snapshot();
 * assert_eq!(snapshot.blocks[1].superscripts, vec!['2']);
 * assert_eq!(doc.cursor().mode, Mode::Main);
 * ```
 */

// Module exports
pub mod block;
pub mod commands;
pub mod cursor;
pub mod document;
pub mod patch;
pub mod selection;
pub mod snapshot;

// Public API re-exports
pub use block::{Block, BlockId, SCRIPT_CHAR_WIDTH, ScriptKind};
pub use commands::Cmd;
pub use cursor::{Cursor, Mode};
pub use document::{Document, FormulaError};
pub use patch::Patch;
pub use selection::Selection;
pub use snapshot::{RenderBlock, Snapshot};
