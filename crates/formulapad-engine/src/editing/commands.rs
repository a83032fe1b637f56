use serde::{Deserialize, Serialize};

use crate::editing::{Block, Document, Mode, ScriptKind, Selection};

/// Commands that can be applied to the document
///
/// Commands arrive from the keyboard, on-screen buttons, or the joystick
/// gesture layer. All of them are total: when a precondition fails the
/// command is a silent no-op, so every input is always safe to issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cmd {
    /// Insert a glyph at the cursor (main line or active script list). An
    /// active selection is deleted first.
    InsertChar { ch: char },
    /// Remove the block or script character before the cursor.
    Backspace,
    MoveLeft,
    MoveRight,
    /// Begin editing the current block's superscript list (main mode on a
    /// glyph block only).
    EnterSuperscript,
    EnterSubscript,
    /// Return from a script list to the main line.
    ExitScript,
    /// Begin a selection spanning exactly the cursor's block.
    StartSelection,
    ExpandSelectionLeft,
    ExpandSelectionRight,
    /// Remove all selected blocks and collapse the cursor to the selection
    /// start.
    DeleteSelection,
    /// Discard the selection without touching blocks.
    ClearSelection,
}

/// Apply a command to the document. Returns whether any state changed.
pub(crate) fn apply_command(doc: &mut Document, cmd: &Cmd) -> bool {
    match cmd {
        Cmd::InsertChar { ch } => insert_char(doc, *ch),
        Cmd::Backspace => backspace(doc),
        Cmd::MoveLeft => move_cursor(doc, -1),
        Cmd::MoveRight => move_cursor(doc, 1),
        Cmd::EnterSuperscript => enter_script(doc, ScriptKind::Superscript),
        Cmd::EnterSubscript => enter_script(doc, ScriptKind::Subscript),
        Cmd::ExitScript => exit_script(doc),
        Cmd::StartSelection => start_selection(doc),
        Cmd::ExpandSelectionLeft => expand_selection_left(doc),
        Cmd::ExpandSelectionRight => expand_selection_right(doc),
        Cmd::DeleteSelection => delete_selection(doc),
        Cmd::ClearSelection => clear_selection(doc),
    }
}

fn insert_char(doc: &mut Document, ch: char) -> bool {
    // Character input over a selection replaces it: the selection is deleted
    // and the cursor collapses to its start in main mode before inserting.
    if doc.selection.is_some() {
        delete_selection(doc);
    }
    match doc.cursor.mode {
        Mode::Main => {
            let at = doc.cursor.block_index + 1;
            doc.blocks.insert(at, Block::glyph(ch));
            doc.cursor.block_index = at;
            true
        }
        Mode::Script(kind) => {
            let at = doc.cursor.script_index;
            let Some(list) = doc.cursor_block_mut().script_mut(kind) else {
                // Start block: script modes never point here.
                return false;
            };
            list.insert(at, ch);
            doc.cursor.script_index += 1;
            true
        }
    }
}

fn backspace(doc: &mut Document) -> bool {
    match doc.cursor.mode {
        Mode::Main => {
            // The `> 0` guard is what protects the start block.
            if doc.cursor.block_index == 0 {
                return false;
            }
            let removed = doc.cursor.block_index;
            doc.blocks.remove(removed);
            doc.cursor.block_index -= 1;
            shift_selection_after_remove(doc, removed);
            true
        }
        Mode::Script(kind) => {
            if doc.cursor.script_index == 0 {
                return false;
            }
            let at = doc.cursor.script_index - 1;
            let Some(list) = doc.cursor_block_mut().script_mut(kind) else {
                return false;
            };
            list.remove(at);
            doc.cursor.script_index -= 1;
            true
        }
    }
}

fn move_cursor(doc: &mut Document, delta: isize) -> bool {
    match doc.cursor.mode {
        Mode::Main => {
            let target = doc.cursor.block_index as isize + delta;
            if target < 0 || target >= doc.blocks.len() as isize {
                return false;
            }
            doc.cursor.block_index = target as usize;
            true
        }
        Mode::Script(kind) => {
            let len = doc.cursor_block().script(kind).map_or(0, <[char]>::len);
            let target = doc.cursor.script_index as isize + delta;
            // Insertion positions run from 0 to one past the last character.
            if target < 0 || target > len as isize {
                return false;
            }
            doc.cursor.script_index = target as usize;
            true
        }
    }
}

fn enter_script(doc: &mut Document, kind: ScriptKind) -> bool {
    if !doc.cursor.mode.is_main() {
        return false;
    }
    // The start block has no script lists, so entering from it is a no-op.
    let Some(len) = doc.cursor_block().script(kind).map(<[char]>::len) else {
        return false;
    };
    // The cursor lands at the append position.
    doc.cursor.script_index = len;
    doc.cursor.mode = Mode::Script(kind);
    true
}

fn exit_script(doc: &mut Document) -> bool {
    if doc.cursor.mode.is_main() {
        return false;
    }
    doc.cursor.mode = Mode::Main;
    doc.cursor.script_index = 0;
    true
}

fn start_selection(doc: &mut Document) -> bool {
    // A selection never covers the start block.
    if doc.cursor.block_index == 0 {
        return false;
    }
    let next = Selection::single(doc.cursor.block_index);
    if doc.selection == Some(next) {
        return false;
    }
    doc.selection = Some(next);
    true
}

fn expand_selection_left(doc: &mut Document) -> bool {
    let Some(sel) = doc.selection.as_mut() else {
        return false;
    };
    if sel.start <= 1 {
        return false;
    }
    sel.start -= 1;
    true
}

fn expand_selection_right(doc: &mut Document) -> bool {
    let len = doc.blocks.len();
    let Some(sel) = doc.selection.as_mut() else {
        return false;
    };
    if sel.end >= len {
        return false;
    }
    sel.end += 1;
    true
}

fn delete_selection(doc: &mut Document) -> bool {
    let Some(sel) = doc.selection.take() else {
        return false;
    };
    doc.blocks.drain(sel.start..sel.end);
    // A selection reaching the end of the sequence leaves `start` one past
    // the last remaining block.
    doc.cursor.block_index = sel.start.min(doc.blocks.len() - 1);
    doc.cursor.mode = Mode::Main;
    doc.cursor.script_index = 0;
    true
}

fn clear_selection(doc: &mut Document) -> bool {
    doc.selection.take().is_some()
}

/// Keep an active selection consistent when a block is removed outside the
/// selection-delete path (backspace while a selection exists).
fn shift_selection_after_remove(doc: &mut Document, removed: usize) {
    let Some(sel) = doc.selection else {
        return;
    };
    if removed < sel.start {
        doc.selection = Some(Selection {
            start: sel.start - 1,
            end: sel.end - 1,
        });
    } else if removed < sel.end {
        if sel.len() == 1 {
            doc.selection = None;
        } else {
            doc.selection = Some(Selection {
                start: sel.start,
                end: sel.end - 1,
            });
        }
    }
}
