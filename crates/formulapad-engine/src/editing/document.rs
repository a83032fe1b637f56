use thiserror::Error;

use crate::editing::{Block, Cmd, Cursor, Patch, ScriptKind, Selection, commands};

/// Error seeding a document from an existing formula string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormulaError {
    #[error("unsupported glyph {0:?} in formula")]
    UnsupportedGlyph(char),
}

/// The formula document: one mutable aggregate owned by the editing session.
///
/// Holds the ordered block sequence (start sentinel at index 0, glyph blocks
/// after it), exactly one [`Cursor`], and at most one [`Selection`]. All
/// edits flow through [`Document::apply`]; renderers read via
/// [`Document::snapshot`] and never touch the aggregate directly.
///
/// ```rust
/// use formulapad_engine::editing::{Cmd, Document};
///
/// let mut doc = Document::new();
/// let patch = doc.apply(Cmd::InsertChar { ch: 'x' });
/// assert!(patch.applied);
/// assert_eq!(doc.len(), 2); // start sentinel + 'x'
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub(crate) blocks: Vec<Block>,
    pub(crate) cursor: Cursor,
    pub(crate) selection: Option<Selection>,
    /// Version counter incremented on each applied command (enables change
    /// detection in renderers).
    pub(crate) version: u64,
}

impl Document {
    /// Empty document: just the start sentinel, cursor resting on it.
    pub fn new() -> Self {
        Self {
            blocks: vec![Block::start()],
            cursor: Cursor::home(),
            selection: None,
            version: 0,
        }
    }

    /// Seed a document from an existing formula string, one glyph block per
    /// character. Control characters are rejected; anything else is accepted
    /// the way palette buttons inject symbols.
    pub fn from_glyphs(glyphs: &str) -> Result<Self, FormulaError> {
        let mut doc = Self::new();
        for ch in glyphs.chars() {
            if ch.is_control() {
                return Err(FormulaError::UnsupportedGlyph(ch));
            }
            doc.apply(Cmd::InsertChar { ch });
        }
        // Seeding is not an edit as far as change detection is concerned.
        doc.version = 0;
        Ok(doc)
    }

    /// Apply a command to the document.
    ///
    /// Commands are total over all reachable states: a command whose
    /// preconditions fail is a no-op reported through [`Patch::applied`],
    /// never an error. The version increments only for applied commands.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let applied = commands::apply_command(self, &cmd);
        if applied {
            self.version += 1;
        }
        Patch {
            applied,
            version: self.version,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Number of blocks including the start sentinel.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// True when the formula has no glyph blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.len() == 1
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The glyph values of the main line, in order.
    pub fn glyphs(&self) -> impl Iterator<Item = char> + '_ {
        self.blocks.iter().filter_map(Block::value)
    }

    pub(crate) fn cursor_block(&self) -> &Block {
        &self.blocks[self.cursor.block_index]
    }

    pub(crate) fn cursor_block_mut(&mut self) -> &mut Block {
        &mut self.blocks[self.cursor.block_index]
    }

    /// True only in main mode on a glyph block whose superscript list is
    /// non-empty. Drives the gesture layer's immediate-enter vs
    /// long-press-to-create choice.
    pub fn has_superscript(&self) -> bool {
        self.has_script(ScriptKind::Superscript)
    }

    /// Subscript counterpart of [`Document::has_superscript`].
    pub fn has_subscript(&self) -> bool {
        self.has_script(ScriptKind::Subscript)
    }

    pub fn has_script(&self, kind: ScriptKind) -> bool {
        self.cursor.mode.is_main()
            && self
                .cursor_block()
                .script(kind)
                .is_some_and(|list| !list.is_empty())
    }

    pub fn snapshot(&self) -> crate::editing::Snapshot {
        crate::editing::snapshot::create_snapshot(self)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Mode;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_document_has_only_start_block() {
        let doc = Document::new();
        assert_eq!(doc.len(), 1);
        assert!(doc.is_empty());
        assert!(doc.blocks()[0].is_start());
        assert_eq!(doc.cursor(), Cursor::home());
        assert_eq!(doc.selection(), None);
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_insert_first_glyph() {
        // Start with only the start block; inserting 'x' appends a glyph
        // block and moves the cursor onto it.
        let mut doc = Document::new();
        let patch = doc.apply(Cmd::InsertChar { ch: 'x' });

        assert!(patch.applied);
        assert_eq!(patch.version, 1);
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.blocks()[1].value(), Some('x'));
        assert_eq!(doc.cursor().block_index, 1);
        assert_eq!(doc.cursor().mode, Mode::Main);
    }

    #[test]
    fn test_from_glyphs_seeds_in_order() {
        let doc = Document::from_glyphs("a+b").unwrap();
        assert_eq!(doc.glyphs().collect::<String>(), "a+b");
        assert_eq!(doc.len(), 4);
        assert_eq!(doc.cursor().block_index, 3);
        assert_eq!(doc.version(), 0);
    }

    #[test]
    fn test_from_glyphs_accepts_palette_symbols() {
        let doc = Document::from_glyphs("∫x√2").unwrap();
        assert_eq!(doc.glyphs().collect::<String>(), "∫x√2");
    }

    #[test]
    fn test_from_glyphs_rejects_control_characters() {
        assert_eq!(
            Document::from_glyphs("a\nb"),
            Err(FormulaError::UnsupportedGlyph('\n'))
        );
    }

    #[test]
    fn test_has_script_only_in_main_mode_on_nonempty_list() {
        let mut doc = Document::from_glyphs("x").unwrap();
        assert!(!doc.has_superscript());

        doc.apply(Cmd::EnterSuperscript);
        doc.apply(Cmd::InsertChar { ch: '2' });
        // Still inside the script: the predicate is a main-mode query.
        assert!(!doc.has_superscript());

        doc.apply(Cmd::ExitScript);
        assert!(doc.has_superscript());
        assert!(!doc.has_subscript());
    }

    #[test]
    fn test_no_op_command_leaves_version_unchanged() {
        let mut doc = Document::new();
        let patch = doc.apply(Cmd::MoveLeft);
        assert!(!patch.applied);
        assert_eq!(doc.version(), 0);
    }
}
