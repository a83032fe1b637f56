use crate::editing::{BlockId, Cursor, Document};

/// Immutable document snapshot for renderers.
///
/// Snapshots are the engine's read API: the UI renders from them and never
/// mutates the document directly. The same structure serves any frontend
/// (terminal, DOM, canvas). The "selection gesture in progress" flag used to
/// suppress the blinking caret is owned by the gesture layer and handed to
/// the renderer alongside the snapshot, not stored here.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Document version for change detection
    pub version: u64,
    /// All blocks in sequence order, start sentinel included
    pub blocks: Vec<RenderBlock>,
    /// Cursor position and mode at snapshot time
    pub cursor: Cursor,
    /// Selected block-index range, if any
    pub selection: Option<(usize, usize)>,
}

/// UI-ready block with stable identity and layout metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderBlock {
    /// Stable identifier that persists across edits around this block
    pub id: BlockId,
    /// Glyph value; `None` for the start sentinel
    pub value: Option<char>,
    pub superscripts: Vec<char>,
    pub subscripts: Vec<char>,
    /// Layout hint: widest script list scaled by the per-character width
    pub script_width: u32,
    /// Whether this block is inside the selection
    pub selected: bool,
    /// Whether the cursor rests on this block
    pub at_cursor: bool,
}

pub(crate) fn create_snapshot(doc: &Document) -> Snapshot {
    let cursor = doc.cursor();
    let selection = doc.selection();
    let blocks = doc
        .blocks()
        .iter()
        .enumerate()
        .map(|(index, block)| RenderBlock {
            id: block.id(),
            value: block.value(),
            superscripts: block
                .script(crate::editing::ScriptKind::Superscript)
                .map_or_else(Vec::new, <[char]>::to_vec),
            subscripts: block
                .script(crate::editing::ScriptKind::Subscript)
                .map_or_else(Vec::new, <[char]>::to_vec),
            script_width: block.script_width(),
            selected: selection.is_some_and(|sel| sel.contains(index)),
            at_cursor: index == cursor.block_index,
        })
        .collect();

    Snapshot {
        version: doc.version(),
        blocks,
        cursor,
        selection: selection.map(|sel| (sel.start, sel.end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::{Cmd, Mode};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_snapshot_reflects_blocks_cursor_and_selection() {
        let mut doc = Document::from_glyphs("ab").unwrap();
        doc.apply(Cmd::MoveLeft); // onto 'a'
        doc.apply(Cmd::StartSelection);

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.version, doc.version());
        assert_eq!(snapshot.blocks.len(), 3);
        assert_eq!(snapshot.blocks[0].value, None);
        assert_eq!(snapshot.blocks[1].value, Some('a'));
        assert!(snapshot.blocks[1].selected);
        assert!(snapshot.blocks[1].at_cursor);
        assert!(!snapshot.blocks[2].selected);
        assert_eq!(snapshot.selection, Some((1, 2)));
        assert_eq!(snapshot.cursor.mode, Mode::Main);
    }

    #[test]
    fn test_snapshot_carries_script_width_hint() {
        let mut doc = Document::from_glyphs("x").unwrap();
        doc.apply(Cmd::EnterSuperscript);
        doc.apply(Cmd::InsertChar { ch: '2' });

        let snapshot = doc.snapshot();
        assert_eq!(snapshot.blocks[1].superscripts, vec!['2']);
        assert_eq!(snapshot.blocks[1].script_width, 10);
    }

    #[test]
    fn test_block_ids_stable_across_surrounding_edits() {
        let mut doc = Document::from_glyphs("ab").unwrap();
        let id_a = doc.snapshot().blocks[1].id;
        let id_b = doc.snapshot().blocks[2].id;

        // Insert between 'a' and 'b', then delete the new block again.
        doc.apply(Cmd::MoveLeft);
        doc.apply(Cmd::InsertChar { ch: 'x' });
        let snapshot = doc.snapshot();
        assert_eq!(snapshot.blocks[1].id, id_a);
        assert_eq!(snapshot.blocks[3].id, id_b);

        doc.apply(Cmd::Backspace);
        let snapshot = doc.snapshot();
        assert_eq!(snapshot.blocks[1].id, id_a);
        assert_eq!(snapshot.blocks[2].id, id_b);
    }

    #[test]
    fn test_snapshot_is_detached_from_later_edits() {
        let mut doc = Document::from_glyphs("a").unwrap();
        let snapshot = doc.snapshot();
        doc.apply(Cmd::InsertChar { ch: 'b' });

        assert_eq!(snapshot.blocks.len(), 2);
        assert_ne!(snapshot.version, doc.version());
    }
}
