use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Horizontal layout units reserved per script character.
///
/// Purely a rendering hint carried on snapshots; the engine attaches no
/// meaning to it beyond `max(superscripts, subscripts) * SCRIPT_CHAR_WIDTH`.
pub const SCRIPT_CHAR_WIDTH: u32 = 10;

/// Stable block identity that survives edits around the block.
///
/// UI layers key off this to keep display elements associated with the same
/// logical block while neighbouring blocks are inserted or deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

/// Which script list of a glyph block is being addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScriptKind {
    Superscript,
    Subscript,
}

/// One unit of the formula sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    /// Sentinel block. Exactly one per document, always at index 0, never
    /// removed and never a character-edit target.
    Start { id: BlockId },
    /// A single glyph with its one-level script lists. The glyph may be any
    /// Unicode scalar (keyboard input is restricted upstream, palette
    /// buttons may inject operator symbols like '∫').
    Glyph {
        id: BlockId,
        value: char,
        superscripts: Vec<char>,
        subscripts: Vec<char>,
    },
}

impl Block {
    pub fn start() -> Self {
        Block::Start { id: BlockId::new() }
    }

    pub fn glyph(value: char) -> Self {
        Block::Glyph {
            id: BlockId::new(),
            value,
            superscripts: Vec::new(),
            subscripts: Vec::new(),
        }
    }

    pub fn id(&self) -> BlockId {
        match self {
            Block::Start { id } | Block::Glyph { id, .. } => *id,
        }
    }

    pub fn is_start(&self) -> bool {
        matches!(self, Block::Start { .. })
    }

    /// The glyph value, or `None` for the start sentinel.
    pub fn value(&self) -> Option<char> {
        match self {
            Block::Start { .. } => None,
            Block::Glyph { value, .. } => Some(*value),
        }
    }

    /// The requested script list, or `None` for the start sentinel.
    pub fn script(&self, kind: ScriptKind) -> Option<&[char]> {
        match self {
            Block::Start { .. } => None,
            Block::Glyph {
                superscripts,
                subscripts,
                ..
            } => Some(match kind {
                ScriptKind::Superscript => superscripts,
                ScriptKind::Subscript => subscripts,
            }),
        }
    }

    pub(crate) fn script_mut(&mut self, kind: ScriptKind) -> Option<&mut Vec<char>> {
        match self {
            Block::Start { .. } => None,
            Block::Glyph {
                superscripts,
                subscripts,
                ..
            } => Some(match kind {
                ScriptKind::Superscript => superscripts,
                ScriptKind::Subscript => subscripts,
            }),
        }
    }

    /// Layout hint: the widest script list scaled by [`SCRIPT_CHAR_WIDTH`].
    pub fn script_width(&self) -> u32 {
        match self {
            Block::Start { .. } => 0,
            Block::Glyph {
                superscripts,
                subscripts,
                ..
            } => superscripts.len().max(subscripts.len()) as u32 * SCRIPT_CHAR_WIDTH,
        }
    }
}
