use serde::{Deserialize, Serialize};

use crate::editing::ScriptKind;

/// Where editing is currently happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mode {
    /// Editing the main block line.
    Main,
    /// Editing one of the current block's script lists.
    Script(ScriptKind),
}

impl Mode {
    pub fn is_main(&self) -> bool {
        matches!(self, Mode::Main)
    }

    /// The active script kind, or `None` in main mode.
    pub fn script_kind(&self) -> Option<ScriptKind> {
        match self {
            Mode::Main => None,
            Mode::Script(kind) => Some(*kind),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Main => "MAIN",
            Mode::Script(ScriptKind::Superscript) => "SUPERSCRIPT",
            Mode::Script(ScriptKind::Subscript) => "SUBSCRIPT",
        }
    }
}

/// Editing position. Exactly one per document.
///
/// Invariants, maintained by the command interpreter:
/// - `block_index` always addresses an existing block
/// - `mode` is a script mode only while the cursor block is a glyph
/// - `script_index` is an insertion position within the active script list
///   (inclusive of one-past-end) and 0 in main mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub block_index: usize,
    pub mode: Mode,
    pub script_index: usize,
}

impl Cursor {
    /// Cursor resting on the start block in main mode.
    pub(crate) fn home() -> Self {
        Self {
            block_index: 0,
            mode: Mode::Main,
            script_index: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_strings() {
        assert_eq!(Mode::Main.as_str(), "MAIN");
        assert_eq!(Mode::Script(ScriptKind::Superscript).as_str(), "SUPERSCRIPT");
        assert_eq!(Mode::Script(ScriptKind::Subscript).as_str(), "SUBSCRIPT");
    }

    #[test]
    fn test_script_kind_accessor() {
        assert_eq!(Mode::Main.script_kind(), None);
        assert_eq!(
            Mode::Script(ScriptKind::Subscript).script_kind(),
            Some(ScriptKind::Subscript)
        );
    }
}
