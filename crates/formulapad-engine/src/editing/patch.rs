/// Result of applying a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    /// Whether the command changed any state. Commands with failed
    /// preconditions report `false` and leave the document untouched.
    pub applied: bool,
    /// Document version after the command.
    pub version: u64,
}
