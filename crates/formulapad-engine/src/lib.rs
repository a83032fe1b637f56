pub mod editing;
pub mod gesture;

// Re-export key types for easier usage
pub use editing::{block::*, commands::*, cursor::*, document::*, patch::*, selection::*, snapshot::*};
pub use gesture::{classifier::*, clock::*, controller::*};
