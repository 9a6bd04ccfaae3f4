// Tab widget error types
// Only configuration parsing can fail; the widgets themselves degrade silently

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TabsError {
    #[error("Invalid tab bar position: {0} (expected top, bottom, left or right)")]
    InvalidPosition(String),

    #[error("Invalid tab bar variant: {0} (expected ink or scrollable)")]
    InvalidVariant(String),

    #[error("Duplicate pane key: {0}")]
    DuplicateKey(String),

    #[error("Pane at index {0} has an empty key")]
    EmptyKey(usize),
}
