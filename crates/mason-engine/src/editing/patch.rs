use crate::blocks::BlockId;
use crate::editing::document::Caret;

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Blocks whose content or kind changed. Empty for inert commands.
    pub changed: Vec<BlockId>,
    /// Caret position after the command.
    pub caret: Option<Caret>,
    /// Document version after the command.
    pub version: u64,
}
