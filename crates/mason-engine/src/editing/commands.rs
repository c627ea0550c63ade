use crate::blocks::{BlockId, BlockKind, Inline};

/// Editing commands applied through `Document::apply`.
///
/// Commands target blocks by identity and are inert when the target is
/// missing or fails the variant predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Move the caret to a byte offset within a block's flattened text.
    /// The offset is clamped to the text length and to a char boundary.
    SetCaret { block: BlockId, offset: usize },
    /// Insert text at the caret.
    InsertText { text: String },
    /// Delete up to `count` characters before the caret.
    DeleteBackward { count: usize },
    /// Replace a block's children with a single text child holding `text`.
    SetText { block: BlockId, text: String },
    /// Update the stored language of a code block in place.
    /// Inert when the target is not a code block.
    SetCodeLanguage { block: BlockId, language: String },
    /// Swap a block's kind, optionally replacing its children.
    ConvertBlock {
        block: BlockId,
        kind: BlockKind,
        children: Option<Vec<Inline>>,
    },
    /// Insert a fresh empty block after an existing one and move the
    /// caret into it.
    InsertBlockAfter { after: BlockId, kind: BlockKind },
}
