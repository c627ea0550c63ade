//! Block node model for the structured document value.
//!
//! A document is an ordered list of [`BlockNode`]s, each carrying a typed
//! [`BlockKind`] and ordered [`Inline`] text children. The serialized form is
//! the flat CMS shape, e.g. `{"type":"code","language":"rust","children":[…]}`.
//! Block ids are per-session only and never serialized.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Stable per-session identity of a block, used for render keys, focus
/// tracking and identity-matched mutations. Regenerated on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
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

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Inline child node. Only plain text runs exist in this model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    Text { text: String },
}

impl Inline {
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Inline::Text { text } => text,
        }
    }
}

/// Discriminated block variant. The `type` field in the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BlockKind {
    Paragraph,
    Heading {
        level: u8,
    },
    Quote,
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

/// One block of the document: identity, kind and ordered inline children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockNode {
    #[serde(skip)]
    pub id: BlockId,
    #[serde(flatten)]
    pub kind: BlockKind,
    pub children: Vec<Inline>,
}

impl BlockNode {
    /// Build a block of the given kind with a single text child.
    pub fn with_kind(kind: BlockKind, text: impl Into<String>) -> Self {
        Self {
            id: BlockId::new(),
            kind,
            children: vec![Inline::text(text)],
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::with_kind(BlockKind::Paragraph, text)
    }

    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self::with_kind(BlockKind::Heading { level }, text)
    }

    pub fn quote(text: impl Into<String>) -> Self {
        Self::with_kind(BlockKind::Quote, text)
    }

    pub fn code(language: Option<String>, text: impl Into<String>) -> Self {
        Self::with_kind(BlockKind::Code { language }, text)
    }

    /// Flatten the ordered text children into one string.
    pub fn plain_text(&self) -> String {
        self.children.iter().map(Inline::as_text).collect()
    }

    /// Length in bytes of the flattened text.
    pub fn text_len(&self) -> usize {
        self.children.iter().map(|c| c.as_text().len()).sum()
    }

    /// Type guard for the code variant: a tag check on the discriminant.
    pub fn is_code(&self) -> bool {
        matches!(self.kind, BlockKind::Code { .. })
    }

    /// Selected language identifier, if this is a code block with one set.
    pub fn language(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Code { language } => language.as_deref(),
            _ => None,
        }
    }
}
