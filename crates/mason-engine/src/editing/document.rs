use crate::blocks::{BlockId, BlockKind, BlockNode, Inline};
use crate::editing::commands::Cmd;
use crate::editing::patch::Patch;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("invalid blocks document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Collapsed text cursor: a byte offset into one block's flattened text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caret {
    pub block: BlockId,
    pub offset: usize,
}

/// The editable block document.
///
/// Holds the ordered block list, the caret and a version counter bumped on
/// every applied command. Always normalized: at least one block, and every
/// block has at least one text child.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<BlockNode>,
    caret: Option<Caret>,
    version: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Empty document: a single empty paragraph.
    pub fn new() -> Self {
        Self::from_blocks(Vec::new())
    }

    /// Build a document from parsed blocks, normalizing as needed.
    pub fn from_blocks(mut blocks: Vec<BlockNode>) -> Self {
        if blocks.is_empty() {
            blocks.push(BlockNode::paragraph(""));
        }
        for block in &mut blocks {
            if block.children.is_empty() {
                block.children.push(Inline::text(""));
            }
        }
        Self {
            blocks,
            caret: None,
            version: 0,
        }
    }

    /// Parse the serialized value (a JSON array of block nodes).
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let blocks: Vec<BlockNode> = serde_json::from_str(json)?;
        Ok(Self::from_blocks(blocks))
    }

    /// Serialize back to the JSON value shape.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&self.blocks)?)
    }

    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    pub fn block(&self, id: BlockId) -> Option<&BlockNode> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn caret(&self) -> Option<Caret> {
        self.caret
    }

    /// Block currently holding the caret.
    pub fn active_block(&self) -> Option<&BlockNode> {
        self.caret.and_then(|c| self.block(c.block))
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a command, returning the change descriptor. Commands with a
    /// missing or mismatched target apply as no-ops.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let changed = match cmd {
            Cmd::SetCaret { block, offset } => self.apply_set_caret(block, offset),
            Cmd::InsertText { text } => self.apply_insert_text(&text),
            Cmd::DeleteBackward { count } => self.apply_delete_backward(count),
            Cmd::SetText { block, text } => self.apply_set_text(block, text),
            Cmd::SetCodeLanguage { block, language } => {
                self.apply_set_code_language(block, language)
            }
            Cmd::ConvertBlock {
                block,
                kind,
                children,
            } => self.apply_convert_block(block, kind, children),
            Cmd::InsertBlockAfter { after, kind } => self.apply_insert_block_after(after, kind),
        };
        self.version += 1;
        Patch {
            changed,
            caret: self.caret,
            version: self.version,
        }
    }

    fn block_index(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    fn apply_set_caret(&mut self, block: BlockId, offset: usize) -> Vec<BlockId> {
        let Some(idx) = self.block_index(block) else {
            return Vec::new();
        };
        let text = self.blocks[idx].plain_text();
        let offset = floor_char_boundary(&text, offset.min(text.len()));
        self.caret = Some(Caret { block, offset });
        Vec::new()
    }

    fn apply_insert_text(&mut self, text: &str) -> Vec<BlockId> {
        let Some(caret) = self.caret else {
            return Vec::new();
        };
        let Some(idx) = self.block_index(caret.block) else {
            return Vec::new();
        };
        let block = &mut self.blocks[idx];
        let clamped = caret.offset.min(block.text_len());
        let mut acc = 0usize;
        for child in &mut block.children {
            let Inline::Text { text: t } = child;
            if clamped <= acc + t.len() {
                let at = floor_char_boundary(t, clamped - acc);
                t.insert_str(at, text);
                self.caret = Some(Caret {
                    block: caret.block,
                    offset: acc + at + text.len(),
                });
                return vec![caret.block];
            }
            acc += t.len();
        }
        Vec::new()
    }

    fn apply_delete_backward(&mut self, count: usize) -> Vec<BlockId> {
        let Some(caret) = self.caret else {
            return Vec::new();
        };
        let Some(idx) = self.block_index(caret.block) else {
            return Vec::new();
        };
        let block = &mut self.blocks[idx];
        let mut text = block.plain_text();
        let end = floor_char_boundary(&text, caret.offset.min(text.len()));
        let mut start = end;
        for _ in 0..count {
            match text[..start].chars().next_back() {
                Some(ch) => start -= ch.len_utf8(),
                None => break,
            }
        }
        if start == end {
            self.caret = Some(Caret {
                block: caret.block,
                offset: end,
            });
            return Vec::new();
        }
        text.replace_range(start..end, "");
        block.children = vec![Inline::text(text)];
        self.caret = Some(Caret {
            block: caret.block,
            offset: start,
        });
        vec![caret.block]
    }

    fn apply_set_text(&mut self, block: BlockId, text: String) -> Vec<BlockId> {
        let Some(idx) = self.block_index(block) else {
            return Vec::new();
        };
        self.blocks[idx].children = vec![Inline::text(text)];
        if let Some(caret) = self.caret
            && caret.block == block
        {
            let text = self.blocks[idx].plain_text();
            let offset = floor_char_boundary(&text, caret.offset.min(text.len()));
            self.caret = Some(Caret { block, offset });
        }
        vec![block]
    }

    fn apply_set_code_language(&mut self, block: BlockId, language: String) -> Vec<BlockId> {
        let Some(idx) = self.block_index(block) else {
            return Vec::new();
        };
        match &mut self.blocks[idx].kind {
            BlockKind::Code { language: slot } => {
                *slot = Some(language);
                vec![block]
            }
            _ => Vec::new(),
        }
    }

    fn apply_convert_block(
        &mut self,
        block: BlockId,
        kind: BlockKind,
        children: Option<Vec<Inline>>,
    ) -> Vec<BlockId> {
        let Some(idx) = self.block_index(block) else {
            return Vec::new();
        };
        let node = &mut self.blocks[idx];
        node.kind = kind;
        if let Some(children) = children {
            node.children = if children.is_empty() {
                vec![Inline::text("")]
            } else {
                children
            };
        }
        if let Some(caret) = self.caret
            && caret.block == block
        {
            let text = node.plain_text();
            let offset = floor_char_boundary(&text, caret.offset.min(text.len()));
            self.caret = Some(Caret { block, offset });
        }
        vec![block]
    }

    fn apply_insert_block_after(&mut self, after: BlockId, kind: BlockKind) -> Vec<BlockId> {
        let Some(idx) = self.block_index(after) else {
            return Vec::new();
        };
        let node = BlockNode::with_kind(kind, "");
        let id = node.id;
        self.blocks.insert(idx + 1, node);
        self.caret = Some(Caret {
            block: id,
            offset: 0,
        });
        vec![id]
    }
}

/// Largest char-boundary offset not above `index`.
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        return s.len();
    }
    let mut i = index;
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc_with(blocks: Vec<BlockNode>) -> Document {
        Document::from_blocks(blocks)
    }

    // ============ Construction and normalization tests ============

    #[test]
    fn test_new_document_has_one_empty_paragraph() {
        let doc = Document::new();
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks()[0].plain_text(), "");
    }

    #[test]
    fn test_from_json_normalizes_empty_children() {
        let doc = Document::from_json(r#"[{"type":"paragraph","children":[]}]"#).unwrap();
        assert_eq!(doc.blocks()[0].children.len(), 1);
        assert_eq!(doc.blocks()[0].plain_text(), "");
    }

    #[test]
    fn test_from_json_rejects_malformed_value() {
        assert!(Document::from_json("{not json").is_err());
        assert!(Document::from_json(r#"[{"type":"starship"}]"#).is_err());
    }

    #[test]
    fn test_json_round_trip_preserves_blocks() {
        let json = r#"[
            {"type":"heading","level":1,"children":[{"type":"text","text":"Title"}]},
            {"type":"code","language":"rust","children":[{"type":"text","text":"fn main() {}"}]},
            {"type":"paragraph","children":[{"type":"text","text":"after"}]}
        ]"#;
        let doc = Document::from_json(json).unwrap();
        let round = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(round.blocks().len(), 3);
        assert_eq!(round.blocks()[1].language(), Some("rust"));
        assert_eq!(round.blocks()[1].plain_text(), "fn main() {}");
    }

    // ============ Caret and text command tests ============

    #[test]
    fn test_set_caret_clamps_offset() {
        let mut doc = doc_with(vec![BlockNode::paragraph("hello")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 99,
        });
        assert_eq!(doc.caret(), Some(Caret { block: id, offset: 5 }));
    }

    #[test]
    fn test_set_caret_on_unknown_block_is_inert() {
        let mut doc = doc_with(vec![BlockNode::paragraph("hello")]);
        let patch = doc.apply(Cmd::SetCaret {
            block: BlockId::new(),
            offset: 0,
        });
        assert!(patch.changed.is_empty());
        assert_eq!(doc.caret(), None);
    }

    #[test]
    fn test_insert_text_at_caret() {
        let mut doc = doc_with(vec![BlockNode::paragraph("helo")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 3,
        });
        let patch = doc.apply(Cmd::InsertText {
            text: "l".to_string(),
        });
        assert_eq!(doc.blocks()[0].plain_text(), "hello");
        assert_eq!(patch.changed, vec![id]);
        assert_eq!(doc.caret().map(|c| c.offset), Some(4));
    }

    #[test]
    fn test_insert_text_without_caret_is_inert() {
        let mut doc = doc_with(vec![BlockNode::paragraph("a")]);
        let patch = doc.apply(Cmd::InsertText {
            text: "x".to_string(),
        });
        assert!(patch.changed.is_empty());
        assert_eq!(doc.blocks()[0].plain_text(), "a");
    }

    #[test]
    fn test_insert_text_spans_multiple_children() {
        let mut doc = doc_with(vec![BlockNode {
            id: BlockId::new(),
            kind: BlockKind::Paragraph,
            children: vec![Inline::text("ab"), Inline::text("cd")],
        }]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 3,
        });
        doc.apply(Cmd::InsertText {
            text: "X".to_string(),
        });
        assert_eq!(doc.blocks()[0].plain_text(), "abcXd");
    }

    #[test]
    fn test_delete_backward_removes_whole_chars() {
        let mut doc = doc_with(vec![BlockNode::paragraph("héllo")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 3, // after the two-byte 'é'
        });
        doc.apply(Cmd::DeleteBackward { count: 1 });
        assert_eq!(doc.blocks()[0].plain_text(), "hllo");
        assert_eq!(doc.caret().map(|c| c.offset), Some(1));
    }

    #[test]
    fn test_delete_backward_at_start_is_inert() {
        let mut doc = doc_with(vec![BlockNode::paragraph("ab")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 0,
        });
        let patch = doc.apply(Cmd::DeleteBackward { count: 1 });
        assert!(patch.changed.is_empty());
        assert_eq!(doc.blocks()[0].plain_text(), "ab");
    }

    #[test]
    fn test_set_text_replaces_children_and_clamps_caret() {
        let mut doc = doc_with(vec![BlockNode::paragraph("a long line")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 11,
        });
        doc.apply(Cmd::SetText {
            block: id,
            text: "short".to_string(),
        });
        assert_eq!(doc.blocks()[0].plain_text(), "short");
        assert_eq!(doc.caret().map(|c| c.offset), Some(5));
    }

    // ============ Language and conversion command tests ============

    #[test]
    fn test_set_code_language_updates_only_target_block() {
        let mut doc = doc_with(vec![
            BlockNode::paragraph("before"),
            BlockNode::code(Some("plaintext".into()), "let x = 1;"),
            BlockNode::paragraph("after"),
        ]);
        let code_id = doc.blocks()[1].id;
        let patch = doc.apply(Cmd::SetCodeLanguage {
            block: code_id,
            language: "javascript".to_string(),
        });
        assert_eq!(patch.changed, vec![code_id]);
        assert_eq!(doc.blocks()[1].language(), Some("javascript"));
        // Text children and siblings untouched.
        assert_eq!(doc.blocks()[1].plain_text(), "let x = 1;");
        assert_eq!(doc.blocks()[0].plain_text(), "before");
        assert_eq!(doc.blocks()[2].plain_text(), "after");
        assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks()[2].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_set_code_language_on_non_code_block_is_inert() {
        let mut doc = doc_with(vec![BlockNode::paragraph("text")]);
        let id = doc.blocks()[0].id;
        let patch = doc.apply(Cmd::SetCodeLanguage {
            block: id,
            language: "rust".to_string(),
        });
        assert!(patch.changed.is_empty());
        assert_eq!(doc.blocks()[0].kind, BlockKind::Paragraph);
    }

    #[test]
    fn test_convert_block_with_fresh_children() {
        let mut doc = doc_with(vec![BlockNode::paragraph("existing text")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 8,
        });
        doc.apply(Cmd::ConvertBlock {
            block: id,
            kind: BlockKind::Code {
                language: Some("plaintext".to_string()),
            },
            children: Some(vec![Inline::text("")]),
        });
        let block = &doc.blocks()[0];
        assert!(block.is_code());
        assert_eq!(block.language(), Some("plaintext"));
        assert_eq!(block.children, vec![Inline::text("")]);
        assert_eq!(doc.caret(), Some(Caret { block: id, offset: 0 }));
    }

    #[test]
    fn test_convert_block_preserving_children() {
        let mut doc = doc_with(vec![BlockNode::paragraph("keep me")]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::ConvertBlock {
            block: id,
            kind: BlockKind::Quote,
            children: None,
        });
        assert_eq!(doc.blocks()[0].kind, BlockKind::Quote);
        assert_eq!(doc.blocks()[0].plain_text(), "keep me");
    }

    #[test]
    fn test_insert_block_after_moves_caret_into_new_block() {
        let mut doc = doc_with(vec![
            BlockNode::code(Some("rust".into()), "code"),
            BlockNode::paragraph("tail"),
        ]);
        let code_id = doc.blocks()[0].id;
        let patch = doc.apply(Cmd::InsertBlockAfter {
            after: code_id,
            kind: BlockKind::Paragraph,
        });
        assert_eq!(doc.blocks().len(), 3);
        assert_eq!(doc.blocks()[1].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks()[1].plain_text(), "");
        assert_eq!(doc.caret().map(|c| c.block), Some(doc.blocks()[1].id));
        assert_eq!(patch.changed, vec![doc.blocks()[1].id]);
    }

    // ============ Version counter tests ============

    #[test]
    fn test_every_apply_bumps_version() {
        let mut doc = doc_with(vec![BlockNode::paragraph("x")]);
        let id = doc.blocks()[0].id;
        assert_eq!(doc.version(), 0);
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: 0,
        });
        assert_eq!(doc.version(), 1);
        doc.apply(Cmd::InsertText {
            text: "y".to_string(),
        });
        assert_eq!(doc.version(), 2);
    }
}
