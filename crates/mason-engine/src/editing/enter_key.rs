use crate::blocks::BlockKind;
use crate::editing::commands::Cmd;
use crate::editing::document::Document;
use crate::editing::patch::Patch;

/// Shared "press Enter twice to exit" policy for fenced-style blocks.
///
/// A first Enter inserts a newline at the caret. When the block's text
/// already ends with a newline and the caret sits at the very end, the
/// trailing newline is removed instead and the caret moves into a fresh
/// paragraph inserted after the block.
pub fn press_enter_twice_to_exit(doc: &mut Document) -> Patch {
    let Some(caret) = doc.caret() else {
        return Patch {
            changed: Vec::new(),
            caret: None,
            version: doc.version(),
        };
    };
    let Some(block) = doc.block(caret.block) else {
        return Patch {
            changed: Vec::new(),
            caret: Some(caret),
            version: doc.version(),
        };
    };
    let text = block.plain_text();
    if text.ends_with('\n') && caret.offset >= text.len() {
        doc.apply(Cmd::DeleteBackward { count: 1 });
        doc.apply(Cmd::InsertBlockAfter {
            after: caret.block,
            kind: BlockKind::Paragraph,
        })
    } else {
        doc.apply(Cmd::InsertText {
            text: "\n".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::BlockNode;
    use pretty_assertions::assert_eq;

    fn code_doc(text: &str, caret_offset: usize) -> Document {
        let mut doc = Document::from_blocks(vec![BlockNode::code(Some("rust".into()), text)]);
        let id = doc.blocks()[0].id;
        doc.apply(Cmd::SetCaret {
            block: id,
            offset: caret_offset,
        });
        doc
    }

    #[test]
    fn test_first_press_appends_newline() {
        let mut doc = code_doc("fn main() {}", 12);
        press_enter_twice_to_exit(&mut doc);
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].plain_text(), "fn main() {}\n");
        assert_eq!(doc.caret().map(|c| c.offset), Some(13));
    }

    #[test]
    fn test_second_press_at_end_exits_to_new_paragraph() {
        let mut doc = code_doc("fn main() {}\n", 13);
        press_enter_twice_to_exit(&mut doc);
        assert_eq!(doc.blocks().len(), 2);
        // Trailing newline stripped from the fenced block.
        assert_eq!(doc.blocks()[0].plain_text(), "fn main() {}");
        assert_eq!(doc.blocks()[1].kind, BlockKind::Paragraph);
        assert_eq!(doc.blocks()[1].plain_text(), "");
        // Caret moved into the fresh paragraph.
        assert_eq!(doc.caret().map(|c| c.block), Some(doc.blocks()[1].id));
        assert_eq!(doc.caret().map(|c| c.offset), Some(0));
    }

    #[test]
    fn test_press_mid_text_inserts_newline_at_caret() {
        let mut doc = code_doc("ab\n", 1);
        press_enter_twice_to_exit(&mut doc);
        assert_eq!(doc.blocks().len(), 1);
        assert_eq!(doc.blocks()[0].plain_text(), "a\nb\n");
    }

    #[test]
    fn test_press_without_caret_is_inert() {
        let mut doc = Document::from_blocks(vec![BlockNode::code(None, "x")]);
        let version = doc.version();
        let patch = press_enter_twice_to_exit(&mut doc);
        assert!(patch.changed.is_empty());
        assert_eq!(doc.version(), version);
        assert_eq!(doc.blocks()[0].plain_text(), "x");
    }

    #[test]
    fn test_double_press_sequence_from_plain_typing() {
        let mut doc = code_doc("println!()", 10);
        press_enter_twice_to_exit(&mut doc);
        press_enter_twice_to_exit(&mut doc);
        assert_eq!(doc.blocks().len(), 2);
        assert_eq!(doc.blocks()[0].plain_text(), "println!()");
        assert_eq!(doc.blocks()[1].plain_text(), "");
    }
}
