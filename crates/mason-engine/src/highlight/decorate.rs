use std::ops::Range;

use crate::blocks::BlockNode;
use crate::highlight::grammars::GrammarRegistry;
use crate::highlight::tokenize::{TokenSegment, tokenize};

/// A classified span of a code block's text, in byte offsets relative to
/// the block's flattened text. The interval is half-open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightRange {
    pub range: Range<usize>,
    pub category: String,
}

/// Compute highlight ranges for one block.
///
/// Non-code blocks and blocks with no text decorate to nothing. The
/// block's language resolves through `registry`; languages it cannot
/// resolve fall back to the plain-text grammar, which classifies nothing,
/// so the result is again empty. Unclassified spans between tokens are
/// not reported.
pub fn decorate_code(block: &BlockNode, registry: &GrammarRegistry) -> Vec<HighlightRange> {
    if !block.is_code() {
        return Vec::new();
    }
    let text = block.plain_text();
    if text.is_empty() {
        return Vec::new();
    }
    let syntax = registry.resolve(block.language());
    let mut ranges = Vec::new();
    let mut offset = 0usize;
    for segment in tokenize(&text, syntax, registry.syntax_set()) {
        let len = segment.len();
        if let TokenSegment::Token { category, .. } = segment {
            ranges.push(HighlightRange {
                range: offset..offset + len,
                category,
            });
        }
        offset += len;
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::{BlockKind, BlockNode};
    use rstest::rstest;
    use std::sync::OnceLock;

    fn bundled() -> &'static GrammarRegistry {
        static REGISTRY: OnceLock<GrammarRegistry> = OnceLock::new();
        REGISTRY.get_or_init(GrammarRegistry::bundled)
    }

    fn code(language: Option<&str>, text: &str) -> BlockNode {
        BlockNode::code(language.map(str::to_string), text)
    }

    // ============ Guard tests ============

    #[rstest]
    #[case::paragraph(BlockNode::paragraph("let x = 1;"))]
    #[case::heading(BlockNode::heading(2, "let x = 1;"))]
    #[case::quote(BlockNode::quote("let x = 1;"))]
    fn test_non_code_blocks_decorate_to_nothing(#[case] block: BlockNode) {
        assert!(decorate_code(&block, bundled()).is_empty());
    }

    #[test]
    fn test_empty_code_block_decorates_to_nothing() {
        assert!(decorate_code(&code(Some("rust"), ""), bundled()).is_empty());
    }

    // ============ Fallback tests ============

    #[rstest]
    #[case::unset(None)]
    #[case::plaintext(Some("plaintext"))]
    #[case::unknown(Some("klingon"))]
    fn test_unresolvable_languages_yield_zero_ranges(#[case] language: Option<&str>) {
        let block = code(language, "let x = 1;");
        assert!(decorate_code(&block, bundled()).is_empty());
    }

    #[test]
    fn test_known_language_without_loaded_grammar_yields_zero_ranges() {
        let registry = GrammarRegistry::minimal();
        let block = code(Some("javascript"), "let x = 1;");
        assert!(decorate_code(&block, &registry).is_empty());
    }

    // ============ Range shape tests ============

    #[test]
    fn test_javascript_ranges_are_ordered_and_in_bounds() {
        let block = code(Some("javascript"), "let x = 1;");
        let ranges = decorate_code(&block, bundled());
        assert!(!ranges.is_empty());
        let mut last_end = 0usize;
        for range in &ranges {
            assert!(range.range.start < range.range.end);
            assert!(range.range.start >= last_end);
            assert!(range.range.end <= 10);
            assert!(!range.category.is_empty());
            last_end = range.range.end;
        }
    }

    #[test]
    fn test_multi_line_ranges_stay_within_the_text() {
        let text = "fn main() {\n    println!(\"hi\");\n}\n";
        let block = code(Some("rust"), text);
        let ranges = decorate_code(&block, bundled());
        assert!(!ranges.is_empty());
        let mut last_end = 0usize;
        for range in &ranges {
            assert!(range.range.start >= last_end);
            assert!(range.range.end <= text.len());
            last_end = range.range.end;
        }
    }

    #[test]
    fn test_child_boundaries_do_not_affect_ranges() {
        let mut split = code(Some("javascript"), "let x");
        split.children.push(crate::blocks::Inline::text(" = 1;"));
        let joined = code(Some("javascript"), "let x = 1;");
        assert_eq!(
            decorate_code(&split, bundled()),
            decorate_code(&joined, bundled())
        );
    }

    #[test]
    fn test_decoration_is_idempotent() {
        let block = code(Some("javascript"), "const answer = 42;");
        let first = decorate_code(&block, bundled());
        let second = decorate_code(&block, bundled());
        assert_eq!(first, second);
    }

    #[test]
    fn test_flipping_kind_off_code_disables_decoration() {
        let as_code = code(Some("rust"), "fn main() {}");
        let mut as_paragraph = as_code.clone();
        as_paragraph.kind = BlockKind::Paragraph;
        assert!(!decorate_code(&as_code, bundled()).is_empty());
        assert!(decorate_code(&as_paragraph, bundled()).is_empty());
    }
}
