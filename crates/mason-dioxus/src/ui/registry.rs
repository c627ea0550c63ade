//! Block plugin registry.
//!
//! Every block type the editor understands is one [`BlockEntry`] registered
//! under a fixed key. The editor never hardcodes block behavior: rendering,
//! conversion, Enter handling and autoformat triggers all dispatch through
//! the registry, so adding a block type means adding an entry.

use dioxus::prelude::*;
use mason_engine::highlight::GrammarRegistry;
use mason_engine::{BlockId, BlockKind, BlockNode, Cmd, Document, Inline, Patch};
use std::sync::Arc;

use crate::ui::components::{CodeBlock, EditorArea, Heading, Paragraph, Quote};
use crate::ui::i18n::{MessageCatalog, MessageDescriptor, msg};

/// Grammar registry shared across block renders. Cloning is cheap and
/// compares by identity, so prop diffing never walks the syntax set.
#[derive(Clone)]
pub struct SharedGrammars(Arc<GrammarRegistry>);

impl SharedGrammars {
    pub fn bundled() -> Self {
        Self(Arc::new(GrammarRegistry::bundled()))
    }

    pub fn new(registry: GrammarRegistry) -> Self {
        Self(Arc::new(registry))
    }
}

impl std::ops::Deref for SharedGrammars {
    type Target = GrammarRegistry;

    fn deref(&self) -> &GrammarRegistry {
        &self.0
    }
}

impl PartialEq for SharedGrammars {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Everything a block entry's `render` function receives.
#[derive(Props, Clone, PartialEq)]
pub struct BlockProps {
    pub block: BlockNode,
    pub focused: bool,
    pub grammars: SharedGrammars,
    pub catalog: MessageCatalog,
    pub on_command: Callback<Cmd>,
    pub on_enter: Callback<BlockId>,
    pub on_focus: Callback<Option<BlockId>>,
    pub on_input: Callback<(BlockId, String)>,
}

/// One registered block type.
#[derive(Clone, PartialEq)]
pub struct BlockEntry {
    /// Fixed registration key, `"code"` for the code block.
    pub key: &'static str,
    pub label: MessageDescriptor,
    pub icon: &'static str,
    /// Type guard deciding whether a node belongs to this entry.
    pub matches: fn(&BlockNode) -> bool,
    pub render: fn(BlockProps) -> Element,
    /// Converts the caret block into this block type.
    pub handle_convert: fn(&mut Document) -> Patch,
    /// Block-specific Enter behavior; `None` falls back to the editor default.
    pub handle_enter_key: Option<fn(&mut Document) -> Patch>,
    /// Autoformat triggers: typing one of these into an empty paragraph
    /// converts it to this block type.
    pub snippets: &'static [&'static str],
    /// Whether the toolbar's block selector offers this entry.
    pub in_blocks_selector: bool,
}

#[derive(Clone, PartialEq)]
pub struct BlockRegistry {
    entries: Vec<BlockEntry>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// The built-in block set: paragraph, heading, quote and code.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(paragraph_entry());
        registry.register(heading_entry());
        registry.register(quote_entry());
        registry.register(code_entry());
        registry
    }

    pub fn register(&mut self, entry: BlockEntry) {
        debug_assert!(
            !self.entries.iter().any(|e| e.key == entry.key),
            "duplicate block entry key: {}",
            entry.key
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[BlockEntry] {
        &self.entries
    }

    pub fn entry_for_key(&self, key: &str) -> Option<&BlockEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// First entry whose type guard accepts the node.
    pub fn entry_matching(&self, node: &BlockNode) -> Option<&BlockEntry> {
        self.entries.iter().find(|e| (e.matches)(node))
    }

    pub fn entry_for_snippet(&self, snippet: &str) -> Option<&BlockEntry> {
        self.entries
            .iter()
            .find(|e| e.snippets.contains(&snippet))
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn unchanged(doc: &Document) -> Patch {
    Patch {
        changed: Vec::new(),
        caret: doc.caret(),
        version: doc.version(),
    }
}

// ============ Paragraph ============

fn paragraph_entry() -> BlockEntry {
    BlockEntry {
        key: "paragraph",
        label: msg("components.Blocks.blocks.text", "Text"),
        icon: "¶",
        matches: |node| matches!(node.kind, BlockKind::Paragraph),
        render: render_paragraph,
        handle_convert: convert_to_paragraph,
        handle_enter_key: None,
        snippets: &[],
        in_blocks_selector: true,
    }
}

fn render_paragraph(props: BlockProps) -> Element {
    if props.focused {
        rsx! {
            EditorArea {
                block: props.block,
                on_command: props.on_command,
                on_enter: props.on_enter,
                on_focus: props.on_focus,
                on_input: props.on_input,
            }
        }
    } else {
        rsx! {
            Paragraph {
                block: props.block,
                on_focus: props.on_focus,
            }
        }
    }
}

fn convert_to_paragraph(doc: &mut Document) -> Patch {
    let Some(caret) = doc.caret() else {
        return unchanged(doc);
    };
    doc.apply(Cmd::ConvertBlock {
        block: caret.block,
        kind: BlockKind::Paragraph,
        children: None,
    })
}

// ============ Heading ============

fn heading_entry() -> BlockEntry {
    BlockEntry {
        key: "heading",
        label: msg("components.Blocks.blocks.heading", "Heading"),
        icon: "H",
        matches: |node| matches!(node.kind, BlockKind::Heading { .. }),
        render: render_heading,
        handle_convert: convert_to_heading,
        handle_enter_key: None,
        snippets: &[],
        in_blocks_selector: true,
    }
}

fn render_heading(props: BlockProps) -> Element {
    if props.focused {
        rsx! {
            EditorArea {
                block: props.block,
                on_command: props.on_command,
                on_enter: props.on_enter,
                on_focus: props.on_focus,
                on_input: props.on_input,
            }
        }
    } else {
        rsx! {
            Heading {
                block: props.block,
                on_focus: props.on_focus,
            }
        }
    }
}

fn convert_to_heading(doc: &mut Document) -> Patch {
    let Some(caret) = doc.caret() else {
        return unchanged(doc);
    };
    doc.apply(Cmd::ConvertBlock {
        block: caret.block,
        kind: BlockKind::Heading { level: 2 },
        children: None,
    })
}

// ============ Quote ============

fn quote_entry() -> BlockEntry {
    BlockEntry {
        key: "quote",
        label: msg("components.Blocks.blocks.quote", "Quote"),
        icon: "❝",
        matches: |node| matches!(node.kind, BlockKind::Quote),
        render: render_quote,
        handle_convert: convert_to_quote,
        handle_enter_key: None,
        snippets: &[],
        in_blocks_selector: true,
    }
}

fn render_quote(props: BlockProps) -> Element {
    if props.focused {
        rsx! {
            EditorArea {
                block: props.block,
                on_command: props.on_command,
                on_enter: props.on_enter,
                on_focus: props.on_focus,
                on_input: props.on_input,
            }
        }
    } else {
        rsx! {
            Quote {
                block: props.block,
                on_focus: props.on_focus,
            }
        }
    }
}

fn convert_to_quote(doc: &mut Document) -> Patch {
    let Some(caret) = doc.caret() else {
        return unchanged(doc);
    };
    doc.apply(Cmd::ConvertBlock {
        block: caret.block,
        kind: BlockKind::Quote,
        children: None,
    })
}

// ============ Code ============

fn code_entry() -> BlockEntry {
    BlockEntry {
        key: "code",
        label: msg("components.Blocks.blocks.code", "Code block"),
        icon: "</>",
        matches: BlockNode::is_code,
        render: render_code,
        handle_convert: convert_to_code,
        handle_enter_key: Some(mason_engine::press_enter_twice_to_exit),
        snippets: &["```"],
        in_blocks_selector: true,
    }
}

fn render_code(props: BlockProps) -> Element {
    rsx! {
        CodeBlock { ..props }
    }
}

/// Conversion to code starts over: fresh node with the plain-text language
/// and exactly one empty text child, whatever the block held before.
fn convert_to_code(doc: &mut Document) -> Patch {
    let Some(caret) = doc.caret() else {
        return unchanged(doc);
    };
    doc.apply(Cmd::ConvertBlock {
        block: caret.block,
        kind: BlockKind::Code {
            language: Some("plaintext".to_string()),
        },
        children: Some(vec![Inline::text("")]),
    })
}
