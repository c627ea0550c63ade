use dioxus::prelude::*;
use mason_engine::{BlockId, BlockKind, Cmd, Document, Patch, io};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::ui::i18n::MessageCatalog;
use crate::ui::registry::{BlockRegistry, SharedGrammars};

const MASON_CSS: &str = include_str!("../assets/mason.css");

#[component]
pub fn App(content_path: PathBuf) -> Element {
    // Load the document once at startup; a missing file starts empty
    let mut document = use_signal(|| {
        Arc::new(match io::load_document(&content_path) {
            Ok(document) => document,
            Err(io::IoError::NotFound(_)) => Document::new(),
            Err(e) => {
                eprintln!("Error loading document {}: {e}", content_path.display());
                Document::new()
            }
        })
    });

    let mut focused = use_signal(|| None::<BlockId>);
    let mut save_error = use_signal(|| None::<String>);
    let grammars = use_signal(SharedGrammars::bundled);
    let registry = use_signal(BlockRegistry::with_defaults);
    let catalog = use_signal(MessageCatalog::new);

    let on_command = {
        let content_path = content_path.clone();
        move |cmd: Cmd| {
            update_document(&mut document, &mut save_error, &content_path, |doc| {
                doc.apply(cmd)
            });
        }
    };

    let on_enter = {
        let content_path = content_path.clone();
        move |block_id: BlockId| {
            // Look up the block's Enter handler before mutating
            let looked_up = {
                let doc = document.read();
                let Some(node) = doc.block(block_id) else {
                    return;
                };
                let handler = registry
                    .read()
                    .entry_matching(node)
                    .and_then(|entry| entry.handle_enter_key);
                (node.text_len(), handler)
            };
            let (text_len, enter_handler) = looked_up;

            let patch = update_document(&mut document, &mut save_error, &content_path, |doc| {
                doc.apply(Cmd::SetCaret {
                    block: block_id,
                    offset: text_len,
                });
                match enter_handler {
                    Some(handler) => handler(doc),
                    None => doc.apply(Cmd::InsertBlockAfter {
                        after: block_id,
                        kind: BlockKind::Paragraph,
                    }),
                }
            });

            if let Some(caret) = patch.caret {
                focused.set(Some(caret.block));
            }
        }
    };

    let on_input = {
        let content_path = content_path.clone();
        move |(block_id, value): (BlockId, String)| {
            let convert = {
                let doc = document.read();
                let reg = registry.read();
                snippet_conversion(&doc, &reg, block_id, &value)
            };
            let Some(convert) = convert else {
                return;
            };

            let patch = update_document(&mut document, &mut save_error, &content_path, |doc| {
                doc.apply(Cmd::SetCaret {
                    block: block_id,
                    offset: 0,
                });
                convert(doc)
            });

            if let Some(caret) = patch.caret {
                focused.set(Some(caret.block));
            }
        }
    };

    let on_convert = {
        let content_path = content_path.clone();
        move |key: String| {
            let target = {
                let Some(block_id) = *focused.read() else {
                    return;
                };
                registry
                    .read()
                    .entry_for_key(&key)
                    .map(|entry| (block_id, entry.handle_convert))
            };
            let Some((block_id, convert)) = target else {
                return;
            };

            let patch = update_document(&mut document, &mut save_error, &content_path, |doc| {
                doc.apply(Cmd::SetCaret {
                    block: block_id,
                    offset: 0,
                });
                convert(doc)
            });

            if let Some(caret) = patch.caret {
                focused.set(Some(caret.block));
            }
        }
    };

    rsx! {
        style { {MASON_CSS} }
        div {
            class: "app-container",
            header {
                class: "app-header",
                h1 { "mason" }
            }
            if let Some(error) = save_error.read().as_ref() {
                div {
                    class: "save-error",
                    "Saving failed: {error}"
                }
            }
            super::components::BlocksEditor {
                document: document.read().clone(),
                registry: registry.read().clone(),
                grammars: grammars.read().clone(),
                catalog: catalog.read().clone(),
                focused,
                on_command,
                on_enter,
                on_input,
                on_convert,
            }
        }
    }
}

/// Autoformat gate: a registered trigger typed into an otherwise-empty
/// paragraph selects that entry's conversion. The trigger text lives only
/// in the textarea and never lands in the document.
fn snippet_conversion(
    document: &Document,
    registry: &BlockRegistry,
    block: BlockId,
    value: &str,
) -> Option<fn(&mut Document) -> Patch> {
    let node = document.block(block)?;
    if !matches!(node.kind, BlockKind::Paragraph) || !node.plain_text().is_empty() {
        return None;
    }
    registry
        .entry_for_snippet(value)
        .map(|entry| entry.handle_convert)
}

/// Apply a mutation to the shared document with copy-on-write, then
/// auto-save. Save failures surface in the UI and clear on the next
/// successful write.
fn update_document(
    document: &mut Signal<Arc<Document>>,
    save_error: &mut Signal<Option<String>>,
    content_path: &Path,
    mutate: impl FnOnce(&mut Document) -> Patch,
) -> Patch {
    let mut document_arc = document.read().clone();
    let doc = Arc::make_mut(&mut document_arc);
    let patch = mutate(doc);

    match io::save_document(content_path, doc) {
        Ok(()) => {
            if save_error.read().is_some() {
                save_error.set(None);
            }
        }
        Err(e) => {
            log::error!("auto-save failed for {}: {e}", content_path.display());
            save_error.set(Some(e.to_string()));
        }
    }

    *document.write() = document_arc;
    patch
}
