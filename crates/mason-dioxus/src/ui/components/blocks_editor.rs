use dioxus::html::Key;
use dioxus::prelude::*;
use mason_engine::{BlockId, Cmd, Document};
use std::sync::Arc;

use crate::ui::components::Toolbar;
use crate::ui::i18n::MessageCatalog;
use crate::ui::registry::{BlockProps, BlockRegistry, SharedGrammars};

/// Document area: toolbar plus one rendered slot per block, dispatched
/// through the registry. Keyboard navigation applies while no block holds
/// focus; a focused block owns its own key handling.
#[component]
pub fn BlocksEditor(
    document: Arc<Document>,
    registry: BlockRegistry,
    grammars: SharedGrammars,
    catalog: MessageCatalog,
    focused: Signal<Option<BlockId>>,
    on_command: Callback<Cmd>,
    on_enter: Callback<BlockId>,
    on_input: Callback<(BlockId, String)>,
    on_convert: Callback<String>,
) -> Element {
    let mut focused = focused;
    let mut navigate_to_block = create_navigation_handler(focused, document.clone());
    let focused_id = *focused.read();

    let on_focus = Callback::new(move |target: Option<BlockId>| {
        focused.set(target);
    });

    let active_key = focused_id
        .and_then(|id| document.block(id))
        .and_then(|block| registry.entry_matching(block))
        .map(|entry| entry.key.to_string())
        .unwrap_or_else(|| "paragraph".to_string());

    // Render each block through its registry entry, falling back to the
    // paragraph entry for anything unmatched.
    let children: Vec<(String, Element)> = document
        .blocks()
        .iter()
        .map(|block| {
            let entry = registry
                .entry_matching(block)
                .or_else(|| registry.entry_for_key("paragraph"));
            let rendered = match entry {
                Some(entry) => (entry.render)(BlockProps {
                    block: block.clone(),
                    focused: focused_id == Some(block.id),
                    grammars: grammars.clone(),
                    catalog: catalog.clone(),
                    on_command,
                    on_enter,
                    on_focus,
                    on_input,
                }),
                None => rsx! {},
            };
            (block.id.to_string(), rendered)
        })
        .collect();

    // Clone values before using in RSX
    let document_for_keydown = document.clone();

    rsx! {
        div {
            class: "blocks-editor",
            tabindex: "0",
            onkeydown: {
                move |event| {
                    handle_editor_keydown(
                        event,
                        &mut focused,
                        &document_for_keydown,
                        &mut navigate_to_block,
                    );
                }
            },
            Toolbar {
                registry: registry.clone(),
                catalog: catalog.clone(),
                active_key,
                has_focus: focused_id.is_some(),
                on_convert,
            }
            div {
                class: "blocks-content",
                for (key, child) in children {
                    div {
                        key: "{key}",
                        class: "block-slot",
                        {child}
                    }
                }
            }
        }
    }
}

fn create_navigation_handler(
    mut focused: Signal<Option<BlockId>>,
    document: Arc<Document>,
) -> impl FnMut(i32) {
    move |direction: i32| {
        navigate_block(&document, &mut focused, direction);
    }
}

fn navigate_block(document: &Document, focused: &mut Signal<Option<BlockId>>, direction: i32) {
    if document.blocks().is_empty() {
        return;
    }

    let current_focus = *focused.read();

    if let Some(current_id) = current_focus {
        navigate_from_current_focus(document, focused, current_id, direction);
        return;
    }

    focus_first_or_last_block(document, focused, direction);
}

fn navigate_from_current_focus(
    document: &Document,
    focused: &mut Signal<Option<BlockId>>,
    current_id: BlockId,
    direction: i32,
) {
    let Some(current_index) = document.blocks().iter().position(|b| b.id == current_id) else {
        return;
    };

    let next_index = (current_index as i32 + direction).max(0) as usize;
    if next_index < document.blocks().len() {
        focused.set(Some(document.blocks()[next_index].id));
    }
}

fn focus_first_or_last_block(
    document: &Document,
    focused: &mut Signal<Option<BlockId>>,
    direction: i32,
) {
    let index = if direction > 0 {
        0
    } else {
        document.blocks().len() - 1
    };
    focused.set(Some(document.blocks()[index].id));
}

fn handle_editor_keydown(
    event: Event<KeyboardData>,
    focused: &mut Signal<Option<BlockId>>,
    document: &Document,
    navigate_to_block: &mut impl FnMut(i32),
) {
    // A focused block handles its own keys
    if focused.read().is_some() {
        return;
    }

    match event.key() {
        Key::Tab => handle_tab_navigation(event, navigate_to_block),
        Key::Enter => focus_first_block(focused, document),
        Key::ArrowDown => handle_arrow_navigation(event, navigate_to_block, 1),
        Key::ArrowUp => handle_arrow_navigation(event, navigate_to_block, -1),
        _ => {}
    }
}

fn handle_tab_navigation(event: Event<KeyboardData>, navigate_to_block: &mut impl FnMut(i32)) {
    event.prevent_default();
    let direction = if event.modifiers().shift() { -1 } else { 1 };
    navigate_to_block(direction);
}

fn focus_first_block(focused: &mut Signal<Option<BlockId>>, document: &Document) {
    if !document.blocks().is_empty() {
        focused.set(Some(document.blocks()[0].id));
    }
}

fn handle_arrow_navigation(
    event: Event<KeyboardData>,
    navigate_to_block: &mut impl FnMut(i32),
    direction: i32,
) {
    event.prevent_default();
    navigate_to_block(direction);
}
