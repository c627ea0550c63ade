use dioxus::html::Key;
use dioxus::prelude::*;
use mason_engine::{BlockId, BlockNode, CODE_LANGUAGES, Cmd, HighlightRange, decorate_code};

use crate::ui::components::editor_area::calculate_textarea_rows;
use crate::ui::i18n::SELECT_LANGUAGE;
use crate::ui::registry::{BlockProps, SharedGrammars};

/// Code block with a language picker.
///
/// The picker shows while the block holds the editor focus, or while it is
/// explicitly held open; closing it hands focus back to the text surface.
#[component]
pub fn CodeBlock(props: BlockProps) -> Element {
    let mut picker_open = use_signal(|| false);
    let show_picker = props.focused || *picker_open.read();
    let block_id = props.block.id;
    let language_value = props.block.language().unwrap_or("plaintext").to_string();
    let picker_label = props.catalog.format(&SELECT_LANGUAGE);
    let on_command = props.on_command;
    let on_focus = props.on_focus;

    rsx! {
        div {
            class: "code-block-wrapper",
            if props.focused {
                CodeEditorArea {
                    block: props.block.clone(),
                    on_command,
                    on_enter: props.on_enter,
                    on_focus,
                }
            } else {
                CodeView {
                    block: props.block.clone(),
                    grammars: props.grammars.clone(),
                    on_focus,
                }
            }
            if show_picker {
                div {
                    class: "code-language-picker",
                    select {
                        aria_label: "{picker_label}",
                        value: "{language_value}",
                        onfocus: move |_| picker_open.set(true),
                        onblur: move |_| {
                            // Hand focus back to the text surface, not the picker
                            picker_open.set(false);
                            on_focus.call(Some(block_id));
                        },
                        onchange: move |event: Event<FormData>| {
                            on_command.call(Cmd::SetCodeLanguage {
                                block: block_id,
                                language: event.value(),
                            });
                        },
                        for lang in CODE_LANGUAGES.iter() {
                            option {
                                value: "{lang.value}",
                                selected: lang.value == language_value,
                                "{lang.label}"
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Read-only rendering: decoration runs on every render, straight from the
/// node text, with classified spans wrapped in `span.token.<category>`.
#[component]
fn CodeView(
    block: BlockNode,
    grammars: SharedGrammars,
    on_focus: Callback<Option<BlockId>>,
) -> Element {
    let text = block.plain_text();
    let ranges = decorate_code(&block, &grammars);
    let spans = highlighted_spans(&text, &ranges);
    let code_class = block
        .language()
        .map(|l| format!("language-{l}"))
        .unwrap_or_else(|| "language-plaintext".to_string());
    let block_id = block.id;

    rsx! {
        pre {
            class: "code-block clickable-block",
            onclick: move |_| on_focus.call(Some(block_id)),
            code {
                class: "{code_class}",
                for (class_name, segment) in spans {
                    if class_name.is_empty() {
                        span { "{segment}" }
                    } else {
                        span { class: "{class_name}", "{segment}" }
                    }
                }
            }
        }
    }
}

/// Editable surface for a focused code block.
///
/// Content is edited locally and committed on blur, Escape and block exit.
/// A newline appended at the very end arms the exit: the next plain Enter
/// hands the block to the shared Enter policy instead of typing another
/// newline.
#[component]
fn CodeEditorArea(
    block: BlockNode,
    on_command: Callback<Cmd>,
    on_enter: Callback<BlockId>,
    on_focus: Callback<Option<BlockId>>,
) -> Element {
    let content_text = block.plain_text();
    let local_content = use_signal(|| content_text.clone());
    let mut armed_exit = use_signal(|| false);
    let block_id = block.id;

    let commit_changes = move || {
        let current_text = local_content.read().clone();
        on_command.call(Cmd::SetText {
            block: block_id,
            text: current_text,
        });
    };

    rsx! {
        textarea {
            class: "code-editor-area",
            value: local_content.read().clone(),
            spellcheck: false,
            rows: calculate_textarea_rows(&local_content.read()),
            autofocus: true,

            oninput: {
                let mut local_content = local_content;
                move |event: Event<FormData>| {
                    let value = event.value();
                    let previous = local_content.read().clone();
                    armed_exit.set(is_trailing_newline_append(&previous, &value));
                    local_content.set(value);
                }
            },

            onkeydown: move |event: Event<KeyboardData>| {
                handle_code_keydown(
                    event,
                    block_id,
                    &mut armed_exit,
                    &commit_changes,
                    &on_enter,
                    &on_focus,
                );
            },

            onblur: move |_| {
                commit_changes();
            },
        }
    }
}

fn handle_code_keydown(
    event: Event<KeyboardData>,
    block_id: BlockId,
    armed_exit: &mut Signal<bool>,
    commit_changes: &impl Fn(),
    on_enter: &Callback<BlockId>,
    on_focus: &Callback<Option<BlockId>>,
) {
    match event.key() {
        Key::Enter => {
            // Shift+Enter always types a newline
            if event.modifiers().shift() {
                return;
            }
            // Only the second consecutive Enter at the end of the text exits;
            // the first one falls through to the default newline.
            if *armed_exit.read() {
                event.prevent_default();
                armed_exit.set(false);
                commit_changes();
                on_enter.call(block_id);
            }
        }
        Key::Escape => {
            commit_changes();
            on_focus.call(None);
        }
        _ => {}
    }
}

/// Whether `current` is exactly `previous` with one newline appended at the
/// end, which is what pressing Enter at the end of a textarea produces.
fn is_trailing_newline_append(previous: &str, current: &str) -> bool {
    current.strip_suffix('\n') == Some(previous)
}

/// Split `text` into `(class, segment)` runs: classified ranges become
/// `token <category>` spans, the gaps between them carry an empty class.
pub(crate) fn highlighted_spans(text: &str, ranges: &[HighlightRange]) -> Vec<(String, String)> {
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    for range in ranges {
        if range.range.start > cursor {
            spans.push((String::new(), text[cursor..range.range.start].to_string()));
        }
        spans.push((
            format!("token {}", range.category),
            text[range.range.clone()].to_string(),
        ));
        cursor = range.range.end;
    }
    if cursor < text.len() {
        spans.push((String::new(), text[cursor..].to_string()));
    }
    spans
}
