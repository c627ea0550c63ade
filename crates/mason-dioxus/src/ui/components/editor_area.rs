use dioxus::html::Key;
use dioxus::prelude::*;
use mason_engine::{BlockId, BlockNode, Cmd};

/// Editable surface for text-like blocks while they hold focus.
///
/// Content is edited locally in the textarea and committed to the document
/// on blur, Enter and Escape. Every input change is also reported upward so
/// the editor can watch for autoformat triggers.
#[component]
pub fn EditorArea(
    block: BlockNode,
    on_command: Callback<Cmd>,
    on_enter: Callback<BlockId>,
    on_focus: Callback<Option<BlockId>>,
    on_input: Callback<(BlockId, String)>,
) -> Element {
    let content_text = block.plain_text();
    let local_content = use_signal(|| content_text.clone());
    let block_id = block.id;

    // Helper to commit current changes to the document
    let commit_changes = move || {
        let current_text = local_content.read().clone();
        on_command.call(Cmd::SetText {
            block: block_id,
            text: current_text,
        });
    };

    rsx! {
        textarea {
            class: "editor-area",
            value: local_content.read().clone(),
            spellcheck: false,
            rows: calculate_textarea_rows(&local_content.read()),
            autofocus: true,

            oninput: {
                let mut local_content = local_content;
                move |event: Event<FormData>| {
                    let value = event.value();
                    local_content.set(value.clone());
                    on_input.call((block_id, value));
                }
            },

            onkeydown: move |event: Event<KeyboardData>| {
                handle_text_keydown(event, block_id, &commit_changes, &on_enter, &on_focus);
            },

            // Commit changes when focus is lost
            onblur: move |_| {
                commit_changes();
            },
        }
    }
}

/// Rows for the textarea based on content, capped to keep blocks compact
pub(crate) fn calculate_textarea_rows(content: &str) -> u32 {
    let line_count = content.lines().count().max(1);
    (line_count as u32).min(20)
}

fn handle_text_keydown(
    event: Event<KeyboardData>,
    block_id: BlockId,
    commit_changes: &impl Fn(),
    on_enter: &Callback<BlockId>,
    on_focus: &Callback<Option<BlockId>>,
) {
    match event.key() {
        Key::Enter => {
            // Shift+Enter keeps the default newline behavior
            if event.modifiers().shift() {
                return;
            }
            event.prevent_default();
            commit_changes();
            on_enter.call(block_id);
        }
        Key::Escape => {
            commit_changes();
            on_focus.call(None);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_textarea_rows() {
        assert_eq!(calculate_textarea_rows("Single line"), 1);

        let multi_line = "Line 1\nLine 2\nLine 3";
        assert_eq!(calculate_textarea_rows(multi_line), 3);

        assert_eq!(calculate_textarea_rows(""), 1);

        let long_content = "Line\n".repeat(30);
        assert_eq!(calculate_textarea_rows(&long_content), 20);
    }
}
