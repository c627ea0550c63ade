use dioxus::prelude::*;
use mason_engine::{BlockId, BlockNode};

#[component]
pub fn Paragraph(block: BlockNode, on_focus: Callback<Option<BlockId>>) -> Element {
    let text = block.plain_text();
    let block_id = block.id;

    rsx! {
        p {
            class: "paragraph clickable-block",
            onclick: move |_| on_focus.call(Some(block_id)),
            "{text}"
        }
    }
}
