use dioxus::prelude::*;
use mason_engine::{BlockId, BlockNode};

#[component]
pub fn Quote(block: BlockNode, on_focus: Callback<Option<BlockId>>) -> Element {
    let text = block.plain_text();
    let block_id = block.id;

    rsx! {
        blockquote {
            class: "quote clickable-block",
            onclick: move |_| on_focus.call(Some(block_id)),
            "{text}"
        }
    }
}
