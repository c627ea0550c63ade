use dioxus::prelude::*;
use mason_engine::{BlockId, BlockNode};

#[component]
pub fn Heading(block: BlockNode, on_focus: Callback<Option<BlockId>>) -> Element {
    let level = match block.kind {
        mason_engine::BlockKind::Heading { level } => u32::from(level),
        _ => 2,
    };
    let class_name = format!("heading level-{level} clickable-block");
    let text = block.plain_text();
    let block_id = block.id;

    let content_element = rsx! { "{text}" };

    match level {
        1 => {
            rsx! { h1 { class: "{class_name}", onclick: move |_| on_focus.call(Some(block_id)), {content_element} } }
        }
        2 => {
            rsx! { h2 { class: "{class_name}", onclick: move |_| on_focus.call(Some(block_id)), {content_element} } }
        }
        3 => {
            rsx! { h3 { class: "{class_name}", onclick: move |_| on_focus.call(Some(block_id)), {content_element} } }
        }
        4 => {
            rsx! { h4 { class: "{class_name}", onclick: move |_| on_focus.call(Some(block_id)), {content_element} } }
        }
        5 => {
            rsx! { h5 { class: "{class_name}", onclick: move |_| on_focus.call(Some(block_id)), {content_element} } }
        }
        _ => {
            rsx! { h6 { class: "{class_name}", onclick: move |_| on_focus.call(Some(block_id)), {content_element} } }
        }
    }
}
