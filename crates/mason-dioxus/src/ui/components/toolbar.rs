use dioxus::prelude::*;

use crate::ui::i18n::{MessageCatalog, SELECT_BLOCK};
use crate::ui::registry::BlockRegistry;

/// Block-type selector, built from the registry entries that opted into the
/// selector. Disabled until a block holds focus.
#[component]
pub fn Toolbar(
    registry: BlockRegistry,
    catalog: MessageCatalog,
    active_key: String,
    has_focus: bool,
    on_convert: Callback<String>,
) -> Element {
    let selector_label = catalog.format(&SELECT_BLOCK);
    let options: Vec<(String, String, bool)> = registry
        .entries()
        .iter()
        .filter(|entry| entry.in_blocks_selector)
        .map(|entry| {
            (
                entry.key.to_string(),
                format!("{} {}", entry.icon, catalog.format(&entry.label)),
                entry.key == active_key,
            )
        })
        .collect();

    rsx! {
        div {
            class: "blocks-toolbar",
            select {
                aria_label: "{selector_label}",
                disabled: !has_focus,
                value: "{active_key}",
                onchange: move |event: Event<FormData>| {
                    on_convert.call(event.value());
                },
                for (key, label, selected) in options {
                    option {
                        key: "{key}",
                        value: "{key}",
                        selected,
                        "{label}"
                    }
                }
            }
        }
    }
}
