//! Message lookup for user-visible strings.
//!
//! Every label ships with a fixed id and a literal default, so a translation
//! bundle can override any string without touching component code. Only the
//! lookup indirection lives here; locale negotiation does not.

use std::collections::HashMap;

/// A translatable message: stable id plus the default text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageDescriptor {
    pub id: &'static str,
    pub default_message: &'static str,
}

pub const fn msg(id: &'static str, default_message: &'static str) -> MessageDescriptor {
    MessageDescriptor {
        id,
        default_message,
    }
}

/// Picker label for the code block's language dropdown.
pub const SELECT_LANGUAGE: MessageDescriptor = msg(
    "components.Blocks.blocks.code.languageLabel",
    "Select a language",
);

/// Label for the toolbar's block-type selector.
pub const SELECT_BLOCK: MessageDescriptor =
    msg("components.Blocks.blocks.selector.label", "Select a block");

/// Resolves descriptors to display strings, preferring overrides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageCatalog {
    overrides: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            overrides: overrides.into_iter().collect(),
        }
    }

    pub fn format(&self, descriptor: &MessageDescriptor) -> String {
        self.overrides
            .get(descriptor.id)
            .cloned()
            .unwrap_or_else(|| descriptor.default_message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_falls_back_to_default_message() {
        let catalog = MessageCatalog::new();
        assert_eq!(catalog.format(&SELECT_LANGUAGE), "Select a language");
    }

    #[test]
    fn test_format_prefers_override() {
        let catalog = MessageCatalog::with_overrides([(
            "components.Blocks.blocks.code.languageLabel".to_string(),
            "Sprache wählen".to_string(),
        )]);
        assert_eq!(catalog.format(&SELECT_LANGUAGE), "Sprache wählen");
    }

    #[test]
    fn test_unrelated_override_does_not_leak() {
        let catalog = MessageCatalog::with_overrides([(
            "components.Blocks.blocks.other".to_string(),
            "Other".to_string(),
        )]);
        assert_eq!(catalog.format(&SELECT_BLOCK), "Select a block");
    }
}
