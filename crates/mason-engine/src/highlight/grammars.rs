use crate::highlight::catalog::grammar_token;
use syntect::parsing::{SyntaxReference, SyntaxSet, SyntaxSetBuilder};

/// The grammar set used for tokenization.
///
/// Loading grammars is an explicit startup step: the application builds one
/// registry and shares it for its lifetime. Nothing loads at import time,
/// and callers that need control over the available grammars (a fixed plain
/// text baseline, say) can use [`GrammarRegistry::minimal`].
pub struct GrammarRegistry {
    syntaxes: SyntaxSet,
}

impl GrammarRegistry {
    /// Registry backed by the full bundled grammar set.
    pub fn bundled() -> Self {
        Self {
            syntaxes: SyntaxSet::load_defaults_newlines(),
        }
    }

    /// Registry containing only the plain-text grammar.
    pub fn minimal() -> Self {
        let mut builder = SyntaxSetBuilder::new();
        builder.add_plain_text_syntax();
        Self {
            syntaxes: builder.build(),
        }
    }

    pub fn syntax_set(&self) -> &SyntaxSet {
        &self.syntaxes
    }

    pub fn plain_text(&self) -> &SyntaxReference {
        self.syntaxes.find_syntax_plain_text()
    }

    /// Resolve a selected language to a grammar.
    ///
    /// The selection identifier maps through the catalog to a lookup token;
    /// identifiers without a matching grammar (and unset languages) resolve
    /// to plain text rather than an error.
    pub fn resolve(&self, language: Option<&str>) -> &SyntaxReference {
        language
            .and_then(|value| self.syntaxes.find_syntax_by_token(grammar_token(value)))
            .unwrap_or_else(|| self.syntaxes.find_syntax_plain_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("javascript"), "JavaScript")]
    #[case(Some("rust"), "Rust")]
    #[case(Some("cpp"), "C++")]
    #[case(Some("csharp"), "C#")] // resolved through the catalog override
    #[case(Some("plaintext"), "Plain Text")]
    #[case(Some("klingon"), "Plain Text")]
    #[case(None, "Plain Text")]
    fn test_bundled_resolution(#[case] language: Option<&str>, #[case] grammar_name: &str) {
        let registry = GrammarRegistry::bundled();
        assert_eq!(registry.resolve(language).name, grammar_name);
    }

    #[test]
    fn test_minimal_registry_resolves_everything_to_plain_text() {
        let registry = GrammarRegistry::minimal();
        assert_eq!(registry.resolve(Some("javascript")).name, "Plain Text");
        assert_eq!(registry.resolve(Some("rust")).name, "Plain Text");
        assert_eq!(registry.resolve(None).name, "Plain Text");
    }

    #[test]
    fn test_plain_text_accessor() {
        assert_eq!(GrammarRegistry::minimal().plain_text().name, "Plain Text");
    }
}
