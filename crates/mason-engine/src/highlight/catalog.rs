//! Static catalog of selectable code-block languages.
//!
//! Each entry maps a display label to the identifier stored on the node
//! (`value`) and, where the grammar set names it differently, an explicit
//! lookup override (`grammar`). Lookup of an identifier not listed here is
//! not an error; grammar resolution falls back to plain text downstream.

/// One selectable language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDescriptor {
    /// Identifier stored on code nodes and used for UI selection.
    pub value: &'static str,
    /// Human-readable label shown in the picker.
    pub label: &'static str,
    /// Override for grammar lookup when it differs from `value`.
    pub grammar: Option<&'static str>,
}

const fn lang(value: &'static str, label: &'static str) -> LanguageDescriptor {
    LanguageDescriptor {
        value,
        label,
        grammar: None,
    }
}

const fn lang_with_grammar(
    value: &'static str,
    label: &'static str,
    grammar: &'static str,
) -> LanguageDescriptor {
    LanguageDescriptor {
        value,
        label,
        grammar: Some(grammar),
    }
}

/// Ordered list backing the language picker: plain text first, then
/// alphabetical by label. Loaded once; never mutated.
pub const CODE_LANGUAGES: &[LanguageDescriptor] = &[
    lang("plaintext", "Plain text"),
    lang("asmatmel", "AVR Assembly"),
    lang("basic", "BASIC"),
    lang("bash", "Bash"),
    lang("c", "C"),
    lang_with_grammar("csharp", "C#", "cs"),
    lang("cpp", "C++"),
    lang("cobol", "COBOL"),
    lang("clojure", "Clojure"),
    lang("dart", "Dart"),
    lang("docker", "Dockerfile"),
    lang("elixir", "Elixir"),
    lang("erlang", "Erlang"),
    lang("fsharp", "F#"),
    lang("fortran", "Fortran"),
    lang("go", "Go"),
    lang("graphql", "GraphQL"),
    lang("groovy", "Groovy"),
    lang("haskell", "Haskell"),
    lang("haxe", "Haxe"),
    lang("ini", "INI"),
    lang("json", "JSON"),
    lang("jsx", "JSX"),
    lang("java", "Java"),
    lang("javascript", "JavaScript"),
    lang("julia", "Julia"),
    lang("kotlin", "Kotlin"),
    lang("latex", "LaTeX"),
    lang("lua", "Lua"),
    lang("matlab", "MATLAB"),
    lang("makefile", "Makefile"),
    lang("markdown", "Markdown"),
    lang_with_grammar("objectivec", "Objective-C", "objective-c"),
    lang("php", "PHP"),
    lang("perl", "Perl"),
    lang("powershell", "PowerShell"),
    lang("python", "Python"),
    lang("r", "R"),
    lang("ruby", "Ruby"),
    lang("rust", "Rust"),
    lang("sas", "SAS"),
    lang("sql", "SQL"),
    lang("scala", "Scala"),
    lang("scheme", "Scheme"),
    lang("stata", "Stata"),
    lang("swift", "Swift"),
    lang("tsx", "TSX"),
    lang("typescript", "TypeScript"),
    lang("vbnet", "VB.NET"),
    lang("yaml", "YAML"),
];

/// Look up a catalog entry by its selection identifier.
pub fn find_language(value: &str) -> Option<&'static LanguageDescriptor> {
    CODE_LANGUAGES.iter().find(|l| l.value == value)
}

/// Grammar lookup token for a selection identifier: the configured
/// override, otherwise the identifier itself (also for identifiers not in
/// the catalog; resolution degrades later, not here).
pub fn grammar_token(value: &str) -> &str {
    match find_language(value) {
        Some(descriptor) => descriptor.grammar.unwrap_or(descriptor.value),
        None => value,
    }
}
