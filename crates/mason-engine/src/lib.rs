pub mod blocks;
pub mod editing;
pub mod highlight;
pub mod io;


// Re-export key types for easier usage
pub use blocks::{BlockId, BlockKind, BlockNode, Inline};
pub use editing::{Caret, Cmd, Document, DocumentError, Patch, press_enter_twice_to_exit};
pub use highlight::{
    CODE_LANGUAGES, GrammarRegistry, HighlightRange, LanguageDescriptor, decorate_code,
    find_language, grammar_token,
};
pub use io::*;
