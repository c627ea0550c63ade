/*!
 * Code-block highlighting: language catalog, grammar registry and the
 * tokenize-to-ranges decoration pass.
 *
 * The pipeline is deliberately stateless. [`decorate_code`] flattens a
 * code block's text children, resolves the selected language through the
 * static [`catalog`] into a grammar held by a [`GrammarRegistry`], and
 * walks the tokenizer output left to right emitting half-open
 * [`HighlightRange`]s for typed spans only.
 *
 * Failure is not part of the surface: non-code nodes decorate to an
 * empty list, and unknown or unset languages degrade to the plain-text
 * grammar (which classifies nothing).
 */

pub mod catalog;
pub mod decorate;
pub mod grammars;
pub mod tokenize;

pub use catalog::{CODE_LANGUAGES, LanguageDescriptor, find_language, grammar_token};
pub use decorate::{HighlightRange, decorate_code};
pub use grammars::GrammarRegistry;
pub use tokenize::{TokenSegment, tokenize};
