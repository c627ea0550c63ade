use syntect::parsing::{ParseState, ScopeStack, SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

/// One run of tokenizer output. Lengths are in bytes; the segments for a
/// given input cover it exactly, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSegment {
    /// Span carrying no grammar classification.
    Plain { len: usize },
    /// Classified span with an opaque category label.
    Token { category: String, len: usize },
}

impl TokenSegment {
    pub fn len(&self) -> usize {
        match self {
            Self::Plain { len } | Self::Token { len, .. } => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn category(&self) -> Option<&str> {
        match self {
            Self::Token { category, .. } => Some(category),
            Self::Plain { .. } => None,
        }
    }
}

/// Tokenize `text` with a grammar into ordered segments.
///
/// The grammar's scope operations split each line into regions; a region
/// classified beyond the grammar's base scope becomes a `Token` labeled
/// with the innermost scope's leading atom (`keyword`, `string`, …), the
/// rest stay `Plain`. Lines the parser rejects degrade to `Plain` whole.
pub fn tokenize(text: &str, syntax: &SyntaxReference, set: &SyntaxSet) -> Vec<TokenSegment> {
    let mut segments = Vec::new();
    let mut state = ParseState::new(syntax);
    let mut stack = ScopeStack::new();
    for line in LinesWithEndings::from(text) {
        let Ok(ops) = state.parse_line(line, set) else {
            push_plain(&mut segments, line.len());
            continue;
        };
        let mut pos = 0usize;
        for (next, op) in &ops {
            if *next > pos {
                push_segment(&mut segments, &stack, *next - pos);
                pos = *next;
            }
            // A stack underflow here only degrades classification.
            let _ = stack.apply(op);
        }
        if line.len() > pos {
            push_segment(&mut segments, &stack, line.len() - pos);
        }
    }
    segments
}

fn push_segment(segments: &mut Vec<TokenSegment>, stack: &ScopeStack, len: usize) {
    match category_for(stack) {
        Some(category) => segments.push(TokenSegment::Token { category, len }),
        None => push_plain(segments, len),
    }
}

fn push_plain(segments: &mut Vec<TokenSegment>, len: usize) {
    if len == 0 {
        return;
    }
    if let Some(TokenSegment::Plain { len: last }) = segments.last_mut() {
        *last += len;
        return;
    }
    segments.push(TokenSegment::Plain { len });
}

/// Category label for a region: the leading atom of the innermost
/// non-`meta` scope above the base scope. Regions carrying only the base
/// scope (or meta scopes) are unclassified.
fn category_for(stack: &ScopeStack) -> Option<String> {
    for scope in stack.as_slice().iter().skip(1).rev() {
        let name = scope.build_string();
        let atom = name.split('.').next().unwrap_or("");
        if atom.is_empty() || atom == "meta" {
            continue;
        }
        return Some(atom.to_string());
    }
    None
}
