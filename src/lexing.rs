//! Lexer
//!
//! Tokenization of C-family sources for the substitution engine.
//!
//! Structure:
//!     The lexemes are defined in [`tokens`] with the logos derive macro. The
//!     [`tokenizer`] adapter runs logos and produces [`SourceToken`]s: a
//!     [`TokenKind`] plus the exact slice of source it covers. The adapter is
//!     lossless, every byte of input belongs to exactly one token, and input
//!     logos rejects is kept as [`TokenKind::Other`] instead of being skipped.
//!
//! The grammar is deliberately flat. A preprocessor line is one
//! [`TokenKind::Directive`] token from `#` to the end of the line, and
//! comments, string and character literals are single tokens, so names
//! inside them are never seen as names.

pub mod detokenizer;
pub mod tokenizer;
pub mod tokens;

pub use detokenizer::detokenize;
pub use tokenizer::{tokenize, SourceToken};
pub use tokens::{Token, TokenKind};

/// 1-based line and column (in characters) of a byte offset in `source`
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
    let prefix = &source[..offset.min(source.len())];
    let line = prefix.matches('\n').count() + 1;
    let line_start = prefix.rfind('\n').map_or(0, |index| index + 1);
    let column = prefix[line_start..].chars().count() + 1;
    (line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_column() {
        let source = "ab\ncd\n  #x";
        assert_eq!(line_column(source, 0), (1, 1));
        assert_eq!(line_column(source, 1), (1, 2));
        assert_eq!(line_column(source, 3), (2, 1));
        assert_eq!(line_column(source, 8), (3, 3));
    }

    #[test]
    fn test_line_column_counts_characters() {
        let source = "é = x";
        assert_eq!(line_column(source, "é = ".len()), (1, 5));
    }
}
