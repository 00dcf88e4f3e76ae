//! Tokenizer adapter
//!
//! Runs the logos lexer and turns its output into [`SourceToken`]s that cover
//! the whole input. Lexer errors and any byte range logos did not report
//! become [`TokenKind::Other`] tokens, so nothing is ever dropped.

use crate::lexing::tokens::{Token, TokenKind};
use logos::Logos;
use std::ops::Range;

/// A categorized slice of the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceToken<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
}

impl<'a> SourceToken<'a> {
    fn new(kind: TokenKind, source: &'a str, span: Range<usize>) -> Self {
        SourceToken {
            kind,
            text: &source[span.clone()],
            span,
        }
    }
}

/// Tokenize a source string. Concatenating the token texts gives back
/// `source`, and no token is empty.
pub fn tokenize(source: &str) -> Vec<SourceToken<'_>> {
    let mut lexer = Token::lexer(source);
    let mut tokens: Vec<SourceToken<'_>> = Vec::new();
    let mut cursor = 0;

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        if span.start > cursor {
            push_token(&mut tokens, source, TokenKind::Other, cursor..span.start);
        }
        let kind = match result {
            Ok(token) => token.kind(lexer.slice()),
            Err(()) => TokenKind::Other,
        };
        cursor = span.end;
        push_token(&mut tokens, source, kind, span);
    }

    if cursor < source.len() {
        push_token(&mut tokens, source, TokenKind::Other, cursor..source.len());
    }

    tokens
}

fn push_token<'a>(
    tokens: &mut Vec<SourceToken<'a>>,
    source: &'a str,
    kind: TokenKind,
    span: Range<usize>,
) {
    if span.is_empty() {
        return;
    }
    // Runs of unrecognized input are reported as one token
    if kind == TokenKind::Other {
        if let Some(last) = tokens.last_mut() {
            if last.kind == TokenKind::Other && last.span.end == span.start {
                *last = SourceToken::new(TokenKind::Other, source, last.span.start..span.end);
                return;
            }
        }
    }
    tokens.push(SourceToken::new(kind, source, span));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_simple_tokenization() {
        let tokens = tokenize("a+b;");
        assert_eq!(
            tokens,
            vec![
                SourceToken { kind: TokenKind::Name, text: "a", span: 0..1 },
                SourceToken { kind: TokenKind::Punctuation, text: "+", span: 1..2 },
                SourceToken { kind: TokenKind::Name, text: "b", span: 2..3 },
                SourceToken { kind: TokenKind::Punctuation, text: ";", span: 3..4 },
            ]
        );
    }

    #[test]
    fn test_newline_bearing_whitespace() {
        assert_eq!(
            tokenize("x \n\ty")
                .iter()
                .map(|token| token.kind)
                .collect::<Vec<_>>(),
            vec![TokenKind::Name, TokenKind::Newline, TokenKind::Name]
        );
    }

    #[test]
    fn test_unrecognized_run_is_one_token() {
        let tokens = tokenize("a @@` b");
        let other: Vec<_> = tokens
            .iter()
            .filter(|token| token.kind == TokenKind::Other)
            .collect();
        assert_eq!(other.len(), 1);
        assert_eq!(other[0].text, "@@`");
    }

    #[test]
    fn test_unterminated_string_is_not_dropped() {
        let source = "x = \"open";
        let tokens = tokenize(source);
        let joined: String = tokens.iter().map(|token| token.text).collect();
        assert_eq!(joined, source);
        assert!(tokens.iter().any(|token| token.kind == TokenKind::Other));
    }

    #[test]
    fn test_spans_are_contiguous() {
        let source = "int main(void) { return 0; } /* end */\n";
        let tokens = tokenize(source);
        let mut cursor = 0;
        for token in &tokens {
            assert_eq!(token.span.start, cursor);
            assert!(!token.text.is_empty());
            cursor = token.span.end;
        }
        assert_eq!(cursor, source.len());
    }
}
