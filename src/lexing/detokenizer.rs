//! Detokenizer
//!
//! Converts a token stream back into source text.
use crate::lexing::tokenizer::SourceToken;

/// Concatenate token texts. For a stream produced by
/// [`tokenize`](crate::lexing::tokenize) this is the original source.
pub fn detokenize(tokens: &[SourceToken<'_>]) -> String {
    let mut result = String::with_capacity(tokens.iter().map(|token| token.text.len()).sum());
    for token in tokens {
        result.push_str(token.text);
    }
    result
}
