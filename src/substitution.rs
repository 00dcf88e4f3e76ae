//! Substitution engine
//!
//! Walks the token stream of a source and builds the output text:
//!
//! - whitespace without a line break, comments, literals and punctuation are
//!   copied verbatim;
//! - names and keywords found in the [`MappingTable`] are replaced by their
//!   replacement text, or dropped when it is empty; unmapped ones are copied;
//! - newline-bearing whitespace is copied, so line numbers stay put;
//! - anything else (preprocessor directives, unrecognized input) aborts with
//!   [`SubstitutionError::UnhandledToken`].
//!
//! Every token, including the first one, goes through the same rule. The
//! engine is a pure function of the table and the source.

use crate::lexing::{line_column, tokenize, TokenKind};
use crate::mapping::MappingTable;
use std::fmt;

/// Result of a successful substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
    pub output: String,
    /// Tokens replaced by a non-empty text
    pub replaced: usize,
    /// Tokens removed
    pub deleted: usize,
}

/// Errors that can occur during substitution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubstitutionError {
    /// A token the engine has no rule for
    UnhandledToken {
        kind: TokenKind,
        text: String,
        line: usize,
        column: usize,
        /// Output accumulated before the offending token
        partial_output: String,
    },
}

impl fmt::Display for SubstitutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionError::UnhandledToken {
                kind,
                text,
                line,
                column,
                partial_output,
            } => write!(
                f,
                "unhandled {} token {:?} at {}:{} (after {} bytes of output)",
                kind,
                text,
                line,
                column,
                partial_output.len()
            ),
        }
    }
}

impl std::error::Error for SubstitutionError {}

/// Apply `table` to `source`
pub fn substitute(table: &MappingTable, source: &str) -> Result<Substitution, SubstitutionError> {
    let mut output = String::with_capacity(source.len());
    let mut replaced = 0;
    let mut deleted = 0;

    for token in tokenize(source) {
        match token.kind {
            kind if kind.is_junk() => output.push_str(token.text),
            TokenKind::Name | TokenKind::Keyword => match table.lookup(token.text) {
                None => output.push_str(token.text),
                Some(replacement) if replacement.removes_token() => {
                    tracing::trace!(name = token.text, offset = token.span.start, "deleted");
                    deleted += 1;
                }
                Some(replacement) => {
                    tracing::trace!(
                        name = token.text,
                        offset = token.span.start,
                        with = replacement.as_str(),
                        "replaced"
                    );
                    output.push_str(replacement.as_str());
                    replaced += 1;
                }
            },
            TokenKind::Newline => output.push_str(token.text),
            kind => {
                let (line, column) = line_column(source, token.span.start);
                return Err(SubstitutionError::UnhandledToken {
                    kind,
                    text: token.text.to_string(),
                    line,
                    column,
                    partial_output: output,
                });
            }
        }
    }

    Ok(Substitution {
        output,
        replaced,
        deleted,
    })
}
