//! Property-based tests for the lexer and the substitution engine
//!
//! The tokenizer must be lossless on any input; on well-formed C-family
//! sources the engine must be the identity for an empty table and must keep
//! every line break.

use macrosub::lexing::{detokenize, tokenize, TokenKind};
use macrosub::{substitute, MappingTable};
use proptest::prelude::*;

/// Generate a lexeme of a well-formed source
fn fragment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Identifiers
        "[a-z_][a-z0-9_]{0,6}",
        // Keywords
        prop_oneof![Just("int"), Just("return"), Just("static"), Just("void")]
            .prop_map(str::to_string),
        // Whitespace
        "[ \t]{1,3}",
        Just("\n".to_string()),
        // Literals
        "[0-9]{1,4}",
        "\"[a-z ]{0,5}\"",
        // Comments
        "/\\*[a-z ]{0,5}\\*/",
        "//[a-z ]{0,5}\n",
        // Punctuation, without `/` and `*` so no stray comment opener appears
        "[-+%=<>!&|^~?:;,(){}\\[\\]]",
    ]
}

/// Generate a well-formed source
fn source_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment_strategy(), 0..40).prop_map(|fragments| fragments.concat())
}

/// Generate names that may or may not appear in generated sources
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,2}"
}

proptest! {
    #[test]
    fn test_tokenize_is_lossless(input in any::<String>()) {
        let tokens = tokenize(&input);
        prop_assert_eq!(detokenize(&tokens), input);
    }

    #[test]
    fn test_tokens_are_never_empty(input in any::<String>()) {
        for token in tokenize(&input) {
            prop_assert!(!token.text.is_empty());
            prop_assert_eq!(token.span.len(), token.text.len());
        }
    }

    #[test]
    fn test_generated_sources_have_no_unhandled_tokens(input in source_strategy()) {
        for token in tokenize(&input) {
            prop_assert!(
                !matches!(token.kind, TokenKind::Directive | TokenKind::Other),
                "unexpected {:?} token {:?}", token.kind, token.text
            );
        }
    }

    #[test]
    fn test_empty_table_is_identity(input in source_strategy()) {
        let result = substitute(&MappingTable::new(), &input).unwrap();
        prop_assert_eq!(result.output, input);
        prop_assert_eq!(result.replaced + result.deleted, 0);
    }

    #[test]
    fn test_line_breaks_are_kept(
        input in source_strategy(),
        deleted in name_strategy(),
        renamed in name_strategy(),
    ) {
        let table = MappingTable::new()
            .with_delete(deleted)
            .with_text(renamed, "replacement");
        let result = substitute(&table, &input).unwrap();
        prop_assert_eq!(result.output.matches('\n').count(), input.matches('\n').count());
    }

    #[test]
    fn test_deletion_removes_exactly_the_name_tokens(
        input in source_strategy(),
        name in name_strategy(),
    ) {
        let table = MappingTable::new().with_delete(name.clone());
        let result = substitute(&table, &input).unwrap();

        let tokens = tokenize(&input);
        let expected: String = tokens
            .iter()
            .filter(|token| !(token.kind.is_substitutable() && token.text == name))
            .map(|token| token.text)
            .collect();
        let occurrences = tokens.len() - tokens
            .iter()
            .filter(|token| !(token.kind.is_substitutable() && token.text == name))
            .count();

        prop_assert_eq!(result.output, expected);
        prop_assert_eq!(result.deleted, occurrences);
    }
}
