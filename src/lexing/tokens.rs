//! Token definitions for C-family sources
//!
//! The raw lexemes are defined with the logos derive macro. Every lexeme maps
//! onto a [`TokenKind`], the coarser category the substitution engine works
//! with.
use logos::Logos;
use std::fmt;

/// All lexemes of the C-family grammar
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    // Whitespace, including backslash-newline line continuations
    #[regex(r"([ \t\r\n\x0B\x0C]|\\\r?\n)+")]
    Whitespace,

    #[token("\u{feff}")]
    ByteOrderMark,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*+[^*/])*\*+/")]
    BlockComment,

    // Preprocessor directive, up to the end of the line
    #[regex(r"#[^\n]*")]
    Directive,

    #[token("auto")]
    #[token("break")]
    #[token("case")]
    #[token("char")]
    #[token("const")]
    #[token("continue")]
    #[token("default")]
    #[token("do")]
    #[token("double")]
    #[token("else")]
    #[token("enum")]
    #[token("extern")]
    #[token("float")]
    #[token("for")]
    #[token("goto")]
    #[token("if")]
    #[token("inline")]
    #[token("int")]
    #[token("long")]
    #[token("register")]
    #[token("restrict")]
    #[token("return")]
    #[token("short")]
    #[token("signed")]
    #[token("sizeof")]
    #[token("static")]
    #[token("struct")]
    #[token("switch")]
    #[token("typedef")]
    #[token("union")]
    #[token("unsigned")]
    #[token("void")]
    #[token("volatile")]
    #[token("while")]
    #[token("_Alignas")]
    #[token("_Alignof")]
    #[token("_Atomic")]
    #[token("_Bool")]
    #[token("_Complex")]
    #[token("_Generic")]
    #[token("_Imaginary")]
    #[token("_Noreturn")]
    #[token("_Static_assert")]
    #[token("_Thread_local")]
    #[token("alignas")]
    #[token("alignof")]
    #[token("bool")]
    #[token("constexpr")]
    #[token("false")]
    #[token("nullptr")]
    #[token("static_assert")]
    #[token("thread_local")]
    #[token("true")]
    #[token("typeof")]
    #[token("typeof_unqual")]
    Keyword,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Identifier,

    #[regex(r#"(L|u8|u|U)?"([^"\\\n]|\\(.|\n))*""#)]
    StringLiteral,

    #[regex(r#"(L|u8|u|U)?'([^'\\\n]|\\(.|\n))*'"#)]
    CharLiteral,

    // Preprocessing numbers: 42, 0x1F, 1.5e10f, 10ULL, .5, 1'000
    #[regex(r"[0-9]([0-9A-Za-z_.]|'[0-9A-Za-z_])*")]
    #[regex(r"\.[0-9]([0-9A-Za-z_.]|'[0-9A-Za-z_])*")]
    Number,

    #[regex(r"[-+*/%=<>!&|^~?:;,.(){}\[\]]")]
    Punctuation,
}

/// Token categories seen by the substitution engine
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// An identifier
    Name,
    /// A reserved word of the C grammar
    Keyword,
    /// Whitespace without a line break
    Whitespace,
    /// Whitespace containing at least one `\n`
    Newline,
    /// `//` and `/* */` comments
    Comment,
    /// A preprocessor line (`#define`, `#include`, ...)
    Directive,
    /// String, character and numeric literals
    Literal,
    /// Operators and separators
    Punctuation,
    /// Input the lexer could not classify
    Other,
}

impl Token {
    /// Categorize this lexeme. Whitespace needs its text to tell plain runs
    /// from line-breaking ones.
    pub fn kind(&self, text: &str) -> TokenKind {
        match self {
            Token::Whitespace if text.contains('\n') => TokenKind::Newline,
            Token::Whitespace | Token::ByteOrderMark => TokenKind::Whitespace,
            Token::LineComment | Token::BlockComment => TokenKind::Comment,
            Token::Directive => TokenKind::Directive,
            Token::Keyword => TokenKind::Keyword,
            Token::Identifier => TokenKind::Name,
            Token::StringLiteral | Token::CharLiteral | Token::Number => TokenKind::Literal,
            Token::Punctuation => TokenKind::Punctuation,
        }
    }
}

impl TokenKind {
    /// Names and keywords are the only tokens a mapping can match
    pub fn is_substitutable(&self) -> bool {
        matches!(self, TokenKind::Name | TokenKind::Keyword)
    }

    /// Tokens copied verbatim regardless of the mapping table
    pub fn is_junk(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::Comment | TokenKind::Literal | TokenKind::Punctuation
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenKind::Name => "name",
            TokenKind::Keyword => "keyword",
            TokenKind::Whitespace => "whitespace",
            TokenKind::Newline => "newline",
            TokenKind::Comment => "comment",
            TokenKind::Directive => "preprocessor directive",
            TokenKind::Literal => "literal",
            TokenKind::Punctuation => "punctuation",
            TokenKind::Other => "unrecognized input",
        };
        f.write_str(label)
    }
}
