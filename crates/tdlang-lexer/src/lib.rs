//! Lexical analysis for TDLang.
//!
//! This crate tokenizes TDL source code using logos.
//!
//! # Design
//!
//! - `Token` — all TDL token types (keywords, literals, identifiers, punctuation)
//! - Whitespace and `//` comments are stripped during lexing (not tokens)
//! - Bytes no rule matches become `Token::Unknown`; the lexer never fails,
//!   the parser diagnoses unknown tokens when it reaches them
//! - Every token carries its byte span and 1-based source line
//!
//! # Examples
//!
//! ```
//! use tdlang_lexer::{lex, Token};
//! let tokens = lex("enemy Goblin { hp = 20; }");
//! assert_eq!(tokens[0].token, Token::Enemy);
//! ```

use logos::Logos;
use std::ops::Range;

/// TDL token.
///
/// Numeric literals carry their raw lexeme; conversion to `i64`/`f64`
/// happens in the parser, which owns the diagnostics for it.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip // comments to end of line
pub enum Token {
    // === Keywords ===
    /// Keyword `map`
    #[token("map")]
    Map,
    /// Keyword `enemy`
    #[token("enemy")]
    Enemy,
    /// Keyword `tower`
    #[token("tower")]
    Tower,
    /// Keyword `wave`
    #[token("wave")]
    Wave,
    /// Keyword `spawn`
    #[token("spawn")]
    Spawn,
    /// Keyword `place`
    #[token("place")]
    Place,
    /// Keyword `at`
    #[token("at")]
    At,
    /// Keyword `size`
    #[token("size")]
    Size,
    /// Keyword `path`
    #[token("path")]
    Path,
    /// Keyword `count`
    #[token("count")]
    Count,
    /// Keyword `start`
    #[token("start")]
    Start,
    /// Keyword `interval`
    #[token("interval")]
    Interval,

    // === Literals ===
    /// Float literal: digits, `.`, then zero or more digits (`1.5`, `2.`).
    /// No sign, no exponent.
    #[regex(r"[0-9]+\.[0-9]*", |lex| lex.slice().to_owned())]
    Float(String),

    /// Integer literal (digits only)
    #[regex(r"[0-9]+", |lex| lex.slice().to_owned())]
    Int(String),

    /// Identifier: letter or underscore, then alphanumerics and underscores
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_owned())]
    Ident(String),

    // === Punctuation ===
    /// Delimiter `{`
    #[token("{")]
    LBrace,
    /// Delimiter `}`
    #[token("}")]
    RBrace,
    /// Delimiter `(`
    #[token("(")]
    LParen,
    /// Delimiter `)`
    #[token(")")]
    RParen,
    /// Delimiter `[`
    #[token("[")]
    LBracket,
    /// Delimiter `]`
    #[token("]")]
    RBracket,
    /// Separator `,`
    #[token(",")]
    Comma,
    /// Terminator `;`
    #[token(";")]
    Semicolon,
    /// Operator `=`
    #[token("=")]
    Equal,

    /// Any character no other rule matches. Not diagnosed here; the
    /// parser reports it when encountered.
    #[regex(r".", |lex| lex.slice().to_owned(), priority = 0)]
    Unknown(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Map => write!(f, "map"),
            Token::Enemy => write!(f, "enemy"),
            Token::Tower => write!(f, "tower"),
            Token::Wave => write!(f, "wave"),
            Token::Spawn => write!(f, "spawn"),
            Token::Place => write!(f, "place"),
            Token::At => write!(f, "at"),
            Token::Size => write!(f, "size"),
            Token::Path => write!(f, "path"),
            Token::Count => write!(f, "count"),
            Token::Start => write!(f, "start"),
            Token::Interval => write!(f, "interval"),
            Token::Float(s) | Token::Int(s) | Token::Ident(s) | Token::Unknown(s) => {
                write!(f, "{}", s)
            }
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Comma => write!(f, ","),
            Token::Semicolon => write!(f, ";"),
            Token::Equal => write!(f, "="),
        }
    }
}

/// A token with its byte span and 1-based source line.
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Range<usize>,
    pub line: u32,
}

impl SpannedToken {
    pub fn new(token: Token, span: Range<usize>, line: u32) -> Self {
        Self { token, span, line }
    }
}

/// Tokenize source code into a vector of spanned tokens.
///
/// Never fails: unmatched bytes are emitted as [`Token::Unknown`] so the
/// parser can report them with a line number. Line numbers are computed
/// by counting newlines up to each token's start offset.
pub fn lex(source: &str) -> Vec<SpannedToken> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();
    let mut line = 1u32;
    let mut scanned = 0usize;
    let bytes = source.as_bytes();

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        line += bytes[scanned..span.start]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u32;
        scanned = span.start;

        let token = match result {
            Ok(token) => token,
            // The `.` catch-all makes errors unreachable in practice, but
            // logos still types the stream as Result.
            Err(()) => Token::Unknown(lexer.slice().to_owned()),
        };
        tokens.push(SpannedToken::new(token, span, line));
    }

    tokens
}
