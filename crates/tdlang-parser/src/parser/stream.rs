//! Token stream wrapper for the hand-written parser.

use tdlang_lexer::{SpannedToken, Token};

/// Token stream with single-token lookahead and line tracking.
///
/// Each token carries the 1-based line computed by the lexer, which is
/// what error messages report.
pub struct TokenStream<'src> {
    tokens: &'src [SpannedToken],
    pos: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(tokens: &'src [SpannedToken]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|t| &t.token)
    }

    /// Advance to the next token and return the consumed one.
    pub fn advance(&mut self) -> Option<&'src SpannedToken> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token kind.
    ///
    /// Matches on variant only, so `Token::Int(String::new())` checks
    /// against any integer literal.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Consume the current token if it matches; report whether it did.
    pub fn eat(&mut self, expected: &Token) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a token of the given kind and advance past it.
    ///
    /// `expected` is the construct description used in the diagnostic
    /// (e.g. "map name", "{", "x coordinate").
    pub fn expect(
        &mut self,
        kind: &Token,
        expected: &str,
    ) -> Result<&'src SpannedToken, super::ParseError> {
        if self.check(kind) {
            Ok(self
                .advance()
                .expect("BUG: check() verified a current token"))
        } else {
            Err(super::ParseError::expected(
                expected,
                self.peek(),
                self.current_line(),
            ))
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Line of the current token, or of the last token at EOF.
    pub fn current_line(&self) -> u32 {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.line)
            .unwrap_or(1)
    }
}
