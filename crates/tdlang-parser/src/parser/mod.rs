//! Recursive descent parser for TDL declarations.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with single-token lookahead
//! - `error`: ParseError constructors
//! - `decl`: one parse function per declaration kind
//!
//! Parsing is all-or-nothing: the grammar has no recovery points, so the
//! first mismatch propagates out through `?`.

mod decl;
mod error;
mod stream;

pub use error::ParseError;
use stream::TokenStream;

use tdlang_ast::Program;
use tdlang_lexer::SpannedToken;

/// Parse a token vector into a program.
///
/// # Returns
///
/// - `Ok(Program)` with declarations in source order
/// - `Err(ParseError)` describing the first mismatch
pub fn parse(tokens: &[SpannedToken]) -> Result<Program, ParseError> {
    let mut stream = TokenStream::new(tokens);
    decl::parse_program(&mut stream)
}
