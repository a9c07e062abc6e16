//! Lexical analysis for Rapcode.
//!
//! This module converts Rapcode source (or a flowchart's free-text condition)
//! into a stream of [`Token`]s. It handles:
//!
//! - Case-insensitive keyword recognition
//! - Number and string literals
//! - `#` comments
//! - Both `==`/`!=` and the flowchart spellings `=`/`<>`
//!
//! ## Example
//!
//! ```
//! use rapcode::lexer::{lex, TokenKind};
//!
//! let tokens = lex("OUTPUT 42").unwrap();
//! assert_eq!(tokens[0].kind, TokenKind::Output);
//! assert_eq!(tokens[1].text, "42");
//! ```
//!
//! ## Design Notes
//!
//! The lexer is built on the [`logos`](https://docs.rs/logos) crate, which
//! generates a DFA-based lexer from our token definitions. We wrap logos in our
//! own [`Lexer`] struct to provide:
//!
//! - An iterator interface yielding `Result<Token, ParseError>`
//! - Spans shifted by a base offset, so text embedded in a larger document
//!   (a flowchart's XML) reports positions in that document
//! - Lexical errors for unrecognized characters and unterminated strings

mod token;

pub use token::{Token, TokenKind};

use logos::Logos;

use crate::ast::Span;
use crate::parser::ParseError;

/// The lexer for Rapcode source code.
///
/// ## Example
///
/// ```
/// use rapcode::lexer::{Lexer, TokenKind};
///
/// let tokens: Vec<_> = Lexer::new("x := 1").collect::<Result<_, _>>().unwrap();
///
/// assert_eq!(tokens.len(), 3);
/// assert_eq!(tokens[1].kind, TokenKind::Assign);
/// ```
pub struct Lexer<'source> {
    /// The underlying logos lexer
    inner: logos::Lexer<'source, TokenKind>,
    /// Added to every span
    base: usize,
    /// Set once an error has been yielded; lexing stops there
    failed: bool,
}

impl<'source> Lexer<'source> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'source str) -> Self {
        Self::with_offset(source, 0)
    }

    /// Create a lexer whose spans start at `base` instead of 0.
    pub fn with_offset(source: &'source str, base: usize) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            base,
            failed: false,
        }
    }

    /// Get the next token, if any.
    ///
    /// Returns `None` at the end of input, and after the first error.
    pub fn next_token(&mut self) -> Option<Result<Token, ParseError>> {
        if self.failed {
            return None;
        }

        let kind = self.inner.next()?;
        let range = self.inner.span();
        let span = (range.start + self.base)..(range.end + self.base);

        match kind {
            Ok(TokenKind::UnterminatedString) => {
                self.failed = true;
                Some(Err(ParseError::UnterminatedString { span: span.into() }))
            }
            Ok(kind) => Some(Ok(Token::new(kind, span, self.inner.slice()))),
            Err(()) => {
                self.failed = true;
                let found = self.inner.slice().chars().next().unwrap_or('?');
                Some(Err(ParseError::UnexpectedCharacter {
                    found,
                    span: Span::from(span),
                }))
            }
        }
    }
}

/// Implement Iterator so the lexer can be used with for loops and iterator adapters.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

/// Lexes a whole source text, stopping at the first lexical error.
pub fn lex(source: &str) -> Result<Vec<Token>, ParseError> {
    lex_at(source, 0)
}

/// Lexes `source` as if it started at byte `base` of a larger document.
pub fn lex_at(source: &str, base: usize) -> Result<Vec<Token>, ParseError> {
    Lexer::with_offset(source, base).collect()
}
