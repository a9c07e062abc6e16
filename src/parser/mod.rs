//! Parser for Rapcode.
//!
//! The parser transforms a stream of tokens into an Abstract Syntax Tree (AST).
//! It uses recursive descent for statements and Pratt parsing (precedence climbing)
//! for expressions.
//!
//! # Example
//!
//! ```
//! use rapcode::lexer::lex;
//! use rapcode::parser::Parser;
//!
//! let source = r#"
//!     OUTPUT "Hello, World!"
//!     x := 1 + 2
//! "#;
//!
//! let tokens = lex(source).unwrap();
//! let mut parser = Parser::new(&tokens);
//! let program = parser.parse().expect("parse failed");
//!
//! assert_eq!(program.body.len(), 2);
//! ```
//!
//! # Module Structure
//!
//! The parser is split into focused modules:
//! - [`tokens`] - Token navigation utilities (peek, advance, match, expect)
//! - [`expressions`] - Pratt parser for expressions
//! - [`statements`] - Statement dispatcher and simple statements
//! - [`control_flow`] - IF/LOOP/WHILE parsing
//! - [`error`] - Parse error types
//!
//! # Errors
//!
//! Parsing stops at the first error. Rapcode programs are small and a
//! flowchart's text fields are single expressions, so one precise message
//! beats a cascade of recovered ones.
//!
//! Statements and expressions together may nest at most
//! [`MAX_NESTING_DEPTH`] levels deep, and no expression tree may be taller
//! than that (long operator chains included); anything beyond is a
//! [`ParseError::NestingTooDeep`].

mod control_flow;
mod error;
mod expressions;
mod statements;
mod tokens;

pub use error::ParseError;

use crate::ast::{Expr, Program, Statement};
use crate::lexer::{Token, lex, lex_at};

/// Result type for parser operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// How deeply statements and expressions may nest, counted together.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parser for Rapcode source code.
///
/// The parser consumes a slice of tokens and produces an AST.
pub struct Parser<'a> {
    /// The tokens to parse.
    tokens: &'a [Token],
    /// Current position in the token stream.
    current: usize,
    /// Number of LOOP/WHILE bodies enclosing the current position.
    loop_depth: usize,
    /// Statements and expressions currently being parsed.
    depth: usize,
    /// Height of the expression tree most recently parsed.
    expr_height: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given tokens.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            current: 0,
            loop_depth: 0,
            depth: 0,
            expr_height: 0,
        }
    }

    /// Parses the token stream into a program AST.
    pub fn parse(&mut self) -> ParseResult<Program> {
        let body = self.parse_block()?;

        // parse_block only stops early at a block closer, which has no
        // opener at the top level.
        if let Some(token) = self.peek() {
            return Err(ParseError::unexpected(
                "statement",
                Self::describe(token),
                token.span.clone().into(),
            ));
        }

        Ok(Program::new(body))
    }
}

/// Lexes and parses a complete Rapcode program.
///
/// ```
/// use rapcode::parser::parse_program;
///
/// let program = parse_program("LOOP BREAK ENDLOOP").unwrap();
/// assert_eq!(program.body.len(), 1);
/// ```
pub fn parse_program(source: &str) -> ParseResult<Program> {
    let tokens = lex(source)?;
    log::debug!("lexed {} tokens", tokens.len());
    Parser::new(&tokens).parse()
}

/// Parses `text` as a single expression, with spans starting at `base`.
///
/// The whole text must be consumed.
pub fn parse_expression_text(text: &str, base: usize) -> ParseResult<Expr> {
    let tokens = lex_at(text, base)?;
    let mut parser = Parser::new(&tokens);
    let expr = parser.parse_expression()?;
    parser.expect_end("expression")?;
    Ok(expr)
}

/// Parses `text` as a single `[SET] name := expr` assignment, with spans
/// starting at `base`.
///
/// The whole text must be consumed.
pub fn parse_assignment_text(text: &str, base: usize) -> ParseResult<Statement> {
    let tokens = lex_at(text, base)?;
    let mut parser = Parser::new(&tokens);
    let stmt = parser.parse_assignment()?;
    parser.expect_end("assignment")?;
    Ok(stmt)
}

/// Operator precedence levels for Pratt parsing.
///
/// Higher values mean higher precedence (bind tighter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub(crate) enum Precedence {
    Lowest = 0,
    Equality = 1,       // ==, !=, =, <>
    Relational = 2,     // <, <=, >, >=
    Additive = 3,       // +, -
    Multiplicative = 4, // *, /, %
    Unary = 5,          // - (negation), NOT
    Primary = 6,        // literals, names, ( ), INPUT( )
}
