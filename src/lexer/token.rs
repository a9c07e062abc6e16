//! Token definitions for the Rapcode lexer.
//!
//! This module defines all tokens recognized by the lexer:
//! - Keywords (IF, THEN, LOOP, OUTPUT, etc.)
//! - Operators (`:=`, `==`, `+`, etc.)
//! - Literals (numbers, strings)
//! - Punctuation
//!
//! ## Design Notes
//!
//! We use the `logos` crate for lexical analysis. Logos generates a fast,
//! table-driven lexer from token definitions using procedural macros.
//!
//! Keywords are matched case-insensitively, in BASIC tradition. Whitespace,
//! including newlines, is insignificant: every Rapcode statement is
//! self-delimiting. `#` starts a comment that runs to the end of the line.

use logos::Logos;
use std::fmt;

/// A token with its location in the source code.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// Byte offset range of this token in the source
    pub span: std::ops::Range<usize>,
    /// The original text of the token (useful for identifiers, literals)
    pub text: String,
}

impl Token {
    /// Create a new token with the given kind, span, and text.
    pub fn new(kind: TokenKind, span: std::ops::Range<usize>, text: impl Into<String>) -> Self {
        Self {
            kind,
            span,
            text: text.into(),
        }
    }
}

/// All possible token types in Rapcode.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum TokenKind {
    // ==================== Control Flow Keywords ====================

    /// IF keyword - begins conditional statement
    #[token("IF", ignore(ascii_case))]
    If,

    /// THEN keyword - follows IF condition
    #[token("THEN", ignore(ascii_case))]
    Then,

    /// ELSE keyword - alternative branch
    #[token("ELSE", ignore(ascii_case))]
    Else,

    /// ENDIF keyword - closes an IF block
    #[token("ENDIF", ignore(ascii_case))]
    EndIf,

    /// LOOP keyword - begins an unconditional loop
    #[token("LOOP", ignore(ascii_case))]
    Loop,

    /// WHILE keyword - begins a pre-tested loop
    #[token("WHILE", ignore(ascii_case))]
    While,

    /// DO keyword - follows the WHILE condition
    #[token("DO", ignore(ascii_case))]
    Do,

    /// ENDLOOP keyword - closes LOOP and WHILE blocks
    #[token("ENDLOOP", ignore(ascii_case))]
    EndLoop,

    /// BREAK keyword - leaves the innermost loop
    #[token("BREAK", ignore(ascii_case))]
    Break,

    // ==================== Statement Keywords ====================

    /// SET keyword - optional assignment prefix
    #[token("SET", ignore(ascii_case))]
    Set,

    /// OUTPUT statement
    #[token("OUTPUT", ignore(ascii_case))]
    Output,

    /// INPUT expression
    #[token("INPUT", ignore(ascii_case))]
    Input,

    // ==================== Literal Keywords ====================

    /// TRUE literal
    #[token("TRUE", ignore(ascii_case))]
    True,

    /// FALSE literal
    #[token("FALSE", ignore(ascii_case))]
    False,

    /// NOT operator
    #[token("NOT", ignore(ascii_case))]
    Not,

    // ==================== Operators ====================

    /// := assignment
    #[token(":=")]
    Assign,

    /// + addition or string concatenation
    #[token("+")]
    Plus,

    /// - subtraction or negation
    #[token("-")]
    Minus,

    /// * multiplication
    #[token("*")]
    Star,

    /// / division
    #[token("/")]
    Slash,

    /// % modulo
    #[token("%")]
    Percent,

    /// == equality
    #[token("==")]
    EqualEqual,

    /// = equality (flowchart condition spelling)
    #[token("=")]
    EqualsLegacy,

    /// != inequality
    #[token("!=")]
    NotEquals,

    /// <> inequality (flowchart condition spelling)
    #[token("<>")]
    NotEqualsLegacy,

    /// < less than
    #[token("<")]
    LessThan,

    /// > greater than
    #[token(">")]
    GreaterThan,

    /// <= less than or equal
    #[token("<=")]
    LessEquals,

    /// >= greater than or equal
    #[token(">=")]
    GreaterEquals,

    // ==================== Punctuation ====================

    /// ( left parenthesis
    #[token("(")]
    LeftParen,

    /// ) right parenthesis
    #[token(")")]
    RightParen,

    // ==================== Literals ====================

    /// Number literal
    /// Examples: 123, 0, 3.14, 2., .5
    #[regex(r"[0-9]+(\.[0-9]*)?|\.[0-9]+")]
    NumberLiteral,

    /// String literal
    /// Everything between double quotes; there are no escape sequences
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// A string literal with no closing quote (reported as a lexical error)
    #[regex(r#""[^"]*"#)]
    UnterminatedString,

    // ==================== Identifiers ====================

    /// Identifier (variable name)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Identifier,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::EndIf => "ENDIF",
            TokenKind::Loop => "LOOP",
            TokenKind::While => "WHILE",
            TokenKind::Do => "DO",
            TokenKind::EndLoop => "ENDLOOP",
            TokenKind::Break => "BREAK",
            TokenKind::Set => "SET",
            TokenKind::Output => "OUTPUT",
            TokenKind::Input => "INPUT",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Not => "NOT",
            TokenKind::Assign => ":=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::EqualEqual => "==",
            TokenKind::EqualsLegacy => "=",
            TokenKind::NotEquals => "!=",
            TokenKind::NotEqualsLegacy => "<>",
            TokenKind::LessThan => "<",
            TokenKind::GreaterThan => ">",
            TokenKind::LessEquals => "<=",
            TokenKind::GreaterEquals => ">=",
            TokenKind::LeftParen => "(",
            TokenKind::RightParen => ")",
            TokenKind::NumberLiteral => "number",
            TokenKind::StringLiteral | TokenKind::UnterminatedString => "string",
            TokenKind::Identifier => "identifier",
        };
        write!(f, "{}", text)
    }
}
