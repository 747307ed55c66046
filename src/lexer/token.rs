//! Token definitions for the Sierra language
//!
//! This module defines all token types used in lexical analysis.

use crate::error::SourceLocation;
use std::fmt;

/// A token in the Sierra language
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub token_type: TokenType,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    /// Create a new token
    pub fn new(token_type: TokenType, lexeme: String, location: SourceLocation) -> Self {
        Self {
            token_type,
            lexeme,
            location,
        }
    }

    /// Short human-readable description used in parser messages
    pub fn describe(&self) -> String {
        match self.token_type {
            TokenType::Identifier => format!("identifier '{}'", self.lexeme),
            TokenType::Number => format!("number '{}'", self.lexeme),
            TokenType::Eof => "end of input".to_string(),
            ref other => other.to_string(),
        }
    }
}

/// Token types in the Sierra language
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    // Literals
    Number,

    // Identifiers and keywords
    Identifier,
    Keyword(Keyword),

    // Delimiters
    LeftParen,      // (
    RightParen,     // )
    LeftBracket,    // [
    RightBracket,   // ]
    Comma,          // ,
    Dot,            // .
    DotDot,         // ..
    Colon,          // :
    ColonAssign,    // :=
    Equals,         // =
    Semicolon,      // ;

    // Special
    Eof,
}

/// Keywords in the Sierra language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Module level
    Use,
    Program,
    Type,
    Implementation,

    // Functions and blocks
    Function,
    Begin,
    End,

    // Visibility
    Public,
    Private,

    // Mutability
    Const,
    Mutable,

    // Parameters and types
    SelfKw,
    Of,
}

impl Keyword {
    /// Get keyword from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "use" => Some(Self::Use),
            "program" => Some(Self::Program),
            "type" => Some(Self::Type),
            "implementation" => Some(Self::Implementation),
            "function" => Some(Self::Function),
            "begin" => Some(Self::Begin),
            "end" => Some(Self::End),
            "public" => Some(Self::Public),
            "private" => Some(Self::Private),
            "const" => Some(Self::Const),
            "mutable" => Some(Self::Mutable),
            "self" => Some(Self::SelfKw),
            "of" => Some(Self::Of),
            _ => None,
        }
    }

    /// Get string representation of keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Use => "use",
            Self::Program => "program",
            Self::Type => "type",
            Self::Implementation => "implementation",
            Self::Function => "function",
            Self::Begin => "begin",
            Self::End => "end",
            Self::Public => "public",
            Self::Private => "private",
            Self::Const => "const",
            Self::Mutable => "mutable",
            Self::SelfKw => "self",
            Self::Of => "of",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Identifier => write!(f, "identifier"),
            Self::Keyword(kw) => write!(f, "keyword '{}'", kw),
            Self::LeftParen => write!(f, "'('"),
            Self::RightParen => write!(f, "')'"),
            Self::LeftBracket => write!(f, "'['"),
            Self::RightBracket => write!(f, "']'"),
            Self::Comma => write!(f, "','"),
            Self::Dot => write!(f, "'.'"),
            Self::DotDot => write!(f, "'..'"),
            Self::Colon => write!(f, "':'"),
            Self::ColonAssign => write!(f, "':='"),
            Self::Equals => write!(f, "'='"),
            Self::Semicolon => write!(f, "';'"),
            Self::Eof => write!(f, "EOF"),
        }
    }
}
