//! Lexical analysis module
//!
//! This module handles tokenization of Sierra source code.

pub mod token;
pub mod scanner;

pub use token::{Token, TokenType, Keyword};
pub use scanner::Lexer;
