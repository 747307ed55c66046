//! Parser module
//!
//! This module handles parsing tokens into an Abstract Syntax Tree (AST).

pub mod ast;
pub mod nonterminal;
pub mod parser;
mod printer;

pub use ast::{Expression, SourceFile, SyntaxNode, SyntaxUnit};
pub use nonterminal::Nonterminal;
pub use parser::Parser;
