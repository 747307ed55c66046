//! # Sierra syntax front end
//!
//! Lexer, recursive-descent parser and AST for the Sierra language:
//! - module-level `use`, `program` and `type` statements
//! - `implementation` blocks of function definitions
//! - `begin ... end` blocks with statements, `:=` assignments and a tail value
//! - expressions with a left-associative `..` range and the `a[i] of T` array form
//!
//! ## Architecture
//!
//! Data flows strictly lexer → parser → AST:
//! - `lexer`: Tokenization of source code
//! - `parser`: Parsing tokens into a [`SourceFile`] AST
//! - `error`: Error taxonomy and diagnostic rendering
//!
//! Parsing is pure and holds no global state, so independent inputs can be
//! parsed concurrently from different threads.

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export commonly used types
pub use error::{Diagnostic, DiagnosticKind, SierraError, SierraResult, SourceLocation};
pub use lexer::{Keyword, Lexer, Token, TokenType};
pub use parser::{Nonterminal, Parser, SourceFile, SyntaxNode};

/// Version of the Sierra front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tokenize a source string
///
/// This is a shorthand for `Lexer::new(source, None).tokenize()`.
pub fn tokenize(source: &str) -> SierraResult<Vec<Token>> {
    Lexer::new(source, None).tokenize()
}

/// Parse a complete source unit
///
/// Returns the whole tree or the first diagnostic; no partial tree is exposed.
pub fn parse(source: &str) -> SierraResult<SourceFile> {
    parse_file(source, None)
}

/// Parse a complete source unit, stamping `filename` into every location
#[tracing::instrument(skip_all, fields(source_len = source.len(), filename = filename))]
pub fn parse_file(source: &str, filename: Option<&str>) -> SierraResult<SourceFile> {
    let tokens = Lexer::new(source, filename).tokenize()?;
    Parser::new(tokens).parse()
}

/// Parse the whole input as a single grammar nonterminal
///
/// Trailing tokens after the nonterminal are a syntax error.
#[tracing::instrument(skip_all, fields(source_len = source.len(), nonterminal = %nonterminal))]
pub fn parse_fragment(source: &str, nonterminal: Nonterminal) -> SierraResult<SyntaxNode> {
    let tokens = tokenize(source)?;
    Parser::new(tokens).parse_fragment(nonterminal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_parse_file_stamps_filename() {
        let err = parse_file("program;", Some("hello.sierra")).unwrap_err();
        assert_eq!(err.location().to_string(), "hello.sierra:1:8");
    }

    #[test]
    fn test_lex_error_surfaces_through_parse() {
        let err = parse("use a$b;").unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::LexError);
        assert_eq!(err.location().column, 6);
    }

    #[test]
    fn test_public_types_are_thread_safe() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SourceFile>();
        assert_send_sync::<SyntaxNode>();
        assert_send_sync::<SierraError>();
        assert_send_sync::<Parser>();
        assert_send_sync::<Lexer>();
    }
}
