//! Error handling and diagnostics for the Sierra language
//!
//! The lexer and parser stop at the first failure and report it as a single
//! [`SierraError`]. [`Diagnostic`] renders one with source context.

use std::fmt;

use thiserror::Error;

use crate::parser::Nonterminal;

pub mod diagnostic;

pub use diagnostic::Diagnostic;

/// Result type alias for Sierra operations
pub type SierraResult<T> = Result<T, SierraError>;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
    /// Byte offset from the start of the source (0-based)
    pub offset: usize,
    /// Optional filename
    pub filename: Option<String>,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize, offset: usize, filename: Option<String>) -> Self {
        Self {
            line,
            column,
            offset,
            filename,
        }
    }

    /// Create a source location without a filename
    pub fn at(line: usize, column: usize, offset: usize) -> Self {
        Self::new(line, column, offset, None)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref filename) = self.filename {
            write!(f, "{}:{}:{}", filename, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Discriminant of a [`SierraError`], for callers that only branch on the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    LexError,
    SyntaxError,
    StructuralError,
    InvalidParameter,
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LexError => "Lex Error",
            Self::SyntaxError => "Syntax Error",
            Self::StructuralError => "Structural Error",
            Self::InvalidParameter => "Invalid Parameter",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main error type for the Sierra front end
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SierraError {
    /// Character outside the recognized alphabet
    #[error("Lex Error: {message} at {location}")]
    LexError {
        character: char,
        message: String,
        location: SourceLocation,
    },
    /// Token present but not valid at this grammar position
    #[error("Syntax Error: {message} in {nonterminal} at {location}")]
    SyntaxError {
        message: String,
        nonterminal: Nonterminal,
        location: SourceLocation,
    },
    /// Missing closing token, empty mandatory list, or truncated input
    #[error("Structural Error: {message} in {nonterminal} at {location}")]
    StructuralError {
        message: String,
        nonterminal: Nonterminal,
        location: SourceLocation,
    },
    /// Parameter that matches none of the specifier alternatives
    #[error("Invalid Parameter: {message} at {location}")]
    InvalidParameter {
        message: String,
        location: SourceLocation,
    },
}

impl SierraError {
    /// Create a new lexer error for an unrecognized character
    pub fn lex_error(character: char, location: SourceLocation) -> Self {
        Self::LexError {
            character,
            message: format!("Unexpected character '{}'", character.escape_debug()),
            location,
        }
    }

    /// Create a new syntax error
    pub fn syntax_error(
        message: impl Into<String>,
        nonterminal: Nonterminal,
        location: SourceLocation,
    ) -> Self {
        Self::SyntaxError {
            message: message.into(),
            nonterminal,
            location,
        }
    }

    /// Create a new structural error
    pub fn structural_error(
        message: impl Into<String>,
        nonterminal: Nonterminal,
        location: SourceLocation,
    ) -> Self {
        Self::StructuralError {
            message: message.into(),
            nonterminal,
            location,
        }
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::InvalidParameter {
            message: message.into(),
            location,
        }
    }

    /// Get the error category
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Self::LexError { .. } => DiagnosticKind::LexError,
            Self::SyntaxError { .. } => DiagnosticKind::SyntaxError,
            Self::StructuralError { .. } => DiagnosticKind::StructuralError,
            Self::InvalidParameter { .. } => DiagnosticKind::InvalidParameter,
        }
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        match self {
            Self::LexError { message, .. }
            | Self::SyntaxError { message, .. }
            | Self::StructuralError { message, .. }
            | Self::InvalidParameter { message, .. } => message,
        }
    }

    /// Get the source location of the offending character or token
    pub fn location(&self) -> &SourceLocation {
        match self {
            Self::LexError { location, .. }
            | Self::SyntaxError { location, .. }
            | Self::StructuralError { location, .. }
            | Self::InvalidParameter { location, .. } => location,
        }
    }

    /// Get the nonterminal that was being parsed, if the error came from the parser
    pub fn nonterminal(&self) -> Option<Nonterminal> {
        match self {
            Self::SyntaxError { nonterminal, .. } | Self::StructuralError { nonterminal, .. } => {
                Some(*nonterminal)
            }
            Self::InvalidParameter { .. } => Some(Nonterminal::Parameter),
            Self::LexError { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_location_display() {
        let loc = SourceLocation::at(10, 5, 120);
        assert_eq!(loc.to_string(), "10:5");

        let loc_with_file = SourceLocation::new(10, 5, 120, Some("main.sierra".to_string()));
        assert_eq!(loc_with_file.to_string(), "main.sierra:10:5");
    }

    #[test]
    fn test_error_creation() {
        let loc = SourceLocation::at(1, 1, 0);
        let err = SierraError::lex_error('@', loc.clone());

        assert_eq!(err.kind(), DiagnosticKind::LexError);
        assert_eq!(err.message(), "Unexpected character '@'");
        assert_eq!(err.location(), &loc);
        assert_eq!(err.nonterminal(), None);
    }

    #[test]
    fn test_error_display() {
        let loc = SourceLocation::at(5, 10, 42);
        let err = SierraError::structural_error("expected ';'", Nonterminal::UseStatement, loc);

        assert_eq!(
            err.to_string(),
            "Structural Error: expected ';' in use_statement at 5:10"
        );
    }

    #[test]
    fn test_invalid_parameter_reports_parameter_context() {
        let err = SierraError::invalid_parameter("typed receiver", SourceLocation::at(1, 14, 13));
        assert_eq!(err.kind(), DiagnosticKind::InvalidParameter);
        assert_eq!(err.nonterminal(), Some(Nonterminal::Parameter));
    }
}
