//! Diagnostic formatting for better error messages
//!
//! Renders a [`SierraError`] with the surrounding source lines and a caret
//! under the offending column.

use super::{SierraError, SourceLocation};
use colored::Colorize;

/// Diagnostic information for displaying errors with context
pub struct Diagnostic<'a> {
    error: &'a SierraError,
    source: Option<&'a str>,
}

impl<'a> Diagnostic<'a> {
    /// Create a new diagnostic from an error
    pub fn new(error: &'a SierraError) -> Self {
        Self {
            error,
            source: None,
        }
    }

    /// Create a diagnostic with source code context
    pub fn with_source(error: &'a SierraError, source: &'a str) -> Self {
        Self {
            error,
            source: Some(source),
        }
    }

    /// Format the diagnostic with color and context
    pub fn format(&self) -> String {
        let mut output = String::new();

        let kind = self.error.kind().as_str().red().bold();
        output.push_str(&format!("{}: ", kind));
        output.push_str(self.error.message());
        if let Some(nonterminal) = self.error.nonterminal() {
            output.push_str(&format!(" (while parsing {})", nonterminal));
        }
        output.push('\n');

        let location = self.error.location();
        output.push_str(&format!("  {} {}\n", "-->".blue().bold(), location));

        if let Some(source) = self.source {
            output.push_str(&self.format_source_context(source, location));
        }

        output
    }

    /// Format source code context around the error location
    fn format_source_context(&self, source: &str, location: &SourceLocation) -> String {
        let mut output = String::new();
        let mut lines: Vec<&str> = source.lines().collect();

        // An end-of-input error after a trailing newline points one line past the last one.
        if source.ends_with('\n') {
            lines.push("");
        }

        if location.line == 0 || location.line > lines.len() {
            return output;
        }

        let line_idx = location.line - 1;
        let line_num_width = (location.line + 1).to_string().len();

        if line_idx > 0 {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx, width = line_num_width).blue(),
                lines[line_idx - 1]
            ));
        }

        output.push_str(&format!(
            "  {} {}\n",
            format!("{:width$}", location.line, width = line_num_width)
                .blue()
                .bold(),
            lines[line_idx]
        ));

        let indicator_padding = " ".repeat(line_num_width + 2 + location.column.saturating_sub(1));
        output.push_str(&format!("{}{}\n", indicator_padding, "^".red().bold()));

        if line_idx + 1 < lines.len() {
            output.push_str(&format!(
                "  {} {}\n",
                format!("{:width$}", line_idx + 2, width = line_num_width).blue(),
                lines[line_idx + 1]
            ));
        }

        output
    }
}

impl std::fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Nonterminal;

    #[test]
    fn test_diagnostic_without_source() {
        let err = SierraError::lex_error('@', SourceLocation::at(1, 1, 0));
        let formatted = Diagnostic::new(&err).format();

        assert!(formatted.contains("Lex Error"));
        assert!(formatted.contains("Unexpected character '@'"));
        assert!(formatted.contains("1:1"));
    }

    #[test]
    fn test_diagnostic_with_source() {
        let source = "program Hello;\ntype X = @;\nuse a;";
        let err = SierraError::lex_error('@', SourceLocation::at(2, 10, 24));
        let formatted = Diagnostic::with_source(&err, source).format();

        assert!(formatted.contains("Lex Error"));
        assert!(formatted.contains("program Hello;"));
        assert!(formatted.contains("type X = @;"));
        assert!(formatted.contains("use a;"));
        assert!(formatted.contains('^'));
    }

    #[test]
    fn test_diagnostic_names_nonterminal() {
        let err = SierraError::structural_error(
            "expected 'end'",
            Nonterminal::ImplementationBlock,
            SourceLocation::at(1, 44, 43),
        );
        let formatted = Diagnostic::new(&err).format();

        assert!(formatted.contains("Structural Error"));
        assert!(formatted.contains("while parsing implementation_block"));
    }

    #[test]
    fn test_diagnostic_at_end_of_input_after_newline() {
        let source = "implementation Foo\n";
        let err = SierraError::structural_error(
            "expected 'end'",
            Nonterminal::ImplementationBlock,
            SourceLocation::at(2, 1, 19),
        );
        let formatted = Diagnostic::with_source(&err, source).format();

        assert!(formatted.contains("implementation Foo"));
        assert!(formatted.contains('^'));
    }
}
