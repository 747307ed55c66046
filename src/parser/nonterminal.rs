//! Grammar nonterminals
//!
//! Each variant names one parsing procedure on [`Parser`](super::Parser);
//! [`Parser::parse_nonterminal`](super::Parser::parse_nonterminal) dispatches on it.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nonterminal {
    SourceFile,
    SyntaxUnit,
    UseStatement,
    ProgramStatement,
    TypeDefinition,
    ImplementationBlock,
    FunctionDefinition,
    ParameterList,
    Parameter,
    Block,
    Statement,
    Expression,
    QualifiedIdentifier,
}

impl Nonterminal {
    pub const ALL: [Nonterminal; 13] = [
        Nonterminal::SourceFile,
        Nonterminal::SyntaxUnit,
        Nonterminal::UseStatement,
        Nonterminal::ProgramStatement,
        Nonterminal::TypeDefinition,
        Nonterminal::ImplementationBlock,
        Nonterminal::FunctionDefinition,
        Nonterminal::ParameterList,
        Nonterminal::Parameter,
        Nonterminal::Block,
        Nonterminal::Statement,
        Nonterminal::Expression,
        Nonterminal::QualifiedIdentifier,
    ];

    /// Grammar rule name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceFile => "source_file",
            Self::SyntaxUnit => "syntax_unit",
            Self::UseStatement => "use_statement",
            Self::ProgramStatement => "program_statement",
            Self::TypeDefinition => "type_definition",
            Self::ImplementationBlock => "implementation_block",
            Self::FunctionDefinition => "function_definition",
            Self::ParameterList => "parameter_list",
            Self::Parameter => "parameter",
            Self::Block => "block",
            Self::Statement => "statement",
            Self::Expression => "expression",
            Self::QualifiedIdentifier => "qualified_identifier",
        }
    }

    /// Look up a nonterminal by its grammar rule name
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|nt| nt.as_str() == s)
    }
}

impl fmt::Display for Nonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
