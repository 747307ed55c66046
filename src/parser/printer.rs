//! Compact constructor-style rendering of the AST
//!
//! `use foo.bar;` renders as `UseStatement(QualifiedIdentifier([foo, bar]))`.
//! Absent optional children render as `_`. Locations are not printed.

use std::fmt::{self, Display, Formatter};

use super::ast::*;

fn write_list<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("]")
}

fn write_optional<T: Display>(f: &mut Formatter<'_>, item: Option<&T>) -> fmt::Result {
    match item {
        Some(item) => write!(f, "{}", item),
        None => f.write_str("_"),
    }
}

impl Display for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("SourceFile(")?;
        write_list(f, &self.units)?;
        f.write_str(")")
    }
}

impl Display for SyntaxUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxUnit::Use(node) => node.fmt(f),
            SyntaxUnit::Program(node) => node.fmt(f),
            SyntaxUnit::Type(node) => node.fmt(f),
            SyntaxUnit::Implementation(node) => node.fmt(f),
        }
    }
}

impl Display for UseStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "UseStatement({})", self.path)
    }
}

impl Display for ProgramStatement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ProgramStatement({})", self.name)
    }
}

impl Display for TypeDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "TypeDefinition({}, {})", self.name, self.value)
    }
}

impl Display for ImplementationBlock {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ImplementationBlock({}, ", self.name)?;
        write_list(f, &self.functions)?;
        f.write_str(")")
    }
}

impl Display for FunctionDefinition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionDefinition(")?;
        write_optional(f, self.visibility.as_ref())?;
        write!(f, ", {}, ", self.name)?;
        write_optional(f, self.parameters.as_ref())?;
        f.write_str(", ")?;
        write_optional(f, self.return_type.as_ref())?;
        write!(f, ", {})", self.body)
    }
}

impl Display for ParameterList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("ParameterList(")?;
        write_list(f, &self.parameters)?;
        f.write_str(")")
    }
}

impl Display for Parameter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Parameter(")?;
        write_optional(f, self.mutability.as_ref())?;
        write!(f, ", {})", self.specifier)
    }
}

impl Display for ParameterSpecifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ParameterSpecifier::Named(name) => name.fmt(f),
            ParameterSpecifier::Colon => f.write_str(":"),
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Block(")?;
        write_list(f, &self.statements)?;
        f.write_str(", ")?;
        write_optional(f, self.tail.as_ref())?;
        f.write_str(")")
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Statement({}, ", self.expression)?;
        write_optional(f, self.assignment.as_ref())?;
        f.write_str(")")
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // Walk a left-nested range chain iteratively
        let mut rights = Vec::new();
        let mut current = self;
        while let Expression::Range { left, right, .. } = current {
            rights.push(right.as_ref());
            current = left.as_ref();
        }

        for _ in 0..rights.len() {
            f.write_str("Range(")?;
        }
        write_leaf(f, current)?;
        while let Some(right) = rights.pop() {
            write!(f, ", {})", right)?;
        }

        Ok(())
    }
}

fn write_leaf(f: &mut Formatter<'_>, expr: &Expression) -> fmt::Result {
    match expr {
        Expression::NumberLiteral { text, .. } => write!(f, "NumberLiteral({})", text),
        Expression::Identifier(ident) => write!(f, "Identifier({})", ident),
        Expression::Range { left, right, .. } => write!(f, "Range({}, {})", left, right),
        Expression::ArrayType {
            base,
            index,
            element,
            ..
        } => write!(f, "ArrayTypeExpr({}, {}, {})", base, index, element),
    }
}

impl Display for QualifiedIdentifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("QualifiedIdentifier(")?;
        write_list(f, &self.segments)?;
        f.write_str(")")
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        })
    }
}

impl Display for Mutability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mutability::Const => "const",
            Mutability::Mutable => "mutable",
        })
    }
}

impl Display for SyntaxNode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxNode::SourceFile(node) => node.fmt(f),
            SyntaxNode::SyntaxUnit(node) => node.fmt(f),
            SyntaxNode::UseStatement(node) => node.fmt(f),
            SyntaxNode::ProgramStatement(node) => node.fmt(f),
            SyntaxNode::TypeDefinition(node) => node.fmt(f),
            SyntaxNode::ImplementationBlock(node) => node.fmt(f),
            SyntaxNode::FunctionDefinition(node) => node.fmt(f),
            SyntaxNode::ParameterList(node) => node.fmt(f),
            SyntaxNode::Parameter(node) => node.fmt(f),
            SyntaxNode::Block(node) => node.fmt(f),
            SyntaxNode::Statement(node) => node.fmt(f),
            SyntaxNode::Expression(node) => node.fmt(f),
            SyntaxNode::QualifiedIdentifier(node) => node.fmt(f),
        }
    }
}
