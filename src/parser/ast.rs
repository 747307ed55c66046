//! Abstract Syntax Tree definitions
//!
//! This module defines the AST node types for the Sierra language. Every node
//! is exclusively owned by its parent and records the location of its first token.

use crate::error::SourceLocation;

/// Root AST node representing a complete source file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    /// Top-level units in source order
    pub units: Vec<SyntaxUnit>,
}

/// Top-level unit of a source file
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxUnit {
    /// use foo.bar;
    Use(UseStatement),
    /// program Hello;
    Program(ProgramStatement),
    /// type X = expr;
    Type(TypeDefinition),
    /// implementation Foo ... end
    Implementation(ImplementationBlock),
}

impl SyntaxUnit {
    pub fn location(&self) -> &SourceLocation {
        match self {
            SyntaxUnit::Use(node) => &node.location,
            SyntaxUnit::Program(node) => &node.location,
            SyntaxUnit::Type(node) => &node.location,
            SyntaxUnit::Implementation(node) => &node.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UseStatement {
    pub path: QualifiedIdentifier,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramStatement {
    pub name: Identifier,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    pub name: Identifier,
    pub value: Expression,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImplementationBlock {
    pub name: Identifier,
    /// May be empty
    pub functions: Vec<FunctionDefinition>,
    pub location: SourceLocation,
}

/// Function definition inside an implementation block
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub visibility: Option<Visibility>,
    pub name: Identifier,
    /// `None` when the parenthesized list is omitted entirely
    pub parameters: Option<ParameterList>,
    pub return_type: Option<QualifiedIdentifier>,
    pub body: Block,
    pub location: SourceLocation,
}

/// Non-empty parenthesized parameter list
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    pub parameters: Vec<Parameter>,
    pub location: SourceLocation,
}

/// A single parameter; the mandatory trailing `self` is implied by the node
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub mutability: Option<Mutability>,
    pub specifier: ParameterSpecifier,
    pub location: SourceLocation,
}

/// What stands between the optional mutability keyword and `self`
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSpecifier {
    /// `name self`
    Named(Identifier),
    /// `: self`
    Colon,
}

/// begin ... end
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// Trailing expression directly before `end`, giving the block its value
    pub tail: Option<Expression>,
    pub location: SourceLocation,
}

impl Block {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty() && self.tail.is_none()
    }
}

/// `expr;` or `expr := expr;`
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub expression: Expression,
    /// Right-hand side written after `:=`
    pub assignment: Option<Expression>,
    pub location: SourceLocation,
}

/// Expression node
///
/// `Range` chains nest to any depth along `left`, so `Clone`, `PartialEq` and
/// `Drop` walk the chain with an explicit stack instead of recursing.
#[derive(Debug)]
pub enum Expression {
    /// Number literal, text kept verbatim including `_` separators
    NumberLiteral {
        text: String,
        location: SourceLocation,
    },

    /// Bare identifier
    Identifier(Identifier),

    /// left .. right, left-associative
    Range {
        left: Box<Expression>,
        right: Box<Expression>,
        location: SourceLocation,
    },

    /// base[index] of element
    ArrayType {
        base: Identifier,
        index: Identifier,
        element: Identifier,
        location: SourceLocation,
    },
}

impl Expression {
    pub fn location(&self) -> &SourceLocation {
        match self {
            Expression::NumberLiteral { location, .. }
            | Expression::Range { location, .. }
            | Expression::ArrayType { location, .. } => location,
            Expression::Identifier(ident) => &ident.location,
        }
    }

    /// Digits of a number literal with the group separators removed
    pub fn digits(&self) -> Option<String> {
        match self {
            Expression::NumberLiteral { text, .. } => {
                Some(text.chars().filter(|c| *c != '_').collect())
            }
            _ => None,
        }
    }

    /// Empty leaf swapped into a box whose contents are being taken
    fn placeholder() -> Self {
        Expression::NumberLiteral {
            text: String::new(),
            location: SourceLocation::at(0, 0, 0),
        }
    }

    /// Move the children of a range out into `pending`, leaving placeholders
    fn take_children(&mut self, pending: &mut Vec<Expression>) {
        if let Expression::Range { left, right, .. } = self {
            pending.push(std::mem::replace(left.as_mut(), Expression::placeholder()));
            pending.push(std::mem::replace(right.as_mut(), Expression::placeholder()));
        }
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.take_children(&mut pending);

        while let Some(mut expr) = pending.pop() {
            expr.take_children(&mut pending);
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        let mut spine = Vec::new();
        let mut current = self;

        let mut expr = loop {
            match current {
                Expression::Range {
                    left,
                    right,
                    location,
                } => {
                    spine.push((right.as_ref(), location));
                    current = left.as_ref();
                }
                Expression::NumberLiteral { text, location } => {
                    break Expression::NumberLiteral {
                        text: text.clone(),
                        location: location.clone(),
                    }
                }
                Expression::Identifier(ident) => break Expression::Identifier(ident.clone()),
                Expression::ArrayType {
                    base,
                    index,
                    element,
                    location,
                } => {
                    break Expression::ArrayType {
                        base: base.clone(),
                        index: index.clone(),
                        element: element.clone(),
                        location: location.clone(),
                    }
                }
            }
        };

        while let Some((right, location)) = spine.pop() {
            expr = Expression::Range {
                left: Box::new(expr),
                right: Box::new(right.clone()),
                location: location.clone(),
            };
        }

        expr
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        let (mut lhs, mut rhs) = (self, other);

        loop {
            match (lhs, rhs) {
                (
                    Expression::Range {
                        left: left_a,
                        right: right_a,
                        location: location_a,
                    },
                    Expression::Range {
                        left: left_b,
                        right: right_b,
                        location: location_b,
                    },
                ) => {
                    if location_a != location_b || right_a != right_b {
                        return false;
                    }
                    lhs = left_a.as_ref();
                    rhs = left_b.as_ref();
                }
                (
                    Expression::NumberLiteral {
                        text: text_a,
                        location: location_a,
                    },
                    Expression::NumberLiteral {
                        text: text_b,
                        location: location_b,
                    },
                ) => return text_a == text_b && location_a == location_b,
                (Expression::Identifier(a), Expression::Identifier(b)) => return a == b,
                (
                    Expression::ArrayType {
                        base: base_a,
                        index: index_a,
                        element: element_a,
                        location: location_a,
                    },
                    Expression::ArrayType {
                        base: base_b,
                        index: index_b,
                        element: element_b,
                        location: location_b,
                    },
                ) => {
                    return base_a == base_b
                        && index_a == index_b
                        && element_a == element_b
                        && location_a == location_b
                }
                _ => return false,
            }
        }
    }
}

/// Dot-separated path with at least one segment
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedIdentifier {
    pub segments: Vec<Identifier>,
}

impl QualifiedIdentifier {
    /// Segment names in order
    pub fn names(&self) -> Vec<&str> {
        self.segments.iter().map(|s| s.name.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    Const,
    Mutable,
}

/// Any node a single nonterminal procedure can produce
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    SourceFile(SourceFile),
    SyntaxUnit(SyntaxUnit),
    UseStatement(UseStatement),
    ProgramStatement(ProgramStatement),
    TypeDefinition(TypeDefinition),
    ImplementationBlock(ImplementationBlock),
    FunctionDefinition(FunctionDefinition),
    ParameterList(ParameterList),
    Parameter(Parameter),
    Block(Block),
    Statement(Statement),
    Expression(Expression),
    QualifiedIdentifier(QualifiedIdentifier),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc() -> SourceLocation {
        SourceLocation::at(1, 1, 0)
    }

    #[test]
    fn test_number_digits_strip_separators() {
        let expr = Expression::NumberLiteral {
            text: "1_000_000".to_string(),
            location: loc(),
        };
        assert_eq!(expr.digits().as_deref(), Some("1000000"));

        let ident = Expression::Identifier(Identifier {
            name: "x".to_string(),
            location: loc(),
        });
        assert_eq!(ident.digits(), None);
    }

    fn number(text: &str, column: usize) -> Expression {
        Expression::NumberLiteral {
            text: text.to_string(),
            location: SourceLocation::at(1, column, column - 1),
        }
    }

    fn range(left: Expression, right: Expression) -> Expression {
        let location = left.location().clone();
        Expression::Range {
            left: Box::new(left),
            right: Box::new(right),
            location,
        }
    }

    #[test]
    fn test_range_clone_and_equality() {
        let expr = range(range(number("1", 1), number("2", 4)), number("3", 7));
        let copy = expr.clone();
        assert_eq!(copy, expr);
        assert_eq!(copy.to_string(), expr.to_string());

        let other = range(range(number("1", 1), number("5", 4)), number("3", 7));
        assert_ne!(other, expr);
        assert_ne!(number("1", 1), number("1", 2));
    }

    #[test]
    fn test_deep_range_chain_without_recursion() {
        let mut expr = number("0", 1);
        for i in 1..200_000 {
            expr = range(expr, number(&i.to_string(), 1));
        }

        let copy = expr.clone();
        assert!(copy == expr);
        drop(copy);
        drop(expr);
    }

    #[test]
    fn test_empty_block() {
        let block = Block {
            statements: Vec::new(),
            tail: None,
            location: loc(),
        };
        assert!(block.is_empty());
    }
}
